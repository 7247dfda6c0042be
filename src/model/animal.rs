use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Errors that can occur while loading an animal catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The catalog file is not a JSON array of animals.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The catalog file parsed but lists no animals.
    #[error("animal catalog is empty: {0}")]
    Empty(PathBuf),
}

/// A selectable animal in the zoo's catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Animal {
    pub id: String,
    pub name: String,
    pub species: String,
    pub photo_url: String,
}

impl Animal {
    fn new(id: &str, name: &str, species: &str, photo_url: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            species: species.to_string(),
            photo_url: photo_url.to_string(),
        }
    }
}

/// The finite list of animals offered by the report wizard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    animals: Vec<Animal>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Catalog {
    /// Creates a catalog from an explicit list.
    pub fn new(animals: Vec<Animal>) -> Self {
        Self { animals }
    }

    /// The catalog shipped with the binary.
    pub fn builtin() -> Self {
        Self::new(vec![
            Animal::new("lion-1", "Simba", "Lion", "/animals/lion-1.jpg"),
            Animal::new("lion-2", "Nala", "Lion", "/animals/lion-2.jpg"),
            Animal::new("elephant-1", "Dumbo", "Elephant", "/animals/elephant-1.jpg"),
            Animal::new("giraffe-1", "Melman", "Giraffe", "/animals/giraffe-1.jpg"),
            Animal::new("tiger-1", "Rajah", "Tiger", "/animals/tiger-1.jpg"),
            Animal::new("penguin-1", "Skipper", "Penguin", "/animals/penguin-1.jpg"),
            Animal::new("penguin-2", "Kowalski", "Penguin", "/animals/penguin-2.jpg"),
        ])
    }

    /// Loads a catalog from a JSON array of [`Animal`] records.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path)?;
        let animals: Vec<Animal> = serde_json::from_str(&content)?;
        if animals.is_empty() {
            return Err(CatalogError::Empty(path.to_path_buf()));
        }
        Ok(Self::new(animals))
    }

    /// Returns every animal in catalog order.
    pub fn animals(&self) -> &[Animal] {
        &self.animals
    }

    /// Returns the distinct species labels, in order of first appearance.
    pub fn species(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for animal in &self.animals {
            if !seen.contains(&animal.species.as_str()) {
                seen.push(&animal.species);
            }
        }
        seen
    }

    /// Returns the animals of the given species.
    ///
    /// Falls back to the whole catalog when nothing matches, so the second
    /// report step never shows an empty list.
    pub fn of_species(&self, species: &str) -> Vec<&Animal> {
        let matching: Vec<&Animal> = self
            .animals
            .iter()
            .filter(|a| a.species == species)
            .collect();
        if matching.is_empty() {
            self.animals.iter().collect()
        } else {
            matching
        }
    }

    /// Returns `true` if an animal with this ID exists.
    pub fn contains(&self, animal_id: &str) -> bool {
        self.animals.iter().any(|a| a.id == animal_id)
    }
}
