use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;
use url::Url;

/// Longest description accepted by the report service, in characters.
pub const MAX_DESCRIPTION_CHARS: usize = 65_535;

/// Shortest password accepted at registration, in characters.
pub const MIN_PASSWORD_CHARS: usize = 8;

/// Validation errors for form fields.
///
/// The `Display` text is what the forms show inline under the offending field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Species cannot be empty")]
    EmptySpecies,
    #[error("Animal cannot be empty")]
    EmptyAnimal,
    #[error("Description cannot be empty")]
    EmptyDescription,
    #[error("Description must be at most {MAX_DESCRIPTION_CHARS} characters")]
    DescriptionTooLong(usize),
    #[error("Condition must be one of healthy, sick, recovering, chronic")]
    InvalidCondition(String),
    #[error("Photo must be a valid URL")]
    InvalidPhotoUrl(String),
    #[error("Name cannot be empty")]
    EmptyName,
    #[error("Invalid email address")]
    InvalidEmail(String),
    #[error("Password must be at least {MIN_PASSWORD_CHARS} characters")]
    PasswordTooShort,
    #[error("Role must be admin or caretaker")]
    InvalidRole(String),
}

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}$")
        .expect("valid hardcoded regex")
});

/// Validates the species label picked at the first report step.
pub fn validate_species(species: &str) -> Result<(), ValidationError> {
    if species.is_empty() {
        Err(ValidationError::EmptySpecies)
    } else {
        Ok(())
    }
}

/// Validates the animal identifier picked at the second report step.
pub fn validate_animal_id(animal_id: &str) -> Result<(), ValidationError> {
    if animal_id.is_empty() {
        Err(ValidationError::EmptyAnimal)
    } else {
        Ok(())
    }
}

/// Validates a report description: 1 to [`MAX_DESCRIPTION_CHARS`] characters.
pub fn validate_description(description: &str) -> Result<(), ValidationError> {
    match description.chars().count() {
        0 => Err(ValidationError::EmptyDescription),
        n if n > MAX_DESCRIPTION_CHARS => Err(ValidationError::DescriptionTooLong(n)),
        _ => Ok(()),
    }
}

/// Validates that the photo reference parses as an absolute URL.
pub fn validate_photo_url(photo_url: &str) -> Result<(), ValidationError> {
    Url::parse(photo_url)
        .map(|_| ())
        .map_err(|_| ValidationError::InvalidPhotoUrl(photo_url.to_string()))
}

/// Validates a registrant's display name.
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        Err(ValidationError::EmptyName)
    } else {
        Ok(())
    }
}

/// Validates the shape of an email address (`local@domain.tld`).
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if EMAIL_RE.is_match(email) {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail(email.to_string()))
    }
}

/// Validates a password: at least [`MIN_PASSWORD_CHARS`] characters.
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() < MIN_PASSWORD_CHARS {
        Err(ValidationError::PasswordTooShort)
    } else {
        Ok(())
    }
}
