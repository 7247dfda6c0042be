//! Animal health report: form state, payload, and the four-step wizard.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::condition::Condition;
use super::validation::{
    ValidationError, validate_animal_id, validate_description, validate_photo_url,
    validate_species,
};

/// Message attached to the animal field when the report service fails.
pub const SUBMIT_FAILED: &str = "Failed to submit report";

/// A page of the report wizard. The discriminant is the 1-based step index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Step {
    Species = 1,
    Animal = 2,
    Description = 3,
    Condition = 4,
}

/// How the user moves past a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceTrigger {
    /// Picking an item both fills the field and moves to the next step.
    OnSelect,
    /// The user fills the fields, then confirms explicitly.
    Confirm,
}

/// A field of [`ReportForm`], used to key inline error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ReportField {
    Species,
    AnimalId,
    Description,
    Condition,
    PhotoUrl,
}

static ALL_STEPS: &[Step] = &[Step::Species, Step::Animal, Step::Description, Step::Condition];

impl Step {
    /// Returns all steps in order.
    pub fn all() -> &'static [Step] {
        ALL_STEPS
    }

    /// Returns the 1-based index of this step.
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Returns the following step, or `None` at the last one.
    pub fn next(self) -> Option<Self> {
        match self {
            Step::Species => Some(Step::Animal),
            Step::Animal => Some(Step::Description),
            Step::Description => Some(Step::Condition),
            Step::Condition => None,
        }
    }

    /// Returns the preceding step, or `None` at the first one.
    pub fn prev(self) -> Option<Self> {
        match self {
            Step::Species => None,
            Step::Animal => Some(Step::Species),
            Step::Description => Some(Step::Animal),
            Step::Condition => Some(Step::Description),
        }
    }

    /// The fields this step renders and validates.
    pub fn fields(self) -> &'static [ReportField] {
        match self {
            Step::Species => &[ReportField::Species],
            Step::Animal => &[ReportField::AnimalId],
            Step::Description => &[ReportField::Description],
            Step::Condition => &[ReportField::Condition, ReportField::PhotoUrl],
        }
    }

    pub fn advance_trigger(self) -> AdvanceTrigger {
        match self {
            Step::Species | Step::Animal => AdvanceTrigger::OnSelect,
            Step::Description | Step::Condition => AdvanceTrigger::Confirm,
        }
    }

    /// Heading shown above the step.
    pub fn title(self) -> &'static str {
        match self {
            Step::Species => "Choose the animal to examine",
            Step::Animal => "Choose the individual",
            Step::Description => "Health history",
            Step::Condition => "Health status",
        }
    }
}

/// The record shared by every wizard step and filled in incrementally.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReportForm {
    pub species: String,
    pub animal_id: String,
    pub description: String,
    pub condition: Condition,
    pub photo_url: String,
}

impl ReportForm {
    /// Validates a single field.
    pub fn validate_field(&self, field: ReportField) -> Result<(), ValidationError> {
        match field {
            ReportField::Species => validate_species(&self.species),
            ReportField::AnimalId => validate_animal_id(&self.animal_id),
            ReportField::Description => validate_description(&self.description),
            // The enum cannot hold anything outside the allowed set.
            ReportField::Condition => Ok(()),
            ReportField::PhotoUrl => validate_photo_url(&self.photo_url),
        }
    }

    /// Validates only the fields owned by `step`.
    pub fn validate_step(&self, step: Step) -> Vec<(ReportField, ValidationError)> {
        step.fields()
            .iter()
            .filter_map(|&field| self.validate_field(field).err().map(|e| (field, e)))
            .collect()
    }

    /// Validates the whole record, every step in order.
    pub fn validate(&self) -> Vec<(ReportField, ValidationError)> {
        Step::all()
            .iter()
            .flat_map(|&step| self.validate_step(step))
            .collect()
    }

    /// Builds the service payload from this form.
    ///
    /// `request_doctor` is a deployment policy rather than a form field; the
    /// wizard has no control for it.
    pub fn to_payload(&self, request_doctor: bool) -> ReportPayload {
        ReportPayload {
            animal_id: self.animal_id.clone(),
            description: self.description.clone(),
            is_request_doctor: request_doctor,
            photo_url: self.photo_url.clone(),
        }
    }
}

/// What the report service receives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportPayload {
    pub animal_id: String,
    pub description: String,
    pub is_request_doctor: bool,
    pub photo_url: String,
}

/// Outcome of [`Wizard::retreat`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Retreat {
    /// Moved back to the given step.
    Moved(Step),
    /// Already at the first step; the caller should leave the wizard.
    Exit,
}

/// Step index, shared form state, and inline errors for one report session.
#[derive(Debug, Clone)]
pub struct Wizard {
    step: Step,
    form: ReportForm,
    errors: BTreeMap<ReportField, String>,
    submitting: bool,
    submitted: bool,
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new()
    }
}

impl Wizard {
    /// Starts a fresh report at the first step.
    pub fn new() -> Self {
        Self {
            step: Step::Species,
            form: ReportForm::default(),
            errors: BTreeMap::new(),
            submitting: false,
            submitted: false,
        }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn form(&self) -> &ReportForm {
        &self.form
    }

    /// Heading for the current step. Step 2 is headed by the chosen species.
    pub fn title(&self) -> &str {
        match self.step {
            Step::Animal if !self.form.species.is_empty() => &self.form.species,
            step => step.title(),
        }
    }

    /// Moves one step forward. A no-op at the last step.
    ///
    /// Returns `true` if the step changed.
    pub fn advance(&mut self) -> bool {
        match self.step.next() {
            Some(next) => {
                debug!(from = self.step.index(), to = next.index(), "report wizard advanced");
                self.step = next;
                true
            }
            None => false,
        }
    }

    /// Moves one step back, or signals exit at the first step.
    pub fn retreat(&mut self) -> Retreat {
        match self.step.prev() {
            Some(prev) => {
                debug!(from = self.step.index(), to = prev.index(), "report wizard retreated");
                self.step = prev;
                Retreat::Moved(prev)
            }
            None => Retreat::Exit,
        }
    }

    /// Picks the species at step 1 and advances in the same action.
    ///
    /// Returns `true` if the wizard moved on. Does nothing outside step 1.
    pub fn select_species(&mut self, species: &str) -> bool {
        if self.step != Step::Species {
            return false;
        }
        self.form.species = species.to_string();
        self.check_step_and_advance()
    }

    /// Picks the animal at step 2 and advances in the same action.
    ///
    /// Returns `true` if the wizard moved on. Does nothing outside step 2.
    pub fn select_animal(&mut self, animal_id: &str) -> bool {
        if self.step != Step::Animal {
            return false;
        }
        self.form.animal_id = animal_id.to_string();
        self.check_step_and_advance()
    }

    /// Updates the description. Only writable at step 3.
    pub fn set_description(&mut self, description: &str) -> bool {
        if self.step != Step::Description {
            return false;
        }
        self.form.description = description.to_string();
        true
    }

    /// Updates the condition. Only writable at step 4.
    pub fn set_condition(&mut self, condition: Condition) -> bool {
        if self.step != Step::Condition {
            return false;
        }
        self.form.condition = condition;
        true
    }

    /// Updates the photo URL. Only writable at step 4.
    pub fn set_photo_url(&mut self, photo_url: &str) -> bool {
        if self.step != Step::Condition {
            return false;
        }
        self.form.photo_url = photo_url.to_string();
        true
    }

    /// Explicit confirmation for steps whose trigger is [`AdvanceTrigger::Confirm`].
    ///
    /// Validates the current step's fields and advances when they pass.
    /// Returns `true` if validation passed.
    pub fn confirm(&mut self) -> bool {
        if self.step.advance_trigger() != AdvanceTrigger::Confirm {
            return false;
        }
        if !self.validate_current_step() {
            return false;
        }
        self.advance();
        true
    }

    /// Validates the whole record and builds the payload to send.
    ///
    /// Only available at the last step. Returns `None` (and records inline
    /// errors) when validation fails, and also while a previous submission
    /// is still in flight or has already succeeded. The step never changes.
    pub fn submit(&mut self, request_doctor: bool) -> Option<ReportPayload> {
        if self.step != Step::Condition || self.submitting || self.submitted {
            return None;
        }
        self.errors.clear();
        let failures = self.form.validate();
        if !failures.is_empty() {
            for (field, err) in failures {
                self.set_error(field, err.to_string());
            }
            return None;
        }
        self.submitting = true;
        Some(self.form.to_payload(request_doctor))
    }

    /// Records a failed submission against the animal field.
    pub fn submission_failed(&mut self) {
        self.submitting = false;
        self.set_error(ReportField::AnimalId, SUBMIT_FAILED.to_string());
    }

    /// Records a successful submission.
    pub fn submission_succeeded(&mut self) {
        self.submitting = false;
        self.submitted = true;
    }

    /// Returns `true` while a submission is in flight.
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Returns `true` once the service accepted the report.
    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    /// Attaches an inline error to a field, replacing any previous one.
    pub fn set_error(&mut self, field: ReportField, message: String) {
        self.errors.insert(field, message);
    }

    /// Returns the inline error for a field, if any.
    pub fn error(&self, field: ReportField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn clear_errors(&mut self) {
        self.errors.clear();
    }

    fn validate_current_step(&mut self) -> bool {
        self.errors.clear();
        let failures = self.form.validate_step(self.step);
        let ok = failures.is_empty();
        for (field, err) in failures {
            self.set_error(field, err.to_string());
        }
        ok
    }

    fn check_step_and_advance(&mut self) -> bool {
        self.validate_current_step() && self.advance()
    }
}
