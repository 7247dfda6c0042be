mod animal;
mod condition;
mod registration;
mod report;
mod role;
mod validation;

pub use animal::{Animal, Catalog, CatalogError};
pub use condition::Condition;
pub use registration::RegistrationInput;
pub use report::{
    AdvanceTrigger, ReportField, ReportForm, ReportPayload, Retreat, SUBMIT_FAILED, Step, Wizard,
};
pub use role::Role;
pub use validation::{
    MAX_DESCRIPTION_CHARS, MIN_PASSWORD_CHARS, ValidationError, validate_animal_id,
    validate_description, validate_email, validate_name, validate_password, validate_photo_url,
    validate_species,
};
