use std::fmt;

use super::role::Role;
use super::validation::{ValidationError, validate_email, validate_name, validate_password};

/// A validated staff registration, ready to hand to the account service.
#[derive(Clone, PartialEq, Eq)]
pub struct RegistrationInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

impl RegistrationInput {
    /// Creates a registration, validating name, email, and password.
    pub fn new(
        name: String,
        email: String,
        password: String,
        role: Role,
    ) -> Result<Self, ValidationError> {
        validate_name(&name)?;
        validate_email(&email)?;
        validate_password(&password)?;
        Ok(Self {
            name,
            email,
            password,
            role,
        })
    }
}

// Keeps the password out of logs and panic messages.
impl fmt::Debug for RegistrationInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationInput")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"********")
            .field("role", &self.role)
            .finish()
    }
}
