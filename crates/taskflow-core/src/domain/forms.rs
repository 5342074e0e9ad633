//! Login and registration form input.

use taskflow_shared::dto::{LoginRequest, RegisterUserRequest};

use crate::error::ValidationError;

/// Minimum password length accepted at registration.
pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn validate(&self) -> Result<LoginRequest, ValidationError> {
        require("email", &self.email, "Email is required")?;
        require("password", &self.password, "Password is required")?;
        Ok(LoginRequest {
            username: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    pub email: String,
    pub password: String,
}

impl RegisterForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn validate(&self) -> Result<RegisterUserRequest, ValidationError> {
        require("email", &self.email, "Email is required")?;
        require("password", &self.password, "Password is required")?;
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ValidationError::new(
                "password",
                format!("Min {} chars", MIN_PASSWORD_LEN),
            ));
        }
        Ok(RegisterUserRequest {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

fn require(field: &'static str, value: &str, message: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(field, message));
    }
    Ok(())
}
