use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::constants::*;
use crate::shared_wheel_game::Player;

static PHONE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"^[0-9]{{{}}}$", PHONE_DIGITS)).expect("phone pattern is valid")
});

pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::new("name_required"));
    }
    Ok(())
}

pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if phone.trim().is_empty() {
        return Err(ValidationError::new("phone_required"));
    }
    if !PHONE_PATTERN.is_match(phone) {
        return Err(ValidationError::new("invalid_phone"));
    }
    Ok(())
}

/// Registration form input. Also the body of the `start` request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct RegistrationRequest {
    #[validate(custom = "validate_name")]
    pub name: String,
    #[validate(custom = "validate_phone")]
    pub phone: String,
}

impl RegistrationRequest {
    pub fn new(name: &str, phone: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            phone: phone.trim().to_string(),
        }
    }

    /// Validates and returns the registration, or per-field messages for the form.
    pub fn checked(name: &str, phone: &str) -> Result<Self, RegistrationErrors> {
        let request = Self::new(name, phone);
        match request.validate() {
            Ok(()) => Ok(request),
            Err(errors) => Err(RegistrationErrors::from(&errors)),
        }
    }

    pub fn into_player(self) -> Player {
        Player::new(&self.name, &self.phone)
    }
}

/// Per-field messages, in the order the form displays them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegistrationErrors {
    pub name: Option<String>,
    pub phone: Option<String>,
}

impl RegistrationErrors {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.phone.is_none()
    }

    pub fn first_message(&self) -> Option<&str> {
        self.name.as_deref().or(self.phone.as_deref())
    }
}

impl From<&ValidationErrors> for RegistrationErrors {
    fn from(errors: &ValidationErrors) -> Self {
        let fields = errors.field_errors();
        let message_for = |field: &str| {
            fields
                .get(field)
                .and_then(|list| list.first())
                .map(|err| code_message(&err.code).to_string())
        };

        Self {
            name: message_for("name"),
            phone: message_for("phone"),
        }
    }
}

fn code_message(code: &str) -> &'static str {
    match code {
        "name_required" => NAME_REQUIRED_ERROR,
        "phone_required" => PHONE_REQUIRED_ERROR,
        "invalid_phone" => PHONE_FORMAT_ERROR,
        _ => GENERIC_ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_registration() {
        let request = RegistrationRequest::checked("  An ", "0912345678").unwrap();
        assert_eq!(request.name, "An");
        assert_eq!(request.phone, "0912345678");
        let player = request.into_player();
        assert_eq!(player.session_id, None);
    }

    #[test]
    fn test_empty_name() {
        let errors = RegistrationRequest::checked("   ", "0912345678").unwrap_err();
        assert_eq!(errors.name.as_deref(), Some(NAME_REQUIRED_ERROR));
        assert!(errors.phone.is_none());
    }

    #[test]
    fn test_phone_rules() {
        assert!(validate_phone("0912345678").is_ok());
        assert!(validate_phone("091234567").is_err());
        assert!(validate_phone("09123456789").is_err());
        assert!(validate_phone("09123x5678").is_err());

        let errors = RegistrationRequest::checked("An", "").unwrap_err();
        assert_eq!(errors.phone.as_deref(), Some(PHONE_REQUIRED_ERROR));

        let errors = RegistrationRequest::checked("", "12345").unwrap_err();
        assert_eq!(errors.name.as_deref(), Some(NAME_REQUIRED_ERROR));
        assert_eq!(errors.phone.as_deref(), Some(PHONE_FORMAT_ERROR));
        assert_eq!(errors.first_message(), Some(NAME_REQUIRED_ERROR));
    }

    #[test]
    fn test_request_body_shape() {
        let request = RegistrationRequest::new("An", "0912345678");
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json, serde_json::json!({"name": "An", "phone": "0912345678"}));
    }
}
