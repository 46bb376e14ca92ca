use std::fmt;

use crate::constants::*;
use crate::shared_wheel_game::PrizeId;
use crate::spin_machine::SpinRejection;
use crate::validation::RegistrationErrors;

#[derive(Debug, Clone, PartialEq)]
pub enum WheelError {
    ConfigLoad(String),
    SessionStart(String),
    SpinRequest(String),
    Confirm(String),
    Validation(RegistrationErrors),
    SpinUnavailable(SpinRejection),
    EmptyPrizes,
    PrizeNotFound(PrizeId),
    Storage(String),
}

impl WheelError {
    /// Text shown to the visitor. Server-provided messages win over the defaults.
    pub fn user_message(&self) -> String {
        match self {
            WheelError::ConfigLoad(_) => CONFIG_LOAD_ERROR.to_string(),
            WheelError::SessionStart(msg) => server_or(msg, SESSION_START_ERROR),
            WheelError::SpinRequest(msg) => server_or(msg, SPIN_REQUEST_ERROR),
            WheelError::Confirm(msg) => server_or(msg, CONFIRM_ERROR),
            WheelError::Validation(errors) => errors
                .first_message()
                .unwrap_or(GENERIC_ERROR)
                .to_string(),
            WheelError::SpinUnavailable(rejection) => rejection.message().to_string(),
            WheelError::EmptyPrizes | WheelError::PrizeNotFound(_) => GENERIC_ERROR.to_string(),
            WheelError::Storage(_) => STORAGE_ERROR.to_string(),
        }
    }
}

// Transport errors are tagged with a leading '!' by the client so they are not
// mistaken for a message written by the server.
fn server_or(msg: &str, fallback: &str) -> String {
    if msg.is_empty() || msg.starts_with('!') {
        fallback.to_string()
    } else {
        msg.to_string()
    }
}

impl fmt::Display for WheelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WheelError::ConfigLoad(msg) => write!(f, "failed to load game config: {}", msg),
            WheelError::SessionStart(msg) => write!(f, "failed to start game session: {}", msg),
            WheelError::SpinRequest(msg) => write!(f, "spin request failed: {}", msg),
            WheelError::Confirm(msg) => write!(f, "prize confirmation failed: {}", msg),
            WheelError::Validation(errors) => write!(
                f,
                "invalid registration: {}",
                errors.first_message().unwrap_or("unknown field error")
            ),
            WheelError::SpinUnavailable(rejection) => write!(f, "spin rejected: {}", rejection.message()),
            WheelError::EmptyPrizes => write!(f, "prize list is empty"),
            WheelError::PrizeNotFound(id) => write!(f, "prize {} is not on the wheel", id),
            WheelError::Storage(msg) => write!(f, "play history storage error: {}", msg),
        }
    }
}

impl std::error::Error for WheelError {}

impl From<SpinRejection> for WheelError {
    fn from(rejection: SpinRejection) -> Self {
        WheelError::SpinUnavailable(rejection)
    }
}

impl From<RegistrationErrors> for WheelError {
    fn from(errors: RegistrationErrors) -> Self {
        WheelError::Validation(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_prefers_server_text() {
        let err = WheelError::SessionStart("Số điện thoại đã hết lượt".to_string());
        assert_eq!(err.user_message(), "Số điện thoại đã hết lượt");

        let err = WheelError::SessionStart("!network: connection refused".to_string());
        assert_eq!(err.user_message(), SESSION_START_ERROR);

        let err = WheelError::Confirm(String::new());
        assert_eq!(err.user_message(), CONFIRM_ERROR);
    }

    #[test]
    fn test_user_message_for_local_failures() {
        assert_eq!(
            WheelError::SpinUnavailable(SpinRejection::NoPlaysLeft).user_message(),
            NO_PLAYS_LEFT_ERROR
        );
        assert_eq!(WheelError::ConfigLoad("boom".into()).user_message(), CONFIG_LOAD_ERROR);
        assert_eq!(WheelError::Storage("quota".into()).user_message(), STORAGE_ERROR);
    }

    #[test]
    fn test_display_reads_as_a_sentence() {
        let err = WheelError::from(SpinRejection::NoPlaysLeft);
        assert_eq!(err.to_string(), format!("spin rejected: {}", NO_PLAYS_LEFT_ERROR));

        let errors = RegistrationErrors {
            name: None,
            phone: Some("Số điện thoại không hợp lệ".to_string()),
        };
        assert_eq!(
            WheelError::from(errors).to_string(),
            "invalid registration: Số điện thoại không hợp lệ"
        );
    }
}
