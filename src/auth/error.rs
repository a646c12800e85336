use anyhow::anyhow;
use serde::Deserialize;

use crate::error::FirebaseError;

#[derive(Debug, Deserialize)]
pub(crate) struct AuthApiError {
    error: AuthApiErrorInfo,
}

#[derive(Debug, Deserialize)]
pub struct AuthApiErrorInfo {
    pub message: String,
    #[serde(default)]
    pub errors: Vec<SpecificAuthApiErrorInfo>,
    pub code: u16,
}

#[derive(Debug, Deserialize)]
pub struct SpecificAuthApiErrorInfo {
    pub domain: String,
    pub message: String,
    pub reason: String,
}

impl From<AuthApiError> for FirebaseError {
    fn from(err: AuthApiError) -> Self {
        // The admin API reports a duplicate email as DUPLICATE_EMAIL, while
        // the public sign-up endpoint uses EMAIL_EXISTS. Accept both.
        match err.error.message.as_ref() {
            "EMAIL_EXISTS" | "DUPLICATE_EMAIL" => FirebaseError::EmailAlreadyExists,
            "PHONE_NUMBER_EXISTS" => FirebaseError::PhoneNumberAlreadyExists,
            _ => anyhow!("{:?}", err).into(),
        }
    }
}
