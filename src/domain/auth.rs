use serde::{Deserialize, Serialize};

/// What a token may be used for. A token is only accepted where its purpose
/// matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenPurpose {
    /// Sent by mail after sign-up; carries the pending account's name and email.
    ConfirmEmail,
    /// Returned by sign-in; identifies the user on `/profile` routes.
    Access,
    /// Sent by mail to reset a forgotten password.
    PasswordRecovery,
}

impl TokenPurpose {
    pub fn ttl_seconds(self) -> i64 {
        match self {
            TokenPurpose::ConfirmEmail => 60 * 60,
            TokenPurpose::Access => 24 * 60 * 60,
            TokenPurpose::PasswordRecovery => 60 * 60,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub purpose: TokenPurpose,
    pub exp: i64,
}
