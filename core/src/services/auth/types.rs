//! Request and result types for the authentication flows

use serde::{Deserialize, Serialize};

use crate::domain::entities::token::AccessToken;
use crate::domain::entities::user::User;

/// Input for account registration
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

/// Input for password sign-in
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Account and session credential returned after a verified OTP
#[derive(Debug, Clone, Serialize)]
pub struct VerifiedSession {
    pub user: User,
    #[serde(flatten)]
    pub access_token: AccessToken,
}
