//! Credential-sensitive flows gated by an OTP challenge.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::OtpError;

/// The flow an OTP belongs to
///
/// Every key the guard owns is scoped by `(email, module)`, so a block on
/// `login` never affects `register` for the same address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OtpModule {
    /// Account creation; success activates the account
    Register,
    /// Sign-in; success requires an active account
    Login,
    /// Password recovery; success requires an active account
    ForgetPassword,
}

impl OtpModule {
    /// All modules, in a stable order
    pub const ALL: [OtpModule; 3] = [Self::Register, Self::Login, Self::ForgetPassword];

    /// Key segment used in store keys and log fields
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Register => "register",
            Self::Login => "login",
            Self::ForgetPassword => "forgetpassword",
        }
    }

    /// Whether successful verification activates the account
    pub fn activates_account(&self) -> bool {
        matches!(self, Self::Register)
    }
}

impl fmt::Display for OtpModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OtpModule {
    type Err = OtpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "register" => Ok(Self::Register),
            "login" => Ok(Self::Login),
            "forgetpassword" => Ok(Self::ForgetPassword),
            _ => Err(OtpError::InvalidModule {
                module: s.to_string(),
            }),
        }
    }
}
