//! User repository trait defining the interface for account persistence.
//!
//! Every repository is also an [`AccountDirectory`], so the OTP guard can
//! activate and inspect accounts without knowing about the storage layer.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DomainError;
use crate::services::otp::AccountDirectory;

/// Repository trait for User entity persistence operations
///
/// Emails are stored and looked up in normalized form
/// (see [`jt_shared::utils::email::normalize_email`]).
///
/// # Example
/// ```no_run
/// # use jt_core::repositories::UserRepository;
/// # async fn example(repo: &impl UserRepository) -> Result<(), Box<dyn std::error::Error>> {
/// match repo.find_by_email("a@x.com").await? {
///     Some(user) => println!("User found: {:?}", user.id),
///     None => println!("User not found"),
/// }
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait UserRepository: AccountDirectory {
    /// Find a user by email
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No account registered under `email`
    /// * `Err(DomainError)` - Database or other error occurred
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by their unique identifier
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Persist a new user
    ///
    /// Fails with `DomainError::Validation` when the email is already taken.
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Replace the password hash of the account registered under `email`
    ///
    /// Fails with `DomainError::NotFound` when no such account exists.
    async fn update_password_hash(&self, email: &str, password_hash: &str)
        -> Result<(), DomainError>;
}
