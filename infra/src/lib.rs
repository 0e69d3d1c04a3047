//! # Infrastructure Layer
//!
//! Concrete implementations behind the seams defined in `jt_core`:
//!
//! - **Cache**: Redis client and the `KeyValueStore` adapter holding OTP state
//! - **Email**: OTP delivery through the Brevo HTTP API, plus a log-only mock
//! - **Database**: PostgreSQL connection pool and user repository using SQLx
//! - **Telemetry**: `tracing` subscriber installation
//!
//! [`InfrastructureServices`] owns the process-wide handles: it is built once
//! at startup and closed with [`InfrastructureServices::shutdown`].

use std::sync::Arc;

use jt_core::services::auth::{AuthService, AuthServiceConfig};
use jt_core::services::otp::{OtpGuard, OtpNotifier};
use jt_core::services::token::TokenService;
use jt_shared::config::AppConfig;

/// Cache module - Redis client and OTP store adapter
pub mod cache;

/// Database module - PostgreSQL implementations using SQLx
pub mod database;

/// Email module - OTP delivery providers
pub mod email;

/// Telemetry module - tracing subscriber setup
pub mod telemetry;

use cache::{RedisClient, RedisOtpStore};
use database::{DatabasePool, PgUserRepository};

/// OTP guard wired to Redis, the configured email provider and PostgreSQL
pub type OtpGuardService = OtpGuard<RedisOtpStore, dyn OtpNotifier, PgUserRepository>;

/// Auth flows wired to the same collaborators as [`OtpGuardService`]
pub type AuthFlowService = AuthService<PgUserRepository, RedisOtpStore, dyn OtpNotifier>;

/// Infrastructure service container
pub struct InfrastructureServices {
    database: DatabasePool,
    redis: RedisClient,
    otp_guard: OtpGuardService,
    auth_service: Arc<AuthFlowService>,
}

impl InfrastructureServices {
    /// Connect every backend and assemble the services
    ///
    /// This function sets up:
    /// - The PostgreSQL connection pool
    /// - The Redis connection
    /// - The email provider
    /// - The OTP guard and the auth flows on top of them
    pub async fn initialize(config: &AppConfig) -> Result<Self, InfrastructureError> {
        tracing::info!(
            environment = %config.environment,
            event = "infrastructure_init",
            "Initializing infrastructure services"
        );

        let database = DatabasePool::new(config.database.clone()).await?;
        let redis = RedisClient::new(config.cache.clone()).await?;
        let notifier = email::create_email_service(&config.email, config.otp.code_ttl_minutes())?;

        let users = Arc::new(PgUserRepository::new(database.get_pool().clone()));
        let store = Arc::new(RedisOtpStore::new(redis.clone()));
        let otp_guard = OtpGuard::new(store, notifier, users.clone(), config.otp.clone());

        let token_service = Arc::new(TokenService::new(config.jwt.clone()));
        let auth_service = Arc::new(AuthService::new(
            users,
            otp_guard.clone(),
            token_service,
            AuthServiceConfig::default(),
        ));

        tracing::info!(
            event = "infrastructure_ready",
            "Infrastructure services initialized successfully"
        );

        Ok(Self {
            database,
            redis,
            otp_guard,
            auth_service,
        })
    }

    pub fn otp_guard(&self) -> &OtpGuardService {
        &self.otp_guard
    }

    pub fn auth_service(&self) -> Arc<AuthFlowService> {
        Arc::clone(&self.auth_service)
    }

    pub fn database(&self) -> &DatabasePool {
        &self.database
    }

    pub fn redis(&self) -> &RedisClient {
        &self.redis
    }

    /// Check both backends; `Ok(false)` when either answered unexpectedly
    pub async fn health_check(&self) -> Result<bool, InfrastructureError> {
        let redis_ok = self.redis.health_check().await?;
        let database_ok = self.database.health_check().await?;
        Ok(redis_ok && database_ok)
    }

    /// Close the database pool and drop the Redis connection
    pub async fn shutdown(self) {
        tracing::info!(event = "infrastructure_shutdown", "Shutting down infrastructure services");
        self.database.close().await;
        drop(self.redis);
        tracing::info!(event = "infrastructure_stopped", "Infrastructure services stopped");
    }
}

/// Load configuration from the environment and initialize infrastructure
///
/// Reads the environment-specific `.env` file (falling back to `.env`)
/// before building [`AppConfig`].
pub async fn initialize() -> Result<(AppConfig, InfrastructureServices), InfrastructureError> {
    let config = load_config();
    let services = InfrastructureServices::initialize(&config).await?;
    Ok((config, services))
}

/// Load application configuration, reading `.env` files if present
pub fn load_config() -> AppConfig {
    let environment = jt_shared::Environment::from_env();
    if dotenvy::from_filename(environment.env_file()).is_err() {
        dotenvy::dotenv().ok();
    }
    AppConfig::from_env()
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Email delivery error
    #[error("Email service error: {0}")]
    Email(String),
}
