//! End-to-end OTP flow against local Redis and PostgreSQL
//!
//! Registers a demo account, reads the issued code straight from Redis
//! (the mock email provider only logs), verifies it and shuts down.
//!
//! Run with: `EMAIL_PROVIDER=mock cargo run -p jt_infra --example otp_flow_demo`

use anyhow::{Context, Result};
use jt_core::domain::entities::OtpModule;
use jt_core::domain::value_objects::OtpKeys;
use jt_core::services::auth::RegisterRequest;
use jt_infra::telemetry::init_tracing;
use jt_infra::{load_config, InfrastructureServices};
use jt_shared::errors::IntoErrorResponse;

#[tokio::main]
async fn main() -> Result<()> {
    let config = load_config();
    init_tracing(&config.logging)?;

    let services = InfrastructureServices::initialize(&config).await?;
    services.database().run_migrations().await?;

    let email = format!("demo+{}@jobtracker.dev", chrono::Utc::now().timestamp());
    let auth = services.auth_service();

    let issued = auth
        .register(RegisterRequest {
            email: email.clone(),
            password: "demo-password".to_string(),
            first_name: "Demo".to_string(),
            last_name: "User".to_string(),
        })
        .await?;
    println!("{} ({} requests left)", issued.message, issued.attempts_remaining);

    // Wrong code first, to show the error envelope
    if let Err(e) = auth.verify_otp(&email, "register", "000000x").await {
        let response = e.to_error_response();
        println!("wrong code -> {}: {}", response.error, response.message);
    }

    let keys = OtpKeys::new(&email, OtpModule::Register);
    let code = services
        .redis()
        .get(&keys.otp)
        .await?
        .context("no OTP stored for the demo account")?;

    let session = auth.verify_otp(&email, "register", &code).await?;
    println!(
        "verified {} (active: {}), token type {} valid for {}s",
        session.user.email,
        session.user.is_active,
        session.access_token.token_type,
        session.access_token.expires_in
    );

    services.shutdown().await;
    Ok(())
}
