#![deny(unused)]
//! Ephemeral - automated retention for a social account's posts.
//!
//! One invocation loads its settings, scans the newest posts once and deletes
//! those past the configured age that are neither allow-listed nor under
//! active discussion. Built plainly it runs once and prints the response to
//! stdout for an external scheduler; with the `lambda` feature it serves the
//! same run as an AWS Lambda handler.

mod telemetry;

use anyhow::Context;
use std::sync::Arc;

use ephemeral_core::config::Settings;
use ephemeral_core::PlatformClient;
use ephemeral_platform::TwitterClient;
use ephemeral_retention::{InvocationResponse, RetentionEngine};

/// Startup: tracing, then settings. Missing or malformed settings abort
/// before any platform call.
fn bootstrap() -> anyhow::Result<Settings> {
    telemetry::configure_tracing()?;

    tracing::info!("Starting Ephemeral v{}", env!("CARGO_PKG_VERSION"));

    let settings = Settings::load().context("Failed to load configuration")?;
    tracing::info!(
        max_post_age = %settings.policy.max_post_age,
        interaction_window = %settings.policy.interaction_window,
        allow_listed = settings.allow_list.len(),
        api = %settings.api_base_url,
        "Configuration loaded"
    );

    Ok(settings)
}

/// One retention run against the configured platform.
async fn invoke(settings: &Settings) -> anyhow::Result<InvocationResponse> {
    let client: Arc<dyn PlatformClient> = Arc::new(
        TwitterClient::from_settings(settings).context("Failed to build platform client")?,
    );

    let engine = RetentionEngine::new(client, settings.policy, settings.allow_list.clone());
    let report = engine.run(chrono::Utc::now()).await;

    Ok(InvocationResponse::from(&report))
}

#[cfg(not(feature = "lambda"))]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = bootstrap()?;

    let response = invoke(&settings).await?;
    println!("{}", response.to_json()?);

    Ok(())
}

#[cfg(feature = "lambda")]
#[tokio::main]
async fn main() -> Result<(), lambda_runtime::Error> {
    use lambda_runtime::{service_fn, LambdaEvent};

    let settings = Arc::new(bootstrap()?);

    lambda_runtime::run(service_fn(move |_event: LambdaEvent<serde_json::Value>| {
        let settings = Arc::clone(&settings);
        async move {
            invoke(&settings)
                .await
                .map_err(lambda_runtime::Error::from)
        }
    }))
    .await
}
