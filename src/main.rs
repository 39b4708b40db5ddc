// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Lokate API Server
//!
//! Serves accounts, places, saved places and journey planning for the
//! Lokate clients.

use lokate::{
    config::{Config, DatabaseBackend},
    db::{FirestoreDb, MemoryDb},
    services::{DisabledMailer, Mailer, SmtpMailer},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging for GCP
    init_logging()?;

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting Lokate API");

    let mailer: Arc<dyn Mailer> = match &config.smtp {
        Some(smtp) => {
            tracing::info!(host = %smtp.host, port = smtp.port, "SMTP relay configured");
            Arc::new(SmtpMailer::new(smtp)?)
        }
        None => {
            tracing::warn!("SMTP_HOST not set, contact-us mail is disabled");
            Arc::new(DisabledMailer)
        }
    };

    let state = match config.database_backend {
        DatabaseBackend::Firestore => {
            let db = FirestoreDb::new(&config.gcp_project_id).await?;
            AppState::new(config.clone(), Arc::new(db), mailer)?
        }
        DatabaseBackend::Memory => {
            tracing::warn!("Using in-memory storage, data will not persist");
            AppState::new(config.clone(), Arc::new(MemoryDb::new()), mailer)?
        }
    };

    // Build router
    let app = lokate::routes::create_router(Arc::new(state));

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging (GCP-compliant).
fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("lokate=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .with(format)
        .init();
    Ok(())
}
