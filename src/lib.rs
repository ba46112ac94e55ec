//! Lendr application library
//!
//! Wires the books and borrow modules onto the shared document store and
//! exposes the bootstrap used by the server and CLI binaries.

pub mod modules;
pub mod timestamp;

use std::sync::Arc;

use anyhow::Context;
use lendr_kernel::{settings::Settings, InitCtx, ModuleRegistry};

pub use modules::*;

/// Build the registry of every module, backed by fresh in-process collections.
pub fn build_registry(settings: &Settings) -> ModuleRegistry {
    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, settings);
    registry
}

/// Build, initialize and start every module.
pub async fn bootstrap(settings: &Settings) -> anyhow::Result<Arc<ModuleRegistry>> {
    let registry = build_registry(settings);
    let ctx = InitCtx { settings };
    registry
        .init_modules(&ctx)
        .await
        .context("module initialization failed")?;
    registry
        .start_modules(&ctx)
        .await
        .context("module startup failed")?;
    Ok(Arc::new(registry))
}

/// Run the service until a shutdown signal arrives, then stop every module.
pub async fn run(settings: &Settings) -> anyhow::Result<()> {
    tracing::info!(
        env = ?settings.environment,
        db = %settings.database.name,
        stock_check = ?settings.borrow.stock_check,
        "lendr bootstrap starting"
    );

    let registry = bootstrap(settings).await?;
    let served = lendr_http::start_server(&registry, settings).await;
    let stopped = registry.stop_modules().await;

    served?;
    stopped?;
    tracing::info!("lendr shut down cleanly");
    Ok(())
}
