//! # plumhubd — plumhub daemon
//!
//! Composition root that wires the house adapter and the rules together.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars)
//! - Install the `tracing` subscriber
//! - Initialize the house and wait until the configured load is discovered
//! - Install the motion and auto-off rules on that load
//! - Refresh the house state periodically while running
//! - Handle graceful shutdown (SIGTERM/SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no automation logic belongs here.

mod config;

use std::sync::Arc;

use anyhow::Context;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use plumhub_adapter_virtual::VirtualHouse;
use plumhub_app::ports::{House, Load};
use plumhub_app::refresh::keep_refreshed;
use plumhub_app::rules::{arm_off_timer_on_brighten, turn_on_on_motion};
use plumhub_app::startup::wait_for_load;

use config::{Config, RulesConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    let shutdown = CancellationToken::new();
    tokio::spawn({
        let shutdown = shutdown.clone();
        async move {
            shutdown_signal().await;
            tracing::info!("shutdown requested");
            shutdown.cancel();
        }
    });

    let mut house = VirtualHouse::new(config.house.clone());
    house
        .initialize()
        .await
        .with_context(|| format!("failed to initialize {} house", house.name()))?;

    let load = wait_for_load(
        &house,
        &config.rules.load,
        config.startup.poll_interval(),
        &shutdown,
    )
    .await;

    if let Some(load) = load {
        install_rules(&load, &config.rules)?;
        tracing::info!(load = load.name(), "rules installed, running");
        keep_refreshed(&house, config.startup.refresh_interval(), &shutdown).await;
    }

    house.teardown().await.context("failed to tear down house")?;
    tracing::info!("plumhubd stopped");
    Ok(())
}

/// Install the motion-on and auto-off rules on `load`.
fn install_rules<L: Load + 'static>(load: &Arc<L>, rules: &RulesConfig) -> anyhow::Result<()> {
    let on_motion = load.set_trigger(turn_on_on_motion(Arc::clone(load), rules.on_level()));
    let off_timer = load.set_trigger(
        arm_off_timer_on_brighten(Arc::clone(load), rules.off_after())
            .context("failed to build auto-off rule")?,
    );
    tracing::debug!(
        %on_motion,
        %off_timer,
        on_level = rules.on_level,
        off_after_secs = rules.off_after_secs,
        "triggers registered"
    );
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
