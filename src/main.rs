mod app;
mod config;
mod error;
mod upload;
mod utils;
mod widget;

use anyhow::{anyhow, Context};
use app::LoanDesk;
use config::UploaderConfig;
use eframe::CreationContext;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;
use upload::HttpConversionService;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("loan_uploader=info")),
        )
        .init();

    let config = UploaderConfig::from_env().context("invalid configuration")?;
    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
    let service =
        HttpConversionService::new(&config).context("failed to build the HTTP client")?;
    info!(
        endpoint = %config.endpoint,
        tick_ms = config.tick_interval.as_millis() as u64,
        "starting loan uploader"
    );

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([640.0, 640.0])
            .with_min_inner_size([420.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Loan Uploader",
        options,
        Box::new(move |_cc: &CreationContext| {
            Box::new(LoanDesk::new(runtime, Arc::new(service), config))
        }),
    )
    .map_err(|e| anyhow!("window closed with an error: {e}"))
}
