use std::{path::PathBuf, sync::Arc};

mod backend_bridge;
mod controller;
mod ui;

use anyhow::{anyhow, Context};
use clap::Parser;
use client_core::{ClientSettings, HrApi, HttpHrClient};
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::{
    backend_bridge::{commands::BackendCommand, runtime::spawn_backend_thread},
    controller::{events::UiEvent, screens::Tab},
    ui::{HrConsoleApp, TAB_STORAGE_KEY},
};

#[derive(Parser, Debug)]
#[command(name = "hr_console", about = "Desktop console for the HR API")]
struct Args {
    /// Settings file; defaults to the per-user config directory.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Overrides the configured API base URL.
    #[arg(long)]
    base_url: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let mut settings =
        ClientSettings::load(args.config.as_deref()).context("load console settings")?;
    if let Some(base_url) = args.base_url {
        settings.base_url = base_url;
    }

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let api: Arc<dyn HrApi> = Arc::new(HttpHrClient::from_settings(&settings)?);
    tracing::info!(base_url = %settings.base_url, "starting HR console");

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    spawn_backend_thread(api, cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("HR Console")
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([820.0, 560.0]),
        ..Default::default()
    };
    let base_url = settings.base_url.clone();
    let confirm_deletes = settings.confirm_deletes;
    eframe::run_native(
        "HR Console",
        options,
        Box::new(move |cc| {
            let tab = cc
                .storage
                .and_then(|storage| storage.get_string(TAB_STORAGE_KEY))
                .and_then(|text| serde_json::from_str::<Tab>(&text).ok())
                .unwrap_or_default();
            Ok(Box::new(HrConsoleApp::new(
                cmd_tx,
                ui_rx,
                base_url,
                confirm_deletes,
                tab,
            )))
        }),
    )
    .map_err(|err| anyhow!("console window failed: {err}"))
}
