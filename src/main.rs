// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! RIISTA - trail-camera bounding-box annotator
//!
//! A cross-platform desktop application for drawing and labelling bounding
//! boxes over a folder of trail-camera images, with zoom, pan and undo/redo.

mod app;
mod config;
mod editor;
mod history;
mod input;
mod io;
mod models;
mod session;
mod ui;
mod util;

use anyhow::{Context, Result};
use app::RiistaApp;
use clap::Parser;
use config::AnnotatorConfig;
use io::{media::ImageSequence, serialization::JsonLinesSink};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "riista")]
#[command(about = "Draw and label bounding boxes on trail-camera images")]
struct Cli {
    /// Folder of images to annotate
    #[arg(value_name = "IMAGES_DIR")]
    images: Option<PathBuf>,

    /// YAML configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// File saved annotations are appended to (JSON lines)
    #[arg(long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Initial species label
    #[arg(long, value_name = "LABEL")]
    species: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AnnotatorConfig::load(path)?,
        None => AnnotatorConfig::default(),
    };
    if let Some(output) = cli.output {
        config.output = output;
    }

    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    let sequence = cli
        .images
        .as_deref()
        .map(ImageSequence::from_dir)
        .transpose()
        .context("failed to open image folder")?;

    let species = cli
        .species
        .or_else(|| config.species.first().cloned())
        .unwrap_or_default();
    let sink = Box::new(JsonLinesSink::new(config.output.clone()));
    log::info!("Saving annotations to {}", sink.path().display());

    // Configure egui options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("RIISTA - Trail-camera annotator"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "RIISTA",
        options,
        Box::new(move |_cc| Ok(Box::new(RiistaApp::new(config, sequence, sink, species)))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
