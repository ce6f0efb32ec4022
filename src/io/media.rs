// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Image sequence loading.
//!
//! This module lists the images of a trail-camera folder in order and
//! decodes them to RGBA pixels suitable for display in egui.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// File extensions recognised as images (compared case-insensitively).
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tif", "tiff", "webp"];

/// A decoded image.
pub struct LoadedImage {
    pub width: u32,
    pub height: u32,
    /// RGBA8, row-major
    pub pixels: Vec<u8>,
}

/// Decode an image file to RGBA8.
pub fn load_image(path: &Path) -> Result<LoadedImage> {
    let img = image::open(path)
        .with_context(|| format!("failed to decode {}", path.display()))?
        .to_rgba8();
    let (width, height) = img.dimensions();
    Ok(LoadedImage {
        width,
        height,
        pixels: img.into_raw(),
    })
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| IMAGE_EXTENSIONS.iter().any(|ext| e.eq_ignore_ascii_case(ext)))
        .unwrap_or(false)
}

/// Ordered list of images with a cursor on the one being annotated.
#[derive(Debug, Clone, Default)]
pub struct ImageSequence {
    dir: PathBuf,
    paths: Vec<PathBuf>,
    position: usize,
}

impl ImageSequence {
    /// List the images in `dir`, sorted by file name.
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let entries = std::fs::read_dir(dir)
            .with_context(|| format!("failed to read image folder {}", dir.display()))?;

        let mut paths = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.is_file() && is_image(&path) {
                paths.push(path);
            }
        }
        paths.sort();

        log::info!("Found {} images in {}", paths.len(), dir.display());
        Ok(Self {
            dir: dir.to_path_buf(),
            paths,
            position: 0,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn current(&self) -> Option<&Path> {
        self.paths.get(self.position).map(PathBuf::as_path)
    }

    /// Move to the next image. At the end the cursor stays put.
    pub fn advance(&mut self) -> Option<&Path> {
        if self.position + 1 >= self.paths.len() {
            return None;
        }
        self.position += 1;
        self.current()
    }
}

/// Identifier used for an image in saved records: its file name.
pub fn image_id(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
