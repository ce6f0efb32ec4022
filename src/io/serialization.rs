// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Annotation persistence and export.
//!
//! Saved annotations are handed to an [`AnnotationSink`] one at a time. The
//! project data collected during a run can also be exported in YAML and
//! JSON formats.

use crate::models::project::{AnnotationRecord, ProjectData};
use anyhow::{Context, Result};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Destination for saved annotations.
///
/// `Ok` acknowledges that the record was stored.
pub trait AnnotationSink {
    fn save(&mut self, record: &AnnotationRecord) -> Result<()>;
}

/// Appends each record as one JSON object per line.
pub struct JsonLinesSink {
    path: PathBuf,
}

impl JsonLinesSink {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AnnotationSink for JsonLinesSink {
    fn save(&mut self, record: &AnnotationRecord) -> Result<()> {
        let mut line = serde_json::to_string(record)?;
        line.push('\n');

        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("failed to open {}", self.path.display()))?;
        file.write_all(line.as_bytes())
            .with_context(|| format!("failed to write {}", self.path.display()))?;
        Ok(())
    }
}

/// Export project data to YAML format.
pub fn export_yaml(data: &ProjectData, path: &Path) -> Result<()> {
    let yaml = serde_yaml::to_string(data)?;
    std::fs::write(path, yaml).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

/// Export project data to JSON format.
pub fn export_json(data: &ProjectData, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(data)?;
    std::fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

/// Export to YAML or JSON depending on the file extension.
pub fn export(data: &ProjectData, path: &Path) -> Result<()> {
    match path.extension().and_then(|s| s.to_str()) {
        Some("yaml") | Some("yml") => export_yaml(data, path),
        Some("json") => export_json(data, path),
        other => anyhow::bail!("Unsupported file extension: {:?}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::annotation::BBox;

    fn record(species: &str, image_index: usize) -> AnnotationRecord {
        AnnotationRecord {
            image: format!("IMG_{:04}.JPG", image_index),
            image_index,
            bbox: BBox::new(50.0, 50.0, 100.0, 100.0),
            species: species.to_string(),
        }
    }

    #[test]
    fn test_json_lines_sink_appends() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = JsonLinesSink::new(dir.path().join("annotations.jsonl"));
        sink.save(&record("deer", 0)).unwrap();
        sink.save(&record("fox", 1)).unwrap();

        let text = std::fs::read_to_string(sink.path()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            r#"{"image":"IMG_0000.JPG","image_index":0,"bbox":[50.0,50.0,100.0,100.0],"species":"deer"}"#
        );
        let second: AnnotationRecord = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second, record("fox", 1));
    }

    #[test]
    fn test_sink_reports_unwritable_path() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = JsonLinesSink::new(dir.path().join("missing").join("out.jsonl"));
        assert!(sink.save(&record("deer", 0)).is_err());
    }

    #[test]
    fn test_export_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let mut data = ProjectData::new("/cam/2025-10".to_string());
        data.records.push(record("moose", 4));

        let yaml_path = dir.path().join("out.yaml");
        export(&data, &yaml_path).unwrap();
        let from_yaml: ProjectData =
            serde_yaml::from_str(&std::fs::read_to_string(&yaml_path).unwrap()).unwrap();
        assert_eq!(from_yaml, data);

        let json_path = dir.path().join("out.json");
        export(&data, &json_path).unwrap();
        let from_json: ProjectData =
            serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(from_json, data);

        assert!(export(&data, &dir.path().join("out.csv")).is_err());
    }
}
