// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Project state management.
//!
//! This module holds the per-image metadata and the records that are handed
//! to the persistence sink and exported at the end of a run.

use super::annotation::{Annotation, BBox};
use serde::{Deserialize, Serialize};

/// Identity and size of the image being annotated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageInfo {
    /// File name of the image, used as its id
    pub id: String,
    /// Position of the image in the sequence
    pub index: usize,
    pub width: u32,
    pub height: u32,
}

/// A saved annotation as sent to the persistence sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationRecord {
    pub image: String,
    pub image_index: usize,
    pub bbox: BBox,
    pub species: String,
}

impl AnnotationRecord {
    /// Build the record for an annotation on the given image.
    pub fn new(image: &ImageInfo, annotation: &Annotation) -> Self {
        Self {
            image: image.id.clone(),
            image_index: image.index,
            bbox: annotation.bbox,
            species: annotation.species.clone(),
        }
    }
}

/// Complete project data for serialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectData {
    pub image_dir: String,
    pub records: Vec<AnnotationRecord>,
}

impl ProjectData {
    /// Create a new project for the given image directory.
    pub fn new(image_dir: String) -> Self {
        Self {
            image_dir,
            records: Vec::new(),
        }
    }

    /// Number of distinct images that have at least one record.
    pub fn annotated_image_count(&self) -> usize {
        let mut indices: Vec<usize> = self.records.iter().map(|r| r.image_index).collect();
        indices.sort_unstable();
        indices.dedup();
        indices.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(index: usize) -> ImageInfo {
        ImageInfo {
            id: format!("IMG_{:04}.JPG", index),
            index,
            width: 1920,
            height: 1080,
        }
    }

    #[test]
    fn test_record_copies_image_identity() {
        let annotation = Annotation::new(BBox::new(1.0, 2.0, 30.0, 40.0), "fox");
        let record = AnnotationRecord::new(&image(3), &annotation);
        assert_eq!(record.image, "IMG_0003.JPG");
        assert_eq!(record.image_index, 3);
        assert_eq!(record.bbox, annotation.bbox);
        assert_eq!(record.species, "fox");
    }

    #[test]
    fn test_annotated_image_count() {
        let mut project = ProjectData::new("/tmp/cam".to_string());
        let annotation = Annotation::new(BBox::new(0.0, 0.0, 20.0, 20.0), "deer");
        project.records.push(AnnotationRecord::new(&image(0), &annotation));
        project.records.push(AnnotationRecord::new(&image(0), &annotation));
        project.records.push(AnnotationRecord::new(&image(2), &annotation));
        assert_eq!(project.annotated_image_count(), 2);
    }
}
