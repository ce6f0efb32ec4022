// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! History system for undo/redo functionality.
//!
//! The history is a single linear log of annotation-list snapshots with a
//! cursor. Recording a new snapshot discards everything after the cursor.

use crate::models::annotation::Annotation;
use std::collections::VecDeque;

/// Linear undo/redo log of annotation lists.
#[derive(Debug, Clone)]
pub struct History {
    /// Snapshots, oldest first
    entries: VecDeque<Vec<Annotation>>,
    /// Position of the current snapshot, `None` before the first record
    index: Option<usize>,
    /// Maximum history size
    max_depth: usize,
}

impl History {
    pub fn new(max_depth: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            index: None,
            max_depth: max_depth.max(1),
        }
    }

    /// Snapshot the list after a mutation.
    pub fn record(&mut self, annotations: &[Annotation]) {
        let keep = self.index.map_or(0, |i| i + 1);
        self.entries.truncate(keep);
        self.entries.push_back(annotations.to_vec());

        while self.entries.len() > self.max_depth {
            self.entries.pop_front();
        }
        self.index = Some(self.entries.len() - 1);

        log::debug!(
            "History: recorded {} annotations ({} entries)",
            annotations.len(),
            self.entries.len()
        );
    }

    /// Step back one snapshot and return it, or `None` at the oldest entry.
    pub fn undo(&mut self) -> Option<Vec<Annotation>> {
        match self.index {
            Some(i) if i > 0 => {
                self.index = Some(i - 1);
                self.entries.get(i - 1).cloned()
            }
            _ => None,
        }
    }

    /// Step forward one snapshot and return it, or `None` at the newest entry.
    pub fn redo(&mut self) -> Option<Vec<Annotation>> {
        match self.index {
            Some(i) if i + 1 < self.entries.len() => {
                self.index = Some(i + 1);
                self.entries.get(i + 1).cloned()
            }
            _ => None,
        }
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        matches!(self.index, Some(i) if i > 0)
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        matches!(self.index, Some(i) if i + 1 < self.entries.len())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn index(&self) -> Option<usize> {
        self.index
    }
}
