// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Data model for annotations, projects and the canvas view.

pub mod annotation;
pub mod project;
pub mod view;
