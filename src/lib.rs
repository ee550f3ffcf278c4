//! # Decision List
//!
//! Supervised word sense disambiguation between two senses with a ranked decision list.
#![forbid(unsafe_code)]

/// Pipelines
pub mod pipelines;

/// Datasets
pub mod datasets;

/// Scoring of predicted answers
pub mod scoring;

/// Utilities
pub mod utils;

/// CLI indexes and utilities
pub mod cli;
