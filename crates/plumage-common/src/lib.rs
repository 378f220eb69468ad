//! Shared utilities for the Plumage rich-text pipeline.

pub mod url;
pub mod warning;
