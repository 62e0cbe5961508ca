//! Core type definitions used across the ResHub workspace.

pub mod catalog;

pub use catalog::{Catalog, ResourceItem};
