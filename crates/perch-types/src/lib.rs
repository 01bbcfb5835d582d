//! Shared wire and entity types for the perch backend.

pub mod api;
pub mod models;
