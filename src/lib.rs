//! Vocabulary spaced-repetition service.
//!
//! The scheduling core lives in [`srs`] and [`level`]; [`db`] and [`api`]
//! are the storage and HTTP collaborators around it.

pub mod api;
pub mod app;
pub mod config;
pub mod data;
pub mod db;
pub mod error;
pub mod import;
pub mod level;
pub mod models;
pub mod quiz;
pub mod srs;
pub mod stats;
