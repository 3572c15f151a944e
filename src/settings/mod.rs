//! Settings module for link2clash
//!
//! This module contains the server configuration and its loaders

pub mod settings_struct;

// Re-export settings struct and functions
pub use settings_struct::{Settings, SettingsError, PORT_ENV};
