//! Configuration module for the household client
//!
//! This module provides configuration management including:
//! - Platform path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::HouseholdPaths;
pub use settings::Settings;
