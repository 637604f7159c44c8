//! household - terminal client for a family expense tracker
//!
//! A family logs in with a shared name and password, then manages its
//! members (earning or not, with a monthly salary) and their expenses. The
//! server owns the data; this crate keeps a session, fetches the family
//! snapshot, derives the budget figures shown next to each member, and
//! sends changes back.
//!
//! # Architecture
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Family, member, expense and money types
//! - `session`: Persisted bearer token and family identity
//! - `api`: The remote API boundary and its HTTP implementation
//! - `services`: Derived metrics, authentication and the entity synchronizer
//! - `display`: Table formatting for the command line
//! - `cli`: Command handlers
//! - `tui`: Interactive dashboard
//!
//! # Example
//!
//! ```rust,ignore
//! use household::config::{HouseholdPaths, Settings};
//!
//! let paths = HouseholdPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;
pub mod session;
pub mod storage;
pub mod tui;

pub use error::{HouseholdError, HouseholdResult};
