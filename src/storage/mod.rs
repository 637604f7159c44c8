//! Local storage helpers
//!
//! JSON files written atomically; used by the session store.

pub mod file_io;

pub use file_io::{read_json_optional, remove_if_exists, write_json_atomic};
