//! Document persistence formats
//!
//! Hosts persist whole-document snapshots. JSON is the only format: it
//! mirrors the model one-to-one and is what hosts already store.

pub mod json;

pub use json::{from_json, from_reader, to_json, to_json_pretty, to_writer};
