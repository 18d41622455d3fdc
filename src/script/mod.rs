//! Script loading and the built-in doctor script.
//!
//! A script is the persisted form of a rule set: a YAML list of records,
//! each with a `pattern` string and a `responses` list of strings,
//! whitespace-tokenized into terms. Everything that can be wrong with a
//! script is caught here, at load time, so the engine can assume every rule
//! it sees is well-formed.

pub mod builtin;
pub mod loader;


pub use loader::{ScriptError, from_path, from_str};
