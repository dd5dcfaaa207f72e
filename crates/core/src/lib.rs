//! Core library for rotalog: an append-only audit writer that rotates
//! into numbered CSV segment files.

pub mod audit;
pub mod config;

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
