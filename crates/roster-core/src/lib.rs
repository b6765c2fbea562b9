//! Core types and trait definitions for the roster student-record store.
//!
//! This crate is deliberately free of database and filesystem dependencies.
//! All other crates depend on it; it depends on nothing heavier than serde.

pub mod error;
pub mod normalize;
pub mod record;
pub mod store;
pub mod validate;

pub use error::{Error, Result};
