//! Dotenv file access layer.
//!
//! This module wraps the actual store implementation (`store`) and
//! re-exports only the stable public API ([`DotenvStore`], [`DotenvError`]).
//!
//! Everything format-sensitive about `.env` files lives behind this module:
//! the CLI commands only ever call `has`/`get`/`all`/`set` and never touch
//! the file contents themselves.

mod store;

pub use store::{DotenvError, DotenvStore};
