//! Crate entry point for **autobahn**.
//!
//! This library backs the `autobahn` CLI, a helper for WordPress/Vagrant
//! local development environments. Each submodule encapsulates one
//! responsibility (dotenv file access, key generation, vagrant plumbing,
//! table output). The `pub use` re-exports make the command entry points
//! and the store accessible directly from the crate root.
//!
//! This file is primarily intended for developers hacking on `autobahn`.

mod dotenv;
mod env;
mod keys;
mod paths;
mod progress;
mod run;
mod table;
mod up;
mod vagrant;

/// Re-export commonly used types and commands so they can be accessed from
/// `autobahn::*`.
pub use dotenv::{DotenvError, DotenvStore};
pub use env::{cmd_env_set, cmd_env_show};
pub use keys::{WORDPRESS_KEYS, cmd_keys_generate, cmd_keys_show, random_key};
pub use paths::env_file_path;
pub use run::cmd_run;
pub use up::cmd_up;
