use anyhow::{Result, bail};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::dotenv::DotenvStore;
use crate::paths::{ENV_FILE, ENV_TEMPLATE};
use crate::vagrant::{has_vagrantfile, provision, vagrant_installed};

/// CLI command: like `up`, but bootstrap the environment first.
///
/// Requires a local `Vagrantfile`. When `./.env` is missing, it is copied
/// from `copy_env_from` (or `./.env.example`); an unreadable template is a
/// warning, not an error, and a still-missing `.env` just means vagrant
/// runs against the process environment alone.
///
/// # Errors
/// Returns an error if vagrant or the `Vagrantfile` is missing, or if
/// `vagrant up` cannot be spawned.
pub fn cmd_run(copy_env_from: Option<&Path>, verbose: bool) -> Result<()> {
    if !vagrant_installed() {
        bail!("couldn't find `vagrant` in PATH. Are you sure Vagrant is installed?");
    }
    if !has_vagrantfile() {
        bail!(
            "couldn't find local `Vagrantfile`. A vagrant environment is required \
             to run this command. Run `vagrant init` to create a new Vagrant \
             environment, or change to a directory with a Vagrantfile and try again."
        );
    }

    let env_path = Path::new(ENV_FILE);
    if !env_path.exists() {
        create_env_from_template(env_path, copy_env_from);
    }

    if !env_path.exists() {
        eprintln!(
            "{}",
            "No .env file found. Falling back to environment.".yellow()
        );
    }

    let store = DotenvStore::new(env_path)?;
    provision(&store, verbose)
}

/// Copy the dotenv template into place. Failures are reported and skipped.
fn create_env_from_template(env_path: &Path, copy_env_from: Option<&Path>) {
    let template = copy_env_from
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(ENV_TEMPLATE));
    if copy_env_from.is_none() && !template.exists() {
        return;
    }

    eprintln!(
        "{}",
        format!("Creating .env from template {}.", template.display()).cyan()
    );
    if fs::copy(&template, env_path).is_err() {
        eprintln!(
            "{}",
            format!("Could not read from {}. Skipping.", template.display()).yellow()
        );
    }
}
