use anyhow::{Result, bail};

use crate::dotenv::DotenvStore;
use crate::paths::ENV_FILE;
use crate::vagrant::{provision, vagrant_installed};

/// CLI command: start and provision the vagrant environment.
///
/// Loads `./.env` (an absent file just means an empty environment), runs
/// `vagrant up` with the file's variables exported, and opens the site in
/// the browser once the machine is up.
///
/// # Errors
/// Returns an error if vagrant is not installed or `vagrant up` cannot be
/// spawned. A non-zero vagrant exit code is propagated as the process exit
/// code instead.
pub fn cmd_up(verbose: bool) -> Result<()> {
    if !vagrant_installed() {
        bail!("couldn't find `vagrant` in PATH. Are you sure Vagrant is installed?");
    }

    let store = DotenvStore::new(ENV_FILE)?;
    provision(&store, verbose)
}
