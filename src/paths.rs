use std::env;
use std::path::{Path, PathBuf};
use url::Url;

use crate::dotenv::DotenvStore;

/// Default dotenv file name, relative to the working directory.
pub const ENV_FILE: &str = ".env";

/// Default template the `run` command copies when no `.env` exists.
pub const ENV_TEMPLATE: &str = ".env.example";

/// Site URL used when neither the dotenv file nor the process environment
/// define `WP_HOME`.
const DEFAULT_WP_HOME: &str = "http://my.autobahn.rocks";

/// Resolve the dotenv file path: an explicit `--file` override, or `./.env`.
pub fn env_file_path(file: Option<&Path>) -> PathBuf {
    file.map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(ENV_FILE))
}

/// Resolve the WordPress site URL (`WP_HOME`).
///
/// Lookup order: the dotenv file, then the process environment, then the
/// built-in default. Empty values are treated as unset.
pub fn wordpress_home(store: &DotenvStore) -> String {
    store
        .get("WP_HOME")
        .map(str::to_string)
        .or_else(|| env::var("WP_HOME").ok())
        .filter(|home| !home.is_empty())
        .unwrap_or_else(|| DEFAULT_WP_HOME.to_string())
}

/// Host component of a URL, used as `VAGRANT_HOSTNAME`.
pub fn hostname(url: &str) -> Option<String> {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
}
