use anyhow::{Context, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use colored::Colorize;
use dialoguer::Confirm;
use rand::RngCore;
use rand::rngs::OsRng;
use std::path::Path;

use crate::dotenv::DotenvStore;
use crate::table::render_table;

/// The keys and salts a WordPress install expects in its environment.
pub const WORDPRESS_KEYS: [&str; 8] = [
    "AUTH_KEY",
    "SECURE_AUTH_KEY",
    "LOGGED_IN_KEY",
    "NONCE_KEY",
    "AUTH_SALT",
    "SECURE_AUTH_SALT",
    "LOGGED_IN_SALT",
    "NONCE_SALT",
];

/// Length of each generated key/salt.
const KEY_LENGTH: usize = 64;

/// Generate a random key of exactly `length` characters.
///
/// Random bytes come from the operating system CSPRNG and are base64
/// encoded; `\`, `/`, `"`, and `'` are stripped so the result drops into a
/// dotenv line or a wp-config constant without any further escaping. The
/// buffer is refilled until the requested length is reached, so stripping
/// never shortens the result.
pub fn random_key(length: usize) -> String {
    let mut key = String::with_capacity(length);
    while key.len() < length {
        let missing = length - key.len();
        let mut bytes = vec![0u8; missing];
        OsRng.fill_bytes(&mut bytes);
        let encoded = STANDARD.encode(&bytes);
        key.extend(
            encoded
                .chars()
                .filter(|c| !matches!(c, '\\' | '/' | '"' | '\''))
                .take(missing),
        );
    }
    key
}

/// CLI command: generate fresh WordPress keys and salts.
///
/// All eight keys are regenerated and written to the dotenv file. When any
/// of them already exists and `force` is not set, the user is asked to
/// confirm first; declining aborts with exit code 1 and leaves the file
/// untouched.
///
/// # Errors
/// Returns an error if the dotenv file cannot be read or written, or if the
/// confirmation prompt fails.
pub fn cmd_keys_generate(
    file: &Path,
    force: bool,
    export: bool,
    verbose: bool,
    quiet: bool,
) -> Result<()> {
    let mut store = DotenvStore::new(file)?;

    if !force && any_key_exists(&store) {
        let overwrite = Confirm::new()
            .with_prompt("WordPress keys already exist. Override?")
            .default(false)
            .interact()
            .context("failed to read confirmation")?;
        if !overwrite {
            eprintln!("{}", "Aborting.".red());
            std::process::exit(1);
        }
    }

    let mut written = Vec::with_capacity(WORDPRESS_KEYS.len());
    for key in WORDPRESS_KEYS {
        store.set(key, &random_key(KEY_LENGTH), export)?;
        let value = store.get(key).unwrap_or_default().to_string();
        written.push((key.to_string(), value));
    }

    if verbose {
        print!("{}", render_table(("WordPress Key", "Value"), &written));
    }
    if !quiet {
        println!(
            "{}",
            "WordPress keys successfully written to file.".green()
        );
    }
    Ok(())
}

/// CLI command: show the WordPress keys currently present in the file.
///
/// Keys that are missing from the file are simply omitted from the table.
pub fn cmd_keys_show(file: &Path) -> Result<()> {
    let store = DotenvStore::new(file)?;

    let rows: Vec<(String, String)> = WORDPRESS_KEYS
        .iter()
        .filter_map(|key| {
            store
                .get(key)
                .map(|value| (key.to_string(), value.to_string()))
        })
        .collect();

    print!("{}", render_table(("WordPress Key", "Value"), &rows));
    Ok(())
}

fn any_key_exists(store: &DotenvStore) -> bool {
    WORDPRESS_KEYS.iter().any(|key| store.has(key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn random_key_has_exact_length() {
        for length in [1, 16, 64, 100] {
            assert_eq!(random_key(length).len(), length);
        }
    }

    #[test]
    fn random_key_avoids_slashes_and_quotes() {
        let key = random_key(4096);
        assert!(!key.contains('\\'));
        assert!(!key.contains('/'));
        assert!(!key.contains('"'));
        assert!(!key.contains('\''));
        assert!(key.chars().all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '='));
    }

    #[test]
    fn random_keys_differ() {
        assert_ne!(random_key(64), random_key(64));
    }

    #[test]
    fn any_key_exists_detects_a_single_salt() {
        let td = tempdir().unwrap();
        let path = td.path().join(".env");
        fs::write(&path, "NONCE_SALT=\"abc\"\n").unwrap();

        let store = DotenvStore::new(&path).unwrap();
        assert!(any_key_exists(&store));

        let empty = DotenvStore::new(td.path().join("other.env")).unwrap();
        assert!(!any_key_exists(&empty));
    }

    #[test]
    fn generate_writes_all_eight_keys() {
        let td = tempdir().unwrap();
        let path = td.path().join(".env");

        cmd_keys_generate(&path, true, false, false, true).unwrap();

        let store = DotenvStore::new(&path).unwrap();
        for key in WORDPRESS_KEYS {
            let value = store.get(key).unwrap();
            assert_eq!(value.len(), KEY_LENGTH);
        }
    }

    #[test]
    fn generate_replaces_existing_keys_in_place() {
        let td = tempdir().unwrap();
        let path = td.path().join(".env");
        fs::write(&path, "AUTH_KEY=\"old\"\n# keep me\nDB_NAME=\"wp\"\n").unwrap();

        cmd_keys_generate(&path, true, false, false, true).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("# keep me"));
        assert!(content.contains("DB_NAME=\"wp\""));
        assert_eq!(content.matches("AUTH_KEY").count(), 2); // AUTH_KEY + SECURE_AUTH_KEY
    }
}
