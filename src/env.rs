use anyhow::{Context, Result};
use colored::Colorize;
use dialoguer::Confirm;
use std::path::Path;

use crate::dotenv::DotenvStore;
use crate::table::render_table;

/// CLI command: set one variable in the dotenv file.
///
/// With `secure`, an existing variable is only overridden after the user
/// confirms; declining prints `Aborting.` and exits 1. The composed line is
/// echoed at verbose.
///
/// # Errors
/// Returns an error if the dotenv file cannot be read or written, or if the
/// confirmation prompt fails.
pub fn cmd_env_set(
    file: &Path,
    name: &str,
    value: &str,
    export: bool,
    secure: bool,
    verbose: bool,
    quiet: bool,
) -> Result<()> {
    let mut store = DotenvStore::new(file)?;

    if secure && store.has(name) {
        let overwrite = Confirm::new()
            .with_prompt(format!(
                "Environment variable `{name}` already exists. Override?"
            ))
            .default(false)
            .interact()
            .context("failed to read confirmation")?;
        if !overwrite {
            eprintln!("{}", "Aborting.".red());
            std::process::exit(1);
        }
    }

    let line = store.set(name, value, export)?;
    if verbose {
        println!("{line}");
    }
    if !quiet {
        println!("{}", "Variable successfully written to file.".green());
    }
    Ok(())
}

/// CLI command: show one variable, or all of them, as a table.
///
/// A missing variable is informational (exit 0), not an error.
pub fn cmd_env_show(file: &Path, name: Option<&str>) -> Result<()> {
    let store = DotenvStore::new(file)?;

    let Some(name) = name else {
        print!(
            "{}",
            render_table(("Environment Variable", "Value"), &store.all())
        );
        return Ok(());
    };

    match store.get(name) {
        Some(value) => {
            let rows = vec![(name.to_string(), value.to_string())];
            print!("{}", render_table(("Environment Variable", "Value"), &rows));
        }
        None => {
            eprintln!(
                "{}",
                format!(
                    "Environment variable `{name}` not found in \"{}\"",
                    file.display()
                )
                .red()
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn set_writes_through_to_the_file() {
        let td = tempdir().unwrap();
        let path = td.path().join(".env");

        cmd_env_set(&path, "DB_NAME", "wordpress", false, false, false, true).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.trim_end(), "DB_NAME=\"wordpress\"");
    }

    #[test]
    fn set_with_export_prefixes_the_line() {
        let td = tempdir().unwrap();
        let path = td.path().join(".env");

        cmd_env_set(&path, "WP_ENV", "development", true, false, false, true).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.trim_end(), "export WP_ENV=\"development\"");
    }

    #[test]
    fn show_of_missing_variable_is_not_an_error() {
        let td = tempdir().unwrap();
        let path = td.path().join(".env");
        fs::write(&path, "A=1\n").unwrap();

        assert!(cmd_env_show(&path, Some("MISSING")).is_ok());
        assert!(cmd_env_show(&path, None).is_ok());
    }
}
