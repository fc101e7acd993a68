//! External process layer: vagrant probes, `vagrant up` execution, and
//! platform browser launch. The only place the CLI spawns anything.

use anyhow::{Context, Result};
use indicatif::ProgressBar;
use std::path::Path;
use std::process::{Command, Stdio};
use std::time::Duration;

use crate::dotenv::DotenvStore;
use crate::paths::{hostname, wordpress_home};
use crate::progress::{err_style, ok_style, spinner_style};

/// Is `vagrant` on the PATH and runnable?
pub fn vagrant_installed() -> bool {
    Command::new("vagrant")
        .arg("-v")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}

/// Is there a `Vagrantfile` in the working directory?
pub fn has_vagrantfile() -> bool {
    Path::new("Vagrantfile").is_file()
}

/// Bring the vagrant environment up and open the site in a browser.
///
/// The dotenv file's variables are exported to the vagrant child process,
/// together with `WP_HOME` and `VAGRANT_HOSTNAME` derived from it. When
/// verbose, vagrant's own output is streamed through; otherwise a spinner
/// runs until the machine is up.
///
/// A non-zero vagrant exit code terminates the process with that same code,
/// so callers behind scripts see exactly what vagrant reported.
///
/// # Errors
/// Returns an error if `vagrant up` could not be spawned at all.
pub fn provision(store: &DotenvStore, verbose: bool) -> Result<()> {
    let home = wordpress_home(store);

    let mut envs = store.all();
    envs.push(("WP_HOME".to_string(), home.clone()));
    if let Some(host) = hostname(&home) {
        envs.push(("VAGRANT_HOSTNAME".to_string(), host));
    }

    let code = run_vagrant_up(&envs, verbose)?;
    if code != 0 {
        std::process::exit(code);
    }

    open_browser(&home);
    Ok(())
}

/// Run `vagrant up` with the given extra environment and return its exit
/// code.
fn run_vagrant_up(envs: &[(String, String)], verbose: bool) -> Result<i32> {
    let mut vagrant = Command::new("vagrant");
    vagrant.arg("up");
    for (name, value) in envs {
        vagrant.env(name, value);
    }

    if verbose {
        let status = vagrant.status().context("failed to run `vagrant up`")?;
        return Ok(status.code().unwrap_or(1));
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(spinner_style());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb.set_message("provisioning the vagrant environment…");

    let status = vagrant
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .context("failed to run `vagrant up`")?;

    if status.success() {
        pb.set_style(ok_style());
        pb.finish_with_message("vagrant environment is up");
    } else {
        pb.set_style(err_style());
        pb.finish_with_message("vagrant up failed (re-run with --verbose for details)");
    }
    Ok(status.code().unwrap_or(1))
}

/// Build the platform command that opens `url` in the default browser.
fn browser_command(url: &str) -> Command {
    if cfg!(target_os = "macos") {
        let mut cmd = Command::new("open");
        cmd.arg(url);
        cmd
    } else if cfg!(windows) {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", "start", url]);
        cmd
    } else {
        let mut cmd = Command::new("xdg-open");
        cmd.arg(url);
        cmd
    }
}

/// Open `url` in the default browser. Failures are ignored: the site being
/// up matters, the browser launch is a convenience.
fn open_browser(url: &str) {
    let _ = browser_command(url)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn browser_command_matches_platform() {
        let cmd = browser_command("http://my.autobahn.rocks");
        let program = cmd.get_program().to_string_lossy().into_owned();
        if cfg!(target_os = "macos") {
            assert_eq!(program, "open");
        } else if cfg!(windows) {
            assert_eq!(program, "cmd");
        } else {
            assert_eq!(program, "xdg-open");
        }
    }

    #[test]
    fn browser_command_carries_the_url() {
        let cmd = browser_command("http://example.test");
        let args: Vec<String> = cmd
            .get_args()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert!(args.contains(&"http://example.test".to_string()));
    }
}
