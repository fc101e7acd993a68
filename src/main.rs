//! # autobahn
//!
//! **autobahn** is a command-line helper for WordPress/Vagrant local
//! development environments.
//!
//! Features:
//! - `autobahn env set|show` edits and inspects `.env` files, replacing
//!   existing lines in place and leaving comments and formatting untouched
//! - `autobahn keys generate|show` manages the WordPress secret keys and
//!   salts
//! - `autobahn up` / `autobahn run` start the vagrant machine and open the
//!   site in the browser
//!
//! This CLI is built with [clap](https://docs.rs/clap).

use anyhow::Result;
use autobahn::{
    cmd_env_set, cmd_env_show, cmd_keys_generate, cmd_keys_show, cmd_run, cmd_up,
    env_file_path,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line interface definition.
///
/// Parsed using `clap` derive macros.
#[derive(Parser, Debug)]
#[command(
    name = "autobahn",
    version,
    about = "autobahn - WordPress/Vagrant local development helper",
    arg_required_else_help = true
)]
struct Cli {
    /// Print extra detail (composed lines, vagrant output)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress informational messages
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    cmd: Cmd,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Cmd {
    /// Inspect or edit variables in the dotenv file
    #[command(subcommand)]
    Env(EnvCmd),
    /// Manage WordPress secret keys and salts
    #[command(subcommand)]
    Keys(KeysCmd),
    /// Start and provision the Autobahn vagrant environment
    Up,
    /// Start the vagrant environment, bootstrapping .env if needed
    Run {
        /// Path to an .env file to copy if one doesn't exist here
        #[arg(long, value_name = "PATH")]
        copy_env_from: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
enum EnvCmd {
    /// Set an environment variable in the dotenv file
    Set {
        /// The variable to set
        name: String,
        /// Value of the variable
        #[arg(long)]
        value: String,
        /// Ask before overriding existing variables
        #[arg(short, long)]
        secure: bool,
        /// Prefix the line with `export` so the file can be sourced in bash
        #[arg(long)]
        export: bool,
        /// Filepath of the dotenv file. Defaults to "./.env"
        #[arg(long, value_name = "PATH")]
        file: Option<PathBuf>,
    },
    /// Show one variable, or all of them, from the dotenv file
    Show {
        /// The variable to show (all variables when omitted)
        name: Option<String>,
        /// Filepath of the dotenv file. Defaults to "./.env"
        #[arg(long, value_name = "PATH")]
        file: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
enum KeysCmd {
    /// Generate new WordPress keys and salts
    Generate {
        /// Override existing keys without asking
        #[arg(short = 'o', long = "override")]
        force: bool,
        /// Prefix lines with `export` so the file can be sourced in bash
        #[arg(long)]
        export: bool,
        /// Filepath of the dotenv file. Defaults to "./.env"
        #[arg(long, value_name = "PATH")]
        file: Option<PathBuf>,
    },
    /// Show current WordPress keys and salts
    Show {
        /// Filepath of the dotenv file. Defaults to "./.env"
        #[arg(long, value_name = "PATH")]
        file: Option<PathBuf>,
    },
}

/// CLI entry point.
///
/// Parses arguments with `clap` and executes the selected subcommand.
fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.cmd {
        Cmd::Env(EnvCmd::Set {
            name,
            value,
            secure,
            export,
            file,
        }) => cmd_env_set(
            &env_file_path(file.as_deref()),
            &name,
            &value,
            export,
            secure,
            cli.verbose,
            cli.quiet,
        ),
        Cmd::Env(EnvCmd::Show { name, file }) => {
            cmd_env_show(&env_file_path(file.as_deref()), name.as_deref())
        }
        Cmd::Keys(KeysCmd::Generate {
            force,
            export,
            file,
        }) => cmd_keys_generate(
            &env_file_path(file.as_deref()),
            force,
            export,
            cli.verbose,
            cli.quiet,
        ),
        Cmd::Keys(KeysCmd::Show { file }) => cmd_keys_show(&env_file_path(file.as_deref())),
        Cmd::Up => cmd_up(cli.verbose),
        Cmd::Run { copy_env_from } => cmd_run(copy_env_from.as_deref(), cli.verbose),
    }
}
