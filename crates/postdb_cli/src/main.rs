//! postdb - command-line access to a postdb JSON document store.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;
mod output;

#[derive(Parser)]
#[command(name = "postdb")]
#[command(about = "Manage users and posts stored in a local JSON document", version)]
struct Cli {
    /// Path to the JSON document
    #[arg(long, global = true, default_value = "database.json")]
    db: PathBuf,
    /// Log level (trace|debug|info|warn|error)
    #[arg(long, global = true)]
    log_level: Option<String>,
    /// Absolute directory for rolling log files; logging is off when omitted
    #[arg(long, global = true)]
    log_dir: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an empty document unless one is already readable
    Init,
    /// User operations
    #[command(subcommand)]
    User(UserCommand),
    /// Post operations
    #[command(subcommand)]
    Post(PostCommand),
}

#[derive(Subcommand)]
enum UserCommand {
    /// Create a user, replacing any user with the same email
    Create {
        email: String,
        password: String,
        name: String,
        #[arg(allow_negative_numbers = true)]
        age: i64,
    },
    /// Update password, name and age of an existing user
    Update {
        email: String,
        password: String,
        name: String,
        #[arg(allow_negative_numbers = true)]
        age: i64,
    },
    /// Print a user
    Get { email: String },
    /// Delete a user (their posts are kept)
    Delete { email: String },
}

#[derive(Subcommand)]
enum PostCommand {
    /// Create a post for an existing user
    Create { user_email: String, text: String },
    /// Print all posts of a user as a JSON array
    List { user_email: String },
    /// Delete a post by id
    Delete { id: String },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli
            .log_level
            .as_deref()
            .unwrap_or_else(|| postdb_core::default_log_level());
        if let Err(err) = postdb_core::init_logging(level, log_dir) {
            eprintln!("Error: {err}");
            return ExitCode::FAILURE;
        }
    }

    match commands::run(&cli.db, cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
