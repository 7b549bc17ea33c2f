//! Command line arguments.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "bucketry", version, about = "Manage bucket access rules and users on a console server", long_about = None)]
pub struct Cli {
    /// Configuration file (defaults to ./bucketry.toml, then the XDG config directory)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Console server URL, overrides the configured endpoint
    #[arg(short, long, global = true)]
    pub endpoint: Option<String>,

    /// Print debug logs to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Manage prefix access rules of a bucket
    #[command(subcommand)]
    AccessRules(AccessRuleCommand),

    /// Manage console users
    #[command(subcommand)]
    Users(UserCommand),

    /// Configuration helpers
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Subcommand, Debug)]
pub enum AccessRuleCommand {
    /// List the access rules of a bucket
    List { bucket: String },

    /// Add an access rule
    Add {
        bucket: String,
        #[arg(long)]
        prefix: String,
        #[arg(long, default_value = "readonly")]
        access: String,
    },

    /// Change the access level of an existing rule
    Edit {
        bucket: String,
        prefix: String,
        #[arg(long)]
        access: String,
    },

    /// Delete an access rule
    Delete { bucket: String, prefix: String },
}

#[derive(Subcommand, Debug)]
pub enum UserCommand {
    /// List users
    List,

    /// Create a user
    Add(AddUserArgs),

    /// Change a user's status or groups
    Edit {
        access_key: String,
        /// "enabled" or "disabled"
        #[arg(long)]
        status: Option<String>,
        /// Replace the user's groups (repeatable)
        #[arg(long = "group")]
        groups: Vec<String>,
    },

    /// Delete a user
    Delete { access_key: String },
}

#[derive(Args, Debug)]
pub struct AddUserArgs {
    #[arg(long)]
    pub access_key: String,
    #[arg(long, env = "BUCKETRY_SECRET_KEY", hide_env_values = true)]
    pub secret_key: String,
    /// Group to add the user to (repeatable)
    #[arg(long = "group")]
    pub groups: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Write a default configuration file
    Init {
        /// Destination (defaults to the XDG config directory)
        #[arg(long)]
        path: Option<PathBuf>,
    },
}
