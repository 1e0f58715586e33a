//! Command-line definitions.

use acier_ops::TargetType;
use clap::{Args, Parser, Subcommand};

/// Acier - manage Directory Server access control instructions
#[derive(Parser, Debug)]
#[command(name = "acier", version)]
#[command(about = "Manage Directory Server access control instructions", long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "ACIER_CONFIG")]
    pub config: Option<String>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create new ACI.
    Create {
        /// ACI name
        name: String,
        /// Task-group the ACI grants to (created if missing)
        #[arg(long)]
        taskgroup: String,
        /// Comma-separated permissions: read, write, add, delete, selfwrite, all
        #[arg(long)]
        permissions: String,
        /// Target qualifiers
        #[command(flatten)]
        target: TargetArgs,
    },
    /// Delete ACI.
    Delete {
        /// ACI name
        name: String,
    },
    /// Modify ACI.
    Modify {
        /// ACI name
        name: String,
        /// New grantee task-group
        #[arg(long)]
        taskgroup: Option<String>,
        /// New comma-separated permissions
        #[arg(long)]
        permissions: Option<String>,
        /// Target qualifiers
        #[command(flatten)]
        target: TargetArgs,
    },
    /// Search for ACIs.
    Find {
        /// Substring of the ACI name
        #[arg(default_value = "")]
        term: String,
        /// Exact ACI name
        #[arg(long)]
        aciname: Option<String>,
        /// Grantee task-group
        #[arg(long)]
        taskgroup: Option<String>,
        /// Exact permission set, comma-separated
        #[arg(long)]
        permissions: Option<String>,
        /// Target qualifiers
        #[command(flatten)]
        target: TargetArgs,
    },
    /// Display ACI.
    Show {
        /// ACI name
        name: String,
    },
    /// Group operations on the local directory
    Group {
        /// Group action
        #[command(subcommand)]
        action: GroupAction,
    },
    /// Configuration management
    Config {
        /// Config action
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Target qualifiers shared by create, modify and find.
#[derive(Args, Debug, Clone, Default)]
pub struct TargetArgs {
    /// Comma-separated attribute names
    #[arg(long, value_delimiter = ',')]
    pub attrs: Option<Vec<String>>,
    /// Object type: user, group or host
    #[arg(long = "type")]
    pub target_type: Option<TargetType>,
    /// Group whose members are targeted
    #[arg(long)]
    pub memberof: Option<String>,
    /// LDAP filter
    #[arg(long)]
    pub filter: Option<String>,
    /// Subtree to apply the ACI to
    #[arg(long)]
    pub subtree: Option<String>,
    /// Group entry to apply the ACI to
    #[arg(long)]
    pub targetgroup: Option<String>,
}

/// Group subcommands.
#[derive(Subcommand, Debug)]
pub enum GroupAction {
    /// Add a group or task-group
    Add {
        /// Group name
        name: String,
        /// Create a task-group instead of a user group
        #[arg(long)]
        task: bool,
        /// Description
        #[arg(long, default_value = "")]
        desc: String,
    },
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the resolved config file path
    Path,
    /// Get a configuration value by dotted key
    Get {
        /// Dotted key, e.g. `directory.basedn`
        key: String,
    },
    /// Write a default config file and an empty directory file
    Init {
        /// Write the config here instead of the default location
        #[arg(long)]
        file: Option<String>,
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },
}
