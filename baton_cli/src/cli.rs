//! Command line surface
//!
//! Parsing only. Everything here converts into a [`Command`] for the
//! dispatcher or is handled locally by `main` (config and completions).

use crate::dispatcher::{Command, ContainerArgs};
use crate::output::OutputFormat;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "baton")]
#[command(author, version, about = "Baton, the instrument of the Maestro", long_about = None)]
pub struct Cli {
    /// Harmony API address (defaults to the configured harmony.api_host)
    #[arg(long, global = true, visible_alias = "maestro", value_name = "URL")]
    pub harmony_api: Option<String>,

    /// Do not verify the Harmony API TLS certificate
    #[arg(long, global = true)]
    pub noverifyssl: bool,

    /// Output format (defaults to the configured output.default_format)
    #[arg(short, long, global = true, value_enum)]
    pub output: Option<OutputFormat>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage containers
    #[command(arg_required_else_help = true)]
    Containers {
        #[command(subcommand)]
        command: ContainersCommand,
    },

    /// Inspect machines
    #[command(arg_required_else_help = true)]
    Machines {
        #[command(subcommand)]
        command: MachinesCommand,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ContainersCommand {
    /// Add a new container
    Add(AddArgs),

    /// List containers
    List,

    /// Show a container by ID or name (lists all without an argument)
    Show {
        /// Container ID or name
        target: Option<String>,
    },

    /// Start a container
    Start {
        /// Container ID or name
        target: Option<String>,
    },

    /// Stop a container
    Stop {
        /// Container ID or name
        target: Option<String>,
    },
}

/// Required flags are checked by the dispatcher, not by clap, so the
/// messages and exit codes stay the same for every missing field.
#[derive(Args, Debug, Default)]
pub struct AddArgs {
    /// Machine to place the container on
    #[arg(long, value_name = "ID")]
    pub machine_id: Option<String>,

    /// Container name
    #[arg(long)]
    pub name: Option<String>,

    /// Container hostname
    #[arg(long)]
    pub hostname: Option<String>,

    /// Image to run
    #[arg(long)]
    pub image: Option<String>,

    /// Entry point override
    #[arg(long)]
    pub entry_point: Option<String>,

    /// Create the container enabled
    #[arg(long)]
    pub start: bool,
}

#[derive(Subcommand, Debug)]
pub enum MachinesCommand {
    /// List machines
    List,

    /// Show a machine by ID or name (lists all without an argument)
    Show {
        /// Machine ID or name
        target: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// List all configuration values
    List,

    /// Get a configuration value
    Get {
        /// Configuration key (e.g., harmony.api_host)
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., harmony.api_host)
        key: String,

        /// Value to set
        value: String,
    },

    /// Print the configuration file path
    Path,
}

impl From<AddArgs> for ContainerArgs {
    fn from(args: AddArgs) -> Self {
        Self {
            machine_id: args.machine_id,
            name: args.name,
            hostname: args.hostname,
            image: args.image,
            entry_point: args.entry_point,
            start: args.start,
        }
    }
}

impl From<ContainersCommand> for Command {
    fn from(command: ContainersCommand) -> Self {
        match command {
            ContainersCommand::Add(args) => Command::ContainersAdd(args.into()),
            ContainersCommand::List => Command::ContainersList,
            ContainersCommand::Show { target } => Command::ContainersShow(target),
            ContainersCommand::Start { target } => Command::ContainersStart(target),
            ContainersCommand::Stop { target } => Command::ContainersStop(target),
        }
    }
}

impl From<MachinesCommand> for Command {
    fn from(command: MachinesCommand) -> Self {
        match command {
            MachinesCommand::List => Command::MachinesList,
            MachinesCommand::Show { target } => Command::MachinesShow(target),
        }
    }
}
