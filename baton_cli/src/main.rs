use baton_cli::cli::{Cli, Commands, ConfigCommand};
use baton_cli::config::{AppConfig, ConfigManager, get_config};
use baton_cli::dispatcher::{Command, Dispatcher};
use baton_cli::error::{CliError, CliResult};
use baton_cli::output::{self, OutputFormat};
use baton_cli::terminal;
use clap::{CommandFactory, Parser};
use clap_complete::{Shell, generate};
use colored::*;
use harmony_client_core::HarmonyClient;
use std::collections::BTreeMap;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging based on debug flag
    if cli.debug {
        env_logger::Builder::from_env(env_logger::Env::default())
            .filter_level(log::LevelFilter::Debug)
            .filter_module("harmony_client_core", log::LevelFilter::Debug)
            .filter_module("baton_cli", log::LevelFilter::Debug)
            .format_timestamp_millis()
            .init();
        eprintln!("Debug logging enabled");
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let debug = cli.debug;
    if let Err(error) = run(cli).await {
        colored::control::set_override(terminal::stderr_color(true));
        eprint!("{}", error.format_for_user(debug));
        std::process::exit(error.exit_code() as i32);
    }
}

async fn run(cli: Cli) -> CliResult<()> {
    let command = match cli.command {
        Commands::Config { command } => return config_command(command),
        Commands::Completions { shell } => {
            generate_completions(shell);
            return Ok(());
        }
        Commands::Containers { command } => Command::from(command),
        Commands::Machines { command } => Command::from(command),
    };

    // Only remote commands need a loadable config
    let mut config = get_config()
        .map_err(|e| CliError::from(e).with_context("Failed to load configuration"))?;
    config.apply_cli_overrides(cli.harmony_api.as_deref(), cli.noverifyssl);

    let format = match cli.output {
        Some(format) => format,
        None => config.output_format()?,
    };

    execute(command, &config, format).await
}

/// Run one remote command and print its result to stdout
async fn execute(command: Command, config: &AppConfig, format: OutputFormat) -> CliResult<()> {
    log::debug!(
        "Using Harmony API at {} (verify_ssl: {})",
        config.harmony.api_host,
        config.harmony.verify_ssl
    );

    let client = HarmonyClient::new(config.harmony.clone())?;
    let failure_context = command.failure_context();

    let outcome = Dispatcher::new(&client)
        .run(command)
        .await
        .map_err(|e| {
            let error = CliError::from(e);
            match failure_context {
                Some(context) => error.with_context(context),
                None => error,
            }
        })?;

    let use_color = terminal::stdout_color(config.output.color_enabled);
    colored::control::set_override(use_color);
    output::render(&outcome, format, use_color, &mut std::io::stdout().lock())?;

    Ok(())
}

fn config_command(command: ConfigCommand) -> CliResult<()> {
    let mut manager = ConfigManager::new();
    colored::control::set_override(terminal::stderr_color(true));

    match command {
        ConfigCommand::Get { key } => {
            println!("{}", manager.get(&key)?);
        }
        ConfigCommand::Set { key, value } => {
            manager
                .set(&key, &value)
                .map_err(|e| CliError::from(e).with_suggestion("Run 'baton config list' to see valid keys"))?;
            eprintln!("{}", format!("Set {key} = {value}").green());
            eprintln!(
                "Configuration saved to: {}",
                manager.get_config_path().display()
            );
        }
        ConfigCommand::List => {
            let items = manager.list()?;
            eprintln!("{}", "Configuration:".bold().blue());
            eprintln!("Config file: {}", manager.get_config_path().display());
            eprintln!();

            // Group items by section
            let mut sections: BTreeMap<String, Vec<(String, String)>> = BTreeMap::new();
            for (key, value) in items {
                let (section, field) = key.split_once('.').unwrap_or(("general", key.as_str()));
                sections
                    .entry(section.to_string())
                    .or_default()
                    .push((field.to_string(), value));
            }

            for (section, items) in sections {
                println!("[{section}]");
                for (key, value) in items {
                    println!("  {} = {}", key.cyan(), value);
                }
                println!();
            }
        }
        ConfigCommand::Path => {
            println!("{}", manager.get_config_path().display());
        }
    }

    Ok(())
}

fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();

    generate(shell, &mut cmd, name, &mut std::io::stdout());
}
