// repo-steward: Git checkout manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Config --> Logging --> Command Dispatch
//!   Status | Versions | Apply | UpdateAll | Install | Options | Inis
//! ```

use std::process::ExitCode;

use repo_steward::cli::global::GlobalOptions;
use repo_steward::cli::{self, Command};
use repo_steward::cmd::config::{run_inis_command, run_options_command};
use repo_steward::cmd::repo::{
    run_apply_command, run_install_command, run_status_command, run_versions_command,
};
use repo_steward::cmd::update::run_update_all_command;
use repo_steward::config::loader::ConfigLoader;
use repo_steward::config::{Config, ConfigHandle};
use repo_steward::error::Result;
use repo_steward::logging::{LogConfig, init_logging};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const DEFAULT_CONFIG_FILE: &str = "steward.toml";
const ENV_PREFIX: &str = "STEWARD";

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::parse();

    match &cli.command {
        Some(Command::Version) => {
            handle_version_command();
            return ExitCode::SUCCESS;
        }
        Some(Command::Inis) => {
            return match build_config_loader(&cli.global) {
                Ok(loader) => {
                    run_inis_command(&loader.format_loaded_files());
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("Error: {e:#}");
                    ExitCode::FAILURE
                }
            };
        }
        Some(_) => {}
        None => {
            eprintln!("No command specified. Use --help for usage information.");
            return ExitCode::FAILURE;
        }
    }

    let config = match load_config(&cli.global) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let _log_guard = match init_logging(&build_log_config(&config)) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    dispatch_command(&cli, ConfigHandle::new(config)).await
}

fn build_log_config(config: &Config) -> LogConfig {
    let log_file = config.global.log_file.as_os_str();
    LogConfig::builder()
        .with_console_level(config.global.output_log_level)
        .with_file_level(config.global.file_log_level)
        .maybe_with_log_file(
            (!log_file.is_empty()).then(|| config.global.log_file.display().to_string()),
        )
        .build()
}

async fn dispatch_command(cli: &cli::Cli, config: ConfigHandle) -> ExitCode {
    let result = match &cli.command {
        Some(Command::Options) => {
            run_options_command(&config.snapshot());
            Ok(())
        }
        Some(Command::Status) => run_status_command(&config).await,
        Some(Command::Versions(args)) => run_versions_command(&config, &args.repo).await,
        Some(Command::Apply(args)) => {
            run_apply_command(&config, &args.repo, &args.selection).await
        }
        Some(Command::UpdateAll(args)) => run_update_all_command(&config, args).await,
        Some(Command::Install(args)) => run_install_command(&config, &args.repo).await,
        Some(Command::Version | Command::Inis) | None => Ok(()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn handle_version_command() {
    println!("{}", env!("CARGO_PKG_VERSION"));
}

fn build_config_loader(global: &GlobalOptions) -> Result<ConfigLoader> {
    let mut loader = ConfigLoader::new();
    if !global.no_default_inis {
        loader = loader.add_toml_file_optional(DEFAULT_CONFIG_FILE);
    }
    for ini_path in &global.inis {
        loader = loader.add_toml_file(ini_path);
    }
    loader = loader.with_env_prefix(ENV_PREFIX);
    for assignment in global.to_config_overrides() {
        loader = loader.set_assignment(&assignment)?;
    }
    Ok(loader)
}

fn load_config(global: &GlobalOptions) -> Result<Config> {
    build_config_loader(global)?.build()
}
