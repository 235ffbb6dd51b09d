//! Dictaphone CLI entry point

use std::process::ExitCode;

use clap::Parser;

use dictaphone::application::Settings;
use dictaphone::cli::{
    app::{load_merged_config, run_interactive, run_next_name, run_oneshot, EXIT_USAGE_ERROR},
    args::{Cli, Commands},
    config_cmd::handle_config_command,
    presenter::Presenter,
    OneShotOptions, EXIT_ERROR,
};
use dictaphone::domain::config::AppConfig;
use dictaphone::infrastructure::XdgConfigStore;

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let presenter = Presenter::new();

    let run_next = match cli.command {
        Some(Commands::Config { action }) => {
            let store = XdgConfigStore::new();
            if let Err(e) = handle_config_command(action, &store, &presenter).await {
                presenter.error(&e.to_string());
                return ExitCode::from(EXIT_ERROR);
            }
            return ExitCode::SUCCESS;
        }
        Some(Commands::NextName) => true,
        None => false,
    };

    // Build CLI config from args
    let cli_config = AppConfig {
        output_dir: cli.output_dir.clone(),
        scan_dir: cli.scan_dir.clone(),
        format: cli.format.map(|f| f.to_string()),
        formats: None,
        floor: cli.floor,
    };

    let config = load_merged_config(cli_config, &presenter).await;
    let settings = Settings::from_config(&config);

    if let Some(format) = cli.format {
        if !settings.formats.contains(&format) {
            let enabled: Vec<String> = settings.formats.iter().map(|f| f.to_string()).collect();
            presenter.error(&format!(
                "Format '{}' is not enabled. Enabled formats: {}",
                format,
                enabled.join(", ")
            ));
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
    }

    if run_next {
        return run_next_name(&settings);
    }

    match cli.duration {
        Some(duration) => {
            let options = OneShotOptions {
                duration,
                name: cli.name,
            };
            run_oneshot(settings, options).await
        }
        None => run_interactive(settings).await,
    }
}
