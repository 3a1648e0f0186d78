use clap::{CommandFactory, Parser};
use subspotx::app::presentation;
use subspotx::utils::logger;
use subspotx::domain::ports::ConfigProvider;
use subspotx::utils::validation::Validate;
use std::io::IsTerminal;
use subspotx::{CliConfig, LocalStorage, ScanEngine, ScanError, ScanSettings, TomlConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    // 沒有指定網域時顯示說明並正常結束
    if cli.domain.as_deref().map_or(true, |d| d.trim().is_empty()) {
        CliConfig::command().print_help()?;
        println!();
        return Ok(());
    }

    if cli.json_logs {
        logger::init_json_logger();
    } else {
        let ansi = !cli.no_color && std::io::stderr().is_terminal();
        logger::init_cli_logger(cli.verbose, ansi);
    }

    if cli.no_color {
        colored::control::set_override(false);
    }

    presentation::print_banner();

    let file_config = match cli.config.as_deref().map(TomlConfig::from_file).transpose() {
        Ok(config) => config,
        Err(e) => exit_with(&e),
    };

    if let Some(config) = &file_config {
        if let Err(e) = config.validate() {
            exit_with(&e);
        }
    }

    let settings = match ScanSettings::resolve(&cli, file_config.as_ref()) {
        Ok(settings) => settings,
        Err(e) => exit_with(&e),
    };
    tracing::debug!("Scan settings: {:?}", settings);

    let engine = match ScanEngine::from_config(&settings) {
        Ok(engine) => engine,
        Err(e) => exit_with(&e),
    };

    let report = engine.run(settings.domain()).await;
    presentation::print_results(&report);

    if let Some(path) = settings.output_path() {
        let storage = LocalStorage::new();
        match presentation::save_results(&storage, path, &report.subdomains).await {
            Ok(()) => println!("{}", presentation::saved_message(path)),
            Err(e) if e.is_fatal() => exit_with(&e),
            Err(e) => tracing::warn!("{}", e),
        }
    }

    Ok(())
}

fn exit_with(e: &ScanError) -> ! {
    tracing::error!("❌ {}", e);
    tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    std::process::exit(1);
}
