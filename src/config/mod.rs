pub mod settings;
pub mod toml_config;

#[cfg(feature = "cli")]
use clap::Parser;

pub use settings::ScanSettings;
pub use toml_config::TomlConfig;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "subspotx", version)]
#[command(about = "Subdomain discovery through crt.sh and SecurityTrails")]
pub struct CliConfig {
    #[arg(short = 'd', long, value_name = "DOMAIN", help = "Specify the domain to scan for subdomains")]
    pub domain: Option<String>,

    #[arg(short = 'o', long = "output", value_name = "OUTPUT_FILE", help = "Save discovered subdomains to a specified file")]
    pub output: Option<String>,

    #[arg(short = 'c', long = "config", value_name = "FILE", help = "Load settings from a TOML file")]
    pub config: Option<String>,

    #[arg(long, value_name = "SECONDS", help = "Per-request timeout (default 30)")]
    pub timeout: Option<u64>,

    #[arg(
        long = "securitytrails-key",
        env = "SECURITYTRAILS_API_KEY",
        hide_env_values = true,
        value_name = "KEY",
        help = "SecurityTrails API key"
    )]
    pub securitytrails_key: Option<String>,

    #[arg(long, help = "Query both sources at the same time")]
    pub concurrent: bool,

    #[arg(short = 'v', long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Disable colored output")]
    pub no_color: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}
