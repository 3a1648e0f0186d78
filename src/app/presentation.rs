use crate::domain::model::{ScanReport, SubdomainSet};
use crate::domain::ports::Storage;
use crate::utils::error::Result;
use colored::Colorize;

const LOGO: [&str; 6] = [
    r"                __   _____             __ ",
    r"    _______  __/ /_ / ___/____  ____  / /__  __ ",
    r"   / ___/ / / / __ \___ \/ __ \/ __ \/ __/ |/_/ ",
    r"  (__  ) /_/ / /_/ /__/ / /_/ / /_/ / /__>  < ",
    r" /____/\__,_/_.___/____/ .___/\____/\__/_/|_| ",
    r"                      /_/ ",
];

pub fn banner() -> String {
    let mut out = String::from("\n");
    for line in LOGO {
        out.push_str(&format!("{}\n", line.yellow()));
    }
    out.push('\n');
    out.push_str(&format!("{}\n", "  Subdomain Discovery Tool".cyan()));
    out.push_str(&format!(
        "{}\n",
        format!("  Version {}", env!("CARGO_PKG_VERSION")).blue()
    ));
    out.push_str(&format!("{}\n", "  subspotx [-h] to view help menu".blue()));
    out
}

pub fn print_banner() {
    print!("{}", banner());
}

pub fn render_results(domain: &str, subdomains: &SubdomainSet) -> String {
    let mut out = format!("\nSubdomains discovered: {}\n\n", subdomains.len());

    if subdomains.is_empty() {
        out.push_str(&format!("No subdomains found for the domain {}\n", domain));
        return out;
    }

    out.push_str(&format!("Subdomains discovered for {}:\n", domain));
    for name in subdomains.iter() {
        out.push_str(name);
        out.push('\n');
    }
    out
}

pub fn print_results(report: &ScanReport) {
    print!("{}", render_results(&report.domain, &report.subdomains));
}

/// One name per line, each terminated by `\n`.
pub fn render_file_contents(subdomains: &SubdomainSet) -> String {
    subdomains.iter().map(|name| format!("{}\n", name)).collect()
}

pub async fn save_results<S: Storage>(
    storage: &S,
    path: &str,
    subdomains: &SubdomainSet,
) -> Result<()> {
    tracing::debug!("Writing {} name(s) to {}", subdomains.len(), path);
    storage
        .write_file(path, render_file_contents(subdomains).as_bytes())
        .await
}

pub fn saved_message(path: &str) -> String {
    format!("\nSubdomains stored in the file {}", path)
}
