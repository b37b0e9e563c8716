use clap::Parser;

use portal_config::schema::LogLevel;

/// Portal: a native shell around a single website.
#[derive(Parser, Debug, Default)]
#[command(name = "portal", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<String>,

    /// Site URL override (takes precedence over a bundled document).
    #[arg(long)]
    pub url: Option<String>,

    /// Log level override (debug, info, warn, error) or a full filter
    /// directive such as `portal_bridge=trace`.
    #[arg(long)]
    pub log_level: Option<String>,
}

pub fn parse() -> Args {
    Args::parse()
}

/// The `tracing` filter directive to start with.
pub fn log_directive(cli: Option<&str>, configured: LogLevel) -> String {
    match cli.map(str::trim).filter(|s| !s.is_empty()) {
        Some(value) if value.contains('=') => value.to_string(),
        Some(level) => format!("portal={}", level.to_ascii_lowercase()),
        None => configured.directive().to_string(),
    }
}
