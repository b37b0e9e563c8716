mod app_state;
mod cli;

use std::path::Path;

use tracing_subscriber::EnvFilter;
use winit::event_loop::EventLoop;

use portal_common::ConfigError;
use portal_config::{LoadedConfig, PortalConfig};

fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let path = portal_platform::crash_report::write_crash_report(info);

        eprintln!("\n--- Portal crashed ---");
        if let Some(p) = &path {
            eprintln!("Crash report written to: {}", p.display());
        }
        eprintln!("----------------------\n");

        default_hook(info);
    }));
}

fn load_config(args: &cli::Args) -> Result<LoadedConfig, ConfigError> {
    match &args.config {
        Some(path) => portal_config::load_config_from(Path::new(path)),
        None => portal_config::load_config(),
    }
}

/// Report how loading went and pick the config to run with. Must run after
/// the subscriber is installed.
fn settle_config(loaded: Result<LoadedConfig, ConfigError>) -> PortalConfig {
    match loaded {
        Ok(loaded) => {
            if loaded.created {
                tracing::info!("Created default config at {}", loaded.path.display());
            } else {
                tracing::info!("Loaded config from {}", loaded.path.display());
            }
            if let Some(problems) = loaded.problems {
                tracing::warn!("Invalid config values reset to defaults: {problems}");
            }
            loaded.config
        }
        Err(e) => {
            tracing::warn!("Config load failed, using defaults: {e}");
            PortalConfig::default()
        }
    }
}

/// Apply command-line overrides on top of the loaded config.
fn apply_overrides(config: &mut PortalConfig, args: &cli::Args) {
    if let Some(url) = &args.url {
        config.site.url = url.clone();
        config.site.bundled = None;
    }
}

fn main() {
    install_panic_hook();

    let args = cli::parse();

    // Logging needs the configured level, so load config first and report
    // the outcome once the subscriber is up.
    let loaded = load_config(&args);
    let configured_level = loaded
        .as_ref()
        .map(|loaded| loaded.config.logging.level)
        .unwrap_or_default();

    let directive = cli::log_directive(args.log_level.as_deref(), configured_level);
    let mut filter = EnvFilter::from_default_env();
    for candidate in [directive.as_str(), configured_level.directive()] {
        if let Ok(d) = candidate.parse() {
            filter = filter.add_directive(d);
            break;
        }
        eprintln!("Ignoring invalid log directive: {candidate}");
    }
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!("Portal v{} starting...", env!("CARGO_PKG_VERSION"));

    if let Some(ref path) = args.config {
        tracing::info!("Using config override: {path}");
    }
    let mut config = settle_config(loaded);
    apply_overrides(&mut config, &args);
    tracing::info!(
        schema = portal_config::CONFIG_SCHEMA_VERSION,
        url = %config.site.url,
        bundled = ?config.site.bundled,
        "Config loaded"
    );
    tracing::debug!("Effective config:\n{}", portal_config::config_to_json(&config));

    if let Err(e) = portal_platform::ensure_dirs() {
        tracing::warn!("Failed to create directories: {e}");
    }

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            tracing::error!("Failed to create event loop: {e}");
            std::process::exit(1);
        }
    };
    let mut app = app_state::PortalApp::new(config);

    tracing::info!("Entering event loop");
    if let Err(e) = event_loop.run_app(&mut app) {
        tracing::error!("Event loop error: {e}");
    }
    tracing::info!("Shutdown complete");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_override_replaces_bundled_site() {
        let mut config = PortalConfig::default();
        config.site.bundled = Some("site/index.html".into());
        let args = cli::Args {
            url: Some("https://shop.example.com".into()),
            ..Default::default()
        };
        apply_overrides(&mut config, &args);
        assert_eq!(config.site.url, "https://shop.example.com");
        assert!(config.site.bundled.is_none());
    }

    #[test]
    fn no_override_keeps_config() {
        let mut config = PortalConfig::default();
        apply_overrides(&mut config, &cli::Args::default());
        assert_eq!(config.site.url, PortalConfig::default().site.url);
    }

    #[test]
    fn missing_config_file_is_reported() {
        let args = cli::Args {
            config: Some("/definitely/not/here/portal.toml".into()),
            ..Default::default()
        };
        assert!(matches!(load_config(&args), Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn repaired_config_keeps_the_site() {
        let mut config = PortalConfig::default();
        config.site.url = "https://shop.example.com".into();
        let loaded = LoadedConfig {
            config,
            path: "/tmp/portal/config.toml".into(),
            created: false,
            problems: Some(ConfigError::ValidationError(
                "window.width = 100 is out of range [200, 7680]".into(),
            )),
        };
        let config = settle_config(Ok(loaded));
        assert_eq!(config.site.url, "https://shop.example.com");
    }

    #[test]
    fn unreadable_config_falls_back_to_defaults() {
        let config = settle_config(Err(ConfigError::ParseError("bad toml".into())));
        assert_eq!(config.site.url, PortalConfig::default().site.url);
    }
}
