//! Landscaper dashboard binary entrypoint kept minimal. The runtime lives in `app`.

use std::fmt;
use std::path::Path;
use std::process::ExitCode;
use std::sync::OnceLock;

use clap::Parser;

use landscaper_dashboard::args::{self, Args};
use landscaper_dashboard::config::{self, Settings};

struct DashboardTimer;

impl tracing_subscriber::fmt::time::FormatTime for DashboardTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> fmt::Result {
        let ts = chrono::Local::now()
            .format("%Y-%m-%d-T %H:%M:%S")
            .to_string();
        w.write_str(&ts)
    }
}

static LOG_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

/// What: Install the global tracing subscriber.
///
/// Inputs:
/// - `level`: Fallback filter when `RUST_LOG` is unset.
///
/// Details:
/// - Writes to `<config_dir>/logs/landscaper-dashboard.log` through a
///   non-blocking appender; falls back to stderr when the file cannot be opened.
fn init_logging(level: &str) {
    let env_filter = || {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level))
    };
    let mut log_path = config::logs_dir();
    log_path.push("landscaper-dashboard.log");
    match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => {
            let (non_blocking, guard) = tracing_appender::non_blocking(file);
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_target(false)
                .with_ansi(false)
                .with_writer(non_blocking)
                .with_timer(DashboardTimer)
                .init();
            let _ = LOG_GUARD.set(guard);
            tracing::info!(path = %log_path.display(), "logging initialized");
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_target(false)
                .with_ansi(true)
                .with_writer(std::io::stderr)
                .with_timer(DashboardTimer)
                .init();
            tracing::warn!(error = %e, "failed to open log file; using stderr");
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Args::parse();

    let loaded = Settings::load(cli.config.as_deref());
    let mut settings = match &loaded {
        Ok(l) => l.settings.clone(),
        Err(_) => Settings::default(),
    };
    args::apply_overrides(&cli, &mut settings);
    init_logging(&args::determine_log_level(&cli, &settings));

    match loaded {
        Err(e) => {
            tracing::error!(error = %e, "configuration error");
            eprintln!("landscaper-dashboard: {e}");
            return ExitCode::FAILURE;
        }
        Ok(l) => {
            if let Some(e) = l.ignored {
                tracing::warn!(error = %e, "ignoring invalid config; using defaults");
            }
        }
    }

    tracing::info!(
        server = %settings.server_url,
        context = %settings.default_repository_context,
        demo = cli.demo,
        config = %cli.config.as_deref().map_or_else(config::config_file, Path::to_path_buf).display(),
        "landscaper-dashboard starting"
    );
    let code = match landscaper_dashboard::app::run(settings, cli.demo).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = ?err, "application error");
            eprintln!("landscaper-dashboard: {err}");
            ExitCode::FAILURE
        }
    };
    tracing::info!("landscaper-dashboard exited");
    code
}

#[cfg(test)]
mod tests {
    /// What: `FormatTime` impl writes a non-empty timestamp without panicking
    ///
    /// - Input: Tracing writer buffer
    /// - Output: Buffer receives some content
    #[test]
    fn dashboard_timer_formats_time_without_panic() {
        use tracing_subscriber::fmt::time::FormatTime;
        let mut buf = String::new();
        let mut writer = tracing_subscriber::fmt::format::Writer::new(&mut buf);
        let t = super::DashboardTimer;
        let _ = t.format_time(&mut writer);
        assert!(buf.contains("-T "));
    }
}
