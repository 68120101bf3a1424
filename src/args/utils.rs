//! Shared utilities for argument processing.

use crate::args::Args;
use crate::config::Settings;

/// What: Determine the log level from arguments and settings.
///
/// Inputs:
/// - `args`: Parsed command-line arguments.
/// - `settings`: Loaded settings.
///
/// Output:
/// - Log level string (trace, debug, info, warn, error).
///
/// Details:
/// - Verbose flag overrides `--log-level`, which overrides the config file.
#[must_use]
pub fn determine_log_level(args: &Args, settings: &Settings) -> String {
    if args.verbose {
        "debug".to_string()
    } else {
        args.log_level
            .clone()
            .unwrap_or_else(|| settings.log_level.clone())
    }
}

/// What: Apply command-line overrides on top of loaded settings.
///
/// Inputs:
/// - `args`: Parsed command-line arguments.
/// - `settings`: Settings to override in place.
pub fn apply_overrides(args: &Args, settings: &mut Settings) {
    if let Some(url) = &args.server_url {
        settings.server_url.clone_from(url);
    }
    if let Some(ctx) = &args.context {
        settings.default_repository_context.clone_from(ctx);
    }
    if let Some(ns) = &args.namespace {
        settings.installation_namespace.clone_from(ns);
    }
    if let Some(include) = args.include_subinstallations {
        settings.include_subinstallations = include;
    }
}
