//! Utility functions for CLI commands.

use lector_cli::{Config, Context, Output, OutputFormat, load_config};

use crate::Cli;

const APP_NAME: &str = "lector";

/// Gets the global configuration.
pub fn get_config(cli: &Cli) -> anyhow::Result<Config> {
    load_config(APP_NAME, cli.config.as_deref())
}

/// Gets the context to use.
///
/// An explicit `-c` must name an existing context. Without one, the current
/// context is used if set, otherwise an empty context so that everything
/// falls back to flags and the environment.
pub fn get_context(cli: &Cli) -> anyhow::Result<Context> {
    let cfg = get_config(cli)?;
    match (cfg.resolve_context(cli.context.as_deref()), cli.context.as_deref()) {
        (Some(ctx), _) => Ok(ctx.clone()),
        (None, Some(name)) if !name.is_empty() => anyhow::bail!("context '{}' not found", name),
        (None, _) => Ok(Context::default()),
    }
}

/// Returns the structured output for `--json` or YAML.
pub fn output(cli: &Cli) -> Output {
    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Yaml
    };
    Output::new(format, None)
}

/// Prints verbose output if enabled.
pub fn print_verbose(cli: &Cli, msg: &str) {
    if cli.verbose {
        eprintln!("[verbose] {}", msg);
    }
}

/// Prints success message.
pub fn print_success(msg: &str) {
    eprintln!("\x1b[32m✓\x1b[0m {}", msg);
}

/// Prints info message.
pub fn print_info(msg: &str) {
    eprintln!("\x1b[34mℹ\x1b[0m {}", msg);
}

/// Formats a duration as seconds with two decimals.
pub fn format_duration(duration: std::time::Duration) -> String {
    format!("{:.2}s", duration.as_secs_f64())
}
