//! Configuration management commands.

use clap::{Args, Subcommand};
use serde::Serialize;

use lector_cli::{Context, mask_api_key};
use lector_narrator::Voice;

use super::{get_config, output, print_success};
use crate::Cli;

/// Manage CLI configuration.
///
/// Contexts allow you to manage multiple API configurations,
/// similar to kubectl's context management.
///
/// Configuration is stored in ~/.lector/lector/config.yaml
#[derive(Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    command: ConfigSubcommand,
}

#[derive(Subcommand)]
enum ConfigSubcommand {
    /// Add a new context
    #[command(name = "add-context")]
    AddContext {
        /// Context name
        name: String,
        /// API key (falls back to GEMINI_API_KEY / API_KEY when omitted)
        #[arg(long)]
        api_key: Option<String>,
        /// API base URL
        #[arg(long)]
        base_url: Option<String>,
        /// Request timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,
        /// Default model
        #[arg(long)]
        default_model: Option<String>,
        /// Default voice label
        #[arg(long)]
        default_voice: Option<Voice>,
    },
    /// Delete a context
    #[command(name = "delete-context")]
    DeleteContext {
        /// Context name
        name: String,
    },
    /// Set the current context
    #[command(name = "use-context")]
    UseContext {
        /// Context name
        name: String,
    },
    /// Display the current context
    #[command(name = "get-context")]
    GetContext,
    /// List all contexts
    #[command(name = "list-contexts", alias = "get-contexts")]
    ListContexts,
    /// View the current configuration
    View,
}

#[derive(Serialize)]
struct ConfigView<'a> {
    path: String,
    current_context: &'a str,
    contexts: Vec<ContextView<'a>>,
}

#[derive(Serialize)]
struct ContextView<'a> {
    name: &'a str,
    api_key: String,
    #[serde(skip_serializing_if = "str::is_empty")]
    base_url: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    timeout: Option<u64>,
    #[serde(skip_serializing_if = "str::is_empty")]
    default_model: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    default_voice: &'a str,
}

impl<'a> ContextView<'a> {
    fn new(ctx: &'a Context) -> Self {
        Self {
            name: &ctx.name,
            api_key: if ctx.api_key.is_empty() {
                "(environment)".to_string()
            } else {
                mask_api_key(&ctx.api_key)
            },
            base_url: &ctx.base_url,
            timeout: (ctx.timeout > 0).then_some(ctx.timeout),
            default_model: &ctx.default_model,
            default_voice: &ctx.default_voice,
        }
    }
}

impl ConfigCommand {
    pub fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        match &self.command {
            ConfigSubcommand::AddContext {
                name,
                api_key,
                base_url,
                timeout,
                default_model,
                default_voice,
            } => {
                let mut cfg = get_config(cli)?;
                let ctx = Context {
                    api_key: api_key.clone().unwrap_or_default(),
                    base_url: base_url.clone().unwrap_or_default(),
                    timeout: timeout.unwrap_or(0),
                    default_model: default_model.clone().unwrap_or_default(),
                    default_voice: default_voice.map(|v| v.to_string()).unwrap_or_default(),
                    ..Default::default()
                };
                cfg.add_context(name, ctx)?;
                print_success(&format!("Context \"{}\" added successfully", name));
                Ok(())
            }

            ConfigSubcommand::DeleteContext { name } => {
                let mut cfg = get_config(cli)?;
                cfg.delete_context(name)?;
                print_success(&format!("Context \"{}\" deleted", name));
                Ok(())
            }

            ConfigSubcommand::UseContext { name } => {
                let mut cfg = get_config(cli)?;
                cfg.use_context(name)?;
                print_success(&format!("Switched to context \"{}\"", name));
                Ok(())
            }

            ConfigSubcommand::GetContext => {
                let cfg = get_config(cli)?;
                if cfg.current_context.is_empty() {
                    println!("No current context set");
                } else {
                    println!("{}", cfg.current_context);
                }
                Ok(())
            }

            ConfigSubcommand::ListContexts => {
                let cfg = get_config(cli)?;
                if cfg.contexts.is_empty() {
                    println!("No contexts configured");
                    return Ok(());
                }

                println!("{:<8} {:<20} {:<30} {}", "CURRENT", "NAME", "BASE_URL", "DEFAULT_VOICE");
                for (name, ctx) in &cfg.contexts {
                    let current = if name == &cfg.current_context { "*" } else { "" };
                    let base_url = if ctx.base_url.is_empty() {
                        "(default)"
                    } else {
                        &ctx.base_url
                    };
                    println!("{:<8} {:<20} {:<30} {}", current, name, base_url, ctx.default_voice);
                }
                Ok(())
            }

            ConfigSubcommand::View => {
                let cfg = get_config(cli)?;
                let view = ConfigView {
                    path: cfg.path().display().to_string(),
                    current_context: &cfg.current_context,
                    contexts: cfg.contexts.values().map(ContextView::new).collect(),
                };
                output(cli).write(&view)
            }
        }
    }
}
