//! lector - speak text aloud with Gemini text-to-speech.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{ConfigCommand, SpeakCommand, VoicesCommand};

/// lector - speak text aloud with Gemini text-to-speech.
///
/// Sends text to the Gemini speech model, decodes the returned 24kHz PCM and
/// plays it on the default output device.
///
/// The API key is taken from --api-key, the selected context, or the
/// GEMINI_API_KEY / API_KEY environment variables, in that order.
/// Configuration is stored in ~/.lector/lector/ and supports multiple
/// contexts, similar to kubectl's context management.
#[derive(Parser)]
#[command(name = "lector")]
#[command(about = "Gemini text-to-speech CLI")]
#[command(version)]
pub struct Cli {
    /// Config file (default is ~/.lector/lector/config.yaml)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Context name to use
    #[arg(short = 'c', long, global = true)]
    pub context: Option<String>,

    /// Output as JSON (for piping)
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose output
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Synthesize text and play it
    Speak(SpeakCommand),
    /// List available voices
    Voices(VoicesCommand),
    /// Manage CLI configuration
    Config(ConfigCommand),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match &cli.command {
        Commands::Speak(cmd) => cmd.run(&cli).await,
        Commands::Voices(cmd) => cmd.run(&cli),
        Commands::Config(cmd) => cmd.run(&cli),
    }
}
