//! Speech synthesis and playback.

use std::io::{IsTerminal, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use anyhow::Context as _;
use clap::Args;
use tokio::sync::{Mutex, watch};

use lector_audio::{AudioOutput, ChannelBuffers, NullOutput, PlaybackError, encode_pcm};
use lector_narrator::{Credentials, GeminiProvider, Narrator, Outcome, SkipReason, Voice};

use super::{format_duration, get_context, print_info, print_success, print_verbose};
use crate::Cli;

const BAR_WIDTH: usize = 20;

/// Synthesize text and play it.
///
/// Reads the text from the argument, or from stdin when none is given.
#[derive(Args)]
pub struct SpeakCommand {
    /// Text to speak (default: read stdin)
    text: Option<String>,

    /// Voice label (Kore, Charon, Fenrir, Puck, Zephyr, Mystery)
    #[arg(long)]
    voice: Option<Voice>,

    /// Model name
    #[arg(long)]
    model: Option<String>,

    /// API key (overrides context and environment)
    #[arg(long)]
    api_key: Option<String>,

    /// Also write the audio as raw 16-bit LE PCM (24kHz mono)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Skip playback
    #[arg(long)]
    no_play: bool,
}

impl SpeakCommand {
    pub async fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let text = self.read_text()?;
        let ctx = get_context(cli)?;

        let voice = match self.voice {
            Some(v) => v,
            None if !ctx.default_voice.is_empty() => ctx.default_voice.parse()?,
            None => Voice::default(),
        };
        let model = self
            .model
            .clone()
            .or_else(|| Some(ctx.default_model.clone()).filter(|m| !m.is_empty()))
            .unwrap_or_else(|| lector_gemini::MODEL_FLASH_TTS.to_string());

        let key = self
            .api_key
            .clone()
            .filter(|k| !k.is_empty())
            .unwrap_or_else(|| ctx.api_key.clone());
        let credentials = if key.is_empty() {
            Credentials::from_env()
        } else {
            Credentials::with_key(key)
        };

        let mut provider = GeminiProvider::new(credentials).with_model(model);
        if !ctx.base_url.is_empty() {
            provider = provider.with_base_url(ctx.base_url.clone());
        }
        if ctx.timeout > 0 {
            provider = provider.with_timeout(Duration::from_secs(ctx.timeout));
        }

        if !ctx.name.is_empty() {
            print_verbose(cli, &format!("Using context: {}", ctx.name));
        }
        print_verbose(cli, &format!("Model: {}", provider.model()));
        print_verbose(cli, &format!("Voice: {} ({})", voice, voice.provider_id()));

        tracing::debug!(
            voice = %voice,
            voice_id = voice.provider_id(),
            model = provider.model(),
            chars = text.chars().count(),
            play = !self.no_play,
            "speak: starting"
        );

        let mut output = self.playback_output();
        let capture = self
            .output
            .as_ref()
            .map(|_| Arc::new(CaptureOutput::new(output.clone())));
        if let Some(capture) = &capture {
            output = capture.clone();
        }

        let narrator = Narrator::new(Arc::new(provider), output);
        let renderer = tokio::spawn(render_progress(narrator.progress()));
        let result = narrator.synthesize(&text, voice).await;
        renderer.abort();
        clear_progress();

        match result? {
            Outcome::Played { duration, .. } => {
                if let (Some(path), Some(capture)) = (&self.output, &capture) {
                    save_pcm(path, &capture.take().await)?;
                    print_success(&format!("Audio saved to: {}", path.display()));
                }
                print_verbose(cli, &format!("Played {}", format_duration(duration)));
            }
            Outcome::Skipped(SkipReason::EmptyText) => print_info("Nothing to speak"),
            Outcome::Skipped(SkipReason::Busy) => print_info("A synthesis is already running"),
        }
        Ok(())
    }

    fn read_text(&self) -> anyhow::Result<String> {
        if let Some(text) = &self.text {
            return Ok(text.clone());
        }
        let mut stdin = std::io::stdin();
        if stdin.is_terminal() {
            anyhow::bail!("no text given; pass it as an argument or pipe it on stdin");
        }
        let mut text = String::new();
        stdin.read_to_string(&mut text)?;
        Ok(text)
    }

    fn playback_output(&self) -> Arc<dyn AudioOutput> {
        if self.no_play {
            return Arc::new(NullOutput);
        }
        device_output()
    }
}

#[cfg(feature = "device")]
fn device_output() -> Arc<dyn AudioOutput> {
    Arc::new(lector_audio::DevicePlayer::new())
}

#[cfg(not(feature = "device"))]
fn device_output() -> Arc<dyn AudioOutput> {
    tracing::warn!("built without audio device support; playback skipped");
    Arc::new(NullOutput)
}

/// Keeps a PCM copy of each buffer before handing it to `inner`.
struct CaptureOutput {
    pcm: Mutex<Vec<u8>>,
    inner: Arc<dyn AudioOutput>,
}

impl CaptureOutput {
    fn new(inner: Arc<dyn AudioOutput>) -> Self {
        Self {
            pcm: Mutex::new(Vec::new()),
            inner,
        }
    }

    async fn take(&self) -> Vec<u8> {
        std::mem::take(&mut *self.pcm.lock().await)
    }
}

#[async_trait]
impl AudioOutput for CaptureOutput {
    async fn play(&self, buffers: ChannelBuffers) -> Result<(), PlaybackError> {
        self.pcm.lock().await.extend_from_slice(&encode_pcm(&buffers));
        self.inner.play(buffers).await
    }
}

fn save_pcm(path: &Path, pcm: &[u8]) -> anyhow::Result<()> {
    lector_cli::write_binary(path, pcm)
        .with_context(|| format!("failed to write audio to {}", path.display()))
}

async fn render_progress(mut rx: watch::Receiver<u8>) {
    loop {
        let pct = *rx.borrow_and_update();
        let mut stderr = std::io::stderr();
        let _ = write!(stderr, "\r{}", progress_line(pct));
        let _ = stderr.flush();
        if rx.changed().await.is_err() {
            return;
        }
    }
}

fn clear_progress() {
    let mut stderr = std::io::stderr();
    let _ = write!(stderr, "\r\x1b[2K");
    let _ = stderr.flush();
}

fn progress_line(pct: u8) -> String {
    let pct = pct.min(100);
    let filled = usize::from(pct) * BAR_WIDTH / 100;
    format!(
        "🛸 [{}{}] {:>3}%",
        "█".repeat(filled),
        "░".repeat(BAR_WIDTH - filled),
        pct
    )
}
