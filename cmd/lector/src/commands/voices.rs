//! Voice listing.

use clap::Args;
use serde::Serialize;

use lector_narrator::Voice;

use super::output;
use crate::Cli;

/// List available voices.
///
/// Shows each label, the provider voice it resolves to, and its description.
#[derive(Args)]
pub struct VoicesCommand {}

#[derive(Serialize)]
struct VoiceRow {
    label: &'static str,
    voice_id: &'static str,
    description: &'static str,
}

impl VoicesCommand {
    pub fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let rows: Vec<VoiceRow> = Voice::ALL
            .into_iter()
            .map(|v| VoiceRow {
                label: v.label(),
                voice_id: v.provider_id(),
                description: v.description(),
            })
            .collect();

        if cli.json {
            return output(cli).write(&rows);
        }

        println!("{:<10} {:<10} {}", "LABEL", "VOICE_ID", "DESCRIPTION");
        for row in rows {
            println!("{:<10} {:<10} {}", row.label, row.voice_id, row.description);
        }
        Ok(())
    }
}
