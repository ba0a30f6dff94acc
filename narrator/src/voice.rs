//! User-facing voices and the alias table.

use std::fmt;
use std::str::FromStr;

/// A voice the user can pick.
///
/// Most labels are provider voices as-is. [`Voice::Mystery`] is an alias: it
/// resolves to the provider's `Charon` voice for its deep, authoritative tone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Voice {
    #[default]
    Kore,
    Charon,
    Fenrir,
    Puck,
    Zephyr,
    Mystery,
}

/// Error returned when a string names no known voice.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown voice: {0} (expected one of Kore, Charon, Fenrir, Puck, Zephyr, Mystery)")]
pub struct ParseVoiceError(pub String);

impl Voice {
    /// Every selectable voice, in display order.
    pub const ALL: [Voice; 6] = [
        Voice::Kore,
        Voice::Charon,
        Voice::Fenrir,
        Voice::Puck,
        Voice::Zephyr,
        Voice::Mystery,
    ];

    /// Returns the user-facing label.
    pub fn label(self) -> &'static str {
        match self {
            Voice::Kore => "Kore",
            Voice::Charon => "Charon",
            Voice::Fenrir => "Fenrir",
            Voice::Puck => "Puck",
            Voice::Zephyr => "Zephyr",
            Voice::Mystery => "Mystery",
        }
    }

    /// Resolves the label to the provider voice identifier.
    pub fn provider_id(self) -> &'static str {
        match self {
            Voice::Mystery => "Charon",
            other => other.label(),
        }
    }

    /// Returns true if the label maps to a different provider voice.
    pub fn is_alias(self) -> bool {
        self.label() != self.provider_id()
    }

    /// Returns a short description for listings.
    pub fn description(self) -> &'static str {
        match self {
            Voice::Kore => "Cosmic Echoes",
            Voice::Charon => "Alien Transmission",
            Voice::Fenrir => "Guardian of the Abyss",
            Voice::Puck => "Spectral Whisper",
            Voice::Zephyr => "Abductee's Logbook",
            Voice::Mystery => "Mysterious Voice (deep and hidden)",
        }
    }
}

impl fmt::Display for Voice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Voice {
    type Err = ParseVoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Voice::ALL
            .into_iter()
            .find(|v| v.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseVoiceError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lector_gemini::is_prebuilt_voice;

    #[test]
    fn test_mystery_resolves_to_charon() {
        assert_eq!(Voice::Mystery.provider_id(), "Charon");
        assert!(Voice::Mystery.is_alias());
    }

    #[test]
    fn test_other_labels_pass_through() {
        for voice in Voice::ALL.into_iter().filter(|v| *v != Voice::Mystery) {
            assert_eq!(voice.provider_id(), voice.label());
            assert!(!voice.is_alias());
        }
    }

    #[test]
    fn test_every_label_resolves_to_prebuilt_voice() {
        for voice in Voice::ALL {
            assert!(is_prebuilt_voice(voice.provider_id()), "{voice}");
        }
    }

    #[test]
    fn test_parse() {
        assert_eq!("Mystery".parse::<Voice>().unwrap(), Voice::Mystery);
        assert_eq!("kore".parse::<Voice>().unwrap(), Voice::Kore);
        assert_eq!(" FENRIR ".parse::<Voice>().unwrap(), Voice::Fenrir);

        let err = "Aoede".parse::<Voice>().unwrap_err();
        assert_eq!(err, ParseVoiceError("Aoede".to_string()));
        assert!(err.to_string().contains("Mystery"));
    }

    #[test]
    fn test_display_round_trip() {
        for voice in Voice::ALL {
            assert_eq!(voice.to_string().parse::<Voice>().unwrap(), voice);
        }
        assert_eq!(Voice::default(), Voice::Kore);
    }
}
