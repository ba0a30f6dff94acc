//! Model constants and predefined values for the Gemini API.

// ==================== Speech Models ====================

/// gemini-2.5-flash-preview-tts, low-latency speech generation.
pub const MODEL_FLASH_TTS: &str = "gemini-2.5-flash-preview-tts";

/// gemini-2.5-pro-preview-tts, higher quality speech generation.
pub const MODEL_PRO_TTS: &str = "gemini-2.5-pro-preview-tts";

// ==================== Speech Output ====================

/// Sample rate of the PCM audio returned by the speech models.
pub const SPEECH_SAMPLE_RATE: u32 = 24000;

/// Channel count of the PCM audio returned by the speech models.
pub const SPEECH_CHANNELS: u16 = 1;

// ==================== Voices ====================

/// Prebuilt voices accepted in `prebuiltVoiceConfig.voiceName`.
pub const PREBUILT_VOICES: &[&str] = &[
    "Zephyr",
    "Puck",
    "Charon",
    "Kore",
    "Fenrir",
    "Leda",
    "Orus",
    "Aoede",
    "Callirrhoe",
    "Autonoe",
    "Enceladus",
    "Iapetus",
    "Umbriel",
    "Algieba",
    "Despina",
    "Erinome",
    "Algenib",
    "Rasalgethi",
    "Laomedeia",
    "Achernar",
    "Alnilam",
    "Schedar",
    "Gacrux",
    "Pulcherrima",
    "Achird",
    "Zubenelgenubi",
    "Vindemiatrix",
    "Sadachbia",
    "Sadaltager",
    "Sulafat",
];

/// Returns true if `name` is a prebuilt voice.
pub fn is_prebuilt_voice(name: &str) -> bool {
    PREBUILT_VOICES.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prebuilt_voices() {
        assert_eq!(PREBUILT_VOICES.len(), 30);
        assert!(is_prebuilt_voice("Charon"));
        assert!(is_prebuilt_voice("Kore"));
        assert!(!is_prebuilt_voice("Mystery"));
        assert!(!is_prebuilt_voice("kore"));
    }
}
