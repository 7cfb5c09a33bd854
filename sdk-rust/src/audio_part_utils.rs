use crate::{AudioFormat, GenerationError, GenerationResult};

pub fn map_audio_format_to_mime_type(format: AudioFormat) -> &'static str {
    match format {
        AudioFormat::Wav => "audio/wav",
        AudioFormat::Mp3 => "audio/mp3",
        AudioFormat::Linear16 => "audio/l16",
        AudioFormat::Flac => "audio/flac",
        AudioFormat::Aac => "audio/aac",
        AudioFormat::Opus => "audio/opus",
    }
}

pub fn map_mime_type_to_audio_format(mime_type: &str) -> GenerationResult<AudioFormat> {
    let formatted_mime_type = mime_type
        .split(';')
        .next()
        .unwrap_or(mime_type)
        .trim()
        .to_lowercase();
    Ok(match formatted_mime_type.as_str() {
        "audio/wav" => AudioFormat::Wav,
        "audio/mp3" | "audio/mpeg" => AudioFormat::Mp3,
        "audio/l16" | "audio/pcm" => AudioFormat::Linear16,
        "audio/flac" => AudioFormat::Flac,
        "audio/aac" => AudioFormat::Aac,
        "audio/opus" => AudioFormat::Opus,
        _ => Err(GenerationError::Invariant(
            "",
            format!("Unsupported audio mime type: {mime_type}"),
        ))?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_gemini_pcm_mime() {
        assert_eq!(
            map_mime_type_to_audio_format("audio/L16;codec=pcm;rate=24000").unwrap(),
            AudioFormat::Linear16
        );
        assert_eq!(
            map_mime_type_to_audio_format("audio/pcm;rate=24000").unwrap(),
            AudioFormat::Linear16
        );
        assert!(map_mime_type_to_audio_format("video/mp4").is_err());
    }
}
