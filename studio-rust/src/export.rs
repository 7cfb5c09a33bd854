//! Local document construction for copy, print, and download actions.
//!
//! Markdown rendering happens in the front end; the HTML helpers here take
//! already rendered markup.

use std::io::Cursor;

use crate::{
    chat::{ChatMessage, Sender},
    generation::SpeechAudio,
    StudioResult,
};

const WORD_HEADER: &str = "<html xmlns:o='urn:schemas-microsoft-com:office:office' xmlns:w='urn:schemas-microsoft-com:office:word' xmlns='http://www.w3.org/TR/REC-html40'><head><meta charset='utf-8'><title>Export HTML To Doc</title><style>body{font-family: Arial, sans-serif;} h1,h2,h3,h4,h5,h6{font-weight: bold;} table{border-collapse: collapse;} td,th{border: 1px solid #ccc; padding: 8px;} img { max-width: 100%; height: auto; }</style></head><body>";
const WORD_FOOTER: &str = "</body></html>";

pub const WORD_MIME_TYPE: &str = "application/vnd.ms-word";
pub const TRANSCRIPT_FILE_NAME: &str = "marvin-chat-transcript.txt";

/// `# {title}`, the feature image if any, then the body.
#[must_use]
pub fn article_markdown(title: &str, feature_image: Option<&str>, body: &str) -> String {
    let feature = feature_image
        .map(|url| format!("![Generated feature image]({url})\n\n"))
        .unwrap_or_default();
    format!("# {title}\n\n{feature}{body}")
}

/// Plain-text transcript with one `Marvin:` or `User:` block per message.
#[must_use]
pub fn chat_transcript(messages: &[ChatMessage]) -> String {
    messages
        .iter()
        .map(|message| {
            let speaker = match message.sender {
                Sender::Ai => "Marvin",
                Sender::User => "User",
            };
            format!("{speaker}: {}", message.text)
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Wraps rendered HTML in the envelope Word opens as a legacy `.doc`.
#[must_use]
pub fn word_document(html: &str) -> String {
    format!("{WORD_HEADER}{html}{WORD_FOOTER}")
}

/// A standalone printable page around rendered HTML.
#[must_use]
pub fn print_document(title: &str, html: &str) -> String {
    format!(
        "<html><head><title>Print - {title}</title><style>body {{ padding: 2rem; font-family: sans-serif; }} .prose {{ max-width: 100% !important; }} img {{ max-width: 100%; border-radius: 0.5rem; }}</style></head><body><div class=\"prose prose-slate max-w-none\">{html}</div></body></html>"
    )
}

/// Download name for a tool result: the lowercased title with every
/// whitespace character replaced by `-`.
#[must_use]
pub fn export_file_name(title: &str, extension: &str) -> String {
    let stem: String = title
        .to_lowercase()
        .chars()
        .map(|c| if c.is_whitespace() { '-' } else { c })
        .collect();
    format!("{stem}.{extension}")
}

/// Download name for a generated image: up to 30 characters of the prompt
/// with whitespace replaced by `_`.
#[must_use]
pub fn image_file_name(prompt: &str) -> String {
    let stem: String = prompt
        .chars()
        .take(30)
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect();
    if stem.is_empty() {
        "generated-image.png".to_string()
    } else {
        format!("{stem}.png")
    }
}

#[must_use]
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Encodes synthesized speech as a 16-bit PCM WAV file.
pub fn speech_wav(audio: &SpeechAudio) -> StudioResult<Vec<u8>> {
    let spec = hound::WavSpec {
        channels: audio.channels.max(1),
        sample_rate: audio.sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut cursor = Cursor::new(Vec::with_capacity(44 + audio.samples.len() * 2));
    let mut writer = hound::WavWriter::new(&mut cursor, spec)?;
    for &sample in &audio.samples {
        writer.write_sample(sample)?;
    }
    writer.finalize()?;
    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn article_markdown_puts_feature_image_first() {
        assert_eq!(
            article_markdown("Launch Day", Some("data:image/png;base64,AA"), "Body"),
            "# Launch Day\n\n![Generated feature image](data:image/png;base64,AA)\n\nBody"
        );
        assert_eq!(article_markdown("Launch Day", None, "Body"), "# Launch Day\n\nBody");
    }

    #[test]
    fn transcript_labels_each_speaker() {
        let messages = vec![
            ChatMessage::ai("Hello!"),
            ChatMessage::user("Any ideas for Q3?"),
        ];
        assert_eq!(
            chat_transcript(&messages),
            "Marvin: Hello!\n\nUser: Any ideas for Q3?"
        );
    }

    #[test]
    fn file_names_follow_the_title() {
        assert_eq!(export_file_name("AIDA Framework", "doc"), "aida-framework.doc");
        assert_eq!(export_file_name("Blog  Post", "doc"), "blog--post.doc");
        assert_eq!(image_file_name("a cat on a red sofa"), "a_cat_on_a_red_sofa.png");
        assert_eq!(image_file_name(""), "generated-image.png");
        assert_eq!(
            image_file_name("one two three four five six seven eight"),
            "one_two_three_four_five_six_se.png"
        );
    }

    #[test]
    fn word_count_ignores_extra_whitespace() {
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("   \n "), 0);
        assert_eq!(word_count("  one two\n\nthree "), 3);
    }

    #[test]
    fn documents_wrap_the_rendered_html() {
        let doc = word_document("<p>Hi</p>");
        assert!(doc.starts_with("<html xmlns:o='urn:schemas-microsoft-com:office:office'"));
        assert!(doc.ends_with("<p>Hi</p></body></html>"));
        let page = print_document("MarketGenius AI", "<p>Hi</p>");
        assert!(page.contains("<title>Print - MarketGenius AI</title>"));
        assert!(page.contains("<p>Hi</p>"));
    }

    #[test]
    fn speech_wav_has_a_pcm_header() {
        let wav = speech_wav(&SpeechAudio {
            samples: vec![0, 1, -1],
            sample_rate: 24_000,
            channels: 1,
        })
        .unwrap();
        assert_eq!(wav.len(), 44 + 6);
        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(&wav[8..12], b"WAVE");
        assert_eq!(u32::from_le_bytes([wav[24], wav[25], wav[26], wav[27]]), 24_000);
        assert_eq!(u32::from_le_bytes([wav[40], wav[41], wav[42], wav[43]]), 6);
        assert_eq!(&wav[46..48], &1i16.to_le_bytes());

        let reader = hound::WavReader::new(Cursor::new(wav)).unwrap();
        assert_eq!(reader.spec().sample_rate, 24_000);
        assert_eq!(reader.spec().channels, 1);
        let samples: Vec<i16> = reader.into_samples().collect::<Result<_, _>>().unwrap();
        assert_eq!(samples, vec![0, 1, -1]);
    }
}
