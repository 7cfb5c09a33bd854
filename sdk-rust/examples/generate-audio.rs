// Requires ffplay (https://ffmpeg.org/) on PATH.
use base64::{engine::general_purpose::STANDARD as BASE64_STANDARD, Engine};
use dotenvy::dotenv;
use marketgenius_sdk::{
    google::GoogleModel, AudioOptions, LanguageModel, LanguageModelInput, Message, Modality, Part,
};
use std::{
    io::Write,
    process::{Command, Stdio},
};

mod common;

#[tokio::main]
async fn main() {
    dotenv().ok();

    let model = GoogleModel::new("gemini-2.5-flash-preview-tts", common::google_options());

    let response = model
        .generate(LanguageModelInput {
            modalities: Some(vec![Modality::Audio]),
            messages: vec![Message::user(vec![Part::text(
                "Say cheerfully: our spring sale starts today!",
            )])],
            audio: Some(AudioOptions {
                voice: Some("Kore".into()),
                ..Default::default()
            }),
            ..Default::default()
        })
        .await
        .expect("model.generate failed");

    if let Some(audio_part) = response.first_audio() {
        let audio_bytes = BASE64_STANDARD
            .decode(&audio_part.audio_data)
            .expect("invalid base64 audio data");

        play(&audio_bytes, audio_part.sample_rate.unwrap_or(24_000)).expect("ffplay playback failed");
    } else {
        println!("Audio part not found in response");
    }
}

fn play(pcm: &[u8], sample_rate: u32) -> std::io::Result<()> {
    let rate = sample_rate.to_string();
    let mut child = Command::new("ffplay")
        .args([
            "-autoexit", "-nodisp", "-loglevel", "error", "-f", "s16le", "-ar", &rate, "-ac", "1",
            "-",
        ])
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::inherit())
        .spawn()?;

    {
        let stdin = child.stdin.as_mut().expect("ffplay stdin unavailable");
        stdin.write_all(pcm)?;
    }

    let status = child.wait()?;
    if status.success() {
        Ok(())
    } else {
        Err(std::io::Error::other("ffplay exited with error"))
    }
}
