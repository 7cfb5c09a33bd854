use std::sync::Arc;

use marketgenius_studio::{
    live::{cpal::CpalAudioDevice, gemini_connector},
    LiveSessionHandle, LiveSessionOptions, LiveState,
};

mod common;

#[tokio::main]
async fn main() {
    let config = common::setup();

    let handle = LiveSessionHandle::spawn(
        gemini_connector(&config),
        Arc::new(CpalAudioDevice::new()),
        LiveSessionOptions::from_config(&config),
    );
    handle.start().unwrap();

    let snapshot = handle
        .wait_for(|snapshot| matches!(snapshot.state, LiveState::Connected | LiveState::Error))
        .await
        .unwrap();
    if let Some(error) = snapshot.error {
        eprintln!("{error}");
        return;
    }

    println!("Connected. Speak into the microphone, press Ctrl-C to stop.");
    tokio::signal::ctrl_c().await.unwrap();

    let transcript = handle.current().transcript;
    handle.shutdown().await;
    if !transcript.is_empty() {
        println!("\n{transcript}");
    }
}
