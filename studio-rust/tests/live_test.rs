mod common;

use std::sync::Arc;

use common::eventually;
use marketgenius_sdk::{
    audio_utils, testing::{MockLiveConnector, MockLiveRemote},
    AudioFormat, AudioPart, GenerationError, LiveEvent, Modality,
};
use marketgenius_studio::{
    live::{fake::FakeAudioDevice, INPUT_MIME_TYPE},
    LiveSessionHandle, LiveSessionOptions, LiveState,
};

const MICROPHONE_ERROR: &str =
    "Could not access microphone or start session. Please check permissions.";
const CONNECTION_ERROR: &str = "An error occurred with the connection.";

struct Harness {
    handle: LiveSessionHandle,
    device: FakeAudioDevice,
    connector: Arc<MockLiveConnector>,
}

impl Harness {
    fn new() -> Self {
        let device = FakeAudioDevice::new();
        let connector = Arc::new(MockLiveConnector::new());
        let handle = LiveSessionHandle::spawn(
            connector.clone(),
            Arc::new(device.clone()),
            LiveSessionOptions::default(),
        );
        Self {
            handle,
            device,
            connector,
        }
    }

    async fn wait_for_state(&self, state: LiveState) {
        self.handle
            .wait_for(|snapshot| snapshot.state == state)
            .await
            .unwrap();
    }

    /// Starts a session and lets the remote open it.
    async fn connect(&self) -> MockLiveRemote {
        let remote = self.connector.enqueue_session();
        self.handle.start().unwrap();
        assert!(remote.emit(LiveEvent::Open));
        self.wait_for_state(LiveState::Connected).await;
        remote
    }
}

fn audio_chunk(seconds: f64) -> LiveEvent {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let samples = vec![0_i16; (seconds * 24_000.0) as usize];
    LiveEvent::Audio(
        AudioPart::new(audio_utils::i16sample_to_base64(&samples), AudioFormat::Linear16)
            .with_sample_rate(24_000),
    )
}

#[tokio::test]
async fn connected_session_streams_microphone_frames() {
    let harness = Harness::new();
    let remote = harness.connect().await;

    let configs = harness.connector.tracked_configs();
    assert_eq!(configs.len(), 1);
    assert_eq!(configs[0].voice.as_deref(), Some("Zephyr"));
    assert_eq!(configs[0].response_modalities, Some(vec![Modality::Audio]));

    let input = harness.device.input_config().unwrap();
    assert_eq!(input.sample_rate, 16_000);
    assert_eq!(input.frame_size, 4096);
    assert!(harness.device.is_capturing());

    assert!(harness.device.push_frame(vec![0.25; 4096]));
    assert!(harness.device.push_frame(vec![-0.25; 4096]));
    eventually(|| remote.sent_chunks().len() == 2).await;

    let chunks = remote.sent_chunks();
    assert!(chunks.iter().all(|chunk| chunk.mime_type == INPUT_MIME_TYPE));
    assert_eq!(
        audio_utils::base64_to_i16sample(&chunks[0].data).unwrap().len(),
        4096
    );

    let snapshot = harness.handle.snapshot().await.unwrap();
    assert_eq!(snapshot.frames_sent, 2);
    assert_eq!(snapshot.error, None);
}

#[tokio::test]
async fn microphone_is_not_forwarded_before_open() {
    let harness = Harness::new();
    let remote = harness.connector.enqueue_session();
    harness.handle.start().unwrap();
    harness.wait_for_state(LiveState::Connecting).await;

    assert!(!harness.device.push_frame(vec![0.0; 4096]));
    assert!(remote.sent_chunks().is_empty());
}

#[tokio::test]
async fn inbound_chunks_play_back_to_back() {
    let harness = Harness::new();
    let remote = harness.connect().await;

    remote.emit(audio_chunk(1.0));
    remote.emit(audio_chunk(0.5));
    remote.emit(audio_chunk(2.0));
    eventually(|| harness.device.played().len() == 3).await;

    let starts: Vec<f64> = harness
        .device
        .played()
        .iter()
        .map(|buffer| buffer.start_at)
        .collect();
    assert_eq!(starts, vec![0.0, 1.0, 1.5]);
    assert!(harness
        .device
        .played()
        .iter()
        .all(|buffer| buffer.sample_rate == 24_000));

    let snapshot = harness.handle.snapshot().await.unwrap();
    assert!((snapshot.next_start_time - 3.5).abs() < 1e-9);
    assert_eq!(snapshot.active_buffers, 3);
    assert_eq!(snapshot.chunks_received, 3);
}

#[tokio::test]
async fn late_chunk_starts_at_the_current_time() {
    let harness = Harness::new();
    let remote = harness.connect().await;

    remote.emit(audio_chunk(0.5));
    eventually(|| harness.device.played().len() == 1).await;

    harness.device.set_time(3.0);
    remote.emit(audio_chunk(0.5));
    eventually(|| harness.device.played().len() == 2).await;

    assert!((harness.device.played()[1].start_at - 3.0).abs() < 1e-9);
    let snapshot = harness.handle.snapshot().await.unwrap();
    assert_eq!(snapshot.active_buffers, 1);
}

#[tokio::test]
async fn interruption_stops_every_scheduled_buffer() {
    let harness = Harness::new();
    let remote = harness.connect().await;

    for _ in 0..3 {
        remote.emit(audio_chunk(1.0));
    }
    eventually(|| harness.device.played().len() == 3).await;

    remote.emit(LiveEvent::Interrupted);
    eventually(|| harness.device.stopped().len() == 3).await;

    let snapshot = harness.handle.snapshot().await.unwrap();
    assert_eq!(snapshot.next_start_time, 0.0);
    assert_eq!(snapshot.active_buffers, 0);
    assert_eq!(snapshot.state, LiveState::Connected);

    remote.emit(audio_chunk(0.5));
    eventually(|| harness.device.played().len() == 4).await;
    assert_eq!(harness.device.played()[3].start_at, 0.0);
}

#[tokio::test]
async fn stop_while_connecting_closes_the_late_session() {
    let harness = Harness::new();
    let remote = harness.connector.enqueue_gated_session();
    harness.handle.start().unwrap();
    harness.wait_for_state(LiveState::Connecting).await;

    harness.handle.stop().unwrap();
    let snapshot = harness.handle.snapshot().await.unwrap();
    assert_eq!(snapshot.state, LiveState::Disconnected);
    assert!(harness.device.microphone_released());
    assert!(harness.device.output_closed());

    remote.complete_connect();
    eventually(|| remote.is_closed()).await;

    // The late session never drives audio.
    remote.emit(LiveEvent::Open);
    remote.emit(audio_chunk(1.0));
    let snapshot = harness.handle.snapshot().await.unwrap();
    assert_eq!(snapshot.state, LiveState::Disconnected);
    assert!(harness.device.played().is_empty());
    assert!(!harness.device.is_capturing());
}

#[tokio::test]
async fn denied_microphone_fails_and_can_retry() {
    let harness = Harness::new();
    harness.device.deny_microphone(true);

    harness.handle.start().unwrap();
    let snapshot = harness
        .handle
        .wait_for(|snapshot| snapshot.state == LiveState::Error)
        .await
        .unwrap();
    assert_eq!(snapshot.error.as_deref(), Some(MICROPHONE_ERROR));
    assert!(harness.connector.tracked_configs().is_empty());
    assert_eq!(snapshot.state.action_label(), "Retry");

    harness.device.deny_microphone(false);
    let _remote = harness.connect().await;
    let snapshot = harness.handle.snapshot().await.unwrap();
    assert_eq!(snapshot.error, None);
}

#[tokio::test]
async fn failed_connect_reports_connection_error() {
    let harness = Harness::new();
    harness
        .connector
        .enqueue_error(GenerationError::Live("handshake refused".to_string()));

    harness.handle.start().unwrap();
    let snapshot = harness
        .handle
        .wait_for(|snapshot| snapshot.state == LiveState::Error)
        .await
        .unwrap();

    assert_eq!(snapshot.error.as_deref(), Some(CONNECTION_ERROR));
    assert!(harness.device.microphone_released());
    assert!(harness.device.output_closed());
}

#[tokio::test]
async fn transport_error_tears_everything_down() {
    let harness = Harness::new();
    let remote = harness.connect().await;
    remote.emit(audio_chunk(1.0));
    eventually(|| harness.device.played().len() == 1).await;

    remote.emit(LiveEvent::Error("socket reset".to_string()));
    let snapshot = harness
        .handle
        .wait_for(|snapshot| snapshot.state == LiveState::Error)
        .await
        .unwrap();

    assert_eq!(snapshot.error.as_deref(), Some(CONNECTION_ERROR));
    assert_eq!(snapshot.active_buffers, 0);
    assert!(!harness.device.is_capturing());
    assert!(harness.device.microphone_released());
    assert!(harness.device.output_closed());
    assert_eq!(harness.device.stopped().len(), 1);
    assert!(remote.is_closed());
}

#[tokio::test]
async fn remote_close_returns_to_disconnected() {
    let harness = Harness::new();
    let remote = harness.connect().await;

    remote.emit(LiveEvent::Closed(Some("server going away".to_string())));
    harness.wait_for_state(LiveState::Disconnected).await;

    let snapshot = harness.handle.snapshot().await.unwrap();
    assert_eq!(snapshot.error, None);
    assert!(harness.device.microphone_released());
    assert!(harness.device.output_closed());
}

#[tokio::test]
async fn model_text_is_collected_into_the_transcript() {
    let harness = Harness::new();
    let remote = harness.connect().await;

    remote.emit(LiveEvent::Text("Hi, ".to_string()));
    remote.emit(LiveEvent::Text("how can I help?".to_string()));

    let snapshot = harness
        .handle
        .wait_for(|snapshot| snapshot.transcript == "Hi, how can I help?")
        .await
        .unwrap();
    assert_eq!(snapshot.state, LiveState::Connected);
}

#[tokio::test]
async fn toggle_starts_and_stops() {
    let harness = Harness::new();
    let remote = harness.connector.enqueue_session();

    harness.handle.toggle().unwrap();
    harness.wait_for_state(LiveState::Connecting).await;
    assert_eq!(harness.handle.current().state.action_label(), "Connecting...");

    harness.handle.toggle().unwrap();
    let snapshot = harness.handle.snapshot().await.unwrap();
    assert_eq!(snapshot.state, LiveState::Disconnected);
    assert_eq!(snapshot.state.action_label(), "Start Conversation");
    eventually(|| remote.is_closed()).await;
}

#[tokio::test]
async fn shutdown_releases_devices_and_session() {
    let harness = Harness::new();
    let remote = harness.connect().await;
    remote.emit(audio_chunk(1.0));
    eventually(|| harness.device.played().len() == 1).await;

    let Harness { handle, device, .. } = harness;
    handle.shutdown().await;

    assert!(device.microphone_released());
    assert!(device.output_closed());
    assert!(remote.is_closed());
    assert_eq!(remote.close_calls(), 1);
}

#[tokio::test]
async fn start_is_ignored_while_connected() {
    let harness = Harness::new();
    let _remote = harness.connect().await;

    harness.handle.start().unwrap();
    let snapshot = harness.handle.snapshot().await.unwrap();

    assert_eq!(snapshot.state, LiveState::Connected);
    assert_eq!(harness.device.inputs_opened(), 1);
    assert_eq!(harness.connector.tracked_configs().len(), 1);
}
