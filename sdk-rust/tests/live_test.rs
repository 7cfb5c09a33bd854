use futures::{SinkExt, StreamExt};
use marketgenius_sdk::{
    audio_utils,
    google::{GoogleLiveConnector, GoogleModelOptions},
    LiveConnector, LiveEvent, LiveSessionConfig, RealtimeChunk,
};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::oneshot};
use tokio_tungstenite::{
    accept_hdr_async,
    tungstenite::{
        handshake::server::{ErrorResponse, Request, Response},
        Message,
    },
};

struct LiveReport {
    uri: String,
    setup: Value,
    realtime: Value,
}

/// Accepts one connection, answers the setup, forwards one audio chunk,
/// then reports the request URI and the messages it received.
async fn spawn_live_server() -> (String, oneshot::Receiver<LiveReport>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (report_tx, report_rx) = oneshot::channel();

    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let mut uri = String::new();
        let mut ws = accept_hdr_async(stream, |request: &Request, response: Response| {
            uri = request.uri().to_string();
            Ok::<_, ErrorResponse>(response)
        })
        .await
        .unwrap();

        let setup = match ws.next().await.unwrap().unwrap() {
            Message::Text(text) => serde_json::from_str::<Value>(&text).unwrap(),
            other => panic!("unexpected frame: {other:?}"),
        };
        ws.send(Message::Text(json!({ "setupComplete": {} }).to_string()))
            .await
            .unwrap();

        let realtime = match ws.next().await.unwrap().unwrap() {
            Message::Text(text) => serde_json::from_str::<Value>(&text).unwrap(),
            other => panic!("unexpected frame: {other:?}"),
        };

        ws.send(Message::Text(
            json!({
                "serverContent": {
                    "modelTurn": { "parts": [{ "inlineData": {
                        "mimeType": "audio/pcm;rate=24000",
                        "data": audio_utils::i16sample_to_base64(&[100, -100])
                    } }] }
                }
            })
            .to_string(),
        ))
        .await
        .unwrap();
        ws.send(Message::Text(
            json!({ "serverContent": { "interrupted": true } }).to_string(),
        ))
        .await
        .unwrap();

        let _ = report_tx.send(LiveReport {
            uri,
            setup,
            realtime,
        });
        ws.close(None).await.ok();
    });

    (format!("ws://{addr}/ws/live"), report_rx)
}

#[tokio::test]
async fn live_session_round_trip() {
    let (url, report) = spawn_live_server().await;
    let connector = GoogleLiveConnector::new(
        "gemini-2.5-flash-native-audio-preview-09-2025",
        GoogleModelOptions {
            api_key: "test+key".to_string(),
            base_url: Some(url),
            ..Default::default()
        },
    );

    let mut session = connector
        .connect(LiveSessionConfig {
            voice: Some("Zephyr".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(session.events.next().await, Some(LiveEvent::Open));

    session
        .sender
        .send_realtime(RealtimeChunk {
            data: audio_utils::encode_pcm16(&[0.0, 0.5]),
            mime_type: "audio/pcm;rate=16000".to_string(),
        })
        .unwrap();

    match session.events.next().await {
        Some(LiveEvent::Audio(audio)) => {
            assert_eq!(audio.sample_rate, Some(24_000));
            assert_eq!(
                audio_utils::base64_to_i16sample(&audio.audio_data).unwrap(),
                vec![100, -100]
            );
        }
        other => panic!("expected audio, got {other:?}"),
    }
    assert_eq!(session.events.next().await, Some(LiveEvent::Interrupted));

    let LiveReport {
        uri,
        setup,
        realtime,
    } = report.await.unwrap();
    assert_eq!(uri, "/ws/live?key=test%2Bkey");
    assert_eq!(
        setup["setup"]["model"],
        "models/gemini-2.5-flash-native-audio-preview-09-2025"
    );
    assert_eq!(
        realtime["realtimeInput"]["mediaChunks"][0]["mimeType"],
        "audio/pcm;rate=16000"
    );

    assert!(matches!(
        session.events.next().await,
        Some(LiveEvent::Closed(_))
    ));
    // The writer task may already be gone; a failed close is acceptable.
    let _ = session.sender.close();
}

#[tokio::test]
async fn connect_to_missing_server_is_live_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let connector = GoogleLiveConnector::new(
        "gemini-live",
        GoogleModelOptions {
            api_key: "k".to_string(),
            base_url: Some(format!("ws://{addr}/ws/live")),
            ..Default::default()
        },
    );

    let result = connector.connect(LiveSessionConfig::default()).await;
    assert!(matches!(result, Err(marketgenius_sdk::GenerationError::Live(_))));
}
