use super::api::{
    Blob, GenerateContentConfig, LiveClientMessage, LiveRealtimeInput, LiveServerMessage,
    LiveSetup,
};
use super::model::{convert_to_google_modalities, map_google_content, speech_config, system_instruction};
use super::{GoogleModelOptions, DEFAULT_LIVE_URL, PROVIDER};
use crate::{
    client_utils, GenerationError, GenerationResult, LiveConnector, LiveEvent, LiveEventStream,
    LiveSender, LiveSession, LiveSessionConfig, Modality, Part, RealtimeChunk,
};
use futures::{SinkExt, StreamExt};
use std::collections::HashMap;
use tokio::sync::mpsc;
use tokio_tungstenite::{
    connect_async,
    tungstenite::{client::IntoClientRequest, Message as WsMessage},
};

/// Opens `BidiGenerateContent` sessions over WebSocket.
pub struct GoogleLiveConnector {
    model_id: String,
    api_key: String,
    url: String,
    headers: HashMap<String, String>,
}

impl GoogleLiveConnector {
    #[must_use]
    pub fn new(model_id: impl Into<String>, options: GoogleModelOptions) -> Self {
        let GoogleModelOptions {
            api_key,
            base_url,
            headers,
            ..
        } = options;

        Self {
            model_id: model_id.into(),
            api_key,
            url: base_url.unwrap_or_else(|| DEFAULT_LIVE_URL.to_string()),
            headers: headers.unwrap_or_default(),
        }
    }

    fn setup_message(&self, config: LiveSessionConfig) -> LiveClientMessage {
        let modalities = config
            .response_modalities
            .unwrap_or_else(|| vec![Modality::Audio]);

        LiveClientMessage::Setup(LiveSetup {
            model: format!("models/{}", self.model_id),
            generation_config: Some(GenerateContentConfig {
                response_modalities: Some(convert_to_google_modalities(&modalities)),
                speech_config: config.voice.map(|voice| speech_config(Some(voice), None)),
                ..Default::default()
            }),
            system_instruction: config.system_prompt.map(system_instruction),
        })
    }
}

/// Appends the encoded API key to `base`, which may already carry a query.
fn live_url(base: &str, api_key: &str) -> String {
    let separator = if base.contains('?') { '&' } else { '?' };
    format!("{base}{separator}key={}", urlencoding::encode(api_key))
}

#[async_trait::async_trait]
impl LiveConnector for GoogleLiveConnector {
    fn provider(&self) -> &'static str {
        PROVIDER
    }

    fn model_id(&self) -> String {
        self.model_id.clone()
    }

    async fn connect(&self, config: LiveSessionConfig) -> GenerationResult<LiveSession> {
        crate::opentelemetry::trace_call(PROVIDER, &self.model_id, "connect", "live", async move {
            let url = live_url(&self.url, &self.api_key);
            let mut request = url
                .as_str()
                .into_client_request()
                .map_err(|e| GenerationError::Live(format!("Invalid live URL: {e}")))?;
            request
                .headers_mut()
                .extend(client_utils::build_headers(PROVIDER, &self.headers)?);

            tracing::debug!(url = %client_utils::redact_key(&url), "opening live session");
            let (ws_stream, _) = connect_async(request)
                .await
                .map_err(|e| GenerationError::Live(format!("connect: {e}")))?;
            let (mut write, mut read) = ws_stream.split();

            let setup = serde_json::to_string(&self.setup_message(config))
                .map_err(|e| GenerationError::InvalidInput(e.to_string()))?;
            write
                .send(WsMessage::Text(setup))
                .await
                .map_err(|e| GenerationError::Live(format!("send setup: {e}")))?;

            let (tx, mut rx) = mpsc::unbounded_channel::<Outbound>();

            tokio::spawn(async move {
                while let Some(outbound) = rx.recv().await {
                    match outbound {
                        Outbound::Frame(json) => {
                            if let Err(e) = write.send(WsMessage::Text(json)).await {
                                tracing::debug!(error = %e, "live send failed");
                                break;
                            }
                        }
                        Outbound::Close => {
                            if let Err(e) = write.close().await {
                                tracing::debug!(error = %e, "live close failed");
                            }
                            break;
                        }
                    }
                }
            });

            let events = async_stream::stream! {
                loop {
                    match read.next().await {
                        Some(Ok(WsMessage::Text(text))) => {
                            for event in map_server_message(&text) {
                                yield event;
                            }
                        }
                        Some(Ok(WsMessage::Binary(bytes))) => {
                            match String::from_utf8(bytes) {
                                Ok(text) => {
                                    for event in map_server_message(&text) {
                                        yield event;
                                    }
                                }
                                Err(e) => tracing::debug!(error = %e, "ignoring non-utf8 live frame"),
                            }
                        }
                        Some(Ok(WsMessage::Close(frame))) => {
                            yield LiveEvent::Closed(frame.map(|f| f.reason.to_string()));
                            break;
                        }
                        Some(Ok(_)) => {}
                        Some(Err(e)) => {
                            yield LiveEvent::Error(e.to_string());
                            break;
                        }
                        None => {
                            yield LiveEvent::Closed(None);
                            break;
                        }
                    }
                }
            };

            Ok(LiveSession {
                sender: Box::new(GoogleLiveSender { tx }),
                events: LiveEventStream::from_stream(events),
            })
        })
        .await
    }
}

enum Outbound {
    Frame(String),
    Close,
}

struct GoogleLiveSender {
    tx: mpsc::UnboundedSender<Outbound>,
}

impl LiveSender for GoogleLiveSender {
    fn send_realtime(&self, chunk: RealtimeChunk) -> GenerationResult<()> {
        let message = LiveClientMessage::RealtimeInput(LiveRealtimeInput {
            media_chunks: vec![Blob {
                data: Some(chunk.data),
                mime_type: Some(chunk.mime_type),
            }],
        });
        let json = serde_json::to_string(&message)
            .map_err(|e| GenerationError::InvalidInput(e.to_string()))?;
        self.tx
            .send(Outbound::Frame(json))
            .map_err(|_| GenerationError::Live("session is closed".to_string()))
    }

    fn close(&self) -> GenerationResult<()> {
        self.tx
            .send(Outbound::Close)
            .map_err(|_| GenerationError::Live("session is already closed".to_string()))
    }
}

/// Maps one server message to the events it carries, in wire order.
pub(crate) fn map_server_message(text: &str) -> Vec<LiveEvent> {
    let message: LiveServerMessage = match serde_json::from_str(text) {
        Ok(message) => message,
        Err(e) => {
            tracing::debug!(error = %e, "ignoring unparseable live message");
            return Vec::new();
        }
    };

    let mut events = Vec::new();

    if message.setup_complete.is_some() {
        events.push(LiveEvent::Open);
    }

    if let Some(content) = message.server_content {
        let parts = content
            .model_turn
            .and_then(|turn| turn.parts)
            .unwrap_or_default();
        match map_google_content(parts) {
            Ok(parts) => {
                for part in parts {
                    match part {
                        Part::Audio(audio) => events.push(LiveEvent::Audio(audio)),
                        Part::Text(text) => events.push(LiveEvent::Text(text.text)),
                        Part::Image(_) => {}
                    }
                }
            }
            Err(e) => tracing::debug!(error = %e, "ignoring malformed live parts"),
        }

        if content.interrupted.unwrap_or(false) {
            events.push(LiveEvent::Interrupted);
        }
        if content.turn_complete.unwrap_or(false) {
            events.push(LiveEvent::TurnComplete);
        }
    }

    if message.go_away.is_some() {
        events.push(LiveEvent::Closed(Some("server requested disconnect".to_string())));
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn live_url_encodes_the_key_and_respects_existing_query() {
        assert_eq!(
            live_url("wss://host/ws/Service.Bidi", "a+b/c"),
            "wss://host/ws/Service.Bidi?key=a%2Bb%2Fc"
        );
        assert_eq!(
            live_url("wss://host/ws?alt=json", "k"),
            "wss://host/ws?alt=json&key=k"
        );
    }
    use serde_json::json;

    #[test]
    fn setup_message_requests_audio_with_voice() {
        let connector = GoogleLiveConnector::new(
            "gemini-live",
            GoogleModelOptions {
                api_key: "k".to_string(),
                ..Default::default()
            },
        );
        let message = connector.setup_message(LiveSessionConfig {
            voice: Some("Zephyr".to_string()),
            ..Default::default()
        });
        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(value["setup"]["model"], "models/gemini-live");
        assert_eq!(
            value["setup"]["generationConfig"]["responseModalities"],
            json!(["AUDIO"])
        );
        assert_eq!(
            value["setup"]["generationConfig"]["speechConfig"]["voiceConfig"]
                ["prebuiltVoiceConfig"]["voiceName"],
            "Zephyr"
        );
    }

    #[test]
    fn maps_audio_then_interruption() {
        let events = map_server_message(
            &json!({
                "serverContent": {
                    "modelTurn": {
                        "parts": [{ "inlineData": { "data": "AAAA", "mimeType": "audio/pcm;rate=24000" } }]
                    },
                    "interrupted": true
                }
            })
            .to_string(),
        );
        assert_eq!(events.len(), 2);
        assert!(matches!(&events[0], LiveEvent::Audio(audio) if audio.sample_rate == Some(24_000)));
        assert_eq!(events[1], LiveEvent::Interrupted);
    }

    #[test]
    fn setup_complete_is_open() {
        assert_eq!(
            map_server_message(r#"{"setupComplete":{}}"#),
            vec![LiveEvent::Open]
        );
        assert!(map_server_message("not json").is_empty());
    }
}
