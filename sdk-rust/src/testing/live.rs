use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use futures::stream;
use tokio::sync::{mpsc, oneshot};

use crate::{
    GenerationError, GenerationResult, LiveConnector, LiveEvent, LiveEventStream, LiveSender,
    LiveSession, LiveSessionConfig, RealtimeChunk,
};

#[derive(Default)]
struct RemoteLog {
    sent: Vec<RealtimeChunk>,
    close_calls: usize,
    closed: bool,
}

/// The remote side of a mocked live session: pushes events to the client
/// and inspects what the client sent.
#[derive(Clone)]
pub struct MockLiveRemote {
    events: mpsc::UnboundedSender<LiveEvent>,
    log: Arc<Mutex<RemoteLog>>,
    gate: Arc<Mutex<Option<oneshot::Sender<()>>>>,
}

impl MockLiveRemote {
    /// Pushes an event to the client. Returns false once the client has
    /// dropped the session.
    pub fn emit(&self, event: LiveEvent) -> bool {
        self.events.send(event).is_ok()
    }

    /// Lets a gated `connect` call return.
    pub fn complete_connect(&self) {
        if let Some(gate) = self.gate.lock().expect("mock state poisoned").take() {
            let _ = gate.send(());
        }
    }

    #[must_use]
    pub fn sent_chunks(&self) -> Vec<RealtimeChunk> {
        self.log.lock().expect("mock state poisoned").sent.clone()
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.log.lock().expect("mock state poisoned").closed
    }

    #[must_use]
    pub fn close_calls(&self) -> usize {
        self.log.lock().expect("mock state poisoned").close_calls
    }
}

struct PendingSession {
    events: mpsc::UnboundedReceiver<LiveEvent>,
    log: Arc<Mutex<RemoteLog>>,
    gate: Option<oneshot::Receiver<()>>,
}

#[derive(Default)]
struct MockLiveConnectorState {
    pending: VecDeque<GenerationResult<PendingSession>>,
    tracked_configs: Vec<LiveSessionConfig>,
}

/// A mock live connector. Each `connect` call takes the next queued session
/// or error.
#[derive(Default)]
pub struct MockLiveConnector {
    state: Mutex<MockLiveConnectorState>,
}

impl MockLiveConnector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a session that connects immediately.
    pub fn enqueue_session(&self) -> MockLiveRemote {
        self.enqueue(false)
    }

    /// Queues a session whose `connect` call only returns after
    /// [`MockLiveRemote::complete_connect`].
    pub fn enqueue_gated_session(&self) -> MockLiveRemote {
        self.enqueue(true)
    }

    pub fn enqueue_error(&self, error: GenerationError) {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.pending.push_back(Err(error));
    }

    #[must_use]
    pub fn tracked_configs(&self) -> Vec<LiveSessionConfig> {
        let state = self.state.lock().expect("mock state poisoned");
        state.tracked_configs.clone()
    }

    fn enqueue(&self, gated: bool) -> MockLiveRemote {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let log = Arc::new(Mutex::new(RemoteLog::default()));
        let (gate_tx, gate_rx) = if gated {
            let (tx, rx) = oneshot::channel();
            (Some(tx), Some(rx))
        } else {
            (None, None)
        };

        let mut state = self.state.lock().expect("mock state poisoned");
        state.pending.push_back(Ok(PendingSession {
            events: events_rx,
            log: log.clone(),
            gate: gate_rx,
        }));

        MockLiveRemote {
            events: events_tx,
            log,
            gate: Arc::new(Mutex::new(gate_tx)),
        }
    }
}

#[async_trait::async_trait]
impl LiveConnector for MockLiveConnector {
    fn provider(&self) -> &'static str {
        "mock"
    }

    fn model_id(&self) -> String {
        "mock-live-model".to_string()
    }

    async fn connect(&self, config: LiveSessionConfig) -> GenerationResult<LiveSession> {
        let pending = {
            let mut state = self.state.lock().expect("mock state poisoned");
            state.tracked_configs.push(config);
            state.pending.pop_front().ok_or_else(|| {
                GenerationError::Invariant("mock", "no mocked live sessions available".into())
            })?
        }?;

        if let Some(gate) = pending.gate {
            gate.await
                .map_err(|_| GenerationError::Live("connect abandoned".to_string()))?;
        }

        let events = stream::unfold(pending.events, |mut rx| async move {
            rx.recv().await.map(|event| (event, rx))
        });

        Ok(LiveSession {
            sender: Box::new(MockLiveSender { log: pending.log }),
            events: LiveEventStream::from_stream(events),
        })
    }
}

struct MockLiveSender {
    log: Arc<Mutex<RemoteLog>>,
}

impl LiveSender for MockLiveSender {
    fn send_realtime(&self, chunk: RealtimeChunk) -> GenerationResult<()> {
        let mut log = self.log.lock().expect("mock state poisoned");
        if log.closed {
            return Err(GenerationError::Live("session is closed".to_string()));
        }
        log.sent.push(chunk);
        Ok(())
    }

    fn close(&self) -> GenerationResult<()> {
        let mut log = self.log.lock().expect("mock state poisoned");
        log.close_calls += 1;
        if log.closed {
            return Err(GenerationError::Live("session is already closed".to_string()));
        }
        log.closed = true;
        Ok(())
    }
}
