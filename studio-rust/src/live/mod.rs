//! Real-time voice conversation with the live model.
//!
//! A [`LiveSessionHandle`] drives an actor task that exclusively owns the
//! microphone, the output context and the remote session. Commands go in
//! over a channel; state comes out as [`LiveSnapshot`]s on a watch channel.

#[cfg(feature = "cpal")]
pub mod cpal;
mod device;
pub mod fake;
mod scheduler;

use std::{fmt, sync::Arc};

use futures::StreamExt;
use marketgenius_sdk::{
    audio_utils::{self, INPUT_SAMPLE_RATE, OUTPUT_SAMPLE_RATE},
    google::{GoogleLiveConnector, GoogleModelOptions},
    AudioPart, GenerationResult, LiveConnector, LiveEvent, LiveEventStream, LiveSender,
    LiveSession, LiveSessionConfig, Modality, RealtimeChunk,
};
use tokio::{
    sync::{mpsc, oneshot, watch},
    task::JoinHandle,
};
use tracing::{debug, error, info, warn};

pub use device::{AudioDevice, AudioInput, AudioOutput, BufferId, InputConfig};
pub use scheduler::{PlaybackScheduler, ScheduledBuffer};

use crate::{
    errors::{CONNECTION_ERROR, MICROPHONE_ERROR},
    generation::Voice,
    StudioConfig, StudioError, StudioResult,
};

/// Mono samples per captured frame sent to the session.
pub const FRAME_SIZE: usize = 4096;
pub const INPUT_MIME_TYPE: &str = "audio/pcm;rate=16000";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LiveState {
    #[default]
    Disconnected,
    Connecting,
    Connected,
    Error,
}

impl LiveState {
    /// Label for the front end's single start/stop button.
    #[must_use]
    pub fn action_label(self) -> &'static str {
        match self {
            Self::Disconnected => "Start Conversation",
            Self::Connecting => "Connecting...",
            Self::Connected => "Stop Conversation",
            Self::Error => "Retry",
        }
    }
}

/// What a front end renders for the live session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LiveSnapshot {
    pub state: LiveState,
    pub error: Option<String>,
    pub next_start_time: f64,
    pub active_buffers: usize,
    pub frames_sent: u64,
    pub chunks_received: u64,
    /// Text the model sent alongside its audio during this session.
    pub transcript: String,
}

#[derive(Debug, Clone)]
pub struct LiveSessionOptions {
    pub voice: Voice,
    pub system_prompt: Option<String>,
    pub frame_size: usize,
}

impl Default for LiveSessionOptions {
    fn default() -> Self {
        Self {
            voice: Voice::Zephyr,
            system_prompt: None,
            frame_size: FRAME_SIZE,
        }
    }
}

impl LiveSessionOptions {
    #[must_use]
    pub fn from_config(config: &StudioConfig) -> Self {
        Self {
            voice: config.live_voice,
            ..Self::default()
        }
    }
}

/// Connector for the hosted live model named in `config`.
#[must_use]
pub fn gemini_connector(config: &StudioConfig) -> Arc<dyn LiveConnector> {
    Arc::new(GoogleLiveConnector::new(
        &config.live_model,
        GoogleModelOptions {
            api_key: config.api_key.clone(),
            base_url: config.live_url.clone(),
            ..Default::default()
        },
    ))
}

enum Command {
    Start,
    Stop,
    Toggle,
    Snapshot(oneshot::Sender<LiveSnapshot>),
}

/// Front-end handle to a live session actor. Dropping every handle stops
/// the session and releases its devices.
pub struct LiveSessionHandle {
    commands: mpsc::UnboundedSender<Command>,
    snapshots: watch::Receiver<LiveSnapshot>,
    task: JoinHandle<()>,
}

impl LiveSessionHandle {
    /// Spawns the actor on the current Tokio runtime.
    #[must_use]
    pub fn spawn(
        connector: Arc<dyn LiveConnector>,
        device: Arc<dyn AudioDevice>,
        options: LiveSessionOptions,
    ) -> Self {
        let (commands, commands_rx) = mpsc::unbounded_channel();
        let (snapshots_tx, snapshots) = watch::channel(LiveSnapshot::default());
        let (connects_tx, connects_rx) = mpsc::unbounded_channel();

        let actor = LiveActor {
            connector,
            device,
            options,
            state: LiveState::Disconnected,
            error: None,
            generation: 0,
            input: None,
            output: None,
            sender: None,
            events: None,
            frames: None,
            scheduler: PlaybackScheduler::new(),
            frames_sent: 0,
            chunks_received: 0,
            transcript: String::new(),
            snapshots: snapshots_tx,
            connects_tx,
        };
        let task = tokio::spawn(actor.run(commands_rx, connects_rx));

        Self {
            commands,
            snapshots,
            task,
        }
    }

    /// Starts a conversation from `Disconnected` or `Error`. Ignored in
    /// other states.
    pub fn start(&self) -> StudioResult<()> {
        self.send(Command::Start)
    }

    /// Ends the conversation, including one that is still connecting.
    pub fn stop(&self) -> StudioResult<()> {
        self.send(Command::Stop)
    }

    /// Starts when idle or failed, stops otherwise.
    pub fn toggle(&self) -> StudioResult<()> {
        self.send(Command::Toggle)
    }

    /// The snapshot after every command sent so far has been handled.
    pub async fn snapshot(&self) -> StudioResult<LiveSnapshot> {
        let (reply, response) = oneshot::channel();
        self.send(Command::Snapshot(reply))?;
        response.await.map_err(|_| closed())
    }

    /// The most recently published snapshot, without waiting.
    #[must_use]
    pub fn current(&self) -> LiveSnapshot {
        self.snapshots.borrow().clone()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<LiveSnapshot> {
        self.snapshots.clone()
    }

    /// Waits until a published snapshot satisfies `predicate`.
    pub async fn wait_for<F>(&self, mut predicate: F) -> StudioResult<LiveSnapshot>
    where
        F: FnMut(&LiveSnapshot) -> bool,
    {
        let mut snapshots = self.snapshots.clone();
        let snapshot = snapshots
            .wait_for(|snapshot| predicate(snapshot))
            .await
            .map_err(|_| closed())?;
        Ok(snapshot.clone())
    }

    /// Stops the session and waits for its devices to be released.
    pub async fn shutdown(self) {
        let Self { commands, task, .. } = self;
        drop(commands);
        if let Err(error) = task.await {
            warn!(%error, "live session task ended abnormally");
        }
    }

    fn send(&self, command: Command) -> StudioResult<()> {
        self.commands.send(command).map_err(|_| closed())
    }
}

fn closed() -> StudioError {
    StudioError::Live("the live session has shut down".to_string())
}

type ConnectResult = (u64, GenerationResult<LiveSession>);

enum Input {
    Command(Option<Command>),
    Connected(ConnectResult),
    Event(Option<LiveEvent>),
    Frame(Option<Vec<f32>>),
}

struct LiveActor {
    connector: Arc<dyn LiveConnector>,
    device: Arc<dyn AudioDevice>,
    options: LiveSessionOptions,
    state: LiveState,
    error: Option<String>,
    /// Bumped on every start and teardown; a connect result tagged with an
    /// older value belongs to a session that no longer exists.
    generation: u64,
    input: Option<Box<dyn AudioInput>>,
    output: Option<Box<dyn AudioOutput>>,
    sender: Option<Box<dyn LiveSender>>,
    events: Option<LiveEventStream>,
    frames: Option<mpsc::UnboundedReceiver<Vec<f32>>>,
    scheduler: PlaybackScheduler,
    frames_sent: u64,
    chunks_received: u64,
    transcript: String,
    snapshots: watch::Sender<LiveSnapshot>,
    connects_tx: mpsc::UnboundedSender<ConnectResult>,
}

async fn next_event(events: &mut Option<LiveEventStream>) -> Option<LiveEvent> {
    match events {
        Some(events) => events.next().await,
        None => std::future::pending().await,
    }
}

async fn next_frame(frames: &mut Option<mpsc::UnboundedReceiver<Vec<f32>>>) -> Option<Vec<f32>> {
    match frames {
        Some(frames) => frames.recv().await,
        None => std::future::pending().await,
    }
}

impl LiveActor {
    async fn run(
        mut self,
        mut commands: mpsc::UnboundedReceiver<Command>,
        mut connects: mpsc::UnboundedReceiver<ConnectResult>,
    ) {
        loop {
            let input = tokio::select! {
                command = commands.recv() => Input::Command(command),
                Some(connected) = connects.recv() => Input::Connected(connected),
                event = next_event(&mut self.events) => Input::Event(event),
                frame = next_frame(&mut self.frames) => Input::Frame(frame),
            };

            match input {
                Input::Command(Some(command)) => self.on_command(command),
                Input::Command(None) => {
                    debug!("live session handle dropped");
                    self.teardown();
                    break;
                }
                Input::Connected((generation, result)) => self.on_connected(generation, result),
                Input::Event(Some(event)) => self.on_event(event),
                Input::Event(None) => self.on_event(LiveEvent::Closed(None)),
                Input::Frame(Some(frame)) => self.on_frame(frame),
                Input::Frame(None) => self.frames = None,
            }
            self.publish();
        }
    }

    fn on_command(&mut self, command: Command) {
        match command {
            Command::Start => self.start(),
            Command::Stop => self.stop(),
            Command::Toggle => match self.state {
                LiveState::Disconnected | LiveState::Error => self.start(),
                LiveState::Connecting | LiveState::Connected => self.stop(),
            },
            Command::Snapshot(reply) => {
                let _ = reply.send(self.snapshot());
            }
        }
    }

    fn start(&mut self) {
        if !matches!(self.state, LiveState::Disconnected | LiveState::Error) {
            debug!(state = ?self.state, "ignoring start");
            return;
        }

        info!(voice = %self.options.voice, "live session connecting");
        self.state = LiveState::Connecting;
        self.error = None;
        self.scheduler.reset();
        self.frames_sent = 0;
        self.chunks_received = 0;
        self.transcript.clear();

        let input = self.device.open_input(InputConfig {
            sample_rate: INPUT_SAMPLE_RATE,
            frame_size: self.options.frame_size,
        });
        match input {
            Ok(input) => self.input = Some(input),
            Err(error) => return self.fail(MICROPHONE_ERROR, &error),
        }
        match self.device.open_output(OUTPUT_SAMPLE_RATE) {
            Ok(output) => self.output = Some(output),
            Err(error) => return self.fail(MICROPHONE_ERROR, &error),
        }

        self.generation += 1;
        let generation = self.generation;
        let connector = self.connector.clone();
        let connects = self.connects_tx.clone();
        let config = LiveSessionConfig {
            voice: Some(self.options.voice.to_string()),
            system_prompt: self.options.system_prompt.clone(),
            response_modalities: Some(vec![Modality::Audio]),
        };

        tokio::spawn(async move {
            let result = connector.connect(config).await;
            if let Err(mpsc::error::SendError((_, Ok(session)))) =
                connects.send((generation, result))
            {
                close_sender(session.sender.as_ref());
            }
        });
    }

    fn stop(&mut self) {
        if self.state == LiveState::Disconnected && self.input.is_none() {
            return;
        }
        info!(state = ?self.state, "stopping live session");
        self.teardown();
        self.state = LiveState::Disconnected;
    }

    fn on_connected(&mut self, generation: u64, result: GenerationResult<LiveSession>) {
        let current = generation == self.generation && self.state == LiveState::Connecting;
        match result {
            Ok(session) if current => {
                debug!("live transport established");
                self.sender = Some(session.sender);
                self.events = Some(session.events);
            }
            Ok(session) => {
                debug!(generation, "closing live session that connected after stop");
                close_sender(session.sender.as_ref());
            }
            Err(error) if current => self.fail(CONNECTION_ERROR, &error),
            Err(error) => debug!(%error, "stale live connect failed"),
        }
    }

    fn on_event(&mut self, event: LiveEvent) {
        match event {
            LiveEvent::Open => self.on_open(),
            LiveEvent::Audio(part) => self.on_audio(&part),
            LiveEvent::Text(text) => self.transcript.push_str(&text),
            LiveEvent::Interrupted => {
                debug!(buffers = self.scheduler.active_buffers().len(), "playback interrupted");
                match self.output.as_mut() {
                    Some(output) => self.scheduler.interrupt(output.as_mut()),
                    None => self.scheduler.reset(),
                }
            }
            LiveEvent::TurnComplete => debug!("model turn complete"),
            LiveEvent::Closed(reason) => {
                info!(reason = reason.as_deref().unwrap_or_default(), "live session closed by remote");
                self.teardown();
                self.state = LiveState::Disconnected;
            }
            LiveEvent::Error(message) => self.fail(CONNECTION_ERROR, &message),
        }
    }

    fn on_open(&mut self) {
        if self.state != LiveState::Connecting {
            return;
        }
        let (frames_tx, frames_rx) = mpsc::unbounded_channel();
        let attached = match self.input.as_mut() {
            Some(input) => input.attach(frames_tx),
            None => Err(StudioError::AudioDevice("microphone is not open".to_string())),
        };
        if let Err(error) = attached {
            return self.fail(MICROPHONE_ERROR, &error);
        }

        info!("live session connected");
        self.frames = Some(frames_rx);
        self.state = LiveState::Connected;
    }

    fn on_frame(&mut self, frame: Vec<f32>) {
        let Some(sender) = self.sender.as_ref() else {
            return;
        };
        if self.state != LiveState::Connected {
            return;
        }
        let chunk = RealtimeChunk {
            data: audio_utils::encode_pcm16(&frame),
            mime_type: INPUT_MIME_TYPE.to_string(),
        };
        match sender.send_realtime(chunk) {
            Ok(()) => self.frames_sent += 1,
            Err(error) => debug!(%error, "dropping captured frame"),
        }
    }

    fn on_audio(&mut self, part: &AudioPart) {
        let Some(output) = self.output.as_mut() else {
            return;
        };
        let samples = match audio_utils::decode_pcm16(&part.audio_data) {
            Ok(samples) => samples,
            Err(error) => {
                warn!(%error, "dropping undecodable audio chunk");
                return;
            }
        };
        let sample_rate = part.sample_rate.unwrap_or(OUTPUT_SAMPLE_RATE);
        match self.scheduler.schedule(output.as_mut(), samples, sample_rate) {
            Ok(start) => {
                self.chunks_received += 1;
                debug!(start, "scheduled audio chunk");
            }
            Err(error) => warn!(%error, "could not schedule audio chunk"),
        }
    }

    /// Full teardown, then the error state with a user-facing message.
    fn fail(&mut self, message: &'static str, cause: &dyn fmt::Display) {
        error!(cause = %cause, "live session failed");
        self.teardown();
        self.state = LiveState::Error;
        self.error = Some(message.to_string());
    }

    /// Releases everything the session holds. Runs on every exit path, so
    /// each step tolerates resources that are already gone.
    fn teardown(&mut self) {
        self.generation += 1;

        if let Some(mut input) = self.input.take() {
            input.detach();
            if let Err(error) = input.release() {
                warn!(%error, "could not release microphone");
            }
        }
        self.frames = None;

        if let Some(mut output) = self.output.take() {
            self.scheduler.stop_all(output.as_mut());
            if let Err(error) = output.close() {
                warn!(%error, "could not close audio output");
            }
        }
        self.scheduler.reset();

        if let Some(sender) = self.sender.take() {
            close_sender(sender.as_ref());
        }
        self.events = None;
    }

    fn snapshot(&mut self) -> LiveSnapshot {
        if let Some(output) = self.output.as_ref() {
            self.scheduler.prune(output.current_time());
        }
        LiveSnapshot {
            state: self.state,
            error: self.error.clone(),
            next_start_time: self.scheduler.next_start_time(),
            active_buffers: self.scheduler.active_buffers().len(),
            frames_sent: self.frames_sent,
            chunks_received: self.chunks_received,
            transcript: self.transcript.clone(),
        }
    }

    fn publish(&mut self) {
        let snapshot = self.snapshot();
        self.snapshots.send_if_modified(|current| {
            if *current == snapshot {
                false
            } else {
                *current = snapshot;
                true
            }
        });
    }
}

fn close_sender(sender: &dyn LiveSender) {
    if let Err(error) = sender.close() {
        warn!(%error, "could not close live session");
    }
}
