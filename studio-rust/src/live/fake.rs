//! In-memory audio device for driving live sessions without hardware.

use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::mpsc;

use super::device::{AudioDevice, AudioInput, AudioOutput, BufferId, InputConfig};
use crate::{StudioError, StudioResult};

/// A buffer the fake output was asked to play.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayedBuffer {
    pub id: BufferId,
    pub start_at: f64,
    pub samples: usize,
    pub sample_rate: u32,
}

#[derive(Default)]
struct FakeState {
    deny_microphone: bool,
    input_config: Option<InputConfig>,
    inputs_opened: usize,
    inputs_released: usize,
    frames: Option<mpsc::UnboundedSender<Vec<f32>>>,
    outputs_opened: usize,
    outputs_closed: usize,
    clock: f64,
    next_buffer: u64,
    played: Vec<PlayedBuffer>,
    stopped: Vec<BufferId>,
}

/// Records everything a session does with its audio and lets a test push
/// microphone frames and move the output clock.
#[derive(Clone, Default)]
pub struct FakeAudioDevice {
    state: Arc<Mutex<FakeState>>,
}

impl FakeAudioDevice {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().expect("fake audio state poisoned")
    }

    /// Makes every later microphone request fail, as if permission was
    /// denied.
    pub fn deny_microphone(&self, deny: bool) {
        self.state().deny_microphone = deny;
    }

    /// Delivers one captured frame. Returns false while capture is not
    /// attached.
    pub fn push_frame(&self, frame: Vec<f32>) -> bool {
        self.state()
            .frames
            .as_ref()
            .is_some_and(|frames| frames.send(frame).is_ok())
    }

    pub fn set_time(&self, seconds: f64) {
        self.state().clock = seconds;
    }

    #[must_use]
    pub fn input_config(&self) -> Option<InputConfig> {
        self.state().input_config
    }

    #[must_use]
    pub fn is_capturing(&self) -> bool {
        self.state().frames.is_some()
    }

    /// True when every microphone that was opened has been released.
    #[must_use]
    pub fn microphone_released(&self) -> bool {
        let state = self.state();
        state.inputs_opened == state.inputs_released
    }

    #[must_use]
    pub fn inputs_opened(&self) -> usize {
        self.state().inputs_opened
    }

    /// True when every output that was opened has been closed.
    #[must_use]
    pub fn output_closed(&self) -> bool {
        let state = self.state();
        state.outputs_opened == state.outputs_closed
    }

    #[must_use]
    pub fn played(&self) -> Vec<PlayedBuffer> {
        self.state().played.clone()
    }

    #[must_use]
    pub fn stopped(&self) -> Vec<BufferId> {
        self.state().stopped.clone()
    }
}

impl AudioDevice for FakeAudioDevice {
    fn open_input(&self, config: InputConfig) -> StudioResult<Box<dyn AudioInput>> {
        let mut state = self.state();
        if state.deny_microphone {
            return Err(StudioError::AudioDevice("permission denied".to_string()));
        }
        state.inputs_opened += 1;
        state.input_config = Some(config);
        Ok(Box::new(FakeInput {
            state: self.state.clone(),
            released: false,
        }))
    }

    fn open_output(&self, _sample_rate: u32) -> StudioResult<Box<dyn AudioOutput>> {
        let mut state = self.state();
        state.outputs_opened += 1;
        state.clock = 0.0;
        Ok(Box::new(FakeOutput {
            state: self.state.clone(),
            closed: false,
        }))
    }
}

struct FakeInput {
    state: Arc<Mutex<FakeState>>,
    released: bool,
}

impl AudioInput for FakeInput {
    fn attach(&mut self, frames: mpsc::UnboundedSender<Vec<f32>>) -> StudioResult<()> {
        self.state.lock().expect("fake audio state poisoned").frames = Some(frames);
        Ok(())
    }

    fn detach(&mut self) {
        self.state.lock().expect("fake audio state poisoned").frames = None;
    }

    fn release(&mut self) -> StudioResult<()> {
        if self.released {
            return Err(StudioError::AudioDevice("microphone already released".to_string()));
        }
        self.released = true;
        self.state.lock().expect("fake audio state poisoned").inputs_released += 1;
        Ok(())
    }
}

struct FakeOutput {
    state: Arc<Mutex<FakeState>>,
    closed: bool,
}

impl AudioOutput for FakeOutput {
    fn current_time(&self) -> f64 {
        self.state.lock().expect("fake audio state poisoned").clock
    }

    fn play(
        &mut self,
        samples: Vec<f32>,
        sample_rate: u32,
        start_at: f64,
    ) -> StudioResult<BufferId> {
        let mut state = self.state.lock().expect("fake audio state poisoned");
        state.next_buffer += 1;
        let id = BufferId(state.next_buffer);
        state.played.push(PlayedBuffer {
            id,
            start_at,
            samples: samples.len(),
            sample_rate,
        });
        Ok(id)
    }

    fn stop(&mut self, id: BufferId) -> StudioResult<()> {
        self.state
            .lock()
            .expect("fake audio state poisoned")
            .stopped
            .push(id);
        Ok(())
    }

    fn close(&mut self) -> StudioResult<()> {
        if self.closed {
            return Err(StudioError::AudioDevice("output already closed".to_string()));
        }
        self.closed = true;
        self.state.lock().expect("fake audio state poisoned").outputs_closed += 1;
        Ok(())
    }
}
