use tokio::sync::mpsc;

use crate::StudioResult;

/// Identifies one scheduled output buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BufferId(pub u64);

/// Microphone capture settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputConfig {
    /// Rate of the frames delivered to the session, in Hz.
    pub sample_rate: u32,
    /// Mono samples per delivered frame.
    pub frame_size: usize,
}

/// Opens the microphone and the speaker for a live session.
pub trait AudioDevice: Send + Sync {
    /// Acquires the microphone. Fails when access is denied or no input
    /// device exists.
    fn open_input(&self, config: InputConfig) -> StudioResult<Box<dyn AudioInput>>;

    /// Opens an output context whose clock starts at zero.
    fn open_output(&self, sample_rate: u32) -> StudioResult<Box<dyn AudioOutput>>;
}

/// An acquired microphone.
pub trait AudioInput: Send {
    /// Starts delivering mono frames of the configured size to `frames`.
    fn attach(&mut self, frames: mpsc::UnboundedSender<Vec<f32>>) -> StudioResult<()>;

    /// Stops delivering frames. Captured audio after this point is dropped.
    fn detach(&mut self);

    /// Stops capture and gives the device back.
    fn release(&mut self) -> StudioResult<()>;
}

/// A playback context with its own clock.
pub trait AudioOutput: Send {
    /// Seconds elapsed on the output clock.
    fn current_time(&self) -> f64;

    /// Plays mono `samples` starting at `start_at` on the output clock.
    fn play(&mut self, samples: Vec<f32>, sample_rate: u32, start_at: f64)
        -> StudioResult<BufferId>;

    /// Stops a buffer that is scheduled or playing.
    fn stop(&mut self, id: BufferId) -> StudioResult<()>;

    fn close(&mut self) -> StudioResult<()>;
}
