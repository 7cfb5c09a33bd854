//! Default microphone and speaker through `cpal`.
//!
//! `cpal::Stream` is not `Send` on every platform, so each stream lives on
//! its own thread and the handles given to the session only hold shared
//! buffers and a stop signal.

use std::{
    sync::{mpsc as std_mpsc, Arc, Mutex, MutexGuard},
    thread::{self, JoinHandle},
};

use ::cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use marketgenius_sdk::audio_utils;
use tokio::sync::mpsc;
use tracing::{debug, error};

use super::device::{AudioDevice, AudioInput, AudioOutput, BufferId, InputConfig};
use crate::{StudioError, StudioResult};

fn device_error(error: impl std::fmt::Display) -> StudioError {
    StudioError::AudioDevice(error.to_string())
}

fn lock<T>(mutex: &Mutex<T>) -> StudioResult<MutexGuard<'_, T>> {
    mutex
        .lock()
        .map_err(|_| StudioError::AudioDevice("audio state lock poisoned".to_string()))
}

/// The host's default input and output devices.
#[derive(Debug, Default, Clone, Copy)]
pub struct CpalAudioDevice;

impl CpalAudioDevice {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl AudioDevice for CpalAudioDevice {
    fn open_input(&self, config: InputConfig) -> StudioResult<Box<dyn AudioInput>> {
        let sink = Arc::new(Mutex::new(None));
        let thread_sink = sink.clone();
        let stream = StreamThread::spawn("marketgenius-microphone", move || {
            build_input_stream(config, thread_sink)
        })?;
        Ok(Box::new(CpalInput {
            sink,
            stream: Some(stream),
        }))
    }

    fn open_output(&self, _sample_rate: u32) -> StudioResult<Box<dyn AudioOutput>> {
        let mixer = Arc::new(Mutex::new(Mixer::default()));
        let thread_mixer = mixer.clone();
        let stream = StreamThread::spawn("marketgenius-speaker", move || {
            build_output_stream(&thread_mixer)
        })?;
        Ok(Box::new(CpalOutput {
            mixer,
            next_id: 0,
            stream: Some(stream),
        }))
    }
}

/// A thread that owns one playing stream until told to stop.
struct StreamThread {
    stop: std_mpsc::Sender<()>,
    thread: JoinHandle<()>,
}

impl StreamThread {
    fn spawn<F>(name: &str, build: F) -> StudioResult<Self>
    where
        F: FnOnce() -> StudioResult<::cpal::Stream> + Send + 'static,
    {
        let (stop, stopped) = std_mpsc::channel::<()>();
        let (ready_tx, ready) = std_mpsc::channel::<StudioResult<()>>();

        let thread = thread::Builder::new()
            .name(name.to_string())
            .spawn(move || {
                let stream = match build() {
                    Ok(stream) => stream,
                    Err(error) => {
                        let _ = ready_tx.send(Err(error));
                        return;
                    }
                };
                let _ = ready_tx.send(Ok(()));
                // Blocks until stopped or the handle is dropped.
                let _ = stopped.recv();
                drop(stream);
            })?;

        ready
            .recv()
            .map_err(|_| StudioError::AudioDevice(format!("{name} thread exited")))??;
        debug!(name, "audio stream started");
        Ok(Self { stop, thread })
    }

    fn shutdown(self) -> StudioResult<()> {
        let _ = self.stop.send(());
        self.thread
            .join()
            .map_err(|_| StudioError::AudioDevice("audio thread panicked".to_string()))
    }
}

type FrameSink = Arc<Mutex<Option<mpsc::UnboundedSender<Vec<f32>>>>>;

fn build_input_stream(config: InputConfig, sink: FrameSink) -> StudioResult<::cpal::Stream> {
    let device = ::cpal::default_host()
        .default_input_device()
        .ok_or_else(|| StudioError::AudioDevice("no input device available".to_string()))?;
    let supported = device.default_input_config().map_err(device_error)?;
    let channels = supported.channels();
    let device_rate = supported.sample_rate().0;
    let stream_config: ::cpal::StreamConfig = supported.into();

    let mut framer = Framer::new(config.frame_size);
    let stream = device
        .build_input_stream(
            &stream_config,
            move |data: &[f32], _: &::cpal::InputCallbackInfo| {
                let Ok(sink) = sink.lock() else {
                    return;
                };
                let Some(frames) = sink.as_ref() else {
                    framer.clear();
                    return;
                };
                let mono = audio_utils::downmix_to_mono(data, channels);
                let resampled = audio_utils::resample_linear(&mono, device_rate, config.sample_rate);
                for frame in framer.push(&resampled) {
                    let _ = frames.send(frame);
                }
            },
            |err| error!(%err, "microphone stream error"),
            None,
        )
        .map_err(device_error)?;
    stream.play().map_err(device_error)?;
    Ok(stream)
}

/// Cuts a continuous sample stream into fixed-size frames.
struct Framer {
    size: usize,
    pending: Vec<f32>,
}

impl Framer {
    fn new(size: usize) -> Self {
        Self {
            size: size.max(1),
            pending: Vec::with_capacity(size),
        }
    }

    fn push(&mut self, samples: &[f32]) -> Vec<Vec<f32>> {
        self.pending.extend_from_slice(samples);
        let whole = self.pending.len() / self.size * self.size;
        self.pending
            .drain(..whole)
            .collect::<Vec<_>>()
            .chunks_exact(self.size)
            .map(<[f32]>::to_vec)
            .collect()
    }

    fn clear(&mut self) {
        self.pending.clear();
    }
}

struct CpalInput {
    sink: FrameSink,
    stream: Option<StreamThread>,
}

impl AudioInput for CpalInput {
    fn attach(&mut self, frames: mpsc::UnboundedSender<Vec<f32>>) -> StudioResult<()> {
        *lock(&self.sink)? = Some(frames);
        Ok(())
    }

    fn detach(&mut self) {
        if let Ok(mut sink) = self.sink.lock() {
            *sink = None;
        }
    }

    fn release(&mut self) -> StudioResult<()> {
        self.detach();
        self.stream
            .take()
            .ok_or_else(|| StudioError::AudioDevice("microphone already released".to_string()))?
            .shutdown()
    }
}

impl Drop for CpalInput {
    fn drop(&mut self) {
        if let Some(stream) = self.stream.take() {
            let _ = stream.shutdown();
        }
    }
}

struct Track {
    id: BufferId,
    start_frame: u64,
    samples: Vec<f32>,
}

/// Sums the scheduled buffers into the device stream.
#[derive(Default)]
struct Mixer {
    device_rate: u32,
    /// Frames written to the device since the output opened.
    position: u64,
    tracks: Vec<Track>,
}

impl Mixer {
    #[allow(clippy::cast_possible_truncation)]
    fn fill(&mut self, data: &mut [f32], channels: usize) {
        for frame in data.chunks_mut(channels.max(1)) {
            let position = self.position;
            let sample: f32 = self
                .tracks
                .iter()
                .filter_map(|track| {
                    let offset = position.checked_sub(track.start_frame)?;
                    track.samples.get(usize::try_from(offset).ok()?).copied()
                })
                .sum();
            frame.fill(sample.clamp(-1.0, 1.0));
            self.position += 1;
        }
        let position = self.position;
        self.tracks
            .retain(|track| track.start_frame + track.samples.len() as u64 > position);
    }

    #[allow(clippy::cast_precision_loss)]
    fn current_time(&self) -> f64 {
        if self.device_rate == 0 {
            return 0.0;
        }
        self.position as f64 / f64::from(self.device_rate)
    }
}

fn build_output_stream(mixer: &Arc<Mutex<Mixer>>) -> StudioResult<::cpal::Stream> {
    let device = ::cpal::default_host()
        .default_output_device()
        .ok_or_else(|| StudioError::AudioDevice("no output device available".to_string()))?;
    let supported = device.default_output_config().map_err(device_error)?;
    let channels = usize::from(supported.channels());
    lock(mixer)?.device_rate = supported.sample_rate().0;
    let stream_config: ::cpal::StreamConfig = supported.into();

    let callback_mixer = mixer.clone();
    let stream = device
        .build_output_stream(
            &stream_config,
            move |data: &mut [f32], _: &::cpal::OutputCallbackInfo| match callback_mixer.lock() {
                Ok(mut mixer) => mixer.fill(data, channels),
                Err(_) => data.fill(0.0),
            },
            |err| error!(%err, "speaker stream error"),
            None,
        )
        .map_err(device_error)?;
    stream.play().map_err(device_error)?;
    Ok(stream)
}

struct CpalOutput {
    mixer: Arc<Mutex<Mixer>>,
    next_id: u64,
    stream: Option<StreamThread>,
}

impl AudioOutput for CpalOutput {
    fn current_time(&self) -> f64 {
        lock(&self.mixer).map_or(0.0, |mixer| mixer.current_time())
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn play(
        &mut self,
        samples: Vec<f32>,
        sample_rate: u32,
        start_at: f64,
    ) -> StudioResult<BufferId> {
        let mut mixer = lock(&self.mixer)?;
        let samples = audio_utils::resample_linear(&samples, sample_rate, mixer.device_rate);
        self.next_id += 1;
        let id = BufferId(self.next_id);
        mixer.tracks.push(Track {
            id,
            start_frame: (start_at.max(0.0) * f64::from(mixer.device_rate)).round() as u64,
            samples,
        });
        Ok(id)
    }

    fn stop(&mut self, id: BufferId) -> StudioResult<()> {
        lock(&self.mixer)?.tracks.retain(|track| track.id != id);
        Ok(())
    }

    fn close(&mut self) -> StudioResult<()> {
        lock(&self.mixer)?.tracks.clear();
        self.stream
            .take()
            .ok_or_else(|| StudioError::AudioDevice("output already closed".to_string()))?
            .shutdown()
    }
}

impl Drop for CpalOutput {
    fn drop(&mut self) {
        if let Some(stream) = self.stream.take() {
            let _ = stream.shutdown();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn framer_holds_back_partial_frames() {
        let mut framer = Framer::new(4);
        assert!(framer.push(&[0.1, 0.2, 0.3]).is_empty());
        let frames = framer.push(&[0.4, 0.5, 0.6, 0.7, 0.8, 0.9]);
        assert_eq!(frames, vec![vec![0.1, 0.2, 0.3, 0.4], vec![0.5, 0.6, 0.7, 0.8]]);
        framer.clear();
        assert!(framer.push(&[1.0; 3]).is_empty());
    }

    #[test]
    fn mixer_plays_tracks_at_their_start_frame() {
        let mut mixer = Mixer {
            device_rate: 4,
            ..Mixer::default()
        };
        mixer.tracks.push(Track {
            id: BufferId(1),
            start_frame: 2,
            samples: vec![0.5, 0.5],
        });
        let mut data = [9.0; 8];
        mixer.fill(&mut data, 2);
        assert_eq!(data, [0.0, 0.0, 0.0, 0.0, 0.5, 0.5, 0.5, 0.5]);
        assert!(mixer.tracks.is_empty());
        assert!((mixer.current_time() - 1.0).abs() < f64::EPSILON);
    }
}
