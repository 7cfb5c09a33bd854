use marketgenius_sdk::audio_utils;
use tracing::warn;

use super::device::{AudioOutput, BufferId};
use crate::StudioResult;

/// A buffer handed to the output and not yet known to have ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduledBuffer {
    pub id: BufferId,
    pub start: f64,
    pub end: f64,
}

/// Gap-free playback of inbound audio chunks.
///
/// Each chunk starts at `max(next_start_time, now)` and pushes
/// `next_start_time` forward by its duration, so chunks arriving in order
/// play back to back without overlapping.
#[derive(Debug, Default)]
pub struct PlaybackScheduler {
    next_start_time: f64,
    active: Vec<ScheduledBuffer>,
}

impl PlaybackScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn next_start_time(&self) -> f64 {
        self.next_start_time
    }

    #[must_use]
    pub fn active_buffers(&self) -> &[ScheduledBuffer] {
        &self.active
    }

    /// Claims the next slot of `duration` seconds and returns its start.
    fn reserve(&mut self, now: f64, duration: f64) -> f64 {
        let start = self.next_start_time.max(now);
        self.next_start_time = start + duration;
        start
    }

    /// Schedules mono samples on `output` and returns their start time.
    pub fn schedule(
        &mut self,
        output: &mut dyn AudioOutput,
        samples: Vec<f32>,
        sample_rate: u32,
    ) -> StudioResult<f64> {
        let now = output.current_time();
        self.prune(now);

        let duration = audio_utils::duration_secs(samples.len(), sample_rate, 1);
        let previous = self.next_start_time;
        let start = self.reserve(now, duration);
        let id = match output.play(samples, sample_rate, start) {
            Ok(id) => id,
            Err(error) => {
                self.next_start_time = previous;
                return Err(error);
            }
        };
        self.active.push(ScheduledBuffer {
            id,
            start,
            end: start + duration,
        });
        Ok(start)
    }

    /// Forgets buffers that finished playing by `now`.
    pub fn prune(&mut self, now: f64) {
        self.active.retain(|buffer| buffer.end > now);
    }

    /// Barge-in: stops every buffer and restarts the timeline from zero.
    pub fn interrupt(&mut self, output: &mut dyn AudioOutput) {
        self.stop_all(output);
        self.next_start_time = 0.0;
    }

    /// Stops every active buffer. Failures to stop are logged and skipped.
    pub fn stop_all(&mut self, output: &mut dyn AudioOutput) {
        for buffer in self.active.drain(..) {
            if let Err(error) = output.stop(buffer.id) {
                warn!(%error, buffer = buffer.id.0, "could not stop output buffer");
            }
        }
    }

    /// Forgets all state without touching an output.
    pub fn reset(&mut self) {
        self.active.clear();
        self.next_start_time = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::live::{device::AudioDevice, fake::FakeAudioDevice};

    fn seconds(duration: f64) -> Vec<f32> {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let len = (duration * 24_000.0) as usize;
        vec![0.0; len]
    }

    #[test]
    fn chunks_are_placed_back_to_back() {
        let device = FakeAudioDevice::new();
        let mut output = device.open_output(24_000).unwrap();
        let mut scheduler = PlaybackScheduler::new();
        let starts: Vec<f64> = [1.0, 0.5, 2.0]
            .into_iter()
            .map(|duration| {
                scheduler
                    .schedule(output.as_mut(), seconds(duration), 24_000)
                    .unwrap()
            })
            .collect();
        assert_eq!(starts, vec![0.0, 1.0, 1.5]);
        assert!((scheduler.next_start_time() - 3.5).abs() < f64::EPSILON);
        assert_eq!(scheduler.active_buffers().len(), 3);
        assert_eq!(device.played().len(), 3);
    }

    #[test]
    fn a_late_chunk_starts_at_the_current_time() {
        let device = FakeAudioDevice::new();
        let mut output = device.open_output(24_000).unwrap();
        let mut scheduler = PlaybackScheduler::new();
        let mut play = |scheduler: &mut PlaybackScheduler| {
            scheduler
                .schedule(output.as_mut(), seconds(1.0), 24_000)
                .unwrap()
        };

        assert_eq!(play(&mut scheduler), 0.0);
        device.set_time(4.0);
        assert_eq!(play(&mut scheduler), 4.0);
        device.set_time(4.5);
        assert_eq!(play(&mut scheduler), 5.0);
        assert_eq!(scheduler.active_buffers().len(), 2);
    }

    #[test]
    fn prune_keeps_buffers_still_playing() {
        let mut scheduler = PlaybackScheduler::new();
        scheduler.active = vec![
            ScheduledBuffer { id: BufferId(1), start: 0.0, end: 1.0 },
            ScheduledBuffer { id: BufferId(2), start: 1.0, end: 2.0 },
        ];
        scheduler.prune(1.0);
        assert_eq!(scheduler.active_buffers().len(), 1);
        assert_eq!(scheduler.active_buffers()[0].id, BufferId(2));
    }
}
