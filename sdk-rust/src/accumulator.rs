use crate::{
    audio_utils, AudioFormat, AudioPart, GenerationError, GenerationResult, ImagePart,
    ModelResponse, ModelUsage, Part, PartDelta, PartialModelResponse,
};

/// Internal representation of accumulated audio data
#[derive(Debug, Clone)]
struct AccumulatedAudioData {
    samples: Vec<i16>,
    format: AudioFormat,
    sample_rate: Option<u32>,
    channels: Option<u32>,
}

/// Represents accumulated data for different part types
#[derive(Debug, Clone)]
enum AccumulatedData {
    Text(String),
    Image(ImagePart),
    Audio(AccumulatedAudioData),
}

/// Merges streamed deltas into a final response.
///
/// Gemini streams carry no part indexes, so consecutive deltas of the same
/// kind are merged into one part: text is concatenated and PCM audio chunks
/// are appended. Images are always distinct parts.
pub struct StreamAccumulator {
    accumulated_parts: Vec<AccumulatedData>,
    accumulated_usage: Option<ModelUsage>,
}

impl StreamAccumulator {
    #[must_use]
    pub fn new() -> Self {
        Self {
            accumulated_parts: Vec::new(),
            accumulated_usage: None,
        }
    }

    /// Adds a partial response to the accumulator
    ///
    /// # Errors
    /// Returns an error if an audio delta cannot be decoded
    pub fn add_partial(&mut self, partial: PartialModelResponse) -> GenerationResult<()> {
        if let Some(delta) = partial.delta {
            self.process_delta(delta)?;
        }
        if let Some(usage) = partial.usage {
            self.process_usage(&usage);
        }
        Ok(())
    }

    /// The text accumulated so far, for progressive display.
    #[must_use]
    pub fn text(&self) -> String {
        self.accumulated_parts
            .iter()
            .filter_map(|data| match data {
                AccumulatedData::Text(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Computes the final response from accumulated deltas
    #[must_use]
    pub fn compute_response(self) -> ModelResponse {
        let content = self
            .accumulated_parts
            .into_iter()
            .map(|data| match data {
                AccumulatedData::Text(text) => Part::text(text),
                AccumulatedData::Image(image) => Part::Image(image),
                AccumulatedData::Audio(audio) => Part::Audio(AudioPart {
                    audio_data: audio_utils::i16sample_to_base64(&audio.samples),
                    format: audio.format,
                    sample_rate: audio.sample_rate,
                    channels: audio.channels,
                }),
            })
            .collect();

        ModelResponse {
            content,
            usage: self.accumulated_usage,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.accumulated_parts.is_empty()
    }

    fn process_delta(&mut self, delta: PartDelta) -> GenerationResult<()> {
        match delta {
            PartDelta::Text(text_delta) => {
                if let Some(AccumulatedData::Text(text)) = self.accumulated_parts.last_mut() {
                    text.push_str(&text_delta.text);
                } else {
                    self.accumulated_parts
                        .push(AccumulatedData::Text(text_delta.text));
                }
            }
            PartDelta::Image(image) => self.accumulated_parts.push(AccumulatedData::Image(image)),
            PartDelta::Audio(audio) => {
                if audio.format != AudioFormat::Linear16 {
                    return Err(GenerationError::Unsupported(
                        "",
                        format!(
                            "Only linear16 audio can be concatenated. Received: {:?}",
                            audio.format
                        ),
                    ));
                }
                let samples = audio_utils::base64_to_i16sample(&audio.audio_data)?;
                if let Some(AccumulatedData::Audio(existing)) = self.accumulated_parts.last_mut() {
                    existing.samples.extend(samples);
                } else {
                    self.accumulated_parts
                        .push(AccumulatedData::Audio(AccumulatedAudioData {
                            samples,
                            format: audio.format,
                            sample_rate: audio.sample_rate,
                            channels: audio.channels,
                        }));
                }
            }
        }
        Ok(())
    }

    fn process_usage(&mut self, usage: &ModelUsage) {
        let accumulated_usage = self
            .accumulated_usage
            .get_or_insert_with(ModelUsage::default);

        accumulated_usage.input_tokens += usage.input_tokens;
        accumulated_usage.output_tokens += usage.output_tokens;
    }
}

impl Default for StreamAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TextPartDelta;

    fn text(t: &str) -> PartialModelResponse {
        PartialModelResponse {
            delta: Some(PartDelta::Text(TextPartDelta {
                text: t.to_string(),
            })),
            usage: None,
        }
    }

    #[test]
    fn merges_consecutive_text_and_sums_usage() {
        let mut accumulator = StreamAccumulator::new();
        accumulator.add_partial(text("Hello, ")).unwrap();
        accumulator.add_partial(text("world")).unwrap();
        accumulator
            .add_partial(PartialModelResponse {
                delta: None,
                usage: Some(ModelUsage {
                    input_tokens: 3,
                    output_tokens: 4,
                }),
            })
            .unwrap();

        assert_eq!(accumulator.text(), "Hello, world");
        let response = accumulator.compute_response();
        assert_eq!(response.content, vec![Part::text("Hello, world")]);
        assert_eq!(
            response.usage,
            Some(ModelUsage {
                input_tokens: 3,
                output_tokens: 4
            })
        );
    }

    #[test]
    fn appends_pcm_audio_chunks() {
        let mut accumulator = StreamAccumulator::new();
        for chunk in [[1_i16, 2], [3, 4]] {
            accumulator
                .add_partial(PartialModelResponse {
                    delta: Some(PartDelta::Audio(
                        AudioPart::new(
                            audio_utils::i16sample_to_base64(&chunk),
                            AudioFormat::Linear16,
                        )
                        .with_sample_rate(24_000),
                    )),
                    usage: None,
                })
                .unwrap();
        }

        let response = accumulator.compute_response();
        let audio = response.first_audio().unwrap();
        assert_eq!(
            audio_utils::base64_to_i16sample(&audio.audio_data).unwrap(),
            vec![1, 2, 3, 4]
        );
        assert_eq!(audio.sample_rate, Some(24_000));
    }

    #[test]
    fn rejects_compressed_audio() {
        let mut accumulator = StreamAccumulator::new();
        let result = accumulator.add_partial(PartialModelResponse {
            delta: Some(PartDelta::Audio(AudioPart::new("AAAA", AudioFormat::Mp3))),
            usage: None,
        });
        assert!(matches!(result, Err(GenerationError::Unsupported(_, _))));
    }
}
