mod accumulator;
mod audio_part_utils;
pub mod audio_utils;
mod client_utils;
mod errors;
mod ext;
pub mod google;
mod language_model;
mod opentelemetry;
pub mod testing;
mod types;

pub use accumulator::StreamAccumulator;
pub use errors::*;
pub use language_model::{
    ImageModel, LanguageModel, LanguageModelStream, LiveConnector, LiveEventStream, LiveSender,
    LiveSession,
};
pub use types::*;
