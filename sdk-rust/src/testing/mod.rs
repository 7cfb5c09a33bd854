//! Mock models that record their inputs and yield queued outputs.
//!
//! Every mock pops one queued result per call and fails with an invariant
//! error when the queue is empty.

mod image_model;
mod live;
mod model;

pub use image_model::MockImageModel;
pub use live::{MockLiveConnector, MockLiveRemote};
pub use model::{MockGenerateResult, MockLanguageModel, MockStreamResult};
