#![allow(dead_code)]

use std::{sync::Arc, time::Duration};

use marketgenius_sdk::{
    testing::{MockImageModel, MockLanguageModel},
    ModelResponse, Part,
};
use marketgenius_studio::{GeminiClient, GeminiModels};

/// One mock per model a [`GeminiClient`] routes to.
pub struct MockModels {
    pub text: Arc<MockLanguageModel>,
    pub fast_text: Arc<MockLanguageModel>,
    pub image: Arc<MockImageModel>,
    pub image_edit: Arc<MockLanguageModel>,
    pub speech: Arc<MockLanguageModel>,
}

impl MockModels {
    pub fn new() -> Self {
        Self {
            text: Arc::new(MockLanguageModel::new()),
            fast_text: Arc::new(MockLanguageModel::new()),
            image: Arc::new(MockImageModel::new()),
            image_edit: Arc::new(MockLanguageModel::new()),
            speech: Arc::new(MockLanguageModel::new()),
        }
    }

    pub fn client(&self) -> GeminiClient {
        GeminiClient::new(GeminiModels {
            text: self.text.clone(),
            fast_text: self.fast_text.clone(),
            image: self.image.clone(),
            image_edit: self.image_edit.clone(),
            speech: self.speech.clone(),
        })
    }
}

pub fn text_response(text: &str) -> ModelResponse {
    ModelResponse {
        content: vec![Part::text(text)],
        ..Default::default()
    }
}

/// Text of the single user message the model was called with.
pub fn prompt_of(input: &marketgenius_sdk::LanguageModelInput) -> String {
    input
        .messages
        .iter()
        .flat_map(|message| message.content())
        .filter_map(|part| match part {
            Part::Text(text) => Some(text.text.clone()),
            _ => None,
        })
        .collect()
}

/// Polls `check` until it holds, failing the test after two seconds.
pub async fn eventually(mut check: impl FnMut() -> bool) {
    tokio::time::timeout(Duration::from_secs(2), async {
        while !check() {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("condition was not reached in time");
}
