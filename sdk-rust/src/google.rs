mod api;
mod image_model;
mod live;
mod model;

use reqwest::Client;
use std::collections::HashMap;

pub use image_model::GoogleImageModel;
pub use live::GoogleLiveConnector;
pub use model::GoogleModel;

const PROVIDER: &str = "google";
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_LIVE_URL: &str = "wss://generativelanguage.googleapis.com/ws/google.ai.generativelanguage.v1beta.GenerativeService.BidiGenerateContent";

/// Options shared by every Google model client.
#[derive(Clone, Default)]
pub struct GoogleModelOptions {
    pub api_key: String,
    /// Defaults to the public Generative Language endpoint. For live
    /// sessions, a `ws://` or `wss://` URL of the `BidiGenerateContent`
    /// endpoint.
    pub base_url: Option<String>,
    pub headers: Option<HashMap<String, String>>,
    pub client: Option<Client>,
}
