use marketgenius_sdk::google::GoogleModelOptions;

pub fn google_options() -> GoogleModelOptions {
    GoogleModelOptions {
        api_key: std::env::var("GEMINI_API_KEY")
            .or_else(|_| std::env::var("API_KEY"))
            .expect("GEMINI_API_KEY environment variable must be set"),
        ..Default::default()
    }
}
