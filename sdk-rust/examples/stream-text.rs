use dotenvy::dotenv;
use futures::stream::StreamExt;
use marketgenius_sdk::{
    google::GoogleModel, LanguageModel, LanguageModelInput, Message, Part, StreamAccumulator,
};
use std::io::Write;

mod common;

#[tokio::main]
async fn main() {
    dotenv().ok();

    let model = GoogleModel::new("gemini-2.5-flash", common::google_options());

    let mut stream = model
        .stream(LanguageModelInput {
            messages: vec![Message::user(vec![Part::text(
                "Write a short product description for a reusable coffee cup.",
            )])],
            ..Default::default()
        })
        .await
        .unwrap();

    let mut accumulator = StreamAccumulator::new();

    while let Some(partial_response) = stream.next().await {
        let partial_response = partial_response.unwrap();
        if let Some(text) = partial_response.delta.as_ref().and_then(|d| d.text()) {
            print!("{text}");
            std::io::stdout().flush().ok();
        }
        accumulator.add_partial(partial_response).unwrap();
    }

    let final_response = accumulator.compute_response();
    println!("\n\nUsage: {:?}", final_response.usage);
}
