use dotenvy::dotenv;
use marketgenius_sdk::{google::GoogleModel, LanguageModel, LanguageModelInput, Message, Part};

mod common;

#[tokio::main]
async fn main() {
    dotenv().ok();

    let model = GoogleModel::new("gemini-2.5-flash", common::google_options());

    let response = model
        .generate(LanguageModelInput {
            system_prompt: Some("You are a concise marketing strategist.".into()),
            messages: vec![
                Message::user(vec![Part::text("Name one channel for a bakery launch.")]),
                Message::assistant(vec![Part::text("Instagram Reels.")]),
                Message::user(vec![Part::text("Why that one?")]),
            ],
            ..Default::default()
        })
        .await
        .unwrap();

    println!("{}", response.text());
}
