use dotenvy::dotenv;
use marketgenius_sdk::{
    google::GoogleModel, LanguageModel, LanguageModelInput, Message, Part, ResponseFormatJson,
    ResponseFormatOption,
};
use serde_json::Value;

mod common;

#[tokio::main]
async fn main() {
    dotenv().ok();

    let model = GoogleModel::new("gemini-2.5-pro", common::google_options());

    let schema = serde_json::json!({
      "type": "object",
      "properties": {
        "title": { "type": "string", "description": "The SEO-friendly title for the blog post." },
        "keywords": {
          "type": "array",
          "items": { "type": "string" },
          "description": "An array of 5-7 relevant keywords."
        },
        "outline": { "type": "string", "description": "The detailed content outline in Markdown format." }
      },
      "required": ["title", "keywords", "outline"]
    });

    let response = model
        .generate(LanguageModelInput {
            messages: vec![Message::user(vec![Part::text(
                "Create a blog brief about composting at home.",
            )])],
            response_format: Some(ResponseFormatOption::Json(ResponseFormatJson {
                name: "brief".to_string(),
                description: None,
                schema: Some(schema),
            })),
            ..Default::default()
        })
        .await
        .unwrap();

    let val: Value = serde_json::from_str(&response.text()).expect("Invalid JSON response");

    println!(
        "{}",
        serde_json::to_string_pretty(&val).expect("Failed to format JSON")
    );
}
