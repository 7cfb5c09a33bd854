use marketgenius_studio::{export, ArticleSession, ArticleUpdate, GeminiClient};

mod common;

#[tokio::main]
async fn main() {
    let config = common::setup();
    let client = GeminiClient::from_config(&config);

    let mut session = ArticleSession::new();
    let brief = session
        .submit_topic(&client, "How small bakeries can win on local SEO")
        .await
        .unwrap();
    println!("Title: {}\nKeywords: {}\n", brief.title, brief.keywords.join(", "));

    session.word_count = "800".to_string();
    session.add_keyword("google business profile");

    session
        .submit_brief(&client, |update| {
            if let ArticleUpdate::Progress(message) = update {
                println!("> {message}");
            }
        })
        .await
        .unwrap();

    let markdown = session.markdown();
    let file_name = export::export_file_name(&session.title, "md");
    std::fs::write(&file_name, &markdown).unwrap();
    println!(
        "\nWrote {file_name} ({} words, {} images)",
        export::word_count(session.article()),
        session.generated_image_urls().len()
    );
}
