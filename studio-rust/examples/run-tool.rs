use std::io::Write;

use marketgenius_studio::{catalog::Slot, find_tool, GeminiClient, ToolRun};

mod common;

#[tokio::main]
async fn main() {
    let config = common::setup();
    let client = GeminiClient::from_config(&config);

    let tool = find_tool(302).expect("AIDA copy tool exists");
    println!("{}: {}\n", tool.title, tool.description);

    let mut run = ToolRun::new(tool).unwrap();
    run.set(Slot::Topic, "A project management app for freelancers");
    run.set(Slot::Audience, "Freelancers and small teams");

    let result = run
        .run_streaming(&client, |delta| {
            print!("{delta}");
            std::io::stdout().flush().ok();
        })
        .await;

    if let Err(error) = result {
        eprintln!("\n{}", error.user_message());
    }
}
