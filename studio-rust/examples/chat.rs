use std::io::{BufRead, Write};

use marketgenius_studio::{chat::GREETING, ChatSession, GeminiClient};

mod common;

#[tokio::main]
async fn main() {
    let config = common::setup();
    let client = GeminiClient::from_config(&config);
    let mut session = ChatSession::new(client.chat_model());

    println!("{GREETING}");
    let stdin = std::io::stdin();
    loop {
        print!("> ");
        std::io::stdout().flush().ok();

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).unwrap() == 0 {
            break;
        }
        match session.send(line.trim()).await {
            Ok(reply) => println!("{reply}\n"),
            Err(error) => eprintln!("{}\n", error.user_message()),
        }
    }

    println!("\n{}", session.transcript());
}
