//! Interactive console for the response engine.

use std::io::Write;

use tokio::io::{AsyncBufReadExt, BufReader};

use parley::application::{ChatService, ModelStatus};
use parley::config::AppConfig;
use parley::domain::conversation::History;
use parley::domain::engine::Preference;

const RULE: &str = "--------------------------------------------------";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;
    config.logging.init();

    let service = ChatService::from_config(&config);
    let mut history = History::new();

    println!("Welcome to Parley! Type 'exit' or 'quit' to end the conversation.");
    println!("Type 'clear' to clear the conversation history.");
    println!("Type 'model' to show the active backends, 'model <preference>' to switch.");
    println!("{}", RULE);
    print_status(&service.model_status().await);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("\nYou: ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            println!();
            break;
        };
        let input = line.trim();
        let lowered = input.to_lowercase();

        match lowered.as_str() {
            "exit" | "quit" => {
                println!("\nGoodbye! Thank you for chatting.");
                break;
            }
            "clear" => {
                history.clear();
                println!("\nConversation history cleared.");
                continue;
            }
            "model" => {
                print_status(&service.model_status().await);
                continue;
            }
            _ => {}
        }

        if let Some(name) = lowered.strip_prefix("model ") {
            match name.trim().parse::<Preference>() {
                Ok(preference) => print_status(&service.set_preference(preference).await),
                Err(e) => println!("\n{}", e),
            }
            continue;
        }

        let response = service.respond(input, history.as_slice()).await;
        println!("\nAI: {}", response);
        println!("{}", RULE);

        if !input.is_empty() {
            history.record(input, response);
        }
    }

    Ok(())
}

fn print_status(status: &ModelStatus) {
    println!(
        "Preference: {} | Available: {}",
        status.preference,
        status.available.describe()
    );
}
