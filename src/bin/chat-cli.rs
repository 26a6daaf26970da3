use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use chat_relay::client::{ChatView, Dispatcher, Session};
use chat_relay::message::Language;
use chat_relay::services::mock_responder::MockResponder;

/// Line-oriented terminal client for the chat relay.
#[derive(Parser, Debug)]
#[command(name = "chat-cli", about = "Ask the chat relay from a terminal")]
struct Args {
    /// Chat endpoint to post messages to.
    #[arg(long, env = "CHAT_RELAY_ENDPOINT", default_value = "http://127.0.0.1:3000/chat")]
    endpoint: String,

    /// Language for prompts and error texts (`zh` or `en`).
    #[arg(long, default_value = "zh")]
    display_language: String,

    /// Simulated latency of the offline fallback, in milliseconds.
    #[arg(long, default_value_t = 1000)]
    mock_delay_ms: u64,
}

struct TerminalView;

impl ChatView for TerminalView {
    fn alert(&self, text: &str) {
        eprintln!("! {text}");
    }

    fn show_response(&self, text: &str, is_error: bool) {
        if is_error {
            eprintln!("error: {text}");
        } else {
            println!("{text}");
        }
    }

    fn reset_ui_state(&self) {
        println!();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let session = Session::new(Language::from_code(&args.display_language));
    let fallback = MockResponder::new(Duration::from_millis(args.mock_delay_ms));
    let dispatcher = Dispatcher::with_fallback(args.endpoint, fallback)
        .context("building HTTP client")?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        dispatcher.send(&session, &line, &TerminalView).await;
    }

    Ok(())
}
