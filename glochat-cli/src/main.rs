//! Interactive terminal client for glochat

mod client;

use anyhow::Result;
use clap::Parser;
use console::style;
use dialoguer::Input;
use indicatif::ProgressBar;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use glochat_core::config::ConfigLoader;
use glochat_core::logging::init_logging;
use glochat_core::session::{FileStorage, Role, SessionStore};

use crate::client::ApiClient;

#[derive(Parser)]
#[command(name = "glochat")]
#[command(about = "Terminal chat client backed by the glochat relay")]
#[command(version)]
struct Cli {
    /// Relay base URL
    #[arg(short, long)]
    server: Option<String>,

    /// Directory for persisted session state
    #[arg(long)]
    state_dir: Option<PathBuf>,

    /// Configuration directory
    #[arg(short, long)]
    config_dir: Option<PathBuf>,

    /// Enable log output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let loader = match &cli.config_dir {
        Some(dir) => ConfigLoader::with_dir(dir),
        None => ConfigLoader::new(),
    };
    let config = loader.load()?;

    // Logging writes to stdout and would interleave with the transcript,
    // so it stays off unless asked for.
    let _guard = if cli.verbose {
        Some(init_logging(&config.logging))
    } else {
        None
    };

    let state_dir = cli
        .state_dir
        .unwrap_or_else(|| PathBuf::from(&config.state_dir));
    let storage = Arc::new(FileStorage::new(state_dir));
    let mut store = SessionStore::load(storage)?;

    let client = ApiClient::new(cli.server);
    if !client.health().await {
        println!(
            "{}",
            style("Warning: relay is not reachable; submissions will show the error bubble.")
                .yellow()
        );
    }

    println!("{}", style("GloGPT").cyan().bold());
    println!("Type a message, or /help for commands.\n");
    print_transcript(&store);

    loop {
        let line: String = Input::new().with_prompt(">").interact_text()?;
        let line = line.trim().to_string();
        if line.is_empty() {
            continue;
        }

        match line.as_str() {
            "/quit" | "/exit" => break,
            "/help" => print_help(),
            "/new" => {
                store.new_chat()?;
                println!("{}", style("Started a new chat.").dim());
            }
            "/chats" => print_chats(&store),
            "/theme" => toggle_theme(&store)?,
            _ if line.starts_with("/switch") => switch_chat(&mut store, &line),
            _ if line.starts_with('/') => {
                println!("{}", style("Unknown command; try /help.").dim());
            }
            _ => submit(&mut store, &client, &line).await,
        }
    }

    Ok(())
}

async fn submit(store: &mut SessionStore, client: &ApiClient, text: &str) {
    let spinner = ProgressBar::new_spinner();
    spinner.set_message("Thinking...");
    spinner.enable_steady_tick(Duration::from_millis(120));

    let result = store.submit(client, text).await;
    spinner.finish_and_clear();

    match result {
        Ok(()) => {
            if let Some(reply) = store.active_messages().last() {
                print_message(reply.role, &reply.content);
            }
        }
        Err(e) => println!("{}", style(format!("Could not submit: {}", e)).red()),
    }
}

fn switch_chat(store: &mut SessionStore, line: &str) {
    let index = line
        .split_whitespace()
        .nth(1)
        .and_then(|n| n.parse::<usize>().ok());
    let Some(index) = index else {
        println!("{}", style("Usage: /switch <number> (see /chats)").dim());
        return;
    };

    let Some(id) = store.chats().get(index.wrapping_sub(1)).map(|c| c.id.clone()) else {
        println!("{}", style("No such chat.").dim());
        return;
    };

    match store.switch_chat(&id) {
        Ok(true) => print_transcript(store),
        Ok(false) => println!("{}", style("No such chat.").dim()),
        Err(e) => println!("{}", style(format!("Could not switch: {}", e)).red()),
    }
}

fn toggle_theme(store: &SessionStore) -> Result<()> {
    let next = match store.theme()?.as_deref() {
        Some("dark") => "light",
        _ => "dark",
    };
    store.set_theme(next)?;
    println!("{}", style(format!("Theme set to {}.", next)).dim());
    Ok(())
}

fn print_help() {
    println!("  /new           start a new chat");
    println!("  /chats         list chats");
    println!("  /switch <n>    switch to chat n");
    println!("  /theme         toggle dark/light theme");
    println!("  /quit          exit");
}

fn print_chats(store: &SessionStore) {
    if store.chats().is_empty() {
        println!("{}", style("No chats yet.").dim());
        return;
    }
    for (i, chat) in store.chats().iter().enumerate() {
        let marker = if Some(chat.id.as_str()) == store.active_chat_id() {
            "*"
        } else {
            " "
        };
        println!("{} {:>2}. {}", marker, i + 1, chat.title);
    }
}

fn print_transcript(store: &SessionStore) {
    for msg in store.active_messages() {
        print_message(msg.role, &msg.content);
    }
}

fn print_message(role: Role, content: &str) {
    match role {
        Role::User => println!("{} {}", style("you:").green().bold(), content),
        Role::Assistant => println!("{} {}", style("glo:").cyan().bold(), content),
    }
}
