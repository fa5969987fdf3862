use std::io::{self, BufRead, Write};

use async_trait::async_trait;
use client_core::{Confirm, Notification, NotificationLevel, RecipeCard};
use tokio::sync::broadcast::{self, error::TryRecvError};
use tracing::warn;

/// Asks on stderr and reads a y/n answer from stdin. Anything but "y" or "yes" declines.
pub struct StdinConfirm;

#[async_trait]
impl Confirm for StdinConfirm {
    async fn confirm(&self, message: &str) -> bool {
        eprint!("{message} [y/N] ");
        let _ = io::stderr().flush();
        match read_line().await {
            Some(answer) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
            None => false,
        }
    }
}

/// Next line from stdin without the trailing newline, or `None` at end of input.
pub async fn read_line() -> Option<String> {
    let read = tokio::task::spawn_blocking(|| {
        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
            Err(err) => {
                warn!(error = %err, "failed to read stdin");
                None
            }
        }
    })
    .await;
    read.ok().flatten()
}

/// Prints every notification queued on `events` so far.
pub fn flush_notifications(events: &mut broadcast::Receiver<Notification>) {
    loop {
        match events.try_recv() {
            Ok(notification) => print_notification(&notification),
            Err(TryRecvError::Lagged(skipped)) => warn!(skipped, "dropped notifications"),
            Err(TryRecvError::Empty | TryRecvError::Closed) => break,
        }
    }
}

fn print_notification(notification: &Notification) {
    let tag = match notification.level {
        NotificationLevel::Success => "ok",
        NotificationLevel::Warning => "warn",
        NotificationLevel::Error => "error",
    };
    eprintln!("[{tag}] {}", notification.message);
}

pub fn print_cards(cards: &[RecipeCard]) {
    if cards.is_empty() {
        println!("(no recipes)");
        return;
    }
    for card in cards {
        print_card(card);
    }
}

fn print_card(card: &RecipeCard) {
    println!("== {} [{}]", card.title, card.id);
    if let Some(url) = &card.image_url {
        println!("   image: {url}");
    }
    if !card.ingredients.is_empty() {
        println!("   ingredients: {}", card.ingredients.join(", "));
    }
    for (n, step) in card.steps.iter().enumerate() {
        println!("   {}. {step}", n + 1);
    }
    if let Some(toggle) = card.toggle {
        println!("   ({})", toggle.as_str());
    }
    println!();
}
