use client_core::{Notification, QueryOutcome, RecipeListController};
use shared::domain::RecipeId;
use tokio::sync::broadcast;

use crate::term::{flush_notifications, print_cards, read_line};

/// One line typed into the interactive list.
#[derive(Debug, PartialEq, Eq)]
pub enum BrowseInput {
    Quit,
    Toggle(RecipeId),
    Delete(RecipeId),
    Favorite(RecipeId),
    /// A card command given without an id.
    MissingId(&'static str),
    /// Anything else is search text; an empty line resets the list.
    Query(String),
}

impl BrowseInput {
    pub fn parse(line: &str) -> Self {
        let (command, arg) = match line.split_once(' ') {
            Some((command, arg)) => (command, arg.trim()),
            None => (line, ""),
        };
        let card_command = match command {
            ":q" => return Self::Quit,
            ":more" => ":more",
            ":rm" => ":rm",
            ":fav" => ":fav",
            _ => return Self::Query(line.to_string()),
        };
        if arg.is_empty() {
            return Self::MissingId(card_command);
        }
        let id = RecipeId::from(arg);
        match card_command {
            ":more" => Self::Toggle(id),
            ":rm" => Self::Delete(id),
            _ => Self::Favorite(id),
        }
    }
}

pub async fn browse(
    list: &RecipeListController,
    events: &mut broadcast::Receiver<Notification>,
) {
    list.mount().await;
    flush_notifications(events);
    print_cards(&list.cards().await);
    eprintln!("type to search, :more ID, :rm ID, :fav ID, :q to quit");

    while let Some(line) = read_line().await {
        match BrowseInput::parse(&line) {
            BrowseInput::Quit => break,
            BrowseInput::MissingId(command) => {
                eprintln!("usage: {command} ID");
                continue;
            }
            BrowseInput::Toggle(id) => {
                list.toggle_expansion(&id).await;
            }
            BrowseInput::Delete(id) => {
                list.request_delete(&id).await;
            }
            BrowseInput::Favorite(id) => {
                list.request_favorite(&id).await;
            }
            BrowseInput::Query(term) => {
                if list.on_query_changed(&term).await == QueryOutcome::Failed {
                    eprintln!("search failed; showing previous results");
                }
            }
        }
        flush_notifications(events);
        print_cards(&list.cards().await);
    }
}

#[cfg(test)]
#[path = "tests/browse_tests.rs"]
mod tests;
