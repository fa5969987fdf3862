use super::*;
use crate::test_support::{recipe, FakeGateway, Failure, RecordingNotifier, ScriptedConfirm};

fn controller(
    confirm_answer: bool,
) -> (
    Arc<FakeGateway>,
    Arc<RecordingNotifier>,
    Arc<ScriptedConfirm>,
    FavoritesController,
) {
    let gateway = FakeGateway::new();
    let notifier = RecordingNotifier::new();
    let confirm = ScriptedConfirm::answering(confirm_answer);
    let controller = FavoritesController::new(gateway.clone(), notifier.clone(), confirm.clone());
    (gateway, notifier, confirm, controller)
}

#[tokio::test]
async fn load_populates_favorites() {
    let (gateway, notifier, _confirm, favorites) = controller(true);
    gateway.script().favorites = vec![recipe("1", "Soup", "a\nb\nc")];

    assert!(favorites.load().await);
    assert!(!favorites.is_loading().await);

    let cards = favorites.cards().await;
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].steps, vec!["a", "b"]);
    assert!(notifier.seen().is_empty());
}

#[tokio::test]
async fn failed_load_reports_error_and_clears_loading_flag() {
    let (gateway, notifier, _confirm, favorites) = controller(true);
    gateway.script().favorites_failure = Some(Failure::Api(500, None));

    assert!(!favorites.load().await);
    assert!(!favorites.is_loading().await);
    assert_eq!(notifier.seen(), vec![Notification::error(LOAD_FAILURE)]);
}

#[tokio::test]
async fn confirmed_removal_prunes_the_list() {
    let (gateway, notifier, confirm, favorites) = controller(true);
    gateway.script().favorites = vec![recipe("1", "Soup", ""), recipe("2", "Pasta", "")];
    favorites.load().await;

    let outcome = favorites.request_remove(&RecipeId::new("1")).await;

    assert_eq!(outcome, ActionOutcome::Completed);
    assert_eq!(confirm.prompts(), vec![REMOVE_PROMPT]);
    let remaining: Vec<String> = favorites
        .records()
        .await
        .into_iter()
        .map(|r| r.id.0)
        .collect();
    assert_eq!(remaining, vec!["2"]);
    assert_eq!(notifier.seen(), vec![Notification::success(REMOVE_SUCCESS)]);
}

#[tokio::test]
async fn declined_removal_sends_nothing() {
    let (gateway, _notifier, _confirm, favorites) = controller(false);

    let outcome = favorites.request_remove(&RecipeId::new("1")).await;

    assert_eq!(outcome, ActionOutcome::Cancelled);
    assert!(gateway.calls().is_empty());
}

#[tokio::test]
async fn failed_removal_keeps_item_and_shows_server_error() {
    let (gateway, notifier, _confirm, favorites) = controller(true);
    gateway.script().favorites = vec![recipe("1", "Soup", "")];
    favorites.load().await;
    gateway.script().remove_failure = Some(Failure::Api(404, Some("Recipe not in favorites")));

    let outcome = favorites.request_remove(&RecipeId::new("1")).await;

    assert_eq!(outcome, ActionOutcome::Failed);
    assert_eq!(favorites.records().await.len(), 1);
    assert_eq!(
        notifier.seen(),
        vec![Notification::error("Recipe not in favorites")]
    );
}
