mod browse;
mod term;

use std::{path::PathBuf, sync::Arc};

use anyhow::Result;
use clap::{Args as ClapArgs, Parser, Subcommand};
use client_core::{
    load_settings, ActionOutcome, AuthController, BroadcastNotifier, Confirm, FavoritesController,
    FileSession, FixedAnswer, HttpGateway, QueryOutcome, RecipeDraft, RecipeEditor,
    RecipeListController,
};
use shared::domain::RecipeId;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::{
    browse::browse,
    term::{flush_notifications, print_cards, StdinConfirm},
};

#[derive(Parser, Debug)]
#[command(name = "recipes", about = "Terminal client for the recipe backend")]
struct Args {
    /// Config file; defaults to ./recipes.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Answer yes to every confirmation prompt.
    #[arg(long, short = 'y')]
    yes: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    ResetPassword {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    Logout,
    /// Print every recipe.
    List {
        /// Show all steps of every card.
        #[arg(long)]
        expand: bool,
        /// Print the raw records as JSON instead of cards.
        #[arg(long)]
        json: bool,
    },
    /// Print recipes whose title matches TERM.
    Search { term: String },
    /// Interactive list: type a search term, or `:more ID`, `:rm ID`, `:fav ID`, `:q`.
    Browse,
    Delete { id: String },
    Favorite { id: String },
    Favorites,
    Unfavorite { id: String },
    Add(RecipeFields),
    Update {
        id: String,
        #[command(flatten)]
        fields: RecipeFields,
    },
}

#[derive(ClapArgs, Debug)]
struct RecipeFields {
    #[arg(long)]
    title: Option<String>,
    /// Comma-separated ingredient list.
    #[arg(long)]
    ingredients: Option<String>,
    /// One instruction step; repeat for more.
    #[arg(long = "step")]
    steps: Vec<String>,
    #[arg(long)]
    image_url: Option<String>,
}

impl RecipeFields {
    fn apply(self, draft: &mut RecipeDraft) {
        if let Some(title) = self.title {
            draft.title = title;
        }
        if let Some(raw) = self.ingredients {
            draft.set_ingredients_csv(&raw);
        }
        if !self.steps.is_empty() {
            draft.instructions = self.steps.join("\n");
        }
        if let Some(url) = self.image_url {
            draft.image_url = url;
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let settings = load_settings(args.config.as_deref())?;
    let session = Arc::new(FileSession::new(settings.session_file.clone()));
    let gateway = Arc::new(HttpGateway::new(&settings.backend_url, session.clone())?);
    info!(
        backend_url = %gateway.base_url(),
        session_file = %session.path().display(),
        "starting recipes client"
    );
    let notifier = Arc::new(BroadcastNotifier::new());
    let mut events = notifier.subscribe();
    let confirm: Arc<dyn Confirm> = if args.yes {
        Arc::new(FixedAnswer(true))
    } else {
        Arc::new(StdinConfirm)
    };

    let outcome = match args.command {
        Command::Login { email, password } => {
            let auth = AuthController::new(gateway, session, notifier, confirm);
            auth.login(&email, &password).await
        }
        Command::Register {
            name,
            email,
            password,
        } => {
            let auth = AuthController::new(gateway, session, notifier, confirm);
            auth.register(&name, &email, &password).await
        }
        Command::ResetPassword { email, password } => {
            let auth = AuthController::new(gateway, session, notifier, confirm);
            match auth.reset_password(&email, &password).await {
                Some(message) => {
                    println!("{message}");
                    ActionOutcome::Completed
                }
                None => ActionOutcome::Failed,
            }
        }
        Command::Logout => {
            let auth = AuthController::new(gateway, session, notifier, confirm);
            auth.logout().await
        }
        Command::List { expand, json } => {
            let list = RecipeListController::new(gateway, notifier, confirm);
            let outcome = list.mount().await;
            if json {
                println!("{}", serde_json::to_string_pretty(&list.records().await)?);
            } else {
                if expand {
                    for recipe in list.records().await {
                        list.toggle_expansion(&recipe.id).await;
                    }
                }
                print_cards(&list.cards().await);
            }
            query_status(outcome)
        }
        Command::Search { term } => {
            let list = RecipeListController::new(gateway, notifier, confirm);
            let outcome = list.on_query_changed(&term).await;
            print_cards(&list.cards().await);
            query_status(outcome)
        }
        Command::Browse => {
            let list = RecipeListController::new(gateway, notifier, confirm);
            browse(&list, &mut events).await;
            ActionOutcome::Completed
        }
        Command::Delete { id } => {
            let list = RecipeListController::new(gateway, notifier, confirm);
            list.request_delete(&RecipeId::from(id)).await
        }
        Command::Favorite { id } => {
            let list = RecipeListController::new(gateway, notifier, confirm);
            list.request_favorite(&RecipeId::from(id)).await
        }
        Command::Favorites => {
            let favorites = FavoritesController::new(gateway, notifier, confirm);
            let loaded = favorites.load().await;
            print_cards(&favorites.cards().await);
            if loaded {
                ActionOutcome::Completed
            } else {
                ActionOutcome::Failed
            }
        }
        Command::Unfavorite { id } => {
            let favorites = FavoritesController::new(gateway, notifier, confirm);
            favorites.request_remove(&RecipeId::from(id)).await
        }
        Command::Add(fields) => {
            let editor = RecipeEditor::new(gateway, notifier);
            let mut draft = RecipeDraft::new();
            fields.apply(&mut draft);
            editor.create(&draft).await
        }
        Command::Update { id, fields } => {
            let editor = RecipeEditor::new(gateway, notifier);
            let id = RecipeId::from(id);
            match editor.load(&id).await {
                Some(mut draft) => {
                    fields.apply(&mut draft);
                    editor.update(&id, &draft).await
                }
                None => ActionOutcome::Failed,
            }
        }
    };

    flush_notifications(&mut events);
    if outcome == ActionOutcome::Failed {
        std::process::exit(1);
    }
    Ok(())
}

fn query_status(outcome: QueryOutcome) -> ActionOutcome {
    match outcome {
        QueryOutcome::Failed => ActionOutcome::Failed,
        _ => ActionOutcome::Completed,
    }
}
