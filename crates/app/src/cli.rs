//! Command-line front end.
//!
//! Stands in for the mobile screens: fetch a (translated) advice, keep it as
//! a favorite, and list/edit/delete favorites.

use std::io::Write;
use std::path::PathBuf;

use advicebook_domain::{Advice, AdviceDraft, AdvicePatch};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::app::App;
use crate::stores::FavoritesOutcome;

#[derive(Parser, Debug)]
#[command(name = "advicebook", version, about = "Fetch advice and keep your favorites")]
pub struct Cli {
    /// Storage file (overrides ADVICEBOOK_STORAGE_PATH)
    #[arg(long, global = true)]
    pub storage: Option<PathBuf>,

    /// Keep fetched advice in its original language
    #[arg(long, global = true)]
    pub no_translate: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Fetch a random advice
    Fetch {
        /// Also add it to favorites
        #[arg(long)]
        save: bool,
    },
    /// List favorites
    List {
        /// Print the raw JSON array
        #[arg(long)]
        json: bool,
    },
    /// Show one favorite
    Show { id: String },
    /// Add a favorite by hand
    Save { id: String, text: String },
    /// Replace the text of a favorite
    Edit { id: String, text: String },
    /// Remove a favorite
    Delete { id: String },
    /// Remove all favorites
    Clear,
}

/// Execute one command against `app`, writing human-readable output to `out`.
pub async fn run<W: Write>(
    command: Command,
    translate: bool,
    app: &App,
    out: &mut W,
) -> Result<()> {
    match command {
        Command::Fetch { save } => {
            let draft = app
                .fetch_advice
                .execute(translate)
                .await
                .context("could not fetch advice")?;
            writeln!(out, "[{}] {}", draft.id, draft.text)?;
            if save {
                let outcome = app.favorites.save(draft).await;
                report(out, &outcome, "Saved to favorites", "Already in favorites")?;
            }
        }
        Command::List { json } => {
            let favorites = app.favorites.list().await;
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&favorites)?)?;
            } else if favorites.is_empty() {
                writeln!(out, "No favorites saved.")?;
            } else {
                for advice in &favorites {
                    print_advice(out, advice)?;
                }
            }
        }
        Command::Show { id } => match app.favorites.get(id.as_str()).await {
            Some(advice) => print_advice(out, &advice)?,
            None => writeln!(out, "No favorite with id {}", id.trim())?,
        },
        Command::Save { id, text } => {
            let outcome = app.favorites.save(AdviceDraft::new(id, text)).await;
            report(out, &outcome, "Saved to favorites", "Already in favorites")?;
        }
        Command::Edit { id, text } => {
            let outcome = app.favorites.update(AdvicePatch::new(id.as_str(), text)).await;
            report(out, &outcome, "Favorite updated", "No favorite with that id")?;
        }
        Command::Delete { id } => {
            let outcome = app.favorites.delete(id.as_str()).await;
            report(out, &outcome, "Favorite removed", "No favorite with that id")?;
        }
        Command::Clear => {
            let outcome = app.favorites.clear().await;
            report(out, &outcome, "Favorites cleared", "Favorites were already empty")?;
        }
    }
    Ok(())
}

fn print_advice<W: Write>(out: &mut W, advice: &Advice) -> std::io::Result<()> {
    writeln!(out, "[{}] {}", advice.id(), advice.text())
}

fn report<W: Write>(
    out: &mut W,
    outcome: &FavoritesOutcome,
    applied: &str,
    unchanged: &str,
) -> std::io::Result<()> {
    match outcome {
        FavoritesOutcome::Applied => writeln!(out, "{applied}"),
        FavoritesOutcome::Unchanged => writeln!(out, "{unchanged}"),
        FavoritesOutcome::Rejected(e) => writeln!(out, "Not saved: {e}"),
        FavoritesOutcome::Failed(e) => writeln!(out, "Storage problem, nothing changed: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{
        ExternalError, FetchedAdvice, MockAdviceSource, MockTranslator,
    };
    use crate::infrastructure::storage::InMemoryKeyValueStore;
    use advicebook_domain::RawAdviceId;
    use std::sync::Arc;

    fn app_with(source: MockAdviceSource, translator: MockTranslator) -> App {
        App::new(
            Arc::new(InMemoryKeyValueStore::new()),
            Arc::new(source),
            Arc::new(translator),
            "en|pt-BR".to_string(),
        )
    }

    fn idle_app() -> App {
        let mut source = MockAdviceSource::new();
        source.expect_random_advice().never();
        let mut translator = MockTranslator::new();
        translator.expect_translate().never();
        app_with(source, translator)
    }

    async fn run_to_string(app: &App, command: Command) -> String {
        let mut out = Vec::new();
        run(command, true, app, &mut out).await.expect("command");
        String::from_utf8(out).expect("utf8 output")
    }

    #[test]
    fn parses_edit_command() {
        let cli = Cli::parse_from(["advicebook", "edit", "101", "Be kind always"]);
        assert_eq!(
            cli.command,
            Command::Edit {
                id: "101".into(),
                text: "Be kind always".into()
            }
        );
        assert!(!cli.no_translate);
    }

    #[test]
    fn parses_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "advicebook",
            "fetch",
            "--save",
            "--no-translate",
            "--storage",
            "/tmp/x.json",
        ]);
        assert_eq!(cli.command, Command::Fetch { save: true });
        assert!(cli.no_translate);
        assert_eq!(cli.storage, Some(PathBuf::from("/tmp/x.json")));
    }

    fn save(id: &str, text: &str) -> Command {
        Command::Save {
            id: id.into(),
            text: text.into(),
        }
    }

    #[tokio::test]
    async fn save_list_edit_delete_round() {
        let app = idle_app();

        assert_eq!(
            run_to_string(&app, save("101", "Be kind")).await,
            "Saved to favorites\n"
        );
        assert_eq!(
            run_to_string(&app, save("101", "Other")).await,
            "Already in favorites\n"
        );
        assert_eq!(
            run_to_string(&app, Command::List { json: false }).await,
            "[101] Be kind\n"
        );
        assert_eq!(
            run_to_string(
                &app,
                Command::Edit {
                    id: "101".into(),
                    text: "Be kind always".into(),
                }
            )
            .await,
            "Favorite updated\n"
        );
        assert_eq!(
            run_to_string(&app, Command::Show { id: " 101 ".into() }).await,
            "[101] Be kind always\n"
        );
        assert_eq!(
            run_to_string(&app, Command::Delete { id: "101".into() }).await,
            "Favorite removed\n"
        );
        assert_eq!(
            run_to_string(&app, Command::List { json: false }).await,
            "No favorites saved.\n"
        );
    }

    #[tokio::test]
    async fn invalid_id_is_reported() {
        let app = idle_app();
        let output = run_to_string(&app, save("undefined", "x")).await;
        assert!(output.starts_with("Not saved:"), "got {output:?}");
    }

    #[tokio::test]
    async fn fetch_and_save_stores_translated_text() {
        let mut source = MockAdviceSource::new();
        source.expect_random_advice().returning(|| {
            Ok(FetchedAdvice {
                id: RawAdviceId::from(117_u64),
                text: "Be kind".to_string(),
            })
        });
        let mut translator = MockTranslator::new();
        translator
            .expect_translate()
            .returning(|_, _| Ok("Seja gentil".to_string()));
        let app = app_with(source, translator);

        let output = run_to_string(&app, Command::Fetch { save: true }).await;
        assert_eq!(output, "[117] Seja gentil\nSaved to favorites\n");

        let favorites = app.favorites.list().await;
        assert_eq!(favorites.len(), 1);
        assert_eq!(favorites[0].text(), "Seja gentil");
    }

    #[tokio::test]
    async fn fetch_failure_is_an_error() {
        let mut source = MockAdviceSource::new();
        source
            .expect_random_advice()
            .returning(|| Err(ExternalError::RequestFailed("offline".into())));
        let app = app_with(source, MockTranslator::new());

        let mut out = Vec::new();
        assert!(run(Command::Fetch { save: false }, true, &app, &mut out)
            .await
            .is_err());
    }
}
