//! Interactive todo list.
//!
//! Reads one command per line from stdin. A background task redraws the list
//! whenever the store publishes a new snapshot.

use anyhow::Context;
use todo_app::cli::{Command, Outcome, ParseError, Session};
use todo_app::{App, AppConfig, Renderer, Theme};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let config = AppConfig::from_env();

    // Initialize tracing; logs go to stderr so they don't interleave with the list
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.log_filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!(theme = %config.theme, seed = config.seed, "Configuration loaded");

    let renderer = Renderer::new(Theme::preset(config.theme), config.color);
    let app = App::new(&config);

    // Redraw on every published version
    let mut snapshots = app.subscribe();
    let redraw = tokio::spawn(async move {
        while snapshots.changed().await.is_ok() {
            let snapshot = snapshots.borrow_and_update().clone();
            print!("{}", renderer.render(&snapshot));
        }
    });

    let mut session = Session::new(app.clone(), renderer);
    println!("{}", session.render());
    println!("{}", todo_app::cli::HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(ParseError::Empty) => continue,
            Err(error) => {
                println!("error: {error}");
                continue;
            },
        };

        match session.execute(command).await {
            Ok(Outcome::Reply(reply)) => println!("{reply}"),
            Ok(Outcome::Quit) => break,
            Err(error) => {
                warn!(%error, "Command failed");
                println!("error: {error}");
            },
        }
    }

    info!("Shutting down");
    redraw.abort();
    app.shutdown().await;

    Ok(())
}
