//! Interactive terminal front end for the todo list.
//!
//! Reads commands from stdin, sends them to the store, and re-renders the
//! list whenever the store reports a change.

use tokio::io::BufReader;
use todo::view;
use todo::{TodoConfig, TodoReducer, TodoStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let config = TodoConfig::from_env();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!(?config, "Starting todo");

    let store: TodoStore = TodoStore::with_capacity(
        config.initial_state(),
        TodoReducer::new(),
        config.environment(),
        config.broadcast_capacity,
    );

    let input = BufReader::new(tokio::io::stdin());
    let mut output = tokio::io::stdout();
    view::run(&store, input, &mut output).await?;

    store.shutdown();
    tracing::info!("Bye");
    Ok(())
}
