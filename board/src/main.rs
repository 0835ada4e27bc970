//! Terminal front end for the todo board.
//!
//! Reads one command per line from stdin and prints the board after every
//! change, including changes made by timers (toast auto-close, overlay end).
//! Logs go to stderr so they do not interleave with the board.

use std::sync::Arc;
use std::time::Duration;
use todo_board::command::{self, Command, HELP};
use todo_board::render::render;
use todo_board::{
    BoardAction, BoardEnvironment, BoardReducer, BoardState, Config, FileStorage, Theme,
    TodoRepository, project,
};
use todo_board_core::environment::SystemClock;
use todo_board_runtime::{Store, StoreError};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

type BoardStore = Store<BoardState, BoardAction, BoardEnvironment, BoardReducer>;

/// How long to wait for pending timers on exit
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(1);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env();
    init_tracing(&config.log_level);
    config.validate()?;

    tracing::info!(
        data_dir = %config.storage.data_dir.display(),
        key = %config.storage.key,
        "Starting todo board"
    );

    let storage = Arc::new(FileStorage::open(&config.storage.data_dir)?);
    let repository = TodoRepository::new(storage, config.storage.key.clone());
    let state = BoardState::with_todos(repository.load());

    let env = BoardEnvironment::new(Arc::new(SystemClock), repository, config.timings);
    let store = Store::new(state, BoardReducer::new(), env);
    let theme = Theme::default();

    print_board(&store, &theme).await;
    run(&store, &theme).await?;

    match store.shutdown(SHUTDOWN_TIMEOUT).await {
        Ok(()) => {},
        Err(StoreError::ShutdownTimeout(pending)) => {
            tracing::info!(pending, "Exiting with timers still running");
        },
        Err(error) => return Err(error.into()),
    }

    Ok(())
}

fn init_tracing(level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("todo_board={level},todo_board_runtime={level}").into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

/// Command loop; returns on `quit`, end of input or Ctrl-C
async fn run(store: &BoardStore, theme: &Theme) -> Result<(), Box<dyn std::error::Error>> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut timer_actions = store.subscribe_actions();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    tracing::debug!("End of input");
                    return Ok(());
                };

                match command::parse(&line) {
                    Ok(Command::Dispatch(action)) => {
                        store.send(action).await?;
                        print_board(store, theme).await;
                    },
                    Ok(Command::Show) => print_board(store, theme).await,
                    Ok(Command::Help) => println!("{HELP}"),
                    Ok(Command::Quit) => return Ok(()),
                    Err(command::CommandError::Empty) => {},
                    Err(error) => eprintln!("{error} (type `help` for commands)"),
                }
            },
            action = timer_actions.recv() => match action {
                Ok(action) => {
                    tracing::debug!(?action, "Timer fired");
                    print_board(store, theme).await;
                },
                Err(RecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "Missed timer notifications");
                    print_board(store, theme).await;
                },
                Err(RecvError::Closed) => return Ok(()),
            },
            signal = tokio::signal::ctrl_c() => {
                signal?;
                tracing::info!("Interrupted");
                return Ok(());
            },
        }
    }
}

async fn print_board(store: &BoardStore, theme: &Theme) {
    let view = store.state(|state| project(state, theme)).await;
    println!("{}", render(&view));
}
