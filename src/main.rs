use std::sync::Arc;

use clap::Parser;
use session_shell::command::{self, Command, USAGE};
use session_shell::config::{DEFAULT_SESSION_DB_URL, StorageConfig};
use session_shell::router::SessionRouter;
use session_shell::session::SessionStore;
use session_shell::storage::{SqliteStorage, StorageError};
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Debug, thiserror::Error)]
enum ShellError {
    #[error("failed to open session storage: {0}")]
    Storage(#[from] StorageError),
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Parser, Debug)]
#[command(name = "session-shell", about = "Session-gated navigation shell")]
struct Cli {
    /// SQLite URL of the device slot store.
    #[arg(long, env = "SESSION_DB_URL", default_value = DEFAULT_SESSION_DB_URL)]
    db_url: String,
}

#[tokio::main]
async fn main() {
    let dotenv = dotenvy::dotenv();
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    if let Err(e) = dotenv {
        tracing::debug!(error = %e, "no .env loaded");
    }

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), ShellError> {
    let storage = SqliteStorage::open(&StorageConfig::with_url(cli.db_url)).await?;
    let store = SessionStore::new(Arc::new(storage.clone()));
    let mut router = SessionRouter::attach(&store);

    print_state(&store, &mut router);
    store.initialize().await;
    print_state(&store, &mut router);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match command::parse(&line) {
            Ok(None) => {}
            Ok(Some(Command::Quit)) => break,
            Ok(Some(cmd)) => apply(cmd, &store, &mut router).await,
            Err(e) => println!("error: {e}"),
        }
    }

    store.flush().await;
    storage.close().await;
    Ok(())
}

async fn apply(cmd: Command, store: &SessionStore, router: &mut SessionRouter) {
    match cmd {
        Command::SetToken(token) => store.set_token(token),
        Command::SetUser(user) => store.set_user(user),
        Command::Logout => store.logout().await,
        Command::Go(screen) => {
            if let Err(e) = router.navigate(screen) {
                println!("error: {e}");
                return;
            }
        }
        Command::Back => {
            if !router.go_back() {
                println!("already at the first screen");
            }
        }
        Command::Help => {
            println!("{USAGE}");
            return;
        }
        Command::Show | Command::Quit => {}
    }
    print_state(store, router);
}

fn print_state(store: &SessionStore, router: &mut SessionRouter) {
    let route = router.route();
    let stack = router
        .stack()
        .iter()
        .map(|s| s.name())
        .collect::<Vec<_>>()
        .join(" > ");
    let screen = match router.current() {
        Some(screen) => match screen.options().title {
            Some(title) if screen.options().header_shown => format!("{screen} [{title}]"),
            _ => screen.to_string(),
        },
        None => "(waiting)".to_owned(),
    };
    let user = store
        .user()
        .map_or_else(|| "-".to_owned(), |u| format!("{} ({})", u.display_name, u.phone_number));
    println!("route: {route}  screen: {screen}  stack: [{stack}]  user: {user}");
}
