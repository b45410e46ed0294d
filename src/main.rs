use std::error::Error;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use raiox::config::{Cli, Command, DEFAULT_LOG_FILTER, SnapshotAction, load_input};
use raiox::core::build_raiox_summary;
use raiox::store::{JsonFileBackend, SnapshotStore};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(Cli::parse()).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    match cli.command {
        Command::Serve(args) => {
            let store = Arc::new(SnapshotStore::new(Arc::new(JsonFileBackend::new(
                &args.store.path,
            ))));
            raiox::api::run_http_server(args.addr(), store).await?;
        }
        Command::Summary { input } => {
            let input = load_input(input.as_deref())?;
            let summary = build_raiox_summary(&input)?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Command::Snapshots { store, action } => {
            let store = SnapshotStore::new(Arc::new(JsonFileBackend::new(&store.path)));
            match action {
                SnapshotAction::List => {
                    println!("{}", serde_json::to_string_pretty(&store.list_snapshots())?);
                }
                SnapshotAction::Save { input } => {
                    let input = load_input(input.as_deref())?;
                    let summary = build_raiox_summary(&input)?;
                    let snapshot = store.save_snapshot(&input, &summary)?;
                    println!("{}", snapshot.id);
                }
                SnapshotAction::Delete { id } => store.delete_snapshot(id),
                SnapshotAction::Load { id } => match store.load_snapshot(id) {
                    Some(input) => println!("{}", serde_json::to_string_pretty(&input)?),
                    None => return Err(format!("snapshot {id} not found").into()),
                },
                SnapshotAction::Trend => {
                    println!("{}", serde_json::to_string_pretty(&store.score_trend())?);
                }
            }
        }
    }
    Ok(())
}
