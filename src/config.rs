use std::fs;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use uuid::Uuid;

use crate::core::{RaioXInput, default_raiox_input};
use crate::error::ValidationError;

pub const DEFAULT_STORE_PATH: &str = "raiox-snapshots.json";
pub const DEFAULT_LOG_FILTER: &str = "raiox=info";

#[derive(Debug, Parser)]
#[command(
    name = "raiox",
    about = "Raio-X Financeiro: financial health score, FIRE target and growth projections"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the JSON API.
    Serve(ServeArgs),
    /// Print the diagnostic for an input file (or the default input) as JSON.
    Summary {
        #[arg(long, help = "JSON file with a RaioXInput; defaults to the built-in baseline")]
        input: Option<PathBuf>,
    },
    /// Inspect or change the saved snapshot history.
    Snapshots {
        #[command(flatten)]
        store: StoreArgs,
        #[command(subcommand)]
        action: SnapshotAction,
    },
}

#[derive(Debug, Args)]
pub struct StoreArgs {
    #[arg(
        long = "store",
        env = "RAIOX_STORE",
        default_value = DEFAULT_STORE_PATH,
        help = "JSON file holding the snapshot history"
    )]
    pub path: PathBuf,
}

#[derive(Debug, Args)]
pub struct ServeArgs {
    #[arg(long, env = "RAIOX_HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,
    #[arg(long, env = "RAIOX_PORT", default_value_t = 8080)]
    pub port: u16,
    #[command(flatten)]
    pub store: StoreArgs,
}

impl ServeArgs {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[derive(Debug, Subcommand)]
pub enum SnapshotAction {
    /// List snapshots, most recent first.
    List,
    /// Build the diagnostic for an input and save it.
    Save {
        #[arg(long)]
        input: Option<PathBuf>,
    },
    /// Delete a snapshot by id.
    Delete { id: Uuid },
    /// Print the input stored under an id.
    Load { id: Uuid },
    /// Show scores with the change against the previous snapshot.
    Trend,
}

/// Reads a JSON input file, or returns the default input when no path is given.
pub fn load_input(path: Option<&Path>) -> Result<RaioXInput, String> {
    let Some(path) = path else {
        return Ok(default_raiox_input());
    };
    let raw = fs::read_to_string(path)
        .map_err(|e| format!("Reading input file {}: {e}", path.display()))?;
    RaioXInput::from_json(&raw).map_err(|e: ValidationError| format!("{}: {e}", path.display()))
}
