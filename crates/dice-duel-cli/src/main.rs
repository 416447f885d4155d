//! Fair dice duel in the terminal.
//!
//! Usage: dice-duel 2,2,4,4,9,9 6,8,1,1,8,6 7,5,3,7,5,3

mod console;

use clap::Parser;
use console::{ConsoleInput, ConsoleReporter};
use dice_duel_core::{DiceSet, DuelConfig, DuelEngine, Entropy, SystemEntropy, Transcript};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tokio::io::AsyncRead;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

const USAGE_EXAMPLE: &str = "dice-duel 2,2,4,4,9,9 6,8,1,1,8,6 7,5,3,7,5,3";

#[derive(Debug, Parser)]
#[command(name = "dice-duel", version, about = "Provably fair dice duel against the computer")]
struct Args {
    /// Dice, each a comma-separated list of face values
    #[arg(allow_hyphen_values = true)]
    dice: Vec<String>,

    /// Faces per die
    #[arg(long, env = "DICE_DUEL_FACES", default_value_t = 6)]
    faces: usize,

    /// Length in bytes of each HMAC key
    #[arg(long, env = "DICE_DUEL_KEY_LEN", default_value_t = 32)]
    key_len: usize,

    /// Write the disclosed commitments as JSON to this file
    #[arg(long)]
    transcript: Option<PathBuf>,
}

impl Args {
    fn config(&self) -> DuelConfig {
        DuelConfig {
            faces: self.faces,
            key_len: self.key_len,
            ..DuelConfig::default()
        }
    }
}

async fn write_transcript(path: &Path, transcript: &Transcript) -> Result<(), String> {
    let json = transcript.to_json_pretty().map_err(|e| e.to_string())?;
    tokio::fs::write(path, json)
        .await
        .map_err(|e| format!("{}: {}", path.display(), e))
}

/// How a run ended, mapped onto the process exit status
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Exit {
    Success,
    /// Cancelled or invalid input
    Aborted,
    /// Bad dice or configuration
    Usage,
    Failure,
}

impl Exit {
    fn code(self) -> u8 {
        match self {
            Exit::Success => 0,
            Exit::Aborted => 1,
            Exit::Usage => 2,
            Exit::Failure => 3,
        }
    }
}

impl From<Exit> for ExitCode {
    fn from(exit: Exit) -> Self {
        ExitCode::from(exit.code())
    }
}

async fn run_duel<E, R>(args: &Args, entropy: E, reader: R) -> Exit
where
    E: Entropy + Send,
    R: AsyncRead + Unpin + Send,
{
    let config = args.config();
    if let Err(err) = config.validate() {
        eprintln!("Error: {}", err);
        return Exit::Usage;
    }

    let dice = match DiceSet::validate(&args.dice[..], &config) {
        Ok(dice) => dice,
        Err(err) => {
            eprintln!("Error: {}", err);
            eprintln!("Example: {}", USAGE_EXAMPLE);
            return Exit::Usage;
        }
    };

    let mut engine = match DuelEngine::with_entropy(dice.clone(), config, entropy) {
        Ok(engine) => engine,
        Err(err) => {
            eprintln!("Error: {}", err);
            return Exit::Usage;
        }
    };
    info!(duel_id = %engine.id(), "starting duel");

    println!("Welcome to the fair dice duel!");
    let mut input = ConsoleInput::new(reader, dice.clone());
    let mut reporter = ConsoleReporter::default();
    let result = engine.run(&mut input, &mut reporter).await;

    if let Some(path) = &args.transcript {
        if let Err(err) = write_transcript(path, engine.transcript()).await {
            error!(error = %err, "failed to write transcript");
            eprintln!("Error: could not write transcript: {}", err);
        }
    }

    match result {
        Ok(_) => {
            println!();
            println!("{}", console::help_text(&dice));
            Exit::Success
        }
        Err(err) if err.is_abort() => {
            println!("{}", err);
            Exit::Aborted
        }
        Err(err) => {
            error!(error = %err, "duel failed");
            eprintln!("Error: {}", err);
            Exit::Failure
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let args = Args::parse();
    run_duel(&args, SystemEntropy::os(), tokio::io::stdin())
        .await
        .into()
}
