//! Lucky Draw command line
//!
//! Usage:
//!   luckydraw status                          - Awards, quota left, who has won
//!   luckydraw draw --award NAME [-n COUNT]    - Roll names until Enter, then commit
//!   luckydraw winners                         - List committed winners
//!   luckydraw revoke --award NAME --name WHO  - Take back one win
//!   luckydraw reset                           - Archive winners and start over

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use crossbeam_channel::{Receiver, TryRecvError};

use ld_core::Participant;
use ld_engine::{
    DrawAllocator, DrawContext, DrawRequest, DrawSession, IntervalTicker, PoolMode, Stores,
    WinnerLedger,
};
use ld_store::{JsonDataFolder, LotterySettings, SETTINGS_FILE};

#[derive(Parser)]
#[command(name = "luckydraw", about = "Prize raffle draws")]
struct Cli {
    /// Settings file
    #[arg(short, long, default_value = SETTINGS_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show awards, remaining quota and winner counts
    Status,
    /// Run a draw for one award
    Draw {
        /// Award to draw
        #[arg(short, long)]
        award: Option<String>,
        /// Number of winners (defaults to the configured count)
        #[arg(short = 'n', long)]
        count: Option<String>,
        /// Let past winners take part again
        #[arg(long)]
        all: bool,
        /// Seed for a reproducible draw
        #[arg(long)]
        seed: Option<u64>,
        /// Stop after this many ticks instead of waiting for Enter
        #[arg(long)]
        spins: Option<u64>,
    },
    /// List committed winners
    Winners,
    /// Revoke one winner record
    Revoke {
        #[arg(short, long)]
        award: String,
        #[arg(short, long)]
        name: String,
    },
    /// Archive the winner list and clear it
    Reset,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let settings = LotterySettings::load_or_create(&cli.config)
        .with_context(|| format!("Failed to load settings from {}", cli.config.display()))?;
    let ledger = Arc::new(open_ledger(&settings, &cli.config)?);

    match cli.command {
        Commands::Status => {
            println!("{}\n{}", settings.title, ledger.summary());
            Ok(())
        }
        Commands::Draw {
            award,
            count,
            all,
            seed,
            spins,
        } => {
            let count = count.unwrap_or_else(|| settings.default_count.to_string());
            let request = DrawRequest::parse(award.as_deref(), &count)?;
            let mode = if all {
                PoolMode::AllParticipants
            } else {
                PoolMode::NotYetWonOnly
            };
            run_draw(&ledger, &settings, request, mode, seed, spins)
        }
        Commands::Winners => {
            for (i, record) in ledger.winners().iter().enumerate() {
                println!("{:>3}. {}", i + 1, record);
            }
            Ok(())
        }
        Commands::Revoke { award, name } => {
            let removed = ledger.revoke(&award, &name)?;
            println!("Revoked {}", removed);
            Ok(())
        }
        Commands::Reset => {
            ledger.reset()?;
            println!("Draw has been reset");
            Ok(())
        }
    }
}

fn open_ledger(settings: &LotterySettings, config_path: &Path) -> Result<WinnerLedger> {
    let data_dir = settings.data_folder_relative_to(config_path);
    let folder = JsonDataFolder::open(&data_dir)
        .with_context(|| format!("Failed to open data folder {}", data_dir.display()))?;

    log::info!("{}: using data folder {}", settings.software_name, data_dir.display());

    let stores = Stores {
        participants: Box::new(folder.participants()),
        awards: Box::new(folder.awards()),
        winners: Box::new(folder.winners()),
        reserved: Some(Box::new(folder.reserved())),
    };
    Ok(WinnerLedger::open(stores, settings.allow_reserved)?)
}

fn run_draw(
    ledger: &Arc<WinnerLedger>,
    settings: &LotterySettings,
    request: DrawRequest,
    mode: PoolMode,
    seed: Option<u64>,
    spins: Option<u64>,
) -> Result<()> {
    let allocator = seed.map_or_else(DrawAllocator::new, DrawAllocator::with_seed);
    let award = request.award().to_string();
    let mut session =
        DrawSession::new(ledger.clone(), mode, settings.allow_reserved).with_allocator(allocator);

    println!("{}\nDrawing {}", settings.title, award);
    show_batch(session.start(request)?);

    let enter = match spins {
        Some(_) => None,
        None => {
            println!("(press Enter to stop)");
            Some(spawn_enter_listener())
        }
    };

    let mut ticker = IntervalTicker::new(settings.display_interval());
    let committed = session.run_until(
        &mut ticker,
        |ctx: &DrawContext| show_batch(&ctx.last_sampled_batch),
        |ctx: &DrawContext| match (spins, &enter) {
            (Some(limit), _) => ctx.ticks >= limit,
            (None, Some(rx)) => !matches!(rx.try_recv(), Err(TryRecvError::Empty)),
            (None, None) => true,
        },
    );
    println!();

    let committed = committed?;
    let names: Vec<&str> = committed.iter().map(|w| w.participant.as_str()).collect();
    println!("Congratulations {} on winning {}!", names.join(", "), award);
    println!("{}", ledger.summary());
    Ok(())
}

fn show_batch(batch: &[Participant]) {
    let names: Vec<&str> = batch.iter().map(|p| p.name.as_str()).collect();
    print!("\r{:<72}", names.join(", "));
    let _ = io::stdout().flush();
}

/// Fires once when a line (or EOF) arrives on stdin
fn spawn_enter_listener() -> Receiver<()> {
    let (tx, rx) = crossbeam_channel::bounded(1);
    thread::spawn(move || {
        let mut line = String::new();
        let _ = io::stdin().lock().read_line(&mut line);
        let _ = tx.send(());
    });
    rx
}
