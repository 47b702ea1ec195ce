use anyhow::Context as _;
use clap::{ArgAction, Parser};
use goalpost_cli::commands::{Command, Context, execute};
use goalpost_cli::config::Config;
use goalpost_cli::store::FileStore;
use goalpost_core::Board;
use std::io;
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser, Debug)]
#[command(name = "goalpost", version, about = "Tasks with deadlines and annual goals")]
struct Cli {
    /// Directory holding the task and goal files
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(level)
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    init_logging(args.verbose);

    let mut config = Config::load().context("cannot load configuration")?;
    if let Some(data_dir) = args.data_dir {
        config.data_dir = data_dir;
    }

    let store = FileStore::new(&config.data_dir);
    let mut board = Board::open(store)
        .with_context(|| format!("cannot read data in {}", config.data_dir.display()))?;

    let mut ctx = Context {
        input: io::stdin().lock(),
        output: io::stdout().lock(),
        now: chrono::Local::now().naive_local(),
        locale: config.locale,
    };
    execute(args.command, &mut board, &mut ctx)
}
