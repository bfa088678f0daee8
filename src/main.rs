use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use reelcull::app::App;
use reelcull::models::{ClipDirs, Discovery, Model, discover};
use reelcull::player::create_player;
use reelcull::storage::{ConfigStorage, TomlConfigStorage, ensure_directories};
use reelcull::ui::Theme;
use reelcull::{logging, session};

#[derive(Parser)]
#[command(name = "reelcull")]
#[command(
    about = "Quickly check converted footage and remove bad clips",
    long_about = None
)]
struct Cli {
    /// Directory with the raw .MTS recordings, or its preview directory (ending in _s)
    dir: PathBuf,

    /// Review only; deletion marks are disabled
    #[arg(short, long)]
    read_only: bool,

    /// Print the clip pairings and exit without starting the TUI
    #[arg(long)]
    list: bool,

    /// Config file to use instead of ~/.config/reelcull/reelcull.toml
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.list {
        env_logger::init();
        return cmd_list(&cli);
    }

    cmd_review(&cli)
}

/// Print discovery problems to stderr
fn report_problems(discovery: &Discovery) {
    for line in discovery.problems() {
        eprintln!("{}", line);
    }
}

/// Print clip pairings without entering the TUI
fn cmd_list(cli: &Cli) -> Result<()> {
    let dirs = ClipDirs::from_argument(&cli.dir);
    let discovery = discover(&dirs);
    report_problems(&discovery);

    if discovery.clips.is_empty() {
        println!("Could not find any clips.");
        return Ok(());
    }

    for clip in &discovery.clips {
        println!(
            "preview: {}, raw: {}",
            clip.preview_path.display(),
            clip.raw_path.display()
        );
    }

    Ok(())
}

/// Run the interactive review session
fn cmd_review(cli: &Cli) -> Result<()> {
    let dirs = ensure_directories()?;

    let config_path = cli.config.clone().unwrap_or_else(|| dirs.config_file());
    let config = TomlConfigStorage::new(config_path).load()?;

    logging::init_logger(&dirs.log_file(), &config.general.log_level)?;
    log::info!("Starting review of {:?} (read-only: {})", cli.dir, cli.read_only);

    let theme = Theme::from_config(&config.theme).context("Invalid theme configuration")?;

    let clip_dirs = ClipDirs::from_argument(&cli.dir);
    let discovery = discover(&clip_dirs);
    report_problems(&discovery);

    if discovery.clips.is_empty() {
        println!("Could not find any clips.");
        return Ok(());
    }

    let model = Model::new(discovery.clips, clip_dirs.raw, clip_dirs.preview, cli.read_only);
    let player = create_player(&config.player);
    let mut app = App::new(model, player, theme);

    session::run(
        &mut app,
        Duration::from_millis(config.general.poll_interval_ms),
    )?;

    println!("{} clip(s) remaining.", app.model.len());
    Ok(())
}
