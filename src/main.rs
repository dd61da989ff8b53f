use std::fs::File;
use std::io::{stdout, BufWriter};
use std::path::PathBuf;
use std::sync::mpsc;
use std::sync::Mutex;
use std::thread;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    cursor,
    event::{self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    terminal, ExecutableCommand,
};
use tracing::{info, warn, Level};

use space_invaders::config::GameConfig;
use space_invaders::director::{SceneDirector, SystemClock};
use space_invaders::display::Terminal;
use space_invaders::input::TerminalInput;

/// Space Invaders in the terminal.
#[derive(Parser, Debug)]
#[command(name = "space_invaders")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// RON configuration file; flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Playfield width in cells
    #[arg(long)]
    width: Option<u16>,

    /// Playfield height in cells
    #[arg(long)]
    height: Option<u16>,

    /// Starting player energy
    #[arg(long)]
    energy: Option<u32>,

    /// Enemy formation rows
    #[arg(long)]
    rows: Option<u16>,

    /// Enemy formation columns
    #[arg(long)]
    cols: Option<u16>,

    /// Simulation ticks per second
    #[arg(long)]
    tick_rate: Option<u32>,

    /// Waves to clear for a win (0 = endless)
    #[arg(long)]
    waves: Option<u32>,

    /// Seed for enemy return fire
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file (the terminal is taken by the game)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn apply_overrides(&self, config: &mut GameConfig) {
        if let Some(v) = self.width {
            config.playfield_width = v;
        }
        if let Some(v) = self.height {
            config.playfield_height = v;
        }
        if let Some(v) = self.energy {
            config.player_start_energy = v;
        }
        if let Some(v) = self.rows {
            config.enemy_rows = v;
        }
        if let Some(v) = self.cols {
            config.enemy_cols = v;
        }
        if let Some(v) = self.tick_rate {
            config.tick_rate = v;
        }
        if let Some(v) = self.waves {
            config.waves_to_win = v;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
    }
}

fn init_logging(cli: &Cli) -> anyhow::Result<()> {
    let Some(path) = &cli.log_file else {
        return Ok(());
    };
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let mut config = match &cli.config {
        Some(path) => GameConfig::load_from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => GameConfig::default(),
    };
    cli.apply_overrides(&mut config);
    for warning in config.validate().context("invalid configuration")? {
        warn!(%warning, "config");
    }

    // HUD row above the playfield, status row below it.
    let out = BufWriter::new(stdout());
    let surface = Terminal::new(
        out,
        config.playfield_width,
        config.playfield_height.saturating_add(2),
    );
    // Assets load here, before the terminal is touched.
    let mut director = SceneDirector::new(config, surface).context("starting game")?;

    let mut term = stdout();
    terminal::enable_raw_mode()?;
    term.execute(terminal::EnterAlternateScreen)?;
    term.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = term
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let mut input = TerminalInput::new(rx);
    let result = director.run(&mut input, &mut SystemClock);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = term.execute(PopKeyboardEnhancementFlags);
    }
    let _ = term.execute(cursor::Show);
    let _ = term.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result.context("game loop failed")?;
    info!("bye");
    Ok(())
}
