use std::fs::File;
use std::io;
use std::io::Write;
use std::sync::Mutex;
use std::time::Duration;
use std::time::Instant;

use anyhow::Context;
use anyhow::bail;
use clap::Parser;
use crossterm::cursor;
use crossterm::event;
use crossterm::execute;
use crossterm::terminal;
use tracing::info;
use tracing_subscriber::EnvFilter;

use lifeview::config::Args;
use lifeview::config::Config;
use lifeview::controls::Action;
use lifeview::scheduler::FrameOutcome;
use lifeview::session::Session;
use lifeview::surface::Raster;
use lifeview::surface::Surface;
use lifeview::terminal::Input;
use lifeview::terminal::TerminalControls;
use lifeview::terminal::TerminalHost;
use lifeview::universe::Universe;

const FRAMERATE: u32 = 60;
const FRAMETIME: Duration = Duration::from_micros(1_000_000 / FRAMERATE as u64);

/// The surface is drawn from the top left corner of the screen.
const ORIGIN: (u16, u16) = (0, 0);

type TerminalSession = Session<Universe, Raster, TerminalControls>;

fn setup_logging(args: &Args) -> anyhow::Result<()> {
    let path = args
        .log_file
        .clone()
        .unwrap_or_else(|| std::env::temp_dir().join("lifeview.log"));

    let file = File::create(&path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

fn setup_session(config: &Config) -> anyhow::Result<TerminalSession> {
    let mut universe = if config.dims.width == 32 && config.dims.height == 32 {
        Universe::new()
    } else {
        Universe::with_size(config.dims.width, config.dims.height)?
    };

    if let Some(seed) = config.seed {
        universe = universe.with_seed(seed);
    }

    let (w, h) = config.geometry.surface_size(config.dims);

    let session = Session::new(
        universe,
        Raster::new(w, h),
        config.geometry,
        config.tick_interval,
        TerminalControls::default(),
    )?;

    Ok(session)
}

fn repaint<W: Write>(out: &mut W, session: &TerminalSession, config: &Config) -> io::Result<()> {
    let (_, rows) = lifeview::terminal::displayed_size(
        session.surface().width(),
        session.surface().height(),
    );

    lifeview::terminal::blit(out, session.surface(), ORIGIN)?;
    lifeview::terminal::status_line(
        out,
        ORIGIN.1 + rows,
        session.controls(),
        session.generation(),
        &config.keymap,
    )?;

    out.flush()
}

fn run_loop<W: Write>(
    out: &mut W,
    session: &mut TerminalSession,
    config: &Config,
) -> anyhow::Result<()> {
    let mut host = TerminalHost::default();
    let bbox = lifeview::terminal::bounding_box(ORIGIN, session.surface());
    let start = Instant::now();

    if config.autoplay {
        session.play(&mut host);
    }

    repaint(out, session, config)?;

    loop {
        let mut dirty = false;

        if event::poll(FRAMETIME)? {
            let input = lifeview::terminal::convert_event(event::read()?, &config.keymap);

            match input {
                None => {}
                Some(Input::Action(Action::Quit)) => break,
                Some(Input::Action(Action::TogglePlayback)) => {
                    session.toggle_playback(&mut host);
                    dirty = true;
                }
                Some(Input::Action(Action::Randomize)) => {
                    session.randomize()?;
                    dirty = true;
                }
                Some(Input::Action(Action::Clear)) => {
                    session.clear()?;
                    dirty = true;
                }
                Some(Input::Pointer(pointer)) => {
                    session.on_pointer(&pointer, &bbox)?;
                    dirty = true;
                }
                Some(Input::Repaint) => {
                    execute!(out, terminal::Clear(terminal::ClearType::All))?;
                    dirty = true;
                }
            }
        }

        if let Some(handle) = host.take_armed() {
            let timestamp = start.elapsed().as_secs_f64() * 1000.0;
            let outcome = session.on_frame(handle, timestamp, &mut host)?;

            dirty |= outcome == FrameOutcome::Tick;
        }

        if dirty {
            repaint(out, session, config)?;
        }
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    setup_logging(&args)?;

    let config = Config::from_args(&args).context("Invalid configuration")?;

    let (w, h) = config.geometry.surface_size(config.dims);
    let (need_cols, need_rows) = lifeview::terminal::displayed_size(w, h);
    let (cols, rows) = terminal::size()?;

    // +1 for the status line
    let need_rows = need_rows.saturating_add(1);
    if cols < need_cols || rows < need_rows {
        bail!(
            "Terminal too small: need {}x{}, have {}x{}. Try a smaller --cell-size or grid.",
            need_cols,
            need_rows,
            cols,
            rows,
        );
    }

    let mut session = setup_session(&config).context("Failed to set up the grid")?;

    info!("Starting with {config:?}");

    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    execute!(
        stdout,
        terminal::EnterAlternateScreen,
        event::EnableMouseCapture,
        cursor::Hide,
        terminal::Clear(terminal::ClearType::All),
    )?;

    let result = run_loop(&mut stdout, &mut session, &config);

    // Always restore the terminal, even if the loop failed
    let _ = execute!(
        stdout,
        cursor::Show,
        event::DisableMouseCapture,
        terminal::LeaveAlternateScreen
    );
    let _ = terminal::disable_raw_mode();

    result
}
