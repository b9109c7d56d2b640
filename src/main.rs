use std::io::{self, stdout, Stdout};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use clap::{Parser, Subcommand};
use crossbeam_channel::{Receiver, TryRecvError};
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::{backend::CrosstermBackend, Terminal};

use datenum::app::LogicThread;
use datenum::bindings::Localizer;
use datenum::clock::{Clock, FixedClock, SystemClock};
use datenum::config::Config;
use datenum::headless::{self, ShowRequest};
use datenum::render::RenderState;
use datenum::{dlog, dlog_error, locale, ui, Error, Result};

const FRAME_DURATION: Duration = Duration::from_micros(16_666); // 60fps

/// Datenum - live localized dates and exact division in the terminal
#[derive(Parser, Debug)]
#[command(name = "datenum")]
#[command(version, about, long_about = None)]
#[command(
    after_help = "ENVIRONMENT:\n    DATENUM_DEBUG=1     Enable debug logging (alternative to --debug)\n    LC_ALL, LC_MESSAGES, LANG\n                        Locale when neither --locale nor the config sets one"
)]
pub struct Cli {
    /// Enable debug logging (writes to ~/.datenum/datenum.log)
    #[arg(short = 'd', long, global = true)]
    pub debug: bool,

    /// Locale tag, e.g. en-US, fr-FR, de-DE
    #[arg(short = 'l', long, global = true)]
    pub locale: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Evaluate the form once and print the results (no TUI)
    Show {
        /// Days from today
        #[arg(long)]
        offset: Option<String>,

        #[arg(long)]
        dividend: Option<String>,

        #[arg(long)]
        divisor: Option<String>,

        /// Evaluate at this RFC 3339 instant instead of now
        #[arg(long)]
        at: Option<String>,

        /// Print JSON instead of labeled lines
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    datenum::log::init(cli.debug);

    let config = Config::load()?;
    let requested = cli.locale.as_deref().or(config.locale.as_deref());
    let profile = locale::resolve(requested);
    let l10n = Localizer::load(profile, config.messages_dir().as_deref())?;

    if let Some(Command::Show {
        offset,
        dividend,
        divisor,
        at,
        json,
    }) = cli.command
    {
        let request = ShowRequest {
            date_offset: offset,
            dividend,
            divisor,
        };
        return run_show(&request, at.as_deref(), json, &l10n);
    }

    if cli.debug {
        dlog!("Datenum starting (debug mode enabled), locale {}", profile.tag());
    } else {
        dlog!("Datenum starting, locale {}", profile.tag());
    }

    let l10n = Arc::new(l10n);
    let shutdown = Arc::new(AtomicBool::new(false));
    let (state_tx, state_rx) = crossbeam_channel::bounded::<RenderState>(1);

    let shutdown_clone = shutdown.clone();
    let logic_handle =
        thread::spawn(move || LogicThread::run(config, l10n, state_tx, shutdown_clone));

    let mut terminal = setup_terminal()?;
    let result = render_loop(&mut terminal, state_rx, &shutdown);

    shutdown.store(true, Ordering::SeqCst);
    let logic_result = logic_handle
        .join()
        .map_err(|_| Error::TaskJoin("logic thread panicked".to_string()));
    restore_terminal(&mut terminal)?;

    if let Err(e) = &result {
        dlog_error!("Render loop failed: {}", e);
    }
    result?;
    logic_result??;
    dlog!("Datenum exiting");
    Ok(())
}

fn run_show(request: &ShowRequest, at: Option<&str>, json: bool, l10n: &Localizer) -> Result<()> {
    dlog!("Show command: {:?}, at={:?}, json={}", request, at, json);

    let clock: Box<dyn Clock> = match at {
        Some(at) => Box::new(FixedClock::parse(at)?),
        None => Box::new(SystemClock),
    };
    let report = headless::evaluate(request, clock.as_ref(), l10n)?;

    if json {
        println!("{}", report.to_json()?);
    } else {
        for line in report.to_lines(l10n) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn render_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    state_rx: Receiver<RenderState>,
    shutdown: &AtomicBool,
) -> Result<()> {
    let mut state = RenderState::default();
    let mut last_version: u64 = 0;
    let mut last_frame = Instant::now();
    let mut dirty = true;

    loop {
        if shutdown.load(Ordering::Relaxed) {
            break;
        }

        match state_rx.try_recv() {
            Ok(s) => {
                dirty = dirty || s.version != last_version;
                state = s;
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => break,
        }

        if last_frame.elapsed() < FRAME_DURATION {
            thread::sleep(Duration::from_micros(500));
            continue;
        }
        last_frame = Instant::now();

        if dirty {
            terminal.draw(|f| ui::draw(f, &state))?;
            last_version = state.version;
            dirty = false;
        }
    }
    Ok(())
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen, EnableBracketedPaste)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    terminal.hide_cursor()?;
    terminal.clear()?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    terminal.show_cursor()?;
    execute!(io::stdout(), DisableBracketedPaste, LeaveAlternateScreen)?;
    Ok(disable_raw_mode()?)
}
