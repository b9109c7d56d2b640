use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::Sender;
use crossterm::event::{self, Event, KeyEventKind};
use tokio::runtime::Runtime;
use tokio::sync::mpsc;

use crate::actors::ClockActor;
use crate::bindings::Localizer;
use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::render::RenderState;
use crate::tea::{update, Command, Message, Model};
use crate::{dlog, dlog_debug, Result};

const MAX_BG_MESSAGES: usize = 50;

/// Owns the model and the clock actor; feeds it terminal events and ticks.
pub struct LogicThread;

impl LogicThread {
    pub fn run(
        config: Config,
        l10n: Arc<Localizer>,
        state_tx: Sender<RenderState>,
        shutdown: Arc<AtomicBool>,
    ) -> Result<()> {
        Runtime::new()?.block_on(Self::run_async(config, l10n, state_tx, shutdown))
    }

    async fn run_async(
        config: Config,
        l10n: Arc<Localizer>,
        state_tx: Sender<RenderState>,
        shutdown: Arc<AtomicBool>,
    ) -> Result<()> {
        dlog_debug!(
            "LogicThread::run_async locale={} tick_interval={:?}",
            l10n.profile().tag(),
            config.tick_interval()
        );
        let mut model = Model::new(l10n);

        let (msg_tx, mut msg_rx) = mpsc::unbounded_channel::<Message>();
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let mut clock_actor =
            ClockActor::new(msg_tx.clone(), clock).with_interval(config.tick_interval());

        send_state(&state_tx, &model);

        loop {
            if shutdown.load(Ordering::Relaxed) {
                break;
            }

            // Terminal input (priority)
            while event::poll(Duration::ZERO)? {
                let msg = match event::read()? {
                    Event::Key(key) if key.kind != KeyEventKind::Release => Message::Key(key),
                    Event::Paste(text) => Message::Paste(text),
                    Event::Resize(w, h) => Message::Resize(w, h),
                    _ => continue,
                };
                if apply(&mut model, msg, &mut clock_actor) {
                    shutdown.store(true, Ordering::Relaxed);
                    clock_actor.stop();
                    return Ok(());
                }
                if model.dirty {
                    send_state(&state_tx, &model);
                    model.dirty = false;
                }
            }

            // Clock ticks (bounded)
            for _ in 0..MAX_BG_MESSAGES {
                let Ok(msg) = msg_rx.try_recv() else { break };
                if apply(&mut model, msg, &mut clock_actor) {
                    shutdown.store(true, Ordering::Relaxed);
                    clock_actor.stop();
                    return Ok(());
                }
            }

            if model.dirty {
                send_state(&state_tx, &model);
                model.dirty = false;
            }

            tokio::time::sleep(Duration::from_micros(500)).await;
        }

        clock_actor.stop();
        Ok(())
    }
}

/// Run `update` and execute its commands. Returns true when the app should quit.
fn apply(model: &mut Model, msg: Message, clock_actor: &mut ClockActor) -> bool {
    let mut quit = false;
    for cmd in update(model, msg) {
        quit |= execute_command(cmd, clock_actor);
    }
    quit
}

fn execute_command(cmd: Command, clock_actor: &mut ClockActor) -> bool {
    match cmd {
        Command::StartClock => {
            dlog_debug!("Command::StartClock");
            clock_actor.start();
        }
        Command::StopClock => {
            dlog_debug!("Command::StopClock");
            clock_actor.stop();
        }
        Command::Quit => {
            dlog!("Command::Quit");
            return true;
        }
    }
    false
}

fn send_state(state_tx: &Sender<RenderState>, model: &Model) {
    let _ = state_tx.try_send(model.snapshot());
}
