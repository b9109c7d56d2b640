//! Pure update function for the TEA (The Elm Architecture) pattern.
//!
//! The update function takes a model and a message, mutates the model,
//! and returns a list of commands to execute.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::bindings::Dependency;
use crate::{dlog, dlog_debug, dlog_trace};

use super::command::Command;
use super::message::Message;
use super::model::{FormState, Model, Screen};

/// Pure update function: Model + Message → Commands
///
/// Field edits and clock ticks re-evaluate only the labels that depend on
/// them. Ticks that arrive while no form is listening are dropped.
pub fn update(model: &mut Model, msg: Message) -> Vec<Command> {
    let mut cmds = Vec::new();

    match msg {
        Message::Key(key) => {
            model.dirty = true; // Keyboard input always triggers render
            if is_ctrl(&key, 'c') {
                quit(model, &mut cmds);
                return cmds;
            }
            match model.screen {
                Screen::Home => update_home(model, key, &mut cmds),
                Screen::Form => update_form(model, key, &mut cmds),
            }
        }

        Message::Paste(text) => {
            if model.screen == Screen::Form {
                let field = model.form.focus;
                if model.form.focused_mut().insert(&text) {
                    model.notify(field.dependency());
                    model.dirty = true;
                } else {
                    dlog_trace!("Paste rejected for {:?}", field);
                }
            }
        }

        Message::Resize(_, _) => {
            model.dirty = true;
        }

        Message::Tick(now) => {
            if model.screen == Screen::Form && model.form.clock_running {
                model.form.now = Some(now);
                model.notify(Dependency::Clock);
                model.dirty = true;
            } else {
                dlog_trace!("Dropping tick {} (no form listening)", now.to_rfc3339());
            }
        }
    }

    cmds
}

fn is_ctrl(key: &KeyEvent, c: char) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char(c)
}

fn quit(model: &mut Model, cmds: &mut Vec<Command>) {
    if model.form.clock_running {
        model.form.clock_running = false;
        cmds.push(Command::StopClock);
    }
    cmds.push(Command::Quit);
}

fn open_form(model: &mut Model, cmds: &mut Vec<Command>) {
    dlog!("Opening form");
    model.form = FormState::new(&model.l10n);
    model.form.clock_running = true;
    model.screen = Screen::Form;
    cmds.push(Command::StartClock);
}

/// Stop the clock before leaving so no tick recomputes a hidden form.
fn go_back(model: &mut Model, cmds: &mut Vec<Command>) {
    dlog!("Leaving form");
    model.form.clock_running = false;
    cmds.push(Command::StopClock);
    model.screen = Screen::Home;
}

fn update_home(model: &mut Model, key: KeyEvent, cmds: &mut Vec<Command>) {
    match key.code {
        KeyCode::Enter => open_form(model, cmds),
        KeyCode::Char('q') | KeyCode::Esc => quit(model, cmds),
        KeyCode::Char('?') => model.show_keymap = !model.show_keymap,
        _ => {}
    }
}

fn update_form(model: &mut Model, key: KeyEvent, cmds: &mut Vec<Command>) {
    let field = model.form.focus;

    let edited = match key.code {
        KeyCode::Esc => {
            go_back(model, cmds);
            return;
        }
        KeyCode::Tab | KeyCode::Down | KeyCode::Enter => {
            model.form.focus = field.next();
            false
        }
        KeyCode::BackTab | KeyCode::Up => {
            model.form.focus = field.prev();
            false
        }
        KeyCode::Left => {
            model.form.focused_mut().move_left();
            false
        }
        KeyCode::Right => {
            model.form.focused_mut().move_right();
            false
        }
        KeyCode::Home => {
            model.form.focused_mut().move_home();
            false
        }
        KeyCode::End => {
            model.form.focused_mut().move_end();
            false
        }
        KeyCode::Backspace => model.form.focused_mut().backspace(),
        KeyCode::Delete => model.form.focused_mut().delete(),
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            model.form.focused_mut().clear()
        }
        KeyCode::Char('?') => {
            model.show_keymap = !model.show_keymap;
            false
        }
        KeyCode::Char(c)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            let accepted = model.form.focused_mut().insert_char(c);
            if !accepted {
                dlog_trace!("Keystroke {:?} rejected for {:?}", c, field);
            }
            accepted
        }
        _ => false,
    };

    if edited {
        dlog_debug!(
            "{:?} = {:?}",
            field,
            model.form.field(field).text()
        );
        model.notify(field.dependency());
    }
}
