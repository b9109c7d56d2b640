//! Terminal UI rendering for datenum.
//!
//! Minimal chrome: no borders, whitespace as structure, grayscale plus the
//! terminal's REVERSED modifier for focus. Rendering reads a `RenderState`
//! snapshot only; it never mutates application state.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::render::{FieldView, RenderState};
use crate::tea::Screen;

const COLOR_TEXT_DIMMED: Color = Color::Gray;
const COLOR_TEXT_MUTED: Color = Color::DarkGray;
const COLOR_SEPARATOR: Color = Color::White;
const COLOR_RESULT: Color = Color::Cyan;

const LABEL_WIDTH: usize = 24;

/// Context for determining which keybindings to display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeymapContext {
    Home,
    Form,
}

impl KeymapContext {
    pub fn from_render_state(state: &RenderState) -> Self {
        match state.screen {
            Screen::Home => KeymapContext::Home,
            Screen::Form => KeymapContext::Form,
        }
    }
}

/// A single keybinding entry for display.
struct Keybinding(&'static str, &'static str);

/// A group of related keybindings (separated by │).
struct KeybindingGroup(Vec<Keybinding>);

fn keybindings_for_context(ctx: KeymapContext) -> Vec<KeybindingGroup> {
    match ctx {
        KeymapContext::Home => vec![
            KeybindingGroup(vec![Keybinding("Enter", "open")]),
            KeybindingGroup(vec![Keybinding("q", "quit")]),
        ],
        KeymapContext::Form => vec![
            KeybindingGroup(vec![
                Keybinding("Tab", "next"),
                Keybinding("S-Tab", "prev"),
            ]),
            KeybindingGroup(vec![
                Keybinding("0-9", "type"),
                Keybinding("^U", "clear"),
            ]),
            KeybindingGroup(vec![Keybinding("Esc", "back"), Keybinding("^C", "quit")]),
        ],
    }
}

pub fn draw(frame: &mut Frame, state: &RenderState) {
    let area = frame.area();
    if area.height < 3 {
        render_statusbar(frame, state, area);
        return;
    }

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .split(area);

    render_header(frame, state, chunks[0]);
    render_separator(frame, chunks[1]);
    match state.screen {
        Screen::Home => render_home(frame, state, chunks[2]),
        Screen::Form => render_form(frame, state, chunks[2]),
    }
    render_statusbar(frame, state, chunks[3]);
}

/// Title on the left, active locale on the right.
fn render_header(frame: &mut Frame, state: &RenderState, area: Rect) {
    let title = match state.screen {
        Screen::Home => state.home_title.as_str(),
        Screen::Form => state.title.as_str(),
    };
    let spacer = (area.width as usize)
        .saturating_sub(title.chars().count())
        .saturating_sub(state.locale.chars().count());

    let line = Line::from(vec![
        Span::styled(
            title.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(" ".repeat(spacer)),
        Span::styled(state.locale.clone(), Style::default().fg(COLOR_TEXT_MUTED)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_separator(frame: &mut Frame, area: Rect) {
    let solid = "─".repeat(area.width as usize);
    let line = Line::from(Span::styled(solid, Style::default().fg(COLOR_SEPARATOR)));
    frame.render_widget(Paragraph::new(line), area);
}

fn render_home(frame: &mut Frame, state: &RenderState, area: Rect) {
    let lines = vec![
        Line::raw(""),
        Line::from(vec![
            Span::raw("  "),
            Span::styled(
                format!(" {} ", state.home_entry),
                Style::default().add_modifier(Modifier::REVERSED),
            ),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_form(frame: &mut Frame, state: &RenderState, area: Rect) {
    let muted = Style::default().fg(COLOR_TEXT_DIMMED);
    let mut lines = vec![
        Line::styled(state.today_is.clone(), muted),
        Line::raw(""),
    ];

    for (idx, field) in state.fields.iter().enumerate() {
        lines.push(render_field_line(field));
        if idx == 0 {
            lines.push(Line::styled(
                indent(&state.date_offset_from_today),
                muted,
            ));
            lines.push(Line::raw(""));
        } else if !field.formatted.is_empty() {
            lines.push(Line::styled(indent(&field.formatted), muted));
        } else {
            lines.push(Line::raw(""));
        }
    }

    lines.push(Line::raw(""));
    lines.push(Line::from(vec![
        Span::styled(pad_label(&state.result_label), muted),
        Span::styled(
            state.quotient.clone(),
            Style::default()
                .fg(COLOR_RESULT)
                .add_modifier(Modifier::BOLD),
        ),
    ]));

    frame.render_widget(Paragraph::new(lines), area);
}

/// `Label                   1234` with a block cursor on the focused field.
fn render_field_line(field: &FieldView) -> Line<'static> {
    let label_style = if field.focused {
        Style::default()
    } else {
        Style::default().fg(COLOR_TEXT_DIMMED)
    };
    let mut spans = vec![Span::styled(pad_label(&field.label), label_style)];

    if !field.focused {
        spans.push(Span::raw(field.text.clone()));
        return Line::from(spans);
    }

    let cursor = field.cursor.min(field.text.len());
    let (before, rest) = field.text.split_at(cursor);
    let mut rest_chars = rest.chars();
    let under_cursor = rest_chars.next().map(String::from).unwrap_or_else(|| " ".to_string());

    spans.push(Span::raw(before.to_string()));
    spans.push(Span::styled(
        under_cursor,
        Style::default().add_modifier(Modifier::REVERSED),
    ));
    spans.push(Span::raw(rest_chars.as_str().to_string()));
    Line::from(spans)
}

/// Bottom line: dimmed '?' when collapsed, '? │ <keymap>' when expanded.
fn render_statusbar(frame: &mut Frame, state: &RenderState, area: Rect) {
    frame.render_widget(Paragraph::new(render_keymap_line(state)), area);
}

fn render_keymap_line(state: &RenderState) -> Line<'static> {
    let key_style = Style::default().fg(COLOR_TEXT_DIMMED);
    let desc_style = Style::default().fg(COLOR_TEXT_MUTED);
    let sep_style = Style::default().fg(COLOR_TEXT_MUTED);

    let help_style = if state.show_keymap {
        Style::default()
    } else {
        Style::default().fg(COLOR_TEXT_MUTED)
    };
    let mut spans: Vec<Span> = vec![Span::styled("?", help_style)];

    if state.show_keymap {
        let groups = keybindings_for_context(KeymapContext::from_render_state(state));
        for group in groups.iter().filter(|g| !g.0.is_empty()) {
            spans.push(Span::styled(" │ ", sep_style));
            for (key_idx, keybinding) in group.0.iter().enumerate() {
                if key_idx > 0 {
                    spans.push(Span::styled(" • ", sep_style));
                }
                spans.push(Span::styled(keybinding.0, key_style));
                spans.push(Span::styled(format!(" {}", keybinding.1), desc_style));
            }
        }
    }

    Line::from(spans)
}

// Helper functions

fn pad_label(label: &str) -> String {
    let width = label.chars().count();
    if width >= LABEL_WIDTH {
        format!("{} ", label)
    } else {
        format!("{}{}", label, " ".repeat(LABEL_WIDTH - width))
    }
}

fn indent(text: &str) -> String {
    format!("{}{}", " ".repeat(LABEL_WIDTH), text)
}
