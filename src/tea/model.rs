//! Model for the TEA (The Elm Architecture) pattern.
//!
//! The Model is pure application state: no channels, no timers. Derived
//! labels live here too, refreshed through [`Model::notify`] whenever one of
//! their dependencies changes.

use std::sync::Arc;

use crate::bindings::{Dependency, DerivedOutputs, FormInputs, Localizer};
use crate::clock::Timestamp;
use crate::input::NumericInput;
use crate::messages;
use crate::render::{next_version, FieldView, RenderState};

/// Which screen the host shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Home,
    Form,
}

/// The form's editable fields, in focus order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Field {
    #[default]
    DateOffset,
    Dividend,
    Divisor,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::DateOffset, Field::Dividend, Field::Divisor];

    pub fn next(self) -> Field {
        match self {
            Field::DateOffset => Field::Dividend,
            Field::Dividend => Field::Divisor,
            Field::Divisor => Field::DateOffset,
        }
    }

    pub fn prev(self) -> Field {
        match self {
            Field::DateOffset => Field::Divisor,
            Field::Dividend => Field::DateOffset,
            Field::Divisor => Field::Dividend,
        }
    }

    pub fn label_key(self) -> &'static str {
        match self {
            Field::DateOffset => messages::DATE_OFFSET_LABEL,
            Field::Dividend => messages::DIVIDEND_LABEL,
            Field::Divisor => messages::DIVISOR_LABEL,
        }
    }

    /// The binding input this field feeds.
    pub fn dependency(self) -> Dependency {
        match self {
            Field::DateOffset => Dependency::DateOffset,
            Field::Dividend => Dependency::Dividend,
            Field::Divisor => Dependency::Divisor,
        }
    }
}

/// State of one visit to the form. Replaced wholesale when the form opens.
#[derive(Debug, Clone, Default)]
pub struct FormState {
    /// Last clock sample; `None` until the first tick.
    pub now: Option<Timestamp>,
    /// Whether this form asked for ticks and has not stopped them.
    pub clock_running: bool,
    pub date_offset: NumericInput,
    pub dividend: NumericInput,
    pub divisor: NumericInput,
    pub focus: Field,
    pub outputs: DerivedOutputs,
}

impl FormState {
    pub fn new(l10n: &Localizer) -> Self {
        let form = Self::default();
        Self {
            outputs: DerivedOutputs::compute(&form.inputs(), l10n),
            ..form
        }
    }

    pub fn inputs(&self) -> FormInputs<'_> {
        FormInputs {
            now: self.now.as_ref(),
            date_offset: self.date_offset.text(),
            dividend: self.dividend.text(),
            divisor: self.divisor.text(),
        }
    }

    pub fn field(&self, field: Field) -> &NumericInput {
        match field {
            Field::DateOffset => &self.date_offset,
            Field::Dividend => &self.dividend,
            Field::Divisor => &self.divisor,
        }
    }

    pub fn field_mut(&mut self, field: Field) -> &mut NumericInput {
        match field {
            Field::DateOffset => &mut self.date_offset,
            Field::Dividend => &mut self.dividend,
            Field::Divisor => &mut self.divisor,
        }
    }

    pub fn focused_mut(&mut self) -> &mut NumericInput {
        self.field_mut(self.focus)
    }

    /// Re-evaluate the labels that read `changed`.
    pub fn notify(&mut self, changed: Dependency, l10n: &Localizer) {
        let FormState {
            now,
            date_offset,
            dividend,
            divisor,
            outputs,
            ..
        } = self;
        let inputs = FormInputs {
            now: now.as_ref(),
            date_offset: date_offset.text(),
            dividend: dividend.text(),
            divisor: divisor.text(),
        };
        outputs.refresh(changed, &inputs, l10n);
    }
}

/// Pure application state - the single source of truth.
pub struct Model {
    pub screen: Screen,
    pub form: FormState,

    /// Whether the keymap legend is expanded (toggled by '?')
    pub show_keymap: bool,

    // Dirty flag - set when state changes and render is needed
    pub dirty: bool,

    // Immutable after init
    pub l10n: Arc<Localizer>,
}

impl Model {
    pub fn new(l10n: Arc<Localizer>) -> Self {
        Self {
            screen: Screen::default(),
            form: FormState::new(&l10n),
            show_keymap: false,
            dirty: true,
            l10n,
        }
    }

    /// Re-evaluate the form labels that read `changed`.
    pub fn notify(&mut self, changed: Dependency) {
        self.form.notify(changed, &self.l10n);
    }

    /// Create an immutable snapshot for the render thread.
    pub fn snapshot(&self) -> RenderState {
        let form = &self.form;
        let fields = Field::ALL
            .iter()
            .map(|&field| {
                let input = form.field(field);
                let formatted = match field {
                    Field::DateOffset => String::new(),
                    Field::Dividend => form.outputs.dividend_formatted.clone(),
                    Field::Divisor => form.outputs.divisor_formatted.clone(),
                };
                FieldView {
                    label: self.l10n.text(field.label_key()),
                    text: input.text().to_string(),
                    cursor: input.cursor(),
                    focused: field == form.focus,
                    formatted,
                }
            })
            .collect();

        RenderState {
            version: next_version(),
            screen: self.screen,
            title: self.l10n.text(messages::TITLE),
            locale: self.l10n.profile().tag().to_string(),
            home_title: self.l10n.text(messages::HOME_TITLE),
            home_entry: self.l10n.text(messages::HOME_ENTRY),
            today_is: form.outputs.today_is.clone(),
            date_offset_from_today: form.outputs.date_offset_from_today.clone(),
            fields,
            result_label: self.l10n.text(messages::RESULT_LABEL),
            quotient: form.outputs.quotient.clone(),
            show_keymap: self.show_keymap,
        }
    }
}
