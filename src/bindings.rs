//! Derived display strings of the dates-and-numbers form.
//!
//! Every label is a pure function of the form inputs and the [`Localizer`].
//! The dependency table is explicit: when one input changes, only the
//! bindings that read it are re-evaluated.

use std::path::Path;

use chrono::Days;
use num_bigint::BigUint;
use serde::Serialize;

use crate::clock::Timestamp;
use crate::locale::{LocaleProfile, NumberFormat};
use crate::messages::{self, MessageCatalog, Messages};
use crate::number::{self, RESULT_SCALE};
use crate::Result;

/// Quotient label when the divisor is zero.
pub const UNDEFINED: &str = "undefined";

/// Active locale plus its message templates.
pub struct Localizer {
    profile: &'static LocaleProfile,
    messages: Box<dyn Messages>,
}

impl Localizer {
    pub fn new(profile: &'static LocaleProfile, messages: impl Messages + 'static) -> Self {
        Self {
            profile,
            messages: Box::new(messages),
        }
    }

    /// Locale profile with the message catalog for its tag.
    pub fn load(profile: &'static LocaleProfile, overrides_dir: Option<&Path>) -> Result<Self> {
        let catalog = MessageCatalog::load(&profile.tag(), overrides_dir)?;
        Ok(Self::new(profile, catalog))
    }

    pub fn profile(&self) -> &'static LocaleProfile {
        self.profile
    }

    pub fn numbers(&self) -> &NumberFormat {
        &self.profile.numbers
    }

    /// A template with no arguments, quotes resolved.
    pub fn text(&self, key: &str) -> String {
        self.messages.format(key, &[])
    }

    pub fn format(&self, key: &str, args: &[&str]) -> String {
        self.messages.format(key, args)
    }
}

impl std::fmt::Debug for Localizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Localizer")
            .field("locale", &self.profile.tag().to_string())
            .finish_non_exhaustive()
    }
}

/// Borrowed view of everything the bindings read.
#[derive(Debug, Clone, Copy)]
pub struct FormInputs<'a> {
    pub now: Option<&'a Timestamp>,
    pub date_offset: &'a str,
    pub dividend: &'a str,
    pub divisor: &'a str,
}

pub fn today_label(now: Option<&Timestamp>, l10n: &Localizer) -> String {
    match now {
        Some(now) => l10n.format(messages::TODAY_IS, &[&l10n.profile().format_timestamp(now)]),
        None => String::new(),
    }
}

pub fn date_offset_label(now: Option<&Timestamp>, offset: &str, l10n: &Localizer) -> String {
    let Some(now) = now else {
        return String::new();
    };

    let target = number::parse_day_count(offset)
        .and_then(|days| now.checked_add_days(Days::new(days)).map(|t| (days, t)));

    match target {
        Some((days, target)) => {
            let days = l10n.numbers().format_integer(&BigUint::from(days));
            let date = l10n.profile().format_timestamp(&target);
            l10n.format(messages::DATE_OFFSET_FROM_TODAY, &[&days, &date])
        }
        None => l10n.text(messages::OFFSET_OUTSIDE_ALLOWED_RANGE),
    }
}

pub fn formatted_number(text: &str, l10n: &Localizer) -> String {
    number::parse_digits(text)
        .map(|value| l10n.numbers().format_integer(&value))
        .unwrap_or_default()
}

pub fn quotient(dividend: &str, divisor: &str, l10n: &Localizer) -> String {
    let (Some(dividend), Some(divisor)) =
        (number::parse_digits(dividend), number::parse_digits(divisor))
    else {
        return String::new();
    };

    match number::divide(&dividend, &divisor, RESULT_SCALE) {
        Some(result) => l10n.numbers().format_decimal(&result),
        None => UNDEFINED.to_string(),
    }
}

/// Something a binding reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dependency {
    Clock,
    DateOffset,
    Dividend,
    Divisor,
}

/// One derived label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    TodayIs,
    DateOffsetFromToday,
    DividendFormatted,
    DivisorFormatted,
    Quotient,
}

impl Binding {
    pub const ALL: [Binding; 5] = [
        Binding::TodayIs,
        Binding::DateOffsetFromToday,
        Binding::DividendFormatted,
        Binding::DivisorFormatted,
        Binding::Quotient,
    ];

    pub fn dependencies(self) -> &'static [Dependency] {
        match self {
            Binding::TodayIs => &[Dependency::Clock],
            Binding::DateOffsetFromToday => &[Dependency::Clock, Dependency::DateOffset],
            Binding::DividendFormatted => &[Dependency::Dividend],
            Binding::DivisorFormatted => &[Dependency::Divisor],
            Binding::Quotient => &[Dependency::Dividend, Dependency::Divisor],
        }
    }

    pub fn depends_on(self, dependency: Dependency) -> bool {
        self.dependencies().contains(&dependency)
    }

    pub fn evaluate(self, inputs: &FormInputs<'_>, l10n: &Localizer) -> String {
        match self {
            Binding::TodayIs => today_label(inputs.now, l10n),
            Binding::DateOffsetFromToday => date_offset_label(inputs.now, inputs.date_offset, l10n),
            Binding::DividendFormatted => formatted_number(inputs.dividend, l10n),
            Binding::DivisorFormatted => formatted_number(inputs.divisor, l10n),
            Binding::Quotient => quotient(inputs.dividend, inputs.divisor, l10n),
        }
    }
}

/// Current value of every binding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DerivedOutputs {
    pub today_is: String,
    pub date_offset_from_today: String,
    pub dividend_formatted: String,
    pub divisor_formatted: String,
    pub quotient: String,
}

impl DerivedOutputs {
    pub fn compute(inputs: &FormInputs<'_>, l10n: &Localizer) -> Self {
        let mut outputs = Self::default();
        for binding in Binding::ALL {
            *outputs.slot_mut(binding) = binding.evaluate(inputs, l10n);
        }
        outputs
    }

    /// Re-evaluate the bindings that read `changed`. Returns how many ran.
    pub fn refresh(
        &mut self,
        changed: Dependency,
        inputs: &FormInputs<'_>,
        l10n: &Localizer,
    ) -> usize {
        let mut evaluated = 0;
        for binding in Binding::ALL.into_iter().filter(|b| b.depends_on(changed)) {
            *self.slot_mut(binding) = binding.evaluate(inputs, l10n);
            evaluated += 1;
        }
        evaluated
    }

    pub fn get(&self, binding: Binding) -> &str {
        match binding {
            Binding::TodayIs => &self.today_is,
            Binding::DateOffsetFromToday => &self.date_offset_from_today,
            Binding::DividendFormatted => &self.dividend_formatted,
            Binding::DivisorFormatted => &self.divisor_formatted,
            Binding::Quotient => &self.quotient,
        }
    }

    fn slot_mut(&mut self, binding: Binding) -> &mut String {
        match binding {
            Binding::TodayIs => &mut self.today_is,
            Binding::DateOffsetFromToday => &mut self.date_offset_from_today,
            Binding::DividendFormatted => &mut self.dividend_formatted,
            Binding::DivisorFormatted => &mut self.divisor_formatted,
            Binding::Quotient => &mut self.quotient,
        }
    }
}
