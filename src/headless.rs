//! One-shot evaluation of the form for `datenum show`.
//!
//! Samples the clock once, runs every binding against the given inputs and
//! reports the result as labeled lines or JSON.

use serde::Serialize;

use crate::bindings::{DerivedOutputs, FormInputs, Localizer};
use crate::clock::{Clock, Timestamp};
use crate::input::{NumericInput, MAX_INPUT_LENGTH};
use crate::messages;
use crate::{dlog_debug, Error, Result};

/// Raw field values as given on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShowRequest {
    pub date_offset: Option<String>,
    pub dividend: Option<String>,
    pub divisor: Option<String>,
}

/// Everything `show` prints.
#[derive(Debug, Clone, Serialize)]
pub struct ShowReport {
    pub locale: String,
    pub now: Timestamp,
    pub date_offset: String,
    pub dividend: String,
    pub divisor: String,
    #[serde(flatten)]
    pub outputs: DerivedOutputs,
}

/// Validate one argument with the same filter the form applies to keystrokes.
fn field(name: &str, value: Option<&str>) -> Result<NumericInput> {
    let value = value.unwrap_or_default();
    NumericInput::with_text(value).ok_or_else(|| {
        Error::Validation(format!(
            "{name} must be at most {MAX_INPUT_LENGTH} digits, got {value:?}"
        ))
    })
}

pub fn evaluate(request: &ShowRequest, clock: &dyn Clock, l10n: &Localizer) -> Result<ShowReport> {
    let date_offset = field("--offset", request.date_offset.as_deref())?;
    let dividend = field("--dividend", request.dividend.as_deref())?;
    let divisor = field("--divisor", request.divisor.as_deref())?;
    let now = clock.now();

    let inputs = FormInputs {
        now: Some(&now),
        date_offset: date_offset.text(),
        dividend: dividend.text(),
        divisor: divisor.text(),
    };
    let outputs = DerivedOutputs::compute(&inputs, l10n);
    dlog_debug!("show at {}: {:?}", now.to_rfc3339(), outputs);

    Ok(ShowReport {
        locale: l10n.profile().tag().to_string(),
        now,
        date_offset: date_offset.text().to_string(),
        dividend: dividend.text().to_string(),
        divisor: divisor.text().to_string(),
        outputs,
    })
}

impl ShowReport {
    /// Human-readable rendering, labels from the active message bundle.
    pub fn to_lines(&self, l10n: &Localizer) -> Vec<String> {
        let row = |key: &str, value: &str| format!("{:<24}{}", l10n.text(key), value);
        vec![
            self.outputs.today_is.clone(),
            self.outputs.date_offset_from_today.clone(),
            row(messages::DIVIDEND_LABEL, &self.outputs.dividend_formatted),
            row(messages::DIVISOR_LABEL, &self.outputs.divisor_formatted),
            row(messages::RESULT_LABEL, &self.outputs.quotient),
        ]
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
