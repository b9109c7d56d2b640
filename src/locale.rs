//! Active locale: number grouping and long date-time rendering.
//!
//! Resolution order is CLI flag, config, then `LC_ALL`, `LC_MESSAGES`,
//! `LANG`. Unknown regions fall back to another profile of the same
//! language, and anything else to `en-US`.

use std::fmt;

use chrono::{DateTime, Locale, TimeZone};
use num_bigint::BigUint;

use crate::clock::Timestamp;
use crate::dlog_warn;
use crate::number::Decimal;

const LOCALE_ENV_VARS: [&str; 3] = ["LC_ALL", "LC_MESSAGES", "LANG"];

/// A parsed `language[-REGION]` tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocaleTag {
    pub language: String,
    pub region: Option<String>,
}

impl LocaleTag {
    /// Parse `fr_FR.UTF-8`, `de-DE`, `pt_BR@euro`, `en`. `C` and `POSIX` become `en-US`.
    pub fn parse(raw: &str) -> Option<Self> {
        let base = raw
            .split(['.', '@'])
            .next()
            .unwrap_or_default()
            .trim();
        if base.is_empty() {
            return None;
        }
        if base == "C" || base == "POSIX" {
            return Some(Self::new("en", Some("US")));
        }

        let mut parts = base.split(['_', '-']);
        let language = parts.next()?.to_ascii_lowercase();
        if language.is_empty() || !language.chars().all(|c| c.is_ascii_alphabetic()) {
            return None;
        }
        let region = parts
            .next()
            .filter(|r| !r.is_empty())
            .map(|r| r.to_ascii_uppercase());
        Some(Self { language, region })
    }

    pub fn new(language: &str, region: Option<&str>) -> Self {
        Self {
            language: language.to_string(),
            region: region.map(str::to_string),
        }
    }
}

impl fmt::Display for LocaleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.region {
            Some(region) => write!(f, "{}-{}", self.language, region),
            None => f.write_str(&self.language),
        }
    }
}

/// Locale-aware integer and decimal rendering with digit grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberFormat {
    pub grouping_separator: &'static str,
    pub decimal_separator: &'static str,
    pub group_size: usize,
}

impl NumberFormat {
    pub fn format_integer(&self, value: &BigUint) -> String {
        self.group(&value.to_string())
    }

    pub fn format_decimal(&self, value: &Decimal) -> String {
        let integer = self.group(&value.integer_part().to_string());
        if value.scale() == 0 {
            return integer;
        }
        format!(
            "{}{}{}",
            integer,
            self.decimal_separator,
            value.fraction_digits()
        )
    }

    fn group(&self, digits: &str) -> String {
        let len = digits.len();
        let mut out = String::with_capacity(len + len / self.group_size * 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (len - i) % self.group_size == 0 {
                out.push_str(self.grouping_separator);
            }
            out.push(c);
        }
        out
    }
}

/// Everything needed to render numbers and dates for one locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocaleProfile {
    pub language: &'static str,
    pub region: &'static str,
    pub chrono_locale: Locale,
    /// strftime pattern for the long date-time style, localized by chrono.
    pub long_date_time: &'static str,
    pub numbers: NumberFormat,
}

const COMMA_POINT: NumberFormat = NumberFormat {
    grouping_separator: ",",
    decimal_separator: ".",
    group_size: 3,
};

const POINT_COMMA: NumberFormat = NumberFormat {
    grouping_separator: ".",
    decimal_separator: ",",
    group_size: 3,
};

/// Supported profiles; the first one is the default.
pub const PROFILES: &[LocaleProfile] = &[
    LocaleProfile {
        language: "en",
        region: "US",
        chrono_locale: Locale::en_US,
        long_date_time: "%B %-d, %Y at %-I:%M:%S %p %Z",
        numbers: COMMA_POINT,
    },
    LocaleProfile {
        language: "en",
        region: "GB",
        chrono_locale: Locale::en_GB,
        long_date_time: "%-d %B %Y at %H:%M:%S %Z",
        numbers: COMMA_POINT,
    },
    LocaleProfile {
        language: "fr",
        region: "FR",
        chrono_locale: Locale::fr_FR,
        long_date_time: "%-d %B %Y à %H:%M:%S %Z",
        numbers: NumberFormat {
            grouping_separator: "\u{202f}",
            decimal_separator: ",",
            group_size: 3,
        },
    },
    LocaleProfile {
        language: "de",
        region: "DE",
        chrono_locale: Locale::de_DE,
        long_date_time: "%-d. %B %Y um %H:%M:%S %Z",
        numbers: POINT_COMMA,
    },
    LocaleProfile {
        language: "es",
        region: "ES",
        chrono_locale: Locale::es_ES,
        long_date_time: "%-d de %B de %Y, %H:%M:%S %Z",
        numbers: POINT_COMMA,
    },
    LocaleProfile {
        language: "pt",
        region: "BR",
        chrono_locale: Locale::pt_BR,
        long_date_time: "%-d de %B de %Y %H:%M:%S %Z",
        numbers: POINT_COMMA,
    },
];

impl LocaleProfile {
    pub fn default_profile() -> &'static LocaleProfile {
        &PROFILES[0]
    }

    pub fn tag(&self) -> LocaleTag {
        LocaleTag::new(self.language, Some(self.region))
    }

    /// Best supported profile for `tag`: exact match, then same language.
    pub fn lookup(tag: &LocaleTag) -> Option<&'static LocaleProfile> {
        let same_language = || PROFILES.iter().filter(|p| p.language == tag.language);
        same_language()
            .find(|p| tag.region.as_deref() == Some(p.region))
            .or_else(|| same_language().next())
    }

    pub fn format_long<Tz>(&self, timestamp: &DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        timestamp
            .format_localized(self.long_date_time, self.chrono_locale)
            .to_string()
    }

    pub fn format_timestamp(&self, timestamp: &Timestamp) -> String {
        match timestamp {
            Timestamp::Local(t) => self.format_long(t),
            Timestamp::Fixed(t) => self.format_long(t),
        }
    }
}

/// Pick the active profile from an explicit request or the environment.
pub fn resolve(requested: Option<&str>) -> &'static LocaleProfile {
    let env_values: Vec<String> = LOCALE_ENV_VARS
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .collect();
    resolve_from(requested, env_values.iter().map(String::as_str))
}

/// Resolution with the environment passed in, so it can be tested.
pub fn resolve_from<'a>(
    requested: Option<&'a str>,
    env_values: impl IntoIterator<Item = &'a str>,
) -> &'static LocaleProfile {
    let candidate = requested
        .into_iter()
        .chain(env_values)
        .find(|v| !v.trim().is_empty());

    let Some(raw) = candidate else {
        return LocaleProfile::default_profile();
    };

    match LocaleTag::parse(raw).and_then(|tag| LocaleProfile::lookup(&tag)) {
        Some(profile) => profile,
        None => {
            dlog_warn!("Unsupported locale '{}', falling back to en-US", raw);
            LocaleProfile::default_profile()
        }
    }
}
