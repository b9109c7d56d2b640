//! Localized message templates.
//!
//! Bundles are flat TOML tables of `key = "template"`. Templates use
//! positional placeholders (`{0}`, `{1}`); a single quote starts a literal
//! section and `''` is an apostrophe.
//!
//! Lookup walks a chain: override files from the configured directory, then
//! the bundles embedded in the binary, region before language, English last.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::locale::LocaleTag;
use crate::{dlog_debug, dlog_warn, Error, Result};

pub const TITLE: &str = "title";
pub const HOME_TITLE: &str = "homeTitle";
pub const HOME_ENTRY: &str = "homeEntry";
pub const TODAY_IS: &str = "todayIs";
pub const DATE_OFFSET_LABEL: &str = "dateOffsetLabel";
pub const DATE_OFFSET_FROM_TODAY: &str = "dateOffsetFromToday";
pub const OFFSET_OUTSIDE_ALLOWED_RANGE: &str = "offsetOutsideAllowedRange";
pub const DIVIDEND_LABEL: &str = "dividendLabel";
pub const DIVISOR_LABEL: &str = "divisorLabel";
pub const RESULT_LABEL: &str = "resultLabel";

pub const REQUIRED_KEYS: [&str; 10] = [
    TITLE,
    HOME_TITLE,
    HOME_ENTRY,
    TODAY_IS,
    DATE_OFFSET_LABEL,
    DATE_OFFSET_FROM_TODAY,
    OFFSET_OUTSIDE_ALLOWED_RANGE,
    DIVIDEND_LABEL,
    DIVISOR_LABEL,
    RESULT_LABEL,
];

const FALLBACK_LANGUAGE: &str = "en";

const EMBEDDED: &[(&str, &str)] = &[
    ("en", include_str!("../resources/messages/en.toml")),
    ("fr", include_str!("../resources/messages/fr.toml")),
    ("de", include_str!("../resources/messages/de.toml")),
    ("es", include_str!("../resources/messages/es.toml")),
    ("pt", include_str!("../resources/messages/pt.toml")),
];

/// Resource lookup: key to raw template.
pub trait Messages: Send + Sync {
    fn lookup(&self, key: &str) -> Option<&str>;

    /// Template for `key`, or the key itself when no bundle defines it.
    fn template<'a>(&'a self, key: &'a str) -> &'a str {
        self.lookup(key).unwrap_or(key)
    }

    /// Template for `key` with positional arguments substituted.
    fn format(&self, key: &str, args: &[&str]) -> String {
        format_message(self.template(key), args)
    }
}

/// One named table of templates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bundle {
    pub name: String,
    entries: HashMap<String, String>,
}

impl Bundle {
    pub fn parse(name: &str, source: &str) -> Result<Self> {
        let entries: HashMap<String, String> = toml::from_str(source)?;
        Ok(Self {
            name: name.to_string(),
            entries,
        })
    }

    pub fn from_pairs<'a>(name: &str, pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            name: name.to_string(),
            entries: pairs
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    pub fn embedded(name: &str) -> Option<Result<Self>> {
        EMBEDDED
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(n, source)| Self::parse(n, source))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Messages for Bundle {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

/// Ordered fallback chain of bundles.
#[derive(Debug, Clone, Default)]
pub struct MessageCatalog {
    chain: Vec<Bundle>,
}

impl MessageCatalog {
    pub fn new(chain: Vec<Bundle>) -> Self {
        Self { chain }
    }

    /// Build the chain for `tag`, reading overrides from `overrides_dir` when given.
    pub fn load(tag: &LocaleTag, overrides_dir: Option<&Path>) -> Result<Self> {
        let mut names = Vec::new();
        if tag.region.is_some() {
            names.push(tag.to_string());
        }
        names.push(tag.language.clone());
        if tag.language != FALLBACK_LANGUAGE {
            names.push(FALLBACK_LANGUAGE.to_string());
        }

        let mut chain = Vec::new();
        for name in &names {
            if let Some(dir) = overrides_dir {
                if let Some(bundle) = read_override(dir, name)? {
                    chain.push(bundle);
                }
            }
            if let Some(bundle) = Bundle::embedded(name) {
                chain.push(bundle?);
            }
        }

        let catalog = Self::new(chain);
        catalog.ensure_complete(&tag.to_string())?;
        dlog_debug!(
            "MessageCatalog loaded for {}: {:?}",
            tag,
            catalog.bundle_names()
        );
        Ok(catalog)
    }

    pub fn bundle_names(&self) -> Vec<&str> {
        self.chain.iter().map(|b| b.name.as_str()).collect()
    }

    fn ensure_complete(&self, name: &str) -> Result<()> {
        match REQUIRED_KEYS.iter().find(|k| self.lookup(k).is_none()) {
            Some(key) => Err(Error::MissingMessage {
                bundle: name.to_string(),
                key: key.to_string(),
            }),
            None => Ok(()),
        }
    }
}

impl Messages for MessageCatalog {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.chain.iter().find_map(|b| b.lookup(key))
    }
}

fn read_override(dir: &Path, name: &str) -> Result<Option<Bundle>> {
    let path = dir.join(format!("{name}.toml"));
    if !path.exists() {
        return Ok(None);
    }
    let bundle = Bundle::parse(name, &fs::read_to_string(&path)?)?;
    if bundle.is_empty() {
        dlog_warn!("Override bundle {} is empty", path.display());
    }
    Ok(Some(bundle))
}

/// Substitute `{n}` placeholders. Quotes follow the `MessageFormat` rules:
/// `''` is an apostrophe and text between single quotes is literal.
/// Placeholders without a matching argument are left as written.
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();
    let mut quoted = false;

    while let Some(c) = chars.next() {
        match c {
            '\'' if chars.peek() == Some(&'\'') => {
                chars.next();
                out.push('\'');
            }
            '\'' => quoted = !quoted,
            '{' if !quoted => {
                let mut index = String::new();
                while let Some(&d) = chars.peek() {
                    if !d.is_ascii_digit() {
                        break;
                    }
                    index.push(d);
                    chars.next();
                }
                let arg = index.parse::<usize>().ok().and_then(|i| args.get(i));
                match (arg, chars.peek()) {
                    (Some(arg), Some('}')) => {
                        chars.next();
                        out.push_str(arg);
                    }
                    _ => {
                        out.push('{');
                        out.push_str(&index);
                    }
                }
            }
            _ => out.push(c),
        }
    }
    out
}
