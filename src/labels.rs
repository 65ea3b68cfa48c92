//! Display labels for subword units.
//!
//! A summary file lists one subword unit per line:
//!
//! ```text
//! <native> <code;...> <field> <field> <english> ...
//! ```
//!
//! Plots can show the raw code, the English phonetic spelling or the native
//! script for each unit.

use crate::defaults::{APOSTROPHE_TOKEN, SPECIAL_SYMBOLS};
use crate::error::{Result, SubwordError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Which summary column supplies the display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelMapping {
    /// The subword code itself.
    #[default]
    Identity,
    /// English phonetic spelling.
    English,
    /// Native-script characters.
    Native,
}

/// What to do with a token the summary file does not list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FallbackPolicy {
    /// Fail: the mapping and the data disagree.
    #[default]
    Error,
    /// Show the token itself.
    Identity,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LabelMap {
    labels: HashMap<String, String>,
    fallback: FallbackPolicy,
}

impl LabelMap {
    pub fn new(fallback: FallbackPolicy) -> Self {
        Self {
            labels: HashMap::new(),
            fallback,
        }
    }

    pub fn from_summary_file(
        path: &Path,
        mapping: LabelMapping,
        separate_apostrophe: bool,
    ) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_summary(&contents, mapping, separate_apostrophe)
    }

    /// Build a map from summary text.
    ///
    /// Special symbols (silence, short pause, hesitations) always map to
    /// themselves, as does the apostrophe token when it is embedded on its own.
    pub fn from_summary(
        contents: &str,
        mapping: LabelMapping,
        separate_apostrophe: bool,
    ) -> Result<Self> {
        let mut map = Self::default();
        for line in contents.lines().filter(|line| !line.trim().is_empty()) {
            let fields: Vec<&str> = line.split_whitespace().collect();
            let &[native, codes, _, _, english, ..] = fields.as_slice() else {
                return Err(SubwordError::format(
                    line,
                    format!("summary lines need at least 5 fields, found {}", fields.len()),
                ));
            };
            let code = codes.split(';').next().unwrap_or_default();
            let label = match mapping {
                LabelMapping::Identity => code,
                LabelMapping::English => english,
                LabelMapping::Native => native,
            };
            map.insert(code, label);
        }

        for &symbol in SPECIAL_SYMBOLS {
            map.insert(symbol, symbol);
        }
        if separate_apostrophe {
            map.insert(APOSTROPHE_TOKEN, APOSTROPHE_TOKEN);
        }
        Ok(map)
    }

    pub fn with_fallback(mut self, fallback: FallbackPolicy) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn insert(&mut self, token: impl Into<String>, label: impl Into<String>) {
        self.labels.insert(token.into(), label.into());
    }

    /// Display label for a token, applying the fallback policy when unmapped.
    pub fn lookup<'a>(&'a self, token: &'a str) -> Result<&'a str> {
        match (self.labels.get(token), self.fallback) {
            (Some(label), _) => Ok(label.as_str()),
            (None, FallbackPolicy::Identity) => Ok(token),
            (None, FallbackPolicy::Error) => Err(SubwordError::UnmappedLabel {
                token: token.to_string(),
            }),
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUMMARY: &str = "\
ا a;alif 12 0.3 alif
ب b 40 1.1 ba
ت t;ta;x 33 0.9 ta
";

    #[test]
    fn test_identity_mapping() {
        let map = LabelMap::from_summary(SUMMARY, LabelMapping::Identity, false).unwrap();
        assert_eq!(map.lookup("a").unwrap(), "a");
        assert_eq!(map.lookup("t").unwrap(), "t");
    }

    #[test]
    fn test_english_mapping() {
        let map = LabelMap::from_summary(SUMMARY, LabelMapping::English, false).unwrap();
        assert_eq!(map.lookup("a").unwrap(), "alif");
        assert_eq!(map.lookup("b").unwrap(), "ba");
    }

    #[test]
    fn test_native_mapping() {
        let map = LabelMap::from_summary(SUMMARY, LabelMapping::Native, false).unwrap();
        assert_eq!(map.lookup("b").unwrap(), "ب");
    }

    #[test]
    fn test_special_symbols_map_to_themselves() {
        let map = LabelMap::from_summary(SUMMARY, LabelMapping::English, false).unwrap();
        for symbol in ["sp", "sil", "G00", "G01"] {
            assert_eq!(map.lookup(symbol).unwrap(), symbol);
        }
        assert_eq!(map.len(), 7);
    }

    #[test]
    fn test_apostrophe_mapped_only_when_separated() {
        let map = LabelMap::from_summary(SUMMARY, LabelMapping::English, true).unwrap();
        assert_eq!(map.lookup("A").unwrap(), "A");

        let map = LabelMap::from_summary(SUMMARY, LabelMapping::English, false).unwrap();
        assert!(map.lookup("A").is_err());
    }

    #[test]
    fn test_unmapped_token_is_fatal_by_default() {
        let map = LabelMap::from_summary(SUMMARY, LabelMapping::English, false).unwrap();
        let err = map.lookup("zh").unwrap_err();
        assert!(matches!(err, SubwordError::UnmappedLabel { ref token } if token == "zh"));
    }

    #[test]
    fn test_identity_fallback() {
        let map = LabelMap::from_summary(SUMMARY, LabelMapping::English, false)
            .unwrap()
            .with_fallback(FallbackPolicy::Identity);
        assert_eq!(map.lookup("zh").unwrap(), "zh");
        assert_eq!(map.lookup("a").unwrap(), "alif");
    }

    #[test]
    fn test_short_summary_line_is_format_error() {
        let err = LabelMap::from_summary("a b c\n", LabelMapping::Identity, false).unwrap_err();
        assert!(matches!(err, SubwordError::Format { .. }));
    }

    #[test]
    fn test_blank_lines_ignored() {
        let map = LabelMap::from_summary("\n\n", LabelMapping::Identity, false).unwrap();
        assert_eq!(map.len(), 4);
    }

    #[test]
    fn test_mapping_deserializes_lowercase() {
        #[derive(Deserialize)]
        struct Wrapper {
            mapping: LabelMapping,
            fallback: FallbackPolicy,
        }
        let parsed: Wrapper = toml::from_str("mapping = \"native\"\nfallback = \"identity\"").unwrap();
        assert_eq!(parsed.mapping, LabelMapping::Native);
        assert_eq!(parsed.fallback, FallbackPolicy::Identity);
    }
}
