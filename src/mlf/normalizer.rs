//! Subword label normalisation.
//!
//! Raw MLF labels carry triphone context (`l-c+r`), a position code after a
//! caret (`c^I`, `c^M`, `c^F`) and sometimes an apostrophe marker on the
//! position code (`c^IA`). Normalisation reduces such a label to the token
//! written to the training corpus.

use crate::defaults::{
    APOSTROPHE_TOKEN, CONTEXT_WIDTH, MAX_CONTEXT_WIDTH, POSITION_INFO_LEN, POSITION_MARKER,
};
use crate::error::{Result, SubwordError};
use std::fmt;

/// Number of context units kept from a triphone label (1 to 3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContextWidth(usize);

impl ContextWidth {
    /// Validate a context width.
    ///
    /// Width 0 is rejected along with anything above the triphone width.
    pub fn new(width: usize) -> Result<Self> {
        if width == 0 || width > MAX_CONTEXT_WIDTH {
            return Err(SubwordError::InvalidContextWidth { width });
        }
        Ok(Self(width))
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for ContextWidth {
    fn default() -> Self {
        Self(CONTEXT_WIDTH)
    }
}

impl TryFrom<usize> for ContextWidth {
    type Error = SubwordError;

    fn try_from(width: usize) -> Result<Self> {
        Self::new(width)
    }
}

impl fmt::Display for ContextWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Settings threaded through the parser for every arc of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizerConfig {
    pub context_width: ContextWidth,
    /// Keep position codes (`^I`, `^M`, `^F`) in the token.
    pub include_position_info: bool,
    /// Emit the apostrophe marker as its own token instead of leaving it on the subword.
    pub separate_apostrophe: bool,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            context_width: ContextWidth::default(),
            include_position_info: false,
            separate_apostrophe: true,
        }
    }
}

impl NormalizerConfig {
    /// Build a config, failing fast on an unsupported context width.
    pub fn new(context_width: usize, include_position_info: bool) -> Result<Self> {
        Ok(Self {
            context_width: ContextWidth::new(context_width)?,
            include_position_info,
            ..Self::default()
        })
    }

    pub fn with_apostrophe_separation(mut self, separate_apostrophe: bool) -> Self {
        self.separate_apostrophe = separate_apostrophe;
        self
    }

    /// Normalise one raw label into its corpus token.
    pub fn normalize(&self, label: &str) -> Result<String> {
        normalize(label, self)
    }
}

/// Reduce a context-decorated label to a corpus token.
///
/// Width 1 keeps the centre of a triphone. Wider contexts keep the first
/// `width` parts, so width 2 is left+centre. With position info kept the
/// parts are concatenated; with it stripped each part is cleaned on its own
/// and the results are space-joined.
pub fn normalize(label: &str, config: &NormalizerConfig) -> Result<String> {
    let parts: Vec<&str> = label.split(['+', '-']).collect();
    let width = config.context_width.get();

    match parts.as_slice() {
        [unit] => Ok(clean(unit, config)),
        [_, centre, _] if width == 1 => Ok(clean(centre, config)),
        [_, _, _] => {
            let context = &parts[..width];
            if config.include_position_info {
                Ok(context.concat())
            } else {
                Ok(context
                    .iter()
                    .map(|part| strip_position(part, config.separate_apostrophe).to_string())
                    .collect::<Vec<_>>()
                    .join(" "))
            }
        }
        _ => Err(SubwordError::InvalidLabelShape {
            label: label.to_string(),
            parts: parts.len(),
        }),
    }
}

fn clean(unit: &str, config: &NormalizerConfig) -> String {
    if config.include_position_info {
        unit.to_string()
    } else {
        strip_position(unit, config.separate_apostrophe).to_string()
    }
}

/// A subword with its position code removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrippedSubword {
    pub subword: String,
    /// Present only when the position code carried the apostrophe marker.
    pub apostrophe: Option<&'static str>,
}

impl fmt::Display for StrippedSubword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.apostrophe {
            Some(apostrophe) => write!(f, "{} {}", self.subword, apostrophe),
            None => f.write_str(&self.subword),
        }
    }
}

/// Remove the position code from a single context part.
///
/// `b^I` becomes `b`; `b^IA` becomes `b` plus a separate `A` when
/// `separate_apostrophe` is set, otherwise `bA`. A part without a caret is
/// returned unchanged.
pub fn strip_position(part: &str, separate_apostrophe: bool) -> StrippedSubword {
    let mut pieces = part.split(POSITION_MARKER);
    let base = pieces.next().unwrap_or_default();
    let Some(code) = pieces.next() else {
        return StrippedSubword {
            subword: part.to_string(),
            apostrophe: None,
        };
    };

    // Drop the position letter, keep whatever follows it.
    let pronunciation = code
        .char_indices()
        .nth(POSITION_INFO_LEN - 1)
        .map_or("", |(idx, _)| &code[idx..]);

    if separate_apostrophe && pronunciation.ends_with(APOSTROPHE_TOKEN) {
        StrippedSubword {
            subword: format!("{base}{}", pronunciation.replace(APOSTROPHE_TOKEN, "")),
            apostrophe: Some(APOSTROPHE_TOKEN),
        }
    } else {
        StrippedSubword {
            subword: format!("{base}{pronunciation}"),
            apostrophe: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn config(width: usize, include_position_info: bool) -> NormalizerConfig {
        NormalizerConfig::new(width, include_position_info).unwrap()
    }

    #[test]
    fn test_context_width_bounds() {
        assert!(ContextWidth::new(1).is_ok());
        assert!(ContextWidth::new(3).is_ok());
        assert!(matches!(
            ContextWidth::new(4),
            Err(SubwordError::InvalidContextWidth { width: 4 })
        ));
        assert!(matches!(
            ContextWidth::new(0),
            Err(SubwordError::InvalidContextWidth { width: 0 })
        ));
    }

    #[test]
    fn test_config_rejects_width_before_any_label() {
        assert!(NormalizerConfig::new(5, false).is_err());
    }

    #[test]
    fn test_default_config() {
        let config = NormalizerConfig::default();
        assert_eq!(config.context_width.get(), 1);
        assert!(!config.include_position_info);
        assert!(config.separate_apostrophe);
    }

    #[test]
    fn test_triphone_width_one_takes_centre() {
        assert_eq!(normalize("sil-a+b^I", &config(1, false)).unwrap(), "a");
        assert_eq!(normalize("sil-a^M+b", &config(1, true)).unwrap(), "a^M");
        assert_eq!(normalize("sil-a^M+b", &config(1, false)).unwrap(), "a");
    }

    #[test]
    fn test_width_two_is_left_biased() {
        assert_eq!(normalize("x-y+z", &config(2, true)).unwrap(), "xy");
        assert_eq!(normalize("x^I-y^M+z^F", &config(2, false)).unwrap(), "x y");
    }

    #[test]
    fn test_width_three_keeps_all_parts() {
        assert_eq!(normalize("x-y+z", &config(3, true)).unwrap(), "xyz");
        assert_eq!(normalize("x^I-y^M+z^F", &config(3, false)).unwrap(), "x y z");
        assert_eq!(normalize("x^I-y^M+z^F", &config(3, true)).unwrap(), "x^Iy^Mz^F");
    }

    #[test]
    fn test_single_unit_label() {
        assert_eq!(normalize("sil", &config(1, false)).unwrap(), "sil");
        assert_eq!(normalize("sil", &config(3, false)).unwrap(), "sil");
        assert_eq!(normalize("a^F", &config(2, true)).unwrap(), "a^F");
        assert_eq!(normalize("a^F", &config(2, false)).unwrap(), "a");
    }

    #[test]
    fn test_two_part_label_is_invalid_shape() {
        let err = normalize("a-b", &config(1, false)).unwrap_err();
        assert!(matches!(
            err,
            SubwordError::InvalidLabelShape { ref label, parts: 2 } if label == "a-b"
        ));
    }

    #[test]
    fn test_four_part_label_is_invalid_shape() {
        let err = normalize("a-b+c-d", &config(1, false)).unwrap_err();
        assert!(matches!(err, SubwordError::InvalidLabelShape { parts: 4, .. }));
    }

    #[test]
    fn test_apostrophe_split() {
        assert_eq!(normalize("b^IA", &config(1, false)).unwrap(), "b A");
        assert_eq!(normalize("a-b^IA+c", &config(1, false)).unwrap(), "b A");
    }

    #[test]
    fn test_apostrophe_kept_attached_when_not_separated() {
        let config = config(1, false).with_apostrophe_separation(false);
        assert_eq!(normalize("b^IA", &config).unwrap(), "bA");
    }

    #[test]
    fn test_apostrophe_in_wide_context() {
        assert_eq!(normalize("x^IA-y^F+z", &config(2, false)).unwrap(), "x A y");
    }

    #[test]
    fn test_strip_position_without_caret_is_unchanged() {
        let stripped = strip_position("sil", true);
        assert_eq!(stripped.subword, "sil");
        assert_eq!(stripped.apostrophe, None);
    }

    #[test]
    fn test_strip_position_without_apostrophe_has_no_second_token() {
        let stripped = strip_position("b^I", true);
        assert_eq!(stripped.subword, "b");
        assert_eq!(stripped.apostrophe, None);
        assert_eq!(stripped.to_string(), "b");
    }

    #[test]
    fn test_strip_position_keeps_trailing_pronunciation() {
        // Anything after the position letter belongs to the subword.
        assert_eq!(strip_position("b^M2", true).to_string(), "b2");
        assert_eq!(strip_position("b^M2A", true).to_string(), "b2 A");
    }

    #[test]
    fn test_strip_position_bare_caret() {
        assert_eq!(strip_position("b^", true).to_string(), "b");
    }

    #[test]
    fn test_normalize_method_delegates() {
        let config = config(1, false);
        assert_eq!(config.normalize("p-q+r").unwrap(), "q");
    }

    fn unit() -> impl Strategy<Value = String> {
        "[a-zA-Z][a-z0-9]{0,2}"
    }

    fn position() -> impl Strategy<Value = String> {
        prop_oneof![Just(String::new()), "\\^[IMF]"]
    }

    proptest! {
        #[test]
        fn prop_width_one_yields_centre(
            left in unit(), centre in unit(), right in unit(), posn in position()
        ) {
            let label = format!("{left}-{centre}{posn}+{right}");
            let kept = normalize(&label, &config(1, true)).unwrap();
            prop_assert_eq!(kept, format!("{centre}{posn}"));
            let stripped = normalize(&label, &config(1, false)).unwrap();
            prop_assert_eq!(stripped, strip_position(&format!("{centre}{posn}"), true).to_string());
        }

        #[test]
        fn prop_well_formed_labels_never_fail(
            left in unit(), centre in unit(), right in unit(),
            width in 1usize..=3, include in any::<bool>()
        ) {
            let triphone = format!("{left}-{centre}+{right}");
            prop_assert!(normalize(&triphone, &config(width, include)).is_ok());
            prop_assert!(normalize(&centre, &config(width, include)).is_ok());
        }

        #[test]
        fn prop_plain_token_is_fixed_point(token in "[a-z][a-z0-9]{0,3}") {
            let once = normalize(&token, &config(1, false)).unwrap();
            prop_assert_eq!(&once, &token);
            let twice = normalize(&once, &config(1, false)).unwrap();
            prop_assert_eq!(twice, once);
        }
    }
}
