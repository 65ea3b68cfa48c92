//! Sentence-level grouping of timed arcs.

use super::arc::TimedArc;
use super::block::RawLabelBlock;
use super::normalizer::NormalizerConfig;
use crate::error::{Result, SubwordError};
use std::collections::BTreeSet;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
struct Labelled {
    label: String,
    arcs: Vec<TimedArc>,
}

/// One sentence from a label file: its identifier and arcs in file order.
///
/// A record is either fully populated or empty; there is no way to hold an
/// identifier without arcs.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SentenceRecord {
    contents: Option<Labelled>,
}

impl SentenceRecord {
    /// Parse the raw text of one block.
    pub fn parse(text: &str, config: &NormalizerConfig) -> Result<Self> {
        Self::from_block(&RawLabelBlock::new(text), config)
    }

    /// Build a record from a block. Blank blocks give an empty record.
    pub fn from_block(block: &RawLabelBlock<'_>, config: &NormalizerConfig) -> Result<Self> {
        let mut lines = block.content_lines();
        let Some(label) = lines.next() else {
            return Ok(Self::default());
        };

        let arcs = lines
            .map(|line| TimedArc::parse(line, config))
            .collect::<Result<Vec<_>>>()?;

        if arcs.is_empty() {
            return Err(SubwordError::format(label, "sentence has no arcs"));
        }

        Ok(Self {
            contents: Some(Labelled {
                label: label.to_string(),
                arcs,
            }),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_none()
    }

    /// The sentence identifier line.
    pub fn label(&self) -> Option<&str> {
        self.contents.as_ref().map(|c| c.label.as_str())
    }

    pub fn arcs(&self) -> &[TimedArc] {
        self.contents
            .as_ref()
            .map(|c| c.arcs.as_slice())
            .unwrap_or_default()
    }

    pub fn unique_tokens(&self) -> BTreeSet<&str> {
        self.arcs().iter().map(|arc| arc.token.as_str()).collect()
    }

    /// Tokens joined by single spaces in file order (not sorted by time).
    pub fn text(&self) -> String {
        self.arcs()
            .iter()
            .map(|arc| arc.token.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// The arc starting at exactly 0.0 seconds, if any.
    pub fn zero_start_arc(&self) -> Option<&TimedArc> {
        self.arcs().iter().find(|arc| arc.starts_at_zero())
    }
}

impl fmt::Display for SentenceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(contents) = &self.contents else {
            return Ok(());
        };
        writeln!(f, "{}", contents.label)?;
        for arc in &contents.arcs {
            writeln!(f, "{arc}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mlf::arc::FieldValue;

    const SENTENCE: &str = "sent1\n0 1000000000 sil-a+b^I -123.45\n1000000000 2000000000 sil -67.8";

    #[test]
    fn test_parse_sentence() {
        let record = SentenceRecord::parse(SENTENCE, &NormalizerConfig::default()).unwrap();

        assert!(!record.is_empty());
        assert_eq!(record.label(), Some("sent1"));
        assert_eq!(record.arcs().len(), 2);
        assert_eq!(record.text(), "a sil");
        assert_eq!(record.unique_tokens().into_iter().collect::<Vec<_>>(), ["a", "sil"]);
    }

    #[test]
    fn test_text_follows_file_order_not_time_order() {
        let block = "s\n1000000000 2000000000 b -1\n0 1000000000 a -1";
        let record = SentenceRecord::parse(block, &NormalizerConfig::default()).unwrap();
        assert_eq!(record.text(), "b a");
    }

    #[test]
    fn test_unique_tokens_deduplicates() {
        let block = "s\n0 1 a -1\n1 2 sil -1\n2 3 a -1\n3 4 b^IA -1";
        let record = SentenceRecord::parse(block, &NormalizerConfig::default()).unwrap();
        let tokens = record.unique_tokens();
        assert_eq!(tokens.len(), 3);
        assert!(tokens.contains("b A"));
        assert_eq!(record.text(), "a sil a b A");
    }

    #[test]
    fn test_comments_filtered_before_identifier() {
        let block = "#!MLF!#\n\"*/s1.lab\"\n# aligned\n0 1 a -1";
        let record = SentenceRecord::parse(block, &NormalizerConfig::default()).unwrap();
        assert_eq!(record.label(), Some("\"*/s1.lab\""));
        assert_eq!(record.text(), "a");
    }

    #[test]
    fn test_blank_block_is_empty() {
        for block in ["", "\n", "  \n\t\n", "# trailing comment"] {
            let record = SentenceRecord::parse(block, &NormalizerConfig::default()).unwrap();
            assert!(record.is_empty(), "block {block:?} should be empty");
            assert_eq!(record.label(), None);
            assert!(record.arcs().is_empty());
            assert_eq!(record.text(), "");
        }
    }

    #[test]
    fn test_identifier_without_arcs_is_rejected() {
        let err = SentenceRecord::parse("lonely\n", &NormalizerConfig::default()).unwrap_err();
        assert!(matches!(err, SubwordError::Format { .. }));
    }

    #[test]
    fn test_malformed_arc_fails_whole_sentence() {
        let block = "s\n0 1 a -1\n1 2 b";
        let err = SentenceRecord::parse(block, &NormalizerConfig::default()).unwrap_err();
        assert!(matches!(err, SubwordError::Format { .. }));
    }

    #[test]
    fn test_zero_start_arc() {
        let block = "s\n1000000000 2000000000 b -1\n0 1000000000 a -1";
        let record = SentenceRecord::parse(block, &NormalizerConfig::default()).unwrap();
        let first = record.zero_start_arc().unwrap();
        assert_eq!(first.token, "a");
        assert_eq!(first.start_time, FieldValue::Number(0.0));
    }

    #[test]
    fn test_zero_start_arc_absent() {
        let block = "s\n1000000 2000000 b -1";
        let record = SentenceRecord::parse(block, &NormalizerConfig::default()).unwrap();
        assert!(record.zero_start_arc().is_none());
        assert!(SentenceRecord::default().zero_start_arc().is_none());
    }

    #[test]
    fn test_display_lists_arcs() {
        let record = SentenceRecord::parse(SENTENCE, &NormalizerConfig::default()).unwrap();
        let shown = record.to_string();
        assert!(shown.starts_with("sent1\n"));
        assert!(shown.contains("0 ---- a / -123.45 ----> 1"));
        assert_eq!(SentenceRecord::default().to_string(), "");
    }
}
