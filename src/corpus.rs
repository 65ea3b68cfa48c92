//! Subword corpus construction from a label file.

use crate::error::Result;
use crate::mlf::{NormalizerConfig, RawLabelBlock, SentenceRecord};
use std::collections::BTreeSet;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{debug, info};

/// All sentences of one label file and the subword vocabulary they use.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Corpus {
    sentences: Vec<SentenceRecord>,
    subwords: BTreeSet<String>,
}

impl Corpus {
    /// Read and parse a label file.
    ///
    /// Any malformed sentence fails the whole file; no partial corpus is built.
    pub fn from_file(path: &Path, config: &NormalizerConfig) -> Result<Self> {
        info!(path = %path.display(), context_width = %config.context_width, "Reading label file");
        let contents = fs::read_to_string(path)?;
        Self::parse(&contents, config)
    }

    /// Parse label-file text already in memory.
    pub fn parse(contents: &str, config: &NormalizerConfig) -> Result<Self> {
        let mut sentences = Vec::new();
        for block in RawLabelBlock::split_all(contents) {
            let record = SentenceRecord::from_block(&block, config)?;
            if record.is_empty() {
                continue;
            }
            debug!(label = record.label(), arcs = record.arcs().len(), "Parsed sentence");
            sentences.push(record);
        }

        let subwords = sentences
            .iter()
            .flat_map(|sentence| sentence.unique_tokens())
            .map(str::to_string)
            .collect::<BTreeSet<_>>();

        info!(
            sentences = sentences.len(),
            subwords = subwords.len(),
            "Built subword corpus"
        );
        Ok(Self {
            sentences,
            subwords,
        })
    }

    pub fn sentences(&self) -> &[SentenceRecord] {
        &self.sentences
    }

    pub fn sentence_count(&self) -> usize {
        self.sentences.len()
    }

    /// Every distinct token in the corpus, sorted.
    pub fn unique_subwords(&self) -> &BTreeSet<String> {
        &self.subwords
    }

    /// One sentence per line, tokens separated by single spaces.
    pub fn corpus_text(&self) -> String {
        self.sentences
            .iter()
            .map(SentenceRecord::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Write the vocabulary as a sorted JSON array of strings.
    pub fn save_unique_subwords(&self, path: &Path) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, &self.subwords)?;
        writer.flush()?;
        info!(path = %path.display(), "Saved unique subword list");
        Ok(())
    }

    pub fn save_corpus(&self, path: &Path) -> Result<()> {
        fs::write(path, self.corpus_text())?;
        info!(path = %path.display(), "Saved subword corpus");
        Ok(())
    }
}

/// Read a vocabulary written by [`Corpus::save_unique_subwords`].
pub fn load_unique_subwords(path: &Path) -> Result<Vec<String>> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SubwordError;
    use tempfile::TempDir;

    const MLF: &str = "#!MLF!#
\"*/utt1.lab\"
0 1000000000 sil-a+b^I -123.45
1000000000 2000000000 sil -67.8
.
\"*/utt2.lab\"
0 500000000 a-b^IA+c -10.0
500000000 900000000 b-c^F+sil -11.5
900000000 1000000000 sil -1.0
.
";

    #[test]
    fn test_single_sentence_scenario() {
        let input = "sent1\n0 1000000000 sil-a+b^I -123.45\n1000000000 2000000000 sil -67.8\n.\n";
        let corpus = Corpus::parse(input, &NormalizerConfig::default()).unwrap();

        assert_eq!(corpus.sentence_count(), 1);
        assert_eq!(corpus.corpus_text(), "a sil");
        let tokens: Vec<_> = corpus.sentences()[0].arcs().iter().map(|a| a.token.as_str()).collect();
        assert_eq!(tokens, ["a", "sil"]);
    }

    #[test]
    fn test_multi_sentence_corpus() {
        let corpus = Corpus::parse(MLF, &NormalizerConfig::default()).unwrap();

        assert_eq!(corpus.sentence_count(), 2);
        assert_eq!(corpus.corpus_text(), "a sil\nb A c sil");
        assert_eq!(
            corpus.unique_subwords().iter().collect::<Vec<_>>(),
            ["a", "b A", "c", "sil"]
        );
    }

    #[test]
    fn test_corpus_lines_match_non_empty_blocks() {
        let input = "s1\n0 1 a -1\n.\n\n  \n.\ns2\n0 1 b -1\n.\n# end\n";
        let corpus = Corpus::parse(input, &NormalizerConfig::default()).unwrap();
        assert_eq!(corpus.sentence_count(), 2);
        assert_eq!(corpus.corpus_text().split('\n').count(), 2);
    }

    #[test]
    fn test_unique_subwords_is_union_of_sentences() {
        let corpus = Corpus::parse(MLF, &NormalizerConfig::default()).unwrap();
        let union: BTreeSet<String> = corpus
            .sentences()
            .iter()
            .flat_map(|s| s.unique_tokens())
            .map(String::from)
            .collect();
        assert_eq!(corpus.unique_subwords(), &union);
    }

    #[test]
    fn test_position_info_kept() {
        let config = NormalizerConfig::new(1, true).unwrap();
        let corpus = Corpus::parse(MLF, &config).unwrap();
        assert_eq!(corpus.corpus_text(), "a sil\nb^IA c^F sil");
    }

    #[test]
    fn test_wider_context() {
        let config = NormalizerConfig::new(2, false).unwrap();
        let corpus = Corpus::parse(MLF, &config).unwrap();
        assert_eq!(corpus.corpus_text(), "sil a sil\na b A b c sil");
    }

    #[test]
    fn test_empty_input() {
        let corpus = Corpus::parse("", &NormalizerConfig::default()).unwrap();
        assert_eq!(corpus.sentence_count(), 0);
        assert_eq!(corpus.corpus_text(), "");
        assert!(corpus.unique_subwords().is_empty());
    }

    #[test]
    fn test_malformed_line_aborts_file() {
        let input = "s1\n0 1 a -1\n.\ns2\n0 1 b\n.\n";
        let err = Corpus::parse(input, &NormalizerConfig::default()).unwrap_err();
        assert!(matches!(err, SubwordError::Format { .. }));
    }

    #[test]
    fn test_bad_label_shape_aborts_file() {
        let input = "s1\n0 1 a-b -1\n.\n";
        let err = Corpus::parse(input, &NormalizerConfig::default()).unwrap_err();
        assert!(matches!(err, SubwordError::InvalidLabelShape { .. }));
    }

    #[test]
    fn test_from_file_and_save() {
        let dir = TempDir::new().unwrap();
        let mlf_path = dir.path().join("train.mlf");
        fs::write(&mlf_path, MLF).unwrap();

        let corpus = Corpus::from_file(&mlf_path, &NormalizerConfig::default()).unwrap();

        let corpus_path = dir.path().join("corpus.dat");
        corpus.save_corpus(&corpus_path).unwrap();
        assert_eq!(fs::read_to_string(&corpus_path).unwrap(), "a sil\nb A c sil");

        let subwords_path = dir.path().join("unique.json");
        corpus.save_unique_subwords(&subwords_path).unwrap();
        let loaded = load_unique_subwords(&subwords_path).unwrap();
        assert_eq!(loaded, ["a", "b A", "c", "sil"]);
    }

    #[test]
    fn test_from_missing_file_is_io_error() {
        let err = Corpus::from_file(Path::new("/nonexistent/train.mlf"), &NormalizerConfig::default())
            .unwrap_err();
        assert!(matches!(err, SubwordError::Io(_)));
    }
}
