//! Default configuration constants for subword-embed.
//!
//! Label-format constants are fixed by the HTK MLF convention; the rest are
//! defaults for values the user can override through config or CLI.

/// Label file times are integer units of 1e-9 seconds.
pub const TIME_SCALE_FACTOR: f64 = 1e9;

/// Arc times are rounded to this many decimal places after scaling.
pub const DECIMAL_PLACES: usize = 6;

/// Lines starting with this marker are comments (this also drops the `#!MLF!#` header).
pub const COMMENT_MARKER: char = '#';

/// A line holding only this string ends a sentence.
pub const SENTENCE_DELIMITER: &str = ".";

/// Separator between a subword and its position code (`b^I`).
pub const POSITION_MARKER: char = '^';

/// Length of a position code (`^` followed by one of `I`, `M`, `F`).
pub const POSITION_INFO_LEN: usize = 2;

/// Trailing marker for an apostrophe on a position code, and the token emitted for it.
pub const APOSTROPHE_TOKEN: &str = "A";

/// Largest supported subword context (triphone).
pub const MAX_CONTEXT_WIDTH: usize = 3;

/// Default subword context width (monophone/monographeme).
pub const CONTEXT_WIDTH: usize = 1;

/// Sentence-end sentinel written by word2vec as the first vocabulary row.
pub const SENTENCE_END_TOKEN: &str = "</s>";

/// Symbols present in every label set, mapped to themselves for display.
///
/// `sp`/`sil` are short pause and silence; `G00`/`G01` are hesitations.
pub const SPECIAL_SYMBOLS: &[&str] = &["sp", "sil", "G00", "G01"];

/// Default corpus output path.
pub const SUBWORD_CORPUS: &str = "results/subword-corpus.dat";

/// Default unique-subword list output path.
pub const UNIQUE_SUBWORDS: &str = "results/unique-subword-list.json";

/// Default embedding directory.
pub const EMBEDDING_DIR: &str = "results/embedding";

/// Name of the embedding file inside the embedding directory.
pub const EMBEDDING_FILE: &str = "embedding.txt";

/// Default visualisation image path.
pub const VISUALISATION_IMAGE: &str = "results/embedding/visualisation.svg";

/// Default summary (label mapping) file.
pub const SUMMARY_FILE: &str = "data/summary.txt";

/// Default embedding vector length.
///
/// Phone and grapheme inventories are small, so a very short vector is enough.
pub const VEC_LENGTH: usize = 4;

/// Default t-SNE perplexity.
pub const PERPLEXITY: f64 = 5.0;

/// Default t-SNE learning rate.
pub const LEARNING_RATE: f64 = 200.0;

/// Default number of t-SNE gradient steps.
pub const TSNE_ITERATIONS: usize = 20_000;

/// Default fastText executable.
pub const FASTTEXT_BIN: &str = "fasttext";
