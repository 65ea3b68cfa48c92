//! word2vec text-format embedding tables.
//!
//! The format is a `<count> <dim>` header followed by one
//! `<token> <v0> ... <vn>` row per vocabulary entry.

use crate::defaults::SENTENCE_END_TOKEN;
use crate::error::{Result, SubwordError};
use std::collections::{BTreeMap, HashMap};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddingRow {
    pub token: String,
    pub vector: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddingTable {
    dimension: usize,
    rows: Vec<EmbeddingRow>,
    /// Token → position of its first row.
    index: HashMap<String, usize>,
}

impl EmbeddingTable {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            rows: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self> {
        let mut lines = contents.lines().filter(|line| !line.trim().is_empty());
        let header = lines.next().ok_or_else(|| format_error("missing header line"))?;

        let header_fields: Vec<&str> = header.split_whitespace().collect();
        let &[count, dimension] = header_fields.as_slice() else {
            return Err(format_error(format!(
                "header must be '<count> <dim>', got '{header}'"
            )));
        };
        count
            .parse::<usize>()
            .map_err(|_| format_error(format!("invalid vocabulary count '{count}'")))?;
        let dimension = dimension
            .parse::<usize>()
            .map_err(|_| format_error(format!("invalid dimension '{dimension}'")))?;

        let mut table = Self::new(dimension);
        for line in lines {
            let mut fields = line.split_whitespace();
            let Some(token) = fields.next() else {
                continue;
            };
            let vector = fields
                .map(|value| {
                    value.parse::<f64>().map_err(|_| {
                        format_error(format!("non-numeric component '{value}' for '{token}'"))
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            table.push(token, vector)?;
        }
        Ok(table)
    }

    /// Append a row, checking its dimension.
    pub fn push(&mut self, token: impl Into<String>, vector: Vec<f64>) -> Result<()> {
        let token = token.into();
        if vector.len() != self.dimension {
            return Err(format_error(format!(
                "'{token}' has {} components, expected {}",
                vector.len(),
                self.dimension
            )));
        }
        self.index.entry(token.clone()).or_insert(self.rows.len());
        self.rows.push(EmbeddingRow { token, vector });
        Ok(())
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[EmbeddingRow] {
        &self.rows
    }

    pub fn get(&self, token: &str) -> Option<&[f64]> {
        self.index
            .get(token)
            .map(|&position| self.rows[position].vector.as_slice())
    }

    pub fn contains(&self, token: &str) -> bool {
        self.get(token).is_some()
    }

    /// Rows for real subwords, without the `</s>` sentence-end entry.
    pub fn subword_rows(&self) -> impl Iterator<Item = &EmbeddingRow> {
        self.rows
            .iter()
            .filter(|row| row.token != SENTENCE_END_TOKEN)
    }

    /// Write in word2vec text format with the given header count.
    pub fn write_to<W: Write>(&self, declared_count: usize, writer: &mut W) -> Result<()> {
        writeln!(writer, "{} {}", declared_count, self.dimension)?;
        for row in &self.rows {
            let components = row
                .vector
                .iter()
                .map(f64::to_string)
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(writer, "{} {}", row.token, components)?;
        }
        Ok(())
    }

    pub fn save(&self, declared_count: usize, path: &Path) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_to(declared_count, &mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Export subword vectors as a JSON object keyed by token.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let map: BTreeMap<&str, &[f64]> = self
            .subword_rows()
            .map(|row| (row.token.as_str(), row.vector.as_slice()))
            .collect();
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, &map)?;
        writer.flush()?;
        Ok(())
    }
}

fn format_error(message: impl Into<String>) -> SubwordError {
    SubwordError::EmbeddingFormat {
        message: message.into(),
    }
}
