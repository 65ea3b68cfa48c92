//! 2D visualisation of subword embeddings.

pub mod svg;
pub mod tsne;

pub use tsne::Tsne;

use crate::embedding::EmbeddingTable;
use crate::error::Result;
use crate::labels::LabelMap;
use std::fs;
use std::path::Path;
use tracing::info;

/// Trait for dimensionality reduction to the plane.
///
/// This trait allows swapping t-SNE for a cheaper projection in tests.
pub trait Projector {
    /// Project high-dimensional points to 2D, one output per input, same order.
    fn project(&self, points: &[Vec<f64>]) -> Vec<[f64; 2]>;
}

/// A projected subword with its display label.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelledPoint {
    pub token: String,
    pub label: String,
    pub position: [f64; 2],
}

/// Label every subword row of the table and project it to 2D.
///
/// Labels are resolved before projecting, so an unmapped subword fails fast
/// under [`FallbackPolicy::Error`](crate::labels::FallbackPolicy::Error).
pub fn project_embedding(
    table: &EmbeddingTable,
    labels: &LabelMap,
    projector: &dyn Projector,
) -> Result<Vec<LabelledPoint>> {
    let rows: Vec<_> = table.subword_rows().collect();
    let display = rows
        .iter()
        .map(|row| labels.lookup(&row.token).map(str::to_string))
        .collect::<Result<Vec<_>>>()?;

    let vectors: Vec<Vec<f64>> = rows.iter().map(|row| row.vector.clone()).collect();
    let positions = projector.project(&vectors);

    Ok(rows
        .into_iter()
        .zip(display)
        .zip(positions)
        .map(|((row, label), position)| LabelledPoint {
            token: row.token.clone(),
            label,
            position,
        })
        .collect())
}

/// Read an embedding file, project it and write the SVG plot.
///
/// Returns the table so callers can export the vectors.
pub fn visualise_embedding(
    embedding_path: &Path,
    labels: &LabelMap,
    projector: &dyn Projector,
    image_path: &Path,
) -> Result<EmbeddingTable> {
    let table = EmbeddingTable::from_file(embedding_path)?;
    info!(
        path = %embedding_path.display(),
        subwords = table.subword_rows().count(),
        dimension = table.dimension(),
        "Projecting embedding"
    );

    let points = project_embedding(&table, labels, projector)?;
    if let Some(parent) = image_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(image_path, svg::render(&points))?;
    info!(path = %image_path.display(), "Saved visualisation");
    Ok(table)
}
