//! Bounded textual rendering of a dataset for LLM context.
//!
//! The bound exists solely to keep context usage predictable: at most
//! [`MAX_SAMPLE_ROWS`] rows, each cell capped at [`MAX_CELL_WIDTH`]
//! characters, the whole text truncated to [`MAX_SUMMARY_CHARS`] characters
//! with an explicit marker when cut. Sampling uses a fixed seed, so the same
//! dataset always summarizes to the same text.

use rand::{rngs::StdRng, SeedableRng};

use crate::records::Tabular;

/// Rows drawn from a dataset larger than this are a fixed-seed sample.
pub const MAX_SAMPLE_ROWS: usize = 80;

/// Upper bound on summary length, excluding the truncation marker.
pub const MAX_SUMMARY_CHARS: usize = 12_000;

/// Per-cell width cap, to bound pathological long-text fields.
pub const MAX_CELL_WIDTH: usize = 200;

/// Appended when the rendered text was cut at [`MAX_SUMMARY_CHARS`].
pub const TRUNCATION_MARKER: &str = "\n... (truncated)";

const SAMPLE_SEED: u64 = 42;

/// Samples and truncates a dataset to text for LLM context, using the
/// default bounds.
pub fn summarize_for_llm<T: Tabular>(rows: &[T]) -> String {
    summarize(rows, MAX_SAMPLE_ROWS, MAX_SUMMARY_CHARS)
}

/// Samples and truncates a dataset to text with explicit bounds.
pub fn summarize<T: Tabular>(rows: &[T], max_rows: usize, max_chars: usize) -> String {
    let sampled: Vec<&T> = if rows.len() > max_rows {
        let mut rng = StdRng::seed_from_u64(SAMPLE_SEED);
        let mut indices = rand::seq::index::sample(&mut rng, rows.len(), max_rows).into_vec();
        indices.sort_unstable();
        indices.into_iter().map(|i| &rows[i]).collect()
    } else {
        rows.iter().collect()
    };

    let mut text = render_table(&sampled);
    if char_count(&text) > max_chars {
        truncate_chars(&mut text, max_chars);
        text.push_str(TRUNCATION_MARKER);
    }
    text
}

/// Renders rows as an aligned text table with capped cell widths.
fn render_table<T: Tabular>(rows: &[&T]) -> String {
    let headers: Vec<String> = T::COLUMNS.iter().map(|c| c.to_string()).collect();
    let body: Vec<Vec<String>> = rows
        .iter()
        .map(|row| row.cells().into_iter().map(cap_cell).collect())
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| char_count(h)).collect();
    for cells in &body {
        for (w, cell) in widths.iter_mut().zip(cells) {
            *w = (*w).max(char_count(cell));
        }
    }

    let mut lines = Vec::with_capacity(body.len() + 1);
    lines.push(format_row(&headers, &widths));
    for cells in &body {
        lines.push(format_row(cells, &widths));
    }
    lines.join("\n")
}

fn format_row(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, w)| format!("{:<width$}", cell, width = w))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

fn cap_cell(cell: String) -> String {
    if char_count(&cell) > MAX_CELL_WIDTH {
        let mut capped = cell;
        truncate_chars(&mut capped, MAX_CELL_WIDTH);
        capped
    } else {
        cell
    }
}

fn char_count(s: &str) -> usize {
    s.chars().count()
}

/// Truncates to at most `max` characters, on a char boundary.
fn truncate_chars(s: &mut String, max: usize) {
    if let Some((idx, _)) = s.char_indices().nth(max) {
        s.truncate(idx);
    }
}
