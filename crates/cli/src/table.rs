// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Plain-text tables with left-aligned, per-column colored cells.

use std::io::{self, Write};

use jw_core::StatusColor;

use crate::color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Paint {
    Plain,
    Muted,
    Status,
}

#[derive(Debug, Clone)]
pub struct Column {
    title: &'static str,
    paint: Paint,
    max: Option<usize>,
}

impl Column {
    fn new(title: &'static str, paint: Paint) -> Self {
        Self { title, paint, max: None }
    }

    pub fn left(title: &'static str) -> Self {
        Self::new(title, Paint::Plain)
    }

    /// Secondary information such as ids.
    pub fn muted(title: &'static str) -> Self {
        Self::new(title, Paint::Muted)
    }

    /// Job status, colored by its palette slot.
    pub fn status(title: &'static str) -> Self {
        Self::new(title, Paint::Status)
    }

    /// Truncate cells longer than `max` characters.
    pub fn with_max(mut self, max: usize) -> Self {
        self.max = Some(max);
        self
    }

    fn clip(&self, cell: &str) -> String {
        match self.max {
            Some(max) if cell.chars().count() > max => cell.chars().take(max).collect(),
            _ => cell.to_string(),
        }
    }

    fn paint(&self, padded: &str, status: Option<StatusColor>) -> String {
        match (self.paint, status) {
            (Paint::Muted, _) => color::muted(padded),
            (Paint::Status, Some(status)) => color::status(status, padded),
            _ => padded.to_string(),
        }
    }
}

struct Row {
    cells: Vec<String>,
    status: Option<StatusColor>,
}

pub struct Table {
    columns: Vec<Column>,
    rows: Vec<Row>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns, rows: Vec::new() }
    }

    /// Add a row. Missing trailing cells render empty; extra cells are dropped.
    ///
    /// `status` colors the status column; without it the cell prints plain.
    pub fn row(&mut self, cells: Vec<String>, status: Option<StatusColor>) {
        let cells = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, col)| cells.get(i).map(|c| col.clip(c)).unwrap_or_default())
            .collect();
        self.rows.push(Row { cells, status });
    }

    pub fn render(&self, out: &mut (impl Write + ?Sized)) -> io::Result<()> {
        let widths: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, col)| {
                self.rows
                    .iter()
                    .map(|r| r.cells[i].chars().count())
                    .chain(std::iter::once(col.title.len()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let titles: Vec<String> = self.columns.iter().map(|c| c.title.to_string()).collect();
        self.write_line(out, &widths, &titles, |_, cell| color::header(cell))?;
        for row in &self.rows {
            self.write_line(out, &widths, &row.cells, |col, cell| col.paint(cell, row.status))?;
        }
        Ok(())
    }

    fn write_line(
        &self,
        out: &mut (impl Write + ?Sized),
        widths: &[usize],
        cells: &[String],
        paint: impl Fn(&Column, &str) -> String,
    ) -> io::Result<()> {
        let last = self.columns.len().saturating_sub(1);
        let mut line = String::new();
        for (i, (col, cell)) in self.columns.iter().zip(cells).enumerate() {
            // Cells are left-aligned; the last column is not padded.
            let padded = if i == last {
                cell.clone()
            } else {
                format!("{:<width$}", cell, width = widths[i])
            };
            line.push_str(&paint(col, &padded));
            if i != last {
                line.push_str("  ");
            }
        }
        writeln!(out, "{}", line)
    }
}

#[cfg(test)]
#[path = "table_tests.rs"]
mod tests;
