#![forbid(unsafe_code)]

use crate::column::{Column, ColumnBuilder};
use crate::error::FrameError;
use crate::infer::infer_stype;
use crate::source::{RawColumn, Source};
use crate::value::Value;
use std::collections::HashSet;

/// A finished columnar table: uniquely named, typed, equal-length columns.
///
/// Frames are immutable with respect to shape and type once built. A frame
/// with zero columns has zero rows by convention.
#[derive(Debug, PartialEq)]
pub struct Frame {
    pub(crate) names: Vec<String>,
    pub(crate) columns: Vec<Column>,
    pub(crate) nrows: usize,
}

impl Frame {
    /// The empty frame, shape (0, 0). Equivalent to building from no input.
    pub fn new() -> Frame {
        Frame {
            names: Vec::new(),
            columns: Vec::new(),
            nrows: 0,
        }
    }

    /// Build a frame from any recognized source shape.
    ///
    /// Fails with [`FrameError::UnrecognizedSource`] when no adapter matches
    /// the input; no partial frame is returned on any error.
    pub fn from_source(source: impl Into<Source>) -> Result<Frame, FrameError> {
        Self::build(source.into(), None)
    }

    /// Build a frame with an explicit name list.
    ///
    /// Explicit names are honored verbatim and positionally; the list length
    /// must match the source's column count. Duplicates within the list fall
    /// back to default `C<k>` names to preserve uniqueness.
    pub fn with_names<I, S>(source: impl Into<Source>, names: I) -> Result<Frame, FrameError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        Self::build(source.into(), Some(names))
    }

    fn build(source: Source, explicit_names: Option<Vec<String>>) -> Result<Frame, FrameError> {
        let raw: Vec<RawColumn> = source.into_columns()?;

        if let Some(names) = &explicit_names {
            if names.len() != raw.len() {
                return Err(FrameError::InvalidNames {
                    expected: raw.len(),
                    given: names.len(),
                });
            }
        }

        // All columns are reconciled to the longest one; shorter columns are
        // padded with missing markers.
        let nrows = raw.iter().map(|c| c.values.len()).max().unwrap_or(0);

        let mut registry = NameRegistry::new();
        let mut names = Vec::with_capacity(raw.len());
        let mut columns = Vec::with_capacity(raw.len());

        for (index, raw_column) in raw.into_iter().enumerate() {
            let candidate = match &explicit_names {
                Some(list) => Some(list[index].clone()),
                None => raw_column.name,
            };

            let stype = infer_stype(&raw_column.values);
            let mut builder = ColumnBuilder::new(stype, nrows);
            for value in &raw_column.values {
                builder.push(value);
            }
            for _ in raw_column.values.len()..nrows {
                builder.push_missing();
            }

            names.push(registry.resolve(candidate));
            columns.push(builder.finish());
        }

        Ok(Frame {
            names,
            columns,
            nrows,
        })
    }

    /// (row count, column count).
    pub fn shape(&self) -> (usize, usize) {
        (self.nrows, self.columns.len())
    }

    pub fn nrows(&self) -> usize {
        self.nrows
    }

    pub fn ncols(&self) -> usize {
        self.columns.len()
    }

    /// Column names, in insertion order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Logical type labels, one per column.
    pub fn types(&self) -> Vec<&'static str> {
        self.columns.iter().map(|c| c.stype().ltype_name()).collect()
    }

    /// Storage type labels, one per column.
    pub fn stypes(&self) -> Vec<&'static str> {
        self.columns.iter().map(|c| c.stype().stype_name()).collect()
    }

    pub fn column(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Column-major export: one `Vec<Value>` per column, missing slots as
    /// [`Value::None`].
    pub fn to_values(&self) -> Vec<Vec<Value>> {
        self.columns.iter().map(Column::to_values).collect()
    }

    /// Assemble a frame from already-materialized parts, bypassing the
    /// builder. The caller is responsible for the structural invariants; the
    /// consistency checker exists to audit exactly such frames.
    #[cfg(test)]
    pub(crate) fn from_parts(names: Vec<String>, columns: Vec<Column>, nrows: usize) -> Frame {
        Frame {
            names,
            columns,
            nrows,
        }
    }
}

impl Default for Frame {
    fn default() -> Self {
        Frame::new()
    }
}

/// Tracks names assigned within one build so no two columns collide.
///
/// Default names are `C1`, `C2`, …; the counter advances past any name that
/// is already taken, whether it was user-supplied or previously defaulted.
struct NameRegistry {
    used: HashSet<String>,
    next_default: usize,
}

impl NameRegistry {
    fn new() -> Self {
        Self {
            used: HashSet::new(),
            next_default: 0,
        }
    }

    fn resolve(&mut self, candidate: Option<String>) -> String {
        if let Some(name) = candidate {
            if self.used.insert(name.clone()) {
                return name;
            }
        }
        loop {
            self.next_default += 1;
            let name = format!("C{}", self.next_default);
            if self.used.insert(name.clone()) {
                return name;
            }
        }
    }
}
