#![forbid(unsafe_code)]

use crate::error::FrameError;
use crate::value::Value;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::sync::Arc;

/// A foreign tabular object: named columns over per-column typed storage.
///
/// Implemented by host-side interop shims so new tabular libraries can be
/// adapted without touching the frame builder. Columns are addressed by
/// position; a column whose `name` is `None` receives a default name.
pub trait TabularSource {
    fn ncols(&self) -> usize;
    fn name(&self, col: usize) -> Option<String>;
    fn values(&self, col: usize) -> Vec<Value>;
}

/// A foreign one-dimensional series object: an optional name plus a buffer.
pub trait SeriesSource {
    fn name(&self) -> Option<String>;
    fn values(&self) -> Vec<Value>;
}

/// One recognized input shape.
///
/// Exactly one variant applies per input; the constructors below perform the
/// structural recognition (empty inputs collapse to [`Source::Empty`], sets
/// deduplicate on entry). Anything that reaches [`Source::Scalar`] has no
/// adapter and fails construction.
pub enum Source {
    /// No input at all; builds a frame of shape (0, 0).
    Empty,
    /// A flat sequence of scalars; builds a single-column frame.
    Flat(Vec<Value>),
    /// A sequence of sequences, one column per inner sequence. Inner lengths
    /// may differ; the builder pads shorter columns with missing markers.
    Nested(Vec<Vec<Value>>),
    /// An unordered collection, deduplicated. Row order is the first-seen
    /// order of the host collection's iteration and is stable for the
    /// lifetime of one construction call.
    Set(Vec<Value>),
    /// Key-to-sequence mapping; keys become column names verbatim, in the
    /// order given.
    Mapping(Vec<(String, Vec<Value>)>),
    /// A foreign tabular object adapted through [`TabularSource`].
    Tabular(Box<dyn TabularSource>),
    /// A foreign series object adapted through [`SeriesSource`].
    Series(Box<dyn SeriesSource>),
    /// A bare scalar. No adapter recognizes this shape.
    Scalar(Value),
}

/// One raw column as produced by a source adapter: an optional candidate
/// name plus the column's raw values.
#[derive(Debug)]
pub(crate) struct RawColumn {
    pub name: Option<String>,
    pub values: Vec<Value>,
}

impl RawColumn {
    fn unnamed(values: Vec<Value>) -> Self {
        Self { name: None, values }
    }
}

impl Source {
    /// A flat sequence of scalars. An empty sequence is the empty source.
    pub fn flat<I, V>(values: I) -> Source
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();
        if values.is_empty() {
            Source::Empty
        } else {
            Source::Flat(values)
        }
    }

    /// A sequence of sequences. An empty outer sequence is the empty source;
    /// `[[]]` is a real shape (one column, zero rows).
    pub fn nested<I, C, V>(columns: I) -> Source
    where
        I: IntoIterator<Item = C>,
        C: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let columns: Vec<Vec<Value>> = columns
            .into_iter()
            .map(|c| c.into_iter().map(Into::into).collect())
            .collect();
        if columns.is_empty() {
            Source::Empty
        } else {
            Source::Nested(columns)
        }
    }

    /// An unordered collection. Duplicate scalar values collapse to one row;
    /// the surviving order is first-seen.
    pub fn set<I, V>(values: I) -> Source
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let mut seen: HashSet<ValueKey> = HashSet::new();
        let mut deduped: Vec<Value> = Vec::new();
        for v in values {
            let v = v.into();
            if seen.insert(ValueKey::of(&v)) {
                deduped.push(v);
            }
        }
        if deduped.is_empty() {
            Source::Empty
        } else {
            Source::Set(deduped)
        }
    }

    /// A key-to-sequence mapping, in the order given.
    pub fn mapping<I, K, C, V>(entries: I) -> Source
    where
        I: IntoIterator<Item = (K, C)>,
        K: Into<String>,
        C: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let entries: Vec<(String, Vec<Value>)> = entries
            .into_iter()
            .map(|(k, c)| (k.into(), c.into_iter().map(Into::into).collect()))
            .collect();
        if entries.is_empty() {
            Source::Empty
        } else {
            Source::Mapping(entries)
        }
    }

    pub fn tabular(source: impl TabularSource + 'static) -> Source {
        Source::Tabular(Box::new(source))
    }

    pub fn series(source: impl SeriesSource + 'static) -> Source {
        Source::Series(Box::new(source))
    }

    pub fn scalar(value: impl Into<Value>) -> Source {
        Source::Scalar(value.into())
    }

    /// Runtime category used in the `UnrecognizedSource` message. String
    /// scalars report their content, everything else its type label.
    fn category(value: &Value) -> String {
        match value {
            Value::Str(s) => s.to_string(),
            other => other.type_label().to_owned(),
        }
    }

    /// Run the adapter: yield one raw column per output column, with
    /// candidate names where the shape carries them.
    pub(crate) fn into_columns(self) -> Result<Vec<RawColumn>, FrameError> {
        match self {
            Source::Empty => Ok(Vec::new()),
            Source::Flat(values) | Source::Set(values) => {
                Ok(vec![RawColumn::unnamed(values)])
            }
            Source::Nested(columns) => {
                Ok(columns.into_iter().map(RawColumn::unnamed).collect())
            }
            Source::Mapping(entries) => Ok(entries
                .into_iter()
                .map(|(name, values)| RawColumn {
                    name: Some(name),
                    values,
                })
                .collect()),
            Source::Tabular(table) => Ok((0..table.ncols())
                .map(|col| RawColumn {
                    name: table.name(col),
                    values: table.values(col),
                })
                .collect()),
            Source::Series(series) => Ok(vec![RawColumn {
                name: series.name(),
                values: series.values(),
            }]),
            Source::Scalar(value) => Err(FrameError::UnrecognizedSource {
                category: Self::category(&value),
            }),
        }
    }
}

impl From<Vec<Value>> for Source {
    fn from(values: Vec<Value>) -> Self {
        Source::flat(values)
    }
}

impl From<Vec<Vec<Value>>> for Source {
    fn from(columns: Vec<Vec<Value>>) -> Self {
        Source::nested(columns)
    }
}

impl From<BTreeSet<i64>> for Source {
    fn from(values: BTreeSet<i64>) -> Self {
        Source::set(values)
    }
}

impl From<HashSet<i64>> for Source {
    fn from(values: HashSet<i64>) -> Self {
        Source::set(values)
    }
}

impl From<BTreeMap<String, Vec<Value>>> for Source {
    fn from(entries: BTreeMap<String, Vec<Value>>) -> Self {
        Source::mapping(entries)
    }
}

/// Hash/equality key for deduplicating set input. Reals key by bit pattern,
/// the same trick used to feed them into distinct counters.
#[derive(PartialEq, Eq, Hash)]
enum ValueKey {
    None,
    Bool(bool),
    Int(i64),
    Real(u64),
    Str(Arc<str>),
}

impl ValueKey {
    fn of(value: &Value) -> ValueKey {
        match value {
            Value::None => ValueKey::None,
            Value::Bool(b) => ValueKey::Bool(*b),
            Value::Int(i) => ValueKey::Int(*i),
            Value::Real(r) => ValueKey::Real(r.to_bits()),
            Value::Str(s) => ValueKey::Str(s.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_inputs_collapse_to_empty() {
        assert!(matches!(Source::flat(Vec::<Value>::new()), Source::Empty));
        assert!(matches!(
            Source::nested(Vec::<Vec<Value>>::new()),
            Source::Empty
        ));
    }

    #[test]
    fn single_empty_inner_sequence_is_not_empty() {
        let source = Source::nested(vec![Vec::<Value>::new()]);
        assert!(matches!(source, Source::Nested(ref cols) if cols.len() == 1));
    }

    #[test]
    fn set_deduplicates_with_first_seen_order() {
        let source = Source::set([1i64, 13, 15, 1, 13]);
        let Source::Set(values) = source else {
            panic!("expected set source");
        };
        assert_eq!(
            values,
            vec![Value::Int(1), Value::Int(13), Value::Int(15)]
        );
    }

    #[test]
    fn scalar_string_reports_its_content() {
        let err = Source::scalar("scratch").into_columns().unwrap_err();
        assert_eq!(
            err,
            FrameError::UnrecognizedSource {
                category: "scratch".to_owned()
            }
        );
        assert_eq!(err.to_string(), "Cannot create Frame from 'scratch'");
    }

    #[test]
    fn scalar_number_reports_its_type() {
        let err = Source::scalar(42i64).into_columns().unwrap_err();
        assert_eq!(err.to_string(), "Cannot create Frame from 'int'");
    }
}
