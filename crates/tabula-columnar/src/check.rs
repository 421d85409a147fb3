#![forbid(unsafe_code)]

use crate::column::ColumnData;
use crate::error::FrameError;
use crate::frame::Frame;
use std::collections::HashSet;
use thiserror::Error;

/// One violated structural invariant, with enough context to locate it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Violation {
    #[error("{names} names for {columns} columns")]
    NameCountMismatch { names: usize, columns: usize },

    #[error("column {column} has {actual} rows, frame has {expected}")]
    LengthMismatch {
        column: usize,
        expected: usize,
        actual: usize,
    },

    #[error("zero-column frame reports {nrows} rows")]
    PhantomRows { nrows: usize },

    #[error("column name '{name}' is used more than once")]
    DuplicateName { name: String },

    #[error("column {column} validity mask covers {validity} of {values} slots")]
    ValidityMismatch {
        column: usize,
        values: usize,
        validity: usize,
    },

    #[error("column {column} row {row} holds dictionary index {index}, dictionary has {dictionary} entries")]
    DictionaryOverflow {
        column: usize,
        row: usize,
        index: u32,
        dictionary: usize,
    },
}

/// The structured result of a consistency pass: every violation found, in
/// column order. An empty report means the frame is sound.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CheckReport {
    pub violations: Vec<Violation>,
}

impl CheckReport {
    pub fn is_ok(&self) -> bool {
        self.violations.is_empty()
    }
}

impl Frame {
    /// Cheap structural sanity check; `true` when every frame invariant
    /// holds. Never mutates the frame.
    pub fn check(&self) -> bool {
        self.check_report().is_ok()
    }

    /// Strict-mode check: error on the first violated invariant.
    ///
    /// Domain violations (a stored value outside its declared storage type)
    /// surface as [`FrameError::StypeOverflow`]; structural violations as
    /// [`FrameError::Inconsistent`].
    pub fn verify(&self) -> Result<(), FrameError> {
        match self.check_report().violations.into_iter().next() {
            None => Ok(()),
            Some(Violation::DictionaryOverflow { column, row, .. }) => {
                Err(FrameError::StypeOverflow {
                    column,
                    row,
                    stype: "str32",
                })
            }
            Some(violation) => Err(FrameError::Inconsistent(violation)),
        }
    }

    /// Full read-only validation pass, collecting every violation.
    pub fn check_report(&self) -> CheckReport {
        let mut violations = Vec::new();

        if self.names.len() != self.columns.len() {
            violations.push(Violation::NameCountMismatch {
                names: self.names.len(),
                columns: self.columns.len(),
            });
        }

        if self.columns.is_empty() && self.nrows != 0 {
            violations.push(Violation::PhantomRows { nrows: self.nrows });
        }

        let mut seen = HashSet::new();
        for name in &self.names {
            if !seen.insert(name.as_str()) {
                violations.push(Violation::DuplicateName { name: name.clone() });
            }
        }

        for (index, column) in self.columns.iter().enumerate() {
            if column.len() != self.nrows {
                violations.push(Violation::LengthMismatch {
                    column: index,
                    expected: self.nrows,
                    actual: column.len(),
                });
            }

            if column.validity().len() != column.len() {
                violations.push(Violation::ValidityMismatch {
                    column: index,
                    values: column.len(),
                    validity: column.validity().len(),
                });
                // Per-row checks below index into the validity mask.
                continue;
            }

            if let ColumnData::Str {
                dictionary,
                indices,
                validity,
            } = &column.data
            {
                for (row, &dict_index) in indices.iter().enumerate() {
                    if validity.get(row) && dict_index as usize >= dictionary.len() {
                        violations.push(Violation::DictionaryOverflow {
                            column: index,
                            row,
                            index: dict_index,
                            dictionary: dictionary.len(),
                        });
                    }
                }
            }
        }

        CheckReport { violations }
    }
}
