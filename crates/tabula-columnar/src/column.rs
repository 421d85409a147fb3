#![forbid(unsafe_code)]

use crate::bitmap::BitVec;
use crate::stype::Stype;
use crate::value::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// A single typed, fixed-length column with missing-value support.
///
/// Storage is packed per stype: bools are bit-packed, ints are `i64`, reals
/// are `f64`, and strings are dictionary-interned `u32` indices. A validity
/// bitmap marks which slots hold a materialized value; clear bits are the
/// missing marker.
#[derive(Clone, Debug, PartialEq)]
pub struct Column {
    pub(crate) data: ColumnData,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum ColumnData {
    Bool {
        values: BitVec,
        validity: BitVec,
    },
    Int {
        values: Vec<i64>,
        validity: BitVec,
    },
    Real {
        values: Vec<f64>,
        validity: BitVec,
    },
    Str {
        dictionary: Vec<Arc<str>>,
        indices: Vec<u32>,
        validity: BitVec,
    },
}

impl Column {
    pub fn stype(&self) -> Stype {
        match self.data {
            ColumnData::Bool { .. } => Stype::Bool,
            ColumnData::Int { .. } => Stype::Int,
            ColumnData::Real { .. } => Stype::Real,
            ColumnData::Str { .. } => Stype::Str,
        }
    }

    pub fn len(&self) -> usize {
        match &self.data {
            ColumnData::Bool { values, .. } => values.len(),
            ColumnData::Int { values, .. } => values.len(),
            ColumnData::Real { values, .. } => values.len(),
            ColumnData::Str { indices, .. } => indices.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_missing(&self, row: usize) -> bool {
        !self.validity().get(row)
    }

    /// Value at `row`; missing slots come back as [`Value::None`].
    pub fn get(&self, row: usize) -> Value {
        if self.is_missing(row) {
            return Value::None;
        }
        match &self.data {
            ColumnData::Bool { values, .. } => Value::Bool(values.get(row)),
            ColumnData::Int { values, .. } => Value::Int(values[row]),
            ColumnData::Real { values, .. } => Value::Real(values[row]),
            ColumnData::Str {
                dictionary,
                indices,
                ..
            } => Value::Str(dictionary[indices[row] as usize].clone()),
        }
    }

    /// Materialize the column as plain values, missing slots as
    /// [`Value::None`].
    pub fn to_values(&self) -> Vec<Value> {
        (0..self.len()).map(|row| self.get(row)).collect()
    }

    pub fn missing_count(&self) -> usize {
        self.len() - self.validity().count_ones()
    }

    pub(crate) fn validity(&self) -> &BitVec {
        match &self.data {
            ColumnData::Bool { validity, .. } => validity,
            ColumnData::Int { validity, .. } => validity,
            ColumnData::Real { validity, .. } => validity,
            ColumnData::Str { validity, .. } => validity,
        }
    }
}

/// Materializes one column of a known stype from raw values.
///
/// Values below the target stype on the promotion chain are up-converted
/// (`bool -> int -> real`; anything formats into `str`). Raw values that
/// cannot convert are recorded as missing, which the single-pass inference
/// guarantees never happens on the construction path.
pub(crate) enum ColumnBuilder {
    Bool(BoolBuilder),
    Int(IntBuilder),
    Real(RealBuilder),
    Str(StrBuilder),
}

impl ColumnBuilder {
    pub fn new(stype: Stype, capacity: usize) -> Self {
        match stype {
            Stype::Bool => ColumnBuilder::Bool(BoolBuilder::new(capacity)),
            Stype::Int => ColumnBuilder::Int(IntBuilder::new(capacity)),
            Stype::Real => ColumnBuilder::Real(RealBuilder::new(capacity)),
            Stype::Str => ColumnBuilder::Str(StrBuilder::new(capacity)),
        }
    }

    pub fn push(&mut self, value: &Value) {
        match self {
            ColumnBuilder::Bool(b) => b.push(value),
            ColumnBuilder::Int(b) => b.push(value),
            ColumnBuilder::Real(b) => b.push(value),
            ColumnBuilder::Str(b) => b.push(value),
        }
    }

    pub fn push_missing(&mut self) {
        self.push(&Value::None);
    }

    pub fn finish(self) -> Column {
        match self {
            ColumnBuilder::Bool(b) => b.finish(),
            ColumnBuilder::Int(b) => b.finish(),
            ColumnBuilder::Real(b) => b.finish(),
            ColumnBuilder::Str(b) => b.finish(),
        }
    }
}

pub(crate) struct BoolBuilder {
    values: BitVec,
    validity: BitVec,
}

impl BoolBuilder {
    fn new(capacity: usize) -> Self {
        Self {
            values: BitVec::with_capacity_bits(capacity),
            validity: BitVec::with_capacity_bits(capacity),
        }
    }

    fn push(&mut self, value: &Value) {
        match value {
            Value::Bool(v) => {
                self.values.push(*v);
                self.validity.push(true);
            }
            _ => {
                self.values.push(false);
                self.validity.push(false);
            }
        }
    }

    fn finish(self) -> Column {
        Column {
            data: ColumnData::Bool {
                values: self.values,
                validity: self.validity,
            },
        }
    }
}

pub(crate) struct IntBuilder {
    values: Vec<i64>,
    validity: BitVec,
}

impl IntBuilder {
    fn new(capacity: usize) -> Self {
        Self {
            values: Vec::with_capacity(capacity),
            validity: BitVec::with_capacity_bits(capacity),
        }
    }

    fn push(&mut self, value: &Value) {
        let converted = match value {
            Value::Bool(v) => Some(i64::from(*v)),
            Value::Int(v) => Some(*v),
            _ => None,
        };
        match converted {
            Some(v) => {
                self.values.push(v);
                self.validity.push(true);
            }
            None => {
                self.values.push(0);
                self.validity.push(false);
            }
        }
    }

    fn finish(self) -> Column {
        Column {
            data: ColumnData::Int {
                values: self.values,
                validity: self.validity,
            },
        }
    }
}

pub(crate) struct RealBuilder {
    values: Vec<f64>,
    validity: BitVec,
}

impl RealBuilder {
    fn new(capacity: usize) -> Self {
        Self {
            values: Vec::with_capacity(capacity),
            validity: BitVec::with_capacity_bits(capacity),
        }
    }

    fn push(&mut self, value: &Value) {
        let converted = match value {
            Value::Bool(v) => Some(f64::from(u8::from(*v))),
            Value::Int(v) => Some(*v as f64),
            Value::Real(v) => Some(*v),
            _ => None,
        };
        match converted {
            Some(v) => {
                self.values.push(v);
                self.validity.push(true);
            }
            None => {
                self.values.push(0.0);
                self.validity.push(false);
            }
        }
    }

    fn finish(self) -> Column {
        Column {
            data: ColumnData::Real {
                values: self.values,
                validity: self.validity,
            },
        }
    }
}

pub(crate) struct StrBuilder {
    dictionary: Vec<Arc<str>>,
    dict_map: HashMap<Arc<str>, u32>,
    indices: Vec<u32>,
    validity: BitVec,
}

impl StrBuilder {
    fn new(capacity: usize) -> Self {
        Self {
            dictionary: Vec::new(),
            dict_map: HashMap::new(),
            indices: Vec::with_capacity(capacity),
            validity: BitVec::with_capacity_bits(capacity),
        }
    }

    fn intern(&mut self, s: Arc<str>) -> u32 {
        if let Some(idx) = self.dict_map.get(s.as_ref()) {
            return *idx;
        }
        let idx = self.dictionary.len() as u32;
        self.dictionary.push(s.clone());
        self.dict_map.insert(s, idx);
        idx
    }

    fn push(&mut self, value: &Value) {
        let interned = match value {
            Value::None => None,
            Value::Str(s) => Some(self.intern(s.clone())),
            // Numeric and bool values in a str column were out-voted by
            // promotion; store their textual form.
            other => Some(self.intern(Arc::from(other.to_string().as_str()))),
        };
        match interned {
            Some(idx) => {
                self.indices.push(idx);
                self.validity.push(true);
            }
            None => {
                self.indices.push(0);
                self.validity.push(false);
            }
        }
    }

    fn finish(self) -> Column {
        Column {
            data: ColumnData::Str {
                dictionary: self.dictionary,
                indices: self.indices,
                validity: self.validity,
            },
        }
    }
}
