#![forbid(unsafe_code)]

use crate::stype::Stype;
use crate::value::Value;

/// Decide the narrowest storage type covering every non-missing value.
///
/// Missing markers are skipped for classification but still occupy a row
/// slot; a column that is empty or entirely missing carries no constraint
/// and defaults to `Bool`.
pub fn infer_stype(values: &[Value]) -> Stype {
    values
        .iter()
        .filter_map(Value::stype)
        .reduce(Stype::promote)
        .unwrap_or(Stype::Bool)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_column_defaults_to_bool() {
        assert_eq!(infer_stype(&[]), Stype::Bool);
    }

    #[test]
    fn all_missing_defaults_to_bool() {
        assert_eq!(infer_stype(&[Value::None, Value::None]), Stype::Bool);
    }

    #[test]
    fn missing_contributes_no_constraint() {
        let values = [Value::Int(1), Value::None, Value::Int(2)];
        assert_eq!(infer_stype(&values), Stype::Int);
    }

    #[test]
    fn mixed_numeric_promotes_to_real() {
        let values = [Value::Bool(true), Value::Int(4), Value::Real(0.5)];
        assert_eq!(infer_stype(&values), Stype::Real);
    }

    #[test]
    fn string_dominates_numerics() {
        let values = [
            Value::Int(-1),
            Value::Int(2),
            Value::Int(5),
            Value::from("hooray"),
        ];
        assert_eq!(infer_stype(&values), Stype::Str);
    }
}
