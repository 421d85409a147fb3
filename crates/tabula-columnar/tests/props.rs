use proptest::prelude::*;
use tabula_columnar::{infer_stype, Frame, Source, Stype, Value};

fn arb_stype() -> impl Strategy<Value = Stype> {
    prop_oneof![
        Just(Stype::Bool),
        Just(Stype::Int),
        Just(Stype::Real),
        Just(Stype::Str),
    ]
}

fn arb_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::None),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Int),
        any::<f64>().prop_map(Value::Real),
        "[a-z]{0,8}".prop_map(|s| Value::from(s.as_str())),
    ]
}

proptest! {
    #[test]
    fn promote_is_commutative(a in arb_stype(), b in arb_stype()) {
        prop_assert_eq!(a.promote(b), b.promote(a));
    }

    #[test]
    fn promote_is_associative(a in arb_stype(), b in arb_stype(), c in arb_stype()) {
        prop_assert_eq!(a.promote(b).promote(c), a.promote(b.promote(c)));
    }

    #[test]
    fn promote_is_idempotent_with_bool_identity(a in arb_stype()) {
        prop_assert_eq!(a.promote(a), a);
        // Bool is the lattice bottom: promoting with it never changes a type.
        prop_assert_eq!(a.promote(Stype::Bool), a);
    }

    #[test]
    fn inference_is_order_independent(mut values in prop::collection::vec(arb_value(), 0..24)) {
        let forward = infer_stype(&values);
        values.reverse();
        prop_assert_eq!(infer_stype(&values), forward);
    }

    #[test]
    fn flat_frames_have_one_column_and_check_clean(
        values in prop::collection::vec(arb_value(), 1..32),
    ) {
        let frame = Frame::from_source(Source::flat(values.clone())).unwrap();
        prop_assert_eq!(frame.shape(), (values.len(), 1));
        prop_assert_eq!(frame.types()[0], infer_stype(&values).ltype_name());
        prop_assert!(frame.check());
    }

    #[test]
    fn ragged_nested_frames_pad_to_longest(
        columns in prop::collection::vec(prop::collection::vec(arb_value(), 0..16), 1..6),
    ) {
        let longest = columns.iter().map(Vec::len).max().unwrap_or(0);
        let frame = Frame::from_source(Source::nested(columns.clone())).unwrap();
        prop_assert_eq!(frame.shape(), (longest, columns.len()));
        prop_assert!(frame.check());
        for (index, column) in columns.iter().enumerate() {
            let stored = frame.column(index).unwrap();
            prop_assert_eq!(stored.len(), longest);
            // Everything past the raw length must be a missing marker.
            for row in column.len()..longest {
                prop_assert!(stored.is_missing(row));
            }
        }
    }

    #[test]
    fn default_names_are_unique(ncols in 1usize..12) {
        let frame = Frame::from_source(Source::nested(
            (0..ncols).map(|c| vec![Value::Int(c as i64)]).collect::<Vec<_>>(),
        ))
        .unwrap();
        let expected: Vec<String> = (1..=ncols).map(|k| format!("C{k}")).collect();
        prop_assert_eq!(frame.names(), &expected[..]);
    }
}
