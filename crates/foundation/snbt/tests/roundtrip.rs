//! Property-based round trips: any tree built through the value model must read back
//! structurally equal after being written with any option set that keeps strings quoted.

use proptest::prelude::*;
use prismarine_anchor_snbt::{
    EntryComparator, LetterCase, SnbtCompound, SnbtList, SnbtTag, SnbtWriteOptions, SuffixCase,
    ordering, parse, parse_any, stringify, stringify_compound,
};


// ================================
//      Strategies
// ================================

fn arb_string() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9._+-]{0,12}",
        any::<String>(),
        Just("5".to_owned()),
        Just("true".to_owned()),
        Just("1.5e3".to_owned()),
        Just("300b".to_owned()),
        Just("say \"hi\"".to_owned()),
        Just("it's".to_owned()),
        Just("back\\slash".to_owned()),
        Just("line1\nline2".to_owned()),
    ]
}

fn arb_primitive() -> impl Strategy<Value = SnbtTag> {
    prop_oneof![
        arb_string().prop_map(SnbtTag::from),
        any::<i8>().prop_map(SnbtTag::Byte),
        any::<i16>().prop_map(SnbtTag::Short),
        any::<i32>().prop_map(SnbtTag::Int),
        any::<i64>().prop_map(SnbtTag::Long),
        any::<f32>()
            .prop_filter("NaN is written as 0", |value| !value.is_nan())
            .prop_map(SnbtTag::Float),
        any::<f64>()
            .prop_filter("NaN is written as 0", |value| !value.is_nan())
            .prop_map(SnbtTag::double),
        prop::collection::vec(any::<i8>(), 0..6).prop_map(SnbtTag::ByteArray),
        prop::collection::vec(any::<i32>(), 0..6).prop_map(SnbtTag::IntArray),
        prop::collection::vec(any::<i64>(), 0..6).prop_map(SnbtTag::LongArray),
    ]
}

/// Keeps the elements sharing the first element's type, so the list is homogeneous.
fn homogeneous(tags: Vec<SnbtTag>) -> SnbtList {
    let mut list = SnbtList::new();
    for tag in tags {
        // Elements of another type are skipped
        let _ = list.push(tag);
    }
    list
}

fn arb_tag() -> impl Strategy<Value = SnbtTag> {
    arb_primitive().prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec((arb_string(), inner.clone()), 0..6)
                .prop_map(|entries| SnbtTag::Compound(entries.into_iter().collect())),
            prop::collection::vec(inner, 0..6)
                .prop_map(|tags| SnbtTag::List(homogeneous(tags))),
        ]
    })
}

fn arb_compound() -> impl Strategy<Value = SnbtCompound> {
    prop::collection::vec((arb_string(), arb_tag()), 0..6)
        .prop_map(|entries| entries.into_iter().collect())
}

fn arb_sort() -> impl Strategy<Value = Option<EntryComparator>> {
    prop_oneof![
        Just(None),
        Just(Some(ordering::by_key as EntryComparator)),
        Just(Some(ordering::by_type as EntryComparator)),
        Just(Some(ordering::by_type_then_key as EntryComparator)),
    ]
}

/// Every option set which keeps strings quoted and whitespace in place.
fn arb_options() -> impl Strategy<Value = SnbtWriteOptions> {
    (
        prop_oneof![Just("\t"), Just("  "), Just("")],
        any::<[bool; 5]>(),
        arb_sort(),
        prop_oneof![Just(LetterCase::Lower), Just(LetterCase::Upper)],
    )
        .prop_map(|(indent, flags, sort, case)| {
            let [bracket_on_new_line, collapse_brackets, expand_primitives, trailing_comma, quote_keys] = flags;
            SnbtWriteOptions {
                indent: indent.into(),
                bracket_on_new_line,
                collapse_brackets,
                expand_primitives,
                trailing_comma,
                sort,
                quote_keys,
                unquote_strings: false,
                deflate: false,
                suffix_case: SuffixCase::all(case),
            }
        })
}


// ================================
//      Properties
// ================================

proptest! {
    #[test]
    fn tags_round_trip(tag in arb_tag(), opts in arb_options()) {
        let text = stringify(&tag, &opts);
        let parsed = parse_any(&text);
        prop_assert!(parsed.is_ok(), "failed to read back {text:?}: {parsed:?}");
        prop_assert_eq!(parsed.unwrap(), tag);
    }

    #[test]
    fn compounds_round_trip(compound in arb_compound(), opts in arb_options()) {
        let text = stringify_compound(&compound, &opts);
        let parsed = parse(&text);
        prop_assert!(parsed.is_ok(), "failed to read back {text:?}: {parsed:?}");
        prop_assert_eq!(parsed.unwrap(), compound);
    }

    #[test]
    fn deflated_output_round_trips(tag in arb_tag()) {
        let text = stringify(&tag, &SnbtWriteOptions::deflated());
        prop_assert_eq!(parse_any(&text).unwrap(), tag);
    }

    #[test]
    fn writing_is_idempotent(compound in arb_compound(), opts in arb_options()) {
        let text = stringify_compound(&compound, &opts);
        let reparsed = parse(&text).unwrap();
        prop_assert_eq!(stringify_compound(&reparsed, &opts), text);
    }
}
