//! Orderings of compound entries, for use as [`SnbtWriteOptions::sort`].
//!
//! Sorting only affects how a compound is written; it never reorders the compound itself,
//! and entries which compare equal keep their insertion order.
//!
//! [`SnbtWriteOptions::sort`]: crate::SnbtWriteOptions::sort

use std::cmp::Ordering;

use super::{SnbtList, SnbtTag};


/// A comparison of two compound entries, given as `(key, value)` pairs.
pub type EntryComparator = fn((&str, &SnbtTag), (&str, &SnbtTag)) -> Ordering;


/// Orders entries by key, ignoring case, with ties broken by the case-sensitive order.
pub fn by_key(lhs: (&str, &SnbtTag), rhs: (&str, &SnbtTag)) -> Ordering {
    let (lhs, rhs) = (lhs.0, rhs.0);

    lhs.chars()
        .flat_map(char::to_lowercase)
        .cmp(rhs.chars().flat_map(char::to_lowercase))
        .then_with(|| lhs.cmp(rhs))
}

/// Orders entries by the precedence of their values' types, from String to List
/// (see [`TagType`](super::TagType)).
///
/// Lists are ordered among themselves by their element types, which are compared the same
/// way; an empty list comes before any non-empty list.
pub fn by_type(lhs: (&str, &SnbtTag), rhs: (&str, &SnbtTag)) -> Ordering {
    compare_types(lhs.1, rhs.1)
}

/// Orders entries with [`by_type`], then with [`by_key`].
pub fn by_type_then_key(lhs: (&str, &SnbtTag), rhs: (&str, &SnbtTag)) -> Ordering {
    by_type(lhs, rhs).then_with(|| by_key(lhs, rhs))
}

fn compare_types(lhs: &SnbtTag, rhs: &SnbtTag) -> Ordering {
    match (lhs, rhs) {
        (SnbtTag::List(lhs), SnbtTag::List(rhs)) => compare_element_types(lhs, rhs),
        _ => lhs.tag_type().cmp(&rhs.tag_type()),
    }
}

fn compare_element_types(lhs: &SnbtList, rhs: &SnbtList) -> Ordering {
    match (lhs.first(), rhs.first()) {
        (Some(lhs), Some(rhs)) => compare_types(lhs, rhs),
        (lhs, rhs) => lhs.is_some().cmp(&rhs.is_some()),
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(entries: &[(&'static str, SnbtTag)], comparator: EntryComparator) -> Vec<&'static str> {
        let mut entries: Vec<(&str, &SnbtTag)> = entries
            .iter()
            .map(|(key, value)| (*key, value))
            .collect();
        entries.sort_by(|lhs, rhs| comparator(*lhs, *rhs));
        entries.into_iter().map(|(key, _)| key).collect()
    }

    #[test]
    fn keys_ignore_case_first() {
        let entries = [
            ("b", SnbtTag::Int(0)),
            ("B", SnbtTag::Int(0)),
            ("a", SnbtTag::Int(0)),
            ("C", SnbtTag::Int(0)),
        ];
        assert_eq!(sorted(&entries, by_key), ["a", "B", "b", "C"]);
    }

    #[test]
    fn types_follow_precedence() {
        let entries = [
            ("list",   SnbtTag::List(SnbtList::new())),
            ("int",    SnbtTag::Int(0)),
            ("string", SnbtTag::from("x")),
            ("ints",   SnbtTag::IntArray(vec![])),
            ("byte",   SnbtTag::Byte(0)),
        ];
        assert_eq!(sorted(&entries, by_type), ["string", "byte", "int", "ints", "list"]);
    }

    #[test]
    fn lists_compare_by_element_type() {
        let list_of = |tag: SnbtTag| SnbtTag::List(SnbtList::try_from(vec![tag]).unwrap());

        let entries = [
            ("longs",   list_of(SnbtTag::Long(0))),
            ("strings", list_of(SnbtTag::from("x"))),
            ("nested",  list_of(list_of(SnbtTag::Byte(0)))),
            ("nested2", list_of(list_of(SnbtTag::Short(0)))),
            ("empty",   SnbtTag::List(SnbtList::new())),
        ];
        assert_eq!(
            sorted(&entries, by_type),
            ["empty", "strings", "longs", "nested", "nested2"],
        );
    }

    #[test]
    fn ties_keep_insertion_order() {
        let entries = [
            ("z", SnbtTag::Int(0)),
            ("y", SnbtTag::Byte(0)),
            ("x", SnbtTag::Int(0)),
        ];
        assert_eq!(sorted(&entries, by_type), ["y", "z", "x"]);
        assert_eq!(sorted(&entries, by_type_then_key), ["y", "x", "z"]);
    }
}
