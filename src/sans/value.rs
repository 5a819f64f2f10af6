//! Hierarchical decoding of a single field.

use alloc::{borrow::Cow, string::String, vec::Vec};
use core::slice;

use super::delimiters::Delimiters;

/// A decoded field value.
///
/// Subcomponents reuse the [`Value::Component`] shape one level deeper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value<'a> {
    /// Text without any delimiter.
    Scalar(Cow<'a, str>),
    /// Repetitions, in message order.
    Repetition(Vec<Value<'a>>),
    /// Components (or subcomponents). Position `n` is stored at index `n - 1`.
    Component(Vec<Value<'a>>),
}

impl<'a> Value<'a> {
    /// Decode the raw text of a field.
    ///
    /// Levels are checked in order of precedence: repetition, then component,
    /// then subcomponent. The presence of a delimiter always produces its
    /// level's container, and empty slots become empty scalars.
    pub fn build(r: &'a [u8], d: &Delimiters) -> Self {
        if r.contains(&d.repetition) {
            Self::Repetition(split(r, d.repetition).map(|p| Self::build(p, d)).collect())
        } else if r.contains(&d.component) {
            Self::Component(split(r, d.component).map(|p| Self::build(p, d)).collect())
        } else if r.contains(&d.subcomponent) {
            Self::Component(split(r, d.subcomponent).map(Self::text).collect())
        } else {
            Self::text(r)
        }
    }

    /// A scalar from raw text, replacing invalid UTF-8 sequences.
    pub fn text(r: &'a [u8]) -> Self {
        Self::Scalar(String::from_utf8_lossy(r))
    }

    /// The text of a scalar.
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Self::Scalar(s) => Some(s.as_ref()),
            _ => None,
        }
    }

    /// A component by its 1-based position.
    pub fn component(&self, position: usize) -> Option<&Value<'a>> {
        match self {
            Self::Component(parts) => parts.get(position.checked_sub(1)?),
            _ => None,
        }
    }

    /// The repetitions of this value. A value without repetitions is its own
    /// single repetition.
    pub fn repetitions(&self) -> &[Value<'a>] {
        match self {
            Self::Repetition(items) => items,
            _ => slice::from_ref(self),
        }
    }

    /// Detach this value from the message it was decoded from.
    pub fn into_owned(self) -> Value<'static> {
        match self {
            Self::Scalar(s) => Value::Scalar(Cow::Owned(s.into_owned())),
            Self::Repetition(items) => {
                Value::Repetition(items.into_iter().map(Value::into_owned).collect())
            }
            Self::Component(parts) => {
                Value::Component(parts.into_iter().map(Value::into_owned).collect())
            }
        }
    }
}

fn split(r: &[u8], delimiter: u8) -> impl Iterator<Item = &[u8]> {
    r.split(move |b| *b == delimiter)
}

#[cfg(test)]
mod tests {
    extern crate std;

    use std::{vec, vec::Vec};

    use super::*;

    fn build(r: &str) -> Value<'_> {
        Value::build(r.as_bytes(), &Delimiters::default())
    }

    fn scalar(s: &str) -> Value<'_> {
        Value::Scalar(s.into())
    }

    #[test]
    fn builds_scalar() {
        assert_eq!(build("Doe, Jane"), scalar("Doe, Jane"));
        assert_eq!(build(""), scalar(""));
    }

    #[test]
    fn builds_repetitions() {
        assert_eq!(
            build("Doe, Jane~Smith, John"),
            Value::Repetition(vec![scalar("Doe, Jane"), scalar("Smith, John")])
        );
    }

    #[test]
    fn builds_components() {
        let v = build("ORU^R01");

        assert_eq!(v, Value::Component(vec![scalar("ORU"), scalar("R01")]));
        assert_eq!(v.component(1), Some(&scalar("ORU")));
        assert_eq!(v.component(2).and_then(Value::as_scalar), Some("R01"));
        assert_eq!(v.component(0), None);
        assert_eq!(v.component(3), None);
    }

    #[test]
    fn builds_subcomponents_inside_components() {
        assert_eq!(
            build("A&B^C"),
            Value::Component(vec![
                Value::Component(vec![scalar("A"), scalar("B")]),
                scalar("C"),
            ])
        );
        assert_eq!(
            build("A&B"),
            Value::Component(vec![scalar("A"), scalar("B")])
        );
    }

    #[test]
    fn nests_components_inside_repetitions() {
        assert_eq!(
            build("A^B~C"),
            Value::Repetition(vec![
                Value::Component(vec![scalar("A"), scalar("B")]),
                scalar("C"),
            ])
        );
    }

    #[test]
    fn keeps_empty_slots() {
        assert_eq!(
            build("^^X"),
            Value::Component(vec![scalar(""), scalar(""), scalar("X")])
        );
        assert_eq!(
            build("~"),
            Value::Repetition(vec![scalar(""), scalar("")])
        );
    }

    #[test]
    fn component_parts_rejoin_to_input() {
        for r in ["ORU^R01", "^^", "a^^b^", "12345^^^HOSP^MR"] {
            let Value::Component(parts) = build(r) else {
                panic!("expected components for {r:?}");
            };

            let joined = parts
                .iter()
                .map(|p| p.as_scalar().unwrap())
                .collect::<Vec<_>>()
                .join("^");

            assert_eq!(joined, r);
        }
    }

    #[test]
    fn scalar_is_not_decomposed() {
        let v = build("plain text");
        let s = v.as_scalar().unwrap();

        assert_eq!(build(s), v);
        assert_eq!(v.repetitions(), &[v.clone()]);
    }

    #[test]
    fn merges_colliding_levels() {
        let d = Delimiters {
            subcomponent: b'^',
            ..Delimiters::default()
        };

        assert_eq!(
            Value::build(b"A^B", &d),
            Value::Component(vec![scalar("A"), scalar("B")])
        );
    }

    #[test]
    fn ignores_escape_character() {
        assert_eq!(build("a\\F\\b"), scalar("a\\F\\b"));
    }

    #[test]
    fn detaches_from_input() {
        let owned = {
            let r = std::string::String::from("A^B~C");
            build(&r).into_owned()
        };

        assert_eq!(owned.repetitions().len(), 2);
    }
}
