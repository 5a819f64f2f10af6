//! Generic intermediate document assembled from a message.

use alloc::{borrow::Cow, collections::BTreeMap, vec, vec::Vec};
use core::slice;

use either::Either::{self, Left, Right};

use crate::sans::Value;

/// Decoded fields of one segment occurrence, keyed by 1-based field index.
pub type FieldMap<'a> = BTreeMap<usize, Value<'a>>;

/// Every occurrence of a segment: a lone field map for the first occurrence,
/// converted into a list at the second.
pub type Occurrences<'a> = Either<FieldMap<'a>, Vec<FieldMap<'a>>>;

/// Segment names mapped to their occurrences, in order of first appearance.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Document<'a> {
    segments: Vec<(Cow<'a, str>, Occurrences<'a>)>,
}

impl<'a> Document<'a> {
    /// Add an occurrence of a segment.
    pub fn insert(&mut self, name: Cow<'a, str>, fields: FieldMap<'a>) {
        let Some((_, entry)) = self.segments.iter_mut().find(|(n, _)| *n == name) else {
            self.segments.push((name, Left(fields)));
            return;
        };

        match entry {
            Left(_) => {
                if let Left(first) = core::mem::replace(entry, Right(Vec::new())) {
                    *entry = Right(vec![first, fields]);
                }
            }
            Right(list) => list.push(fields),
        }
    }

    /// Retrieve the occurrences of a segment, as stored.
    pub fn get(&self, name: &str) -> Option<&Occurrences<'a>> {
        self.segments
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, entry)| entry)
    }

    /// Retrieve the occurrences of a segment in message order, empty if the
    /// segment is absent.
    pub fn occurrences(&self, name: &str) -> &[FieldMap<'a>] {
        match self.get(name) {
            Some(Left(fields)) => slice::from_ref(fields),
            Some(Right(list)) => list,
            None => &[],
        }
    }

    /// Iterate over segment names and their occurrences.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Occurrences<'a>)> {
        self.segments.iter().map(|(n, entry)| (n.as_ref(), entry))
    }

    /// Number of distinct segment names.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(text: &'static str) -> FieldMap<'static> {
        FieldMap::from([(1, Value::Scalar(text.into()))])
    }

    #[test]
    fn stores_first_occurrence_alone() {
        let mut d = Document::default();
        d.insert("EVN".into(), fields("A01"));

        assert_eq!(d.get("EVN"), Some(&Left(fields("A01"))));
        assert_eq!(d.occurrences("EVN"), &[fields("A01")]);
    }

    #[test]
    fn converts_to_list_at_second_occurrence() {
        let mut d = Document::default();
        d.insert("OBX".into(), fields("1"));
        d.insert("PID".into(), fields("P"));
        d.insert("OBX".into(), fields("2"));
        d.insert("OBX".into(), fields("3"));

        let Some(Right(list)) = d.get("OBX") else {
            panic!("expected a list of occurrences");
        };

        assert_eq!(list, &[fields("1"), fields("2"), fields("3")]);
        assert_eq!(d.occurrences("PID").len(), 1);
        assert_eq!(d.len(), 2);
    }

    #[test]
    fn keeps_order_of_first_appearance() {
        let mut d = Document::default();
        for name in ["MSH", "PID", "OBR", "OBX", "PID", "NTE"] {
            d.insert(name.into(), FieldMap::new());
        }

        let names = d.iter().map(|(n, _)| n);
        assert!(names.eq(["MSH", "PID", "OBR", "OBX", "NTE"]));
    }

    #[test]
    fn absent_segment_has_no_occurrences() {
        let d = Document::default();

        assert!(d.is_empty());
        assert_eq!(d.get("PV1"), None);
        assert!(d.occurrences("PV1").is_empty());
    }
}
