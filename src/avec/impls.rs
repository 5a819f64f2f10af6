//! Receivers for scalar, optional and sequence destinations.

use alloc::{string::String, vec::Vec};
use core::slice;

use super::{
    Decode,
    document::{Document, FieldMap},
    group::Group,
};
use crate::sans::Value;

/// A string receives the text of a scalar. For a composite value, the first
/// component (or repetition) is taken instead.
impl Decode for String {
    fn assign(&mut self, value: &Value<'_>) {
        match value {
            Value::Scalar(s) => {
                self.clear();
                self.push_str(s);
            }
            Value::Component(parts) => {
                if let Some(first) = parts.first() {
                    self.assign(first);
                }
            }
            Value::Repetition(items) => {
                if let Some(first) = items.first() {
                    self.assign(first);
                }
            }
        }
    }
}

/// An option is populated with the default of `T` before receiving a value,
/// and is otherwise left as `None`.
impl<T: Decode + Default> Decode for Option<T> {
    fn assign(&mut self, value: &Value<'_>) {
        self.get_or_insert_with(T::default).assign(value);
    }

    fn assign_segment(&mut self, occurrences: &[FieldMap<'_>]) {
        if !occurrences.is_empty() {
            self.get_or_insert_with(T::default)
                .assign_segment(occurrences);
        }
    }

    /// Only the first element of the group is kept.
    fn assign_group(&mut self, document: &Document<'_>) -> Option<usize> {
        let mut element = T::default();
        let s = element.structure()?;

        let group = Group::new(s.shape());
        let count = group.count(document);

        if count > 0 {
            group.populate(s, document, 0);
            *self = Some(element);
        }

        Some(count)
    }

    fn assign_unmatched(&mut self, document: &Document<'_>) -> bool {
        if let Some(inner) = self {
            return inner.assign_unmatched(document);
        }

        let mut element = T::default();
        let assigned = element.assign_unmatched(document);

        if assigned {
            *self = Some(element);
        }

        assigned
    }
}

/// A sequence receives one element per repetition, or per segment occurrence.
impl<T: Decode + Default> Decode for Vec<T> {
    fn assign(&mut self, value: &Value<'_>) {
        self.extend(value.repetitions().iter().map(|v| {
            let mut element = T::default();
            element.assign(v);
            element
        }));
    }

    fn assign_segment(&mut self, occurrences: &[FieldMap<'_>]) {
        self.extend(occurrences.iter().map(|fields| {
            let mut element = T::default();
            element.assign_segment(slice::from_ref(fields));
            element
        }));
    }

    fn assign_group(&mut self, document: &Document<'_>) -> Option<usize> {
        let group = Group::new(T::default().structure()?.shape());
        let count = group.count(document);

        self.extend((0..count).map(|i| {
            let mut element = T::default();
            if let Some(s) = element.structure() {
                group.populate(s, document, i);
            }
            element
        }));

        Some(count)
    }
}
