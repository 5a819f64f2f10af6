//! Mapping of a generic document onto declared structures.
//!
//! These functions implement [`Decode`] for derived structures, and may be
//! used to implement it by hand.

use log::trace;

use super::{
    Decode, FieldShape, Structure,
    document::{Document, FieldMap},
    group::Group,
    tag::Tag,
};
use crate::sans::Value;

/// Map a document onto every field of a structure.
///
/// Returns whether anything was assigned.
pub fn map(s: &mut dyn Structure, document: &Document<'_>) -> bool {
    let mut assigned = false;

    for (index, shape) in s.shape().iter().enumerate() {
        if let Some(field) = s.field_mut(index) {
            assigned |= map_field(field, shape, document);
        }
    }

    assigned
}

/// Map a document onto a single declared field.
///
/// Returns whether anything was assigned.
pub fn map_field(field: &mut dyn Decode, shape: &FieldShape, document: &Document<'_>) -> bool {
    let tag = Tag::parse(shape.tag);

    if tag.options().group() {
        if let Some(count) = field.assign_group(document) {
            trace!("Resolved {count} element(s) for group {}.", shape.name);
            return count > 0;
        }
    }

    let name = match tag.name() {
        "" => shape.name,
        name => name,
    };

    let occurrences = document.occurrences(name);

    if !occurrences.is_empty() {
        trace!("Assigning {} occurrence(s) of {name}.", occurrences.len());
        field.assign_segment(occurrences);
        return true;
    }

    field.assign_unmatched(document)
}

/// Assign values to the fields of a structure by position.
///
/// A field's position is its explicit numeric tag if it has one, and its
/// 1-based declaration position otherwise.
pub fn assign_positions<'v>(
    s: &mut dyn Structure,
    lookup: impl Fn(usize) -> Option<&'v Value<'v>>,
) {
    for (index, shape) in s.shape().iter().enumerate() {
        let position = Tag::parse(shape.tag).index().unwrap_or(index + 1);

        if let (Some(value), Some(field)) = (lookup(position), s.field_mut(index)) {
            field.assign(value);
        }
    }
}

/// Coerce a value onto a structure.
///
/// Components are assigned by position. A scalar is taken as the first
/// component, and repeated values contribute only their first repetition.
pub fn assign_value(s: &mut dyn Structure, value: &Value<'_>) {
    match value {
        Value::Scalar(_) => assign_positions(s, |p| (p == 1).then_some(value)),
        Value::Component(parts) => {
            assign_positions(s, |p| p.checked_sub(1).and_then(|i| parts.get(i)))
        }
        Value::Repetition(items) => {
            if let Some(first) = items.first() {
                assign_value(s, first);
            }
        }
    }
}

/// Assign the first occurrence of a segment onto a structure by field index.
pub fn assign_segment(s: &mut dyn Structure, occurrences: &[FieldMap<'_>]) {
    if let Some(fields) = occurrences.first() {
        assign_positions(s, |p| fields.get(&p));
    }
}

/// Populate a structure in place from the first element of its group.
///
/// Returns the number of elements found in the document.
pub fn assign_group(s: &mut dyn Structure, document: &Document<'_>) -> usize {
    let group = Group::new(s.shape());
    let count = group.count(document);

    if count > 0 {
        group.populate(s, document, 0);
    }

    count
}
