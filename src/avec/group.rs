//! Inference of repeating segment groups.

use alloc::vec::Vec;
use core::slice;

use log::debug;

use super::{FieldShape, Structure, document::Document, mapping, tag::Tag};

/// The segment-tagged fields of a group's element structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    members: Vec<Member>,
    anchor: Option<usize>,
}

/// A field of a group element bound to a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Member {
    /// The segment name.
    pub segment: &'static str,
    /// Whether the field is tagged `required`.
    pub required: bool,
    /// The field's index in the element's shape.
    pub index: usize,
}

impl Group {
    /// Collect the members of a group from its element's shape.
    ///
    /// Members are the fields whose tag names a segment, excluding nested
    /// groups. The anchor is the first member tagged `required`.
    pub fn new(shape: &'static [FieldShape]) -> Self {
        let members: Vec<_> = shape
            .iter()
            .enumerate()
            .filter_map(|(index, field)| {
                let tag = Tag::parse(field.tag);

                let is_segment = !tag.name().is_empty() && tag.index().is_none();

                (is_segment && !tag.options().group()).then(|| Member {
                    segment: tag.name(),
                    required: tag.options().required(),
                    index,
                })
            })
            .collect();

        let anchor = members.iter().position(|m| m.required);

        Self { members, anchor }
    }

    /// The members of the group, in declaration order.
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// The member deciding the number of elements, if any.
    pub fn anchor(&self) -> Option<&Member> {
        self.members.get(self.anchor?)
    }

    /// The number of group elements in a document: the number of occurrences
    /// of the anchor segment.
    pub fn count(&self, document: &Document<'_>) -> usize {
        let Some(anchor) = self.anchor() else {
            debug!("Group without a required segment resolves to no elements.");
            return 0;
        };

        let count = document.occurrences(anchor.segment).len();
        debug!("Group anchored on {} has {count} element(s).", anchor.segment);

        count
    }

    /// Populate the `i`-th element of the group.
    ///
    /// Each member receives the `i`-th occurrence of its segment, if there is
    /// one. Fields that are not members are mapped against the whole
    /// document.
    pub fn populate(&self, s: &mut dyn Structure, document: &Document<'_>, i: usize) {
        for member in &self.members {
            let Some(fields) = document.occurrences(member.segment).get(i) else {
                continue;
            };

            if let Some(field) = s.field_mut(member.index) {
                field.assign_segment(slice::from_ref(fields));
            }
        }

        for (index, shape) in s.shape().iter().enumerate() {
            if self.members.iter().any(|m| m.index == index) {
                continue;
            }

            if let Some(field) = s.field_mut(index) {
                mapping::map_field(field, shape, document);
            }
        }
    }
}
