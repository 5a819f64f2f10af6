//! Convenience interfaces for common decoding patterns.
//!
//! The functions in this module are suited to decoding messages from slices
//! and readers, publishing to the [`Decode`] trait. In most cases, this trait
//! can be derived. See the [`Decode`](macro@Decode) macro for details.
//!
//! Decoding proceeds in two stages. A message is first assembled into a
//! generic [`Document`](document::Document). The document is then mapped onto
//! the destination, walking the destination's declared fields in order:
//!
//! 1. A field tagged `group` holding a `Vec<T>`, an `Option<T>` or a structure
//!    is resolved as a group (see below).
//! 2. Otherwise, the field's segment name (its tag name, or its upper-cased
//!    identifier) is looked up in the document, and every occurrence is
//!    assigned to the field. A sequence receives one element per occurrence,
//!    while a single value receives the first.
//! 3. Otherwise, a structure is mapped against the whole document in turn.
//!    This allows a destination to wrap segments in a structure that does not
//!    correspond to any one segment.
//!
//! Segments without a matching field, and fields without a matching segment,
//! are skipped.
//!
//! ## Groups
//!
//! HL7 has no explicit grouping in the wire format. The number of elements in
//! a group is instead taken from its anchor: the first field of the element
//! structure tagged `required`. For element `i`, every field of the element
//! carrying a segment tag receives that segment's `i`-th occurrence, if it
//! exists. Remaining fields are mapped as above, so groups may nest.
//!
//! A group without an anchor resolves to no elements.

#[cfg(feature = "std")]
pub mod reader;
pub mod slice;

pub mod document;
pub mod group;
pub mod impls;
pub mod mapping;
pub mod tag;

#[cfg(feature = "std")]
pub use reader::decode as decode_reader;
pub use slice::decode as decode_slice;

use document::{Document, FieldMap};

use crate::sans::Value;

/// Derive [`Decode`] for a struct representing a message, segment group,
/// segment or composite field.
///
/// _Requires Cargo feature `derive`._
///
/// # Examples
///
/// Fields of a segment or composite are assigned by 1-based position. To
/// assign a field from an explicit index instead, supply the index as its
/// tag. Positions continue from the declaration order regardless.
///
/// ```
/// #[derive(Debug, Default, Decode)]
/// struct Pid {
///     set_id: String,
///     #[hl7("5")]
///     name: Xpn,
///     #[hl7("13")]
///     home_phone: Vec<String>,
/// }
///
/// #[derive(Debug, Default, Decode)]
/// struct Xpn {
///     family_name: String,
///     given_name: String,
/// }
/// ```
///
/// Fields of a message or group are assigned by segment name. The name is
/// taken from the tag if supplied, and from the upper-cased field identifier
/// otherwise. Use `Option<T>` for a segment that may be absent, and `Vec<T>`
/// for one that may repeat.
///
/// ```
/// #[derive(Debug, Default, Decode)]
/// struct OruR01 {
///     msh: Msh,
///     pid: Option<Pid>,
///     #[hl7("group")]
///     observations: Vec<Observation>,
/// }
///
/// #[derive(Debug, Default, Decode)]
/// struct Observation {
///     #[hl7("OBX,required")]
///     obx: Obx,
///     #[hl7("NTE")]
///     notes: Vec<Nte>,
/// }
/// ```
///
/// To leave a field untouched by decoding, mark it `#[hl7(skip)]`. Skipped
/// fields do not take up a position.
#[cfg(feature = "derive")]
pub use hl7_decode_derive::Decode;

/// Static metadata for a declared field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldShape {
    /// The upper-cased field identifier, used as a segment name when the tag
    /// does not supply one.
    pub name: &'static str,
    /// The tag metadata, empty if absent.
    pub tag: &'static str,
}

/// A destination with declared fields.
///
/// See the [`Decode`](macro@Decode) derive macro for an automatic
/// implementation of this trait.
pub trait Structure {
    /// The fields of this structure, in declaration order.
    fn shape(&self) -> &'static [FieldShape];
    /// Retrieve a receiver for a field by its index in [`Structure::shape`].
    fn field_mut(&mut self, index: usize) -> Option<&mut dyn Decode>;
}

/// Receive decoded values.
///
/// The default implementation of each optional method ignores the document,
/// leaving the destination untouched.
///
/// See the [`Decode`](macro@Decode) derive macro for an automatic
/// implementation of this trait.
#[allow(unused_variables)]
pub trait Decode {
    /// Coerce a decoded field, component or subcomponent onto this
    /// destination.
    fn assign(&mut self, value: &Value<'_>);

    /// Assign the occurrences of the segment matching this destination.
    fn assign_segment(&mut self, occurrences: &[FieldMap<'_>]) {}

    /// Resolve this destination as a group.
    ///
    /// Returns the number of elements found in the document, or `None` if
    /// this destination cannot hold a group.
    fn assign_group(&mut self, document: &Document<'_>) -> Option<usize> {
        None
    }

    /// Populate this destination from the whole document, when no segment
    /// matches it.
    ///
    /// Returns whether anything was assigned.
    fn assign_unmatched(&mut self, document: &Document<'_>) -> bool {
        false
    }

    /// View this destination as a structure, if it is one.
    fn structure(&mut self) -> Option<&mut dyn Structure> {
        None
    }
}
