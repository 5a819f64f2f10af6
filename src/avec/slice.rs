//! Slice-based decoder implementation.

use alloc::{borrow::Cow, string::String};
use core::mem;

use log::{debug, trace};
use thiserror::Error;

use crate::sans::{
    Scanner, Value,
    delimiters::{HEADER_FIELDS, HEADER_SEGMENT, HeaderError},
    scanner::{Boundary, SEGMENT_TERMINATOR},
};

use super::{
    Decode, mapping,
    document::{Document, FieldMap},
};

/// Errors occurring while decoding from a slice.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Incorrect message header.
    #[error("Malformed message header: {0}")]
    MalformedHeader(#[from] HeaderError),
    /// Reached the end of the slice while reading a segment name.
    #[error("Unexpected end of data while reading segment name at offset {offset}.")]
    TruncatedSegmentName { offset: usize },
    /// The destination is not a structure.
    #[error("Destination is not a structure.")]
    InvalidDestination,
}

/// Decode a message from a slice, publishing to a receiver.
///
/// The receiver must be a structure. If a segment name is truncated, the
/// segments before it are still published and the error is returned
/// afterward.
///
/// This method is also re-exported as `hl7_decode::avec::decode_slice`.
pub fn decode(r: &[u8], o: &mut impl Decode) -> Result<(), Error> {
    let Some(o) = o.structure() else {
        Err(Error::InvalidDestination)?
    };

    let mut document = Document::default();
    let assembled = decode_document(r, &mut document);

    if matches!(assembled, Err(Error::MalformedHeader(_))) {
        return assembled;
    }

    mapping::map(o, &document);

    assembled
}

/// Decode a message from a slice into a generic document.
///
/// Segments are added to the document as they are read, so on a truncated
/// segment name the document holds every segment before it.
///
/// The three bytes following a segment terminator are always taken as the
/// next segment name. A blank segment therefore shifts the name of the segment
/// after it by one byte, and that segment is filed under the shifted name.
pub fn decode_document<'a>(r: &'a [u8], document: &mut Document<'a>) -> Result<(), Error> {
    let mut scanner = Scanner::new(r)?;
    let delimiters = *scanner.delimiters();

    let mut name = Cow::Borrowed(HEADER_SEGMENT);
    let mut fields = FieldMap::new();

    // The first two header fields hold the delimiters themselves.
    fields.insert(1, owned_scalar(&[delimiters.field]));
    fields.insert(2, owned_scalar(&delimiters.encoding_characters()));

    // Index of the first scanned field of the current segment. Index zero is
    // the segment name.
    let mut first = HEADER_FIELDS + 1;

    loop {
        let index = scanner.field();
        let (value, boundary) = scanner.scan();

        if index >= first && !value.is_empty() {
            fields.insert(index, Value::build(value, &delimiters));
        }

        match boundary {
            Boundary::Field => continue,
            Boundary::EndOfInput => {
                trace!("Read {name} with {} field(s).", fields.len());
                document.insert(name, fields);
                break;
            }
            Boundary::Segment => {
                trace!("Read {name} with {} field(s).", fields.len());
                document.insert(name, mem::take(&mut fields));

                if scanner.is_exhausted() {
                    break;
                }

                let Some(next) = scanner.take::<3>() else {
                    let offset = scanner.offset();
                    return Err(Error::TruncatedSegmentName { offset });
                };

                name = String::from_utf8_lossy(next);
                first = 1;
            }
        }
    }

    debug!("Assembled {} distinct segment(s).", document.len());

    Ok(())
}

fn owned_scalar(r: &[u8]) -> Value<'static> {
    Value::Scalar(Cow::Owned(String::from_utf8_lossy(r).into_owned()))
}

/// Split a slice holding several messages.
///
/// A message begins at the start of the slice, and at every header segment
/// name following a segment terminator. The terminator preceding a header is
/// not part of either message.
pub fn messages(r: &[u8]) -> Messages<'_> {
    Messages { r }
}

/// Iterator over the messages of a slice. See [`messages`].
#[derive(Debug, Clone)]
pub struct Messages<'a> {
    r: &'a [u8],
}

impl<'a> Iterator for Messages<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        let header = HEADER_SEGMENT.as_bytes();

        while !self.r.is_empty() {
            let end = self
                .r
                .windows(header.len() + 1)
                .position(|w| w[0] == SEGMENT_TERMINATOR && &w[1..] == header);

            let message = match end {
                Some(end) => {
                    let (message, rest) = self.r.split_at(end);
                    self.r = &rest[1..];
                    message
                }
                None => mem::take(&mut self.r),
            };

            // A terminator directly before a header leaves nothing between.
            if !message.is_empty() {
                return Some(message);
            }
        }

        None
    }
}
