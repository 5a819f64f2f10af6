//! Delimiters declared by the message header.

use alloc::string::String;

use thiserror::Error;
use zerocopy::FromBytes;

/// Name of the segment every message must begin with.
pub const HEADER_SEGMENT: &str = "MSH";

/// Length of the fixed header prefix: the segment name followed by the five
/// delimiter bytes.
pub const HEADER_LEN: usize = 8;

/// Number of header fields synthesized from the delimiters rather than
/// scanned from text.
pub const HEADER_FIELDS: usize = 2;

/// An error reading the fixed header prefix.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HeaderError {
    /// Fewer bytes than the header prefix requires.
    #[error("Not enough bytes in header: expecting at least 8, got {0}.")]
    TooShort(usize),
    /// The message does not begin with the header segment.
    #[error("Expecting \"MSH\" segment, got {0:?}.")]
    UnexpectedSegment(String),
}

/// The five delimiter bytes of a message.
///
/// The delimiters are expected to be distinct from each other and from the
/// segment terminator. This is not validated: colliding delimiters merge
/// their levels during tokenization (for example, a component delimiter equal
/// to the subcomponent delimiter yields components only).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delimiters {
    pub field: u8,
    pub component: u8,
    pub repetition: u8,
    pub escape: u8,
    pub subcomponent: u8,
}

impl Default for Delimiters {
    /// The conventional `|^~\&` set.
    fn default() -> Self {
        Self {
            field: b'|',
            component: b'^',
            repetition: b'~',
            escape: b'\\',
            subcomponent: b'&',
        }
    }
}

impl Delimiters {
    /// Extract the delimiters from the header prefix of a message.
    ///
    /// A wrong leading segment name takes precedence over a short buffer,
    /// provided at least the name itself is present.
    pub fn from_header(r: &[u8]) -> Result<Self, HeaderError> {
        #[repr(C)]
        #[derive(FromBytes)]
        struct Header {
            segment: [u8; 3],
            field: u8,
            component: u8,
            repetition: u8,
            escape: u8,
            subcomponent: u8,
        }

        if let Some(name) = r.get(..3) {
            if name != HEADER_SEGMENT.as_bytes() {
                let name = String::from_utf8_lossy(name).into_owned();
                Err(HeaderError::UnexpectedSegment(name))?;
            }
        }

        let Some(Ok(prefix)) = r.get(..HEADER_LEN).map(<[u8; HEADER_LEN]>::try_from) else {
            Err(HeaderError::TooShort(r.len()))?
        };

        let Header {
            field,
            component,
            repetition,
            escape,
            subcomponent,
            ..
        } = zerocopy::transmute!(prefix);

        Ok(Self {
            field,
            component,
            repetition,
            escape,
            subcomponent,
        })
    }

    /// The delimiters following the field delimiter, in header order.
    ///
    /// This is the text of the header's second field.
    pub fn encoding_characters(&self) -> [u8; 4] {
        [self.component, self.repetition, self.escape, self.subcomponent]
    }
}
