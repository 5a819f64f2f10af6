//! Byte-level scanner locating field and segment boundaries.

use super::delimiters::{Delimiters, HEADER_FIELDS, HEADER_LEN, HeaderError};

/// Byte terminating every segment.
pub const SEGMENT_TERMINATOR: u8 = b'\r';

/// A boundary ending a scanned value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    /// A field delimiter.
    Field,
    /// A segment terminator.
    Segment,
    /// The end of the message.
    EndOfInput,
}

/// Classification of a scanned byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Inside a value.
    Value,
    /// At a boundary.
    Boundary(Boundary),
}

/// Finite-state scanner over the bytes of one message.
///
/// The cursor only moves forward. The scanner tracks the running field index
/// of the segment being read: it is incremented at each field delimiter and
/// reset to zero at each segment terminator, so index zero covers the segment
/// name.
///
/// Segment names are not validated. A caller taking a fixed three bytes after
/// a terminator reads a blank segment (`\r\r`) as part of the next name, so
/// `\r\rPID|1` yields a segment named `"\rPI"` whose field zero is `"D"`.
#[derive(Debug)]
pub struct Scanner<'a> {
    r: &'a [u8],
    i: usize,
    field: usize,
    delimiters: Delimiters,
}

impl<'a> Scanner<'a> {
    /// Begin scanning a message, extracting its delimiters from the header.
    ///
    /// The cursor is left past the header prefix, at the end of the header's
    /// second field.
    pub fn new(r: &'a [u8]) -> Result<Self, HeaderError> {
        let delimiters = Delimiters::from_header(r)?;

        Ok(Self {
            r,
            i: HEADER_LEN,
            field: HEADER_FIELDS,
            delimiters,
        })
    }

    /// The delimiters declared by the message header.
    pub fn delimiters(&self) -> &Delimiters {
        &self.delimiters
    }

    /// Index of the field currently being scanned.
    pub fn field(&self) -> usize {
        self.field
    }

    /// Offset of the next byte to be read.
    pub fn offset(&self) -> usize {
        self.i
    }

    /// Whether every byte has been read.
    pub fn is_exhausted(&self) -> bool {
        self.i >= self.r.len()
    }

    /// Classify a byte without consuming it.
    pub fn classify(&self, b: u8) -> State {
        match b {
            b if b == self.delimiters.field => State::Boundary(Boundary::Field),
            SEGMENT_TERMINATOR => State::Boundary(Boundary::Segment),
            _ => State::Value,
        }
    }

    /// Consume a single byte, updating the running field index.
    pub fn step(&mut self) -> State {
        let Some(&b) = self.r.get(self.i) else {
            return State::Boundary(Boundary::EndOfInput);
        };

        self.i += 1;

        let state = self.classify(b);
        match state {
            State::Boundary(Boundary::Field) => self.field += 1,
            State::Boundary(Boundary::Segment) => self.field = 0,
            _ => {}
        }

        state
    }

    /// Consume bytes up to and including the next boundary.
    ///
    /// Returns the scanned value (excluding the boundary byte) and the kind of
    /// boundary reached.
    pub fn scan(&mut self) -> (&'a [u8], Boundary) {
        let start = self.i;

        loop {
            match self.step() {
                State::Value => continue,
                State::Boundary(Boundary::EndOfInput) => {
                    return (&self.r[start..self.i], Boundary::EndOfInput);
                }
                State::Boundary(boundary) => {
                    return (&self.r[start..self.i - 1], boundary);
                }
            }
        }
    }

    /// Take an exact number of bytes, advancing the cursor.
    ///
    /// Returns `None`, consuming nothing, if fewer bytes remain.
    pub fn take<const N: usize>(&mut self) -> Option<&'a [u8; N]> {
        let s = self.r.get(self.i..self.i + N)?.try_into().ok()?;
        self.i += N;

        Some(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_after_header() {
        let s = Scanner::new(b"MSH|^~\\&|App").unwrap();

        assert_eq!(s.offset(), 8);
        assert_eq!(s.field(), 2);
        assert_eq!(s.delimiters().field, b'|');
    }

    #[test]
    fn steps_through_states() {
        let mut s = Scanner::new(b"MSH|^~\\&|a\rB").unwrap();

        assert_eq!(s.step(), State::Boundary(Boundary::Field));
        assert_eq!(s.field(), 3);
        assert_eq!(s.step(), State::Value);
        assert_eq!(s.step(), State::Boundary(Boundary::Segment));
        assert_eq!(s.field(), 0);
        assert_eq!(s.step(), State::Value);
        assert_eq!(s.step(), State::Boundary(Boundary::EndOfInput));
        assert_eq!(s.step(), State::Boundary(Boundary::EndOfInput));
    }

    #[test]
    fn scans_to_boundaries() {
        let mut s = Scanner::new(b"MSH|^~\\&|App|Fac\rEVN|A01").unwrap();

        assert_eq!(s.scan(), (&b""[..], Boundary::Field));
        assert_eq!(s.scan(), (&b"App"[..], Boundary::Field));
        assert_eq!(s.field(), 4);
        assert_eq!(s.scan(), (&b"Fac"[..], Boundary::Segment));
        assert_eq!(s.take::<3>(), Some(b"EVN"));
        assert_eq!(s.scan(), (&b""[..], Boundary::Field));
        assert_eq!(s.scan(), (&b"A01"[..], Boundary::EndOfInput));
        assert!(s.is_exhausted());
    }

    #[test]
    fn uses_declared_field_delimiter() {
        let mut s = Scanner::new(b"MSH#^~\\&#a|b#c").unwrap();

        assert_eq!(s.scan(), (&b""[..], Boundary::Field));
        assert_eq!(s.scan(), (&b"a|b"[..], Boundary::Field));
        assert_eq!(s.scan(), (&b"c"[..], Boundary::EndOfInput));
    }

    #[test]
    fn take_leaves_cursor_when_short() {
        let mut s = Scanner::new(b"MSH|^~\\&PI").unwrap();

        assert_eq!(s.take::<3>(), None);
        assert_eq!(s.offset(), 8);
        assert_eq!(s.take::<2>(), Some(b"PI"));
        assert!(s.is_exhausted());
    }

    #[test]
    fn blank_segment_shifts_next_name() {
        let mut s = Scanner::new(b"MSH|^~\\&|A\r\rPID|1").unwrap();

        assert_eq!(s.scan(), (&b""[..], Boundary::Field));
        assert_eq!(s.scan(), (&b"A"[..], Boundary::Segment));
        assert_eq!(s.take::<3>(), Some(b"\rPI"));
        assert_eq!(s.field(), 0);
        assert_eq!(s.scan(), (&b"D"[..], Boundary::Field));
        assert_eq!(s.scan(), (&b"1"[..], Boundary::EndOfInput));
    }
}
