//! Internal scanner and value builder for implementing decoders.
//!
//! This module is intended for applications that need fine control over
//! decoder internals. See [`crate::avec`] for implementations covering common
//! decoding patterns.
//!
//! # Architecture
//!
//! A message is read in a single forward pass. Its first eight bytes are a
//! fixed header prefix: the `MSH` segment name followed by the five
//! [`Delimiters`](delimiters::Delimiters). Everything after the prefix is
//! tokenized by a [`Scanner`], whose only inputs are those delimiters and the
//! `\r` segment terminator.
//!
//! Each call to [`Scanner::scan`] consumes one value and the boundary ending
//! it, either a field delimiter, a segment terminator, or the end of the
//! message. The scanner keeps the running field index of the current segment,
//! so a caller reads the index before scanning to learn which field the value
//! belongs to. Segment names are not scanned: after a segment terminator, the
//! caller takes the next three bytes with [`Scanner::take`].
//!
//! The raw text of a field is then turned into a [`Value`] by
//! [`Value::build`], which splits on repetition, component and subcomponent
//! delimiters in that order.
//!
//! Some areas of the decoding process are not represented here and must be
//! carefully written:
//!
//! - Synthesizing the first two header fields, which hold the delimiters
//! themselves rather than scanned text.
//!
//! - Deciding what a truncated segment name means for the values already
//! decoded.
//!
//! Implementers are recommended to begin by studying and modifying
//! [`crate::avec::slice::decode_document`].

pub mod delimiters;
pub mod scanner;
pub mod value;

pub use scanner::Scanner;
pub use value::Value;
