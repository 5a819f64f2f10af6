#![no_std]

//! A decoder for HL7 version 2 pipe-delimited clinical messages.
//!
//! Messages are decoded in two stages. First, a message is tokenized with the
//! delimiters declared in its header and assembled into a generic
//! [`Document`](avec::document::Document), a mapping from segment name to the
//! decoded fields of each occurrence. Then, the document is mapped onto a
//! caller-supplied structure whose shape (segments, optional segments,
//! repeating segments and segment groups) is declared with field attributes.
//!
//! Most users should begin with the functions and derive macro in the
//! [`avec`] module. If these prove insufficient, consider driving the scanner
//! described in the [`sans`] module directly.
//!
//! ## Cargo Features
//!
//! The following crate feature flags are available:
//!
//! - `derive`: enable the derive macro (default).
//! - `std`: enable reader-based decoder (default).

extern crate alloc;

// Allows the derive macro's absolute paths to resolve inside this crate.
extern crate self as hl7_decode;

pub mod avec;
pub mod sans;
