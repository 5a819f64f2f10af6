//! Reader-based decoder implementation.
//!
//! _Requires Cargo feature `std`._

use std::{io::Read, vec::Vec};

use log::debug;
use thiserror::Error;

use super::{Decode, slice};

extern crate std;

/// Errors occurring while decoding from a reader.
#[derive(Debug, Error)]
pub enum Error {
    /// An error from the supplied reader.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// An error decoding the bytes read.
    #[error(transparent)]
    Decode(#[from] slice::Error),
}

/// Decode a message from a reader, publishing to a receiver.
///
/// The reader is read to its end before decoding, as HL7 gives no length up
/// front. Use [`slice::messages`] on the buffered bytes to decode a batch.
///
/// This method is also re-exported as `hl7_decode::avec::decode_reader`.
///
/// _Requires Cargo feature `std`._
pub fn decode(r: &mut impl Read, o: &mut impl Decode) -> Result<(), Error> {
    if o.structure().is_none() {
        Err(slice::Error::InvalidDestination)?;
    }

    let mut buf = Vec::new();
    let n = r.read_to_end(&mut buf)?;
    debug!("Read {n} byte(s) of message.");

    Ok(slice::decode(&buf, o)?)
}
