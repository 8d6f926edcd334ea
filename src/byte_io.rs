// Copyright 2017 Brian Langenberger
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The byte-level destination of an escaped bitstream.

#[cfg(not(feature = "std"))]
use core2::io;

#[cfg(feature = "std")]
use std::io;

/// A consumer of whole bytes, in emission order.
///
/// Any [`io::Write`] is a sink, including `&mut W` for a borrowed
/// writer.  Types that are not writers may implement this directly.
pub trait ByteSink {
    /// The error reported by a failed write
    type Error;

    /// Writes a single byte
    fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error>;
}

impl<W: io::Write + ?Sized> ByteSink for W {
    type Error = io::Error;

    #[inline]
    fn write_byte(&mut self, byte: u8) -> Result<(), io::Error> {
        self.write_all(core::slice::from_ref(&byte))
    }
}
