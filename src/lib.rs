// Copyright 2017 Brian Langenberger
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Traits and helpers for writing un-aligned, big-endian values
//! into an escaped byte stream (EBSP).
//!
//! Codec payloads such as H.264 or H.265 NAL units may not contain
//! a start code prefix by accident.  Whenever two emitted zero bytes
//! would be followed by a byte in `0..=3`, an emulation prevention
//! byte of `0x03` is inserted first.  [`EbspWriter`] applies that rule
//! on the fly while packing values of 1 to 32 bits.
//!
//! Writes never return errors.  The first failure of the underlying
//! sink is latched and every later write is silently dropped, so
//! callers check [`EbspWriter::error`] once when the payload is done.
//!
//! ## Example
//! ```
//! use ebsp_io::{BitWrite, EbspWriter};
//!
//! let mut output = Vec::new();
//! {
//!     let mut writer = EbspWriter::new(&mut output);
//!     writer.write(8, 0u8);
//!     writer.write(8, 0u8);
//!     writer.write(8, 1u8);
//!     writer.write(3, 0b101u8);
//!     writer.write_rbsp_trailing_bits();
//!     assert!(writer.error().is_none());
//! }
//! assert_eq!(output, [0x00, 0x00, 0x03, 0x01, 0b1011_0000]);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

use core::fmt::Debug;

pub mod byte_io;
pub mod emulation;
pub mod error;
pub mod write;

pub use byte_io::ByteSink;
pub use emulation::{EmulationPrevention, EMULATION_PREVENTION_BYTE};
pub use error::SinkWriteFailure;
pub use write::{BitWrite, EbspWriter};

/// An unsigned type whose low bits may be written to a stream.
pub trait Numeric: Sized + Copy + Default + Debug {
    /// Size of the type in bits
    const BITS_SIZE: u32;

    /// Widens the value to 32 bits
    fn to_u32(self) -> u32;
}

macro_rules! define_numeric {
    ($t:ty) => {
        impl Numeric for $t {
            const BITS_SIZE: u32 = <$t>::BITS;

            #[inline(always)]
            fn to_u32(self) -> u32 {
                u32::from(self)
            }
        }
    };
}

define_numeric!(u8);
define_numeric!(u16);
define_numeric!(u32);

/// A queue of pending bits, oldest bit most significant.
///
/// The queue holds at most 64 bits.  Popping a byte masks the
/// consumed bits away, so a queue that is drained after every
/// push of up to 32 bits never holds more than 39.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct BitQueue {
    value: u64,
    bits: u32,
}

impl BitQueue {
    /// Returns an empty queue
    #[inline]
    pub fn new() -> BitQueue {
        BitQueue { value: 0, bits: 0 }
    }

    /// Returns the number of pending bits
    #[inline]
    pub fn len(&self) -> u32 {
        self.bits
    }

    /// Returns true if no bits are pending
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Returns the pending bits, right-aligned
    #[inline]
    pub fn value(&self) -> u64 {
        self.value
    }

    /// Appends the low `bits` bits of `value` behind the pending bits.
    /// Higher bits of `value` are ignored.
    #[inline]
    pub fn push(&mut self, bits: u32, value: u32) {
        debug_assert!(bits <= 32);
        debug_assert!(self.bits + bits <= 64);
        if bits == 0 {
            return;
        }
        self.value = (self.value << bits) | (u64::from(value) & mask(bits));
        self.bits += bits;
    }

    /// Removes and returns the oldest whole byte, if any
    #[inline]
    pub fn pop_byte(&mut self) -> Option<u8> {
        if self.bits < 8 {
            return None;
        }
        self.bits -= 8;
        let byte = (self.value >> self.bits) as u8;
        self.value &= mask(self.bits);
        Some(byte)
    }
}

#[inline(always)]
fn mask(bits: u32) -> u64 {
    if bits >= u64::BITS {
        u64::MAX
    } else {
        (1 << bits) - 1
    }
}
