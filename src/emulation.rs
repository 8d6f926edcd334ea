// Copyright 2017 Brian Langenberger
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Start code emulation prevention.
//!
//! A start code prefix is two zero bytes followed by a byte
//! in `0..=3`.  To keep such a prefix out of a payload, a byte of
//! [`EMULATION_PREVENTION_BYTE`] is placed before the third byte
//! and the zero run starts over.
//!
//! ## Example
//! ```
//! use ebsp_io::{EmulationPrevention, EMULATION_PREVENTION_BYTE};
//!
//! let mut escaped = Vec::new();
//! let mut run = EmulationPrevention::new();
//! for &b in &[0x00, 0x00, 0x01, 0x00, 0x00, 0x04] {
//!     if run.needs_prevention(b) {
//!         escaped.push(EMULATION_PREVENTION_BYTE);
//!         run.prevented();
//!     }
//!     escaped.push(b);
//!     run.push(b);
//! }
//! assert_eq!(escaped, [0x00, 0x00, 0x03, 0x01, 0x00, 0x00, 0x04]);
//! ```

/// The byte inserted to break up a start code prefix
pub const EMULATION_PREVENTION_BYTE: u8 = 0x03;

/// Tracks the run of zero bytes most recently emitted.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct EmulationPrevention {
    zeros: u8,
}

impl EmulationPrevention {
    /// A tracker for a stream with nothing emitted yet
    #[inline]
    pub fn new() -> EmulationPrevention {
        EmulationPrevention { zeros: 0 }
    }

    /// Number of consecutive zero bytes emitted, at most 2
    #[inline]
    pub fn zero_run(&self) -> u8 {
        self.zeros
    }

    /// Returns true if `byte` must be preceded by an
    /// emulation prevention byte
    #[inline]
    pub fn needs_prevention(&self, byte: u8) -> bool {
        self.zeros == 2 && byte <= 3
    }

    /// Records that an emulation prevention byte was emitted
    #[inline]
    pub fn prevented(&mut self) {
        self.zeros = 0;
    }

    /// Records an emitted stream byte
    #[inline]
    pub fn push(&mut self, byte: u8) {
        if byte == 0 {
            // only "two or more" matters
            self.zeros = (self.zeros + 1).min(2);
        } else {
            self.zeros = 0;
        }
    }
}
