// Copyright 2017 Brian Langenberger
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Traits and implementations for writing bits to an escaped stream.
//!
//! ## Example
//!
//! Writing the first bytes of an H.264 sequence parameter set
//! for the baseline profile.
//!
//! ```
//! use ebsp_io::{BitWrite, EbspWriter};
//!
//! let mut sps: Vec<u8> = Vec::new();
//! {
//!     let mut writer = EbspWriter::new(&mut sps);
//!     writer.write(8, 66u8);        // profile_idc
//!     writer.write(8, 0u8);         // constraint flags, reserved bits
//!     writer.write(8, 30u8);        // level_idc
//!     writer.write_exp_golomb(0);   // seq_parameter_set_id
//!     writer.write_exp_golomb(0);   // log2_max_frame_num_minus4
//!     writer.write_exp_golomb(2);   // pic_order_cnt_type
//!     writer.write_rbsp_trailing_bits();
//!     assert!(writer.error().is_none());
//!     assert_eq!(writer.bytes_written(), 4);
//! }
//! assert_eq!(sps, [0x42, 0x00, 0x1E, 0b1101_1100]);
//! ```

use super::{BitQueue, ByteSink, EmulationPrevention, Numeric, SinkWriteFailure};
use super::EMULATION_PREVENTION_BYTE;

/// For writing bit values to an underlying stream.
///
/// None of these methods report failures.  Implementations
/// are expected to latch the first error of their sink
/// and ignore all writes after it.
pub trait BitWrite {
    /// Writes the low `bits` bits of `value`, most significant first.
    ///
    /// Bits of `value` above `bits` are ignored.  If `bits` exceeds
    /// the size of `U`, the value is zero-extended.
    fn write<U>(&mut self, bits: u32, value: U)
    where
        U: Numeric;

    /// Writes a single bit
    #[inline]
    fn write_bit(&mut self, bit: bool) {
        self.write(1, u8::from(bit))
    }

    /// Writes the entirety of a byte buffer to the stream,
    /// 8 bits at a time, whether aligned or not.
    fn write_bytes(&mut self, buf: &[u8]) {
        for b in buf {
            self.write(8, *b);
        }
    }

    /// Writes an unsigned unary value with a stop bit of 0.
    fn write_unary0(&mut self, mut value: u32) {
        while value > 32 {
            self.write(32, u32::MAX);
            value -= 32;
        }
        if value > 0 {
            self.write(value, u32::MAX);
        }
        self.write(1, 0u8)
    }

    /// Writes an unsigned unary value with a stop bit of 1.
    fn write_unary1(&mut self, value: u32) {
        self.write(value, 0u32);
        self.write(1, 1u8)
    }

    /// Writes an unsigned Exp-Golomb code, `ue(v)` in H.264 syntax.
    ///
    /// ```
    /// use ebsp_io::{BitWrite, EbspWriter};
    ///
    /// let mut output = Vec::new();
    /// {
    ///     let mut writer = EbspWriter::new(&mut output);
    ///     writer.write_exp_golomb(0);   // 1
    ///     writer.write_exp_golomb(1);   // 010
    ///     writer.write_exp_golomb(3);   // 00100
    ///     writer.write_exp_golomb(6);   // 00111
    ///     writer.byte_align();
    /// }
    /// assert_eq!(output, [0b1010_0010, 0b0001_1100]);
    /// ```
    fn write_exp_golomb(&mut self, value: u32) {
        write_code_num(self, u64::from(value))
    }

    /// Writes a signed Exp-Golomb code, `se(v)` in H.264 syntax.
    ///
    /// Positive values map to odd code numbers and
    /// the rest to even ones: 1, -1, 2, -2 become 1, 2, 3, 4.
    fn write_signed_exp_golomb(&mut self, value: i32) {
        let value = i64::from(value);
        let code_num = if value > 0 {
            2 * value - 1
        } else {
            -2 * value
        };
        write_code_num(self, code_num as u64)
    }

    /// Returns true if the stream is aligned at a whole byte.
    fn byte_aligned(&self) -> bool;

    /// Pads the stream with 0 bits until it is aligned at a whole byte.
    /// Does nothing if the stream is already aligned.
    fn byte_align(&mut self);

    /// Writes the RBSP trailing bits, a stop bit of 1
    /// followed by 0 bits up to the next byte boundary.
    fn write_rbsp_trailing_bits(&mut self) {
        self.write_bit(true);
        self.byte_align()
    }
}

fn write_code_num<W: BitWrite + ?Sized>(writer: &mut W, code_num: u64) {
    let x = code_num + 1;
    let len = u64::BITS - x.leading_zeros();
    writer.write(len - 1, 0u32);
    if len > 32 {
        writer.write(len - 32, (x >> 32) as u32);
        writer.write(32, x as u32);
    } else {
        writer.write(len, x as u32);
    }
}

/// Writes big-endian bits to a byte sink, inserting emulation
/// prevention bytes so that no start code prefix is emitted.
///
/// Whole bytes go to the sink as soon as they are complete;
/// only the bits of a partial byte are held back.  Pad them away
/// with [`BitWrite::byte_align`] or
/// [`BitWrite::write_rbsp_trailing_bits`] before dropping the writer.
///
/// ```
/// use ebsp_io::{BitWrite, EbspWriter};
///
/// let mut output = Vec::new();
/// let mut writer = EbspWriter::new(&mut output);
/// writer.write_bytes(&[0x00, 0x00, 0x00, 0x00, 0x00]);
/// assert_eq!(writer.bytes_written(), 7);
/// writer.into_writer().unwrap();
/// assert_eq!(output, [0x00, 0x00, 0x03, 0x00, 0x00, 0x03, 0x00]);
/// ```
pub struct EbspWriter<W: ByteSink> {
    writer: W,
    queue: BitQueue,
    emulation: EmulationPrevention,
    bytes_written: u64,
    error: Option<W::Error>,
}

impl<W: ByteSink> EbspWriter<W> {
    /// Wraps a byte sink.  Pass `&mut sink` to keep ownership of it.
    pub fn new(writer: W) -> EbspWriter<W> {
        EbspWriter {
            writer,
            queue: BitQueue::new(),
            emulation: EmulationPrevention::new(),
            bytes_written: 0,
            error: None,
        }
    }

    /// Returns the first error reported by the sink, if any.
    ///
    /// Once an error is latched, all further writes are ignored.
    #[inline]
    pub fn error(&self) -> Option<&W::Error> {
        self.error.as_ref()
    }

    /// Number of bytes accepted by the sink so far,
    /// emulation prevention bytes included.
    #[inline]
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Number of bits waiting for the rest of their byte, 0 to 7
    #[inline]
    pub fn pending_bits(&self) -> u32 {
        self.queue.len()
    }

    /// Returns a reference to the underlying sink
    #[inline]
    pub fn writer(&self) -> &W {
        &self.writer
    }

    /// Returns the underlying sink, or the error which stopped
    /// the writer.  Any pending partial byte is discarded.
    pub fn into_writer(self) -> Result<W, SinkWriteFailure<W::Error>> {
        match self.error {
            None => Ok(self.writer),
            Some(err) => Err(SinkWriteFailure::new(err, self.bytes_written)),
        }
    }

    fn emit(&mut self, byte: u8) -> Result<(), W::Error> {
        if self.emulation.needs_prevention(byte) {
            self.writer.write_byte(EMULATION_PREVENTION_BYTE)?;
            self.bytes_written += 1;
            self.emulation.prevented();
        }
        self.writer.write_byte(byte)?;
        self.bytes_written += 1;
        self.emulation.push(byte);
        Ok(())
    }

    fn push(&mut self, bits: u32, value: u32) -> Result<(), W::Error> {
        self.queue.push(bits, value);
        while let Some(byte) = self.queue.pop_byte() {
            self.emit(byte)?;
        }
        Ok(())
    }

    fn write_value(&mut self, bits: u32, value_bits: u32, value: u32) -> Result<(), W::Error> {
        let mut zeros = bits - value_bits;
        while zeros > 0 {
            let chunk = zeros.min(32);
            self.push(chunk, 0)?;
            zeros -= chunk;
        }
        self.push(value_bits, value)
    }
}

impl<W: ByteSink> BitWrite for EbspWriter<W> {
    fn write<U>(&mut self, bits: u32, value: U)
    where
        U: Numeric,
    {
        if self.error.is_some() {
            return;
        }
        let value_bits = bits.min(U::BITS_SIZE);
        if let Err(err) = self.write_value(bits, value_bits, value.to_u32()) {
            self.error = Some(err);
        }
    }

    #[inline]
    fn byte_aligned(&self) -> bool {
        self.queue.is_empty()
    }

    fn byte_align(&mut self) {
        let pending = self.queue.len() % 8;
        if pending > 0 {
            self.write(8 - pending, 0u8);
        }
    }
}
