//! Binary encodings of an identifier's integer payload.
//!
//! Two codecs are provided for persistence layers:
//!
//! - [`VarintCodec`]: zig-zag mapping followed by 7-bit groups, least
//!   significant group first. The most-significant bit of every byte is the
//!   continuation bit. Small magnitudes (positive *or* negative) take one
//!   byte, the full `i32` range takes at most five.
//! - [`FixedCodec`]: four bytes, big-endian two's complement, for
//!   fixed-stride random-access files.
//!
//! Both round-trip every `i32`, including the `i32::MIN` invalid sentinel.
//!
//! # Varint example
//!
//! ```text
//! -1   -> zig-zag 1    -> 0000_0001
//! 64   -> zig-zag 128  -> 1000_0000 0000_0001
//!                         ^
//!                         continuation bit
//! ```

use std::io::{Error, ErrorKind, Read, Write};

use crate::dbid::{Dbid, DbidRef};

/// Maximum number of bytes of a varint-encoded `i32`.
pub const MAX_VARINT_LEN: usize = 5;

/// Reads and writes identifiers.
pub trait DbidCodec {
    /// Encodes `id` into `writer`, returning the number of bytes written.
    fn write<W: Write>(&self, id: &impl DbidRef, writer: &mut W) -> Result<usize, Error>;

    /// Decodes one identifier from `reader`.
    fn read<R: Read>(&self, reader: &mut R) -> Result<Dbid, Error>;

    /// Number of bytes `id` occupies once encoded.
    fn encoded_len(&self, id: &impl DbidRef) -> usize;

    /// Stride of the encoding, `None` for variable-length codecs.
    fn fixed_len(&self) -> Option<usize>;
}

/// Variable-length signed encoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VarintCodec;

/// Fixed four-byte big-endian encoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixedCodec;

#[inline]
fn zigzag(value: i32) -> u32 {
    ((value << 1) ^ (value >> 31)) as u32
}

#[inline]
fn unzigzag(value: u32) -> i32 {
    ((value >> 1) as i32) ^ -((value & 1) as i32)
}

impl DbidCodec for VarintCodec {
    fn write<W: Write>(&self, id: &impl DbidRef, writer: &mut W) -> Result<usize, Error> {
        let mut value = zigzag(id.internal_index());
        let mut buffer = [0u8; MAX_VARINT_LEN];
        let mut len = 0;
        loop {
            let block = (value & 0b0111_1111) as u8;
            value >>= 7;
            if value == 0 {
                buffer[len] = block;
                len += 1;
                break;
            }
            buffer[len] = block | 0b1000_0000;
            len += 1;
        }
        writer.write_all(&buffer[..len])?;
        Ok(len)
    }

    fn read<R: Read>(&self, reader: &mut R) -> Result<Dbid, Error> {
        let mut byte = [0u8; 1];
        let mut value: u32 = 0;
        for i in 0..MAX_VARINT_LEN {
            reader.read_exact(&mut byte)?;
            let block = u32::from(byte[0] & 0b0111_1111);
            // The fifth block only has four payload bits left.
            if i == MAX_VARINT_LEN - 1 && block > 0b1111 {
                return Err(Error::new(
                    ErrorKind::InvalidData,
                    "varint overflows a 32-bit id",
                ));
            }
            value |= block << (7 * i);
            if byte[0] & 0b1000_0000 == 0 {
                return Ok(Dbid::new(unzigzag(value)));
            }
        }
        Err(Error::new(
            ErrorKind::InvalidData,
            "varint longer than five bytes",
        ))
    }

    fn encoded_len(&self, id: &impl DbidRef) -> usize {
        let bits = 32 - zigzag(id.internal_index()).leading_zeros() as usize;
        bits.div_ceil(7).max(1)
    }

    fn fixed_len(&self) -> Option<usize> {
        None
    }
}

impl DbidCodec for FixedCodec {
    fn write<W: Write>(&self, id: &impl DbidRef, writer: &mut W) -> Result<usize, Error> {
        writer.write_all(&id.internal_index().to_be_bytes())?;
        Ok(4)
    }

    fn read<R: Read>(&self, reader: &mut R) -> Result<Dbid, Error> {
        let mut bytes = [0u8; 4];
        reader.read_exact(&mut bytes)?;
        Ok(Dbid::new(i32::from_be_bytes(bytes)))
    }

    fn encoded_len(&self, _id: &impl DbidRef) -> usize {
        4
    }

    fn fixed_len(&self) -> Option<usize> {
        Some(4)
    }
}

/// Encodes a whole sequence of ids, returning the number of bytes written.
///
/// # Errors
///
/// Propagates write failures of `writer`.
pub fn write_all<C, I, W>(codec: &C, ids: I, writer: &mut W) -> Result<usize, Error>
where
    C: DbidCodec,
    I: IntoIterator,
    I::Item: DbidRef,
    W: Write,
{
    let mut written = 0;
    for id in ids {
        written += codec.write(&id, writer)?;
    }
    Ok(written)
}

/// Decodes exactly `count` ids.
///
/// # Errors
///
/// Returns `UnexpectedEof` if the reader runs dry and `InvalidData` for
/// malformed input.
pub fn read_many<C, R>(codec: &C, count: usize, reader: &mut R) -> Result<Vec<Dbid>, Error>
where
    C: DbidCodec,
    R: Read,
{
    (0..count).map(|_| codec.read(reader)).collect()
}
