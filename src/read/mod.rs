//! Primitive readers over a byte [`Span`].
//!
//! Every reader advances the span on success and restores the pre-call
//! position on failure, reporting a diagnostic through the sink before
//! returning `None`. Entity decoders compose these primitives; see the
//! submodules.

pub mod custom;
pub mod entity;
pub mod instr;
pub mod lazy;
pub mod module;

use byteorder::{ByteOrder, LittleEndian};

use crate::errors::{ErrorSink, ErrorsContextGuard};
use crate::features::Features;
use crate::span::Span;

/// An entity decodable from the front of a span. Implemented by every
/// element type a [`lazy::LazySequence`] can yield.
pub trait Read<'a>: Sized {
    fn read(span: &mut Span<'a>, features: &Features, errors: &mut dyn ErrorSink) -> Option<Self>;
}

/// Runs `read` and restores the span to its pre-call position when it
/// fails, so a failed decode never consumes input.
pub(crate) fn backtrack<'a, T, F>(span: &mut Span<'a>, read: F) -> Option<T>
where
    F: FnOnce(&mut Span<'a>) -> Option<T>,
{
    let saved = *span;
    let result = read(span);
    if result.is_none() {
        *span = saved;
    }
    result
}

/// Reads a single byte.
pub fn read_u8(span: &mut Span<'_>, errors: &mut dyn ErrorSink) -> Option<u8> {
    match span.peek() {
        Some(byte) => {
            span.advance(1);
            Some(byte)
        }
        None => {
            errors.on_error(span.pos(), "Unable to read u8");
            None
        }
    }
}

/// Reads exactly `count` bytes as a borrowed sub-span.
pub fn read_bytes<'a>(
    span: &mut Span<'a>,
    count: usize,
    errors: &mut dyn ErrorSink,
) -> Option<Span<'a>> {
    if span.len() < count {
        errors.on_error(span.pos(), &format!("Unable to read {count} bytes"));
        return None;
    }
    Some(span.take(count))
}

/// Reads a raw little-endian u32 (4 bytes, not LEB128).
pub fn read_u32le(span: &mut Span<'_>, errors: &mut dyn ErrorSink) -> Option<u32> {
    let bytes = read_bytes(span, 4, errors)?;
    Some(LittleEndian::read_u32(bytes.bytes()))
}

/// Reads a little-endian IEEE 754 f32.
pub fn read_f32(span: &mut Span<'_>, errors: &mut dyn ErrorSink) -> Option<f32> {
    backtrack(span, |span| {
        let mut errors = ErrorsContextGuard::new(errors, span.pos(), "f32");
        let bytes = read_bytes(span, 4, &mut errors)?;
        Some(LittleEndian::read_f32(bytes.bytes()))
    })
}

/// Reads a little-endian IEEE 754 f64.
pub fn read_f64(span: &mut Span<'_>, errors: &mut dyn ErrorSink) -> Option<f64> {
    backtrack(span, |span| {
        let mut errors = ErrorsContextGuard::new(errors, span.pos(), "f64");
        let bytes = read_bytes(span, 8, &mut errors)?;
        Some(LittleEndian::read_f64(bytes.bytes()))
    })
}

// ---------------------------------------------------------------------------
// LEB128
// ---------------------------------------------------------------------------

const fn leb_max_bytes(bits: u32) -> u32 {
    (bits + 6) / 7
}

fn sign_extend(value: u64, sign_bit: u32) -> u64 {
    let shift = 63 - sign_bit;
    (((value << shift) as i64) >> shift) as u64
}

/// LEB128 core for a `bits`-wide target. The final byte's unused high bits
/// must be zero (unsigned) or a proper sign extension (signed).
fn read_var_int(
    span: &mut Span<'_>,
    errors: &mut dyn ErrorSink,
    desc: &str,
    bits: u32,
    signed: bool,
) -> Option<u64> {
    backtrack(span, |span| {
        let mut errors = ErrorsContextGuard::new(errors, span.pos(), desc);
        let max_bytes = leb_max_bytes(bits);
        let mut result: u64 = 0;
        let mut i = 0;
        loop {
            let byte = read_u8(span, &mut errors)?;
            let shift = 7 * i;
            result |= ((byte & 0x7f) as u64) << shift;
            i += 1;
            if i == max_bytes {
                let used_bits = bits - 7 * (max_bytes - 1);
                let mask_bits = if signed { used_bits - 1 } else { used_bits };
                let mask = !(((1u32 << mask_bits) - 1) as u8);
                if byte & mask == 0 {
                    break;
                }
                if signed && byte & mask == mask & 0x7f {
                    result = sign_extend(result, bits - 1);
                    break;
                }
                let zero_ext = byte & !mask & 0x7f;
                if signed {
                    let one_ext = (byte | (mask & 0x7f)) & 0x7f;
                    errors.on_error(
                        span.pos(),
                        &format!(
                            "Last byte of {desc} must be sign extension: \
                             expected {zero_ext:#x} or {one_ext:#x}, got {byte:#x}"
                        ),
                    );
                } else {
                    errors.on_error(
                        span.pos(),
                        &format!(
                            "Last byte of {desc} must be zero extension: \
                             expected {zero_ext:#x}, got {byte:#x}"
                        ),
                    );
                }
                return None;
            }
            if byte & 0x80 == 0 {
                if signed {
                    result = sign_extend(result, 6 + shift);
                }
                break;
            }
        }
        Some(result)
    })
}

/// Reads an unsigned LEB128 u32 under the given context description.
pub fn read_var_u32(span: &mut Span<'_>, errors: &mut dyn ErrorSink, desc: &str) -> Option<u32> {
    read_var_int(span, errors, desc, 32, false).map(|value| value as u32)
}

/// Reads an unsigned LEB128 u64 under the given context description.
pub fn read_var_u64(span: &mut Span<'_>, errors: &mut dyn ErrorSink, desc: &str) -> Option<u64> {
    read_var_int(span, errors, desc, 64, false)
}

/// Reads a signed LEB128 s32 under the given context description.
pub fn read_var_s32(span: &mut Span<'_>, errors: &mut dyn ErrorSink, desc: &str) -> Option<i32> {
    read_var_int(span, errors, desc, 32, true).map(|value| value as i32)
}

/// Reads a signed LEB128 s64 under the given context description.
pub fn read_var_s64(span: &mut Span<'_>, errors: &mut dyn ErrorSink, desc: &str) -> Option<i64> {
    read_var_int(span, errors, desc, 64, true).map(|value| value as i64)
}

/// Reads the signed 33-bit LEB used by multi-value block types.
pub(crate) fn read_var_s33(
    span: &mut Span<'_>,
    errors: &mut dyn ErrorSink,
    desc: &str,
) -> Option<i64> {
    read_var_int(span, errors, desc, 33, true).map(|value| value as i64)
}

pub fn read_u32(span: &mut Span<'_>, errors: &mut dyn ErrorSink) -> Option<u32> {
    read_var_u32(span, errors, "u32")
}

pub fn read_s32(span: &mut Span<'_>, errors: &mut dyn ErrorSink) -> Option<i32> {
    read_var_s32(span, errors, "s32")
}

pub fn read_s64(span: &mut Span<'_>, errors: &mut dyn ErrorSink) -> Option<i64> {
    read_var_s64(span, errors, "s64")
}

/// Reads a u32 LEB index.
pub fn read_index(span: &mut Span<'_>, errors: &mut dyn ErrorSink) -> Option<u32> {
    read_var_u32(span, errors, "index")
}

/// Reads an element count or byte length, rejecting values that exceed the
/// remaining input. Since every element occupies at least one byte, one
/// check covers both uses.
pub fn read_count(span: &mut Span<'_>, errors: &mut dyn ErrorSink) -> Option<u32> {
    backtrack(span, |span| {
        let count = read_index(span, errors)?;
        if count as usize > span.len() {
            errors.on_error(
                span.pos(),
                &format!(
                    "Count is longer than the data length: {} > {}",
                    count,
                    span.len()
                ),
            );
            return None;
        }
        Some(count)
    })
}

/// Reads a declared byte length. See [`read_count`].
pub fn read_length(span: &mut Span<'_>, errors: &mut dyn ErrorSink) -> Option<u32> {
    read_count(span, errors)
}

/// Reads a length-prefixed name as a borrowed byte slice. UTF-8 validity
/// is a validation property, not a decode failure.
pub fn read_string<'a>(
    span: &mut Span<'a>,
    errors: &mut dyn ErrorSink,
    desc: &str,
) -> Option<&'a [u8]> {
    backtrack(span, |span| {
        let mut errors = ErrorsContextGuard::new(errors, span.pos(), desc);
        let length = read_length(span, &mut errors)?;
        let bytes = read_bytes(span, length as usize, &mut errors)?;
        Some(bytes.bytes())
    })
}

/// Reads a counted vector, decoding each element with `read_element`. A
/// failed element aborts the vector.
pub fn read_vector<'a, T>(
    span: &mut Span<'a>,
    features: &Features,
    errors: &mut dyn ErrorSink,
    desc: &str,
    mut read_element: impl FnMut(&mut Span<'a>, &Features, &mut dyn ErrorSink) -> Option<T>,
) -> Option<Vec<T>> {
    backtrack(span, |span| {
        let mut errors = ErrorsContextGuard::new(errors, span.pos(), desc);
        let count = read_count(span, &mut errors)?;
        let mut result = Vec::with_capacity(count as usize);
        for _ in 0..count {
            result.push(read_element(span, features, &mut errors)?);
        }
        Some(result)
    })
}

/// Reads a byte that the encoding requires to be zero.
pub fn read_reserved(span: &mut Span<'_>, errors: &mut dyn ErrorSink) -> Option<u8> {
    backtrack(span, |span| {
        let mut errors = ErrorsContextGuard::new(errors, span.pos(), "reserved");
        let byte = read_u8(span, &mut errors)?;
        if byte != 0 {
            errors.on_error(span.pos(), &format!("Expected reserved byte 0, got {byte}"));
            return None;
        }
        Some(byte)
    })
}
