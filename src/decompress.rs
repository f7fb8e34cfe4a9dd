use crate::accessor::BufferAccessor;
use crate::bits::ByteBits;
use crate::error::DecodeError;
use crate::header::{CompressionHeader, CompressionType};

type Result<T> = core::result::Result<T, DecodeError>;

// --- Constants ---

/// Number of items (literals or back-references) governed by one control byte.
const TAG_GROUP_SIZE: u32 = 8;

/// Length bias of the compact 4-bit length in plain LZ77.
const LZ77_LENGTH_BIAS: usize = 3;

/// Length bias of the compact 4-bit length in extended LZ77.
const COMPACT_LENGTH_BIAS: usize = 1;

/// Length bias of the 8-bit extended length (upper nibble 0).
const SHORT_LENGTH_BIAS: usize = 0xF + 2;

/// Length bias of the 16-bit extended length (upper nibble 1).
const LONG_LENGTH_BIAS: usize = 0xFF + 0xF + 3;

/// Bias added to the 12-bit back-reference offset.
const OFFSET_BIAS: usize = 2;

/// Most output one source byte can produce: a 2-byte plain reference of
/// length 18.
const LZ77_MAX_RATIO: usize = (0xF + LZ77_LENGTH_BIAS) / 2;

/// Most output one source byte can produce: a 4-byte extended reference of
/// the longest length.
const EXTENDED_MAX_RATIO: usize = (0xFFFF + LONG_LENGTH_BIAS).div_ceil(4);

/// Decompresses a headered stream, appending exactly `decoded_size` bytes.
///
/// The header is parsed from the start of `input`. Streams whose header is
/// not an expandable type fail with [`DecodeError::UnsupportedAlgorithm`].
/// On error `output` is left at its original length.
pub fn decompress(input: &[u8], output: &mut Vec<u8>) -> Result<()> {
    let header = CompressionHeader::from_bytes(input)?;
    if !header.is_recognized() {
        return Err(DecodeError::UnsupportedAlgorithm(header.raw_type()));
    }

    check_expandable(&header, input)?;

    let start = output.len();
    reserve_output(output, header.decoded_size() as usize)?;
    output.resize(start + header.decoded_size() as usize, 0);

    let result = expand(&header, input, &mut output[start..]);
    if result.is_err() {
        output.truncate(start);
    }
    result
}

/// Reserves room for `additional` decoded bytes without aborting on failure.
///
/// Fails with [`DecodeError::AllocationFailed`] and leaves `output` as it was.
pub fn reserve_output(output: &mut Vec<u8>, additional: usize) -> Result<()> {
    output
        .try_reserve_exact(additional)
        .map_err(|_| DecodeError::AllocationFailed { size: additional })
}

/// Expands the stream described by `header` from `input` into `output`.
///
/// `input` starts with the header itself. `output` must be exactly
/// `header.decoded_size()` bytes long.
pub fn expand(header: &CompressionHeader, input: &[u8], output: &mut [u8]) -> Result<()> {
    let decoded_size = header.decoded_size() as usize;
    if output.len() != decoded_size {
        return Err(DecodeError::OutOfRange {
            position: 0,
            len: decoded_size,
            capacity: output.len(),
        });
    }

    match header.compression() {
        Some(CompressionType::Lz77) => expand_lz77(header, input, output, false),
        Some(CompressionType::ExtendedLz77) => expand_lz77(header, input, output, true),
        _ => Err(DecodeError::UnsupportedAlgorithm(header.raw_type())),
    }
}

/// Rejects a header whose decoded size `input` cannot possibly produce.
///
/// Lets callers refuse absurd sizes before allocating the output.
pub fn check_expandable(header: &CompressionHeader, input: &[u8]) -> Result<()> {
    let ratio = match header.compression() {
        Some(CompressionType::Lz77) => LZ77_MAX_RATIO,
        Some(CompressionType::ExtendedLz77) => EXTENDED_MAX_RATIO,
        _ => return Err(DecodeError::UnsupportedAlgorithm(header.raw_type())),
    };
    let body_len = input.len().saturating_sub(header.header_size());
    if header.decoded_size() as usize > body_len.saturating_mul(ratio) {
        return Err(DecodeError::TruncatedInput {
            position: input.len(),
        });
    }
    Ok(())
}

/// Sequential reader over the compressed source.
struct Input<'a> {
    src: BufferAccessor<&'a [u8]>,
    pos: usize,
}

impl<'a> Input<'a> {
    const fn new(src: &'a [u8], pos: usize) -> Self {
        Self {
            src: BufferAccessor::new(src),
            pos,
        }
    }

    #[inline]
    fn next(&mut self) -> Result<u8> {
        let byte = self
            .src
            .read_u8(self.pos)
            .map_err(|_| DecodeError::TruncatedInput { position: self.pos })?;
        self.pos += 1;
        Ok(byte)
    }
}

/// Expands an LZ77 or extended LZ77 body.
///
/// Each control byte flags the next eight items from the most significant
/// bit down: 0 is a literal byte, 1 is a back-reference.
fn expand_lz77(
    header: &CompressionHeader,
    input: &[u8],
    output: &mut [u8],
    extended: bool,
) -> Result<()> {
    let mut input = Input::new(input, header.header_size());
    let end = output.len();
    let mut out_pos = 0;

    while out_pos < end {
        let control = input.next()?;

        for bit in (0..TAG_GROUP_SIZE).rev() {
            // Remaining flags of the last control byte are ignored.
            if out_pos == end {
                break;
            }

            if control & (1 << bit) == 0 {
                output[out_pos] = input.next()?;
                out_pos += 1;
            } else {
                let (length, offset) = read_back_reference(&mut input, extended)?;
                out_pos = copy_back_reference(output, out_pos, length, offset)?;
            }
        }
    }

    Ok(())
}

/// Decodes a `(length, offset)` pair.
///
/// The offset always takes the low nibble of the last length byte plus the
/// following byte.
fn read_back_reference(input: &mut Input<'_>, extended: bool) -> Result<(usize, usize)> {
    let b0 = input.next()?;

    let (length, last) = if !extended {
        (b0.upper4() as usize + LZ77_LENGTH_BIAS, b0)
    } else {
        match b0.upper4() {
            1 => {
                let b1 = input.next()?;
                let b2 = input.next()?;
                let length = ((b0.lower4() as usize) << 12)
                    | ((b1 as usize) << 4)
                    | b2.upper4() as usize;
                (length + LONG_LENGTH_BIAS, b2)
            }
            0 => {
                let b1 = input.next()?;
                let length = ((b0.lower4() as usize) << 4) | b1.upper4() as usize;
                (length + SHORT_LENGTH_BIAS, b1)
            }
            n => (n as usize + COMPACT_LENGTH_BIAS, b0),
        }
    };

    let low = input.next()?;
    let offset = (((last.lower4() as usize) << 8) | low as usize) + OFFSET_BIAS;
    Ok((length, offset))
}

/// Copies `length` bytes from `offset` bytes behind `pos`, one byte at a time
/// so a reference may repeat bytes it has just written.
///
/// The copy stops at the end of `output`. Returns the new output position.
#[inline]
pub(crate) fn copy_back_reference(
    output: &mut [u8],
    pos: usize,
    length: usize,
    offset: usize,
) -> Result<usize> {
    if offset == 0 || offset > pos {
        return Err(DecodeError::CorruptStream {
            position: pos,
            offset,
        });
    }

    let end = pos.saturating_add(length).min(output.len());
    for i in pos..end {
        output[i] = output[i - offset];
    }
    Ok(end)
}
