use crate::error::{CborError, CborErrorCode};

pub fn read_u8(data: &[u8], pos: &mut usize) -> Result<u8, CborError> {
    let off = *pos;
    let b = *data
        .get(*pos)
        .ok_or(CborError::new(CborErrorCode::UnexpectedEof, off))?;
    *pos += 1;
    Ok(b)
}

pub fn read_exact<'a>(data: &'a [u8], pos: &mut usize, n: usize) -> Result<&'a [u8], CborError> {
    let off = *pos;
    let end = pos
        .checked_add(n)
        .ok_or(CborError::new(CborErrorCode::LengthOverflow, off))?;
    if end > data.len() {
        return Err(CborError::new(CborErrorCode::UnexpectedEof, off));
    }
    let s = &data[*pos..end];
    *pos = end;
    Ok(s)
}

pub fn read_be_u16(data: &[u8], pos: &mut usize) -> Result<u16, CborError> {
    let s = read_exact(data, pos, 2)?;
    Ok(u16::from_be_bytes([s[0], s[1]]))
}

pub fn read_be_u32(data: &[u8], pos: &mut usize) -> Result<u32, CborError> {
    let s = read_exact(data, pos, 4)?;
    Ok(u32::from_be_bytes([s[0], s[1], s[2], s[3]]))
}

pub fn read_be_u64(data: &[u8], pos: &mut usize) -> Result<u64, CborError> {
    let s = read_exact(data, pos, 8)?;
    Ok(u64::from_be_bytes([
        s[0], s[1], s[2], s[3], s[4], s[5], s[6], s[7],
    ]))
}

/// Read the integer argument for additional info `ai`, accepting any head
/// width.
pub fn read_uint(data: &[u8], pos: &mut usize, ai: u8, off: usize) -> Result<u64, CborError> {
    match ai {
        0..=23 => Ok(u64::from(ai)),
        24 => Ok(u64::from(read_u8(data, pos)?)),
        25 => Ok(u64::from(read_be_u16(data, pos)?)),
        26 => Ok(u64::from(read_be_u32(data, pos)?)),
        27 => Ok(read_be_u64(data, pos)?),
        _ => Err(CborError::new(CborErrorCode::ReservedAdditionalInfo, off)),
    }
}

/// Read the integer argument for additional info `ai`, rejecting
/// non-shortest heads.
pub fn read_uint_canonical(
    data: &[u8],
    pos: &mut usize,
    ai: u8,
    off: usize,
) -> Result<u64, CborError> {
    let v = read_uint(data, pos, ai, off)?;
    let minimal = match ai {
        0..=23 => true,
        24 => v >= 24,
        25 => u8::try_from(v).is_err(),
        26 => u16::try_from(v).is_err(),
        27 => u32::try_from(v).is_err(),
        _ => unreachable!(),
    };
    if minimal {
        Ok(v)
    } else {
        Err(CborError::new(CborErrorCode::NonCanonicalEncoding, off))
    }
}

pub fn len_to_usize(len: u64, off: usize) -> Result<usize, CborError> {
    usize::try_from(len).map_err(|_| CborError::new(CborErrorCode::LengthOverflow, off))
}

/// Write a CBOR head (major type + argument) using the shortest encoding.
pub fn write_head(out: &mut Vec<u8>, major: u8, value: u64) {
    debug_assert!(major <= 7);
    if value < 24 {
        let v = u8::try_from(value).unwrap_or_default();
        out.push((major << 5) | v);
    } else if value <= 0xff {
        let v = u8::try_from(value).unwrap_or_default();
        out.push((major << 5) | 24);
        out.push(v);
    } else if value <= 0xffff {
        let v = u16::try_from(value).unwrap_or_default();
        out.push((major << 5) | 25);
        out.extend_from_slice(&v.to_be_bytes());
    } else if value <= 0xffff_ffff {
        let v = u32::try_from(value).unwrap_or_default();
        out.push((major << 5) | 26);
        out.extend_from_slice(&v.to_be_bytes());
    } else {
        out.push((major << 5) | 27);
        out.extend_from_slice(&value.to_be_bytes());
    }
}

/// Write a CBOR head whose argument is a byte length.
pub fn write_len(out: &mut Vec<u8>, major: u8, len: usize) -> Result<(), CborError> {
    let len_u64 =
        u64::try_from(len).map_err(|_| CborError::new(CborErrorCode::LengthOverflow, out.len()))?;
    write_head(out, major, len_u64);
    Ok(())
}

/// Widen an IEEE-754 binary16 bit pattern to `f64`.
///
/// The widening is exact: every binary16 value is representable in
/// binary64, so no rounding is involved.
pub fn f16_to_f64(bits: u16) -> f64 {
    let sign = u64::from(bits >> 15) << 63;
    let exp = u64::from((bits >> 10) & 0x1f);
    let mant = u64::from(bits & 0x3ff);
    match exp {
        // Subnormal: mant * 2^-24 is a normal (or zero) f64.
        0 => {
            let magnitude = f64::from(bits & 0x3ff) / 16_777_216.0;
            f64::from_bits(sign | magnitude.to_bits())
        }
        0x1f if mant == 0 => f64::from_bits(sign | f64::INFINITY.to_bits()),
        0x1f => f64::NAN,
        // Normal: rebias the exponent from 15 to 1023 and left-align the
        // mantissa in the 52-bit field.
        _ => f64::from_bits(sign | ((exp + 1008) << 52) | (mant << 42)),
    }
}
