use binary_layout::define_layout;

use crate::error::LineFault;

// one record per input line, laid out like the store's `(key, val)` entry
define_layout!(record, LittleEndian, {
    number: i32,
    value: i32,
});

define_layout!(word, LittleEndian, {
    value: i32,
});

pub const RECORD_SIZE: usize = match record::SIZE {
    Some(size) => size,
    None => panic!("record layout must have a fixed size"),
};

pub const WORD_SIZE: usize = match word::SIZE {
    Some(size) => size,
    None => panic!("word layout must have a fixed size"),
};

/// Encodes `value` as a little-endian two's-complement 32-bit integer.
///
/// Values outside the `i32` range are rejected before any byte is produced.
pub fn encode_word(value: i64) -> Result<[u8; WORD_SIZE], LineFault> {
    let value = narrow(value)?;
    let mut buf = [0u8; WORD_SIZE];
    word::View::new(&mut buf[..]).value_mut().write(value);
    Ok(buf)
}

fn narrow(value: i64) -> Result<i32, LineFault> {
    i32::try_from(value).map_err(|_| LineFault::OutOfRange(value.to_string()))
}

/// A decoded `(number, value)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record {
    pub number: i32,
    pub value: i32,
}

impl Record {
    /// Encodes both halves, number first. Fails if either is out of range.
    pub fn encode(number: i64, value: i64) -> Result<[u8; RECORD_SIZE], LineFault> {
        let mut buf = [0u8; RECORD_SIZE];
        buf[..WORD_SIZE].copy_from_slice(&encode_word(number)?);
        buf[WORD_SIZE..].copy_from_slice(&encode_word(value)?);
        Ok(buf)
    }

    /// `buf` must hold at least [`RECORD_SIZE`] bytes.
    pub fn decode(buf: &[u8]) -> Self {
        let view = record::View::new(buf);
        Self {
            number: view.number().read(),
            value: view.value().read(),
        }
    }
}
