//! Bounds-checked reads over ABI-encoded argument bytes.
//!
//! Offsets and lengths embedded in calldata are untrusted. Every read is
//! checked against the end of the buffer before slicing, and oversized
//! offset/length words saturate so that the subsequent read fails with
//! `TruncatedData` instead of overflowing.

use alloy_primitives::{Address, U256};
use slipcheck_core::DecodeError;

/// Size of one ABI word.
pub const WORD: usize = 32;

/// Length of the function selector that precedes the arguments.
pub const SELECTOR_LEN: usize = 4;

/// Cursor-free reader over the argument section of calldata.
#[derive(Debug, Clone, Copy)]
pub struct WordReader<'a> {
    data: &'a [u8],
    /// Absolute position of `data[0]` in the original calldata, used only
    /// for error reporting.
    origin: usize,
}

impl<'a> WordReader<'a> {
    /// Reader over the bytes that follow the 4-byte selector.
    pub fn new(args: &'a [u8]) -> Self {
        Self::with_origin(args, SELECTOR_LEN)
    }

    pub fn with_origin(data: &'a [u8], origin: usize) -> Self {
        Self { data, origin }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// `len` bytes starting at `pos`.
    pub fn slice(&self, pos: usize, len: usize) -> Result<&'a [u8], DecodeError> {
        match pos.checked_add(len) {
            Some(end) if end <= self.data.len() => Ok(&self.data[pos..end]),
            _ => Err(self.truncated(pos, len)),
        }
    }

    fn truncated(&self, pos: usize, len: usize) -> DecodeError {
        DecodeError::TruncatedData {
            offset: self.origin.saturating_add(pos),
            needed: len,
            available: self.data.len().saturating_sub(pos),
        }
    }

    /// The 32-byte word at byte position `pos`.
    pub fn word(&self, pos: usize) -> Result<&'a [u8; WORD], DecodeError> {
        self.slice(pos, WORD)?
            .try_into()
            .map_err(|_| self.truncated(pos, WORD))
    }

    /// The `index`-th head word of a tuple starting at `base`.
    pub fn head(&self, base: usize, index: usize) -> Result<&'a [u8; WORD], DecodeError> {
        self.word(base.saturating_add(index.saturating_mul(WORD)))
    }

    pub fn uint(&self, pos: usize) -> Result<U256, DecodeError> {
        Ok(U256::from_be_bytes(*self.word(pos)?))
    }

    /// Address stored in the low 20 bytes of a word. Padding is not checked.
    pub fn address(&self, pos: usize) -> Result<Address, DecodeError> {
        Ok(Address::from_slice(&self.word(pos)?[12..]))
    }

    /// Offset or length word, saturated to `usize::MAX` when it cannot fit.
    pub fn offset(&self, pos: usize) -> Result<usize, DecodeError> {
        Ok(word_to_usize(self.word(pos)?))
    }

    /// Dynamic `bytes` whose offset (relative to `base`) is `rel`.
    ///
    /// The body must include its zero padding up to the next word boundary.
    pub fn bytes_at(&self, base: usize, rel: usize) -> Result<&'a [u8], DecodeError> {
        let start = base.saturating_add(rel);
        let len = self.offset(start)?;
        let body = self.slice(start.saturating_add(WORD), padded_len(len))?;
        Ok(&body[..len])
    }

    /// Dynamic `address[]` whose length word sits at `start`.
    pub fn address_array_at(&self, start: usize) -> Result<Vec<Address>, DecodeError> {
        let count = self.offset(start)?;
        let body = self.slice(start.saturating_add(WORD), count.saturating_mul(WORD))?;
        Ok(body
            .chunks_exact(WORD)
            .map(|w| Address::from_slice(&w[12..]))
            .collect())
    }
}

/// Big-endian word to `usize`, saturating on overflow.
fn word_to_usize(word: &[u8; WORD]) -> usize {
    if word[..WORD - 8].iter().any(|b| *b != 0) {
        return usize::MAX;
    }
    let mut low = [0u8; 8];
    low.copy_from_slice(&word[WORD - 8..]);
    usize::try_from(u64::from_be_bytes(low)).unwrap_or(usize::MAX)
}

/// `len` rounded up to a whole number of words, saturating.
fn padded_len(len: usize) -> usize {
    match len % WORD {
        0 => len,
        rem => len.saturating_add(WORD - rem),
    }
}
