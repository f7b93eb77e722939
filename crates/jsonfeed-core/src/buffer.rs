//! Input buffer descriptors and the over-read padding contract
//!
//! Vectorized scanners read the input in fixed-width chunks and may touch bytes
//! past the logical end. Every buffer handed to a source therefore describes
//! both its logical length and its allocated capacity, and the capacity has to
//! cover the engine's padding.

use crate::error::{Error, Result};

/// Borrowed view of a caller-owned buffer
///
/// `data` spans the whole allocation; only the first `len` bytes are input.
#[derive(Debug, Clone, Copy)]
pub struct InputBuffer<'a> {
    data: &'a [u8],
    len: usize,
}

impl<'a> InputBuffer<'a> {
    /// Describe `len` logical bytes at the start of the allocation `data`
    pub fn new(data: &'a [u8], len: usize) -> Self {
        Self { data, len }
    }

    /// Logical byte count
    pub fn len(&self) -> usize {
        self.len
    }

    /// True when the logical content is empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Allocated byte count
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Check the padding contract and return the logical bytes
    pub fn checked(&self, padding: usize) -> Result<&'a [u8]> {
        match self.len.checked_add(padding) {
            Some(required) if required <= self.data.len() => Ok(&self.data[..self.len]),
            _ => Err(Error::InsufficientPadding {
                len: self.len,
                capacity: self.data.len(),
                padding,
            }),
        }
    }
}

/// Owned, zero-padded copy of some input
///
/// Convenience for callers that do not manage their own padded allocations.
#[derive(Debug, Clone)]
pub struct PaddedBuffer {
    data: Vec<u8>,
    len: usize,
}

impl PaddedBuffer {
    /// Copy `bytes` into a new allocation followed by `padding` zero bytes
    pub fn new(bytes: &[u8], padding: usize) -> Self {
        let mut data = Vec::with_capacity(bytes.len() + padding);
        data.extend_from_slice(bytes);
        data.resize(bytes.len() + padding, 0);
        Self {
            data,
            len: bytes.len(),
        }
    }

    /// Logical byte count
    pub fn len(&self) -> usize {
        self.len
    }

    /// True when the logical content is empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Logical bytes without padding
    pub fn as_bytes(&self) -> &[u8] {
        &self.data[..self.len]
    }

    /// Describe this allocation for a source
    pub fn as_input(&self) -> InputBuffer<'_> {
        InputBuffer::new(&self.data, self.len)
    }
}
