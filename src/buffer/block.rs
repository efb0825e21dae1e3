//! Resizable contiguous byte store

/// A heap-allocated, resizable block of bytes
///
/// The block's `len()` is its allocated length. `WriteBuffer` treats that
/// length as physical capacity and tracks the logical data size separately.
#[derive(Debug, Default, Clone)]
pub struct MemoryBlock {
    data: Vec<u8>,
}

impl MemoryBlock {
    /// Create a block of `size` zeroed bytes
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0; size],
        }
    }

    /// Allocated length of the block in bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check whether the block has zero allocated bytes
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Resize the block to exactly `new_size` bytes
    ///
    /// Bytes in the common prefix are preserved; new bytes are zeroed.
    pub fn set_size(&mut self, new_size: usize) {
        self.data.resize(new_size, 0);
    }

    /// Grow the block to at least `minimum` bytes; never shrinks
    pub fn ensure_size(&mut self, minimum: usize) {
        if minimum > self.data.len() {
            self.data.resize(minimum, 0);
        }
    }

    /// Copy `src` into the block starting at `offset`
    ///
    /// The caller guarantees `offset + src.len() <= len()`.
    pub fn copy_from(&mut self, src: &[u8], offset: usize) {
        self.data[offset..offset + src.len()].copy_from_slice(src);
    }

    /// Read access to the block's bytes
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Write access to the block's bytes
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.data
    }
}
