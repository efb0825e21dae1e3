//! Seekable write stream over a memory block

use std::io::{self, Seek, SeekFrom, Write};

use bytes::Bytes;
use tracing::debug;

use super::block::MemoryBlock;
use super::growth::{clamp_block_size, grown_capacity, DEFAULT_BLOCK_SIZE, DEFAULT_INITIAL_SIZE};
use crate::error::Error;

/// Backing-store ownership, fixed at construction
///
/// The two variants expose the same capability set (a resizable block),
/// so every operation except `flush` is ownership-agnostic.
enum Store<'a> {
    /// The buffer allocated the block and frees it when dropped
    Owned(MemoryBlock),
    /// The block belongs to the caller; the buffer resizes it while
    /// writing and truncates it to the data size on flush/drop, but
    /// never deallocates it
    Borrowed(&'a mut MemoryBlock),
}

impl Store<'_> {
    fn block(&self) -> &MemoryBlock {
        match self {
            Store::Owned(block) => block,
            Store::Borrowed(block) => block,
        }
    }

    fn block_mut(&mut self) -> &mut MemoryBlock {
        match self {
            Store::Owned(block) => block,
            Store::Borrowed(block) => block,
        }
    }
}

/// Growable in-memory write buffer
///
/// Writes go to a cursor that can be seeked back anywhere inside the
/// already-written data; the data length only ever grows through writes.
/// The backing block over-allocates in quantum-sized steps so repeated
/// small writes stay O(1) amortized.
///
/// The buffer either owns its block ([`WriteBuffer::new`]) or writes into
/// a caller-owned one ([`WriteBuffer::over`]). A caller-owned block is
/// truncated to exactly the written length on [`flush`](Self::flush) and
/// when the buffer is dropped.
pub struct WriteBuffer<'a> {
    store: Store<'a>,
    position: usize,
    size: usize,
    block_size: usize,
}

impl WriteBuffer<'static> {
    /// Create a buffer over a freshly allocated, exclusively owned block
    ///
    /// # Arguments
    /// * `initial_size` - Initial block allocation (default: 256 bytes)
    /// * `block_size` - Growth quantum (default: 256; clamped to at least 16)
    pub fn new(initial_size: Option<usize>, block_size: Option<usize>) -> Self {
        WriteBuffer {
            store: Store::Owned(MemoryBlock::new(
                initial_size.unwrap_or(DEFAULT_INITIAL_SIZE),
            )),
            position: 0,
            size: 0,
            block_size: clamp_block_size(block_size.unwrap_or(DEFAULT_BLOCK_SIZE)),
        }
    }
}

impl<'a> WriteBuffer<'a> {
    /// Create a buffer that writes into a caller-owned block
    ///
    /// The block is resized to `initial_size` immediately; its previous
    /// content is not meaningful afterwards. While the buffer lives it
    /// holds the block over-allocated; `flush` and drop truncate it to
    /// exactly [`len`](Self::len) bytes. The block is never deallocated
    /// by the buffer.
    pub fn over(
        block: &'a mut MemoryBlock,
        initial_size: Option<usize>,
        block_size: Option<usize>,
    ) -> Self {
        block.set_size(initial_size.unwrap_or(DEFAULT_INITIAL_SIZE));
        WriteBuffer {
            store: Store::Borrowed(block),
            position: 0,
            size: 0,
            block_size: clamp_block_size(block_size.unwrap_or(DEFAULT_BLOCK_SIZE)),
        }
    }

    /// Write `data` at the current position, growing the block if needed
    ///
    /// Writing inside the existing data overwrites it in place; writing at
    /// the end appends. An empty slice is a no-op. Allocation failure is
    /// fatal at this layer, so the call itself cannot fail.
    pub fn write(&mut self, data: &[u8]) {
        if data.is_empty() {
            return;
        }

        let needed = self.position + data.len();

        // Strict trigger: exactly filling the block still grows it, so at
        // least one spare byte past the data exists for the terminator.
        if needed >= self.capacity() {
            let target = grown_capacity(needed, self.block_size);
            debug!("Growing block from {} to {} bytes", self.capacity(), target);
            self.store.block_mut().ensure_size(target);
        }

        self.store.block_mut().copy_from(data, self.position);
        self.position += data.len();
        self.size = self.size.max(self.position);
    }

    /// Synchronize a caller-owned block with the logical data size
    ///
    /// In owned mode there is nothing to synchronize. In borrowed mode the
    /// external block is truncated to exactly [`len`](Self::len) bytes,
    /// discarding spare capacity; position and size are untouched.
    /// Idempotent, and also runs when the buffer is dropped.
    pub fn flush(&mut self) {
        if let Store::Borrowed(block) = &mut self.store {
            block.set_size(self.size);
        }
    }

    /// Discard the logical contents, retaining allocated capacity
    pub fn reset(&mut self) {
        self.position = 0;
        self.size = 0;
    }

    /// View of the written bytes, valid until the next mutating call
    ///
    /// When spare capacity exists past the data (guaranteed once any write
    /// has triggered growth), a single zero byte is placed at the offset
    /// just after the data, so the backing block also reads as a C-style
    /// string; `len` and `position` are unaffected. A buffer whose block
    /// is exactly full (possible only before the first growth) has no room
    /// for the terminator and skips it.
    pub fn data(&mut self) -> &[u8] {
        let size = self.size;
        let block = self.store.block_mut();
        if block.len() > size {
            block.as_mut_slice()[size] = 0;
        }
        &block.as_slice()[..size]
    }

    /// Copy the written bytes out as a `Bytes` handle
    pub fn to_bytes(&self) -> Bytes {
        Bytes::copy_from_slice(&self.store.block().as_slice()[..self.size])
    }

    /// Number of valid bytes written so far
    pub fn len(&self) -> usize {
        self.size
    }

    /// Check whether any bytes have been written
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Allocated length of the backing block
    pub fn capacity(&self) -> usize {
        self.store.block().len()
    }

    /// Current write cursor offset
    pub fn position(&self) -> usize {
        self.position
    }

    /// Move the write cursor to `new_position`
    ///
    /// Seeking anywhere within the written data (`0..=len()`) succeeds and
    /// returns `true`. Seeking past the end is rejected and leaves the
    /// cursor unchanged: only writes extend the data, so no unwritten hole
    /// can appear.
    pub fn set_position(&mut self, new_position: usize) -> bool {
        if new_position <= self.size {
            self.position = new_position;
            true
        } else {
            false
        }
    }
}

impl Default for WriteBuffer<'static> {
    fn default() -> Self {
        Self::new(None, None)
    }
}

impl Drop for WriteBuffer<'_> {
    fn drop(&mut self) {
        // Implicit finalize for a caller-owned block
        self.flush();
    }
}

impl Write for WriteBuffer<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        WriteBuffer::write(self, buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        WriteBuffer::flush(self);
        Ok(())
    }
}

impl Seek for WriteBuffer<'_> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let target = match pos {
            SeekFrom::Start(offset) => i128::from(offset),
            SeekFrom::Current(delta) => self.position as i128 + i128::from(delta),
            SeekFrom::End(delta) => self.size as i128 + i128::from(delta),
        };

        if target < 0 || target > self.size as i128 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                Error::SeekOutOfRange(format!(
                    "position {} is outside the written data (0..={})",
                    target, self.size
                )),
            ));
        }

        self.position = target as usize;
        Ok(self.position as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_buffer_defaults() {
        let buf = WriteBuffer::default();

        assert_eq!(buf.capacity(), 256);
        assert_eq!(buf.len(), 0);
        assert_eq!(buf.position(), 0);
        assert!(buf.is_empty());
    }

    #[test]
    fn test_write_advances_cursor_and_size() {
        let mut buf = WriteBuffer::new(Some(64), Some(16));

        buf.write(b"hello");
        assert_eq!(buf.position(), 5);
        assert_eq!(buf.len(), 5);
        assert_eq!(buf.data(), b"hello");
    }

    #[test]
    fn test_empty_write_is_noop() {
        let mut buf = WriteBuffer::new(Some(64), Some(16));
        buf.write(b"abc");

        buf.write(b"");
        assert_eq!(buf.position(), 3);
        assert_eq!(buf.len(), 3);
        assert_eq!(buf.capacity(), 64);
    }

    #[test]
    fn test_overwrite_keeps_size() {
        let mut buf = WriteBuffer::new(Some(64), Some(16));

        buf.write(b"AAAA");
        assert!(buf.set_position(1));
        buf.write(b"BB");

        assert_eq!(buf.data(), b"ABBA");
        assert_eq!(buf.len(), 4);
        assert_eq!(buf.position(), 3);
    }

    #[test]
    fn test_exact_fill_still_grows() {
        let mut buf = WriteBuffer::new(Some(4), Some(16));

        // needed == capacity must trigger growth (spare byte guarantee)
        buf.write(b"abcd");
        // padded = 4 + 16 = 20 → 20 - 4 + 16 = 32
        assert_eq!(buf.capacity(), 32);
        assert_eq!(buf.len(), 4);
    }

    #[test]
    fn test_quantum_floor_applies() {
        let mut small = WriteBuffer::new(Some(0), Some(1));
        let mut floor = WriteBuffer::new(Some(0), Some(16));

        small.write(b"x");
        floor.write(b"x");

        // A quantum below 16 behaves exactly like 16
        assert_eq!(small.capacity(), floor.capacity());
        assert_eq!(small.capacity(), 32);
    }

    #[test]
    fn test_set_position_rejects_past_end() {
        let mut buf = WriteBuffer::new(Some(64), Some(16));
        buf.write(b"hello");

        assert!(!buf.set_position(6));
        assert_eq!(buf.position(), 5);

        assert!(buf.set_position(5));
        assert!(buf.set_position(0));
        assert_eq!(buf.position(), 0);
    }

    #[test]
    fn test_reset_retains_capacity() {
        let mut buf = WriteBuffer::new(Some(8), Some(16));
        buf.write(b"0123456789");
        let grown = buf.capacity();

        buf.reset();
        assert_eq!(buf.len(), 0);
        assert_eq!(buf.position(), 0);
        assert_eq!(buf.capacity(), grown);
        assert_eq!(buf.data(), b"");
    }

    #[test]
    fn test_data_places_terminator_in_spare_byte() {
        let mut buf = WriteBuffer::new(Some(64), Some(16));
        buf.write(b"abc");

        assert_eq!(buf.data(), b"abc");
        // terminator sits past the data without affecting len
        assert_eq!(buf.store.block().as_slice()[3], 0);
        assert_eq!(buf.len(), 3);
        assert_eq!(buf.position(), 3);
    }

    #[test]
    fn test_data_skips_terminator_when_block_exactly_full() {
        // Zero-capacity block with no writes: no room for the terminator
        let mut buf = WriteBuffer::new(Some(0), Some(16));

        assert_eq!(buf.data(), b"");
        assert_eq!(buf.capacity(), 0);
    }

    #[test]
    fn test_to_bytes_copies_written_prefix() {
        let mut buf = WriteBuffer::new(Some(64), Some(16));
        buf.write(b"payload");

        let bytes = buf.to_bytes();
        assert_eq!(bytes.as_ref(), b"payload");

        // The copy is independent of later writes
        buf.write(b"!");
        assert_eq!(bytes.as_ref(), b"payload");
    }

    #[test]
    fn test_io_seek_variants() {
        let mut buf = WriteBuffer::new(Some(64), Some(16));
        buf.write(b"0123456789");

        assert_eq!(buf.seek(SeekFrom::Start(4)).unwrap(), 4);
        assert_eq!(buf.seek(SeekFrom::Current(3)).unwrap(), 7);
        assert_eq!(buf.seek(SeekFrom::Current(-7)).unwrap(), 0);
        assert_eq!(buf.seek(SeekFrom::End(0)).unwrap(), 10);
        assert_eq!(buf.seek(SeekFrom::End(-10)).unwrap(), 0);

        // Out of range in either direction fails without moving the cursor
        assert!(buf.seek(SeekFrom::Current(-1)).is_err());
        assert!(buf.seek(SeekFrom::Start(11)).is_err());
        assert_eq!(buf.position(), 0);
    }
}
