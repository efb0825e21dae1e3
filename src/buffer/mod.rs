//! Growable write buffer
//!
//! A sequential-write, seekable-position stream over a resizable
//! in-memory byte block.
//!
//! # Architecture
//!
//! ```text
//! WriteBuffer
//!   ├─→ position    (write cursor, 0..=size)
//!   ├─→ size        (high-water mark of written bytes)
//!   ├─→ block_size  (growth quantum, >= 16)
//!   └─→ Store
//!         ├─→ Owned(MemoryBlock)          → freed with the buffer
//!         └─→ Borrowed(&mut MemoryBlock)  → truncated to size on flush/drop
//!
//! MemoryBlock
//!   └─→ Vec<u8> whose length is the allocated capacity
//! ```
//!
//! Capacity grows by the larger of the block quantum or 10% of the new
//! requirement, rounded up to the next quantum multiple. The strict `>=`
//! growth trigger keeps at least one spare byte past the data, which
//! `WriteBuffer::data` uses to place a zero terminator.

pub mod block;
pub mod growth;
pub mod stream;

pub use block::MemoryBlock;
pub use growth::{DEFAULT_BLOCK_SIZE, DEFAULT_INITIAL_SIZE, MIN_BLOCK_SIZE};
pub use stream::WriteBuffer;
