// Membuf - Growable In-Memory Write Buffer
// A sequential-write, seekable stream over a dynamically resized byte store

#![warn(rust_2018_idioms)]

pub mod buffer;

// Re-exports for convenience
pub use buffer::{MemoryBlock, WriteBuffer};

/// Membuf error types
pub mod error {
    use thiserror::Error;

    #[derive(Error, Debug)]
    pub enum Error {
        #[error("Seek out of range: {0}")]
        SeekOutOfRange(String),
    }

    pub type Result<T> = std::result::Result<T, Error>;
}
