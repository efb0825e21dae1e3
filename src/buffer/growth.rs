//! Growth policy for the write buffer's backing block

/// Minimum growth quantum; smaller requested quanta are clamped up
pub const MIN_BLOCK_SIZE: usize = 16;

/// Default allocation for a freshly owned block
pub const DEFAULT_INITIAL_SIZE: usize = 256;

/// Default growth quantum
pub const DEFAULT_BLOCK_SIZE: usize = 256;

/// Clamp a requested growth quantum to the supported minimum
pub fn clamp_block_size(requested: usize) -> usize {
    requested.max(MIN_BLOCK_SIZE)
}

/// Compute the capacity to grow to so that `needed` bytes fit
///
/// Pads the requirement by the larger of the block quantum or 10% of the
/// requirement, then rounds up to the next quantum multiple. The result is
/// always a multiple of `block_size` and strictly greater than the padded
/// requirement, so repeated small writes amortize to O(1) reallocations.
pub fn grown_capacity(needed: usize, block_size: usize) -> usize {
    // pad by at least 10% to absorb follow-up writes
    let padded = needed + block_size.max(needed / 10);
    padded - (padded % block_size) + block_size
}
