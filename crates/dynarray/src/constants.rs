use bytesize::KIB;

/// Allocations of at least this many bytes are logged at `debug` level instead of `trace`.
pub const LARGE_ALLOCATION_BYTES: usize = 64 * KIB as usize;
