//! # Protocol Constants
//!
//! Fixed-point scale and numeric bounds shared across the core.

/// Number of fractional bits in the Q64.64 representation.
pub const FP_FRACTIONAL_BITS: u32 = 64;

/// Q64.64 scale factor: 2^64, as an i128 (fits comfortably; Q64.64's
/// integer range is [-2^63, 2^63)).
pub const FP_ONE: i128 = 1i128 << FP_FRACTIONAL_BITS;

/// Largest `u64` representable exactly as an FP64.64 integer part without
/// overflowing the signed 128-bit container (`from_uint` rejects above
/// this bound; exact if `u < 2^63`).
pub const FP_FROM_UINT_MAX: u64 = 1u64 << 63;
