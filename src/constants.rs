//! Codec constants and tuning parameters.
//!
//! The formatting values below are part of the wire format: changing any of
//! them changes serialized output, and with it every hash computed over that
//! output.

// ============================================================================
// Bencode
// ============================================================================

/// Fractional digits used when a real is written as a bencode string
/// (`0.5` becomes `8:0.500000`)
pub const BENCODE_REAL_PRECISION: usize = 6;

// ============================================================================
// JSON
// ============================================================================

/// Spaces per nesting level in pretty JSON
pub const JSON_INDENT: usize = 4;

/// Fractional digits used for non-integral reals in JSON
pub const JSON_REAL_PRECISION: usize = 4;

/// Reals closer than this to an integer are written as that integer
pub const JSON_INTEGRAL_EPSILON: f64 = 0.00001;

// ============================================================================
// Dictionaries
// ============================================================================

/// Entry count above which a dictionary keeps a hash index instead of
/// scanning its entries
pub const DICT_INDEX_THRESHOLD: usize = 16;
