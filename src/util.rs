/// Numeric conversion and rounding helpers.
///
/// This module provides safe functions for converting between integer and
/// floating-point types without silent data loss, plus the rounding and
/// formatting rules used for `Integer`-typed storage.
pub mod num;
