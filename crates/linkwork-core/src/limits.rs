//! Construction limits for the containers

use crate::error::{Error, Result};

/// Bucket count a table starts with when none is given (10)
pub const DEFAULT_TABLE_CAPACITY: usize = 10;

/// Smallest initial bucket count (1)
pub const MIN_TABLE_CAPACITY: usize = 1;

/// Largest initial bucket count (1 << 24)
pub const MAX_TABLE_CAPACITY: usize = 1 << 24;

/// Entries-per-bucket ratio that triggers a resize (0.7)
pub const DEFAULT_LOAD_FACTOR: f64 = 0.7;

/// Largest accepted load factor threshold (4.0)
pub const MAX_LOAD_FACTOR: f64 = 4.0;

/// Validate an initial table capacity
pub fn validate_capacity(capacity: usize) -> Result<()> {
    if !(MIN_TABLE_CAPACITY..=MAX_TABLE_CAPACITY).contains(&capacity) {
        return Err(Error::InvalidCapacity {
            capacity,
            min: MIN_TABLE_CAPACITY,
            max: MAX_TABLE_CAPACITY,
        });
    }
    Ok(())
}

/// Validate a load factor threshold
pub fn validate_load_factor(load_factor: f64) -> Result<()> {
    if !load_factor.is_finite() || load_factor <= 0.0 || load_factor > MAX_LOAD_FACTOR {
        return Err(Error::InvalidLoadFactor(load_factor));
    }
    Ok(())
}
