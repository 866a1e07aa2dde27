use lazy_static::*;

use crate::big_int::{BigInt, Sign};
use crate::big_num_constants::*;

lazy_static! {
    /// Backing values for the small-constant constructors. Callers always get
    /// a clone; nothing hands out a reference into this table.
    pub static ref SMALL_CACHE: [BigInt; MAX_CONSTANT + 1] = [
        BigInt::from_raw(Sign::Zero,     vec![  ]),
        BigInt::from_raw(Sign::Positive, vec![ 1]),
        BigInt::from_raw(Sign::Positive, vec![ 2]),
        BigInt::from_raw(Sign::Positive, vec![ 3]),
        BigInt::from_raw(Sign::Positive, vec![ 4]),
        BigInt::from_raw(Sign::Positive, vec![ 5]),
        BigInt::from_raw(Sign::Positive, vec![ 6]),
        BigInt::from_raw(Sign::Positive, vec![ 7]),
        BigInt::from_raw(Sign::Positive, vec![ 8]),
        BigInt::from_raw(Sign::Positive, vec![ 9]),
        BigInt::from_raw(Sign::Positive, vec![10]),
    ];
}

/// Returns an owned copy of the cached value `n`, `n <= MAX_CONSTANT`.
pub fn small(n: usize) -> BigInt {
    SMALL_CACHE[n].clone()
}
