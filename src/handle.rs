//! Owned handles over [`BigInt`] values.
//!
//! A [`Handle`] has exactly one owner. It cannot be cloned, and
//! [`Handle::release`] consumes it, so a released handle cannot be named
//! again. Arithmetic borrows its operands and writes into a destination
//! handle borrowed mutably, which the borrow checker keeps distinct from the
//! operands.

use std::cmp::Ordering;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

use tracing::trace;

use crate::big_int::{BigInt, ZERO};
use crate::big_num_cache::small;
use crate::error::Result;
use crate::hex::{parse_hex, to_hex, write_hex};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Debug)]
pub struct Handle {
    id: u64,
    value: BigInt,
}

impl Handle {
    /// A fresh handle holding zero.
    pub fn create() -> Handle {
        Handle::with_value(ZERO)
    }

    fn with_value(value: BigInt) -> Handle {
        let id = NEXT_ID.fetch_add(1, AtomicOrdering::Relaxed);
        trace!(id, "handle created");
        Handle { id, value }
    }

    /// Frees the handle's storage. Equivalent to dropping it.
    ///
    /// The handle is moved in, so it cannot be named afterwards:
    ///
    /// ```compile_fail,E0382
    /// let h = not_so_bignum::Handle::create();
    /// h.release();
    /// h.value();
    /// ```
    ///
    /// Releasing twice is rejected the same way:
    ///
    /// ```compile_fail,E0382
    /// let h = not_so_bignum::Handle::create();
    /// h.release();
    /// h.release();
    /// ```
    ///
    /// Handles cannot be cloned to get around this:
    ///
    /// ```compile_fail,E0599
    /// let h = not_so_bignum::Handle::create();
    /// let copy = h.clone();
    /// h.release();
    /// copy.release();
    /// ```
    pub fn release(self) {
        drop(self)
    }

    pub fn new_from_hex(text: &str) -> Result<Handle> {
        Ok(Handle::with_value(parse_hex(text)?))
    }

    /// Parses `text` into this handle. The old value survives a failed parse.
    pub fn from_hex(&mut self, text: &str) -> Result<()> {
        self.value = parse_hex(text)?;
        Ok(())
    }

    pub fn from_u64(&mut self, val: u64) {
        self.value = BigInt::from(val);
    }

    pub fn to_u64(&self) -> Result<u64> {
        u64::try_from(&self.value)
    }

    /// Writes the hex rendering into `buf`; see [`write_hex`].
    pub fn to_string(&self, buf: &mut [u8]) -> Result<usize> {
        write_hex(&self.value, buf)
    }

    pub fn print(&self) {
        println!("{}", to_hex(&self.value));
    }

    /// Process-unique identifier, used in log events.
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn value(&self) -> &BigInt {
        &self.value
    }

    pub fn into_inner(mut self) -> BigInt {
        std::mem::take(&mut self.value)
    }

    pub(crate) fn set(&mut self, value: BigInt) {
        self.value = value;
    }

    pub fn inc(&mut self) {
        self.value.inc();
    }

    pub fn dec(&mut self) {
        self.value.dec();
    }

    pub fn copy_from(&mut self, src: &Handle) {
        self.value.clone_from(&src.value);
    }

    pub fn compare(&self, other: &Handle) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl From<BigInt> for Handle {
    fn from(value: BigInt) -> Self {
        Handle::with_value(value)
    }
}

impl Drop for Handle {
    fn drop(&mut self) {
        trace!(id = self.id, limbs = self.value.limbs().len(), "handle released");
    }
}

pub fn add(dst: &mut Handle, a: &Handle, b: &Handle) {
    dst.set(BigInt::add(&a.value, &b.value));
}

pub fn sub(dst: &mut Handle, a: &Handle, b: &Handle) {
    dst.set(BigInt::sub(&a.value, &b.value));
}

pub fn mul(dst: &mut Handle, a: &Handle, b: &Handle) {
    dst.set(BigInt::mul(&a.value, &b.value));
}

/// Divides `n` by `d`, storing the quotient in `q` and, when given, the
/// remainder in `r`. Neither destination changes on failure.
pub fn div(q: &mut Handle, r: Option<&mut Handle>, n: &Handle, d: &Handle) -> Result<()> {
    let (quot, rem) = n.value.checked_div_rem(&d.value)?;
    q.set(quot);
    if let Some(r) = r {
        r.set(rem);
    }
    Ok(())
}

pub fn rem(dst: &mut Handle, a: &Handle, b: &Handle) -> Result<()> {
    dst.set(a.value.checked_rem(&b.value)?);
    Ok(())
}

pub fn shl(dst: &mut Handle, a: &Handle, n: u64) -> Result<()> {
    dst.set(a.value.checked_shl(n)?);
    Ok(())
}

pub fn shr(dst: &mut Handle, a: &Handle, n: u64) {
    dst.set(a.value.shr(n));
}

macro_rules! small_constructors {
    ($($name: ident => $n: expr),* $(,)?) => {
    $(
    /// A fresh, independently owned handle holding the small constant.
    pub fn $name() -> Handle {
        Handle::with_value(small($n))
    }
    )*
    };
}

small_constructors! {
    zero => 0, one => 1, two => 2, three => 3, four => 4, five => 5,
    six => 6, seven => 7, eight => 8, nine => 9, ten => 10,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn assert_hex(h: &Handle, expected: &str) {
        assert_eq!(to_hex(h.value()), expected);
    }

    #[test]
    fn test_create_is_zero() {
        let h = Handle::create();
        assert!(h.value().is_zero());
        assert_hex(&h, "0");
        h.release();
    }

    #[test]
    fn test_handles_are_distinct() {
        let a = Handle::create();
        let b = Handle::create();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_from_hex_in_place() {
        let mut h = Handle::create();
        h.from_hex("feff").unwrap();
        assert_hex(&h, "feff");
        assert!(matches!(h.from_hex("fz"), Err(Error::InvalidFormat { position: 1, .. })));
        assert_hex(&h, "feff");
    }

    #[test]
    fn test_binary_ops_leave_operands_alone() {
        let a = Handle::new_from_hex("ff").unwrap();
        let b = Handle::new_from_hex("ff").unwrap();
        let mut c = Handle::create();
        add(&mut c, &a, &b);
        assert_hex(&c, "1fe");
        assert_hex(&a, "ff");
        assert_hex(&b, "ff");

        sub(&mut c, &a, &b);
        assert_hex(&c, "0");
        mul(&mut c, &a, &b);
        assert_hex(&c, "fe01");
    }

    #[test]
    fn test_div_both_outputs() {
        let n = Handle::new_from_hex("64").unwrap();
        let d = Handle::new_from_hex("a").unwrap();
        let mut q = Handle::create();
        let mut r = five();
        div(&mut q, Some(&mut r), &n, &d).unwrap();
        assert_hex(&q, "a");
        assert_hex(&r, "0");

        div(&mut q, None, &ten(), &three()).unwrap();
        assert_hex(&q, "3");
        rem(&mut r, &ten(), &three()).unwrap();
        assert_hex(&r, "1");
    }

    #[test]
    fn test_div_by_zero_keeps_destinations() {
        let mut q = seven();
        let mut r = eight();
        assert_eq!(div(&mut q, Some(&mut r), &ten(), &zero()), Err(Error::DivisionByZero));
        assert_hex(&q, "7");
        assert_hex(&r, "8");
    }

    #[test]
    fn test_shifts() {
        let mut dst = Handle::create();
        shl(&mut dst, &one(), 8).unwrap();
        assert_hex(&dst, "100");
        let src = Handle::from(dst.value().clone());
        shr(&mut dst, &src, 8);
        assert_hex(&dst, "1");
        assert!(matches!(shl(&mut dst, &one(), u64::MAX), Err(Error::AllocationFailure { .. })));
        assert_hex(&dst, "1");
    }

    #[test]
    fn test_small_constructors_are_owned_copies() {
        let mut a = two();
        let b = two();
        a.inc();
        assert_hex(&a, "3");
        assert_hex(&b, "2");
        assert_hex(&two(), "2");
        assert_hex(&nine(), "9");
        assert_hex(&ten(), "a");
    }

    #[test]
    fn test_machine_integers() {
        let mut h = Handle::create();
        h.from_u64(32);
        assert_hex(&h, "20");
        assert_eq!(h.to_u64(), Ok(32));
        assert_eq!(h.value().to_string(), "32");

        h.from_u64(u64::MAX);
        h.inc();
        assert_eq!(h.to_u64(), Err(Error::ValueOutOfRange));
    }

    #[test]
    fn test_to_string_buffer() {
        let h = Handle::new_from_hex("abcd").unwrap();
        let mut buf = [0u8; 20];
        let n = h.to_string(&mut buf).unwrap();
        assert_eq!(&buf[..n], b"abcd");
        let mut small = [0u8; 3];
        assert_eq!(h.to_string(&mut small), Err(Error::BufferTooSmall { needed: 4, capacity: 3 }));
    }

    #[test]
    fn test_copy_and_compare() {
        let a = Handle::new_from_hex("feee").unwrap();
        let b = Handle::new_from_hex("5d30").unwrap();
        let mut c = Handle::create();
        assert_eq!(a.compare(&b), Ordering::Greater);
        assert_eq!(b.compare(&a), Ordering::Less);
        c.copy_from(&a);
        assert_eq!(c.compare(&a), Ordering::Equal);
        c.dec();
        assert_hex(&c, "feed");
        assert_eq!(c.into_inner(), crate::hex::parse_hex("feed").unwrap());
    }
}
