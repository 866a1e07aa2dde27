//! # BigInt
//! Arbitrary-precision signed integers in sign-magnitude form.
//! # Example
//! ```
//! use not_so_bignum::{parse_hex, BigInt};
//!
//! let a = parse_hex("10000000000000").unwrap();
//! let b = parse_hex("900000000000").unwrap();
//! println!("a = {:x}", a);
//! println!("a + b = {:x}", &a + &b);
//! println!("a - b = {:x}", &a - &b);
//! println!("a * b = {:x}", &a * &b);
//! println!("a / b = {:x}", &a / &b);
//! println!("a % b = {:x}", &a % &b);
//! println!("a << 10 = {:x}", &a << 10);
//! println!("a >> 10 = {:x}", &a >> 10);
//! assert_eq!(BigInt::from(32u8).to_string(), "32");
//! ```

use std::cmp::Ordering;
use std::fmt::{self, Display};
use std::ops::{
    Add, AddAssign,
    Sub, SubAssign,
    Mul, MulAssign,
    Div, DivAssign,
    Rem, RemAssign,
    Shl, ShlAssign,
    Shr, ShrAssign,
    Neg,
};

use crate::big_num_cache::small;
use crate::big_num_constants::*;
use crate::error::{Error, Result};
use crate::mag;

pub const ZERO: BigInt = BigInt { sign: Sign::Zero, mag: Vec::new() };

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Sign {
    Negative,
    Zero,
    Positive,
}

impl Neg for Sign {
    type Output = Sign;

    fn neg(self) -> Sign {
        match self {
            Sign::Negative => Sign::Positive,
            Sign::Zero => Sign::Zero,
            Sign::Positive => Sign::Negative,
        }
    }
}

impl Mul for Sign {
    type Output = Sign;

    fn mul(self, other: Sign) -> Sign {
        match (self, other) {
            (Sign::Zero, _) | (_, Sign::Zero) => Sign::Zero,
            (a, b) if a == b => Sign::Positive,
            _ => Sign::Negative,
        }
    }
}

/// A sign and a canonical magnitude. Zero is always `Sign::Zero` with no
/// limbs, so the derived equality is numeric equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BigInt {
    sign: Sign,
    mag: Vec<u32>,
}

impl Default for BigInt {
    fn default() -> Self {
        ZERO
    }
}

// construction
impl BigInt {
    /// Builds a value from a sign and little-endian limbs. Trailing zero limbs
    /// are dropped; `Sign::Zero` or an all-zero magnitude gives zero.
    pub fn from_parts(sign: Sign, limbs: Vec<u32>) -> BigInt {
        if sign == Sign::Zero {
            return ZERO;
        }
        BigInt::from_mag(sign, limbs)
    }

    /// Trusted constructor for values that are already canonical.
    pub(crate) fn from_raw(sign: Sign, mag: Vec<u32>) -> BigInt {
        debug_assert_eq!(sign == Sign::Zero, mag.is_empty());
        debug_assert!(mag.last() != Some(&0));
        BigInt { sign, mag }
    }

    pub(crate) fn from_mag(sign: Sign, mut mag: Vec<u32>) -> BigInt {
        mag::trim(&mut mag);
        if mag.is_empty() {
            ZERO
        } else {
            BigInt { sign, mag }
        }
    }

    pub fn zero() -> BigInt {
        ZERO
    }

    pub fn one() -> BigInt {
        small(1)
    }

    fn value_of(val: u64, sign: Sign) -> BigInt {
        if val == 0 {
            ZERO
        } else if val <= MAX_CONSTANT as u64 && sign == Sign::Positive {
            small(val as usize)
        } else {
            BigInt::from_mag(sign, vec![val as u32, (val >> LIMB_BITS) as u32])
        }
    }
}

// inspection
impl BigInt {
    pub fn sign(&self) -> Sign {
        self.sign
    }

    pub fn signum(&self) -> i8 {
        match self.sign {
            Sign::Negative => -1,
            Sign::Zero => 0,
            Sign::Positive => 1,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.sign == Sign::Zero
    }

    pub fn is_negative(&self) -> bool {
        self.sign == Sign::Negative
    }

    /// Little-endian magnitude limbs.
    pub fn limbs(&self) -> &[u32] {
        &self.mag
    }

    /// Number of significant bits in the magnitude.
    pub fn bit_len(&self) -> u64 {
        mag::bit_len(&self.mag)
    }

    pub fn abs(&self) -> BigInt {
        BigInt::from_raw(self.sign * self.sign, self.mag.clone())
    }

    /// Value as a `u64`, or `None` when negative or wider than 64 bits.
    pub fn to_u64(&self) -> Option<u64> {
        match (self.sign, self.mag.as_slice()) {
            (Sign::Negative, _) => None,
            (_, []) => Some(0),
            (_, [low]) => Some(*low as u64),
            (_, [low, high]) => Some(((*high as u64) << LIMB_BITS) | *low as u64),
            _ => None,
        }
    }
}

// machine integers
macro_rules! impl_unsigned_to_big_int {
    ($($u: ty),*) => {
    $(
    impl From<$u> for BigInt {
        fn from(val: $u) -> Self {
            BigInt::value_of(val as u64, Sign::Positive)
        }
    }
    )*
    };
}

macro_rules! impl_signed_to_big_int {
    ($($i: ty),*) => {
    $(
    impl From<$i> for BigInt {
        fn from(val: $i) -> Self {
            let sign = if val < 0 { Sign::Negative } else { Sign::Positive };
            BigInt::value_of(val.unsigned_abs() as u64, sign)
        }
    }
    )*
    };
}
impl_unsigned_to_big_int!(u8, u16, u32, usize, u64);
impl_signed_to_big_int!(i8, i16, i32, isize, i64);

impl TryFrom<&BigInt> for u64 {
    type Error = Error;

    fn try_from(val: &BigInt) -> Result<u64> {
        val.to_u64().ok_or(Error::ValueOutOfRange)
    }
}

impl TryFrom<&BigInt> for i64 {
    type Error = Error;

    fn try_from(val: &BigInt) -> Result<i64> {
        let magnitude = val.abs().to_u64().ok_or(Error::ValueOutOfRange)?;
        match val.sign {
            Sign::Negative if magnitude <= i64::MIN.unsigned_abs() => Ok((magnitude as i64).wrapping_neg()),
            Sign::Negative => Err(Error::ValueOutOfRange),
            _ => i64::try_from(magnitude).map_err(|_| Error::ValueOutOfRange),
        }
    }
}

// printing
impl Display for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(!self.is_negative(), "", &self.mag_to_string_radix(10))
    }
}

impl BigInt {
    /// Renders the value in `radix`.
    ///
    /// # Panics
    /// If `radix` is outside `2..=36`.
    pub fn to_string_radix(&self, radix: u32) -> String {
        assert!((2..=36).contains(&radix), "radix {} out of range 2..=36", radix);
        let digits = self.mag_to_string_radix(radix);
        if self.is_negative() {
            format!("-{}", digits)
        } else {
            digits
        }
    }

    fn mag_to_string_radix(&self, radix: u32) -> String {
        if self.is_zero() {
            return String::from("0");
        }

        // Peel off digit groups, least significant first
        let group_radix = INT_RADIX[radix as usize];
        let group_len = DIGITS_PER_INT[radix as usize];
        let mut digit_groups = Vec::with_capacity(self.mag.len() * 2);
        let mut rest = self.mag.clone();
        while !rest.is_empty() {
            let (q, r) = mag::div_rem_word(&rest, group_radix);
            digit_groups.push(r);
            rest = q;
        }

        let mut result = String::with_capacity(digit_groups.len() * group_len);
        let mut buf = [b'0'; 32];
        for (i, group) in digit_groups.iter().rev().enumerate() {
            buf[..group_len].fill(b'0');
            let mut val = *group;
            let mut pos = group_len;
            while val != 0 {
                pos -= 1;
                buf[pos] = DIGITS[(val % radix) as usize];
                val /= radix;
            }
            // Only the leading group goes without zero padding
            let start = if i == 0 { pos } else { 0 };
            result.extend(buf[start..group_len].iter().map(|&b| b as char));
        }
        result
    }
}

// comparison
impl BigInt {
    fn compare_mag(&self, other: &BigInt) -> Ordering {
        mag::cmp(&self.mag, &other.mag)
    }
}

impl PartialOrd for BigInt {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BigInt {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.sign.cmp(&other.sign) {
            Ordering::Equal => {}
            ord => return ord,
        }
        if self.sign == Sign::Negative {
            self.compare_mag(other).reverse()
        } else {
            self.compare_mag(other)
        }
    }
}

// negation
impl Neg for BigInt {
    type Output = BigInt;

    fn neg(self) -> Self::Output {
        let BigInt { sign, mag } = self;
        BigInt { sign: -sign, mag }
    }
}

impl Neg for &BigInt {
    type Output = BigInt;

    fn neg(self) -> Self::Output {
        self.clone().neg()
    }
}

// addition and subtraction
impl BigInt {
    pub fn add(&self, val: &BigInt) -> BigInt {
        if val.is_zero() {
            return self.clone();
        }
        if self.is_zero() {
            return val.clone();
        }
        if self.sign == val.sign {
            return BigInt::from_mag(self.sign, mag::add(&self.mag, &val.mag));
        }
        self.sub_mag(val, self.sign)
    }

    /// Full signed subtraction, including `self < val`.
    pub fn sub(&self, val: &BigInt) -> BigInt {
        if val.is_zero() {
            return self.clone();
        }
        if self.is_zero() {
            return -val;
        }
        if self.sign != val.sign {
            return BigInt::from_mag(self.sign, mag::add(&self.mag, &val.mag));
        }
        self.sub_mag(val, self.sign)
    }

    /// `|self| - |val|` carrying `sign` when `|self|` is the larger one.
    fn sub_mag(&self, val: &BigInt, sign: Sign) -> BigInt {
        match self.compare_mag(val) {
            Ordering::Less => BigInt::from_mag(-sign, mag::sub(&val.mag, &self.mag)),
            Ordering::Equal => ZERO,
            Ordering::Greater => BigInt::from_mag(sign, mag::sub(&self.mag, &val.mag)),
        }
    }

    pub fn add_u8(&self, i: u8) -> BigInt {
        BigInt::add(self, &BigInt::from(i))
    }

    pub fn sub_u8(&self, i: u8) -> BigInt {
        BigInt::sub(self, &BigInt::from(i))
    }

    pub fn inc(&mut self) {
        *self = BigInt::add(self, &BigInt::one());
    }

    pub fn dec(&mut self) {
        *self = BigInt::sub(self, &BigInt::one());
    }
}

// multiplication
impl BigInt {
    pub fn mul(&self, val: &BigInt) -> BigInt {
        if self.is_zero() || val.is_zero() {
            return ZERO;
        }
        BigInt::from_mag(self.sign * val.sign, mag::mul(&self.mag, &val.mag))
    }
}

// division
impl BigInt {
    /// Truncating division: the quotient rounds toward zero and the remainder
    /// takes the sign of the dividend, so `q * divisor + r == self`.
    pub fn checked_div_rem(&self, divisor: &BigInt) -> Result<(BigInt, BigInt)> {
        if divisor.is_zero() {
            return Err(Error::DivisionByZero);
        }
        if self.is_zero() {
            return Ok((ZERO, ZERO));
        }
        let (q, r) = mag::div_rem(&self.mag, &divisor.mag);
        Ok((
            BigInt::from_mag(self.sign * divisor.sign, q),
            BigInt::from_mag(self.sign, r),
        ))
    }

    pub fn checked_div(&self, divisor: &BigInt) -> Result<BigInt> {
        self.checked_div_rem(divisor).map(|(q, _)| q)
    }

    pub fn checked_rem(&self, divisor: &BigInt) -> Result<BigInt> {
        self.checked_div_rem(divisor).map(|(_, r)| r)
    }

    fn div_or_panic(&self, divisor: &BigInt) -> BigInt {
        match self.checked_div(divisor) {
            Ok(q) => q,
            Err(err) => panic!("{}", err),
        }
    }

    fn rem_or_panic(&self, divisor: &BigInt) -> BigInt {
        match self.checked_rem(divisor) {
            Ok(r) => r,
            Err(err) => panic!("{}", err),
        }
    }
}

// shifts
impl BigInt {
    /// `self * 2^n`. Fails only when the result cannot be allocated.
    pub fn checked_shl(&self, n: u64) -> Result<BigInt> {
        if self.is_zero() || n == 0 {
            return Ok(self.clone());
        }
        Ok(BigInt::from_mag(self.sign, mag::shl(&self.mag, n)?))
    }

    /// Magnitude divided by `2^n`, sign kept; shifting out every bit gives zero.
    pub fn shr(&self, n: u64) -> BigInt {
        if self.is_zero() || n == 0 {
            return self.clone();
        }
        BigInt::from_mag(self.sign, mag::shr(&self.mag, n))
    }

    fn shl_or_panic(&self, n: u64) -> BigInt {
        match self.checked_shl(n) {
            Ok(v) => v,
            Err(err) => panic!("{}", err),
        }
    }
}

macro_rules! impl_bin_op {
    ($imp: ident, $method: ident, $assign_imp: ident, $assign_method: ident, $f: path) => {
        impl $imp<&BigInt> for &BigInt {
            type Output = BigInt;

            fn $method(self, rhs: &BigInt) -> BigInt {
                $f(self, rhs)
            }
        }

        impl $imp<BigInt> for &BigInt {
            type Output = BigInt;

            fn $method(self, rhs: BigInt) -> BigInt {
                $f(self, &rhs)
            }
        }

        impl $imp<&BigInt> for BigInt {
            type Output = BigInt;

            fn $method(self, rhs: &BigInt) -> BigInt {
                $f(&self, rhs)
            }
        }

        impl $imp<BigInt> for BigInt {
            type Output = BigInt;

            fn $method(self, rhs: BigInt) -> BigInt {
                $f(&self, &rhs)
            }
        }

        impl $assign_imp<&BigInt> for BigInt {
            fn $assign_method(&mut self, rhs: &BigInt) {
                *self = $f(self, rhs);
            }
        }

        impl $assign_imp<BigInt> for BigInt {
            fn $assign_method(&mut self, rhs: BigInt) {
                *self = $f(self, &rhs);
            }
        }
    };
}

impl_bin_op!(Add, add, AddAssign, add_assign, BigInt::add);
impl_bin_op!(Sub, sub, SubAssign, sub_assign, BigInt::sub);
impl_bin_op!(Mul, mul, MulAssign, mul_assign, BigInt::mul);
// `/` and `%` panic on a zero divisor, like the primitive integers
impl_bin_op!(Div, div, DivAssign, div_assign, BigInt::div_or_panic);
impl_bin_op!(Rem, rem, RemAssign, rem_assign, BigInt::rem_or_panic);

macro_rules! impl_shift_op {
    ($imp: ident, $method: ident, $assign_imp: ident, $assign_method: ident, $f: path) => {
        impl $imp<u64> for &BigInt {
            type Output = BigInt;

            fn $method(self, n: u64) -> BigInt {
                $f(self, n)
            }
        }

        impl $imp<u64> for BigInt {
            type Output = BigInt;

            fn $method(self, n: u64) -> BigInt {
                $f(&self, n)
            }
        }

        impl $assign_imp<u64> for BigInt {
            fn $assign_method(&mut self, n: u64) {
                *self = $f(self, n);
            }
        }
    };
}

impl_shift_op!(Shl, shl, ShlAssign, shl_assign, BigInt::shl_or_panic);
impl_shift_op!(Shr, shr, ShrAssign, shr_assign, BigInt::shr);

#[cfg(test)]
fn hex(s: &str) -> BigInt {
    crate::hex::parse_hex(s).unwrap()
}

#[test]
fn test_from() {
    let big: BigInt = 12i8.into();
    assert_eq!(big.limbs(), &[12]);
    assert_eq!(big.sign(), Sign::Positive);

    let big: BigInt = (-100i16).into();
    assert_eq!(big.limbs(), &[100]);
    assert_eq!(big.sign(), Sign::Negative);

    let big: BigInt = u64::MAX.into();
    assert_eq!(big.limbs(), &[u32::MAX, u32::MAX]);

    let big: BigInt = i64::MIN.into();
    assert_eq!(big.limbs(), &[0, 0x80000000]);
    assert_eq!(i64::try_from(&big), Ok(i64::MIN));

    assert_eq!(BigInt::from(0u32), ZERO);
    assert_eq!(BigInt::from(0i32).sign(), Sign::Zero);
}

#[test]
fn test_from_parts_canonicalizes() {
    assert_eq!(BigInt::from_parts(Sign::Positive, vec![5, 0, 0]).limbs(), &[5]);
    assert_eq!(BigInt::from_parts(Sign::Negative, vec![0, 0]), ZERO);
    assert_eq!(BigInt::from_parts(Sign::Zero, vec![7]), ZERO);
}

#[test]
fn test_to_u64() {
    assert_eq!(BigInt::from(123456789110u64).to_u64(), Some(123456789110));
    assert_eq!(ZERO.to_u64(), Some(0));
    assert_eq!(BigInt::from(-1).to_u64(), None);
    assert_eq!((BigInt::from(u64::MAX) + BigInt::one()).to_u64(), None);
    assert_eq!(u64::try_from(&BigInt::from(-1)), Err(Error::ValueOutOfRange));
    assert_eq!(i64::try_from(&BigInt::from(u64::MAX)), Err(Error::ValueOutOfRange));
    assert_eq!(i64::try_from(&BigInt::from(-42)), Ok(-42));
}

#[test]
fn test_cmp() {
    let a = hex("feee");
    let b = hex("5d30");
    assert!(a > b);
    assert!(b < a);
    assert!(a > ZERO);
    assert_eq!(ZERO.cmp(&ZERO), Ordering::Equal);
    assert!(-&a < -&b);
    assert!(-&b < ZERO);
    assert_eq!(std::cmp::max(a.clone(), b.clone()), a);
}

#[test]
fn test_add() {
    assert_eq!(hex("ff") + hex("ff"), hex("1fe"));
    assert_eq!(hex("feee") + hex("5d30"), hex("15c1e"));
    assert_eq!(hex("ffffffffffffffff") + BigInt::one(), hex("10000000000000000"));
    assert_eq!(BigInt::from(-5) + BigInt::from(3), BigInt::from(-2));
    assert_eq!(BigInt::from(5) + BigInt::from(-5), ZERO);
    assert_eq!(hex("ff").add_u8(32), hex("11f"));
}

#[test]
fn test_sub() {
    assert_eq!(hex("feee") - hex("5d30"), hex("a1be"));
    assert_eq!(hex("a") - hex("a"), ZERO);
    assert_eq!(BigInt::from(3) - BigInt::from(5), BigInt::from(-2));
    assert_eq!(BigInt::from(-3) - BigInt::from(5), BigInt::from(-8));
    assert_eq!(ZERO - BigInt::from(5), BigInt::from(-5));
    assert_eq!(hex("11f").sub_u8(32), hex("ff"));
    assert_eq!(hex("5").sub_u8(3), hex("2"));
    assert_eq!(hex("10000000000000000") - BigInt::one(), hex("ffffffffffffffff"));
}

#[test]
fn test_inc_dec() {
    let mut a = hex("feff");
    for _ in 0..17 {
        a.dec();
    }
    assert_eq!(a, hex("feee"));

    let mut b = hex("0f10");
    for _ in 0..20000 {
        b.inc();
    }
    assert_eq!(b, hex("5d30"));

    let mut z = hex("ffff");
    z.inc();
    assert_eq!(z, hex("010000"));

    let mut zero = ZERO;
    zero.dec();
    assert_eq!(zero, BigInt::from(-1));
}

#[test]
fn test_mul() {
    assert_eq!(BigInt::from(3) * BigInt::from(3), BigInt::from(9));
    assert_eq!(BigInt::from(8) * ZERO, ZERO);
    assert_eq!(hex("ff") * hex("ff"), hex("fe01"));
    assert_eq!(hex("ffffff") * hex("02"), hex("01fffffe"));
    assert_eq!(hex("deadbeef") * hex("f0000000"), hex("d0c2e30010000000"));
    assert_eq!(
        hex("123456789abcdef0123456789abcdef") * hex("fedcba987654321"),
        hex("121fa00ad77d7422358d29092d964322236d88fe5618cf")
    );
    assert_eq!(BigInt::from(-4) * BigInt::from(6), BigInt::from(-24));
    assert_eq!(BigInt::from(-4) * BigInt::from(-6), BigInt::from(24));
}

#[test]
fn test_div() {
    let (q, r) = hex("64").checked_div_rem(&hex("a")).unwrap();
    assert_eq!(q, hex("a"));
    assert_eq!(r, ZERO);

    assert_eq!(BigInt::from(1) / BigInt::from(2), ZERO);
    assert_eq!(BigInt::from(1) % BigInt::from(2), BigInt::from(1));
    assert_eq!(BigInt::from(10) / BigInt::from(3), BigInt::from(3));
    assert_eq!(BigInt::from(10) % BigInt::from(3), BigInt::from(1));
    assert_eq!(hex("ffffffff") / hex("3dfe"), hex("4212a"));

    let (q, r) = hex("123456789abcdef0123456789abcdef")
        .checked_div_rem(&hex("fedcba987654321"))
        .unwrap();
    assert_eq!(q, hex("1249249249249237"));
    assert_eq!(r, hex("fd8fd8fd8fd8fd8"));
}

#[test]
fn test_div_truncates_toward_zero() {
    let (q, r) = BigInt::from(-7).checked_div_rem(&BigInt::from(2)).unwrap();
    assert_eq!((q, r), (BigInt::from(-3), BigInt::from(-1)));

    let (q, r) = BigInt::from(7).checked_div_rem(&BigInt::from(-2)).unwrap();
    assert_eq!((q, r), (BigInt::from(-3), BigInt::from(1)));

    let (q, r) = BigInt::from(-7).checked_div_rem(&BigInt::from(-2)).unwrap();
    assert_eq!((q, r), (BigInt::from(3), BigInt::from(-1)));
}

#[test]
fn test_div_by_zero() {
    assert_eq!(hex("64").checked_div_rem(&ZERO), Err(Error::DivisionByZero));
    assert_eq!(ZERO.checked_div(&ZERO), Err(Error::DivisionByZero));
    assert_eq!(BigInt::from(-9).checked_rem(&ZERO), Err(Error::DivisionByZero));
}

#[test]
#[should_panic(expected = "division by zero")]
fn test_div_operator_panics_on_zero() {
    let _ = BigInt::one() / ZERO;
}

#[test]
fn test_shl() {
    assert_eq!(BigInt::one() << 2, hex("4"));
    assert_eq!(BigInt::from(2) << 3, hex("10"));
    assert_eq!(BigInt::one() << 16, hex("10000"));
    assert_eq!(BigInt::one() << 15, hex("8000"));
    assert_eq!(BigInt::one() << 8, hex("100"));
    let ff = hex("ff");
    let expected = ["1fe", "3fc", "7f8", "ff0", "1fe0", "3fc0", "7f80", "ff00", "1fe00", "3fc00", "7f800"];
    for (n, want) in expected.iter().enumerate() {
        assert_eq!(&ff << (n as u64 + 1), hex(want), "ff << {}", n + 1);
    }
    assert_eq!(&ff << 0, ff);
    assert_eq!((BigInt::one() << 1024).bit_len(), 1025);
    assert_eq!(BigInt::from(-3) << 4, BigInt::from(-48));
}

#[test]
fn test_shr() {
    let ff = hex("ff");
    assert_eq!(&ff >> 1, hex("7f"));
    assert_eq!(&ff >> 4, hex("f"));
    assert_eq!(&ff >> 7, hex("1"));
    assert_eq!(&ff >> 8, ZERO);
    assert_eq!(hex("ff00") >> 8, hex("ff"));
    assert_eq!(hex("0fff") >> 4, hex("ff"));
    assert_eq!((BigInt::one() << 10) >> 10, BigInt::one());
    assert_eq!(BigInt::from(-48) >> 4, BigInt::from(-3));
    assert_eq!(BigInt::from(-1) >> 1, ZERO);
    assert_eq!(hex("123456789abcdef") >> u64::MAX, ZERO);
}

#[test]
fn test_to_string() {
    assert_eq!(BigInt::from(32).to_string(), "32");
    assert_eq!(BigInt::from(-32).to_string(), "-32");
    assert_eq!(ZERO.to_string(), "0");
    assert_eq!(BigInt::from(u64::MAX).to_string(), "18446744073709551615");
    assert_eq!((BigInt::one() << 100).to_string(), "1267650600228229401496703205376");
    assert_eq!(format!("{:>5}", BigInt::from(42)), "   42");

    let a = hex("fafcfbffaffaffbffbffbffbffbff");
    assert_eq!(a.to_string_radix(16), "fafcfbffaffaffbffbffbffbffbff");
    assert_eq!(BigInt::from(-5).to_string_radix(2), "-101");
    assert_eq!(BigInt::from(35).to_string_radix(36), "z");
    assert_eq!(BigInt::from(1000000000).to_string_radix(10), "1000000000");
    assert_eq!(ZERO.to_string_radix(2), "0");
}

#[test]
#[should_panic(expected = "out of range")]
fn test_to_string_radix_rejects_radix_one() {
    BigInt::from(7).to_string_radix(1);
}

#[test]
#[should_panic(expected = "out of range")]
fn test_to_string_radix_rejects_radix_37() {
    BigInt::from(7).to_string_radix(37);
}

#[test]
fn test_signum() {
    assert_eq!(BigInt::from(-12).signum(), -1);
    assert_eq!(ZERO.signum(), 0);
    assert_eq!(hex("ffffffffffffffffff").signum(), 1);
    assert_eq!((BigInt::from(3) - BigInt::from(3)).signum(), 0);
    assert_eq!((-hex("100000000")).signum(), -1);
}
