//! Unsigned magnitudes stored as `u32` limbs, least significant limb first.
//!
//! Results are always canonical: no trailing zero limb, and zero is the empty
//! vector.

use std::cmp::Ordering;

use tracing::instrument;

use crate::big_num_constants::LIMB_BITS;
use crate::error::{Error, Result};

const LIMB_MASK: u64 = u32::MAX as u64;

macro_rules! bit_length_u32 {
    ($n: expr) => {
        (LIMB_BITS - $n.leading_zeros()) as u64
    };
}

/// Drops trailing zero limbs.
pub fn trim(mag: &mut Vec<u32>) {
    while let Some(&0) = mag.last() {
        mag.pop();
    }
}

/// Allocates `len` zero limbs, reporting failure instead of aborting.
pub fn zeroed(len: usize) -> Result<Vec<u32>> {
    let mut v = Vec::new();
    v.try_reserve_exact(len)
        .map_err(|_| Error::AllocationFailure { limbs: len })?;
    v.resize(len, 0);
    Ok(v)
}

pub fn bit_len(mag: &[u32]) -> u64 {
    match mag.last() {
        None => 0,
        Some(&top) => (mag.len() as u64 - 1) * LIMB_BITS as u64 + bit_length_u32!(top),
    }
}

fn significant(mag: &[u32]) -> &[u32] {
    let len = mag.iter().rposition(|&limb| limb != 0).map_or(0, |i| i + 1);
    &mag[..len]
}

/// Numeric comparison. Missing high limbs count as zero.
pub fn cmp(a: &[u32], b: &[u32]) -> Ordering {
    let a = significant(a);
    let b = significant(b);
    a.len()
        .cmp(&b.len())
        .then_with(|| a.iter().rev().cmp(b.iter().rev()))
}

pub fn add(a: &[u32], b: &[u32]) -> Vec<u32> {
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    let mut result = Vec::with_capacity(long.len() + 1);
    let mut carry: u64 = 0;
    for (i, &x) in long.iter().enumerate() {
        let sum = x as u64 + short.get(i).copied().unwrap_or(0) as u64 + carry;
        result.push(sum as u32);
        carry = sum >> LIMB_BITS;
    }
    if carry != 0 {
        result.push(carry as u32);
    }
    trim(&mut result);
    result
}

/// `big - little`. The caller guarantees `big >= little`.
pub fn sub(big: &[u32], little: &[u32]) -> Vec<u32> {
    debug_assert!(cmp(big, little) != Ordering::Less);
    let mut result = Vec::with_capacity(big.len());
    let mut difference: i64 = 0;
    for (i, &x) in big.iter().enumerate() {
        difference = x as i64 - little.get(i).copied().unwrap_or(0) as i64 + (difference >> LIMB_BITS);
        result.push(difference as u32);
    }
    debug_assert!(difference >> LIMB_BITS == 0, "magnitude subtraction underflow");
    trim(&mut result);
    result
}

/// Grade-school multiplication.
pub fn mul(x: &[u32], y: &[u32]) -> Vec<u32> {
    if x.is_empty() || y.is_empty() {
        return Vec::new();
    }
    let mut z = vec![0u32; x.len() + y.len()];
    for (i, &x_val) in x.iter().enumerate() {
        if x_val == 0 {
            continue;
        }
        let mut carry: u64 = 0;
        for (j, &y_val) in y.iter().enumerate() {
            let product = x_val as u64 * y_val as u64 + z[i + j] as u64 + carry;
            z[i + j] = product as u32;
            carry = product >> LIMB_BITS;
        }
        z[i + y.len()] = carry as u32;
    }
    trim(&mut z);
    z
}

/// Short division by a single non-zero limb.
pub fn div_rem_word(u: &[u32], v: u32) -> (Vec<u32>, u32) {
    debug_assert!(v != 0);
    let mut q = vec![0u32; u.len()];
    let mut r: u64 = 0;
    for j in (0..u.len()).rev() {
        let sum = (r << LIMB_BITS) | u[j] as u64;
        q[j] = (sum / v as u64) as u32;
        r = sum % v as u64;
    }
    trim(&mut q);
    (q, r as u32)
}

/// Appends `a << s` (with `s < LIMB_BITS`) to `out`, including the final carry limb.
fn shl_bits_into(out: &mut Vec<u32>, a: &[u32], s: u32) {
    if s == 0 {
        out.extend_from_slice(a);
        out.push(0);
        return;
    }
    let mut carry = 0u32;
    for &x in a {
        out.push((x << s) | carry);
        carry = x >> (LIMB_BITS - s);
    }
    out.push(carry);
}

/// Long division, Algorithm D in Knuth "The Art Of Computer Programming" Vol.2 section 4.3.1.
/// Returns `(quotient, remainder)`. `v` must not be zero.
#[instrument(level = "trace", skip_all, fields(u_len = u.len(), v_len = v.len()))]
pub fn div_rem(u: &[u32], v: &[u32]) -> (Vec<u32>, Vec<u32>) {
    let u = significant(u);
    let v = significant(v);
    assert!(!v.is_empty(), "magnitude division by zero");

    if cmp(u, v) == Ordering::Less {
        return (Vec::new(), u.to_vec());
    }
    if v.len() == 1 {
        let (q, r) = div_rem_word(u, v[0]);
        let r = if r == 0 { Vec::new() } else { vec![r] };
        return (q, r);
    }

    let n = v.len();
    let m = u.len() - n;

    // D1 normalize so that the top limb of the divisor has its high bit set
    let shift = v[n - 1].leading_zeros();
    let mut vn = Vec::with_capacity(n + 1);
    shl_bits_into(&mut vn, v, shift);
    vn.pop();
    let mut un = Vec::with_capacity(u.len() + 1);
    shl_bits_into(&mut un, u, shift);

    let b: u64 = 1 << LIMB_BITS;
    let v_top = vn[n - 1] as u64;
    let v_next = vn[n - 2] as u64;
    let mut q = vec![0u32; m + 1];

    for j in (0..=m).rev() {
        // D3 estimate qhat from the top two limbs, then correct it with the third
        let num = ((un[j + n] as u64) << LIMB_BITS) | un[j + n - 1] as u64;
        let mut qhat = num / v_top;
        let mut rhat = num % v_top;
        while qhat >= b || qhat * v_next > ((rhat << LIMB_BITS) | un[j + n - 2] as u64) {
            qhat -= 1;
            rhat += v_top;
            if rhat >= b {
                break;
            }
        }

        // D4 multiply and subtract
        let mut k: i64 = 0;
        for i in 0..n {
            let p = qhat * vn[i] as u64;
            let t = un[i + j] as i64 - k - (p & LIMB_MASK) as i64;
            un[i + j] = t as u32;
            k = (p >> LIMB_BITS) as i64 - (t >> LIMB_BITS);
        }
        let t = un[j + n] as i64 - k;
        un[j + n] = t as u32;

        // D5, D6 add back when qhat was one too large
        q[j] = qhat as u32;
        if t < 0 {
            q[j] = q[j].wrapping_sub(1);
            let mut carry: u64 = 0;
            for i in 0..n {
                let sum = un[i + j] as u64 + vn[i] as u64 + carry;
                un[i + j] = sum as u32;
                carry = sum >> LIMB_BITS;
            }
            un[j + n] = un[j + n].wrapping_add(carry as u32);
        }
    }

    // D8 unnormalize
    trim(&mut q);
    let r = shr(&un[..n], shift as u64);
    (q, r)
}

/// `a * 2^n`.
pub fn shl(a: &[u32], n: u64) -> Result<Vec<u32>> {
    let a = significant(a);
    if a.is_empty() {
        return Ok(Vec::new());
    }
    let n_limbs = n / LIMB_BITS as u64;
    let n_bits = (n % LIMB_BITS as u64) as u32;
    let n_limbs = usize::try_from(n_limbs).map_err(|_| Error::AllocationFailure { limbs: usize::MAX })?;
    let len = n_limbs
        .checked_add(a.len() + 1)
        .ok_or(Error::AllocationFailure { limbs: usize::MAX })?;

    let mut out = Vec::new();
    out.try_reserve_exact(len)
        .map_err(|_| Error::AllocationFailure { limbs: len })?;
    out.resize(n_limbs, 0);
    shl_bits_into(&mut out, a, n_bits);
    trim(&mut out);
    Ok(out)
}

/// `a / 2^n`, rounding toward zero.
pub fn shr(a: &[u32], n: u64) -> Vec<u32> {
    let n_limbs = n / LIMB_BITS as u64;
    if n_limbs >= a.len() as u64 {
        return Vec::new();
    }
    let n_bits = (n % LIMB_BITS as u64) as u32;
    let src = &a[n_limbs as usize..];
    let mut out = Vec::with_capacity(src.len());
    if n_bits == 0 {
        out.extend_from_slice(src);
    } else {
        for (i, &x) in src.iter().enumerate() {
            let high = src.get(i + 1).map_or(0, |&h| h << (LIMB_BITS - n_bits));
            out.push((x >> n_bits) | high);
        }
    }
    trim(&mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_and_cmp() {
        let mut v = vec![1, 2, 0, 0];
        trim(&mut v);
        assert_eq!(v, vec![1, 2]);

        assert_eq!(cmp(&[1, 2, 0], &[1, 2]), Ordering::Equal);
        assert_eq!(cmp(&[0, 3], &[u32::MAX, 2]), Ordering::Greater);
        assert_eq!(cmp(&[5], &[0, 1]), Ordering::Less);
        assert_eq!(cmp(&[], &[0]), Ordering::Equal);
    }

    #[test]
    fn test_add_carry_chain() {
        assert_eq!(add(&[u32::MAX, u32::MAX], &[1]), vec![0, 0, 1]);
        assert_eq!(add(&[1], &[]), vec![1]);
        assert_eq!(add(&[0xff], &[0xff]), vec![0x1fe]);
    }

    #[test]
    fn test_sub_borrow_chain() {
        assert_eq!(sub(&[0, 0, 1], &[1]), vec![u32::MAX, u32::MAX]);
        assert_eq!(sub(&[7, 9], &[7, 9]), Vec::<u32>::new());
        assert_eq!(sub(&[0xfeee], &[0x5d30]), vec![0xa1be]);
    }

    #[test]
    fn test_mul() {
        assert_eq!(mul(&[0xdeadbeef], &[0xf0000000]), vec![0x10000000, 0xd0c2e300]);
        assert_eq!(mul(&[u32::MAX, u32::MAX], &[u32::MAX, u32::MAX]), vec![1, 0, 0xfffffffe, u32::MAX]);
        assert!(mul(&[8], &[]).is_empty());
    }

    #[test]
    fn test_div_rem_word() {
        let (q, r) = div_rem_word(&[0, 1], 3);
        assert_eq!(q, vec![0x55555555]);
        assert_eq!(r, 1);
    }

    #[test]
    fn test_div_rem_add_back() {
        // qhat overshoots by one here and the D6 add-back step must fix it
        let u = [0, 0, 0x80000000, 0x7fffffff];
        let v = [1, 0, 0x80000000];
        let (q, r) = div_rem(&u, &v);
        assert_eq!(q, vec![0xfffffffe]);
        assert_eq!(r, vec![2, 0xffffffff, 0x7fffffff]);
    }

    #[test]
    fn test_div_rem_small_dividend() {
        let (q, r) = div_rem(&[5], &[0, 1]);
        assert!(q.is_empty());
        assert_eq!(r, vec![5]);
    }

    #[test]
    fn test_shifts() {
        assert_eq!(shl(&[1], 8).unwrap(), vec![0x100]);
        assert_eq!(shl(&[0xff], 11).unwrap(), vec![0x7f800]);
        assert_eq!(shl(&[1], 64).unwrap(), vec![0, 0, 1]);
        assert_eq!(shl(&[0x80000000], 1).unwrap(), vec![0, 1]);
        assert_eq!(shr(&[0, 0, 1], 64), vec![1]);
        assert_eq!(shr(&[0xff00], 8), vec![0xff]);
        assert_eq!(shr(&[0, 1], 1), vec![0x80000000]);
        assert!(shr(&[0xff], 8).is_empty());
        assert!(shr(&[1, 2, 3], u64::MAX).is_empty());
    }

    #[test]
    fn test_shl_reports_allocation_failure() {
        assert!(matches!(shl(&[1], u64::MAX), Err(Error::AllocationFailure { .. })));
    }

    #[test]
    fn test_bit_len() {
        assert_eq!(bit_len(&[]), 0);
        assert_eq!(bit_len(&[1]), 1);
        assert_eq!(bit_len(&[0, 0x80000000]), 64);
    }
}
