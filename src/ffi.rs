//! The `BN_*` C ABI.
//!
//! Values are addressed through opaque [`BnHandle`] identifiers kept in a
//! process-wide registry. Identifiers are never reused, so a released
//! identifier is always recognised: freeing it again reports
//! [`Error::DoubleRelease`] and any other use reports [`Error::UseAfterRelease`].
//!
//! The registry lock covers handle lookup only. Operands are cloned out, the
//! arithmetic runs with no lock held, and the result is stored under a second
//! short lock, so a long multiply never stalls calls on other handles.
//!
//! Calls returning `c_int` report `0` on success and [`Error::code`] on
//! failure, except `BN_to_string` (bytes written) and `BN_cmp`.
#![allow(non_snake_case)]

use std::collections::HashMap;
use std::ffi::CStr;
use std::os::raw::{c_char, c_int};
use std::sync::{Mutex, MutexGuard, PoisonError};

use lazy_static::lazy_static;
use tracing::{debug, trace};

use crate::big_int::BigInt;
use crate::error::{Error, Result};
use crate::handle::{self, Handle};
use crate::hex::{parse_hex, to_hex, write_hex};

pub type BnHandle = u64;

/// Returned in place of a handle when construction fails.
pub const BN_NULL: BnHandle = 0;

struct Registry {
    next: BnHandle,
    live: HashMap<BnHandle, Handle>,
}

impl Registry {
    fn insert(&mut self, handle: Handle) -> BnHandle {
        let id = self.next;
        self.next += 1;
        trace!(id, inner = handle.id(), "registered handle");
        self.live.insert(id, handle);
        id
    }

    fn issued(&self, id: BnHandle) -> bool {
        id != BN_NULL && id < self.next
    }

    fn missing(&self, id: BnHandle) -> Error {
        if self.issued(id) {
            Error::UseAfterRelease
        } else {
            Error::InvalidHandle
        }
    }

    fn get(&self, id: BnHandle) -> Result<&Handle> {
        self.live.get(&id).ok_or_else(|| self.missing(id))
    }

    fn get_mut(&mut self, id: BnHandle) -> Result<&mut Handle> {
        let err = self.missing(id);
        self.live.get_mut(&id).ok_or(err)
    }

    fn value(&self, id: BnHandle) -> Result<&BigInt> {
        self.get(id).map(Handle::value)
    }

    fn remove(&mut self, id: BnHandle) -> Result<Handle> {
        match self.live.remove(&id) {
            Some(handle) => Ok(handle),
            None if self.issued(id) => Err(Error::DoubleRelease),
            None => Err(Error::InvalidHandle),
        }
    }
}

lazy_static! {
    static ref REGISTRY: Mutex<Registry> = Mutex::new(Registry { next: 1, live: HashMap::new() });
}

// Every registry mutation is a single map operation, so a panic elsewhere
// cannot leave it half-updated.
fn registry() -> MutexGuard<'static, Registry> {
    REGISTRY.lock().unwrap_or_else(PoisonError::into_inner)
}

fn report<T>(call: &str, result: Result<T>) -> Result<T> {
    if let Err(err) = &result {
        debug!(call, %err, code = err.code(), "BN call failed");
    }
    result
}

fn status(call: &str, result: Result<()>) -> c_int {
    match report(call, result) {
        Ok(()) => 0,
        Err(err) => err.code(),
    }
}

fn snapshot(id: BnHandle) -> Result<BigInt> {
    registry().value(id).cloned()
}

fn store(id: BnHandle, value: BigInt) -> Result<()> {
    registry().get_mut(id).map(|h| h.set(value))
}

fn unary(dst: BnHandle, a: BnHandle, op: impl FnOnce(&BigInt) -> Result<BigInt>) -> Result<()> {
    let a = {
        let reg = registry();
        reg.get(dst)?;
        reg.value(a)?.clone()
    };
    store(dst, op(&a)?)
}

fn binary(
    dst: BnHandle,
    a: BnHandle,
    b: BnHandle,
    op: impl FnOnce(&BigInt, &BigInt) -> Result<BigInt>,
) -> Result<()> {
    let (a, b) = {
        let reg = registry();
        reg.get(dst)?;
        (reg.value(a)?.clone(), reg.value(b)?.clone())
    };
    store(dst, op(&a, &b)?)
}

/// Borrows a NUL-terminated C string as UTF-8 text.
///
/// # Safety
/// `text` must be null or point to a NUL-terminated string that outlives `'a`.
unsafe fn text_arg<'a>(text: *const c_char) -> Result<&'a str> {
    if text.is_null() {
        return Err(Error::InvalidFormat { position: 0, found: None });
    }
    CStr::from_ptr(text)
        .to_str()
        .map_err(|err| Error::InvalidFormat { position: err.valid_up_to(), found: None })
}

#[no_mangle]
pub extern "C" fn BN_new() -> BnHandle {
    registry().insert(Handle::create())
}

#[no_mangle]
pub extern "C" fn BN_free(bn: BnHandle) -> c_int {
    let released = registry().remove(bn);
    status("BN_free", released.map(Handle::release))
}

#[no_mangle]
pub extern "C" fn BN_add(result: BnHandle, a: BnHandle, b: BnHandle) -> c_int {
    status("BN_add", binary(result, a, b, |a, b| Ok(BigInt::add(a, b))))
}

#[no_mangle]
pub extern "C" fn BN_sub(result: BnHandle, a: BnHandle, b: BnHandle) -> c_int {
    status("BN_sub", binary(result, a, b, |a, b| Ok(BigInt::sub(a, b))))
}

#[no_mangle]
pub extern "C" fn BN_mul(result: BnHandle, a: BnHandle, b: BnHandle) -> c_int {
    status("BN_mul", binary(result, a, b, |a, b| Ok(BigInt::mul(a, b))))
}

/// Quotient into `q`, remainder into `r`. `r` may be [`BN_NULL`] to discard
/// the remainder. When `q == r` the remainder is what remains.
#[no_mangle]
pub extern "C" fn BN_div(q: BnHandle, r: BnHandle, n: BnHandle, d: BnHandle) -> c_int {
    let result = (|| -> Result<()> {
        let (n, d) = {
            let reg = registry();
            reg.get(q)?;
            if r != BN_NULL {
                reg.get(r)?;
            }
            (reg.value(n)?.clone(), reg.value(d)?.clone())
        };
        let (quot, rem) = n.checked_div_rem(&d)?;

        let mut reg = registry();
        reg.get(q)?;
        if r != BN_NULL {
            reg.get(r)?;
        }
        reg.get_mut(q)?.set(quot);
        if r != BN_NULL {
            reg.get_mut(r)?.set(rem);
        }
        Ok(())
    })();
    status("BN_div", result)
}

#[no_mangle]
pub extern "C" fn BN_add_u8(result: BnHandle, a: BnHandle, i: u8) -> c_int {
    status("BN_add_u8", unary(result, a, |a| Ok(a.add_u8(i))))
}

#[no_mangle]
pub extern "C" fn BN_sub_u8(result: BnHandle, a: BnHandle, i: u8) -> c_int {
    status("BN_sub_u8", unary(result, a, |a| Ok(a.sub_u8(i))))
}

#[no_mangle]
pub extern "C" fn BN_shl_u64(result: BnHandle, a: BnHandle, shl: u64) -> c_int {
    status("BN_shl_u64", unary(result, a, |a| a.checked_shl(shl)))
}

#[no_mangle]
pub extern "C" fn BN_shr_u64(result: BnHandle, a: BnHandle, shr: u64) -> c_int {
    status("BN_shr_u64", unary(result, a, |a| Ok(a.shr(shr))))
}

#[no_mangle]
pub extern "C" fn BN_shl_u8(result: BnHandle, a: BnHandle, shl: u8) -> c_int {
    BN_shl_u64(result, a, shl as u64)
}

#[no_mangle]
pub extern "C" fn BN_shr_u8(result: BnHandle, a: BnHandle, shr: u8) -> c_int {
    BN_shr_u64(result, a, shr as u64)
}

#[no_mangle]
pub extern "C" fn BN_inc(bn: BnHandle) -> c_int {
    status("BN_inc", registry().get_mut(bn).map(Handle::inc))
}

#[no_mangle]
pub extern "C" fn BN_dec(bn: BnHandle) -> c_int {
    status("BN_dec", registry().get_mut(bn).map(Handle::dec))
}

/// `-1`, `0` or `1`; `c_int::MIN` when either handle is unusable.
#[no_mangle]
pub extern "C" fn BN_cmp(a: BnHandle, b: BnHandle) -> c_int {
    let reg = registry();
    let ord = reg.get(a).and_then(|a| reg.get(b).map(|b| a.compare(b)));
    match report("BN_cmp", ord) {
        Ok(ord) => ord as c_int,
        Err(_) => c_int::MIN,
    }
}

#[no_mangle]
pub extern "C" fn BN_copy(result: BnHandle, a: BnHandle) -> c_int {
    status("BN_copy", unary(result, a, |a| Ok(a.clone())))
}

/// Parses hex text into an existing handle, leaving it untouched on failure.
///
/// # Safety
/// `text` must be null or a valid NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn BN_from_hex(bn: BnHandle, text: *const c_char) -> c_int {
    let result = text_arg(text).and_then(|text| {
        let value = parse_hex(text)?;
        registry().get_mut(bn)?.set(value);
        Ok(())
    });
    status("BN_from_hex", result)
}

/// Returns [`BN_NULL`] when the text does not parse.
///
/// # Safety
/// `text` must be null or a valid NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn BN_new_from_hex(text: *const c_char) -> BnHandle {
    let parsed = text_arg(text).and_then(Handle::new_from_hex);
    match report("BN_new_from_hex", parsed) {
        Ok(handle) => registry().insert(handle),
        Err(_) => BN_NULL,
    }
}

#[no_mangle]
pub extern "C" fn BN_from_u64(bn: BnHandle, val: u64) -> c_int {
    status("BN_from_u64", registry().get_mut(bn).map(|h| h.from_u64(val)))
}

/// # Safety
/// `out` must be null or valid for a `u64` write.
#[no_mangle]
pub unsafe extern "C" fn BN_to_u64(bn: BnHandle, out: *mut u64) -> c_int {
    let result = registry().get(bn).and_then(Handle::to_u64).and_then(|val| {
        if out.is_null() {
            return Err(Error::BufferTooSmall { needed: 8, capacity: 0 });
        }
        *out = val;
        Ok(())
    });
    status("BN_to_u64", result)
}

/// Writes hex text (no terminator) into `str` and returns the number of bytes
/// written, or a negative status when `str_len` is too small.
///
/// # Safety
/// `str` must be null or valid for `str_len` bytes of writes.
#[no_mangle]
pub unsafe extern "C" fn BN_to_string(bn: BnHandle, str: *mut c_char, str_len: usize) -> c_int {
    let result = (|| -> Result<c_int> {
        let value = snapshot(bn)?;
        let written = if str.is_null() {
            write_hex(&value, &mut [])?
        } else {
            write_hex(&value, std::slice::from_raw_parts_mut(str.cast::<u8>(), str_len))?
        };
        c_int::try_from(written).map_err(|_| Error::BufferTooSmall {
            needed: written,
            capacity: c_int::MAX as usize,
        })
    })();
    match report("BN_to_string", result) {
        Ok(written) => written,
        Err(err) => err.code(),
    }
}

#[no_mangle]
pub extern "C" fn BN_print(bn: BnHandle) {
    let text = snapshot(bn).map(|value| to_hex(&value));
    if let Ok(text) = report("BN_print", text) {
        println!("{}", text);
    }
}

macro_rules! small_constants {
    ($($name: ident => $ctor: path),* $(,)?) => {
    $(
    #[no_mangle]
    pub extern "C" fn $name() -> BnHandle {
        registry().insert($ctor())
    }
    )*
    };
}

small_constants! {
    BN_zero => handle::zero, BN_one => handle::one, BN_two => handle::two,
    BN_three => handle::three, BN_four => handle::four, BN_five => handle::five,
    BN_six => handle::six, BN_seven => handle::seven, BN_eight => handle::eight,
    BN_nine => handle::nine, BN_ten => handle::ten,
}

#[cfg(test)]
mod tests {
    use std::ffi::CString;
    use std::sync::mpsc;
    use std::thread;
    use std::time::Duration;

    use super::*;

    fn new_hex(text: &str) -> BnHandle {
        let text = CString::new(text).unwrap();
        let bn = unsafe { BN_new_from_hex(text.as_ptr()) };
        assert_ne!(bn, BN_NULL);
        bn
    }

    fn hex_of(bn: BnHandle) -> String {
        let mut buf = [0 as c_char; 2048];
        let n = unsafe { BN_to_string(bn, buf.as_mut_ptr(), buf.len()) };
        assert!(n > 0, "BN_to_string failed with {}", n);
        buf[..n as usize].iter().map(|&c| c as u8 as char).collect()
    }

    #[test]
    fn test_lifecycle() {
        let bn = BN_new();
        assert_eq!(hex_of(bn), "0");
        assert_eq!(BN_free(bn), 0);
        assert_eq!(BN_free(bn), Error::DoubleRelease.code());
        assert_eq!(BN_inc(bn), Error::UseAfterRelease.code());
        assert_eq!(BN_free(BN_NULL), Error::InvalidHandle.code());
        assert_eq!(BN_inc(u64::MAX), Error::InvalidHandle.code());
    }

    #[test]
    fn test_arithmetic() {
        let a = new_hex("ff");
        let b = new_hex("ff");
        let r = BN_new();
        assert_eq!(BN_add(r, a, b), 0);
        assert_eq!(hex_of(r), "1fe");
        assert_eq!(hex_of(a), "ff");

        assert_eq!(BN_sub(r, a, a), 0);
        assert_eq!(hex_of(r), "0");

        assert_eq!(BN_mul(r, a, b), 0);
        assert_eq!(hex_of(r), "fe01");

        // destination may be one of the operands
        assert_eq!(BN_add(a, a, b), 0);
        assert_eq!(hex_of(a), "1fe");

        for bn in [a, b, r] {
            assert_eq!(BN_free(bn), 0);
        }
    }

    #[test]
    fn test_div() {
        let n = new_hex("64");
        let d = new_hex("a");
        let q = BN_new();
        let r = BN_new();
        assert_eq!(BN_div(q, r, n, d), 0);
        assert_eq!(hex_of(q), "a");
        assert_eq!(hex_of(r), "0");

        let zero = BN_zero();
        assert_eq!(BN_div(q, r, n, zero), Error::DivisionByZero.code());
        assert_eq!(hex_of(q), "a");

        let ff = new_hex("ffffffff");
        let d = new_hex("3dfe");
        assert_eq!(BN_div(q, BN_NULL, ff, d), 0);
        assert_eq!(hex_of(q), "4212a");
    }

    #[test]
    fn test_shifts_and_small_ops() {
        let r = BN_new();
        let one = BN_one();
        assert_eq!(BN_shl_u64(r, one, 8), 0);
        assert_eq!(hex_of(r), "100");
        assert_eq!(BN_shl_u8(r, one, 15), 0);
        assert_eq!(hex_of(r), "8000");
        assert_eq!(BN_shr_u8(r, r, 15), 0);
        assert_eq!(hex_of(r), "1");

        let ff = new_hex("ff");
        assert_eq!(BN_add_u8(r, ff, 32), 0);
        assert_eq!(hex_of(r), "11f");
        assert_eq!(BN_sub_u8(ff, r, 32), 0);
        assert_eq!(hex_of(ff), "ff");
        assert_eq!(BN_shl_u64(r, one, u64::MAX), Error::AllocationFailure { limbs: 0 }.code());
    }

    #[test]
    fn test_from_hex_and_cmp() {
        let a = BN_new();
        let text = CString::new("feee").unwrap();
        assert_eq!(unsafe { BN_from_hex(a, text.as_ptr()) }, 0);
        let bad = CString::new("fe-e").unwrap();
        assert_eq!(unsafe { BN_from_hex(a, bad.as_ptr()) }, Error::InvalidFormat { position: 0, found: None }.code());
        assert_eq!(unsafe { BN_from_hex(a, std::ptr::null()) }, -1);
        assert_eq!(hex_of(a), "feee");
        assert_eq!(unsafe { BN_new_from_hex(bad.as_ptr()) }, BN_NULL);

        let b = new_hex("5d30");
        assert_eq!(BN_cmp(a, b), 1);
        assert_eq!(BN_cmp(b, a), -1);
        assert_eq!(BN_copy(b, a), 0);
        assert_eq!(BN_cmp(a, b), 0);
        assert_eq!(BN_free(b), 0);
        assert_eq!(BN_cmp(a, b), c_int::MIN);
    }

    #[test]
    fn test_machine_integers() {
        let bn = BN_new();
        assert_eq!(BN_from_u64(bn, 32), 0);
        assert_eq!(hex_of(bn), "20");
        let mut out = 0u64;
        assert_eq!(unsafe { BN_to_u64(bn, &mut out) }, 0);
        assert_eq!(out, 32);
        assert_eq!(BN_dec(bn), 0);
        assert_eq!(unsafe { BN_to_u64(bn, &mut out) }, 0);
        assert_eq!(out, 31);
    }

    #[test]
    fn test_to_string_capacity() {
        let bn = new_hex("abcd");
        let mut buf = [0 as c_char; 3];
        assert_eq!(
            unsafe { BN_to_string(bn, buf.as_mut_ptr(), buf.len()) },
            Error::BufferTooSmall { needed: 4, capacity: 3 }.code()
        );
        assert_eq!(unsafe { BN_to_string(bn, std::ptr::null_mut(), 0) }, -3);
        BN_print(bn);
    }

    #[test]
    fn test_arithmetic_runs_outside_registry_lock() {
        let a = new_hex(&"f".repeat(512));
        let other = BN_new();
        let dst = BN_new();

        // a call on a disjoint handle must finish while the multiply is still running
        let res = binary(dst, a, a, |a, b| {
            let (tx, rx) = mpsc::channel();
            thread::spawn(move || tx.send(BN_inc(other)).unwrap());
            let inc = rx.recv_timeout(Duration::from_secs(5));
            assert_eq!(inc, Ok(0), "BN_inc blocked behind an in-flight multiply");
            Ok(BigInt::mul(a, b))
        });
        assert_eq!(res, Ok(()));
        assert_eq!(hex_of(other), "1");
        assert_eq!(hex_of(dst).len(), 1024);

        let (tx, rx) = mpsc::channel();
        let worker = thread::spawn(move || tx.send(BN_mul(dst, dst, dst)).unwrap());
        assert_eq!(BN_dec(other), 0);
        assert_eq!(rx.recv_timeout(Duration::from_secs(30)), Ok(0));
        worker.join().unwrap();
        assert_eq!(hex_of(other), "0");
    }

    #[test]
    fn test_freed_destination_is_reported_after_compute() {
        let a = new_hex("ff");
        let dst = BN_new();
        let res = binary(dst, a, a, |a, b| {
            assert_eq!(BN_free(dst), 0);
            Ok(BigInt::add(a, b))
        });
        assert_eq!(res, Err(Error::UseAfterRelease));
        assert_eq!(hex_of(a), "ff");
    }

    #[test]
    fn test_small_constants_are_fresh() {
        let a = BN_three();
        let b = BN_three();
        assert_ne!(a, b);
        assert_eq!(BN_inc(a), 0);
        assert_eq!(hex_of(a), "4");
        assert_eq!(hex_of(b), "3");
        assert_eq!(hex_of(BN_ten()), "a");
    }
}
