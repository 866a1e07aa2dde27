//! Not So Bignum \
//! This crate provides:
//! - [`BigInt`]: arbitrary-precision signed integers in sign-magnitude form, with
//!   add, subtract, multiply, truncating divide-with-remainder and bit shifts.
//! - [`hex`]: the hexadecimal text codec, the only text format values are read from.
//! - [`Handle`]: single-owner handles with an explicit create/release lifecycle,
//!   and the destination-writing call surface in [`handle`].
//! - [`ffi`]: the same surface as an `extern "C"` `BN_*` function table.
//!
//! ```
//! use not_so_bignum::{handle, Handle};
//!
//! let a = Handle::new_from_hex("ff").unwrap();
//! let b = Handle::new_from_hex("ff").unwrap();
//! let mut c = Handle::create();
//! handle::add(&mut c, &a, &b);
//!
//! let mut buf = [0u8; 16];
//! let n = c.to_string(&mut buf).unwrap();
//! assert_eq!(&buf[..n], b"1fe");
//! c.release();
//! ```

mod big_int;
mod big_num_cache;
mod big_num_constants;
mod error;
pub mod ffi;
pub mod handle;
pub mod hex;
mod mag;

pub use big_int::{BigInt, Sign, ZERO};
pub use error::{Error, Result};
pub use handle::Handle;
pub use hex::{hex_len, parse_hex, to_hex, write_hex};
