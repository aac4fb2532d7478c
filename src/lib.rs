//! Arbitrary-precision signed integer arithmetic.
//!
//! [`BigInt`] stores its magnitude as base-2³² limbs in a small-buffer
//! optimized, copy-on-write [`LimbStore`](limb_store::LimbStore), so short
//! values never allocate and long ones are cheap to clone. See the crate's
//! design notes for the two's-complement bitwise model and the Knuth
//! Algorithm D division used for multi-limb divisors.

mod bigint;
mod error;
mod limb_store;

pub use bigint::BigInt;
pub use error::BigIntError;
