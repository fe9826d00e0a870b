//! Pairing-friendly curve precompiles (EIP-1962 and friends) take their moduli from the caller,
//! so the field arithmetic underneath them cannot be specialized to a single curve ahead of time.
//!
//! This crate provides that arithmetic for any odd modulus of up to `64 * N` bits:
//!  * [`Repr`] is a fixed-width unsigned integer of `N` 64-bit limbs, with carry-exposing
//!    addition, subtraction, multiplication and shifts, plus Knuth long division.
//!  * [`PrimeField`] holds a modulus and its precomputed Montgomery constants.
//!  * [`Fp`] is an element of such a field, kept in Montgomery form, supporting the usual
//!    arithmetic as well as exponentiation and inversion.
//!  * [`WindowExpBase`] implements fixed-window exponentiation over anything which implements
//!    [`Element`], including [`Fp`].
//!
//! It is no-std (but requires `alloc`), has no runtime dependencies, and never allocates in its
//! arithmetic hot paths. Note that none of the arithmetic is constant-time, it is intended for
//! verifying public data only.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

#![no_std]
extern crate alloc;

mod arith;
pub mod field;
pub mod fp;
pub mod repr;
pub mod window;

#[cfg(fuzzing)]
pub mod fuzz;

#[cfg(test)]
mod test;

pub use field::PrimeField;
pub use fp::Fp;
pub use repr::Repr;
pub use window::{Element, WindowExpBase, MAX_WINDOW};
