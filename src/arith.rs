//! Single-limb carry primitives
//!
//! Each of these widens to a `u128` temporary so that the carry (or borrow) out of a limb is
//! captured exactly, which lets the multi-limb routines in [`crate::repr`] and [`crate::field`]
//! share one carry-propagation contract.

/// Calculates `a + b + carry`, returning the low limb and updating `carry` with the high limb.
#[inline(always)]
pub(crate) fn adc(a: u64, b: u64, carry: &mut u64) -> u64 {
	let tmp = (a as u128) + (b as u128) + (*carry as u128);
	*carry = (tmp >> 64) as u64;
	tmp as u64
}

/// Calculates `a - b - borrow`, returning the low limb and setting `borrow` to 1 iff the
/// subtraction wrapped.
#[inline(always)]
pub(crate) fn sbb(a: u64, b: u64, borrow: &mut u64) -> u64 {
	let tmp = (1u128 << 64) + (a as u128) - (b as u128) - (*borrow as u128);
	*borrow = if (tmp >> 64) == 0 { 1 } else { 0 };
	tmp as u64
}

/// Calculates `a + b * c + carry`, returning the low limb and updating `carry` with the high
/// limb.
///
/// The sum can never overflow a `u128`: `(2^64 - 1) + (2^64 - 1)^2 + (2^64 - 1) = 2^128 - 1`.
#[inline(always)]
pub(crate) fn mac_with_carry(a: u64, b: u64, c: u64, carry: &mut u64) -> u64 {
	let tmp = (a as u128) + (b as u128) * (c as u128) + (*carry as u128);
	*carry = (tmp >> 64) as u64;
	tmp as u64
}
