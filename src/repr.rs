//! Simple variable-time fixed-width big integer implementation
//!
//! A [`Repr`] is a plain array of 64-bit limbs, least-significant limb first. Nothing here knows
//! about moduli except the `mod_*` helpers, which assume their operands are already reduced.

use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt;

use crate::arith::{adc, mac_with_carry, sbb};

/// An unsigned integer in `[0, 2^(64 * N))`, stored as `N` little-endian 64-bit limbs.
///
/// Widening operations never silently truncate: they hand back the limb which would sit at
/// index `N` (carry, borrow or shifted-out bits) and let the caller decide whether to keep it.
#[derive(Clone, Copy, Debug)]
pub struct Repr<const N: usize>(pub(crate) [u64; N]);

impl<const N: usize> Default for Repr<N> {
	fn default() -> Self { Self::ZERO }
}

impl<const N: usize> Repr<N> {
	/// The number of limbs.
	pub const LIMBS: usize = N;
	/// The number of bits, ie `64 * N`.
	pub const BITS: usize = 64 * N;
	/// Zero.
	pub const ZERO: Self = Repr([0; N]);

	/// Wraps the given little-endian limbs.
	pub const fn from_limbs(limbs: [u64; N]) -> Self { Repr(limbs) }

	/// Builds a value whose lowest limb is `v`.
	pub const fn from_u64(v: u64) -> Self {
		let mut res = [0; N];
		res[0] = v;
		Repr(res)
	}

	/// One.
	pub const fn one() -> Self { Self::from_u64(1) }

	/// Builds `2^bit`, ie a value with only the given bit set.
	pub fn pow2(bit: usize) -> Self {
		debug_assert!(bit < Self::BITS);
		let mut res = [0; N];
		res[bit / 64] = 1 << (bit % 64);
		Repr(res)
	}

	/// The little-endian limbs.
	pub const fn limbs(&self) -> &[u64; N] { &self.0 }

	/// Returns true if every limb is zero.
	pub fn is_zero(&self) -> bool { self.0.iter().all(|limb| *limb == 0) }

	/// Returns true if the lowest bit is clear.
	pub fn is_even(&self) -> bool { self.0[0] & 1 == 0 }

	/// Returns true if the lowest bit is set.
	pub fn is_odd(&self) -> bool { !self.is_even() }

	/// The position of the highest set bit plus one, or zero for zero.
	pub fn num_bits(&self) -> usize {
		for (i, limb) in self.0.iter().enumerate().rev() {
			if *limb != 0 {
				return i * 64 + 64 - limb.leading_zeros() as usize;
			}
		}
		0
	}

	/// Returns the `i`th bit, counting from the least significant. Bits past the width are zero.
	pub fn bit(&self, i: usize) -> bool {
		if i >= Self::BITS { return false; }
		(self.0[i / 64] >> (i % 64)) & 1 == 1
	}

	/// Zero-extends (or truncates) to `K` limbs.
	///
	/// Truncating away a non-zero limb is a bug in the caller.
	pub fn resize<const K: usize>(&self) -> Repr<K> {
		let mut res = [0; K];
		let common = if K < N { K } else { N };
		res[..common].copy_from_slice(&self.0[..common]);
		debug_assert!(self.0[common..].iter().all(|limb| *limb == 0), "resize dropped a set limb");
		Repr(res)
	}

	/// Constructs a new [`Repr`] from a variable number of big-endian bytes.
	///
	/// Leading zero bytes are permitted; fails iff the value does not fit in `N` limbs.
	pub fn from_be_bytes(bytes: &[u8]) -> Result<Self, ()> {
		let first_set = bytes.iter().position(|b| *b != 0).unwrap_or(bytes.len());
		let bytes = &bytes[first_set..];
		if bytes.len() > N * 8 { return Err(()); }
		let mut res = [0; N];
		for (i, b) in bytes.iter().rev().enumerate() {
			res[i / 8] |= (*b as u64) << ((i % 8) * 8);
		}
		Ok(Repr(res))
	}

	/// Appends exactly `byte_len` big-endian bytes of `self` to `out`.
	///
	/// Bytes above the width are written as zero. Bytes of `self` above `byte_len` are dropped,
	/// so the caller must pick a `byte_len` at least as long as the value.
	pub fn write_be_bytes(&self, byte_len: usize, out: &mut Vec<u8>) {
		out.reserve(byte_len);
		for i in (0..byte_len).rev() {
			let limb = i / 8;
			if limb < N {
				out.push((self.0[limb] >> ((i % 8) * 8)) as u8);
			} else {
				out.push(0);
			}
		}
	}

	/// Adds `b` to `self`, both zero-extended.
	///
	/// Returns the low `N` limbs of the sum and the limb at index `N`. When `b` is no wider than
	/// `self` that limb is the carry (0 or 1).
	pub fn add<const M: usize>(&self, b: &Repr<M>) -> (Self, u64) { self.widening_add(b) }

	/// Subtracts `b` from `self`, both zero-extended.
	///
	/// Returns the low `N` limbs of the two's-complement difference and the limb at index `N`.
	/// When `b` is no wider than `self` that limb is zero if `self >= b`, otherwise all-ones, in
	/// which case the low limbs hold `2^(64N) + self - b`.
	pub fn sub<const M: usize>(&self, b: &Repr<M>) -> (Self, u64) { self.widening_sub(b) }

	/// Adds `b` to `self` at a caller-chosen width `K`.
	///
	/// Returns limbs `0..K` of the sum and the limb at index `K`. With `K >= max(N, M)` the sum
	/// is exact and the returned limb is the carry.
	pub fn widening_add<const M: usize, const K: usize>(&self, b: &Repr<M>) -> (Repr<K>, u64) {
		let mut res = [0; K];
		let mut carry = 0;
		for i in 0..K {
			res[i] = adc(self.limb_or_zero(i), b.limb_or_zero(i), &mut carry);
		}
		let top = adc(self.limb_or_zero(K), b.limb_or_zero(K), &mut carry);
		(Repr(res), top)
	}

	/// Subtracts `b` from `self` at a caller-chosen width `K`.
	///
	/// Returns limbs `0..K` of the two's-complement difference and the limb at index `K`. With
	/// `K >= max(N, M)` that limb is zero if `self >= b` and all-ones otherwise.
	pub fn widening_sub<const M: usize, const K: usize>(&self, b: &Repr<M>) -> (Repr<K>, u64) {
		let mut res = [0; K];
		let mut borrow = 0;
		for i in 0..K {
			res[i] = sbb(self.limb_or_zero(i), b.limb_or_zero(i), &mut borrow);
		}
		let top = sbb(self.limb_or_zero(K), b.limb_or_zero(K), &mut borrow);
		(Repr(res), top)
	}

	fn limb_or_zero(&self, i: usize) -> u64 { if i < N { self.0[i] } else { 0 } }

	/// Adds `b` to `self`, dropping any carry out of the top limb.
	pub fn add_ignore_carry(&self, b: &Self) -> Self { self.add(b).0 }

	/// Subtracts `b` from `self`, dropping any borrow out of the top limb.
	pub fn sub_ignore_carry(&self, b: &Self) -> Self { self.sub(b).0 }

	/// Calculates `(self + b) mod modulus` for `self, b < modulus`.
	pub fn mod_add(&self, b: &Self, modulus: &Self) -> Self {
		debug_assert!(*self < *modulus && *b < *modulus);
		let (sum, carry) = self.add(b);
		if carry != 0 || sum >= *modulus {
			let (reduced, underflow) = sum.sub(modulus);
			debug_assert_eq!(carry != 0, underflow != 0);
			reduced
		} else {
			sum
		}
	}

	/// Calculates `(self - b) mod modulus` for `self, b < modulus`.
	pub fn mod_sub(&self, b: &Self, modulus: &Self) -> Self {
		debug_assert!(*self < *modulus && *b < *modulus);
		let (diff, borrow) = self.sub(b);
		if borrow != 0 {
			let (adjusted, overflow) = diff.add(modulus);
			debug_assert_eq!(overflow, 1);
			adjusted
		} else {
			diff
		}
	}

	/// Shifts left by `k < 64` bits, returning the low `N` limbs and the bits shifted out of the
	/// top limb (ie limb `N` of the widened result).
	pub fn shift_left(&self, k: u32) -> (Self, u64) {
		debug_assert!(k < 64);
		if k == 0 { return (*self, 0); }
		let mut res = [0; N];
		let mut carry = 0;
		for i in 0..N {
			res[i] = (self.0[i] << k) | carry;
			carry = self.0[i] >> (64 - k);
		}
		(Repr(res), carry)
	}

	/// Shifts right by `k < 64` bits.
	pub fn shift_right(&self, k: u32) -> Self {
		debug_assert!(k < 64);
		if k == 0 { return *self; }
		let mut res = [0; N];
		for i in 0..N {
			res[i] = self.0[i] >> k;
			if i + 1 < N {
				res[i] |= self.0[i + 1] << (64 - k);
			}
		}
		Repr(res)
	}

	/// Doubles, returning the top bit which was shifted out.
	pub fn mul2(&self) -> (Self, u64) { self.shift_left(1) }

	/// Halves, rounding down.
	pub fn div2(&self) -> Self { self.shift_right(1) }

	/// Schoolbook multiplication of `self` by `v`, producing a `K`-limb product.
	///
	/// `K` must be at least `N + M`; any limbs above `N + M` are zero padding.
	pub fn mul<const M: usize, const K: usize>(&self, v: &Repr<M>) -> Repr<K> {
		assert!(K >= N + M, "product needs N + M limbs");
		let mut w = [0; K];
		for j in 0..M {
			let mut carry = 0;
			for i in 0..N {
				w[i + j] = mac_with_carry(w[i + j], self.0[i], v.0[j], &mut carry);
			}
			w[j + N] = carry;
		}
		Repr(w)
	}

	/// Multiplies by a single limb, returning the low `N` limbs and the high limb.
	pub fn short_mul(&self, b: u64) -> (Self, u64) {
		let mut res = [0; N];
		let mut carry = 0;
		for i in 0..N {
			res[i] = mac_with_carry(0, self.0[i], b, &mut carry);
		}
		(Repr(res), carry)
	}

	/// Divides by a single non-zero limb, returning the quotient and remainder.
	pub fn short_div(&self, v: u64) -> (Self, u64) {
		debug_assert!(v != 0);
		let mut q = [0; N];
		let mut r = 0u128;
		for i in (0..N).rev() {
			let w = (r << 64) | self.0[i] as u128;
			q[i] = (w / v as u128) as u64;
			r = w % v as u128;
		}
		(Repr(q), r as u64)
	}

	/// Divides `self` by `v`, returning the quotient and remainder.
	///
	/// This is Knuth's Algorithm D (TAOCP vol. 2, 4.3.1). `v` must be non-zero; dividing by zero
	/// is a caller bug (and yields zeros in release builds).
	pub fn div_rem<const M: usize>(&self, v: &Repr<M>) -> (Self, Repr<M>) {
		let mut tight = M;
		while tight > 0 && v.0[tight - 1] == 0 { tight -= 1; }
		debug_assert!(tight != 0, "division by zero");
		if tight == 0 { return (Self::ZERO, Repr::ZERO); }

		if tight == 1 {
			let (q, r) = self.short_div(v.0[0]);
			return (q, Repr::from_u64(r));
		}
		if tight > N {
			// v has a set limb above our width, so it is strictly larger than us.
			return (Self::ZERO, self.resize());
		}

		// Normalize so that the divisor's top limb has its high bit set. This is what bounds the
		// error in each quotient-limb estimate below to at most two.
		let shift = v.0[tight - 1].leading_zeros();
		let (vn, spurious_overflow) = v.shift_left(shift);
		debug_assert_eq!(spurious_overflow, 0);
		let (un_lo, un_hi) = self.shift_left(shift);
		let mut un = Dividend { lo: un_lo.0, hi: un_hi };

		let vtop = vn.0[tight - 1] as u128;
		let vnext = vn.0[tight - 2] as u128;
		let b = 1u128 << 64;

		let mut q = [0; N];
		for j in (0..=N - tight).rev() {
			let num = ((un.get(j + tight) as u128) << 64) | un.get(j + tight - 1) as u128;
			let mut qhat = num / vtop;
			let mut rhat = num % vtop;
			while qhat >= b || qhat * vnext > (rhat << 64) + un.get(j + tight - 2) as u128 {
				qhat -= 1;
				rhat += vtop;
				if rhat >= b { break; }
			}
			debug_assert!(qhat < b);
			let mut qhat = qhat as u64;

			// Multiply and subtract qhat * vn from the current window of the dividend.
			let (prod, prod_hi) = vn.short_mul(qhat);
			let prod_top = if tight < M { prod.0[tight] } else { prod_hi };
			let mut borrow = 0;
			for i in 0..tight {
				let limb = sbb(un.get(i + j), prod.0[i], &mut borrow);
				un.set(i + j, limb);
			}
			let limb = sbb(un.get(j + tight), prod_top, &mut borrow);
			un.set(j + tight, limb);

			if borrow != 0 {
				// qhat was one too large, add the divisor back.
				qhat -= 1;
				let mut carry = 0;
				for i in 0..tight {
					let limb = adc(un.get(i + j), vn.0[i], &mut carry);
					un.set(i + j, limb);
				}
				let limb = un.get(j + tight).wrapping_add(carry);
				un.set(j + tight, limb);
			}
			q[j] = qhat;
		}

		let mut rem = [0; M];
		for i in 0..tight {
			rem[i] = if shift == 0 { un.get(i) } else {
				(un.get(i) >> shift) | (un.get(i + 1) << (64 - shift))
			};
		}
		(Repr(q), Repr(rem))
	}

	/// Returns true if `self < b`, where `<` is "the borrow out of `self - b` is set", with both
	/// sides zero-extended to the wider width.
	fn less_than<const M: usize>(&self, b: &Repr<M>) -> bool {
		let len = if N > M { N } else { M };
		let mut borrow = 0;
		for i in 0..len {
			let a_limb = if i < N { self.0[i] } else { 0 };
			let b_limb = if i < M { b.0[i] } else { 0 };
			sbb(a_limb, b_limb, &mut borrow);
		}
		borrow != 0
	}
}

/// The `N + 1`-limb normalized dividend used by [`Repr::div_rem`].
struct Dividend<const N: usize> {
	lo: [u64; N],
	hi: u64,
}
impl<const N: usize> Dividend<N> {
	fn get(&self, i: usize) -> u64 { if i == N { self.hi } else { self.lo[i] } }
	fn set(&mut self, i: usize, v: u64) { if i == N { self.hi = v; } else { self.lo[i] = v; } }
}

impl<const N: usize, const M: usize> PartialEq<Repr<M>> for Repr<N> {
	fn eq(&self, o: &Repr<M>) -> bool {
		let len = if N > M { N } else { M };
		(0..len).all(|i| {
			let a = if i < N { self.0[i] } else { 0 };
			let b = if i < M { o.0[i] } else { 0 };
			a == b
		})
	}
}
impl<const N: usize> Eq for Repr<N> {}

impl<const N: usize, const M: usize> PartialOrd<Repr<M>> for Repr<N> {
	fn partial_cmp(&self, o: &Repr<M>) -> Option<Ordering> {
		if self.less_than(o) {
			Some(Ordering::Less)
		} else if self == o {
			Some(Ordering::Equal)
		} else {
			Some(Ordering::Greater)
		}
	}
}
impl<const N: usize> Ord for Repr<N> {
	fn cmp(&self, o: &Self) -> Ordering {
		if self.less_than(o) {
			Ordering::Less
		} else if self == o {
			Ordering::Equal
		} else {
			Ordering::Greater
		}
	}
}

impl<const N: usize> fmt::Display for Repr<N> {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.write_str("0x")?;
		for limb in self.0.iter().rev() {
			write!(f, "{:016x}", limb)?;
		}
		Ok(())
	}
}
