//! Prime field elements in Montgomery form

use alloc::vec::Vec;
use core::fmt;

use crate::field::PrimeField;
use crate::repr::Repr;
use crate::window::Element;

/// An element of the prime field described by a borrowed [`PrimeField`].
///
/// The value is kept as `a * R mod m`, which is always below the modulus. Arithmetic mutates in
/// place; mixing elements of different fields is a bug in the caller.
#[derive(Clone, Copy)]
pub struct Fp<'a, const N: usize> {
	repr: Repr<N>,
	field: &'a PrimeField<N>,
}

impl<'a, const N: usize> Fp<'a, N> {
	/// Builds an element from its canonical (non-Montgomery) value, failing if `repr >= m`.
	pub fn from_repr(repr: Repr<N>, field: &'a PrimeField<N>) -> Option<Self> {
		if !field.is_valid(&repr) {
			return None;
		}
		Some(Self { repr: field.montgomery_mul(&repr, field.mont_r2()), field })
	}

	/// Zero.
	pub fn zero(field: &'a PrimeField<N>) -> Self {
		Self { repr: Repr::ZERO, field }
	}

	/// One, ie `R mod m` in Montgomery form.
	pub fn one(field: &'a PrimeField<N>) -> Self {
		Self { repr: *field.mont_r(), field }
	}

	/// The field this element lives in.
	pub fn field(&self) -> &'a PrimeField<N> { self.field }

	/// The raw Montgomery-form limbs.
	pub fn representation(&self) -> &Repr<N> { &self.repr }

	/// Returns true if this is zero.
	pub fn is_zero(&self) -> bool { self.repr.is_zero() }

	/// Converts out of Montgomery form, returning the canonical value in `[0, m)`.
	pub fn into_repr(&self) -> Repr<N> {
		self.field.montgomery_reduce(&self.repr, &Repr::ZERO)
	}

	/// Appends the canonical value to `out` as exactly `byte_len` big-endian bytes.
	pub fn serialize(&self, byte_len: usize, out: &mut Vec<u8>) {
		self.into_repr().write_be_bytes(byte_len, out);
	}

	/// Sets `self` to `self + e`.
	pub fn add(&mut self, e: &Self) {
		self.repr = self.repr.mod_add(&e.repr, self.field.modulus());
	}

	/// Sets `self` to `self - e`.
	pub fn sub(&mut self, e: &Self) {
		self.repr = self.repr.mod_sub(&e.repr, self.field.modulus());
	}

	/// Sets `self` to `self * e`.
	pub fn mul(&mut self, e: &Self) {
		self.repr = self.field.montgomery_mul(&self.repr, &e.repr);
	}

	/// Sets `self` to `self * self`.
	pub fn square(&mut self) {
		self.repr = self.field.montgomery_mul(&self.repr, &self.repr);
	}

	/// Sets `self` to `2 * self`.
	pub fn mul2(&mut self) {
		let modulus = self.field.modulus();
		let (doubled, overflow) = self.repr.mul2();
		self.repr = if overflow != 0 || doubled >= *modulus {
			doubled.sub_ignore_carry(modulus)
		} else {
			doubled
		};
	}

	/// Sets `self` to `-self`.
	pub fn negate(&mut self) {
		if !self.is_zero() {
			self.repr = self.field.modulus().sub_ignore_carry(&self.repr);
		}
	}

	/// Calculates `self^e`, scanning `e` from its most significant set bit.
	pub fn pow<const M: usize>(&self, e: &Repr<M>) -> Self {
		let bits = e.num_bits();
		if bits == 0 {
			return Self::one(self.field);
		}
		let mut res = *self;
		for i in (0..bits - 1).rev() {
			res.square();
			if e.bit(i) {
				res.mul(self);
			}
		}
		res
	}

	/// Calculates `self^-1`, or `None` for zero (or for a value sharing a factor with a composite
	/// modulus).
	///
	/// This is the Montgomery inverse of Kaliski, as revisited by Savas and Koç: a binary
	/// extended GCD yields `a^-1 * 2^k`, which Montgomery multiplications then rescale.
	pub fn inverse(&self) -> Option<Self> {
		if self.is_zero() {
			return None;
		}
		let field = self.field;
		let mont_power = field.mont_power();

		// self.repr is x = a * R, so phase one gives r = a^-1 * R^-1 * 2^k. We want a^-1 * R,
		// ie r * 2^(2 * mont_power - k).
		let (mut r, mut k) = almost_inverse(&self.repr, field)?;
		debug_assert!(k >= field.modulus_bits() && k <= 2 * field.modulus_bits());

		if k <= mont_power {
			r = field.montgomery_mul(&r, field.mont_r2());
			k += mont_power;
		}
		debug_assert!(k > mont_power && k <= 2 * mont_power);
		r = field.montgomery_mul(&r, field.mont_r2());
		// The remaining correction is below R, so it is a valid Montgomery multiplicand.
		let correction = Repr::pow2((2 * mont_power - k) as usize);
		r = field.montgomery_mul(&r, &correction);

		Some(Self { repr: r, field })
	}

	/// Returns true if `self` is non-zero and provably not an `n`th power, ie `n` divides
	/// `m - 1` and `self^((m - 1) / n) != 1`.
	pub fn is_non_nth_root(&self, n: u64) -> bool {
		if self.is_zero() || n == 0 {
			return false;
		}
		let (power, _) = self.field.modulus().sub(&Repr::<1>::one());
		let (power, rem) = power.div_rem(&Repr::<1>::from_u64(n));
		if !rem.is_zero() {
			return false;
		}
		self.pow(&power) != Self::one(self.field)
	}
}

/// A phase-one accumulator. These stay below `2m`, so one bit above `N` limbs suffices.
#[derive(Clone, Copy)]
struct Accumulator<const N: usize> {
	lo: Repr<N>,
	hi: u64,
}
impl<const N: usize> Accumulator<N> {
	fn double(&mut self) {
		let (lo, carry) = self.lo.mul2();
		self.lo = lo;
		self.hi = (self.hi << 1) | carry;
	}
	fn add(&mut self, o: &Self) {
		let (lo, carry) = self.lo.add(&o.lo);
		self.lo = lo;
		self.hi += o.hi + carry;
	}
}

/// Phase one of the Montgomery inverse: for `0 < x < m`, returns `(x^-1 * 2^k mod m, k)` with
/// `bits(m) <= k <= 2 * bits(m)`.
///
/// Fails if `x` and `m` are not coprime, or if the loop fails to finish within `2 * mont_power`
/// steps (which cannot happen for valid input).
fn almost_inverse<const N: usize>(x: &Repr<N>, field: &PrimeField<N>) -> Option<(Repr<N>, u64)> {
	let modulus = field.modulus();
	let cap = 2 * field.mont_power();

	// m = u * s + v * r throughout, which bounds r and s by m until the final step.
	let mut u = *modulus;
	let mut v = *x;
	let mut r = Accumulator { lo: Repr::ZERO, hi: 0 };
	let mut s = Accumulator { lo: Repr::one(), hi: 0 };
	let mut k = 0;
	while !v.is_zero() {
		if k == cap {
			return None;
		}
		if u.is_even() {
			u = u.div2();
			s.double();
		} else if v.is_even() {
			v = v.div2();
			r.double();
		} else if u > v {
			u = u.sub_ignore_carry(&v).div2();
			r.add(&s);
			s.double();
		} else {
			v = v.sub_ignore_carry(&u).div2();
			s.add(&r);
			r.double();
		}
		k += 1;
	}
	// u ends as gcd(x, m).
	if u != Repr::<1>::one() {
		return None;
	}

	let r = if r.hi != 0 || r.lo >= *modulus { r.lo.sub_ignore_carry(modulus) } else { r.lo };
	debug_assert!(!r.is_zero() && r < *modulus);
	Some((modulus.sub_ignore_carry(&r), k))
}

impl<'a, const N: usize> PartialEq for Fp<'a, N> {
	fn eq(&self, o: &Self) -> bool {
		debug_assert_eq!(self.field.modulus(), o.field.modulus());
		self.repr == o.repr
	}
}
impl<'a, const N: usize> Eq for Fp<'a, N> {}

impl<'a, const N: usize> Element for Fp<'a, N> {
	fn square(&mut self) { Fp::square(self) }
	fn mul(&mut self, other: &Self) { Fp::mul(self, other) }
}

impl<'a, const N: usize> fmt::Display for Fp<'a, N> {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "Fp({})", self.into_repr())
	}
}

impl<'a, const N: usize> fmt::Debug for Fp<'a, N> {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { fmt::Display::fmt(self, f) }
}
