//! Montgomery arithmetic context for a prime field
//!
//! A [`PrimeField`] is built once per modulus and then borrowed by every [`crate::Fp`] in that
//! field. Elements are stored as `a * R mod m` where `R = 2^(64 * N)`.

use crate::arith::{adc, mac_with_carry};
use crate::repr::Repr;

/// The modulus of a prime field together with its precomputed Montgomery constants.
///
/// The modulus may use every bit of its `N` limbs: no "spare" top bit is assumed anywhere.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrimeField<const N: usize> {
	modulus: Repr<N>,
	modulus_bits: u64,
	mont_power: u64,
	mont_r: Repr<N>,
	mont_r2: Repr<N>,
	mont_inv: u64,
}

impl<const N: usize> PrimeField<N> {
	/// Builds the Montgomery context for the given modulus.
	///
	/// Fails if the modulus is even or smaller than 3, as Montgomery reduction needs an odd
	/// modulus and neither 1 nor 2 leaves room for a useful field. Primality is not checked.
	pub fn new(modulus: Repr<N>) -> Option<Self> {
		if modulus.is_even() || modulus < Repr::<1>::from_u64(3) {
			return None;
		}

		// m^(2^63 - 1) = m^-1 mod 2^64, as the odd residues mod 2^64 form a group of order 2^63.
		let mut inv = 1u64;
		for _ in 0..63 {
			inv = inv.wrapping_mul(inv);
			inv = inv.wrapping_mul(modulus.0[0]);
		}
		let mont_inv = inv.wrapping_neg();

		// R itself needs N + 1 limbs, but R - m (ie 0 - m wrapped) is congruent to R and fits.
		let (r_minus_m, _) = Repr::<N>::ZERO.sub(&modulus);
		let (_, mont_r) = r_minus_m.div_rem(&modulus);

		// R^2 = R * 2^(64N), reached by 64N modular doublings of R.
		let mut mont_r2 = mont_r;
		for _ in 0..64 * N {
			mont_r2 = mont_r2.mod_add(&mont_r2, &modulus);
		}

		Some(Self {
			modulus,
			modulus_bits: modulus.num_bits() as u64,
			mont_power: 64 * N as u64,
			mont_r,
			mont_r2,
			mont_inv,
		})
	}

	/// The modulus `m`.
	pub fn modulus(&self) -> &Repr<N> { &self.modulus }
	/// The number of significant bits in the modulus.
	pub fn modulus_bits(&self) -> u64 { self.modulus_bits }
	/// `log2(R)`, ie `64 * N`.
	pub fn mont_power(&self) -> u64 { self.mont_power }
	/// `R mod m`, the Montgomery form of one.
	pub fn mont_r(&self) -> &Repr<N> { &self.mont_r }
	/// `R^2 mod m`, used to move values into Montgomery form.
	pub fn mont_r2(&self) -> &Repr<N> { &self.mont_r2 }
	/// `-m^-1 mod 2^64`.
	pub fn mont_inv(&self) -> u64 { self.mont_inv }

	/// Returns true if `repr` is a canonical residue, ie `repr < m`.
	pub fn is_valid(&self, repr: &Repr<N>) -> bool { *repr < self.modulus }

	/// Calculates `a * b * R^-1 mod m` with interleaved multiply and reduce steps (CIOS).
	///
	/// Requires `a < m` and `b < R`, which keeps the running total below `2m`.
	pub fn montgomery_mul(&self, a: &Repr<N>, b: &Repr<N>) -> Repr<N> {
		debug_assert!(*a < self.modulus);
		let m = &self.modulus.0;
		let mut t = [0u64; N];
		let mut t_hi = 0u64;
		for i in 0..N {
			let mut carry = 0;
			for j in 0..N {
				t[j] = mac_with_carry(t[j], a.0[j], b.0[i], &mut carry);
			}
			let mut t_top = 0;
			t_hi = adc(t_hi, carry, &mut t_top);

			// Add k * m to clear the low limb, then drop it.
			let k = t[0].wrapping_mul(self.mont_inv);
			let mut carry = 0;
			mac_with_carry(t[0], k, m[0], &mut carry);
			for j in 1..N {
				t[j - 1] = mac_with_carry(t[j], k, m[j], &mut carry);
			}
			let mut overflow = 0;
			t[N - 1] = adc(t_hi, carry, &mut overflow);
			t_hi = t_top + overflow;
		}

		let res = Repr(t);
		if t_hi != 0 || res >= self.modulus {
			res.sub_ignore_carry(&self.modulus)
		} else {
			res
		}
	}

	/// Calculates `(lo + hi * R) * R^-1 mod m` for a double-width input below `m * R`.
	pub fn montgomery_reduce(&self, lo: &Repr<N>, hi: &Repr<N>) -> Repr<N> {
		let m = &self.modulus.0;
		let mut t = Wide { lo: lo.0, hi: hi.0 };
		let mut overflow = 0;
		for i in 0..N {
			let k = t.get(i).wrapping_mul(self.mont_inv);
			let mut carry = 0;
			for j in 0..N {
				let limb = mac_with_carry(t.get(i + j), k, m[j], &mut carry);
				t.set(i + j, limb);
			}
			let mut idx = i + N;
			while carry != 0 && idx < 2 * N {
				let limb = adc(t.get(idx), 0, &mut carry);
				t.set(idx, limb);
				idx += 1;
			}
			overflow += carry;
		}

		let res = Repr(t.hi);
		if overflow != 0 || res >= self.modulus {
			res.sub_ignore_carry(&self.modulus)
		} else {
			res
		}
	}
}

/// A `2N`-limb scratch value, split so it can be built without `2N`-sized arrays.
struct Wide<const N: usize> {
	lo: [u64; N],
	hi: [u64; N],
}
impl<const N: usize> Wide<N> {
	fn get(&self, i: usize) -> u64 { if i < N { self.lo[i] } else { self.hi[i - N] } }
	fn set(&mut self, i: usize, v: u64) { if i < N { self.lo[i] = v; } else { self.hi[i - N] = v; } }
}
