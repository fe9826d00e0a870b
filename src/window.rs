//! Fixed-window exponentiation, generic over anything that can square and multiply
//!
//! The same tables drive field exponentiation and, for group types implementing [`Element`] with
//! doubling and addition, scalar multiplication.

use alloc::vec::Vec;

use crate::repr::Repr;

/// The largest window size [`WindowExpBase::new`] accepts. A window of `w` bits costs a table
/// of `2^(w - 1)` elements.
pub const MAX_WINDOW: usize = 16;

/// A value with an associative in-place "square" and "multiply".
pub trait Element: Clone {
	/// Sets `self` to `self * self`.
	fn square(&mut self);
	/// Sets `self` to `self * other`.
	fn mul(&mut self, other: &Self);
}

/// Precomputed odd powers of a base, for exponentiating it by many different scalars.
#[derive(Clone, Debug)]
pub struct WindowExpBase<E: Element> {
	window: usize,
	one: E,
	bases: Vec<E>,
}

impl<E: Element> WindowExpBase<E> {
	/// Builds the table `[base, base^3, base^5, ..]` of `2^(window - 1)` entries.
	///
	/// Panics if `window` is zero or above [`MAX_WINDOW`].
	pub fn new(base: E, one: E, window: usize) -> Self {
		assert!(window >= 1 && window <= MAX_WINDOW, "window size out of range");
		let table_len = 1usize << (window - 1);
		let mut bases = Vec::with_capacity(table_len);
		let mut base_sq = base.clone();
		base_sq.square();
		let mut acc = base;
		for _ in 1..table_len {
			let mut next = acc.clone();
			next.mul(&base_sq);
			bases.push(core::mem::replace(&mut acc, next));
		}
		bases.push(acc);
		Self { window, one, bases }
	}

	/// The window size in bits.
	pub fn window(&self) -> usize { self.window }

	/// Splits `scalar` into windows, least significant first.
	///
	/// Each zero bit below a window contributes a `0` entry. A set bit opens a window which
	/// swallows the next `window` bits (itself included); the window's value is those bits,
	/// so it is always odd. There are no trailing zero entries.
	pub fn windows<const M: usize>(&self, scalar: &Repr<M>) -> Vec<u64> {
		let mut windows = Vec::new();
		let mut in_window = false;
		let mut w = 0u64;
		let mut bit_count = 0;
		for i in 0..scalar.num_bits() {
			let bit = scalar.bit(i);
			if !in_window {
				if !bit {
					windows.push(0);
					continue;
				}
				in_window = true;
			}
			if bit {
				w |= 1 << bit_count;
			}
			bit_count += 1;
			if bit_count == self.window {
				windows.push(w);
				in_window = false;
				w = 0;
				bit_count = 0;
			}
		}
		if w != 0 {
			windows.push(w);
		}
		windows
	}

	/// Calculates `base^scalar`.
	pub fn exponentiate<const M: usize>(&self, scalar: &Repr<M>) -> E {
		let mut res = self.one.clone();
		let mut found_nonzero = false;
		for w in self.windows(scalar).iter().rev() {
			if *w == 0 {
				if found_nonzero {
					res.square();
				}
				continue;
			}
			found_nonzero = true;
			for _ in 0..self.window {
				res.square();
			}
			res.mul(&self.bases[(*w >> 1) as usize]);
		}
		res
	}
}
