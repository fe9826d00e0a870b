//! Differential fuzzing against the `ibig` arbitrary-precision crate

extern crate ibig;

use alloc::vec::Vec;

use ibig::modular::ModuloRing;
use ibig::UBig;

use crate::field::PrimeField;
use crate::fp::Fp;
use crate::repr::Repr;
use crate::window::WindowExpBase;

fn to_ubig<const N: usize>(r: &Repr<N>) -> UBig {
	let mut bytes = Vec::with_capacity(N * 8);
	r.write_be_bytes(N * 8, &mut bytes);
	UBig::from_be_bytes(&bytes)
}

/// `r` with `top` placed in limb `N`.
fn with_top_limb<const N: usize>(r: &Repr<N>, top: u64) -> UBig {
	to_ubig(r) + (UBig::from(top) << (64 * N))
}

/// Read some bytes and use them to test the integer and field math by comparing results against
/// the `ibig` crate.
///
/// The input is split into two big-endian integers `a` and `b` of equal length. Besides the
/// plain integer operations, `b` is used as a modulus whenever it is odd and at least 3.
pub fn fuzz_math(input: &[u8]) {
	if input.len() < 16 || input.len() % 16 != 0 { return; }
	let (a, b) = input.split_at(input.len() / 2);
	let ai = UBig::from_be_bytes(a);
	let bi = UBig::from_be_bytes(b);
	let window = (input[0] % 6) as usize + 1;

	macro_rules! test { ($n: expr) => { {
		let ar = Repr::<$n>::from_be_bytes(a).unwrap();
		let br = Repr::<$n>::from_be_bytes(b).unwrap();
		assert_eq!(to_ubig(&ar), ai);

		let (sum, carry) = ar.add(&br);
		assert_eq!(with_top_limb(&sum, carry), ai.clone() + bi.clone());

		let (diff, borrow) = ar.sub(&br);
		if ai >= bi {
			assert_eq!(borrow, 0);
			assert_eq!(to_ubig(&diff), ai.clone() - bi.clone());
		} else {
			assert_eq!(borrow, u64::MAX);
			assert_eq!(to_ubig(&diff) + bi.clone(), ai.clone() + (UBig::from(1u8) << (64 * $n)));
		}

		let prod: Repr<{ $n * 2 }> = ar.mul(&br);
		assert_eq!(to_ubig(&prod), ai.clone() * bi.clone());
		let prod_padded: Repr<{ $n * 2 + 1 }> = ar.mul(&br);
		assert_eq!(prod_padded, prod);

		let (doubled, top) = ar.mul2();
		assert_eq!(with_top_limb(&doubled, top), ai.clone() * 2);
		assert_eq!(to_ubig(&br.div2()), bi.clone() >> 1);

		assert_eq!(ar < br, ai < bi);
		assert_eq!(ar == br, ai == bi);
		assert_eq!(ar.num_bits(), ai.bit_len());

		if !br.is_zero() {
			let (quot, rem) = ar.div_rem(&br);
			let (quoti, remi) = ibig::ops::DivRem::div_rem(ai.clone(), &bi);
			assert_eq!(to_ubig(&quot), quoti);
			assert_eq!(to_ubig(&rem), remi);
		}

		if let Some(field) = PrimeField::new(br) {
			let ring = ModuloRing::new(&bi);
			let (_, x_repr) = ar.div_rem(&br);
			let mut y_limbs = *ar.limbs();
			y_limbs.reverse();
			let (_, y_repr) = Repr::from_limbs(y_limbs).div_rem(&br);
			let xi = ring.from(to_ubig(&x_repr));
			let yi = ring.from(to_ubig(&y_repr));

			let x = Fp::from_repr(x_repr, &field).unwrap();
			let y = Fp::from_repr(y_repr, &field).unwrap();
			assert_eq!(x.into_repr(), x_repr);

			let mut res = x;
			res.add(&y);
			assert_eq!(to_ubig(&res.into_repr()), (xi.clone() + yi.clone()).residue());
			let mut res = x;
			res.sub(&y);
			assert_eq!(to_ubig(&res.into_repr()), (xi.clone() - yi.clone()).residue());
			let mut res = x;
			res.mul(&y);
			assert_eq!(to_ubig(&res.into_repr()), (xi.clone() * yi.clone()).residue());
			let mut res = x;
			res.square();
			assert_eq!(to_ubig(&res.into_repr()), (xi.clone() * xi.clone()).residue());
			let mut res = x;
			res.mul2();
			assert_eq!(to_ubig(&res.into_repr()), (xi.clone() + xi.clone()).residue());
			let mut res = x;
			res.negate();
			assert_eq!(to_ubig(&res.into_repr()), (-xi.clone()).residue());

			// ibig happily inverts zero, we do not.
			if x.is_zero() {
				assert!(x.inverse().is_none());
			} else if let Some(inv) = x.inverse() {
				assert_eq!(Some(to_ubig(&inv.into_repr())), xi.inverse().map(|i| i.residue()));
			} else {
				assert!(xi.inverse().is_none());
			}

			let pow = x.pow(&ar);
			assert_eq!(to_ubig(&pow.into_repr()), xi.pow(&ai).residue());
			let table = WindowExpBase::new(x, Fp::one(&field), window);
			assert_eq!(table.exponentiate(&ar), pow);
		}
	} } }

	match a.len() / 8 {
		1 => test!(1),
		2 => test!(2),
		3 => test!(3),
		4 => test!(4),
		6 => test!(6),
		8 => test!(8),
		_ => {},
	}
}
