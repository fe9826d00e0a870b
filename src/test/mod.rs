//! Randomized tests of the integer and field arithmetic against `ibig`, over well-known
//! pairing-curve moduli.

use crate::field::PrimeField;
use crate::fp::Fp;
use crate::repr::Repr;
use crate::window::WindowExpBase;

use alloc::vec::Vec;

use hex_conservative::FromHex;
use ibig::modular::ModuloRing;
use ibig::UBig;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const BN254_R: [u8; 32] = hex_lit::hex!("30644e72e131a029b85045b68181585d2833e84879b9709143e1f593f0000001");
const BN254_Q: [u8; 32] = hex_lit::hex!("30644e72e131a029b85045b68181585d97816a916871ca8d3c208c16d87cfd47");
const BLS12_381_P: [u8; 48] = hex_lit::hex!("1a0111ea397fe69a4b1ba7b6434bacd764774b84f38512bf6730d2a0f6b0f6241eabfffeb153ffffb9feffffffffaaab");
const CURVE25519_P: [u8; 32] = hex_lit::hex!("7fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffed");
const P256_P: [u8; 32] = hex_lit::hex!("ffffffff00000001000000000000000000000000ffffffffffffffffffffffff");

fn to_ubig<const N: usize>(r: &Repr<N>) -> UBig {
	let mut bytes = Vec::new();
	r.write_be_bytes(N * 8, &mut bytes);
	UBig::from_be_bytes(&bytes)
}

fn from_ubig<const N: usize>(v: &UBig) -> Repr<N> {
	Repr::from_be_bytes(&v.to_be_bytes()).unwrap()
}

/// A random value whose limbs favor the carry-heavy patterns (all-zero, all-one, lone top bit).
fn random_repr<const N: usize>(rng: &mut StdRng) -> Repr<N> {
	let mut limbs = [0; N];
	for limb in limbs.iter_mut() {
		*limb = match rng.gen_range(0..6) {
			0 => 0,
			1 => u64::MAX,
			2 => 1 << 63,
			_ => rng.gen(),
		};
	}
	Repr::from_limbs(limbs)
}

fn random_below<const N: usize>(rng: &mut StdRng, modulus: &Repr<N>) -> Repr<N> {
	from_ubig(&(to_ubig(&random_repr::<N>(rng)) % to_ubig(modulus)))
}

macro_rules! int_math_tests { ($name: ident, $n: expr) => {
	#[test]
	fn $name() {
		let mut rng = StdRng::seed_from_u64($n);
		for _ in 0..2000 {
			let a = random_repr::<$n>(&mut rng);
			let b = random_repr::<$n>(&mut rng);
			let (ai, bi) = (to_ubig(&a), to_ubig(&b));

			let (sum, carry) = a.add(&b);
			assert_eq!(to_ubig(&sum) + (UBig::from(carry) << (64 * $n)), ai.clone() + bi.clone());

			let prod: Repr<{ $n * 2 }> = a.mul(&b);
			assert_eq!(to_ubig(&prod), ai.clone() * bi.clone());

			let (doubled, top) = a.shift_left(1);
			assert_eq!(to_ubig(&doubled) + (UBig::from(top) << (64 * $n)), ai.clone() << 1);

			assert_eq!(a.cmp(&b), ai.cmp(&bi));

			if !b.is_zero() {
				let (q, r) = a.div_rem(&b);
				assert_eq!(to_ubig(&q), ai.clone() / bi.clone());
				assert_eq!(to_ubig(&r), ai.clone() % bi.clone());

				// A double-width dividend exercises multi-limb quotients.
				let (q, r) = prod.div_rem(&b);
				assert_eq!(q.resize::<$n>(), a);
				assert!(r.is_zero());
			}

			let divisor = Repr::<1>::from_u64(b.limbs()[0] | 1);
			let (q, r) = a.div_rem(&divisor);
			assert_eq!(to_ubig(&q), ai.clone() / to_ubig(&divisor));
			assert_eq!(to_ubig(&r), ai.clone() % to_ubig(&divisor));
		}
	}
} }

int_math_tests!(int_math_1, 1);
int_math_tests!(int_math_2, 2);
int_math_tests!(int_math_4, 4);
int_math_tests!(int_math_6, 6);
int_math_tests!(int_math_8, 8);

fn check_field<const N: usize>(modulus_bytes: &[u8], seed: u64) {
	let mut rng = StdRng::seed_from_u64(seed);
	let modulus = Repr::<N>::from_be_bytes(modulus_bytes).unwrap();
	let field = PrimeField::new(modulus).unwrap();
	let mi = to_ubig(&modulus);
	let ring = ModuloRing::new(&mi);

	// R^2 = (2^(64N))^2 mod m
	assert_eq!(to_ubig(field.mont_r2()), (UBig::from(1u8) << (128 * N)) % mi.clone());
	assert_eq!(to_ubig(field.mont_r()), (UBig::from(1u8) << (64 * N)) % mi.clone());

	let one = Fp::one(&field);
	let mut edge_values = Vec::new();
	edge_values.push(Repr::ZERO);
	edge_values.push(Repr::one());
	edge_values.push(modulus.sub_ignore_carry(&Repr::one()));
	edge_values.push(modulus.div2());
	for _ in 0..200 {
		edge_values.push(random_below(&mut rng, &modulus));
	}

	for pair in edge_values.windows(2) {
		let (a, b) = (pair[0], pair[1]);
		let (ai, bi) = (ring.from(to_ubig(&a)), ring.from(to_ubig(&b)));
		let x = Fp::from_repr(a, &field).unwrap();
		let y = Fp::from_repr(b, &field).unwrap();
		assert_eq!(x.into_repr(), a);

		let mut res = x;
		res.add(&y);
		assert_eq!(to_ubig(&res.into_repr()), (ai.clone() + bi.clone()).residue());
		let mut res = x;
		res.sub(&y);
		assert_eq!(to_ubig(&res.into_repr()), (ai.clone() - bi.clone()).residue());
		let mut res = x;
		res.mul(&y);
		assert_eq!(to_ubig(&res.into_repr()), (ai.clone() * bi.clone()).residue());
		let mut sq = x;
		sq.square();
		let mut prod = x;
		prod.mul(&x);
		assert_eq!(sq, prod);
		let mut res = x;
		res.mul2();
		assert_eq!(to_ubig(&res.into_repr()), (ai.clone() + ai.clone()).residue());
		let mut res = x;
		res.negate();
		res.add(&x);
		assert!(res.is_zero());

		match x.inverse() {
			None => assert!(x.is_zero()),
			Some(inv) => {
				let mut check = inv;
				check.mul(&x);
				assert_eq!(check, one);
				assert_eq!(Some(to_ubig(&inv.into_repr())), ai.inverse().map(|i| i.residue()));
			},
		}

		let e = random_repr::<2>(&mut rng);
		let pow = x.pow(&e);
		assert_eq!(to_ubig(&pow.into_repr()), ai.pow(&to_ubig(&e)).residue());
		let table = WindowExpBase::new(x, one, (seed as usize % 6) + 1);
		assert_eq!(table.exponentiate(&e), pow);
	}

	// Fermat: a^(m - 1) = 1 for every non-zero a.
	let order = modulus.sub_ignore_carry(&Repr::one());
	let x = Fp::from_repr(random_below(&mut rng, &modulus), &field).unwrap();
	if !x.is_zero() {
		assert_eq!(x.pow(&order), one);
	}
}

#[test]
fn bn254_scalar_field() { check_field::<4>(&BN254_R, 1); }

#[test]
fn bn254_base_field() { check_field::<4>(&BN254_Q, 2); }

#[test]
fn bls12_381_base_field() { check_field::<6>(&BLS12_381_P, 3); }

#[test]
fn bls12_381_with_slack_limb() { check_field::<7>(&BLS12_381_P, 4); }

#[test]
fn curve25519_field() { check_field::<4>(&CURVE25519_P, 5); }

#[test]
fn p256_full_width_field() { check_field::<4>(&P256_P, 6); }

#[test]
fn windowed_exponentiation_all_windows() {
	let modulus = Repr::<6>::from_be_bytes(&BLS12_381_P).unwrap();
	let field = PrimeField::new(modulus).unwrap();
	let mut rng = StdRng::seed_from_u64(42);
	let base = Fp::from_repr(random_below(&mut rng, &modulus), &field).unwrap();
	let scalars = [
		Repr::<4>::ZERO,
		Repr::one(),
		Repr::from_limbs([u64::MAX; 4]),
		Repr::from_limbs([0, 0, 0, 1 << 63]),
		Repr::from_limbs([0xaaaa_aaaa_aaaa_aaaa; 4]),
		random_repr::<4>(&mut rng),
		random_repr::<4>(&mut rng),
	];
	for window in 1..=6 {
		let table = WindowExpBase::new(base, Fp::one(&field), window);
		for scalar in scalars.iter() {
			assert_eq!(table.exponentiate(scalar), base.pow(scalar), "window {} scalar {}", window, scalar);
		}
	}
}

#[test]
fn serialize_matches_encoding() {
	// The BLS12-381 generator x coordinate, as encoded by the precompile ABI (64-byte field).
	let x_bytes = Vec::from_hex("0000000000000000000000000000000017f1d3a73197d7942695638c4fa9ac0fc3688c4f9774b905a14e3a3f171bac586c55e83ff97a1aeffb3af00adb22c6bb").unwrap();
	let modulus = Repr::<6>::from_be_bytes(&BLS12_381_P).unwrap();
	let field = PrimeField::new(modulus).unwrap();
	let x = Fp::from_repr(Repr::from_be_bytes(&x_bytes).unwrap(), &field).unwrap();
	let mut out = Vec::new();
	x.serialize(64, &mut out);
	assert_eq!(out, x_bytes);
	out.clear();
	x.serialize(48, &mut out);
	assert_eq!(out, &x_bytes[16..]);
}

#[test]
fn div_all_ones_by_three_matches_ibig() {
	let u = Repr::from_limbs([u64::MAX; 2]);
	let (q, r) = u.div_rem(&Repr::<1>::from_u64(3));
	let (qi, ri) = ibig::ops::DivRem::div_rem(to_ubig(&u), &UBig::from(3u8));
	assert_eq!(to_ubig(&q), qi);
	assert_eq!(to_ubig(&r), ri);
}
