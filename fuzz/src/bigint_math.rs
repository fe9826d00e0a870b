// This file is Copyright its original authors, visible in version control
// history.
//
// This file is licensed under the Apache License, Version 2.0 <LICENSE-APACHE
// or http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your option.
// You may not use this file except in accordance with one or both of these
// licenses.

//! Compares `pairing_fp`'s integer and field arithmetic against `ibig` on arbitrary inputs.

#![cfg_attr(feature = "libfuzzer_fuzz", no_main)]

#[cfg(not(fuzzing))]
compile_error!("Fuzz targets need cfg=fuzzing");

extern crate pairing_fp;
use pairing_fp::fuzz::fuzz_math;

#[cfg(feature = "afl_fuzz")]
#[macro_use] extern crate afl;
#[cfg(feature = "afl_fuzz")]
fn main() {
	fuzz!(|data| { fuzz_math(data); });
}

#[cfg(feature = "honggfuzz_fuzz")]
#[macro_use] extern crate honggfuzz;
#[cfg(feature = "honggfuzz_fuzz")]
fn main() {
	loop {
		fuzz!(|data| { fuzz_math(data); });
	}
}

#[cfg(feature = "libfuzzer_fuzz")]
#[macro_use] extern crate libfuzzer_sys;
#[cfg(feature = "libfuzzer_fuzz")]
fuzz_target!(|data: &[u8]| { fuzz_math(data); });

#[cfg(feature = "stdin_fuzz")]
fn main() {
	use std::io::Read;

	let mut data = Vec::with_capacity(1024);
	std::io::stdin().read_to_end(&mut data).unwrap();
	fuzz_math(&data);
}

/// Replays every file under `test_cases/bigint_math`, if that corpus directory exists.
#[test]
fn run_test_cases() {
	use std::fs;

	let tests = match fs::read_dir("test_cases/bigint_math") {
		Ok(tests) => tests,
		Err(_) => return,
	};
	for test in tests {
		let path = test.unwrap().path();
		let data = fs::read(&path).unwrap();
		fuzz_math(&data);
	}
}
