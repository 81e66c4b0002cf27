#![no_main]

//! Raw input fuzzer for the text protocol.
//!
//! Arbitrary bytes are fed to the bot loop as if they came from the host.
//! Malformed input must surface as an error, never as a panic.

use ghostcell::{Strategy, run};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut output = Vec::new();
    if run(data, &mut output, Strategy::default()).is_ok() {
        // Every turn that was played wrote exactly one line.
        assert!(output.is_empty() || output.ends_with(b"\n"));
    }
});
