#![no_main]

use libfuzzer_sys::fuzz_target;
use resdecode::{CompressionHeader, DecodedSource, decompress};

/// Verifies that the decoder safely handles arbitrary, potentially malformed input.
///
/// # Invariant
/// `decompress` returns `Ok` with exactly `decoded_size` bytes, or `Err` with the
/// output untouched. It must never panic.
fn verify_decompression_robustness(data: &[u8]) {
    let mut output = Vec::new();
    match decompress(data, &mut output) {
        Ok(()) => {
            let header = CompressionHeader::from_bytes(data).expect("header parsed once already");
            assert_eq!(output.len(), header.decoded_size() as usize);
        }
        Err(_) => assert!(output.is_empty(), "Output modified on error"),
    }
}

/// Verifies the best-effort fallback of the decoded source.
///
/// # Invariant
/// When expansion fails the active bytes are exactly the input.
fn verify_source_fallback(data: &[u8]) {
    let source = DecodedSource::from_bytes(data);
    if !source.is_decompressed() {
        assert_eq!(source.as_bytes(), data);
    }
    let _ = source.tag();
}

fuzz_target!(|data: &[u8]| {
    verify_decompression_robustness(data);
    verify_source_fallback(data);
});
