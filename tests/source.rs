use std::fs;
use std::path::PathBuf;

use resdecode::{
    CompressionHeader, CompressionType, DecodedSource, Endianness, FileMagic, ResourceNode,
    SourceError,
};
use tempfile::TempDir;

// --- Helpers ---

/// Writes `bytes` to a fresh file inside `dir`.
fn write_file(dir: &TempDir, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, bytes).expect("write temp file");
    path
}

/// "bresbres" plus a big-endian byte order mark, LZ77 compressed.
fn compressed_bres() -> Vec<u8> {
    // Control 0b0000_1000: four literals, length 4 at distance 4, two literals.
    let mut data = CompressionHeader::new(CompressionType::Lz77, 10).to_bytes();
    data.extend_from_slice(&[0x08, b'b', b'r', b'e', b's', 0x10, 0x02, 0xFE, 0xFF]);
    data
}

// --- Tests ---

#[test]
fn t01_compressed_file_is_expanded() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "fighter.pac", &compressed_bres());

    let source = DecodedSource::from_path(&path).unwrap();
    assert!(source.is_decompressed());
    assert_eq!(source.path(), Some(path.as_path()));
    assert_eq!(source.as_bytes(), b"bresbres\xFE\xFF");
    assert_eq!(source.tag(), "bres");
    assert_eq!(source.magic(), Some(FileMagic::new("bres")));
    assert_eq!(source.source().read_u16(8, Endianness::Big), Ok(0xFEFF));
    assert_eq!(source.original().capacity(), compressed_bres().len());
}

#[test]
fn t02_uncompressed_file_is_exposed_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let raw = b"RSAR\xFE\xFF\x01\x04";
    let path = write_file(&dir, "sound.brsar", raw);

    let source = DecodedSource::from_path(&path).unwrap();
    assert!(!source.is_decompressed());
    assert!(source.compression_header().is_none());
    assert_eq!(source.as_bytes(), raw);
    assert_eq!(source.tag(), "RSAR");
}

#[test]
fn t03_corrupt_file_falls_back_to_raw_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let mut data = CompressionHeader::new(CompressionType::ExtendedLz77, 64).to_bytes();
    data.extend_from_slice(&[0x80, 0x20, 0x00]);
    let path = write_file(&dir, "broken.pac", &data);

    let source = DecodedSource::from_path(&path).unwrap();
    assert!(!source.is_decompressed());
    assert_eq!(
        source.compression_header().map(CompressionHeader::decoded_size),
        Some(64)
    );
    assert_eq!(source.as_bytes(), &data[..]);
    assert_eq!(source.len(), data.len());
}

#[test]
fn t04_empty_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "empty.bin", b"");

    let source = DecodedSource::from_path(&path).unwrap();
    assert!(source.is_empty());
    assert_eq!(source.tag(), "");
}

#[test]
fn t05_missing_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.pac");

    match DecodedSource::from_path(&path) {
        Err(SourceError::Io { path: p, source }) => {
            assert_eq!(p, path);
            assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
        }
        other => panic!("expected an I/O error, got {other:?}"),
    }
}

#[test]
fn t06_oversized_declaration_falls_back() {
    // Declares 4 GiB - 1 bytes with an almost empty body.
    let data = [0x10, 0x00, 0x00, 0x00, 0xFF, 0xFF, 0xFF, 0xFF, 0x00, b'a'];
    let source = DecodedSource::from_bytes(&data[..]);
    assert!(!source.is_decompressed());
    assert_eq!(source.as_bytes(), &data[..]);
}

#[test]
fn t07_resource_node_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "common.pac", &compressed_bres());

    let node = ResourceNode::open(&path).unwrap();
    assert_eq!(node.name(), "common.pac");
    assert!(node.is_compressed());
    assert_eq!(node.tag(), "bres");
    assert_eq!(node.data().capacity(), 10);
    assert!(node.source().is_decompressed());
}
