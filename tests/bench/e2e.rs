// End-to-end: a corpus holding one 10 MiB file of repeating text, benchmarked
// with the fastest zstd preset through the same path the binary uses.

use std::fs;

use benchpress::bench::case::zstd_cases;
use benchpress::bench::config::MB;
use benchpress::bench::{run, BenchConfig, TimedHost};
use benchpress::codec::zstd::SPEED_FASTEST;
use benchpress::codec::{compress_once, decompress_once};
use tempfile::TempDir;

/// Exactly `size` bytes of lorem-ipsum text.
fn synthetic_text(size: usize) -> Vec<u8> {
    const LOREM: &[u8] = b"Lorem ipsum dolor sit amet, consectetur adipiscing elit, \
        sed do eiusmod tempor incididunt ut labore et dolore magna aliqua. ";
    LOREM.iter().copied().cycle().take(size).collect()
}

#[test]
fn ten_mib_text_fastest_zstd() {
    let data = synthetic_text(10 * MB);
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("lorem.txt"), &data).unwrap();

    let mut config = BenchConfig::default();
    config.set_corpus_dir(dir.path()).set_nb_seconds(0);
    let mut host = TimedHost::from_config(&config);
    let cases = zstd_cases(&[SPEED_FASTEST]);

    let reports = run(&mut host, &config, &cases).unwrap();

    assert_eq!(reports.len(), 1);
    let report = &reports[0];
    assert_eq!(report.entry, "lorem.txt");
    assert_eq!(report.case, "zstd level \"fastest\"");
    assert_eq!(report.original_size, 10 * MB);
    assert!(report.compressed_size < report.original_size);
    assert!(report.ratio() < 100.0);

    let ids: Vec<&str> = host.samples().iter().map(|s| s.id.as_str()).collect();
    assert_eq!(
        ids,
        ["lorem.txt_compress_zstd level \"fastest\"", "lorem.txt_decompress_zstd level \"fastest\""]
    );
    assert!(host.samples().iter().all(|s| s.bytes == (10 * MB) as u64));

    let codec = cases[0].codec();
    let compressed = compress_once(codec, &data).unwrap();
    assert_eq!(compressed.len(), report.compressed_size);
    let restored = decompress_once(codec, &compressed).unwrap();
    assert_eq!(restored.len(), data.len());
    assert!(restored == data, "10 MiB roundtrip mismatch");
}
