// Tests for bench::run / bench::run_family:
//   - every (file, case) pair produces one report, entries outer / cases inner
//   - hidden files never reach the measurement loop
//   - an empty or missing corpus fails before anything is measured
//   - duplicate case names are rejected before the corpus is touched
//   - codec failures abort the run with phase and pair in the error
//   - TimedHost records a compress and a decompress sample per pair

use std::fs;
use std::path::Path;

use benchpress::bench::case::{gzip_cases, xz_cases};
use benchpress::bench::host::{BenchHost, Routine};
use benchpress::bench::{run, run_family, BenchConfig, BenchmarkCase, Family, TimedHost};
use benchpress::codec::Gzip;
use benchpress::{BenchError, CodecError, CorpusError, Phase};
use tempfile::TempDir;

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Runs each routine once and remembers every id it was asked to measure.
#[derive(Default)]
struct RecordingHost {
    ids: Vec<String>,
}

impl BenchHost for RecordingHost {
    fn measure(&mut self, id: &str, _bytes: u64, routine: &mut Routine<'_>) -> Result<(), CodecError> {
        self.ids.push(id.to_owned());
        routine()
    }
}

fn quiet_config(dir: &Path) -> BenchConfig {
    let mut c = BenchConfig::default();
    c.set_corpus_dir(dir).set_nb_seconds(0); // single pass
    c
}

fn corpus(files: &[(&str, &[u8])]) -> TempDir {
    let dir = TempDir::new().expect("tmp dir");
    for (name, content) in files {
        fs::write(dir.path().join(name), content).expect("write corpus file");
    }
    dir
}

fn lines(n: usize) -> Vec<u8> {
    (0..n).flat_map(|i| format!("line {i}: the same words again\n").into_bytes()).collect()
}

// ── Reports ───────────────────────────────────────────────────────────────────

#[test]
fn one_report_per_file_and_case() {
    let a = lines(500);
    let b = lines(900);
    let dir = corpus(&[("a.txt", &a[..]), ("b.txt", &b[..])]);
    let mut host = RecordingHost::default();

    let reports = run_family(&mut host, &quiet_config(dir.path()), Family::Gzip).unwrap();

    assert_eq!(reports.len(), 2 * 3);
    assert_eq!(host.ids.len(), 2 * 3 * 2);
    for chunk in reports.chunks(3) {
        assert!(chunk.iter().all(|r| r.entry == chunk[0].entry));
    }
    for report in &reports {
        let original = if report.entry == "a.txt" { a.len() } else { b.len() };
        assert_eq!(report.original_size, original);
        assert!(report.compressed_size < original, "{report:?}");
        let expected = 100.0 * report.compressed_size as f64 / original as f64;
        assert_eq!(report.ratio(), expected);
    }
}

#[test]
fn measurement_ids_pair_compress_then_decompress() {
    let dir = corpus(&[("only.log", &lines(50)[..])]);
    let mut host = RecordingHost::default();

    run(&mut host, &quiet_config(dir.path()), &xz_cases()).unwrap();

    assert_eq!(host.ids, ["only.log_compress_xz", "only.log_decompress_xz"]);
}

#[test]
fn every_family_runs_on_a_small_corpus() {
    let dir = corpus(&[("small.txt", &lines(200)[..])]);
    let config = quiet_config(dir.path());
    for family in Family::ALL {
        let mut host = TimedHost::from_config(&config);
        let reports = run_family(&mut host, &config, family).unwrap();
        assert_eq!(reports.len(), family.cases().len(), "{family}");
        assert_eq!(host.samples().len(), reports.len() * 2, "{family}");
        assert!(host.samples().iter().all(|s| s.iterations == 1));
    }
}

// ── Corpus handling ───────────────────────────────────────────────────────────

#[test]
fn hidden_files_are_not_benchmarked() {
    let dir = corpus(&[(".gitkeep", &b""[..]), (".hidden.txt", &b"secret"[..]), ("visible.txt", &b"hello"[..])]);
    let mut host = RecordingHost::default();

    let reports = run(&mut host, &quiet_config(dir.path()), &xz_cases()).unwrap();

    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].entry, "visible.txt");
    assert!(host.ids.iter().all(|id| id.starts_with("visible.txt_")));
}

#[test]
fn empty_corpus_fails_without_measuring() {
    let dir = corpus(&[(".gitkeep", &b""[..])]);
    let mut host = RecordingHost::default();

    let err = run_family(&mut host, &quiet_config(dir.path()), Family::Zstd).unwrap_err();

    assert!(matches!(err, BenchError::Corpus(CorpusError::Empty { .. })), "{err:?}");
    assert!(host.ids.is_empty());
}

#[test]
fn missing_corpus_fails_without_measuring() {
    let dir = TempDir::new().unwrap();
    let mut host = RecordingHost::default();

    let err = run_family(&mut host, &quiet_config(&dir.path().join("nope")), Family::Gzip).unwrap_err();

    assert!(matches!(err, BenchError::Corpus(CorpusError::List { .. })), "{err:?}");
    assert!(host.ids.is_empty());
}

// ── Case validation ───────────────────────────────────────────────────────────

#[test]
fn duplicate_cases_rejected_before_corpus_load() {
    let dir = TempDir::new().unwrap();
    let cases = vec![
        BenchmarkCase::new("same", Gzip::new(1)),
        BenchmarkCase::new("same", Gzip::new(9)),
    ];
    let mut host = RecordingHost::default();

    // The directory does not exist: a corpus error would mean the check ran too late.
    let err = run(&mut host, &quiet_config(&dir.path().join("nope")), &cases).unwrap_err();

    assert!(matches!(err, BenchError::DuplicateCase(ref name) if name == "same"), "{err:?}");
}

#[test]
fn invalid_label_case_still_runs_alongside_valid_ones() {
    let dir = corpus(&[("f.txt", &lines(100)[..])]);
    let cases = gzip_cases(&[1, 5, 9]);
    let mut host = RecordingHost::default();

    let reports = run(&mut host, &quiet_config(dir.path()), &cases).unwrap();

    let names: Vec<&str> = reports.iter().map(|r| r.case.as_str()).collect();
    assert_eq!(
        names,
        ["gzip level \"best speed\"", "gzip level \"invalid\"", "gzip level \"best compression\""]
    );
}

// ── Failures ──────────────────────────────────────────────────────────────────

#[test]
fn codec_init_failure_aborts_run() {
    let dir = corpus(&[("a.txt", &lines(10)[..]), ("b.txt", &lines(10)[..])]);
    let cases = gzip_cases(&[1, -2, 9]);
    let mut host = RecordingHost::default();

    let err = run(&mut host, &quiet_config(dir.path()), &cases).unwrap_err();

    assert_eq!(err.phase(), Some(Phase::Compress));
    match &err {
        BenchError::Codec { case, source: CodecError::Init(_), .. } => {
            assert_eq!(case, "gzip level \"huffman only\"");
        }
        other => panic!("expected init failure, got {other:?}"),
    }
    // Only the first case of the first file completed before the abort.
    assert_eq!(host.ids.len(), 3);
}
