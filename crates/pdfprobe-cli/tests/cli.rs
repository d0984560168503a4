//! Runs the `pdfprobe` binary in a scratch directory.

use std::path::Path;
use std::process::{Command, Output};

fn pdfprobe(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_pdfprobe"))
        .args(args)
        .arg("--no-color")
        .current_dir(dir)
        // Keep the user's own config out of the run.
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join(".config"))
        .env_remove("PDFPROBE_FIRST")
        .env_remove("PDFPROBE_SECOND")
        .env_remove("PDFPROBE_INPUT")
        .env_remove("PDFPROBE_OUTPUT")
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

#[test]
fn compare_different_sizes() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("a.pdf"), vec![0u8; 100]).unwrap();
    std::fs::write(dir.path().join("b.pdf"), vec![0u8; 200]).unwrap();

    let out = pdfprobe(dir.path(), &["compare", "a.pdf", "b.pdf"]);

    assert!(out.status.success());
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert!(stdout.contains("Dumped size info to content_dump.txt"));
    assert!(stdout.contains("Files are DIFFERENT size."));
    assert_eq!(
        std::fs::read_to_string(dir.path().join("content_dump.txt")).unwrap(),
        "Size 1: 100, Size 2: 200\n"
    );
}

#[test]
fn compare_identical_with_explicit_output() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("a.pdf"), b"same").unwrap();
    std::fs::write(dir.path().join("b.pdf"), b"same").unwrap();

    let out = pdfprobe(dir.path(), &["compare", "a.pdf", "b.pdf", "-o", "sizes.txt"]);

    assert!(out.status.success());
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert!(stdout.contains("Files have SAME SIZE."));
    assert!(stdout.contains("Files are IDENTICAL in content."));
    assert_eq!(
        std::fs::read_to_string(dir.path().join("sizes.txt")).unwrap(),
        "Size 1: 4, Size 2: 4\n"
    );
}

#[test]
fn compare_reads_paths_from_config_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("a.pdf"), b"abcd").unwrap();
    std::fs::write(dir.path().join("b.pdf"), b"abce").unwrap();
    std::fs::write(
        dir.path().join("probe.toml"),
        "[compare]\nfirst = \"a.pdf\"\nsecond = \"b.pdf\"\noutput = \"dump.txt\"\n",
    )
    .unwrap();

    let out = pdfprobe(dir.path(), &["--config", "probe.toml", "compare"]);

    assert!(out.status.success());
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert!(stdout.contains("Files are DIFFERENT content. (first difference at byte 3)"));
    assert!(dir.path().join("dump.txt").exists());
}

#[test]
fn compare_unwritable_summary_still_succeeds() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("a.pdf"), b"same").unwrap();
    std::fs::write(dir.path().join("b.pdf"), b"same").unwrap();

    let out = pdfprobe(
        dir.path(),
        &["compare", "a.pdf", "b.pdf", "-o", "no-such-dir/sizes.txt"],
    );

    assert!(out.status.success());
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert!(stdout.starts_with("Error writing to no-such-dir/sizes.txt: "));
    assert!(stdout.contains("Files are IDENTICAL in content."));
}

#[cfg(target_os = "linux")]
#[test]
fn compare_reads_user_config_dir() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("a.pdf"), b"abc").unwrap();
    std::fs::write(dir.path().join("b.pdf"), b"abcd").unwrap();
    let user_config = dir.path().join(".config").join("pdfprobe");
    std::fs::create_dir_all(&user_config).unwrap();
    std::fs::write(
        user_config.join("config.toml"),
        "[compare]\nfirst = \"a.pdf\"\nsecond = \"b.pdf\"\n",
    )
    .unwrap();

    let out = pdfprobe(dir.path(), &["compare"]);

    assert!(out.status.success());
    assert_eq!(
        std::fs::read_to_string(dir.path().join("content_dump.txt")).unwrap(),
        "Size 1: 3, Size 2: 4\n"
    );
}

#[test]
fn compare_missing_input_fails() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("a.pdf"), b"x").unwrap();

    let out = pdfprobe(dir.path(), &["compare", "a.pdf", "gone.pdf"]);

    assert!(!out.status.success());
    let stderr = String::from_utf8(out.stderr).unwrap();
    assert_eq!(stderr.trim_end(), "Error: file not found: gone.pdf");
}

#[test]
fn extract_non_pdf_reports_and_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("notes.pdf"), "plain text").unwrap();

    let out = pdfprobe(dir.path(), &["extract", "notes.pdf"]);

    assert!(!out.status.success());
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert!(stdout.contains("Processing: notes.pdf"));
    let stderr = String::from_utf8(out.stderr).unwrap();
    let error_line = stderr
        .lines()
        .find(|l| l.starts_with("Error: "))
        .unwrap();
    assert!(error_line.starts_with(
        "Error: Failed to dump text of notes.pdf: could not extract text from notes.pdf: "
    ));
    assert!(!stderr.contains("Caused by"));
    assert!(!dir.path().join("content_dump.txt").exists());
}

#[test]
fn extract_without_input_is_usage_error() {
    let dir = tempfile::tempdir().unwrap();

    let out = pdfprobe(dir.path(), &["extract"]);

    assert!(!out.status.success());
    assert!(String::from_utf8(out.stderr).unwrap().contains("No input PDF given"));
}
