mod fixtures;

use fixtures::*;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs::{self, File};
use std::io::Write;
use std::process::Command;
use tempfile::tempdir;

#[test]
fn it_lists_records() {
    let d = tempdir().unwrap();
    let sample = write_sample(d.path(), "drawing.emf", &drawing_stream());

    let mut cmd = Command::new(assert_cmd::cargo_bin!("emf_dump"));
    cmd.arg(&sample);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("EMR_HEADER"))
        .stdout(predicate::str::contains("EMR_BITBLT"))
        .stdout(predicate::str::contains("EMR_EOF"));
}

#[test]
fn it_dumps_jsonl_one_record_per_line() {
    let d = tempdir().unwrap();
    let sample = write_sample(d.path(), "drawing.emf", &stream(&[line_to(1, 2)]));

    let mut cmd = Command::new(assert_cmd::cargo_bin!("emf_dump"));
    cmd.args(["-o", "jsonl", sample.to_str().unwrap()]);

    let output = cmd.output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<serde_json::Value> = stdout
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();

    assert_eq!(lines.len(), 3);
    assert_eq!(lines[1]["offset"], 88);
    assert_eq!(lines[1]["size"], 16);
    assert_eq!(lines[1]["record_type"], "LineTo");
}

#[test]
fn it_respects_directory_output() {
    let d = tempdir().unwrap();
    let f = d.as_ref().join("test.out");
    let sample = write_sample(d.path(), "drawing.emf", &drawing_stream());

    let mut cmd = Command::new(assert_cmd::cargo_bin!("emf_dump"));
    cmd.args(["-f", &f.to_string_lossy(), sample.to_str().unwrap()]);

    assert!(
        cmd.output().unwrap().stdout.is_empty(),
        "Expected output to be printed to file, but was printed to stdout"
    );
    assert!(
        !fs::read(&f).unwrap().is_empty(),
        "Expected output to be printed to file"
    )
}

#[test]
fn test_it_refuses_to_overwrite_directory() {
    let d = tempdir().unwrap();
    let sample = write_sample(d.path(), "drawing.emf", &drawing_stream());

    let mut cmd = Command::new(assert_cmd::cargo_bin!("emf_dump"));
    cmd.args(["-f", &d.path().to_string_lossy(), sample.to_str().unwrap()]);

    cmd.assert().failure().code(1);
}

#[test]
fn test_it_overwrites_file_anyways_if_passed_flag() {
    let d = tempdir().unwrap();
    let f = d.as_ref().join("test.out");

    let mut file = File::create(&f).unwrap();
    file.write_all(b"I'm a file!").unwrap();

    let sample = write_sample(d.path(), "drawing.emf", &drawing_stream());
    let mut cmd = Command::new(assert_cmd::cargo_bin!("emf_dump"));
    cmd.args([
        "-f",
        &f.to_string_lossy(),
        "--no-confirm-overwrite",
        sample.to_str().unwrap(),
    ]);

    cmd.assert().success();

    let written = fs::read_to_string(&f).unwrap();
    assert!(written.contains("EMR_POLYLINE"));
}

#[test]
fn it_validates_and_sets_exit_code() {
    let d = tempdir().unwrap();
    let good = write_sample(d.path(), "good.emf", &drawing_stream());
    let bad = write_sample(d.path(), "bad.emf", &stream(&[bit_blt_8bpp(0)]));

    let mut cmd = Command::new(assert_cmd::cargo_bin!("emf_dump"));
    cmd.args(["--validate", good.to_str().unwrap()]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("ok, 15 records"));

    let mut cmd = Command::new(assert_cmd::cargo_bin!("emf_dump"));
    cmd.args(["--validate", good.to_str().unwrap(), bad.to_str().unwrap()]);
    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("bad.emf"));
}

#[test]
fn it_treats_unhandled_records_as_errors_when_strict() {
    let d = tempdir().unwrap();
    let unhandled = RecordBuilder::new(97).u32s(&[1, 2]).build();
    let sample = write_sample(d.path(), "unhandled.emf", &stream(&[unhandled]));

    let mut cmd = Command::new(assert_cmd::cargo_bin!("emf_dump"));
    cmd.args(["--validate", sample.to_str().unwrap()]);
    cmd.assert().success().stdout(predicate::str::contains("1 diagnostics"));

    let mut cmd = Command::new(assert_cmd::cargo_bin!("emf_dump"));
    cmd.args(["--validate", "--strict", sample.to_str().unwrap()]);
    cmd.assert().failure().code(1);
}

#[test]
fn it_transcodes_to_a_file_and_back() {
    let d = tempdir().unwrap();
    let original = drawing_stream();
    let sample = write_sample(d.path(), "drawing.emf", &original);
    let foreign = d.path().join("out").join("drawing.be.emf");
    let native = d.path().join("drawing.le.emf");

    let mut cmd = Command::new(assert_cmd::cargo_bin!("emf_dump"));
    cmd.args([
        "--transcode",
        "to-foreign",
        "-f",
        &foreign.to_string_lossy(),
        sample.to_str().unwrap(),
    ]);
    cmd.assert().success();

    let converted = fs::read(&foreign).unwrap();
    assert_eq!(converted.len(), original.len());
    assert_eq!(&converted[0..4], &[0, 0, 0, 1]);

    let mut cmd = Command::new(assert_cmd::cargo_bin!("emf_dump"));
    cmd.args(["--foreign", "--validate", foreign.to_str().unwrap()]);
    cmd.assert().success();

    let mut cmd = Command::new(assert_cmd::cargo_bin!("emf_dump"));
    cmd.args([
        "--transcode",
        "to-native",
        "-f",
        &native.to_string_lossy(),
        foreign.to_str().unwrap(),
    ]);
    cmd.assert().success();

    assert_eq!(fs::read(&native).unwrap(), original);
}

#[test]
fn it_does_not_write_output_for_invalid_streams() {
    let d = tempdir().unwrap();
    let sample = write_sample(d.path(), "bad.emf", &stream(&[bit_blt_8bpp(0)]));
    let target = d.path().join("bad.be.emf");

    let mut cmd = Command::new(assert_cmd::cargo_bin!("emf_dump"));
    cmd.args([
        "--transcode",
        "to-foreign",
        "-f",
        &target.to_string_lossy(),
        sample.to_str().unwrap(),
    ]);
    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("inconsistent DIB"));

    assert!(!target.exists());
}

#[test]
fn it_supports_stdin_input_with_dash() {
    let mut cmd = assert_cmd::Command::new(assert_cmd::cargo_bin!("emf_dump"));
    cmd.args(["--validate", "-"]).write_stdin(drawing_stream());

    cmd.assert().success().stdout(predicate::str::contains("-: ok"));
}

#[test]
fn it_dumps_the_failing_record() {
    let d = tempdir().unwrap();
    let sample = write_sample(d.path(), "bad.emf", &stream(&[line_to(1, 1), bit_blt_8bpp(0)]));

    let mut cmd = Command::new(assert_cmd::cargo_bin!("emf_dump"));
    cmd.args(["--validate", "--hexdump", sample.to_str().unwrap()]);
    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("00000068: 4c 00 00 00 90 00 00 00"))
        .stderr(predicate::str::contains("00000058:").not());
}
