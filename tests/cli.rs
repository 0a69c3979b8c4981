use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn prov_perf() -> Command {
    Command::cargo_bin("prov_perf").unwrap()
}

#[test]
fn no_arguments_exits_with_usage() {
    prov_perf()
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn clean_writes_running_max() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("ts.txt");
    let output = dir.path().join("ts-clean.txt");
    fs::write(&input, "1\n2\n4\n9\n5\n5\n7\n12\n").unwrap();

    prov_perf()
        .arg("clean")
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "1.0\n2.0\n4.0\n9.0\n9.0\n9.0\n9.0\n12.0\n"
    );
}

#[test]
fn clean_fails_whole_on_dirty_value() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("ts.txt");
    let output = dir.path().join("ts-clean.txt");
    fs::write(&input, "1\n2\nn/a\n4\n").unwrap();

    prov_perf()
        .args(["clean", "--input"])
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("dirty value"));

    assert!(!output.exists());
}

#[test]
fn clean_requires_both_paths() {
    prov_perf().args(["clean", "-i", "ts.txt"]).assert().failure();
}

#[test]
fn select_prints_summary_and_appends() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.csv"), "mean,0.1,,,,,0.9,0.8,0.85,0.87\n").unwrap();
    let config = dir.path().join("sweeps.json");
    fs::write(
        &config,
        r#"{"sweeps": [{"name": "ttl", "points": [{"value": "60", "input": "a.csv"}]}]}"#,
    )
    .unwrap();

    prov_perf()
        .arg("select")
        .arg("--data-dir")
        .arg(dir.path())
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("ttl").and(predicate::str::contains("0.8700")));

    assert_eq!(
        fs::read_to_string(dir.path().join("ttl-f-measure-perf.txt")).unwrap(),
        "0.87\n"
    );
}

#[test]
fn cpu_mem_appends_both_series() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("ps.log");
    let mem = dir.path().join("mem.txt");
    let cpu = dir.path().join("cpu.txt");
    fs::write(&input, "%CPU %MEM\n5.0 25.0\nPSR %CPU\n0 4.0\n1 4.0\n%CPU %MEM\n5.0 25.0\n").unwrap();
    fs::write(&cpu, "7.0\n").unwrap();

    prov_perf()
        .arg("cpu-mem")
        .arg(&input)
        .arg(&mem)
        .arg(&cpu)
        .assert()
        .success();

    assert_eq!(fs::read_to_string(&mem).unwrap(), "1024.0\n1024.0\n");
    assert_eq!(fs::read_to_string(&cpu).unwrap(), "7.0\n0.0\n2.0\n");
}

#[test]
fn average_prints_mean() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("cpu.txt");
    fs::write(&input, "1.0\n2.0\n6.0\n").unwrap();

    prov_perf()
        .arg("average")
        .arg(&input)
        .assert()
        .success()
        .stdout("3.0\n");
}

#[test]
fn average_of_empty_series_fails() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("cpu.txt");
    fs::write(&input, "").unwrap();

    prov_perf()
        .arg("average")
        .arg(&input)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("holds no values"));
}
