//! Preflight tests: the gate reports every derived value and mutates nothing

mod common;

use assert_cmd::Command;
use predicates::prelude::*;

fn msipack_cmd() -> Command {
    let mut cmd = Command::cargo_bin("msipack").unwrap();
    // Always ignore any developer MSIPACK_CONFIG overrides during tests
    cmd.env_remove("MSIPACK_CONFIG");
    cmd
}

#[test]
fn test_preflight_reports_derived_values() {
    let site = common::TestSite::new();
    let payload = site.make_payload("1.2.3", "chrome.msi", "{ABCD-1234}");

    msipack_cmd()
        .args([
            "build",
            payload.to_str().unwrap(),
            "--preflight",
            "--config",
            site.config_path().to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("1.2.3"))
        .stdout(predicate::str::contains("chrome.msi"))
        .stdout(predicate::str::contains("{ABCD-1234}"))
        .stdout(predicate::str::contains("[PREFLIGHT]"))
        .stdout(predicate::str::contains("no changes made"));
}

#[test]
fn test_preflight_does_not_create_destination() {
    let site = common::TestSite::new();
    let payload = site.make_payload("1.2.3", "chrome.msi", "{ABCD-1234}");

    msipack_cmd()
        .args([
            "build",
            payload.to_str().unwrap(),
            "--preflight",
            "--config",
            site.config_path().to_str().unwrap(),
        ])
        .assert()
        .success();

    assert!(!site.destination_root().exists());
}

#[test]
fn test_preflight_leaves_existing_destination_identical() {
    let site = common::TestSite::new();
    let payload = site.make_payload("1.2.3", "chrome.msi", "{ABCD-1234}");

    // Pre-existing destination contents from an earlier run
    let dest = site.destination_root().join("chrome").join("1.2.3");
    std::fs::create_dir_all(&dest).unwrap();
    std::fs::write(dest.join("leftover.txt"), "from a previous run\n").unwrap();

    let before = common::snapshot_tree(&site.destination_root());

    for _ in 0..2 {
        msipack_cmd()
            .args([
                "build",
                payload.to_str().unwrap(),
                "--preflight",
                "--config",
                site.config_path().to_str().unwrap(),
            ])
            .assert()
            .success();
    }

    let after = common::snapshot_tree(&site.destination_root());
    assert_eq!(before, after);
    assert_eq!(
        site.read_file("packages/chrome/1.2.3/leftover.txt"),
        "from a previous run\n"
    );
}

#[test]
fn test_preflight_repeated_output_identical() {
    let site = common::TestSite::new();
    let payload = site.make_payload("2.0", "app.msi", "{AAAA-2222}");

    let run = || {
        msipack_cmd()
            .args([
                "build",
                payload.to_str().unwrap(),
                "--preflight",
                "--config",
                site.config_path().to_str().unwrap(),
            ])
            .output()
            .unwrap()
    };

    let first = run();
    let second = run();
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
}
