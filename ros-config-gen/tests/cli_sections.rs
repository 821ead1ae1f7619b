use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

const NETWORKS: &str = r#"
[subnets.base_networks.split]
name = "Split"
subnet = "192.168.10.0/24"

[subnets.base_networks.domestic]
name = ""
subnet = "192.168.20.0/24"
"#;

#[test]
fn sections_lists_generated_sections() {
    let dir = tempdir().expect("tempdir");
    let input = dir.path().join("router.toml");
    fs::write(&input, NETWORKS).expect("write input");

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("ros-config-gen"));
    cmd.env("NO_COLOR", "1")
        .arg("sections")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("/interface bridge [interfaces] 2 commands"))
        .stdout(predicate::str::contains("/ip firewall mangle [firewall]"))
        .stdout(predicate::str::contains("sections,"));
}

#[test]
fn sections_json_outputs_structured_payload() {
    let dir = tempdir().expect("tempdir");
    let input = dir.path().join("router.toml");
    fs::write(&input, NETWORKS).expect("write input");

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("ros-config-gen"));
    cmd.arg("sections")
        .arg(&input)
        .arg("--format")
        .arg("json")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"key\": \"/routing table\""))
        .stdout(predicate::str::contains("\"group\": \"routing\""));
}

#[test]
fn sections_reports_missing_file() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("ros-config-gen"));
    cmd.arg("sections")
        .arg("does-not-exist.toml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load does-not-exist.toml"));
}
