use assert_cmd::prelude::*;
use predicates::prelude::*;

#[test]
fn test_cli_help() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = assert_cmd::cargo_bin_cmd!("stockcast");
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Usage"))
        .stdout(predicate::str::contains("dashboard"));
    Ok(())
}

#[test]
fn invalid_service_level_fails_before_any_request() {
    let mut cmd = assert_cmd::cargo_bin_cmd!("stockcast");
    // nothing listens here; validation must fail first
    cmd.args([
        "--base-url",
        "http://127.0.0.1:9",
        "optimize",
        "-p",
        "P0001",
        "--service-level",
        "120",
    ]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("service-level must be between 0 and 100"));
}

#[test]
fn bad_base_url_is_a_config_error() {
    let mut cmd = assert_cmd::cargo_bin_cmd!("stockcast");
    cmd.args(["--base-url", "ftp://example.com", "products"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load config"));
}
