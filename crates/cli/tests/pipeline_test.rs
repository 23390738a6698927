use pretty_assertions::assert_eq;
use sirish::pipeline::targets_from_flags;
use sirish::{run, RunPlan};
use sirish_core::{Config, Error};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn copy_fixture(name: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("temp dir");
    let fixture = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    let path = dir.path().join(name);
    std::fs::copy(&fixture, &path).expect("copy fixture");
    (dir, path)
}

fn plan(file: PathBuf, types: &[&str]) -> RunPlan {
    let mut config = Config::default();
    config.generation.format_imports = false;
    let types: Vec<String> = types.iter().map(|s| s.to_string()).collect();
    RunPlan {
        file,
        package: Some("payments".to_string()),
        targets: targets_from_flags(&types),
        config,
    }
}

#[test]
fn test_flag_and_comment_targets_are_generated() {
    let (dir, path) = copy_fixture("payments.go");
    let summary = run(&plan(path, &["Gateway"])).expect("run");

    assert_eq!(summary.package, "payments");
    assert_eq!(summary.targets.to_string(), "[Gateway,Refunds]");
    assert!(summary.report.is_complete());
    assert_eq!(
        summary.report.written,
        vec![
            dir.path().join("Gateway.payments.sirish.go"),
            dir.path().join("Refunds.payments.sirish.go"),
        ]
    );
    assert!(!dir.path().join("Unwrapped.payments.sirish.go").exists());

    let gateway = std::fs::read_to_string(&summary.report.written[0]).expect("read");
    assert!(gateway.contains("package payments\n"));
    assert!(gateway.contains("type GatewaySirishWrapperImpl struct {"));
    assert!(gateway.contains("\"github.com/acme/payments/ledger\""));
    assert!(gateway.contains("apm.DefaultTracer().StartTransaction(\"Gateway.Ping\", w.spanType)"));
}

#[test]
fn test_transactions_can_be_disabled() {
    let (dir, path) = copy_fixture("payments.go");
    let mut plan = plan(path, &[]);
    plan.config.generation.create_tx = false;
    plan.config.generation.suffix = "traced".to_string();

    let summary = run(&plan).expect("run");
    assert_eq!(
        summary.report.written,
        vec![dir.path().join("payments.traced.go")]
    );
    let refunds = std::fs::read_to_string(&summary.report.written[0]).expect("read");
    assert!(refunds.contains("type RefundsTracedWrapperImpl struct {"));
    assert!(!refunds.contains("StartTransaction"));
}

#[test]
fn test_package_mismatch_is_not_fatal() {
    let (_dir, path) = copy_fixture("payments.go");
    let mut plan = plan(path, &["Gateway"]);
    plan.package = Some("other".to_string());
    let summary = run(&plan).expect("run");
    assert_eq!(summary.package, "payments");
}

#[test]
fn test_syntax_error_aborts_run() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("broken.go");
    std::fs::write(&path, "package broken\n\ntype Store interface {\n\tGet(\n").expect("write");

    let err = run(&plan(path, &["Store"])).expect_err("syntax error");
    assert!(matches!(err, Error::Parse { .. }));
    assert!(err.is_fatal());
    assert_eq!(std::fs::read_dir(dir.path()).expect("list").count(), 1);
}

#[test]
fn test_missing_file_aborts_run() {
    let dir = tempfile::tempdir().expect("temp dir");
    assert!(run(&plan(dir.path().join("absent.go"), &["Store"])).is_err());
}
