use std::process::Command;

fn xtask(arg: &str) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_xtask"))
        .arg(arg)
        .output()
        .expect("run xtask")
}

#[test]
fn xtask_help_runs() {
    let output = xtask("help");

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("xtask commands"));
    assert!(stderr.contains("emit-schemas"));
    assert!(!stderr.contains("validate-schemas"));
}

#[test]
fn explain_coverage_passes() {
    let output = xtask("explain-coverage");
    assert!(
        output.status.success(),
        "{}",
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn print_schema_ids_lists_report_and_config() {
    let output = xtask("print-schema-ids");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("licguard.report.v1"));
    assert!(stdout.contains("licguard.config.v1"));
}

#[test]
fn unknown_command_fails() {
    assert!(!xtask("no-such-task").status.success());
}
