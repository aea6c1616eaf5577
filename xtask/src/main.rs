//! Developer tasks (schema generation, fixture conformance).
//!
//! Keeping this separate avoids bloating the end-user CLI.

use anyhow::{Context, bail};
use licguard_test_util::normalize_nondeterministic;
use schemars::schema_for;
use std::fs;
use std::path::{Path, PathBuf};

/// Get the project root (parent of xtask directory).
fn project_root() -> anyhow::Result<PathBuf> {
    let manifest_dir = match std::env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => std::env::current_dir().context("determine current directory")?,
    };

    if manifest_dir.ends_with("xtask") {
        manifest_dir
            .parent()
            .map(Path::to_path_buf)
            .context("xtask has no parent")
    } else {
        Ok(manifest_dir)
    }
}

fn schemas_dir() -> anyhow::Result<PathBuf> {
    Ok(project_root()?.join("schemas"))
}

/// Schema definition with its target filename.
struct SchemaSpec {
    filename: &'static str,
    generate: fn() -> schemars::Schema,
}

fn generate_report_schema() -> schemars::Schema {
    schema_for!(licguard_types::LicguardReportV1)
}

fn generate_config_schema() -> schemars::Schema {
    schema_for!(licguard_settings::LicguardConfigV1)
}

fn schema_specs() -> Vec<SchemaSpec> {
    vec![
        SchemaSpec {
            filename: "licguard.report.v1.json",
            generate: generate_report_schema,
        },
        SchemaSpec {
            filename: "licguard.config.v1.json",
            generate: generate_config_schema,
        },
    ]
}

/// Serialize a schema to pretty-printed JSON with trailing newline.
fn serialize_schema(schema: &schemars::Schema) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(schema).context("Failed to serialize schema")?;
    json.push('\n');
    Ok(json)
}

fn emit_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir()?;
    fs::create_dir_all(&dir).context("Failed to create schemas directory")?;

    for spec in schema_specs() {
        let json = serialize_schema(&(spec.generate)())?;
        let path = dir.join(spec.filename);

        fs::write(&path, &json)
            .with_context(|| format!("Failed to write schema to {}", path.display()))?;

        println!("Wrote {}", path.display());
    }

    println!("\nSchemas emitted successfully.");
    Ok(())
}

fn print_help() {
    eprintln!("xtask commands:");
    eprintln!("  help              Show this message");
    eprintln!("  emit-schemas      Generate JSON schemas from Rust types to schemas/");
    eprintln!("  print-schema-ids  Print known schema IDs");
    eprintln!("  conform           Run licguard on tests/fixtures and validate reports");
    eprintln!("  explain-coverage  Validate all check IDs and codes have explanations");
}

fn fixture_config(fixture_dir: &Path) -> &'static str {
    if fixture_dir.join(".licguard.yml").exists() {
        ".licguard.yml"
    } else {
        ".licguard.toml"
    }
}

/// Run the built licguard binary on every fixture, validate each report against the report
/// schema, and compare it to the fixture's golden file.
fn conform() -> anyhow::Result<()> {
    let root = project_root()?;
    let schema_value = serde_json::to_value(generate_report_schema())
        .context("Failed to serialize report schema")?;
    let compiled = jsonschema::draft202012::new(&schema_value)
        .map_err(|e| anyhow::anyhow!("Failed to compile schema: {e}"))?;
    println!("✓ licguard.report.v1 schema compiles");

    let licguard_bin = root.join("target").join("debug").join("licguard");
    #[cfg(target_os = "windows")]
    let licguard_bin = licguard_bin.with_extension("exe");

    if !licguard_bin.exists() {
        bail!(
            "licguard binary not found at {}.\n\
            Run `cargo build -p licguard-cli` first.",
            licguard_bin.display()
        );
    }

    let fixtures_dir = root.join("tests").join("fixtures");
    let mut fixture_count = 0;
    let mut errors = Vec::new();

    for entry in fs::read_dir(&fixtures_dir).context("Failed to read tests/fixtures/")? {
        let fixture_dir = entry?.path();
        if !fixture_dir.join("licenses.json").exists() {
            continue;
        }
        let fixture_name = fixture_dir
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();

        let temp_dir = tempfile::tempdir().context("Failed to create temp dir")?;
        let report_out = temp_dir.path().join("report.json");

        let output = std::process::Command::new(&licguard_bin)
            .current_dir(&fixture_dir)
            .args(["--quiet", "--config", fixture_config(&fixture_dir), "check"])
            .arg("--report-json")
            .arg(&report_out)
            .output()
            .with_context(|| format!("Failed to run licguard on fixture '{fixture_name}'"))?;

        // 0 = pass/warn, 2 = policy failure; anything else is a tool error.
        if !matches!(output.status.code(), Some(0) | Some(2)) {
            errors.push(format!(
                "fixture '{}': licguard exited with {:?}: {}",
                fixture_name,
                output.status.code(),
                String::from_utf8_lossy(&output.stderr)
            ));
            continue;
        }

        let report_content = fs::read_to_string(&report_out)
            .with_context(|| format!("fixture '{fixture_name}': no report output generated"))?;
        let report_value: serde_json::Value = serde_json::from_str(&report_content)
            .with_context(|| format!("Failed to parse report for fixture '{fixture_name}'"))?;

        for err in compiled.iter_errors(&report_value) {
            errors.push(format!("fixture '{fixture_name}': schema validation: {err}"));
        }

        let golden_path = fixture_dir.join("expected.report.json");
        if golden_path.exists() {
            let golden_value: serde_json::Value =
                serde_json::from_str(&fs::read_to_string(&golden_path)?)
                    .with_context(|| format!("Failed to parse {}", golden_path.display()))?;

            if normalize_nondeterministic(report_value) != normalize_nondeterministic(golden_value)
            {
                errors.push(format!(
                    "fixture '{fixture_name}': output differs from expected.report.json"
                ));
            } else {
                println!("  ✓ fixture '{fixture_name}' matches golden report");
            }
        } else {
            println!("  ✓ fixture '{fixture_name}' produces a valid report (no golden file)");
        }
        fixture_count += 1;
    }

    if fixture_count == 0 {
        bail!("No fixtures found in {}", fixtures_dir.display());
    }

    if !errors.is_empty() {
        eprintln!("\nConformance errors:");
        for err in &errors {
            eprintln!("  - {err}");
        }
        bail!("Conformance validation failed with {} errors", errors.len());
    }

    println!("\n✓ All {fixture_count} fixtures pass conformance checks!");
    Ok(())
}

/// Validate that all check IDs and codes have explanations.
fn explain_coverage() -> anyhow::Result<()> {
    use licguard_types::explain;

    let check_ids = explain::all_check_ids();
    let codes = explain::all_codes();
    let mut errors = Vec::new();

    for (kind, id) in check_ids
        .iter()
        .map(|id| ("Check ID", id))
        .chain(codes.iter().map(|code| ("Code", code)))
    {
        match explain::lookup_explanation(id) {
            Some(exp) => {
                for (field, value) in [
                    ("title", exp.title),
                    ("description", exp.description),
                    ("remediation", exp.remediation),
                ] {
                    if value.is_empty() {
                        errors.push(format!("{kind} '{id}' has empty {field}"));
                    }
                }
            }
            None => errors.push(format!("{kind} '{id}' has no explanation")),
        }
    }

    if errors.is_empty() {
        println!("✓ {} check IDs have explanations", check_ids.len());
        println!("✓ {} codes have explanations", codes.len());
        println!("\n✓ All explain coverage checks passed!");
        Ok(())
    } else {
        for error in &errors {
            eprintln!("  - {error}");
        }
        bail!(
            "Explain coverage validation failed with {} errors",
            errors.len()
        )
    }
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let cmd = args.get(1).map(|s| s.as_str()).unwrap_or("help");

    match cmd {
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        "emit-schemas" => emit_schemas(),
        "conform" => conform(),
        "explain-coverage" => explain_coverage(),
        "print-schema-ids" => {
            println!("{}", licguard_types::SCHEMA_REPORT_V1);
            println!("{}", licguard_settings::CONFIG_SCHEMA_V1);
            Ok(())
        }
        other => bail!("unknown xtask command: {other}\n\nRun `cargo xtask help` for usage."),
    }
    .context("xtask failed")
}
