//! CLI entry point for licguard.
//!
//! This module is intentionally thin: it handles argument parsing, logging setup, I/O, and exit
//! codes. All business logic lives in the `licguard-app` crate.

mod logging;

use std::fs::File;
use std::io::{BufWriter, Write};

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Args, Parser, Subcommand};
use licguard_app::{
    CheckInput, ExplainOutput, format_explanation, format_list, format_not_found,
    parse_report_json, prepare_check, render_annotations, render_markdown, run_explain, run_list,
    runtime_error_report, serialize_report, to_renderable, verdict_exit_code,
};
use licguard_settings::{ConfigFormat, Overrides};

#[derive(Parser, Debug)]
#[command(
    name = "licguard",
    version,
    disable_version_flag = true,
    about = "License policy guard for third-party dependencies"
)]
struct Cli {
    /// Print version.
    #[arg(short = 'v', long, action = clap::ArgAction::Version)]
    version: Option<bool>,

    /// Path to the license policy (TOML, or YAML for .yml/.yaml).
    #[arg(long, global = true, default_value = ".licguard.toml")]
    config: Utf8PathBuf,

    /// License inventory JSON produced by the license detector.
    #[arg(long, global = true, default_value = "licenses.json")]
    inventory: Utf8PathBuf,

    /// Quiet mode: only log errors, not accepted packages.
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored log output.
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List every dependency's detected license.
    #[command(visible_alias = "ls")]
    List,

    /// Check licenses against the policy and write artifacts.
    #[command(visible_alias = "chk")]
    Check(CheckArgs),

    /// Render markdown from an existing JSON report.
    Md {
        /// Path to the JSON report file.
        #[arg(long, default_value = "artifacts/licguard/report.json")]
        report: Utf8PathBuf,

        /// Where to write the Markdown output (if not specified, prints to stdout).
        #[arg(long, short)]
        output: Option<Utf8PathBuf>,
    },

    /// Render GitHub Actions annotations from an existing JSON report.
    Annotations {
        /// Path to the JSON report file.
        #[arg(long, default_value = "artifacts/licguard/report.json")]
        report: Utf8PathBuf,

        /// Maximum number of annotations to emit.
        #[arg(long, default_value = "10")]
        max: usize,
    },

    /// Explain a check_id or code with remediation guidance.
    Explain {
        /// The check_id (e.g., "license.policy") or code (e.g., "denied_license") to explain.
        identifier: String,
    },
}

#[derive(Args, Debug)]
struct CheckArgs {
    /// Policy file for this check (overrides --config).
    #[arg(short = 'f', long)]
    file: Option<Utf8PathBuf>,

    /// Write an attribution report of all licenses found.
    #[arg(short = 'r', long)]
    report_out: Option<Utf8PathBuf>,

    /// Write the JSON report.
    #[arg(long)]
    report_json: Option<Utf8PathBuf>,

    /// Extra exception (exact id or `prefix/...`), may be repeated.
    #[arg(long = "exception", value_name = "ID")]
    exceptions: Vec<String>,

    /// Write a Markdown report alongside the JSON.
    #[arg(long)]
    write_markdown: bool,

    /// Where to write the Markdown report (if enabled).
    #[arg(long, default_value = "artifacts/licguard/comment.md")]
    markdown_out: Utf8PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(logging::LogOptions {
        quiet: cli.quiet,
        no_color: cli.no_color,
    });

    match &cli.cmd {
        Commands::List => cmd_list(&cli.inventory),
        Commands::Check(args) => cmd_check(&cli, args),
        Commands::Md { report, output } => cmd_md(report, output.as_deref()),
        Commands::Annotations { report, max } => cmd_annotations(report, *max),
        Commands::Explain { identifier } => cmd_explain(identifier),
    }
}

fn cmd_list(inventory: &Utf8Path) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(inventory)
        .with_context(|| format!("read license inventory: {inventory}"))?;
    let output = run_list(&text)?;
    print!("{}", format_list(&output));
    Ok(())
}

fn cmd_check(cli: &Cli, args: &CheckArgs) -> anyhow::Result<()> {
    let result = (|| -> anyhow::Result<i32> {
        // Unlike `list`, a check without a policy file is an error.
        let config_path = args.file.as_ref().unwrap_or(&cli.config);
        let config_text = std::fs::read_to_string(config_path)
            .with_context(|| format!("can't read config file: {config_path}"))?;
        let inventory_text = std::fs::read_to_string(&cli.inventory)
            .with_context(|| format!("read license inventory: {}", cli.inventory))?;

        let input = CheckInput {
            config_text: &config_text,
            config_format: ConfigFormat::from_path(config_path.as_str()),
            config_source: Some(config_path.as_str()),
            inventory_text: &inventory_text,
            overrides: Overrides {
                exceptions: args.exceptions.clone(),
            },
            attribution_path: args.report_out.as_deref(),
        };
        let prepared = prepare_check(input)?;

        // The attribution file is only truncated once the policy and inventory are valid.
        let mut attribution = match &args.report_out {
            Some(path) => Some(create_file(path).context("create attribution report")?),
            None => None,
        };
        let output = prepared.run(attribution.as_mut().map(|w| w as &mut dyn Write))?;

        if let Some(path) = &args.report_json {
            write_report_file(path, &serialize_report(&output.report)?)
                .context("write report json")?;
        }

        if args.write_markdown {
            let md = render_markdown(&to_renderable(&output.report));
            write_text_file(&args.markdown_out, &md).context("write markdown")?;
        }

        let violations: Vec<&str> = output
            .audit
            .violations()
            .map(|v| v.dependency.as_str())
            .collect();
        if !violations.is_empty() {
            tracing::error!("non-approved licenses found: {}", violations.join(", "));
        }

        Ok(verdict_exit_code(output.report.verdict))
    })();

    match result {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
            Ok(())
        }
        Err(err) => {
            if let Some(path) = &args.report_json {
                let report = runtime_error_report(&format!("{err:#}"));
                if let Ok(bytes) = serialize_report(&report) {
                    let _ = write_report_file(path, &bytes);
                }
            }
            eprintln!("licguard error: {err:#}");
            std::process::exit(1);
        }
    }
}

fn ensure_parent(path: &Utf8Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_str().is_empty()
    {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {parent}"))?;
    }
    Ok(())
}

fn create_file(path: &Utf8Path) -> anyhow::Result<BufWriter<File>> {
    ensure_parent(path)?;
    let file = File::create(path).with_context(|| format!("create file: {path}"))?;
    Ok(BufWriter::new(file))
}

fn write_report_file(path: &Utf8Path, data: &[u8]) -> anyhow::Result<()> {
    ensure_parent(path)?;
    std::fs::write(path, data).with_context(|| format!("write report: {path}"))?;
    Ok(())
}

fn write_text_file(path: &Utf8Path, text: &str) -> anyhow::Result<()> {
    ensure_parent(path)?;
    std::fs::write(path, text).with_context(|| format!("write text: {path}"))?;
    Ok(())
}

fn cmd_md(report_path: &Utf8Path, output: Option<&Utf8Path>) -> anyhow::Result<()> {
    let report_text = std::fs::read_to_string(report_path)
        .with_context(|| format!("read report: {report_path}"))?;
    let report = parse_report_json(&report_text)?;
    let md = render_markdown(&to_renderable(&report));

    match output {
        Some(out_path) => write_text_file(out_path, &md).context("write markdown output")?,
        None => print!("{md}"),
    }

    Ok(())
}

fn cmd_annotations(report_path: &Utf8Path, max: usize) -> anyhow::Result<()> {
    let report_text = std::fs::read_to_string(report_path)
        .with_context(|| format!("read report: {report_path}"))?;
    let report = parse_report_json(&report_text)?;

    for annotation in render_annotations(&to_renderable(&report), max) {
        println!("{annotation}");
    }

    Ok(())
}

fn cmd_explain(identifier: &str) -> anyhow::Result<()> {
    match run_explain(identifier) {
        ExplainOutput::Found(exp) => {
            print!("{}", format_explanation(&exp));
            Ok(())
        }
        ExplainOutput::NotFound {
            identifier,
            available_check_ids,
            available_codes,
        } => {
            eprint!(
                "{}",
                format_not_found(&identifier, available_check_ids, available_codes)
            );
            std::process::exit(1);
        }
    }
}
