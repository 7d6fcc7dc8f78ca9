// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Diagnostic and report printing (text or JSON).

use clap::ValueEnum;
use sg_driver::GenerationReport;
use sg_model::Diagnostic;

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

pub fn print_diagnostics(diagnostics: &[Diagnostic], format: OutputFormat) {
    match format {
        OutputFormat::Text => {
            for diagnostic in diagnostics {
                eprintln!("{diagnostic}");
            }
        }
        OutputFormat::Json => {
            match serde_json::to_string_pretty(diagnostics) {
                Ok(json) => println!("{json}"),
                Err(error) => eprintln!("failed to serialize diagnostics: {error}"),
            }
        }
    }
}

pub fn print_report(report: &GenerationReport, format: OutputFormat) {
    print_diagnostics(&report.diagnostics, format);
    match format {
        OutputFormat::Text => {
            for path in &report.written {
                println!("wrote {}", path.display());
            }
            println!(
                "{} written, {} up to date, {} skipped on errors",
                report.written.len(),
                report.skipped,
                report.failed
            );
        }
        OutputFormat::Json => {
            let summary = serde_json::json!({
                "written": report.written,
                "up_to_date": report.skipped,
                "failed": report.failed,
            });
            match serde_json::to_string_pretty(&summary) {
                Ok(json) => println!("{json}"),
                Err(error) => eprintln!("failed to serialize report: {error}"),
            }
        }
    }
}
