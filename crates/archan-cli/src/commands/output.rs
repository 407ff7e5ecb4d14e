//! Shared output formatting for analysis reports.

use anyhow::Result;
use archan_core::{AnalysisReport, CheckerResult, Report, Status};
use std::fmt::Write as _;

use crate::OutputFormat;

/// ANSI escape codes, or nothing when colors are off.
#[derive(Debug, Clone, Copy)]
struct Palette {
    red: &'static str,
    green: &'static str,
    yellow: &'static str,
    blue: &'static str,
    bold: &'static str,
    reset: &'static str,
}

impl Palette {
    const COLOR: Self = Self {
        red: "\x1b[31m",
        green: "\x1b[32m",
        yellow: "\x1b[33m",
        blue: "\x1b[34m",
        bold: "\x1b[1m",
        reset: "\x1b[0m",
    };

    const PLAIN: Self = Self {
        red: "",
        green: "",
        yellow: "",
        blue: "",
        bold: "",
        reset: "",
    };

    fn new(color: bool) -> Self {
        if color {
            Self::COLOR
        } else {
            Self::PLAIN
        }
    }

    fn status(self, result: &CheckerResult) -> &'static str {
        match result.status {
            Status::Passed => self.green,
            Status::Failed if result.allow_failure => self.yellow,
            Status::Failed => self.red,
            Status::NotImplemented => self.blue,
            Status::Ignored => self.yellow,
        }
    }
}

/// Print a report in the specified format.
pub fn print(report: &Report, format: OutputFormat, color: bool) -> Result<()> {
    let rendered = match format {
        OutputFormat::Text => render_text(report, color),
        OutputFormat::Json => serde_json::to_string_pretty(report)? + "\n",
        OutputFormat::Csv => render_csv(report),
    };
    print!("{rendered}");
    Ok(())
}

/// Renders the human-readable report.
pub fn render_text(report: &Report, color: bool) -> String {
    let p = Palette::new(color);
    let mut out = String::new();

    for analysis in &report.analyses {
        render_analysis(&mut out, analysis, p);
    }

    let counts = report.count_by_status();
    let summary_color = if !report.is_success() {
        p.red
    } else if counts.failed > 0 {
        p.yellow
    } else {
        p.green
    };
    let _ = writeln!(out, "{summary_color}{}{}", report.summary(), p.reset);
    out
}

fn render_analysis(out: &mut String, analysis: &AnalysisReport, p: Palette) {
    let _ = writeln!(
        out,
        "{}Analysis: {}{} ({})",
        p.bold, analysis.name, p.reset, analysis.provider
    );
    if let Some(description) = &analysis.description {
        let _ = writeln!(out, "  {description}");
    }
    if let Some(data) = &analysis.data {
        let _ = writeln!(out, "  Data: {data}");
    }
    if let Some(error) = &analysis.error {
        let (tag, c) = if analysis.allow_failure {
            ("allowed failure", p.yellow)
        } else {
            ("error", p.red)
        };
        let _ = writeln!(out, "  {c}{tag}{}: {error}", p.reset);
    }

    for result in &analysis.results {
        let allowed = if result.allow_failure && result.status == Status::Failed {
            " (allowed)"
        } else {
            ""
        };
        let _ = writeln!(
            out,
            "  {}{:<16}{} {:<4} {}{allowed}",
            p.status(result),
            result.status.to_string(),
            p.reset,
            result.codename,
            result.name,
        );
        for message in &result.messages {
            let _ = writeln!(out, "    {}", message.trim_start());
        }
        if result.status == Status::Failed {
            if let Some(hint) = &result.hint {
                let _ = writeln!(out, "    = help: {hint}");
            }
        }
    }
    out.push('\n');
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Renders one CSV line per checker result (and per provider error).
pub fn render_csv(report: &Report) -> String {
    let mut out = String::from("analysis,provider,checker,codename,status,allow_failure,message\n");
    for analysis in &report.analyses {
        if let Some(error) = &analysis.error {
            let _ = writeln!(
                out,
                "{},{},,,ERROR,{},{}",
                csv_field(&analysis.name),
                csv_field(&analysis.provider),
                analysis.allow_failure,
                csv_field(error),
            );
        }
        for result in &analysis.results {
            let message = result
                .messages
                .iter()
                .map(|m| m.trim())
                .collect::<Vec<_>>()
                .join("; ");
            let _ = writeln!(
                out,
                "{},{},{},{},{},{},{}",
                csv_field(&analysis.name),
                csv_field(&analysis.provider),
                csv_field(&result.identifier),
                result.codename,
                result.status,
                result.allow_failure,
                csv_field(&message),
            );
        }
    }
    out
}
