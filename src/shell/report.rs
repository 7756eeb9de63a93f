//! Rendering of run results.

use crate::speller::CorrectionRecord;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt::Write;
use std::path::{Path, PathBuf};
use uuid::Uuid;

const SEPARATOR_WIDTH: usize = 50;

/// Language of the text report
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ReportLanguage {
    #[value(name = "pl")]
    Polish,
    #[value(name = "en")]
    English,
}

/// Fixed wording of the text report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportLabels {
    pub found: &'static str,
    pub error: &'static str,
    pub correction: &'static str,
    pub context: &'static str,
    pub no_errors: &'static str,
}

pub const POLISH_LABELS: ReportLabels = ReportLabels {
    found: "Znalezione błędy",
    error: "Błąd",
    correction: "Poprawnie",
    context: "Kontekst",
    no_errors: "Nie znaleziono błędów ortograficznych!",
};

pub const ENGLISH_LABELS: ReportLabels = ReportLabels {
    found: "Found errors",
    error: "Error",
    correction: "Correction",
    context: "Context",
    no_errors: "No spelling errors found!",
};

impl ReportLanguage {
    pub fn labels(self) -> &'static ReportLabels {
        match self {
            Self::Polish => &POLISH_LABELS,
            Self::English => &ENGLISH_LABELS,
        }
    }
}

/// Human-readable report of one run
pub fn render_text(records: &[CorrectionRecord], labels: &ReportLabels) -> String {
    if records.is_empty() {
        return labels.no_errors.to_string();
    }

    let separator = "-".repeat(SEPARATOR_WIDTH);
    let mut out = format!("{} ({}):\n\n", labels.found, records.len());
    for record in records {
        let _ = writeln!(out, "{}: {}", labels.error, record.error);
        let _ = writeln!(out, "{}: {}", labels.correction, record.correction);
        let _ = writeln!(out, "{}: {}", labels.context, record.context);
        out.push_str(&separator);
        out.push('\n');
    }
    out
}

/// Machine-readable report of one run
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    pub run_id: Uuid,
    pub document: PathBuf,
    pub generated_at: DateTime<Utc>,
    pub corrections: Vec<CorrectionRecord>,
}

impl RunReport {
    pub fn new(run_id: Uuid, document: &Path, corrections: Vec<CorrectionRecord>) -> Self {
        Self {
            run_id,
            document: document.to_path_buf(),
            generated_at: Utc::now(),
            corrections,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(error: &str, correction: &str, context: &str) -> CorrectionRecord {
        CorrectionRecord {
            error: error.into(),
            correction: correction.into(),
            context: context.into(),
        }
    }

    #[test]
    fn test_empty_report() {
        assert_eq!(
            render_text(&[], &POLISH_LABELS),
            "Nie znaleziono błędów ortograficznych!"
        );
        assert_eq!(
            render_text(&[], ReportLanguage::English.labels()),
            "No spelling errors found!"
        );
    }

    #[test]
    fn test_polish_report_layout() {
        let text = render_text(
            &[record("Wtorke", "Wtorek", "Wtorke bylo slonecznie")],
            ReportLanguage::Polish.labels(),
        );
        let expected = format!(
            "Znalezione błędy (1):\n\nBłąd: Wtorke\nPoprawnie: Wtorek\nKontekst: Wtorke bylo slonecznie\n{}\n",
            "-".repeat(50)
        );
        assert_eq!(text, expected);
    }

    #[test]
    fn test_english_report_layout() {
        let text = render_text(
            &[record("Wtorke", "Wtorek", "Wtorke bylo slonecznie")],
            &ENGLISH_LABELS,
        );
        let expected = format!(
            "Found errors (1):\n\nError: Wtorke\nCorrection: Wtorek\nContext: Wtorke bylo slonecznie\n{}\n",
            "-".repeat(50)
        );
        assert_eq!(text, expected);
    }

    #[test]
    fn test_json_report_fields() {
        let report = RunReport::new(
            Uuid::new_v4(),
            Path::new("raport.docx"),
            vec![record("bylo", "było", "Wtorke bylo slonecznie")],
        );
        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

        assert_eq!(json["document"], "raport.docx");
        assert_eq!(json["corrections"][0]["error"], "bylo");
        assert_eq!(json["corrections"][0]["correction"], "było");
        assert!(json["runId"].is_string());
        assert!(json["generatedAt"].is_string());
    }
}
