//! Text extraction from PDF and DOCX documents.
//!
//! Both formats are read as a sequence of units (pages for PDF, body paragraphs
//! for DOCX). The extractor walks the units in order, appends each unit's text
//! followed by a newline and reports how many units it has consumed.
//!
//! ## Crates
//! - PDF: `lopdf`, one page at a time
//! - DOCX: `docx-rs`, paragraphs of the document body

use super::error::PipelineError;
use super::types::{Document, DocumentFormat};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::Path;

/// An ordered, countable source of text units
pub trait TextUnits {
    /// Number of units in the document
    fn unit_count(&self) -> usize;

    /// Text of the unit at `index` (`index < unit_count()`)
    fn unit_text(&mut self, index: usize) -> Result<String, String>;
}

/// Pages of a PDF loaded with lopdf
pub struct PdfPages {
    document: lopdf::Document,
    page_numbers: Vec<u32>,
}

impl PdfPages {
    pub fn open(path: &Path) -> Result<Self, String> {
        let document = catch_unwind(AssertUnwindSafe(|| lopdf::Document::load(path)))
            .map_err(|_| "PDF parser panicked while loading the file".to_string())?
            .map_err(|e| e.to_string())?;

        // BTreeMap keys are page numbers, already in reading order
        let page_numbers = document.get_pages().keys().copied().collect();

        Ok(Self {
            document,
            page_numbers,
        })
    }
}

impl TextUnits for PdfPages {
    fn unit_count(&self) -> usize {
        self.page_numbers.len()
    }

    fn unit_text(&mut self, index: usize) -> Result<String, String> {
        let page = self.page_numbers[index];
        let document = &self.document;

        // Malformed fonts can make text decoding panic
        match catch_unwind(AssertUnwindSafe(|| document.extract_text(&[page]))) {
            Ok(Ok(text)) => Ok(text),
            Ok(Err(e)) => Err(format!("page {}: {}", page, e)),
            Err(_panic) => Err(format!("PDF parser panicked on page {}", page)),
        }
    }
}

/// Body paragraphs of a DOCX file
pub struct DocxParagraphs {
    paragraphs: Vec<String>,
}

impl DocxParagraphs {
    pub fn open(path: &Path) -> Result<Self, String> {
        let bytes = std::fs::read(path).map_err(|e| e.to_string())?;
        Self::from_bytes(&bytes)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, String> {
        let docx = catch_unwind(AssertUnwindSafe(|| docx_rs::read_docx(bytes)))
            .map_err(|_| "DOCX parser panicked while reading the file".to_string())?
            .map_err(|e| e.to_string())?;

        let paragraphs = docx
            .document
            .children
            .iter()
            .filter_map(|child| match child {
                docx_rs::DocumentChild::Paragraph(para) => Some(paragraph_text(para)),
                _ => None,
            })
            .collect();

        Ok(Self { paragraphs })
    }
}

impl TextUnits for DocxParagraphs {
    fn unit_count(&self) -> usize {
        self.paragraphs.len()
    }

    fn unit_text(&mut self, index: usize) -> Result<String, String> {
        Ok(std::mem::take(&mut self.paragraphs[index]))
    }
}

/// Plain text of a paragraph: runs, including runs inside hyperlinks
fn paragraph_text(para: &docx_rs::Paragraph) -> String {
    let mut output = String::new();
    for child in &para.children {
        match child {
            docx_rs::ParagraphChild::Run(run) => push_run_text(run, &mut output),
            docx_rs::ParagraphChild::Hyperlink(link) => {
                for inner in &link.children {
                    if let docx_rs::ParagraphChild::Run(run) = inner {
                        push_run_text(run, &mut output);
                    }
                }
            }
            _ => {}
        }
    }
    output
}

fn push_run_text(run: &docx_rs::Run, output: &mut String) {
    for run_child in &run.children {
        match run_child {
            docx_rs::RunChild::Text(text) => output.push_str(&text.text),
            docx_rs::RunChild::Tab(_) => output.push('\t'),
            docx_rs::RunChild::Break(_) => output.push('\n'),
            _ => {}
        }
    }
}

/// Reads a document into one string
#[derive(Debug, Default, Clone, Copy)]
pub struct Extractor;

impl Extractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract all text from `document`.
    ///
    /// `on_unit(done, total)` is called after each page or paragraph.
    pub fn extract(
        &self,
        document: &Document,
        on_unit: &mut dyn FnMut(usize, usize),
    ) -> Result<String, PipelineError> {
        tracing::info!(
            "[Extractor] Starting {} extraction: {}",
            document.format,
            document.path.display()
        );

        let mut units = self.open(document)?;
        let text = Self::extract_units(units.as_mut(), document.format, on_unit)?;

        tracing::info!(
            "[Extractor] {} extraction finished: {} units, {} chars from {}",
            document.format,
            units.unit_count(),
            text.chars().count(),
            document.display_name()
        );
        Ok(text)
    }

    fn open(&self, document: &Document) -> Result<Box<dyn TextUnits>, PipelineError> {
        let opened: Result<Box<dyn TextUnits>, String> = match document.format {
            DocumentFormat::Pdf => {
                PdfPages::open(&document.path).map(|p| Box::new(p) as Box<dyn TextUnits>)
            }
            DocumentFormat::Docx => {
                DocxParagraphs::open(&document.path).map(|p| Box::new(p) as Box<dyn TextUnits>)
            }
        };

        opened.map_err(|cause| {
            tracing::warn!(
                "[Extractor] Failed to open {}: {}",
                document.path.display(),
                cause
            );
            PipelineError::Extraction {
                format: document.format,
                cause,
            }
        })
    }

    /// Concatenate every unit followed by a newline.
    /// With zero units `on_unit` is never called and the text is empty.
    pub fn extract_units(
        units: &mut dyn TextUnits,
        format: DocumentFormat,
        on_unit: &mut dyn FnMut(usize, usize),
    ) -> Result<String, PipelineError> {
        let total = units.unit_count();
        let mut text = String::new();

        for index in 0..total {
            let unit = units
                .unit_text(index)
                .map_err(|cause| PipelineError::Extraction { format, cause })?;
            text.push_str(&unit);
            text.push('\n');
            on_unit(index + 1, total);
        }

        Ok(text)
    }
}
