//! Text extraction from resume and job description formats

use crate::error::{Result, ScreenerError};
use crate::input::file_detector::FileType;
use docx_rs::{DocumentChild, ParagraphChild, RunChild};
use log::{debug, warn};
use pulldown_cmark::{Event, Parser, Tag};
use std::any::Any;
use std::panic;

/// Prefix of the sentinel text returned when a PDF cannot be read.
pub const PDF_ERROR_PREFIX: &str = "[Error reading PDF:";

pub trait TextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String>;
}

/// Route `bytes` to the extractor for `format`. `.doc` goes to the Word
/// reader as well.
pub fn extract_for(format: FileType, bytes: &[u8]) -> Result<String> {
    match format {
        FileType::Pdf => PdfExtractor.extract(bytes),
        FileType::Doc | FileType::Docx => DocxExtractor.extract(bytes),
        FileType::Text => PlainTextExtractor.extract(bytes),
        FileType::Markdown => MarkdownExtractor.extract(bytes),
        FileType::Unknown => Err(ScreenerError::UnsupportedFormat(
            "no text extractor for this file type".to_string(),
        )),
    }
}

/// Whether `text` is the sentinel produced by a failed PDF extraction.
pub fn is_extraction_error(text: &str) -> bool {
    text.starts_with(PDF_ERROR_PREFIX)
}

/// Reads the PDF text layer. Never fails: a broken document yields
/// `"[Error reading PDF: <cause>]"` so the caller can keep scoring.
pub struct PdfExtractor;

impl PdfExtractor {
    fn sentinel(cause: &str) -> String {
        format!("{} {}]", PDF_ERROR_PREFIX, cause)
    }
}

impl TextExtractor for PdfExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        // pdf-extract panics on some malformed inputs instead of returning an error
        let outcome = panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes));

        let text = match outcome {
            Ok(Ok(text)) => text,
            Ok(Err(e)) => {
                warn!("PDF extraction failed: {}", e);
                Self::sentinel(&e.to_string())
            }
            Err(payload) => {
                let cause = panic_message(payload.as_ref());
                warn!("PDF extraction panicked: {}", cause);
                Self::sentinel(&cause)
            }
        };
        Ok(text)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown PDF parser failure".to_string()
    }
}

/// Word documents: one line per body paragraph, in document order.
/// Legacy `.doc` files are not OOXML and fail here as a hard error.
pub struct DocxExtractor;

impl TextExtractor for DocxExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        let docx = docx_rs::read_docx(bytes).map_err(|e| {
            ScreenerError::DocxExtraction(format!("Failed to read Word document: {}", e))
        })?;

        let paragraphs: Vec<String> = docx
            .document
            .children
            .iter()
            .filter_map(|child| match child {
                DocumentChild::Paragraph(paragraph) => Some(paragraph_text(&paragraph.children)),
                _ => None,
            })
            .collect();

        debug!("Extracted {} paragraphs from Word document", paragraphs.len());
        Ok(paragraphs.join("\n"))
    }
}

fn paragraph_text(children: &[ParagraphChild]) -> String {
    let mut text = String::new();
    for child in children {
        if let ParagraphChild::Run(run) = child {
            for run_child in &run.children {
                match run_child {
                    RunChild::Text(t) => text.push_str(&t.text),
                    RunChild::Tab(_) => text.push('\t'),
                    _ => {}
                }
            }
        }
    }
    text
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        String::from_utf8(bytes.to_vec())
            .map_err(|e| ScreenerError::InvalidInput(format!("Text file is not valid UTF-8: {}", e)))
    }
}

/// Renders Markdown and keeps only its text, one block per line.
pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        let markdown = PlainTextExtractor.extract(bytes)?;
        let mut text = String::new();

        for event in Parser::new(&markdown) {
            match event {
                Event::Text(t) | Event::Code(t) => text.push_str(&t),
                Event::SoftBreak | Event::HardBreak => text.push('\n'),
                Event::End(Tag::Paragraph)
                | Event::End(Tag::Heading(..))
                | Event::End(Tag::Item)
                | Event::End(Tag::CodeBlock(_)) => text.push('\n'),
                _ => {}
            }
        }

        let lines: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        Ok(lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corrupt_pdf_yields_sentinel() {
        let text = PdfExtractor.extract(b"this is not a pdf").unwrap();

        assert!(text.contains("Error reading PDF"));
        assert!(is_extraction_error(&text));
        assert!(text.ends_with(']'));
    }

    #[test]
    fn test_corrupt_docx_is_hard_error() {
        let result = DocxExtractor.extract(b"PK\x03\x04 definitely not a zip");
        assert!(matches!(result, Err(ScreenerError::DocxExtraction(_))));
    }

    #[test]
    fn test_markdown_is_stripped() {
        let md = b"# Jane Roe\n\n**Senior** engineer with `Rust` experience.\n\n- Kubernetes\n- AWS\n";
        let text = MarkdownExtractor.extract(md).unwrap();

        assert_eq!(
            text,
            "Jane Roe\nSenior engineer with Rust experience.\nKubernetes\nAWS"
        );
    }

    #[test]
    fn test_invalid_utf8_text_rejected() {
        assert!(PlainTextExtractor.extract(&[0xff, 0xfe, 0x00]).is_err());
    }

    #[test]
    fn test_routing_by_format() {
        assert_eq!(extract_for(FileType::Text, b"Rust").unwrap(), "Rust");
        assert_eq!(extract_for(FileType::Markdown, b"## Rust").unwrap(), "Rust");
        assert!(matches!(
            extract_for(FileType::Doc, b"legacy binary"),
            Err(ScreenerError::DocxExtraction(_))
        ));
        assert!(matches!(
            extract_for(FileType::Unknown, b"?"),
            Err(ScreenerError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_regular_text_is_not_sentinel() {
        assert!(!is_extraction_error("Jane Roe, Rust developer"));
    }
}
