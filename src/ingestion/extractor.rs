//! Per-format text extraction, dispatched on file extension

use calamine::Reader;

use crate::error::{Error, Result};
use crate::types::DocumentFormat;

/// Extension-dispatched document text extractor
pub struct DocumentExtractor;

impl DocumentExtractor {
    /// Extract raw text from an uploaded file.
    ///
    /// The format is chosen by the file extension; an unregistered extension
    /// fails with [`Error::UnsupportedFormat`] before any chunking occurs.
    pub fn extract(filename: &str, data: &[u8]) -> Result<(DocumentFormat, String)> {
        let extension = filename.rsplit('.').next().unwrap_or("").to_lowercase();

        let format = DocumentFormat::from_extension(&extension)
            .ok_or_else(|| Error::UnsupportedFormat(extension.clone()))?;

        let content = match format {
            DocumentFormat::Pdf => Self::extract_pdf(filename, data)?,
            DocumentFormat::Docx => Self::extract_docx(filename, data)?,
            DocumentFormat::Txt => Self::extract_txt(data),
            DocumentFormat::Xlsx => Self::extract_xlsx(filename, data)?,
            DocumentFormat::Csv => Self::extract_csv(data),
        };

        Ok((format, content))
    }

    fn extract_pdf(filename: &str, data: &[u8]) -> Result<String> {
        pdf_extract::extract_text_from_mem(data)
            .map_err(|e| Error::extract(filename, e.to_string()))
    }

    fn extract_docx(filename: &str, data: &[u8]) -> Result<String> {
        let doc = docx_rs::read_docx(data).map_err(|e| Error::extract(filename, e.to_string()))?;

        let mut content = String::new();
        for child in doc.document.children {
            if let docx_rs::DocumentChild::Paragraph(paragraph) = child {
                for child in paragraph.children {
                    if let docx_rs::ParagraphChild::Run(run) = child {
                        for child in run.children {
                            if let docx_rs::RunChild::Text(text) = child {
                                content.push_str(&text.text);
                            }
                        }
                    }
                }
                content.push('\n');
            }
        }

        Ok(content)
    }

    fn extract_txt(data: &[u8]) -> String {
        String::from_utf8_lossy(data).to_string()
    }

    fn extract_xlsx(filename: &str, data: &[u8]) -> Result<String> {
        let cursor = std::io::Cursor::new(data);
        let mut workbook = calamine::open_workbook_auto_from_rs(cursor)
            .map_err(|e| Error::extract(filename, e.to_string()))?;

        let mut content = String::new();
        for sheet_name in workbook.sheet_names().to_vec() {
            if let Ok(range) = workbook.worksheet_range(&sheet_name) {
                content.push_str(&format!("Sheet: {}\n", sheet_name));

                for row in range.rows() {
                    let row_text: Vec<String> = row
                        .iter()
                        .map(|cell| match cell {
                            calamine::Data::Empty => String::new(),
                            calamine::Data::String(s) => s.clone(),
                            calamine::Data::Float(f) => f.to_string(),
                            calamine::Data::Int(i) => i.to_string(),
                            calamine::Data::Bool(b) => b.to_string(),
                            calamine::Data::DateTime(dt) => dt.to_string(),
                            _ => String::new(),
                        })
                        .collect();

                    if !row_text.iter().all(|s| s.is_empty()) {
                        content.push_str(&row_text.join(" | "));
                        content.push('\n');
                    }
                }
                content.push('\n');
            }
        }

        Ok(content)
    }

    fn extract_csv(data: &[u8]) -> String {
        let mut reader = csv::Reader::from_reader(data);
        let mut content = String::new();

        if let Ok(headers) = reader.headers() {
            content.push_str(&headers.iter().collect::<Vec<_>>().join(" | "));
            content.push('\n');
        }

        for record in reader.records().flatten() {
            content.push_str(&record.iter().collect::<Vec<_>>().join(" | "));
            content.push('\n');
        }

        content
    }
}
