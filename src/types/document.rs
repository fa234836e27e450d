//! Document and chunk types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Supported document formats, tagged by file extension
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    /// PDF document
    Pdf,
    /// Microsoft Word document (.docx)
    Docx,
    /// Plain text file
    Txt,
    /// Excel spreadsheet (.xlsx)
    Xlsx,
    /// CSV file
    Csv,
}

impl DocumentFormat {
    /// Detect format from a file extension (case-insensitive)
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            "txt" => Some(Self::Txt),
            "xlsx" => Some(Self::Xlsx),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }

    /// Lowercase tag used in stored metadata
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Docx => "docx",
            Self::Txt => "txt",
            Self::Xlsx => "xlsx",
            Self::Csv => "csv",
        }
    }
}

/// A source upload. Immutable once ingested; a re-upload produces a new
/// document with its own chunk set rather than mutating this one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Original filename as uploaded
    pub filename: String,
    /// Detected format
    pub format: DocumentFormat,
    /// Ingestion timestamp
    pub created_at: DateTime<Utc>,
}

/// The unit of retrieval: a bounded text segment cut from a document.
///
/// Chunk ids have the shape `"{document-uuid}-chunk-{ordinal}"`. Ordinals are
/// renumbered after the short-fragment filter, so the kept sequence is gapless.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    /// Unique chunk id
    pub id: String,
    /// Owning document filename
    pub filename: String,
    /// Ordinal within the kept sequence
    pub chunk_index: usize,
    /// Text content (always longer than the minimum floor)
    pub content: String,
    /// Format of the owning document
    pub format: DocumentFormat,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Where the chunk came from (e.g. "upload")
    pub source: String,
}

impl Chunk {
    /// Metadata stored alongside the embedding in the vector index
    pub fn metadata(&self) -> ChunkMetadata {
        ChunkMetadata {
            filename: self.filename.clone(),
            format: self.format,
            created_at: self.created_at,
            chunk_index: self.chunk_index,
            source: self.source.clone(),
        }
    }
}

/// Per-chunk metadata as it lives in the vector index
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkMetadata {
    /// Owning document filename
    pub filename: String,
    /// Format tag of the owning document
    #[serde(rename = "type")]
    pub format: DocumentFormat,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Ordinal within the document
    pub chunk_index: usize,
    /// Ingestion source tag
    pub source: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_format_case_insensitively() {
        assert_eq!(DocumentFormat::from_extension("PDF"), Some(DocumentFormat::Pdf));
        assert_eq!(DocumentFormat::from_extension("xlsx"), Some(DocumentFormat::Xlsx));
        assert_eq!(DocumentFormat::from_extension("exe"), None);
    }

    #[test]
    fn format_serializes_as_lowercase_tag() {
        let json = serde_json::to_string(&DocumentFormat::Docx).unwrap();
        assert_eq!(json, "\"docx\"");
    }
}
