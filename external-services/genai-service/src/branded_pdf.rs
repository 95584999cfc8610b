use crate::error::{GenAiError, GenAiResult};
use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Message returned to callers when PDF generation fails
pub const PDF_FAILED_MESSAGE: &str = "Failed to generate PDF report.";

const PDF_URI_PREFIX: &str = "data:application/pdf;base64,";

/// Input of the branded PDF flow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandedPdfRequest {
    /// Report content as a JSON string
    pub report_data: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand_guidelines: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BrandedPdfOutput {
    pub pdf_data_uri: String,
}

/// A validated `data:application/pdf;base64,...` URI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfDataUri(String);

impl PdfDataUri {
    /// # Errors
    /// `InvalidResponse` when the URI is not a base64 PDF data URI.
    pub fn parse(uri: &str) -> GenAiResult<Self> {
        let payload = uri
            .trim()
            .strip_prefix(PDF_URI_PREFIX)
            .ok_or_else(|| GenAiError::InvalidResponse("expected a base64 PDF data URI".to_string()))?;
        if payload.is_empty() {
            return Err(GenAiError::InvalidResponse("PDF data URI is empty".to_string()));
        }
        STANDARD
            .decode(payload)
            .map_err(|e| GenAiError::InvalidResponse(format!("Base64 decode error: {e}")))?;
        Ok(Self(uri.trim().to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn bytes(&self) -> GenAiResult<Vec<u8>> {
        let payload = self.0.strip_prefix(PDF_URI_PREFIX).unwrap_or_default();
        STANDARD
            .decode(payload)
            .map_err(|e| GenAiError::InvalidResponse(format!("Base64 decode error: {e}")))
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for PdfDataUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
