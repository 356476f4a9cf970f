//! Per-file wrapping for uploaded invoice documents.
//!
//! A transport (HTTP handler, CLI, queue consumer) hands over raw file bytes;
//! this module turns each file into a report, converting unreadable or
//! malformed input into a synthetic single-error report instead of failing
//! the whole batch.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::core::{FacturaError, InvoiceRecord, ValidationError, ValidationResult, validate_invoice};

/// `estado` used when a file could not be validated.
pub const ERROR_STATE: &str = "Error";

/// Verdict label of an upload report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UploadVerdict {
    #[serde(rename = "Cumple")]
    Compliant,
    #[serde(rename = "No cumple")]
    NonCompliant,
    /// Unexpected failure while handling the file.
    #[serde(rename = "Error interno")]
    InternalError,
}

impl UploadVerdict {
    pub fn label(&self) -> &'static str {
        match self {
            UploadVerdict::Compliant => "Cumple",
            UploadVerdict::NonCompliant => "No cumple",
            UploadVerdict::InternalError => "Error interno",
        }
    }
}

/// Report body: verdict plus errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadDetail {
    #[serde(rename = "resultado")]
    pub verdict: UploadVerdict,
    #[serde(rename = "errores")]
    pub errors: Vec<ValidationError>,
}

impl From<ValidationResult> for UploadDetail {
    fn from(result: ValidationResult) -> Self {
        let verdict = if result.is_compliant() {
            UploadVerdict::Compliant
        } else {
            UploadVerdict::NonCompliant
        };
        Self {
            verdict,
            errors: result.errors,
        }
    }
}

/// Outcome for one uploaded file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileReport {
    pub filename: String,
    /// `Cumple`, `No cumple` or `Error`.
    pub estado: String,
    pub detalle: UploadDetail,
}

impl FileReport {
    pub fn is_error(&self) -> bool {
        self.estado == ERROR_STATE
    }
}

/// Outcomes for a batch of files, in upload order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    pub resultados: Vec<FileReport>,
}

/// Validate one uploaded file.
///
/// Input that is not UTF-8 JSON yields an `Archivo` error; JSON that is not an
/// invoice record yields a `Sistema` error with verdict `Error interno`.
pub fn validate_upload(filename: &str, bytes: &[u8]) -> FileReport {
    let parsed = std::str::from_utf8(bytes)
        .map_err(|_| None)
        .and_then(|text| InvoiceRecord::from_json_str(text).map_err(Some));

    match parsed {
        Ok(record) => {
            let detail = UploadDetail::from(validate_invoice(&record));
            FileReport {
                filename: filename.to_string(),
                estado: detail.verdict.label().to_string(),
                detalle: detail,
            }
        }
        Err(None) | Err(Some(FacturaError::Json(_))) => {
            warn!("{filename}: not valid JSON");
            error_report(
                filename,
                UploadVerdict::NonCompliant,
                ValidationError::invalid(
                    "Archivo",
                    "El archivo no es un JSON válido.",
                    "Revise la estructura del JSON.",
                ),
            )
        }
        Err(Some(other)) => {
            warn!("{filename}: {other}");
            error_report(
                filename,
                UploadVerdict::InternalError,
                ValidationError::invalid("Sistema", other.to_string(), "Contacte al administrador."),
            )
        }
    }
}

/// Validate a batch of `(filename, bytes)` uploads.
pub fn validate_uploads<'a, I, B>(files: I) -> BatchReport
where
    I: IntoIterator<Item = (&'a str, B)>,
    B: AsRef<[u8]>,
{
    BatchReport {
        resultados: files
            .into_iter()
            .map(|(name, bytes)| validate_upload(name, bytes.as_ref()))
            .collect(),
    }
}

fn error_report(filename: &str, verdict: UploadVerdict, error: ValidationError) -> FileReport {
    FileReport {
        filename: filename.to_string(),
        estado: ERROR_STATE.to_string(),
        detalle: UploadDetail {
            verdict,
            errors: vec![error],
        },
    }
}
