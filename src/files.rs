//! File-level helpers used by the command-line tool: load an invoice file,
//! summarize a result for the console and write the sibling report file.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::core::{FacturaError, InvoiceRecord, ValidationResult, validate_invoice};

/// Suffix appended to the input file stem for the written report.
pub const RESULT_SUFFIX: &str = "_resultado.json";

/// Read and validate one invoice file.
pub fn validate_file(path: &Path) -> Result<ValidationResult, FacturaError> {
    let bytes = fs::read(path)?;
    let record = InvoiceRecord::from_json_slice(&bytes)?;
    debug!(
        "{}: {} header field(s), {} item(s)",
        path.display(),
        record.header.len(),
        record.items.len()
    );
    Ok(validate_invoice(&record))
}

/// Sibling path for the report: `factura.json` -> `factura_resultado.json`.
///
/// A trailing `.json` is dropped regardless of case; any other name just gets
/// the suffix appended.
pub fn result_path(input: &Path) -> PathBuf {
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let split = name.len().saturating_sub(5);
    let stem = match (name.get(..split), name.get(split..)) {
        (Some(stem), Some(ext)) if ext.eq_ignore_ascii_case(".json") => stem,
        _ => name.as_str(),
    };
    input.with_file_name(format!("{stem}{RESULT_SUFFIX}"))
}

/// Write the result as pretty JSON next to `input`, returning the path written.
pub fn write_result(input: &Path, result: &ValidationResult) -> Result<PathBuf, FacturaError> {
    let out = result_path(input);
    let json = serde_json::to_string_pretty(result)?;
    fs::write(&out, json)?;
    Ok(out)
}

/// Human-readable console summary.
pub fn render_summary(result: &ValidationResult) -> String {
    if result.is_compliant() {
        return "La factura cumple con los requisitos obligatorios de DIAN.".to_string();
    }
    let mut out = String::from("La factura NO cumple con algunos requisitos obligatorios:");
    for error in &result.errors {
        let _ = write!(out, "\n- {error}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ValidationError;

    #[test]
    fn result_path_strips_json_extension() {
        assert_eq!(
            result_path(Path::new("/tmp/FACTURA_58846.json")),
            PathBuf::from("/tmp/FACTURA_58846_resultado.json")
        );
        assert_eq!(
            result_path(Path::new("in/f.JSON")),
            PathBuf::from("in/f_resultado.json")
        );
        assert_eq!(
            result_path(Path::new("factura.txt")),
            PathBuf::from("factura.txt_resultado.json")
        );
    }

    #[test]
    fn summary_lists_errors() {
        let result = ValidationResult::from_errors(vec![ValidationError::missing(
            "Moneda",
            "No se especificó la moneda.",
            "Indique la moneda.",
        )]);
        assert_eq!(
            render_summary(&result),
            "La factura NO cumple con algunos requisitos obligatorios:\n- Moneda: No se especificó la moneda. Sugerencia: Indique la moneda."
        );
        assert_eq!(
            render_summary(&ValidationResult::from_errors(vec![])),
            "La factura cumple con los requisitos obligatorios de DIAN."
        );
    }
}
