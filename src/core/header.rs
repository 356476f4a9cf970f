//! Invoice header rules.
//!
//! Every required header field has a presence rule; four of them carry an
//! additional format rule that only runs when the field is present. A field
//! produces at most one error.

use serde_json::Value;

use super::dates::is_valid_date;
use super::error::ValidationError;
use super::incoterms::is_known_incoterm;
use super::numeric::parse_value;
use super::types::{HeaderField, HeaderFields, is_empty_value, value_text};

/// Format constraint layered on top of a presence rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderFormat {
    /// Must be a string in one of the accepted date layouts.
    Date,
    /// Must be a known Incoterm (case-insensitive).
    Incoterm,
    /// Must be exactly three ASCII letters.
    CurrencyCode,
    /// Must parse as a number.
    Amount,
}

impl HeaderFormat {
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            HeaderFormat::Date => matches!(value, Value::String(s) if is_valid_date(s)),
            HeaderFormat::Incoterm => is_known_incoterm(&value_text(value)),
            HeaderFormat::CurrencyCode => is_currency_code(&value_text(value)),
            HeaderFormat::Amount => parse_value(value).is_some(),
        }
    }
}

/// A format rule with its message templates. `{value}` is replaced by the
/// offending raw value.
#[derive(Debug, Clone, Copy)]
pub struct FormatRule {
    pub format: HeaderFormat,
    pub reason: &'static str,
    pub suggestion: &'static str,
}

/// Static rule for one required header field.
#[derive(Debug, Clone, Copy)]
pub struct HeaderRule {
    pub field: HeaderField,
    /// Label used as the error's field name.
    pub label: &'static str,
    pub missing_reason: &'static str,
    pub missing_suggestion: &'static str,
    pub format: Option<FormatRule>,
}

impl HeaderRule {
    /// Check this rule against the header, returning at most one error.
    pub fn check(&self, header: &HeaderFields) -> Option<ValidationError> {
        let value = header.get(self.field);
        if is_empty_value(value) {
            return Some(ValidationError::missing(
                self.label,
                self.missing_reason,
                self.missing_suggestion,
            ));
        }
        let (value, rule) = (value?, self.format?);
        if rule.format.accepts(value) {
            return None;
        }
        let text = value_text(value);
        Some(ValidationError::invalid(
            self.label,
            rule.reason.replace("{value}", &text),
            rule.suggestion.replace("{value}", &text),
        ))
    }
}

/// Header rules in reporting order.
pub static HEADER_RULES: &[HeaderRule] = &[
    HeaderRule {
        field: HeaderField::Supplier,
        label: "Exportador - Nombre",
        missing_reason: "No se proporcionó el nombre o razón social del exportador.",
        missing_suggestion: "Incluya el nombre completo o la razón social del exportador.",
        format: None,
    },
    HeaderRule {
        field: HeaderField::SupplierAddress,
        label: "Exportador - Dirección",
        missing_reason: "No se proporcionó la dirección del exportador.",
        missing_suggestion: "Incluya la dirección (ciudad, país) completa del exportador.",
        format: None,
    },
    HeaderRule {
        field: HeaderField::SupplierTaxId,
        label: "Exportador - NIT/ID",
        missing_reason: "No se proporcionó la identificación fiscal (NIT o equivalente) del exportador.",
        missing_suggestion: "Incluya el NIT del exportador o su número de identificación fiscal extranjero.",
        format: None,
    },
    HeaderRule {
        field: HeaderField::Customer,
        label: "Importador - Nombre",
        missing_reason: "No se proporcionó el nombre o razón social del importador.",
        missing_suggestion: "Incluya el nombre completo o la razón social del importador.",
        format: None,
    },
    HeaderRule {
        field: HeaderField::CustomerAddress,
        label: "Importador - Dirección",
        missing_reason: "No se proporcionó la dirección del importador.",
        missing_suggestion: "Incluya la dirección (ciudad, país) completa del importador.",
        format: None,
    },
    HeaderRule {
        field: HeaderField::CustomerTaxId,
        label: "Importador - NIT/ID",
        missing_reason: "No se proporcionó la identificación fiscal (NIT o equivalente) del importador.",
        missing_suggestion: "Incluya el NIT del importador (si es en Colombia) o su identificación fiscal en el exterior.",
        format: None,
    },
    HeaderRule {
        field: HeaderField::InvoiceNumber,
        label: "Número de Factura",
        missing_reason: "No se proporcionó el número de la factura comercial.",
        missing_suggestion: "Incluya el número o código identificador de la factura.",
        format: None,
    },
    HeaderRule {
        field: HeaderField::InvoiceDate,
        label: "Fecha de Factura",
        missing_reason: "No se proporcionó la fecha de expedición de la factura.",
        missing_suggestion: "Incluya la fecha de emisión de la factura en formato DD/MM/AAAA.",
        format: Some(FormatRule {
            format: HeaderFormat::Date,
            reason: "El formato de la fecha '{value}' no es válido.",
            suggestion: "Use un formato de fecha válido, por ejemplo DD/MM/AAAA.",
        }),
    },
    HeaderRule {
        field: HeaderField::Incoterm,
        label: "Incoterm",
        missing_reason: "No se especificó el Incoterm (término de entrega) de la transacción.",
        missing_suggestion: "Incluya el Incoterm acordado (por ejemplo FOB, CIF, CIP), junto con el lugar pactado.",
        format: Some(FormatRule {
            format: HeaderFormat::Incoterm,
            reason: "El Incoterm '{value}' no es reconocido.",
            suggestion: "Verifique el Incoterm. Debe ser uno de: EXW, FCA, FAS, FOB, CFR, CIF, CPT, CIP, DAP, DPU, DDP, etc.",
        }),
    },
    HeaderRule {
        field: HeaderField::PortOfLoading,
        label: "Puerto de Carga",
        missing_reason: "No se especificó el puerto o lugar de carga (embarque) de la mercancía.",
        missing_suggestion: "Indique el puerto o lugar de origen desde donde se embarca la mercancía.",
        format: None,
    },
    HeaderRule {
        field: HeaderField::PortOfDischarge,
        label: "Puerto de Descarga",
        missing_reason: "No se especificó el puerto o lugar de descarga/destino de la mercancía.",
        missing_suggestion: "Indique el puerto o lugar de destino donde llegará la mercancía.",
        format: None,
    },
    HeaderRule {
        field: HeaderField::CountryOfOrigin,
        label: "País de Origen",
        missing_reason: "No se indicó el país de origen de la mercancía.",
        missing_suggestion: "Especifique el país de origen de las mercancías listadas en la factura.",
        format: None,
    },
    HeaderRule {
        field: HeaderField::PaymentTerms,
        label: "Condiciones de Pago",
        missing_reason: "No se indicaron las condiciones de pago de la factura.",
        missing_suggestion: "Indique las condiciones o plazo de pago acordados (por ejemplo, pago a 30 días, contra entrega, etc.).",
        format: None,
    },
    HeaderRule {
        field: HeaderField::Currency,
        label: "Moneda",
        missing_reason: "No se especificó la moneda en que está expresada la factura.",
        missing_suggestion: "Indique la moneda de la transacción (por ejemplo USD, EUR, COP).",
        format: Some(FormatRule {
            format: HeaderFormat::CurrencyCode,
            reason: "El valor '{value}' no parece un código de moneda válido.",
            suggestion: "Use el código de moneda de tres letras (p.ej. USD, EUR, COP) correspondiente a la divisa de la factura.",
        }),
    },
    HeaderRule {
        field: HeaderField::TotalInvoiceValue,
        label: "Valor Total",
        missing_reason: "No se indicó el valor total de la factura.",
        missing_suggestion: "Incluya el valor total de la factura (suma de todos los ítems, en la moneda indicada).",
        format: Some(FormatRule {
            format: HeaderFormat::Amount,
            reason: "El valor total '{value}' no es un número válido.",
            suggestion: "Asegúrese de usar solo dígitos y punto/coma decimal en el valor total (ej: 12345.67).",
        }),
    },
];

/// Look up the rule for a header field.
pub fn header_rule(field: HeaderField) -> Option<&'static HeaderRule> {
    HEADER_RULES.iter().find(|r| r.field == field)
}

/// Validate all header fields. Returns every error found, in rule order.
pub fn validate_header(header: &HeaderFields) -> Vec<ValidationError> {
    HEADER_RULES
        .iter()
        .filter_map(|rule| rule.check(header))
        .collect()
}

/// Three ASCII letters after trimming, any case.
fn is_currency_code(s: &str) -> bool {
    let s = s.trim();
    s.len() == 3 && s.chars().all(|c| c.is_ascii_alphabetic())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ErrorKind;
    use serde_json::json;

    fn complete_header() -> HeaderFields {
        HeaderFields::from_iter([
            ("Supplier", json!("Shenzhen Export Co.")),
            ("SupplierAddress", json!("Shenzhen, China")),
            ("SupplierTaxID", json!("91440300MA5")),
            ("Customer", json!("Importadora Andina SAS")),
            ("CustomerAddress", json!("Bogotá, Colombia")),
            ("CustomerTaxID", json!("900123456-7")),
            ("InvoiceNumber", json!("INV-58846")),
            ("InvoiceDate", json!("15/03/2024")),
            ("Incoterm", json!("FOB")),
            ("PortOfLoading", json!("Shenzhen")),
            ("PortOfDischarge", json!("Buenaventura")),
            ("CountryOfOrigin", json!("China")),
            ("PaymentTerms", json!("30 días")),
            ("Currency", json!("USD")),
            ("TotalInvoiceValue", json!("1.500,00")),
        ])
    }

    #[test]
    fn complete_header_passes() {
        assert!(validate_header(&complete_header()).is_empty());
    }

    #[test]
    fn one_rule_per_field_in_order() {
        assert_eq!(HEADER_RULES.len(), HeaderField::ALL.len());
        for (rule, field) in HEADER_RULES.iter().zip(HeaderField::ALL) {
            assert_eq!(rule.field, field);
        }
    }

    #[test]
    fn empty_header_reports_every_field() {
        let errors = validate_header(&HeaderFields::new());
        assert_eq!(errors.len(), 15);
        assert!(errors.iter().all(|e| e.kind == ErrorKind::MissingField));
        assert_eq!(errors[0].field, "Exportador - Nombre");
        assert_eq!(errors[14].field, "Valor Total");
    }

    #[test]
    fn placeholder_counts_as_missing() {
        let mut header = complete_header();
        header.insert("InvoiceDate", "N/A");
        let errors = validate_header(&header);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ErrorKind::MissingField);
        assert_eq!(errors[0].field, "Fecha de Factura");
    }

    #[test]
    fn bad_date_is_format_error() {
        let mut header = complete_header();
        header.insert("InvoiceDate", "13/13/2024");
        let errors = validate_header(&header);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ErrorKind::InvalidFormat);
        assert_eq!(
            errors[0].reason,
            "El formato de la fecha '13/13/2024' no es válido."
        );
    }

    #[test]
    fn numeric_date_is_format_error() {
        let mut header = complete_header();
        header.insert("InvoiceDate", 20240315);
        let errors = validate_header(&header);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ErrorKind::InvalidFormat);
    }

    #[test]
    fn incoterm_case_insensitive() {
        let mut header = complete_header();
        header.insert("Incoterm", "fob");
        assert!(validate_header(&header).is_empty());

        header.insert("Incoterm", "XXX");
        let errors = validate_header(&header);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].reason, "El Incoterm 'XXX' no es reconocido.");
    }

    #[test]
    fn currency_code_shape() {
        let mut header = complete_header();
        header.insert("Currency", " usd ");
        assert!(validate_header(&header).is_empty());

        for bad in ["US$", "USDT", "12A", "€"] {
            header.insert("Currency", bad);
            let errors = validate_header(&header);
            assert_eq!(errors.len(), 1, "{bad}");
            assert_eq!(errors[0].field, "Moneda");
        }
    }

    #[test]
    fn total_must_be_numeric() {
        let mut header = complete_header();
        header.insert("TotalInvoiceValue", 1500);
        assert!(validate_header(&header).is_empty());

        header.insert("TotalInvoiceValue", "mil quinientos");
        let errors = validate_header(&header);
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0].reason,
            "El valor total 'mil quinientos' no es un número válido."
        );
    }

    #[test]
    fn rule_lookup() {
        let rule = header_rule(HeaderField::Currency).unwrap();
        assert_eq!(rule.label, "Moneda");
        assert_eq!(rule.format.unwrap().format, HeaderFormat::CurrencyCode);
        assert!(header_rule(HeaderField::Supplier).unwrap().format.is_none());
    }
}
