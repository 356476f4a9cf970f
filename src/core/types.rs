use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::ValidationError;

/// Invoice-level (header) fields checked by the header rule set, in rule order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeaderField {
    Supplier,
    SupplierAddress,
    SupplierTaxId,
    Customer,
    CustomerAddress,
    CustomerTaxId,
    InvoiceNumber,
    InvoiceDate,
    Incoterm,
    PortOfLoading,
    PortOfDischarge,
    CountryOfOrigin,
    PaymentTerms,
    Currency,
    TotalInvoiceValue,
}

impl HeaderField {
    /// All header fields in the order their errors are reported.
    pub const ALL: [HeaderField; 15] = [
        HeaderField::Supplier,
        HeaderField::SupplierAddress,
        HeaderField::SupplierTaxId,
        HeaderField::Customer,
        HeaderField::CustomerAddress,
        HeaderField::CustomerTaxId,
        HeaderField::InvoiceNumber,
        HeaderField::InvoiceDate,
        HeaderField::Incoterm,
        HeaderField::PortOfLoading,
        HeaderField::PortOfDischarge,
        HeaderField::CountryOfOrigin,
        HeaderField::PaymentTerms,
        HeaderField::Currency,
        HeaderField::TotalInvoiceValue,
    ];

    /// Key under which the field appears in the input record.
    pub fn key(&self) -> &'static str {
        match self {
            HeaderField::Supplier => "Supplier",
            HeaderField::SupplierAddress => "SupplierAddress",
            HeaderField::SupplierTaxId => "SupplierTaxID",
            HeaderField::Customer => "Customer",
            HeaderField::CustomerAddress => "CustomerAddress",
            HeaderField::CustomerTaxId => "CustomerTaxID",
            HeaderField::InvoiceNumber => "InvoiceNumber",
            HeaderField::InvoiceDate => "InvoiceDate",
            HeaderField::Incoterm => "Incoterm",
            HeaderField::PortOfLoading => "PortOfLoading",
            HeaderField::PortOfDischarge => "PortOfDischarge",
            HeaderField::CountryOfOrigin => "CountryOfOrigin",
            HeaderField::PaymentTerms => "PaymentTerms",
            HeaderField::Currency => "Currency",
            HeaderField::TotalInvoiceValue => "TotalInvoiceValue",
        }
    }
}

/// Line item fields, in the order their errors are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemField {
    Description,
    Quantity,
    UnitOfMeasurement,
    UnitPrice,
    NetValuePerItem,
    HsCode,
    Weight,
    NumberOfPackagesBoxes,
    Currency,
}

impl ItemField {
    pub fn key(&self) -> &'static str {
        match self {
            ItemField::Description => "Description",
            ItemField::Quantity => "Quantity",
            ItemField::UnitOfMeasurement => "UnitOfMeasurement",
            ItemField::UnitPrice => "UnitPrice",
            ItemField::NetValuePerItem => "NetValuePerItem",
            ItemField::HsCode => "HSCode",
            ItemField::Weight => "Weight",
            ItemField::NumberOfPackagesBoxes => "NumberOfPackagesBoxes",
            ItemField::Currency => "Currency",
        }
    }
}

/// Canonical header mapping: normalized field name to raw value.
///
/// Keys that are not [`HeaderField`]s are kept but never validated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HeaderFields(BTreeMap<String, Value>);

impl HeaderFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a raw value, replacing any earlier value for the same key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, field: HeaderField) -> Option<&Value> {
        self.0.get(field.key())
    }

    /// Look up a key outside the known header fields.
    pub fn get_key(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for HeaderFields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut fields = HeaderFields::new();
        for (k, v) in iter {
            fields.insert(k, v);
        }
        fields
    }
}

/// One product line of a commercial invoice, with raw (unparsed) values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LineItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_of_measurement: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<Value>,
    /// Declared line subtotal (quantity × unit price).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub net_value_per_item: Option<Value>,
    /// Harmonized System tariff code, digits optionally grouped by dots.
    #[serde(rename = "HSCode", default, skip_serializing_if = "Option::is_none")]
    pub hs_code: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_packages_boxes: Option<Value>,
    /// Optional per-item currency; must match the invoice currency when both are set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<Value>,
}

impl LineItem {
    pub fn get(&self, field: ItemField) -> Option<&Value> {
        match field {
            ItemField::Description => self.description.as_ref(),
            ItemField::Quantity => self.quantity.as_ref(),
            ItemField::UnitOfMeasurement => self.unit_of_measurement.as_ref(),
            ItemField::UnitPrice => self.unit_price.as_ref(),
            ItemField::NetValuePerItem => self.net_value_per_item.as_ref(),
            ItemField::HsCode => self.hs_code.as_ref(),
            ItemField::Weight => self.weight.as_ref(),
            ItemField::NumberOfPackagesBoxes => self.number_of_packages_boxes.as_ref(),
            ItemField::Currency => self.currency.as_ref(),
        }
    }

    pub fn set(&mut self, field: ItemField, value: impl Into<Value>) {
        let slot = match field {
            ItemField::Description => &mut self.description,
            ItemField::Quantity => &mut self.quantity,
            ItemField::UnitOfMeasurement => &mut self.unit_of_measurement,
            ItemField::UnitPrice => &mut self.unit_price,
            ItemField::NetValuePerItem => &mut self.net_value_per_item,
            ItemField::HsCode => &mut self.hs_code,
            ItemField::Weight => &mut self.weight,
            ItemField::NumberOfPackagesBoxes => &mut self.number_of_packages_boxes,
            ItemField::Currency => &mut self.currency,
        };
        *slot = Some(value.into());
    }

    /// Build an item from `(field, value)` pairs.
    pub fn from_pairs<V: Into<Value>>(pairs: impl IntoIterator<Item = (ItemField, V)>) -> Self {
        let mut item = LineItem::default();
        for (field, value) in pairs {
            item.set(field, value);
        }
        item
    }
}

/// One already-parsed invoice: header mapping plus ordered line items.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvoiceRecord {
    pub header: HeaderFields,
    pub items: Vec<LineItem>,
}

impl InvoiceRecord {
    pub fn new(header: HeaderFields, items: Vec<LineItem>) -> Self {
        Self { header, items }
    }
}

/// Binary verdict of a validation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComplianceStatus {
    #[serde(rename = "Cumple")]
    Compliant,
    #[serde(rename = "No cumple")]
    NonCompliant,
}

impl ComplianceStatus {
    /// Report label (`Cumple` / `No cumple`).
    pub fn label(&self) -> &'static str {
        match self {
            ComplianceStatus::Compliant => "Cumple",
            ComplianceStatus::NonCompliant => "No cumple",
        }
    }
}

impl std::fmt::Display for ComplianceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of validating one invoice record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    #[serde(rename = "resultado")]
    pub status: ComplianceStatus,
    #[serde(rename = "errores")]
    pub errors: Vec<ValidationError>,
}

impl ValidationResult {
    /// Status is `Compliant` exactly when `errors` is empty.
    pub fn from_errors(errors: Vec<ValidationError>) -> Self {
        let status = if errors.is_empty() {
            ComplianceStatus::Compliant
        } else {
            ComplianceStatus::NonCompliant
        };
        Self { status, errors }
    }

    pub fn is_compliant(&self) -> bool {
        self.status == ComplianceStatus::Compliant
    }
}

/// Markers that count as "no value" once trimmed and lowercased.
static EMPTY_MARKERS: &[&str] = &["", "n/a", "na", "none"];

/// A field is empty when absent, `null`, or a blank/placeholder string.
///
/// Numbers, booleans, arrays and objects are never empty.
pub fn is_empty_value(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => EMPTY_MARKERS.contains(&s.trim().to_lowercase().as_str()),
        Some(_) => false,
    }
}

/// Loose truthiness: `null`, `false`, zero and empty containers/strings are false.
pub fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(a)) => !a.is_empty(),
        Some(Value::Object(o)) => !o.is_empty(),
    }
}

/// Text form of a raw value: strings verbatim, everything else as JSON.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_markers() {
        assert!(is_empty_value(None));
        assert!(is_empty_value(Some(&Value::Null)));
        assert!(is_empty_value(Some(&json!("   "))));
        assert!(is_empty_value(Some(&json!(" N/A "))));
        assert!(is_empty_value(Some(&json!("na"))));
        assert!(is_empty_value(Some(&json!("None"))));
        assert!(!is_empty_value(Some(&json!("n.a."))));
        assert!(!is_empty_value(Some(&json!(0))));
        assert!(!is_empty_value(Some(&json!(false))));
    }

    #[test]
    fn truthiness() {
        assert!(!is_truthy(Some(&json!(0))));
        assert!(!is_truthy(Some(&json!(""))));
        assert!(!is_truthy(Some(&json!([]))));
        assert!(is_truthy(Some(&json!(" "))));
        assert!(is_truthy(Some(&json!(0.5))));
    }

    #[test]
    fn value_text_renders_numbers_as_json() {
        assert_eq!(value_text(&json!("1.234,56")), "1.234,56");
        assert_eq!(value_text(&json!(10)), "10");
        assert_eq!(value_text(&json!(5.5)), "5.5");
    }

    #[test]
    fn status_follows_errors() {
        assert!(ValidationResult::from_errors(vec![]).is_compliant());
        let r = ValidationResult::from_errors(vec![ValidationError::missing("x", "y", "z")]);
        assert_eq!(r.status, ComplianceStatus::NonCompliant);
        assert_eq!(r.status.to_string(), "No cumple");
    }

    #[test]
    fn line_item_uses_wire_names() {
        let item: LineItem =
            serde_json::from_value(json!({"HSCode": "8471.30", "NetValuePerItem": "50.00"})).unwrap();
        assert_eq!(item.get(ItemField::HsCode), Some(&json!("8471.30")));
        assert_eq!(item.get(ItemField::NetValuePerItem), Some(&json!("50.00")));
        assert_eq!(item.get(ItemField::Quantity), None);
    }
}
