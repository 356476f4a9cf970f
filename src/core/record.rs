//! Adapter from loosely-shaped JSON into an [`InvoiceRecord`].
//!
//! Header fields arrive either as a mapping under `Fields` (or at the root)
//! or as a list of key/value objects whose key and value names vary between
//! producers. Line items sit under one of several container names. All of
//! that is resolved here so the rule sets only ever see one shape.

use serde_json::{Map, Value};

use super::error::FacturaError;
use super::types::{HeaderFields, InvoiceRecord, LineItem, is_truthy};

/// Entry key naming the header section.
pub const FIELDS_KEY: &str = "Fields";

/// Accepted names for the key of a header pair, in priority order.
pub static PAIR_KEY_SYNONYMS: &[&str] = &["Fields", "Field", "Nombre", "name"];

/// Accepted names for the value of a header pair, in priority order.
pub static PAIR_VALUE_SYNONYMS: &[&str] = &["Value", "Valor", "value"];

/// Accepted line item container names, in priority order.
pub static ITEM_CONTAINER_KEYS: &[&str] = &["Table", "Items", "Productos"];

impl InvoiceRecord {
    /// Build a record from parsed JSON.
    pub fn from_value(data: &Value) -> Result<Self, FacturaError> {
        let root = data
            .as_object()
            .ok_or_else(|| malformed("invoice root must be a JSON object"))?;
        let header = normalize_header(root)?;
        let items = select_items(root)?;
        Ok(InvoiceRecord { header, items })
    }

    /// Parse JSON bytes and build a record.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, FacturaError> {
        let value: Value = serde_json::from_slice(bytes)?;
        Self::from_value(&value)
    }

    pub fn from_json_str(s: &str) -> Result<Self, FacturaError> {
        let value: Value = serde_json::from_str(s)?;
        Self::from_value(&value)
    }
}

/// Resolve the header mapping from either supported shape.
pub fn normalize_header(root: &Map<String, Value>) -> Result<HeaderFields, FacturaError> {
    match root.get(FIELDS_KEY) {
        Some(Value::Array(pairs)) => {
            let mut header = HeaderFields::new();
            for (i, pair) in pairs.iter().enumerate() {
                let entry = pair
                    .as_object()
                    .ok_or_else(|| malformed(format!("Fields[{i}] must be an object")))?;
                let Some(Value::String(key)) = first_truthy(entry, PAIR_KEY_SYNONYMS) else {
                    continue;
                };
                let value = first_truthy(entry, PAIR_VALUE_SYNONYMS)
                    .or_else(|| PAIR_VALUE_SYNONYMS.last().and_then(|k| entry.get(*k)))
                    .cloned()
                    .unwrap_or(Value::Null);
                header.insert(key.clone(), value);
            }
            Ok(header)
        }
        Some(Value::Object(map)) => Ok(map.clone().into_iter().collect()),
        None => Ok(root.clone().into_iter().collect()),
        Some(_) => Err(malformed("Fields must be an object or a list of key/value objects")),
    }
}

/// Line items from the first container key present; none present means no items.
pub fn select_items(root: &Map<String, Value>) -> Result<Vec<LineItem>, FacturaError> {
    let Some((key, container)) = ITEM_CONTAINER_KEYS
        .iter()
        .find_map(|k| root.get(*k).map(|v| (*k, v)))
    else {
        return Ok(Vec::new());
    };
    match container {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                if !item.is_object() {
                    return Err(malformed(format!("{key}[{i}] must be an object")));
                }
                serde_json::from_value(item.clone())
                    .map_err(|e| malformed(format!("{key}[{i}]: {e}")))
            })
            .collect(),
        _ => Err(malformed(format!("{key} must be a list of items"))),
    }
}

/// First synonym whose value is truthy.
fn first_truthy<'a>(entry: &'a Map<String, Value>, names: &[&str]) -> Option<&'a Value> {
    names
        .iter()
        .filter_map(|name| entry.get(*name))
        .find(|v| is_truthy(Some(*v)))
}

fn malformed(msg: impl Into<String>) -> FacturaError {
    FacturaError::MalformedRecord(msg.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{HeaderField, ItemField};
    use serde_json::json;

    #[test]
    fn direct_mapping_under_fields() {
        let record = InvoiceRecord::from_value(&json!({
            "Fields": {"Currency": "USD", "Incoterm": "FOB"},
            "Items": []
        }))
        .unwrap();
        assert_eq!(record.header.get(HeaderField::Currency), Some(&json!("USD")));
        assert_eq!(record.header.len(), 2);
    }

    #[test]
    fn root_is_header_without_fields() {
        let record =
            InvoiceRecord::from_value(&json!({"Currency": "COP", "Observaciones": "urgente"}))
                .unwrap();
        assert_eq!(record.header.get(HeaderField::Currency), Some(&json!("COP")));
        assert_eq!(record.header.get_key("Observaciones"), Some(&json!("urgente")));
        assert_eq!(record.header.get_key("Currency"), Some(&json!("COP")));
        assert!(record.items.is_empty());
    }

    #[test]
    fn pair_synonyms_resolve() {
        let record = InvoiceRecord::from_value(&json!({
            "Fields": [
                {"Field": "Currency", "Valor": "USD"},
                {"Nombre": "Incoterm", "value": "CIF"},
                {"name": "InvoiceNumber", "Value": "F-1"},
                {"Fields": "Supplier", "Value": "ACME"}
            ]
        }))
        .unwrap();
        let h = &record.header;
        assert_eq!(h.get(HeaderField::Currency), Some(&json!("USD")));
        assert_eq!(h.get(HeaderField::Incoterm), Some(&json!("CIF")));
        assert_eq!(h.get(HeaderField::InvoiceNumber), Some(&json!("F-1")));
        assert_eq!(h.get(HeaderField::Supplier), Some(&json!("ACME")));
    }

    #[test]
    fn falsy_value_falls_through_to_later_synonym() {
        let record = InvoiceRecord::from_value(&json!({
            "Fields": [
                {"Field": "Currency", "Value": "", "Valor": "EUR"},
                {"Field": "TotalInvoiceValue", "Value": 0, "value": ""},
                {"Field": "Incoterm"}
            ]
        }))
        .unwrap();
        let h = &record.header;
        assert_eq!(h.get(HeaderField::Currency), Some(&json!("EUR")));
        assert_eq!(h.get(HeaderField::TotalInvoiceValue), Some(&json!("")));
        assert_eq!(h.get(HeaderField::Incoterm), Some(&Value::Null));
    }

    #[test]
    fn pairs_without_key_are_skipped_and_duplicates_overwrite() {
        let record = InvoiceRecord::from_value(&json!({
            "Fields": [
                {"Value": "orphan"},
                {"Field": "", "Value": "blank"},
                {"Field": "Currency", "Value": "USD"},
                {"Field": "Currency", "Value": "EUR"}
            ]
        }))
        .unwrap();
        assert_eq!(record.header.len(), 1);
        assert_eq!(record.header.get(HeaderField::Currency), Some(&json!("EUR")));
    }

    #[test]
    fn container_priority() {
        let record = InvoiceRecord::from_value(&json!({
            "Productos": [{"Description": "c"}],
            "Items": [{"Description": "b"}],
            "Table": [{"Description": "a"}, {"Description": "a2"}]
        }))
        .unwrap();
        assert_eq!(record.items.len(), 2);
        assert_eq!(record.items[0].get(ItemField::Description), Some(&json!("a")));

        let record = InvoiceRecord::from_value(&json!({"Productos": [{"HSCode": "1"}]})).unwrap();
        assert_eq!(record.items[0].get(ItemField::HsCode), Some(&json!("1")));
    }

    #[test]
    fn null_container_means_no_items() {
        let record = InvoiceRecord::from_value(&json!({"Table": null, "Items": [{}]})).unwrap();
        assert!(record.items.is_empty());
    }

    #[test]
    fn malformed_shapes() {
        for bad in [
            json!([1, 2]),
            json!({"Fields": "Currency=USD"}),
            json!({"Fields": [["Currency", "USD"]]}),
            json!({"Items": {"Description": "x"}}),
            json!({"Items": ["x"]}),
        ] {
            let err = InvoiceRecord::from_value(&bad).unwrap_err();
            assert!(matches!(err, FacturaError::MalformedRecord(_)), "{bad}");
        }
    }

    #[test]
    fn invalid_json_bytes() {
        let err = InvoiceRecord::from_json_slice(b"{not json").unwrap_err();
        assert!(matches!(err, FacturaError::Json(_)));
    }
}
