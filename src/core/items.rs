//! Line item rules.
//!
//! Each item is checked for presence and format of its fields, currency
//! consistency with the header and `quantity × unit price = subtotal`. The
//! item subtotals are summed for reconciliation against the invoice total.

use log::{trace, warn};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::Value;

use super::error::{ErrorKind, ValidationError};
use super::numeric::{format_amount, parse_value, round_half_even};
use super::types::{ItemField, LineItem, is_empty_value, is_truthy, value_text};

/// Maximum absolute difference tolerated between two amounts.
pub const TOLERANCE: Decimal = dec!(0.01);

/// Format constraint for a present item field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemFormat {
    /// Must parse as a number.
    Numeric,
    /// Must parse as a number with no fractional part.
    WholeNumber,
    /// Digit groups optionally separated by dots.
    HsCode,
}

/// Format rule with message templates. `{n}` is the 1-based product index,
/// `{value}` the raw value.
#[derive(Debug, Clone, Copy)]
pub struct ItemFormatRule {
    pub format: ItemFormat,
    pub reason: &'static str,
    pub suggestion: &'static str,
}

/// Static rule for one required item field.
#[derive(Debug, Clone, Copy)]
pub struct ItemRule {
    pub field: ItemField,
    /// Label prefix; the error field reads `"{label} (Producto {n})"`.
    pub label: &'static str,
    pub missing_reason: &'static str,
    pub missing_suggestion: &'static str,
    pub format: Option<ItemFormatRule>,
}

/// Item rules in reporting order.
pub static ITEM_RULES: &[ItemRule] = &[
    ItemRule {
        field: ItemField::Description,
        label: "Descripción",
        missing_reason: "No se proporcionó la descripción del producto.",
        missing_suggestion: "Incluya una descripción detallada para el producto {n}.",
        format: None,
    },
    ItemRule {
        field: ItemField::Quantity,
        label: "Cantidad",
        missing_reason: "No se proporcionó la cantidad del producto.",
        missing_suggestion: "Incluya la cantidad del producto {n} en la unidad indicada.",
        format: Some(ItemFormatRule {
            format: ItemFormat::Numeric,
            reason: "La cantidad '{value}' del producto {n} no es numérica.",
            suggestion: "Indique una cantidad numérica (solo dígitos, puede incluir decimales si aplica).",
        }),
    },
    ItemRule {
        field: ItemField::UnitOfMeasurement,
        label: "Unidad",
        missing_reason: "No se indicó la unidad de medida del producto.",
        missing_suggestion: "Incluya la unidad de medida (ej. Kg, piezas, cajas) para el producto {n}.",
        format: None,
    },
    ItemRule {
        field: ItemField::UnitPrice,
        label: "Precio Unitario",
        missing_reason: "No se proporcionó el precio unitario del producto.",
        missing_suggestion: "Incluya el precio unitario del producto {n} en la moneda de la factura.",
        format: Some(ItemFormatRule {
            format: ItemFormat::Numeric,
            reason: "El precio unitario '{value}' del producto {n} no es un número válido.",
            suggestion: "Verifique el formato; el precio unitario debe ser un valor numérico (ej: 123.45).",
        }),
    },
    ItemRule {
        field: ItemField::NetValuePerItem,
        label: "Valor Total Ítem",
        missing_reason: "No se proporcionó el valor total (subtotal) para el ítem.",
        missing_suggestion: "Incluya el valor total (cantidad × precio) para el producto {n}.",
        format: Some(ItemFormatRule {
            format: ItemFormat::Numeric,
            reason: "El valor total '{value}' del producto {n} no es un número válido.",
            suggestion: "Verifique el formato; el subtotal del producto debe ser numérico.",
        }),
    },
    ItemRule {
        field: ItemField::HsCode,
        label: "Código HS",
        missing_reason: "No se proporcionó el código arancelario (HS) del producto.",
        missing_suggestion: "Incluya el código HS (6 dígitos o más) correspondiente al producto {n}.",
        format: Some(ItemFormatRule {
            format: ItemFormat::HsCode,
            reason: "El código HS '{value}' del producto {n} tiene un formato inválido.",
            suggestion: "Verifique el código; debe consistir solo de números (puede separarlo en grupos con puntos).",
        }),
    },
    ItemRule {
        field: ItemField::Weight,
        label: "Peso",
        missing_reason: "No se proporcionó el peso del producto.",
        missing_suggestion: "Incluya el peso (neto o bruto, según corresponda) del producto {n}.",
        format: Some(ItemFormatRule {
            format: ItemFormat::Numeric,
            reason: "El peso '{value}' del producto {n} no es un valor numérico válido.",
            suggestion: "Verifique el valor; el peso debe ser numérico (puede incluir decimales).",
        }),
    },
    ItemRule {
        field: ItemField::NumberOfPackagesBoxes,
        label: "Número de Paquetes",
        missing_reason: "No se indicó el número de paquetes o cajas del producto.",
        missing_suggestion: "Incluya la cantidad de paquetes, cajas u otras unidades de empaque para el producto {n}.",
        format: Some(ItemFormatRule {
            format: ItemFormat::WholeNumber,
            reason: "El valor '{value}' para los paquetes del producto {n} no es un número entero válido.",
            suggestion: "Verifique el número de paquetes; debe ser un número entero (ej: 1, 5, 10).",
        }),
    },
];

/// Parse state of a numeric item field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldAmount {
    /// Absent or empty.
    Missing,
    /// Present but not a number.
    Invalid,
    Parsed(Decimal),
}

impl FieldAmount {
    pub fn value(&self) -> Option<Decimal> {
        match self {
            FieldAmount::Parsed(v) => Some(*v),
            _ => None,
        }
    }

    fn of(value: Option<&Value>) -> Self {
        if is_empty_value(value) {
            return FieldAmount::Missing;
        }
        match value.and_then(parse_value) {
            Some(v) => FieldAmount::Parsed(v),
            None => FieldAmount::Invalid,
        }
    }
}

/// What an item adds to the running sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contribution {
    /// The parsed `NetValuePerItem`.
    Declared(Decimal),
    /// `quantity × unit price`, used when the subtotal is present but unparseable.
    Estimated(Decimal),
}

impl Contribution {
    pub fn amount(&self) -> Decimal {
        match self {
            Contribution::Declared(v) | Contribution::Estimated(v) => *v,
        }
    }
}

/// Result of checking one line item.
#[derive(Debug, Clone)]
pub struct ItemReport {
    /// 1-based position of the item.
    pub index: usize,
    pub errors: Vec<ValidationError>,
    pub quantity: FieldAmount,
    pub unit_price: FieldAmount,
    pub net_value: FieldAmount,
}

impl ItemReport {
    /// Amount this item adds to the reconciliation sum, if any.
    pub fn contribution(&self) -> Option<Contribution> {
        match (self.net_value, self.quantity, self.unit_price) {
            (FieldAmount::Parsed(net), _, _) => Some(Contribution::Declared(net)),
            (FieldAmount::Invalid, FieldAmount::Parsed(q), FieldAmount::Parsed(p)) => {
                q.checked_mul(p).map(Contribution::Estimated)
            }
            _ => None,
        }
    }
}

/// Errors for all items plus the accumulated subtotal sum.
#[derive(Debug, Clone)]
pub struct ItemsOutcome {
    pub errors: Vec<ValidationError>,
    /// Unrounded sum of item contributions; `None` once the sum overflows.
    pub sum: Option<Decimal>,
    /// 1-based indices of items whose contribution was estimated.
    pub estimated: Vec<usize>,
}

/// Check one item. `index` is 1-based.
pub fn validate_item(index: usize, item: &LineItem, header_currency: Option<&Value>) -> ItemReport {
    let mut errors = Vec::new();

    for rule in ITEM_RULES {
        if let Some(error) = check_rule(rule, index, item.get(rule.field)) {
            errors.push(error);
        }
    }

    let item_currency = item.get(ItemField::Currency).filter(|v| is_truthy(Some(*v)));
    let header_currency = header_currency.filter(|v| is_truthy(Some(*v)));
    if let (Some(item_cur), Some(header_cur)) = (item_currency, header_currency) {
        let item_text = value_text(item_cur);
        let header_text = value_text(header_cur);
        if item_text.trim().to_uppercase() != header_text.trim().to_uppercase() {
            errors.push(ValidationError::new(
                ErrorKind::CurrencyMismatch,
                format!("Moneda (Producto {index})"),
                format!(
                    "La moneda del producto {index} ({item_text}) difiere de la moneda de la factura ({header_text})."
                ),
                "Asegúrese de que todos los ítems estén expresados en la misma moneda que la factura.",
            ));
        }
    }

    let quantity = FieldAmount::of(item.get(ItemField::Quantity));
    let unit_price = FieldAmount::of(item.get(ItemField::UnitPrice));
    let net_value = FieldAmount::of(item.get(ItemField::NetValuePerItem));

    if let (FieldAmount::Parsed(q), FieldAmount::Parsed(p), FieldAmount::Parsed(net)) =
        (quantity, unit_price, net_value)
    {
        if let Some(expected) = q.checked_mul(p).map(|v| round_half_even(v, 2)) {
            let off = net.checked_sub(expected).map(|d| d.abs() > TOLERANCE);
            if off.unwrap_or(true) {
                let raw = |f: ItemField| item.get(f).map(value_text).unwrap_or_default();
                errors.push(ValidationError::new(
                    ErrorKind::ArithmeticMismatch,
                    format!("Valor Total Ítem (Producto {index})"),
                    format!(
                        "El valor total del producto {index} ({}) no coincide con cantidad × precio unitario.",
                        raw(ItemField::NetValuePerItem)
                    ),
                    format!(
                        "Corrija el subtotal del producto {index}: {} × {} debería ser aproximadamente {}.",
                        raw(ItemField::Quantity),
                        raw(ItemField::UnitPrice),
                        format_amount(expected)
                    ),
                ));
            }
        }
    }

    ItemReport {
        index,
        errors,
        quantity,
        unit_price,
        net_value,
    }
}

/// Check every item in order and accumulate the subtotal sum.
pub fn validate_items(items: &[LineItem], header_currency: Option<&Value>) -> ItemsOutcome {
    let mut errors = Vec::new();
    let mut sum = Some(Decimal::ZERO);
    let mut estimated = Vec::new();

    for (i, item) in items.iter().enumerate() {
        let report = validate_item(i + 1, item, header_currency);
        match report.contribution() {
            Some(contribution) => {
                if let Contribution::Estimated(_) = contribution {
                    estimated.push(report.index);
                }
                sum = sum.and_then(|s| s.checked_add(contribution.amount()));
                match sum {
                    Some(s) => trace!("item {}: {:?}, running sum {}", report.index, contribution, s),
                    None => warn!("item {}: running sum overflowed", report.index),
                }
            }
            None => trace!("item {}: no contribution", report.index),
        }
        errors.extend(report.errors);
    }

    ItemsOutcome {
        errors,
        sum,
        estimated,
    }
}

fn check_rule(rule: &ItemRule, index: usize, value: Option<&Value>) -> Option<ValidationError> {
    let field = format!("{} (Producto {index})", rule.label);
    let n = index.to_string();
    if is_empty_value(value) {
        return Some(ValidationError::missing(
            field,
            rule.missing_reason,
            rule.missing_suggestion.replace("{n}", &n),
        ));
    }
    let (value, format) = (value?, rule.format?);
    let ok = match format.format {
        ItemFormat::Numeric => parse_value(value).is_some(),
        ItemFormat::WholeNumber => parse_value(value).is_some_and(|v| v == v.trunc()),
        ItemFormat::HsCode => is_hs_code(&value_text(value)),
    };
    if ok {
        return None;
    }
    let text = value_text(value);
    let render = |t: &str| t.replace("{value}", &text).replace("{n}", &n);
    Some(ValidationError::invalid(
        field,
        render(format.reason),
        render(format.suggestion),
    ))
}

/// HS code shape: dot-separated groups of digits, and only digits once the
/// dots are removed. Surrounding whitespace is ignored.
pub fn is_hs_code(code: &str) -> bool {
    let code = code.trim();
    let grouped = !code.is_empty()
        && code
            .split('.')
            .all(|group| !group.is_empty() && group.bytes().all(|b| b.is_ascii_digit()));
    let stripped = code.replace('.', "");
    let digits_only = !stripped.is_empty() && stripped.bytes().all(|b| b.is_ascii_digit());
    grouped && digits_only
}
