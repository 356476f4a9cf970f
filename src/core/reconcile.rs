use rust_decimal::Decimal;

use super::error::{ErrorKind, ValidationError};
use super::items::TOLERANCE;
use super::numeric::round_half_even;

/// Field label of the record-level reconciliation error.
pub const RECONCILIATION_FIELD: &str = "Valor Total vs Suma Ítems";

/// Compare the sum of item subtotals with the declared invoice total.
///
/// The sum is rounded to two decimals first; the check is skipped when the
/// total did not parse. A sum of `None` (overflowed) never matches.
pub fn reconcile_total(
    item_sum: Option<Decimal>,
    declared_total: Option<Decimal>,
) -> Option<ValidationError> {
    let total = declared_total?;
    let rounded = item_sum.map(|sum| round_half_even(sum, 2));
    let mismatch = rounded
        .and_then(|sum| sum.checked_sub(total))
        .is_none_or(|diff| diff.abs() > TOLERANCE);
    if !mismatch {
        return None;
    }
    let shown = rounded.map_or_else(|| "fuera de rango".to_string(), |sum| sum.to_string());
    Some(ValidationError::new(
        ErrorKind::ArithmeticMismatch,
        RECONCILIATION_FIELD,
        format!(
            "La suma de los valores de los ítems ({shown}) no coincide con el valor total de la factura ({total})."
        ),
        "Verifique que la suma de todos los subtotales de productos coincida exactamente con el valor total de la factura.",
    ))
}
