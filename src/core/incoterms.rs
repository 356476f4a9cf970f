//! Incoterms delivery term codes.
//!
//! Covers the Incoterms 2020 rules plus DAT, which was replaced by DPU but
//! still appears on invoices.

/// Check whether `code` is a recognized Incoterm.
///
/// The comparison ignores surrounding whitespace and case.
pub fn is_known_incoterm(code: &str) -> bool {
    let code = code.trim().to_uppercase();
    INCOTERMS.binary_search(&code.as_str()).is_ok()
}

/// Sorted list of accepted Incoterm codes.
/// Sorted for binary search.
pub static INCOTERMS: &[&str] = &[
    "CFR", // Cost and Freight
    "CIF", // Cost, Insurance and Freight
    "CIP", // Carriage and Insurance Paid To
    "CPT", // Carriage Paid To
    "DAP", // Delivered at Place
    "DAT", // Delivered at Terminal (Incoterms 2010)
    "DDP", // Delivered Duty Paid
    "DPU", // Delivered at Place Unloaded
    "EXW", // Ex Works
    "FAS", // Free Alongside Ship
    "FCA", // Free Carrier
    "FOB", // Free on Board
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_incoterms() {
        assert!(is_known_incoterm("FOB"));
        assert!(is_known_incoterm("fob"));
        assert!(is_known_incoterm(" Cif "));
        assert!(is_known_incoterm("DAT"));
        assert!(is_known_incoterm("EXW"));
    }

    #[test]
    fn unknown_incoterms() {
        assert!(!is_known_incoterm("XXX"));
        assert!(!is_known_incoterm(""));
        assert!(!is_known_incoterm("FOB Shanghai"));
        assert!(!is_known_incoterm("DEQ"));
    }

    #[test]
    fn list_is_sorted() {
        assert_eq!(INCOTERMS.len(), 12);
        for window in INCOTERMS.windows(2) {
            assert!(
                window[0] < window[1],
                "incoterms not sorted: {} >= {}",
                window[0],
                window[1]
            );
        }
    }
}
