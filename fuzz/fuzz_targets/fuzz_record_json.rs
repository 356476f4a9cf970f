#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Malformed records are errors, never panics; any record validates.
    if let Ok(record) = factura_dian::InvoiceRecord::from_json_slice(data) {
        let _ = factura_dian::validate_invoice(&record);
    }
});
