#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Every upload produces a report, whatever the bytes.
    let report = factura_dian::upload::validate_upload("fuzz.json", data);
    assert!(!report.detalle.errors.is_empty() || report.estado == "Cumple");
});
