#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Must not panic — unparseable input returns None.
        let _ = factura_dian::parse_numeric(s);
        let _ = factura_dian::is_valid_date(s);
        let _ = factura_dian::is_hs_code(s);
    }
});
