use factura_dian::upload::validate_uploads;

fn main() {
    let files: [(&str, &[u8]); 3] = [
        (
            "completa.json",
            br#"{"Fields": {"Currency": "USD", "TotalInvoiceValue": "0"}, "Items": []}"#,
        ),
        ("truncada.json", br#"{"Fields": ["#),
        ("lista.json", b"[1, 2, 3]"),
    ];

    let batch = validate_uploads(files);
    for report in &batch.resultados {
        println!(
            "{}: {} ({} error(es))",
            report.filename,
            report.estado,
            report.detalle.errors.len()
        );
    }

    println!("\n{}", serde_json::to_string_pretty(&batch).unwrap());
}
