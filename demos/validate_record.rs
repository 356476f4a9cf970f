use factura_dian::core::*;
use serde_json::json;

fn main() {
    // Header fields as key/value pairs, the way OCR exports often deliver them
    let data = json!({
        "Fields": [
            {"Field": "Supplier", "Value": "Shenzhen Export Co."},
            {"Field": "SupplierAddress", "Value": "Shenzhen, China"},
            {"Field": "SupplierTaxID", "Value": "91440300MA5"},
            {"Field": "Customer", "Value": "Importadora Andina SAS"},
            {"Field": "CustomerAddress", "Value": "Bogotá, Colombia"},
            {"Field": "CustomerTaxID", "Value": "N/A"},
            {"Field": "InvoiceNumber", "Value": "INV-58846"},
            {"Field": "InvoiceDate", "Value": "15/03/2024"},
            {"Field": "Incoterm", "Value": "fob"},
            {"Field": "PortOfLoading", "Value": "Shenzhen"},
            {"Field": "PortOfDischarge", "Value": "Buenaventura"},
            {"Field": "CountryOfOrigin", "Value": "China"},
            {"Field": "PaymentTerms", "Value": "30 días"},
            {"Field": "Currency", "Value": "USD"},
            {"Field": "TotalInvoiceValue", "Value": "1.550,00"}
        ],
        "Table": [
            {
                "Description": "Audífonos inalámbricos",
                "Quantity": "100",
                "UnitOfMeasurement": "unidades",
                "UnitPrice": "12,50",
                "NetValuePerItem": "1.250,00",
                "HSCode": "8518.30.00",
                "Weight": "25,4",
                "NumberOfPackagesBoxes": "5"
            },
            {
                "Description": "Cargadores USB",
                "Quantity": "200",
                "UnitOfMeasurement": "unidades",
                "UnitPrice": "1.5",
                "NetValuePerItem": "310.00",
                "HSCode": "8504.40",
                "Weight": "8",
                "NumberOfPackagesBoxes": "2.5",
                "Currency": "EUR"
            }
        ]
    });

    let record = InvoiceRecord::from_value(&data).expect("record should have a valid shape");
    println!(
        "{} header field(s), {} item(s)",
        record.header.len(),
        record.items.len()
    );

    let result = validate_invoice(&record);
    println!("Resultado: {}", result.status);
    for e in &result.errors {
        println!("  {e}");
    }

    // The report format handed to callers
    println!("\n{}", serde_json::to_string_pretty(&result).unwrap());

    // The recognizers are usable on their own
    println!("\nparse_numeric(\"1.234,56\") = {:?}", parse_numeric("1.234,56"));
    println!("is_valid_date(\"03/04/2024\") = {}", is_valid_date("03/04/2024"));
}
