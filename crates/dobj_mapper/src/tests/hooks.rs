use alloc::format;

use serde_json::json;

use crate::error::Result;
use crate::{DataObject, Error, Record};

#[derive(DataObject, Debug)]
#[data_object(prepare = Self::compute_gross)]
struct Invoice {
    net: f64,
    #[data_object(default = 0.2)]
    tax_rate: f64,
    #[data_object(skip)]
    gross: f64,
    #[data_object(parameters)]
    raw: Record,
}

impl Invoice {
    fn compute_gross(&mut self, parameters: &Record) -> Result<()> {
        if self.net < 0.0 {
            return Err(Error::prepare(format!("negative net amount {}", self.net)));
        }
        if parameters.contains_key("tax_exempt") {
            self.tax_rate = 0.0;
        }
        self.gross = self.net * (1.0 + self.tax_rate);
        Ok(())
    }
}

#[test]
fn prepare_sees_assigned_fields() {
    let invoice = Invoice::from_value(json!({ "net": 100 })).unwrap();
    assert_eq!(invoice.tax_rate, 0.2);
    assert!((invoice.gross - 120.0).abs() < 1e-9);

    let invoice = Invoice::from_value(json!({ "net": 100, "tax_exempt": true })).unwrap();
    assert_eq!(invoice.gross, 100.0);
}

#[test]
fn parameters_receive_the_raw_record() {
    let input = json!({ "net": "50", "note": "paid in cash" });
    let invoice = Invoice::from_value(input.clone()).unwrap();

    assert_eq!(json!(invoice.raw), input);
    assert_eq!(invoice.net, 50.0);
}

#[test]
fn skipped_and_parameters_fields_are_not_declared() {
    let info = Invoice::object_info();
    assert_eq!(info.field_names().collect::<Vec<_>>(), ["net", "taxRate"]);

    let invoice = Invoice::from_value(json!({ "net": 10, "gross": 999, "raw": {} })).unwrap();
    assert_eq!(json!(invoice.to_array(false)), json!({ "net": 10.0, "taxRate": 0.2 }));
}

#[test]
fn failing_prepare_aborts_hydration() {
    let err = Invoice::from_value(json!({ "net": -1 })).unwrap_err();

    assert!(matches!(err, Error::Prepare(_)));
    assert_eq!(err.to_string(), "prepare hook failed: negative net amount -1");
}
