use std::thread;

use serde_json::json;

use crate::{DataObject, cache};

#[derive(DataObject, Debug, PartialEq)]
struct Sensor {
    serial: String,
    readings: Vec<Reading>,
}

#[derive(DataObject, Debug, PartialEq)]
struct Reading {
    value: f64,
    unit: Option<String>,
}

#[test]
fn metadata_is_described_once() {
    let infos = thread::scope(|scope| {
        let handles = (0..8)
            .map(|i| {
                scope.spawn(move || {
                    let sensor = Sensor::from_value(json!({
                        "serial": format!("S-{i}"),
                        "readings": [{ "value": i }],
                    }))
                    .unwrap();
                    assert_eq!(sensor.readings[0].value, f64::from(i));
                    Sensor::object_info() as *const _ as usize
                })
            })
            .collect::<Vec<_>>();

        handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect::<Vec<_>>()
    });

    assert!(infos.windows(2).all(|pair| pair[0] == pair[1]));
    assert!(cache::contains::<Sensor>());
    assert!(cache::contains::<Reading>());
    assert!(cache::len() >= 2);
    assert!(core::ptr::eq(cache::fields::<Sensor>(), Sensor::object_info()));
}
