use chrono::{DateTime, FixedOffset};
use serde_json::json;

use crate::property::create_property;
use crate::{DataObject, Error, Record, config};

#[derive(DataObject, Debug, Clone, PartialEq)]
struct Developer {
    full_name: String,
    email: Option<String>,
    #[data_object(default = 1)]
    level: u8,
    is_lead: bool,
}

#[derive(DataObject, Debug, Clone, PartialEq)]
struct Project {
    title: String,
    #[data_object(default = "example.com")]
    domain: String,
    budget: f64,
    developers: Vec<Developer>,
}

#[derive(DataObject, Debug, Clone, PartialEq)]
struct Company {
    title: String,
    projects: Vec<Project>,
    ceo: Option<Developer>,
    #[data_object(rename = "foundedOn")]
    founded_at: Option<DateTime<FixedOffset>>,
}

fn sample() -> Company {
    Company::from_value(json!({
        "title": "Acme",
        "projects": [
            {
                "title": "Portal",
                "budget": "1250.5",
                "developers": [
                    { "fullName": "Ali", "email": "ali@example.com", "is_lead": 1 },
                    { "full_name": "Vali", "level": "3" }
                ]
            },
            { "title": "Billing", "domain": "pay.example.com", "developers": [] }
        ],
        "ceo": null
    }))
    .unwrap()
}

#[test]
fn hydrates_nested_graph() {
    let company = sample();

    assert_eq!(company.title, "Acme");
    assert_eq!(company.ceo, None);
    assert_eq!(company.founded_at, None);
    assert_eq!(company.projects.len(), 2);

    let portal = &company.projects[0];
    assert_eq!(portal.domain, "example.com");
    assert_eq!(portal.budget, 1250.5);
    assert_eq!(
        portal.developers[0],
        Developer {
            full_name: "Ali".into(),
            email: Some("ali@example.com".into()),
            level: 1,
            is_lead: true,
        }
    );
    assert_eq!(portal.developers[1].full_name, "Vali");
    assert_eq!(portal.developers[1].level, 3);
    assert!(!portal.developers[1].is_lead);

    let billing = &company.projects[1];
    assert_eq!(billing.domain, "pay.example.com");
    assert_eq!(billing.budget, 0.0);
    assert!(billing.developers.is_empty());
}

#[test]
fn round_trips_through_records() {
    let company = sample();

    assert_eq!(Company::from_array(company.to_array(false)).unwrap(), company);
    assert_eq!(Company::from_array(company.to_array(true)).unwrap(), company);
    assert_eq!(Company::from_array(company.to_snake_array(true)).unwrap(), company);
    assert_eq!(Company::from_json(&company.to_json(true)).unwrap(), company);
    assert_eq!(Company::from_record(&company).unwrap(), company);
}

#[test]
fn serializes_declared_names() {
    let company = sample();
    let record = json!(company.to_array(false));

    assert_eq!(record["foundedOn"], json!(null));
    assert_eq!(record["ceo"], json!(null));
    assert_eq!(
        record["projects"][0]["developers"][1],
        json!({ "fullName": "Vali", "email": null, "level": 3, "isLead": false })
    );

    let keys = company.to_array(false).keys().cloned().collect::<Vec<_>>();
    assert_eq!(keys, ["title", "projects", "ceo", "foundedOn"]);
}

#[test]
fn snake_case_and_trimming_apply_to_nested_objects() {
    let company = sample();

    let trimmed = json!(company.to_array(true));
    assert!(trimmed.get("ceo").is_none());
    assert!(trimmed["projects"][0]["developers"][1].get("email").is_none());

    let snake = json!(company.to_snake_array(false));
    assert_eq!(snake["projects"][0]["developers"][0]["full_name"], json!("Ali"));
    assert_eq!(snake["projects"][0]["developers"][0]["is_lead"], json!(true));
    assert_eq!(snake["founded_on"], json!(null));
}

#[test]
fn forget_property_removes_top_level_keys() {
    let company = sample();

    let record = company.to_array_forget_property(&["projects", "missing"], true);
    assert_eq!(json!(record), json!({ "title": "Acme" }));

    let record = company.all(false);
    assert_eq!(record.len(), 4);
}

/// Restores the process-wide configuration when dropped.
struct RestoreConfig(config::Config);

impl Drop for RestoreConfig {
    fn drop(&mut self) {
        config::set(self.0);
    }
}

#[test]
fn temporal_fields_use_the_configured_timezone() {
    let _restore = RestoreConfig(config::get());
    config::set_timezone("+05:00").unwrap();

    let company = Company::from_value(json!({ "title": "Acme", "foundedOn": "2024-01-31T09:51:00Z" })).unwrap();
    let founded = company.founded_at.unwrap();
    assert_eq!(founded.to_rfc3339(), "2024-01-31T14:51:00+05:00");
    assert_eq!(json!(company.to_array(true))["foundedOn"], json!("2024-01-31T14:51:00+05:00"));

    let company = Company::from_value(json!({ "title": "Acme", "founded_on": "2024-01-31 08:00:00" })).unwrap();
    assert_eq!(company.founded_at.unwrap().to_rfc3339(), "2024-01-31T08:00:00+05:00");

    let err = Company::from_value(json!({ "title": "Acme", "foundedOn": "last spring" })).unwrap_err();
    assert_eq!(err.field_path(), Some("foundedOn"));
}

#[test]
fn mismatches_carry_the_field_path() {
    let err = Company::from_value(json!({
        "projects": [
            { "title": "Portal" },
            { "title": "Billing", "developers": [{ "fullName": "Ali" }, "Vali"] }
        ]
    }))
    .unwrap_err();

    assert!(matches!(err, Error::TypeMismatch { type_name: "Company", .. }));
    assert_eq!(err.field_path(), Some("projects[1].developers[1]"));

    let err = Company::from_value(json!({ "projects": { "title": "Portal" } })).unwrap_err();
    assert_eq!(err.field_path(), Some("projects"));
}

#[test]
fn malformed_input_is_rejected() {
    assert!(matches!(
        Company::from_json("{not valid json"),
        Err(Error::MalformedInput { .. })
    ));
    assert!(matches!(
        Company::from_json("[1, 2]"),
        Err(Error::MalformedInput { .. })
    ));
    assert!(matches!(
        Company::from_value(json!("Acme")),
        Err(Error::MalformedInput { .. })
    ));
}

#[test]
fn empty_record_gives_zero_values() {
    let company = Company::from_array(Record::new()).unwrap();
    assert_eq!(company.title, "");
    assert!(company.projects.is_empty());
    assert_eq!(company.ceo, None);
}

#[test]
fn property_listing_of_a_serialized_object() {
    let developer = &sample().projects[0].developers[0];

    let listing = create_property(&json!(developer.to_snake_array(false)), true).unwrap();
    assert_eq!(
        listing,
        "pub fullName: String,\npub email: String,\npub level: i64,\npub isLead: bool,"
    );

    let err = create_property(&json!(42), true).unwrap_err();
    assert_eq!(err.code(), Some(Error::INVALID_MODEL_TYPE));
}
