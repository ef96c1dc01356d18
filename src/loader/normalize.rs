//! Mapping from a raw listing to the employer and vacancy rows it produces.

use serde::{Deserialize, Deserializer};

use crate::error::SkipReason;
use crate::models::employer::Employer;
use crate::models::vacancy::NewVacancy;
use crate::sources::RawRecord;

/// The fields of a listing the store cares about.
#[derive(Debug, Deserialize)]
struct RawVacancy {
    name: Option<String>,
    alternate_url: Option<String>,
    employer: Option<RawEmployer>,
    salary: Option<RawSalary>,
    address: Option<RawAddress>,
}

#[derive(Debug, Deserialize)]
struct RawEmployer {
    #[serde(default, deserialize_with = "deserialize_external_id")]
    id: Option<String>,
    name: Option<String>,
    alternate_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawSalary {
    from: Option<i32>,
    to: Option<i32>,
}

#[derive(Debug, Deserialize)]
struct RawAddress {
    city: Option<String>,
}

/// Employer ids arrive as strings but some payloads carry bare numbers.
fn deserialize_external_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum TextOrNumber {
        Text(String),
        Number(u64),
    }

    Ok(Option::<TextOrNumber>::deserialize(deserializer)?.map(|id| match id {
        TextOrNumber::Text(s) => s,
        TextOrNumber::Number(n) => n.to_string(),
    }))
}

/// A listing flattened into the rows it will be stored as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedRecord {
    pub employer: Employer,
    pub vacancy: NewVacancy,
}

/// Collapse a salary range to one value: the lower bound when given,
/// otherwise the upper bound.
pub fn resolve_salary(from: Option<i32>, to: Option<i32>) -> Option<i32> {
    from.or(to)
}

pub fn normalize(raw: &RawRecord) -> Result<NormalizedRecord, SkipReason> {
    let listing = RawVacancy::deserialize(&raw.0)?;

    let employer = match listing.employer {
        Some(RawEmployer {
            id: Some(id),
            name: Some(name),
            alternate_url: Some(url),
        }) => Employer {
            employer_id: id,
            employer_name: name,
            employer_url: url,
        },
        _ => return Err(SkipReason::MissingEmployer),
    };

    let salary = listing
        .salary
        .and_then(|s| resolve_salary(s.from, s.to));
    let city = listing.address.and_then(|a| a.city);

    let vacancy = NewVacancy {
        vacancy_name: listing.name,
        vacancy_url: listing.alternate_url,
        city,
        salary,
        employer_id: employer.employer_id.clone(),
    };

    Ok(NormalizedRecord { employer, vacancy })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn listing(salary: Value, address: Value) -> RawRecord {
        RawRecord(json!({
            "id": "93284",
            "name": "Backend Developer",
            "alternate_url": "https://hh.ru/vacancy/93284",
            "employer": {
                "id": "80",
                "name": "Acme",
                "alternate_url": "https://hh.ru/employer/80",
            },
            "salary": salary,
            "address": address,
        }))
    }

    #[test]
    fn salary_prefers_lower_bound() {
        assert_eq!(resolve_salary(Some(1000), Some(2000)), Some(1000));
        assert_eq!(resolve_salary(None, Some(2000)), Some(2000));
        assert_eq!(resolve_salary(Some(1000), None), Some(1000));
        assert_eq!(resolve_salary(None, None), None);
    }

    #[test]
    fn listing_is_flattened() {
        let record = listing(
            json!({ "from": 5000, "to": null, "currency": "RUR" }),
            json!({ "city": "Moscow", "street": "Tverskaya" }),
        );

        let normalized = normalize(&record).unwrap();
        assert_eq!(
            normalized.employer,
            Employer {
                employer_id: "80".to_string(),
                employer_name: "Acme".to_string(),
                employer_url: "https://hh.ru/employer/80".to_string(),
            }
        );
        assert_eq!(normalized.vacancy.vacancy_name.as_deref(), Some("Backend Developer"));
        assert_eq!(normalized.vacancy.city.as_deref(), Some("Moscow"));
        assert_eq!(normalized.vacancy.salary, Some(5000));
        assert_eq!(normalized.vacancy.employer_id, "80");
    }

    #[test]
    fn empty_salary_range_is_kept_as_null() {
        let record = listing(json!({ "from": null, "to": null }), json!({ "city": "Kazan" }));
        let normalized = normalize(&record).unwrap();
        assert_eq!(normalized.vacancy.salary, None);
    }

    #[test]
    fn missing_city_does_not_skip() {
        let record = listing(json!({ "from": 100 }), json!({ "city": null }));
        assert_eq!(normalize(&record).unwrap().vacancy.city, None);

        let record = listing(json!({ "from": 100 }), Value::Null);
        assert_eq!(normalize(&record).unwrap().vacancy.city, None);
    }

    #[test]
    fn numeric_employer_ids_are_accepted() {
        let mut record = listing(json!({ "from": 1 }), json!({}));
        record.0["employer"]["id"] = json!(1740);
        assert_eq!(normalize(&record).unwrap().employer.employer_id, "1740");
    }

    #[test]
    fn missing_employer_is_skipped() {
        let mut record = listing(json!({ "from": 1 }), json!({}));
        record.0["employer"] = Value::Null;
        assert!(matches!(normalize(&record), Err(SkipReason::MissingEmployer)));

        let mut record = listing(json!({ "from": 1 }), json!({}));
        record.0.as_object_mut().unwrap().remove("employer");
        assert!(matches!(normalize(&record), Err(SkipReason::MissingEmployer)));

        let mut record = listing(json!({ "from": 1 }), json!({}));
        record.0["employer"] = json!({ "name": "No Id Inc" });
        assert!(matches!(normalize(&record), Err(SkipReason::MissingEmployer)));
    }

    #[test]
    fn wrongly_typed_fields_are_malformed() {
        let record = listing(json!({ "from": "lots" }), json!({}));
        assert!(matches!(normalize(&record), Err(SkipReason::Malformed(_))));

        let record = RawRecord(json!(42));
        assert!(matches!(normalize(&record), Err(SkipReason::Malformed(_))));
    }
}
