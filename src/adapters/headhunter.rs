use crate::config::HeadHunterSettings;
use crate::domain::model::{Continuation, Page, RawListing, Source};
use crate::utils::error::{EtlError, Result};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct VacanciesEnvelope {
    items: Vec<Vacancy>,
    pages: u32,
}

#[derive(Debug, Deserialize)]
struct Vacancy {
    salary: Option<Salary>,
}

#[derive(Debug, Deserialize)]
struct Salary {
    currency: Option<String>,
    from: Option<f64>,
    to: Option<f64>,
}

impl From<Vacancy> for RawListing {
    fn from(vacancy: Vacancy) -> Self {
        match vacancy.salary {
            Some(salary) => RawListing {
                currency: salary.currency,
                payment_from: salary.from,
                payment_to: salary.to,
            },
            None => RawListing::default(),
        }
    }
}

pub fn query(
    settings: &HeadHunterSettings,
    query_prefix: &str,
    language: &str,
    page: u32,
) -> Vec<(&'static str, String)> {
    let mut params = vec![("text", format!("{} {}", query_prefix, language))];
    if let Some(specialization) = &settings.specialization {
        params.push(("specialization", specialization.clone()));
    }
    params.extend([
        ("area", settings.area.to_string()),
        ("period", settings.period.to_string()),
        ("only_with_salary", "true".to_string()),
        ("page", page.to_string()),
        ("per_page", settings.per_page.to_string()),
    ]);
    params
}

pub fn parse_page(body: &[u8]) -> Result<Page> {
    let envelope: VacanciesEnvelope =
        serde_json::from_slice(body).map_err(|e| EtlError::MalformedPage {
            origin: Source::HeadHunter,
            message: e.to_string(),
        })?;

    Ok(Page {
        listings: envelope.items.into_iter().map(RawListing::from).collect(),
        continuation: Continuation::Pages(envelope.pages),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_page_maps_salary_fields() {
        let body = serde_json::json!({
            "items": [
                {"id": "1", "salary": {"from": 100000, "to": 150000, "currency": "RUR", "gross": true}},
                {"id": "2", "salary": {"from": null, "to": 90000, "currency": "USD"}},
                {"id": "3", "salary": null}
            ],
            "found": 3,
            "pages": 1,
            "page": 0
        });

        let page = parse_page(body.to_string().as_bytes()).unwrap();

        assert_eq!(page.continuation, Continuation::Pages(1));
        assert_eq!(page.listings.len(), 3);
        assert_eq!(
            page.listings[0],
            RawListing::new(Some("RUR"), Some(100000.0), Some(150000.0))
        );
        assert_eq!(page.listings[1], RawListing::new(Some("USD"), None, Some(90000.0)));
        assert_eq!(page.listings[2], RawListing::default());
    }

    #[test]
    fn test_parse_page_rejects_missing_envelope() {
        let err = parse_page(br#"{"objects": [], "total": 0}"#).unwrap_err();
        assert!(matches!(
            err,
            EtlError::MalformedPage {
                origin: Source::HeadHunter,
                ..
            }
        ));
    }

    #[test]
    fn test_query_parameters() {
        let params = query(&HeadHunterSettings::default(), "Программист", "Python", 2);

        assert!(params.contains(&("text", "Программист Python".to_string())));
        assert!(params.contains(&("specialization", "1.221".to_string())));
        assert!(params.contains(&("area", "1".to_string())));
        assert!(params.contains(&("only_with_salary", "true".to_string())));
        assert!(params.contains(&("page", "2".to_string())));
        assert!(params.contains(&("per_page", "100".to_string())));
    }
}
