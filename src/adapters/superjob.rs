use crate::config::SuperJobSettings;
use crate::domain::model::{Continuation, Page, RawListing, Source};
use crate::utils::error::{EtlError, Result};
use serde::Deserialize;

pub const APP_ID_HEADER: &str = "X-Api-App-Id";

#[derive(Debug, Deserialize)]
struct VacanciesEnvelope {
    objects: Vec<Vacancy>,
    total: u64,
}

#[derive(Debug, Deserialize)]
struct Vacancy {
    currency: Option<String>,
    payment_from: Option<f64>,
    payment_to: Option<f64>,
}

impl From<Vacancy> for RawListing {
    fn from(vacancy: Vacancy) -> Self {
        RawListing {
            currency: vacancy.currency,
            payment_from: vacancy.payment_from,
            payment_to: vacancy.payment_to,
        }
    }
}

pub fn query(
    settings: &SuperJobSettings,
    query_prefix: &str,
    language: &str,
    page: u32,
) -> Vec<(&'static str, String)> {
    vec![
        ("keyword", format!("{} {}", query_prefix, language)),
        ("town", settings.town.clone()),
        ("catalogues", settings.catalogue.to_string()),
        ("page", page.to_string()),
        ("count", settings.per_page.to_string()),
    ]
}

pub fn parse_page(body: &[u8]) -> Result<Page> {
    let envelope: VacanciesEnvelope =
        serde_json::from_slice(body).map_err(|e| EtlError::MalformedPage {
            origin: Source::SuperJob,
            message: e.to_string(),
        })?;

    Ok(Page {
        listings: envelope.objects.into_iter().map(RawListing::from).collect(),
        continuation: Continuation::Total(envelope.total),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_page_maps_payment_fields() {
        let body = serde_json::json!({
            "objects": [
                {"id": 10, "payment_from": 120000, "payment_to": 0, "currency": "rub"},
                {"id": 11, "payment_from": 0, "payment_to": 0, "currency": "rub"},
                {"id": 12, "payment_from": 3000, "payment_to": 4000, "currency": "usd"}
            ],
            "total": 3,
            "more": false
        });

        let page = parse_page(body.to_string().as_bytes()).unwrap();

        assert_eq!(page.continuation, Continuation::Total(3));
        assert_eq!(
            page.listings,
            vec![
                RawListing::new(Some("rub"), Some(120000.0), Some(0.0)),
                RawListing::new(Some("rub"), Some(0.0), Some(0.0)),
                RawListing::new(Some("usd"), Some(3000.0), Some(4000.0)),
            ]
        );
    }

    #[test]
    fn test_parse_page_without_currency() {
        let page = parse_page(br#"{"objects": [{"payment_from": 50000}], "total": 1}"#).unwrap();
        assert_eq!(page.listings[0].currency, None);
        assert_eq!(page.listings[0].payment_to, None);
    }

    #[test]
    fn test_parse_page_rejects_garbage() {
        assert!(matches!(
            parse_page(b"<html>rate limited</html>"),
            Err(EtlError::MalformedPage {
                origin: Source::SuperJob,
                ..
            })
        ));
    }

    #[test]
    fn test_query_parameters() {
        let params = query(&SuperJobSettings::default(), "Программист", "Go", 1);

        assert_eq!(params[0], ("keyword", "Программист Go".to_string()));
        assert!(params.contains(&("town", "Москва".to_string())));
        assert!(params.contains(&("catalogues", "48".to_string())));
        assert!(params.contains(&("page", "1".to_string())));
        assert!(params.contains(&("count", "100".to_string())));
    }
}
