//! Envelope unwrapping and page normalization.
//!
//! Most endpoints wrap their payload as
//! `{ statusCode, status, responseCode, message, data }`; a few answer with
//! the payload itself. Paginated payloads carry a named list field next to
//! `pagination: { total, pages }`, except the request queue, which puts the
//! list in `data` and the pagination beside it. Everything is normalized
//! here, once.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::warn;

use backoffice_core::error::{ProtocolError, TransportError};
use backoffice_core::{ListQuery, Page, Result};

/// Pagination block; older endpoints call the page count `totalPages`.
#[derive(Debug, Default, Deserialize)]
struct WirePagination {
    #[serde(default)]
    total: Option<u64>,
    #[serde(default, alias = "totalPages")]
    pages: Option<u32>,
}

/// Fail on a 2xx envelope that nevertheless reports `status: false`.
fn check_status(map: &Map<String, Value>) -> Result<()> {
    if map.get("status") == Some(&Value::Bool(false)) {
        let status = map
            .get("statusCode")
            .and_then(Value::as_u64)
            .and_then(|s| u16::try_from(s).ok())
            .unwrap_or(200);
        let code = map
            .get("responseCode")
            .and_then(Value::as_str)
            .map(str::to_string);
        let message = map.get("message").and_then(Value::as_str).map(str::to_string);
        return Err(ProtocolError::new(status, code, message).into());
    }
    Ok(())
}

/// Strip the envelope, if there is one.
pub(crate) fn unwrap(value: Value) -> Result<Value> {
    match value {
        Value::Object(mut map) => {
            check_status(&map)?;
            match map.remove("data") {
                Some(data) => Ok(data),
                None => Ok(Value::Object(map)),
            }
        }
        other => Ok(other),
    }
}

/// Decode the payload of a single-record response.
pub(crate) fn decode<T: DeserializeOwned>(value: Value) -> Result<T> {
    Ok(serde_json::from_value(unwrap(value)?)?)
}

/// Decode a payload that may legitimately be absent.
///
/// Anything that is not a `T` is treated as absent; callers only use the
/// record to reconcile local state.
pub(crate) fn decode_optional<T: DeserializeOwned>(value: Value) -> Result<Option<T>> {
    match unwrap(value)? {
        Value::Null => Ok(None),
        payload => Ok(serde_json::from_value(payload).ok()),
    }
}

/// Decode a paginated payload into a [`Page`].
pub(crate) fn decode_page<T: DeserializeOwned>(
    value: Value,
    list_field: &str,
    query: &ListQuery,
) -> Result<Page<T>> {
    let mut body = match value {
        Value::Object(mut map) => {
            check_status(&map)?;
            if matches!(map.get("data"), Some(Value::Object(_))) {
                match map.remove("data") {
                    Some(Value::Object(inner)) => inner,
                    _ => map,
                }
            } else {
                map
            }
        }
        other => {
            return Err(TransportError::Decode {
                message: format!("expected a paginated object, got {}", kind(&other)),
            }
            .into());
        }
    };

    let items = body
        .remove(list_field)
        .or_else(|| body.remove("data"))
        .ok_or_else(|| TransportError::Decode {
            message: format!("missing list field '{}'", list_field),
        })?;
    let mut items: Vec<T> = serde_json::from_value(items)?;

    let pagination: WirePagination = match body.remove("pagination") {
        Some(p) => serde_json::from_value(p)?,
        None => WirePagination::default(),
    };

    let hint = query.page_size_hint();
    if items.len() > hint as usize {
        warn!(
            returned = items.len(),
            page_size_hint = hint,
            "Server returned more items than the page size, truncating"
        );
        items.truncate(hint as usize);
    }

    let total = pagination.total.unwrap_or(items.len() as u64);
    let page = match pagination.pages {
        Some(pages) => Page::new(items, total, pages),
        None => Page::with_computed_pages(items, total, hint),
    };
    Ok(page)
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use backoffice_core::Error;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Row {
        no: u64,
    }

    #[test]
    fn unwraps_enveloped_record() {
        let row: Row = decode(json!({
            "statusCode": 200, "status": true, "responseCode": "SUCCESS",
            "message": "ok", "data": { "no": 5 }
        }))
        .unwrap();
        assert_eq!(row, Row { no: 5 });
    }

    #[test]
    fn accepts_bare_record() {
        let row: Row = decode(json!({ "no": 6 })).unwrap();
        assert_eq!(row.no, 6);
    }

    #[test]
    fn status_false_is_protocol_error() {
        let err = decode::<Row>(json!({
            "statusCode": 409, "status": false, "responseCode": "DUPLICATE",
            "message": "Email already registered"
        }))
        .unwrap_err();
        match err {
            Error::Protocol(p) => {
                assert_eq!(p.status, 409);
                assert_eq!(p.response_code.as_deref(), Some("DUPLICATE"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn page_from_named_field_trusts_server_pages() {
        let page: Page<Row> = decode_page(
            json!({
                "status": true,
                "data": {
                    "pagination": { "page": "1", "total": 25, "pages": 3 },
                    "employees": [{ "no": 1 }, { "no": 2 }]
                }
            }),
            "employees",
            &ListQuery::first(),
        )
        .unwrap();
        assert_eq!(page.total, 25);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.items.len(), 2);
    }

    #[test]
    fn page_from_top_level_data_array() {
        let page: Page<Row> = decode_page(
            json!({
                "data": [{ "no": 1 }],
                "pagination": { "page": 1, "limit": 10, "total": 11, "totalPages": 2 }
            }),
            "requests",
            &ListQuery::first(),
        )
        .unwrap();
        assert_eq!(page.total, 11);
        assert_eq!(page.total_pages, 2);
    }

    #[test]
    fn missing_page_count_is_computed_from_hint() {
        let page: Page<Row> = decode_page(
            json!({ "pagination": { "total": 25 }, "users": [] }),
            "users",
            &ListQuery::first(),
        )
        .unwrap();
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn oversized_page_is_truncated_to_hint() {
        let rows: Vec<_> = (0..5).map(|no| json!({ "no": no })).collect();
        let query = ListQuery::first().with_page_size_hint(3);
        let page: Page<Row> =
            decode_page(json!({ "users": rows, "pagination": { "total": 5 } }), "users", &query)
                .unwrap();
        assert_eq!(page.items.len(), 3);
        assert_eq!(page.total_pages, 2);
    }

    #[test]
    fn missing_list_field_is_decode_error() {
        let err = decode_page::<Row>(json!({ "pagination": {} }), "roles", &ListQuery::first())
            .unwrap_err();
        assert!(matches!(err, Error::Transport(TransportError::Decode { .. })));
    }
}
