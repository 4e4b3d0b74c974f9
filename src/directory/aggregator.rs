//! Pagination Aggregator
//!
//! Follows continuation tokens across a paged directory method and folds the
//! pages into one result.

use std::future::Future;

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{BoxError, ProxyError, Result};

/// One response object from the directory API.
pub type Page = Map<String, Value>;

/// Field carrying the continuation token, both in requests and responses.
pub const NEXT_TOKEN_FIELD: &str = "NextToken";

/// Synthetic field reporting how many records the result holds.
pub const RECORD_COUNT_FIELD: &str = "RecordCount";

// == Aggregated Result ==
/// Final shape of an aggregated call.
#[derive(Debug, Clone, PartialEq)]
pub enum AggregatedResult {
    /// The only page, passed through with `RecordCount = 1` added
    Single(Page),
    /// Elements of every page, in page order, under `key`
    Collected { key: String, items: Vec<Value> },
}

impl AggregatedResult {
    /// Value reported in the `RecordCount` field.
    pub fn record_count(&self) -> usize {
        match self {
            AggregatedResult::Single(_) => 1,
            AggregatedResult::Collected { items, .. } => items.len(),
        }
    }

    /// Converts into the JSON object handed back to callers.
    pub fn into_value(self) -> Value {
        match self {
            AggregatedResult::Single(page) => Value::Object(page),
            AggregatedResult::Collected { key, items } => {
                let count = items.len();
                let mut object = Map::new();
                object.insert(key, Value::Array(items));
                object.insert(RECORD_COUNT_FIELD.to_string(), Value::from(count));
                Value::Object(object)
            }
        }
    }
}

impl Serialize for AggregatedResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            AggregatedResult::Single(page) => page.serialize(serializer),
            AggregatedResult::Collected { key, items } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry(key, items)?;
                map.serialize_entry(RECORD_COUNT_FIELD, &items.len())?;
                map.end()
            }
        }
    }
}

// == Aggregate ==
/// Calls `call` repeatedly, following `NextToken`, until a page comes back
/// without one.
///
/// If that terminal page arrives before any elements have been collected it
/// is returned as [`AggregatedResult::Single`]. The check runs before the
/// terminal page's own elements are appended. Every other run yields
/// [`AggregatedResult::Collected`].
///
/// A failed call surfaces as [`ProxyError::RemoteCall`] tagged with
/// `method_name`. Nothing is retried and the number of pages is not capped.
pub async fn aggregate<F, Fut>(
    method_name: &str,
    result_array_key: &str,
    mut params: Page,
    mut call: F,
) -> Result<AggregatedResult>
where
    F: FnMut(Page) -> Fut,
    Fut: Future<Output = std::result::Result<Page, BoxError>>,
{
    let mut token = Some(String::new());
    let mut accumulated: Vec<Value> = Vec::new();
    let mut pages = 0usize;

    while let Some(current) = token.take() {
        if !current.is_empty() {
            params.insert(NEXT_TOKEN_FIELD.to_string(), Value::String(current));
        }

        let mut page = call(params.clone())
            .await
            .map_err(|source| ProxyError::remote_call(method_name, source))?;
        pages += 1;

        match continuation_token(&page) {
            Some(next) => token = Some(next),
            None if accumulated.is_empty() => {
                debug!(method = %method_name, pages, "Single record response");
                page.insert(RECORD_COUNT_FIELD.to_string(), Value::from(1));
                return Ok(AggregatedResult::Single(page));
            }
            None => {}
        }

        let items = take_elements(&mut page, result_array_key)
            .map_err(|source| ProxyError::remote_call(method_name, source))?;
        debug!(
            method = %method_name,
            page = pages,
            elements = items.len(),
            more = token.is_some(),
            "Collected page"
        );
        accumulated.extend(items);
    }

    Ok(AggregatedResult::Collected {
        key: result_array_key.to_string(),
        items: accumulated,
    })
}

/// Non-empty string token, if the page has one.
fn continuation_token(page: &Page) -> Option<String> {
    match page.get(NEXT_TOKEN_FIELD) {
        Some(Value::String(token)) if !token.is_empty() => Some(token.clone()),
        _ => None,
    }
}

fn take_elements(page: &mut Page, key: &str) -> std::result::Result<Vec<Value>, BoxError> {
    match page.remove(key) {
        Some(Value::Array(items)) => Ok(items),
        Some(_) => Err(format!("response field '{}' is not an array", key).into()),
        None => Err(format!("response has no '{}' field", key).into()),
    }
}
