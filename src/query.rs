//! Query-string parsing for the list endpoint: pagination keys vs field filters.

use crate::error::OperationError;
use crate::model::{Comparator, Where};
use crate::schema::ResolvedModel;
use serde_json::Value;

/// Reserved pagination keys; everything else is a candidate filter.
const PAGINATION_KEYS: [&str; 3] = ["cursor", "skip", "take"];

/// What the query string parsed into. `skip`/`take` stay `None` when
/// the key is absent; callers must not substitute defaults here.
#[derive(Clone, Debug, Default)]
pub struct ParsedQuery {
    pub cursor: Option<String>,
    pub skip: Option<i64>,
    pub take: Option<i64>,
    pub filters: Where,
}

/// Parse ordered query pairs against a model's declared fields.
///
/// Pagination keys take their first occurrence; filter keys are
/// processed in query-string order, so duplicates overwrite
/// (last-write-wins). Filter values stay literal strings, never coerced
/// to the field's type. The first key that names no declared field
/// fails the whole parse with a `BadRequest`.
pub fn parse_query_params(
    model_name: &str,
    model: &ResolvedModel,
    pairs: &[(String, String)],
) -> Result<ParsedQuery, OperationError> {
    let mut parsed = ParsedQuery::default();

    for (key, value) in pairs {
        match key.as_str() {
            "cursor" => {
                if parsed.cursor.is_none() {
                    parsed.cursor = Some(value.clone());
                }
            }
            "skip" => {
                if parsed.skip.is_none() {
                    parsed.skip = Some(parse_page_number(model_name, key, value)?);
                }
            }
            "take" => {
                if parsed.take.is_none() {
                    parsed.take = Some(parse_page_number(model_name, key, value)?);
                }
            }
            _ => {
                if !model.has_field(key) {
                    return Err(OperationError::BadRequest(format!(
                        "Failed to query the \"{}\" model: unknown property \"{}\".",
                        model_name, key
                    )));
                }
                parsed.filters.insert(
                    key.clone(),
                    Comparator::Equals(Value::String(value.clone())),
                );
            }
        }
    }

    debug_assert!(PAGINATION_KEYS.iter().all(|k| !parsed.filters.contains_key(*k)));
    Ok(parsed)
}

fn parse_page_number(model_name: &str, key: &str, value: &str) -> Result<i64, OperationError> {
    value.parse::<i64>().map_err(|_| {
        OperationError::BadRequest(format!(
            "Failed to query the \"{}\" model: the \"{}\" parameter must be an integer, got \"{}\".",
            model_name, key, value
        ))
    })
}
