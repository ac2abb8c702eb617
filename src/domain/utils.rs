//! Parameter validation shared by the `query_ripe` method

use serde_json::Value;

use crate::errors::AppError;

pub const DEFAULT_LIMIT: usize = 10;
pub const MAX_LIMIT: usize = 1_000;

pub fn normalize_query(query: Option<&Value>) -> Result<String, AppError> {
    match query {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(value)) => Ok(value.clone()),
        Some(_) => Err(AppError::invalid_params("query must be a string")),
    }
}

/// Missing limits fall back to the default; oversized ones are clamped to `MAX_LIMIT`.
pub fn normalize_limit(limit: Option<&Value>) -> Result<usize, AppError> {
    let Some(value) = limit.filter(|value| !value.is_null()) else {
        return Ok(DEFAULT_LIMIT);
    };

    if let Some(limit) = value.as_u64() {
        if limit == 0 {
            return Err(AppError::invalid_params("limit must be a positive integer"));
        }

        return Ok(usize::try_from(limit).map_or(MAX_LIMIT, |limit| limit.min(MAX_LIMIT)));
    }

    if value.is_i64() {
        return Err(AppError::invalid_params("limit must be a positive integer"));
    }

    Err(AppError::invalid_params("limit must be an integer"))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{normalize_limit, normalize_query, DEFAULT_LIMIT, MAX_LIMIT};

    #[test]
    fn missing_query_defaults_to_empty_string() {
        assert_eq!(normalize_query(None).expect("default query"), "");
        assert_eq!(normalize_query(Some(&json!(null))).expect("null query"), "");
    }

    #[test]
    fn query_is_passed_through_untouched() {
        let query = normalize_query(Some(&json!(" 193.0.6.142 "))).expect("string query");
        assert_eq!(query, " 193.0.6.142 ");
    }

    #[test]
    fn rejects_non_string_query() {
        let error = normalize_query(Some(&json!(193))).expect_err("numeric query");
        assert!(error.to_string().contains("invalid params"));
    }

    #[test]
    fn missing_limit_defaults() {
        assert_eq!(normalize_limit(None).expect("default limit"), DEFAULT_LIMIT);
        assert_eq!(
            normalize_limit(Some(&json!(null))).expect("null limit"),
            DEFAULT_LIMIT
        );
    }

    #[test]
    fn clamps_limit_above_max() {
        let limit = normalize_limit(Some(&json!(MAX_LIMIT + 1))).expect("clamped limit");
        assert_eq!(limit, MAX_LIMIT);

        let limit = normalize_limit(Some(&json!(u64::MAX))).expect("clamped limit");
        assert_eq!(limit, MAX_LIMIT);
    }

    #[test]
    fn rejects_non_positive_limit() {
        for value in [json!(0), json!(-1), json!(i64::MIN)] {
            let error = normalize_limit(Some(&value)).expect_err("non-positive limit");
            assert_eq!(
                error.to_string(),
                "invalid params: limit must be a positive integer"
            );
        }
    }

    #[test]
    fn rejects_non_integer_limit() {
        for value in [json!(2.5), json!("5"), json!(true), json!([5])] {
            let error = normalize_limit(Some(&value)).expect_err("non-integer limit");
            assert_eq!(error.to_string(), "invalid params: limit must be an integer");
        }
    }
}
