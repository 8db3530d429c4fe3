use axum::{body::Bytes, extract::State, http::StatusCode, response::Response};
use serde::de::Error as _;
use serde_json::{Map, Value};

use crate::{envelope::write_success, ApiError, AppState};

const USER_ID_KEY: &str = "user_id";

#[derive(Debug, Default, PartialEq, Eq)]
pub struct CreateSquadDto {
    /// Absent or `null` means `0`, which never matches a user.
    pub user_id: i64,
}

impl CreateSquadDto {
    /// Decode the first JSON value in `body`, whatever the content type.
    ///
    /// A top-level `null` is an empty request.  Keys match `user_id`
    /// case-insensitively, an exact match winning.  Unknown keys and anything
    /// after the first value are ignored.
    pub fn from_body(body: &[u8]) -> Result<Self, serde_json::Error> {
        let first = serde_json::Deserializer::from_slice(body)
            .into_iter::<Option<Map<String, Value>>>()
            .next()
            .ok_or_else(|| serde_json::Error::custom("empty request body"))??;

        let Some(fields) = first else {
            return Ok(Self::default());
        };

        let value = fields.get(USER_ID_KEY).or_else(|| {
            fields
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(USER_ID_KEY))
                .map(|(_, value)| value)
        });

        let user_id = match value {
            None | Some(Value::Null) => 0,
            Some(value) => serde_json::from_value(value.clone())?,
        };

        Ok(Self { user_id })
    }
}

/// `POST /squad` — create a squad administered by `user_id`.
///
/// A body that does not decode is answered with 400 before the store is touched.
pub async fn create(State(state): State<AppState>, body: Bytes) -> Result<Response, ApiError> {
    let input = CreateSquadDto::from_body(&body).map_err(|e| ApiError::InvalidBody(e.to_string()))?;

    let outcome = state.workflow.create_squad(input.user_id).await?;

    Ok(write_success(StatusCode::OK, outcome))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(body: &str) -> Result<i64, serde_json::Error> {
        CreateSquadDto::from_body(body.as_bytes()).map(|dto| dto.user_id)
    }

    #[test]
    fn plain_object() {
        assert_eq!(decode(r#"{"user_id": 42}"#).unwrap(), 42);
    }

    #[test]
    fn null_body_and_null_field_mean_zero() {
        assert_eq!(decode("null").unwrap(), 0);
        assert_eq!(decode(r#"{"user_id": null}"#).unwrap(), 0);
        assert_eq!(decode("{}").unwrap(), 0);
    }

    #[test]
    fn key_matches_ignoring_case() {
        assert_eq!(decode(r#"{"USER_ID": 42}"#).unwrap(), 42);
        assert_eq!(decode(r#"{"User_Id": 7, "user_id": 42}"#).unwrap(), 42);
    }

    #[test]
    fn trailing_content_is_ignored() {
        assert_eq!(decode(r#"{"user_id": 42} trailing"#).unwrap(), 42);
    }

    #[test]
    fn malformed_bodies_are_rejected() {
        for body in ["", "not json", r#"{"user_id": "#, r#"{"user_id": "42"}"#, r#"{"user_id": 4.2}"#, "[42]", "42"] {
            assert!(decode(body).is_err(), "body: {body:?}");
        }
    }
}
