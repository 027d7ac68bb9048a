use serde::{Deserialize, Serialize};

use crate::models::ApiError;

#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ApiStatus {
    Waiting,
    Error,
    Success,
    #[serde(other)]
    Other,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct RequestRecord<T> {
    pub status: Option<ApiStatus>,
    pub error: Option<ApiError>,
    pub response: Option<T>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FetchState<T> {
    Pending,
    Error(ApiError),
    Ready(T),
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self::Pending
    }
}

impl<T: Default> From<RequestRecord<T>> for FetchState<T> {
    fn from(record: RequestRecord<T>) -> Self {
        match record.status {
            None | Some(ApiStatus::Waiting) => Self::Pending,
            Some(ApiStatus::Error) => Self::Error(record.error.unwrap_or_default()),
            Some(ApiStatus::Success | ApiStatus::Other) => {
                Self::Ready(record.response.unwrap_or_default())
            }
        }
    }
}

impl<T> From<anyhow::Result<T>> for FetchState<T> {
    fn from(result: anyhow::Result<T>) -> Self {
        match result {
            Ok(value) => Self::Ready(value),
            Err(err) => Self::Error(ApiError::new(format!("{err:#}"))),
        }
    }
}

impl<T> FetchState<T> {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            Self::Pending | Self::Error(_) => None,
        }
    }

    pub fn error(&self) -> Option<&ApiError> {
        match self {
            Self::Error(err) => Some(err),
            Self::Pending | Self::Ready(_) => None,
        }
    }

    pub fn render_with<R>(
        &self,
        pending: impl FnOnce() -> R,
        error: impl FnOnce(&ApiError) -> R,
        ready: impl FnOnce(&T) -> R,
    ) -> R {
        match self {
            Self::Pending => pending(),
            Self::Error(err) => error(err),
            Self::Ready(value) => ready(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;

    use super::*;
    use crate::models::ManifestResponse;

    fn record(json: &str) -> FetchState<ManifestResponse> {
        serde_json::from_str::<RequestRecord<ManifestResponse>>(json)
            .unwrap()
            .into()
    }

    #[test]
    fn missing_or_waiting_status_is_pending() {
        assert_eq!(record("{}"), FetchState::Pending);
        assert_eq!(record(r#"{"status": "waiting"}"#), FetchState::Pending);
        assert!(record(r#"{"status": "waiting", "response": {}}"#).is_pending());
    }

    #[test]
    fn error_status_carries_payload() {
        assert_eq!(
            record(r#"{"status": "error", "error": {"message": "Not found", "status": 404}}"#),
            FetchState::Error(ApiError {
                message: "Not found".to_owned(),
                status: Some(404),
            })
        );
        assert_eq!(
            record(r#"{"status": "error"}"#),
            FetchState::Error(ApiError::default())
        );
    }

    #[test]
    fn success_status_is_ready_even_without_response() {
        assert_eq!(
            record(r#"{"status": "success"}"#),
            FetchState::Ready(ManifestResponse::default())
        );

        let state = record(r#"{"status": "success", "response": {"log_count": 4}}"#);
        assert_eq!(state.ready().and_then(|r| r.log_count), Some(4));
    }

    #[test]
    fn unrecognized_status_falls_through_to_ready() {
        let state = record(r#"{"status": "complete", "response": {"log_count": 2}}"#);
        assert_eq!(state.ready().and_then(|r| r.log_count), Some(2));

        assert_eq!(
            record(r#"{"status": "bogus"}"#),
            FetchState::Ready(ManifestResponse::default())
        );
    }

    #[test]
    fn results_map_to_ready_or_error() {
        let ok = FetchState::from(Ok::<u32, anyhow::Error>(7));
        assert_eq!(ok, FetchState::Ready(7));

        let failed = FetchState::<u32>::from(Err(
            anyhow!("disk gone").context("reading manifest.json"),
        ));
        assert_eq!(
            failed,
            FetchState::Error(ApiError::new("reading manifest.json: disk gone"))
        );
    }

    #[test]
    fn render_with_selects_one_branch() {
        let describe = |state: &FetchState<u32>| {
            state.render_with(
                || "loading".to_owned(),
                |err| format!("error: {err}"),
                |value| format!("value {value}"),
            )
        };

        assert_eq!(describe(&FetchState::Pending), "loading");
        assert_eq!(
            describe(&FetchState::Error(ApiError::new("boom"))),
            "error: boom"
        );
        assert_eq!(describe(&FetchState::Ready(3)), "value 3");
        assert_eq!(
            FetchState::<u32>::Error(ApiError::new("boom")).error(),
            Some(&ApiError::new("boom"))
        );
        assert_eq!(FetchState::Ready(3).error(), None);
    }
}
