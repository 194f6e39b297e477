//! Service request and response type definitions.

use serde::{Deserialize, Serialize};

/// Body sent to both `/info` and `/download`.
#[derive(Debug, Serialize)]
pub struct MediaRequest<'a> {
    pub url: &'a str,
}

/// Video metadata returned by `/info`.
///
/// Every field except `is_playlist` is required. A missing or `null` value
/// fails deserialization, which the client reports as a malformed response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoInfo {
    pub title: String,
    pub thumbnail: String,
    pub duration: String,
    #[serde(default)]
    pub is_playlist: bool,
}

/// Health probe response.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

impl HealthResponse {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_video_info_without_playlist_flag() {
        let info: VideoInfo = serde_json::from_str(
            r#"{"title":"Test Video","thumbnail":"http://x/t.jpg","duration":"3:21"}"#,
        )
        .unwrap();
        assert_eq!(info.title, "Test Video");
        assert!(!info.is_playlist);
    }

    #[test]
    fn test_video_info_null_field_rejected() {
        let result: Result<VideoInfo, _> = serde_json::from_str(
            r#"{"title":"Test Video","thumbnail":null,"duration":"3:21","is_playlist":false}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_video_info_missing_field_rejected() {
        let result: Result<VideoInfo, _> =
            serde_json::from_str(r#"{"title":"Test Video","thumbnail":"http://x/t.jpg"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_request_body() {
        let body = serde_json::to_string(&MediaRequest {
            url: "https://youtube.com/watch?v=abc",
        })
        .unwrap();
        assert_eq!(body, r#"{"url":"https://youtube.com/watch?v=abc"}"#);
    }
}
