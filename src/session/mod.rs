//! Session module: the client-side orchestration core.
//!
//! This module provides:
//! - The session state record
//! - Pure `(state, event) -> (state, effect)` transitions
//! - An actor that owns the state and runs network calls and saves
//! - A cloneable handle the shell drives it through

mod actor;
mod handle;
pub mod machine;
pub mod state;

pub use actor::{SessionActor, SessionMessage};
pub use handle::SessionHandle;
pub use machine::{transition, Action, Effect, Event};
pub use state::{Operation, OperationStatus, Phase, SessionState};

use std::sync::Arc;

use tokio::sync::{mpsc, watch};

use crate::api::MediaService;
use crate::save::SaveTrigger;

/// User actions queued ahead of the actor. Busy-time actions are dropped
/// by the state machine, not held here.
const SESSION_CHANNEL_CAPACITY: usize = 16;

/// Create a session and spawn its actor.
///
/// `extension` is appended to the video title when saving.
pub fn spawn_session(
    service: Arc<dyn MediaService>,
    saver: Arc<dyn SaveTrigger>,
    extension: impl Into<String>,
) -> SessionHandle {
    let (sender, receiver) = mpsc::channel(SESSION_CHANNEL_CAPACITY);
    let (snapshots, state) = watch::channel(SessionState::default());

    let actor = SessionActor::new(service, saver, extension.into(), receiver, snapshots);
    tokio::spawn(actor.run());

    SessionHandle::new(sender, state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;
    use tokio::sync::Notify;

    use crate::api::VideoInfo;
    use crate::error::{Error, Failure, Result};

    const URL: &str = "https://youtube.com/watch?v=abc";

    fn sample_info() -> VideoInfo {
        VideoInfo {
            title: "Test Video".to_string(),
            thumbnail: "http://x/t.jpg".to_string(),
            duration: "3:21".to_string(),
            is_playlist: false,
        }
    }

    /// Scripted service. When `gate` is set, every call waits for a permit.
    #[derive(Default)]
    struct MockService {
        info_fails: bool,
        download_fails: bool,
        gate: Option<Arc<Notify>>,
        info_calls: AtomicUsize,
        download_calls: AtomicUsize,
        download_urls: Mutex<Vec<String>>,
    }

    impl MockService {
        async fn wait_for_gate(&self) {
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
        }
    }

    #[async_trait]
    impl MediaService for MockService {
        async fn fetch_metadata(&self, _url: &str) -> Result<VideoInfo> {
            self.info_calls.fetch_add(1, Ordering::SeqCst);
            self.wait_for_gate().await;
            if self.info_fails {
                return Err(Error::Service {
                    endpoint: "/info".to_string(),
                    status: 400,
                });
            }
            Ok(sample_info())
        }

        async fn fetch_download(&self, url: &str) -> Result<Vec<u8>> {
            self.download_calls.fetch_add(1, Ordering::SeqCst);
            self.download_urls.lock().unwrap().push(url.to_string());
            self.wait_for_gate().await;
            if self.download_fails {
                return Err(Error::Download("operation timed out".to_string()));
            }
            Ok(b"mp4 bytes".to_vec())
        }
    }

    #[derive(Default)]
    struct RecordingSaver {
        saved: Mutex<Vec<(Vec<u8>, String)>>,
    }

    #[async_trait]
    impl SaveTrigger for RecordingSaver {
        async fn save(&self, artifact: Vec<u8>, filename: &str) -> Result<PathBuf> {
            self.saved
                .lock()
                .unwrap()
                .push((artifact, filename.to_string()));
            Ok(PathBuf::from("/downloads").join(filename))
        }
    }

    fn start(service: MockService) -> (SessionHandle, Arc<MockService>, Arc<RecordingSaver>) {
        let service = Arc::new(service);
        let saver = Arc::new(RecordingSaver::default());
        let handle = spawn_session(service.clone(), saver.clone(), "mp4");
        (handle, service, saver)
    }

    #[tokio::test]
    async fn test_fetch_info_success() {
        let (handle, service, _) = start(MockService::default());

        handle.edit_url(URL).await.unwrap();
        assert!(handle.request_info().await.unwrap());

        let state = handle.settled().await.unwrap();
        assert_eq!(state.info, Some(sample_info()));
        assert_eq!(state.error, None);
        assert_eq!(state.phase(), Phase::InfoReady);
        assert_eq!(service.info_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_fetch_info_failure() {
        let (handle, _, _) = start(MockService {
            info_fails: true,
            ..Default::default()
        });

        handle.edit_url(URL).await.unwrap();
        handle.request_info().await.unwrap();

        let state = handle.settled().await.unwrap();
        assert_eq!(state.error, Some(Failure::InfoFetchFailed));
        assert_eq!(state.info, None);
        assert_eq!(state.status(), OperationStatus::Idle);
    }

    #[tokio::test]
    async fn test_empty_url_issues_no_call() {
        let (handle, service, _) = start(MockService::default());

        assert!(!handle.request_info().await.unwrap());
        assert_eq!(handle.snapshot(), SessionState::default());
        assert_eq!(service.info_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_download_without_info_issues_no_call() {
        let (handle, service, _) = start(MockService::default());

        handle.edit_url(URL).await.unwrap();
        assert!(!handle.request_download().await.unwrap());
        assert_eq!(service.download_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_busy_drops_second_request() {
        let gate = Arc::new(Notify::new());
        let (handle, service, _) = start(MockService {
            gate: Some(gate.clone()),
            ..Default::default()
        });

        handle.edit_url(URL).await.unwrap();
        assert!(handle.request_info().await.unwrap());
        assert!(handle.snapshot().is_busy());

        let busy = handle.snapshot();
        assert!(!handle.request_info().await.unwrap());
        assert!(!handle.request_download().await.unwrap());
        assert_eq!(handle.snapshot(), busy);

        gate.notify_one();
        let state = handle.settled().await.unwrap();
        assert!(state.info.is_some());
        assert_eq!(service.info_calls.load(Ordering::SeqCst), 1);
        assert_eq!(service.download_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_download_saves_with_title() {
        let (handle, service, saver) = start(MockService::default());

        handle.edit_url(URL).await.unwrap();
        handle.request_info().await.unwrap();
        handle.settled().await.unwrap();

        assert!(handle.request_download().await.unwrap());
        let state = handle.settled().await.unwrap();

        assert_eq!(state.error, None);
        assert_eq!(
            state.last_saved,
            Some(PathBuf::from("/downloads/Test Video.mp4"))
        );
        assert_eq!(service.download_urls.lock().unwrap().as_slice(), [URL]);

        let saved = saver.saved.lock().unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].0, b"mp4 bytes".to_vec());
        assert_eq!(saved[0].1, "Test Video.mp4");
    }

    #[tokio::test]
    async fn test_download_failure_never_saves() {
        let (handle, _, saver) = start(MockService {
            download_fails: true,
            ..Default::default()
        });

        handle.edit_url(URL).await.unwrap();
        handle.request_info().await.unwrap();
        handle.settled().await.unwrap();

        handle.request_download().await.unwrap();
        let state = handle.settled().await.unwrap();

        assert_eq!(state.error, Some(Failure::DownloadFailed));
        assert!(state.info.is_some());
        assert!(saver.saved.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_download_after_url_edit_uses_fetched_url() {
        let (handle, service, _) = start(MockService::default());

        handle.edit_url(URL).await.unwrap();
        handle.request_info().await.unwrap();
        handle.settled().await.unwrap();

        handle.edit_url("https://vimeo.com/1").await.unwrap();
        let state = handle.snapshot();
        assert!(state.info.is_some());
        assert!(state.url_edited_since_info());

        handle.request_download().await.unwrap();
        handle.settled().await.unwrap();
        assert_eq!(service.download_urls.lock().unwrap().as_slice(), [URL]);
    }

    #[tokio::test]
    async fn test_actor_finishes_in_flight_work_after_handles_drop() {
        let gate = Arc::new(Notify::new());
        let service = Arc::new(MockService {
            gate: Some(gate.clone()),
            ..Default::default()
        });
        let saver = Arc::new(RecordingSaver::default());

        let (sender, receiver) = mpsc::channel(SESSION_CHANNEL_CAPACITY);
        let (snapshots, mut state) = watch::channel(SessionState::default());
        let actor = SessionActor::new(service.clone(), saver, "mp4".into(), receiver, snapshots);
        let join = tokio::spawn(actor.run());

        let handle = SessionHandle::new(sender, state.clone());
        handle.edit_url(URL).await.unwrap();
        handle.request_info().await.unwrap();
        drop(handle);

        gate.notify_one();
        join.await.unwrap();

        let last = state.borrow_and_update().clone();
        assert!(!last.is_busy());
        assert!(last.info.is_some());
    }

    #[tokio::test]
    async fn test_end_to_end_with_http_service() {
        use crate::api::ServiceClient;
        use crate::config::ServiceConfig;
        use crate::save::FileSaver;
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/info"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "title": "Test Video",
                "thumbnail": "http://x/t.jpg",
                "duration": "3:21",
                "is_playlist": false
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/download"))
            .respond_with(
                ResponseTemplate::new(200).set_body_bytes(b"\x00\x00\x00\x18ftypmp42".to_vec()),
            )
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempfile::TempDir::new().unwrap();
        let client = ServiceClient::new(&ServiceConfig {
            base_url: server.uri(),
            ..Default::default()
        })
        .unwrap();
        let handle = spawn_session(
            Arc::new(client),
            Arc::new(FileSaver::new(dir.path())),
            "mp4",
        );

        handle.edit_url(URL).await.unwrap();
        handle.request_info().await.unwrap();
        let state = handle.settled().await.unwrap();
        assert_eq!(state.info.as_ref().map(|i| i.duration.as_str()), Some("3:21"));

        handle.request_download().await.unwrap();
        let state = handle.settled().await.unwrap();
        let saved = state.last_saved.expect("file saved");
        assert_eq!(saved, dir.path().join("Test Video.mp4"));
        assert_eq!(
            std::fs::read(&saved).unwrap(),
            b"\x00\x00\x00\x18ftypmp42".to_vec()
        );
    }
}
