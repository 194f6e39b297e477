use tokio::sync::{mpsc, oneshot, watch};

use super::actor::SessionMessage;
use super::machine::Action;
use super::state::SessionState;
use crate::error::{Error, Result};

/// Front door to the session actor.
///
/// Request methods return once the actor has processed the action, not once
/// the network call finishes: `Ok(true)` means it started, `Ok(false)` means
/// the guard dropped it. Use [`SessionHandle::settled`] to wait for the result.
#[derive(Clone)]
pub struct SessionHandle {
    sender: mpsc::Sender<SessionMessage>,
    state: watch::Receiver<SessionState>,
}

impl SessionHandle {
    pub fn new(sender: mpsc::Sender<SessionMessage>, state: watch::Receiver<SessionState>) -> Self {
        Self { sender, state }
    }

    async fn send(&self, action: Action) -> Result<bool> {
        let (reply, response) = oneshot::channel();
        self.sender
            .send(SessionMessage { action, reply })
            .await
            .map_err(|_| Error::SessionClosed)?;
        response.await.map_err(|_| Error::SessionClosed)
    }

    /// Overwrite the submission URL.
    pub async fn edit_url(&self, url: impl Into<String>) -> Result<()> {
        self.send(Action::EditUrl(url.into())).await.map(|_| ())
    }

    /// Press "Get Info".
    pub async fn request_info(&self) -> Result<bool> {
        self.send(Action::RequestInfo).await
    }

    /// Press "Download".
    pub async fn request_download(&self) -> Result<bool> {
        self.send(Action::RequestDownload).await
    }

    /// Current state.
    pub fn snapshot(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Receiver that sees every published state.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.clone()
    }

    /// Wait until nothing is in flight and return that state.
    pub async fn settled(&self) -> Result<SessionState> {
        let mut rx = self.state.clone();
        let state = rx
            .wait_for(|state| !state.is_busy())
            .await
            .map_err(|_| Error::SessionClosed)?;
        Ok(state.clone())
    }
}
