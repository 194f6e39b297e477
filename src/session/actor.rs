//! Session actor: owns the state and runs the effects.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot, watch};

use crate::api::MediaService;
use crate::save::SaveTrigger;
use crate::session::machine::{transition, Action, Effect, Event};
use crate::session::state::SessionState;

/// A user action plus the channel that reports whether it was accepted.
pub struct SessionMessage {
    pub action: Action,
    pub reply: oneshot::Sender<bool>,
}

/// Session actor.
///
/// Processes one event at a time:
/// - user actions arrive from the handle
/// - network calls and saves run in spawned tasks
/// - their results come back as settle events on an internal channel
pub struct SessionActor {
    state: SessionState,
    extension: String,
    service: Arc<dyn MediaService>,
    saver: Arc<dyn SaveTrigger>,
    receiver: mpsc::Receiver<SessionMessage>,
    settle_tx: mpsc::UnboundedSender<Event>,
    settle_rx: mpsc::UnboundedReceiver<Event>,
    snapshots: watch::Sender<SessionState>,
}

impl SessionActor {
    pub fn new(
        service: Arc<dyn MediaService>,
        saver: Arc<dyn SaveTrigger>,
        extension: String,
        receiver: mpsc::Receiver<SessionMessage>,
        snapshots: watch::Sender<SessionState>,
    ) -> Self {
        let (settle_tx, settle_rx) = mpsc::unbounded_channel();

        Self {
            state: SessionState::default(),
            extension,
            service,
            saver,
            receiver,
            settle_tx,
            settle_rx,
            snapshots,
        }
    }

    /// Run the actor main loop.
    ///
    /// Stops once every handle is dropped and nothing is in flight.
    pub async fn run(mut self) {
        tracing::debug!("Session actor started");

        loop {
            tokio::select! {
                Some(event) = self.settle_rx.recv() => {
                    self.handle_event(event);
                }
                msg = self.receiver.recv() => match msg {
                    Some(msg) => self.handle_message(msg),
                    None => break,
                },
            }
        }

        // No cancellation: let the in-flight operation finish
        while self.state.is_busy() {
            match self.settle_rx.recv().await {
                Some(event) => {
                    self.handle_event(event);
                }
                None => break,
            }
        }

        tracing::debug!("Session actor stopped");
    }

    fn handle_message(&mut self, msg: SessionMessage) {
        let always_accepted = matches!(msg.action, Action::EditUrl(_));
        let started = self.handle_event(msg.action.into());
        let _ = msg.reply.send(always_accepted || started);
    }

    /// Apply one event and run its effect. Returns whether an effect started.
    fn handle_event(&mut self, event: Event) -> bool {
        let state = std::mem::take(&mut self.state);
        let (next, effect) = transition(state, event, &self.extension);
        self.state = next;
        self.snapshots.send_replace(self.state.clone());

        let started = !effect.is_none();
        self.execute(effect);
        started
    }

    fn execute(&self, effect: Effect) {
        match effect {
            Effect::None => {}

            Effect::FetchMetadata { url } => {
                let service = Arc::clone(&self.service);
                let tx = self.settle_tx.clone();
                tokio::spawn(async move {
                    let result = service.fetch_metadata(&url).await;
                    let _ = tx.send(Event::InfoSettled(result));
                });
            }

            Effect::FetchDownload { url } => {
                let service = Arc::clone(&self.service);
                let tx = self.settle_tx.clone();
                tokio::spawn(async move {
                    let result = service.fetch_download(&url).await;
                    let _ = tx.send(Event::DownloadSettled(result));
                });
            }

            Effect::Save { artifact, filename } => {
                let saver = Arc::clone(&self.saver);
                let tx = self.settle_tx.clone();
                tokio::spawn(async move {
                    let result = saver.save(artifact, &filename).await;
                    let _ = tx.send(Event::SaveSettled(result));
                });
            }
        }
    }
}
