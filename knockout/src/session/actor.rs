//! Tournament actor implementation with async message handling.

use super::{
    errors::{SessionError, SessionResult},
    messages::{ChangeCause, SnapshotChanged, SubscriberId, TournamentMessage},
};
use crate::{
    bracket::{Player, PlayerId, Round, Shuffler},
    tournament::{
        ConfigResult, JoinOutcome, RoundOutcome, Tournament, TournamentConfig,
        TournamentDetails, TournamentResult, TournamentSnapshot,
    },
};
use std::{collections::HashMap, sync::Arc};
use tokio::sync::{mpsc, oneshot};

/// Tournament actor handle for sending messages
#[derive(Clone)]
pub struct TournamentHandle {
    sender: mpsc::Sender<TournamentMessage>,
    subscriber_capacity: usize,
}

impl TournamentHandle {
    /// Create a new tournament handle
    pub fn new(sender: mpsc::Sender<TournamentMessage>, subscriber_capacity: usize) -> Self {
        Self {
            sender,
            subscriber_capacity,
        }
    }

    /// Send a message to the tournament
    pub async fn send(&self, message: TournamentMessage) -> SessionResult<()> {
        self.sender
            .send(message)
            .await
            .map_err(|_| SessionError::Closed)
    }

    async fn request<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<T>) -> TournamentMessage,
    ) -> SessionResult<T> {
        let (response, reply) = oneshot::channel();
        self.send(build(response)).await?;
        reply.await.map_err(|_| SessionError::Closed)
    }

    pub async fn create(&self, details: TournamentDetails) -> SessionResult<()> {
        Ok(self
            .request(|response| TournamentMessage::Create { details, response })
            .await??)
    }

    pub async fn join(&self, player: Player) -> SessionResult<JoinOutcome> {
        Ok(self
            .request(|response| TournamentMessage::Join { player, response })
            .await??)
    }

    pub async fn leave(&self, player_id: PlayerId) -> SessionResult<Player> {
        Ok(self
            .request(|response| TournamentMessage::Leave {
                player_id,
                response,
            })
            .await??)
    }

    pub async fn start(&self) -> SessionResult<Round> {
        Ok(self
            .request(|response| TournamentMessage::Start { response })
            .await??)
    }

    pub async fn declare_winner(&self, player_id: PlayerId) -> SessionResult<RoundOutcome> {
        Ok(self
            .request(|response| TournamentMessage::DeclareWinner {
                player_id,
                response,
            })
            .await??)
    }

    /// Discard the tournament. Returns whether one existed.
    pub async fn reset(&self) -> SessionResult<bool> {
        self.request(|response| TournamentMessage::Reset { response })
            .await
    }

    pub async fn snapshot(&self) -> SessionResult<TournamentSnapshot> {
        self.request(|response| TournamentMessage::GetSnapshot { response })
            .await
    }

    /// Register for snapshot notifications under `subscriber_id`.
    ///
    /// Re-subscribing with the same id replaces the previous channel. The
    /// channel buffers `subscriber_capacity` notifications; see
    /// [`SnapshotChanged`] for what happens past that.
    pub async fn subscribe(
        &self,
        subscriber_id: impl Into<SubscriberId>,
    ) -> SessionResult<mpsc::Receiver<SnapshotChanged>> {
        let (sender, receiver) = mpsc::channel(self.subscriber_capacity);
        self.send(TournamentMessage::Subscribe {
            subscriber_id: subscriber_id.into(),
            sender,
        })
        .await?;
        Ok(receiver)
    }

    pub async fn unsubscribe(&self, subscriber_id: impl Into<SubscriberId>) -> SessionResult<()> {
        self.send(TournamentMessage::Unsubscribe {
            subscriber_id: subscriber_id.into(),
        })
        .await
    }

    /// Ask the actor to stop after the messages already queued
    pub async fn shutdown(&self) -> SessionResult<()> {
        self.send(TournamentMessage::Shutdown).await
    }
}

/// Actor owning the single live tournament.
///
/// Messages are applied one at a time in arrival order; each one is a complete
/// read-check-mutate step on the state machine, so concurrent callers can never
/// interleave inside a transition.
pub struct TournamentActor {
    /// Tournament state machine
    tournament: Tournament,

    /// Message inbox
    inbox: mpsc::Receiver<TournamentMessage>,

    /// Subscribers for snapshot change notifications
    subscribers: HashMap<SubscriberId, mpsc::Sender<SnapshotChanged>>,
}

impl TournamentActor {
    /// Create a new tournament actor
    ///
    /// # Returns
    ///
    /// * `(TournamentActor, TournamentHandle)` - Actor and handle for sending messages
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `config` fails validation
    pub fn new(
        config: TournamentConfig,
        shuffler: Box<dyn Shuffler>,
    ) -> ConfigResult<(Self, TournamentHandle)> {
        let (inbox_capacity, subscriber_capacity) =
            (config.inbox_capacity, config.subscriber_capacity);
        let tournament = Tournament::new(config, shuffler)?;

        let (sender, inbox) = mpsc::channel(inbox_capacity);
        let handle = TournamentHandle::new(sender, subscriber_capacity);

        let actor = Self {
            tournament,
            inbox,
            subscribers: HashMap::new(),
        };

        Ok((actor, handle))
    }

    /// Create an actor and run it on the current tokio runtime
    pub fn spawn(
        config: TournamentConfig,
        shuffler: Box<dyn Shuffler>,
    ) -> ConfigResult<TournamentHandle> {
        let (actor, handle) = Self::new(config, shuffler)?;
        tokio::spawn(actor.run());
        Ok(handle)
    }

    /// Run the actor event loop until shutdown or until every handle is dropped
    pub async fn run(mut self) {
        let config = self.tournament.config();
        log::info!(
            "Tournament session starting (threshold {}, bye policy {})",
            config.start_threshold,
            config.bye_policy
        );

        while let Some(message) = self.inbox.recv().await {
            if !self.handle_message(message) {
                break;
            }
        }

        log::info!("Tournament session stopped");
    }

    /// Handle a message. Returns false when the actor should stop.
    fn handle_message(&mut self, message: TournamentMessage) -> bool {
        match message {
            TournamentMessage::Create { details, response } => {
                let result = self.tournament.create(details);
                if result.is_ok() {
                    self.notify_snapshot_change(ChangeCause::Created);
                }
                let _ = response.send(result);
            }

            TournamentMessage::Join { player, response } => {
                let result = self.tournament.join(player);
                if let Ok(outcome) = &result {
                    if outcome.changed() {
                        let cause = match outcome {
                            JoinOutcome::Started(_) => ChangeCause::RoundStarted,
                            _ => ChangeCause::RosterChanged,
                        };
                        self.notify_snapshot_change(cause);
                    }
                }
                let _ = response.send(result);
            }

            TournamentMessage::Leave {
                player_id,
                response,
            } => {
                let result = self.tournament.leave(&player_id);
                if result.is_ok() {
                    self.notify_snapshot_change(ChangeCause::RosterChanged);
                }
                let _ = response.send(result);
            }

            TournamentMessage::Start { response } => {
                let result = self.tournament.start();
                if result.is_ok() {
                    self.notify_snapshot_change(ChangeCause::RoundStarted);
                }
                let _ = response.send(result);
            }

            TournamentMessage::DeclareWinner {
                player_id,
                response,
            } => {
                let result = self.tournament.declare_winner(&player_id);
                if let Some(cause) = Self::cause_of(&result) {
                    self.notify_snapshot_change(cause);
                }
                let _ = response.send(result);
            }

            TournamentMessage::Reset { response } => {
                let discarded = self.tournament.reset();
                if discarded {
                    self.notify_snapshot_change(ChangeCause::Reset);
                }
                let _ = response.send(discarded);
            }

            TournamentMessage::GetSnapshot { response } => {
                let _ = response.send(self.tournament.snapshot());
            }

            TournamentMessage::Subscribe {
                subscriber_id,
                sender,
            } => {
                log::debug!("Subscriber {} attached", subscriber_id);
                self.subscribers.insert(subscriber_id, sender);
            }

            TournamentMessage::Unsubscribe { subscriber_id } => {
                self.subscribers.remove(&subscriber_id);
                log::debug!("Subscriber {} detached", subscriber_id);
            }

            TournamentMessage::Shutdown => return false,
        }

        true
    }

    fn cause_of(result: &TournamentResult<RoundOutcome>) -> Option<ChangeCause> {
        match result {
            Ok(RoundOutcome::MatchRecorded { .. }) => Some(ChangeCause::MatchRecorded),
            Ok(RoundOutcome::RoundAdvanced(_)) => Some(ChangeCause::RoundAdvanced),
            Ok(RoundOutcome::TournamentWon(_)) => Some(ChangeCause::TournamentWon),
            Err(_) => None,
        }
    }

    /// Broadcast a snapshot change to all subscribers without waiting on any of them
    fn notify_snapshot_change(&mut self, cause: ChangeCause) {
        if self.subscribers.is_empty() {
            return;
        }

        let notification = SnapshotChanged {
            cause,
            snapshot: Arc::new(self.tournament.snapshot()),
        };

        self.subscribers.retain(|subscriber_id, sender| {
            match sender.try_send(notification.clone()) {
                Ok(_) => true,
                Err(mpsc::error::TrySendError::Full(_)) => {
                    log::warn!(
                        "Subscriber {} channel full, dropping notification",
                        subscriber_id
                    );
                    true
                }
                Err(mpsc::error::TrySendError::Closed(_)) => {
                    log::debug!("Subscriber {} disconnected, removing", subscriber_id);
                    false
                }
            }
        });
    }
}
