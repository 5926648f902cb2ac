//! Async driver for a [`Session`].
//!
//! The runtime is the only owner of the session. It sleeps until the earliest
//! component deadline, applies commands from the presentation layer, and runs
//! remote endorsement calls as abortable tasks whose outcomes are fed back
//! through a channel, so every state change still happens on this loop.

use std::collections::HashMap;
use std::future::pending;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use futures_util::future::{AbortHandle, Abortable, FutureExt};
use tokio::sync::mpsc;
use tokio::time::{Instant, sleep_until};

use awaken_types::SubjectId;

use crate::audio::{AudioBackend, AudioController};
use crate::endorsement::MutationTicket;
use crate::remote::{EndorsementClient, RemoteError};
use crate::session::{Profile, Session, SessionError, SessionEvent, SessionSettings};

/// Inputs from the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    AwardExperience(u64),
    Endorse(SubjectId),
    CarouselNext,
    CarouselPrevious,
    CarouselSelect(usize),
    SetSfxMuted(bool),
    SetMusicMuted(bool),
    DismissToast,
}

#[derive(Debug)]
struct Outcome {
    task: u64,
    ticket: MutationTicket,
    result: Result<(), RemoteError>,
}

#[derive(Debug)]
pub struct Runtime<B, C> {
    session: Session<B>,
    client: Arc<C>,
    started: Instant,
    in_flight: HashMap<u64, AbortHandle>,
    next_task: u64,
}

impl<B, C> Runtime<B, C>
where
    B: AudioBackend + Send + 'static,
    C: EndorsementClient,
{
    /// Mount a session whose clock starts now.
    pub fn start(
        settings: SessionSettings,
        profile: Profile,
        backend: B,
        client: C,
    ) -> Result<Self, SessionError> {
        let session = Session::mount(Duration::ZERO, settings, profile, backend)?;
        Ok(Self {
            session,
            client: Arc::new(client),
            started: Instant::now(),
            in_flight: HashMap::new(),
            next_task: 0,
        })
    }

    fn now(&self) -> Duration {
        self.started.elapsed()
    }

    /// Drive the session until `commands` closes, then tear it down.
    ///
    /// In-flight remote calls are aborted; their outcomes are never applied.
    pub async fn run(
        mut self,
        mut commands: mpsc::Receiver<Command>,
        events: mpsc::UnboundedSender<SessionEvent>,
    ) -> AudioController<B> {
        let (outcome_tx, mut outcomes) = mpsc::unbounded_channel();

        loop {
            let wake = self.session.next_deadline().map(|due| self.started + due);
            let sleep = async move {
                match wake {
                    Some(at) => sleep_until(at).await,
                    None => pending().await,
                }
            };

            tokio::select! {
                command = commands.recv() => match command {
                    Some(command) => self.handle(command, &outcome_tx),
                    None => break,
                },
                Some(outcome) = outcomes.recv() => self.settle(outcome),
                () = sleep => {}
            }

            let now = self.now();
            for event in self.session.tick(now) {
                let _ = events.send(event);
            }
        }

        self.shutdown()
    }

    fn handle(&mut self, command: Command, outcomes: &mpsc::UnboundedSender<Outcome>) {
        let now = self.now();
        tracing::debug!(?command, ?now, "command");
        match command {
            Command::AwardExperience(amount) => {
                if let Err(e) = self.session.award_experience(now, amount) {
                    tracing::warn!(amount, "Experience rejected: {e}");
                }
            }
            Command::Endorse(subject) => self.endorse(subject, outcomes),
            Command::CarouselNext => self.session.carousel_next(),
            Command::CarouselPrevious => self.session.carousel_previous(),
            Command::CarouselSelect(index) => {
                if let Err(e) = self.session.carousel_select(index) {
                    tracing::warn!("Carousel selection ignored: {e}");
                }
            }
            Command::SetSfxMuted(muted) => self.session.set_sfx_muted(muted),
            Command::SetMusicMuted(muted) => self.session.set_music_muted(muted),
            Command::DismissToast => self.session.dismiss_toast(now),
        }
    }

    fn endorse(&mut self, subject: SubjectId, outcomes: &mpsc::UnboundedSender<Outcome>) {
        let Some(ticket) = self.session.endorse(&subject) else {
            tracing::debug!(%subject, "already endorsed, ignoring");
            return;
        };

        let task = self.next_task;
        self.next_task += 1;

        let (abort_handle, abort_registration) = AbortHandle::new_pair();
        let client = Arc::clone(&self.client);
        let tx = outcomes.clone();
        tokio::spawn(async move {
            let call =
                AssertUnwindSafe(async move { client.endorse(&subject).await }).catch_unwind();
            let result = match Abortable::new(call, abort_registration).await {
                Ok(Ok(result)) => result,
                // A panicking client counts as a failed call so the overlay rolls back.
                Ok(Err(_panic)) => {
                    tracing::warn!(task, "Endorsement call panicked");
                    Err(RemoteError::Transport("endorsement call panicked".to_string()))
                }
                Err(_aborted) => return,
            };
            let _ = tx.send(Outcome {
                task,
                ticket,
                result,
            });
        });
        self.in_flight.insert(task, abort_handle);
    }

    fn settle(&mut self, outcome: Outcome) {
        self.in_flight.remove(&outcome.task);
        let now = self.now();
        let settlement = self
            .session
            .settle_endorsement(now, outcome.ticket, outcome.result);
        tracing::debug!(task = outcome.task, ?settlement, "endorsement settled");
    }

    fn shutdown(mut self) -> AudioController<B> {
        for (_, handle) in self.in_flight.drain() {
            handle.abort();
        }
        self.session.unmount()
    }
}
