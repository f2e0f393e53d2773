//! The room registry actor.
//!
//! One tokio task owns every `Room` plus the participant connection
//! map, and processes commands from a single mpsc channel. All room
//! mutation is serialized through that task, so the game rules in
//! [`Room`] never need locks. Bot moves re-enter through the same
//! channel after a delay, which means a destroyed room turns a pending
//! bot move into a no-op.

use std::collections::HashMap;

use penta_protocol::{Intent, Notification, ParticipantId, RoomCode};
use rand::Rng;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use crate::{ClaimOutcome, RegistryConfig, RegistryError, Room, RoomError, RoomPhase};

const CODE_LEN: usize = 4;
const CODE_ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Channel over which a participant receives its notifications.
pub type NotificationSender = mpsc::UnboundedSender<Notification>;

/// A read-only snapshot of one room, for diagnostics and tests.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomInfo {
    pub code: RoomCode,
    pub phase: RoomPhase,
    pub vs_bot: bool,
    pub participants: Vec<ParticipantId>,
    pub current_turn: ParticipantId,
    pub line_counts: Vec<u8>,
}

enum RegistryCommand {
    Create {
        participant: ParticipantId,
        vs_bot: bool,
        sender: NotificationSender,
        reply: oneshot::Sender<RoomCode>,
    },
    Join {
        code: RoomCode,
        participant: ParticipantId,
        sender: NotificationSender,
    },
    Claim {
        code: RoomCode,
        participant: ParticipantId,
        number: u8,
    },
    Disconnect {
        participant: ParticipantId,
    },
    /// Re-entry point for a deferred bot move.
    BotMove {
        code: RoomCode,
    },
    Info {
        code: RoomCode,
        reply: oneshot::Sender<Option<RoomInfo>>,
    },
    Count {
        reply: oneshot::Sender<usize>,
    },
}

/// Cloneable handle for talking to the registry task.
///
/// Every method returns [`RegistryError::Closed`] once the task is
/// gone; game-level failures arrive as
/// [`Notification::OperationFailed`] on the participant's channel
/// instead.
#[derive(Clone)]
pub struct RegistryHandle {
    sender: mpsc::Sender<RegistryCommand>,
}

impl RegistryHandle {
    /// Creates a room and registers `sender` as the participant's
    /// notification channel. Returns the fresh room code.
    pub async fn create_room(
        &self,
        participant: ParticipantId,
        vs_bot: bool,
        sender: NotificationSender,
    ) -> Result<RoomCode, RegistryError> {
        let (reply, rx) = oneshot::channel();
        self.send(RegistryCommand::Create {
            participant,
            vs_bot,
            sender,
            reply,
        })
        .await?;
        rx.await.map_err(|_| RegistryError::Closed)
    }

    pub async fn join_room(
        &self,
        code: RoomCode,
        participant: ParticipantId,
        sender: NotificationSender,
    ) -> Result<(), RegistryError> {
        self.send(RegistryCommand::Join {
            code,
            participant,
            sender,
        })
        .await
    }

    pub async fn claim(
        &self,
        code: RoomCode,
        participant: ParticipantId,
        number: u8,
    ) -> Result<(), RegistryError> {
        self.send(RegistryCommand::Claim {
            code,
            participant,
            number,
        })
        .await
    }

    /// Tears down every room the participant sits in.
    pub async fn disconnect(&self, participant: ParticipantId) -> Result<(), RegistryError> {
        self.send(RegistryCommand::Disconnect { participant }).await
    }

    pub async fn room_info(&self, code: RoomCode) -> Result<Option<RoomInfo>, RegistryError> {
        let (reply, rx) = oneshot::channel();
        self.send(RegistryCommand::Info { code, reply }).await?;
        rx.await.map_err(|_| RegistryError::Closed)
    }

    pub async fn room_count(&self) -> Result<usize, RegistryError> {
        let (reply, rx) = oneshot::channel();
        self.send(RegistryCommand::Count { reply }).await?;
        rx.await.map_err(|_| RegistryError::Closed)
    }

    /// Dispatches a decoded [`Intent`] on behalf of `participant`.
    /// This is the single entry point a transport layer needs.
    pub async fn submit(
        &self,
        participant: ParticipantId,
        intent: Intent,
        sender: NotificationSender,
    ) -> Result<(), RegistryError> {
        match intent {
            Intent::CreateRoom { vs_bot } => {
                self.create_room(participant, vs_bot, sender).await?;
                Ok(())
            }
            Intent::JoinRoom { code } => self.join_room(code, participant, sender).await,
            Intent::ClaimNumber { code, number } => self.claim(code, participant, number).await,
            Intent::Disconnect => self.disconnect(participant).await,
        }
    }

    async fn send(&self, command: RegistryCommand) -> Result<(), RegistryError> {
        self.sender
            .send(command)
            .await
            .map_err(|_| RegistryError::Closed)
    }
}

/// Spawns the registry task and returns its handle. The task runs
/// until every handle is dropped.
pub fn spawn_registry(config: RegistryConfig) -> RegistryHandle {
    let (sender, receiver) = mpsc::channel(config.channel_size);
    let registry = RoomRegistry {
        config,
        rooms: HashMap::new(),
        connections: HashMap::new(),
        sender: sender.clone(),
    };
    tokio::spawn(registry.run(receiver));
    RegistryHandle { sender }
}

/// State owned by the registry task.
pub struct RoomRegistry {
    config: RegistryConfig,
    rooms: HashMap<RoomCode, Room>,
    connections: HashMap<ParticipantId, NotificationSender>,
    /// For re-injecting deferred bot moves.
    sender: mpsc::Sender<RegistryCommand>,
}

impl RoomRegistry {
    async fn run(mut self, mut receiver: mpsc::Receiver<RegistryCommand>) {
        info!("room registry started");
        while let Some(command) = receiver.recv().await {
            self.handle(command);
        }
        info!("room registry stopped");
    }

    fn handle(&mut self, command: RegistryCommand) {
        match command {
            RegistryCommand::Create {
                participant,
                vs_bot,
                sender,
                reply,
            } => {
                let code = self.create_room(participant, vs_bot, sender);
                let _ = reply.send(code);
            }
            RegistryCommand::Join {
                code,
                participant,
                sender,
            } => self.join_room(code, participant, sender),
            RegistryCommand::Claim {
                code,
                participant,
                number,
            } => self.human_claim(code, participant, number),
            RegistryCommand::Disconnect { participant } => self.disconnect(&participant),
            RegistryCommand::BotMove { code } => self.bot_move(code),
            RegistryCommand::Info { code, reply } => {
                let _ = reply.send(self.rooms.get(&code).map(room_info));
            }
            RegistryCommand::Count { reply } => {
                let _ = reply.send(self.rooms.len());
            }
        }
    }

    fn create_room(
        &mut self,
        participant: ParticipantId,
        vs_bot: bool,
        sender: NotificationSender,
    ) -> RoomCode {
        let code = generate_code(&mut rand::rng());
        self.open_room(code.clone(), participant, vs_bot, sender);
        code
    }

    /// Opens a room under `code`. Codes are not checked for clashes:
    /// a repeat code replaces the older room, which is simply gone.
    fn open_room(
        &mut self,
        code: RoomCode,
        participant: ParticipantId,
        vs_bot: bool,
        sender: NotificationSender,
    ) {
        let mut rng = rand::rng();
        let room = Room::create(code.clone(), participant.clone(), vs_bot, &mut rng);

        self.connections.insert(participant.clone(), sender);
        info!(%code, %participant, vs_bot, "room created");

        if let Some(board) = room.board(&participant) {
            self.send_to(
                &participant,
                Notification::RoomCreated {
                    code: code.clone(),
                    board: board.clone(),
                    participant_index: 0,
                },
            );
        }

        // A bot room skips the waiting phase entirely.
        if vs_bot {
            self.send_to(
                &participant,
                Notification::GameStarted {
                    current_turn: room.current_turn().clone(),
                    participants: room.participants(),
                    vs_bot: true,
                },
            );
        }

        self.rooms.insert(code, room);
    }

    fn join_room(&mut self, code: RoomCode, participant: ParticipantId, sender: NotificationSender) {
        self.connections.insert(participant.clone(), sender);

        let Some(room) = self.rooms.get_mut(&code) else {
            self.send_to(
                &participant,
                Notification::OperationFailed {
                    reason: RoomError::RoomNotFound(code).reason(),
                },
            );
            self.prune_connection(&participant);
            return;
        };

        let mut rng = rand::rng();
        match room.join(participant.clone(), &mut rng) {
            Ok(board) => {
                let joined = Notification::RoomJoined {
                    code: code.clone(),
                    board: board.clone(),
                    participant_index: 1,
                };
                let started = Notification::GameStarted {
                    current_turn: room.current_turn().clone(),
                    participants: room.participants(),
                    vs_bot: false,
                };
                let participants = room.participants();
                info!(%code, %participant, "participant joined, game started");

                self.send_to(&participant, joined);
                self.broadcast(&participants, started);
            }
            Err(e) => {
                debug!(%code, %participant, error = %e, "join rejected");
                self.send_to(&participant, Notification::OperationFailed { reason: e.reason() });
                self.prune_connection(&participant);
            }
        }
    }

    /// Drops a participant's notification channel if they sit in no
    /// room. A failed join registers the sender up front to deliver
    /// the failure; this takes it back out.
    fn prune_connection(&mut self, participant: &ParticipantId) {
        if !self.rooms.values().any(|room| room.contains(participant)) {
            self.connections.remove(participant);
        }
    }

    fn human_claim(&mut self, code: RoomCode, participant: ParticipantId, number: u8) {
        if let Err(e) = self.apply_claim(&code, &participant, number) {
            debug!(%code, %participant, number, error = %e, "claim rejected");
            self.send_to(&participant, Notification::OperationFailed { reason: e.reason() });
        }
    }

    /// Applies one claim (human or bot) and broadcasts the result. On
    /// an accepted claim that hands the turn to the bot, schedules the
    /// bot's reply.
    fn apply_claim(
        &mut self,
        code: &RoomCode,
        participant: &ParticipantId,
        number: u8,
    ) -> Result<(), RoomError> {
        let room = self
            .rooms
            .get_mut(code)
            .ok_or_else(|| RoomError::RoomNotFound(code.clone()))?;

        let outcome = room.claim(participant, number)?;
        let participants = room.participants();
        let vs_bot = room.vs_bot();
        let line_counts = room.line_counts();
        debug!(%code, claimant = %participant, number, "claim accepted");

        match outcome {
            ClaimOutcome::Update {
                number,
                current_turn,
                line_counts: counts,
            } => {
                self.broadcast(
                    &participants,
                    Notification::StateUpdated {
                        claimed_number: number,
                        claimant: participant.clone(),
                        current_turn: current_turn.clone(),
                        line_counts: counts,
                    },
                );
                if vs_bot && current_turn.is_bot() {
                    self.schedule_bot_move(code.clone());
                }
            }
            ClaimOutcome::Finished { winner } => {
                info!(%code, %winner, ?line_counts, "game over");
                self.broadcast(
                    &participants,
                    Notification::GameOver {
                        winner,
                        participants: participants.clone(),
                    },
                );
            }
        }
        Ok(())
    }

    /// Executes a previously scheduled bot move. The room may have been
    /// destroyed or finished since the move was scheduled; both cases
    /// are silent no-ops.
    fn bot_move(&mut self, code: RoomCode) {
        let bot = ParticipantId::bot();
        let Some(room) = self.rooms.get(&code) else {
            debug!(%code, "bot move dropped, room gone");
            return;
        };
        if room.phase() != RoomPhase::Active || room.current_turn() != &bot {
            debug!(%code, "bot move dropped, no longer the bot's turn");
            return;
        }

        let choice = match (room.board(&bot), room.selection(&bot)) {
            (Some(board), Some(selection)) => {
                penta_game::choose_claim(board, selection, &mut rand::rng())
            }
            _ => None,
        };
        let Some(number) = choice else {
            warn!(%code, "bot has no open cells to claim");
            return;
        };

        if let Err(e) = self.apply_claim(&code, &bot, number) {
            // Rules were re-checked above, so only a race against
            // nothing could land here.
            warn!(%code, number, error = %e, "bot claim rejected");
        }
    }

    fn schedule_bot_move(&self, code: RoomCode) {
        let sender = self.sender.clone();
        let delay = self.config.bot_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = sender.send(RegistryCommand::BotMove { code }).await;
        });
    }

    /// Destroys every room the participant occupies, regardless of
    /// phase, and drops its notification channel.
    fn disconnect(&mut self, participant: &ParticipantId) {
        let affected: Vec<RoomCode> = self
            .rooms
            .values()
            .filter(|room| room.contains(participant))
            .map(|room| room.code().clone())
            .collect();

        for code in affected {
            if let Some(room) = self.rooms.remove(&code) {
                info!(%code, %participant, "room destroyed on disconnect");
                if !room.vs_bot() {
                    for other in room.participants() {
                        if &other != participant {
                            self.send_to(&other, Notification::PlayerDisconnected);
                        }
                    }
                }
            }
        }
        self.connections.remove(participant);
    }

    fn broadcast(&self, participants: &[ParticipantId], notification: Notification) {
        for participant in participants {
            self.send_to(participant, notification.clone());
        }
    }

    fn send_to(&self, participant: &ParticipantId, notification: Notification) {
        if participant.is_bot() {
            return;
        }
        if let Some(sender) = self.connections.get(participant) {
            if sender.send(notification).is_err() {
                debug!(%participant, "notification channel closed");
            }
        }
    }
}

/// Draws a fresh room code. Codes are a pure function of the rng:
/// clashes with live rooms are not checked for here or anywhere else.
fn generate_code<R: Rng + ?Sized>(rng: &mut R) -> RoomCode {
    let raw: String = (0..CODE_LEN)
        .map(|_| CODE_ALPHABET[rng.random_range(0..CODE_ALPHABET.len())] as char)
        .collect();
    RoomCode::new(raw)
}

fn room_info(room: &Room) -> RoomInfo {
    RoomInfo {
        code: room.code().clone(),
        phase: room.phase(),
        vs_bot: room.vs_bot(),
        participants: room.participants(),
        current_turn: room.current_turn().clone(),
        line_counts: room.line_counts(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn registry() -> RoomRegistry {
        let (sender, _receiver) = mpsc::channel(8);
        RoomRegistry {
            config: RegistryConfig::default(),
            rooms: HashMap::new(),
            connections: HashMap::new(),
            sender,
        }
    }

    fn notification_channel() -> (
        NotificationSender,
        mpsc::UnboundedReceiver<Notification>,
    ) {
        mpsc::unbounded_channel()
    }

    #[test]
    fn test_code_generation_ignores_registry_state() {
        let mut a = StdRng::seed_from_u64(7);
        let mut b = StdRng::seed_from_u64(7);

        let code = generate_code(&mut a);
        assert_eq!(code.as_str().len(), CODE_LEN);
        assert!(code
            .as_str()
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));

        // Same seed, same code: generation consults nothing but the rng.
        assert_eq!(generate_code(&mut b), code);
    }

    #[test]
    fn test_repeat_code_replaces_the_older_room() {
        let mut registry = registry();
        let (alice_tx, mut alice_rx) = notification_channel();
        let (bob_tx, mut bob_rx) = notification_channel();
        let alice = ParticipantId::new("alice");
        let bob = ParticipantId::new("bob");
        let code = RoomCode::new("A1B2");

        registry.open_room(code.clone(), alice.clone(), false, alice_tx);
        registry.open_room(code.clone(), bob.clone(), false, bob_tx);

        // Bob's room took the slot; Alice's is simply gone.
        assert_eq!(registry.rooms.len(), 1);
        let room = registry.rooms.get(&code).unwrap();
        assert_eq!(room.participants(), vec![bob]);
        assert!(!room.contains(&alice));

        // Both creators were acknowledged before the clash mattered.
        assert!(matches!(
            alice_rx.try_recv(),
            Ok(Notification::RoomCreated { .. })
        ));
        assert!(matches!(
            bob_rx.try_recv(),
            Ok(Notification::RoomCreated { .. })
        ));
    }

    #[test]
    fn test_failed_join_leaves_no_connection_behind() {
        let mut registry = registry();
        let (bob_tx, mut bob_rx) = notification_channel();

        registry.join_room(RoomCode::new("ZZZZ"), ParticipantId::new("bob"), bob_tx);

        assert!(registry.connections.is_empty());
        // The failure went out before the channel was dropped.
        assert!(matches!(
            bob_rx.try_recv(),
            Ok(Notification::OperationFailed { .. })
        ));
    }

    #[test]
    fn test_failed_join_keeps_a_seated_participants_channel() {
        let mut registry = registry();
        let (alice_tx, _alice_rx) = notification_channel();
        let alice = ParticipantId::new("alice");

        registry.open_room(RoomCode::new("A1B2"), alice.clone(), false, alice_tx);

        // Alice still sits in her own room, so her channel survives a
        // failed join elsewhere.
        let (retry_tx, _retry_rx) = notification_channel();
        registry.join_room(RoomCode::new("ZZZZ"), alice.clone(), retry_tx);

        assert!(registry.connections.contains_key(&alice));
    }
}
