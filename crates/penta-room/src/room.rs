//! The turn-based game state machine for one room.
//!
//! A `Room` is pure, synchronous state — no channels, no clocks. The
//! registry actor is the only caller, which is what makes every rule
//! check here race-free.

use std::collections::HashSet;

use penta_game::{Board, Selection, count_lines};
use penta_protocol::{ParticipantId, RoomCode};
use rand::Rng;

use crate::{RoomError, RoomPhase};

/// A participant wins upon reaching this many completed lines.
pub const LINES_TO_WIN: u8 = 5;

/// A room seats at most two participants (humans or a human plus the bot).
pub const MAX_PARTICIPANTS: usize = 2;

/// One participant's side of the game: their identity, board, marks,
/// and line count. The count is always recomputed from the marks by the
/// line evaluator, never patched incrementally.
#[derive(Debug, Clone)]
struct Seat {
    id: ParticipantId,
    board: Board,
    selection: Selection,
    lines: u8,
}

impl Seat {
    fn new(id: ParticipantId, board: Board) -> Self {
        Self {
            id,
            board,
            selection: Selection::new(),
            lines: 0,
        }
    }
}

/// The result of a successful claim.
#[derive(Debug, Clone, PartialEq)]
pub enum ClaimOutcome {
    /// The number was applied and play continues with `current_turn`.
    Update {
        number: u8,
        current_turn: ParticipantId,
        line_counts: Vec<u8>,
    },

    /// The claim brought `winner` to five lines. The turn pointer is
    /// left where it was; the room accepts nothing further.
    Finished { winner: ParticipantId },
}

/// One game session: seats in creator-first order, the shared
/// claimed-number set, a turn pointer, and a lifecycle phase.
#[derive(Debug, Clone)]
pub struct Room {
    code: RoomCode,
    phase: RoomPhase,
    vs_bot: bool,
    /// Creator first. Fixed, stable order — claim application and the
    /// same-claim tie-break both walk seats in this order.
    seats: Vec<Seat>,
    /// Numbers claimed by either side this game. Grows monotonically.
    claimed: HashSet<u8>,
    current_turn: ParticipantId,
}

impl Room {
    /// Creates a room for `creator`. A bot room seats the bot opponent
    /// immediately and starts Active with the creator to move; a human
    /// room stays Pending until a second participant joins.
    pub fn create<R: Rng + ?Sized>(
        code: RoomCode,
        creator: ParticipantId,
        vs_bot: bool,
        rng: &mut R,
    ) -> Self {
        let mut seats = vec![Seat::new(creator.clone(), Board::generate(rng))];
        let phase = if vs_bot {
            seats.push(Seat::new(ParticipantId::bot(), Board::generate(rng)));
            RoomPhase::Active
        } else {
            RoomPhase::Pending
        };

        Self {
            code,
            phase,
            vs_bot,
            seats,
            claimed: HashSet::new(),
            current_turn: creator,
        }
    }

    /// Seats a second human participant with a fresh board and starts
    /// the game. The creator keeps the first move.
    pub fn join<R: Rng + ?Sized>(
        &mut self,
        participant: ParticipantId,
        rng: &mut R,
    ) -> Result<&Board, RoomError> {
        let already_seated = self.seats.iter().any(|s| s.id == participant);
        if self.vs_bot
            || self.seats.len() >= MAX_PARTICIPANTS
            || !self.phase.is_joinable()
            || already_seated
        {
            return Err(RoomError::InvalidJoin(self.code.clone()));
        }

        self.seats.push(Seat::new(participant, Board::generate(rng)));
        self.phase = RoomPhase::Active;
        Ok(&self.seats[1].board)
    }

    /// Applies one claim. On success the number enters the claimed set,
    /// every seat holding it marks the matching cell and recomputes its
    /// line count (creator first — the creator wins a same-claim tie),
    /// and either the turn flips or the game ends.
    ///
    /// Failures never mutate the room.
    pub fn claim(
        &mut self,
        claimant: &ParticipantId,
        number: u8,
    ) -> Result<ClaimOutcome, RoomError> {
        match self.phase {
            RoomPhase::Pending => return Err(RoomError::NotStarted(self.code.clone())),
            RoomPhase::Finished => return Err(RoomError::GameFinished(self.code.clone())),
            RoomPhase::Active => {}
        }
        if &self.current_turn != claimant {
            return Err(RoomError::NotYourTurn(claimant.clone()));
        }
        if self.claimed.contains(&number) {
            return Err(RoomError::AlreadyClaimed(number));
        }

        self.claimed.insert(number);

        for seat in &mut self.seats {
            if let Some(index) = seat.board.position_of(number) {
                seat.selection.mark(index);
                seat.lines = count_lines(&seat.selection);
                if seat.lines >= LINES_TO_WIN {
                    // Win ends the claim on the spot: later seats are
                    // not evaluated and the turn pointer stays put.
                    let winner = seat.id.clone();
                    self.phase = RoomPhase::Finished;
                    return Ok(ClaimOutcome::Finished { winner });
                }
            }
        }

        let next = self
            .seats
            .iter()
            .find(|s| &s.id != claimant)
            .map(|s| s.id.clone())
            .unwrap_or_else(|| claimant.clone());
        self.current_turn = next.clone();

        Ok(ClaimOutcome::Update {
            number,
            current_turn: next,
            line_counts: self.line_counts(),
        })
    }

    // -- Read accessors --------------------------------------------------

    pub fn code(&self) -> &RoomCode {
        &self.code
    }

    pub fn phase(&self) -> RoomPhase {
        self.phase
    }

    pub fn vs_bot(&self) -> bool {
        self.vs_bot
    }

    pub fn current_turn(&self) -> &ParticipantId {
        &self.current_turn
    }

    /// Participant identifiers in seat order (creator first).
    pub fn participants(&self) -> Vec<ParticipantId> {
        self.seats.iter().map(|s| s.id.clone()).collect()
    }

    /// Line counts in seat order (creator first).
    pub fn line_counts(&self) -> Vec<u8> {
        self.seats.iter().map(|s| s.lines).collect()
    }

    pub fn contains(&self, participant: &ParticipantId) -> bool {
        self.seats.iter().any(|s| &s.id == participant)
    }

    pub fn board(&self, participant: &ParticipantId) -> Option<&Board> {
        self.seats.iter().find(|s| &s.id == participant).map(|s| &s.board)
    }

    pub fn selection(&self, participant: &ParticipantId) -> Option<&Selection> {
        self.seats
            .iter()
            .find(|s| &s.id == participant)
            .map(|s| &s.selection)
    }

    pub fn is_claimed(&self, number: u8) -> bool {
        self.claimed.contains(&number)
    }
}

// =========================================================================
// Tests
// =========================================================================
