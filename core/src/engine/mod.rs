use std::collections::{HashSet, VecDeque};

use crate::{
    board::{Board, Cell},
    error::Error,
    Card, ComparisonRule, Event, FlipCause, FlipRule, OwnedCard, PlaceCard, Player, Pos, Result,
};

/// Where the game is in its life cycle. A copyable snapshot, safe to hand
/// out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    NotStarted,
    InProgress { turn: Player },
    Over { winner: Option<Player> },
}

type Observer = Box<dyn FnMut(&Event)>;

/// The game-state machine. Owns the board and both hands exclusively; every
/// query hands out copies, and `place_card` is the only mutator once the game
/// is running.
pub struct GameEngine {
    board: Board,
    deck: Vec<OwnedCard>,
    red_hand: Vec<Card>,
    blue_hand: Vec<Card>,
    status: Status,
    comparison: ComparisonRule,
    flip_rule: FlipRule,
    observers: Vec<Observer>,
}

impl std::fmt::Debug for GameEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameEngine")
            .field("status", &self.status)
            .field("board", &self.board)
            .field("red_hand", &self.red_hand)
            .field("blue_hand", &self.blue_hand)
            .field("comparison", &self.comparison)
            .field("flip_rule", &self.flip_rule)
            .finish_non_exhaustive()
    }
}

impl GameEngine {
    pub fn new(board: Board, deck: Vec<OwnedCard>) -> Self {
        Self {
            board,
            deck,
            red_hand: Vec::new(),
            blue_hand: Vec::new(),
            status: Status::NotStarted,
            comparison: ComparisonRule::default(),
            flip_rule: FlipRule::default(),
            observers: Vec::new(),
        }
    }

    pub fn comparison(mut self, rule: ComparisonRule) -> Self {
        self.comparison = rule;
        self
    }

    pub fn flip_rule(mut self, rule: FlipRule) -> Self {
        self.flip_rule = rule;
        self
    }

    /// Register a callback invoked synchronously, in order, for every event a
    /// successful `place_card` produces.
    pub fn on_event(&mut self, observer: impl FnMut(&Event) + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Deal the deck into the two hands and hand the first turn to red.
    /// Rejects decks that are too small for the board or contain duplicate
    /// names; can only be called once.
    pub fn start_game(&mut self) -> Result<()> {
        match self.status {
            Status::NotStarted => {}
            Status::InProgress { .. } => {
                return Err(Error::InvalidArgument(
                    "the game has already been started".into(),
                ))
            }
            Status::Over { .. } => return Err(Error::AlreadyOver),
        }

        let playable = self.board.playable_cells();
        if self.deck.len() < playable + 1 {
            return Err(Error::InvalidArgument(format!(
                "deck holds {} cards but the board needs at least {}",
                self.deck.len(),
                playable + 1
            )));
        }

        let mut names = HashSet::new();
        for owned in &self.deck {
            if !names.insert(owned.card.name.as_str()) {
                return Err(Error::InvalidArgument(format!(
                    "duplicate card name '{}' in deck",
                    owned.card.name
                )));
            }
        }

        for owned in self.deck.drain(..) {
            match owned.owner {
                Player::Red => self.red_hand.push(owned.card),
                Player::Blue => self.blue_hand.push(owned.card),
            }
        }

        self.status = Status::InProgress { turn: Player::Red };
        Ok(())
    }

    /// Play a card from a hand onto the board: validate, battle the
    /// neighbours (cascading through every freshly flipped card), apply the
    /// flip rule, then either finish the game or pass the turn. Validation
    /// happens up front; a rejected call mutates nothing.
    pub fn place_card(&mut self, cmd: PlaceCard) -> Result<Vec<Event>> {
        let turn = match self.status {
            Status::NotStarted => return Err(Error::NotStarted),
            Status::Over { .. } => return Err(Error::AlreadyOver),
            Status::InProgress { turn } => turn,
        };
        if cmd.player != turn {
            return Err(Error::OutOfTurn { player: cmd.player });
        }
        let hand_len = self.hand_ref(turn).len();
        if cmd.hand_index >= hand_len {
            return Err(Error::InvalidArgument(format!(
                "hand index {} out of range 0..{hand_len}",
                cmd.hand_index
            )));
        }
        match self.board.cell(cmd.pos) {
            Ok(Cell::Empty) => {}
            _ => return Err(Error::InvalidPlacement { pos: cmd.pos }),
        }

        // checks done; from here on the placement cannot fail
        let card = self.hand_mut(turn).remove(cmd.hand_index);
        log::debug!("{turn} places '{}' at {}", card.name, cmd.pos);
        let placed = card.clone();
        self.board.place(cmd.pos, OwnedCard { owner: turn, card })?;

        let mut events = vec![Event::CardPlaced {
            player: turn,
            pos: cmd.pos,
        }];

        resolve_battles(
            &mut self.board,
            &self.comparison,
            cmd.pos,
            turn,
            Some(&mut events),
        );

        let extra = self
            .flip_rule
            .extra_flips(&self.board, &placed, cmd.pos, turn);
        if !extra.is_empty() {
            let cause = match self.flip_rule {
                FlipRule::Plus => FlipCause::Plus,
                _ => FlipCause::Same,
            };
            for pos in extra {
                self.board.flip_owner(pos, turn);
                log::debug!("{turn} flips {pos} ({cause:?})");
                events.push(Event::CardFlipped {
                    pos,
                    to: turn,
                    cause,
                });
            }
        }

        if self.board.is_full() {
            let red = self.board.count(Player::Red);
            let blue = self.board.count(Player::Blue);
            use std::cmp::Ordering;
            let winner = match red.cmp(&blue) {
                Ordering::Greater => Some(Player::Red),
                Ordering::Less => Some(Player::Blue),
                Ordering::Equal => None,
            };
            self.status = Status::Over { winner };
            events.push(Event::GameOver { winner });
        } else {
            let next = turn.opposite();
            self.status = Status::InProgress { turn: next };
            events.push(Event::TurnChanged { to: next });
        }

        for event in &events {
            for observer in &mut self.observers {
                observer(event);
            }
        }

        Ok(events)
    }

    /*************************************************************************************
     * Query surface: everything below is read-only and returns copies.
     */

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn current_turn(&self) -> Option<Player> {
        match self.status {
            Status::InProgress { turn } => Some(turn),
            _ => None,
        }
    }

    pub fn card_at(&self, pos: Pos) -> Result<Option<OwnedCard>> {
        match self.board.cell(pos)? {
            Cell::Occupied(owned) => Ok(Some(owned.clone())),
            _ => Ok(None),
        }
    }

    /// A snapshot of the whole board.
    pub fn board(&self) -> Board {
        self.board.clone()
    }

    /// Empty cells in row-major order.
    pub fn empty_cells(&self) -> Vec<Pos> {
        self.board.empty_cells()
    }

    pub fn playable_cells(&self) -> usize {
        self.board.playable_cells()
    }

    pub fn hand(&self, player: Player) -> Vec<Card> {
        self.hand_ref(player).clone()
    }

    /// Cards on the board currently held by `player`.
    pub fn score(&self, player: Player) -> usize {
        self.board.count(player)
    }

    /// The winning colour. Fails while the game is running and on a drawn
    /// game.
    pub fn winner(&self) -> Result<Player> {
        match self.status {
            Status::NotStarted => Err(Error::NotStarted),
            Status::Over {
                winner: Some(player),
            } => Ok(player),
            _ => Err(Error::NotOver),
        }
    }

    /// How many cards placing `card` at `pos` would capture through battles
    /// and combos, computed against a scratch copy of the board. Mutates
    /// nothing; identical states give identical answers.
    pub fn would_flip_count(&self, pos: Pos, card: &Card) -> Result<usize> {
        let turn = match self.status {
            Status::NotStarted => return Err(Error::NotStarted),
            Status::Over { .. } => return Err(Error::AlreadyOver),
            Status::InProgress { turn } => turn,
        };
        match self.board.cell(pos)? {
            Cell::Empty => {}
            _ => return Err(Error::InvalidPlacement { pos }),
        }

        let mut board = self.board.clone();
        board.place(
            pos,
            OwnedCard {
                owner: turn,
                card: card.clone(),
            },
        )?;
        Ok(resolve_battles(&mut board, &self.comparison, pos, turn, None))
    }

    fn hand_ref(&self, player: Player) -> &Vec<Card> {
        match player {
            Player::Red => &self.red_hand,
            Player::Blue => &self.blue_hand,
        }
    }

    fn hand_mut(&mut self, player: Player) -> &mut Vec<Card> {
        match player {
            Player::Red => &mut self.red_hand,
            Player::Blue => &mut self.blue_hand,
        }
    }
}

// Battles ripple outward from the placed position through a worklist. Every
// flip recolours a card to `placing`, and only opposing cards are ever battle
// targets, so a cell can flip at most once per placement and each flipped
// cell enters the queue exactly once: termination is structural, and a card
// can never flip back to its original owner within one placement.
//
// Returns the number of cards flipped across the whole cascade.
fn resolve_battles(
    board: &mut Board,
    rule: &ComparisonRule,
    origin: Pos,
    placing: Player,
    mut events: Option<&mut Vec<Event>>,
) -> usize {
    let mut queue = VecDeque::new();
    queue.push_back(origin);
    let mut flipped = 0;

    while let Some(pos) = queue.pop_front() {
        let attacker = match board.cell(pos) {
            Ok(Cell::Occupied(owned)) => owned.card.clone(),
            _ => unreachable!("battle worklist holds occupied cells only"),
        };

        for (dir, npos, defender) in board.adjacent_occupied(pos) {
            // own cards are never battled
            if defender.owner == placing {
                continue;
            }
            if !rule.beats(&attacker, &defender.card, dir, dir.opposite()) {
                continue;
            }

            board.flip_owner(npos, placing);
            flipped += 1;
            let cause = if pos == origin {
                FlipCause::Battle
            } else {
                FlipCause::Combo
            };
            log::debug!("{placing} flips {npos} ({cause:?})");
            if let Some(events) = events.as_mut() {
                events.push(Event::CardFlipped {
                    pos: npos,
                    to: placing,
                    cause,
                });
            }
            queue.push_back(npos);
        }
    }

    flipped
}
