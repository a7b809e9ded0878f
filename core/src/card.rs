use crate::{Direction, Player};

pub const MIN_VALUE: u8 = 1;
pub const MAX_VALUE: u8 = 10;

/// An immutable card: a name unique within its deck and one attack value per
/// direction. Ownership lives in [`OwnedCard`]; two cards are equal when their
/// name and values match, whoever holds them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub name: String,
    pub north: u8,
    pub east: u8,
    pub south: u8,
    pub west: u8,
}

impl Card {
    pub fn new(name: impl Into<String>, north: u8, east: u8, south: u8, west: u8) -> Self {
        debug_assert!(
            (MIN_VALUE..=MAX_VALUE).contains(&north),
            "north outside expected range 1-10"
        );
        debug_assert!(
            (MIN_VALUE..=MAX_VALUE).contains(&east),
            "east outside expected range 1-10"
        );
        debug_assert!(
            (MIN_VALUE..=MAX_VALUE).contains(&south),
            "south outside expected range 1-10"
        );
        debug_assert!(
            (MIN_VALUE..=MAX_VALUE).contains(&west),
            "west outside expected range 1-10"
        );
        Self {
            name: name.into(),
            north,
            east,
            south,
            west,
        }
    }

    pub fn value(&self, dir: Direction) -> u8 {
        match dir {
            Direction::North => self.north,
            Direction::East => self.east,
            Direction::South => self.south,
            Direction::West => self.west,
        }
    }
}

/// A card together with the player currently holding it. Flipping rewrites
/// `owner` and nothing else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnedCard {
    pub owner: Player,
    pub card: Card,
}
