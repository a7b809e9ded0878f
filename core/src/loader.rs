//! Loaders for the two text artifacts a game starts from: a board layout and
//! a card database. The formats are line oriented; the line parsers are nom
//! combinators and every failure reports the offending line.
//!
//! Board layout: a `<rows> <cols>` header, then `rows` lines of `cols`
//! characters, `C` for a playable cell and `X` for a hole.
//!
//! Card database: one `<name> <north> <east> <south> <west>` line per card,
//! values `1`-`9` or `A` for 10. Cards are handed out alternately red, blue,
//! red, ... in file order.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use nom::{
    bytes::complete::take_till1,
    character::complete::{one_of, space1, u8 as dec_u8},
    combinator::{all_consuming, map},
    multi::many1,
    sequence::{preceded, separated_pair, tuple},
    IResult,
};
use thiserror::Error;

use crate::{Board, Card, OwnedCard, Player, Pos};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("line {line}: {message}")]
    Malformed { line: usize, message: String },
    #[error("line {line}: duplicate card name '{name}'")]
    DuplicateName { line: usize, name: String },
}

fn malformed(line: usize, message: impl Into<String>) -> LoadError {
    LoadError::Malformed {
        line,
        message: message.into(),
    }
}

pub fn load_board(path: impl AsRef<Path>) -> Result<Board, LoadError> {
    let text = fs::read_to_string(path)?;
    parse_board(&text)
}

pub fn load_deck(path: impl AsRef<Path>) -> Result<Vec<OwnedCard>, LoadError> {
    let text = fs::read_to_string(path)?;
    parse_deck(&text)
}

pub fn parse_board(text: &str) -> Result<Board, LoadError> {
    let mut lines = text.lines().enumerate();

    let (_, header) = lines
        .next()
        .ok_or_else(|| malformed(1, "missing '<rows> <cols>' header"))?;
    let (rows, cols) = all_consuming(dimensions)(header.trim_end())
        .map_err(|_| malformed(1, "expected '<rows> <cols>'"))?
        .1;
    if rows == 0 || cols == 0 {
        return Err(malformed(1, "board dimensions must be positive"));
    }

    let mut holes = Vec::new();
    for row in 0..rows {
        let (idx, line) = lines
            .next()
            .ok_or_else(|| malformed(row as usize + 2, "missing board row"))?;
        let cells = all_consuming(layout_row)(line.trim_end())
            .map_err(|_| malformed(idx + 1, "board rows may only contain 'C' and 'X'"))?
            .1;
        if cells.len() != cols as usize {
            return Err(malformed(
                idx + 1,
                format!("expected {cols} cells, found {}", cells.len()),
            ));
        }
        for (col, kind) in cells.into_iter().enumerate() {
            if kind == 'X' {
                holes.push(Pos::new(row, col as u8));
            }
        }
    }

    for (idx, rest) in lines {
        if !rest.trim().is_empty() {
            return Err(malformed(idx + 1, "unexpected content after the layout"));
        }
    }

    Ok(Board::with_holes(rows, cols, &holes))
}

pub fn parse_deck(text: &str) -> Result<Vec<OwnedCard>, LoadError> {
    let mut deck: Vec<OwnedCard> = Vec::new();
    let mut names = HashSet::new();

    for (idx, line) in text.lines().enumerate() {
        let line = line.trim_end();
        if line.is_empty() {
            continue;
        }

        let card = all_consuming(card_line)(line)
            .map_err(|_| {
                malformed(
                    idx + 1,
                    "expected '<name> <north> <east> <south> <west>' with values 1-9 or A",
                )
            })?
            .1;

        if !names.insert(card.name.clone()) {
            return Err(LoadError::DuplicateName {
                line: idx + 1,
                name: card.name,
            });
        }

        let owner = if deck.len() % 2 == 0 {
            Player::Red
        } else {
            Player::Blue
        };
        deck.push(OwnedCard { owner, card });
    }

    if deck.is_empty() {
        return Err(malformed(1, "the card database holds no cards"));
    }

    Ok(deck)
}

fn dimensions(i: &str) -> IResult<&str, (u8, u8)> {
    separated_pair(dec_u8, space1, dec_u8)(i)
}

fn layout_row(i: &str) -> IResult<&str, Vec<char>> {
    many1(one_of("CX"))(i)
}

fn attack_value(i: &str) -> IResult<&str, u8> {
    map(one_of("123456789A"), |value| match value {
        'A' => 10,
        digit => digit as u8 - b'0',
    })(i)
}

fn card_line(i: &str) -> IResult<&str, Card> {
    map(
        tuple((
            take_till1(|c: char| c.is_whitespace()),
            preceded(space1, attack_value),
            preceded(space1, attack_value),
            preceded(space1, attack_value),
            preceded(space1, attack_value),
        )),
        |(name, north, east, south, west)| Card::new(name, north, east, south, west),
    )(i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Cell;
    use test_case::test_case;

    #[test_case("1" => 1)]
    #[test_case("9" => 9)]
    #[test_case("A" => 10)]
    fn attack_values(input: &str) -> u8 {
        attack_value(input).unwrap().1
    }

    #[test_case("0")]
    #[test_case("a")]
    #[test_case("B")]
    fn bad_attack_values(input: &str) {
        assert!(attack_value(input).is_err());
    }

    #[test_case("Quistis 9 6 A 2" => Card::new("Quistis", 9, 6, 10, 2))]
    #[test_case("x 1 1 1 1" => Card::new("x", 1, 1, 1, 1))]
    fn card_lines(input: &str) -> Card {
        all_consuming(card_line)(input).unwrap().1
    }

    #[test]
    fn board_parses_playable_cells_and_holes() {
        let board = parse_board("2 3\nCXC\nCCC\n").unwrap();

        assert_eq!(board.rows(), 2);
        assert_eq!(board.cols(), 3);
        assert_eq!(board.cell(Pos::new(0, 1)), Ok(&Cell::Hole));
        assert_eq!(board.cell(Pos::new(0, 0)), Ok(&Cell::Empty));
        assert_eq!(board.playable_cells(), 5);
    }

    #[test]
    fn board_rejects_a_short_row_with_its_line_number() {
        let err = parse_board("2 3\nCC\nCCC\n").unwrap_err();

        assert!(matches!(err, LoadError::Malformed { line: 2, .. }), "{err}");
    }

    #[test]
    fn board_rejects_unknown_cell_characters() {
        let err = parse_board("1 3\nCOC\n").unwrap_err();

        assert!(matches!(err, LoadError::Malformed { line: 2, .. }), "{err}");
    }

    #[test]
    fn board_rejects_a_missing_header() {
        let err = parse_board("CCC\nCCC\n").unwrap_err();

        assert!(matches!(err, LoadError::Malformed { line: 1, .. }), "{err}");
    }

    #[test]
    fn board_rejects_trailing_garbage() {
        let err = parse_board("1 1\nC\nleftover\n").unwrap_err();

        assert!(matches!(err, LoadError::Malformed { line: 3, .. }), "{err}");
    }

    #[test]
    fn deck_alternates_owners_in_file_order() {
        let deck = parse_deck("a 1 2 3 4\nb 5 6 7 8\nc 9 A 1 2\n").unwrap();

        let owners: Vec<_> = deck.iter().map(|owned| owned.owner).collect();
        assert_eq!(owners, vec![Player::Red, Player::Blue, Player::Red]);
        assert_eq!(deck[2].card, Card::new("c", 9, 10, 1, 2));
    }

    #[test]
    fn deck_skips_blank_lines_without_breaking_alternation() {
        let deck = parse_deck("a 1 2 3 4\n\nb 5 6 7 8\n").unwrap();

        let owners: Vec<_> = deck.iter().map(|owned| owned.owner).collect();
        assert_eq!(owners, vec![Player::Red, Player::Blue]);
    }

    #[test]
    fn deck_rejects_duplicate_names_with_the_line_number() {
        let err = parse_deck("a 1 2 3 4\nb 5 6 7 8\na 9 9 9 9\n").unwrap_err();

        match err {
            LoadError::DuplicateName { line, name } => {
                assert_eq!(line, 3);
                assert_eq!(name, "a");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn deck_rejects_malformed_lines() {
        let err = parse_deck("a 1 2 3\n").unwrap_err();

        assert!(matches!(err, LoadError::Malformed { line: 1, .. }), "{err}");
    }

    #[test]
    fn deck_rejects_an_empty_file() {
        let err = parse_deck("\n\n").unwrap_err();

        assert!(matches!(err, LoadError::Malformed { line: 1, .. }), "{err}");
    }
}
