//! Card vocabulary shared by the asset generator and the browser client.
//!
//! The generator names every face twice (`A_S.svg` and `A_SPADES.svg`) because the
//! server is not consistent about which suit spelling it sends, so both the file names
//! and the parsers here accept either form.

use serde::{Deserialize, Serialize};
use std::fmt;
use tsify::Tsify;

/// File name of the card back asset.
pub const BACK_FILE_NAME: &str = "BACK.svg";

/// Rank code the server uses for a face-down card.
pub const BACK_RANK: &str = "BACK";

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum CardParseError {
    #[error("unknown rank: {0:?}")]
    UnknownRank(String),
    #[error("unknown suit: {0:?}")]
    UnknownSuit(String),
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Tsify,
)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "UPPERCASE")]
pub enum Suit {
    Spades,
    Hearts,
    Diamonds,
    Clubs,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];

    pub fn short_code(self) -> &'static str {
        match self {
            Suit::Spades => "S",
            Suit::Hearts => "H",
            Suit::Diamonds => "D",
            Suit::Clubs => "C",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Suit::Spades => "SPADES",
            Suit::Hearts => "HEARTS",
            Suit::Diamonds => "DIAMONDS",
            Suit::Clubs => "CLUBS",
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Suit::Spades => '\u{2660}',
            Suit::Hearts => '\u{2665}',
            Suit::Diamonds => '\u{2666}',
            Suit::Clubs => '\u{2663}',
        }
    }

    pub fn is_red(self) -> bool {
        matches!(self, Suit::Hearts | Suit::Diamonds)
    }

    /// Accepts either the one-letter code or the full name, ignoring case.
    pub fn parse(s: &str) -> Result<Self, CardParseError> {
        let s = s.trim();
        Suit::ALL
            .into_iter()
            .find(|suit| {
                s.eq_ignore_ascii_case(suit.short_code()) || s.eq_ignore_ascii_case(suit.name())
            })
            .ok_or_else(|| CardParseError::UnknownSuit(s.to_string()))
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Tsify,
)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub enum Rank {
    #[serde(rename = "A")]
    Ace,
    #[serde(rename = "2")]
    Two,
    #[serde(rename = "3")]
    Three,
    #[serde(rename = "4")]
    Four,
    #[serde(rename = "5")]
    Five,
    #[serde(rename = "6")]
    Six,
    #[serde(rename = "7")]
    Seven,
    #[serde(rename = "8")]
    Eight,
    #[serde(rename = "9")]
    Nine,
    #[serde(rename = "10")]
    Ten,
    #[serde(rename = "J")]
    Jack,
    #[serde(rename = "Q")]
    Queen,
    #[serde(rename = "K")]
    King,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
        }
    }

    /// Text drawn in the card corners. Currently the same as the code.
    pub fn label(self) -> &'static str {
        self.code()
    }

    pub fn parse(s: &str) -> Result<Self, CardParseError> {
        let s = s.trim();
        Rank::ALL
            .into_iter()
            .find(|rank| s.eq_ignore_ascii_case(rank.code()))
            .ok_or_else(|| CardParseError::UnknownRank(s.to_string()))
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CardFace {
    Face { rank: Rank, suit: Suit },
    Back,
}

impl CardFace {
    /// Every face in generation order (suit-major), without the back.
    pub fn all_faces() -> impl Iterator<Item = CardFace> {
        Suit::ALL.into_iter().flat_map(|suit| {
            Rank::ALL
                .into_iter()
                .map(move |rank| CardFace::Face { rank, suit })
        })
    }

    /// `A_S.svg`, `10_H.svg`, `BACK.svg`
    pub fn short_file_name(&self) -> String {
        match self {
            CardFace::Face { rank, suit } => format!("{}_{}.svg", rank.code(), suit.short_code()),
            CardFace::Back => BACK_FILE_NAME.to_string(),
        }
    }

    /// `A_SPADES.svg`, `10_HEARTS.svg`, `BACK.svg`
    pub fn long_file_name(&self) -> String {
        match self {
            CardFace::Face { rank, suit } => format!("{}_{}.svg", rank.code(), suit.name()),
            CardFace::Back => BACK_FILE_NAME.to_string(),
        }
    }
}

/// A card as the game server serializes it. Hidden cards come through as
/// `{"rank": "BACK", "suit": ""}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub struct CardDto {
    pub rank: String,
    #[serde(default)]
    pub suit: String,
}

impl CardDto {
    pub fn face(&self) -> Result<CardFace, CardParseError> {
        if self.rank.trim().eq_ignore_ascii_case(BACK_RANK) {
            return Ok(CardFace::Back);
        }
        Ok(CardFace::Face {
            rank: Rank::parse(&self.rank)?,
            suit: Suit::parse(&self.suit)?,
        })
    }
}

impl From<CardFace> for CardDto {
    fn from(face: CardFace) -> Self {
        match face {
            CardFace::Face { rank, suit } => CardDto {
                rank: rank.code().to_string(),
                suit: suit.short_code().to_string(),
            },
            CardFace::Back => CardDto {
                rank: BACK_RANK.to_string(),
                suit: String::new(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{BTreeSet, HashSet};

    #[test]
    fn test_all_faces_is_a_full_deck() {
        let faces: Vec<_> = CardFace::all_faces().collect();
        assert_eq!(faces.len(), 52);
        assert_eq!(faces.iter().collect::<HashSet<_>>().len(), 52);
        assert_eq!(
            faces[0],
            CardFace::Face {
                rank: Rank::Ace,
                suit: Suit::Spades
            }
        );
        assert_eq!(
            faces[51],
            CardFace::Face {
                rank: Rank::King,
                suit: Suit::Clubs
            }
        );
    }

    #[test]
    fn test_file_names() {
        let ten_of_hearts = CardFace::Face {
            rank: Rank::Ten,
            suit: Suit::Hearts,
        };
        assert_eq!(ten_of_hearts.short_file_name(), "10_H.svg");
        assert_eq!(ten_of_hearts.long_file_name(), "10_HEARTS.svg");
        assert_eq!(CardFace::Back.short_file_name(), "BACK.svg");
        assert_eq!(CardFace::Back.long_file_name(), "BACK.svg");
    }

    #[test]
    fn test_file_names_are_unique() {
        let names: BTreeSet<String> = CardFace::all_faces()
            .flat_map(|face| [face.short_file_name(), face.long_file_name()])
            .collect();
        assert_eq!(names.len(), 104);
        assert!(!names.contains(BACK_FILE_NAME));
    }

    #[test]
    fn test_parse_suit_accepts_both_spellings() {
        assert_eq!(Suit::parse("S"), Ok(Suit::Spades));
        assert_eq!(Suit::parse("spades"), Ok(Suit::Spades));
        assert_eq!(Suit::parse(" Diamonds "), Ok(Suit::Diamonds));
        assert_eq!(
            Suit::parse("X"),
            Err(CardParseError::UnknownSuit("X".to_string()))
        );
    }

    #[test]
    fn test_parse_rank() {
        assert_eq!(Rank::parse("10"), Ok(Rank::Ten));
        assert_eq!(Rank::parse("q"), Ok(Rank::Queen));
        assert!(Rank::parse("1").is_err());
        assert!(Rank::parse("").is_err());
    }

    #[test]
    fn test_dto_from_server_json() {
        let dto: CardDto = serde_json::from_str(r#"{"rank":"K","suit":"CLUBS"}"#).unwrap();
        assert_eq!(
            dto.face(),
            Ok(CardFace::Face {
                rank: Rank::King,
                suit: Suit::Clubs
            })
        );

        let hidden: CardDto = serde_json::from_str(r#"{"rank":"BACK","suit":""}"#).unwrap();
        assert_eq!(hidden.face(), Ok(CardFace::Back));

        let no_suit: CardDto = serde_json::from_str(r#"{"rank":"BACK"}"#).unwrap();
        assert_eq!(no_suit.face(), Ok(CardFace::Back));
    }

    #[test]
    fn test_dto_from_face() {
        let dto = CardDto::from(CardFace::Face {
            rank: Rank::Ace,
            suit: Suit::Diamonds,
        });
        assert_eq!(dto.rank, "A");
        assert_eq!(dto.suit, "D");
        assert_eq!(CardDto::from(CardFace::Back).face(), Ok(CardFace::Back));
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&Rank::Ten).unwrap(), r#""10""#);
        assert_eq!(serde_json::to_string(&Suit::Hearts).unwrap(), r#""HEARTS""#);
        assert!(Suit::Hearts.is_red());
        assert!(!Suit::Clubs.is_red());
    }
}
