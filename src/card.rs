use std::fmt;
use std::str::FromStr;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::error::CardError;

pub const MIN_RANK_VALUE: u8 = 1;
pub const MAX_RANK_VALUE: u8 = 12;
pub const COPIES_PER_CARD: usize = 2;
pub const SKIP_COUNT: usize = 4;
pub const WILD_COUNT: usize = 8;
pub const DECK_SIZE: usize =
    Color::REAL.len() * Rank::NUMBERED.len() * COPIES_PER_CARD + SKIP_COUNT + WILD_COUNT;

/// Card color. Declaration order is the sort order.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum Color {
    Red,
    Blue,
    Green,
    Yellow,
    Wild,
    Skip,
}

impl Color {
    /// The four colors that appear on numbered cards.
    pub const REAL: [Color; 4] = [Color::Red, Color::Blue, Color::Green, Color::Yellow];

    pub fn letter(self) -> char {
        match self {
            Color::Red => 'R',
            Color::Blue => 'B',
            Color::Green => 'G',
            Color::Yellow => 'Y',
            Color::Wild => 'W',
            Color::Skip => 'S',
        }
    }

    /// Maps a token letter back to one of the real colors.
    pub fn from_letter(letter: char) -> Option<Color> {
        match letter {
            'R' => Some(Color::Red),
            'B' => Some(Color::Blue),
            'G' => Some(Color::Green),
            'Y' => Some(Color::Yellow),
            _ => None,
        }
    }
}

/// Card rank. Numbered ranks come first, in ascending order.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum Rank {
    One,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Eleven,
    Twelve,
    Skip,
    Wild,
}

impl Rank {
    /// Numbered ranks in run order.
    pub const NUMBERED: [Rank; 12] = [
        Rank::One,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Eleven,
        Rank::Twelve,
    ];

    /// Returns the face value of a numbered rank.
    #[inline]
    pub fn value(self) -> Option<u8> {
        Rank::NUMBERED
            .iter()
            .position(|rank| *rank == self)
            .map(|idx| idx as u8 + MIN_RANK_VALUE)
    }

    #[inline]
    pub fn from_value(value: u8) -> Option<Rank> {
        if !(MIN_RANK_VALUE..=MAX_RANK_VALUE).contains(&value) {
            return None;
        }
        Some(Rank::NUMBERED[(value - MIN_RANK_VALUE) as usize])
    }
}

/// A single card: a (color, rank) pair where wild and skip must agree.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Card {
    color: Color,
    rank: Rank,
}

impl Card {
    pub const WILD: Card = Card {
        color: Color::Wild,
        rank: Rank::Wild,
    };
    pub const SKIP: Card = Card {
        color: Color::Skip,
        rank: Rank::Skip,
    };

    pub fn new(color: Color, rank: Rank) -> Result<Self, CardError> {
        let wild_mismatch = (color == Color::Wild) != (rank == Rank::Wild);
        let skip_mismatch = (color == Color::Skip) != (rank == Rank::Skip);
        if wild_mismatch || skip_mismatch {
            return Err(CardError::Mismatch { color, rank });
        }
        Ok(Self { color, rank })
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub fn rank(&self) -> Rank {
        self.rank
    }

    #[inline]
    pub fn is_wild(&self) -> bool {
        self.rank == Rank::Wild
    }

    #[inline]
    pub fn is_skip(&self) -> bool {
        self.rank == Rank::Skip
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Wild and skip cards carry their own letter as color.
        match self.rank.value() {
            Some(value) => write!(f, "{}{}", self.color.letter(), value),
            None => write!(f, "{}", self.color.letter()),
        }
    }
}

impl FromStr for Card {
    type Err = CardError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token {
            "W" => return Ok(Card::WILD),
            "S" => return Ok(Card::SKIP),
            _ => {}
        }
        let mut chars = token.chars();
        let (Some(letter), digits) = (chars.next(), chars.as_str()) else {
            return Err(CardError::Parse {
                token: token.to_string(),
            });
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CardError::Parse {
                token: token.to_string(),
            });
        }
        let color = Color::from_letter(letter).ok_or_else(|| CardError::UnknownColor {
            token: token.to_string(),
        })?;
        let rank = digits
            .parse::<u8>()
            .ok()
            .filter(|_| !digits.starts_with('0'))
            .and_then(Rank::from_value)
            .ok_or_else(|| CardError::UnknownRank {
                token: token.to_string(),
            })?;
        Card::new(color, rank)
    }
}

impl TryFrom<String> for Card {
    type Error = CardError;

    fn try_from(token: String) -> Result<Self, Self::Error> {
        token.parse()
    }
}

impl From<Card> for String {
    fn from(card: Card) -> Self {
        card.to_string()
    }
}

/// Parses a single card token such as `R5`, `W` or `S`.
pub fn parse_card(token: &str) -> Result<Card, CardError> {
    token.parse()
}

/// Parses whitespace separated card tokens, failing on the first bad token.
pub fn parse_sequence(text: &str) -> Result<Vec<Card>, CardError> {
    text.split_whitespace().map(parse_card).collect()
}

/// Builds the full 108-card deck in deterministic order (unshuffled).
pub fn full_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for color in Color::REAL {
        for rank in Rank::NUMBERED {
            let card = Card { color, rank };
            deck.extend(std::iter::repeat(card).take(COPIES_PER_CARD));
        }
    }
    deck.extend(std::iter::repeat(Card::SKIP).take(SKIP_COUNT));
    deck.extend(std::iter::repeat(Card::WILD).take(WILD_COUNT));
    deck
}

/// Builds the full deck and shuffles it deterministically from `seed`.
pub fn shuffled_deck(seed: u64) -> Vec<Card> {
    let mut deck = full_deck();
    let mut rng = StdRng::seed_from_u64(seed);
    deck.shuffle(&mut rng);
    deck
}
