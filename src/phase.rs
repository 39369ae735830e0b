//! Phase descriptors: `S`, `C`, `R`, `S<n>`, `C<n>`, `R<n>` and `+`-joined sized components.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::card::{DECK_SIZE, Rank};
use crate::error::PhaseError;

/// Longest run the numbered ranks allow.
pub const MAX_RUN_SIZE: usize = Rank::NUMBERED.len();
/// Largest set or color group a single deck can supply.
pub const MAX_GROUP_SIZE: usize = DECK_SIZE;

/// The kind of grouping a phase component asks for.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Shape {
    /// Cards sharing a rank.
    Set,
    /// Cards sharing a color.
    Color,
    /// Cards of consecutive ranks, any color.
    Run,
}

impl Shape {
    pub fn letter(self) -> char {
        match self {
            Shape::Set => 'S',
            Shape::Color => 'C',
            Shape::Run => 'R',
        }
    }

    pub fn from_letter(letter: char) -> Option<Shape> {
        match letter {
            'S' => Some(Shape::Set),
            'C' => Some(Shape::Color),
            'R' => Some(Shape::Run),
            _ => None,
        }
    }

    fn max_size(self) -> usize {
        match self {
            Shape::Run => MAX_RUN_SIZE,
            Shape::Set | Shape::Color => MAX_GROUP_SIZE,
        }
    }
}

/// One sized requirement, e.g. `R4`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Component {
    shape: Shape,
    size: usize,
}

impl Component {
    pub fn new(shape: Shape, size: usize) -> Result<Self, PhaseError> {
        let max = shape.max_size();
        if size == 0 || size > max {
            return Err(PhaseError::InvalidSize {
                component: format!("{}{}", shape.letter(), size),
                size,
                max,
            });
        }
        Ok(Self { shape, size })
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn size(&self) -> usize {
        self.size
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.shape.letter(), self.size)
    }
}

/// A parsed phase descriptor.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// A single group of any size of at least one.
    Unsized(Shape),
    /// One or more sized components that must be satisfied in order.
    Sized(Vec<Component>),
}

impl Phase {
    /// Shape of every component in order, dropping the sizes.
    pub fn shapes(&self) -> Vec<Shape> {
        match self {
            Phase::Unsized(shape) => vec![*shape],
            Phase::Sized(components) => components.iter().map(|c| c.shape).collect(),
        }
    }

    /// Fewest cards that can satisfy the phase.
    pub fn min_cards(&self) -> usize {
        match self {
            Phase::Unsized(_) => 1,
            Phase::Sized(components) => components.iter().map(|c| c.size).sum(),
        }
    }
}

impl FromStr for Phase {
    type Err = PhaseError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let unrecognized = || PhaseError::Unrecognized(text.to_string());

        let mut chars = text.chars();
        if let (Some(letter), None) = (chars.next(), chars.next()) {
            return Shape::from_letter(letter)
                .map(Phase::Unsized)
                .ok_or_else(unrecognized);
        }

        let mut components = Vec::new();
        for part in text.split('+') {
            let mut chars = part.chars();
            let shape = chars
                .next()
                .and_then(Shape::from_letter)
                .ok_or_else(unrecognized)?;
            let digits = chars.as_str();
            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return Err(unrecognized());
            }
            // Digit strings too long for usize are out of range rather than malformed.
            let size = digits.parse::<usize>().unwrap_or(usize::MAX);
            components.push(Component::new(shape, size)?);
        }
        Ok(Phase::Sized(components))
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Unsized(shape) => write!(f, "{}", shape.letter()),
            Phase::Sized(components) => {
                for (idx, component) in components.iter().enumerate() {
                    if idx > 0 {
                        f.write_str("+")?;
                    }
                    write!(f, "{component}")?;
                }
                Ok(())
            }
        }
    }
}
