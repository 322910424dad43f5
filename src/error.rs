use std::{error, fmt};

/// Errors raised by the card engine and the solver.
#[derive(Debug)]
pub enum Error {
    /// Tried to remove a card kind which is absent from a multiset, or more
    /// copies of it than the multiset holds.
    NotEnoughCards { kind: String, want: u32, have: u32 },

    /// The draw pile is too large for exact 64-bit outcome weights.
    DeckTooLarge { size: u32 },

    /// A state refers to a card kind with no registered transition.
    UnregisteredKind { kind: String },

    /// A card letter which no registered kind uses.
    UnknownCardLetter { letter: char },
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::NotEnoughCards { kind, want, have } => {
                write!(
                    f,
                    "not enough '{}' cards: wanted {} but only {} present",
                    kind, want, have
                )
            }
            Self::DeckTooLarge { size } => {
                write!(
                    f,
                    "draw pile holds {} cards; draw enumeration is exact only up to {}",
                    size,
                    crate::engine::cards::MAX_PILE_SIZE
                )
            }
            Self::UnregisteredKind { kind } => {
                write!(f, "card kind '{}' has no registered transition", kind)
            }
            Self::UnknownCardLetter { letter } => {
                write!(f, "no card kind uses the letter '{}'", letter)
            }
        }
    }
}
