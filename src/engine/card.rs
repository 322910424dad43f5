use std::{
    cmp::Ordering,
    fmt::{self, Display, Formatter},
    hash::{Hash, Hasher},
};

/// Stable identity of a card kind. Kinds with the same id are the same kind.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct KindId(pub u32);

/// An immutable descriptor of one distinguishable card type.
///
/// Kinds are registered once at startup and referenced by shared borrow for
/// the rest of the process. Equality, ordering and hashing all follow the id
/// so a kind can serve as a map key.
#[derive(Debug, Eq)]
pub struct CardKind {
    id: KindId,
    name: String,
    letter: char,

    /// ANSI SGR color code used when rendering to a console.
    color: u32,

    /// Position in rendered card listings. Only affects presentation.
    sort_order: u32,
}

impl CardKind {
    pub fn new(id: KindId, name: &str, letter: char, color: u32, sort_order: u32) -> CardKind {
        CardKind {
            id,
            name: String::from(name),
            letter,
            color,
            sort_order,
        }
    }

    pub fn get_id(&self) -> KindId {
        self.id
    }

    pub fn get_name(&self) -> &str {
        &self.name
    }

    pub fn get_letter(&self) -> char {
        self.letter
    }

    pub fn get_color(&self) -> u32 {
        self.color
    }

    pub fn get_sort_order(&self) -> u32 {
        self.sort_order
    }
}

impl Display for CardKind {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "({}){}", self.letter, self.name)
    }
}

impl Ord for CardKind {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl PartialOrd for CardKind {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for CardKind {
    fn eq(&self, other: &Self) -> bool {
        self.id.eq(&other.id)
    }
}

impl Hash for CardKind {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
