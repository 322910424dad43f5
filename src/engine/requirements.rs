use std::fmt::{self, Display, Formatter};

use itertools::Itertools;

/// One of the contract's requirement counters.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Axis {
    Reactors,
    Thrusters,
    Shields,
    Damage,
    Crew,
}

impl Axis {
    pub const VALUES: [Axis; 5] = [
        Axis::Reactors,
        Axis::Thrusters,
        Axis::Shields,
        Axis::Damage,
        Axis::Crew,
    ];

    pub fn letter(self) -> char {
        match self {
            Axis::Reactors => 'R',
            Axis::Thrusters => 'T',
            Axis::Shields => 'S',
            Axis::Damage => 'D',
            Axis::Crew => 'C',
        }
    }

    /// ANSI SGR color code matching the axis's card kind.
    pub fn color(self) -> u32 {
        match self {
            Axis::Reactors => 33,
            Axis::Thrusters => 36,
            Axis::Shields => 34,
            Axis::Damage => 31,
            Axis::Crew => 32,
        }
    }
}

impl Display for Axis {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// The contract still left to fulfill: a counter per requirement axis.
///
/// Subtraction saturates at zero, so playing a card against an already
/// satisfied axis is allowed and does nothing.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Requirements {
    reactors: u32,
    thrusters: u32,
    shields: u32,
    damage: u32,
    crew: u32,
}

impl Requirements {
    pub fn new(reactors: u32, thrusters: u32, shields: u32, damage: u32, crew: u32) -> Requirements {
        Requirements {
            reactors,
            thrusters,
            shields,
            damage,
            crew,
        }
    }

    pub fn get(&self, axis: Axis) -> u32 {
        match axis {
            Axis::Reactors => self.reactors,
            Axis::Thrusters => self.thrusters,
            Axis::Shields => self.shields,
            Axis::Damage => self.damage,
            Axis::Crew => self.crew,
        }
    }

    pub fn sub(self, axis: Axis, n: u32) -> Requirements {
        let mut result = self;
        let counter = match axis {
            Axis::Reactors => &mut result.reactors,
            Axis::Thrusters => &mut result.thrusters,
            Axis::Shields => &mut result.shields,
            Axis::Damage => &mut result.damage,
            Axis::Crew => &mut result.crew,
        };
        *counter = counter.saturating_sub(n);
        result
    }

    pub fn sub_reactors(self, n: u32) -> Requirements {
        self.sub(Axis::Reactors, n)
    }

    pub fn sub_thrusters(self, n: u32) -> Requirements {
        self.sub(Axis::Thrusters, n)
    }

    pub fn sub_shields(self, n: u32) -> Requirements {
        self.sub(Axis::Shields, n)
    }

    pub fn sub_damage(self, n: u32) -> Requirements {
        self.sub(Axis::Damage, n)
    }

    pub fn sub_crew(self, n: u32) -> Requirements {
        self.sub(Axis::Crew, n)
    }

    /// True once every counter reached zero, i.e. the contract is fulfilled.
    pub fn is_empty(&self) -> bool {
        Axis::VALUES.iter().all(|&axis| self.get(axis) == 0)
    }

    /// Renders the non-zero axes as `<letter>×<count>` joined with `", "`.
    pub fn render(&self, color: bool) -> String {
        if self.is_empty() {
            return String::from("(none)");
        }
        Axis::VALUES
            .iter()
            .filter(|&&axis| self.get(axis) > 0)
            .map(|&axis| {
                let letter = if color {
                    format!("\u{1b}[{}m{}\u{1b}[0m", axis.color(), axis.letter())
                } else {
                    String::from(axis.letter())
                };
                format!("{}\u{d7}{}", letter, self.get(axis))
            })
            .join(", ")
    }
}

impl Display for Requirements {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(&self.render(false))
    }
}
