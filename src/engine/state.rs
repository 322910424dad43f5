use std::fmt::{self, Display, Formatter};

use super::{cards::Cards, requirements::Requirements};

/// A full snapshot of one player's situation: the action budget, the hand,
/// the face-down draw pile and the contract still left to fulfill.
///
/// States are plain values; the solver clones them into its cache, so
/// equality and hashing are component-wise and both card collections compare
/// order-independently.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct State<'c> {
    pub actions: u32,
    pub hand: Cards<'c>,
    pub draw_pile: Cards<'c>,
    pub requirements: Requirements,
}

impl<'c> State<'c> {
    pub fn new(
        actions: u32,
        hand: Cards<'c>,
        draw_pile: Cards<'c>,
        requirements: Requirements,
    ) -> State<'c> {
        State {
            actions,
            hand,
            draw_pile,
            requirements,
        }
    }
}

impl<'c> Display for State<'c> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        writeln!(f, "actions: {}", self.actions)?;
        writeln!(f, "hand: [")?;
        for (kind, count) in self.hand.iter() {
            f.write_str(&textwrap::indent(
                &format!("{} \u{d7}{}\n", kind, count),
                "    ",
            ))?;
        }
        writeln!(f, "]")?;
        writeln!(f, "draw pile: {}", self.draw_pile)?;
        write!(f, "requirements: {}", self.requirements)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    use super::*;
    use crate::engine::card::{CardKind, KindId};

    fn hash_of(state: &State) -> u64 {
        let mut hasher = DefaultHasher::new();
        state.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_equality_is_component_wise() {
        let damage = CardKind::new(KindId(3), "Damage", 'D', 31, 3);
        let miss = CardKind::new(KindId(4), "Miss", 'M', 90, 4);

        let hand = Cards::from_pairs(&[(&damage, 1)]);
        let pile = Cards::from_pairs(&[(&miss, 2)]);
        let requirements = Requirements::new(0, 0, 0, 1, 0);

        let a = State::new(1, hand.clone(), pile.clone(), requirements);
        let b = State::new(1, hand.clone(), pile.clone(), requirements);
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));

        let c = State::new(2, hand.clone(), pile.clone(), requirements);
        assert_ne!(a, c);
        let d = State::new(1, hand.clone(), pile.clone(), requirements.sub_damage(1));
        assert_ne!(a, d);
        let e = State::new(1, pile.clone(), hand.clone(), requirements);
        assert_ne!(a, e);
    }

    #[test]
    fn test_display_lists_hand() {
        let damage = CardKind::new(KindId(3), "Damage", 'D', 31, 3);
        let state = State::new(
            2,
            Cards::from_pairs(&[(&damage, 2)]),
            Cards::new(),
            Requirements::new(0, 0, 0, 2, 0),
        );
        let rendered = format!("{}", state);
        assert!(rendered.contains("actions: 2"));
        assert!(rendered.contains("    (D)Damage \u{d7}2"));
        assert!(rendered.contains("requirements: D\u{d7}2"));
    }
}
