use more_asserts::assert_ge;
use once_cell::sync::Lazy;
use rand::RngCore;

use super::{CardEffect, Context, Solver};
use crate::engine::{
    card::{CardKind, KindId},
    cards::Cards,
    requirements::{Axis, Requirements},
    state::State,
};
use crate::error::Error;

pub const REACTOR: KindId = KindId(0);
pub const THRUSTER: KindId = KindId(1);
pub const SHIELD: KindId = KindId(2);
pub const DAMAGE: KindId = KindId(3);
pub const MISS: KindId = KindId(4);

/// The transition shared by every standard card: pay one action, optionally
/// refund some, reduce one requirement axis by one and draw from the pile.
///
/// Reactor is (reactors, refund 2, draw 0), Thruster is (thrusters, refund
/// 0, draw 2), Miss is (no axis, refund 0, draw 0), and so on. Callers can
/// reuse it for their own kinds or implement `CardEffect` from scratch.
#[derive(Debug)]
pub struct StandardEffect {
    axis: Option<Axis>,
    refund: u32,
    draw: u32,
}

impl StandardEffect {
    pub fn new(axis: Option<Axis>, refund: u32, draw: u32) -> StandardEffect {
        StandardEffect { axis, refund, draw }
    }

    fn next_requirements(&self, state: &State) -> Requirements {
        match self.axis {
            Some(axis) => state.requirements.sub(axis, 1),
            None => state.requirements,
        }
    }
}

impl CardEffect for StandardEffect {
    fn play<'c>(
        &self,
        solver: &mut Solver<'c>,
        kind: &'c CardKind,
        state: &State<'c>,
    ) -> Result<f64, Error> {
        assert_ge!(state.actions, 1);
        let mut hand = state.hand.clone();
        hand.remove(kind)?;
        let actions = state.actions - 1 + self.refund;
        let requirements = self.next_requirements(state);

        if self.draw == 0 {
            let next = State::new(actions, hand, state.draw_pile.clone(), requirements);
            return solver.completion_probability(&next);
        }

        // Weighted sum over every distinguishable draw outcome.
        let mut total = 0.0;
        state
            .draw_pile
            .for_each_draw(self.draw, |remaining, drawn, probability| {
                let next = State::new(
                    actions,
                    hand.clone() + drawn,
                    remaining.clone(),
                    requirements,
                );
                total += probability * solver.completion_probability(&next)?;
                Ok(())
            })?;
        Ok(total)
    }

    fn apply<'c>(
        &self,
        kind: &'c CardKind,
        state: &State<'c>,
        rng: &mut dyn RngCore,
    ) -> Result<State<'c>, Error> {
        assert_ge!(state.actions, 1);
        let mut hand = state.hand.clone();
        hand.remove(kind)?;
        let actions = state.actions - 1 + self.refund;
        let requirements = self.next_requirements(state);
        let (remaining, drawn) = state.draw_pile.draw_random(self.draw, rng);
        Ok(State::new(actions, hand + &drawn, remaining, requirements))
    }
}

/// Builds a fresh context holding the five standard kinds.
pub fn standard_context() -> Context {
    let mut context = Context::new();
    context.register(
        CardKind::new(REACTOR, "Reactor", 'R', 33, 0),
        Box::new(StandardEffect::new(Some(Axis::Reactors), 2, 0)),
    );
    context.register(
        CardKind::new(THRUSTER, "Thruster", 'T', 36, 1),
        Box::new(StandardEffect::new(Some(Axis::Thrusters), 0, 2)),
    );
    context.register(
        CardKind::new(SHIELD, "Shield", 'S', 34, 2),
        Box::new(StandardEffect::new(Some(Axis::Shields), 0, 0)),
    );
    context.register(
        CardKind::new(DAMAGE, "Damage", 'D', 31, 3),
        Box::new(StandardEffect::new(Some(Axis::Damage), 0, 0)),
    );
    context.register(
        CardKind::new(MISS, "Miss", 'M', 90, 4),
        Box::new(StandardEffect::new(None, 0, 0)),
    );
    context
}

/// The process-wide standard context.
pub fn standard() -> &'static Context {
    static CONTEXT: Lazy<Context> = Lazy::new(standard_context);
    &CONTEXT
}

/// The default ten-card deck: 3 Reactor, 2 Thruster, 2 Shield, 2 Damage,
/// 1 Miss.
pub fn default_deck(context: &Context) -> Cards<'_> {
    let mut cards = Cards::new();
    for (id, count) in [(REACTOR, 3), (THRUSTER, 2), (SHIELD, 2), (DAMAGE, 2), (MISS, 1)] {
        cards.add(
            context.kind(id).expect("standard kind must be registered"),
            count,
        );
    }
    cards
}

#[cfg(test)]
mod tests {
    use rand_mt::Mt64;

    use super::*;

    #[test]
    fn test_default_deck_composition() {
        let context = standard();
        let deck = default_deck(context);
        assert_eq!(10, deck.size());
        assert_eq!(3, deck.count(context.kind(REACTOR).unwrap()));
        assert_eq!(2, deck.count(context.kind(THRUSTER).unwrap()));
        assert_eq!(2, deck.count(context.kind(SHIELD).unwrap()));
        assert_eq!(2, deck.count(context.kind(DAMAGE).unwrap()));
        assert_eq!(1, deck.count(context.kind(MISS).unwrap()));
        assert_eq!("RRRTTSSDDM", deck.to_string());
    }

    #[test]
    fn test_kind_lookup_by_letter() {
        let context = standard();
        assert_eq!(
            THRUSTER,
            context.kind_by_letter('T').unwrap().get_id()
        );
        assert!(context.kind_by_letter('Z').is_none());
    }

    #[test]
    fn test_apply_miss_only_spends_an_action() {
        let context = standard();
        let miss = context.kind(MISS).unwrap();
        let state = State::new(
            2,
            Cards::from_pairs(&[(miss, 1)]),
            Cards::new(),
            Requirements::new(0, 0, 0, 1, 0),
        );

        let mut rng = Mt64::new(42);
        let effect = context.effect(MISS).unwrap();
        let next = effect.apply(miss, &state, &mut rng).unwrap();
        assert_eq!(1, next.actions);
        assert!(next.hand.is_empty());
        assert_eq!(state.requirements, next.requirements);
    }

    #[test]
    fn test_apply_thruster_moves_cards_to_hand() {
        let context = standard();
        let thruster = context.kind(THRUSTER).unwrap();
        let pile = default_deck(context);
        let state = State::new(
            1,
            Cards::from_pairs(&[(thruster, 1)]),
            pile.clone(),
            Requirements::new(0, 1, 0, 0, 0),
        );

        let mut rng = Mt64::new(42);
        let effect = context.effect(THRUSTER).unwrap();
        let next = effect.apply(thruster, &state, &mut rng).unwrap();
        assert_eq!(0, next.actions);
        assert_eq!(2, next.hand.size());
        assert_eq!(8, next.draw_pile.size());
        assert_eq!(pile, next.draw_pile.clone() + &next.hand);
        assert!(next.requirements.is_empty());
    }

    #[test]
    fn test_reactor_against_satisfied_axis_still_refunds() {
        // Saturating subtraction lets Reactor be played purely for tempo.
        let context = standard();
        let mut solver = Solver::new(context);
        let reactor = context.kind(REACTOR).unwrap();
        let damage = context.kind(DAMAGE).unwrap();
        let state = State::new(
            1,
            Cards::from_pairs(&[(reactor, 1), (damage, 2)]),
            Cards::new(),
            Requirements::new(0, 0, 0, 2, 0),
        );
        let p = solver.completion_probability(&state).unwrap();
        assert_eq!(1.0, p);
    }
}
