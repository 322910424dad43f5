use std::{
    collections::{BTreeMap, HashMap},
    fmt,
};

use log::*;
use rand::RngCore;

use crate::engine::{
    card::{CardKind, KindId},
    cards::Cards,
    requirements::Requirements,
    state::State,
};
use crate::error::Error;

pub mod standard;

/// The transition a card kind performs when played.
///
/// Both methods assume the played card is in `state.hand` and that
/// `state.actions` is at least one; the solver guarantees both. Neither may
/// mutate the input state: successors are fresh values. A successor may
/// carry the same or a higher action count than its parent, which is how
/// refunding cards are expressed.
pub trait CardEffect: fmt::Debug + Send + Sync {
    /// Returns the completion probability assuming `kind` is played from
    /// `state` and every later choice is optimal. Implementations evaluate
    /// successors by calling back into the solver, weighting draw outcomes
    /// by their exact probabilities.
    fn play<'c>(
        &self,
        solver: &mut Solver<'c>,
        kind: &'c CardKind,
        state: &State<'c>,
    ) -> Result<f64, Error>;

    /// Builds one concrete successor, sampling any draw with `rng`. Playouts
    /// use this; the exact solver never does.
    fn apply<'c>(
        &self,
        kind: &'c CardKind,
        state: &State<'c>,
        rng: &mut dyn RngCore,
    ) -> Result<State<'c>, Error>;
}

/// The set of card kinds in play, each paired with its transition.
///
/// Built once at startup; everything downstream borrows kinds from here,
/// which is what lets multisets and states share descriptors freely.
#[derive(Debug, Default)]
pub struct Context {
    kinds: BTreeMap<KindId, CardKind>,
    effects: HashMap<KindId, Box<dyn CardEffect>>,
}

impl Context {
    pub fn new() -> Context {
        Context::default()
    }

    pub fn register(&mut self, kind: CardKind, effect: Box<dyn CardEffect>) {
        let id = kind.get_id();
        debug!("Registering card kind {}", kind);
        let replaced = self.kinds.insert(id, kind);
        assert!(
            replaced.is_none(),
            "A card kind is already registered under {:?}",
            id
        );
        self.effects.insert(id, effect);
    }

    pub fn kind(&self, id: KindId) -> Option<&CardKind> {
        self.kinds.get(&id)
    }

    pub fn kinds(&self) -> impl Iterator<Item = &CardKind> {
        self.kinds.values()
    }

    pub fn kind_by_letter(&self, letter: char) -> Option<&CardKind> {
        self.kinds().find(|kind| kind.get_letter() == letter)
    }

    pub fn effect(&self, id: KindId) -> Option<&dyn CardEffect> {
        self.effects.get(&id).map(|e| e.as_ref())
    }

    /// Builds a state after checking that every kind in it is registered.
    pub fn new_state<'c>(
        &'c self,
        actions: u32,
        hand: Cards<'c>,
        draw_pile: Cards<'c>,
        requirements: Requirements,
    ) -> Result<State<'c>, Error> {
        for kind in hand.kinds().chain(draw_pile.kinds()) {
            if self.effects.get(&kind.get_id()).is_none() {
                return Err(Error::UnregisteredKind {
                    kind: String::from(kind.get_name()),
                });
            }
        }
        Ok(State::new(actions, hand, draw_pile, requirements))
    }
}

/// Computes exact completion probabilities by memoized recursion.
///
/// One solver owns one cache; it is single-threaded and lives for one solve
/// session. Concurrent solves need independent solvers over a shared
/// context.
pub struct Solver<'c> {
    context: &'c Context,
    cache: HashMap<State<'c>, f64>,
    explored: u64,
}

impl<'c> Solver<'c> {
    pub fn new(context: &'c Context) -> Solver<'c> {
        Solver {
            context,
            cache: HashMap::new(),
            explored: 0,
        }
    }

    /// The probability that the contract can still be fulfilled from `state`
    /// under optimal play.
    ///
    /// Every recursion strictly shrinks (hand + pile size, actions)
    /// lexicographically, since playing any card consumes it and drawing
    /// only moves cards from the pile to the hand.
    pub fn completion_probability(&mut self, state: &State<'c>) -> Result<f64, Error> {
        self.explored += 1;
        if state.requirements.is_empty() {
            return Ok(1.0);
        }
        if state.actions == 0 {
            return Ok(0.0);
        }
        if let Some(&cached) = self.cache.get(state) {
            return Ok(cached);
        }

        let context = self.context;
        let mut best = 0.0;
        for kind in state.hand.kinds() {
            let effect = context
                .effect(kind.get_id())
                .ok_or_else(|| Error::UnregisteredKind {
                    kind: String::from(kind.get_name()),
                })?;
            let probability = effect.play(self, kind, state)?;
            if probability > best {
                best = probability;
            }
        }
        trace!(
            "resolved state (actions: {}, hand: {}) -> {}",
            state.actions,
            state.hand,
            best
        );
        self.cache.insert(state.clone(), best);
        Ok(best)
    }

    /// The playable kind with the highest completion probability, or `None`
    /// when the state is already decided or the hand is empty. Backs the
    /// playout policy.
    pub fn best_card(
        &mut self,
        state: &State<'c>,
    ) -> Result<Option<(&'c CardKind, f64)>, Error> {
        if state.requirements.is_empty() || state.actions == 0 {
            return Ok(None);
        }
        let context = self.context;
        let mut best: Option<(&'c CardKind, f64)> = None;
        for kind in state.hand.kinds() {
            let effect = context
                .effect(kind.get_id())
                .ok_or_else(|| Error::UnregisteredKind {
                    kind: String::from(kind.get_name()),
                })?;
            let probability = effect.play(self, kind, state)?;
            if best.map_or(true, |(_, p)| probability > p) {
                best = Some((kind, probability));
            }
        }
        Ok(best)
    }

    pub fn context(&self) -> &'c Context {
        self.context
    }

    /// Total `completion_probability` calls so far, cache hits included.
    pub fn explored_count(&self) -> u64 {
        self.explored
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}
