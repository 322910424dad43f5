use std::{fs::File, io::BufReader, path::Path};

use log::*;
use serde::{Deserialize, Serialize};

use crate::engine::{cards::Cards, requirements::Requirements, state::State};
use crate::error::Error;
use crate::solver::Context;

/// Requirement counters as they appear in scenario files. Axes left out of
/// the file default to zero.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RequirementCounts {
    pub reactors: u32,
    pub thrusters: u32,
    pub shields: u32,
    pub damage: u32,
    pub crew: u32,
}

impl From<RequirementCounts> for Requirements {
    fn from(counts: RequirementCounts) -> Requirements {
        Requirements::new(
            counts.reactors,
            counts.thrusters,
            counts.shields,
            counts.damage,
            counts.crew,
        )
    }
}

/// A solvable situation as read from a JSON file: an action budget, hand and
/// draw pile as card-letter strings, and the contract to fulfill.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    pub actions: u32,
    pub hand: String,
    pub draw_pile: String,
    pub requirements: RequirementCounts,
}

impl Scenario {
    pub fn load(path: &Path) -> Scenario {
        debug!("loading scenario from {:?}", path);
        let file = File::open(path).unwrap_or_else(|_| panic!("Failed to open: {:?}", path));
        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .unwrap_or_else(|e| panic!("Malformed scenario file {:?}: {}", path, e))
    }

    /// Resolves the card letters against `context` and builds a validated
    /// state borrowing its kinds.
    pub fn to_state<'c>(&self, context: &'c Context) -> Result<State<'c>, Error> {
        let hand = parse_cards(context, &self.hand)?;
        let draw_pile = parse_cards(context, &self.draw_pile)?;
        context.new_state(self.actions, hand, draw_pile, self.requirements.into())
    }
}

/// Parses a card-letter string ("RTD" is one Reactor, one Thruster, one
/// Damage) against the registered kinds. Whitespace is ignored.
pub fn parse_cards<'c>(context: &'c Context, letters: &str) -> Result<Cards<'c>, Error> {
    let mut cards = Cards::new();
    for letter in letters.chars() {
        if letter.is_whitespace() {
            continue;
        }
        let kind = context
            .kind_by_letter(letter)
            .ok_or(Error::UnknownCardLetter { letter })?;
        cards.add(kind, 1);
    }
    Ok(cards)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::standard;

    #[test]
    fn test_parse_cards() {
        let context = standard::standard();
        let cards = parse_cards(context, "RRD M").unwrap();
        assert_eq!(4, cards.size());
        assert_eq!(2, cards.count(context.kind_by_letter('R').unwrap()));
        assert_eq!(1, cards.count(context.kind_by_letter('D').unwrap()));
        assert_eq!(1, cards.count(context.kind_by_letter('M').unwrap()));

        assert!(parse_cards(context, "").unwrap().is_empty());
        assert!(matches!(
            parse_cards(context, "RX"),
            Err(Error::UnknownCardLetter { letter: 'X' })
        ));
    }

    #[test]
    fn test_scenario_from_json_with_defaults() {
        let scenario: Scenario = serde_json::from_str(
            r#"{"actions": 2, "hand": "T", "draw_pile": "DMM", "requirements": {"thrusters": 1, "damage": 1}}"#,
        )
        .unwrap();
        assert_eq!(2, scenario.actions);
        assert_eq!("T", scenario.hand);
        assert_eq!(1, scenario.requirements.thrusters);
        assert_eq!(0, scenario.requirements.crew);

        let bare: Scenario = serde_json::from_str(r#"{"actions": 1}"#).unwrap();
        assert_eq!("", bare.hand);
        assert_eq!("", bare.draw_pile);
        assert!(Requirements::from(bare.requirements).is_empty());
    }

    #[test]
    fn test_scenario_to_state() {
        let context = standard::standard();
        let scenario: Scenario = serde_json::from_str(
            r#"{"actions": 2, "hand": "T", "draw_pile": "DMM", "requirements": {"thrusters": 1, "damage": 1}}"#,
        )
        .unwrap();
        let state = scenario.to_state(context).unwrap();
        assert_eq!(2, state.actions);
        assert_eq!(1, state.hand.size());
        assert_eq!(3, state.draw_pile.size());
        assert_eq!(Requirements::new(0, 1, 0, 1, 0), state.requirements);
    }
}
