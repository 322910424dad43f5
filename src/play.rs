use clap::Args;
use log::*;
use rand_mt::Mt64;

use crate::engine::state::State;
use crate::error::Error;
use crate::solver::{Context, Solver};

#[derive(Args)]
pub struct PlayArgs {
    /// How many playouts to run.
    #[clap(long, short = 'g', value_parser, default_value_t = 1000)]
    pub games: u32,
}

/// Plays the scenario out `games` times, always choosing the card the exact
/// solver ranks best and sampling draws at random, then prints the empirical
/// win rate next to the exact probability.
///
/// This validates the solver against the real game dynamics; the exact
/// number never comes from sampling.
pub fn run_play(context: &Context, state: &State, args: PlayArgs) {
    // Use fixed seed for reproducible results.
    let mut rng = Mt64::new(0x42);
    let mut solver = Solver::new(context);

    let exact = solver
        .completion_probability(state)
        .unwrap_or_else(|e| panic!("Failed to solve the scenario: {}", e));

    let mut won = 0;
    for n in 0..args.games {
        let victory = playout(&mut solver, state.clone(), &mut rng)
            .unwrap_or_else(|e| panic!("Playout failed: {}", e));
        if victory {
            won += 1;
        }
        if n % 100 == 0 {
            debug!("Playout #{}: {} wins so far", n, won);
        }
    }

    let rate = f64::from(won) / f64::from(args.games.max(1));
    println!("exact probability:  {:.6}", exact);
    println!(
        "empirical win rate: {:.6} ({} / {} games)",
        rate, won, args.games
    );
    println!(
        "explored states: {} (cache size: {})",
        solver.explored_count(),
        solver.cache_size()
    );
}

/// Runs one game to the end. Wins when the requirements empty out, loses
/// when the actions do first (or no playable line remains).
pub fn playout<'c>(
    solver: &mut Solver<'c>,
    mut state: State<'c>,
    rng: &mut Mt64,
) -> Result<bool, Error> {
    loop {
        if state.requirements.is_empty() {
            return Ok(true);
        }
        if state.actions == 0 || state.hand.is_empty() {
            return Ok(false);
        }
        let (kind, probability) = match solver.best_card(&state)? {
            Some(best) => best,
            None => return Ok(false),
        };
        if probability == 0.0 {
            // Every line loses; playing on cannot change the outcome.
            return Ok(false);
        }
        trace!("playing {} (win probability {:.6})", kind, probability);
        let effect = solver
            .context()
            .effect(kind.get_id())
            .ok_or_else(|| Error::UnregisteredKind {
                kind: String::from(kind.get_name()),
            })?;
        state = effect.apply(kind, &state, rng)?;
    }
}
