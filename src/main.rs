extern crate env_logger;
extern crate log;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueHint};
use log::*;

use stardeck::{
    engine::state::State,
    play::{self, PlayArgs},
    scenario::Scenario,
    solver::{standard, Context, Solver},
};

#[derive(Parser)]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ScenarioArgs {
    /// a file path to a scenario file; overrides the other scenario flags
    #[clap(
        long,
        value_parser,
        value_hint=ValueHint::FilePath,
    )]
    scenario_path: Option<PathBuf>,

    #[clap(long, short = 'a', value_parser, default_value_t = 3)]
    actions: u32,

    /// Cards in hand, one letter per card (e.g. "RTD")
    #[clap(long, value_parser, default_value_t = String::new())]
    hand: String,

    /// Cards in the draw pile; defaults to the standard deck
    #[clap(long, value_parser)]
    pile: Option<String>,

    #[clap(long, value_parser, default_value_t = 0)]
    reactors: u32,

    #[clap(long, value_parser, default_value_t = 0)]
    thrusters: u32,

    #[clap(long, value_parser, default_value_t = 0)]
    shields: u32,

    #[clap(long, value_parser, default_value_t = 0)]
    damage: u32,

    #[clap(long, value_parser, default_value_t = 0)]
    crew: u32,
}

impl ScenarioArgs {
    fn to_scenario(&self, context: &Context) -> Scenario {
        if let Some(path) = &self.scenario_path {
            return Scenario::load(path);
        }
        let mut scenario = Scenario {
            actions: self.actions,
            hand: self.hand.clone(),
            draw_pile: String::new(),
            requirements: Default::default(),
        };
        scenario.draw_pile = match &self.pile {
            Some(pile) => pile.clone(),
            None => standard::default_deck(context).to_string(),
        };
        scenario.requirements.reactors = self.reactors;
        scenario.requirements.thrusters = self.thrusters;
        scenario.requirements.shields = self.shields;
        scenario.requirements.damage = self.damage;
        scenario.requirements.crew = self.crew;
        scenario
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the exact completion probability for a scenario.
    Solve {
        #[clap(flatten)]
        scenario: ScenarioArgs,
    },

    /// Play a scenario out repeatedly, following the solver's card choices.
    Play {
        #[clap(flatten)]
        scenario: ScenarioArgs,

        #[clap(flatten)]
        args: PlayArgs,
    },
}

fn run_solve(context: &Context, state: &State) {
    let mut solver = Solver::new(context);
    let probability = solver
        .completion_probability(state)
        .unwrap_or_else(|e| panic!("Failed to solve the scenario: {}", e));

    println!("{}", state);
    println!();
    println!("completion probability: {:.6}", probability);
    println!(
        "explored states: {} (cache size: {})",
        solver.explored_count(),
        solver.cache_size()
    );
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    let context = standard::standard();

    match cli.command {
        Commands::Solve { scenario } => {
            let scenario = scenario.to_scenario(context);
            debug!("solving scenario: {:?}", scenario);
            let state = scenario
                .to_state(context)
                .unwrap_or_else(|e| panic!("Invalid scenario: {}", e));
            run_solve(context, &state);
        }
        Commands::Play { scenario, args } => {
            let scenario = scenario.to_scenario(context);
            debug!("playing scenario: {:?}", scenario);
            let state = scenario
                .to_state(context)
                .unwrap_or_else(|e| panic!("Invalid scenario: {}", e));
            println!("{}", state);
            println!();
            play::run_play(context, &state, args);
        }
    }
}
