//! team-ga — evolve two disjoint three-member teams from a roster.
//!
//! # Usage
//!
//! ```bash
//! team-ga --population 50 --generations 10 --seed 7
//! team-ga --roster roster.toml --tournament 3
//! RUST_LOG=debug team-ga
//! ```
//!
//! A roster file holds an optional `[ga]` table (any [`GaConfig`] field)
//! and a list of `[[candidates]]` with `name`, `skill_a` and `skill_b`.
//! Command-line flags override file values; without candidates the built-in
//! eleven-candidate roster is used.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;
use serde::Deserialize;

use team_ga::ga::{GaConfig, GaRunner, Mutation, RepairPolicy, Selection};
use team_ga::roster::{builtin_candidates, Candidate, Roster};

/// Genetic-algorithm team selection.
#[derive(Parser, Debug)]
#[command(name = "team-ga", version)]
#[command(about = "Pick two disjoint teams of three maximizing a product-sum score")]
struct Cli {
    /// TOML roster file (`[ga]` table and `[[candidates]]` entries).
    #[arg(short, long)]
    roster: Option<PathBuf>,

    /// Population size (positive, even).
    #[arg(short, long)]
    population: Option<usize>,

    /// Number of generations after the initial population.
    #[arg(short, long)]
    generations: Option<usize>,

    /// Per-offspring mutation probability.
    #[arg(short, long)]
    mutation_rate: Option<f64>,

    /// Random seed for a reproducible run.
    #[arg(long)]
    seed: Option<u64>,

    /// Use tournament selection of this size instead of roulette wheel.
    #[arg(long)]
    tournament: Option<usize>,

    /// Mutation operator applied to each offspring.
    #[arg(long, value_enum)]
    mutation: Option<MutationArg>,

    /// Crossover repair policy for children with repeated candidates.
    #[arg(long, value_enum)]
    repair: Option<RepairArg>,

    /// Evaluate fitness in parallel (requires the `parallel` feature).
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Log filter used when RUST_LOG is unset.
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum RepairArg {
    PerChild,
    BothParents,
}

impl From<RepairArg> for RepairPolicy {
    fn from(arg: RepairArg) -> Self {
        match arg {
            RepairArg::PerChild => RepairPolicy::PerChild,
            RepairArg::BothParents => RepairPolicy::BothParents,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum MutationArg {
    Swap,
    Replace,
}

impl From<MutationArg> for Mutation {
    fn from(arg: MutationArg) -> Self {
        match arg {
            MutationArg::Swap => Mutation::Swap,
            MutationArg::Replace => Mutation::Replace,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct RosterFile {
    #[serde(default)]
    ga: GaConfig,
    #[serde(default)]
    candidates: Vec<Candidate>,
}

fn load_roster_file(path: &Path) -> Result<RosterFile> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading roster file {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("parsing roster file {}", path.display()))
}

impl Cli {
    /// File settings first, then flags on top.
    fn apply(&self, mut config: GaConfig) -> GaConfig {
        if let Some(n) = self.population {
            config = config.with_population_size(n);
        }
        if let Some(n) = self.generations {
            config = config.with_generations(n);
        }
        if let Some(rate) = self.mutation_rate {
            config = config.with_mutation_rate(rate);
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        if let Some(k) = self.tournament {
            config = config.with_selection(Selection::Tournament(k));
        }
        if let Some(mutation) = self.mutation {
            config = config.with_mutation(mutation.into());
        }
        if let Some(policy) = self.repair {
            config = config.with_repair_policy(policy.into());
        }
        if self.parallel {
            config = config.with_parallel(true);
        }
        config
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let env = env_logger::Env::default().default_filter_or(cli.log_level.as_str());
    env_logger::Builder::from_env(env).init();

    let file = match &cli.roster {
        Some(path) => load_roster_file(path)?,
        None => RosterFile::default(),
    };
    let candidates = if file.candidates.is_empty() {
        info!("using built-in roster");
        builtin_candidates()
    } else {
        file.candidates
    };
    let config = cli.apply(file.ga);

    let roster = Roster::load(candidates).context("loading roster")?;
    let result = GaRunner::run(&roster, &config).context("running GA")?;

    let teams = roster
        .teams(&result.best)
        .context("best chromosome refers outside the roster")?;
    println!("{teams}");
    println!("Best fitness: {}", result.best_fitness);
    println!("Found at generation: {}", result.found_at_generation);
    println!("Chromosome: {:?}", result.best.genes());

    Ok(())
}
