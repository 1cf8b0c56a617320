//! Candidate registry.
//!
//! A [`Roster`] is an immutable list of scored [`Candidate`]s. Candidates
//! are identified by their position in the roster; chromosomes refer to
//! them by index only.

use std::fmt;

use crate::error::{Result, TeamError};
use crate::ga::{Chromosome, CHROMOSOME_LEN};

/// A scored candidate.
///
/// `skill_a` is used when the candidate sits in team A, `skill_b` when the
/// candidate sits in team B.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Candidate {
    pub name: String,
    pub skill_a: u32,
    pub skill_b: u32,
}

impl Candidate {
    pub fn new(name: impl Into<String>, skill_a: u32, skill_b: u32) -> Self {
        Self {
            name: name.into(),
            skill_a,
            skill_b,
        }
    }
}

/// Immutable list of candidates, loaded once per run.
///
/// # Examples
///
/// ```
/// use team_ga::roster::{builtin_candidates, Roster};
///
/// let roster = Roster::load(builtin_candidates()).unwrap();
/// assert_eq!(roster.size(), 11);
/// assert_eq!(roster.get(2).unwrap().name, "Zayn");
/// ```
#[derive(Debug, Clone)]
pub struct Roster {
    candidates: Vec<Candidate>,
}

impl Roster {
    /// Builds a roster, rejecting anything too small to field two disjoint
    /// teams.
    pub fn load(candidates: Vec<Candidate>) -> Result<Self> {
        if candidates.len() < CHROMOSOME_LEN {
            return Err(TeamError::InvalidRoster {
                found: candidates.len(),
                required: CHROMOSOME_LEN,
            });
        }
        Ok(Self { candidates })
    }

    /// Number of candidates.
    pub fn size(&self) -> usize {
        self.candidates.len()
    }

    pub fn get(&self, index: usize) -> Option<&Candidate> {
        self.candidates.get(index)
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Resolves a chromosome into the two teams it encodes.
    ///
    /// Returns `None` when any gene is outside the roster.
    pub fn teams(&self, chromosome: &Chromosome) -> Option<TeamPair<'_>> {
        Some(TeamPair {
            team_a: self.resolve(chromosome.team_a())?,
            team_b: self.resolve(chromosome.team_b())?,
        })
    }

    fn resolve(&self, genes: &[usize]) -> Option<Vec<&Candidate>> {
        genes.iter().map(|&i| self.get(i)).collect()
    }
}

/// Team A / team B view over a chromosome, borrowing from the roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamPair<'a> {
    pub team_a: Vec<&'a Candidate>,
    pub team_b: Vec<&'a Candidate>,
}

impl TeamPair<'_> {
    /// Product of team A's `skill_a` values.
    pub fn strength_a(&self) -> u64 {
        product(self.team_a.iter().map(|c| c.skill_a))
    }

    /// Product of team B's `skill_b` values.
    pub fn strength_b(&self) -> u64 {
        product(self.team_b.iter().map(|c| c.skill_b))
    }
}

impl fmt::Display for TeamPair<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Team A: {} (strength {})", names(&self.team_a), self.strength_a())?;
        write!(f, "Team B: {} (strength {})", names(&self.team_b), self.strength_b())
    }
}

fn names(team: &[&Candidate]) -> String {
    team.iter()
        .map(|c| c.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Saturating product of skill values.
pub(crate) fn product(skills: impl Iterator<Item = u32>) -> u64 {
    skills.fold(1u64, |acc, s| acc.saturating_mul(u64::from(s)))
}

/// The eleven-candidate sample roster.
pub fn builtin_candidates() -> Vec<Candidate> {
    [
        ("Arya", 11, 60),
        ("Alana", 70, 32),
        ("Zayn", 101, 101),
        ("Kaelan", 99, 103),
        ("Ziva", 103, 10),
        ("Mikael", 16, 100),
        ("Nayla", 20, 64),
        ("Freya", 54, 85),
        ("Naufal", 100, 3),
        ("Damar", 40, 23),
        ("Kiara", 74, 19),
    ]
    .into_iter()
    .map(|(name, a, b)| Candidate::new(name, a, b))
    .collect()
}
