use crate::error::Error;
use crate::error::Result;
use crate::roll::Explode;
use crate::validate;
use itertools::Itertools;
use std::ops::Deref;

/// Accepted faces of one die group draw
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollResult {
    raw: Vec<u64>,
    explode: Explode,
}

impl RollResult {
    /// New from a non empty list of faces
    pub fn new(raw: Vec<u64>) -> Result<Self> {
        Self::with_explode(raw, Explode::None)
    }

    /// New from a non empty list of faces drawn under an explode rule
    pub fn with_explode(raw: Vec<u64>, explode: Explode) -> Result<Self> {
        validate::validate_non_empty(&raw)?;
        Ok(RollResult { raw, explode })
    }

    /// New from faces the engine already drew, one per validated die
    pub(crate) fn accepted(raw: Vec<u64>, explode: Explode) -> Self {
        debug_assert!(!raw.is_empty());
        RollResult { raw, explode }
    }

    pub fn raw(&self) -> &[u64] {
        &self.raw
    }

    pub fn explode(&self) -> Explode {
        self.explode
    }

    /// Sum of every face
    pub fn value(&self) -> u64 {
        self.raw.iter().sum()
    }

    /// Faces at or above `threshold`
    pub fn hits(&self, threshold: u64) -> usize {
        self.raw.iter().filter(|&&r| r >= threshold).count()
    }

    /// Faces at or below `threshold`
    pub fn misses(&self, threshold: u64) -> usize {
        self.raw.iter().filter(|&&r| r <= threshold).count()
    }

    /// One point per face at or above `hit`, minus one per face at or below `miss`
    pub fn net_hits(&self, hit: u64, miss: u64) -> Result<i64> {
        if hit <= miss {
            return Err(Error::invalid_argument(
                format!("hit:{hit} miss:{miss}"),
                "Hit threshold must be greater than miss threshold",
            ));
        }
        Ok(self.raw.iter().fold(0, |acc, &r| {
            if r >= hit {
                acc + 1
            } else if r <= miss {
                acc - 1
            } else {
                acc
            }
        }))
    }
}

impl std::fmt::Display for RollResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.raw.iter().format(", "))
    }
}

/// Independent draws of the same die group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiRollResult {
    results: Vec<RollResult>,
}

impl MultiRollResult {
    pub fn new(results: Vec<RollResult>) -> Result<Self> {
        validate::validate_non_empty(&results)?;
        Ok(MultiRollResult { results })
    }

    pub(crate) fn accepted(results: Vec<RollResult>) -> Self {
        debug_assert!(!results.is_empty());
        MultiRollResult { results }
    }

    pub fn results(&self) -> &[RollResult] {
        &self.results
    }

    /// First draw with the greatest value
    pub fn highest(&self) -> &RollResult {
        self.results[1..]
            .iter()
            .fold(&self.results[0], |best, r| {
                if r.value() > best.value() {
                    r
                } else {
                    best
                }
            })
    }

    /// First draw with the smallest value
    pub fn lowest(&self) -> &RollResult {
        self.results[1..]
            .iter()
            .fold(&self.results[0], |worst, r| {
                if r.value() < worst.value() {
                    r
                } else {
                    worst
                }
            })
    }

    /// Most recent draw
    pub fn last(&self) -> &RollResult {
        &self.results[self.results.len() - 1]
    }

    pub fn explode(&self) -> Explode {
        self.results[0].explode()
    }

    pub fn into_results(self) -> Vec<RollResult> {
        self.results
    }
}

impl Deref for MultiRollResult {
    type Target = [RollResult];

    fn deref(&self) -> &Self::Target {
        &self.results
    }
}

impl std::fmt::Display for MultiRollResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            self.results
                .iter()
                .map(|r| format!("{r} = {}", r.value()))
                .format("\n")
        )
    }
}
