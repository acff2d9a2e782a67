//! Dense mastery map over every `(attempts, successes)` pair up to a maximum.

use std::collections::BTreeMap;
use std::time::Instant;

use rayon::prelude::*;

use mastery_core::errors::EngineError;
use mastery_core::types::MasteryTier;

use super::classifier::MasteryClassifier;
use super::types::{tier_counts, GridCell};

/// Triangular grid of classified cells.
///
/// Row `n` holds the `n + 1` cells `(n, 0) ..= (n, n)`; pairs with
/// `successes > attempts` have no cell.
#[derive(Debug, Clone, PartialEq)]
pub struct MasteryGrid {
    max_attempts: u64,
    rows: Vec<Vec<GridCell>>,
}

impl MasteryGrid {
    /// Classify every `0 <= k <= n <= max_attempts` with `classifier`.
    ///
    /// Rows are computed in parallel; each cell is the same evaluation
    /// [`MasteryClassifier::evaluate`] performs for a single record. The
    /// first failing cell (in row-major order) aborts the grid.
    pub fn compute(max_attempts: u64, classifier: &MasteryClassifier) -> Result<Self, EngineError> {
        let started = Instant::now();
        let rows = classifier.install(|| {
            (0..=max_attempts)
                .into_par_iter()
                .map(|n| {
                    (0..=n)
                        .map(|k| {
                            classifier.evaluate(n, k).map(|result| GridCell {
                                attempts: n,
                                successes: k,
                                ci_low: result.ci_low,
                                label: result.label,
                            })
                        })
                        .collect::<Result<Vec<_>, _>>()
                })
                .collect::<Vec<_>>()
        });
        let rows = rows.into_iter().collect::<Result<Vec<_>, _>>()?;

        let grid = Self { max_attempts, rows };
        tracing::info!(
            max_attempts,
            cells = grid.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "mastery grid computed"
        );
        Ok(grid)
    }

    pub fn max_attempts(&self) -> u64 {
        self.max_attempts
    }

    /// Cell at `(attempts, successes)`, or `None` outside the triangle.
    pub fn get(&self, attempts: u64, successes: u64) -> Option<&GridCell> {
        if successes > attempts {
            return None;
        }
        let row = self.rows.get(usize::try_from(attempts).ok()?)?;
        row.get(usize::try_from(successes).ok()?)
    }

    /// Label at `(attempts, successes)`, or `None` outside the triangle.
    pub fn label(&self, attempts: u64, successes: u64) -> Option<MasteryTier> {
        self.get(attempts, successes).map(|cell| cell.label)
    }

    /// All cells in row-major `(attempts, successes)` order.
    pub fn cells(&self) -> impl Iterator<Item = &GridCell> + '_ {
        self.rows.iter().flatten()
    }

    /// Number of cells, `(max + 1)(max + 2) / 2`.
    pub fn len(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// How many cells landed in each tier.
    pub fn tier_counts(&self) -> BTreeMap<MasteryTier, usize> {
        tier_counts(self.cells().map(|cell| cell.label))
    }

    /// Smallest number of successes that reaches `tier` for each attempt
    /// count, or `None` where no success count does.
    pub fn tier_frontier(&self, tier: MasteryTier) -> Vec<Option<u64>> {
        self.rows
            .iter()
            .map(|row| row.iter().find(|cell| cell.label >= tier).map(|cell| cell.successes))
            .collect()
    }
}
