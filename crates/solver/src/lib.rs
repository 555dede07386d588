//! Solver seam for assembled trade-study problems.
//!
//! The optimizer itself is an external service; [`Solver`] is the boundary
//! and [`ExternalSolver`] the shipped adapter. [`solve_or_recover`] is the
//! non-fatal variant used by sweeps and test harnesses.

pub mod external;

use std::collections::BTreeMap;
use std::collections::btree_map;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uam_core::{Quantity, Unit, UnitError};
use uam_model::{Problem, VarPath};

pub use external::{CommandError, ExternalSolver, JsonCommand};

/// A path the solution does not contain.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("variable `{path}` not found in solution")]
pub struct LookupError {
    pub path: VarPath,
}

/// Failure to read a solution value in a requested unit.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExtractError {
    #[error(transparent)]
    Missing(#[from] LookupError),
    #[error("`{path}` cannot be expressed in {unit}: {source}")]
    DimensionMismatch {
        path: VarPath,
        unit: Unit,
        #[source]
        source: UnitError,
    },
}

/// Read-only result of a successful solve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    objective: Quantity,
    variables: BTreeMap<VarPath, Quantity>,
}

impl Solution {
    pub fn new(objective: Quantity, variables: BTreeMap<VarPath, Quantity>) -> Self {
        Self {
            objective,
            variables,
        }
    }

    /// Optimal value of the problem's objective.
    pub fn objective(&self) -> Quantity {
        self.objective
    }

    /// Exact-path lookup.
    pub fn get(&self, path: &VarPath) -> Result<Quantity, LookupError> {
        self.variables
            .get(path)
            .copied()
            .ok_or_else(|| LookupError { path: path.clone() })
    }

    /// Value of `path` expressed in `unit`.
    pub fn extract(&self, path: &VarPath, unit: Unit) -> Result<f64, ExtractError> {
        self.get(path)?
            .value_in(unit)
            .map_err(|source| ExtractError::DimensionMismatch {
                path: path.clone(),
                unit,
                source,
            })
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, VarPath, Quantity> {
        self.variables.iter()
    }
}

/// Why a solve produced no solution.
#[derive(Debug, Error)]
pub enum SolveError {
    #[error("problem is infeasible: {0}")]
    Infeasible(String),
    #[error("problem is unbounded: {0}")]
    Unbounded(String),
    #[error("solver failed: {0}")]
    Failed(String),
    #[error("failed to start solver `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("solver I/O error: {0}")]
    Io(#[source] std::io::Error),
    #[error("solver `{program}` exited with {status}: {stderr}")]
    Exit {
        program: String,
        status: String,
        stderr: String,
    },
    #[error("malformed solver reply: {0}")]
    Protocol(String),
}

impl From<CommandError> for SolveError {
    fn from(err: CommandError) -> Self {
        match err {
            CommandError::Spawn { program, source } => SolveError::Spawn { program, source },
            CommandError::Io(source) => SolveError::Io(source),
            CommandError::Exit {
                program,
                status,
                stderr,
            } => SolveError::Exit {
                program,
                status,
                stderr,
            },
            CommandError::Protocol(source) => SolveError::Protocol(source.to_string()),
        }
    }
}

/// Something able to minimise a [`Problem`]'s objective.
pub trait Solver {
    fn solve(&self, problem: &Problem) -> Result<Solution, SolveError>;
}

impl<S: Solver + ?Sized> Solver for &S {
    fn solve(&self, problem: &Problem) -> Result<Solution, SolveError> {
        (**self).solve(problem)
    }
}

impl<S: Solver + ?Sized> Solver for Box<S> {
    fn solve(&self, problem: &Problem) -> Result<Solution, SolveError> {
        (**self).solve(problem)
    }
}

/// Result of [`solve_or_recover`]; on failure the problem comes back for
/// inspection.
#[derive(Debug)]
pub enum SolveOutcome {
    Solved(Solution),
    Unsolved { problem: Problem, error: SolveError },
}

impl SolveOutcome {
    pub fn is_solved(&self) -> bool {
        matches!(self, SolveOutcome::Solved(_))
    }

    pub fn solution(&self) -> Option<&Solution> {
        match self {
            SolveOutcome::Solved(solution) => Some(solution),
            SolveOutcome::Unsolved { .. } => None,
        }
    }
}

/// Solve without failing: a solver error hands back the problem alongside it.
pub fn solve_or_recover<S: Solver + ?Sized>(solver: &S, problem: Problem) -> SolveOutcome {
    match solver.solve(&problem) {
        Ok(solution) => SolveOutcome::Solved(solution),
        Err(error) => {
            tracing::warn!(%error, objective = %problem.objective(), "solve failed, returning problem");
            SolveOutcome::Unsolved { problem, error }
        }
    }
}
