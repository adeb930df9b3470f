//! Execution engine for spline fitting.
//!
//! ## Purpose
//!
//! This module drives a fit from the minimal knot vector to a final spline.
//! The fit is an explicit state machine so every intermediate stage can be
//! stepped through and inspected on its own.
//!
//! ## Design notes
//!
//! * **States**: `Initial` chooses the starting knots, `Fitting` solves the
//!   least-squares problem and decides what happens next, `Refining` inserts
//!   knots, `Smoothing` runs one step of the smoothing-parameter search.
//!   `Converged` and `Exhausted` are terminal.
//! * **Call-scoped state**: All working arrays live in the engine, which
//!   borrows the samples read-only; nothing is shared between fits.
//! * **Last stable fit**: Every successful least-squares solve is kept so a
//!   later rank-deficient solve can surface it together with the error.
//! * **Hooks**: The final evaluation pass at the samples can be replaced by
//!   extension crates (e.g. a parallel evaluator).
//!
//! ## Key concepts
//!
//! * **nmin / nmax / nest**: `2k + 2` knots (polynomial), `m + k + 1` knots
//!   (interpolation), and the caller's knot budget.
//! * **Acceptance**: A fit is accepted when `|fp - s| < tol * s`.
//! * **Undershoot**: When `fp < s` with interior knots present, the
//!   penalised phase pulls `fp` back up to `s`.
//!
//! ## Invariants
//!
//! * Each `Refining` step strictly increases the knot count, which never
//!   exceeds `nest`; the smoothing phase runs at most `max_iterations` steps.
//! * Samples are validated before the engine is built.
//!
//! ## Non-goals
//!
//! * This module does not validate input data (handled by `validator`).
//! * This module does not handle parallel execution directly (handled by adapters).

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::algorithms::knots::{clamped_knots, InsertionSchedule, KnotPlacement};
use crate::algorithms::least_squares::{residual_sum, solve_least_squares, solve_penalized};
use crate::algorithms::smoothing::{SearchStep, SmoothingSearch};
use crate::engine::output::FitStatus;
use crate::evaluation::evaluate::{evaluate_into, Extrapolation};
use crate::math::discontinuity::derivative_jumps;
use crate::primitives::buffer::{BandRow, FitWorkspace};
use crate::primitives::errors::SplineError;

// ============================================================================
// Type Definitions
// ============================================================================

/// Signature for custom evaluation pass function
#[doc(hidden)]
pub type EvalPassFn<T> = fn(
    &[T],          // knots
    &[T],          // coefficients
    usize,         // degree
    &[T],          // queries
    Extrapolation, // out-of-domain policy
    &mut [T],      // output values
) -> Result<(), SplineError>;

/// Default knot budget for `m` samples and degree `k`: `max(m + k + 1, 2k + 3)`.
#[inline]
pub fn default_knot_budget(m: usize, degree: usize) -> usize {
    (m + degree + 1).max(2 * degree + 3)
}

/// Output from spline fitting execution.
#[derive(Debug, Clone)]
pub struct ExecutorOutput<T> {
    /// Full knot vector of the returned fit.
    pub knots: Vec<T>,

    /// B-spline coefficients of the returned fit.
    pub coefficients: Vec<T>,

    /// Weighted residual sum of squares.
    pub fp: T,

    /// How the fit ended.
    pub status: FitStatus,

    /// Error accompanying a non-converged status.
    pub error: Option<SplineError>,

    /// Number of knot-refinement passes.
    pub refinements: usize,

    /// Number of smoothing-parameter iterations.
    pub search_iterations: usize,

    /// Final smoothing parameter, when the penalised phase ran.
    pub smoothing_parameter: Option<T>,

    /// Fitted values at the samples (if requested).
    pub fitted: Option<Vec<T>>,
}

// ============================================================================
// Configuration
// ============================================================================

/// Configuration for spline fitting execution.
#[derive(Debug, Clone)]
pub struct FitConfig<T> {
    /// Spline degree in `[1, 5]`.
    pub degree: usize,

    /// Smoothing factor; 0 requests interpolation.
    pub smoothing: T,

    /// Upper bound on the total knot count (default from `default_knot_budget`).
    pub knot_budget: Option<usize>,

    /// Fixed interior knots; skips knot placement entirely.
    pub interior_knots: Option<Vec<T>>,

    /// Relative tolerance on `|fp - s|`.
    pub tolerance: T,

    /// Iteration limit of the smoothing-parameter search.
    pub max_iterations: usize,

    /// Whether to evaluate the fit at the samples afterwards.
    pub return_fitted: bool,

    // ++++++++++++++++++++++++++++++++++++++
    // +               DEV                  +
    // ++++++++++++++++++++++++++++++++++++++
    /// Custom evaluation pass function (enables parallel execution).
    #[doc(hidden)]
    pub custom_eval_pass: Option<EvalPassFn<T>>,
}

impl<T: Float> Default for FitConfig<T> {
    fn default() -> Self {
        Self {
            degree: 3,
            smoothing: T::zero(),
            knot_budget: None,
            interior_knots: None,
            tolerance: T::from(0.001).unwrap_or(T::epsilon()),
            max_iterations: 20,
            return_fitted: false,
            custom_eval_pass: None,
        }
    }
}

// ============================================================================
// Fit States
// ============================================================================

/// Stage of the fitting state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitState {
    /// No knots chosen yet.
    Initial,

    /// Knots chosen; the least-squares fit is next.
    Fitting,

    /// `fp > s`; knots are inserted next.
    Refining,

    /// `fp < s`; the smoothing-parameter search is running.
    Smoothing,

    /// The fit met its target.
    Converged,

    /// The fit stopped short of its target; a usable fit is still available.
    Exhausted,
}

impl FitState {
    /// Whether no further transitions are possible.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Converged | Self::Exhausted)
    }
}

// Knots, coefficients and fp of the last successful least-squares solve.
#[derive(Debug, Clone)]
struct StableFit<T> {
    knots: Vec<T>,
    coefficients: Vec<T>,
    fp: T,
}

// ============================================================================
// Fitting Engine
// ============================================================================

/// State machine fitting a smoothing spline to validated samples.
#[derive(Debug, Clone)]
pub struct FitEngine<'a, T: Float> {
    x: &'a [T],
    y: &'a [T],
    w: &'a [T],

    degree: usize,
    smoothing: T,
    acc: T,
    max_iterations: usize,
    fixed_knots: Option<Vec<T>>,
    fixed: bool,

    nmin: usize,
    nmax: usize,
    nest: usize,

    state: FitState,
    knots: Vec<T>,
    placement: KnotPlacement<T>,
    schedule: InsertionSchedule,
    workspace: FitWorkspace<T>,

    fp: T,
    fp0: T,
    search: Option<SmoothingSearch<T>>,
    jumps: Vec<BandRow<T>>,
    smoothing_parameter: Option<T>,

    status: Option<FitStatus>,
    error: Option<SplineError>,
    stable: Option<StableFit<T>>,
    refinements: usize,
    search_iterations: usize,
}

impl<'a, T: Float> FitEngine<'a, T> {
    /// Prepare a fit of validated samples.
    pub fn new(x: &'a [T], y: &'a [T], w: &'a [T], config: &FitConfig<T>) -> Self {
        let m = x.len();
        let k = config.degree;
        let nest = config
            .knot_budget
            .unwrap_or_else(|| default_knot_budget(m, k));

        Self {
            x,
            y,
            w,
            degree: k,
            smoothing: config.smoothing,
            acc: config.tolerance * config.smoothing,
            max_iterations: config.max_iterations,
            fixed_knots: config.interior_knots.clone(),
            fixed: false,
            nmin: 2 * k + 2,
            nmax: m + k + 1,
            nest,
            state: FitState::Initial,
            knots: Vec::new(),
            placement: KnotPlacement::new(m),
            schedule: InsertionSchedule::default(),
            workspace: FitWorkspace::new(m, nest),
            fp: T::zero(),
            fp0: T::zero(),
            search: None,
            jumps: Vec::new(),
            smoothing_parameter: None,
            status: None,
            error: None,
            stable: None,
            refinements: 0,
            search_iterations: 0,
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Current state.
    #[inline]
    pub fn state(&self) -> FitState {
        self.state
    }

    /// Current full knot vector.
    #[inline]
    pub fn knots(&self) -> &[T] {
        &self.knots
    }

    /// Coefficients of the most recent solve.
    #[inline]
    pub fn coefficients(&self) -> &[T] {
        &self.workspace.coefficients
    }

    /// Weighted residual sum of squares of the most recent solve.
    #[inline]
    pub fn fp(&self) -> T {
        self.fp
    }

    /// Terminal status, once reached.
    #[inline]
    pub fn status(&self) -> Option<FitStatus> {
        self.status
    }

    /// Error accompanying a non-converged terminal status.
    #[inline]
    pub fn error(&self) -> Option<&SplineError> {
        self.error.as_ref()
    }

    /// Knot budget in effect.
    #[inline]
    pub fn knot_budget(&self) -> usize {
        self.nest
    }

    /// Number of knot-refinement passes so far.
    #[inline]
    pub fn refinements(&self) -> usize {
        self.refinements
    }

    // ========================================================================
    // Transitions
    // ========================================================================

    /// Perform one transition and return the new state.
    ///
    /// Terminal states are left unchanged. A rank-deficient solve with no
    /// earlier stable fit is returned as an error.
    pub fn step(&mut self) -> Result<FitState, SplineError> {
        let next = match self.state {
            FitState::Initial => self.initialize(),
            FitState::Fitting => self.fit_current()?,
            FitState::Refining => self.refine(),
            FitState::Smoothing => self.smooth()?,
            terminal => terminal,
        };
        self.state = next;
        Ok(next)
    }

    /// Drive the machine to a terminal state.
    pub fn run(mut self) -> Result<ExecutorOutput<T>, SplineError> {
        while !self.state.is_terminal() {
            self.step()?;
        }
        Ok(self.into_output())
    }

    fn initialize(&mut self) -> FitState {
        let k = self.degree;
        let (lower, upper) = (self.x[0], self.x[self.x.len() - 1]);

        if let Some(interior) = self.fixed_knots.take() {
            self.fixed = true;
            self.knots = clamped_knots(lower, upper, k, &interior);
        } else if self.smoothing == T::zero() {
            self.placement.relocate_for_interpolation(self.x, k);
            self.knots = clamped_knots(lower, upper, k, self.placement.interior());
        } else {
            self.knots = clamped_knots(lower, upper, k, &[]);
        }

        log::debug!(
            "spline fit: starting with {} knots (m = {}, k = {}, nest = {})",
            self.knots.len(),
            self.x.len(),
            k,
            self.nest
        );
        FitState::Fitting
    }

    fn fit_current(&mut self) -> Result<FitState, SplineError> {
        let n = self.knots.len();
        let fp = match solve_least_squares(
            self.x,
            self.y,
            self.w,
            &self.knots,
            self.degree,
            &mut self.workspace,
        ) {
            Ok(fp) => fp,
            Err(err) => return self.fall_back(err),
        };

        self.fp = fp;
        self.stable = Some(StableFit {
            knots: self.knots.clone(),
            coefficients: self.workspace.coefficients.clone(),
            fp,
        });
        log::debug!("spline fit: {} knots, fp = {}", n, as_f64(fp));

        if self.fixed {
            return Ok(self.finish(FitStatus::LeastSquares, None));
        }
        if n == self.nmin {
            self.fp0 = fp;
        }

        let fpms = fp - self.smoothing;
        if fpms.abs() < self.acc {
            let status = if n == self.nmin {
                FitStatus::LeastSquaresPolynomial
            } else {
                FitStatus::Converged
            };
            return Ok(self.finish(status, None));
        }
        if fpms < T::zero() {
            if n == self.nmin {
                return Ok(self.finish(FitStatus::LeastSquaresPolynomial, None));
            }
            self.search = None;
            return Ok(FitState::Smoothing);
        }
        if n == self.nmax {
            return Ok(self.finish(FitStatus::Interpolating, None));
        }
        if n >= self.nest {
            let err = SplineError::KnotBudgetExhausted {
                fp: as_f64(fp),
                smoothing: as_f64(self.smoothing),
                knots: n,
            };
            return Ok(self.finish(FitStatus::KnotBudgetExhausted, Some(err)));
        }

        Ok(FitState::Refining)
    }

    fn refine(&mut self) -> FitState {
        let k = self.degree;
        self.placement
            .accumulate_residuals(self.y, self.w, k, &self.workspace);
        self.refinements += 1;

        let batch = self.schedule.next_batch();
        let mut inserted = 0;
        for _ in 0..batch {
            if self.placement.insert(self.x).is_none() {
                break;
            }
            inserted += 1;

            let n = self.placement.num_knots(k);
            if n == self.nmax {
                self.placement.relocate_for_interpolation(self.x, k);
                break;
            }
            if n >= self.nest {
                break;
            }
        }

        // No interval with residual holds an interior sample. Unreachable in
        // practice since a full set of sample knots means n == nmax, which
        // relocates first; `knots` reports the current count, below the budget.
        if inserted == 0 {
            let err = SplineError::KnotBudgetExhausted {
                fp: as_f64(self.fp),
                smoothing: as_f64(self.smoothing),
                knots: self.knots.len(),
            };
            return self.finish(FitStatus::KnotBudgetExhausted, Some(err));
        }

        let (lower, upper) = (self.x[0], self.x[self.x.len() - 1]);
        self.knots = clamped_knots(lower, upper, k, self.placement.interior());
        log::debug!(
            "spline fit: refinement {} added {} knots ({} total)",
            self.refinements,
            inserted,
            self.knots.len()
        );
        FitState::Fitting
    }

    fn smooth(&mut self) -> Result<FitState, SplineError> {
        let mut search = match self.search.take() {
            Some(search) => search,
            None => {
                self.jumps = derivative_jumps(&self.knots, self.degree);
                SmoothingSearch::new(
                    &self.workspace.band,
                    self.fp0,
                    self.smoothing,
                    self.fp - self.smoothing,
                    self.acc,
                )
            }
        };

        let p = search.p();
        if let Err(err) = solve_penalized(&self.jumps, self.degree, p, &mut self.workspace) {
            return self.fall_back(err);
        }

        let fp = residual_sum(self.y, self.w, self.degree, &self.workspace);
        self.fp = fp;
        self.smoothing_parameter = Some(p);
        self.search_iterations += 1;
        log::trace!(
            "spline fit: smoothing iteration {}, p = {}, fp = {}",
            self.search_iterations,
            as_f64(p),
            as_f64(fp)
        );

        let fpms = fp - self.smoothing;
        if fpms.abs() < self.acc {
            return Ok(self.finish(FitStatus::Converged, None));
        }
        if self.search_iterations >= self.max_iterations {
            let err = SplineError::IterationLimit {
                fp: as_f64(fp),
                smoothing: as_f64(self.smoothing),
                iterations: self.search_iterations,
            };
            return Ok(self.finish(FitStatus::IterationLimit, Some(err)));
        }

        match search.advance(fpms) {
            SearchStep::Continue(_) => {
                self.search = Some(search);
                Ok(FitState::Smoothing)
            }
            SearchStep::Stalled => {
                let err = SplineError::SmoothingSearchFailed {
                    fp: as_f64(fp),
                    smoothing: as_f64(self.smoothing),
                };
                Ok(self.finish(FitStatus::SearchStalled, Some(err)))
            }
        }
    }

    // Surface the last stable fit with the error, or the error alone.
    fn fall_back(&mut self, err: SplineError) -> Result<FitState, SplineError> {
        let Some(stable) = self.stable.take() else {
            log::debug!("spline fit: no stable fit to fall back to ({})", err);
            return Err(err);
        };

        self.knots = stable.knots;
        self.workspace.coefficients = stable.coefficients;
        self.fp = stable.fp;
        self.smoothing_parameter = None;
        Ok(self.finish(FitStatus::Singular, Some(err)))
    }

    fn finish(&mut self, status: FitStatus, error: Option<SplineError>) -> FitState {
        if let Some(err) = &error {
            log::warn!("spline fit stopped early ({}): {}", status, err);
        } else {
            log::debug!(
                "spline fit: {} with {} knots, fp = {}",
                status,
                self.knots.len(),
                as_f64(self.fp)
            );
        }

        self.status = Some(status);
        self.error = error;
        if status.is_converged() {
            FitState::Converged
        } else {
            FitState::Exhausted
        }
    }

    fn into_output(self) -> ExecutorOutput<T> {
        ExecutorOutput {
            knots: self.knots,
            coefficients: self.workspace.coefficients,
            fp: self.fp,
            // Set by every terminal transition.
            status: self.status.unwrap_or(FitStatus::Converged),
            error: self.error,
            refinements: self.refinements,
            search_iterations: self.search_iterations,
            smoothing_parameter: self.smoothing_parameter,
            fitted: None,
        }
    }
}

// ============================================================================
// Executor
// ============================================================================

/// Entry point running a complete fit from a configuration.
pub struct FitExecutor;

impl FitExecutor {
    /// Fit validated samples and optionally evaluate the fit at the samples.
    pub fn run_with_config<T: Float>(
        x: &[T],
        y: &[T],
        w: &[T],
        config: FitConfig<T>,
    ) -> Result<ExecutorOutput<T>, SplineError> {
        let mut output = FitEngine::new(x, y, w, &config).run()?;

        if config.return_fitted {
            let pass = config.custom_eval_pass.unwrap_or(evaluate_into);
            let mut fitted = vec![T::zero(); x.len()];
            pass(
                &output.knots,
                &output.coefficients,
                config.degree,
                x,
                Extrapolation::Clamp,
                &mut fitted,
            )?;
            output.fitted = Some(fitted);
        }

        Ok(output)
    }
}

#[inline]
fn as_f64<T: Float>(value: T) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}
