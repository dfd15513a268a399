//! Line reconstruction parameters.
//!
//! Contains AlignParams for controlling how boxes are grouped into lines and
//! how merged lines are split apart again.

use crate::error::{AlignError, Result};

/// Strategy used to split a component whose members overlap.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ResolutionPolicy {
    /// Recursively split the component around its most vertically aligned
    /// overlapping pair.
    #[default]
    Bisect,

    /// Shrink the passthrough tolerance by `step` and regroup the component,
    /// at most `max_iterations` times, then bisect whatever still overlaps.
    ReduceTolerance { step: f64, max_iterations: usize },
}

impl ResolutionPolicy {
    /// Tolerance reduction with the default step (0.1) and iteration cap (5).
    pub fn reduce_tolerance() -> Self {
        Self::ReduceTolerance {
            step: 0.1,
            max_iterations: 5,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Bisect => "bisect",
            Self::ReduceTolerance { .. } => "reduce_tolerance",
        }
    }
}

/// Parameters for line reconstruction.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignParams {
    /// Return connected components as-is, even when their members overlap.
    pub allow_overlaps: bool,

    /// Two boxes overlap when their intersection exceeds this percentage of
    /// the smaller box's area.
    pub overlap_threshold: f64,

    /// A box passes through another when its orientation line comes within
    /// `passthrough_tolerance` times half the other box's average height of
    /// the other box's midpoint.
    pub passthrough_tolerance: f64,

    /// How overlapping components are split.
    pub policy: ResolutionPolicy,
}

impl Default for AlignParams {
    fn default() -> Self {
        Self {
            allow_overlaps: false,
            overlap_threshold: 50.0,
            passthrough_tolerance: 1.0,
            policy: ResolutionPolicy::Bisect,
        }
    }
}

impl AlignParams {
    pub fn with_allow_overlaps(mut self, allow_overlaps: bool) -> Self {
        self.allow_overlaps = allow_overlaps;
        self
    }

    pub fn with_overlap_threshold(mut self, overlap_threshold: f64) -> Self {
        self.overlap_threshold = overlap_threshold;
        self
    }

    pub fn with_passthrough_tolerance(mut self, passthrough_tolerance: f64) -> Self {
        self.passthrough_tolerance = passthrough_tolerance;
        self
    }

    pub fn with_policy(mut self, policy: ResolutionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Checks that every parameter is within its usable range.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=100.0).contains(&self.overlap_threshold) {
            return Err(AlignError::InvalidParams(format!(
                "overlap_threshold should be a percentage between 0 and 100, got {}",
                self.overlap_threshold
            )));
        }

        if !self.passthrough_tolerance.is_finite() || self.passthrough_tolerance <= 0.0 {
            return Err(AlignError::InvalidParams(format!(
                "passthrough_tolerance should be a positive number, got {}",
                self.passthrough_tolerance
            )));
        }

        if let ResolutionPolicy::ReduceTolerance { step, .. } = self.policy {
            if !step.is_finite() || step <= 0.0 {
                return Err(AlignError::InvalidParams(format!(
                    "tolerance step should be a positive number, got {step}"
                )));
            }
        }

        Ok(())
    }
}
