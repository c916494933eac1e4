//! Pipeline configuration: validated CLI-facing options and the optimiser
//! iteration-budget presets.

use bfft_optimize::NelderMeadConfig;
use bfft_transform::ResizeType;

use crate::error::PipelineError;

/// Optimisation effort level `0..=3`, each mapping to a fixed
/// `(max_iterations, max_shrinks)` budget. Disabling the optimiser
/// entirely (the CLI's `-no-opt`) is represented as `None` at the call
/// site rather than as a variant here.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptimizeLevel {
    /// Cheapest: 3 iterations, 1 shrink.
    Zero,
    /// 5 iterations, 2 shrinks.
    One,
    /// 10 iterations, 3 shrinks.
    Two,
    /// Most thorough: 40 iterations, 5 shrinks.
    Three,
}

impl OptimizeLevel {
    /// Parse a CLI `-lvl` value `0..=3`.
    pub fn from_u8(level: u8) -> Result<Self, PipelineError> {
        match level {
            0 => Ok(Self::Zero),
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            3 => Ok(Self::Three),
            other => Err(PipelineError::InvalidOptimizeLevel(other)),
        }
    }

    /// The `(max_iterations, max_shrinks)` budget for this level.
    #[must_use]
    pub const fn budget(self) -> (usize, usize) {
        match self {
            Self::Zero => (3, 1),
            Self::One => (5, 2),
            Self::Two => (10, 3),
            Self::Three => (40, 5),
        }
    }

    /// A [`NelderMeadConfig`] carrying this level's iteration/shrink budget
    /// and otherwise-default simplex coefficients.
    #[must_use]
    pub fn nelder_mead_config(self) -> NelderMeadConfig {
        let (max_iterations, max_shrinks) = self.budget();
        NelderMeadConfig { max_iterations, max_shrinks, dist_threshold: 0.001, ..NelderMeadConfig::default() }
    }
}

/// Minimum allowed `-block` size.
pub const MIN_BLOCK_SIZE: usize = 8;
/// Maximum allowed `-block` size.
pub const MAX_BLOCK_SIZE: usize = 128;

/// Validated settings for one compress run.
#[derive(Clone, Debug)]
pub struct CompressOptions {
    /// Fraction of transformed coefficients retained per block, `(0, 1]`.
    pub ratio: f64,
    /// Resampling strategy applied at both ends of each transform.
    pub resize_type: ResizeType,
    /// Square tile size, `[8, 128]`.
    pub block_size: usize,
    /// Per-level optimiser budget, or `None` to skip the search and use
    /// the all-zero (DFT-equivalent) function system.
    pub optimize: Option<OptimizeLevel>,
    /// Force the decoded channel count (`1`=G, `2`=GA, `3`=RGB, `4`=RGBA),
    /// or `None` to use the source image's native channel count.
    pub channels: Option<u8>,
}

impl CompressOptions {
    /// Validate the ratio, block size and channel override, returning the
    /// first violated invariant.
    pub fn validate(&self) -> Result<(), PipelineError> {
        if !(self.ratio > 0.0 && self.ratio <= 1.0) {
            return Err(PipelineError::InvalidRatio(self.ratio));
        }
        if !(MIN_BLOCK_SIZE..=MAX_BLOCK_SIZE).contains(&self.block_size) {
            return Err(PipelineError::InvalidBlockSize(self.block_size));
        }
        if let Some(c) = self.channels {
            if !(1..=4).contains(&c) {
                return Err(PipelineError::InvalidChannelCount(c));
            }
        }
        Ok(())
    }
}

impl Default for CompressOptions {
    fn default() -> Self {
        Self {
            ratio: 0.5,
            resize_type: ResizeType::LinearInterpolate,
            block_size: 16,
            optimize: Some(OptimizeLevel::Three),
            channels: None,
        }
    }
}
