//! Bounded, classified retry around a single renderer call.
//!
//! The rendering backend has a known failure mode that is non-deterministic
//! and independent of the input. Transient failures are retried up to
//! `RetryPolicy::max_attempts`; input failures are surfaced immediately.

use std::fmt::Debug;

use crate::error::ChartError;
use crate::logging::PipelineLog;
use crate::render::RenderFailure;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { max_attempts: 2 }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
        }
    }
}

/// Call `build` until it succeeds, at most `policy.max_attempts` times.
///
/// A transient failure on a non-final attempt is logged at debug level and
/// discarded. The final failure (or any input failure) is logged at error level
/// together with `input`, then returned as `ChartError::Render`.
pub fn render_with_retry<T, F, I>(
    mut build: F,
    policy: RetryPolicy,
    log: &dyn PipelineLog,
    input: &I,
) -> Result<T, ChartError>
where
    F: FnMut() -> Result<T, RenderFailure>,
    I: Debug + ?Sized,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 0;
    loop {
        attempt += 1;
        match build() {
            Ok(figure) => return Ok(figure),
            Err(failure) if failure.is_transient() && attempt < max_attempts => {
                log.debug(&format!(
                    "render attempt {attempt}/{max_attempts} failed, retrying: {failure}"
                ));
            }
            Err(failure) => {
                log.error(&format!(
                    "render failed on attempt {attempt}/{max_attempts}: {failure}; input: {input:?}"
                ));
                return Err(ChartError::Render {
                    attempts: attempt,
                    message: failure.to_string(),
                });
            }
        }
    }
}
