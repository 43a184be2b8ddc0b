//! Rendering collaborators.
//!
//! The core hands a finished `ChartSpec` to a `Renderer` and gets back a
//! figure. Renderers classify their failures so `retry::render_with_retry` can
//! tell a known-flaky backend hiccup from a chart the backend can never draw.

use std::borrow::Cow;
use std::fmt;

use crate::chart::spec::ChartSpec;

pub mod ascii;
pub mod retry;
pub mod svg;

pub use ascii::AsciiRenderer;
pub use retry::{RetryPolicy, render_with_retry};
pub use svg::SvgRenderer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Non-deterministic backend failure; the same input may succeed next time.
    Transient,
    /// The input itself cannot be rendered; retrying is pointless.
    Input,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl RenderFailure {
    pub fn transient(message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Transient,
            message: message.into(),
        }
    }

    pub fn input(message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Input,
            message: message.into(),
        }
    }

    pub fn is_transient(&self) -> bool {
        self.kind == FailureKind::Transient
    }
}

impl fmt::Display for RenderFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind {
            FailureKind::Transient => "transient",
            FailureKind::Input => "input",
        };
        write!(f, "{kind} render failure: {}", self.message)
    }
}

impl std::error::Error for RenderFailure {}

/// Something that turns a chart spec into a figure.
pub trait Renderer {
    type Figure;

    fn render(&mut self, spec: &ChartSpec) -> Result<Self::Figure, RenderFailure>;
}

/// The chart as a backend can draw it.
///
/// Non-finite axis ranges are an `Input` failure. An empty range `[a, a]`,
/// such as the y axis of a scatter with no players, is drawn as `[a, a + 1]`
/// on a copy; `spec` itself keeps its range.
pub(crate) fn drawable(spec: &ChartSpec) -> Result<Cow<'_, ChartSpec>, RenderFailure> {
    let (x_axis, y_axis) = spec.axes();
    for (name, axis) in [("x", x_axis), ("y", y_axis)] {
        let [a, b] = axis.range;
        if !(a.is_finite() && b.is_finite()) {
            return Err(RenderFailure::input(format!(
                "{} {name} axis range [{a}, {b}] is non-finite",
                spec.kind_name()
            )));
        }
    }

    let empty = |range: [f64; 2]| range[0] == range[1];
    if !empty(x_axis.range) && !empty(y_axis.range) {
        return Ok(Cow::Borrowed(spec));
    }

    let mut widened = spec.clone();
    let (x_axis, y_axis) = widened.axes_mut();
    for axis in [x_axis, y_axis] {
        if empty(axis.range) {
            axis.range[1] = axis.range[0] + 1.0;
        }
    }
    Ok(Cow::Owned(widened))
}
