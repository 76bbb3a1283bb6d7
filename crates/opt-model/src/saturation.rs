//! Exponential saturation transform.
//!
//! `saturate(x, k) = 1 - e^(-k·max(0, x))`, clamped to `[0, 1]`. Monotonically
//! non-decreasing in `x` for `k > 0`, zero for non-positive `x`, and
//! approaching 1 as accumulation grows without bound.

use opt_core::math::clamp01;

/// Map an unbounded non-negative accumulation into `[0, 1]`.
pub fn saturate(raw: f64, k: f64) -> f64 {
    clamp01(1.0 - (-k * raw.max(0.0)).exp())
}
