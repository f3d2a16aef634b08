//! Death benefit solve by bisection
//!
//! The premium is not invertible in closed form once riders and table
//! ratings are involved (ADB scales with the death benefit), but billed
//! premium is non-decreasing in death benefit, so bisection on a fixed
//! interval with a fixed iteration count always terminates.

use log::debug;

/// Lower bound of the death benefit search (dollars)
pub const MIN_DEATH_BENEFIT: f64 = 1_000.0;

/// Upper bound of the death benefit search (dollars)
pub const MAX_DEATH_BENEFIT: f64 = 5_000_000.0;

/// Bisection steps; 40 halvings of a $5M interval leave a bracket well under a cent
pub const SOLVER_ITERATIONS: u32 = 40;

/// Largest `x` in `[lo, hi]` (to within the final bracket) with `f(x) <= target`,
/// for a non-decreasing `f`.
///
/// When even `f(lo)` exceeds the target the result is `lo`; when `f(hi)` is
/// below it the result converges on `hi`.
pub fn bisect<F>(target: f64, lo: f64, hi: f64, iterations: u32, f: F) -> f64
where
    F: Fn(f64) -> f64,
{
    let mut low = lo;
    let mut high = hi;
    let mut best = lo;

    for _ in 0..iterations {
        let mid = (low + high) / 2.0;
        if f(mid) > target {
            high = mid;
        } else {
            best = mid;
            low = mid;
        }
    }

    debug!("bisect target={:.4} -> {:.4} (bracket [{:.6}, {:.6}])", target, best, low, high);
    best
}

/// Round to the nearest $1,000, never below $1,000
pub fn round_death_benefit(death_benefit: f64) -> f64 {
    ((death_benefit / 1000.0).round() * 1000.0).max(MIN_DEATH_BENEFIT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_bisect_linear() {
        // f(x) = 2x + 10, f(x) = 110 at x = 50
        let x = bisect(110.0, 0.0, 1000.0, 60, |x| 2.0 * x + 10.0);
        assert_abs_diff_eq!(x, 50.0, epsilon = 1e-9);
    }

    #[test]
    fn test_bisect_unreachable_targets_hit_bounds() {
        let below = bisect(-5.0, 1.0, 100.0, 40, |x| x);
        assert_eq!(below, 1.0);

        let above = bisect(1e9, 1.0, 100.0, 40, |x| x);
        assert_abs_diff_eq!(above, 100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_bisect_step_function() {
        // Non-decreasing with a flat region: returns the top of the region at or below target
        let f = |x: f64| if x < 10.0 { 0.0 } else { 5.0 };
        let x = bisect(1.0, 0.0, 20.0, 50, f);
        assert_abs_diff_eq!(x, 10.0, epsilon = 1e-9);
    }

    #[test]
    fn test_round_death_benefit() {
        assert_eq!(round_death_benefit(563_131.3), 563_000.0);
        assert_eq!(round_death_benefit(563_500.0), 564_000.0);
        assert_eq!(round_death_benefit(499.0), 1_000.0);
        assert_eq!(round_death_benefit(0.0), 1_000.0);
        assert_eq!(round_death_benefit(4_999_999.99), 5_000_000.0);
    }
}
