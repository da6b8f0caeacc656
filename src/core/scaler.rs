use crate::domain::model::{ScaleAction, ScaleDecision, ThroughputBounds};

/// Computes the next throughput for `action`.
///
/// Doubling (or halving) is tried first, then a step of one. The result is
/// clamped into `bounds`, so a container that is already outside the range is
/// pulled back into it.
pub fn decide(action: ScaleAction, current: u32, bounds: ThroughputBounds) -> ScaleDecision {
    let target = match action {
        ScaleAction::Up => current
            .checked_mul(2)
            .filter(|&doubled| doubled > current && doubled <= bounds.max)
            .or_else(|| current.checked_add(1).filter(|&next| next <= bounds.max)),
        ScaleAction::Down => Some(current / 2)
            .filter(|&halved| halved < current && halved >= bounds.min)
            .or_else(|| current.checked_sub(1).filter(|&next| next >= bounds.min)),
    };

    match (target, action) {
        (Some(to), _) => ScaleDecision::Adjust {
            from: current,
            to: to.clamp(bounds.min, bounds.max),
        },
        (None, ScaleAction::Up) => ScaleDecision::MaxReached,
        (None, ScaleAction::Down) => ScaleDecision::MinReached,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds(min: u32, max: u32) -> ThroughputBounds {
        ThroughputBounds::new(min, max).unwrap()
    }

    fn adjust(from: u32, to: u32) -> ScaleDecision {
        ScaleDecision::Adjust { from, to }
    }

    #[test]
    fn test_up_doubles_when_within_max() {
        assert_eq!(decide(ScaleAction::Up, 400, bounds(400, 10_000)), adjust(400, 800));
        assert_eq!(decide(ScaleAction::Up, 5000, bounds(400, 10_000)), adjust(5000, 10_000));
    }

    #[test]
    fn test_up_falls_back_to_plus_one() {
        assert_eq!(decide(ScaleAction::Up, 6000, bounds(400, 10_000)), adjust(6000, 6001));
        assert_eq!(decide(ScaleAction::Up, 9999, bounds(400, 10_000)), adjust(9999, 10_000));
    }

    #[test]
    fn test_up_at_max_is_reached() {
        assert_eq!(decide(ScaleAction::Up, 10_000, bounds(400, 10_000)), ScaleDecision::MaxReached);
        assert_eq!(decide(ScaleAction::Up, 12_000, bounds(400, 10_000)), ScaleDecision::MaxReached);
    }

    #[test]
    fn test_down_halves_when_within_min() {
        assert_eq!(decide(ScaleAction::Down, 800, bounds(400, 10_000)), adjust(800, 400));
        assert_eq!(decide(ScaleAction::Down, 10_000, bounds(400, 10_000)), adjust(10_000, 5000));
    }

    #[test]
    fn test_down_falls_back_to_minus_one() {
        assert_eq!(decide(ScaleAction::Down, 700, bounds(400, 10_000)), adjust(700, 699));
        assert_eq!(decide(ScaleAction::Down, 401, bounds(400, 10_000)), adjust(401, 400));
    }

    #[test]
    fn test_down_at_min_is_reached() {
        assert_eq!(decide(ScaleAction::Down, 400, bounds(400, 10_000)), ScaleDecision::MinReached);
        assert_eq!(decide(ScaleAction::Down, 100, bounds(400, 10_000)), ScaleDecision::MinReached);
    }

    #[test]
    fn test_out_of_range_current_is_clamped() {
        // 低於下限時往上調，至少到 min
        assert_eq!(decide(ScaleAction::Up, 100, bounds(400, 10_000)), adjust(100, 400));
        // 高於上限時往下調，最多到 max
        assert_eq!(decide(ScaleAction::Down, 50_000, bounds(400, 10_000)), adjust(50_000, 10_000));
    }

    #[test]
    fn test_zero_and_overflow_edges() {
        // 0 * 2 不會改變數值，改走 +1
        assert_eq!(decide(ScaleAction::Up, 0, bounds(0, 10)), adjust(0, 1));
        assert_eq!(decide(ScaleAction::Down, 0, bounds(0, 10)), ScaleDecision::MinReached);
        assert_eq!(decide(ScaleAction::Down, 1, bounds(0, 10)), adjust(1, 0));

        let big = u32::MAX / 2 + 1;
        assert_eq!(decide(ScaleAction::Up, big, bounds(1, u32::MAX)), adjust(big, big + 1));
        assert_eq!(decide(ScaleAction::Up, u32::MAX, bounds(1, u32::MAX)), ScaleDecision::MaxReached);
    }

    #[test]
    fn test_adjusted_value_always_within_bounds() {
        let ranges = [(400, 10_000), (400, 400), (1, 7), (1000, 1500), (0, 3)];

        for (min, max) in ranges {
            let b = bounds(min, max);
            for current in 0..=20_000u32 {
                for action in [ScaleAction::Up, ScaleAction::Down] {
                    if let ScaleDecision::Adjust { from, to } = decide(action, current, b) {
                        assert_eq!(from, current);
                        assert!(b.contains(to), "{action} {current} in [{min},{max}] -> {to}");
                        assert_ne!(to, current);
                    }
                }
            }
        }
    }

    #[test]
    fn test_doubling_preferred_over_step() {
        let b = bounds(400, 10_000);
        for current in 400..=5000u32 {
            assert_eq!(decide(ScaleAction::Up, current, b), adjust(current, current * 2));
        }
        for current in 800..=10_000u32 {
            assert_eq!(decide(ScaleAction::Down, current, b), adjust(current, current / 2));
        }
    }
}
