//! Поведінка черепахи на краю сітки.

use crate::core::BoundaryPolicy;

/// Результат одного кроку вздовж осі.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepResolution {
    /// Крок у межах сітки, нова координата.
    Moved(i32),
    /// Крок поглинуто, координата не змінилась.
    Passed(i32),
    /// Крок через портал на протилежний край.
    Wrapped(i32),
    /// Маршрут має зупинитись.
    Stopped,
}

/// Розв'язує крок `delta` від координати `value` на осі довжиною `extent`.
pub fn resolve_step(policy: BoundaryPolicy, value: i32, delta: i32, extent: i32) -> StepResolution {
    let next = value + delta;
    if (0..extent).contains(&next) {
        return StepResolution::Moved(next);
    }
    match policy {
        BoundaryPolicy::Pass => StepResolution::Passed(value),
        BoundaryPolicy::Stop => StepResolution::Stopped,
        BoundaryPolicy::Portal => StepResolution::Wrapped(next.rem_euclid(extent)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn arb_policy() -> impl Strategy<Value = BoundaryPolicy> {
        prop_oneof![
            Just(BoundaryPolicy::Pass),
            Just(BoundaryPolicy::Stop),
            Just(BoundaryPolicy::Portal),
        ]
    }

    #[test]
    fn test_edges_per_policy() {
        assert_eq!(resolve_step(BoundaryPolicy::Pass, 0, -1, 5), StepResolution::Passed(0));
        assert_eq!(resolve_step(BoundaryPolicy::Stop, 4, 1, 5), StepResolution::Stopped);
        assert_eq!(resolve_step(BoundaryPolicy::Portal, 0, -1, 5), StepResolution::Wrapped(4));
        assert_eq!(resolve_step(BoundaryPolicy::Portal, 4, 1, 5), StepResolution::Wrapped(0));
    }

    #[test]
    fn test_single_cell_axis() {
        assert_eq!(resolve_step(BoundaryPolicy::Portal, 0, 1, 1), StepResolution::Wrapped(0));
        assert_eq!(resolve_step(BoundaryPolicy::Pass, 0, 1, 1), StepResolution::Passed(0));
    }

    proptest! {
        #[test]
        fn interior_steps_ignore_policy(
            policy in arb_policy(),
            extent in 3i32..50,
            value in 1i32..49,
            forward in any::<bool>(),
        ) {
            let value = 1 + value % (extent - 2);
            let delta = if forward { 1 } else { -1 };
            prop_assert_eq!(
                resolve_step(policy, value, delta, extent),
                StepResolution::Moved(value + delta)
            );
        }

        #[test]
        fn portal_is_periodic_in_extent(
            extent in 1i32..40,
            start in 0i32..40,
            forward in any::<bool>(),
        ) {
            let start = start % extent;
            let delta = if forward { 1 } else { -1 };
            let mut value = start;
            for _ in 0..extent {
                value = match resolve_step(BoundaryPolicy::Portal, value, delta, extent) {
                    StepResolution::Moved(v) | StepResolution::Wrapped(v) => v,
                    other => return Err(TestCaseError::fail(format!("unexpected {other:?}"))),
                };
            }
            prop_assert_eq!(value, start);
        }
    }
}
