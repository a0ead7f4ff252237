//! Scroll-progress arithmetic for scrub mode. Pure functions, host-testable.

/// Clamps to the unit interval; NaN becomes 0.
pub fn clamp01(x: f64) -> f64 {
    if x.is_nan() {
        return 0.0;
    }
    x.clamp(0.0, 1.0)
}

pub fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

/// Raw progress of an element whose top edge sits `top` pixels below the
/// viewport top. Progress runs 0 at `start_frac * viewport` down the screen
/// to 1 at `end_frac * viewport`.
pub fn scroll_progress(top: f64, viewport: f64, start_frac: f64, end_frac: f64) -> f64 {
    let start = viewport * start_frac;
    let end = viewport * end_frac;
    let range = start - end;
    if range <= 0.0 {
        // Degenerate trigger window; treat as a hard threshold at `start`.
        return if top <= start { 1.0 } else { 0.0 };
    }
    clamp01((start - top) / range)
}

/// Progress offset for the `index`-th staggered sibling. Capped below 1 so
/// the adjusted progress stays well-defined for absurd indices.
pub fn stagger_delay(index: usize, gap: f64) -> f64 {
    (index as f64 * gap.max(0.0)).min(0.9)
}

/// Re-maps raw progress so a delayed sibling starts late but still finishes
/// at raw progress 1.
pub fn stagger_adjust(raw: f64, delay: f64) -> f64 {
    clamp01((raw - delay) / (1.0 - delay))
}

/// One scrub evaluation for a single target. Returns the eased progress and
/// whether the target has now reached its terminal state. A revealed target
/// stays revealed no matter what raw progress comes in later.
pub fn scrub_frame(
    revealed: bool,
    raw: f64,
    delay: f64,
    ease: crate::config::Ease,
) -> (f64, bool) {
    if revealed {
        return (1.0, true);
    }
    let eased = ease.apply(stagger_adjust(raw, delay));
    (eased, eased >= 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Ease;

    #[test]
    fn ease_out_cubic_endpoints() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
    }

    #[test]
    fn ease_out_cubic_is_monotone() {
        let mut prev = ease_out_cubic(0.0);
        for i in 1..=1000 {
            let t = f64::from(i) / 1000.0;
            let v = ease_out_cubic(t);
            assert!(v >= prev, "not monotone at t={t}");
            prev = v;
        }
    }

    #[test]
    fn progress_window_endpoints() {
        // exactly representable fractions: window 750..250 on a 1000px viewport
        assert_eq!(scroll_progress(750.0, 1000.0, 0.75, 0.25), 0.0);
        assert_eq!(scroll_progress(250.0, 1000.0, 0.75, 0.25), 1.0);
        assert_eq!(scroll_progress(500.0, 1000.0, 0.75, 0.25), 0.5);
    }

    #[test]
    fn default_window_hits_its_endpoints() {
        // 0.85/0.35 are not exact in binary; allow rounding slack.
        let at_start = scroll_progress(850.0, 1000.0, 0.85, 0.35);
        assert!(at_start.abs() < 1e-9, "start: {at_start}");
        let at_end = scroll_progress(350.0, 1000.0, 0.85, 0.35);
        assert!((at_end - 1.0).abs() < 1e-9, "end: {at_end}");
    }

    #[test]
    fn progress_clamps_outside_the_window() {
        assert_eq!(scroll_progress(950.0, 1000.0, 0.85, 0.35), 0.0);
        assert_eq!(scroll_progress(100.0, 1000.0, 0.85, 0.35), 1.0);
        assert_eq!(scroll_progress(-500.0, 1000.0, 0.85, 0.35), 1.0);
    }

    #[test]
    fn degenerate_window_is_a_threshold() {
        assert_eq!(scroll_progress(400.0, 1000.0, 0.5, 0.5), 1.0);
        assert_eq!(scroll_progress(600.0, 1000.0, 0.5, 0.5), 0.0);
    }

    #[test]
    fn stagger_index_two_gap_008_starts_at_016() {
        let delay = stagger_delay(2, 0.08);
        assert!((delay - 0.16).abs() < 1e-12);
        assert_eq!(stagger_adjust(0.0, delay), 0.0);
        assert_eq!(stagger_adjust(0.16, delay), 0.0);
        assert!(stagger_adjust(0.17, delay) > 0.0);
        assert_eq!(stagger_adjust(1.0, delay), 1.0);
        assert!(stagger_adjust(0.999, delay) < 1.0);
    }

    #[test]
    fn siblings_reveal_in_index_order() {
        // For any raw progress, a lower index is always at least as far along.
        for step in 0..=100 {
            let raw = f64::from(step) / 100.0;
            let mut prev = stagger_adjust(raw, stagger_delay(0, 0.08));
            for index in 1..6 {
                let cur = stagger_adjust(raw, stagger_delay(index, 0.08));
                assert!(cur <= prev, "index {index} ahead of {} at raw={raw}", index - 1);
                prev = cur;
            }
        }
    }

    #[test]
    fn huge_stagger_index_stays_finite() {
        let delay = stagger_delay(50, 0.08);
        assert!((delay - 0.9).abs() < 1e-12);
        let adjusted = stagger_adjust(1.0, delay);
        assert_eq!(adjusted, 1.0);
    }

    #[test]
    fn revealed_latch_never_reverts() {
        let delay = stagger_delay(1, 0.08);
        let mut revealed = false;
        // Scroll down past the window, then back up.
        for raw in [0.0, 0.3, 0.7, 1.0, 0.6, 0.2, 0.0] {
            let (eased, now) = scrub_frame(revealed, raw, delay, Ease::CubicOut);
            revealed = revealed || now;
            if revealed {
                assert_eq!(eased, 1.0, "revealed target re-evaluated at raw={raw}");
            }
        }
        assert!(revealed);
        // Once latched, any later frame reports terminal state.
        let (eased, still) = scrub_frame(revealed, 0.0, delay, Ease::CubicOut);
        assert_eq!((eased, still), (1.0, true));
    }
}
