//! Motion profiles: the named start/end visual parameters a reveal target
//! interpolates between. Start values are what the element looks like fully
//! hidden; every profile ends at identity transform and opacity 1.

use serde::Deserialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MotionKind {
    /// Slides up 40px while fading in.
    FadeUp,
    /// Slides in from the left (80px).
    FlyLeft,
    /// Slides in from the right (80px).
    FlyRight,
    /// Stagger-item profile: slides up 50px with a slight scale.
    Rise,
    /// Grows from 95%.
    Scale,
    /// Opacity only.
    Fade,
}

/// Start-state offsets for one profile. `dx`/`dy` are pixels at progress 0;
/// `scale` is the starting scale factor when present.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionProfile {
    pub dx: f64,
    pub dy: f64,
    pub scale: Option<f64>,
}

impl MotionKind {
    pub fn profile(self) -> MotionProfile {
        match self {
            MotionKind::FadeUp => MotionProfile { dx: 0.0, dy: 40.0, scale: None },
            MotionKind::FlyLeft => MotionProfile { dx: -80.0, dy: 0.0, scale: None },
            MotionKind::FlyRight => MotionProfile { dx: 80.0, dy: 0.0, scale: None },
            MotionKind::Rise => MotionProfile { dx: 0.0, dy: 50.0, scale: Some(0.97) },
            MotionKind::Scale => MotionProfile { dx: 0.0, dy: 0.0, scale: Some(0.95) },
            MotionKind::Fade => MotionProfile { dx: 0.0, dy: 0.0, scale: None },
        }
    }
}

impl MotionProfile {
    /// CSS transform at the given eased progress. Empty string at identity so
    /// callers can clear the property instead of writing a no-op transform.
    pub fn transform_at(&self, eased: f64) -> String {
        let mut parts: Vec<String> = Vec::with_capacity(2);
        let remaining = 1.0 - eased;
        let x = self.dx * remaining;
        let y = self.dy * remaining;
        if self.dx != 0.0 {
            parts.push(format!("translateX({x:.2}px)"));
        }
        if self.dy != 0.0 {
            parts.push(format!("translateY({y:.2}px)"));
        }
        if let Some(from) = self.scale {
            let s = from + (1.0 - from) * eased;
            parts.push(format!("scale({s:.4})"));
        }
        parts.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fade_up_interpolates_translate_y() {
        let p = MotionKind::FadeUp.profile();
        assert_eq!(p.transform_at(0.0), "translateY(40.00px)");
        assert_eq!(p.transform_at(0.5), "translateY(20.00px)");
        assert_eq!(p.transform_at(1.0), "translateY(0.00px)");
    }

    #[test]
    fn fly_left_starts_offscreen_left() {
        let p = MotionKind::FlyLeft.profile();
        assert_eq!(p.transform_at(0.0), "translateX(-80.00px)");
        assert_eq!(p.transform_at(1.0), "translateX(-0.00px)");
    }

    #[test]
    fn rise_combines_translate_and_scale() {
        let p = MotionKind::Rise.profile();
        assert_eq!(p.transform_at(0.0), "translateY(50.00px) scale(0.9700)");
        assert_eq!(p.transform_at(1.0), "translateY(0.00px) scale(1.0000)");
    }

    #[test]
    fn scale_only_has_no_translate() {
        let p = MotionKind::Scale.profile();
        assert_eq!(p.transform_at(0.5), "scale(0.9750)");
    }

    #[test]
    fn fade_has_no_transform() {
        let p = MotionKind::Fade.profile();
        assert_eq!(p.transform_at(0.0), "");
        assert_eq!(p.transform_at(1.0), "");
    }
}
