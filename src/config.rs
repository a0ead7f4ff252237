use serde::Deserialize;

use crate::reveal::annotate::AnnotateRule;
use crate::reveal::profile::MotionKind;

/// Which reveal strategy the engine runs. Exactly one is active per page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RevealMode {
    /// One-shot IntersectionObserver reveal.
    Threshold,
    /// Continuous scroll-linked interpolation.
    Scrub,
}

/// Easing applied to the adjusted scrub progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Ease {
    CubicOut,
    Linear,
}

impl Ease {
    pub fn apply(self, t: f64) -> f64 {
        match self {
            Ease::CubicOut => crate::reveal::progress::ease_out_cubic(t),
            Ease::Linear => t,
        }
    }
}

/// Selectors and class names the exported document uses. The export is fixed,
/// so these default to its actual names; every one can be overridden from the
/// embedding page.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Selectors {
    pub navbar: String,
    pub accordion_list: String,
    pub accordion_panel: String,
    pub accordion_header: String,
    pub accordion_open_class: String,
    pub slider: String,
    pub slider_next: String,
    pub sticky_cta: String,
    pub contact_form: String,
    pub footer: String,
    pub cover_image: String,
    pub menu_button: String,
    pub nav_menu: String,
    pub menu_open_class: String,
    pub text_fields: String,
    pub field_label_class: String,
    pub hero_entrance: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            navbar: ".navbar-2".into(),
            accordion_list: ".faq-list-wrapper".into(),
            accordion_panel: ".accordion-text-block".into(),
            accordion_header: ".div-block-29".into(),
            accordion_open_class: "active".into(),
            slider: ".testimonial-slider".into(),
            slider_next: ".w-slider-arrow-right".into(),
            sticky_cta: ".sticky-mobile-cta".into(),
            contact_form: ".form".into(),
            footer: ".ril-footer".into(),
            cover_image: ".cover-image".into(),
            menu_button: ".w-nav-button".into(),
            nav_menu: ".nav-menu-2".into(),
            menu_open_class: "w--open".into(),
            text_fields: ".text-field, .text-field-2".into(),
            field_label_class: "field-label".into(),
            hero_entrance: ".hero-entrance, .hero-entrance-delay-1, .hero-entrance-delay-2".into(),
        }
    }
}

/// Marker classes that opt elements into the reveal engine.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Markers {
    /// Added once a target reaches its terminal state.
    pub revealed_class: String,
    /// Class naming a container whose children animate in sequence.
    pub stagger_container_class: String,
    /// Class carried by each staggered child.
    pub stagger_item_class: String,
    /// Marker class to motion profile mapping.
    pub profiles: Vec<MarkerRule>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct MarkerRule {
    pub class: String,
    pub kind: MotionKind,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            revealed_class: "is-revealed".into(),
            stagger_container_class: "stagger-container".into(),
            stagger_item_class: "stagger-item".into(),
            profiles: vec![
                MarkerRule { class: "reveal".into(), kind: MotionKind::FadeUp },
                MarkerRule { class: "reveal-left".into(), kind: MotionKind::FlyLeft },
                MarkerRule { class: "reveal-right".into(), kind: MotionKind::FlyRight },
                MarkerRule { class: "reveal-scale".into(), kind: MotionKind::Scale },
                MarkerRule { class: "reveal-fade".into(), kind: MotionKind::Fade },
            ],
        }
    }
}

/// Top-level configuration, deserialized from the JS object handed to
/// `mount_with`. Every field falls back to the defaults below.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub reveal_mode: RevealMode,
    /// Overrides the `prefers-reduced-motion` media query when set.
    pub reduced_motion: Option<bool>,
    /// Root margin for threshold mode; triggers 80px before the bottom edge.
    pub intersection_margin: String,
    /// Visible-area fraction for threshold mode.
    pub intersection_threshold: f64,
    /// Progress fraction separating staggered siblings in scrub mode.
    pub stagger_gap: f64,
    /// Transition-delay step separating staggered siblings in threshold mode.
    pub stagger_gap_ms: u32,
    /// Scrub starts when an element's top is this far down the viewport.
    pub start_trigger: f64,
    /// Scrub completes when the top reaches this fraction.
    pub end_trigger: f64,
    pub ease: Ease,
    pub autoplay_interval_ms: u32,
    pub selectors: Selectors,
    pub markers: Markers,
    pub annotations: Vec<AnnotateRule>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            reveal_mode: RevealMode::Threshold,
            reduced_motion: None,
            intersection_margin: "0px 0px -80px 0px".into(),
            intersection_threshold: 0.15,
            stagger_gap: 0.08,
            stagger_gap_ms: 80,
            start_trigger: 0.85,
            end_trigger: 0.35,
            ease: Ease::CubicOut,
            autoplay_interval_ms: 4000,
            selectors: Selectors::default(),
            markers: Markers::default(),
            annotations: AnnotateRule::export_defaults(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_export() {
        let cfg = SiteConfig::default();
        assert_eq!(cfg.reveal_mode, RevealMode::Threshold);
        assert_eq!(cfg.intersection_margin, "0px 0px -80px 0px");
        assert!((cfg.intersection_threshold - 0.15).abs() < 1e-12);
        assert!((cfg.stagger_gap - 0.08).abs() < 1e-12);
        assert_eq!(cfg.stagger_gap_ms, 80);
        assert_eq!(cfg.autoplay_interval_ms, 4000);
        assert_eq!(cfg.selectors.navbar, ".navbar-2");
        assert_eq!(cfg.markers.revealed_class, "is-revealed");
        assert_eq!(cfg.markers.profiles.len(), 5);
        assert!(!cfg.annotations.is_empty());
    }

    #[test]
    fn partial_override_keeps_the_rest() {
        let cfg: SiteConfig = serde_json::from_str(
            r#"{ "reveal_mode": "scrub", "stagger_gap": 0.1, "ease": "linear" }"#,
        )
        .unwrap();
        assert_eq!(cfg.reveal_mode, RevealMode::Scrub);
        assert!((cfg.stagger_gap - 0.1).abs() < 1e-12);
        assert_eq!(cfg.ease, Ease::Linear);
        // untouched fields keep their defaults
        assert_eq!(cfg.autoplay_interval_ms, 4000);
        assert_eq!(cfg.selectors.slider, ".testimonial-slider");
    }

    #[test]
    fn selector_override_nests() {
        let cfg: SiteConfig = serde_json::from_str(
            r#"{ "selectors": { "navbar": ".site-nav" } }"#,
        )
        .unwrap();
        assert_eq!(cfg.selectors.navbar, ".site-nav");
        assert_eq!(cfg.selectors.footer, ".ril-footer");
    }

    #[test]
    fn linear_ease_is_identity() {
        assert_eq!(Ease::Linear.apply(0.25), 0.25);
        assert_eq!(Ease::CubicOut.apply(1.0), 1.0);
    }
}
