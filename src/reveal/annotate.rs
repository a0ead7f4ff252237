//! Marker annotation pass. The page-builder export does not mark everything
//! we want animated, so a configurable rule list decorates the document with
//! marker classes before target collection runs. Selectors that match
//! nothing are features not present on this page.

use serde::Deserialize;

use crate::config::Markers;
use crate::dom;

#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum AnnotateRule {
    /// Every match gets `class`.
    Fixed { selector: String, class: String },
    /// Matches alternate between `even` and `odd` by document order.
    Alternate { selector: String, even: String, odd: String },
    /// Matches become stagger containers; descendants matching `child`
    /// become stagger items.
    StaggerChildren { selector: String, child: String },
}

impl AnnotateRule {
    /// The decoration this site's export needs: alternating office cards,
    /// fade-up testimonial block and section headings, staggered practice
    /// area cards.
    pub fn export_defaults() -> Vec<AnnotateRule> {
        vec![
            AnnotateRule::Alternate {
                selector: ".container-17 .office-locations".into(),
                even: "reveal-left".into(),
                odd: "reveal-right".into(),
            },
            AnnotateRule::Fixed {
                selector: ".sectionnn.client-test-section .testimonial-slider".into(),
                class: "reveal".into(),
            },
            AnnotateRule::Fixed {
                selector: ".sectionnn.client-test-section .text-headings".into(),
                class: "reveal".into(),
            },
            AnnotateRule::Fixed {
                selector: ".sectionnn.practice-areas .text-headings".into(),
                class: "reveal".into(),
            },
            AnnotateRule::StaggerChildren {
                selector: ".sectionnn.practice-areas .stagger-container".into(),
                child: ".practice-area-card".into(),
            },
        ]
    }
}

pub fn apply(rules: &[AnnotateRule], markers: &Markers) {
    for rule in rules {
        match rule {
            AnnotateRule::Fixed { selector, class } => {
                for el in dom::query_all(selector) {
                    let _ = el.class_list().add_1(class);
                }
            }
            AnnotateRule::Alternate { selector, even, odd } => {
                for (index, el) in dom::query_all(selector).iter().enumerate() {
                    let class = if index % 2 == 0 { even } else { odd };
                    let _ = el.class_list().add_1(class);
                }
            }
            AnnotateRule::StaggerChildren { selector, child } => {
                for container in dom::query_all(selector) {
                    let _ = container.class_list().add_1(&markers.stagger_container_class);
                    for item in dom::query_all_in(&container, child) {
                        let _ = item.class_list().add_1(&markers.stagger_item_class);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_defaults_cover_the_known_sections() {
        let rules = AnnotateRule::export_defaults();
        assert_eq!(rules.len(), 5);
        assert!(matches!(rules[0], AnnotateRule::Alternate { .. }));
        assert!(matches!(rules[4], AnnotateRule::StaggerChildren { .. }));
    }

    #[test]
    fn rules_deserialize_by_kind_tag() {
        let rule: AnnotateRule = serde_json::from_str(
            r#"{ "kind": "alternate", "selector": ".cards", "even": "reveal-left", "odd": "reveal-right" }"#,
        )
        .unwrap();
        match rule {
            AnnotateRule::Alternate { selector, even, odd } => {
                assert_eq!(selector, ".cards");
                assert_eq!(even, "reveal-left");
                assert_eq!(odd, "reveal-right");
            }
            other => panic!("wrong variant: {other:?}"),
        }
    }
}
