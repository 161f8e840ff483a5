//! Error-color classification.
//!
//! The level compiler paints each error group with a diffuse color that
//! identifies the problem. [`classify`] turns a separator's binding and
//! colors into the label written on its OBJ object, e.g.
//! `"bad edge (red)"`.

use std::collections::BTreeSet;

use crate::document::{MaterialBinding, Point3};

/// Label used when no rule matches.
pub const UNKNOWN_LABEL: &str = "unknown";

/// Canonical color strings with a known name.
pub const COLOR_NAMES: [(&str, &str); 8] = [
    ("1.000000,0.000000,0.000000", "red"),
    ("0.000000,1.000000,0.000000", "green"),
    ("1.000000,0.500000,0.000000", "orange"),
    ("0.000000,1.000000,1.000000", "cyan"),
    ("1.000000,1.000000,0.000000", "yellow"),
    ("1.000000,0.000000,1.000000", "magenta"),
    ("0.000000,0.000000,0.000000", "black"),
    ("0.000000,0.000000,1.000000", "blue"),
];

/// One classification rule: applies when the binding matches (or the rule
/// has no binding) and every listed color is present.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub binding: Option<MaterialBinding>,
    pub colors: &'static [&'static str],
    pub label: &'static str,
}

impl Rule {
    const fn new(
        binding: Option<MaterialBinding>,
        colors: &'static [&'static str],
        label: &'static str,
    ) -> Self {
        Self {
            binding,
            colors,
            label,
        }
    }

    fn matches(&self, binding: Option<MaterialBinding>, found: &BTreeSet<String>) -> bool {
        if self.binding.is_some() && self.binding != binding {
            return false;
        }
        self.colors.iter().all(|c| found.contains(*c))
    }
}

/// Rules in priority order; the first match wins.
pub const RULES: [Rule; 11] = [
    Rule::new(
        Some(MaterialBinding::PerFace),
        &["red", "green"],
        "nearly coplanar surfaces",
    ),
    Rule::new(
        Some(MaterialBinding::PerFace),
        &["red"],
        "degenerate or z-buffered triangle",
    ),
    Rule::new(
        Some(MaterialBinding::PerFace),
        &["magenta"],
        "portal outside BSP",
    ),
    Rule::new(Some(MaterialBinding::PerVertex), &["red"], "bad edge"),
    Rule::new(
        Some(MaterialBinding::PerVertex),
        &["magenta"],
        "unearthed edge or T-junction",
    ),
    Rule::new(None, &["cyan"], "surface clipped to no leaves"),
    Rule::new(None, &["green"], "portal does not divide space"),
    Rule::new(None, &["yellow"], "portal does not define two closed spaces"),
    Rule::new(None, &["orange"], "duplicate triangle or overlapping surface"),
    Rule::new(None, &["black"], "two fog planes intersected in a cluster"),
    Rule::new(None, &["blue"], "degenerate triangle or UVs"),
];

/// Renders a color as `"r,g,b"` with six fractional digits per channel.
pub fn canonical_color(color: &Point3) -> String {
    format!(
        "{:.6},{:.6},{:.6}",
        color[0].value(),
        color[1].value(),
        color[2].value()
    )
}

/// Returns the color's name, or its canonical string if it has none.
pub fn color_name(color: &Point3) -> String {
    let canonical = canonical_color(color);
    COLOR_NAMES
        .iter()
        .find(|(key, _)| *key == canonical)
        .map(|(_, name)| (*name).to_string())
        .unwrap_or(canonical)
}

/// Picks the label of the first matching rule, ignoring the color suffix.
pub fn match_rule(binding: Option<MaterialBinding>, found: &BTreeSet<String>) -> &'static str {
    RULES
        .iter()
        .find(|rule| rule.matches(binding, found))
        .map(|rule| rule.label)
        .unwrap_or(UNKNOWN_LABEL)
}

/// Classifies an error group by its material binding and diffuse colors.
///
/// The label is followed by the sorted, deduplicated color names in
/// parentheses. A group without colors is plain `"unknown"`.
pub fn classify(binding: Option<MaterialBinding>, colors: &[Point3]) -> String {
    if colors.is_empty() {
        return UNKNOWN_LABEL.to_string();
    }

    let found: BTreeSet<String> = colors.iter().map(color_name).collect();
    let label = match_rule(binding, &found);
    let names: Vec<&str> = found.iter().map(String::as_str).collect();
    format!("{} ({})", label, names.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Scalar;

    fn rgb(r: f64, g: f64, b: f64) -> Point3 {
        [Scalar::from_value(r), Scalar::from_value(g), Scalar::from_value(b)]
    }

    fn named(name: &str) -> Point3 {
        let (key, _) = COLOR_NAMES
            .iter()
            .find(|(_, n)| *n == name)
            .expect("color in table");
        let parts: Vec<f64> = key.split(',').map(|p| p.parse().unwrap()).collect();
        rgb(parts[0], parts[1], parts[2])
    }

    fn colors(names: &[&str]) -> Vec<Point3> {
        names.iter().map(|n| named(n)).collect()
    }

    #[test]
    fn test_color_table_round_trips() {
        for (key, name) in COLOR_NAMES {
            let parts: Vec<f64> = key.split(',').map(|p| p.parse().unwrap()).collect();
            let color = rgb(parts[0], parts[1], parts[2]);
            assert_eq!(canonical_color(&color), key);
            assert_eq!(color_name(&color), name);
        }
    }

    #[test]
    fn test_canonical_ignores_source_precision() {
        let color = [
            Scalar::parse("1.0").unwrap(),
            Scalar::parse("0.50").unwrap(),
            Scalar::parse("0.000000").unwrap(),
        ];
        assert_eq!(color_name(&color), "orange");
    }

    #[test]
    fn test_per_face_rules() {
        let face = Some(MaterialBinding::PerFace);
        assert_eq!(
            classify(face, &colors(&["red", "green"])),
            "nearly coplanar surfaces (green, red)"
        );
        assert_eq!(
            classify(face, &colors(&["red"])),
            "degenerate or z-buffered triangle (red)"
        );
        assert_eq!(
            classify(face, &colors(&["magenta"])),
            "portal outside BSP (magenta)"
        );
    }

    #[test]
    fn test_per_vertex_rules() {
        let vertex = Some(MaterialBinding::PerVertex);
        assert_eq!(classify(vertex, &colors(&["red"])), "bad edge (red)");
        assert_eq!(
            classify(vertex, &colors(&["magenta", "magenta"])),
            "unearthed edge or T-junction (magenta)"
        );
        // The coplanar rule is face-only.
        assert_eq!(
            classify(vertex, &colors(&["red", "green"])),
            "bad edge (green, red)"
        );
    }

    #[test]
    fn test_binding_independent_rules() {
        let cases = [
            ("cyan", "surface clipped to no leaves"),
            ("green", "portal does not divide space"),
            ("yellow", "portal does not define two closed spaces"),
            ("orange", "duplicate triangle or overlapping surface"),
            ("black", "two fog planes intersected in a cluster"),
            ("blue", "degenerate triangle or UVs"),
        ];
        for binding in [
            None,
            Some(MaterialBinding::PerFace),
            Some(MaterialBinding::PerVertex),
        ] {
            for (color, label) in cases {
                assert_eq!(
                    classify(binding, &colors(&[color])),
                    format!("{} ({})", label, color)
                );
            }
        }
    }

    #[test]
    fn test_priority_order() {
        assert_eq!(
            classify(None, &colors(&["blue", "cyan", "green"])),
            "surface clipped to no leaves (blue, cyan, green)"
        );
        assert_eq!(
            classify(None, &colors(&["black", "orange", "yellow"])),
            "portal does not define two closed spaces (black, orange, yellow)"
        );
        // Without a binding the gated rules never fire.
        assert_eq!(
            classify(None, &colors(&["red", "magenta"])),
            "unknown (magenta, red)"
        );
        assert_eq!(
            classify(Some(MaterialBinding::PerFace), &colors(&["magenta", "cyan"])),
            "portal outside BSP (cyan, magenta)"
        );
    }

    #[test]
    fn test_unknown_color_passes_through() {
        assert_eq!(
            classify(Some(MaterialBinding::PerVertex), &[rgb(0.2, 0.3, 0.4)]),
            "unknown (0.200000,0.300000,0.400000)"
        );
        assert_eq!(
            classify(None, &[rgb(0.2, 0.3, 0.4), named("blue")]),
            "degenerate triangle or UVs (0.200000,0.300000,0.400000, blue)"
        );
    }

    #[test]
    fn test_no_colors_has_no_suffix() {
        assert_eq!(classify(None, &[]), "unknown");
        assert_eq!(classify(Some(MaterialBinding::PerFace), &[]), "unknown");
    }

    #[test]
    fn test_every_rule_is_reachable() {
        for (i, rule) in RULES.iter().enumerate() {
            let found: BTreeSet<String> = rule.colors.iter().map(|c| c.to_string()).collect();
            assert_eq!(match_rule(rule.binding, &found), rule.label, "rule {i}");
        }
    }
}
