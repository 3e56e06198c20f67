//! Visual rules derived from fog, selection and focus.
//!
//! Renderers consume these instead of re-deriving them. The identity rule
//! is the one that matters: once a node is foggy its real label must not
//! reach the screen and detail actions are withheld, though the fog slider
//! stays usable so the user can clear it.

use serde::{Deserialize, Serialize};

use crate::config::FogConfig;
use crate::constants::UNKNOWN_NODE_LABEL;
use crate::fog::is_foggy;
use crate::layout::MapNode;

/// Everything a renderer needs to draw one node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodePresentation {
    pub node_id: String,
    pub level: u8,
    pub foggy: bool,
    /// Real label, or the placeholder when foggy.
    pub display_label: String,
    /// Extended status and the log-activity shortcut.
    pub details_enabled: bool,
    pub relief_control_enabled: bool,
    pub pin_opacity: f32,
    pub label_opacity: f32,
    pub desaturated: bool,
    /// Fog cloud opacity, `None` when the level is below the cloud threshold.
    pub cloud_opacity: Option<f32>,
    /// Another sector is focused.
    pub dimmed: bool,
}

/// Label to show for a node at a given level.
pub fn display_label<'a>(node: &'a MapNode, level: u8, config: &FogConfig) -> &'a str {
    if is_foggy(level, config) {
        UNKNOWN_NODE_LABEL
    } else {
        &node.label
    }
}

/// Whether a node or sector is dimmed by focus on a different sector.
pub fn is_dimmed(sector_id: &str, focus: Option<&str>) -> bool {
    focus.is_some_and(|f| f != sector_id)
}

pub fn present_node(
    node: &MapNode,
    level: u8,
    selected: bool,
    focus: Option<&str>,
    config: &FogConfig,
) -> NodePresentation {
    let neglect = level as f32 / 100.0;
    let foggy = is_foggy(level, config);
    let dimmed = is_dimmed(&node.sector_id, focus);

    let pin_opacity = if selected {
        1.0
    } else {
        (1.0 - neglect * 0.6).max(0.5)
    };
    let label_opacity = if selected {
        1.0
    } else {
        (1.0 - neglect * 1.5).max(0.0)
    };
    let cloud_opacity = (level >= config.cloud_threshold)
        .then(|| if dimmed { neglect * 0.3 } else { neglect * 0.7 });

    NodePresentation {
        node_id: node.id.clone(),
        level,
        foggy,
        display_label: display_label(node, level, config).to_string(),
        details_enabled: !foggy,
        relief_control_enabled: true,
        pin_opacity,
        label_opacity,
        desaturated: neglect > 0.5,
        cloud_opacity,
        dimmed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node() -> MapNode {
        MapNode {
            id: "money-0".into(),
            sector_id: "money".into(),
            label: "Burn".into(),
            x: 0.0,
            y: 0.0,
        }
    }

    #[test]
    fn label_hidden_above_sixty() {
        let config = FogConfig::default();
        let n = node();
        assert_eq!(display_label(&n, 60, &config), "Burn");
        assert_eq!(display_label(&n, 61, &config), UNKNOWN_NODE_LABEL);
    }

    #[test]
    fn foggy_node_withholds_details_but_keeps_slider() {
        let p = present_node(&node(), 80, false, None, &FogConfig::default());
        assert!(p.foggy);
        assert!(!p.details_enabled);
        assert!(p.relief_control_enabled);
        assert_eq!(p.display_label, UNKNOWN_NODE_LABEL);
    }

    #[test]
    fn clear_node_shows_everything() {
        let p = present_node(&node(), 10, false, None, &FogConfig::default());
        assert!(!p.foggy);
        assert!(p.details_enabled);
        assert_eq!(p.display_label, "Burn");
        assert_eq!(p.cloud_opacity, None);
        assert!(!p.desaturated);
    }

    #[test]
    fn opacity_falls_with_fog() {
        let config = FogConfig::default();
        let low = present_node(&node(), 20, false, None, &config);
        let high = present_node(&node(), 90, false, None, &config);
        assert!(high.pin_opacity < low.pin_opacity);
        assert!(high.label_opacity < low.label_opacity);
        assert!(high.pin_opacity >= 0.5);
        assert_eq!(high.label_opacity, 0.0);
    }

    #[test]
    fn selection_forces_full_opacity() {
        let p = present_node(&node(), 90, true, None, &FogConfig::default());
        assert_eq!(p.pin_opacity, 1.0);
        assert_eq!(p.label_opacity, 1.0);
        // Selection never reveals identity.
        assert_eq!(p.display_label, UNKNOWN_NODE_LABEL);
    }

    #[test]
    fn cloud_appears_at_threshold_and_dims_with_focus() {
        let config = FogConfig::default();
        assert_eq!(present_node(&node(), 39, false, None, &config).cloud_opacity, None);

        let lit = present_node(&node(), 50, false, None, &config);
        assert!((lit.cloud_opacity.unwrap() - 0.35).abs() < 1e-6);

        let dim = present_node(&node(), 50, false, Some("vitals"), &config);
        assert!(dim.dimmed);
        assert!((dim.cloud_opacity.unwrap() - 0.15).abs() < 1e-6);
    }

    #[test]
    fn focus_on_own_sector_does_not_dim() {
        assert!(!is_dimmed("money", Some("money")));
        assert!(!is_dimmed("money", None));
        assert!(is_dimmed("money", Some("vitals")));
    }
}
