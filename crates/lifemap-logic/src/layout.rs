//! Sector catalog and node placement on the logical canvas.
//!
//! Sectors are a fixed catalog anchored around the canvas centre. Nodes are
//! generated once per process from that catalog: the Humans sector is laid
//! out as tight sub-clusters (family, partner, mentor, friends, founders)
//! with a small jitter, every other sector spreads its nodes around the
//! anchor on a loosely ordered ring whose radius depends on the sector.
//!
//! Placement draws from an injected [`rand::Rng`], so a seeded or mocked
//! generator yields exact coordinates.
//!
//! ```
//! use lifemap_logic::layout::{generate_layout, validate_layout};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let layout = generate_layout(&mut rng);
//! assert_eq!(layout.sectors.len(), 10);
//! assert!(validate_layout(&layout).is_empty());
//! ```

use std::collections::HashSet;
use std::f32::consts::TAU;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::{CENTER_X, CENTER_Y};

/// A fixed thematic region of the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sector {
    pub id: String,
    pub label: String,
    /// CSS-style hex colour.
    pub color: String,
    /// Anchor on the logical canvas.
    pub anchor_x: f32,
    pub anchor_y: f32,
}

impl Sector {
    fn new(id: &str, label: &str, color: &str, dx: f32, dy: f32) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            color: color.to_string(),
            anchor_x: CENTER_X + dx,
            anchor_y: CENTER_Y + dy,
        }
    }
}

/// A point of interest belonging to exactly one sector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapNode {
    pub id: String,
    pub sector_id: String,
    pub label: String,
    pub x: f32,
    pub y: f32,
}

/// The complete static map: sectors plus generated nodes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapLayout {
    pub sectors: Vec<Sector>,
    pub nodes: Vec<MapNode>,
}

impl MapLayout {
    pub fn sector(&self, id: &str) -> Option<&Sector> {
        self.sectors.iter().find(|s| s.id == id)
    }

    pub fn node(&self, id: &str) -> Option<&MapNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// The sector owning a node.
    pub fn sector_of(&self, node: &MapNode) -> Option<&Sector> {
        self.sector(&node.sector_id)
    }

    pub fn nodes_in_sector<'a>(&'a self, sector_id: &'a str) -> impl Iterator<Item = &'a MapNode> {
        self.nodes.iter().filter(move |n| n.sector_id == sector_id)
    }

    pub fn node_ids(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|n| n.id.as_str())
    }
}

/// The sector catalog, west to east then the poles.
pub fn sectors() -> Vec<Sector> {
    vec![
        // Western hemisphere: personal
        Sector::new("humans", "Humans", "#f472b6", -700.0, -100.0),
        Sector::new("headspace", "Headspace", "#a855f7", -450.0, -500.0),
        Sector::new("home_ops", "Home Ops", "#eab308", -350.0, 300.0),
        // Southern pole: foundation
        Sector::new("vitals", "Vitals", "#ef4444", 0.0, 500.0),
        // Eastern hemisphere: work and output
        Sector::new("commitments", "Commitments", "#f97316", 400.0, -100.0),
        Sector::new("client_bay", "Client Bay", "#64748b", 800.0, 200.0),
        Sector::new("build_room", "Build Room", "#00f0ff", 750.0, -400.0),
        // Northern pole: growth
        Sector::new("academy", "Academy", "#3b82f6", 200.0, -600.0),
        Sector::new("money", "Money", "#22c55e", 500.0, 450.0),
        Sector::new("pending", "Pending", "#94a3b8", 0.0, 750.0),
    ]
}

/// A named group of Humans nodes placed around a fixed offset.
struct HumanCluster {
    name: &'static str,
    labels: &'static [&'static str],
    offset_x: f32,
    offset_y: f32,
}

const HUMAN_CLUSTERS: &[HumanCluster] = &[
    HumanCluster {
        name: "Family",
        labels: &["Mom", "Dad", "Brother"],
        offset_x: -150.0,
        offset_y: -50.0,
    },
    HumanCluster {
        name: "Partner",
        labels: &["Girlfriend"],
        offset_x: 50.0,
        offset_y: -120.0,
    },
    HumanCluster {
        name: "Mentor",
        labels: &["Mentor"],
        offset_x: 120.0,
        offset_y: 0.0,
    },
    HumanCluster {
        name: "Friends",
        labels: &["Friends", "Bestie"],
        offset_x: -50.0,
        offset_y: 120.0,
    },
    HumanCluster {
        name: "Founders",
        labels: &["Cofounder A", "Cofounder B"],
        offset_x: 50.0,
        offset_y: 80.0,
    },
];

/// Full width of the square jitter applied inside a Humans cluster.
const CLUSTER_JITTER: f32 = 60.0;

/// Angular jitter (radians) added to each ring position.
const RING_ANGLE_JITTER: f32 = 0.5;

const DEFAULT_NODE_LABELS: &[&str] = &["Node 1", "Node 2", "Node 3"];

fn node_labels(sector_id: &str) -> &'static [&'static str] {
    match sector_id {
        "vitals" => &["Sleep", "Exercise", "Diet", "Health"],
        "academy" => &["Courses", "Reading List", "Skills", "Research"],
        "commitments" => &["Main Arc", "Side Quest A", "Side Quest B", "Maintenance"],
        "pending" => &["Inbox", "To Sort", "Waiting"],
        "headspace" => &["Journal", "Therapy", "Meditation", "Reflection"],
        "money" => &["Burn", "Income", "Savings", "Taxes"],
        "home_ops" => &["Groceries", "Cleaning", "Repairs", "Logistics"],
        "client_bay" => &["Client A", "Client B", "Leads", "Pipeline"],
        "build_room" => &["RajOS", "Website", "Experiments", "Shipping"],
        _ => DEFAULT_NODE_LABELS,
    }
}

/// Ring radius for a sector's nodes; busier sectors spread wider.
pub fn spread_radius(sector_id: &str) -> f32 {
    match sector_id {
        "commitments" | "client_bay" | "build_room" => 160.0,
        "vitals" | "academy" => 100.0,
        _ => 120.0,
    }
}

/// Generate the full layout from the sector catalog.
pub fn generate_layout(rng: &mut impl Rng) -> MapLayout {
    let sectors = sectors();
    let nodes = generate_nodes(&sectors, rng);
    MapLayout { sectors, nodes }
}

/// Place nodes for every sector in catalog order.
pub fn generate_nodes(sectors: &[Sector], rng: &mut impl Rng) -> Vec<MapNode> {
    let mut nodes = Vec::new();

    for sector in sectors {
        if sector.id == "humans" {
            for cluster in HUMAN_CLUSTERS {
                for (i, label) in cluster.labels.iter().enumerate() {
                    let jx = (rng.gen::<f32>() - 0.5) * CLUSTER_JITTER;
                    let jy = (rng.gen::<f32>() - 0.5) * CLUSTER_JITTER;
                    nodes.push(MapNode {
                        id: format!("humans-{}-{}", cluster.name, i),
                        sector_id: sector.id.clone(),
                        label: label.to_string(),
                        x: sector.anchor_x + cluster.offset_x + jx,
                        y: sector.anchor_y + cluster.offset_y + jy,
                    });
                }
            }
        } else {
            let labels = node_labels(&sector.id);
            let radius = spread_radius(&sector.id);
            let count = labels.len() as f32;

            for (i, label) in labels.iter().enumerate() {
                let angle = (i as f32 / count) * TAU + rng.gen::<f32>() * RING_ANGLE_JITTER;
                let dist = radius * 0.4 + rng.gen::<f32>() * radius * 0.6;
                nodes.push(MapNode {
                    id: format!("{}-{}", sector.id, i),
                    sector_id: sector.id.clone(),
                    label: label.to_string(),
                    x: sector.anchor_x + angle.cos() * dist,
                    y: sector.anchor_y + angle.sin() * dist,
                });
            }
        }
    }

    nodes
}

/// Layout consistency violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// A node names a sector that is not in the catalog.
    UnknownSector { node_id: String, sector_id: String },
    DuplicateNodeId(String),
    DuplicateSectorId(String),
}

/// Check referential integrity and id uniqueness, returning all violations.
pub fn validate_layout(layout: &MapLayout) -> Vec<LayoutError> {
    let mut errors = Vec::new();

    let mut sector_ids = HashSet::new();
    for sector in &layout.sectors {
        if !sector_ids.insert(sector.id.as_str()) {
            errors.push(LayoutError::DuplicateSectorId(sector.id.clone()));
        }
    }

    let mut node_ids = HashSet::new();
    for node in &layout.nodes {
        if !node_ids.insert(node.id.as_str()) {
            errors.push(LayoutError::DuplicateNodeId(node.id.clone()));
        }
        if !sector_ids.contains(node.sector_id.as_str()) {
            errors.push(LayoutError::UnknownSector {
                node_id: node.id.clone(),
                sector_id: node.sector_id.clone(),
            });
        }
    }

    errors
}
