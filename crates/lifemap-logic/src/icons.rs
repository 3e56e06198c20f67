//! Icon identifiers.
//!
//! Zones and sectors name their icon by string. Lookup is a plain table
//! scan; anything unrecognised renders as [`Icon::Circle`].

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Icon {
    Circle,
    Heart,
    Users,
    Brain,
    Home,
    Activity,
    Target,
    Briefcase,
    Hammer,
    GraduationCap,
    Wallet,
    Inbox,
    CloudFog,
    Compass,
}

const ICON_TABLE: &[(&str, Icon)] = &[
    ("Circle", Icon::Circle),
    ("Heart", Icon::Heart),
    ("Users", Icon::Users),
    ("Brain", Icon::Brain),
    ("Home", Icon::Home),
    ("Activity", Icon::Activity),
    ("Target", Icon::Target),
    ("Briefcase", Icon::Briefcase),
    ("Hammer", Icon::Hammer),
    ("GraduationCap", Icon::GraduationCap),
    ("Wallet", Icon::Wallet),
    ("Inbox", Icon::Inbox),
    ("CloudFog", Icon::CloudFog),
    ("Compass", Icon::Compass),
];

impl Icon {
    /// Rendered when an identifier is not in the table.
    pub const FALLBACK: Icon = Icon::Circle;

    /// Resolve an identifier, falling back to [`Icon::FALLBACK`].
    pub fn lookup(name: &str) -> Icon {
        ICON_TABLE
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, icon)| *icon)
            .unwrap_or(Self::FALLBACK)
    }

    pub fn name(self) -> &'static str {
        ICON_TABLE
            .iter()
            .find(|(_, icon)| *icon == self)
            .map(|(key, _)| *key)
            .unwrap_or("Circle")
    }
}

/// Default icon for a sector id.
pub fn sector_icon(sector_id: &str) -> Icon {
    match sector_id {
        "humans" => Icon::Users,
        "headspace" => Icon::Brain,
        "home_ops" => Icon::Home,
        "vitals" => Icon::Heart,
        "commitments" => Icon::Target,
        "client_bay" => Icon::Briefcase,
        "build_room" => Icon::Hammer,
        "academy" => Icon::GraduationCap,
        "money" => Icon::Wallet,
        "pending" => Icon::Inbox,
        _ => Icon::FALLBACK,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::sectors;

    #[test]
    fn known_names_resolve() {
        assert_eq!(Icon::lookup("Heart"), Icon::Heart);
        assert_eq!(Icon::lookup("CloudFog"), Icon::CloudFog);
    }

    #[test]
    fn unknown_names_fall_back() {
        assert_eq!(Icon::lookup("Sparkles"), Icon::Circle);
        assert_eq!(Icon::lookup(""), Icon::Circle);
        assert_eq!(Icon::lookup("heart"), Icon::Circle);
    }

    #[test]
    fn names_round_trip_through_table() {
        for (name, icon) in ICON_TABLE {
            assert_eq!(icon.name(), *name);
        }
    }

    #[test]
    fn every_catalog_sector_has_an_icon() {
        for sector in sectors() {
            assert_ne!(sector_icon(&sector.id), Icon::FALLBACK, "{}", sector.id);
        }
    }
}
