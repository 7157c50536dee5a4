use serde::{Deserialize, Serialize};

/// Depth of a location in the fixed geographic hierarchy.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Country,
    Province,
    Region,
}

impl Level {
    /// Rank increases with specificity: country 0, province 1, region 2.
    ///
    /// A child's rank is never smaller than its parent's.
    pub fn rank(self) -> u8 {
        match self {
            Level::Country => 0,
            Level::Province => 1,
            Level::Region => 2,
        }
    }

    pub fn is_country(self) -> bool {
        self == Level::Country
    }
}

/// Normalized terrain placement: `x`/`y` are percentages of the terrain
/// image ([0, 100], origin top-left), `zoom` is the camera scale factor.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapCoords {
    pub x: f64,
    pub y: f64,
    pub zoom: f64,
}

impl MapCoords {
    pub fn new(x: f64, y: f64, zoom: f64) -> Self {
        Self { x, y, zoom }
    }

    /// Camera at rest over the whole terrain.
    pub fn centered() -> Self {
        Self {
            x: 50.0,
            y: 50.0,
            zoom: 1.0,
        }
    }

    pub fn in_bounds(&self) -> bool {
        (0.0..=100.0).contains(&self.x) && (0.0..=100.0).contains(&self.y) && self.zoom > 0.0
    }
}

/// One advertisement asset shown in the focus modal's carousel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdScreen {
    pub id: String,
    pub title: String,
    pub image_url: String,
    pub description: String,
}

/// A node in the fixed geographic hierarchy.
///
/// Records are immutable once the [`Gazetteer`](crate::tree::Gazetteer) is
/// built. `children` order is display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: String,
    pub level: Level,
    pub name: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub description: String,
    pub lat: f64,
    pub lng: f64,
    pub coords: MapCoords,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    /// Present only on locations that own a live map view. Absent values
    /// inherit from the nearest ancestor that owns one.
    #[serde(default)]
    pub embed_url: Option<String>,
    #[serde(default)]
    pub children: Vec<String>,
    #[serde(default)]
    pub ads: Vec<AdScreen>,
}

impl Location {
    pub fn has_ads(&self) -> bool {
        !self.ads.is_empty()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{Level, Location, MapCoords};

    #[test]
    fn level_ranks_are_ordered() {
        assert!(Level::Country.rank() < Level::Province.rank());
        assert!(Level::Province.rank() < Level::Region.rank());
        assert!(Level::Country.is_country());
        assert!(!Level::Region.is_country());
    }

    #[test]
    fn coords_bounds() {
        assert!(MapCoords::centered().in_bounds());
        assert!(!MapCoords::new(101.0, 50.0, 1.0).in_bounds());
        assert!(!MapCoords::new(50.0, 50.0, 0.0).in_bounds());
    }

    #[test]
    fn location_deserializes_with_defaults() {
        let raw = r#"{
            "id": "basra",
            "level": "province",
            "name": "Basra",
            "lat": 30.55,
            "lng": 47.67,
            "coords": { "x": 87.0, "y": 77.0, "zoom": 6.5 }
        }"#;
        let loc: Location = serde_json::from_str(raw).unwrap();
        assert_eq!(loc.level, Level::Province);
        assert!(loc.children.is_empty());
        assert!(!loc.has_ads());
        assert!(loc.embed_url.is_none());
        assert!(loc.subtitle.is_empty());
    }
}
