use std::collections::BTreeMap;

use crate::location::Location;

/// Structural defects rejected when a [`Gazetteer`] is built.
///
/// Dataset integrity is a load-time concern: a tree that fails these checks
/// refuses to start rather than being guarded on every lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GazetteerError {
    Parse(String),
    IdMismatch { key: String, id: String },
    DuplicateId(String),
    NoRoot,
    MultipleRoots { first: String, second: String },
    MultipleParents { child: String, first: String, second: String },
    LevelOrder { parent: String, child: String },
    Cycle(String),
    Unreachable(String),
    MissingEmbedChain(String),
}

impl std::fmt::Display for GazetteerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GazetteerError::Parse(msg) => write!(f, "dataset parse error: {msg}"),
            GazetteerError::IdMismatch { key, id } => {
                write!(f, "entry keyed {key:?} carries id {id:?}")
            }
            GazetteerError::DuplicateId(id) => write!(f, "duplicate location id {id:?}"),
            GazetteerError::NoRoot => write!(f, "dataset has no country-level root"),
            GazetteerError::MultipleRoots { first, second } => {
                write!(f, "more than one country-level location: {first:?}, {second:?}")
            }
            GazetteerError::MultipleParents {
                child,
                first,
                second,
            } => write!(
                f,
                "location {child:?} is listed as a child of both {first:?} and {second:?}"
            ),
            GazetteerError::LevelOrder { parent, child } => {
                write!(f, "child {child:?} is less specific than its parent {parent:?}")
            }
            GazetteerError::Cycle(id) => write!(f, "ancestry of {id:?} never terminates"),
            GazetteerError::Unreachable(id) => {
                write!(f, "location {id:?} is not reachable from the root")
            }
            GazetteerError::MissingEmbedChain(id) => {
                write!(f, "no ancestor of {id:?} owns an embed url")
            }
        }
    }
}

impl std::error::Error for GazetteerError {}

/// Immutable hierarchical location dataset.
///
/// Read-only after construction. Construction validates the forest
/// invariants once (single country root, single parenthood, level ordering,
/// no cycles, reachability, resolvable embed chains); lookups afterwards
/// trust them.
///
/// A `children` entry naming an id that does not exist in the dataset is
/// tolerated: it is dropped by [`Gazetteer::visible_children_for`] instead
/// of failing the load.
#[derive(Debug, Clone)]
pub struct Gazetteer {
    locations: BTreeMap<String, Location>,
    // child id -> parent id, built once at load.
    parent_index: BTreeMap<String, String>,
    root_id: String,
}

impl Gazetteer {
    pub fn from_locations(
        locations: impl IntoIterator<Item = Location>,
    ) -> Result<Self, GazetteerError> {
        let mut map: BTreeMap<String, Location> = BTreeMap::new();
        for loc in locations {
            if map.contains_key(&loc.id) {
                return Err(GazetteerError::DuplicateId(loc.id));
            }
            map.insert(loc.id.clone(), loc);
        }

        let mut parent_index: BTreeMap<String, String> = BTreeMap::new();
        for (parent_id, parent) in &map {
            for child_id in &parent.children {
                if child_id == parent_id {
                    return Err(GazetteerError::Cycle(parent_id.clone()));
                }
                let Some(child) = map.get(child_id) else {
                    // Dangling reference: dropped at read time, not fatal.
                    continue;
                };
                if child.level.rank() < parent.level.rank() {
                    return Err(GazetteerError::LevelOrder {
                        parent: parent_id.clone(),
                        child: child_id.clone(),
                    });
                }
                if let Some(first) = parent_index.get(child_id) {
                    return Err(GazetteerError::MultipleParents {
                        child: child_id.clone(),
                        first: first.clone(),
                        second: parent_id.clone(),
                    });
                }
                parent_index.insert(child_id.clone(), parent_id.clone());
            }
        }

        let mut root_id: Option<String> = None;
        for (id, loc) in &map {
            if loc.level.is_country() {
                if let Some(first) = &root_id {
                    return Err(GazetteerError::MultipleRoots {
                        first: first.clone(),
                        second: id.clone(),
                    });
                }
                root_id = Some(id.clone());
            }
        }
        let root_id = root_id.ok_or(GazetteerError::NoRoot)?;

        let tree = Self {
            locations: map,
            parent_index,
            root_id,
        };
        tree.validate_ancestry()?;
        tree.validate_embed_chains()?;
        Ok(tree)
    }

    /// Parse a dataset serialized as a JSON object keyed by location id.
    pub fn from_json(raw: &str) -> Result<Self, GazetteerError> {
        let entries: BTreeMap<String, Location> =
            serde_json::from_str(raw).map_err(|e| GazetteerError::Parse(e.to_string()))?;
        for (key, loc) in &entries {
            if key != &loc.id {
                return Err(GazetteerError::IdMismatch {
                    key: key.clone(),
                    id: loc.id.clone(),
                });
            }
        }
        Self::from_locations(entries.into_values())
    }

    // Every location must reach the root by walking parents, in at most
    // `len` steps. Exceeding the bound means the ancestry loops; stopping
    // short of the root means an orphan subtree.
    fn validate_ancestry(&self) -> Result<(), GazetteerError> {
        let bound = self.locations.len();
        for id in self.locations.keys() {
            let mut cursor = id.as_str();
            let mut steps = 0usize;
            while cursor != self.root_id {
                match self.parent_index.get(cursor) {
                    Some(parent) => cursor = parent.as_str(),
                    None => return Err(GazetteerError::Unreachable(id.clone())),
                }
                steps += 1;
                if steps > bound {
                    return Err(GazetteerError::Cycle(id.clone()));
                }
            }
        }
        Ok(())
    }

    fn validate_embed_chains(&self) -> Result<(), GazetteerError> {
        for (id, loc) in &self.locations {
            if loc.level.is_country() {
                continue;
            }
            if self.resolve_embed(id).is_none() {
                return Err(GazetteerError::MissingEmbedChain(id.clone()));
            }
        }
        Ok(())
    }

    pub fn root_id(&self) -> &str {
        &self.root_id
    }

    pub fn root(&self) -> &Location {
        &self.locations[&self.root_id]
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Location> {
        self.locations.values()
    }

    pub fn get(&self, id: &str) -> Option<&Location> {
        self.locations.get(id)
    }

    /// The location whose `children` list contains `id`; `None` for the
    /// root and for unknown ids.
    pub fn parent_of(&self, id: &str) -> Option<&Location> {
        let parent_id = self.parent_index.get(id)?;
        self.locations.get(parent_id)
    }

    /// The embed url owned by `id` or inherited from its nearest ancestor
    /// that owns one. O(depth); terminates at the root.
    pub fn resolve_embed(&self, id: &str) -> Option<&str> {
        let mut cursor = self.get(id)?;
        loop {
            if let Some(url) = cursor.embed_url.as_deref() {
                return Some(url);
            }
            cursor = self.parent_of(&cursor.id)?;
        }
    }

    /// `id`'s children in declared order, with dangling references
    /// silently dropped. Empty for leaves and unknown ids.
    pub fn visible_children_for(&self, id: &str) -> Vec<&Location> {
        let Some(loc) = self.get(id) else {
            return Vec::new();
        };
        loc.children
            .iter()
            .filter_map(|child_id| self.locations.get(child_id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{Gazetteer, GazetteerError};
    use crate::location::{Level, Location, MapCoords};

    fn loc(id: &str, level: Level, children: &[&str], embed: Option<&str>) -> Location {
        Location {
            id: id.to_string(),
            level,
            name: id.to_uppercase(),
            subtitle: String::new(),
            description: String::new(),
            lat: 0.0,
            lng: 0.0,
            coords: MapCoords::centered(),
            thumbnail_url: None,
            embed_url: embed.map(str::to_string),
            children: children.iter().map(|c| c.to_string()).collect(),
            ads: Vec::new(),
        }
    }

    fn demo() -> Gazetteer {
        Gazetteer::from_locations([
            loc("iraq", Level::Country, &["baghdad", "basra"], None),
            loc("baghdad", Level::Province, &["karadah", "mansour"], Some("https://maps/bg")),
            loc("basra", Level::Province, &[], Some("https://maps/bs")),
            loc("karadah", Level::Region, &[], None),
            loc("mansour", Level::Region, &[], Some("https://maps/mn")),
        ])
        .unwrap()
    }

    #[test]
    fn lookups_and_parenthood() {
        let g = demo();
        assert_eq!(g.root_id(), "iraq");
        assert_eq!(g.len(), 5);
        assert!(g.get("nowhere").is_none());
        assert!(g.parent_of("iraq").is_none());
        assert_eq!(g.parent_of("karadah").unwrap().id, "baghdad");
        assert_eq!(g.parent_of("baghdad").unwrap().id, "iraq");
    }

    #[test]
    fn embed_resolution_walks_up() {
        let g = demo();
        // A region without its own embed inherits the province's.
        assert_eq!(g.resolve_embed("karadah"), Some("https://maps/bg"));
        // An owned embed wins over inheritance.
        assert_eq!(g.resolve_embed("mansour"), Some("https://maps/mn"));
        // The root owns none and inherits from nobody.
        assert_eq!(g.resolve_embed("iraq"), None);
        assert_eq!(g.resolve_embed("nowhere"), None);
    }

    #[test]
    fn children_preserve_order_and_drop_dangling() {
        let g = Gazetteer::from_locations([
            loc("iraq", Level::Country, &["baghdad", "ghost", "basra"], None),
            loc("baghdad", Level::Province, &[], Some("https://maps/bg")),
            loc("basra", Level::Province, &[], Some("https://maps/bs")),
        ])
        .unwrap();
        let ids: Vec<&str> = g
            .visible_children_for("iraq")
            .iter()
            .map(|l| l.id.as_str())
            .collect();
        assert_eq!(ids, vec!["baghdad", "basra"]);
        assert!(g.visible_children_for("nowhere").is_empty());
        assert!(g.visible_children_for("basra").is_empty());
    }

    #[test]
    fn rejects_missing_or_extra_roots() {
        let err = Gazetteer::from_locations([loc(
            "baghdad",
            Level::Province,
            &[],
            Some("https://maps/bg"),
        )])
        .unwrap_err();
        assert_eq!(err, GazetteerError::NoRoot);

        let err = Gazetteer::from_locations([
            loc("iraq", Level::Country, &[], None),
            loc("syria", Level::Country, &[], None),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            GazetteerError::MultipleRoots {
                first: "iraq".to_string(),
                second: "syria".to_string(),
            }
        );
    }

    #[test]
    fn rejects_multiple_parents() {
        let err = Gazetteer::from_locations([
            loc("iraq", Level::Country, &["baghdad", "basra"], None),
            loc("baghdad", Level::Province, &["karadah"], Some("https://maps/bg")),
            loc("basra", Level::Province, &["karadah"], Some("https://maps/bs")),
            loc("karadah", Level::Region, &[], None),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            GazetteerError::MultipleParents {
                child: "karadah".to_string(),
                first: "baghdad".to_string(),
                second: "basra".to_string(),
            }
        );
    }

    #[test]
    fn rejects_level_inversion() {
        let err = Gazetteer::from_locations([
            loc("iraq", Level::Country, &["karadah"], None),
            loc("karadah", Level::Region, &["baghdad"], Some("https://maps/k")),
            loc("baghdad", Level::Province, &[], Some("https://maps/bg")),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            GazetteerError::LevelOrder {
                parent: "karadah".to_string(),
                child: "baghdad".to_string(),
            }
        );
    }

    #[test]
    fn rejects_cycles_and_orphans() {
        // Two provinces adopting each other loop without reaching the root.
        let err = Gazetteer::from_locations([
            loc("iraq", Level::Country, &[], None),
            loc("a", Level::Province, &["b"], Some("https://maps/a")),
            loc("b", Level::Province, &["a"], Some("https://maps/b")),
        ])
        .unwrap_err();
        assert_eq!(err, GazetteerError::Cycle("a".to_string()));

        let err = Gazetteer::from_locations([
            loc("iraq", Level::Country, &[], None),
            loc("orphan", Level::Province, &[], Some("https://maps/o")),
        ])
        .unwrap_err();
        assert_eq!(err, GazetteerError::Unreachable("orphan".to_string()));

        let err = Gazetteer::from_locations([loc("iraq", Level::Country, &["iraq"], None)])
            .unwrap_err();
        assert_eq!(err, GazetteerError::Cycle("iraq".to_string()));
    }

    #[test]
    fn rejects_unresolvable_embed_chain() {
        let err = Gazetteer::from_locations([
            loc("iraq", Level::Country, &["baghdad"], None),
            loc("baghdad", Level::Province, &["karadah"], None),
            loc("karadah", Level::Region, &[], None),
        ])
        .unwrap_err();
        assert_eq!(err, GazetteerError::MissingEmbedChain("baghdad".to_string()));
    }

    #[test]
    fn from_json_checks_key_consistency() {
        let g = Gazetteer::from_json(
            r#"{
                "iraq": {
                    "id": "iraq", "level": "country", "name": "Republic of Iraq",
                    "lat": 33.3, "lng": 44.4,
                    "coords": { "x": 50.0, "y": 50.0, "zoom": 1.0 },
                    "children": ["baghdad"]
                },
                "baghdad": {
                    "id": "baghdad", "level": "province", "name": "Baghdad",
                    "lat": 33.3, "lng": 44.4,
                    "coords": { "x": 57.0, "y": 47.0, "zoom": 6.0 },
                    "embed_url": "https://maps/bg"
                }
            }"#,
        )
        .unwrap();
        assert_eq!(g.root().name, "Republic of Iraq");

        let err = Gazetteer::from_json(
            r#"{
                "iraq": {
                    "id": "mesopotamia", "level": "country", "name": "Iraq",
                    "lat": 0.0, "lng": 0.0,
                    "coords": { "x": 50.0, "y": 50.0, "zoom": 1.0 }
                }
            }"#,
        )
        .unwrap_err();
        assert_eq!(
            err,
            GazetteerError::IdMismatch {
                key: "iraq".to_string(),
                id: "mesopotamia".to_string(),
            }
        );

        assert!(matches!(
            Gazetteer::from_json("not json").unwrap_err(),
            GazetteerError::Parse(_)
        ));
    }
}
