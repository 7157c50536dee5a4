use gazetteer::{Gazetteer, Level, Location, MapCoords};

use crate::navigation::{NavigationState, ViewMode};
use crate::transition::Phase;

/// A marker painted over whichever layer is authoritative.
#[derive(Debug, Clone, PartialEq)]
pub struct Pin<'a> {
    pub location: &'a Location,
    pub selected: bool,
    /// Regions with a thumbnail render as photo cards instead of diamonds.
    pub photo_card: bool,
}

/// Derived view state, recomputed on every read.
///
/// These are pure functions of `(tree, navigation, phase)`; nothing here is
/// cached, so there is no invalidation to get wrong.
pub fn view_mode(tree: &Gazetteer, nav: &NavigationState) -> ViewMode {
    match tree.get(nav.active_id()) {
        Some(loc) => ViewMode::for_level(loc.level),
        None => ViewMode::National,
    }
}

/// Markers visible over the map for the current navigation state.
///
/// Country and province views show the active location's direct children.
/// A region view shows the sibling set: its parent province's children,
/// with the active region marked selected. While a zoom-in cross-fade is
/// in flight no pins render at all, so stale markers never sit over a
/// transitioning background.
pub fn visible_pins<'a>(
    tree: &'a Gazetteer,
    nav: &NavigationState,
    phase: Phase,
) -> Vec<Pin<'a>> {
    if phase == Phase::ZoomingIn {
        return Vec::new();
    }
    let Some(active) = tree.get(nav.active_id()) else {
        return Vec::new();
    };
    let source_id = match active.level {
        Level::Country | Level::Province => active.id.as_str(),
        Level::Region => match tree.parent_of(&active.id) {
            Some(parent) => parent.id.as_str(),
            None => return Vec::new(),
        },
    };
    tree.visible_children_for(source_id)
        .into_iter()
        .map(|location| Pin {
            selected: location.id == active.id,
            photo_card: location.level == Level::Region && location.thumbnail_url.is_some(),
            location,
        })
        .collect()
}

/// The side panel always lists the active location's direct children
/// (empty at region level), independent of the sibling substitution the
/// map pins perform.
pub fn panel_items<'a>(tree: &'a Gazetteer, nav: &NavigationState) -> Vec<&'a Location> {
    tree.visible_children_for(nav.active_id())
}

/// Embed url for the active location, inherited from the nearest ancestor
/// that owns one.
pub fn nearest_embed<'a>(tree: &'a Gazetteer, nav: &NavigationState) -> Option<&'a str> {
    tree.resolve_embed(nav.active_id())
}

/// Display name for the "Return to X" affordance, from the history top.
pub fn back_label<'a>(tree: &'a Gazetteer, nav: &NavigationState) -> Option<&'a str> {
    let id = nav.back_id()?;
    tree.get(id).map(|loc| loc.name.as_str())
}

/// Terrain camera placement for the active location.
pub fn camera(tree: &Gazetteer, nav: &NavigationState) -> MapCoords {
    tree.get(nav.active_id())
        .map(|loc| loc.coords)
        .unwrap_or_else(MapCoords::centered)
}

/// Whether selecting this location as a pin also opens the focus modal:
/// a region presented with display assets (ads or a thumbnail to fall
/// back on).
pub fn opens_focus(location: &Location) -> bool {
    location.level == Level::Region
        && (location.has_ads() || location.thumbnail_url.is_some())
}
