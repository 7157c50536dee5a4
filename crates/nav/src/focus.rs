use gazetteer::{AdScreen, Location};

/// Enlarged-inspection state for one location's display assets.
///
/// Closed, or open on a target with a current asset index. Opening always
/// resets to the first asset. The carousel wraps; advancing with no ads is
/// a no-op, never an out-of-bounds index.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FocusModal {
    target: Option<Location>,
    asset_index: usize,
}

impl FocusModal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.target.is_some()
    }

    pub fn target(&self) -> Option<&Location> {
        self.target.as_ref()
    }

    /// Meaningful only while open on a target with ads.
    pub fn asset_index(&self) -> usize {
        self.asset_index
    }

    pub fn open(&mut self, location: &Location) {
        self.target = Some(location.clone());
        self.asset_index = 0;
    }

    pub fn close(&mut self) {
        self.target = None;
        self.asset_index = 0;
    }

    pub fn next_asset(&mut self) {
        self.step(1);
    }

    pub fn prev_asset(&mut self) {
        self.step(-1);
    }

    fn step(&mut self, dir: isize) {
        let Some(target) = &self.target else {
            return;
        };
        let count = target.ads.len();
        if count == 0 {
            return;
        }
        self.asset_index = (self.asset_index + count).wrapping_add_signed(dir) % count;
    }

    /// The ad under the cursor, if the target owns any.
    pub fn current_ad(&self) -> Option<&AdScreen> {
        self.target.as_ref()?.ads.get(self.asset_index)
    }

    /// Image shown by the modal: the current ad, falling back to the
    /// target's thumbnail when it owns no ads.
    pub fn current_image(&self) -> Option<&str> {
        let target = self.target.as_ref()?;
        match self.current_ad() {
            Some(ad) => Some(ad.image_url.as_str()),
            None => target.thumbnail_url.as_deref(),
        }
    }

    /// Title shown by the modal: the current ad's, else the target's name.
    pub fn current_title(&self) -> Option<&str> {
        let target = self.target.as_ref()?;
        match self.current_ad() {
            Some(ad) => Some(ad.title.as_str()),
            None => Some(target.name.as_str()),
        }
    }
}
