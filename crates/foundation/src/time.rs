/// Time primitives
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd)]
pub struct Time(pub f64); // seconds

impl Time {
    pub const ZERO: Time = Time(0.0);

    pub fn after_secs(self, secs: f64) -> Time {
        Time(self.0 + secs)
    }

    pub fn secs_since(self, earlier: Time) -> f64 {
        self.0 - earlier.0
    }
}
