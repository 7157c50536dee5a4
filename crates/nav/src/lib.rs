pub mod context;
pub mod event_log;
pub mod focus;
pub mod navigation;
pub mod transition;
pub mod view;

pub use context::*;
pub use event_log::*;
pub use focus::*;
pub use navigation::*;
pub use transition::*;
pub use view::*;
