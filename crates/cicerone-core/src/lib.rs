//! Proximity tracking and narration engine for a location-aware tourist guide.
//!
//! Platform-free: geolocation, speech and audio are reached through the
//! traits in [`capabilities`], so the same engine runs in the browser and in
//! the native replay tool.

pub mod announcer;
pub mod capabilities;
pub mod catalog;
pub mod constants;
pub mod error;
pub mod filter;
pub mod gate;
pub mod geo;
pub mod poi;
pub mod proximity;
pub mod session;
pub mod tracker;

pub use announcer::*;
pub use capabilities::*;
pub use catalog::*;
pub use constants::*;
pub use error::{GuideError, Result as GuideResult};
pub use filter::{apply as apply_filter, radius_label, FilterCriteria, FilterEngine};
pub use gate::*;
pub use geo::*;
pub use poi::*;
pub use proximity::*;
pub use session::*;
pub use tracker::*;
