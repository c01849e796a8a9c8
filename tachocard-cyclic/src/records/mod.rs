//! Record kinds stored in cyclic card buffers.

pub mod activity;
pub mod condition;
pub mod gnss;
pub mod place;
pub mod vehicle;

pub use activity::CardActivityDailyRecord;
pub use condition::SpecificConditionRecord;
pub use gnss::GnssAccumulatedDrivingRecord;
pub use place::{PlaceRecord, PlaceRecordGen2};
pub use vehicle::CardVehicleRecord;
