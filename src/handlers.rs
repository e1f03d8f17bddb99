pub mod attendance;
pub mod reports;
pub mod roster;
