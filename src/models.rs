pub mod member;
pub use member::{Member, MemberStatus, MembershipLevel};
pub mod class;
pub use class::{ClassSession, ClassStatus, ClassType};
pub mod attendance;
pub use attendance::{AttendanceRecord, AttendanceStatus, DraftEntry, MarkingSession, NewAttendanceRecord};
pub mod dashboard;
pub use dashboard::{AttendanceStats, DashboardKpis, InstructorPerformance, LevelCounts, TrendBucket};
