//! Page state for the dashboard: list pages and sidebar badges

pub mod badges;
pub mod list;

pub use badges::BadgeBoard;
pub use list::ListView;
