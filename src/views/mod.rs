//! Presentational Components
//!
//! Text renderers for already-fetched data. They hold no loading or error
//! state; the caller decides what to fetch and when.

mod bed_stats;
mod login_button;
mod stat_card;

pub use bed_stats::BedStatsPanel;
pub use login_button::LoginButton;
pub use stat_card::StatCard;
