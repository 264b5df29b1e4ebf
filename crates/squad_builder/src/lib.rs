//! Squad Builder Library
//!
//! CSV roster store and text reports on top of `squad_core`.

pub mod report;
pub mod roster;

pub use report::render_report;
pub use roster::{add_player, rate_player, read_roster, select_players, write_roster, RosterRow};
