mod controls;
pub mod detail;
mod stats;
mod visitor;

pub use controls::Controls;
pub use detail::{DetailContent, DetailPanel, render_details};
pub use stats::{StatsDisplay, StatsPanel};
pub use visitor::{VisitorPanel, VisitorSummary};
