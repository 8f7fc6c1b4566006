//! CLI command implementations

mod capture;
mod config_gen;
mod inspect;

pub use capture::{capture_order, show_order};
pub use config_gen::config_generate;
pub use inspect::{area_command, detect_command};

use crate::area::ExecutionArea;

/// `ExecutionArea` parsing never fails; unknown names become `Other`
pub(crate) fn parse_area(area: &str) -> ExecutionArea {
    area.parse().unwrap_or_else(|never| match never {})
}
