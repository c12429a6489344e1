//! Interactive display components: the search input and the health indicator.

mod health;
mod search_box;

pub use health::{HealthIndicator, HealthState, check_health};
pub use search_box::SearchBox;
