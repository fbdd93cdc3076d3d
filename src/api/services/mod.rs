pub mod health;
pub mod helpers;
pub mod lookup;

pub use health::{HealthService, health_routes};
pub use lookup::{FindCountryService, lookup_routes};
