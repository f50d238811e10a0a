pub mod api_gateway;
pub mod config;
pub mod errors;
pub mod telemetry;
pub mod tracing;

pub use self::tracing::init_tracing;
pub use api_gateway::*;
pub use config::*;
pub use errors::*;
