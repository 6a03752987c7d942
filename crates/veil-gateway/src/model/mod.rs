mod batch;
mod health;

pub use batch::parse_batch;
pub use health::HealthResponse;
