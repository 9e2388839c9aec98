pub mod health;
pub mod metrics;
pub mod params;
pub mod payloads;
pub mod statuses;
