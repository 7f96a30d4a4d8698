//! Runtime services the settings panel collaborates with.

pub mod bridge;
pub mod regions;
pub mod stream_cache;
pub mod time_source;
pub mod tracing_setup;
pub mod translations;
pub mod user_agent;
