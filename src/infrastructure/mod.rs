//! Infrastructure layer - Redis connections and logging

pub mod cache;
pub mod logging;
