pub mod factory;
pub mod runner;
pub mod sinks;
