pub mod queue;
pub mod throttle;
