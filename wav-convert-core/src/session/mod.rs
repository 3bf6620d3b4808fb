pub mod collector;
pub mod job;
