pub mod batches;
pub mod catalog;
pub mod configuration;
pub mod db;
pub mod ipc;
pub mod navigation;
pub mod roles;
pub mod roster;
pub mod session;
pub mod telemetry;
pub mod threads;
