pub mod batches;
pub mod catalog;
pub mod core;
pub mod navigation;
pub mod roster;
pub mod session;
pub mod threads;
