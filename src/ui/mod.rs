// src/ui/mod.rs
pub mod chat;
pub mod dashboard;
pub mod intro;

pub use dashboard::DashboardAction;
