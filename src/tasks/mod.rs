//! Background Tasks Module
//!
//! Contains background tasks that run alongside the REPL.
//!
//! # Tasks
//! - Cache reaper: removes expired cache entries once per cache interval

mod reaper;

pub use reaper::{first_sweep_at, spawn_reaper_task};
