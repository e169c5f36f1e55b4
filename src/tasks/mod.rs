//! Background Tasks Module
//!
//! Contains background tasks that run alongside a cache engine.
//!
//! # Tasks
//! - Sweeper: erases tombstoned and expired entries at a fixed interval

mod sweeper;

pub(crate) use sweeper::{spawn_sweeper, Sweeper};
