//! Round-robin tournaments between agents played out by an external game engine.

pub mod agent;
pub mod cli;
pub mod engine;
pub mod error;
pub mod output;
pub mod ranking;
pub mod result;
pub mod runner;
pub mod stats;
pub mod tournament;
