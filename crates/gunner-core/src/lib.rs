//! Core types and definitions for the gunner controller.
//!
//! This crate defines the vocabulary shared across all other crates:
//! bearing math, sensor snapshots, events, commands, configuration and
//! constants. It has no dependency on any host engine.

pub mod angles;
pub mod commands;
pub mod config;
pub mod constants;
pub mod enums;
pub mod events;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
