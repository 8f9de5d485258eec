//! Shared types for the cocktail detail screen: recipe model, lookup client,
//! configuration and platform paths.

pub mod config;
pub mod lookup;
pub mod platform;
pub mod recipe;
