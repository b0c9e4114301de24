//! Cartwise
//!
//! Cartwise turns a shopping list and a snapshot of store prices into three plans: the cheapest
//! overall (money), everything from one store (time), and a compromise limited to a few stores
//! (balanced).

pub mod config;
pub mod engine;
pub mod filter;
pub mod fixtures;
pub mod geo;
pub mod index;
pub mod matching;
pub mod observability;
pub mod observations;
pub mod plans;
pub mod prelude;
pub mod report;
pub mod resolver;
pub mod search;
pub mod stores;
pub mod strategies;
