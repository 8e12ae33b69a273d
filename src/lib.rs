//! Weasel-style string evolution.
//!
//! Evolves random strings toward a target string with a generational
//! genetic algorithm:
//!
//! - **Selection**: the fittest fraction of each generation survives
//!   unchanged.
//! - **Scale-up**: survivors are cloned, and clones are mutated by a
//!   configurable policy over a closed set of operators.
//! - **Fitness**: discrete, continuous (code point distance) or word-aware
//!   scoring against the target, `1.0` being an exact match.
//! - **Statistics**: generation count, deaths, stagnation and efficiency
//!   for a view layer to display.
//!
//! # Architecture
//!
//! The engine is synchronous and performs no rendering, timing or I/O.
//! A driver threads a [`weasel::RunState`] through
//! [`initialize`](weasel::RunState::initialize) and
//! [`step`](weasel::RunState::step); [`weasel::WeaselRunner`] is the native
//! driver and the `wasm` feature exposes one for browser views.
//!
//! # Features
//!
//! - `parallel`: score specimens with rayon
//! - `serde`: serialize configuration and statistics
//! - `wasm`: wasm-bindgen driver

pub mod random;
pub mod weasel;

#[cfg(feature = "wasm")]
pub mod wasm;
