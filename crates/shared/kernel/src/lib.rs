//! Kernel utilities shared across the workspace crates.
//! Keep this crate lightweight: naming rules and the layered config loader only.
//!
//! ## Naming
//! ```rust
//! use mgkit_kernel::naming::{snake_to_camel, snake_to_pascal};
//!
//! assert_eq!(snake_to_pascal("fraction_race"), "FractionRace");
//! assert_eq!(snake_to_camel("fraction_race"), "fractionRace");
//! ```
//!
//! ## Config loading
//! See [`config::load_config`]: defaults from `T`, then an optional TOML file, then
//! `MGKIT__*` environment variables.
pub mod config;
pub mod naming;
