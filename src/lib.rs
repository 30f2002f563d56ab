//! cargotrack
//!
//! TUI application for registering cargo shipments, loading products into
//! them and browsing the records in a searchable, paginated table.
//!
//! The crate follows a Pure Core / Impure Shell split: `model`, `store`,
//! `table`, `form`, `map` and `state` are pure and testable without a
//! terminal; `view`, `geocode` and `logging` own the side effects.

pub mod config;
pub mod form;
pub mod geocode;
pub mod logging;
pub mod map;
pub mod model;
pub mod state;
pub mod store;
pub mod table;
pub mod view;

#[cfg(test)]
mod test_harness;

#[cfg(test)]
mod tests;
