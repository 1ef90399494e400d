//! Pure logic behind the map annotation and image grid widgets: record
//! parsing, projection, layout and the per-container render bookkeeping.

pub mod config;
pub mod error;
pub mod grid;
pub mod layout;
pub mod models;
pub mod parser;
pub mod projection;
pub mod reconcile;
pub mod resize;
pub mod visibility;
