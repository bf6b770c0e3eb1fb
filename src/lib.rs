//! Result plotter library
//!
//! Loads expected/actual result tables and renders them as comparison charts.
//! The binary in `main.rs` wires these modules to the command line and the
//! interactive viewer.

pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod plotter;
pub mod render;
pub mod state;
pub mod ui;

pub use config::{ImageFormat, PlotConfig};
pub use data::model::{ResultRow, ResultSet};
pub use error::PlotError;
pub use plotter::ResultPlotter;
