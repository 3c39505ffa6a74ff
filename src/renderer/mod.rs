//! Canvas 2D rendering module
//!
//! Flat shapes only: draws a `Snapshot`, never touches the simulation.

pub mod canvas;

pub use canvas::CanvasRenderer;
