//! Typed views of VersaBoard tile states.
//!
//! The store keeps each module's state as opaque JSON. This crate reads that
//! JSON back into per-tile structs without ever failing, and renders the short
//! preview line shown on the home grid.
//!
//! ```ignore
//! use vb_tiles::TileState;
//!
//! let state = TileState::decode("waterTracker", &serde_json::json!({"ml": 750}));
//! assert_eq!(state.preview(), "750 / 2000 ml");
//! ```

mod lenient;
pub mod states;
mod tile;

pub use tile::{NOTE_PREVIEW_CHARS, TileState, preview};
