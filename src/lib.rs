//! cashlens
//!
//! Browse store cashback offers across partner platforms.
//!
//! The pure core lives in [`resolve`] (best offer per store) and
//! [`view_state`] (visibility, display values and order for the whole
//! list). Everything else is the shell around it: catalog ingestion,
//! configuration, logging and the terminal UI.

pub mod config;
pub mod logging;
pub mod model;
pub mod parser;
pub mod resolve;
pub mod source;
pub mod state;
pub mod view;
pub mod view_state;
