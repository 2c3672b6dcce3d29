//! Dashboard component modules
//!
//! Contains all individual rendering components

pub mod action_panel;
pub mod footer;
pub mod header;
pub mod info_panel;
pub mod logs;
pub mod sale_panel;
