//! Data grid engine library
//!
//! A generic engine for list screens: column registry, persisted column
//! visibility, client-side search and sort, id-based selection, row action
//! menus and bulk operations with aggregated results. Rendering is left to
//! the host.

pub mod action;
pub mod bulk;
pub mod column;
pub mod config;
pub mod error;
pub mod export;
pub mod menu;
pub mod model;
pub mod notice;
pub mod query;
pub mod selection;
pub mod storage;
pub mod visibility;

mod grid;

pub use grid::*;
