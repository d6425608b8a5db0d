//! Core engine modules for sweep.

pub mod board;
pub mod catalog;
pub mod error;
pub mod feed;
pub mod resolver;
pub mod types;
