//! Command handlers

pub mod config;
pub mod gallery;
pub mod note;
pub mod stats;
pub mod transfer;
pub mod unlock;
