//! Image Hub library
//!
//! A local image gallery: images are stored as blobs in an embedded
//! database, titled and tagged, and rendered as a searchable grid.

pub mod app;
pub mod config;
pub mod database;
pub mod error;
pub mod gallery;
pub mod services;
pub mod storage;
pub mod store;
