//! Blocking REST client for the escale backend.
//!
//! The backend exposes one workbook per file and one spreadsheet grid per
//! sheet. This crate wraps its six endpoints behind [`SheetBackend`], keeps
//! the bearer token in a shared [`Session`], and turns failure bodies into
//! [`ApiError`] values the CLI can explain.

pub mod backend;
pub mod download;
pub mod error;
pub mod http;
pub mod session;

pub use backend::SheetBackend;
pub use download::DownloadProgress;
pub use error::{ApiError, Result};
pub use http::HttpBackend;
pub use session::Session;
