//! Library side of the escale terminal client: logging setup and table
//! rendering. The binary's argument parsing and command dispatch live in
//! `main.rs` and its private modules.

pub mod logging;
pub mod render;
