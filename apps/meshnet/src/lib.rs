//! # meshnet
//!
//! The Meshnet console binary - THE SURFACE.
//!
//! Everything I/O-aware lives in this crate: the clap CLI, the line
//! interpreter, and response rendering. The topology itself is owned by
//! `meshnet-core` and only ever reached through its engine facade.

pub mod cli;
pub mod console;

pub use console::{Console, ConsoleReply};
