//! gaan: a Bengali lyrics cleaner with an artist catalog.
//!
//! The [`cleaning`] pipeline turns pasted lyric text into display-ready text.
//! [`catalog`] stores artists and their songs, [`web`] serves both over HTTP,
//! and [`cli`] drives everything from the terminal.

pub mod analytics;
pub mod catalog;
pub mod cleaning;
pub mod cli;
pub mod config;
pub mod utils;
pub mod web;
