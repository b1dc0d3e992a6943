//! Usage analytics for the cleaning pipeline.
//!
//! Every cleaning run appends a line to `~/.gaan/clean-log.jsonl`
//! ([`logger`]); [`reporter`] aggregates that log for `gaan history` and
//! `GET /api/history`.

pub mod logger;
pub mod reporter;
