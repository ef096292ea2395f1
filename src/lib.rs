//! tabfill: Tab-triggered remote autocomplete for a terminal guess form.
//!
//! Pressing the trigger key in the artist field sends the trimmed text to the
//! quiz server's completion endpoint and replaces the field with the match.
//! The workspace is split the way the data flows:
//!
//! ```text
//! tabfill-tui ──► tabfill-client ──► completion service
//!      └───────────────┴──► tabfill-core (config, wire types)
//! ```
//!
//! This crate only adds the binary's command-line surface.

pub mod cli;
