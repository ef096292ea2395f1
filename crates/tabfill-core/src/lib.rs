//! tabfill-core: shared pieces of the tabfill workspace.
//!
//! This crate holds the configuration model and the small set of value and
//! wire types used by both the completion client and the TUI.
//!
//! # Architecture
//!
//! ```text
//! Form ──(trigger key)──► CompletionTrigger ──► tokio task ──► CompletionService
//!   ▲                                                             │
//!   └──────────── CompletionInbox ◄──────── mpsc ◄────────────────┘
//! ```
//!
//! The form lives on the UI thread; lookups run on background tasks and
//! report back over a `tokio` channel.

pub mod config;
pub mod types;

pub use types::{CompletionResponse, Query};
