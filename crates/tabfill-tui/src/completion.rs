//! Tab completion for one designated form field.
//!
//! [`install`] attaches a [`CompletionTrigger`] to the field named by
//! `completion.field_id`. When the trigger key arrives on that field the
//! listener suppresses the key's default action, trims the field text and, if
//! anything is left, spawns a lookup on the tokio runtime. Results come back
//! over an unbounded channel and are applied on the UI thread by the
//! [`CompletionInbox`]:
//!
//! - a non-empty match replaces the field value, refocuses the field and puts
//!   the cursor at the end;
//! - no match leaves the field alone;
//! - a failed lookup is logged with `tracing::warn!` and leaves the field
//!   alone.
//!
//! Lookups are never cancelled. Each one carries a sequence number; issuing a
//! newer lookup or editing the field makes older ones stale, and stale
//! matches are dropped unless `discard_stale` is off.

use crate::{
    event::{Key, KeyParseError},
    form::{Form, KeyListener, Propagation, TextField},
};
use std::{cell::Cell, rc::Rc, sync::Arc};
use tabfill_client::{CompletionError, CompletionService};
use tabfill_core::{config::CompletionConfig, Query};
use tokio::{runtime::Handle, sync::mpsc};

/// How a finished lookup was applied to the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The field now holds the match.
    Replaced(String),
    /// The service had no suggestion.
    NoMatch,
    /// The lookup failed; the error has been logged.
    Failed,
    /// A newer lookup or an edit superseded this one.
    Stale,
}

/// A lookup result travelling from the runtime back to the UI thread.
#[derive(Debug)]
struct Completed {
    seq: u64,
    query: Query,
    result: Result<Option<String>, CompletionError>,
}

/// Sequence and in-flight bookkeeping shared by the trigger and the inbox.
/// Both live on the UI thread.
#[derive(Debug)]
struct Tracker {
    latest: Cell<u64>,
    in_flight: Cell<usize>,
    discard_stale: bool,
}

impl Tracker {
    fn issue(&self) -> u64 {
        let seq = self.latest.get() + 1;
        self.latest.set(seq);
        self.in_flight.set(self.in_flight.get() + 1);
        seq
    }

    fn invalidate(&self) {
        if self.in_flight.get() > 0 {
            self.latest.set(self.latest.get() + 1);
        }
    }

    fn finish(&self) {
        self.in_flight.set(self.in_flight.get().saturating_sub(1));
    }

    fn is_current(&self, seq: u64) -> bool {
        !self.discard_stale || seq == self.latest.get()
    }
}

// ---------------------------------------------------------------------------
// Installation
// ---------------------------------------------------------------------------

/// One-time startup hook: attach completion to `config.field_id`.
///
/// Returns `Ok(None)`, registering nothing, when the form has no such field.
/// Fails only if `config.trigger_key` is not a key name.
pub fn install<S: CompletionService>(
    form: &mut Form,
    config: &CompletionConfig,
    service: Arc<S>,
    runtime: Handle,
) -> Result<Option<CompletionInbox>, KeyParseError> {
    if form.field(&config.field_id).is_none() {
        tracing::debug!(field = %config.field_id, "no such field, completion not installed");
        return Ok(None);
    }
    let trigger: Key = config.trigger_key.parse()?;

    let (tx, rx) = mpsc::unbounded_channel();
    let tracker = Rc::new(Tracker {
        latest: Cell::new(0),
        in_flight: Cell::new(0),
        discard_stale: config.discard_stale,
    });

    form.add_key_listener(
        config.field_id.clone(),
        Box::new(CompletionTrigger {
            trigger,
            service,
            runtime,
            tx,
            tracker: Rc::clone(&tracker),
        }),
    );
    tracing::debug!(field = %config.field_id, trigger = ?trigger, "completion installed");

    Ok(Some(CompletionInbox {
        field_id: config.field_id.clone(),
        rx,
        tracker,
    }))
}

// ---------------------------------------------------------------------------
// Trigger (the key listener)
// ---------------------------------------------------------------------------

pub struct CompletionTrigger<S> {
    trigger: Key,
    service: Arc<S>,
    runtime: Handle,
    tx: mpsc::UnboundedSender<Completed>,
    tracker: Rc<Tracker>,
}

impl<S: CompletionService> KeyListener for CompletionTrigger<S> {
    fn on_key(&mut self, field: &mut TextField, key: Key) -> Propagation {
        if key != self.trigger {
            if key.edits_text() {
                self.tracker.invalidate();
            }
            return Propagation::Continue;
        }

        let Some(query) = Query::new(field.value()) else {
            tracing::debug!(field = field.id(), "blank field, no lookup");
            return Propagation::PreventDefault;
        };

        let seq = self.tracker.issue();
        tracing::debug!(field = field.id(), query = %query, seq, "completion lookup issued");

        let service = Arc::clone(&self.service);
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let result = service.complete(&query).await;
            // A closed channel means the form is gone; nothing to update.
            let _ = tx.send(Completed { seq, query, result });
        });

        Propagation::PreventDefault
    }
}

// ---------------------------------------------------------------------------
// Inbox (the UI-side receiver)
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct CompletionInbox {
    field_id: String,
    rx: mpsc::UnboundedReceiver<Completed>,
    tracker: Rc<Tracker>,
}

impl CompletionInbox {
    pub fn field_id(&self) -> &str {
        &self.field_id
    }

    /// Lookups issued whose results have not been applied yet.
    pub fn in_flight(&self) -> usize {
        self.tracker.in_flight.get()
    }

    /// Apply every result that has already arrived. Never blocks.
    pub fn drain(&mut self, form: &mut Form) -> usize {
        let mut applied = 0;
        while let Ok(done) = self.rx.try_recv() {
            self.apply(form, done);
            applied += 1;
        }
        applied
    }

    /// Wait for the next result and apply it.
    pub async fn recv(&mut self, form: &mut Form) -> Option<Resolution> {
        let done = self.rx.recv().await?;
        Some(self.apply(form, done))
    }

    fn apply(&self, form: &mut Form, done: Completed) -> Resolution {
        self.tracker.finish();
        let Completed { seq, query, result } = done;

        let matched = match result {
            Ok(Some(m)) => m,
            Ok(None) => {
                tracing::debug!(query = %query, seq, "no completion match");
                return Resolution::NoMatch;
            }
            Err(err) => {
                tracing::warn!(query = %query, seq, error = %err, "completion lookup failed");
                return Resolution::Failed;
            }
        };

        if !self.tracker.is_current(seq) {
            tracing::debug!(query = %query, seq, latest = self.tracker.latest.get(), "discarding stale completion");
            return Resolution::Stale;
        }

        let Some(field) = form.field_mut(&self.field_id) else {
            return Resolution::NoMatch;
        };
        field.set_value(matched.clone());
        form.focus(&self.field_id);
        tracing::debug!(query = %query, matched = %matched, "field completed");
        Resolution::Replaced(matched)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
