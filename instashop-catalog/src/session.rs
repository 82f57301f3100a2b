//! Explicit session state for one upload-edit-export cycle.
//!
//! ```text
//! Idle ──ingest──▶ Ingested ──begin_generation──▶ Generating
//!                                                   │ complete_generation
//!                                                   ▼
//!   Exported ◀──export── ReadyToExport ◀──finish── Editing
//! ```
//! `restart(true)` returns to `Idle` from anywhere, and `ingest` from any
//! state replaces the items and drops the ledger. Edits made after
//! `finish_editing` or `export` move the session back to `Editing`.

use std::fmt;

use rand::Rng;

use crate::error::CatalogError;
use crate::export::{ExportOptions, serialize};
use crate::ledger::Ledger;
use crate::normalize::{KeyPolicy, normalize_nonempty};
use crate::types::{CatalogItem, CatalogRecord, RecordField, UploadedFile};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Idle,
    Ingested,
    Generating,
    Editing,
    ReadyToExport,
    Exported,
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Ingested => "ingested",
            Self::Generating => "generating",
            Self::Editing => "editing",
            Self::ReadyToExport => "ready to export",
            Self::Exported => "exported",
        }
    }

    fn is_editable(&self) -> bool {
        matches!(self, Self::Editing | Self::ReadyToExport | Self::Exported)
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifies one field-generation request. Only the most recent ticket can
/// complete; earlier ones are superseded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GenerationTicket(u64);

impl GenerationTicket {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Owns the item list and ledger for a single user session.
#[derive(Debug, Default)]
pub struct Session {
    state: SessionState,
    key_policy: KeyPolicy,
    items: Vec<CatalogItem>,
    ledger: Ledger,
    next_ticket: u64,
    pending: Option<GenerationTicket>,
}

impl Session {
    pub fn new(key_policy: KeyPolicy) -> Self {
        Self {
            key_policy,
            ..Self::default()
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn key_policy(&self) -> KeyPolicy {
        self.key_policy
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn record(&self, key: &str) -> Option<&CatalogRecord> {
        self.ledger.get(key)
    }

    pub fn pending_generation(&self) -> Option<GenerationTicket> {
        self.pending
    }

    /// Replace the held item list with the images in `files`.
    ///
    /// Allowed in every state. Any previous items, ledger, and pending
    /// generation are dropped. Returns the number of
    /// accepted images; none at all leaves the session `Idle` and reports
    /// [`CatalogError::EmptySelection`].
    pub fn ingest(&mut self, files: &[UploadedFile]) -> Result<usize, CatalogError> {
        if !self.ledger.is_empty() {
            log::debug!(
                "session: new upload replaces {} records ({})",
                self.ledger.len(),
                self.state()
            );
        }
        self.ledger.clear();
        self.pending = None;
        self.items = match normalize_nonempty(files, self.key_policy) {
            Ok(items) => items,
            Err(e) => {
                self.items.clear();
                self.set_state(SessionState::Idle);
                return Err(e);
            }
        };

        log::debug!(
            "session: ingested {} of {} files",
            self.items.len(),
            files.len()
        );
        self.set_state(SessionState::Ingested);
        Ok(self.items.len())
    }

    /// Build the ledger and enter `Generating`.
    ///
    /// Calling this again while a generation is pending supersedes it: the
    /// ledger is rebuilt and the previous ticket will no longer complete.
    pub fn begin_generation(&mut self) -> Result<GenerationTicket, CatalogError> {
        self.begin_generation_with(&mut rand::thread_rng())
    }

    /// [`begin_generation`](Self::begin_generation) with a caller-supplied RNG.
    pub fn begin_generation_with<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Result<GenerationTicket, CatalogError> {
        self.require(
            &[SessionState::Ingested, SessionState::Generating],
            "generate fields",
        )?;

        if let Some(prev) = self.pending {
            log::debug!("session: generation {} superseded", prev.id());
        }

        self.ledger = Ledger::initialize_with(&self.items, rng);
        let ticket = GenerationTicket(self.next_ticket);
        self.next_ticket += 1;
        self.pending = Some(ticket);
        self.set_state(SessionState::Generating);
        Ok(ticket)
    }

    /// Finish a generation. Returns `false` (and changes nothing) if the
    /// ticket was superseded or the session moved on.
    pub fn complete_generation(&mut self, ticket: GenerationTicket) -> bool {
        if self.state() != SessionState::Generating || self.pending != Some(ticket) {
            log::debug!("session: ignoring stale generation {}", ticket.id());
            return false;
        }
        self.pending = None;
        self.set_state(SessionState::Editing);
        true
    }

    /// Edit one field of one item.
    pub fn update(
        &mut self,
        key: &str,
        field: RecordField,
        value: impl Into<String>,
    ) -> Result<(), CatalogError> {
        self.require_editable("edit fields")?;
        self.ledger.update(key, field, value)?;
        self.set_state(SessionState::Editing);
        Ok(())
    }

    /// Set one field on every item.
    pub fn apply_to_all(
        &mut self,
        field: RecordField,
        value: impl Into<String>,
    ) -> Result<usize, CatalogError> {
        self.require_editable("edit fields")?;
        let n = self.ledger.apply_to_all(field, value)?;
        self.set_state(SessionState::Editing);
        Ok(n)
    }

    pub fn finish_editing(&mut self) -> Result<(), CatalogError> {
        self.require(
            &[SessionState::Editing, SessionState::ReadyToExport],
            "finish editing",
        )?;
        self.set_state(SessionState::ReadyToExport);
        Ok(())
    }

    /// Serialize the catalog. Allowed once fields exist; the session ends
    /// up `Exported` and can still be edited and exported again.
    pub fn export(&mut self, options: &ExportOptions) -> Result<String, CatalogError> {
        self.require_editable("export")?;
        let csv = serialize(&self.items, &self.ledger, options)?;
        self.set_state(SessionState::Exported);
        Ok(csv)
    }

    /// Drop all items and records. An unconfirmed restart is a no-op and
    /// returns `false`.
    pub fn restart(&mut self, confirmed: bool) -> bool {
        if !confirmed {
            return false;
        }
        self.items.clear();
        self.ledger.clear();
        self.pending = None;
        self.set_state(SessionState::Idle);
        true
    }

    fn require(&self, allowed: &[SessionState], action: &'static str) -> Result<(), CatalogError> {
        let from = self.state();
        if allowed.contains(&from) {
            Ok(())
        } else {
            Err(CatalogError::InvalidTransition { from, action })
        }
    }

    fn require_editable(&self, action: &'static str) -> Result<(), CatalogError> {
        let from = self.state();
        if from.is_editable() {
            Ok(())
        } else {
            Err(CatalogError::InvalidTransition { from, action })
        }
    }

    fn set_state(&mut self, next: SessionState) {
        if self.state != next {
            log::debug!("session: {} -> {}", self.state, next);
        }
        self.state = next;
    }
}
