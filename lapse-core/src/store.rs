//! Note Store: the owned collection and its lifecycle rules.
//!
//! Expiry: expires_at = now + duration × unit_millis(unit)
//!
//! Where:
//!   now         = clock time at add/update (update resets the lifetime)
//!   unit_millis = fixed table, months = 30 days, years = 365 days
//!
//! Sweep: removes every note with saved == false && expires_at <= now.
//! It keeps no watermark between ticks, so a late or doubled tick is harmless.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::clock::{Clock, SystemClock};
use crate::error::StoreError;
use crate::models::{Note, NoteId, NoteInput};

// ============================================================================
// PUBLIC API
// ============================================================================

/// Result of one sweep pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepReport {
    pub removed: usize,
    pub removed_ids: Vec<NoteId>,
    /// Unsaved, unexpired notes at the sweep's `now`.
    pub active: usize,
}

pub struct NoteStore {
    notes: Vec<Note>,
    clock: Arc<dyn Clock>,
}

impl Default for NoteStore {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

impl std::fmt::Debug for NoteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoteStore")
            .field("notes", &self.notes)
            .finish_non_exhaustive()
    }
}

impl NoteStore {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            notes: Vec::new(),
            clock,
        }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Create a note that expires `input.lifetime` from now.
    pub fn add_note(&mut self, input: NoteInput) -> Result<Note, StoreError> {
        let now = self.clock.now();
        let expires_at = input.validate(now)?;

        let mut id = Uuid::new_v4();
        while self.position(id).is_some() {
            id = Uuid::new_v4();
        }

        let note = Note {
            id,
            content: input.content,
            created_at: now,
            expires_at,
            saved: false,
            category: input.category,
            color: input.color,
            priority: input.priority,
            format: input.format,
        };
        self.notes.push(note.clone());

        tracing::debug!("Note {} created, expires at {}", note.id, note.expires_at);
        Ok(note)
    }

    /// Rewrite a note's content and attributes and restart its lifetime from now.
    /// `id`, `created_at` and `saved` are kept; absent optionals are cleared.
    pub fn update_note(&mut self, id: NoteId, input: NoteInput) -> Result<Note, StoreError> {
        let now = self.clock.now();
        let idx = self.position(id).ok_or(StoreError::NotFound(id))?;
        let expires_at = input.validate(now)?;

        let note = &mut self.notes[idx];
        note.content = input.content;
        note.expires_at = expires_at;
        note.category = input.category;
        note.color = input.color;
        note.priority = input.priority;
        note.format = input.format;

        tracing::debug!("Note {} updated, expires at {}", id, expires_at);
        Ok(note.clone())
    }

    pub fn delete_note(&mut self, id: NoteId) -> Result<Note, StoreError> {
        let idx = self.position(id).ok_or(StoreError::NotFound(id))?;
        let note = self.notes.remove(idx);
        tracing::debug!("Note {} deleted", id);
        Ok(note)
    }

    /// Flip the saved flag; returns the new value.
    pub fn toggle_save(&mut self, id: NoteId) -> Result<bool, StoreError> {
        let idx = self.position(id).ok_or(StoreError::NotFound(id))?;
        let note = &mut self.notes[idx];
        note.saved = !note.saved;
        tracing::debug!("Note {} saved={}", id, note.saved);
        Ok(note.saved)
    }

    /// Remove expired, unsaved notes. Counts are taken from the pre-removal
    /// snapshot with the same `now`.
    pub fn sweep(&mut self, now: DateTime<Utc>) -> SweepReport {
        let removed_ids: Vec<NoteId> = self
            .notes
            .iter()
            .filter(|n| n.is_expired(now))
            .map(|n| n.id)
            .collect();
        let active = self.active_count(now);

        if !removed_ids.is_empty() {
            self.notes.retain(|n| n.expires_at > now || n.saved);
        }

        SweepReport {
            removed: removed_ids.len(),
            removed_ids,
            active,
        }
    }

    pub fn get(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    /// All notes in insertion order.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn active_count(&self, now: DateTime<Utc>) -> usize {
        self.notes.iter().filter(|n| n.is_active(now)).count()
    }

    pub fn saved_count(&self) -> usize {
        self.notes.iter().filter(|n| n.saved).count()
    }

    pub fn clear(&mut self) {
        self.notes.clear();
    }

    // ========================================================================
    // INTERNAL HELPERS
    // ========================================================================

    fn position(&self, id: NoteId) -> Option<usize> {
        self.notes.iter().position(|n| n.id == id)
    }
}
