//! First-come, first-served emergency triage queue.

use crate::error::{ClinicError, Result};
use crate::models::EmergencyEntry;
use std::collections::VecDeque;
use tracing::{info, warn};

#[derive(Debug, Clone, Default)]
pub struct EmergencyQueue {
    entries: VecDeque<EmergencyEntry>,
}

impl EmergencyQueue {
    pub fn new() -> Self {
        EmergencyQueue {
            entries: VecDeque::new(),
        }
    }

    /// Add an entry at the tail.
    pub fn enqueue(&mut self, entry: EmergencyEntry) {
        info!(
            patient_id = entry.patient_id,
            position = self.entries.len() + 1,
            "emergency enqueued"
        );
        self.entries.push_back(entry);
    }

    /// Remove and return the head. An empty queue is left untouched.
    pub fn dequeue(&mut self) -> Result<EmergencyEntry> {
        match self.entries.pop_front() {
            Some(entry) => {
                info!(
                    patient_id = entry.patient_id,
                    remaining = self.entries.len(),
                    "emergency processed"
                );
                Ok(entry)
            }
            None => {
                warn!("dequeue on empty emergency queue");
                Err(ClinicError::EmptyQueue)
            }
        }
    }

    pub fn peek(&self) -> Option<&EmergencyEntry> {
        self.entries.front()
    }

    /// Entries from head to tail.
    pub fn iter(&self) -> impl Iterator<Item = &EmergencyEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
