//! CRUD Controller
//!
//! Bridges UI events to a [`KeySwitchService`] and keeps the displayable
//! snapshot current. Every mutation is followed by a full re-fetch; the
//! snapshot is replaced, never patched.

use crate::model::KeySwitch;
use crate::sample;
use crate::store::{diagnostic_chain, KeySwitchService, StoreError};
use std::sync::Arc;

/// Severity of a user-facing message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Error,
}

/// A message for the presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub severity: Severity,
    pub summary: String,
    /// Cause chain for faults that are not caller-facing
    pub detail: Option<String>,
}

impl Message {
    pub fn info(summary: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            summary: summary.into(),
            detail: None,
        }
    }

    pub fn error(summary: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            summary: summary.into(),
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: String) -> Self {
        self.detail = Some(detail);
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// UI regions that need redrawing after an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Messages,
    Table,
}

/// Signals produced by one controller operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
    pub messages: Vec<Message>,
    pub refresh: Vec<Region>,
    /// The manage dialog can be dismissed
    pub close_dialog: bool,
}

impl Outcome {
    fn push(&mut self, message: Message) {
        self.messages.push(message);
        if !self.refresh.contains(&Region::Messages) {
            self.refresh.push(Region::Messages);
        }
    }

    fn refresh_table(&mut self) {
        if !self.refresh.contains(&Region::Table) {
            self.refresh.push(Region::Table);
        }
    }

    pub fn has_errors(&self) -> bool {
        self.messages.iter().any(Message::is_error)
    }
}

/// The most recently fetched list of records
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    records: Vec<KeySwitch>,
}

impl Snapshot {
    pub fn new(records: Vec<KeySwitch>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[KeySwitch] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&KeySwitch> {
        self.records.iter().find(|ks| ks.id.as_deref() == Some(id))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }
}

pub struct CrudController {
    service: Arc<dyn KeySwitchService>,
    selection: Option<KeySwitch>,
    snapshot: Snapshot,
}

impl CrudController {
    pub fn new(service: Arc<dyn KeySwitchService>) -> Self {
        Self {
            service,
            selection: None,
            snapshot: Snapshot::default(),
        }
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn selection(&self) -> Option<&KeySwitch> {
        self.selection.as_ref()
    }

    pub fn selection_mut(&mut self) -> Option<&mut KeySwitch> {
        self.selection.as_mut()
    }

    pub fn store_description(&self) -> String {
        self.service.describe()
    }

    /// Load the first snapshot. On failure the snapshot stays empty.
    pub async fn initialize(&mut self) -> Outcome {
        let mut outcome = Outcome::default();
        match self.service.get_all().await {
            Ok(records) => {
                tracing::info!("Loaded {} KeySwitches", records.len());
                self.snapshot = Snapshot::new(records);
            },
            Err(e) => {
                tracing::error!("Initial load failed: {}", diagnostic_chain(&e));
                self.snapshot = Snapshot::default();
                outcome.push(Message::error(format!("Error getting KeySwitches: {}", e)));
            },
        }
        outcome.refresh_table();
        outcome
    }

    /// Start editing a blank pending record
    pub fn open_new(&mut self) {
        self.selection = Some(KeySwitch::pending());
    }

    /// Start editing a copy of the snapshot record with `id`
    pub fn select(&mut self, id: &str) -> bool {
        match self.snapshot.get(id) {
            Some(ks) => {
                self.selection = Some(ks.clone());
                true
            },
            None => false,
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Fill the selection with sample values
    pub fn generate_data(&mut self) -> Outcome {
        let mut outcome = Outcome::default();
        match self.selection.as_mut() {
            Some(ks) => sample::generate(ks),
            None => outcome.push(Message::error(
                "Error generating data: no KeySwitch is being edited",
            )),
        }
        outcome
    }

    /// Create the selection if pending, otherwise update it
    pub async fn save(&mut self) -> Outcome {
        let mut outcome = Outcome::default();
        let Some(selected) = self.selection.clone() else {
            outcome.push(Message::error("Nothing to save: no KeySwitch is being edited"));
            return outcome;
        };

        if selected.is_pending() {
            match self.service.create(selected).await {
                Ok(created) => {
                    let id = created.id.unwrap_or_default();
                    outcome.push(Message::info(format!(
                        "Create was successful with generated id of {}",
                        id
                    )));
                    self.selection = None;
                },
                Err(e) => {
                    report_failure(&mut outcome, "Save", &e);
                    return outcome;
                },
            }
        } else {
            match self.service.update(selected).await {
                Ok(updated) => {
                    outcome.push(Message::info("Update was successful"));
                    self.selection = Some(updated);
                },
                Err(e) => {
                    report_failure(&mut outcome, "Save", &e);
                    return outcome;
                },
            }
        }

        self.reload(&mut outcome, "Save").await;
        outcome.close_dialog = true;
        outcome
    }

    /// Delete the selected persisted record
    pub async fn delete(&mut self) -> Outcome {
        let mut outcome = Outcome::default();
        let Some(id) = self.selection.as_ref().and_then(|ks| ks.id.clone()) else {
            outcome.push(Message::error("Select a saved KeySwitch to delete"));
            return outcome;
        };

        if let Err(e) = self.service.delete_by_id(&id).await {
            report_failure(&mut outcome, "Delete", &e);
            return outcome;
        }

        outcome.push(Message::info(format!(
            "Delete was successful for id of {}",
            id
        )));
        self.selection = None;
        self.reload(&mut outcome, "Delete").await;
        outcome
    }

    /// Re-fetch the snapshot on demand
    pub async fn refresh(&mut self) -> Outcome {
        let mut outcome = Outcome::default();
        self.reload(&mut outcome, "Refresh").await;
        outcome
    }

    /// Replace the snapshot; runs only after the preceding mutation returned
    async fn reload(&mut self, outcome: &mut Outcome, action: &str) {
        match self.service.get_all().await {
            Ok(records) => {
                self.snapshot = Snapshot::new(records);
                outcome.refresh_table();
            },
            Err(e) => report_failure(outcome, action, &e),
        }
    }
}

/// Caller-facing errors are shown verbatim; anything else gets a generic
/// summary with the cause chain as detail.
fn report_failure(outcome: &mut Outcome, action: &str, err: &StoreError) {
    tracing::warn!("{} failed: {}", action, diagnostic_chain(err));
    let message = if err.is_caller_facing() {
        Message::error(err.to_string())
    } else {
        Message::error(format!("{} not successful.", action)).with_detail(diagnostic_chain(err))
    };
    outcome.push(message);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryKeySwitchService;

    fn controller() -> CrudController {
        CrudController::new(Arc::new(MemoryKeySwitchService::new()))
    }

    #[tokio::test]
    async fn test_open_new_then_save_creates_and_clears_selection() {
        let mut ctl = controller();
        ctl.initialize().await;

        ctl.open_new();
        ctl.selection_mut().unwrap().name = "Oil King".to_string();
        let outcome = ctl.save().await;

        assert!(!outcome.has_errors());
        assert!(outcome.close_dialog);
        assert!(outcome.refresh.contains(&Region::Table));
        assert!(ctl.selection().is_none());
        assert_eq!(ctl.snapshot().len(), 1);
        assert!(outcome.messages[0]
            .summary
            .starts_with("Create was successful with generated id of "));
    }

    #[tokio::test]
    async fn test_save_existing_keeps_selection() {
        let mut ctl = controller();
        ctl.open_new();
        ctl.save().await;
        let id = ctl.snapshot().records()[0].id.clone().unwrap();

        assert!(ctl.select(&id));
        ctl.selection_mut().unwrap().travel = "4.0mm".to_string();
        let outcome = ctl.save().await;

        assert_eq!(outcome.messages, vec![Message::info("Update was successful")]);
        assert_eq!(ctl.selection().unwrap().id.as_deref(), Some(id.as_str()));
        assert_eq!(ctl.snapshot().get(&id).unwrap().travel, "4.0mm");
    }

    #[tokio::test]
    async fn test_save_without_selection_reports_error() {
        let mut ctl = controller();
        let outcome = ctl.save().await;
        assert!(outcome.has_errors());
        assert!(!outcome.close_dialog);
    }

    #[tokio::test]
    async fn test_delete_requires_persisted_selection() {
        let mut ctl = controller();
        ctl.open_new();
        let outcome = ctl.delete().await;
        assert_eq!(
            outcome.messages,
            vec![Message::error("Select a saved KeySwitch to delete")]
        );
    }

    #[tokio::test]
    async fn test_delete_removes_from_snapshot() {
        let mut ctl = CrudController::new(Arc::new(MemoryKeySwitchService::with_samples(2)));
        ctl.initialize().await;
        let id = ctl.snapshot().records()[0].id.clone().unwrap();

        ctl.select(&id);
        let outcome = ctl.delete().await;

        assert_eq!(
            outcome.messages[0].summary,
            format!("Delete was successful for id of {}", id)
        );
        assert!(ctl.selection().is_none());
        assert!(!ctl.snapshot().contains(&id));
        assert_eq!(ctl.snapshot().len(), 1);
    }

    #[test]
    fn test_generate_data_without_selection() {
        let mut ctl = controller();
        let outcome = ctl.generate_data();
        assert!(outcome.has_errors());

        ctl.open_new();
        let outcome = ctl.generate_data();
        assert!(outcome.messages.is_empty());
        assert!(!ctl.selection().unwrap().name.is_empty());
    }

    #[test]
    fn test_select_unknown_id() {
        let mut ctl = controller();
        assert!(!ctl.select("ghost"));
        assert!(ctl.selection().is_none());
    }
}
