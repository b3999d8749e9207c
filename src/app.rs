//! Application State
//!
//! Central application state management for mdex. Persistence decisions
//! live in [`CrudController`]; this type only tracks what the terminal
//! shows.

use crate::config::Config;
use crate::controller::{CrudController, Message, Outcome, Region};
use crate::model::{KeySwitch, SwitchField};
use crate::notification::NotificationManager;
use std::ops::Range;
use std::time::Duration;

/// Default viewport height (will be updated during render based on terminal size)
const DEFAULT_VIEWPORT_HEIGHT: usize = 20;

/// Application modes
#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    Normal,        // Viewing list
    Edit,          // Manage KeySwitch dialog
    Confirm,       // Delete confirmation
    Warning,       // Warning/info dialog (OK only)
    Help,          // ? help popup
    Describe,      // JSON view of selected item
    Notifications, // Notifications history panel
}

/// Delete awaiting confirmation
#[derive(Debug, Clone)]
pub struct PendingDelete {
    pub id: String,
    pub message: String,
    pub selected_yes: bool,
}

/// Main application state
pub struct App {
    pub controller: CrudController,
    pub store_description: String,

    // Snapshot rows after filtering
    pub filtered_items: Vec<KeySwitch>,

    // Navigation state
    pub selected: usize,
    pub mode: Mode,
    pub filter_text: String,
    pub filter_active: bool,

    // Edit dialog
    pub focused_field: SwitchField,

    // Confirmation
    pub pending_delete: Option<PendingDelete>,

    // UI state
    pub loading: bool,
    pub describe_scroll: usize,
    pub warning_message: Option<String>,
    pub readonly: bool,

    // Notifications
    pub notification_manager: NotificationManager,
    pub notifications_selected: usize,

    // Virtual scrolling
    pub viewport_height: usize,
    pub scroll_offset: usize,

    pub config: Config,
}

impl App {
    pub fn new(controller: CrudController, config: Config, readonly: bool) -> Self {
        let mut notification_manager = NotificationManager::new();
        notification_manager.toast_duration =
            Duration::from_secs(config.notifications.toast_duration_secs);
        notification_manager.max_history = config.notifications.max_history;

        let store_description = controller.store_description();

        Self {
            controller,
            store_description,
            filtered_items: Vec::new(),
            selected: 0,
            mode: Mode::Normal,
            filter_text: String::new(),
            filter_active: false,
            focused_field: SwitchField::Name,
            pending_delete: None,
            loading: false,
            describe_scroll: 0,
            warning_message: None,
            readonly,
            notification_manager,
            notifications_selected: 0,
            viewport_height: DEFAULT_VIEWPORT_HEIGHT,
            scroll_offset: 0,
            config,
        }
    }

    // =========================================================================
    // Controller Outcomes
    // =========================================================================

    pub async fn initialize(&mut self) {
        self.loading = true;
        let outcome = self.controller.initialize().await;
        self.loading = false;
        self.apply_outcome(outcome);
    }

    pub async fn refresh(&mut self) {
        self.loading = true;
        let outcome = self.controller.refresh().await;
        self.loading = false;
        self.apply_outcome(outcome);
    }

    /// Route controller signals into notifications, table and dialog state
    pub fn apply_outcome(&mut self, outcome: Outcome) {
        if outcome.refresh.contains(&Region::Table) {
            self.apply_filter();
        }
        self.notification_manager.extend(outcome.messages);
        if outcome.close_dialog && self.mode == Mode::Edit {
            self.mode = Mode::Normal;
        }
    }

    fn push_message(&mut self, message: Message) {
        self.notification_manager.push(message);
    }

    // =========================================================================
    // Filtering
    // =========================================================================

    pub fn apply_filter(&mut self) {
        let filter = self.filter_text.to_lowercase();
        let records = self.controller.snapshot().records();

        self.filtered_items = if filter.is_empty() {
            records.to_vec()
        } else {
            records
                .iter()
                .filter(|ks| ks.matches(&filter))
                .cloned()
                .collect()
        };

        if self.selected >= self.filtered_items.len() {
            self.selected = self.filtered_items.len().saturating_sub(1);
        }
        self.scroll_offset = 0;
    }

    pub fn clear_filter(&mut self) {
        self.filter_text.clear();
        self.filter_active = false;
        self.apply_filter();
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    pub fn selected_item(&self) -> Option<&KeySwitch> {
        self.filtered_items.get(self.selected)
    }

    /// Selected row as pretty JSON, id included
    pub fn selected_item_json(&self) -> Option<String> {
        let ks = self.selected_item()?;
        let mut value = serde_json::to_value(ks).ok()?;
        if let (Some(map), Some(id)) = (value.as_object_mut(), ks.id.as_ref()) {
            map.insert("id".to_string(), serde_json::Value::String(id.clone()));
        }
        serde_json::to_string_pretty(&value).ok()
    }

    pub fn next(&mut self) {
        match self.mode {
            Mode::Notifications => {
                let len = self.notification_manager.notifications.len();
                if len > 0 {
                    self.notifications_selected = (self.notifications_selected + 1).min(len - 1);
                }
            },
            Mode::Describe => {
                self.describe_scroll += 1;
            },
            _ => {
                if !self.filtered_items.is_empty() {
                    self.selected = (self.selected + 1).min(self.filtered_items.len() - 1);
                }
            },
        }
    }

    pub fn previous(&mut self) {
        match self.mode {
            Mode::Notifications => {
                self.notifications_selected = self.notifications_selected.saturating_sub(1);
            },
            Mode::Describe => {
                self.describe_scroll = self.describe_scroll.saturating_sub(1);
            },
            _ => {
                self.selected = self.selected.saturating_sub(1);
            },
        }
    }

    pub fn go_to_top(&mut self) {
        self.selected = 0;
    }

    pub fn go_to_bottom(&mut self) {
        if !self.filtered_items.is_empty() {
            self.selected = self.filtered_items.len() - 1;
        }
    }

    pub fn page_down(&mut self, page_size: usize) {
        if !self.filtered_items.is_empty() {
            self.selected = (self.selected + page_size).min(self.filtered_items.len() - 1);
        }
    }

    pub fn page_up(&mut self, page_size: usize) {
        self.selected = self.selected.saturating_sub(page_size);
    }

    // =========================================================================
    // Mode Transitions
    // =========================================================================

    pub fn enter_help_mode(&mut self) {
        self.mode = Mode::Help;
    }

    pub fn enter_describe_mode(&mut self) {
        if self.selected_item().is_some() {
            self.describe_scroll = 0;
            self.mode = Mode::Describe;
        }
    }

    pub fn enter_notifications_mode(&mut self) {
        self.notifications_selected = 0;
        self.mode = Mode::Notifications;
    }

    pub fn show_warning(&mut self, message: &str) {
        self.warning_message = Some(message.to_string());
        self.mode = Mode::Warning;
    }

    pub fn close_overlay(&mut self) {
        self.warning_message = None;
        self.mode = Mode::Normal;
    }

    fn blocked_by_readonly(&mut self) -> bool {
        if self.readonly {
            self.show_warning("Read-only mode: changes are disabled");
        }
        self.readonly
    }

    // =========================================================================
    // Edit Dialog
    // =========================================================================

    /// New button: edit a blank pending record
    pub fn open_new(&mut self) {
        if self.blocked_by_readonly() {
            return;
        }
        self.controller.open_new();
        self.focused_field = SwitchField::Name;
        self.mode = Mode::Edit;
    }

    /// Edit the row under the cursor
    pub fn edit_selected(&mut self) {
        if self.blocked_by_readonly() {
            return;
        }
        let Some(id) = self.selected_item().and_then(|ks| ks.id.clone()) else {
            return;
        };
        if self.controller.select(&id) {
            self.focused_field = SwitchField::Name;
            self.mode = Mode::Edit;
        }
    }

    pub fn cancel_edit(&mut self) {
        self.controller.clear_selection();
        self.mode = Mode::Normal;
    }

    pub fn next_field(&mut self) {
        self.focused_field = self.focused_field.next();
    }

    pub fn previous_field(&mut self) {
        self.focused_field = self.focused_field.previous();
    }

    pub fn input_char(&mut self, c: char) {
        let field = self.focused_field;
        if let Some(ks) = self.controller.selection_mut() {
            ks.field_mut(field).push(c);
        }
    }

    pub fn backspace(&mut self) {
        let field = self.focused_field;
        if let Some(ks) = self.controller.selection_mut() {
            ks.field_mut(field).pop();
        }
    }

    pub fn clear_field(&mut self) {
        let field = self.focused_field;
        if let Some(ks) = self.controller.selection_mut() {
            ks.field_mut(field).clear();
        }
    }

    pub fn generate_data(&mut self) {
        let outcome = self.controller.generate_data();
        self.apply_outcome(outcome);
    }

    pub async fn save(&mut self) {
        if self.blocked_by_readonly() {
            return;
        }
        self.loading = true;
        let outcome = self.controller.save().await;
        self.loading = false;
        self.apply_outcome(outcome);
    }

    // =========================================================================
    // Delete Confirmation
    // =========================================================================

    pub fn request_delete(&mut self) {
        if self.blocked_by_readonly() {
            return;
        }
        let Some(item) = self.selected_item().cloned() else {
            return;
        };
        let Some(id) = item.id.clone() else {
            return;
        };
        if !self.controller.select(&id) {
            self.push_message(Message::error(format!("KeySwitch {} is no longer listed", id)));
            return;
        }

        let label = if item.name.is_empty() { id.clone() } else { item.name };
        self.pending_delete = Some(PendingDelete {
            id,
            message: format!("Delete KeySwitch '{}'?", label),
            selected_yes: false,
        });
        self.mode = Mode::Confirm;
    }

    pub async fn confirm_delete(&mut self) {
        self.pending_delete = None;
        self.mode = Mode::Normal;
        self.loading = true;
        let outcome = self.controller.delete().await;
        self.loading = false;
        if outcome.has_errors() {
            self.controller.clear_selection();
        }
        self.apply_outcome(outcome);
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
        self.controller.clear_selection();
        self.mode = Mode::Normal;
    }

    // =========================================================================
    // Virtual Scrolling
    // =========================================================================

    /// Update the viewport height (called from UI during render)
    pub fn update_viewport(&mut self, height: usize) {
        self.viewport_height = height.max(1);
    }

    /// Ensure the selected item is visible in the viewport
    pub fn ensure_visible(&mut self) {
        if self.filtered_items.is_empty() {
            self.scroll_offset = 0;
            return;
        }

        let visible_height = self.viewport_height;
        let margin = 2; // Keep cursor at least this far from edge

        if self.selected < self.scroll_offset + margin {
            self.scroll_offset = self.selected.saturating_sub(margin);
        } else if self.selected >= self.scroll_offset + visible_height.saturating_sub(margin) {
            self.scroll_offset = self
                .selected
                .saturating_sub(visible_height.saturating_sub(margin + 1));
        }

        let max_offset = self
            .filtered_items
            .len()
            .saturating_sub(self.viewport_height);
        self.scroll_offset = self.scroll_offset.min(max_offset);
    }

    /// Get the range of visible items based on scroll offset and viewport
    pub fn visible_range(&self) -> Range<usize> {
        let start = self.scroll_offset.min(self.filtered_items.len());
        let end = (self.scroll_offset + self.viewport_height).min(self.filtered_items.len());
        start..end
    }
}
