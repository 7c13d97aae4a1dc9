// crates/erp-fixtures/src/ui/memory.rs
// ============================================================================
// Module: In-Memory UI
// Description: Simulated record-detail screen implementing the UI driver.
// Purpose: Exercise manual entry without a browser.
// Dependencies: async-trait
// ============================================================================

//! ## Overview
//! [`InMemoryUi`] models the record screen as per-tab grids plus one modal form
//! and one address sub-editor. It enforces the same ordering a browser would
//! (screen before tab, add-new before typing, editor closed before done) and
//! records every call as a [`UiAction`].
//! Invariants:
//! - Rows reach a grid only through `press_done`.
//! - Grids are kept while the same record stays open and cleared when another
//!   record is visited.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::http::RecordId;
use crate::ui::DetailTab;
use crate::ui::FieldScope;
use crate::ui::UiDriver;
use crate::ui::UiError;
use crate::ui::manual::ADDRESS_CITY_FIELD;
use crate::ui::manual::ADDRESS_COUNTRY_FIELD;
use crate::ui::manual::ADDRESS_LINE_FIELD;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Saved grid row: field name to rendered value.
pub type GridRow = BTreeMap<String, String>;

/// Recorded driver call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiAction {
    /// Record screen opened.
    VisitWindow {
        /// Window id.
        window_id: u32,
        /// Record id.
        record_id: RecordId,
    },
    /// Detail tab selected.
    SelectTab(DetailTab),
    /// "Add new" pressed.
    AddNew,
    /// Text field written.
    WriteString {
        /// Field name.
        field: String,
        /// Typed value.
        value: String,
        /// Field location.
        scope: FieldScope,
    },
    /// Lookup option picked.
    WriteLookup {
        /// Field name.
        field: String,
        /// Picked option.
        value: String,
        /// Field location.
        scope: FieldScope,
    },
    /// Modal form title clicked.
    ClickFormTitle,
    /// Checkbox clicked.
    ClickCheckbox {
        /// Field name.
        field: String,
    },
    /// Address editor opened.
    OpenAddressEditor {
        /// Hosting field.
        field: String,
    },
    /// Address editor closed.
    CloseAddressEditor,
    /// Address summary read.
    ReadAddressSummary {
        /// Hosting field.
        field: String,
    },
    /// "Done" pressed.
    PressDone,
    /// Grid rows counted.
    CountRows,
}

/// Open address sub-editor.
#[derive(Debug, Clone)]
struct AddressEditor {
    /// Field of the modal form hosting the editor.
    field: String,
    /// Values typed into the editor.
    values: BTreeMap<String, String>,
}

impl AddressEditor {
    /// Renders the one-line summary shown in the hosting field.
    fn summary(&self) -> String {
        [ADDRESS_LINE_FIELD, ADDRESS_CITY_FIELD, ADDRESS_COUNTRY_FIELD]
            .iter()
            .filter_map(|field| self.values.get(*field))
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

// ============================================================================
// SECTION: In-Memory UI
// ============================================================================

/// Simulated record-detail screen.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUi {
    /// Open record screen.
    visited: Option<(u32, RecordId)>,
    /// Selected detail tab.
    current_tab: Option<DetailTab>,
    /// Saved rows per tab.
    grids: BTreeMap<DetailTab, Vec<GridRow>>,
    /// Open modal form.
    form: Option<GridRow>,
    /// Open address sub-editor.
    address_editor: Option<AddressEditor>,
    /// Allowed options per lookup field; unrestricted when absent.
    lookup_options: BTreeMap<String, Vec<String>>,
    /// Recorded calls.
    actions: Vec<UiAction>,
}

impl InMemoryUi {
    /// Creates an empty screen.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts a lookup field to the given options.
    #[must_use]
    pub fn with_lookup_options<I, S>(mut self, field: &str, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lookup_options.insert(field.to_string(), options.into_iter().map(Into::into).collect());
        self
    }

    /// Returns recorded calls in order.
    #[must_use]
    pub fn actions(&self) -> &[UiAction] {
        &self.actions
    }

    /// Returns saved rows of a tab.
    #[must_use]
    pub fn rows(&self, tab: DetailTab) -> &[GridRow] {
        self.grids.get(&tab).map(Vec::as_slice).unwrap_or_default()
    }

    /// Returns the open record screen.
    #[must_use]
    pub fn visited(&self) -> Option<(u32, &RecordId)> {
        self.visited.as_ref().map(|(window_id, record_id)| (*window_id, record_id))
    }

    /// Returns the selected tab, requiring an open screen.
    fn require_tab(&self) -> Result<DetailTab, UiError> {
        if self.visited.is_none() {
            return Err(UiError::NotNavigated);
        }
        self.current_tab.ok_or(UiError::NoTabSelected)
    }

    /// Returns the map a scoped field is written into.
    fn scope_values(&mut self, scope: FieldScope) -> Result<&mut GridRow, UiError> {
        match scope {
            FieldScope::Modal => {
                if self.address_editor.is_some() {
                    return Err(UiError::EditorOpen);
                }
                self.form.as_mut().ok_or(UiError::NoOpenForm)
            }
            FieldScope::AddressEditor => self
                .address_editor
                .as_mut()
                .map(|editor| &mut editor.values)
                .ok_or(UiError::EditorClosed),
        }
    }
}

#[async_trait]
impl UiDriver for InMemoryUi {
    async fn visit_window(
        &mut self,
        window_id: u32,
        record_id: &RecordId,
    ) -> Result<(), UiError> {
        self.actions.push(UiAction::VisitWindow {
            window_id,
            record_id: record_id.clone(),
        });
        let same_record = self
            .visited
            .as_ref()
            .is_some_and(|(visited_window, visited_id)| {
                *visited_window == window_id && visited_id == record_id
            });
        if !same_record {
            self.grids.clear();
        }
        self.visited = Some((window_id, record_id.clone()));
        self.current_tab = None;
        self.form = None;
        self.address_editor = None;
        Ok(())
    }

    async fn select_tab(&mut self, tab: DetailTab) -> Result<(), UiError> {
        self.actions.push(UiAction::SelectTab(tab));
        if self.visited.is_none() {
            return Err(UiError::NotNavigated);
        }
        if self.form.is_some() {
            return Err(UiError::FormOpen);
        }
        self.current_tab = Some(tab);
        Ok(())
    }

    async fn press_add_new(&mut self) -> Result<(), UiError> {
        self.actions.push(UiAction::AddNew);
        self.require_tab()?;
        if self.form.is_some() {
            return Err(UiError::FormOpen);
        }
        self.form = Some(GridRow::new());
        Ok(())
    }

    async fn write_string_field(
        &mut self,
        field: &str,
        value: &str,
        scope: FieldScope,
    ) -> Result<(), UiError> {
        self.actions.push(UiAction::WriteString {
            field: field.to_string(),
            value: value.to_string(),
            scope,
        });
        self.scope_values(scope)?.insert(field.to_string(), value.to_string());
        Ok(())
    }

    async fn write_lookup_field(
        &mut self,
        field: &str,
        query: &str,
        expected: &str,
        scope: FieldScope,
    ) -> Result<(), UiError> {
        self.actions.push(UiAction::WriteLookup {
            field: field.to_string(),
            value: expected.to_string(),
            scope,
        });
        if let Some(options) = self.lookup_options.get(field) {
            let offered = options.iter().any(|option| option == expected && option.contains(query));
            if !offered {
                return Err(UiError::UnknownOption {
                    field: field.to_string(),
                    value: expected.to_string(),
                });
            }
        }
        self.scope_values(scope)?.insert(field.to_string(), expected.to_string());
        Ok(())
    }

    async fn click_form_title(&mut self) -> Result<(), UiError> {
        self.actions.push(UiAction::ClickFormTitle);
        if self.address_editor.is_some() {
            return Err(UiError::EditorOpen);
        }
        if self.form.is_none() {
            return Err(UiError::NoOpenForm);
        }
        Ok(())
    }

    async fn click_checkbox(
        &mut self,
        field: &str,
        expected: bool,
        scope: FieldScope,
    ) -> Result<(), UiError> {
        self.actions.push(UiAction::ClickCheckbox {
            field: field.to_string(),
        });
        let values = self.scope_values(scope)?;
        let checked = values.get(field).is_some_and(|value| value == "true");
        let toggled = !checked;
        values.insert(field.to_string(), toggled.to_string());
        if toggled != expected {
            return Err(UiError::UnexpectedValue {
                field: field.to_string(),
                expected: expected.to_string(),
                actual: toggled.to_string(),
            });
        }
        Ok(())
    }

    async fn open_address_editor(&mut self, field: &str) -> Result<(), UiError> {
        self.actions.push(UiAction::OpenAddressEditor {
            field: field.to_string(),
        });
        if self.address_editor.is_some() {
            return Err(UiError::EditorOpen);
        }
        if self.form.is_none() {
            return Err(UiError::NoOpenForm);
        }
        self.address_editor = Some(AddressEditor {
            field: field.to_string(),
            values: BTreeMap::new(),
        });
        Ok(())
    }

    async fn close_address_editor(&mut self) -> Result<(), UiError> {
        self.actions.push(UiAction::CloseAddressEditor);
        let editor = self.address_editor.take().ok_or(UiError::EditorClosed)?;
        let form = self.form.as_mut().ok_or(UiError::NoOpenForm)?;
        form.insert(editor.field.clone(), editor.summary());
        Ok(())
    }

    async fn address_summary(&mut self, field: &str) -> Result<String, UiError> {
        self.actions.push(UiAction::ReadAddressSummary {
            field: field.to_string(),
        });
        let form = self.form.as_ref().ok_or(UiError::NoOpenForm)?;
        Ok(form.get(field).cloned().unwrap_or_default())
    }

    async fn press_done(&mut self) -> Result<(), UiError> {
        self.actions.push(UiAction::PressDone);
        if self.address_editor.is_some() {
            return Err(UiError::EditorOpen);
        }
        let tab = self.require_tab()?;
        let row = self.form.take().ok_or(UiError::NoOpenForm)?;
        self.grids.entry(tab).or_default().push(row);
        Ok(())
    }

    async fn grid_row_count(&mut self) -> Result<usize, UiError> {
        self.actions.push(UiAction::CountRows);
        let tab = self.require_tab()?;
        Ok(self.rows(tab).len())
    }
}
