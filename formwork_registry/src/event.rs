// Copyright 2026 the Formwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The closed widget event vocabulary.

use formwork_value::FileHandle;

/// An interaction event routed to one field's widget.
///
/// Hosts translate raw input into these events and dispatch them through
/// the orchestrator. Each widget interprets the subset that makes sense for
/// it; events outside that subset are a routing bug and answered with
/// [`WidgetError::UnsupportedEvent`](crate::WidgetError::UnsupportedEvent).
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetEvent {
    /// Text typed into an input. Commits for the text family; stages the
    /// national number for phone.
    Input(String),
    /// Checkbox toggled.
    Toggle(bool),
    /// Password reveal toggled. Local state only, never a commit.
    ToggleReveal,
    /// Single choice picked (radio, select).
    Select(String),
    /// Multi-select membership toggled for the given choice value.
    ToggleChoice(String),
    /// Popover opened (date trigger, multi-select popover, country picker).
    OpenPicker,
    /// Popover dismissed without committing.
    ClosePicker,
    /// Popover search query edited.
    QueryChanged(String),
    /// Calendar day staged while the date popover is open, `%Y-%m-%d` in
    /// the display zone.
    StageDay(String),
    /// Calendar range staged, both ends `%Y-%m-%d` in the display zone.
    StageRange {
        /// Range start.
        from: String,
        /// Range end.
        to: String,
    },
    /// Staged date editing cleared (keeps the popover open).
    ClearStage,
    /// Date popover confirmed: staged value commits, popover closes.
    Confirm,
    /// Date field reset: staged cleared, empty value committed, closed.
    ResetValue,
    /// Files selected or dropped.
    AddFiles(Vec<FileHandle>),
    /// Stored file removed by index.
    RemoveFile(usize),
    /// Variant record appended.
    Append,
    /// Variant record removed by index.
    Remove(usize),
    /// Event for a sub-field of a variant record.
    Child {
        /// Record index.
        index: usize,
        /// Sub-field name within the record.
        name: String,
        /// The inner event.
        event: Box<WidgetEvent>,
    },
    /// Text typed into one locale's sub-input of a localized field.
    LocaleInput {
        /// The locale code.
        locale: String,
        /// The typed text.
        text: String,
    },
    /// Country picked in the phone widget, ISO 3166 alpha-2.
    SelectCountry(String),
}
