// Copyright 2026 the Formwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Declarative, host-agnostic widget output.

/// One selectable entry of a [`Ui::ChoiceList`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceItem {
    /// Committed value.
    pub value: String,
    /// User-visible label.
    pub label: String,
}

/// One stored file shown in a [`Ui::FileDrop`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Display name.
    pub name: String,
    /// Size in bytes (0 when unknown, e.g. remote URLs).
    pub size: u64,
    /// Media type (may be empty).
    pub mime: String,
    /// Display URL (object URL or remote URL).
    pub url: String,
    /// Image preview URL, when one exists.
    pub preview: Option<String>,
}

/// A fragment of rendered form UI.
///
/// The host rendering capability turns this tree into visible widgets;
/// layout, styling, and accessibility semantics are its concern. Hosts may
/// lazy-load heavy fragments (the calendar in particular) behind their own
/// placeholder convention — the tree is plain data and does not care when
/// it gets realized.
#[derive(Debug, Clone, PartialEq)]
pub enum Ui {
    /// A labeled field wrapper with an optional error line.
    Field {
        /// The field label.
        label: Option<String>,
        /// The field-level error message.
        error: Option<String>,
        /// The field body.
        body: Box<Ui>,
    },
    /// Static text (locale tags, country rows, hints).
    Text(String),
    /// A transient, user-visible notice (e.g. an oversized-file warning).
    Notice(String),
    /// A text input.
    TextInput {
        /// Current display text.
        value: String,
        /// Placeholder shown when empty.
        placeholder: Option<String>,
        /// Masked entry (password).
        masked: bool,
        /// Multi-line entry (textarea, rich text).
        multiline: bool,
        /// Input ignores edits.
        disabled: bool,
        /// Input displays but rejects edits.
        read_only: bool,
    },
    /// A boolean toggle.
    Checkbox {
        /// Current state.
        checked: bool,
        /// Toggle ignores edits.
        disabled: bool,
    },
    /// A single- or multiple-choice list.
    ChoiceList {
        /// The selectable entries.
        choices: Vec<ChoiceItem>,
        /// Currently selected values.
        selected: Vec<String>,
        /// Whether multiple entries may be selected.
        multiple: bool,
    },
    /// A popover anchored to a trigger.
    Popover {
        /// Whether the popover is open.
        open: bool,
        /// Trigger text (display value or placeholder).
        trigger: String,
        /// Popover content, meaningful while open.
        body: Vec<Ui>,
    },
    /// A calendar surface. Hosts typically lazy-load this one.
    Calendar {
        /// Staged day (or range start), `%Y-%m-%d` in the display zone.
        staged: Option<String>,
        /// Staged range end, for range mode.
        staged_end: Option<String>,
        /// Whether the calendar picks a range.
        range: bool,
    },
    /// A file drop/upload zone with its stored entries.
    FileDrop {
        /// Stored files, in order.
        entries: Vec<FileEntry>,
        /// Constraint hint ("max 10 MB per file · up to 20 files").
        hint: String,
        /// Whether multiple files are accepted.
        multiple: bool,
    },
    /// An action button (popover confirm/close/reset, row add/remove).
    Button {
        /// Button label.
        label: String,
    },
    /// An ordered group of fragments.
    Group(Vec<Ui>),
}

impl Ui {
    /// A plain single-line text input with the given value and placeholder.
    #[must_use]
    pub fn text_input(value: String, placeholder: Option<String>) -> Self {
        Self::TextInput {
            value,
            placeholder,
            masked: false,
            multiline: false,
            disabled: false,
            read_only: false,
        }
    }

    /// Wraps a body in a [`Ui::Field`].
    #[must_use]
    pub fn field(label: Option<String>, error: Option<String>, body: Self) -> Self {
        Self::Field {
            label,
            error,
            body: Box::new(body),
        }
    }
}
