// Copyright 2026 the Formwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Type-specific option payloads for field schemas.

use smallvec::SmallVec;

use crate::field_type::FieldType;

/// Errors from constructing schema payloads.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// File-upload tags are not allowed as variant sub-fields.
    #[error("variant sub-field `{name}` may not use file type `{field_type}`")]
    FileInVariant {
        /// The offending sub-field name.
        name: String,
        /// The rejected tag.
        field_type: FieldType,
    },
}

/// One selectable option of a choice field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    /// The committed value.
    pub value: String,
    /// The user-visible label.
    pub label: String,
}

impl Choice {
    /// Creates a choice.
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Presentation of a multi-select field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MultiSelectStyle {
    /// A flat checkbox list.
    #[default]
    Normal,
    /// A searchable popover.
    Popover,
}

/// Options for radio, select, and multi-select fields.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectOptions {
    /// The selectable choices.
    pub choices: Vec<Choice>,
    /// Presentation style; only meaningful for multi-select.
    pub style: MultiSelectStyle,
}

/// Button labels for the date popover.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DateLabels {
    /// Label for the reset action.
    pub reset: Option<String>,
    /// Label for the close-without-committing action.
    pub close: Option<String>,
    /// Label for the confirm action.
    pub confirm: Option<String>,
}

/// Options for single- and range-date fields.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DateOptions {
    /// Display timezone: `"UTC"` or a fixed offset like `"+03:00"`.
    /// Unset means the runtime's ambient timezone.
    pub timezone: Option<String>,
    /// Display locale hint, passed through to the host calendar.
    pub locale: Option<String>,
    /// Popover button labels.
    pub labels: DateLabels,
}

/// Options for file-upload fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOptions {
    /// Accepted media types, host syntax (`"image/*"`). `None` accepts all.
    pub accept: Option<String>,
    /// Per-file size limit in megabytes.
    pub max_size_mb: u64,
    /// Upper bound on the stored file list in multi mode.
    pub max_files: usize,
}

impl Default for FileOptions {
    fn default() -> Self {
        Self {
            accept: None,
            max_size_mb: 10,
            max_files: 20,
        }
    }
}

/// One sub-field of a variant record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantSpec {
    /// Key within each record.
    pub name: String,
    /// User-visible label.
    pub label: Option<String>,
    /// Placeholder text.
    pub placeholder: Option<String>,
    /// Sub-field tag. File tags are rejected at construction.
    pub field_type: FieldType,
}

impl VariantSpec {
    /// Creates a sub-field spec, rejecting file tags.
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Result<Self, SchemaError> {
        let name = name.into();
        if field_type.is_file() {
            return Err(SchemaError::FileInVariant { name, field_type });
        }
        Ok(Self {
            name,
            label: None,
            placeholder: None,
            field_type,
        })
    }

    /// Sets the label.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Sets the placeholder.
    #[must_use]
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }
}

/// Options for variant-array fields.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VariantOptions {
    /// The fixed sub-field schema every record follows.
    pub specs: SmallVec<[VariantSpec; 4]>,
    /// Label for the append action.
    pub add_label: Option<String>,
    /// Label for the remove action.
    pub remove_label: Option<String>,
}

/// Options for localized-text fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleOptions {
    /// Locale codes, each keying one sub-input.
    pub locales: SmallVec<[String; 4]>,
}

impl Default for LocaleOptions {
    fn default() -> Self {
        Self {
            locales: SmallVec::from_iter(["en".to_owned(), "ar".to_owned()]),
        }
    }
}

/// Options for password fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordOptions {
    /// Whether the reveal toggle is offered.
    pub toggle: bool,
}

impl Default for PasswordOptions {
    fn default() -> Self {
        Self { toggle: true }
    }
}

/// Options for phone fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneOptions {
    /// Default country, ISO 3166 alpha-2.
    pub country: String,
}

impl Default for PhoneOptions {
    fn default() -> Self {
        Self {
            country: "SA".to_owned(),
        }
    }
}

/// The variant-specific payload of a field schema.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum TypeOptions {
    /// No payload (text-family, checkbox, …).
    #[default]
    None,
    /// Choice fields.
    Select(SelectOptions),
    /// Date fields.
    Date(DateOptions),
    /// File fields.
    File(FileOptions),
    /// Variant arrays.
    Variants(VariantOptions),
    /// Localized text.
    Locales(LocaleOptions),
    /// Password.
    Password(PasswordOptions),
    /// Phone.
    Phone(PhoneOptions),
}
