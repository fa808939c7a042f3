// Copyright 2026 the Formwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The closed field-type enumeration.

use core::fmt;

/// Tag identifying which renderer a field binds to.
///
/// This enumeration is closed: the field registry must carry an entry for
/// every tag, and dispatch fails loudly when one is missing. Adding a tag
/// here means adding one registry entry and one widget implementation —
/// dispatch logic never changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    /// Single-line text input.
    Text,
    /// Single-line text input with email affordances.
    Email,
    /// Numeric input committing a number value.
    Number,
    /// Masked input with a local reveal toggle.
    Password,
    /// Multi-line text input.
    Textarea,
    /// Boolean toggle.
    Checkbox,
    /// Single choice rendered as a radio group.
    Radio,
    /// Single choice rendered as a dropdown.
    Select,
    /// Multiple choice committing an array of selected values.
    MultiSelect,
    /// Single calendar day staged in a popover.
    SingleDate,
    /// `{from, to}` day pair staged in a popover.
    RangeDate,
    /// International phone number with a country picker.
    Phone,
    /// Dynamically sized array of sub-records.
    Variants,
    /// One text input per configured locale, committing an object.
    LocalizedText,
    /// Rich text, committed as its textual content.
    RichText,
    /// Single file upload.
    File,
    /// Multi-file upload.
    Files,
}

impl FieldType {
    /// Every tag in the closed enumeration, in declaration order.
    pub const ALL: [Self; 17] = [
        Self::Text,
        Self::Email,
        Self::Number,
        Self::Password,
        Self::Textarea,
        Self::Checkbox,
        Self::Radio,
        Self::Select,
        Self::MultiSelect,
        Self::SingleDate,
        Self::RangeDate,
        Self::Phone,
        Self::Variants,
        Self::LocalizedText,
        Self::RichText,
        Self::File,
        Self::Files,
    ];

    /// The snake_case tag name, as form definitions spell it.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Email => "email",
            Self::Number => "number",
            Self::Password => "password",
            Self::Textarea => "textarea",
            Self::Checkbox => "checkbox",
            Self::Radio => "radio",
            Self::Select => "select",
            Self::MultiSelect => "multi_select",
            Self::SingleDate => "single_date",
            Self::RangeDate => "range_date",
            Self::Phone => "phone",
            Self::Variants => "variants",
            Self::LocalizedText => "localized_text",
            Self::RichText => "rich_text",
            Self::File => "file",
            Self::Files => "files",
        }
    }

    /// Returns `true` for the file-upload tags, which are excluded from
    /// variant sub-fields.
    #[must_use]
    pub fn is_file(self) -> bool {
        matches!(self, Self::File | Self::Files)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_lists_every_tag_once() {
        for (i, a) in FieldType::ALL.iter().enumerate() {
            for b in &FieldType::ALL[i + 1..] {
                assert_ne!(a, b, "duplicate tag in ALL");
            }
        }
        assert_eq!(FieldType::ALL.len(), 17);
    }

    #[test]
    fn tag_names_are_snake_case() {
        for tag in FieldType::ALL {
            let name = tag.as_str();
            assert!(!name.is_empty(), "empty tag name");
            assert!(
                name.bytes().all(|b| b.is_ascii_lowercase() || b == b'_'),
                "unexpected character in `{name}`"
            );
        }
    }

    #[test]
    fn file_tags() {
        assert!(FieldType::File.is_file());
        assert!(FieldType::Files.is_file());
        assert!(!FieldType::Text.is_file());
    }
}
