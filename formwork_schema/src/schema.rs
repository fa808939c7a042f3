// Copyright 2026 the Formwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Field schemas: one immutable descriptor per form field.

use core::fmt;

use bitflags::bitflags;
use formwork_value::Value;

use crate::field_type::FieldType;
use crate::options::{
    DateOptions, FileOptions, LocaleOptions, PasswordOptions, PhoneOptions, SelectOptions,
    TypeOptions, VariantOptions,
};

bitflags! {
    /// Behavioural flags shared by every field type.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct FieldFlags: u8 {
        /// The field ignores input.
        const DISABLED = 1 << 0;
        /// The field displays but rejects edits.
        const READ_ONLY = 1 << 1;
        /// The host should focus the field on mount.
        const AUTO_FOCUS = 1 << 2;
        /// The host should select the field's content on focus.
        const AUTO_SELECT = 1 << 3;
    }
}

/// Predicate from the live value tree to field visibility.
pub type VisibilityFn = Box<dyn Fn(&Value) -> bool + Send + Sync>;

/// Immutable descriptor of one form field.
///
/// Built once per form definition through the per-type constructors
/// ([`FieldSchema::text`], [`FieldSchema::single_date`], …) and the chained
/// setters. The descriptor never holds live state; the binding context
/// carries value, change channel, and error at render time.
pub struct FieldSchema {
    name: String,
    field_type: FieldType,
    label: Option<String>,
    placeholder: Option<String>,
    description: Option<String>,
    options: TypeOptions,
    flags: FieldFlags,
    visible_if: Option<VisibilityFn>,
}

impl FieldSchema {
    fn new(name: impl Into<String>, field_type: FieldType, options: TypeOptions) -> Self {
        Self {
            name: name.into(),
            field_type,
            label: None,
            placeholder: None,
            description: None,
            options,
            flags: FieldFlags::empty(),
            visible_if: None,
        }
    }

    /// A single-line text field.
    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Text, TypeOptions::None)
    }

    /// An email field.
    pub fn email(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Email, TypeOptions::None)
    }

    /// A numeric field.
    pub fn number(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Number, TypeOptions::None)
    }

    /// A password field with default options.
    pub fn password(name: impl Into<String>) -> Self {
        Self::new(
            name,
            FieldType::Password,
            TypeOptions::Password(PasswordOptions::default()),
        )
    }

    /// A multi-line text field.
    pub fn textarea(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Textarea, TypeOptions::None)
    }

    /// A checkbox field.
    pub fn checkbox(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Checkbox, TypeOptions::None)
    }

    /// A radio-group field.
    pub fn radio(name: impl Into<String>, options: SelectOptions) -> Self {
        Self::new(name, FieldType::Radio, TypeOptions::Select(options))
    }

    /// A dropdown select field.
    pub fn select(name: impl Into<String>, options: SelectOptions) -> Self {
        Self::new(name, FieldType::Select, TypeOptions::Select(options))
    }

    /// A multi-select field.
    pub fn multi_select(name: impl Into<String>, options: SelectOptions) -> Self {
        Self::new(name, FieldType::MultiSelect, TypeOptions::Select(options))
    }

    /// A single-date field.
    pub fn single_date(name: impl Into<String>, options: DateOptions) -> Self {
        Self::new(name, FieldType::SingleDate, TypeOptions::Date(options))
    }

    /// A date-range field.
    pub fn range_date(name: impl Into<String>, options: DateOptions) -> Self {
        Self::new(name, FieldType::RangeDate, TypeOptions::Date(options))
    }

    /// A phone field with default options.
    pub fn phone(name: impl Into<String>) -> Self {
        Self::new(
            name,
            FieldType::Phone,
            TypeOptions::Phone(PhoneOptions::default()),
        )
    }

    /// A variant-array field.
    pub fn variants(name: impl Into<String>, options: VariantOptions) -> Self {
        Self::new(name, FieldType::Variants, TypeOptions::Variants(options))
    }

    /// A localized-text field with the default locale set.
    pub fn localized_text(name: impl Into<String>) -> Self {
        Self::new(
            name,
            FieldType::LocalizedText,
            TypeOptions::Locales(LocaleOptions::default()),
        )
    }

    /// A rich-text field.
    pub fn rich_text(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::RichText, TypeOptions::None)
    }

    /// A single-file field with default limits.
    pub fn file(name: impl Into<String>) -> Self {
        Self::new(
            name,
            FieldType::File,
            TypeOptions::File(FileOptions::default()),
        )
    }

    /// A multi-file field with default limits.
    pub fn files(name: impl Into<String>) -> Self {
        Self::new(
            name,
            FieldType::Files,
            TypeOptions::File(FileOptions::default()),
        )
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

    /// Sets the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets behavioural flags.
    #[must_use]
    pub fn flags(mut self, flags: FieldFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Replaces the option payload. The payload variant must suit the
    /// field type; widgets fall back to family defaults on a mismatch.
    #[must_use]
    pub fn options(mut self, options: TypeOptions) -> Self {
        self.options = options;
        self
    }

    /// Sets the visibility predicate. Fields without one are always shown.
    #[must_use]
    pub fn visible_if(mut self, predicate: impl Fn(&Value) -> bool + Send + Sync + 'static) -> Self {
        self.visible_if = Some(Box::new(predicate));
        self
    }

    /// The dotted path this field binds to.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The field's tag.
    #[must_use]
    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    /// The label, if any.
    #[must_use]
    pub fn label_text(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// The placeholder, if any.
    #[must_use]
    pub fn placeholder_text(&self) -> Option<&str> {
        self.placeholder.as_deref()
    }

    /// The description, if any.
    #[must_use]
    pub fn description_text(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// The behavioural flags.
    #[must_use]
    pub fn field_flags(&self) -> FieldFlags {
        self.flags
    }

    /// The raw option payload.
    #[must_use]
    pub fn type_options(&self) -> &TypeOptions {
        &self.options
    }

    /// Choice options, when the payload carries them.
    #[must_use]
    pub fn select_options(&self) -> Option<&SelectOptions> {
        match &self.options {
            TypeOptions::Select(o) => Some(o),
            _ => None,
        }
    }

    /// Date options, when the payload carries them.
    #[must_use]
    pub fn date_options(&self) -> Option<&DateOptions> {
        match &self.options {
            TypeOptions::Date(o) => Some(o),
            _ => None,
        }
    }

    /// File options, when the payload carries them.
    #[must_use]
    pub fn file_options(&self) -> Option<&FileOptions> {
        match &self.options {
            TypeOptions::File(o) => Some(o),
            _ => None,
        }
    }

    /// Variant options, when the payload carries them.
    #[must_use]
    pub fn variant_options(&self) -> Option<&VariantOptions> {
        match &self.options {
            TypeOptions::Variants(o) => Some(o),
            _ => None,
        }
    }

    /// Locale options, when the payload carries them.
    #[must_use]
    pub fn locale_options(&self) -> Option<&LocaleOptions> {
        match &self.options {
            TypeOptions::Locales(o) => Some(o),
            _ => None,
        }
    }

    /// Password options, when the payload carries them.
    #[must_use]
    pub fn password_options(&self) -> Option<&PasswordOptions> {
        match &self.options {
            TypeOptions::Password(o) => Some(o),
            _ => None,
        }
    }

    /// Phone options, when the payload carries them.
    #[must_use]
    pub fn phone_options(&self) -> Option<&PhoneOptions> {
        match &self.options {
            TypeOptions::Phone(o) => Some(o),
            _ => None,
        }
    }

    /// Evaluates the visibility predicate against the live tree snapshot.
    #[must_use]
    pub fn is_visible(&self, values: &Value) -> bool {
        match &self.visible_if {
            Some(predicate) => predicate(values),
            None => true,
        }
    }
}

impl fmt::Debug for FieldSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldSchema")
            .field("name", &self.name)
            .field("field_type", &self.field_type)
            .field("label", &self.label)
            .field("flags", &self.flags)
            .field("conditional", &self.visible_if.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Choice;

    #[test]
    fn constructors_pick_the_right_tag() {
        assert_eq!(FieldSchema::text("a").field_type(), FieldType::Text);
        assert_eq!(FieldSchema::files("a").field_type(), FieldType::Files);
        assert_eq!(
            FieldSchema::localized_text("a").field_type(),
            FieldType::LocalizedText
        );
    }

    #[test]
    fn default_visibility_is_always_visible() {
        let field = FieldSchema::text("a");
        assert!(field.is_visible(&Value::object()));
        assert!(field.is_visible(&Value::Null));
    }

    #[test]
    fn visibility_reads_the_live_tree() {
        let field = FieldSchema::text("details").visible_if(|values| {
            values
                .as_object()
                .and_then(|m| m.get("show"))
                .and_then(Value::as_bool)
                .unwrap_or(false)
        });

        assert!(!field.is_visible(&Value::object()));
        let tree = Value::object_from([("show", Value::Bool(true))]);
        assert!(field.is_visible(&tree));
    }

    #[test]
    fn option_accessors_match_payload() {
        let select = FieldSchema::select(
            "color",
            SelectOptions {
                choices: vec![Choice::new("r", "Red")],
                ..SelectOptions::default()
            },
        );
        assert_eq!(select.select_options().unwrap().choices.len(), 1);
        assert!(select.date_options().is_none());

        let file = FieldSchema::file("doc");
        assert_eq!(file.file_options().unwrap().max_size_mb, 10);
    }

    #[test]
    fn debug_omits_the_predicate() {
        let field = FieldSchema::text("a").visible_if(|_| true);
        let dump = format!("{field:?}");
        assert!(dump.contains("conditional: true"));
    }
}
