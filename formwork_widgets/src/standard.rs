// Copyright 2026 the Formwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The standard registry: every tag of the closed enumeration mapped to
//! its built-in widget.

use formwork_registry::{FieldRegistry, FieldWidget};
use formwork_schema::{FieldSchema, FieldType, MultiSelectStyle, PasswordOptions};

use crate::choice::{CheckboxWidget, ChoiceWidget, MultiSelectWidget};
use crate::date::{DateMode, DateWidget};
use crate::file::FileWidget;
use crate::localized::LocalizedWidget;
use crate::phone::PhoneWidget;
use crate::text::{NumberWidget, PasswordWidget, TextKind, TextWidget};
use crate::variants::VariantWidget;

fn boxed(widget: impl FieldWidget + 'static) -> Box<dyn FieldWidget> {
    Box::new(widget)
}

/// Builds a registry covering every built-in field type.
///
/// Hosts extend or override entries by registering over them; an
/// application that never constructs a tag is free to leave its entry in
/// place, since unreferenced renderers cost nothing.
#[must_use]
pub fn standard_registry() -> FieldRegistry {
    let mut registry = FieldRegistry::new();

    registry.register(FieldType::Text, |_: &FieldSchema| {
        boxed(TextWidget::new(TextKind::Plain))
    });
    registry.register(FieldType::Email, |_: &FieldSchema| {
        boxed(TextWidget::new(TextKind::Email))
    });
    registry.register(FieldType::Textarea, |_: &FieldSchema| {
        boxed(TextWidget::new(TextKind::Multiline))
    });
    registry.register(FieldType::RichText, |_: &FieldSchema| {
        boxed(TextWidget::new(TextKind::Rich))
    });
    registry.register(FieldType::Number, |_: &FieldSchema| boxed(NumberWidget));
    registry.register(FieldType::Password, |schema: &FieldSchema| {
        let toggle = schema
            .password_options()
            .map_or_else(|| PasswordOptions::default().toggle, |o| o.toggle);
        boxed(PasswordWidget::new(toggle))
    });
    registry.register(FieldType::Checkbox, |_: &FieldSchema| boxed(CheckboxWidget));
    registry.register(FieldType::Radio, |_: &FieldSchema| boxed(ChoiceWidget));
    registry.register(FieldType::Select, |_: &FieldSchema| boxed(ChoiceWidget));
    registry.register(FieldType::MultiSelect, |schema: &FieldSchema| {
        let style = schema.select_options().map_or_else(MultiSelectStyle::default, |o| o.style);
        boxed(MultiSelectWidget::new(style))
    });
    registry.register(FieldType::SingleDate, |schema: &FieldSchema| {
        boxed(DateWidget::new(DateMode::Single, schema.date_options()))
    });
    registry.register(FieldType::RangeDate, |schema: &FieldSchema| {
        boxed(DateWidget::new(DateMode::Range, schema.date_options()))
    });
    registry.register(FieldType::Phone, |schema: &FieldSchema| {
        boxed(PhoneWidget::new(schema.phone_options()))
    });
    registry.register(FieldType::Variants, |schema: &FieldSchema| {
        boxed(VariantWidget::new(schema.variant_options()))
    });
    registry.register(FieldType::LocalizedText, |schema: &FieldSchema| {
        boxed(LocalizedWidget::new(schema.locale_options()))
    });
    registry.register(FieldType::File, |schema: &FieldSchema| {
        boxed(FileWidget::new(false, schema.file_options()))
    });
    registry.register(FieldType::Files, |schema: &FieldSchema| {
        boxed(FileWidget::new(true, schema.file_options()))
    });

    debug_assert!(registry.is_complete());
    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_tag_resolves() {
        let registry = standard_registry();
        assert!(registry.is_complete());
        for tag in FieldType::ALL {
            assert!(registry.resolve(tag).is_ok(), "missing renderer for {tag}");
        }
    }

    #[test]
    fn instantiation_honours_schema_options() {
        let registry = standard_registry();
        let schema = FieldSchema::files("attachments");
        assert!(registry.instantiate(&schema).is_ok());
    }
}
