// Copyright 2026 the Formwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Formwork Schema: static descriptors for form fields.
//!
//! A form definition is a list of [`FieldSchema`] values, each naming a
//! dotted path into the shared value tree, a tag from the closed
//! [`FieldType`] enumeration, and a type-specific option payload. Schemas
//! are created once per form definition and never mutated; per-render state
//! (current value, change channel, validation error) travels separately in
//! a binding context.
//!
//! Visibility is a pure predicate over the live value tree, evaluated on
//! every render pass, so one field can show or hide in reaction to any
//! other field's value.
//!
//! ## Minimal example
//!
//! ```rust
//! use formwork_schema::{FieldSchema, FieldType};
//! use formwork_value::Value;
//!
//! let field = FieldSchema::text("company.name")
//!     .label("Company")
//!     .placeholder("Acme Inc.")
//!     .visible_if(|values| {
//!         values
//!             .as_object()
//!             .and_then(|m| m.get("kind"))
//!             .and_then(Value::as_text)
//!             == Some("business")
//!     });
//!
//! assert_eq!(field.field_type(), FieldType::Text);
//! assert!(!field.is_visible(&Value::object()));
//! ```

mod field_type;
mod options;
mod schema;

pub use field_type::FieldType;
pub use options::{
    Choice, DateLabels, DateOptions, FileOptions, LocaleOptions, MultiSelectStyle,
    PasswordOptions, PhoneOptions, SchemaError, SelectOptions, TypeOptions, VariantOptions,
    VariantSpec,
};
pub use schema::{FieldFlags, FieldSchema};
