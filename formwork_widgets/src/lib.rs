// Copyright 2026 the Formwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Formwork Widgets: the stock field widget family.
//!
//! One [`FieldWidget`](formwork_registry::FieldWidget) implementation per
//! tag of the closed field-type enumeration, plus [`standard_registry`],
//! which wires all of them into a complete
//! [`FieldRegistry`](formwork_registry::FieldRegistry).
//!
//! The interesting widgets own private interaction state and follow an
//! explicit commit/discard protocol: a popover's staged value or a file
//! list is a local edit buffer that is either merged into the shared value
//! tree (commit, through the binding context) or thrown away (discard).
//! The shared tree is never mutated incrementally mid-edit.
//!
//! - [`DateWidget`]: closed/open machine; staged day(s) in a display
//!   timezone, committed as RFC 3339 instants.
//! - [`FileWidget`]: stored-file list with owned display resources,
//!   released exactly once per resource.
//! - [`VariantWidget`]: dynamically sized record array whose sub-fields
//!   dispatch recursively through the registry.
//! - [`PhoneWidget`]: country picker with live search over a static dial
//!   table.
//!
//! The remaining tags (text family, checkbox, choices, localized text) are
//! thin stateless renderers.

mod choice;
mod date;
mod file;
mod localized;
mod phone;
mod standard;
mod text;
mod variants;

pub use choice::{CheckboxWidget, ChoiceWidget, MultiSelectWidget};
pub use date::{DateMode, DateWidget, StagedDates, Zone};
pub use file::{FileWidget, StoredFile};
pub use localized::LocalizedWidget;
pub use phone::{COUNTRIES, Country, PhoneWidget, find_country, search_countries};
pub use standard::standard_registry;
pub use text::{NumberWidget, PasswordWidget, TextKind, TextWidget};
pub use variants::VariantWidget;
