// Copyright 2026 the Formwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Formwork Registry: field renderer capabilities and dynamic dispatch.
//!
//! The registry is a read-only mapping from every tag of the closed
//! [`FieldType`](formwork_schema::FieldType) enumeration to a
//! [`FieldRenderer`] capability. Dispatch does a lookup and delegates —
//! nothing more — so adding a field type means adding one registry entry
//! and one widget implementation.
//!
//! Per-field state lives in [`FieldWidget`] instances, created through the
//! renderer capability and owned by the orchestrator: the same contract a
//! host framework provides by keeping component state across renders, made
//! explicit. Widgets receive an ephemeral [`BindingContext`] (committed
//! value, error, commit slot) per render or event and express their output
//! as a host-agnostic [`Ui`] tree.
//!
//! A missing registry entry is a programming error and fails loudly as
//! [`DispatchError::UnknownFieldType`]; a field is never silently rendered
//! as nothing.
//!
//! ## Minimal example
//!
//! ```rust
//! use formwork_registry::{
//!     BindingContext, FieldRegistry, FieldWidget, RenderEnv, Ui, UrlAllocator, WidgetError,
//!     WidgetEvent,
//! };
//! use formwork_schema::{FieldSchema, FieldType};
//! use formwork_value::Value;
//!
//! #[derive(Debug, Default)]
//! struct Echo;
//!
//! impl FieldWidget for Echo {
//!     fn render(
//!         &mut self,
//!         _schema: &FieldSchema,
//!         ctx: &BindingContext,
//!         _env: &mut RenderEnv<'_>,
//!     ) -> Result<Ui, WidgetError> {
//!         Ok(Ui::Text(ctx.value().display_text()))
//!     }
//!
//!     fn handle(
//!         &mut self,
//!         event: WidgetEvent,
//!         _schema: &FieldSchema,
//!         ctx: &mut BindingContext,
//!         _env: &mut RenderEnv<'_>,
//!     ) -> Result<(), WidgetError> {
//!         if let WidgetEvent::Input(text) = event {
//!             ctx.commit(Value::Text(text));
//!         }
//!         Ok(())
//!     }
//! }
//!
//! let mut registry = FieldRegistry::new();
//! registry.register(FieldType::Text, |_: &FieldSchema| {
//!     Box::new(Echo) as Box<dyn FieldWidget>
//! });
//!
//! let schema = FieldSchema::text("title");
//! let mut widget = registry.instantiate(&schema).unwrap();
//!
//! let mut resources = UrlAllocator::new();
//! let mut env = RenderEnv::new(&registry, &mut resources);
//! let ctx = BindingContext::new(Value::text("hello"), None);
//! assert_eq!(widget.render(&schema, &ctx, &mut env).unwrap(), Ui::Text("hello".into()));
//!
//! // Tags without an entry fail loudly.
//! assert!(registry.resolve(FieldType::Phone).is_err());
//! ```

mod binding;
mod error;
mod event;
mod registry;
mod resources;
mod ui;

pub use binding::{BindingContext, ErrorKind, ErrorLookup, FieldError, NoErrors};
pub use error::{DispatchError, WidgetError};
pub use event::WidgetEvent;
pub use registry::{FieldRegistry, FieldRenderer, FieldWidget, RenderEnv};
pub use resources::{PreviewResources, ResourceHandle, UrlAllocator};
pub use ui::{ChoiceItem, FileEntry, Ui};
