// Copyright 2026 the Formwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The field registry and dynamic dispatch.

use core::fmt;

use formwork_schema::{FieldSchema, FieldType};
use hashbrown::HashMap;
use tracing::debug;

use crate::binding::{BindingContext, ErrorLookup, NoErrors};
use crate::error::{DispatchError, WidgetError};
use crate::event::WidgetEvent;
use crate::resources::PreviewResources;
use crate::ui::Ui;

/// Shared environment handed to widgets on render and event dispatch.
///
/// Carries the registry (composite widgets dispatch their sub-fields
/// through it), the preview-resource capability (file widgets allocate
/// and release display resources through it), and an error lookup keyed
/// by full dotted path (composite widgets fetch their sub-fields' errors
/// through it).
pub struct RenderEnv<'a> {
    /// The registry dispatching this render pass.
    pub registry: &'a FieldRegistry,
    /// Display/preview resource allocator.
    pub resources: &'a mut dyn PreviewResources,
    /// Field errors by dotted path.
    pub errors: &'a dyn ErrorLookup,
}

impl<'a> RenderEnv<'a> {
    /// Creates an environment with no error source.
    pub fn new(registry: &'a FieldRegistry, resources: &'a mut dyn PreviewResources) -> Self {
        Self::with_errors(registry, resources, &NoErrors)
    }

    /// Creates an environment backed by a form-state container's errors.
    pub fn with_errors(
        registry: &'a FieldRegistry,
        resources: &'a mut dyn PreviewResources,
        errors: &'a dyn ErrorLookup,
    ) -> Self {
        Self {
            registry,
            resources,
            errors,
        }
    }
}

impl fmt::Debug for RenderEnv<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderEnv")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

/// A live widget instance bound to one field.
///
/// Instances own the field's private interaction state — popover open
/// flags, staged values, stored file lists — and convert between the
/// external value representation and their display representation. They
/// never write the shared tree directly; commits go through the binding
/// context's staged slot.
pub trait FieldWidget {
    /// Produces the widget's declarative output for the current binding.
    ///
    /// Takes `&mut self` because rendering is also where widgets reconcile
    /// local state against an externally changed value (hydration).
    fn render(
        &mut self,
        schema: &FieldSchema,
        ctx: &BindingContext,
        env: &mut RenderEnv<'_>,
    ) -> Result<Ui, WidgetError>;

    /// Applies one interaction event, possibly staging a commit on `ctx`.
    fn handle(
        &mut self,
        event: WidgetEvent,
        schema: &FieldSchema,
        ctx: &mut BindingContext,
        env: &mut RenderEnv<'_>,
    ) -> Result<(), WidgetError>;

    /// Releases owned host resources. Called when the widget is dropped
    /// from the form (teardown, reset).
    fn teardown(&mut self, resources: &mut dyn PreviewResources) {
        let _ = resources;
    }
}

/// A renderer capability: instantiates widget state for a bound field.
///
/// Implemented for closures, so registration reads as a factory:
///
/// ```rust,ignore
/// registry.register(FieldType::Checkbox, |_schema| {
///     Box::new(CheckboxWidget::default()) as Box<dyn FieldWidget>
/// });
/// ```
pub trait FieldRenderer {
    /// Creates the per-field widget instance for `schema`.
    fn instantiate(&self, schema: &FieldSchema) -> Box<dyn FieldWidget>;
}

impl<F> FieldRenderer for F
where
    F: Fn(&FieldSchema) -> Box<dyn FieldWidget>,
{
    fn instantiate(&self, schema: &FieldSchema) -> Box<dyn FieldWidget> {
        self(schema)
    }
}

/// Static mapping from field-type tag to renderer capability.
///
/// Built once at startup and read-only afterwards. A complete registry
/// carries an entry for every [`FieldType`] tag; [`FieldRegistry::resolve`]
/// fails loudly for anything missing. Re-registering a tag replaces the
/// entry, which is the extension point for hosts overriding a stock widget.
#[derive(Default)]
pub struct FieldRegistry {
    entries: HashMap<FieldType, Box<dyn FieldRenderer>>,
}

impl FieldRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or replaces) the renderer for a tag.
    pub fn register(&mut self, tag: FieldType, renderer: impl FieldRenderer + 'static) {
        self.entries.insert(tag, Box::new(renderer));
    }

    /// Looks up the renderer for a tag.
    pub fn resolve(&self, tag: FieldType) -> Result<&dyn FieldRenderer, DispatchError> {
        self.entries
            .get(&tag)
            .map(AsRef::as_ref)
            .ok_or(DispatchError::UnknownFieldType(tag))
    }

    /// Dispatches: resolves the renderer for the schema's tag and
    /// delegates instantiation. No logic of its own beyond the lookup.
    pub fn instantiate(&self, schema: &FieldSchema) -> Result<Box<dyn FieldWidget>, DispatchError> {
        let renderer = self.resolve(schema.field_type())?;
        debug!(field = schema.name(), tag = %schema.field_type(), "instantiating widget");
        Ok(renderer.instantiate(schema))
    }

    /// Number of registered tags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no tags are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if every tag of the closed enumeration has an entry.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        FieldType::ALL.iter().all(|tag| self.entries.contains_key(tag))
    }
}

impl fmt::Debug for FieldRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tags: Vec<_> = self.entries.keys().map(|t| t.as_str()).collect();
        tags.sort_unstable();
        f.debug_struct("FieldRegistry")
            .field("count", &self.entries.len())
            .field("tags", &tags)
            .finish()
    }
}
