// Copyright 2026 the Formwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The orchestrator: visibility filtering, render passes, event routing,
//! submit dispatch, and server-error redistribution.

use core::fmt;

use hashbrown::HashMap;

use formwork_defaults::{SchemaNode, resolve_defaults};
use formwork_registry::{
    BindingContext, FieldRegistry, FieldWidget, PreviewResources, RenderEnv, Ui, WidgetEvent,
};
use formwork_schema::FieldSchema;
use formwork_value::Value;
use tracing::{debug, error};

use crate::error::FormError;
use crate::store::FormStore;
use crate::submit::SubmitHandler;

/// What a submit attempt produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The backend accepted the payload.
    Accepted,
    /// The backend rejected it with per-field errors, now attached to the
    /// store. Carries the paths that received one.
    Rejected {
        /// Paths that received a server error, in application order.
        fields: Vec<String>,
    },
}

/// A declared form: schemas, registry, store, and live widget instances.
///
/// Widgets are instantiated through the registry the first time their
/// field renders (or receives an event) and live until their field turns
/// invisible, the form resets, or teardown.
/// The store stays the single writer of the value tree: widgets stage at
/// most one commit per event and the orchestrator applies it.
pub struct Form {
    fields: Vec<FieldSchema>,
    registry: FieldRegistry,
    store: FormStore,
    widgets: HashMap<String, Box<dyn FieldWidget>>,
    resources: Box<dyn PreviewResources>,
}

impl fmt::Debug for Form {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Form")
            .field("fields", &self.fields)
            .field("store", &self.store)
            .field("widgets", &self.widgets.len())
            .finish_non_exhaustive()
    }
}

impl Form {
    /// Creates a form whose live tree starts at the given defaults.
    #[must_use]
    pub fn new(
        fields: Vec<FieldSchema>,
        registry: FieldRegistry,
        defaults: Value,
        resources: Box<dyn PreviewResources>,
    ) -> Self {
        Self {
            fields,
            registry,
            store: FormStore::new(defaults),
            widgets: HashMap::new(),
            resources,
        }
    }

    /// Creates a form with defaults resolved from a validation schema,
    /// plus per-field overrides (e.g. a record being edited).
    #[must_use]
    pub fn with_schema_defaults(
        fields: Vec<FieldSchema>,
        registry: FieldRegistry,
        schema: &SchemaNode,
        overrides: impl IntoIterator<Item = (String, Value)>,
        resources: Box<dyn PreviewResources>,
    ) -> Self {
        Self::new(fields, registry, resolve_defaults(schema, overrides), resources)
    }

    /// The form-state container.
    #[must_use]
    pub fn store(&self) -> &FormStore {
        &self.store
    }

    /// Mutable access to the form-state container.
    pub fn store_mut(&mut self) -> &mut FormStore {
        &mut self.store
    }

    /// The declared field schemas.
    #[must_use]
    pub fn fields(&self) -> &[FieldSchema] {
        &self.fields
    }

    fn binding_for(store: &FormStore, name: &str) -> BindingContext {
        BindingContext::new(
            store.value(name).cloned().unwrap_or(Value::Null),
            store.error(name).cloned(),
        )
    }

    /// Renders every currently visible field, in declaration order.
    ///
    /// Visibility predicates evaluate against the live tree, so a commit
    /// from the previous event can reveal or hide fields in this pass.
    /// A field that turns invisible has its widget torn down, releasing
    /// any host resources; its committed value stays in the store, so a
    /// later reveal rehydrates a fresh widget from it.
    /// Each body is wrapped in a [`Ui::Field`] carrying the label and the
    /// field's current error message. An unregistered tag aborts the pass.
    pub fn render_pass(&mut self) -> Result<Vec<(String, Ui)>, FormError> {
        let mut out = Vec::with_capacity(self.fields.len());
        for schema in &self.fields {
            if !schema.is_visible(self.store.values()) {
                if let Some(mut widget) = self.widgets.remove(schema.name()) {
                    debug!(field = schema.name(), "field hidden, tearing down its widget");
                    widget.teardown(self.resources.as_mut());
                }
                continue;
            }
            let name = schema.name().to_owned();
            if !self.widgets.contains_key(&name) {
                let widget = self.registry.instantiate(schema)?;
                self.widgets.insert(name.clone(), widget);
            }
            let ctx = Self::binding_for(&self.store, &name);
            let mut env =
                RenderEnv::with_errors(&self.registry, self.resources.as_mut(), &self.store);
            // Just inserted above when missing.
            let Some(widget) = self.widgets.get_mut(&name) else {
                continue;
            };
            let body = widget.render(schema, &ctx, &mut env)?;
            let ui = Ui::field(
                schema.label_text().map(str::to_owned),
                ctx.error().map(|e| e.message.clone()),
                body,
            );
            out.push((name, ui));
        }
        Ok(out)
    }

    /// Routes an event to the named field's widget and applies its commit,
    /// if any, to the store. A commit clears the field's current error.
    pub fn dispatch(&mut self, name: &str, event: WidgetEvent) -> Result<(), FormError> {
        let Some(schema) = self.fields.iter().find(|f| f.name() == name) else {
            return Err(FormError::UnknownField(name.to_owned()));
        };
        if !self.widgets.contains_key(name) {
            let widget = self.registry.instantiate(schema)?;
            self.widgets.insert(name.to_owned(), widget);
        }

        let mut ctx = Self::binding_for(&self.store, name);
        {
            let mut env =
                RenderEnv::with_errors(&self.registry, self.resources.as_mut(), &self.store);
            let Some(widget) = self.widgets.get_mut(name) else {
                return Ok(());
            };
            widget.handle(event, schema, &mut ctx, &mut env)?;
        }

        if let Some(value) = ctx.take_commit() {
            debug!(field = name, "applying commit");
            self.store.set_value(name, value)?;
            self.store.clear_error(name);
        }
        Ok(())
    }

    /// Snapshots the value tree and hands it to the submit capability.
    ///
    /// Stale server errors clear first. On failure, a structured error
    /// map (explicit or parsed out of the message) redistributes onto the
    /// store; an unstructured failure is logged and surfaced as
    /// [`FormError::Submit`], never dropped.
    pub fn submit(&mut self, handler: &mut dyn SubmitHandler) -> Result<SubmitOutcome, FormError> {
        self.store.clear_server_errors();
        let payload = self.store.values().clone();
        match handler.submit(&payload) {
            Ok(()) => Ok(SubmitOutcome::Accepted),
            Err(failure) => match failure.field_errors() {
                Some(errors) => {
                    let fields = self.store.apply_server_errors(errors);
                    debug!(count = fields.len(), "redistributed server errors");
                    Ok(SubmitOutcome::Rejected { fields })
                }
                None => {
                    let message = failure.message_text().to_owned();
                    error!(message, "submit failed without a field error map");
                    Err(FormError::Submit { message })
                }
            },
        }
    }

    /// Restores the defaults snapshot, clears errors, and drops every
    /// widget instance (releasing their resources). The next render pass
    /// instantiates fresh widgets over the restored tree.
    pub fn reset(&mut self) {
        self.teardown();
        self.store.reset();
    }

    /// Tears down every live widget, releasing held host resources.
    pub fn teardown(&mut self) {
        for (_, mut widget) in self.widgets.drain() {
            widget.teardown(self.resources.as_mut());
        }
    }
}
