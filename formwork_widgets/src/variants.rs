// Copyright 2026 the Formwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Variant arrays: a growable list of records, each record rendering one
//! sub-widget per declared sub-field through the registry.
//!
//! The external value is an array of objects sharing one key set. The
//! widget keeps one row of child widgets per record, reconciled against
//! the array length on every render, and routes child events by
//! `(index, name)`. Child commits merge into the record and the whole
//! array commits upward, so the form-state container only ever sees the
//! complete value.

use core::fmt;

use formwork_registry::{
    BindingContext, DispatchError, FieldWidget, PreviewResources, RenderEnv, Ui, WidgetError,
    WidgetEvent,
};
use formwork_schema::{FieldSchema, FieldType, VariantOptions, VariantSpec};
use formwork_value::Value;
use smallvec::SmallVec;
use tracing::{debug, warn};

/// The variant-array widget.
pub struct VariantWidget {
    specs: SmallVec<[VariantSpec; 4]>,
    add_label: Option<String>,
    remove_label: Option<String>,
    child_schemas: Vec<FieldSchema>,
    rows: Vec<Vec<Box<dyn FieldWidget>>>,
}

impl fmt::Debug for VariantWidget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VariantWidget")
            .field("specs", &self.specs)
            .field("rows", &self.rows.len())
            .finish_non_exhaustive()
    }
}

impl VariantWidget {
    /// Creates a widget over the given sub-field specs.
    #[must_use]
    pub fn new(options: Option<&VariantOptions>) -> Self {
        let options = options.cloned().unwrap_or_default();
        let child_schemas = options.specs.iter().map(schema_for).collect();
        Self {
            specs: options.specs,
            add_label: options.add_label,
            remove_label: options.remove_label,
            child_schemas,
            rows: Vec::new(),
        }
    }

    /// Number of live rows.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// The empty record every appended row starts from.
    #[must_use]
    pub fn blank_record(&self) -> Value {
        Value::object_from(self.specs.iter().map(|spec| {
            let initial = match spec.field_type {
                FieldType::Number => Value::Number(0.0),
                FieldType::Checkbox => Value::Bool(false),
                _ => Value::empty_text(),
            };
            (spec.name.clone(), initial)
        }))
    }

    /// Reconciles the child-widget rows against the array length,
    /// instantiating missing rows and tearing down surplus ones.
    fn ensure_rows(&mut self, len: usize, env: &mut RenderEnv<'_>) -> Result<(), WidgetError> {
        while self.rows.len() > len {
            if let Some(mut row) = self.rows.pop() {
                for child in &mut row {
                    child.teardown(env.resources);
                }
            }
        }
        while self.rows.len() < len {
            let row = self
                .child_schemas
                .iter()
                .map(|schema| env.registry.instantiate(schema))
                .collect::<Result<Vec<_>, DispatchError>>()?;
            self.rows.push(row);
        }
        Ok(())
    }

    fn records(value: &Value) -> Vec<Value> {
        match value.as_array() {
            Some(items) => items.to_vec(),
            None => {
                if !value.is_empty() {
                    warn!(?value, "variant value is not an array, treating as empty");
                }
                Vec::new()
            }
        }
    }

    fn child_value(record: &Value, name: &str) -> Value {
        record
            .as_object()
            .and_then(|map| map.get(name))
            .cloned()
            .unwrap_or(Value::Null)
    }
}

fn schema_for(spec: &VariantSpec) -> FieldSchema {
    let schema = match spec.field_type {
        FieldType::Number => FieldSchema::number(&spec.name),
        FieldType::Email => FieldSchema::email(&spec.name),
        FieldType::Textarea => FieldSchema::textarea(&spec.name),
        FieldType::Checkbox => FieldSchema::checkbox(&spec.name),
        _ => FieldSchema::text(&spec.name),
    };
    let schema = match &spec.label {
        Some(label) => schema.label(label),
        None => schema,
    };
    match &spec.placeholder {
        Some(placeholder) => schema.placeholder(placeholder),
        None => schema,
    }
}

impl FieldWidget for VariantWidget {
    fn render(
        &mut self,
        schema: &FieldSchema,
        ctx: &BindingContext,
        env: &mut RenderEnv<'_>,
    ) -> Result<Ui, WidgetError> {
        let records = Self::records(ctx.value());
        self.ensure_rows(records.len(), env)?;

        let row_label = schema.label_text().unwrap_or(schema.name());
        let remove_label = self.remove_label.clone().unwrap_or_else(|| "Remove".to_owned());

        let base = schema.name();
        let mut fragments = Vec::with_capacity(records.len() + 1);
        for (index, record) in records.iter().enumerate() {
            let mut body = Vec::with_capacity(self.specs.len() + 1);
            body.push(Ui::Text(format!("{row_label} #{}", index + 1)));
            // Rows and child_schemas were reconciled to records.len() above.
            let row = &mut self.rows[index];
            for ((spec, child_schema), child) in
                self.specs.iter().zip(&self.child_schemas).zip(row.iter_mut())
            {
                // Sub-fields bind (and carry errors) at their full path.
                let error = env
                    .errors
                    .error_at(&format!("{base}.{index}.{}", spec.name))
                    .cloned();
                let child_ctx =
                    BindingContext::new(Self::child_value(record, &spec.name), error);
                let rendered = child.render(child_schema, &child_ctx, env)?;
                let message = child_ctx.error().map(|e| e.message.clone());
                body.push(Ui::field(spec.label.clone(), message, rendered));
            }
            body.push(Ui::Button {
                label: remove_label.clone(),
            });
            fragments.push(Ui::Group(body));
        }
        fragments.push(Ui::Button {
            label: self.add_label.clone().unwrap_or_else(|| "Add".to_owned()),
        });
        Ok(Ui::Group(fragments))
    }

    fn handle(
        &mut self,
        event: WidgetEvent,
        _schema: &FieldSchema,
        ctx: &mut BindingContext,
        env: &mut RenderEnv<'_>,
    ) -> Result<(), WidgetError> {
        let mut records = Self::records(ctx.value());
        self.ensure_rows(records.len(), env)?;

        match event {
            WidgetEvent::Append => {
                records.push(self.blank_record());
                ctx.commit(Value::Array(records));
                Ok(())
            }
            WidgetEvent::Remove(index) => {
                if index >= records.len() {
                    debug!(index, len = records.len(), "remove index out of range");
                    return Ok(());
                }
                records.remove(index);
                if let Some(mut row) = (index < self.rows.len()).then(|| self.rows.remove(index)) {
                    for child in &mut row {
                        child.teardown(env.resources);
                    }
                }
                ctx.commit(Value::Array(records));
                Ok(())
            }
            WidgetEvent::Child { index, name, event } => {
                let Some(position) = self.specs.iter().position(|s| s.name == name) else {
                    warn!(name, "child event for unknown sub-field, ignoring");
                    return Ok(());
                };
                if index >= records.len() {
                    debug!(index, len = records.len(), "child index out of range");
                    return Ok(());
                }

                let mut child_ctx =
                    BindingContext::new(Self::child_value(&records[index], &name), None);
                let child_schema = &self.child_schemas[position];
                self.rows[index][position].handle(*event, child_schema, &mut child_ctx, env)?;

                if let Some(committed) = child_ctx.take_commit() {
                    if let Value::Object(map) = &mut records[index] {
                        map.insert(name, committed);
                    } else {
                        let mut map = formwork_value::Map::new();
                        map.insert(name, committed);
                        records[index] = Value::Object(map);
                    }
                    ctx.commit(Value::Array(records));
                }
                Ok(())
            }
            _ => Err(WidgetError::UnsupportedEvent { widget: "variants" }),
        }
    }

    fn teardown(&mut self, resources: &mut dyn PreviewResources) {
        for row in &mut self.rows {
            for child in row {
                child.teardown(resources);
            }
        }
        self.rows.clear();
    }
}

#[cfg(test)]
mod tests {
    use formwork_registry::{FieldError, FieldRegistry, UrlAllocator};
    use hashbrown::HashMap;
    use pretty_assertions::assert_eq;
    use smallvec::smallvec;

    use crate::standard_registry;

    use super::*;

    fn options() -> VariantOptions {
        VariantOptions {
            specs: smallvec![
                VariantSpec::new("size", FieldType::Text).unwrap(),
                VariantSpec::new("price", FieldType::Number).unwrap(),
            ],
            add_label: Some("Add variant".to_owned()),
            remove_label: None,
        }
    }

    fn schema() -> FieldSchema {
        FieldSchema::variants("variants", options()).label("Variant")
    }

    fn run<R>(
        registry: &FieldRegistry,
        f: impl FnOnce(&mut RenderEnv<'_>) -> R,
    ) -> R {
        let mut resources = UrlAllocator::new();
        let mut env = RenderEnv::new(registry, &mut resources);
        f(&mut env)
    }

    #[test]
    fn append_commits_a_blank_record() {
        let registry = standard_registry();
        let schema = schema();
        let mut w = VariantWidget::new(schema.variant_options());
        let mut ctx = BindingContext::new(Value::Array(Vec::new()), None);

        run(&registry, |env| {
            w.handle(WidgetEvent::Append, &schema, &mut ctx, env)
        })
        .unwrap();

        assert_eq!(
            ctx.take_commit(),
            Some(Value::Array(vec![Value::object_from([
                ("size", Value::empty_text()),
                ("price", Value::Number(0.0)),
            ])]))
        );
    }

    #[test]
    fn child_event_merges_into_the_record() {
        let registry = standard_registry();
        let schema = schema();
        let mut w = VariantWidget::new(schema.variant_options());
        let initial = Value::Array(vec![w.blank_record(), w.blank_record()]);
        let mut ctx = BindingContext::new(initial, None);

        run(&registry, |env| {
            w.handle(
                WidgetEvent::Child {
                    index: 1,
                    name: "size".to_owned(),
                    event: Box::new(WidgetEvent::Input("XL".to_owned())),
                },
                &schema,
                &mut ctx,
                env,
            )
        })
        .unwrap();

        let committed = ctx.take_commit().unwrap();
        let records = committed.as_array().unwrap();
        assert_eq!(records[0], w.blank_record());
        assert_eq!(
            records[1],
            Value::object_from([
                ("size", Value::text("XL")),
                ("price", Value::Number(0.0)),
            ])
        );
    }

    #[test]
    fn remove_drops_the_row_and_commits() {
        let registry = standard_registry();
        let schema = schema();
        let mut w = VariantWidget::new(schema.variant_options());
        let mut first = w.blank_record();
        if let Value::Object(map) = &mut first {
            map.insert("size".to_owned(), Value::text("S"));
        }
        let mut ctx = BindingContext::new(Value::Array(vec![first, w.blank_record()]), None);

        run(&registry, |env| {
            w.handle(WidgetEvent::Remove(0), &schema, &mut ctx, env)
        })
        .unwrap();

        assert_eq!(w.row_count(), 1);
        assert_eq!(
            ctx.take_commit(),
            Some(Value::Array(vec![w.blank_record()]))
        );
    }

    #[test]
    fn rows_reconcile_to_the_array_length() {
        let registry = standard_registry();
        let schema = schema();
        let mut w = VariantWidget::new(schema.variant_options());
        let ctx = BindingContext::new(
            Value::Array(vec![w.blank_record(), w.blank_record(), w.blank_record()]),
            None,
        );

        let ui = run(&registry, |env| w.render(&schema, &ctx, env)).unwrap();
        assert_eq!(w.row_count(), 3);

        // Three row groups plus the trailing add button.
        let Ui::Group(fragments) = ui else {
            panic!("expected group")
        };
        assert_eq!(fragments.len(), 4);
        assert_eq!(
            fragments[3],
            Ui::Button {
                label: "Add variant".to_owned()
            }
        );

        let shrunk = BindingContext::new(Value::Array(vec![w.blank_record()]), None);
        run(&registry, |env| w.render(&schema, &shrunk, env)).unwrap();
        assert_eq!(w.row_count(), 1);
    }

    #[test]
    fn unknown_child_field_is_ignored() {
        let registry = standard_registry();
        let schema = schema();
        let mut w = VariantWidget::new(schema.variant_options());
        let mut ctx = BindingContext::new(Value::Array(vec![w.blank_record()]), None);

        run(&registry, |env| {
            w.handle(
                WidgetEvent::Child {
                    index: 0,
                    name: "color".to_owned(),
                    event: Box::new(WidgetEvent::Input("red".to_owned())),
                },
                &schema,
                &mut ctx,
                env,
            )
        })
        .unwrap();
        assert_eq!(ctx.take_commit(), None);
    }

    #[test]
    fn sub_field_errors_surface_on_the_owning_row() {
        let registry = standard_registry();
        let schema = schema();
        let mut w = VariantWidget::new(schema.variant_options());
        let ctx = BindingContext::new(
            Value::Array(vec![w.blank_record(), w.blank_record()]),
            None,
        );

        let mut errors = HashMap::new();
        errors.insert(
            "variants.0.size".to_owned(),
            FieldError::server("duplicate size"),
        );

        let mut resources = UrlAllocator::new();
        let mut env = RenderEnv::with_errors(&registry, &mut resources, &errors);
        let ui = w.render(&schema, &ctx, &mut env).unwrap();

        let Ui::Group(fragments) = ui else {
            panic!("expected group")
        };
        // Each row group is a header, one field per sub-field, then the
        // remove button.
        let Ui::Group(row) = &fragments[0] else {
            panic!("expected row group")
        };
        let Ui::Field { error, .. } = &row[1] else {
            panic!("expected field wrapper")
        };
        assert_eq!(error.as_deref(), Some("duplicate size"));

        // The same sub-field on the other row stays clean.
        let Ui::Group(row) = &fragments[1] else {
            panic!("expected row group")
        };
        let Ui::Field { error, .. } = &row[1] else {
            panic!("expected field wrapper")
        };
        assert_eq!(*error, None);
    }

    #[test]
    fn append_after_remove_starts_from_a_blank_record() {
        let registry = standard_registry();
        let schema = schema();
        let mut w = VariantWidget::new(schema.variant_options());
        let mut first = w.blank_record();
        if let Value::Object(map) = &mut first {
            map.insert("size".to_owned(), Value::text("S"));
        }
        let mut survivor = w.blank_record();
        if let Value::Object(map) = &mut survivor {
            map.insert("size".to_owned(), Value::text("M"));
        }
        let mut ctx = BindingContext::new(Value::Array(vec![first, survivor.clone()]), None);

        run(&registry, |env| {
            w.handle(WidgetEvent::Remove(0), &schema, &mut ctx, env)
        })
        .unwrap();
        let after_remove = ctx.take_commit().unwrap();
        assert_eq!(after_remove, Value::Array(vec![survivor.clone()]));
        assert_eq!(w.row_count(), 1);

        let mut ctx = BindingContext::new(after_remove, None);
        run(&registry, |env| {
            w.handle(WidgetEvent::Append, &schema, &mut ctx, env)
        })
        .unwrap();

        // The appended record is blank; nothing from the removed row
        // leaks into the new index.
        assert_eq!(
            ctx.take_commit(),
            Some(Value::Array(vec![survivor, w.blank_record()]))
        );
    }
}
