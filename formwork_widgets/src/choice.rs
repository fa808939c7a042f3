// Copyright 2026 the Formwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Choice fields: checkbox, radio, select, and multi-select.
//!
//! Radio and select share one widget since their value semantics are
//! identical. Multi-select toggles membership in a text array and, in its
//! popover style, carries open/query state like the other popover widgets.

use formwork_registry::{
    BindingContext, ChoiceItem, FieldWidget, RenderEnv, Ui, WidgetError, WidgetEvent,
};
use formwork_schema::{FieldFlags, FieldSchema, MultiSelectStyle, SelectOptions};
use formwork_value::Value;

/// A boolean toggle committing `Bool`.
#[derive(Debug, Default)]
pub struct CheckboxWidget;

impl FieldWidget for CheckboxWidget {
    fn render(
        &mut self,
        schema: &FieldSchema,
        ctx: &BindingContext,
        _env: &mut RenderEnv<'_>,
    ) -> Result<Ui, WidgetError> {
        Ok(Ui::Checkbox {
            checked: ctx.value().as_bool().unwrap_or(false),
            disabled: schema.field_flags().contains(FieldFlags::DISABLED),
        })
    }

    fn handle(
        &mut self,
        event: WidgetEvent,
        _schema: &FieldSchema,
        ctx: &mut BindingContext,
        _env: &mut RenderEnv<'_>,
    ) -> Result<(), WidgetError> {
        match event {
            WidgetEvent::Toggle(checked) => {
                ctx.commit(Value::Bool(checked));
                Ok(())
            }
            _ => Err(WidgetError::UnsupportedEvent { widget: "checkbox" }),
        }
    }
}

fn items(options: Option<&SelectOptions>) -> Vec<ChoiceItem> {
    options
        .map(|o| {
            o.choices
                .iter()
                .map(|c| ChoiceItem {
                    value: c.value.clone(),
                    label: c.label.clone(),
                })
                .collect()
        })
        .unwrap_or_default()
}

/// A single-choice widget (radio group or dropdown select).
#[derive(Debug, Default)]
pub struct ChoiceWidget;

impl FieldWidget for ChoiceWidget {
    fn render(
        &mut self,
        schema: &FieldSchema,
        ctx: &BindingContext,
        _env: &mut RenderEnv<'_>,
    ) -> Result<Ui, WidgetError> {
        let selected = ctx
            .value()
            .as_text()
            .filter(|s| !s.is_empty())
            .map(|s| vec![s.to_owned()])
            .unwrap_or_default();
        Ok(Ui::ChoiceList {
            choices: items(schema.select_options()),
            selected,
            multiple: false,
        })
    }

    fn handle(
        &mut self,
        event: WidgetEvent,
        _schema: &FieldSchema,
        ctx: &mut BindingContext,
        _env: &mut RenderEnv<'_>,
    ) -> Result<(), WidgetError> {
        match event {
            WidgetEvent::Select(value) => {
                ctx.commit(Value::Text(value));
                Ok(())
            }
            _ => Err(WidgetError::UnsupportedEvent { widget: "choice" }),
        }
    }
}

/// A multi-select widget toggling membership in a text array.
#[derive(Debug)]
pub struct MultiSelectWidget {
    style: MultiSelectStyle,
    open: bool,
    query: String,
}

impl MultiSelectWidget {
    /// Creates a widget with the given presentation style.
    #[must_use]
    pub fn new(style: MultiSelectStyle) -> Self {
        Self {
            style,
            open: false,
            query: String::new(),
        }
    }

    fn selected(value: &Value) -> Vec<String> {
        value
            .as_array()
            .map(|items| {
                items
                    .iter()
                    .filter_map(|v| v.as_text().map(str::to_owned))
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl FieldWidget for MultiSelectWidget {
    fn render(
        &mut self,
        schema: &FieldSchema,
        ctx: &BindingContext,
        _env: &mut RenderEnv<'_>,
    ) -> Result<Ui, WidgetError> {
        let selected = Self::selected(ctx.value());
        let mut choices = items(schema.select_options());
        match self.style {
            MultiSelectStyle::Normal => Ok(Ui::ChoiceList {
                choices,
                selected,
                multiple: true,
            }),
            MultiSelectStyle::Popover => {
                if !self.query.is_empty() {
                    let needle = self.query.to_lowercase();
                    choices.retain(|c| c.label.to_lowercase().contains(&needle));
                }
                let trigger = if selected.is_empty() {
                    schema.placeholder_text().unwrap_or_default().to_owned()
                } else {
                    selected.join(", ")
                };
                Ok(Ui::Popover {
                    open: self.open,
                    trigger,
                    body: vec![Ui::ChoiceList {
                        choices,
                        selected,
                        multiple: true,
                    }],
                })
            }
        }
    }

    fn handle(
        &mut self,
        event: WidgetEvent,
        _schema: &FieldSchema,
        ctx: &mut BindingContext,
        _env: &mut RenderEnv<'_>,
    ) -> Result<(), WidgetError> {
        match event {
            WidgetEvent::ToggleChoice(value) => {
                let mut selected = Self::selected(ctx.value());
                match selected.iter().position(|s| *s == value) {
                    Some(index) => {
                        selected.remove(index);
                    }
                    None => selected.push(value),
                }
                ctx.commit(Value::Array(selected.into_iter().map(Value::Text).collect()));
                Ok(())
            }
            WidgetEvent::OpenPicker if self.style == MultiSelectStyle::Popover => {
                self.open = true;
                Ok(())
            }
            WidgetEvent::ClosePicker if self.style == MultiSelectStyle::Popover => {
                self.open = false;
                self.query.clear();
                Ok(())
            }
            WidgetEvent::QueryChanged(query) if self.style == MultiSelectStyle::Popover => {
                self.query = query;
                Ok(())
            }
            _ => Err(WidgetError::UnsupportedEvent {
                widget: "multi-select",
            }),
        }
    }
}
