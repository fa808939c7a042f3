// Copyright 2026 the Formwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Localized text: one sub-input per locale, committing the whole
//! `{locale: text}` object on every edit.

use formwork_registry::{
    BindingContext, FieldWidget, RenderEnv, Ui, WidgetError, WidgetEvent,
};
use formwork_schema::{FieldSchema, LocaleOptions};
use formwork_value::{Map, Value};
use smallvec::SmallVec;
use tracing::warn;

/// The localized-text widget.
#[derive(Debug)]
pub struct LocalizedWidget {
    locales: SmallVec<[String; 4]>,
}

impl LocalizedWidget {
    /// Creates a widget over the configured locale set.
    #[must_use]
    pub fn new(options: Option<&LocaleOptions>) -> Self {
        Self {
            locales: options.cloned().unwrap_or_default().locales,
        }
    }

    /// The locale codes, in render order.
    #[must_use]
    pub fn locales(&self) -> &[String] {
        &self.locales
    }

    fn text_for<'v>(value: &'v Value, locale: &str) -> &'v str {
        value
            .as_object()
            .and_then(|map| map.get(locale))
            .and_then(Value::as_text)
            .unwrap_or_default()
    }
}

impl FieldWidget for LocalizedWidget {
    fn render(
        &mut self,
        schema: &FieldSchema,
        ctx: &BindingContext,
        env: &mut RenderEnv<'_>,
    ) -> Result<Ui, WidgetError> {
        let base = schema.name();
        let inputs = self
            .locales
            .iter()
            .map(|locale| {
                // Each locale's sub-input binds (and carries errors) at
                // its full path, e.g. `title.en`.
                let error = env
                    .errors
                    .error_at(&format!("{base}.{locale}"))
                    .map(|e| e.message.clone());
                let input = Ui::text_input(
                    Self::text_for(ctx.value(), locale).to_owned(),
                    schema.placeholder_text().map(str::to_owned),
                );
                Ui::field(Some(locale.to_uppercase()), error, input)
            })
            .collect();
        Ok(Ui::Group(inputs))
    }

    fn handle(
        &mut self,
        event: WidgetEvent,
        _schema: &FieldSchema,
        ctx: &mut BindingContext,
        _env: &mut RenderEnv<'_>,
    ) -> Result<(), WidgetError> {
        match event {
            WidgetEvent::LocaleInput { locale, text } => {
                if !self.locales.iter().any(|l| *l == locale) {
                    warn!(locale, "input for unknown locale, ignoring");
                    return Ok(());
                }
                let mut map = ctx.value().as_object().cloned().unwrap_or_else(Map::new);
                map.insert(locale, Value::Text(text));
                ctx.commit(Value::Object(map));
                Ok(())
            }
            _ => Err(WidgetError::UnsupportedEvent { widget: "localized" }),
        }
    }
}
