// Copyright 2026 the Formwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The text family: plain text, email, textarea, rich text, number,
//! and password. These widgets carry little or no local state and commit
//! on every input event.

use formwork_registry::{
    BindingContext, FieldWidget, RenderEnv, Ui, WidgetError, WidgetEvent,
};
use formwork_schema::{FieldFlags, FieldSchema};
use formwork_value::Value;
use tracing::warn;

/// Which text-family presentation a [`TextWidget`] uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextKind {
    /// Single-line plain text.
    #[default]
    Plain,
    /// Single-line email entry.
    Email,
    /// Multi-line plain text.
    Multiline,
    /// Multi-line rich text. Markup handling is the host's concern; the
    /// committed value is the raw text.
    Rich,
}

/// A stateless text input committing `Text` on every input event.
#[derive(Debug, Default)]
pub struct TextWidget {
    kind: TextKind,
}

impl TextWidget {
    /// Creates a widget of the given kind.
    #[must_use]
    pub fn new(kind: TextKind) -> Self {
        Self { kind }
    }
}

fn input_ui(schema: &FieldSchema, value: &Value, masked: bool, multiline: bool) -> Ui {
    let flags = schema.field_flags();
    let disabled = flags.contains(FieldFlags::DISABLED);
    Ui::TextInput {
        value: value.display_text(),
        placeholder: schema.placeholder_text().map(str::to_owned),
        masked,
        multiline,
        disabled,
        read_only: disabled || flags.contains(FieldFlags::READ_ONLY),
    }
}

impl FieldWidget for TextWidget {
    fn render(
        &mut self,
        schema: &FieldSchema,
        ctx: &BindingContext,
        _env: &mut RenderEnv<'_>,
    ) -> Result<Ui, WidgetError> {
        let multiline = matches!(self.kind, TextKind::Multiline | TextKind::Rich);
        Ok(input_ui(schema, ctx.value(), false, multiline))
    }

    fn handle(
        &mut self,
        event: WidgetEvent,
        _schema: &FieldSchema,
        ctx: &mut BindingContext,
        _env: &mut RenderEnv<'_>,
    ) -> Result<(), WidgetError> {
        match event {
            WidgetEvent::Input(text) => {
                ctx.commit(Value::Text(text));
                Ok(())
            }
            _ => Err(WidgetError::UnsupportedEvent { widget: "text" }),
        }
    }
}

/// A numeric input committing `Number`. Unparsable input is dropped;
/// clearing the input commits zero.
#[derive(Debug, Default)]
pub struct NumberWidget;

impl FieldWidget for NumberWidget {
    fn render(
        &mut self,
        schema: &FieldSchema,
        ctx: &BindingContext,
        _env: &mut RenderEnv<'_>,
    ) -> Result<Ui, WidgetError> {
        Ok(input_ui(schema, ctx.value(), false, false))
    }

    fn handle(
        &mut self,
        event: WidgetEvent,
        _schema: &FieldSchema,
        ctx: &mut BindingContext,
        _env: &mut RenderEnv<'_>,
    ) -> Result<(), WidgetError> {
        match event {
            WidgetEvent::Input(text) => {
                if text.is_empty() {
                    ctx.commit(Value::Number(0.0));
                } else {
                    match text.parse::<f64>() {
                        Ok(n) => ctx.commit(Value::Number(n)),
                        Err(err) => warn!(%err, input = text, "unparsable number, keeping value"),
                    }
                }
                Ok(())
            }
            _ => Err(WidgetError::UnsupportedEvent { widget: "number" }),
        }
    }
}

/// A password input with a local reveal toggle. The toggle never touches
/// the committed value.
#[derive(Debug)]
pub struct PasswordWidget {
    toggle: bool,
    reveal: bool,
}

impl PasswordWidget {
    /// Creates a widget; `toggle` controls whether reveal is offered.
    #[must_use]
    pub fn new(toggle: bool) -> Self {
        Self {
            toggle,
            reveal: false,
        }
    }

    /// Whether the entry is currently revealed.
    #[must_use]
    pub fn is_revealed(&self) -> bool {
        self.reveal
    }
}

impl FieldWidget for PasswordWidget {
    fn render(
        &mut self,
        schema: &FieldSchema,
        ctx: &BindingContext,
        _env: &mut RenderEnv<'_>,
    ) -> Result<Ui, WidgetError> {
        Ok(input_ui(schema, ctx.value(), !self.reveal, false))
    }

    fn handle(
        &mut self,
        event: WidgetEvent,
        _schema: &FieldSchema,
        ctx: &mut BindingContext,
        _env: &mut RenderEnv<'_>,
    ) -> Result<(), WidgetError> {
        match event {
            WidgetEvent::Input(text) => {
                ctx.commit(Value::Text(text));
                Ok(())
            }
            WidgetEvent::ToggleReveal => {
                if self.toggle {
                    self.reveal = !self.reveal;
                }
                Ok(())
            }
            _ => Err(WidgetError::UnsupportedEvent { widget: "password" }),
        }
    }
}

#[cfg(test)]
mod tests {
    use formwork_registry::{FieldRegistry, UrlAllocator};
    use pretty_assertions::assert_eq;

    use super::*;

    fn env_call<R>(f: impl FnOnce(&mut RenderEnv<'_>) -> R) -> R {
        let registry = FieldRegistry::new();
        let mut resources = UrlAllocator::new();
        let mut env = RenderEnv::new(&registry, &mut resources);
        f(&mut env)
    }

    #[test]
    fn input_commits_text() {
        let schema = FieldSchema::text("title");
        let mut w = TextWidget::default();
        let mut ctx = BindingContext::new(Value::empty_text(), None);
        env_call(|env| w.handle(WidgetEvent::Input("hello".to_owned()), &schema, &mut ctx, env))
            .unwrap();
        assert_eq!(ctx.take_commit(), Some(Value::text("hello")));
    }

    #[test]
    fn disabled_flag_renders_disabled_and_read_only() {
        let schema = FieldSchema::text("title").flags(FieldFlags::DISABLED);
        let mut w = TextWidget::default();
        let ctx = BindingContext::new(Value::text("x"), None);
        let ui = env_call(|env| w.render(&schema, &ctx, env)).unwrap();
        let Ui::TextInput {
            disabled, read_only, ..
        } = ui
        else {
            panic!("expected text input")
        };
        assert!(disabled);
        assert!(read_only);
    }

    #[test]
    fn number_parses_and_clears_to_zero() {
        let schema = FieldSchema::number("price");
        let mut w = NumberWidget;
        let mut ctx = BindingContext::new(Value::Number(0.0), None);

        env_call(|env| w.handle(WidgetEvent::Input("12.5".to_owned()), &schema, &mut ctx, env))
            .unwrap();
        assert_eq!(ctx.take_commit(), Some(Value::Number(12.5)));

        env_call(|env| w.handle(WidgetEvent::Input("abc".to_owned()), &schema, &mut ctx, env))
            .unwrap();
        assert_eq!(ctx.take_commit(), None);

        env_call(|env| w.handle(WidgetEvent::Input(String::new()), &schema, &mut ctx, env))
            .unwrap();
        assert_eq!(ctx.take_commit(), Some(Value::Number(0.0)));
    }

    #[test]
    fn password_reveal_is_local_and_gated() {
        let schema = FieldSchema::password("secret");
        let mut w = PasswordWidget::new(true);
        let mut ctx = BindingContext::new(Value::empty_text(), None);

        env_call(|env| w.handle(WidgetEvent::ToggleReveal, &schema, &mut ctx, env)).unwrap();
        assert!(w.is_revealed());
        assert_eq!(ctx.take_commit(), None);

        let ui = env_call(|env| w.render(&schema, &ctx, env)).unwrap();
        assert!(matches!(ui, Ui::TextInput { masked: false, .. }));

        let mut fixed = PasswordWidget::new(false);
        env_call(|env| fixed.handle(WidgetEvent::ToggleReveal, &schema, &mut ctx, env)).unwrap();
        assert!(!fixed.is_revealed());
    }
}
