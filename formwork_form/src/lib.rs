// Copyright 2026 the Formwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Form-state container and orchestrator.
//!
//! [`FormStore`] owns the live value tree as its single writer, along
//! with field errors and the defaults snapshot used by reset. [`Form`]
//! sits on top: it filters fields by visibility against the live tree,
//! instantiates widgets through the registry on first use, routes events,
//! applies at most one commit per event, and hands submit failures back
//! out as per-field server errors.
//!
//! ```
//! use formwork_form::{Form, SubmitError, SubmitOutcome};
//! use formwork_registry::{UrlAllocator, WidgetEvent};
//! use formwork_schema::FieldSchema;
//! use formwork_value::Value;
//! use formwork_widgets::standard_registry;
//!
//! let fields = vec![FieldSchema::text("title").label("Title")];
//! let defaults = Value::object_from([("title", Value::empty_text())]);
//! let mut form = Form::new(
//!     fields,
//!     standard_registry(),
//!     defaults,
//!     Box::new(UrlAllocator::new()),
//! );
//!
//! form.dispatch("title", WidgetEvent::Input("Chair".to_owned()))?;
//!
//! let mut handler = |payload: &Value| {
//!     assert_eq!(payload.as_object().unwrap()["title"], Value::text("Chair"));
//!     Err(SubmitError::with_errors(
//!         "rejected",
//!         [("title".to_owned(), "already exists".to_owned())],
//!     ))
//! };
//! let outcome = form.submit(&mut handler)?;
//! assert_eq!(outcome, SubmitOutcome::Rejected { fields: vec!["title".to_owned()] });
//! assert_eq!(form.store().error("title").unwrap().message, "already exists");
//! # Ok::<(), formwork_form::FormError>(())
//! ```

mod error;
mod form;
mod store;
mod submit;

pub use error::FormError;
pub use form::{Form, SubmitOutcome};
pub use store::FormStore;
pub use submit::{SubmitError, SubmitHandler};
