// Copyright 2026 the Formwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Orchestrator-level errors.

use formwork_registry::{DispatchError, WidgetError};
use formwork_value::PathError;

/// Errors from form orchestration.
#[derive(Debug, thiserror::Error)]
pub enum FormError {
    /// No renderer registered for a field's tag.
    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    /// A widget rejected an event or failed to render.
    #[error(transparent)]
    Widget(#[from] WidgetError),

    /// A field name did not bind into the value tree.
    #[error(transparent)]
    Path(#[from] PathError),

    /// An event targeted a field the form does not declare.
    #[error("no field named `{0}`")]
    UnknownField(String),

    /// A submit failure that carried no redistributable error map.
    #[error("submit failed: {message}")]
    Submit {
        /// The handler's failure message, verbatim.
        message: String,
    },
}
