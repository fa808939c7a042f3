// Copyright 2026 the Formwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dispatch and widget errors.

use formwork_schema::FieldType;

/// Errors from registry lookup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    /// No renderer is registered for the tag. A complete registry covers
    /// every tag of the closed enumeration; hitting this is a programming
    /// error in registry construction, and the affected field must not be
    /// silently rendered as nothing.
    #[error("no renderer registered for field type `{0}`")]
    UnknownFieldType(FieldType),
}

/// Errors surfaced by widget render/handle operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WidgetError {
    /// An event reached a widget that has no meaning for it. Routing bug.
    #[error("{widget} widget cannot handle this event")]
    UnsupportedEvent {
        /// The receiving widget's name.
        widget: &'static str,
    },
    /// Recursive dispatch inside a composite widget failed.
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}
