// Copyright 2026 the Formwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Opaque native file handles.

use core::sync::atomic::{AtomicU64, Ordering};

static NEXT_FILE_ID: AtomicU64 = AtomicU64::new(1);

/// An opaque handle to a file the user selected or dropped.
///
/// The core never reads file contents; it only carries the handle through
/// the value tree so the caller-supplied submit handler receives the same
/// native objects the user picked. Handles created separately compare
/// unequal even when their metadata matches, mirroring host file-object
/// identity; clones of one handle refer to the same file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHandle {
    id: u64,
    name: String,
    size: u64,
    mime: String,
}

impl FileHandle {
    /// Creates a handle for a newly selected file.
    pub fn new(name: impl Into<String>, size: u64, mime: impl Into<String>) -> Self {
        Self {
            id: NEXT_FILE_ID.fetch_add(1, Ordering::Relaxed),
            name: name.into(),
            size,
            mime: mime.into(),
        }
    }

    /// The file name as reported by the host.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The file size in bytes.
    #[must_use]
    pub fn size(&self) -> u64 {
        self.size
    }

    /// The media type as reported by the host (may be empty).
    #[must_use]
    pub fn mime(&self) -> &str {
        &self.mime
    }

    /// Returns `true` if the media type is an image type.
    #[must_use]
    pub fn is_image(&self) -> bool {
        self.mime.starts_with("image/")
    }

    /// The handle's identity.
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }
}
