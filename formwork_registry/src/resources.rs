// Copyright 2026 the Formwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Preview/display resource lifecycle for file widgets.
//!
//! File widgets need a URL the host can display for a locally selected
//! file (the object-URL pattern). Creating one allocates a host resource
//! that must be released exactly once when the file leaves the list or the
//! widget tears down. [`ResourceHandle`] is deliberately not cloneable:
//! release consumes the handle, so the type system rules out double
//! release, and a dropped-without-release handle is findable through the
//! allocator's live count.

use core::fmt;

use formwork_value::FileHandle;
use hashbrown::HashSet;
use tracing::warn;

/// An owned display/preview resource tied to one stored file.
#[derive(Debug, PartialEq, Eq)]
pub struct ResourceHandle {
    id: u64,
    url: String,
}

impl ResourceHandle {
    /// Creates a handle. Only resource allocators construct these.
    #[must_use]
    pub fn new(id: u64, url: String) -> Self {
        Self { id, url }
    }

    /// The allocator-assigned identity.
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// The displayable URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Capability for allocating and releasing display resources.
///
/// Hosts back this with their object-URL machinery; tests use
/// [`UrlAllocator`], which tracks pairing.
pub trait PreviewResources {
    /// Allocates a display resource for a local file.
    fn create(&mut self, source: &FileHandle) -> ResourceHandle;

    /// Releases a resource. Consumes the handle: a resource cannot be
    /// released twice through safe use of this API.
    fn release(&mut self, handle: ResourceHandle);
}

/// In-memory resource allocator.
///
/// Mints `formwork-blob:` URLs and tracks live allocations, so callers and
/// tests can assert that every created resource is released exactly once.
/// Hosts with real object URLs wrap their runtime instead.
pub struct UrlAllocator {
    next_id: u64,
    live: HashSet<u64>,
    created: usize,
    released: usize,
    double_releases: usize,
}

impl UrlAllocator {
    /// Creates an empty allocator.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: 1,
            live: HashSet::new(),
            created: 0,
            released: 0,
            double_releases: 0,
        }
    }

    /// Number of currently live resources.
    #[must_use]
    pub fn live(&self) -> usize {
        self.live.len()
    }

    /// Total resources created.
    #[must_use]
    pub fn created(&self) -> usize {
        self.created
    }

    /// Total resources released.
    #[must_use]
    pub fn released(&self) -> usize {
        self.released
    }

    /// Release calls that did not match a live resource.
    #[must_use]
    pub fn double_releases(&self) -> usize {
        self.double_releases
    }
}

impl Default for UrlAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl PreviewResources for UrlAllocator {
    fn create(&mut self, source: &FileHandle) -> ResourceHandle {
        let id = self.next_id;
        self.next_id += 1;
        self.live.insert(id);
        self.created += 1;
        ResourceHandle::new(id, format!("formwork-blob:{id}/{}", source.name()))
    }

    fn release(&mut self, handle: ResourceHandle) {
        if self.live.remove(&handle.id) {
            self.released += 1;
        } else {
            self.double_releases += 1;
            warn!(id = handle.id, "release of unknown or already-released resource");
        }
    }
}

impl fmt::Debug for UrlAllocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UrlAllocator")
            .field("live", &self.live.len())
            .field("created", &self.created)
            .field("released", &self.released)
            .field("double_releases", &self.double_releases)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_release_pairs_balance() {
        let mut alloc = UrlAllocator::new();
        let file = FileHandle::new("a.png", 10, "image/png");

        let h1 = alloc.create(&file);
        let h2 = alloc.create(&file);
        assert_eq!(alloc.live(), 2);
        assert_ne!(h1.id(), h2.id());
        assert!(h1.url().contains("a.png"));

        alloc.release(h1);
        alloc.release(h2);
        assert_eq!(alloc.live(), 0);
        assert_eq!(alloc.created(), 2);
        assert_eq!(alloc.released(), 2);
        assert_eq!(alloc.double_releases(), 0);
    }

    #[test]
    fn unmatched_release_is_counted_not_panicked() {
        let mut alloc = UrlAllocator::new();
        alloc.release(ResourceHandle::new(99, "formwork-blob:99/x".into()));
        assert_eq!(alloc.double_releases(), 1);
        assert_eq!(alloc.released(), 0);
    }
}
