// Copyright 2026 the Formwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! File-upload fields and their display-resource lifecycle.
//!
//! For every locally held file the widget owns a display resource, plus a
//! second preview resource for images. Each resource is released exactly
//! once: [`formwork_registry::ResourceHandle`] is not clonable and
//! `release` consumes it, so a stored file can only surrender a handle it
//! still owns. Hydration, removal, single-mode replacement, and teardown
//! all release through the same [`StoredFile::release_all`] path.

use formwork_registry::{
    BindingContext, FieldWidget, FileEntry, PreviewResources, RenderEnv, ResourceHandle, Ui,
    WidgetError, WidgetEvent,
};
use formwork_schema::{FieldSchema, FileOptions};
use formwork_value::{FileHandle, Value};
use tracing::{debug, warn};

/// One file stored by a [`FileWidget`], local or remote.
#[derive(Debug)]
pub struct StoredFile {
    handle: Option<FileHandle>,
    name: String,
    size: u64,
    mime: String,
    remote_url: Option<String>,
    display: Option<ResourceHandle>,
    preview: Option<ResourceHandle>,
}

impl StoredFile {
    /// Stores a locally held file, allocating its display resource and an
    /// image preview when the media type warrants one.
    #[must_use]
    pub fn local(handle: FileHandle, resources: &mut dyn PreviewResources) -> Self {
        let display = resources.create(&handle);
        let preview = handle.is_image().then(|| resources.create(&handle));
        Self {
            name: handle.name().to_owned(),
            size: handle.size(),
            mime: handle.mime().to_owned(),
            remote_url: None,
            display: Some(display),
            preview,
            handle: Some(handle),
        }
    }

    /// Stores a reference to an already-uploaded file. No resources are
    /// allocated; the URL displays as-is.
    #[must_use]
    pub fn remote(url: impl Into<String>) -> Self {
        let url = url.into();
        let name = url
            .rsplit('/')
            .next()
            .filter(|s| !s.is_empty())
            .unwrap_or(url.as_str())
            .to_owned();
        Self {
            handle: None,
            name,
            size: 0,
            mime: String::new(),
            remote_url: Some(url),
            display: None,
            preview: None,
        }
    }

    /// Placeholder for an external value of unexpected shape.
    fn unknown() -> Self {
        Self {
            handle: None,
            name: "(unknown file)".to_owned(),
            size: 0,
            mime: String::new(),
            remote_url: None,
            display: None,
            preview: None,
        }
    }

    /// Returns `true` when this entry wraps a locally held file.
    #[must_use]
    pub fn is_local(&self) -> bool {
        self.handle.is_some()
    }

    /// Releases every resource this entry still owns.
    pub fn release_all(&mut self, resources: &mut dyn PreviewResources) {
        if let Some(display) = self.display.take() {
            resources.release(display);
        }
        if let Some(preview) = self.preview.take() {
            resources.release(preview);
        }
    }

    fn entry(&self) -> FileEntry {
        let url = self
            .display
            .as_ref()
            .map(|h| h.url().to_owned())
            .or_else(|| self.remote_url.clone())
            .unwrap_or_default();
        FileEntry {
            name: self.name.clone(),
            size: self.size,
            mime: self.mime.clone(),
            url,
            preview: self.preview.as_ref().map(|h| h.url().to_owned()),
        }
    }
}

/// The file-upload widget, in single or multi mode.
#[derive(Debug)]
pub struct FileWidget {
    multiple: bool,
    max_size_mb: u64,
    max_files: usize,
    accept: Option<String>,
    files: Vec<StoredFile>,
    notices: Vec<String>,
    /// The external value the stored list was last built from or committed
    /// as. When the live value differs, the list rehydrates.
    synced: Option<Value>,
}

impl FileWidget {
    /// Creates a widget for the given mode and options.
    #[must_use]
    pub fn new(multiple: bool, options: Option<&FileOptions>) -> Self {
        let options = options.cloned().unwrap_or_default();
        Self {
            multiple,
            max_size_mb: options.max_size_mb,
            max_files: options.max_files,
            accept: options.accept,
            files: Vec::new(),
            notices: Vec::new(),
            synced: None,
        }
    }

    /// The stored files, in order.
    #[must_use]
    pub fn files(&self) -> &[StoredFile] {
        &self.files
    }

    /// Rebuilds the stored list from the external value when it changed
    /// behind the widget's back (defaults applied, form reset).
    pub fn hydrate(&mut self, value: &Value, resources: &mut dyn PreviewResources) {
        if self.synced.as_ref() == Some(value) {
            return;
        }
        for file in &mut self.files {
            file.release_all(resources);
        }
        self.files.clear();

        match value {
            Value::Null => {}
            Value::Text(s) if s.is_empty() => {}
            Value::Array(items) => {
                for item in items {
                    self.files.push(Self::normalize(item, resources));
                }
            }
            other => self.files.push(Self::normalize(other, resources)),
        }
        self.synced = Some(value.clone());
    }

    fn normalize(value: &Value, resources: &mut dyn PreviewResources) -> StoredFile {
        match value {
            Value::File(handle) => StoredFile::local(handle.clone(), resources),
            Value::Text(url) => StoredFile::remote(url.clone()),
            Value::Object(map) => match map.get("url").and_then(Value::as_text) {
                Some(url) => StoredFile::remote(url),
                None => {
                    warn!("file entry object without url, storing placeholder");
                    StoredFile::unknown()
                }
            },
            other => {
                warn!(?other, "unexpected file entry shape, storing placeholder");
                StoredFile::unknown()
            }
        }
    }

    /// Adds incoming files, enforcing the per-file size limit and (in
    /// multi mode) the list bound. Oversized files are skipped with a
    /// notice; the rest still land.
    pub fn add_files(
        &mut self,
        incoming: Vec<FileHandle>,
        ctx: &mut BindingContext,
        resources: &mut dyn PreviewResources,
    ) {
        self.notices.clear();
        let limit = self.max_size_mb * 1024 * 1024;
        let mut accepted: Vec<FileHandle> = Vec::with_capacity(incoming.len());
        for handle in incoming {
            if handle.size() > limit {
                warn!(
                    name = handle.name(),
                    size = handle.size(),
                    "file exceeds size limit, skipping"
                );
                self.notices
                    .push(format!("{} exceeds {} MB", handle.name(), self.max_size_mb));
            } else {
                accepted.push(handle);
            }
        }

        if self.multiple {
            let room = self.max_files.saturating_sub(self.files.len());
            if accepted.len() > room {
                debug!(
                    dropped = accepted.len() - room,
                    "file list full, truncating incoming batch"
                );
                accepted.truncate(room);
            }
            for handle in accepted {
                self.files.push(StoredFile::local(handle, resources));
            }
        } else if let Some(handle) = accepted.into_iter().next() {
            for file in &mut self.files {
                file.release_all(resources);
            }
            self.files.clear();
            self.files.push(StoredFile::local(handle, resources));
        }

        self.sync_out(ctx);
    }

    /// Removes the stored file at `index`, releasing its resources.
    pub fn remove_file(
        &mut self,
        index: usize,
        ctx: &mut BindingContext,
        resources: &mut dyn PreviewResources,
    ) {
        if index >= self.files.len() {
            debug!(index, len = self.files.len(), "remove index out of range");
            return;
        }
        let mut removed = self.files.remove(index);
        removed.release_all(resources);
        self.sync_out(ctx);
    }

    /// Commits the external shape of the stored list: native handles only.
    /// Remote references stay display-side; the backend already has them.
    fn sync_out(&mut self, ctx: &mut BindingContext) {
        let items: Vec<Value> = self
            .files
            .iter()
            .filter_map(|file| file.handle.clone().map(Value::File))
            .collect();
        let committed = if self.multiple {
            Value::Array(items)
        } else {
            items.into_iter().next().unwrap_or(Value::Null)
        };
        self.synced = Some(committed.clone());
        ctx.commit(committed);
    }

    fn hint(&self) -> String {
        let mut hint = format!("max {} MB per file", self.max_size_mb);
        if self.multiple {
            hint.push_str(&format!(" · up to {} files", self.max_files));
        }
        if let Some(accept) = &self.accept {
            hint.push_str(&format!(" · {accept}"));
        }
        hint
    }
}

impl FieldWidget for FileWidget {
    fn render(
        &mut self,
        _schema: &FieldSchema,
        ctx: &BindingContext,
        env: &mut RenderEnv<'_>,
    ) -> Result<Ui, WidgetError> {
        self.hydrate(ctx.value(), env.resources);
        let mut fragments = vec![Ui::FileDrop {
            entries: self.files.iter().map(StoredFile::entry).collect(),
            hint: self.hint(),
            multiple: self.multiple,
        }];
        fragments.extend(self.notices.iter().cloned().map(Ui::Notice));
        if fragments.len() == 1 {
            Ok(fragments.remove(0))
        } else {
            Ok(Ui::Group(fragments))
        }
    }

    fn handle(
        &mut self,
        event: WidgetEvent,
        _schema: &FieldSchema,
        ctx: &mut BindingContext,
        env: &mut RenderEnv<'_>,
    ) -> Result<(), WidgetError> {
        self.hydrate(ctx.value(), env.resources);
        match event {
            WidgetEvent::AddFiles(incoming) => {
                self.add_files(incoming, ctx, env.resources);
                Ok(())
            }
            WidgetEvent::RemoveFile(index) => {
                self.remove_file(index, ctx, env.resources);
                Ok(())
            }
            _ => Err(WidgetError::UnsupportedEvent { widget: "file" }),
        }
    }

    fn teardown(&mut self, resources: &mut dyn PreviewResources) {
        for file in &mut self.files {
            file.release_all(resources);
        }
        self.files.clear();
        self.synced = None;
    }
}
