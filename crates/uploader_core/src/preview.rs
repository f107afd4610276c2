use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use bytes::Bytes;
use uploader_logging::uploader_debug;

use crate::{FileId, SelectedFile};

pub type PreviewId = u64;

const LOCATOR_SCHEME: &str = "preview:";

#[derive(Debug, Default)]
struct RegistryInner {
    next_id: PreviewId,
    live: BTreeMap<PreviewId, PreviewEntry>,
}

#[derive(Debug)]
struct PreviewEntry {
    media_type: String,
    payload: Bytes,
}

/// Table of locally-addressable preview resources.
///
/// Cloning shares the table. Entries are added by `create` and removed only
/// when the returned `PreviewHandle` is dropped.
#[derive(Debug, Clone, Default)]
pub struct PreviewRegistry {
    inner: Arc<Mutex<RegistryInner>>,
}

impl PreviewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&self, file: &SelectedFile) -> PreviewHandle {
        let id = {
            let mut inner = self.lock();
            inner.next_id += 1;
            let id = inner.next_id;
            inner.live.insert(
                id,
                PreviewEntry {
                    media_type: file.media_type().to_string(),
                    payload: file.payload().clone(),
                },
            );
            id
        };
        uploader_debug!("Created preview {} for file {}", id, file.id());
        PreviewHandle {
            id,
            file_id: file.id(),
            locator: format!("{LOCATOR_SCHEME}{id}"),
            registry: self.clone(),
        }
    }

    /// Number of preview resources not yet released.
    pub fn live_count(&self) -> usize {
        self.lock().live.len()
    }

    #[cfg(test)]
    pub(crate) fn is_live(&self, id: PreviewId) -> bool {
        self.lock().live.contains_key(&id)
    }

    /// Looks up a locator such as `preview:3`; `None` once it has been released.
    pub fn resolve(&self, locator: &str) -> Option<(String, Bytes)> {
        let id = locator.strip_prefix(LOCATOR_SCHEME)?.parse().ok()?;
        self.lock()
            .live
            .get(&id)
            .map(|entry| (entry.media_type.clone(), entry.payload.clone()))
    }

    fn release(&self, id: PreviewId) {
        if self.lock().live.remove(&id).is_some() {
            uploader_debug!("Released preview {}", id);
        }
    }

    fn lock(&self) -> MutexGuard<'_, RegistryInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Owned preview resource. Dropping it releases the registry entry.
#[derive(Debug)]
pub struct PreviewHandle {
    id: PreviewId,
    file_id: FileId,
    locator: String,
    registry: PreviewRegistry,
}

impl PreviewHandle {
    pub fn id(&self) -> PreviewId {
        self.id
    }

    /// Identity of the file this preview was derived from.
    pub fn file_id(&self) -> FileId {
        self.file_id
    }

    pub fn locator(&self) -> &str {
        &self.locator
    }
}

impl Drop for PreviewHandle {
    fn drop(&mut self) {
        self.registry.release(self.id);
    }
}

/// Keeps at most one live preview, matching the current selection.
#[derive(Debug, Default)]
pub struct PreviewManager {
    registry: PreviewRegistry,
    current: Option<PreviewHandle>,
}

impl PreviewManager {
    pub fn new(registry: PreviewRegistry) -> Self {
        Self {
            registry,
            current: None,
        }
    }

    /// Recomputes the preview for `file`, comparing by file identity.
    ///
    /// The previous handle is released before a replacement is created.
    pub fn derive_preview(&mut self, file: Option<&SelectedFile>) -> Option<&PreviewHandle> {
        let unchanged = match (&self.current, file) {
            (Some(handle), Some(file)) => handle.file_id() == file.id(),
            (None, None) => true,
            _ => false,
        };
        if !unchanged {
            self.current = None;
            self.current = file.map(|file| self.registry.create(file));
        }
        self.current.as_ref()
    }

    pub fn current(&self) -> Option<&PreviewHandle> {
        self.current.as_ref()
    }

    pub fn registry(&self) -> &PreviewRegistry {
        &self.registry
    }
}

#[cfg(test)]
mod tests {
    use super::{PreviewManager, PreviewRegistry};
    use crate::{acquire, FileCandidate};

    fn image(name: &str) -> crate::SelectedFile {
        acquire(Some(FileCandidate::new(name, "image/png", &b"png"[..]))).unwrap()
    }

    #[test]
    fn dropping_handle_releases_entry() {
        let registry = PreviewRegistry::new();
        let handle = registry.create(&image("a.png"));
        let locator = handle.locator().to_string();
        assert!(registry.resolve(&locator).is_some());

        drop(handle);
        assert_eq!(registry.live_count(), 0);
        assert!(registry.resolve(&locator).is_none());
    }

    #[test]
    fn same_file_keeps_existing_preview() {
        let mut manager = PreviewManager::new(PreviewRegistry::new());
        let file = image("a.png");

        let first = manager.derive_preview(Some(&file)).unwrap().id();
        let second = manager.derive_preview(Some(&file)).unwrap().id();

        assert_eq!(first, second);
        assert_eq!(manager.registry().live_count(), 1);
    }

    #[test]
    fn identical_content_is_a_new_preview() {
        let mut manager = PreviewManager::new(PreviewRegistry::new());
        let first_file = image("a.png");
        let second_file = image("a.png");

        let first = manager.derive_preview(Some(&first_file)).unwrap().id();
        let second = manager.derive_preview(Some(&second_file)).unwrap().id();

        assert_ne!(first, second);
        assert!(!manager.registry().is_live(first));
        assert_eq!(manager.registry().live_count(), 1);
    }

    #[test]
    fn resolve_rejects_foreign_locators() {
        let registry = PreviewRegistry::new();
        let _handle = registry.create(&image("a.png"));
        assert!(registry.resolve("blob:1").is_none());
        assert!(registry.resolve("preview:x").is_none());
    }
}
