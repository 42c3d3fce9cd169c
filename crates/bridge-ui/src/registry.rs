//! Concurrent-safe store of UI resources, partitioned into an immutable
//! embedded set and a mutable, capacity-bounded dynamic set (§4.4).

use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::RwLock;

use crate::error::{RegistryError, RegistryResult};

/// Default maximum number of concurrently-held dynamic entries.
pub const DEFAULT_MAX_DYNAMIC_ENTRIES: usize = 32;
/// Default maximum combined byte size of dynamic entries' HTML payloads.
pub const DEFAULT_MAX_DYNAMIC_BYTES: usize = 8 * 1024 * 1024;

/// One registered UI resource.
#[derive(Debug, Clone)]
pub struct ResourceEntry {
    /// The resource's unique uri (reserved `ui://` scheme).
    pub uri: String,
    /// Human-readable name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Fixed mime type for UI resources.
    pub mime_type: String,
    /// The compiled, self-contained HTML document.
    pub html: String,
    /// `true` for build-time entries, `false` for tool-created entries.
    pub embedded: bool,
}

impl ResourceEntry {
    fn byte_len(&self) -> usize {
        self.html.len()
    }
}

type ChangeCallback = dyn Fn() + Send + Sync;

/// The registry. Cheap to clone (internally `Arc`-backed via `DashMap`).
pub struct UiResourceRegistry {
    entries: DashMap<String, ResourceEntry>,
    on_change: RwLock<Option<Arc<ChangeCallback>>>,
    max_dynamic_entries: usize,
    max_dynamic_bytes: usize,
}

impl std::fmt::Debug for UiResourceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UiResourceRegistry")
            .field("entry_count", &self.entries.len())
            .field("max_dynamic_entries", &self.max_dynamic_entries)
            .field("max_dynamic_bytes", &self.max_dynamic_bytes)
            .finish()
    }
}

impl UiResourceRegistry {
    /// Construct an empty registry with the default capacity limits.
    #[must_use]
    pub fn new() -> Self {
        Self::with_limits(DEFAULT_MAX_DYNAMIC_ENTRIES, DEFAULT_MAX_DYNAMIC_BYTES)
    }

    /// Construct an empty registry with explicit capacity limits.
    #[must_use]
    pub fn with_limits(max_dynamic_entries: usize, max_dynamic_bytes: usize) -> Self {
        Self {
            entries: DashMap::new(),
            on_change: RwLock::new(None),
            max_dynamic_entries,
            max_dynamic_bytes,
        }
    }

    /// Install the single change callback, replacing any previous one.
    pub fn set_on_change(&self, callback: Arc<ChangeCallback>) {
        *self.on_change.write() = Some(callback);
    }

    fn fire_on_change(&self) {
        // Clone the Arc out from under the lock before invoking it, so the
        // callback is free to call back into the registry (§4.4, §5 locking
        // discipline: the callback runs outside the registry lock).
        let callback = self.on_change.read().clone();
        if let Some(callback) = callback {
            callback();
        }
    }

    fn dynamic_count(&self) -> usize {
        self.entries.iter().filter(|e| !e.embedded).count()
    }

    fn dynamic_bytes(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| !e.embedded)
            .map(|e| e.byte_len())
            .sum()
    }

    /// Embed-only insert. Rejects duplicate uris. Fires no callback.
    pub fn register(&self, entry: ResourceEntry) -> RegistryResult<()> {
        if !entry.embedded {
            return Err(RegistryError::WrongMutabilityClass { uri: entry.uri });
        }
        if self.entries.contains_key(&entry.uri) {
            return Err(RegistryError::AlreadyExists { uri: entry.uri });
        }
        self.entries.insert(entry.uri.clone(), entry);
        Ok(())
    }

    /// Dynamic-only insert-or-replace, enforcing capacity limits. Fires the
    /// change callback on success.
    pub fn upsert(&self, entry: ResourceEntry) -> RegistryResult<()> {
        if entry.embedded {
            return Err(RegistryError::WrongMutabilityClass { uri: entry.uri });
        }
        if let Some(existing) = self.entries.get(&entry.uri) {
            if existing.embedded {
                return Err(RegistryError::EmbeddedImmutable { uri: entry.uri });
            }
        }

        let replacing_bytes = self
            .entries
            .get(&entry.uri)
            .filter(|e| !e.embedded)
            .map_or(0, ResourceEntry::byte_len);
        let is_new = !self.entries.contains_key(&entry.uri);

        if is_new && self.dynamic_count() + 1 > self.max_dynamic_entries {
            return Err(RegistryError::EntryCapacityExceeded {
                limit: self.max_dynamic_entries,
            });
        }
        let prospective_bytes = self.dynamic_bytes() - replacing_bytes + entry.byte_len();
        if prospective_bytes > self.max_dynamic_bytes {
            return Err(RegistryError::ByteCapacityExceeded {
                limit: self.max_dynamic_bytes,
            });
        }

        self.entries.insert(entry.uri.clone(), entry);
        self.fire_on_change();
        Ok(())
    }

    /// Dynamic-only delete. Fires the change callback on success.
    pub fn delete(&self, uri: &str) -> RegistryResult<()> {
        match self.entries.get(uri) {
            None => Err(RegistryError::NotFound { uri: uri.to_string() }),
            Some(entry) if entry.embedded => Err(RegistryError::EmbeddedImmutable {
                uri: uri.to_string(),
            }),
            Some(_) => {
                drop(self.entries.remove(uri));
                self.fire_on_change();
                Ok(())
            }
        }
    }

    /// All entries, ordered by uri for deterministic output.
    #[must_use]
    pub fn list(&self) -> Vec<ResourceEntry> {
        let mut entries: Vec<ResourceEntry> =
            self.entries.iter().map(|e| e.value().clone()).collect();
        entries.sort_by(|a, b| a.uri.cmp(&b.uri));
        entries
    }

    /// Read a resource's HTML payload by uri.
    #[must_use]
    pub fn read(&self, uri: &str) -> Option<String> {
        self.entries.get(uri).map(|e| e.html.clone())
    }

    /// Fetch a full copy of an entry by uri.
    #[must_use]
    pub fn get(&self, uri: &str) -> Option<ResourceEntry> {
        self.entries.get(uri).map(|e| e.value().clone())
    }
}

impl Default for UiResourceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(uri: &str, embedded: bool, html: &str) -> ResourceEntry {
        ResourceEntry {
            uri: uri.to_string(),
            name: uri.to_string(),
            description: None,
            mime_type: "text/html;profile=mcp-app".to_string(),
            html: html.to_string(),
            embedded,
        }
    }

    #[test]
    fn upsert_then_get_round_trips() {
        let registry = UiResourceRegistry::new();
        let e = entry("ui://loom/x", false, "<!DOCTYPE html>");
        registry.upsert(e.clone()).unwrap();
        let got = registry.get("ui://loom/x").unwrap();
        assert_eq!(got.uri, e.uri);
        assert_eq!(got.html, e.html);
    }

    #[test]
    fn upsert_then_delete_then_get_is_not_found() {
        let registry = UiResourceRegistry::new();
        registry.upsert(entry("ui://loom/x", false, "a")).unwrap();
        registry.delete("ui://loom/x").unwrap();
        assert!(registry.get("ui://loom/x").is_none());
    }

    #[test]
    fn register_then_upsert_same_uri_rejects() {
        let registry = UiResourceRegistry::new();
        registry.register(entry("ui://loom/e", true, "a")).unwrap();
        let err = registry
            .upsert(entry("ui://loom/e", false, "b"))
            .unwrap_err();
        assert!(matches!(err, RegistryError::EmbeddedImmutable { .. }));
    }

    #[test]
    fn register_then_delete_embedded_rejects() {
        let registry = UiResourceRegistry::new();
        registry.register(entry("ui://loom/e", true, "a")).unwrap();
        let err = registry.delete("ui://loom/e").unwrap_err();
        assert!(matches!(err, RegistryError::EmbeddedImmutable { .. }));
    }

    #[test]
    fn entry_capacity_limit_is_enforced() {
        let registry = UiResourceRegistry::with_limits(2, DEFAULT_MAX_DYNAMIC_BYTES);
        registry.upsert(entry("ui://loom/1", false, "a")).unwrap();
        registry.upsert(entry("ui://loom/2", false, "b")).unwrap();
        let err = registry
            .upsert(entry("ui://loom/3", false, "c"))
            .unwrap_err();
        assert!(matches!(err, RegistryError::EntryCapacityExceeded { .. }));
    }

    #[test]
    fn byte_capacity_limit_is_enforced() {
        let registry = UiResourceRegistry::with_limits(DEFAULT_MAX_DYNAMIC_ENTRIES, 10);
        registry.upsert(entry("ui://loom/1", false, "0123456789")).unwrap();
        let err = registry
            .upsert(entry("ui://loom/2", false, "x"))
            .unwrap_err();
        assert!(matches!(err, RegistryError::ByteCapacityExceeded { .. }));
    }

    #[test]
    fn on_change_fires_on_successful_mutation() {
        let registry = UiResourceRegistry::new();
        let fired = Arc::new(std::sync::atomic::AtomicUsize::new(0));
        let counter = fired.clone();
        registry.set_on_change(Arc::new(move || {
            counter.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        }));
        registry.upsert(entry("ui://loom/1", false, "a")).unwrap();
        registry.delete("ui://loom/1").unwrap();
        assert_eq!(fired.load(std::sync::atomic::Ordering::SeqCst), 2);
    }

    #[test]
    fn list_is_ordered_by_uri() {
        let registry = UiResourceRegistry::new();
        registry.upsert(entry("ui://loom/b", false, "b")).unwrap();
        registry.upsert(entry("ui://loom/a", false, "a")).unwrap();
        let uris: Vec<_> = registry.list().into_iter().map(|e| e.uri).collect();
        assert_eq!(uris, vec!["ui://loom/a".to_string(), "ui://loom/b".to_string()]);
    }
}
