/// Favorites persistence in browser local storage

use crate::error::CheckError;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;

/// Local-storage key holding the favorites JSON array
pub const FAVORITES_KEY: &str = "domain_checker_favorites";

/// A user-pinned domain
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FavoriteEntry {
    pub domain: String,
    #[serde(default)]
    pub count: u32,
}

/// Ordered favorites set, unique by domain
///
/// Serializes as a bare JSON array so the stored value stays
/// `[{"domain": ..., "count": ...}]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Favorites {
    pub entries: Vec<FavoriteEntry>,
}

impl Favorites {
    pub fn new() -> Self {
        Favorites {
            entries: Vec::new(),
        }
    }

    /// Append unless the domain is already present
    pub fn add(&mut self, domain: &str, count: u32) -> bool {
        if self.contains(domain) {
            return false;
        }
        self.entries.push(FavoriteEntry {
            domain: domain.to_string(),
            count,
        });
        true
    }

    pub fn remove(&mut self, domain: &str) -> bool {
        let original_len = self.entries.len();
        self.entries.retain(|f| f.domain != domain);
        self.entries.len() < original_len
    }

    pub fn contains(&self, domain: &str) -> bool {
        self.entries.iter().any(|f| f.domain == domain)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Raw string storage for the favorites value
pub trait FavoritesBackend {
    fn load(&self) -> Option<String>;
    fn save(&self, raw: &str) -> Result<(), String>;
}

/// `window.localStorage`
pub struct LocalStorageBackend {
    storage: web_sys::Storage,
}

impl LocalStorageBackend {
    /// None when the page has no local storage (e.g. blocked by privacy settings)
    pub fn open() -> Option<Self> {
        let storage = web_sys::window()?.local_storage().ok()??;
        Some(LocalStorageBackend { storage })
    }
}

impl FavoritesBackend for LocalStorageBackend {
    fn load(&self) -> Option<String> {
        self.storage.get_item(FAVORITES_KEY).ok().flatten()
    }

    fn save(&self, raw: &str) -> Result<(), String> {
        self.storage
            .set_item(FAVORITES_KEY, raw)
            .map_err(|e| format!("{:?}", e))
    }
}

/// In-memory storage, lost with the page
#[derive(Default)]
pub struct MemoryBackend {
    value: RefCell<Option<String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(raw: &str) -> Self {
        MemoryBackend {
            value: RefCell::new(Some(raw.to_string())),
        }
    }
}

impl FavoritesBackend for MemoryBackend {
    fn load(&self) -> Option<String> {
        self.value.borrow().clone()
    }

    fn save(&self, raw: &str) -> Result<(), String> {
        *self.value.borrow_mut() = Some(raw.to_string());
        Ok(())
    }
}

/// Favorites store; every mutation is a whole-set read-modify-write
pub struct FavoritesStore {
    backend: Box<dyn FavoritesBackend>,
}

impl FavoritesStore {
    pub fn new(backend: Box<dyn FavoritesBackend>) -> Self {
        FavoritesStore { backend }
    }

    /// Local storage when available, memory otherwise
    pub fn browser() -> Self {
        match LocalStorageBackend::open() {
            Some(backend) => Self::new(Box::new(backend)),
            None => {
                log::warn!("local storage unavailable, favorites will not persist");
                Self::new(Box::new(MemoryBackend::new()))
            }
        }
    }

    /// Current favorites; unreadable data counts as empty
    pub fn list(&self) -> Favorites {
        match self.backend.load() {
            None => Favorites::new(),
            Some(raw) => parse_favorites(&raw).unwrap_or_else(|e| {
                log::warn!("{}", e);
                Favorites::new()
            }),
        }
    }

    pub fn add(&self, domain: &str, count: u32) -> bool {
        let mut favorites = self.list();
        let added = favorites.add(domain, count);
        if added {
            self.persist(&favorites);
        }
        added
    }

    pub fn remove(&self, domain: &str) -> bool {
        let mut favorites = self.list();
        let removed = favorites.remove(domain);
        self.persist(&favorites);
        removed
    }

    pub fn contains(&self, domain: &str) -> bool {
        self.list().contains(domain)
    }

    pub fn clear(&self) {
        self.persist(&Favorites::new());
    }

    fn persist(&self, favorites: &Favorites) {
        let raw = match serde_json::to_string(favorites) {
            Ok(raw) => raw,
            Err(e) => {
                log::error!("Failed to serialize favorites: {}", e);
                return;
            }
        };
        if let Err(e) = self.backend.save(&raw) {
            log::error!("Failed to save favorites: {}", e);
        }
    }
}

fn parse_favorites(raw: &str) -> Result<Favorites, CheckError> {
    serde_json::from_str(raw).map_err(|e| CheckError::StorageCorruption(e.to_string()))
}
