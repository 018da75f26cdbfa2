//! Static module registry: the content cards floating in the room.
//!
//! Metadata is immutable after registration and positions are fixed for the
//! lifetime of a page view; the camera flies to them, they never move.

use fnv::FnvHashMap;
use glam::Vec3;
use thiserror::Error;

/// Surface of the site a module belongs to; selection only ever draws from
/// the active page's subset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Page {
    Home,
    Experiences,
    Booking,
}

impl Page {
    /// Parse the tab identifier supplied by top-level navigation.
    pub fn parse(tab: &str) -> Option<Page> {
        match tab {
            "home" => Some(Page::Home),
            "experiences" => Some(Page::Experiences),
            "booking" => Some(Page::Booking),
            _ => None,
        }
    }
}

/// Per-session registry entry for one content card.
#[derive(Clone, Debug)]
pub struct ModuleMetadata {
    pub id: String,
    pub title: String,
    pub icon: String,
    /// Key of the external content component rendered in the HTML overlay.
    /// The core only needs its existence, never its internals.
    pub content: String,
    pub page: Page,
    pub base_position: Vec3,
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("duplicate module id `{0}`")]
    DuplicateId(String),
}

/// Registry of all modules, keyed by id. Iteration order is registration
/// order, which keeps hit-test tie-breaking deterministic.
#[derive(Debug, Default)]
pub struct ModuleRegistry {
    modules: Vec<ModuleMetadata>,
    index: FnvHashMap<String, usize>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, module: ModuleMetadata) -> Result<(), RegistryError> {
        if self.index.contains_key(&module.id) {
            return Err(RegistryError::DuplicateId(module.id));
        }
        self.index.insert(module.id.clone(), self.modules.len());
        self.modules.push(module);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&ModuleMetadata> {
        self.index.get(id).map(|&i| &self.modules[i])
    }

    /// Modules registered on `page`, in registration order.
    pub fn on_page(&self, page: Page) -> impl Iterator<Item = &ModuleMetadata> {
        self.modules.iter().filter(move |m| m.page == page)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}
