use once_cell::sync::OnceCell;

use crate::loader::Overloader;

/// Holds the application's default overloader.
///
/// The first registered overloader stays the default; later registrations
/// are ignored. The registry is owned by the application and passed to the
/// code that needs it.
#[derive(Debug, Default)]
pub struct LoaderRegistry {
    default: OnceCell<Overloader>,
}

impl LoaderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if `loader` became the default.
    pub fn register(&self, loader: &Overloader) -> bool {
        self.default.set(loader.clone()).is_ok()
    }

    pub fn get(&self) -> Option<&Overloader> {
        self.default.get()
    }

    /// The default overloader, registering the one built by `init` if there
    /// is none yet.
    pub fn get_or_init<F>(&self, init: F) -> &Overloader
    where
        F: FnOnce() -> Overloader,
    {
        self.default.get_or_init(init)
    }
}
