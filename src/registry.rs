//! The registry client
//!
//! A [`Registry`] owns a [`Fetcher`] and one lookup table for each [`Category`]. A table is in one
//! of two states, it is either *uninitialized* or *loaded*. The first lookup of an uninitialized
//! table makes sure the snapshot is present and then parses the category's files. If either step
//! fails the table stays uninitialized, so the next lookup tries again. A loaded table is shared
//! by reference counting and is never modified. [`Registry::update`] brings the snapshot to the
//! latest revision and returns every table to the uninitialized state.
//!
//! The snapshot itself is guarded by a reader/writer lock. Fetching and updating take the write
//! side and parsing takes the read side, so a table is never parsed from a snapshot that is being
//! written to and two tables never fetch the snapshot at the same time.

use crate::config::Config;
use crate::error::Error;
use crate::fetch::{Fetcher, GitFetcher, LocalSnapshot, Revision, UpdateStatus};
use crate::parse::{self, Category};
use crate::records::{AdTypeInfo, AssignedUuid, CompanyIdentifier};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

pub use crate::parse::{AdTypeTable, CompanyIdentifierTable, UuidTable};

enum TableState<T> {
    Uninitialized,
    Loaded(Arc<T>),
}

/// A lazily loaded table
///
/// The mutex is held for the entire load so that concurrent lookups of an uninitialized table
/// only parse the files once.
struct Table<T> {
    category: Category,
    state: Mutex<TableState<T>>,
}

impl<T> Table<T> {
    fn new(category: Category) -> Self {
        Table {
            category,
            state: Mutex::new(TableState::Uninitialized),
        }
    }

    fn get_or_load<F>(&self, load: F) -> Result<Arc<T>, Error>
    where
        F: FnOnce() -> Result<T, Error>,
    {
        // a panic while loading leaves the state as it was, so a poisoned lock is still usable
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);

        if let TableState::Loaded(table) = &*state {
            return Ok(table.clone());
        }

        log::debug!("loading the {} table", self.category);

        let table = Arc::new(load()?);

        *state = TableState::Loaded(table.clone());

        Ok(table)
    }

    fn invalidate(&self) {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = TableState::Uninitialized;
    }

    fn is_loaded(&self) -> bool {
        matches!(
            *self.state.lock().unwrap_or_else(PoisonError::into_inner),
            TableState::Loaded(_)
        )
    }
}

/// A client of the registry
///
/// ```no_run
/// # use bluenumbers::{Config, Registry};
/// # fn main() -> Result<(), bluenumbers::Error> {
/// let registry = Registry::from_config(Config::default().with_snapshot_dir("bluetooth_sig_public"));
///
/// let uuid = registry.get_uuid(0x180F)?.expect("battery service");
///
/// assert_eq!("Battery", uuid.name);
/// # Ok(())
/// # }
/// ```
pub struct Registry {
    fetcher: Box<dyn Fetcher>,
    uuids: Table<UuidTable>,
    company_identifiers: Table<CompanyIdentifierTable>,
    ad_types: Table<AdTypeTable>,
    snapshot: RwLock<()>,
}

impl Registry {
    /// Create a registry that uses `fetcher` to get the snapshot
    pub fn new<F>(fetcher: F) -> Self
    where
        F: Fetcher + 'static,
    {
        Registry {
            fetcher: Box::new(fetcher),
            uuids: Table::new(Category::Uuids),
            company_identifiers: Table::new(Category::CompanyIdentifiers),
            ad_types: Table::new(Category::AdTypes),
            snapshot: RwLock::new(()),
        }
    }

    /// Create a registry that keeps its snapshot with git
    pub fn from_config(config: Config) -> Self {
        Registry::new(GitFetcher::from_config(&config))
    }

    /// Create a registry over a snapshot directory that already exists
    pub fn local<P: Into<PathBuf>>(dir: P) -> Self {
        Registry::new(LocalSnapshot::new(dir))
    }

    /// The directory of the snapshot
    pub fn snapshot_dir(&self) -> &Path {
        self.fetcher.snapshot_dir()
    }

    /// Get the revision of the snapshot
    pub fn revision(&self) -> Result<Option<Revision>, Error> {
        Ok(self.fetcher.revision()?)
    }

    /// Check if the table of `category` is loaded
    pub fn is_loaded(&self, category: Category) -> bool {
        match category {
            Category::Uuids => self.uuids.is_loaded(),
            Category::CompanyIdentifiers => self.company_identifiers.is_loaded(),
            Category::AdTypes => self.ad_types.is_loaded(),
        }
    }

    /// Load the table of `category` if it is not already loaded
    pub fn load(&self, category: Category) -> Result<(), Error> {
        match category {
            Category::Uuids => self.uuids().map(drop),
            Category::CompanyIdentifiers => self.company_identifiers().map(drop),
            Category::AdTypes => self.ad_types().map(drop),
        }
    }

    fn load_with<T, P>(&self, category: Category, parse: P) -> Result<T, Error>
    where
        P: FnOnce(&Path) -> Result<T, crate::error::ParseError>,
    {
        {
            let _write = self.snapshot.write().unwrap_or_else(PoisonError::into_inner);

            self.fetcher.ensure_present()?;
        }

        // a concurrent update invalidates this table only after it is stored
        let table = {
            let _read = self.snapshot.read().unwrap_or_else(PoisonError::into_inner);

            parse(self.fetcher.snapshot_dir())?
        };

        log::info!("loaded the {} table from {}", category, self.snapshot_dir().display());

        Ok(table)
    }

    /// Get the table of UUIDs
    pub fn uuids(&self) -> Result<Arc<UuidTable>, Error> {
        self.uuids
            .get_or_load(|| self.load_with(Category::Uuids, parse::parse_uuids))
    }

    /// Get the table of company identifiers
    pub fn company_identifiers(&self) -> Result<Arc<CompanyIdentifierTable>, Error> {
        self.company_identifiers
            .get_or_load(|| self.load_with(Category::CompanyIdentifiers, parse::parse_company_identifiers))
    }

    /// Get the table of AD types
    pub fn ad_types(&self) -> Result<Arc<AdTypeTable>, Error> {
        self.ad_types
            .get_or_load(|| self.load_with(Category::AdTypes, parse::parse_ad_types))
    }

    /// Get an assigned UUID by its 16 bit value
    pub fn get_uuid(&self, short_uuid: u16) -> Result<Option<AssignedUuid>, Error> {
        Ok(self.uuids()?.get(short_uuid).cloned())
    }

    /// Get an assigned UUID by its identifier
    pub fn get_uuid_by_id(&self, id: &str) -> Result<Option<AssignedUuid>, Error> {
        Ok(self.uuids()?.get_by_id(id).cloned())
    }

    pub fn get_company_identifier(&self, value: u16) -> Result<Option<CompanyIdentifier>, Error> {
        Ok(self.company_identifiers()?.get(&value).cloned())
    }

    pub fn get_ad_type(&self, value: u8) -> Result<Option<AdTypeInfo>, Error> {
        Ok(self.ad_types()?.get(&value).cloned())
    }

    /// Update the snapshot
    ///
    /// Every table is invalidated after the fetcher updates the snapshot, even when the revision
    /// did not change. Tables are invalidated only if the fetcher succeeds.
    pub fn update(&self) -> Result<UpdateStatus, Error> {
        // the snapshot lock is released before the tables are invalidated as a loading table holds
        // its own lock while waiting on the snapshot lock
        let status = {
            let _write = self.snapshot.write().unwrap_or_else(PoisonError::into_inner);

            self.fetcher.update()?
        };

        self.uuids.invalidate();
        self.company_identifiers.invalidate();
        self.ad_types.invalidate();

        log::info!("snapshot at {} update status: {:?}", self.snapshot_dir().display(), status);

        Ok(status)
    }

    /// Write every table as JSON into `dir`
    ///
    /// The files are `uuids.json`, `company_identifiers.json`, and `ad_types.json`. Each one is an
    /// object of the records keyed by their value. The paths of the files are returned.
    pub fn export_json<P: AsRef<Path>>(&self, dir: P) -> Result<Vec<PathBuf>, Error> {
        let dir = dir.as_ref();

        std::fs::create_dir_all(dir).map_err(|source| Error::Write {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut written = Vec::with_capacity(Category::ALL.len());

        for category in Category::ALL {
            let json = match category {
                Category::Uuids => serde_json::to_string_pretty(self.uuids()?.as_map()),
                Category::CompanyIdentifiers => serde_json::to_string_pretty(&*self.company_identifiers()?),
                Category::AdTypes => serde_json::to_string_pretty(&*self.ad_types()?),
            }
            .map_err(|source| Error::Json { category, source })?;

            let path = dir.join(category.name()).with_extension("json");

            std::fs::write(&path, json).map_err(|source| Error::Write {
                path: path.clone(),
                source,
            })?;

            log::debug!("exported {} to {}", category, path.display());

            written.push(path);
        }

        Ok(written)
    }
}

impl core::fmt::Debug for Registry {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.debug_struct("Registry")
            .field("snapshot_dir", &self.snapshot_dir())
            .field("uuids_loaded", &self.uuids.is_loaded())
            .field("company_identifiers_loaded", &self.company_identifiers.is_loaded())
            .field("ad_types_loaded", &self.ad_types.is_loaded())
            .finish()
    }
}
