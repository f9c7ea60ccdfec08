//! Bluetooth SIG assigned numbers
//!
//! The Bluetooth SIG publishes the assigned numbers (UUIDs, company identifiers, AD types, and
//! others) as YAML files within a public git repository. This library keeps a local clone of that
//! repository and parses the files into lookup tables.
//!
//! A [`Registry`] owns the tables. Each category is parsed the first time it is looked up and then
//! kept until [`Registry::update`] pulls a new revision of the repository.
//!
//! ```no_run
//! # fn main() -> Result<(), bluenumbers::Error> {
//! let registry = bluenumbers::Registry::from_config(bluenumbers::Config::from_env());
//!
//! if let Some(company) = registry.get_company_identifier(0x004C)? {
//!     println!("{}", company.name);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! For the cases where passing a registry around is not wanted, the functions at the root of this
//! crate use a process wide registry configured from the environment (see [`Config::from_env`]).
//!
//! The advertising data types of the workspace crate `bluenumbers-gap` are re-exported within
//! [`gap`], and [`describe`] joins a decoded advertising packet with the registry.

pub mod config;
pub mod describe;
pub mod error;
pub mod fetch;
mod global;
pub mod parse;
pub mod records;
pub mod registry;

pub use bluenumbers_gap as gap;
pub use config::Config;
pub use error::{Error, FetchError, ParseError};
pub use fetch::{Fetcher, GitFetcher, LocalSnapshot, Revision, UpdateStatus};
pub use global::{get_ad_type, get_company_identifier, get_uuid, get_uuid_by_id, registry, update};
pub use parse::Category;
pub use records::{AdTypeInfo, AssignedUuid, CompanyIdentifier};
pub use registry::Registry;
