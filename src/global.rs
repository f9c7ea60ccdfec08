//! The process wide registry
//!
//! The registry is created on first use from [`Config::from_env`]. No files are read and git is
//! not run until the first lookup.

use crate::config::Config;
use crate::error::Error;
use crate::fetch::UpdateStatus;
use crate::records::{AdTypeInfo, AssignedUuid, CompanyIdentifier};
use crate::registry::Registry;

lazy_static::lazy_static! {
    static ref DEFAULT_REGISTRY: Registry = Registry::from_config(Config::from_env());
}

/// Get the process wide registry
pub fn registry() -> &'static Registry {
    &DEFAULT_REGISTRY
}

/// Get an assigned UUID by its 16 bit value
///
/// See [`Registry::get_uuid`].
pub fn get_uuid(short_uuid: u16) -> Result<Option<AssignedUuid>, Error> {
    registry().get_uuid(short_uuid)
}

/// Get an assigned UUID by its identifier
pub fn get_uuid_by_id(id: &str) -> Result<Option<AssignedUuid>, Error> {
    registry().get_uuid_by_id(id)
}

pub fn get_company_identifier(value: u16) -> Result<Option<CompanyIdentifier>, Error> {
    registry().get_company_identifier(value)
}

pub fn get_ad_type(value: u8) -> Result<Option<AdTypeInfo>, Error> {
    registry().get_ad_type(value)
}

/// Update the snapshot of the process wide registry
///
/// See [`Registry::update`].
pub fn update() -> Result<UpdateStatus, Error> {
    registry().update()
}
