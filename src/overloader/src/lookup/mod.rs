mod service_map;

use std::error::Error;
use std::sync::Arc;

use snafu::prelude::*;

use crate::value::Value;

pub use service_map::ServiceMap;

/// A key-value service consulted for constructor dependencies and injected
/// resources.
///
/// The overloader never owns the entries behind a [`Lookup`]; it only asks
/// whether a key exists and fetches a value for it.
#[cfg_attr(test, mockall::automock)]
pub trait Lookup: Send + Sync {
    fn has(&self, key: &str) -> bool;

    fn get(&self, key: &str) -> Result<Value, LookupError>;
}

#[derive(Debug, Clone, Snafu)]
#[non_exhaustive]
pub enum LookupError {
    #[snafu(display("no service registered under {key}"))]
    #[non_exhaustive]
    NotFound { key: String },
    #[snafu(display("the factory for service {key} failed"))]
    #[non_exhaustive]
    Factory {
        key: String,
        source: Arc<dyn Error + Send + Sync>,
    },
}
