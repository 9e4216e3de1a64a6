//! Query path routing.
//!
//! Paths look like `custom/<module>/<endpoint>/<args>...`. Only the asset
//! module answers queries; anything else is an unknown request.

use bk_02_asset::MODULE_NAME;
use shared_types::{Context, SdkError};

use crate::container::ModuleContainer;

pub const QUERY_ROUTE_CUSTOM: &str = "custom";

pub fn route_query(
    modules: &ModuleContainer,
    ctx: &Context<'_>,
    path: &str,
    data: &[u8],
) -> Result<Vec<u8>, SdkError> {
    let parts: Vec<&str> = path.trim_matches('/').split('/').collect();
    match parts.as_slice() {
        [QUERY_ROUTE_CUSTOM, MODULE_NAME, rest @ ..] => modules.querier.query(ctx, rest, data),
        _ => Err(SdkError::UnknownRequest(format!("unknown query path {path}"))),
    }
}
