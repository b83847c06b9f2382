pub mod http;
pub mod types;

use anyhow::Result;
use std::collections::BTreeMap;

pub use types::{PortalResponse, RequestContext};

/// Transport to the reporting portal. `Err` means the request never produced a response.
pub trait Portal {
    fn get(&self, url: &str, ctx: &RequestContext) -> Result<PortalResponse>;
    fn post_form(
        &self,
        url: &str,
        ctx: &RequestContext,
        form: &BTreeMap<String, String>,
    ) -> Result<PortalResponse>;
}
