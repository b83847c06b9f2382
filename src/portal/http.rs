use super::{Portal, PortalResponse, RequestContext};
use crate::config::Http;
use anyhow::{Context, Result};
use reqwest::blocking::{Client, Response};
use reqwest::header::{COOKIE, HeaderMap, HeaderValue, USER_AGENT};
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::debug;

/// Blocking reqwest client. Requests are issued one at a time by the caller.
pub struct HttpPortal {
    client: Client,
}

impl HttpPortal {
    pub fn new(cfg: &Http) -> Result<Self> {
        let timeout = (cfg.timeout_seconds > 0).then(|| Duration::from_secs(cfg.timeout_seconds));
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .with_context(|| "building HTTP client")?;
        Ok(Self { client })
    }

    fn headers(ctx: &RequestContext) -> Result<HeaderMap> {
        let mut map = HeaderMap::new();
        map.insert(
            USER_AGENT,
            HeaderValue::from_str(&ctx.user_agent).with_context(|| "invalid user agent")?,
        );
        let mut cookie =
            HeaderValue::from_str(ctx.cookie()).with_context(|| "cookie is not a valid header")?;
        cookie.set_sensitive(true);
        map.insert(COOKIE, cookie);
        Ok(map)
    }
}

impl Portal for HttpPortal {
    fn get(&self, url: &str, ctx: &RequestContext) -> Result<PortalResponse> {
        debug!(url, "GET");
        let resp = self
            .client
            .get(url)
            .headers(Self::headers(ctx)?)
            .send()
            .with_context(|| format!("GET {url}"))?;
        into_response(resp)
    }

    fn post_form(
        &self,
        url: &str,
        ctx: &RequestContext,
        form: &BTreeMap<String, String>,
    ) -> Result<PortalResponse> {
        debug!(url, fields = form.len(), "POST");
        let resp = self
            .client
            .post(url)
            .headers(Self::headers(ctx)?)
            .form(form)
            .send()
            .with_context(|| format!("POST {url}"))?;
        into_response(resp)
    }
}

fn into_response(resp: Response) -> Result<PortalResponse> {
    let status = resp.status().as_u16();
    let body = resp.bytes().with_context(|| "reading response body")?.to_vec();
    Ok(PortalResponse { status, body })
}
