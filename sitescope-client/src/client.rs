use reqwest::{Client, header::ACCEPT};
use serde_json::Value;
use sitescope_model::{Envelope, SiteInfo};

use crate::{context::SiteContext, error::ClientError};

/// The four nested collections requested alongside the site resource, in one
/// round trip instead of four follow-up requests.
pub const EXPANSIONS: &str = "Webs,ContentTypes,Fields,Lists";

const ODATA_VERBOSE: &str = "application/json;odata=verbose";

/// Client for the expanded site-metadata query.
#[derive(Debug, Clone)]
pub struct SiteClient {
    http: Client,
    ctx: SiteContext,
}

impl SiteClient {
    /// Build a client from an explicit context. The context's timeout is
    /// applied to every request; nothing global is mutated.
    pub fn new(ctx: &SiteContext) -> Result<Self, ClientError> {
        let http = Client::builder().timeout(ctx.timeout).build()?;
        Ok(Self {
            http,
            ctx: ctx.clone(),
        })
    }

    /// The endpoint the expanded query is issued against.
    pub fn request_url(&self) -> String {
        site_request_url(&self.ctx.base_url)
    }

    /// Issue the single expanded query and decode the combined result.
    ///
    /// One request, one suspension point. No retries, no caching, no
    /// pagination; a failure is returned to the caller as a categorized
    /// [`ClientError`] rather than being swallowed.
    pub async fn fetch_site_info(&self) -> Result<SiteInfo, ClientError> {
        let url = self.request_url();
        tracing::debug!(%url, "issuing expanded site query");

        let mut request = self
            .http
            .get(&url)
            .header(ACCEPT, ODATA_VERBOSE)
            .query(&[("$expand", EXPANSIONS)]);
        if let Some(token) = &self.ctx.auth_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(%status, "site query rejected");
            return Err(ClientError::Status { status, body });
        }

        let body: Value = response.json().await?;
        decode_envelope(body)
    }
}

fn site_request_url(base_url: &url::Url) -> String {
    format!("{}/_api/web", base_url.as_str().trim_end_matches('/'))
}

/// Validate the envelope shape before handing the result to rendering.
///
/// An absent or `null` collection member is tolerated (it renders as an empty
/// tab), but a member of the wrong shape is reported as a malformed-response
/// condition instead of surfacing a decoder fault.
pub fn decode_envelope(body: Value) -> Result<SiteInfo, ClientError> {
    let site = body.get("d").ok_or_else(|| {
        ClientError::MalformedResponse("missing 'd' envelope member".into())
    })?;
    if !site.is_object() {
        return Err(ClientError::MalformedResponse(
            "'d' envelope member is not an object".into(),
        ));
    }

    for name in ["Webs", "ContentTypes", "Fields", "Lists"] {
        if let Some(member) = site.get(name)
            && !member.is_null()
            && !member.get("results").is_some_and(Value::is_array)
        {
            return Err(ClientError::MalformedResponse(format!(
                "'{name}' is not a results-wrapped collection"
            )));
        }
    }

    let envelope: Envelope = serde_json::from_value(body)
        .map_err(|err| ClientError::MalformedResponse(err.to_string()))?;
    Ok(envelope.d)
}
