//! Worker-portal JSON API client.
//!
//! Requests are issued one at a time on the borrowed session. Each request
//! carries a bearer token when one can be recovered from the cookie jar;
//! otherwise it goes out unauthenticated and the portal decides.

pub mod models;

use crate::auth::Session;
use crate::auth::tokens::extract_access_token;
use crate::errors::{AppError, AppResult};
use log::debug;
use models::EngagementPage;
use reqwest::StatusCode;
use reqwest::blocking::{RequestBuilder, Response};
use reqwest::header::{ACCEPT, ORIGIN, REFERER};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::BTreeMap;

pub use models::{Engagement, SaveBillingItemsResponse};

/// How much of an error body is echoed back in `HttpStatus` errors.
const ERROR_BODY_LIMIT: usize = 4096;

pub struct ApiClient<'s> {
    base_url: String,
    session: &'s Session,
}

impl<'s> ApiClient<'s> {
    pub fn new(base_url: &str, session: &'s Session) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn current_user(&self) -> AppResult<Value> {
        self.get_json("/wand2/api/users/current?noCache=true", &[])
    }

    pub fn engagement_items(&self, page_no: u32, page_size: u32) -> AppResult<Vec<Engagement>> {
        let page: EngagementPage = self.get_json(
            "/wand2/engagement/api/engagement-items",
            &[
                ("pageNo", page_no.to_string()),
                ("pageSize", page_size.to_string()),
            ],
        )?;
        Ok(page.content)
    }

    /// Week metadata document for the week containing `selected_date_mdy`.
    pub fn metadata(&self, engagement_id: i64, selected_date_mdy: &str) -> AppResult<Value> {
        self.get_json(
            "/wand2/api/billing/billing-items/0/metadata",
            &week_query(engagement_id, selected_date_mdy),
        )
    }

    /// Aggregate hours per category for the week.
    pub fn total_hours(
        &self,
        engagement_id: i64,
        selected_date_mdy: &str,
    ) -> AppResult<BTreeMap<String, f64>> {
        let totals: Option<BTreeMap<String, f64>> = self.get_json(
            "/wand2/api/billing/billing-items/0/worker/totalhours",
            &week_query(engagement_id, selected_date_mdy),
        )?;
        Ok(totals.unwrap_or_default())
    }

    /// Post a patched week document. `xsrf_token` must come from the same session.
    pub fn save_billing_items(
        &self,
        payload: &Value,
        xsrf_token: &str,
    ) -> AppResult<SaveBillingItemsResponse> {
        let endpoint = format!("{}/wand2/api/billing/billing-items", self.base_url);
        debug!("POST {}", endpoint);

        let req = self
            .session
            .client()
            .post(&endpoint)
            .header(ACCEPT, "application/json")
            .header(ORIGIN, &self.base_url)
            .header(REFERER, format!("{}/wand/app/worker/index.html", self.base_url))
            .header("x-xsrf-token", xsrf_token)
            .json(payload);

        let resp = self.authorized(req).send()?;
        let resp = ensure_ok("save", resp)?;
        Ok(resp.json()?)
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> AppResult<T> {
        let endpoint = format!("{}{}", self.base_url, path);
        debug!("GET {} {:?}", endpoint, query);

        let req = self
            .session
            .client()
            .get(&endpoint)
            .query(query)
            .header(ACCEPT, "application/json");

        let resp = self.authorized(req).send()?;
        let resp = ensure_ok(&format!("GET {endpoint}"), resp)?;
        Ok(resp.json()?)
    }

    fn authorized(&self, req: RequestBuilder) -> RequestBuilder {
        match extract_access_token(self.session, &self.base_url) {
            Ok(token) => req.bearer_auth(token),
            Err(e) => {
                debug!("sending request without bearer token: {}", e);
                req
            }
        }
    }
}

fn week_query(engagement_id: i64, selected_date_mdy: &str) -> [(&'static str, String); 2] {
    [
        ("engagementId", engagement_id.to_string()),
        ("selectedDate", selected_date_mdy.to_string()),
    ]
}

fn ensure_ok(context: &str, resp: Response) -> AppResult<Response> {
    let status = resp.status();
    debug!("{} -> {}", context, status);
    if status == StatusCode::OK {
        return Ok(resp);
    }

    let body: String = resp
        .text()
        .unwrap_or_default()
        .trim()
        .chars()
        .take(ERROR_BODY_LIMIT)
        .collect();

    Err(AppError::HttpStatus {
        context: context.to_string(),
        status: status.as_u16(),
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn week_query_uses_portal_parameter_names() {
        let q = week_query(12345678, "02/16/2026");
        assert_eq!(q[0], ("engagementId", "12345678".to_string()));
        assert_eq!(q[1], ("selectedDate", "02/16/2026".to_string()));
    }

    #[test]
    fn base_url_is_normalized() {
        let session = Session::from_parts(reqwest::blocking::Client::new(), None);
        let api = ApiClient::new("https://portal.example.com///", &session);
        assert_eq!(api.base_url(), "https://portal.example.com");
    }
}
