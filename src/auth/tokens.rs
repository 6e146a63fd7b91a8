//! Session token extraction.
//!
//! The portal never returns its bearer or anti-forgery token in a response
//! body; both only exist as cookies, and each is scoped to a different path
//! (root, the `/wand` and `/wand2` API mounts, the worker app). A cookie
//! store only returns cookies whose path matches the request URL, so the jar
//! is queried once per known path and the results merged.

use super::session::Session;
use crate::errors::{AppError, AppResult};
use cookie::Cookie;
use percent_encoding::percent_decode_str;
use reqwest::Url;
use reqwest::cookie::CookieStore;
use std::collections::HashSet;

/// Paths under which the portal sets session cookies.
const COOKIE_SCOPE_PATHS: &[&str] = &[
    "/",
    "/wand",
    "/wand/",
    "/wand2",
    "/wand2/",
    "/wand/app/worker/",
    "/wand/app/worker/index.html",
];

const ACCESS_TOKEN_COOKIES: &[&str] = &["productionaccess_token", "access_token"];

const XSRF_TOKEN_COOKIES: &[&str] = &["xsrf-token", "x-xsrf-token", "xsrftoken", "_xsrf"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCookie {
    pub name: String,
    pub value: String,
}

/// Bearer token for `Authorization` headers.
pub fn extract_access_token(session: &Session, base_url: &str) -> AppResult<String> {
    let cookies = collect_session_cookies(session, base_url)?;
    find_token(&cookies, ACCESS_TOKEN_COOKIES).ok_or(AppError::AccessTokenNotFound)
}

/// Anti-forgery token for the `x-xsrf-token` header on mutating requests.
pub fn extract_xsrf_token(session: &Session, base_url: &str) -> AppResult<String> {
    let cookies = collect_session_cookies(session, base_url)?;
    find_token(&cookies, XSRF_TOKEN_COOKIES).ok_or(AppError::XsrfTokenNotFound)
}

/// Every cookie visible under any known path of `base_url`'s host,
/// deduplicated by (case-folded name, value) in first-seen order.
pub fn collect_session_cookies(session: &Session, base_url: &str) -> AppResult<Vec<SessionCookie>> {
    let jar = session.cookie_jar().ok_or(AppError::CookieJarMissing)?;

    let base = Url::parse(base_url).map_err(|e| AppError::InvalidBaseUrl {
        url: base_url.to_string(),
        reason: e.to_string(),
    })?;

    let mut seen = HashSet::new();
    let mut out = Vec::new();

    for url in scope_urls(&base) {
        let Some(header) = jar.cookies(&url) else {
            continue;
        };
        let Ok(header) = header.to_str() else {
            continue;
        };

        for cookie in parse_cookie_header(header) {
            if seen.insert((cookie.name.to_lowercase(), cookie.value.clone())) {
                out.push(cookie);
            }
        }
    }

    Ok(out)
}

fn scope_urls(base: &Url) -> Vec<Url> {
    COOKIE_SCOPE_PATHS
        .iter()
        .map(|path| {
            let mut url = base.clone();
            url.set_path(path);
            url.set_query(None);
            url.set_fragment(None);
            url
        })
        .collect()
}

/// Split a `Cookie:` header value (`a=1; b=2`) into name/value pairs.
/// Malformed pairs are skipped.
fn parse_cookie_header(header: &str) -> impl Iterator<Item = SessionCookie> + '_ {
    Cookie::split_parse(header)
        .filter_map(Result::ok)
        .filter(|c| !c.name().is_empty())
        .map(|c| SessionCookie {
            name: c.name().to_string(),
            value: c.value().to_string(),
        })
}

fn find_token(cookies: &[SessionCookie], aliases: &[&str]) -> Option<String> {
    cookies
        .iter()
        .filter(|c| aliases.iter().any(|alias| c.name.eq_ignore_ascii_case(alias)))
        .map(|c| decode_cookie_value(&c.value))
        .find(|v| !v.is_empty())
}

/// Strip surrounding quotes and query-unescape. A value that does not
/// decode cleanly is returned as-is rather than failing the lookup.
fn decode_cookie_value(raw: &str) -> String {
    let unquoted = raw.trim_matches('"');
    match query_unescape(unquoted) {
        Some(decoded) if !decoded.is_empty() => decoded,
        _ => unquoted.to_string(),
    }
}

/// Form-style unescape: `+` is a space, `%XX` a byte. `None` on a malformed
/// escape or when the bytes are not UTF-8.
fn query_unescape(s: &str) -> Option<String> {
    let bytes = s.as_bytes();
    let malformed = bytes.iter().enumerate().any(|(i, &b)| {
        b == b'%'
            && !(bytes.get(i + 1).is_some_and(u8::is_ascii_hexdigit)
                && bytes.get(i + 2).is_some_and(u8::is_ascii_hexdigit))
    });
    if malformed {
        return None;
    }

    let spaced = s.replace('+', " ");
    percent_decode_str(&spaced)
        .decode_utf8()
        .ok()
        .map(|decoded| decoded.into_owned())
}
