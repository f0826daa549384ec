//! Notice redirects
//!
//! `303 See Other` responses that queue notices for the next request.

use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use kernel::notice::Notice;
use platform::cookie::{CookieConfig, delete_cookie_header, extract_cookie, set_cookie_header};
use platform::flash;

use crate::application::guard::GuardRedirect;

/// Notices already queued on the request
pub fn pending_notices(headers: &HeaderMap, flash_cookie: &CookieConfig) -> Vec<Notice> {
    extract_cookie(headers, &flash_cookie.name)
        .map(|token| flash::decode(&token))
        .unwrap_or_default()
}

/// Remove queued notices
pub fn clear_notices(flash_cookie: &CookieConfig) -> HeaderValue {
    delete_cookie_header(flash_cookie)
}

#[derive(Debug)]
pub struct NoticeRedirect {
    location: String,
    notices: Vec<Notice>,
    cookies: Vec<HeaderValue>,
}

impl NoticeRedirect {
    pub fn to(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            notices: Vec::new(),
            cookies: Vec::new(),
        }
    }

    pub fn with_notice(mut self, notice: Notice) -> Self {
        self.notices.push(notice);
        self
    }

    /// Extra `Set-Cookie` value (session cookie and the like)
    pub fn with_cookie(mut self, cookie: HeaderValue) -> Self {
        self.cookies.push(cookie);
        self
    }

    /// Appends to the notices already queued on `request_headers`.
    pub fn respond(self, flash_cookie: &CookieConfig, request_headers: &HeaderMap) -> Response {
        let mut notices = pending_notices(request_headers, flash_cookie);
        notices.extend(self.notices);

        let location = HeaderValue::from_str(&self.location)
            .unwrap_or_else(|_| HeaderValue::from_static("/"));

        let mut response = StatusCode::SEE_OTHER.into_response();
        let headers = response.headers_mut();
        headers.insert(header::LOCATION, location);
        if !notices.is_empty() {
            headers.append(
                header::SET_COOKIE,
                set_cookie_header(flash_cookie, &flash::encode(&notices)),
            );
        }
        for cookie in self.cookies {
            headers.append(header::SET_COOKIE, cookie);
        }

        response
    }
}

impl From<GuardRedirect> for NoticeRedirect {
    fn from(redirect: GuardRedirect) -> Self {
        NoticeRedirect::to(redirect.location).with_notice(redirect.notice)
    }
}
