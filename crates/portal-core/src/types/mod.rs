//! Validated URL types.
//!
//! Both types enforce their invariants at construction time, so a cursor or
//! base URL that exists is always safe to request.

mod api_url;
mod page_cursor;

pub use api_url::ApiUrl;
pub use page_cursor::PageCursor;

use url::Url;

/// Checks that a URL is absolute and uses HTTPS, or HTTP for localhost.
fn check_network_url(url: &Url) -> Result<(), &'static str> {
    if url.cannot_be_a_base() {
        return Err("must be an absolute URL");
    }

    let scheme = url.scheme();
    let is_localhost = url
        .host_str()
        .is_some_and(|h| h == "localhost" || h == "127.0.0.1" || h == "[::1]" || h == "::1");

    if scheme != "https" && !(scheme == "http" && is_localhost) {
        return Err("must use HTTPS (HTTP allowed only for localhost)");
    }

    if url.host_str().is_none() {
        return Err("must have a host");
    }

    Ok(())
}
