//! Target URL computation.
//!
//! Pure functions; nothing here touches the network or the environment.

/// Strip the mount prefix from an inbound path.
///
/// The prefix only matches at a segment boundary, and one slash after it is
/// collapsed, so `/api/op`, `/api/op/` and `/api/op/x` yield `/`, `/` and `/x`.
/// Paths outside the mount are returned unchanged.
pub fn strip_mount_prefix<'a>(path: &'a str, prefix: &str) -> &'a str {
    let prefix = prefix.trim_end_matches('/');
    match path.strip_prefix(prefix) {
        Some("") => "/",
        Some(rest) if rest.starts_with('/') => rest,
        _ => path,
    }
}

/// Build `<base><remainder><query>`.
///
/// `query` is the raw query string without its `?`; `Some("")` still emits a
/// bare `?` so the inbound URL is reproduced verbatim.
pub fn build_target_url(base: &str, prefix: &str, path: &str, query: Option<&str>) -> String {
    let base = base.strip_suffix('/').unwrap_or(base);
    let remainder = strip_mount_prefix(path, prefix);

    let mut target = String::with_capacity(base.len() + remainder.len() + 1);
    target.push_str(base);
    target.push_str(remainder);
    if let Some(query) = query {
        target.push('?');
        target.push_str(query);
    }
    target
}

/// The `host[:port]` component of a base URL, as sent in the `Host` header.
pub fn upstream_host(base: &str) -> Option<String> {
    let url = url::Url::parse(base).ok()?;
    let host = url.host_str()?;
    Some(match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    })
}
