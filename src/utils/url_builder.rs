/// Join a base URL and a path with exactly one slash between them.
/// A path that is already absolute (`http://`, `https://`) wins.
pub fn join_url(base_url: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    let base = base_url.trim_end_matches('/');
    match path.trim_start_matches('/') {
        "" => base.to_string(),
        rest => format!("{}/{}", base, rest),
    }
}

/// Where the billing API sends the merchant after the confirmation page.
/// A request `Host` is always served over https; without one the public base URL is used.
pub fn return_url(request_host: Option<&str>, public_base_url: &str) -> String {
    match request_host.map(str::trim).filter(|h| !h.is_empty()) {
        Some(host) => format!("https://{}/app", host),
        None => join_url(public_base_url, "/app"),
    }
}

/// Append `key=value` to a path, percent-encoding the value
pub fn with_query_param(path: &str, key: &str, value: &str) -> String {
    if value.is_empty() {
        return path.to_string();
    }
    let sep = if path.contains('?') { '&' } else { '?' };
    format!("{}{}{}={}", path, sep, key, urlencoding::encode(value))
}
