//! Display helpers for short links.

/// Strips the scheme, a leading `www.` and one trailing slash from a URL.
///
/// `www.` is only removed at the start of the host, so a path segment such as
/// `/www.example` is kept.
///
/// # Examples
///
/// ```
/// use partner_embed::utils::pretty_url::pretty_url;
///
/// assert_eq!(pretty_url("https://www.ref.acme.com/alice/"), "ref.acme.com/alice");
/// ```
pub fn pretty_url(url: &str) -> String {
    let url = url.trim();

    let without_scheme = match url.find("://") {
        Some(pos) if url[..pos].chars().all(|c| c.is_ascii_alphanumeric() || c == '+') => {
            &url[pos + 3..]
        }
        _ => url.strip_prefix("//").unwrap_or(url),
    };

    let without_www = without_scheme
        .strip_prefix("www.")
        .unwrap_or(without_scheme);

    without_www
        .strip_suffix('/')
        .unwrap_or(without_www)
        .to_string()
}
