use url::Url;

/// True when `raw` parses as an absolute URL whose host is `domain` or one of
/// its subdomains, compared case-insensitively. Never panics on bad input.
pub fn is_vendor_url(raw: &str, domain: &str) -> bool {
    let Ok(parsed) = Url::parse(raw.trim()) else {
        return false;
    };
    let Some(host) = parsed.host_str() else {
        return false;
    };

    let host = host.trim_end_matches('.').to_ascii_lowercase();
    let domain = domain.to_ascii_lowercase();
    host == domain || host.ends_with(&format!(".{domain}"))
}
