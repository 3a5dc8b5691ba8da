use url::{Host, Url};

/// Extracts the domain from a URL
///
/// # Examples
///
/// ```
/// use url::Url;
/// use market_pulse::url::extract_domain;
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.com".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Returns the organization label of a URL's host
///
/// This is the registrable domain without its public suffix, looked up in
/// the public suffix list: `www.nypost.com` → `nypost`, `news.bbc.co.uk` →
/// `bbc`, `myblog.github.io` → `myblog`. IP hosts are returned whole. A host
/// with no label left of its suffix (`localhost`) yields its leftmost label.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use market_pulse::url::registrable_domain;
///
/// let url = Url::parse("https://finance.yahoo.com/news/x.html").unwrap();
/// assert_eq!(registrable_domain(&url), Some("yahoo".to_string()));
/// ```
pub fn registrable_domain(url: &Url) -> Option<String> {
    match url.host()? {
        Host::Ipv4(addr) => return Some(addr.to_string()),
        Host::Ipv6(addr) => return Some(addr.to_string()),
        Host::Domain(_) => {}
    }

    let host = extract_domain(url)?;
    let host = host.trim_end_matches('.');
    let registrable = psl::domain_str(host).unwrap_or(host);

    registrable
        .split('.')
        .next()
        .filter(|label| !label.is_empty())
        .map(str::to_string)
}

/// Capitalizes the first letter of every alphabetic run and lowercases the rest
///
/// `"nypost"` → `"Nypost"`, `"fox-business"` → `"Fox-Business"`.
pub fn title_case(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut previous_is_letter = false;

    for c in text.chars() {
        if c.is_alphabetic() {
            if previous_is_letter {
                result.extend(c.to_lowercase());
            } else {
                result.extend(c.to_uppercase());
            }
            previous_is_letter = true;
        } else {
            result.push(c);
            previous_is_letter = false;
        }
    }

    result
}

/// Derives an article's author from the publisher's domain
///
/// Authors are never scraped from the page; the title-cased organization
/// label stands in for the byline.
pub fn author_from_url(url: &Url) -> String {
    registrable_domain(url)
        .map(|domain| title_case(&domain))
        .unwrap_or_default()
}
