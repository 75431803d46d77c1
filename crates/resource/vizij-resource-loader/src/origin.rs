//! URL origin comparison for CORS decisions.

use std::fmt;

/// Scheme, host and port of an absolute URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Origin {
    scheme: String,
    host: String,
    port: Option<u16>,
}

fn default_port(scheme: &str) -> Option<u16> {
    match scheme {
        "http" | "ws" => Some(80),
        "https" | "wss" => Some(443),
        _ => None,
    }
}

impl Origin {
    /// Origin of an absolute `scheme://host[:port]/...` URL. Relative URLs and
    /// schemes without an authority (e.g. `data:`) have none.
    pub fn parse(url: &str) -> Option<Origin> {
        let (scheme, rest) = url.split_once("://")?;
        if scheme.is_empty()
            || !scheme
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        {
            return None;
        }
        let scheme = scheme.to_ascii_lowercase();
        Self::from_authority(scheme, rest)
    }

    fn from_authority(scheme: String, rest: &str) -> Option<Origin> {
        let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
        let authority = &rest[..end];
        let authority = authority.rsplit_once('@').map_or(authority, |(_, host)| host);

        let (host, port) = match authority.rsplit_once(':') {
            // Bracketed IPv6 literals contain colons of their own.
            // An empty port means the scheme default.
            Some((host, "")) => (host, None),
            Some((host, port)) if !port.contains(']') => (host, Some(port.parse::<u16>().ok()?)),
            _ => (authority, None),
        };
        let port = port.or_else(|| default_port(&scheme));
        Some(Origin {
            host: host.to_ascii_lowercase(),
            port,
            scheme,
        })
    }

    /// Resolve `url` against this origin: relative URLs share it, protocol
    /// relative URLs (`//host/...`) inherit its scheme.
    pub fn resolve(&self, url: &str) -> Option<Origin> {
        if let Some(rest) = url.strip_prefix("//") {
            return Self::from_authority(self.scheme.clone(), rest);
        }
        if url.contains("://") {
            return Origin::parse(url);
        }
        if is_data_uri(url) {
            return None;
        }
        Some(self.clone())
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> Option<u16> {
        self.port
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}", self.scheme, self.host)?;
        match self.port {
            Some(port) if Some(port) != default_port(&self.scheme) => write!(f, ":{port}"),
            _ => Ok(()),
        }
    }
}

pub fn is_data_uri(url: &str) -> bool {
    url.get(..5).is_some_and(|p| p.eq_ignore_ascii_case("data:"))
}

/// Whether fetching `url` from a page at `page` crosses origins. Without a page
/// origin every absolute URL counts as cross origin and relative URLs do not.
pub fn is_cross_origin(page: Option<&Origin>, url: &str) -> bool {
    match page {
        Some(page) => page.resolve(url).as_ref() != Some(page),
        None => url.contains("://") || url.starts_with("//"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_host_and_default_port() {
        let o = Origin::parse("HTTPS://Example.com/a/b.png?x=1").unwrap();
        assert_eq!(o.scheme(), "https");
        assert_eq!(o.host(), "example.com");
        assert_eq!(o.port(), Some(443));
        assert_eq!(o.to_string(), "https://example.com");
    }

    #[test]
    fn explicit_default_port_is_same_origin() {
        let page = Origin::parse("http://localhost/index.html").unwrap();
        assert!(!is_cross_origin(Some(&page), "http://localhost:80/img.png"));
        assert!(is_cross_origin(Some(&page), "http://localhost:8080/img.png"));
        assert!(is_cross_origin(Some(&page), "https://localhost/img.png"));
    }

    #[test]
    fn relative_and_protocol_relative_urls() {
        let page = Origin::parse("https://app.example.com/").unwrap();
        assert!(!is_cross_origin(Some(&page), "images/a.png"));
        assert!(!is_cross_origin(Some(&page), "//app.example.com/a.png"));
        assert!(is_cross_origin(Some(&page), "//cdn.example.com/a.png"));
        assert!(!is_cross_origin(None, "images/a.png"));
        assert!(is_cross_origin(None, "https://cdn.example.com/a.png"));
    }

    #[test]
    fn userinfo_is_ignored() {
        let o = Origin::parse("http://user:pw@host:81/x").unwrap();
        assert_eq!(o.host(), "host");
        assert_eq!(o.port(), Some(81));
    }

    #[test]
    fn empty_port_falls_back_to_scheme_default() {
        let o = Origin::parse("http://host:/x").unwrap();
        assert_eq!(o.host(), "host");
        assert_eq!(o.port(), Some(80));
        let page = Origin::parse("http://host/index.html").unwrap();
        assert!(!is_cross_origin(Some(&page), "http://host:/img.png"));
    }

    #[test]
    fn data_uris_have_no_origin() {
        assert!(is_data_uri("DATA:image/png;base64,AAAA"));
        assert!(Origin::parse("data:image/png;base64,AAAA").is_none());
    }
}
