/// Canonical storage form of a domain.
///
/// Each prefix is stripped at most once, in this order: one of `*.`, `*` or
/// `.`; then one of `http://` or `https://`; then `www.`. The remainder is
/// lowercased. Prefix matching ignores ASCII case.
pub fn normalize(candidate: &str) -> String {
    let mut domain = candidate.trim();

    domain = strip_first(domain, &["*.", "*", "."]);
    domain = strip_first(domain, &["http://", "https://"]);
    domain = strip_first(domain, &["www."]);

    domain.to_lowercase()
}

fn strip_first<'a>(value: &'a str, prefixes: &[&str]) -> &'a str {
    for prefix in prefixes {
        if let Some(rest) = strip_prefix_ignore_case(value, prefix) {
            return rest;
        }
    }
    value
}

fn strip_prefix_ignore_case<'a>(value: &'a str, prefix: &str) -> Option<&'a str> {
    let head = value.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        Some(&value[prefix.len()..])
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_wildcard_and_www() {
        assert_eq!(normalize("*.WWW.Example.COM"), "example.com");
        assert_eq!(normalize("*.www.EXAMPLE.com"), "example.com");
        assert_eq!(normalize("*.api.example.com"), "api.example.com");
    }

    #[test]
    fn test_strips_protocol() {
        assert_eq!(normalize("https://www.example.com"), "example.com");
        assert_eq!(normalize("http://example.com"), "example.com");
        assert_eq!(normalize("HTTPS://Example.com"), "example.com");
    }

    #[test]
    fn test_single_pass_per_prefix() {
        assert_eq!(normalize("**.example.com"), "*.example.com");
        assert_eq!(normalize("*example.com"), "example.com");
        assert_eq!(normalize(".example.com"), "example.com");
        assert_eq!(normalize("www.www.example.com"), "www.example.com");
        assert_eq!(normalize("*.https://example.com"), "example.com");
    }

    #[test]
    fn test_keeps_internal_wildcards_and_service_labels() {
        assert_eq!(normalize("svc-*.Domain.com"), "svc-*.domain.com");
        assert_eq!(normalize("_Collab-Edge.5g.dell.com"), "_collab-edge.5g.dell.com");
    }

    #[test]
    fn test_trims_whitespace() {
        assert_eq!(normalize("  Example.com\r\n"), "example.com");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_non_ascii_prefix_does_not_panic() {
        assert_eq!(normalize("ü.example.com"), "ü.example.com");
        assert_eq!(normalize("wwü"), "wwü");
    }
}
