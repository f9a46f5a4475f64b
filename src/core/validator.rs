use once_cell::sync::Lazy;
use regex::Regex;

pub const MAX_DOMAIN_LENGTH: usize = 253;

// Optional leading `*.`, then one or more labels that may carry `_` and `*`
// anywhere (hyphen never first/last), then a plain alphanumeric top-level label.
static DOMAIN_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^(?:\*\.)?",
        r"(?:[a-zA-Z0-9_*](?:[a-zA-Z0-9_*-]{0,61}[a-zA-Z0-9_*])?\.)+",
        r"[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?$",
    ))
    .expect("domain pattern is a valid regex")
});

/// Domain grammar used for reconnaissance scopes.
///
/// Accepts leading wildcards (`*.example.com`), internal wildcards
/// (`svc-*.domain.com`, `test.*.invalid.com`) and service records
/// (`_collab-edge.5g.dell.com`). Rejects wildcards or underscores in the
/// top-level label and punctuation runs such as `.-`, `-.` or `..`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DomainValidator;

impl DomainValidator {
    pub fn is_valid(candidate: &str) -> bool {
        if candidate.is_empty() || candidate.len() > MAX_DOMAIN_LENGTH {
            return false;
        }

        // *abc.com
        if candidate.starts_with('*') && !candidate.starts_with("*.") {
            return false;
        }

        // svc-*
        if candidate.ends_with('*') || candidate == "*" {
            return false;
        }

        if candidate.contains(".-")
            || candidate.contains("-.")
            || candidate.starts_with('.')
            || candidate.ends_with('.')
        {
            return false;
        }

        if !DOMAIN_PATTERN.is_match(candidate) {
            return false;
        }

        // The label directly above the top-level label is the registrable
        // name; a wildcard there (`svc-*.com`, `*.com`) names no concrete domain.
        let mut labels = candidate.rsplit('.');
        labels.next();
        !labels.next().is_some_and(|label| label.contains('*'))
    }
}

pub fn is_valid_domain(candidate: &str) -> bool {
    DomainValidator::is_valid(candidate)
}
