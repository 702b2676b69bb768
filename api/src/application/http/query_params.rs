use url::form_urlencoded::byte_serialize;

/// Listing parameters read from the raw query string.
///
/// The filter is accepted in two shapes:
/// - `q=<percent-encoded bracket string>` (what `filters/compile` returns)
/// - inline bracket pairs such as `age[gte]=18&age[lte]=30`
///
/// Both are merged into a single bracket string, `q` first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListParams {
    pub q: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

const RESERVED_KEYS: [&str; 3] = ["q", "page", "limit"];

/// Re-encodes an inline pair with literal brackets in its key, the value
/// keeps its original encoding. A bare key (an empty object) stays bare.
fn inline_pair(key: &str, segment: &str) -> String {
    let key: String = byte_serialize(key.as_bytes())
        .collect::<String>()
        .replace("%5B", "[")
        .replace("%5D", "]");
    match segment.split_once('=') {
        Some((_, value)) => format!("{key}={value}"),
        None => key,
    }
}

impl ListParams {
    pub fn from_query_string(query: &str) -> Self {
        let mut q: Option<String> = None;
        let mut page = None;
        let mut limit = None;
        let mut inline = Vec::new();

        for segment in query.split('&').filter(|s| !s.is_empty()) {
            let decoded: Vec<(String, String)> =
                serde_urlencoded::from_str(segment).unwrap_or_default();
            let Some((key, value)) = decoded.into_iter().next() else {
                continue;
            };

            match key.as_str() {
                "q" if !value.is_empty() => q = Some(value),
                "page" => page = value.parse().ok(),
                "limit" => limit = value.parse().ok(),
                key if RESERVED_KEYS.contains(&key) => {}
                _ => inline.push(inline_pair(&key, segment)),
            }
        }

        if !inline.is_empty() {
            let inline = inline.join("&");
            q = Some(match q {
                Some(q) => format!("{q}&{inline}"),
                None => inline,
            });
        }

        Self { q, page, limit }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoded_q_is_decoded() {
        let params = ListParams::from_query_string("q=age%5Bgte%5D%3D18%26age%5Blte%5D%3D30");
        assert_eq!(params.q.as_deref(), Some("age[gte]=18&age[lte]=30"));
        assert_eq!(params.page, None);
    }

    #[test]
    fn test_inline_pairs_are_collected() {
        let params = ListParams::from_query_string("age[gte]=18&page=2&name%5Bcontains%5D=ana+b");
        assert_eq!(
            params.q.as_deref(),
            Some("age[gte]=18&name[contains]=ana+b")
        );
        assert_eq!(params.page, Some(2));
    }

    #[test]
    fn test_q_and_inline_pairs_are_merged() {
        let params = ListParams::from_query_string("q=active%5Bequals%5D%3Dtrue&age[gt]=18");
        assert_eq!(params.q.as_deref(), Some("active[equals]=true&age[gt]=18"));
    }

    #[test]
    fn test_bare_inline_key_stays_bare() {
        let params = ListParams::from_query_string("staff[some]&limit=5");
        assert_eq!(params.q.as_deref(), Some("staff[some]"));
        assert_eq!(params.limit, Some(5));
    }

    #[test]
    fn test_pagination_parse() {
        let params = ListParams::from_query_string("page=3&limit=50");
        assert_eq!(
            params,
            ListParams {
                q: None,
                page: Some(3),
                limit: Some(50)
            }
        );
    }

    #[test]
    fn test_invalid_pagination_is_ignored() {
        let params = ListParams::from_query_string("page=abc&limit=-1&q=");
        assert_eq!(params, ListParams::default());
    }
}
