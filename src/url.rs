//! URL rendering with serialized query parameters.

use std::sync::Arc;

use url::form_urlencoded;

/// Pluggable query serialization strategy. Receives the merged, ordered
/// parameter pairs and returns the query string without a leading `?`.
pub type ParamsSerializer = Arc<dyn Fn(&[(String, String)]) -> String + Send + Sync>;

/// Render a URL with its serialized query parameters.
///
/// Any `#fragment` is dropped before the query is appended. The query joins
/// with `&` when the URL already carries one, `?` otherwise. Without a custom
/// serializer, parameters are form-urlencoded in order.
///
/// ```
/// use reqchain::build_url;
///
/// let params = vec![("q".to_string(), "1".to_string())];
/// assert_eq!(build_url("/a", Some(&params), None), "/a?q=1");
/// ```
pub fn build_url(
    url: &str,
    params: Option<&[(String, String)]>,
    serializer: Option<&ParamsSerializer>,
) -> String {
    let Some(params) = params else {
        return url.to_string();
    };

    let query = match serializer {
        Some(serialize) => serialize(params),
        None => form_urlencoded::Serializer::new(String::new())
            .extend_pairs(params)
            .finish(),
    };
    if query.is_empty() {
        return url.to_string();
    }

    let url = match url.find('#') {
        Some(hash) => &url[..hash],
        None => url,
    };
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{url}{separator}{query}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_build_url_no_params() {
        assert_eq!(build_url("/a", None, None), "/a");
    }

    #[test]
    fn test_build_url_empty_params() {
        let params = pairs(&[]);
        assert_eq!(build_url("/a", Some(&params), None), "/a");
    }

    #[test]
    fn test_build_url_appends_query() {
        let params = pairs(&[("q", "1"), ("sort", "name")]);
        assert_eq!(build_url("/a", Some(&params), None), "/a?q=1&sort=name");
    }

    #[test]
    fn test_build_url_joins_existing_query() {
        let params = pairs(&[("q", "1")]);
        assert_eq!(build_url("/a?x=0", Some(&params), None), "/a?x=0&q=1");
    }

    #[test]
    fn test_build_url_drops_fragment() {
        let params = pairs(&[("q", "1")]);
        assert_eq!(build_url("/a#section", Some(&params), None), "/a?q=1");
    }

    #[test]
    fn test_build_url_encodes_values() {
        let params = pairs(&[("name", "a b&c")]);
        assert_eq!(build_url("/a", Some(&params), None), "/a?name=a+b%26c");
    }

    #[test]
    fn test_build_url_custom_serializer() {
        let params = pairs(&[("q", "1"), ("r", "2")]);
        let serializer: ParamsSerializer = Arc::new(|pairs| {
            pairs
                .iter()
                .map(|(k, v)| format!("{k}:{v}"))
                .collect::<Vec<_>>()
                .join(";")
        });
        assert_eq!(
            build_url("/a", Some(&params), Some(&serializer)),
            "/a?q:1;r:2"
        );
    }
}
