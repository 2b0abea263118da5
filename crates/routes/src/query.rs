//! Query-string helpers.

use url::form_urlencoded;
use url::Url;

/// Append `params` to `path` as an `application/x-www-form-urlencoded`
/// query string. An empty parameter list leaves the path untouched.
pub fn to_url(path: &str, params: &[(String, String)]) -> String {
    if params.is_empty() {
        return path.to_string();
    }

    let query = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params.iter().map(|(k, v)| (k.as_str(), v.as_str())))
        .finish();
    format!("{}?{}", path, query)
}

/// Return `url` with one query parameter updated.
///
/// A non-empty `value` sets the parameter; otherwise it is set to the
/// empty string when `allow_empty`, and removed when not. Setting replaces
/// the first occurrence in place and drops any others; a new parameter is
/// appended.
pub fn update_query_parameter(
    url: &Url,
    parameter: &str,
    value: Option<&str>,
    allow_empty: bool,
) -> Url {
    let next = match value.filter(|v| !v.is_empty()) {
        Some(v) => Some(v),
        None if allow_empty => Some(""),
        None => None,
    };

    let mut pairs: Vec<(String, String)> = Vec::new();
    let mut placed = false;
    for (key, existing) in url.query_pairs() {
        if key != parameter {
            pairs.push((key.into_owned(), existing.into_owned()));
        } else if let (Some(v), false) = (next, placed) {
            pairs.push((key.into_owned(), v.to_string()));
            placed = true;
        }
    }
    if let (Some(v), false) = (next, placed) {
        pairs.push((parameter.to_string(), v.to_string()));
    }

    let mut updated = url.clone();
    if pairs.is_empty() {
        updated.set_query(None);
    } else {
        updated.query_pairs_mut().clear().extend_pairs(pairs);
    }
    updated
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn to_url_without_params_is_the_path() {
        assert_eq!(to_url("/a/b", &[]), "/a/b");
    }

    #[test]
    fn to_url_encodes_params() {
        let params = vec![
            ("query".to_string(), "a b&c".to_string()),
            ("page".to_string(), "2".to_string()),
        ];
        assert_eq!(to_url("/a", &params), "/a?query=a+b%26c&page=2");
    }

    #[test]
    fn sets_new_parameter() {
        let updated = update_query_parameter(&url("http://ui/history?view=full"), "q", Some("x"), false);
        assert_eq!(updated.as_str(), "http://ui/history?view=full&q=x");
    }

    #[test]
    fn replaces_existing_parameter_in_place() {
        let updated = update_query_parameter(
            &url("http://ui/history?q=old&view=full&q=dup"),
            "q",
            Some("new"),
            false,
        );
        assert_eq!(updated.as_str(), "http://ui/history?q=new&view=full");
    }

    #[test]
    fn empty_value_deletes_unless_allowed() {
        let source = url("http://ui/history?q=old&view=full");

        let deleted = update_query_parameter(&source, "q", None, false);
        assert_eq!(deleted.as_str(), "http://ui/history?view=full");

        let blank = update_query_parameter(&source, "q", Some(""), true);
        assert_eq!(blank.as_str(), "http://ui/history?q=&view=full");
    }

    #[test]
    fn deleting_the_last_parameter_drops_the_query() {
        let updated = update_query_parameter(&url("http://ui/history?q=old"), "q", None, false);
        assert_eq!(updated.as_str(), "http://ui/history");
    }
}
