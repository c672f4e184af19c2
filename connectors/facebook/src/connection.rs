//! Paged connection responses.

use serde_json::Value;

use crate::error::{FacebookError, FacebookResult};

/// One page of a Graph API connection.
///
/// The paging flags only report whether the response carried `previous` /
/// `next` cursors; the cursors themselves are not validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection<T> {
    data: Vec<T>,
    has_previous: bool,
    has_next: bool,
}

impl<T> Connection<T> {
    /// Create a page.
    #[must_use]
    pub const fn new(data: Vec<T>, has_previous: bool, has_next: bool) -> Self {
        Self {
            data,
            has_previous,
            has_next,
        }
    }

    /// Items on this page, in response order.
    #[must_use]
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Whether a previous page cursor was present.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.has_previous
    }

    /// Whether a next page cursor was present.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.has_next
    }

    /// Consume the page, returning its items.
    #[must_use]
    pub fn into_data(self) -> Vec<T> {
        self.data
    }

    /// Convert every item, failing the whole page on the first error.
    pub fn try_map<U, F>(self, f: F) -> FacebookResult<Connection<U>>
    where
        F: FnMut(T) -> FacebookResult<U>,
    {
        Ok(Connection {
            data: self.data.into_iter().map(f).collect::<FacebookResult<_>>()?,
            has_previous: self.has_previous,
            has_next: self.has_next,
        })
    }
}

impl<T> IntoIterator for Connection<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

/// Split a connection body into raw item JSON and paging flags.
pub fn read_page(body: &str) -> FacebookResult<Connection<String>> {
    let json: Value = serde_json::from_str(body)?;
    let object = json
        .as_object()
        .ok_or_else(|| FacebookError::mapping("Connection response is not a JSON object"))?;

    let data = object
        .get("data")
        .and_then(Value::as_array)
        .ok_or_else(|| FacebookError::mapping("Connection response has no 'data' array"))?
        .iter()
        .map(Value::to_string)
        .collect();

    let (has_previous, has_next) = match object.get("paging") {
        None => (false, false),
        Some(Value::Object(paging)) => (paging.contains_key("previous"), paging.contains_key("next")),
        Some(_) => {
            return Err(FacebookError::mapping(
                "Connection response 'paging' is not a JSON object",
            ));
        }
    };

    Ok(Connection::new(data, has_previous, has_next))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_items_and_next_flag() {
        let body = json!({
            "data": [{"id": "a"}, {"id": "b"}],
            "paging": {"next": "https://graph.facebook.com/me/friends?offset=2"}
        });
        let page = read_page(&body.to_string()).unwrap();
        assert_eq!(page.data(), [r#"{"id":"a"}"#, r#"{"id":"b"}"#]);
        assert!(!page.has_previous());
        assert!(page.has_next());
    }

    #[test]
    fn missing_paging_means_no_neighbours() {
        let page = read_page(r#"{"data":[]}"#).unwrap();
        assert!(page.data().is_empty());
        assert!(!page.has_previous());
        assert!(!page.has_next());
    }

    #[test]
    fn paging_flags_are_independent() {
        let page = read_page(r#"{"data":[1],"paging":{"previous":"p"}}"#).unwrap();
        assert!(page.has_previous());
        assert!(!page.has_next());

        let page = read_page(r#"{"data":[1],"paging":{"previous":"","next":null}}"#).unwrap();
        assert!(page.has_previous());
        assert!(page.has_next());
    }

    #[test]
    fn missing_data_is_a_mapping_error() {
        for body in [r#"{"paging":{}}"#, r#"{"data":{}}"#, "[]", "nope"] {
            let err = read_page(body).unwrap_err();
            assert!(matches!(err, FacebookError::Mapping(_)), "{body}");
        }
    }

    #[test]
    fn non_object_paging_is_a_mapping_error() {
        let err = read_page(r#"{"data":[],"paging":"next"}"#).unwrap_err();
        assert!(matches!(err, FacebookError::Mapping(_)));
    }

    #[test]
    fn try_map_fails_the_whole_page() {
        let page = Connection::new(vec!["1".to_string(), "x".to_string()], true, false);
        let err = page
            .try_map(|raw| {
                raw.parse::<u32>()
                    .map_err(|err| FacebookError::mapping(err.to_string()))
            })
            .unwrap_err();
        assert!(matches!(err, FacebookError::Mapping(_)));

        let page = Connection::new(vec!["1".to_string(), "2".to_string()], true, false)
            .try_map(|raw| Ok(raw.len()))
            .unwrap();
        assert_eq!(page.data(), [1, 1]);
        assert!(page.has_previous());
        assert_eq!(page.into_iter().sum::<usize>(), 2);
    }
}
