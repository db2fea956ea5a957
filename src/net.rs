//! Form-style request bodies
//!
//! `key=value` pairs are joined with `&`, percent-encoded with the URL host
//! character set, and stored as ASCII bytes with a matching
//! `Content-Length` header.
//!
//! # Example
//!
//! ```
//! use helpful_extensions::net::set_body_content;
//! use indexmap::IndexMap;
//!
//! let mut request = http::Request::new(Vec::new());
//! let content = IndexMap::from([("a", "1"), ("b", "2")]);
//! set_body_content(&mut request, &content);
//!
//! assert_eq!(request.body(), b"a=1&b=2");
//! assert_eq!(request.headers()["content-length"], "7");
//! ```

use http::Request;
use http::header::{CONTENT_LENGTH, HeaderValue};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Characters left literal: alphanumerics plus `!$&'()*+,-.:;=[]_~`.
const URL_HOST_ALLOWED: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'!')
    .remove(b'$')
    .remove(b'&')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'*')
    .remove(b'+')
    .remove(b',')
    .remove(b'-')
    .remove(b'.')
    .remove(b':')
    .remove(b';')
    .remove(b'=')
    .remove(b'[')
    .remove(b']')
    .remove(b'_')
    .remove(b'~');

/// Joins pairs in iteration order and percent-encodes the result.
///
/// Pass an ordered collection (`IndexMap`, slice, `Vec`) when the field
/// order matters; a `HashMap` yields its own arbitrary order.
pub fn encode_body<I, K, V>(content: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let joined = content
        .into_iter()
        .map(|(key, value)| format!("{}={}", key.as_ref(), value.as_ref()))
        .collect::<Vec<_>>()
        .join("&");
    utf8_percent_encode(&joined, URL_HOST_ALLOWED).to_string()
}

/// Replaces the request body with the encoded `content` and sets
/// `Content-Length`. Returns the body length in bytes.
pub fn set_body_content<I, K, V>(request: &mut Request<Vec<u8>>, content: I) -> usize
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    // percent-encoding leaves only ASCII behind
    let body = encode_body(content).into_bytes();
    let len = body.len();

    request
        .headers_mut()
        .insert(CONTENT_LENGTH, HeaderValue::from(len));
    *request.body_mut() = body;
    len
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    #[test]
    fn test_encode_body_ordered() {
        let content = IndexMap::from([("a", "1"), ("b", "2")]);
        assert_eq!(encode_body(&content), "a=1&b=2");
    }

    #[test]
    fn test_encode_body_empty() {
        let content: Vec<(&str, &str)> = Vec::new();
        assert_eq!(encode_body(content), "");
    }

    #[test]
    fn test_encode_body_percent_encodes() {
        let content = [("name", "Jane Doe"), ("note", "50%/off"), ("mail", "j@x.io")];
        assert_eq!(
            encode_body(content),
            "name=Jane%20Doe&note=50%25%2Foff&mail=j%40x.io"
        );
    }

    #[test]
    fn test_encode_body_keeps_host_allowed() {
        let content = [("q", "a+b*c,(d);[e]:f~g!h$i'j_k-l.m")];
        assert_eq!(encode_body(content), "q=a+b*c,(d);[e]:f~g!h$i'j_k-l.m");
    }

    #[test]
    fn test_encode_body_non_ascii() {
        let content = [("city", "Zürich")];
        assert_eq!(encode_body(content), "city=Z%C3%BCrich");
    }

    #[test]
    fn test_set_body_content_sets_length() {
        let mut request = Request::post("https://example.com/form")
            .body(Vec::new())
            .unwrap();
        let content = IndexMap::from([
            ("a".to_string(), "1".to_string()),
            ("b".to_string(), "2".to_string()),
        ]);

        let len = set_body_content(&mut request, &content);

        assert_eq!(len, 7);
        assert_eq!(std::str::from_utf8(request.body()).unwrap(), "a=1&b=2");
        assert_eq!(request.headers()[CONTENT_LENGTH], "7");
    }

    #[test]
    fn test_set_body_content_replaces_previous() {
        let mut request = Request::new(b"old body".to_vec());
        set_body_content(&mut request, [("k", "v")]);
        set_body_content(&mut request, [("key", "value")]);

        assert_eq!(request.body(), b"key=value");
        assert_eq!(request.headers()[CONTENT_LENGTH], "9");
        assert_eq!(request.headers().get_all(CONTENT_LENGTH).iter().count(), 1);
    }
}
