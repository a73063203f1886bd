use axum::http::{header, HeaderMap, HeaderValue};

/// Read a cookie value from the request `Cookie` header(s)
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_string())
}

/// `Set-Cookie` value for an http-only, path-wide cookie
pub fn set_cookie(name: &str, value: &str, max_age_secs: Option<u64>, secure: bool) -> HeaderValue {
    let mut cookie = format!("{}={}; Path=/; HttpOnly; SameSite=Lax", name, value);
    if let Some(max_age) = max_age_secs {
        cookie.push_str(&format!("; Max-Age={}", max_age));
    }
    if secure {
        cookie.push_str("; Secure");
    }
    // Values are base64url or JWT text, both valid header bytes
    HeaderValue::from_str(&cookie).unwrap_or_else(|_| HeaderValue::from_static(""))
}

/// `Set-Cookie` value that expires a cookie immediately
pub fn clear_cookie(name: &str) -> HeaderValue {
    set_cookie(name, "", Some(0), false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; catalog_session=abc.def; other=1"),
        );

        assert_eq!(
            read_cookie(&headers, "catalog_session"),
            Some("abc.def".to_string())
        );
        assert_eq!(read_cookie(&headers, "missing"), None);
    }

    #[test]
    fn test_set_and_clear_cookie() {
        let value = set_cookie("catalog_flash", "xyz", None, true);
        assert_eq!(
            value.to_str().unwrap(),
            "catalog_flash=xyz; Path=/; HttpOnly; SameSite=Lax; Secure"
        );

        let cleared = clear_cookie("catalog_flash");
        assert!(cleared.to_str().unwrap().contains("Max-Age=0"));
    }
}
