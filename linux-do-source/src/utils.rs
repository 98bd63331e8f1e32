/// URL utilities
pub mod url {
    use crate::types::{AggregatorError, Result};
    use url::Url;

    /// A category must be a single plain path segment.
    pub fn validate_category(category: &str) -> Result<()> {
        let invalid = category.is_empty()
            || category
                .chars()
                .any(|c| c.is_whitespace() || matches!(c, '/' | '?' | '#' | '%' | '\\'));

        if invalid {
            return Err(AggregatorError::Config(format!("invalid category name: {:?}", category)));
        }
        Ok(())
    }

    /// Build `<base>/api/<category>.json`.
    ///
    /// A trailing slash on `base` is tolerated; any path already on `base`
    /// is kept so the API can live under a prefix.
    pub fn category_feed_url(base: &str, category: &str) -> Result<Url> {
        validate_category(category)?;

        let mut base = Url::parse(base)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        Ok(base.join(&format!("api/{}.json", category))?)
    }

    /// Only http(s) bases make sense for the category API.
    pub fn is_valid_base_url(url_str: &str) -> bool {
        match Url::parse(url_str) {
            Ok(url) => url.scheme() == "http" || url.scheme() == "https",
            Err(_) => false,
        }
    }
}

/// Time utilities
pub mod time {
    use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

    const NAIVE_FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ];

    /// Parse the loosely formatted dates the forum emits.
    ///
    /// Values without an offset are taken as UTC. `None` means the value is
    /// not a date we understand; callers rank those as least recent.
    pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
            return Some(dt.with_timezone(&Utc));
        }
        if let Ok(dt) = DateTime::parse_from_rfc2822(value) {
            return Some(dt.with_timezone(&Utc));
        }
        for format in NAIVE_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
                return Some(naive.and_utc());
            }
        }

        NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
    }

    /// Format duration in human-readable form
    pub fn format_duration(duration: std::time::Duration) -> String {
        let millis = duration.as_millis();

        if millis < 1000 {
            format!("{}ms", millis)
        } else {
            format!("{:.1}s", duration.as_secs_f64())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::time::{format_duration, parse_timestamp};
    use super::url::{category_feed_url, is_valid_base_url, validate_category};
    use chrono::{TimeZone, Utc};
    use std::time::Duration;

    #[test]
    fn builds_category_urls() {
        assert_eq!(
            category_feed_url("https://linux.do", "latest").unwrap().as_str(),
            "https://linux.do/api/latest.json"
        );
        assert_eq!(
            category_feed_url("https://linux.do/", "featured").unwrap().as_str(),
            "https://linux.do/api/featured.json"
        );
        assert_eq!(
            category_feed_url("http://127.0.0.1:8080/mirror", "tutorials").unwrap().as_str(),
            "http://127.0.0.1:8080/mirror/api/tutorials.json"
        );
    }

    #[test]
    fn rejects_bad_category_or_base() {
        assert!(category_feed_url("https://linux.do", "").is_err());
        assert!(category_feed_url("https://linux.do", "a/b").is_err());
        assert!(category_feed_url("not a url", "latest").is_err());
    }

    #[test]
    fn category_must_be_one_plain_segment() {
        assert!(validate_category("latest").is_ok());
        assert!(validate_category("tutorials-2024").is_ok());

        for bad in ["", "a/b", "a?b", "a#b", "a%2Fb", "a b", " latest", "latest\n", "a\\b"] {
            assert!(validate_category(bad).is_err(), "accepted {:?}", bad);
            assert!(category_feed_url("https://linux.do", bad).is_err(), "built URL for {:?}", bad);
        }
    }

    #[test]
    fn base_url_checks() {
        assert!(is_valid_base_url("https://linux.do"));
        assert!(!is_valid_base_url("ftp://linux.do"));
        assert!(!is_valid_base_url("linux.do"));
    }

    #[test]
    fn parses_common_date_shapes() {
        let expected = Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap();
        assert_eq!(parse_timestamp("2024-05-06T07:08:09Z"), Some(expected));
        assert_eq!(parse_timestamp("2024-05-06T15:08:09+08:00"), Some(expected));
        assert_eq!(parse_timestamp("Mon, 06 May 2024 07:08:09 +0000"), Some(expected));
        assert_eq!(parse_timestamp("2024-05-06 07:08:09"), Some(expected));
        assert_eq!(parse_timestamp("2024-05-06T07:08:09.000"), Some(expected));
        assert_eq!(
            parse_timestamp("2024-05-06"),
            Some(Utc.with_ymd_and_hms(2024, 5, 6, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn garbage_is_not_a_date() {
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("yesterday"), None);
        assert_eq!(parse_timestamp("2024-13-40"), None);
    }

    #[test]
    fn durations_render_compactly() {
        assert_eq!(format_duration(Duration::from_millis(250)), "250ms");
        assert_eq!(format_duration(Duration::from_millis(1500)), "1.5s");
    }
}
