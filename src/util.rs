//! Small helpers shared by the API client and the CLI

use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;

/// Build query parameters, dropping empty values
pub fn compact_params(
    entries: impl IntoIterator<Item = (&'static str, Option<String>)>,
) -> Vec<(String, String)> {
    entries
        .into_iter()
        .filter_map(|(key, value)| match value {
            Some(v) if !v.is_empty() => Some((key.to_string(), v)),
            _ => None,
        })
        .collect()
}

/// Percent-encode a value for use as a URL path segment.
///
/// Needed for emails and token names, which may carry `@`, `/`, or spaces.
pub fn encode_path_segment(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

/// Sanitize a database or group name: lowercase, alphanumeric and hyphens
/// only, collapsed runs of hyphens, no leading or trailing hyphen.
pub fn sanitize_name(name: &str) -> String {
    let lowered = name.to_lowercase();
    let mut out = String::with_capacity(lowered.len());
    let mut prev_hyphen = false;
    for c in lowered.chars() {
        let mapped = if c.is_ascii_lowercase() || c.is_ascii_digit() {
            c
        } else {
            '-'
        };
        if mapped == '-' {
            if !prev_hyphen {
                out.push('-');
            }
            prev_hyphen = true;
        } else {
            out.push(mapped);
            prev_hyphen = false;
        }
    }
    out.trim_matches('-').to_string()
}

static SIZE_LIMIT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+(?:\.\d+)?)\s*(b|kb|mb|gb|tb)?$").expect("valid size regex"));

/// Parse a size limit string like "500mb" or "1.5gb" into bytes
pub fn parse_size_limit(input: &str) -> Result<u64> {
    let lowered = input.trim().to_lowercase();
    let caps = SIZE_LIMIT_RE
        .captures(&lowered)
        .ok_or_else(|| Error::InvalidSizeLimit {
            input: input.to_string(),
        })?;

    let value: f64 = caps[1].parse().map_err(|_| Error::InvalidSizeLimit {
        input: input.to_string(),
    })?;
    let multiplier: u64 = match caps.get(2).map(|m| m.as_str()) {
        None | Some("b") => 1,
        Some("kb") => 1024,
        Some("mb") => 1024 * 1024,
        Some("gb") => 1024 * 1024 * 1024,
        Some("tb") => 1024 * 1024 * 1024 * 1024,
        Some(_) => unreachable!("regex limits units"),
    };

    Ok((value * multiplier as f64).floor() as u64)
}

/// Format a byte count as a human-readable size
pub fn format_bytes(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    const UNITS: [&str; 5] = ["Bytes", "KB", "MB", "GB", "TB"];
    let exponent = ((bytes as f64).ln() / 1024_f64.ln()).floor() as usize;
    let exponent = exponent.min(UNITS.len() - 1);
    let value = bytes as f64 / 1024_f64.powi(exponent as i32);

    format!("{} {}", trim_decimal(value), UNITS[exponent])
}

fn trim_decimal(value: f64) -> String {
    let formatted = format!("{value:.2}");
    formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_path_segment() {
        assert_eq!(encode_path_segment("ci token"), "ci%20token");
        assert_eq!(encode_path_segment("user@example.com"), "user%40example.com");
        assert_eq!(encode_path_segment("plain-name"), "plain-name");
    }

    #[test]
    fn test_compact_params() {
        let params = compact_params([
            ("group", Some("default".to_string())),
            ("schema", Some(String::new())),
            ("from", None),
        ]);
        assert_eq!(params, vec![("group".to_string(), "default".to_string())]);
    }

    #[test]
    fn test_sanitize_name() {
        assert_eq!(sanitize_name("My Database!"), "my-database");
        assert_eq!(sanitize_name("--hello--world--"), "hello-world");
        assert_eq!(sanitize_name("already-ok-123"), "already-ok-123");
        assert_eq!(sanitize_name("___"), "");
    }

    #[test]
    fn test_parse_size_limit() {
        assert_eq!(parse_size_limit("1024").unwrap(), 1024);
        assert_eq!(parse_size_limit("1kb").unwrap(), 1024);
        assert_eq!(parse_size_limit("500mb").unwrap(), 500 * 1024 * 1024);
        assert_eq!(
            parse_size_limit("1.5gb").unwrap(),
            (1.5 * 1024.0 * 1024.0 * 1024.0) as u64
        );
        assert_eq!(parse_size_limit(" 2 TB ").unwrap(), 2 * 1024_u64.pow(4));

        assert!(parse_size_limit("big").is_err());
        assert!(parse_size_limit("-5mb").is_err());
        assert!(parse_size_limit("").is_err());
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0 Bytes");
        assert_eq!(format_bytes(512), "512 Bytes");
        assert_eq!(format_bytes(1024), "1 KB");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(5 * 1024 * 1024), "5 MB");
    }
}
