//! Log sanitization utilities
//!
//! Keeps reseller credentials and oversized response bodies out of debug/error logs.

/// 日志中响应体的最大字节数
const TRUNCATE_LIMIT: usize = 256;

/// Parameter names whose values never reach a log line.
const SECRET_PARAMS: &[&str] = &["pw", "newpw", "confirmpw", "authinfo1"];

/// Cuts `s` to at most 256 bytes (on a char boundary) for a log line.
///
/// Longer input gets a `... [N bytes]` suffix carrying its full length.
pub fn truncate_for_log(s: &str) -> String {
    if s.len() <= TRUNCATE_LIMIT {
        return s.to_string();
    }
    let cut = (0..=TRUNCATE_LIMIT)
        .rev()
        .find(|&i| s.is_char_boundary(i))
        .unwrap_or(0);
    format!("{}... [{} bytes]", &s[..cut], s.len())
}

/// Render request parameters as `key=value` pairs with secrets masked.
///
/// The reseller login (`uid`) is masked as well, since it identifies the account.
pub fn redact_params(params: &[(String, String)]) -> String {
    params
        .iter()
        .map(|(key, value)| {
            let lower = key.to_ascii_lowercase();
            if lower == "uid" || SECRET_PARAMS.contains(&lower.as_str()) {
                format!("{key}=***")
            } else {
                format!("{key}={value}")
            }
        })
        .collect::<Vec<_>>()
        .join("&")
}
