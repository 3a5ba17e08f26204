use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Build the string that gets signed: timestamp, upper-cased method, path,
/// then the body when it is non-empty.
pub fn prehash(method: &str, path: &str, timestamp: &str, body: &str) -> String {
    let method = method.to_uppercase();
    let mut prehash = String::with_capacity(timestamp.len() + method.len() + path.len() + body.len());
    prehash.push_str(timestamp);
    prehash.push_str(&method);
    prehash.push_str(path);
    if !body.is_empty() {
        prehash.push_str(body);
    }
    prehash
}

/// Lower-case hex HMAC-SHA256 of the pre-hash string, keyed by `secret`.
///
/// `path` is signed exactly as given, including any literal query string.
pub fn sign(secret: &str, method: &str, path: &str, timestamp: &str, body: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .expect("HMAC accepts keys of any length");
    mac.update(prehash(method, path, timestamp, body).as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Milliseconds since the Unix epoch, as a decimal string.
pub fn timestamp_millis() -> String {
    Utc::now().timestamp_millis().to_string()
}
