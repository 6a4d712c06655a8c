//! Query-string signing for the VOD API.
//!
//! The remote service authenticates GET requests with HMAC-SHA1 over a
//! canonical string: HTTP method, host, path, then every parameter sorted by
//! key. The signature is appended as one more `Signature` parameter and only
//! the final URL is percent-encoded; the signed payload is raw.

use anyhow::{anyhow, Result};
use base64::{engine::general_purpose::STANDARD, Engine};
use hmac::{Hmac, Mac};
use sha1::Sha1;
use std::collections::BTreeMap;
use url::Url;

type HmacSha1 = Hmac<Sha1>;

/// Joins parameters as `key=value` pairs separated by `&`, keys in
/// lexicographic order, values unencoded.
pub fn canonical_query(params: &BTreeMap<String, String>) -> String {
    params
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&")
}

/// The exact string that gets signed.
pub fn signing_string(
    method: &str,
    host: &str,
    path: &str,
    params: &BTreeMap<String, String>,
) -> String {
    format!("{}{}{}?{}", method, host, path, canonical_query(params))
}

/// HMAC-SHA1 over `payload` with `secret_key`, base64-encoded.
pub fn sign(payload: &str, secret_key: &str) -> Result<String> {
    let mut mac = HmacSha1::new_from_slice(secret_key.as_bytes())
        .map_err(|e| anyhow!("Invalid HMAC key: {}", e))?;
    mac.update(payload.as_bytes());
    Ok(STANDARD.encode(mac.finalize().into_bytes()))
}

/// Signs `params` for a GET against `endpoint` and assembles the final
/// percent-encoded URL with `Signature` as the trailing parameter.
pub fn build_signed_url(
    endpoint: &Url,
    params: &BTreeMap<String, String>,
    secret_key: &str,
) -> Result<Url> {
    let host = endpoint
        .host_str()
        .ok_or_else(|| anyhow!("VOD endpoint has no host: {}", endpoint))?;
    let payload = signing_string("GET", host, endpoint.path(), params);
    let signature = sign(&payload, secret_key)?;

    let mut url = endpoint.clone();
    {
        let mut pairs = url.query_pairs_mut();
        pairs.clear();
        for (key, value) in params {
            pairs.append_pair(key, value);
        }
        pairs.append_pair("Signature", &signature);
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_params() -> BTreeMap<String, String> {
        let mut params = BTreeMap::new();
        params.insert("Action".to_string(), "ProcessCosMedia".to_string());
        params.insert("Region".to_string(), "ap-guangzhou".to_string());
        params.insert("input.bucket".to_string(), "src-125000".to_string());
        params.insert("input.path".to_string(), "/videos/clip.mp4".to_string());
        params.insert("Timestamp".to_string(), "1700000000".to_string());
        params.insert("Nonce".to_string(), "12345".to_string());
        params.insert("SecretId".to_string(), "AKIDtest".to_string());
        params
    }

    #[test]
    fn canonical_query_sorts_keys() {
        let query = canonical_query(&sample_params());
        assert_eq!(
            query,
            "Action=ProcessCosMedia&Nonce=12345&Region=ap-guangzhou&SecretId=AKIDtest\
             &Timestamp=1700000000&input.bucket=src-125000&input.path=/videos/clip.mp4"
        );
    }

    #[test]
    fn signing_string_prepends_method_host_path() {
        let s = signing_string("GET", "vod.api.qcloud.com", "/v2/index.php", &sample_params());
        assert!(s.starts_with("GETvod.api.qcloud.com/v2/index.php?Action=ProcessCosMedia&"));
    }

    #[test]
    fn signature_is_deterministic() {
        let payload = signing_string("GET", "vod.api.qcloud.com", "/v2/index.php", &sample_params());
        let a = sign(&payload, "secret").unwrap();
        let b = sign(&payload, "secret").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn signature_decodes_to_twenty_bytes() {
        let sig = sign("GETvod.api.qcloud.com/v2/index.php?Action=x", "secret").unwrap();
        assert_eq!(STANDARD.decode(sig).unwrap().len(), 20);
    }

    #[test]
    fn changing_any_parameter_changes_the_signature() {
        let base = sample_params();
        let mut changed = base.clone();
        changed.insert("Nonce".to_string(), "12346".to_string());

        let host = "vod.api.qcloud.com";
        let path = "/v2/index.php";
        let a = sign(&signing_string("GET", host, path, &base), "secret").unwrap();
        let b = sign(&signing_string("GET", host, path, &changed), "secret").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn changing_the_secret_changes_the_signature() {
        let payload = signing_string("GET", "h", "/p", &sample_params());
        let a = sign(&payload, "secret-a").unwrap();
        let b = sign(&payload, "secret-b").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn signed_url_keeps_order_and_appends_signature_last() {
        let endpoint = Url::parse("https://vod.api.qcloud.com/v2/index.php").unwrap();
        let url = build_signed_url(&endpoint, &sample_params(), "secret").unwrap();

        let keys: Vec<String> = url
            .query_pairs()
            .map(|(k, _)| k.into_owned())
            .collect();
        let mut expected: Vec<String> = sample_params().keys().cloned().collect();
        expected.push("Signature".to_string());
        assert_eq!(keys, expected);
    }
}
