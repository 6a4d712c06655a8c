use serde::Deserialize;
use std::collections::HashMap;
use thiserror::Error;
use utoipa::ToSchema;

/// One storage notification batch as posted by the platform trigger.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct StorageEvent {
    #[serde(rename = "Records", default)]
    pub records: Vec<Record>,
}

/// A single storage-change notification entry.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct Record {
    /// Event name, e.g. `cos:ObjectCreated:Put`.
    pub event: String,
    pub cos: CosEntity,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CosEntity {
    #[serde(rename = "cosBucket")]
    pub bucket: CosBucket,
    #[serde(rename = "cosObject")]
    pub object: CosObject,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CosBucket {
    pub name: String,
    pub region: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CosObject {
    pub key: String,
    /// Object metadata headers; carries `Content-Type` for uploads.
    #[serde(default)]
    pub meta: HashMap<String, String>,
}

impl CosObject {
    pub fn content_type(&self) -> Option<&str> {
        self.meta
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case("content-type"))
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Error)]
#[error("object key '{0}' is not of the form /appid/bucket/path/file")]
pub struct MalformedKey(pub String);

/// An object key decomposed into its trigger components.
///
/// Keys arrive as `/{appid}/{bucket}/{path...}/{file}`; only the path below
/// the bucket is what the media API consumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectKey {
    pub app_id: String,
    pub bucket: String,
    /// Path below the bucket, leading slash: `/videos/clip.mp4`.
    pub path: String,
    /// Directory of `path`, trailing slash: `/videos/`.
    pub dir: String,
    pub file_name: String,
    /// Lowercased extension without the dot; empty when the name has none.
    pub extension: String,
}

impl ObjectKey {
    pub fn parse(raw: &str) -> Result<Self, MalformedKey> {
        let mut parts = raw.trim_start_matches('/').splitn(3, '/');
        let app_id = parts
            .next()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| MalformedKey(raw.to_string()))?;
        let bucket = parts
            .next()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| MalformedKey(raw.to_string()))?;
        let rest = parts
            .next()
            .filter(|s| !s.is_empty() && !s.ends_with('/'))
            .ok_or_else(|| MalformedKey(raw.to_string()))?;

        let path = format!("/{}", rest);
        let split_at = path.rfind('/').unwrap_or(0);
        let dir = path[..=split_at].to_string();
        let file_name = path[split_at + 1..].to_string();
        let extension = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();

        Ok(Self {
            app_id: app_id.to_string(),
            bucket: bucket.to_string(),
            path,
            dir,
            file_name,
            extension,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decomposes_a_nested_key() {
        let key = ObjectKey::parse("/app123/srcbucket/videos/clip.mp4").unwrap();
        assert_eq!(key.app_id, "app123");
        assert_eq!(key.bucket, "srcbucket");
        assert_eq!(key.path, "/videos/clip.mp4");
        assert_eq!(key.dir, "/videos/");
        assert_eq!(key.file_name, "clip.mp4");
        assert_eq!(key.extension, "mp4");
    }

    #[test]
    fn decomposes_a_key_without_directory() {
        let key = ObjectKey::parse("/app/bucket/clip.MOV").unwrap();
        assert_eq!(key.path, "/clip.MOV");
        assert_eq!(key.dir, "/");
        assert_eq!(key.extension, "mov");
    }

    #[test]
    fn rejects_keys_without_enough_segments() {
        assert!(ObjectKey::parse("/app/bucket").is_err());
        assert!(ObjectKey::parse("/app/bucket/").is_err());
        assert!(ObjectKey::parse("").is_err());
    }

    #[test]
    fn rejects_directory_creation_keys() {
        assert!(ObjectKey::parse("/app/bucket/videos/").is_err());
    }

    #[test]
    fn file_without_extension_has_empty_extension() {
        let key = ObjectKey::parse("/app/bucket/videos/raw").unwrap();
        assert_eq!(key.extension, "");
    }

    #[test]
    fn event_payload_deserializes() {
        let payload = r#"{
            "Records": [{
                "event": "cos:ObjectCreated:Put",
                "cos": {
                    "cosBucket": { "name": "srcbucket", "region": "ap-guangzhou" },
                    "cosObject": {
                        "key": "/app123/srcbucket/videos/clip.mp4",
                        "meta": { "Content-Type": "video/mp4" }
                    }
                }
            }]
        }"#;

        let event: StorageEvent = serde_json::from_str(payload).unwrap();
        assert_eq!(event.records.len(), 1);
        let record = &event.records[0];
        assert_eq!(record.event, "cos:ObjectCreated:Put");
        assert_eq!(record.cos.bucket.name, "srcbucket");
        assert_eq!(record.cos.object.content_type(), Some("video/mp4"));
    }

    #[test]
    fn content_type_lookup_is_case_insensitive() {
        let mut meta = HashMap::new();
        meta.insert("content-type".to_string(), "video/webm".to_string());
        let object = CosObject {
            key: "/a/b/c.webm".to_string(),
            meta,
        };
        assert_eq!(object.content_type(), Some("video/webm"));
    }
}
