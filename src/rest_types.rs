use serde::Deserialize;

/// One-time upload target issued by `GET /resources/upload`.
///
/// Only `href` is required; the remaining fields are informational.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadTarget {
    #[serde(default)]
    pub operation_id: String,
    pub href: String,
    #[serde(default)]
    pub method: String,
    #[serde(default)]
    pub templated: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_upload_target() {
        let json = r#"{
            "operation_id": "d80c269ce4eb16c0207f0a15t4a31415313452f9e950cd9576f36b1146ee0e42",
            "href": "https://uploader1g.disk.yandex.net:443/upload-target/abc",
            "method": "PUT",
            "templated": false
        }"#;
        let target: UploadTarget = serde_json::from_str(json).unwrap();

        assert_eq!(
            target.href,
            "https://uploader1g.disk.yandex.net:443/upload-target/abc"
        );
        assert_eq!(target.method, "PUT");
        assert!(!target.templated);
    }

    #[test]
    fn test_href_is_the_only_required_field() {
        let target: UploadTarget =
            serde_json::from_str(r#"{"href": "https://upload.example/abc"}"#).unwrap();
        assert_eq!(target.href, "https://upload.example/abc");
        assert!(target.operation_id.is_empty());

        assert!(serde_json::from_str::<UploadTarget>(r#"{"method": "PUT"}"#).is_err());
    }
}
