use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A post as returned by `GET /wp/v2/posts`
///
/// Only the fields the remover needs are decoded; the rest of the payload is ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: u64,
    /// Attachment ID of the featured image; `0`, `null` or absent when the post has none
    #[serde(default)]
    pub featured_media: Option<u64>,
    #[serde(default)]
    pub date_gmt: Option<NaiveDateTime>,
    #[serde(default)]
    pub slug: Option<String>,
}

impl Post {
    /// Featured media to delete along with the post, if any
    pub fn featured_media_id(&self) -> Option<u64> {
        self.featured_media.filter(|&id| id != 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_post_payload() {
        let json = r#"{
            "id": 11,
            "date": "2024-01-02T03:04:05",
            "date_gmt": "2024-01-02T08:04:05",
            "slug": "hello-world",
            "status": "publish",
            "featured_media": 55,
            "title": {"rendered": "Hello world"}
        }"#;

        let post: Post = serde_json::from_str(json).unwrap();
        assert_eq!(post.id, 11);
        assert_eq!(post.featured_media_id(), Some(55));
        assert_eq!(post.slug.as_deref(), Some("hello-world"));
        assert_eq!(
            post.date_gmt.unwrap().format("%Y-%m-%d %H:%M:%S").to_string(),
            "2024-01-02 08:04:05"
        );
    }

    #[test]
    fn test_zero_or_missing_featured_media_is_none() {
        let zero: Post = serde_json::from_str(r#"{"id": 1, "featured_media": 0}"#).unwrap();
        let missing: Post = serde_json::from_str(r#"{"id": 2}"#).unwrap();
        let null: Post = serde_json::from_str(r#"{"id": 3, "featured_media": null}"#).unwrap();

        assert_eq!(zero.featured_media_id(), None);
        assert_eq!(missing.featured_media_id(), None);
        assert_eq!(null.featured_media_id(), None);
    }
}
