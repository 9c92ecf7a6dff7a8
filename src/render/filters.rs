//! Helpers used by the feed templates

use serde::Deserialize;
use serde_json::Value;

use crate::models::Image;

/// Artist page for a track or album permalink: the last two path segments go
pub fn artist_link(url: &str) -> String {
    let parts: Vec<&str> = url.split('/').collect();
    if parts.len() <= 2 {
        return String::new();
    }
    parts[..parts.len() - 2].join("/")
}

/// URL of the `large` image in an upstream image list, or ""
pub fn image_url(images: &Value) -> String {
    items(images)
        .into_iter()
        .filter_map(|entry| Image::deserialize(entry).ok())
        .find(|image| image.size == "large")
        .map(|image| image.url)
        .unwrap_or_default()
}

pub fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Entries of a list field; a lone entry comes back as an object, not a list
pub fn items(value: &Value) -> Vec<&Value> {
    match value {
        Value::Array(entries) => entries.iter().collect(),
        Value::Object(_) => vec![value],
        _ => Vec::new(),
    }
}

/// Display text of a field that is either a plain string or `{"#text": ..}` / `{"name": ..}`
pub fn text(value: &Value) -> &str {
    match value {
        Value::String(s) => s,
        Value::Object(map) => map
            .get("#text")
            .or_else(|| map.get("name"))
            .and_then(Value::as_str)
            .unwrap_or_default(),
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_artist_link() {
        assert_eq!(
            artist_link("https://x/music/Artist/_/Track"),
            "https://x/music/Artist"
        );
        assert_eq!(
            artist_link("https://www.last.fm/music/Cher/_/Believe"),
            "https://www.last.fm/music/Cher"
        );
        assert_eq!(artist_link("Track"), "");
    }

    #[test]
    fn test_image_url() {
        let images = json!([
            {"size": "small", "text": "a"},
            {"size": "large", "text": "b"},
        ]);
        assert_eq!(image_url(&images), "b");
        assert_eq!(image_url(&json!([])), "");
        assert_eq!(image_url(&json!([{"size": "medium", "#text": "m"}])), "");
        assert_eq!(image_url(&Value::Null), "");
    }

    #[test]
    fn test_image_url_skips_bad_entries() {
        let images = json!([
            {"size": "small", "#text": "a", "text": "a"},
            {"size": "large", "#text": "b"},
        ]);
        assert_eq!(image_url(&images), "b");
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(
            escape_xml("Simon & Garfunkel <live> \"1981\""),
            "Simon &amp; Garfunkel &lt;live&gt; &quot;1981&quot;"
        );
    }

    #[test]
    fn test_items_single_object() {
        let one = json!({"name": "Believe"});
        assert_eq!(items(&one).len(), 1);
        assert_eq!(items(&json!([1, 2])).len(), 2);
        assert!(items(&Value::Null).is_empty());
    }

    #[test]
    fn test_text() {
        assert_eq!(text(&json!("Cher")), "Cher");
        assert_eq!(text(&json!({"#text": "Cher", "mbid": ""})), "Cher");
        assert_eq!(text(&json!({"name": "Cher", "url": ""})), "Cher");
        assert_eq!(text(&json!(3)), "");
    }
}
