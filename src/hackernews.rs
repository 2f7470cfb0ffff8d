use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};

pub const HN_ITEM_URL: &str = "https://news.ycombinator.com/item";

#[derive(Debug, thiserror::Error)]
pub enum ThreadError {
    #[error("thread input is empty")]
    Empty,
    #[error("decode thread: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Story or comment in the HN API shape. `null` fields read as missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentNode {
    #[serde(default)]
    pub id: i64,
    #[serde(default, rename = "user", deserialize_with = "nullable")]
    pub author: String,
    #[serde(default, deserialize_with = "nullable")]
    pub title: String,
    #[serde(default, rename = "content", deserialize_with = "nullable")]
    pub body_raw: String,
    #[serde(default, rename = "time_ago", deserialize_with = "nullable")]
    pub time_label: String,
    #[serde(default)]
    pub time: Option<i64>,
    #[serde(default, deserialize_with = "nullable")]
    pub points: u64,
    #[serde(default, rename = "comments_count", deserialize_with = "nullable")]
    pub reply_count: u64,
    #[serde(default, deserialize_with = "nullable")]
    pub url: String,
    #[serde(default, deserialize_with = "nullable")]
    pub domain: String,
    #[serde(default, rename = "comments", deserialize_with = "nullable")]
    pub children: Vec<CommentNode>,
}

impl CommentNode {
    pub fn from_json(input: &str) -> Result<Self, ThreadError> {
        if input.trim().is_empty() {
            return Err(ThreadError::Empty);
        }
        Ok(serde_json::from_str(input)?)
    }

    pub fn permalink(&self) -> String {
        format!("{}?id={}", HN_ITEM_URL, self.id)
    }

    pub fn descendant_count(&self) -> usize {
        self.children
            .iter()
            .map(|child| 1 + child.descendant_count())
            .sum()
    }

    pub fn time_label_at(&self, now: DateTime<Utc>) -> String {
        if !self.time_label.trim().is_empty() {
            return self.time_label.clone();
        }
        self.time
            .and_then(|secs| Utc.timestamp_opt(secs, 0).single())
            .map(|then| relative_time(now, then))
            .unwrap_or_default()
    }

    pub fn display_time(&self) -> String {
        self.time_label_at(Utc::now())
    }
}

pub fn relative_time(now: DateTime<Utc>, then: DateTime<Utc>) -> String {
    let seconds = now.signed_duration_since(then).num_seconds().max(0);
    let (amount, unit) = match seconds {
        0..=59 => return "just now".to_string(),
        60..=3_599 => (seconds / 60, "minute"),
        3_600..=86_399 => (seconds / 3_600, "hour"),
        86_400..=2_591_999 => (seconds / 86_400, "day"),
        2_592_000..=31_535_999 => (seconds / 2_592_000, "month"),
        _ => (seconds / 31_536_000, "year"),
    };
    let plural = if amount == 1 { "" } else { "s" };
    format!("{amount} {unit}{plural} ago")
}

fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    const STORY: &str = r#"{
        "id": 8863,
        "title": "My YC app: Dropbox",
        "points": 104,
        "user": "dhouston",
        "time_ago": "15 years ago",
        "comments_count": 3,
        "url": "http://www.getdropbox.com/u/2/screencast.html",
        "domain": "getdropbox.com",
        "content": "",
        "comments": [
            {
                "id": 9224,
                "user": "BrandonM",
                "time_ago": "15 years ago",
                "content": "<p>I have a few qualms",
                "comments": [
                    { "id": 9272, "user": "dhouston", "content": "<p>thanks", "comments": [] },
                    { "id": 9479, "user": null, "content": null, "comments": null }
                ]
            }
        ]
    }"#;

    #[test]
    fn decodes_api_shape() {
        let story = CommentNode::from_json(STORY).unwrap();
        assert_eq!(story.author, "dhouston");
        assert_eq!(story.points, 104);
        assert_eq!(story.reply_count, 3);
        assert_eq!(story.children.len(), 1);
        assert_eq!(story.children[0].children[0].body_raw, "<p>thanks");
    }

    #[test]
    fn nulls_become_empty() {
        let story = CommentNode::from_json(STORY).unwrap();
        let deleted = &story.children[0].children[1];
        assert_eq!(deleted.author, "");
        assert_eq!(deleted.body_raw, "");
        assert!(deleted.children.is_empty());
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(matches!(CommentNode::from_json("  \n"), Err(ThreadError::Empty)));
        assert!(matches!(CommentNode::from_json("{"), Err(ThreadError::Decode(_))));
    }

    #[test]
    fn counts_every_descendant() {
        let story = CommentNode::from_json(STORY).unwrap();
        assert_eq!(story.descendant_count(), 3);
        assert_eq!(story.children[0].descendant_count(), 2);
        assert_eq!(story.children[0].children[0].descendant_count(), 0);
    }

    #[test]
    fn permalink_points_at_item() {
        let node = CommentNode {
            id: 42,
            ..Default::default()
        };
        assert_eq!(node.permalink(), "https://news.ycombinator.com/item?id=42");
    }

    #[test]
    fn feed_time_label_wins() {
        let node = CommentNode {
            time_label: "2 hours ago".into(),
            time: Some(0),
            ..Default::default()
        };
        assert_eq!(node.time_label_at(Utc::now()), "2 hours ago");
    }

    #[test]
    fn derives_label_from_timestamp() {
        let now = Utc.timestamp_opt(1_700_000_000, 0).single().unwrap();
        let node = CommentNode {
            time: Some((now - Duration::hours(3)).timestamp()),
            ..Default::default()
        };
        assert_eq!(node.time_label_at(now), "3 hours ago");
        assert_eq!(relative_time(now, now - Duration::minutes(1)), "1 minute ago");
        assert_eq!(relative_time(now, now + Duration::minutes(5)), "just now");
    }
}
