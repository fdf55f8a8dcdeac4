use serde::{Deserialize, Serialize};

use crate::elapsed::ElapsedTime;

/// Webhook payload in the Block Kit subset the messaging channel renders.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotificationMessage {
    pub text: String,
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Block {
    #[serde(rename = "type")]
    pub kind: BlockKind,
    pub text: TextObject,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    Header,
    Section,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TextObject {
    #[serde(rename = "type")]
    pub kind: TextKind,
    pub text: String,
    pub emoji: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TextKind {
    PlainText,
}

impl Block {
    pub fn plain(kind: BlockKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: TextObject {
                kind: TextKind::PlainText,
                text: text.into(),
                emoji: true,
            },
        }
    }
}

pub fn completion_headline(environment: &str) -> String {
    format!("Request executed successfully ({environment})")
}

pub fn build_completion_message(environment: &str, elapsed: ElapsedTime) -> NotificationMessage {
    let headline = completion_headline(environment);
    NotificationMessage {
        text: headline.clone(),
        blocks: vec![
            Block::plain(BlockKind::Header, headline),
            Block::plain(
                BlockKind::Section,
                format!("{} seconds after start", elapsed.as_seconds_text()),
            ),
        ],
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn completion_message_matches_webhook_body() {
        let message = build_completion_message("production", ElapsedTime::from_millis(4_000));

        assert_eq!(
            serde_json::to_value(&message).expect("message should serialize"),
            json!({
                "text": "Request executed successfully (production)",
                "blocks": [
                    {
                        "type": "header",
                        "text": {
                            "type": "plain_text",
                            "text": "Request executed successfully (production)",
                            "emoji": true
                        }
                    },
                    {
                        "type": "section",
                        "text": {
                            "type": "plain_text",
                            "text": "4 seconds after start",
                            "emoji": true
                        }
                    }
                ]
            })
        );
    }

    #[test]
    fn section_reports_fractional_seconds() {
        let message = build_completion_message("dev", ElapsedTime::from_millis(4_015));
        assert_eq!(message.blocks[1].text.text, "4.015 seconds after start");
        assert_eq!(message.blocks[0].kind, BlockKind::Header);
    }
}
