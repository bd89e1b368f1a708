//! Protocol message conversion for the OpenAI API.

use guidepost_protocols::provider::{
    CompletionResponse, ContentPart as ProtoPart, Message, MessageRole, Usage,
};

use crate::api::{ApiMessage, ApiResponse, ContentPart, ImageUrl, MessageContent};

pub fn convert_messages(messages: &[Message]) -> Vec<ApiMessage> {
    messages.iter().map(convert_message).collect()
}

fn convert_message(msg: &Message) -> ApiMessage {
    let role = match msg.role {
        MessageRole::System => "system",
        MessageRole::User => "user",
        MessageRole::Assistant => "assistant",
    };

    let content = if msg.has_image() {
        MessageContent::Parts(msg.parts.iter().map(convert_part).collect())
    } else {
        MessageContent::Text(msg.text())
    };

    ApiMessage { role, content }
}

fn convert_part(part: &ProtoPart) -> ContentPart {
    match part {
        ProtoPart::Text { text } => ContentPart::Text { text: text.clone() },
        ProtoPart::Image { media_type, data } => ContentPart::ImageUrl {
            image_url: ImageUrl {
                url: format!("data:{};base64,{}", media_type, data),
            },
        },
    }
}

/// Take the first choice's text, trimmed. Missing content becomes empty.
pub fn parse_response(response: ApiResponse) -> CompletionResponse {
    let content = response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .map(|text| text.trim().to_string())
        .unwrap_or_default();

    let mut parsed = CompletionResponse::new(response.model, content);
    if let Some(usage) = response.usage {
        parsed.usage = Usage {
            prompt_tokens: usage.prompt_tokens,
            completion_tokens: usage.completion_tokens,
        };
    }
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_only_message() {
        let msgs = convert_messages(&[Message::system("Be brief"), Message::user("Hi")]);
        assert_eq!(msgs[0].role, "system");
        assert!(matches!(&msgs[1].content, MessageContent::Text(t) if t == "Hi"));
    }

    #[test]
    fn test_image_message_becomes_parts() {
        let msg = Message::user("Which element?").with_image("image/jpeg", "QUJD");
        let converted = convert_messages(&[msg]);
        let json = serde_json::to_value(&converted[0]).unwrap();
        assert_eq!(json["content"][0]["type"], "text");
        assert_eq!(json["content"][0]["text"], "Which element?");
        assert_eq!(json["content"][1]["type"], "image_url");
        assert_eq!(json["content"][1]["image_url"]["url"], "data:image/jpeg;base64,QUJD");
    }

    #[test]
    fn test_parse_response_trims() {
        let resp: ApiResponse = serde_json::from_str(
            r#"{"model":"gpt-4","choices":[{"message":{"content":"  Remove \n"}}],
                "usage":{"prompt_tokens":3,"completion_tokens":1,"total_tokens":4}}"#,
        )
        .unwrap();
        let parsed = parse_response(resp);
        assert_eq!(parsed.content, "Remove");
        assert_eq!(parsed.usage.prompt_tokens, 3);
    }

    #[test]
    fn test_parse_response_without_choices() {
        let resp: ApiResponse = serde_json::from_str(r#"{"model":"gpt-4","choices":[]}"#).unwrap();
        assert_eq!(parse_response(resp).content, "");
    }
}
