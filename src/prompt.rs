use serde::Serialize;

use crate::category::ALL_CATEGORIES;

/// One turn of the chat-completion conversation, in the wire shape the
/// completions API expects.
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: &'static str,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system",
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user",
            content: content.into(),
        }
    }
}

const SYSTEM_INSTRUCTION: &str =
    "너는 가게 이름과 상품 리스트를 기반으로 가게의 카테고리를 분류하는 AI야.";

/// Builds the fixed two-turn conversation for one classification request.
///
/// Inputs are interpolated as-is; an empty product list renders as an empty
/// join. The candidate labels come from the same constants validation uses.
pub fn build_messages(store_name: &str, product_names: &[String]) -> Vec<ChatMessage> {
    let mut user = String::new();
    user.push_str("다음 가게와 상품들이 어떤 카테고리에 속하는지 분류해줘.\n");
    user.push_str(&format!("가게 이름: {store_name}\n"));
    user.push_str(&format!("상품 리스트: {}\n\n", product_names.join(", ")));
    user.push_str("가능한 카테고리는 다음과 같아:\n");
    for category in ALL_CATEGORIES {
        match category.prompt_hint() {
            Some(hint) => user.push_str(&format!("- {} ({hint})\n", category.label())),
            None => user.push_str(&format!("- {}\n", category.label())),
        }
    }
    user.push_str("가게 전체가 속하는 카테고리 하나만 출력해줘. 다른 말은 붙이지 마.");

    vec![ChatMessage::system(SYSTEM_INSTRUCTION), ChatMessage::user(user)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::Category;

    #[test]
    fn two_turns_system_then_user() {
        let messages = build_messages("스타벅스", &["아메리카노".into(), "카페라떼".into()]);
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, "system");
        assert_eq!(messages[1].role, "user");
    }

    #[test]
    fn interpolates_store_and_joined_products() {
        let messages = build_messages("스타벅스", &["아메리카노".into(), "카페라떼".into()]);
        let user = &messages[1].content;
        assert!(user.contains("가게 이름: 스타벅스"));
        assert!(user.contains("상품 리스트: 아메리카노, 카페라떼"));
    }

    #[test]
    fn empty_product_list_renders_as_empty_join() {
        let messages = build_messages("스타벅스", &[]);
        assert!(messages[1].content.contains("상품 리스트: \n"));
    }

    #[test]
    fn prompt_enumerates_every_validated_label() {
        let messages = build_messages("가게", &[]);
        let user = &messages[1].content;
        for category in crate::category::ALL_CATEGORIES {
            assert!(user.contains(&format!("- {}", category.label())));
        }
        // and conversely, each enumerated label validates
        assert_eq!(Category::from_label("생활용품"), Some(Category::DailySupplies));
    }
}
