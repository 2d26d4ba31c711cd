use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversationAction {
    Continue,
    TransferToSales,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationReply {
    pub text: String,
    pub action: ConversationAction,
    pub data: Option<serde_json::Value>,
}

const GREETING: &str = "Hello! Welcome to Montana Feed Company. I'm here to help you with all your livestock feed needs. How can I assist you today?";
const CATTLE_INTAKE: &str = "Great! We have excellent cattle feed options. Can you tell me about your operation? How many head of cattle do you have?";
const EQUINE_INTAKE: &str = "Perfect! We specialize in premium horse feed and equine nutrition. What type of horses do you have, and what are you currently feeding them?";
const PRICING_HANDOFF: &str = "I'd be happy to get you pricing information. Let me connect you with our sales representative who can provide you with the most current pricing and volume discounts. What's the best number to reach you at?";
const CLARIFY: &str = "I understand. Let me make sure I get you connected with the right person who can help. Can you tell me a bit more about what you're looking for?";

/// 語音代理的腳本式回覆，規則依序比對（子字串）
pub fn respond(message: &str) -> ConversationReply {
    let text = message.to_lowercase();
    let has = |words: &[&str]| words.iter().any(|w| text.contains(w));

    let (reply, action) = if has(&["hello", "hi"]) {
        (GREETING, ConversationAction::Continue)
    } else if has(&["feed", "cattle"]) {
        (CATTLE_INTAKE, ConversationAction::Continue)
    } else if has(&["horse", "equine"]) {
        (EQUINE_INTAKE, ConversationAction::Continue)
    } else if has(&["price", "cost"]) {
        (PRICING_HANDOFF, ConversationAction::TransferToSales)
    } else {
        (CLARIFY, ConversationAction::Continue)
    };

    ConversationReply {
        text: reply.to_string(),
        action,
        data: None,
    }
}
