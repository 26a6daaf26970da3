use std::future::Future;
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

use crate::message::Language;

pub const DEFAULT_DELAY: Duration = Duration::from_secs(1);

struct MockTable {
    entries: &'static [(&'static str, &'static str)],
    default: &'static str,
}

// Searched in order; the first keyword found in the message wins.
static ZH_TABLE: MockTable = MockTable {
    entries: &[
        (
            "什么是大语言模型",
            "大语言模型（LLM）是基于深度学习的人工智能系统，通过大量文本数据训练，能够理解、生成和推理自然语言。它们是自然语言处理领域的重大突破。",
        ),
        (
            "deepseek",
            "DeepSeek是一款先进的大语言模型，具有强大的理解和生成能力，支持多种语言和编程任务。",
        ),
        (
            "transformer",
            "Transformer是一种基于注意力机制的神经网络架构，是目前大多数大语言模型的基础。",
        ),
        ("token", "Token是文本处理的基本单元，可以是一个字、一个词或一个子词。"),
    ],
    default: "这是一个模拟回复，因为AI服务暂时不可用。实际部署时请配置DeepSeek API密钥。",
};

static EN_TABLE: MockTable = MockTable {
    entries: &[
        (
            "what is large language model",
            "Large Language Models (LLMs) are AI systems based on deep learning, trained on massive text data to understand, generate, and reason with natural language.",
        ),
        (
            "deepseek",
            "DeepSeek is an advanced large language model with powerful comprehension and generation capabilities, supporting multiple languages and programming tasks.",
        ),
        (
            "transformer",
            "Transformer is a neural network architecture based on attention mechanism, serving as the foundation for most modern large language models.",
        ),
        (
            "token",
            "Token is the basic unit of text processing, which can be a character, word, or subword.",
        ),
    ],
    default: "This is a mock response as AI service is temporarily unavailable. Please configure DeepSeek API key for actual deployment.",
};

fn table(language: Language) -> &'static MockTable {
    match language {
        Language::Zh => &ZH_TABLE,
        Language::En => &EN_TABLE,
    }
}

/// Canned reply for `msg` without any delay.
pub fn match_reply(msg: &str, language: Language) -> &'static str {
    let msg_lower = msg.to_lowercase();
    let table = table(language);

    table
        .entries
        .iter()
        .find(|(keyword, _)| msg_lower.contains(keyword))
        .map(|(_, reply)| *reply)
        .unwrap_or(table.default)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MockReply {
    pub error: bool,
    pub reply: String,
}

#[derive(Debug, Error)]
#[error("fallback unavailable: {0}")]
pub struct FallbackError(pub String);

/// An offline source of replies used when the relay cannot answer.
pub trait FallbackResponder: Send + Sync {
    fn fallback_reply(
        &self,
        message: &str,
        language: Language,
    ) -> impl Future<Output = Result<String, FallbackError>> + Send;
}

/// Keyword-matched canned replies after a simulated latency.
#[derive(Debug, Clone)]
pub struct MockResponder {
    delay: Duration,
}

impl Default for MockResponder {
    fn default() -> Self {
        Self::new(DEFAULT_DELAY)
    }
}

impl MockResponder {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub async fn respond(&self, message: &str, language: Language) -> MockReply {
        tokio::time::sleep(self.delay).await;
        MockReply {
            error: false,
            reply: match_reply(message, language).to_string(),
        }
    }
}

impl FallbackResponder for MockResponder {
    async fn fallback_reply(
        &self,
        message: &str,
        language: Language,
    ) -> Result<String, FallbackError> {
        Ok(self.respond(message, language).await.reply)
    }
}
