//! User-facing strings, one pair per message.

use crate::message::Language;

fn pick(language: Language, zh: &'static str, en: &'static str) -> &'static str {
    match language {
        Language::Zh => zh,
        Language::En => en,
    }
}

pub fn default_system_prompt(language: Language) -> &'static str {
    pick(
        language,
        "你是DeepSeek学习助手，专门解答大语言模型相关问题。回答要简洁、准确、有帮助。用中文回答。",
        "You are a DeepSeek learning assistant specializing in LLM topics. Be concise, accurate, and helpful. Answer in English.",
    )
}

pub fn config_error(language: Language) -> &'static str {
    pick(
        language,
        "AI服务配置错误：请检查API密钥设置。",
        "AI service configuration error: Please check API key settings.",
    )
}

pub fn cannot_answer(language: Language) -> &'static str {
    pick(
        language,
        "抱歉，我暂时无法回答这个问题。",
        "Sorry, I cannot answer this question.",
    )
}

pub fn unavailable(language: Language) -> &'static str {
    pick(
        language,
        "抱歉，服务暂时不可用。请稍后重试。",
        "Sorry, service is temporarily unavailable. Please try again later.",
    )
}

pub fn empty_input(language: Language) -> &'static str {
    pick(language, "请输入问题", "Please enter a question")
}

pub fn service_error(language: Language) -> &'static str {
    pick(language, "AI服务返回错误", "AI service returned an error")
}

pub fn network_down(language: Language) -> &'static str {
    pick(
        language,
        "网络连接失败。请检查网络连接。",
        "Network connection failed. Please check your connection.",
    )
}

pub fn endpoint_not_found(language: Language) -> &'static str {
    pick(
        language,
        "API端点未找到。显示模拟回复。",
        "API endpoint not found. Showing mock response.",
    )
}

pub fn request_failed(language: Language, detail: &str) -> String {
    match language {
        Language::Zh => format!("请求失败：{detail}"),
        Language::En => format!("Request failed: {detail}"),
    }
}
