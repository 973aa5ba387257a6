//! Request and response bodies for the chat completions endpoint.
//!
//! The Azure endpoint speaks the OpenAI-style chat completions format. The
//! request always carries the full message history plus sampling
//! parameters; `stop` is only serialized when stop sequences were supplied.
//!
//! Response parsing accepts both shapes deployments are known to return:
//! `choices[0].message.content` (chat schema) and `choices[0].text`
//! (completions schema).

use llama_core::{
    ChatMessage, FinishReason, GenerationParams, GenerationResult, LlamaError, Result, Usage,
};
use serde::{Deserialize, Serialize};

/// Request body for `{endpoint}/chat/completions`.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct ChatCompletionRequest<'a> {
    pub messages: &'a [ChatMessage],
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
    pub frequency_penalty: f32,
    pub presence_penalty: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop: Option<&'a [String]>,
}

pub(crate) fn build_request_body<'a>(
    messages: &'a [ChatMessage],
    params: &'a GenerationParams,
) -> ChatCompletionRequest<'a> {
    ChatCompletionRequest {
        messages,
        max_tokens: params.max_tokens,
        temperature: params.temperature,
        top_p: params.top_p,
        frequency_penalty: params.frequency_penalty,
        presence_penalty: params.presence_penalty,
        stop: params.stop_sequences.as_deref(),
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    usage: Option<UsageBody>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ResponseMessage>,
    /// Completions-style deployments put the text here instead.
    text: Option<String>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UsageBody {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

/// Parse a 2xx response body into a [`GenerationResult`].
///
/// # Errors
/// Returns [`LlamaError::ResponseFormat`] if the body is not JSON, `choices`
/// is empty, or the first choice carries no text.
pub(crate) fn parse_response(body: &str) -> Result<GenerationResult> {
    let parsed: ChatCompletionResponse = serde_json::from_str(body).map_err(|e| {
        LlamaError::ResponseFormat { detail: format!("undecodable response body: {e}") }
    })?;

    let usage = parsed.usage.map(|u| Usage {
        prompt_tokens: u.prompt_tokens,
        completion_tokens: u.completion_tokens,
        total_tokens: u.total_tokens,
    });

    let choice = parsed.choices.into_iter().next().ok_or_else(|| {
        LlamaError::ResponseFormat { detail: "empty `choices` array".to_string() }
    })?;

    let finish_reason = choice.finish_reason.as_deref().map(map_finish_reason);

    let text = choice
        .message
        .and_then(|m| m.content)
        .or(choice.text)
        .ok_or_else(|| LlamaError::ResponseFormat {
            detail: "no text in `choices[0]` (expected `message.content` or `text`)".to_string(),
        })?;

    Ok(GenerationResult { text, usage, finish_reason })
}

fn map_finish_reason(reason: &str) -> FinishReason {
    match reason {
        "stop" => FinishReason::Stop,
        "length" => FinishReason::Length,
        "content_filter" => FinishReason::ContentFilter,
        _ => FinishReason::Other,
    }
}
