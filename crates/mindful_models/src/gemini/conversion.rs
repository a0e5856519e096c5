//! Conversion between Mindful types and the Gemini wire format.

use super::GeminiResult;
use super::dto::{
    Content, GenerateContentRequest, GenerateContentResponse, GenerationConfigDto, Part, ToolDto,
};
use mindful_core::{
    GenerateRequest, GenerateResponse, GroundingSource, Input, MediaSource, Message, Output, Role,
    Tool, encoding,
};
use mindful_error::{GeminiError, GeminiErrorKind};

fn role_name(role: Role) -> &'static str {
    match role {
        Role::User => "user",
        Role::Model => "model",
    }
}

fn inline_part(mime: &str, source: &MediaSource) -> GeminiResult<Part> {
    match source {
        MediaSource::Base64(data) => Ok(Part::inline(mime, data.clone())),
        MediaSource::Binary(bytes) => Ok(Part::inline(mime, encoding::encode(bytes))),
        MediaSource::Url(_) => Err(GeminiError::new(GeminiErrorKind::UrlMediaNotSupported)),
    }
}

/// Convert one input to a content part.
pub(crate) fn input_to_part(input: &Input) -> GeminiResult<Part> {
    match input {
        Input::Text(text) => Ok(Part::text(text.clone())),
        Input::Image { mime, source } => inline_part(mime, source),
        Input::Document { mime, source, .. } => inline_part(mime, source),
    }
}

/// Convert a slice of inputs to parts.
pub(crate) fn inputs_to_parts(inputs: &[Input]) -> GeminiResult<Vec<Part>> {
    inputs.iter().map(input_to_part).collect()
}

fn message_to_content(message: &Message) -> GeminiResult<Content> {
    Ok(Content {
        role: Some(role_name(message.role).to_string()),
        parts: inputs_to_parts(&message.content)?,
    })
}

/// Build a `generateContent` body from a generic request.
pub(crate) fn to_gemini_request(req: &GenerateRequest) -> GeminiResult<GenerateContentRequest> {
    let contents = req
        .messages()
        .iter()
        .map(message_to_content)
        .collect::<GeminiResult<Vec<_>>>()?;

    let system_instruction = req.system_instruction().as_ref().map(|text| Content {
        role: None,
        parts: vec![Part::text(text.clone())],
    });

    let tools = req
        .tools()
        .iter()
        .map(|tool| match tool {
            Tool::GoogleMaps => ToolDto::GoogleMaps {},
            Tool::GoogleSearch => ToolDto::GoogleSearch {},
        })
        .collect();

    Ok(GenerateContentRequest {
        contents,
        system_instruction,
        tools,
        generation_config: GenerationConfigDto {
            max_output_tokens: *req.max_tokens(),
            temperature: *req.temperature(),
            ..Default::default()
        },
    })
}

fn part_to_output(part: &Part) -> GeminiResult<Option<Output>> {
    if part.thought == Some(true) {
        return Ok(None);
    }
    if let Some(text) = &part.text {
        return Ok(Some(Output::Text(text.clone())));
    }
    let Some(inline) = &part.inline_data else {
        return Ok(None);
    };
    let data = encoding::decode(&inline.data)
        .map_err(|e| GeminiError::new(GeminiErrorKind::Base64Decode(e.to_string())))?;
    let mime = inline.mime_type.clone();
    let output = if mime.starts_with("audio/") {
        Output::Audio { mime, data }
    } else {
        Output::Image { mime, data }
    };
    Ok(Some(output))
}

/// Convert a `generateContent` response into the generic response.
///
/// Only the first candidate is considered.
pub(crate) fn from_gemini_response(
    response: &GenerateContentResponse,
) -> GeminiResult<GenerateResponse> {
    let candidate = response
        .candidates
        .first()
        .ok_or_else(|| GeminiError::new(GeminiErrorKind::EmptyResponse))?;

    let outputs = match &candidate.content {
        Some(content) => content
            .parts
            .iter()
            .filter_map(|part| part_to_output(part).transpose())
            .collect::<GeminiResult<Vec<_>>>()?,
        None => Vec::new(),
    };

    let grounding = candidate
        .grounding_metadata
        .as_ref()
        .map(|metadata| {
            metadata
                .grounding_chunks
                .iter()
                .filter_map(|chunk| chunk.maps.as_ref().or(chunk.web.as_ref()))
                .map(|source| GroundingSource {
                    title: source.title.clone(),
                    uri: source.uri.clone(),
                })
                .collect()
        })
        .unwrap_or_default();

    Ok(GenerateResponse { outputs, grounding })
}

/// Pull the human-readable message out of a Gemini error body.
pub(crate) fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .pointer("/error/message")
                .and_then(|message| message.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.to_string())
}
