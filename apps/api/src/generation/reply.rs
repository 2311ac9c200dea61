//! Authentic reply generator, with an optional photo from the original post.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::generation::fallback::{llm_failure, require_text};
use crate::generation::prompts::{REPLY_PHOTO_NOTE, REPLY_PROMPT_TEMPLATE, REPLY_ROLE};
use crate::generation::score_adjuster::normalize_score;
use crate::llm_client::prompts::system_prompt;
use crate::llm_client::{ImageInput, LlmClient};

/// Image types the model accepts as input.
pub const SUPPORTED_IMAGE_TYPES: [&str; 4] = ["image/jpeg", "image/png", "image/gif", "image/webp"];

#[derive(Debug, Clone, Deserialize)]
pub struct ReplyRequest {
    pub original_post: String,
    /// `data:<mimetype>;base64,<encoded_data>`
    pub photo_data_uri: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplyEvaluation {
    pub human_authenticity: f64,
    pub engagement_potential: f64,
    pub algorithm_appeal: f64,
    pub controversy_level: f64,
    pub rudeness_level: f64,
    pub overall_quality: f64,
}

impl ReplyEvaluation {
    fn normalized(self) -> Self {
        Self {
            human_authenticity: normalize_score(self.human_authenticity),
            engagement_potential: normalize_score(self.engagement_potential),
            algorithm_appeal: normalize_score(self.algorithm_appeal),
            controversy_level: normalize_score(self.controversy_level),
            rudeness_level: normalize_score(self.rudeness_level),
            overall_quality: normalize_score(self.overall_quality),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reply {
    pub reply: String,
    pub evaluation: ReplyEvaluation,
}

pub async fn generate_reply(llm: &LlmClient, request: &ReplyRequest) -> Result<Reply, AppError> {
    let original = require_text("original_post", &request.original_post)?;
    let image = request
        .photo_data_uri
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .map(parse_image_data_uri)
        .transpose()?;

    let photo_note = if image.is_some() { REPLY_PHOTO_NOTE } else { "" };
    let prompt = REPLY_PROMPT_TEMPLATE
        .replace("{photo_note}", photo_note)
        .replace("{original_post}", original);

    let output: Reply = llm
        .call_json_with_image(&prompt, &system_prompt(REPLY_ROLE), image.as_ref())
        .await
        .map_err(|e| llm_failure("Reply generation", e))?;

    let reply = output.reply.trim().to_string();
    if reply.is_empty() {
        return Err(AppError::Llm("Reply generation returned an empty reply".to_string()));
    }

    Ok(Reply {
        reply,
        evaluation: output.evaluation.normalized(),
    })
}

/// Splits an image data URI into its media type and base64 payload.
pub fn parse_image_data_uri(uri: &str) -> Result<ImageInput, AppError> {
    let invalid = || {
        AppError::Validation(
            "photo_data_uri must look like data:image/<jpeg|png|gif|webp>;base64,<data>"
                .to_string(),
        )
    };

    let rest = uri.trim().strip_prefix("data:").ok_or_else(invalid)?;
    let (header, payload) = rest.split_once(',').ok_or_else(invalid)?;
    let media_type = header.strip_suffix(";base64").ok_or_else(invalid)?;

    let media_type = media_type.to_ascii_lowercase();
    if !SUPPORTED_IMAGE_TYPES.contains(&media_type.as_str()) {
        return Err(invalid());
    }
    if payload.is_empty() || STANDARD.decode(payload).is_err() {
        return Err(invalid());
    }

    Ok(ImageInput {
        media_type,
        base64_data: payload.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_png_uri() {
        let image = parse_image_data_uri("data:image/png;base64,aGVsbG8=").unwrap();
        assert_eq!(image.media_type, "image/png");
        assert_eq!(image.base64_data, "aGVsbG8=");
    }

    #[test]
    fn test_rejects_non_image_mime() {
        assert!(parse_image_data_uri("data:text/plain;base64,aGVsbG8=").is_err());
    }

    #[test]
    fn test_rejects_image_types_the_model_cannot_read() {
        assert!(matches!(
            parse_image_data_uri("data:image/svg+xml;base64,aGVsbG8="),
            Err(AppError::Validation(_))
        ));
        assert!(parse_image_data_uri("data:image/avif;base64,aGVsbG8=").is_err());
        assert!(parse_image_data_uri("data:image/;base64,aGVsbG8=").is_err());
    }

    #[test]
    fn test_accepts_each_supported_type() {
        for media_type in SUPPORTED_IMAGE_TYPES {
            let uri = format!("data:{media_type};base64,aGVsbG8=");
            assert_eq!(parse_image_data_uri(&uri).unwrap().media_type, media_type);
        }
        let upper = parse_image_data_uri("data:IMAGE/JPEG;base64,aGVsbG8=").unwrap();
        assert_eq!(upper.media_type, "image/jpeg");
    }

    #[test]
    fn test_rejects_missing_base64_marker() {
        assert!(parse_image_data_uri("data:image/png,aGVsbG8=").is_err());
    }

    #[test]
    fn test_rejects_undecodable_payload() {
        assert!(parse_image_data_uri("data:image/png;base64,***").is_err());
    }

    #[test]
    fn test_rejects_plain_url() {
        assert!(parse_image_data_uri("https://example.com/a.png").is_err());
    }

    #[test]
    fn test_evaluation_scores_are_clamped() {
        let eval = ReplyEvaluation {
            human_authenticity: 11.0,
            engagement_potential: 7.0,
            algorithm_appeal: -1.0,
            controversy_level: 3.0,
            rudeness_level: 1.0,
            overall_quality: 8.44,
        }
        .normalized();
        assert_eq!(eval.human_authenticity, 10.0);
        assert_eq!(eval.algorithm_appeal, 0.0);
        assert_eq!(eval.overall_quality, 8.4);
    }
}
