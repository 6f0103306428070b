//! Action requests submitted for admission.
//!
//! Every action the caller can attempt is a variant of [`ActionRequest`], so
//! the engine handles each kind exhaustively.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;
use crate::domain::plan::TaskKind;

/// Declared media kind of an uploaded source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    /// Plain or pasted text.
    Text,
    WebPage,
    /// Transcript already extracted from a video or audio file.
    Transcript,
    Pdf,
    Epub,
    Mobi,
    Image,
    Video,
    Audio,
}

impl MediaKind {
    /// Returns true when the character count is not known up front.
    ///
    /// Opaque sources are estimated from declared pages or minutes instead
    /// of inspecting their content.
    pub fn is_opaque(&self) -> bool {
        !matches!(self, MediaKind::Text | MediaKind::WebPage | MediaKind::Transcript)
    }
}

/// One source attached to a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDescriptor {
    pub media: MediaKind,
    /// Raw content length: characters for textual media, encoded bytes otherwise.
    #[serde(default)]
    pub content_length: u64,
    /// Declared page count (documents and images).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<u32>,
    /// Declared duration in minutes (video and audio).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minutes: Option<u32>,
}

impl SourceDescriptor {
    /// A textual source with a known character count.
    pub fn text(chars: u64) -> Self {
        Self::of_media(MediaKind::Text, chars)
    }

    /// A source of any media kind with its raw content length.
    pub fn of_media(media: MediaKind, content_length: u64) -> Self {
        Self {
            media,
            content_length,
            pages: None,
            minutes: None,
        }
    }

    pub fn with_pages(mut self, pages: u32) -> Self {
        self.pages = Some(pages);
        self
    }

    pub fn with_minutes(mut self, minutes: u32) -> Self {
        self.minutes = Some(minutes);
        self
    }
}

/// Author of a chat turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    User,
    #[serde(alias = "model")]
    Assistant,
}

/// A previous message in the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub text: String,
}

impl ChatTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            text: text.into(),
        }
    }
}

/// Artifact derived from study material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    Quiz,
    Flashcards,
}

impl ArtifactKind {
    /// Generation task used for output estimation.
    pub fn task_kind(&self) -> TaskKind {
        match self {
            ArtifactKind::Quiz => TaskKind::Quiz,
            ArtifactKind::Flashcards => TaskKind::Flashcards,
        }
    }
}

/// Material an artifact is derived from.
///
/// References to an existing item are resolved by the caller into that
/// item's source descriptors before evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactInput {
    Text(String),
    Sources(Vec<SourceDescriptor>),
}

/// An action the subscriber is attempting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActionRequest {
    /// Generate a new study guide from uploaded sources.
    CreateItem { sources: Vec<SourceDescriptor> },

    /// Answer a chat message in the context of recent history.
    GenerateChatReply {
        #[serde(default)]
        history: Vec<ChatTurn>,
        message: String,
    },

    RunWebLookup,

    /// Transcribe or ingest a video of the declared length.
    StreamIngest { minutes: u32 },

    /// Derive a quiz or flashcards deck.
    DeriveArtifact {
        artifact: ArtifactKind,
        input: ArtifactInput,
    },
}

/// Action kind without payload, used for rate-limit keys and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    CreateItem,
    GenerateChatReply,
    RunWebLookup,
    StreamIngest,
    DeriveArtifact,
}

impl ActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::CreateItem => "create_item",
            ActionKind::GenerateChatReply => "generate_chat_reply",
            ActionKind::RunWebLookup => "run_web_lookup",
            ActionKind::StreamIngest => "stream_ingest",
            ActionKind::DeriveArtifact => "derive_artifact",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl ActionRequest {
    /// Returns the payload-free kind of this request.
    pub fn kind(&self) -> ActionKind {
        match self {
            ActionRequest::CreateItem { .. } => ActionKind::CreateItem,
            ActionRequest::GenerateChatReply { .. } => ActionKind::GenerateChatReply,
            ActionRequest::RunWebLookup => ActionKind::RunWebLookup,
            ActionRequest::StreamIngest { .. } => ActionKind::StreamIngest,
            ActionRequest::DeriveArtifact { .. } => ActionKind::DeriveArtifact,
        }
    }

    /// Rejects requests that are malformed rather than over quota.
    ///
    /// The engine assumes well-formed input; call this at the boundary.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            ActionRequest::CreateItem { sources } if sources.is_empty() => {
                Err(ValidationError::empty_field("sources"))
            }
            ActionRequest::GenerateChatReply { message, .. } if message.trim().is_empty() => {
                Err(ValidationError::empty_field("message"))
            }
            ActionRequest::DeriveArtifact { input, .. } => match input {
                ArtifactInput::Text(text) if text.trim().is_empty() => {
                    Err(ValidationError::empty_field("input"))
                }
                ArtifactInput::Sources(sources) if sources.is_empty() => {
                    Err(ValidationError::empty_field("input"))
                }
                _ => Ok(()),
            },
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn textual_media_is_not_opaque() {
        assert!(!MediaKind::Text.is_opaque());
        assert!(!MediaKind::WebPage.is_opaque());
        assert!(!MediaKind::Transcript.is_opaque());
    }

    #[test]
    fn binary_media_is_opaque() {
        for media in [
            MediaKind::Pdf,
            MediaKind::Epub,
            MediaKind::Mobi,
            MediaKind::Image,
            MediaKind::Video,
            MediaKind::Audio,
        ] {
            assert!(media.is_opaque(), "{:?} should be opaque", media);
        }
    }

    #[test]
    fn artifact_kind_maps_to_task() {
        assert_eq!(ArtifactKind::Quiz.task_kind(), TaskKind::Quiz);
        assert_eq!(ArtifactKind::Flashcards.task_kind(), TaskKind::Flashcards);
    }

    #[test]
    fn request_reports_its_kind() {
        assert_eq!(ActionRequest::RunWebLookup.kind(), ActionKind::RunWebLookup);
        assert_eq!(
            ActionRequest::StreamIngest { minutes: 5 }.kind().as_str(),
            "stream_ingest"
        );
    }

    #[test]
    fn request_deserializes_with_kind_tag() {
        let json = r#"{
            "kind": "create_item",
            "sources": [{"media": "text", "content_length": 4000}]
        }"#;
        let request: ActionRequest = serde_json::from_str(json).unwrap();
        assert_eq!(
            request,
            ActionRequest::CreateItem {
                sources: vec![SourceDescriptor::text(4000)]
            }
        );
    }

    #[test]
    fn chat_request_defaults_history_and_accepts_model_role() {
        let json = r#"{"kind": "generate_chat_reply", "message": "hi"}"#;
        let request: ActionRequest = serde_json::from_str(json).unwrap();
        assert!(matches!(
            request,
            ActionRequest::GenerateChatReply { ref history, .. } if history.is_empty()
        ));

        let turn: ChatTurn = serde_json::from_str(r#"{"role": "model", "text": "ok"}"#).unwrap();
        assert_eq!(turn.role, ChatRole::Assistant);
    }

    #[test]
    fn derive_artifact_deserializes_text_input() {
        let json = r#"{"kind": "derive_artifact", "artifact": "quiz", "input": {"text": "cells"}}"#;
        let request: ActionRequest = serde_json::from_str(json).unwrap();
        assert_eq!(
            request,
            ActionRequest::DeriveArtifact {
                artifact: ArtifactKind::Quiz,
                input: ArtifactInput::Text("cells".to_string()),
            }
        );
    }

    #[test]
    fn unit_variant_deserializes() {
        let request: ActionRequest = serde_json::from_str(r#"{"kind": "run_web_lookup"}"#).unwrap();
        assert_eq!(request, ActionRequest::RunWebLookup);
    }

    #[test]
    fn validate_rejects_item_without_sources() {
        let request = ActionRequest::CreateItem { sources: vec![] };
        assert_eq!(
            request.validate(),
            Err(ValidationError::empty_field("sources"))
        );
    }

    #[test]
    fn validate_rejects_blank_chat_message() {
        let request = ActionRequest::GenerateChatReply {
            history: vec![],
            message: "   ".to_string(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn validate_rejects_empty_artifact_input() {
        let request = ActionRequest::DeriveArtifact {
            artifact: ArtifactKind::Flashcards,
            input: ArtifactInput::Sources(vec![]),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn validate_accepts_well_formed_requests() {
        assert!(ActionRequest::RunWebLookup.validate().is_ok());
        assert!(ActionRequest::StreamIngest { minutes: 0 }.validate().is_ok());
        assert!(ActionRequest::CreateItem {
            sources: vec![SourceDescriptor::of_media(MediaKind::Pdf, 10).with_pages(3)]
        }
        .validate()
        .is_ok());
    }
}
