//! Prompt rendering via `minijinja`.
//!
//! Templates are compiled into the binary. Songs get a carol-writer system
//! message; drawings pass the description through untouched; video frames
//! wrap it in a cinematic scene prompt.

use minijinja::{Environment, context};

use crate::error::StudioError;
use crate::request::ContentKind;

const SONG_SYSTEM: &str = "You are a Christmas carol writer. Generate short, festive Christmas songs with a title, \
2 verses, and a chorus. Keep it concise, joyful, and under 200 words. Format with clear sections using line breaks.";

const PLAIN_USER: &str = "{{ description }}";

const VIDEO_USER: &str = "Create a dynamic, cinematic Christmas scene that looks like a video frame: {{ description }}. \
Make it look animated, with motion blur, depth, and a sense of movement. High quality, festive, magical atmosphere.";

/// A prompt ready to send to the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPrompt {
    /// Optional system message.
    pub system: Option<String>,
    /// The user message.
    pub user: String,
}

/// Holds the compiled prompt templates.
pub struct PromptEngine {
    env: Environment<'static>,
}

impl PromptEngine {
    /// Compile the built-in templates.
    ///
    /// # Errors
    ///
    /// Returns [`StudioError::Template`] if a template fails to parse.
    pub fn new() -> Result<Self, StudioError> {
        let mut env = Environment::new();
        env.add_template("song_system.txt", SONG_SYSTEM)?;
        env.add_template("plain_user.txt", PLAIN_USER)?;
        env.add_template("video_user.txt", VIDEO_USER)?;
        Ok(Self { env })
    }

    /// Render the prompt for one request.
    ///
    /// # Errors
    ///
    /// Returns [`StudioError::Template`] if rendering fails.
    pub fn render(&self, kind: ContentKind, description: &str) -> Result<RenderedPrompt, StudioError> {
        let ctx = context! { description => description };
        let user_template = match kind {
            ContentKind::Song | ContentKind::Drawing => "plain_user.txt",
            ContentKind::Video => "video_user.txt",
        };
        let user = self.env.get_template(user_template)?.render(&ctx)?;
        let system = match kind {
            ContentKind::Song => Some(self.env.get_template("song_system.txt")?.render(&ctx)?),
            ContentKind::Drawing | ContentKind::Video => None,
        };
        Ok(RenderedPrompt { system, user })
    }
}
