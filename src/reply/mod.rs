//! Mention-driven reply loop.
//!
//! Events come in over a channel, each one carrying the text of the post the
//! user replied to. The handler builds a playlist from that text and sends
//! back a reply with the playlist URL or a fixed apology.

use std::sync::Arc;
use tokio::sync::mpsc;

use crate::playlist::PlaylistManager;

pub const MISSING_REFERENCE_REPLY: &str = "Oops! You have to tag me in a reply to another Tweet!";
pub const FAILURE_REPLY: &str = "Uh-oh! Something went wrong :(";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MentionEvent {
    pub mention_id: String,
    pub author: String,
    /// Text of the post being replied to, if the mention was a reply.
    pub referenced_text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub in_reply_to: String,
    pub text: String,
}

pub struct ReplyHandler {
    manager: Arc<PlaylistManager>,
    bot_handle: String,
}

impl ReplyHandler {
    pub fn new(manager: Arc<PlaylistManager>, bot_handle: impl Into<String>) -> Self {
        Self {
            manager,
            bot_handle: bot_handle.into(),
        }
    }

    /// The reply for one mention, or `None` for the bot's own posts.
    pub async fn handle(&self, event: &MentionEvent) -> Option<Reply> {
        if event.author.eq_ignore_ascii_case(&self.bot_handle) {
            log::debug!("Ignoring own mention {}", event.mention_id);
            return None;
        }

        let text = match event.referenced_text.as_deref() {
            Some(text) => text,
            None => {
                return Some(Reply {
                    in_reply_to: event.mention_id.clone(),
                    text: MISSING_REFERENCE_REPLY.to_string(),
                })
            }
        };

        let name = format!("Playlist for {}", event.author);
        let text = match self.manager.make_playlist_from_text(text, &name).await {
            Ok(playlist) => playlist.external_url,
            Err(e) => {
                log::error!("Playlist for mention {} failed: {}", event.mention_id, e);
                FAILURE_REPLY.to_string()
            }
        };

        Some(Reply {
            in_reply_to: event.mention_id.clone(),
            text,
        })
    }

    /// Handles events in arrival order until the event channel closes
    /// or nobody is listening for replies.
    pub async fn run(self, mut events: mpsc::Receiver<MentionEvent>, replies: mpsc::Sender<Reply>) {
        log::info!("Listening for mentions of @{}", self.bot_handle);
        while let Some(event) = events.recv().await {
            let Some(reply) = self.handle(&event).await else {
                continue;
            };
            if replies.send(reply).await.is_err() {
                log::warn!("Reply channel closed, stopping mention handler");
                break;
            }
        }
    }
}
