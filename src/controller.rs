#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

use serde_json::Value;

use crate::images::{self, ImageSet};
use crate::net::frame::OutboundFrame;
use crate::net::session::ConnectionSession;
use crate::state::conversation::ConversationState;
use crate::state::slideshow::{Direction, SlideshowState};

/// Where the controller pushes outbound frames.
///
/// The live implementation is [`ConnectionSession`]; tests substitute a
/// recording sink.
pub trait FrameSink {
    fn send(&self, outbound: &OutboundFrame);
}

impl FrameSink for ConnectionSession {
    fn send(&self, outbound: &OutboundFrame) {
        ConnectionSession::send(self, outbound);
    }
}

/// Coordinates the slideshow, the conversation log, image encoding, and the
/// outbound frame sink. This is the only place those concerns meet.
pub struct Controller<S> {
    images: ImageSet,
    slideshow: SlideshowState,
    conversation: ConversationState,
    sink: S,
    support_in_flight: bool,
}

impl<S: FrameSink> Controller<S> {
    #[must_use]
    pub fn new(images: ImageSet, sink: S) -> Self {
        let slideshow = SlideshowState::new(images.size());
        Self {
            images,
            slideshow,
            conversation: ConversationState::default(),
            sink,
            support_in_flight: false,
        }
    }

    /// Index of the active image.
    #[must_use]
    pub fn active_index(&self) -> usize {
        self.slideshow.active_index()
    }

    /// Size of the fixed image set.
    #[must_use]
    pub fn image_count(&self) -> usize {
        self.slideshow.size()
    }

    #[must_use]
    pub fn conversation(&self) -> &ConversationState {
        &self.conversation
    }

    /// Page left or right. Always ends any in-progress conversation, even
    /// mid-exchange; there is no per-image history.
    pub fn navigate(&mut self, direction: Direction) {
        self.slideshow.navigate(direction);
        self.conversation.reset();
        tracing::debug!(index = self.slideshow.active_index(), "navigated, conversation reset");
    }

    /// Encode the active image, send the initiating support frame, and open
    /// the session.
    ///
    /// On encode failure the error is logged and nothing changes; the user
    /// can request support again. A request issued while another is still
    /// encoding is dropped.
    pub async fn request_support(&mut self) {
        if self.support_in_flight {
            tracing::debug!("support request already in flight, ignoring");
            return;
        }

        let index = self.slideshow.active_index();
        let Some(path) = self.images.get(index) else {
            tracing::warn!(index, "active index outside image set");
            return;
        };

        self.support_in_flight = true;
        let encoded = images::encode(path).await;
        self.support_in_flight = false;

        match encoded {
            Ok(payload) => {
                self.sink.send(&OutboundFrame::support_request(payload));
                self.conversation.start_session();
                tracing::info!(index, "support session started");
            }
            Err(error) => {
                tracing::warn!(index, error = %error, "support request failed");
            }
        }
    }

    /// Echo a user message locally, then send it out.
    ///
    /// Whitespace-only input is ignored. The echo does not wait for any
    /// acknowledgment; the send is dropped if the socket is not open.
    pub fn send_user_message(&mut self, text: &str) {
        if self.conversation.push_user(text) {
            self.sink.send(&OutboundFrame::user_question(text));
        }
    }

    /// Route one inbound frame into the conversation log.
    pub fn on_inbound_frame(&mut self, payload: &Value) {
        self.conversation.push_assistant(payload);
    }
}
