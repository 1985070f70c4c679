// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.
//!
//! Window-level events are routed here so drags keep tracking when the
//! pointer leaves the scan pane, and so file drops and close requests are
//! observed regardless of focus.

use super::Message;
use crate::ui::viewer::component;
use iced::{event, time, window, Subscription};
use std::time::Duration;

/// Creates the window-level event subscription.
///
/// Close requests, file drops, and resizes are handled at the application
/// level; everything else that no widget captured is routed to the viewer
/// as a raw event (pointer moves and releases during a drag, in
/// particular).
pub fn create_event_subscription() -> Subscription<Message> {
    event::listen_with(|event, status, window_id| {
        if let event::Event::Window(window::Event::CloseRequested) = &event {
            return Some(Message::WindowCloseRequested(window_id));
        }

        if let event::Event::Window(window::Event::FileDropped(path)) = &event {
            return Some(Message::FileDropped(path.clone()));
        }

        if let event::Event::Window(window::Event::Resized(size)) = &event {
            return Some(Message::WindowResized(*size));
        }

        match status {
            event::Status::Ignored => Some(Message::Viewer(component::Message::RawEvent {
                window: window_id,
                event,
            })),
            event::Status::Captured => None,
        }
    })
}

/// Creates a periodic tick subscription for notification auto-dismiss.
pub fn create_tick_subscription(has_notifications: bool) -> Subscription<Message> {
    if has_notifications {
        time::every(Duration::from_millis(100)).map(Message::Tick)
    } else {
        Subscription::none()
    }
}
