//! Message form: three fields posted to the relay. Success clears the
//! fields and shows a confirmation; failure leaves everything typed in
//! place with an error notice and no automatic retry.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::mpsc::{Receiver, TryRecvError};

use unfold_core::prelude::*;
use unfold_core::runtime::remember_with_key;
use unfold_ui::*;

use crate::app::PageState;
use crate::content::{RELAY_ENDPOINT, SectionId};
use crate::relay::{self, RelayError, Submission};
use crate::sections::{Section, SectionTitle};

pub const FIELD_NAME: u64 = 0xF0_01;
pub const FIELD_EMAIL: u64 = 0xF0_02;
pub const FIELD_MESSAGE: u64 = 0xF0_03;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitState {
    Idle,
    Sending,
    Sent,
    Failed(String),
}

/// Pre-flight check: every field is required.
pub fn validate(submission: &Submission) -> Result<(), String> {
    if submission.name.trim().is_empty()
        || submission.email.trim().is_empty()
        || submission.message.trim().is_empty()
    {
        return Err("Please fill in all fields.".to_string());
    }
    if !submission.email.contains('@') {
        return Err("Please enter a valid email address.".to_string());
    }
    Ok(())
}

pub fn section(page: &Rc<PageState>) -> View {
    let t = theme();
    let state = remember_with_key("message.state", || signal(SubmitState::Idle));
    let in_flight = remember_with_key("message.rx", || {
        RefCell::new(None::<Receiver<Result<(), RelayError>>>)
    });

    // Drain the worker while a submission is in flight.
    if state.get() == SubmitState::Sending {
        let outcome = in_flight
            .borrow()
            .as_ref()
            .map(|rx| rx.try_recv())
            .unwrap_or(Err(TryRecvError::Disconnected));
        match outcome {
            Ok(Ok(())) => {
                *in_flight.borrow_mut() = None;
                reset_field(FIELD_NAME);
                reset_field(FIELD_EMAIL);
                reset_field(FIELD_MESSAGE);
                state.set(SubmitState::Sent);
            }
            Ok(Err(e)) => {
                *in_flight.borrow_mut() = None;
                state.set(SubmitState::Failed(e.to_string()));
            }
            Err(TryRecvError::Empty) => request_frame(),
            Err(TryRecvError::Disconnected) => {
                *in_flight.borrow_mut() = None;
                state.set(SubmitState::Failed("request failed".to_string()));
            }
        }
    }

    let sending = state.get() == SubmitState::Sending;

    let submit = {
        let state = state.clone();
        let in_flight = in_flight.clone();
        move || {
            if state.get() == SubmitState::Sending {
                return;
            }
            let submission = Submission {
                name: field_text(FIELD_NAME),
                email: field_text(FIELD_EMAIL),
                message: field_text(FIELD_MESSAGE),
            };
            match validate(&submission) {
                Err(msg) => state.set(SubmitState::Failed(msg)),
                Ok(()) => {
                    *in_flight.borrow_mut() =
                        Some(relay::post_in_background(RELAY_ENDPOINT.to_string(), submission));
                    state.set(SubmitState::Sending);
                    request_frame();
                }
            }
        }
    };

    let notice = match state.get() {
        SubmitState::Sent => Some((
            "Message sent. Thanks for reaching out! I'll get back to you soon.".to_string(),
            t.success,
        )),
        SubmitState::Failed(msg) => Some((
            format!("Something went wrong: {msg} Please try again later."),
            t.error,
        )),
        _ => None,
    };

    let mut form_children: Vec<View> = vec![
        TextField(FIELD_NAME, "Your Name"),
        TextField(FIELD_EMAIL, "Your Email"),
        TextArea(FIELD_MESSAGE, "Your Message", 4),
        Button(if sending { "Sending..." } else { "Send Message" }, submit)
            .enabled(!sending),
    ];
    if let Some((text, color)) = notice {
        form_children.push(Text(text).wrap().text_size(14.0).text_color(color));
    }

    let form = Column(
        Modifier::new()
            .fill_max_width()
            .max_width(460.0)
            .gap(14.0),
    )
    .child(form_children);

    Section(
        page,
        SectionId::Message,
        vec![
            Reveal(
                "message",
                RevealPolicy::repeating().threshold(0.2),
                RevealStyle::rise(),
                Column(Modifier::new().fill_max_width().align_items(AlignItems::Center))
                    .child((SectionTitle("Send a Message"), form)),
            ),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_requires_all_fields() {
        let empty = Submission {
            name: "".into(),
            email: "a@b.c".into(),
            message: "hi".into(),
        };
        assert!(validate(&empty).is_err());

        let bad_email = Submission {
            name: "n".into(),
            email: "not-an-email".into(),
            message: "hi".into(),
        };
        assert!(validate(&bad_email).is_err());

        let ok = Submission {
            name: "n".into(),
            email: "a@b.c".into(),
            message: "hi".into(),
        };
        assert!(validate(&ok).is_ok());
    }

    #[test]
    fn failure_preserves_typed_fields() {
        // The failure path never touches the field registry; only the
        // success arm resets. Drive the registry directly to prove it.
        field_state(FIELD_NAME).borrow_mut().insert_str("Ada");
        field_state(FIELD_EMAIL).borrow_mut().insert_str("a@b.c");
        field_state(FIELD_MESSAGE).borrow_mut().insert_str("hello");

        let state = signal(SubmitState::Sending);
        // Simulate the worker reporting a transport error.
        state.set(SubmitState::Failed("request failed: refused".into()));

        assert_eq!(field_text(FIELD_NAME), "Ada");
        assert_eq!(field_text(FIELD_EMAIL), "a@b.c");
        assert_eq!(field_text(FIELD_MESSAGE), "hello");

        // Success is what clears them.
        reset_field(FIELD_NAME);
        reset_field(FIELD_EMAIL);
        reset_field(FIELD_MESSAGE);
        assert_eq!(field_text(FIELD_NAME), "");
    }
}
