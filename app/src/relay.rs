//! Contact-form submission through the hosted relay.
//!
//! The relay receives a form-encoded POST and forwards it as email. The
//! request runs on a worker thread (the UI loop must not block on the
//! network); the result comes back over an mpsc channel the form polls
//! while in the sending state. No retries here: a failure is surfaced and
//! the typed values stay put so the user can resend by hand.

use std::sync::mpsc::{self, Receiver};
use std::time::Duration;

use thiserror::Error;

use crate::content::{FORM_NEXT, FORM_SUBJECT};

const TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("relay returned status {0}")]
    Status(u16),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Submission {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl Submission {
    /// The exact field set the relay expects: visitor fields plus the
    /// subject, the captcha opt-out, and the post-submit redirect.
    pub fn encode(&self) -> Vec<(&'static str, String)> {
        vec![
            ("name", self.name.clone()),
            ("email", self.email.clone()),
            ("message", self.message.clone()),
            ("_subject", FORM_SUBJECT.to_string()),
            ("_captcha", "false".to_string()),
            ("_next", FORM_NEXT.to_string()),
        ]
    }
}

pub fn post(endpoint: &str, submission: &Submission) -> Result<(), RelayError> {
    let agent = ureq::AgentBuilder::new().timeout(TIMEOUT).build();
    let pairs = submission.encode();
    let form: Vec<(&str, &str)> = pairs.iter().map(|(k, v)| (*k, v.as_str())).collect();

    match agent
        .post(endpoint)
        .set("Accept", "application/json")
        .send_form(&form)
    {
        Ok(_) => Ok(()),
        Err(ureq::Error::Status(code, _)) => Err(RelayError::Status(code)),
        Err(e) => Err(RelayError::Transport(e.to_string())),
    }
}

/// Fire the POST on a worker thread; the UI polls the returned channel.
pub fn post_in_background(endpoint: String, submission: Submission) -> Receiver<Result<(), RelayError>> {
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        let result = post(&endpoint, &submission);
        if let Err(e) = &result {
            log::warn!("form relay submission failed: {e}");
        }
        // Receiver may be gone if the app quit mid-flight.
        let _ = tx.send(result);
    });
    rx
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_carries_relay_control_fields() {
        let s = Submission {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            message: "hello there".into(),
        };
        let form = s.encode();

        let get = |k: &str| {
            form.iter()
                .find(|(key, _)| *key == k)
                .map(|(_, v)| v.as_str())
        };
        assert_eq!(get("name"), Some("Ada"));
        assert_eq!(get("email"), Some("ada@example.com"));
        assert_eq!(get("message"), Some("hello there"));
        assert_eq!(get("_subject"), Some(FORM_SUBJECT));
        assert_eq!(get("_captcha"), Some("false"));
        assert_eq!(get("_next"), Some(FORM_NEXT));
        assert_eq!(form.len(), 6);
    }

    #[test]
    fn transport_failure_is_reported_not_retried() {
        // A port nothing listens on: the POST must come back as a transport
        // error without hanging the caller.
        let s = Submission {
            name: "n".into(),
            email: "e".into(),
            message: "m".into(),
        };
        let rx = post_in_background("http://127.0.0.1:9/".into(), s);
        let result = rx
            .recv_timeout(Duration::from_secs(40))
            .expect("worker must report");
        assert!(matches!(result, Err(RelayError::Transport(_))));
    }
}
