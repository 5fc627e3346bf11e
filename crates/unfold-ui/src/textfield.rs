//! Text field editing state.
//!
//! Field state lives in a thread-local registry keyed by the stable key the
//! app composes the field with; the platform edits it on key events and the
//! app reads (or resets) it by key. Grapheme-correct caret movement, no
//! selection or IME.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use unicode_segmentation::UnicodeSegmentation;

use crate::text;

pub const TF_FONT: f32 = 16.0;
pub const TF_PAD_X: f32 = 12.0;
pub const TF_PAD_Y: f32 = 10.0;

#[derive(Clone, Debug, Default)]
pub struct TextFieldState {
    pub text: String,
    /// Caret byte index into `text`; always on a grapheme boundary.
    pub caret: usize,
    /// Horizontal scroll for single-line fields.
    pub scroll_x: f32,
    /// Inner width as of the last layout, for caret following.
    pub inner_width: f32,
}

fn prev_grapheme_boundary(text: &str, byte: usize) -> usize {
    let mut last = 0usize;
    for (i, _) in text.grapheme_indices(true) {
        if i >= byte {
            break;
        }
        last = i;
    }
    last
}

fn next_grapheme_boundary(text: &str, byte: usize) -> usize {
    for (i, _) in text.grapheme_indices(true) {
        if i > byte {
            return i;
        }
    }
    text.len()
}

impl TextFieldState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_str(&mut self, s: &str) {
        let at = self.caret.min(self.text.len());
        self.text.insert_str(at, s);
        self.caret = at + s.len();
    }

    pub fn backspace(&mut self) {
        let pos = self.caret.min(self.text.len());
        if pos > 0 {
            let prev = prev_grapheme_boundary(&self.text, pos);
            self.text.replace_range(prev..pos, "");
            self.caret = prev;
        }
    }

    pub fn delete_forward(&mut self) {
        let pos = self.caret.min(self.text.len());
        if pos < self.text.len() {
            let next = next_grapheme_boundary(&self.text, pos);
            self.text.replace_range(pos..next, "");
        }
    }

    pub fn move_left(&mut self) {
        self.caret = prev_grapheme_boundary(&self.text, self.caret.min(self.text.len()));
    }

    pub fn move_right(&mut self) {
        let pos = self.caret.min(self.text.len());
        if pos < self.text.len() {
            self.caret = next_grapheme_boundary(&self.text, pos);
        }
    }

    pub fn move_home(&mut self) {
        self.caret = 0;
    }

    pub fn move_end(&mut self) {
        self.caret = self.text.len();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.caret = 0;
        self.scroll_x = 0.0;
    }

    /// Caret advance in px for a single-line field.
    pub fn caret_x(&self, px: f32) -> f32 {
        let m = text::measure_text(&self.text, px);
        let idx = text::byte_to_grapheme_index(&m, self.caret.min(self.text.len()));
        m.positions.get(idx).copied().unwrap_or(0.0)
    }

    /// Keep the caret inside the visible slice of a single-line field.
    pub fn ensure_caret_visible(&mut self, caret_x: f32, inner_width: f32) {
        if inner_width <= 0.0 {
            return;
        }
        if caret_x - self.scroll_x > inner_width {
            self.scroll_x = caret_x - inner_width;
        }
        if caret_x < self.scroll_x {
            self.scroll_x = caret_x;
        }
        self.scroll_x = self.scroll_x.max(0.0);
    }
}

thread_local! {
    static FIELDS: RefCell<HashMap<u64, Rc<RefCell<TextFieldState>>>> =
        RefCell::new(HashMap::new());
}

/// State for the field composed with `key`, created on first use.
pub fn field_state(key: u64) -> Rc<RefCell<TextFieldState>> {
    FIELDS.with(|f| {
        f.borrow_mut()
            .entry(key)
            .or_insert_with(|| Rc::new(RefCell::new(TextFieldState::new())))
            .clone()
    })
}

pub fn field_text(key: u64) -> String {
    field_state(key).borrow().text.clone()
}

/// Empty the field (e.g. after a successful form submission).
pub fn reset_field(key: u64) {
    field_state(key).borrow_mut().clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_backspace_are_grapheme_correct() {
        let mut st = TextFieldState::new();
        st.insert_str("hé");
        st.insert_str("y");
        assert_eq!(st.text, "héy");
        assert_eq!(st.caret, "héy".len());

        st.backspace();
        assert_eq!(st.text, "hé");
        st.backspace();
        assert_eq!(st.text, "h");
        st.backspace();
        assert_eq!(st.text, "");
        st.backspace(); // at start: no-op
        assert_eq!(st.caret, 0);
    }

    #[test]
    fn caret_moves_and_edits_mid_string() {
        let mut st = TextFieldState::new();
        st.insert_str("abc");
        st.move_left();
        st.insert_str("X");
        assert_eq!(st.text, "abXc");

        st.move_home();
        st.delete_forward();
        assert_eq!(st.text, "bXc");
        st.move_end();
        assert_eq!(st.caret, st.text.len());
    }

    #[test]
    fn registry_reset_clears_text() {
        let key = 9001;
        field_state(key).borrow_mut().insert_str("draft");
        assert_eq!(field_text(key), "draft");
        reset_field(key);
        assert_eq!(field_text(key), "");
        assert_eq!(field_state(key).borrow().caret, 0);
    }

    #[test]
    fn caret_following_scrolls_horizontally() {
        let mut st = TextFieldState::new();
        st.ensure_caret_visible(300.0, 100.0);
        assert_eq!(st.scroll_x, 200.0);
        st.ensure_caret_visible(150.0, 100.0);
        assert_eq!(st.scroll_x, 150.0);
        st.ensure_caret_visible(0.0, 100.0);
        assert_eq!(st.scroll_x, 0.0);
    }
}
