//! Text interpolation for narrative strings.
//!
//! Directives, resolved in one left-to-right pass:
//!
//! - `{name}`: the variable's value; left as-is when unset.
//! - `{inventory_count}`: number of items held (a variable of the same name
//!   takes precedence).
//! - `{if:name}...{/if}`: the body when the variable is truthy, otherwise
//!   nothing. Blocks do not nest: the first `{/if}` closes the block and an
//!   `{if:...}` inside a body is kept as literal text.
//! - `{random:a|b|c}`: one option, drawn afresh on every render.
//! - `{typewriter}` / `{/typewriter}`: presentation markers, kept unless
//!   stripping is enabled.
//!
//! Anything else in braces is copied through unchanged.

use rand::Rng;
use rand::rngs::StdRng;

use crate::state::PlayerState;

const IF_OPEN: &str = "if:";
const IF_CLOSE: &str = "{/if}";
const RANDOM_OPEN: &str = "random:";
const INVENTORY_COUNT: &str = "inventory_count";
const TYPEWRITER_OPEN: &str = "typewriter";
const TYPEWRITER_CLOSE: &str = "/typewriter";

/// Renders narrative text against player state.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextRenderer {
    strip_typewriter: bool,
}

impl TextRenderer {
    /// Create a renderer that keeps typewriter markers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove `{typewriter}` markers, keeping the text between them.
    pub fn stripping_typewriter(mut self, strip: bool) -> Self {
        self.strip_typewriter = strip;
        self
    }

    /// Resolve every directive in `text`.
    pub fn render(&self, text: &str, state: &PlayerState, rng: &mut StdRng) -> String {
        let mut out = String::with_capacity(text.len());
        self.render_into(text, state, rng, false, &mut out);
        out
    }

    fn render_into(
        &self,
        text: &str,
        state: &PlayerState,
        rng: &mut StdRng,
        in_block: bool,
        out: &mut String,
    ) {
        let mut rest = text;
        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let tail = &rest[open..];
            match self.directive(tail, state, rng, in_block, out) {
                Some(consumed) => rest = &tail[consumed..],
                None => {
                    out.push('{');
                    rest = &tail[1..];
                }
            }
        }
        out.push_str(rest);
    }

    /// Expand the directive at the start of `tail` into `out`, returning how
    /// many bytes it consumed, or `None` if `tail` does not start with one.
    fn directive(
        &self,
        tail: &str,
        state: &PlayerState,
        rng: &mut StdRng,
        in_block: bool,
        out: &mut String,
    ) -> Option<usize> {
        let close = tail.find('}')?;
        let inner = &tail[1..close];
        let after = close + 1;

        if let Some(name) = inner.strip_prefix(IF_OPEN) {
            if in_block || !is_identifier(name) {
                return None;
            }
            let end = after + tail[after..].find(IF_CLOSE)?;
            if state.variable(name).is_some_and(|v| v.is_truthy()) {
                self.render_into(&tail[after..end], state, rng, true, out);
            }
            return Some(end + IF_CLOSE.len());
        }

        if let Some(options) = inner.strip_prefix(RANDOM_OPEN) {
            let options: Vec<&str> = options.split('|').collect();
            out.push_str(options[rng.random_range(0..options.len())]);
            return Some(after);
        }

        if self.strip_typewriter && (inner == TYPEWRITER_OPEN || inner == TYPEWRITER_CLOSE) {
            return Some(after);
        }

        if is_identifier(inner) {
            if let Some(value) = state.variable(inner) {
                out.push_str(&value.to_string());
                return Some(after);
            }
            if inner == INVENTORY_COUNT {
                out.push_str(&state.inventory.len().to_string());
                return Some(after);
            }
        }

        None
    }
}

fn is_identifier(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}
