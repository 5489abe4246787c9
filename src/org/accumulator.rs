//! Block Accumulator
//!
//!     The state machine that turns classified lines into items. Headlines and keywords are
//!     single-line and leave no state behind. Comments and text accumulate: consecutive lines of
//!     the same kind grow one open block until a line of another kind, or the end of input,
//!     closes it.
//!
//! States
//!
//!     Idle        no block is open
//!     InComment   a comment block is open
//!     InText      a text block is open
//!
//!     [`transition`] is a pure function from (state, line) to (next state, emitted items), so the
//!     machine can be driven and inspected without a reader. [`Accumulator`] wraps it with the
//!     owned current state.
//!
//! Emission Order
//!
//!     When a line closes an open block, the closed block is emitted before anything the line
//!     itself produces. Spans therefore come out in source order and never overlap.
use super::classify::{classify, HeadlineParts, LineClass};
use super::item::Item;
use super::range::Span;
use super::reader::Line;

/// A multi-line block that is still growing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenBlock {
    pub body: String,
    pub span: Span,
}

impl OpenBlock {
    fn open(body: &str, span: Span) -> Self {
        Self {
            body: body.to_string(),
            span,
        }
    }

    fn append(&mut self, body: &str, span: &Span) {
        self.body.push('\n');
        self.body.push_str(body);
        self.span.extend_to(span);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum State {
    #[default]
    Idle,
    InComment(OpenBlock),
    InText(OpenBlock),
}

impl State {
    /// Finalize the open block, if any, into an item.
    pub fn close(self) -> Option<Item> {
        match self {
            State::Idle => None,
            State::InComment(block) => Some(Item::Comment {
                body: block.body,
                span: block.span,
            }),
            State::InText(block) => Some(Item::Text {
                body: block.body,
                span: block.span,
            }),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, State::Idle)
    }
}

/// Items produced by one transition: at most the block it closed and the line's own item.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Emitted {
    pub closed: Option<Item>,
    pub item: Option<Item>,
}

impl Emitted {
    pub fn is_empty(&self) -> bool {
        self.closed.is_none() && self.item.is_none()
    }
}

impl IntoIterator for Emitted {
    type Item = Item;
    type IntoIter = std::iter::Flatten<std::array::IntoIter<Option<Item>, 2>>;

    fn into_iter(self) -> Self::IntoIter {
        [self.closed, self.item].into_iter().flatten()
    }
}

/// Apply one classified line to the machine.
///
/// `text` is the line's content, used as the body of text lines; `span` covers the line.
pub fn transition(state: State, class: LineClass, text: &str, span: Span) -> (State, Emitted) {
    match class {
        LineClass::Keyword { key, value } => {
            let emitted = Emitted {
                closed: state.close(),
                item: Some(Item::Keyword { key, value, span }),
            };
            (State::Idle, emitted)
        }
        LineClass::Headline(HeadlineParts { level, body, tags }) => {
            let emitted = Emitted {
                closed: state.close(),
                item: Some(Item::Headline {
                    level,
                    body,
                    tags,
                    span,
                }),
            };
            (State::Idle, emitted)
        }
        LineClass::Comment { body } => match state {
            State::InComment(mut block) => {
                block.append(&body, &span);
                (State::InComment(block), Emitted::default())
            }
            other => {
                let emitted = Emitted {
                    closed: other.close(),
                    item: None,
                };
                (State::InComment(OpenBlock::open(&body, span)), emitted)
            }
        },
        LineClass::Text => match state {
            State::InText(mut block) => {
                block.append(text, &span);
                (State::InText(block), Emitted::default())
            }
            other => {
                let emitted = Emitted {
                    closed: other.close(),
                    item: None,
                };
                (State::InText(OpenBlock::open(text, span)), emitted)
            }
        },
    }
}

/// Owns the machine state between lines.
#[derive(Debug, Default)]
pub struct Accumulator {
    state: State,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    /// Classify a line and advance the machine.
    pub fn push_line(&mut self, line: &Line<'_>) -> Emitted {
        let class = classify(line.text);
        log::trace!("line {} classified as {:?}", line.number, class);
        let state = std::mem::take(&mut self.state);
        let (next, emitted) = transition(state, class, line.text, line.span());
        if let Some(closed) = &emitted.closed {
            log::debug!("closed {} block at {}", closed.kind(), closed.span());
        }
        self.state = next;
        emitted
    }

    /// Close whatever block is open. The machine is idle afterwards.
    pub fn flush(&mut self) -> Option<Item> {
        let closed = std::mem::take(&mut self.state).close();
        if let Some(item) = &closed {
            log::debug!("flushed {} block at {}", item.kind(), item.span());
        }
        closed
    }
}
