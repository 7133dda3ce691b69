//! # Render
//!
//! Folds each span's type flags into a caller-defined node.
//!
//! A [`Presenter`] wraps the span text once per set flag, lowest bit first,
//! so `Bold | Italic` over `"x"` becomes `wrap(wrap(Text("x"), Bold), Italic)`.
//! A span with no flags is wrapped once with [`ElementType::NORMAL`].
//!
//! - **`html`**: `HtmlPresenter`, producing HTML strings
//! - **`hyperlink`**: `HyperLink`, the `[label](url)` shape behind link spans

pub mod html;
pub mod hyperlink;

use std::marker::PhantomData;

use crate::{Document, ElementType, Span};

pub use html::{HtmlPresenter, render_html};
pub use hyperlink::{HyperLink, LinkKind};

/// The value being wrapped: the span's raw text on the first fold, the
/// previously built node afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment<'a, N> {
    Text(&'a str),
    Node(N),
}

impl<N> Fragment<'_, N> {
    pub fn is_text(&self) -> bool {
        matches!(self, Fragment::Text(_))
    }
}

/// Turns fragments into presentation nodes, one flag at a time.
pub trait Presenter {
    type Node;

    fn wrap(&self, child: Fragment<'_, Self::Node>, flag: ElementType) -> Self::Node;
}

/// Builds the node for a single span.
pub fn present<P: Presenter + ?Sized>(span: &Span, presenter: &P) -> P::Node {
    let mut node: Option<P::Node> = None;
    for flag in span.element_type().iter() {
        let child = match node.take() {
            Some(inner) => Fragment::Node(inner),
            None => Fragment::Text(span.text()),
        };
        node = Some(presenter.wrap(child, flag));
    }
    node.unwrap_or_else(|| presenter.wrap(Fragment::Text(span.text()), ElementType::NORMAL))
}

/// One node per span, in document order.
pub fn render<P: Presenter + ?Sized>(document: &Document, presenter: &P) -> Vec<P::Node> {
    document.iter().map(|span| present(span, presenter)).collect()
}

/// Adapts a closure into a [`Presenter`].
pub struct FnPresenter<N, F> {
    wrap: F,
    _node: PhantomData<fn() -> N>,
}

impl<N, F> FnPresenter<N, F>
where
    F: Fn(Fragment<'_, N>, ElementType) -> N,
{
    pub fn new(wrap: F) -> Self {
        Self {
            wrap,
            _node: PhantomData,
        }
    }
}

impl<N, F> Presenter for FnPresenter<N, F>
where
    F: Fn(Fragment<'_, N>, ElementType) -> N,
{
    type Node = N;

    fn wrap(&self, child: Fragment<'_, N>, flag: ElementType) -> N {
        (self.wrap)(child, flag)
    }
}
