// src/zillow/document.rs
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

/// A text node together with the element that directly contains it.
#[derive(Debug, Clone, Copy)]
pub struct TextNode<'a> {
    pub text: &'a str,
    pub parent: Option<ElementRef<'a>>,
}

/// A parsed listing page.
///
/// Parsing goes through html5ever, which recovers from broken markup instead
/// of failing, so a garbage body yields a sparse tree and every lookup simply
/// comes back empty.
pub struct Document {
    html: Html,
}

impl Document {
    pub fn parse(source: &str) -> Self {
        Self {
            html: Html::parse_document(source),
        }
    }

    /// All elements in document order.
    fn elements(&self) -> impl Iterator<Item = ElementRef<'_>> {
        self.html.tree.root().descendants().filter_map(ElementRef::wrap)
    }

    /// First element matching the CSS selector `css`.
    pub fn find_first(&self, css: &str) -> Option<ElementRef<'_>> {
        let selector = compile(css)?;
        self.html.select(&selector).next()
    }

    /// Every element matching the CSS selector `css`, in document order.
    pub fn find_all(&self, css: &str) -> Vec<ElementRef<'_>> {
        match compile(css) {
            Some(selector) => self.html.select(&selector).collect(),
            None => vec![],
        }
    }

    /// Text nodes satisfying `predicate`, in document order.
    /// Whitespace-only nodes are never offered to the predicate.
    pub fn find_all_text<P>(&self, predicate: P) -> Vec<TextNode<'_>>
    where
        P: Fn(&str) -> bool,
    {
        self.html
            .tree
            .root()
            .descendants()
            .filter_map(|node| {
                let text: &str = node.value().as_text()?;
                if text.trim().is_empty() || !predicate(text) {
                    return None;
                }
                Some(TextNode {
                    text,
                    parent: node.parent().and_then(ElementRef::wrap),
                })
            })
            .collect()
    }

    /// First element with tag `tag` that starts after `from` starts, which
    /// includes `from`'s own descendants.
    pub fn next_in_document_order<'a>(
        &'a self,
        from: ElementRef<'a>,
        tag: &str,
    ) -> Option<ElementRef<'a>> {
        self.elements()
            .skip_while(|el| el.id() != from.id())
            .skip(1)
            .find(|el| el.value().name().eq_ignore_ascii_case(tag))
    }
}

fn compile(css: &str) -> Option<Selector> {
    match Selector::parse(css) {
        Ok(selector) => Some(selector),
        Err(e) => {
            debug!("Unusable selector {css}: {e:?}");
            None
        }
    }
}

/// Text of `element` and its descendants, trimmed, whitespace runs collapsed
/// to one space.
pub fn text_of(element: ElementRef<'_>) -> String {
    let raw: String = element.text().collect();
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn parent_of(element: ElementRef<'_>) -> Option<ElementRef<'_>> {
    element.parent().and_then(ElementRef::wrap)
}

pub fn next_sibling_of(element: ElementRef<'_>) -> Option<ElementRef<'_>> {
    element.next_siblings().find_map(ElementRef::wrap)
}

pub fn next_siblings_of(element: ElementRef<'_>) -> impl Iterator<Item = ElementRef<'_>> {
    element.next_siblings().filter_map(ElementRef::wrap)
}

pub fn previous_sibling_of(element: ElementRef<'_>) -> Option<ElementRef<'_>> {
    element.prev_siblings().find_map(ElementRef::wrap)
}
