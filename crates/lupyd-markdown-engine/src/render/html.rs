use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::{Document, ElementType};

use super::{Fragment, HyperLink, LinkKind, Presenter, render};

/// Presents spans as HTML strings.
///
/// Text is escaped; nested flags nest their tags. Svg spans are emitted as
/// their raw markup without any sanitizing.
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlPresenter;

impl HtmlPresenter {
    fn hyperlink(text: &str) -> String {
        let Some(link) = HyperLink::parse(text) else {
            return format!("<a>{}</a>", encode_text(text));
        };
        let url = encode_double_quoted_attribute(link.url);
        match link.kind {
            LinkKind::Image => format!(r#"<img src="{url}" alt="image">"#),
            LinkKind::Video => format!(r#"<video src="{url}" controls></video>"#),
            LinkKind::Link => format!(r#"<a href="{url}">{}</a>"#, encode_text(link.label)),
        }
    }
}

fn tag(name: &str, class: Option<&str>, content: &str) -> String {
    match class {
        Some(class) => format!(r#"<{name} class="{class}">{content}</{name}>"#),
        None => format!("<{name}>{content}</{name}>"),
    }
}

impl Presenter for HtmlPresenter {
    type Node = String;

    fn wrap(&self, child: Fragment<'_, String>, flag: ElementType) -> String {
        // Link-like flags read the raw text; once wrapped they pass through.
        let raw = match child {
            Fragment::Text(text) => text,
            Fragment::Node(node) => return wrap_markup(node, flag),
        };

        if flag == ElementType::HYPERLINK {
            return Self::hyperlink(raw);
        }
        if flag == ElementType::SVG {
            return raw.to_string();
        }
        if flag == ElementType::IMAGE_LINK {
            return format!(r#"<img src="{}">"#, encode_double_quoted_attribute(raw));
        }
        if flag == ElementType::VIDEO_LINK {
            return format!(
                r#"<video src="{}" controls></video>"#,
                encode_double_quoted_attribute(raw)
            );
        }
        wrap_markup(encode_text(raw).into_owned(), flag)
    }
}

/// Wraps already-escaped `content` in the tag for `flag`.
fn wrap_markup(content: String, flag: ElementType) -> String {
    let (name, class) = match flag {
        f if f == ElementType::BOLD => ("b", None),
        f if f == ElementType::ITALIC => ("i", None),
        f if f == ElementType::HEADER => ("h1", None),
        f if f == ElementType::UNDERLINE => ("u", None),
        f if f == ElementType::CODE => ("code", None),
        f if f == ElementType::QUOTE => ("b", Some("quote")),
        f if f == ElementType::SPOILER => ("span", Some("spoiler")),
        f if f == ElementType::MENTION => ("b", Some("mention")),
        f if f == ElementType::HASHTAG => ("b", Some("hashtag")),
        f if f.is_normal() => ("span", None),
        _ => return content,
    };
    tag(name, class, &content)
}

/// Renders a whole document inside a `lupyd-markdown` container.
pub fn render_html(document: &Document) -> String {
    let body = render(document, &HtmlPresenter).concat();
    tag("div", Some("lupyd-markdown"), &body)
}
