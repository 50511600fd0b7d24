use std::borrow::Cow;

use chrono::NaiveDateTime;
use im_core::{Article, TITLE_PLACEHOLDER, UNKNOWN_AUTHOR};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").unwrap());

/// The scalar text at a JSON pointer. Containers, nulls and missing nodes yield `None`.
pub fn text_at<'a>(node: &'a Value, pointer: &str) -> Option<Cow<'a, str>> {
    match node.pointer(pointer)? {
        Value::String(s) => Some(Cow::Borrowed(s.as_str())),
        Value::Number(n) => Some(Cow::Owned(n.to_string())),
        Value::Bool(b) => Some(Cow::Owned(b.to_string())),
        _ => None,
    }
}

/// Removes `<...>` runs and trims. Not an HTML parser.
pub fn strip_tags(html: &str) -> String {
    TAG_RE.replace_all(html, "").trim().to_string()
}

pub fn extract_link(post: &Value) -> String {
    text_at(post, "/link").map(Cow::into_owned).unwrap_or_default()
}

pub fn extract_title(post: &Value) -> String {
    text_at(post, "/title/rendered")
        .map(Cow::into_owned)
        .unwrap_or_else(|| TITLE_PLACEHOLDER.to_string())
}

pub fn extract_subtitle(post: &Value) -> String {
    text_at(post, "/excerpt/rendered")
        .map(|excerpt| strip_tags(&excerpt))
        .unwrap_or_default()
}

pub fn extract_author(post: &Value) -> String {
    post.pointer("/_embedded/author")
        .and_then(Value::as_array)
        .and_then(|authors| authors.first())
        .and_then(|author| text_at(author, "/name"))
        .filter(|name| !name.trim().is_empty())
        .map(Cow::into_owned)
        .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string())
}

pub fn extract_raw_date(post: &Value) -> Option<Cow<'_, str>> {
    text_at(post, "/date")
}

/// Text fields pulled from one post, each already resolved to its fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostFields {
    pub url: String,
    pub title: String,
    pub subtitle: String,
    pub author: String,
}

impl PostFields {
    pub fn extract(post: &Value) -> Self {
        Self {
            url: extract_link(post),
            title: extract_title(post),
            subtitle: extract_subtitle(post),
            author: extract_author(post),
        }
    }

    pub fn into_article(
        self,
        publication_date: Option<NaiveDateTime>,
        content: Option<String>,
    ) -> Article {
        Article {
            url: self.url,
            title: self.title,
            subtitle: self.subtitle,
            author: self.author,
            publication_date,
            content,
        }
    }
}
