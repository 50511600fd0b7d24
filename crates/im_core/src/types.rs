use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Title used when a post carries no `title.rendered`
pub const TITLE_PLACEHOLDER: &str = "title unavailable";

/// Author used when a post has no usable embedded author
pub const UNKNOWN_AUTHOR: &str = "unknown";

/// A post that passed the category filter, normalized and enriched with its body text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub url: String,
    pub title: String,
    pub subtitle: String,
    pub author: String,
    pub publication_date: Option<NaiveDateTime>,
    pub content: Option<String>,
}

/// An article as held by an [`crate::ArticleStore`], with its store-assigned id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredArticle {
    pub id: i64,
    #[serde(flatten)]
    pub article: Article,
}

impl StoredArticle {
    pub fn new(id: i64, article: Article) -> Self {
        Self { id, article }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample() -> Article {
        Article {
            url: "https://www.infomoney.com.br/mercados/ibovespa-sobe/".to_string(),
            title: "Ibovespa sobe".to_string(),
            subtitle: "Índice fecha em alta".to_string(),
            author: "Equipe".to_string(),
            publication_date: NaiveDate::from_ymd_opt(2024, 1, 2)
                .and_then(|d| d.and_hms_opt(10, 0, 0)),
            content: None,
        }
    }

    #[test]
    fn test_article_serializes_camel_case() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["publicationDate"], "2024-01-02T10:00:00");
        assert!(json["content"].is_null());
        assert!(json.get("publication_date").is_none());
    }

    #[test]
    fn test_stored_article_flattens_fields() {
        let stored = StoredArticle::new(7, sample());
        let json = serde_json::to_value(&stored).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["title"], "Ibovespa sobe");

        let back: StoredArticle = serde_json::from_value(json).unwrap();
        assert_eq!(back, stored);
    }
}
