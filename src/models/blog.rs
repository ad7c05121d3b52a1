//! Blog post models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::{require, ValidationError};

/// Blog post from the blog_posts table
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub category: String,
    pub excerpt: String,
    pub content: String,
    pub date: DateTime<Utc>,
    pub image: String,
    /// Visible on the public site
    pub published: bool,
    pub created_at: DateTime<Utc>,
}

impl BlogPost {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_fields(
            &self.title,
            &self.author,
            &self.category,
            &self.excerpt,
            &self.content,
        )
    }
}

/// Payload for creating a blog post
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBlogPost {
    pub title: String,
    pub author: String,
    pub category: String,
    pub excerpt: String,
    pub content: String,
    /// Defaults to the creation time
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub published: bool,
}

impl NewBlogPost {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_fields(
            &self.title,
            &self.author,
            &self.category,
            &self.excerpt,
            &self.content,
        )
    }
}

/// Partial blog post update
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPostUpdate {
    pub title: Option<String>,
    pub author: Option<String>,
    pub category: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub image: Option<String>,
    pub published: Option<bool>,
}

impl BlogPostUpdate {
    pub fn apply(self, post: &mut BlogPost) {
        if let Some(title) = self.title {
            post.title = title;
        }
        if let Some(author) = self.author {
            post.author = author;
        }
        if let Some(category) = self.category {
            post.category = category;
        }
        if let Some(excerpt) = self.excerpt {
            post.excerpt = excerpt;
        }
        if let Some(content) = self.content {
            post.content = content;
        }
        if let Some(date) = self.date {
            post.date = date;
        }
        if let Some(image) = self.image {
            post.image = image;
        }
        if let Some(published) = self.published {
            post.published = published;
        }
    }
}

fn validate_fields(
    title: &str,
    author: &str,
    category: &str,
    excerpt: &str,
    content: &str,
) -> Result<(), ValidationError> {
    require(title, "title")?;
    require(author, "author")?;
    require(category, "category")?;
    require(excerpt, "excerpt")?;
    require(content, "content")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_post_is_draft_by_default() {
        let post: NewBlogPost = serde_json::from_value(serde_json::json!({
            "title": "Mountain Hiking Guide",
            "author": "Admin",
            "category": "travel",
            "excerpt": "Complete guide to hiking in the mountains",
            "content": "Tips and tricks."
        }))
        .unwrap();

        assert!(!post.published);
        assert!(post.date.is_none());
        assert!(post.validate().is_ok());
    }

    #[test]
    fn test_missing_content_is_rejected() {
        let post = NewBlogPost {
            title: "Budget Travel Tips".to_string(),
            author: "Admin".to_string(),
            category: "tips".to_string(),
            excerpt: "Save money while traveling".to_string(),
            content: String::new(),
            date: None,
            image: String::new(),
            published: true,
        };

        assert_eq!(post.validate(), Err(ValidationError::missing("content")));
    }
}
