//! Instagram feature posts shown on the homepage

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::{default_true, require, ValidationError};

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeaturePost {
    pub id: Uuid,
    /// Image URL or base64 data
    pub image: String,
    pub instagram_url: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl FeaturePost {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require(&self.image, "image")?;
        require(&self.instagram_url, "instagramUrl")
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFeaturePost {
    pub image: String,
    pub instagram_url: String,
    #[serde(default = "default_true")]
    pub active: bool,
}

impl NewFeaturePost {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require(&self.image, "image")?;
        require(&self.instagram_url, "instagramUrl")
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeaturePostUpdate {
    pub image: Option<String>,
    pub instagram_url: Option<String>,
    pub active: Option<bool>,
}

impl FeaturePostUpdate {
    pub fn apply(self, post: &mut FeaturePost) {
        if let Some(image) = self.image {
            post.image = image;
        }
        if let Some(url) = self.instagram_url {
            post.instagram_url = url;
        }
        if let Some(active) = self.active {
            post.active = active;
        }
    }
}
