use serde::{Deserialize, Serialize};

use crate::text;

/// Catalog-unique product identifier.
pub type ProductId = String;

/// A cleaned catalog entry. Immutable once the catalog is built.
///
/// Numeric fields are either finite or `None`; `Catalog::new` enforces this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: ProductId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    /// Selling (discounted) price.
    #[serde(default)]
    pub price: Option<f64>,
    /// List price before discount.
    #[serde(default)]
    pub actual_price: Option<f64>,
    #[serde(default)]
    pub discount_percentage: Option<f64>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub rating_count: Option<u64>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub product_url: Option<String>,
    #[serde(default, skip_serializing)]
    pub embedding: Option<Vec<f32>>,
    /// Lowercase-folded title/category/description, filled by `Catalog::new`.
    #[serde(skip)]
    pub search_text: String,
}

impl ProductRecord {
    /// A record with only an id and a title. Other fields are empty.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            category: String::new(),
            price: None,
            actual_price: None,
            discount_percentage: None,
            rating: None,
            rating_count: None,
            image_url: None,
            product_url: None,
            embedding: None,
            search_text: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn with_rating_count(mut self, count: u64) -> Self {
        self.rating_count = Some(count);
        self
    }

    pub fn with_embedding(mut self, embedding: Vec<f32>) -> Self {
        self.embedding = Some(embedding);
        self
    }

    /// Recompute `search_text` and drop any non-finite numeric values.
    pub(crate) fn normalize(&mut self) {
        self.price = self.price.filter(|v| v.is_finite());
        self.actual_price = self.actual_price.filter(|v| v.is_finite());
        self.discount_percentage = self.discount_percentage.filter(|v| v.is_finite());
        self.rating = self.rating.filter(|v| v.is_finite());
        if self
            .embedding
            .as_ref()
            .is_some_and(|e| e.is_empty() || e.iter().any(|x| !x.is_finite()))
        {
            self.embedding = None;
        }
        self.search_text = text::fold(&format!(
            "{} {} {}",
            self.title, self.category, self.description
        ));
    }
}
