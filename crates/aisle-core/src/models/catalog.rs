use std::collections::HashMap;

use crate::errors::LoadError;

use super::product::ProductRecord;

/// The read-only product catalog, built once and shared across queries.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<ProductRecord>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog, normalizing every record.
    ///
    /// # Errors
    /// `LoadError::DuplicateId` if two records share an id.
    pub fn new(mut products: Vec<ProductRecord>) -> Result<Self, LoadError> {
        let mut index = HashMap::with_capacity(products.len());
        for (pos, product) in products.iter_mut().enumerate() {
            product.normalize();
            if index.insert(product.id.clone(), pos).is_some() {
                return Err(LoadError::DuplicateId {
                    id: product.id.clone(),
                });
            }
        }
        Ok(Self { products, index })
    }

    pub fn get(&self, id: &str) -> Option<&ProductRecord> {
        self.index.get(id).map(|&pos| &self.products[pos])
    }

    /// Position of a product in load order.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn products(&self) -> &[ProductRecord] {
        &self.products
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ProductRecord> {
        self.products.iter()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Number of products that carry a precomputed embedding.
    pub fn embedded_count(&self) -> usize {
        self.products.iter().filter(|p| p.embedding.is_some()).count()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a ProductRecord;
    type IntoIter = std::slice::Iter<'a, ProductRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.products.iter()
    }
}
