//! Static product catalog and category filtering.

use std::collections::{BTreeSet, HashSet};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::Amount;
use crate::model::{Product, ProductId};

/// Category selection that disables filtering.
pub const ALL_CATEGORIES: &str = "All";

/// Errors raised while loading or validating a catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to open catalog {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid catalog json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("line {line}: failed to parse product: {source}")]
    Csv { line: usize, source: csv::Error },

    #[error("unsupported catalog format '{0}', expected .json or .csv")]
    UnsupportedFormat(PathBuf),

    #[error("duplicate product id {0}")]
    DuplicateId(ProductId),

    #[error("product {0} has a negative price")]
    NegativePrice(ProductId),

    #[error("product {0}: price times stock exceeds the supported range")]
    InvalidPrice(ProductId),
}

/// Read-only list of purchasable products.
///
/// The value of the whole catalog at full stock fits in an [`Amount`], so
/// no cart built from it can overflow.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    /// Distinct categories, sorted.
    categories: Vec<String>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(products.len());
        let mut capacity = Amount::ZERO;
        for product in &products {
            if !seen.insert(product.id) {
                return Err(CatalogError::DuplicateId(product.id));
            }
            if product.price.is_negative() {
                return Err(CatalogError::NegativePrice(product.id));
            }
            capacity = product
                .price
                .checked_mul(product.stock)
                .and_then(|value| capacity.checked_add(value))
                .ok_or(CatalogError::InvalidPrice(product.id))?;
        }

        let categories = derive_categories(&products);
        Ok(Self {
            products,
            categories,
        })
    }

    /// Load a catalog file, picking the format from its extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let open = || {
            File::open(path).map_err(|source| CatalogError::Io {
                path: path.to_path_buf(),
                source,
            })
        };

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_reader(open()?),
            Some("csv") => Self::from_csv_reader(open()?),
            _ => Err(CatalogError::UnsupportedFormat(path.to_path_buf())),
        }
    }

    /// Parse a JSON array of products.
    pub fn from_json_reader(reader: impl Read) -> Result<Self, CatalogError> {
        let products: Vec<Product> = serde_json::from_reader(reader)?;
        Self::new(products)
    }

    /// Parse a CSV file with an `id,name,description,price,category,image,stock` header.
    pub fn from_csv_reader(reader: impl Read) -> Result<Self, CatalogError> {
        let products = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader)
            .into_deserialize::<Product>()
            .enumerate()
            .map(|(idx, result)| {
                // 1-indexed, skip header
                result.map_err(|source| CatalogError::Csv {
                    line: idx + 2,
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(products)
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn find(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }

    /// Distinct category labels, sorted lexicographically.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Products in `selected`, in catalog order. [`ALL_CATEGORIES`] returns everything.
    pub fn filter_by_category<'a>(
        &'a self,
        selected: &'a str,
    ) -> impl Iterator<Item = &'a Product> + 'a {
        self.products
            .iter()
            .filter(move |product| selected == ALL_CATEGORIES || product.category == selected)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

fn derive_categories(products: &[Product]) -> Vec<String> {
    products
        .iter()
        .map(|product| product.category.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
