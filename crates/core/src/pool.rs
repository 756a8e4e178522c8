use crate::Rarity;
use std::collections::BTreeMap;

/// Source of `(product, rarity)` population sizes. Zero means the slot has
/// nothing to offer.
pub trait PoolSizeProvider {
    fn pool_size(&self, product: &str, rarity: Rarity) -> u32;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoolSizes {
    sizes: BTreeMap<(String, Rarity), u32>,
}

impl PoolSizes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, product: impl Into<String>, rarity: Rarity, size: u32) {
        self.sizes.insert((product.into(), rarity), size);
    }

    pub fn with(mut self, product: impl Into<String>, rarity: Rarity, size: u32) -> Self {
        self.insert(product, rarity, size);
        self
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Rarity, u32)> + '_ {
        self.sizes
            .iter()
            .map(|((product, rarity), size)| (product.as_str(), *rarity, *size))
    }
}

impl PoolSizeProvider for PoolSizes {
    fn pool_size(&self, product: &str, rarity: Rarity) -> u32 {
        self.sizes
            .get(&(product.to_string(), rarity))
            .copied()
            .unwrap_or(0)
    }
}

impl<T: PoolSizeProvider + ?Sized> PoolSizeProvider for &T {
    fn pool_size(&self, product: &str, rarity: Rarity) -> u32 {
        (**self).pool_size(product, rarity)
    }
}

/// `numerator / pool`, or zero when the pool is empty.
pub fn pool_share(numerator: f64, pool: u32) -> f64 {
    if pool == 0 {
        0.0
    } else {
        numerator / pool as f64
    }
}
