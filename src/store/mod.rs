//! Row store: the authoritative, session-scoped list of cargo records.
//!
//! The store owns every record and the per-type identifier counters. Views
//! (filtering, pagination) borrow `all()` on every render pass and never
//! keep copies.

use crate::model::{
    Cargo, CargoId, CargoPatch, IdGenerator, NewCargo, Product, ProductLimits,
    StoreError,
};
use tracing::{info, warn};

/// Result of loading a product into a cargo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductOutcome {
    /// Product count after loading.
    pub product_count: u32,
    /// Whether this product moved the cargo to awaiting dispatch.
    pub now_awaiting_dispatch: bool,
}

/// Ordered collection of cargo records, most recent first.
#[derive(Debug, Clone, Default)]
pub struct CargoStore {
    rows: Vec<Cargo>,
    ids: IdGenerator,
    limits: ProductLimits,
}

impl CargoStore {
    /// Empty store using `limits` for cargos without their own criterion.
    pub fn new(limits: ProductLimits) -> Self {
        Self {
            rows: Vec::new(),
            ids: IdGenerator::new(),
            limits,
        }
    }

    /// Allocate an identifier, insert the record at the front and return it.
    pub fn add(&mut self, input: NewCargo) -> &Cargo {
        let id = self.ids.next(input.cargo_type);
        let cargo = Cargo::new(id, input);
        info!(
            id = %cargo.id(),
            cargo_type = %cargo.cargo_type(),
            distance_km = cargo.distance_km(),
            "Cargo added"
        );
        self.rows.insert(0, cargo);
        &self.rows[0]
    }

    /// Apply `patch` to the record with identifier `id`.
    ///
    /// # Errors
    ///
    /// `StoreError::NotFound` if no record has this identifier.
    pub fn update(&mut self, id: &CargoId, patch: CargoPatch) -> Result<&Cargo, StoreError> {
        let index = self.position(id)?;
        let cargo = &mut self.rows[index];
        cargo.apply(patch);
        info!(id = %id, status = cargo.status(), state = %cargo.state(), "Cargo updated");
        Ok(&*cargo)
    }

    /// Remove and return the record with identifier `id`.
    ///
    /// Its identifier is never reused.
    ///
    /// # Errors
    ///
    /// `StoreError::NotFound` if no record has this identifier.
    pub fn remove(&mut self, id: &CargoId) -> Result<Cargo, StoreError> {
        let index = self.position(id)?;
        let removed = self.rows.remove(index);
        info!(id = %id, remaining = self.rows.len(), "Cargo removed");
        Ok(removed)
    }

    /// Load `product` into the record with identifier `id`.
    ///
    /// # Errors
    ///
    /// - `StoreError::NotFound` if no record has this identifier.
    /// - `StoreError::NotAcceptingProducts` if the cargo is closed or
    ///   already awaiting dispatch.
    pub fn add_product(
        &mut self,
        id: &CargoId,
        product: Product,
    ) -> Result<ProductOutcome, StoreError> {
        let index = self.position(id)?;
        let limits = self.limits;
        let cargo = &mut self.rows[index];

        if !cargo.accepts_products() {
            warn!(id = %id, "Product refused: cargo not accepting products");
            return Err(StoreError::NotAcceptingProducts {
                id: id.clone(),
                state: cargo.state(),
                aggregation: cargo.aggregation(),
            });
        }

        let now_awaiting_dispatch = cargo.push_product(product, limits);
        info!(
            id = %id,
            product_count = cargo.product_count(),
            total_weight_kg = cargo.total_weight_kg(),
            now_awaiting_dispatch,
            "Product loaded"
        );

        Ok(ProductOutcome {
            product_count: cargo.product_count(),
            now_awaiting_dispatch,
        })
    }

    /// Look up a record by identifier.
    pub fn get(&self, id: &CargoId) -> Option<&Cargo> {
        self.rows.iter().find(|c| c.id() == id)
    }

    /// Every record, most recent first.
    pub fn all(&self) -> &[Cargo] {
        &self.rows
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Default limits applied to cargos without their own criterion.
    pub fn limits(&self) -> ProductLimits {
        self.limits
    }

    fn position(&self, id: &CargoId) -> Result<usize, StoreError> {
        self.rows.iter().position(|c| c.id() == id).ok_or_else(|| {
            warn!(id = %id, "Record not found");
            StoreError::NotFound(id.clone())
        })
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
