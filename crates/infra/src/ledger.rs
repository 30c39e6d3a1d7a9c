//! The five ledger collections, opened once and shared by the services.

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::info;

use stockflow_alerts::Alert;
use stockflow_inventory::{Product, StockRecord, Transfer, Warehouse};

use crate::store::{CollectionStore, InMemoryStore, JsonFileStore};

/// Initial contents for an in-memory ledger.
#[derive(Debug, Clone, Default)]
pub struct LedgerSeed {
    pub products: Vec<Product>,
    pub warehouses: Vec<Warehouse>,
    pub stock: Vec<StockRecord>,
    pub transfers: Vec<Transfer>,
    pub alerts: Vec<Alert>,
}

/// Handle over all collections plus the process-wide write gate.
///
/// Every read-modify-write sequence runs under the gate, so two requests in
/// this process cannot interleave on the same collection. Plain reads skip it.
pub struct Ledger {
    pub products: Arc<dyn CollectionStore<Product>>,
    pub warehouses: Arc<dyn CollectionStore<Warehouse>>,
    pub stock: Arc<dyn CollectionStore<StockRecord>>,
    pub transfers: Arc<dyn CollectionStore<Transfer>>,
    pub alerts: Arc<dyn CollectionStore<Alert>>,
    write_gate: Mutex<()>,
}

impl Ledger {
    pub fn new(
        products: Arc<dyn CollectionStore<Product>>,
        warehouses: Arc<dyn CollectionStore<Warehouse>>,
        stock: Arc<dyn CollectionStore<StockRecord>>,
        transfers: Arc<dyn CollectionStore<Transfer>>,
        alerts: Arc<dyn CollectionStore<Alert>>,
    ) -> Self {
        Self {
            products,
            warehouses,
            stock,
            transfers,
            alerts,
            write_gate: Mutex::new(()),
        }
    }

    /// JSON files `<dir>/{products,warehouses,stock,transfers,alerts}.json`.
    pub fn open(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        info!(data_dir = %dir.display(), "opening JSON ledger");
        Self::new(
            Arc::new(JsonFileStore::<Product>::new(dir.join("products.json"))),
            Arc::new(JsonFileStore::<Warehouse>::new(dir.join("warehouses.json"))),
            Arc::new(JsonFileStore::<StockRecord>::new(dir.join("stock.json"))),
            Arc::new(JsonFileStore::<Transfer>::new(dir.join("transfers.json"))),
            Arc::new(JsonFileStore::<Alert>::new(dir.join("alerts.json"))),
        )
    }

    pub fn in_memory(seed: LedgerSeed) -> Self {
        Self::new(
            Arc::new(InMemoryStore::with_items(seed.products)),
            Arc::new(InMemoryStore::with_items(seed.warehouses)),
            Arc::new(InMemoryStore::with_items(seed.stock)),
            Arc::new(InMemoryStore::with_items(seed.transfers)),
            Arc::new(InMemoryStore::with_items(seed.alerts)),
        )
    }

    /// Serialise a read-modify-write sequence.
    ///
    /// The gate guards no data of its own, so a poisoned lock is still usable.
    pub(crate) fn write_gate(&self) -> MutexGuard<'_, ()> {
        self.write_gate.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl core::fmt::Debug for Ledger {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Ledger").finish_non_exhaustive()
    }
}
