use chrono::{Local, NaiveDate};
use uuid::Uuid;

pub use aggregate::{CategoryTotal, MonthTotals, MonthlyBucket};
pub use categories::Category;
pub use error::EngineError;
pub use storage::{FileStorage, MemoryStorage, Storage};
pub use store::TransactionStore;
pub use transactions::{Transaction, TransactionDraft, TransactionKind};
pub use validation::{Field, FormPayload, ValidationErrors, validate};

pub mod aggregate;
mod categories;
mod error;
pub mod export;
pub mod money;
mod storage;
mod store;
mod transactions;
pub mod validation;

type ResultEngine<T> = Result<T, EngineError>;

/// Slot the collection lives in unless the builder says otherwise.
pub const DEFAULT_KEY: &str = "transactions";

/// A transaction store bound to the slot it is mirrored to.
///
/// Every mutation is applied to memory first and then written back with a
/// full rewrite of the slot. If that write fails the error is returned, but
/// the in-memory change stays: memory is the source of truth for the
/// session.
#[derive(Debug)]
pub struct Engine<S> {
    store: TransactionStore,
    storage: S,
    key: String,
}

impl Engine<()> {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder<()> {
        EngineBuilder::default()
    }
}

impl<S: Storage> Engine<S> {
    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Every transaction, in no particular order.
    pub fn all(&self) -> &[Transaction] {
        self.store.all()
    }

    /// Transactions in display order (newest date first).
    pub fn sorted(&self) -> Vec<&Transaction> {
        self.store.sorted_by_date()
    }

    pub fn get(&self, id: Uuid) -> Option<&Transaction> {
        self.store.get(id)
    }

    /// Appends a fully formed transaction.
    pub fn add(&mut self, tx: Transaction) -> ResultEngine<()> {
        tracing::info!("adding transaction {}", tx.id);
        self.store.add(tx);
        self.persist()
    }

    /// Validates `payload` and stores it as a new transaction.
    pub fn create(&mut self, payload: FormPayload) -> ResultEngine<Uuid> {
        let tx = Transaction::new(payload.into_draft()?);
        let id = tx.id;
        self.add(tx)?;
        Ok(id)
    }

    /// Replaces the editable fields of `id`.
    ///
    /// Returns `false` when `id` is unknown; the slot is rewritten either
    /// way.
    pub fn update(&mut self, id: Uuid, draft: TransactionDraft) -> ResultEngine<bool> {
        let found = self.store.update(id, draft);
        if found {
            tracing::info!("updated transaction {id}");
        } else {
            tracing::debug!("update of unknown transaction {id} ignored");
        }
        self.persist()?;
        Ok(found)
    }

    /// Validates `payload` and applies it to `id`.
    pub fn edit(&mut self, id: Uuid, payload: FormPayload) -> ResultEngine<bool> {
        let draft = payload.into_draft()?;
        self.update(id, draft)
    }

    /// Removes `id`. Returns `false` when it was not there.
    pub fn remove(&mut self, id: Uuid) -> ResultEngine<bool> {
        let found = self.store.remove(id);
        if found {
            tracing::info!("removed transaction {id}");
        } else {
            tracing::debug!("removal of unknown transaction {id} ignored");
        }
        self.persist()?;
        Ok(found)
    }

    /// Form contents for editing `id`.
    pub fn edit_form(&self, id: Uuid) -> Option<FormPayload> {
        self.store.get(id).map(FormPayload::from)
    }

    pub fn monthly_expenses(&self) -> Vec<MonthlyBucket> {
        aggregate::monthly_expenses(self.store.all(), today())
    }

    pub fn category_breakdown(&self) -> Vec<CategoryTotal> {
        aggregate::category_breakdown(self.store.all())
    }

    pub fn month_totals(&self) -> MonthTotals {
        aggregate::month_totals(self.store.all(), today())
    }

    /// CSV of the listing in display order.
    pub fn export_csv(&self) -> ResultEngine<Vec<u8>> {
        export::to_csv(self.store.sorted_by_date())
    }

    fn persist(&mut self) -> ResultEngine<()> {
        self.store
            .save(&mut self.storage, &self.key)
            .inspect_err(|err| tracing::warn!("failed to persist transactions: {err}"))
    }
}

/// Calendar day used as "today" by the aggregates.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[derive(Debug)]
pub struct EngineBuilder<S> {
    storage: S,
    key: String,
}

impl Default for EngineBuilder<()> {
    fn default() -> Self {
        Self {
            storage: (),
            key: DEFAULT_KEY.to_string(),
        }
    }
}

impl<S> EngineBuilder<S> {
    /// Pass the storage the collection is loaded from and saved to.
    pub fn storage<T: Storage>(self, storage: T) -> EngineBuilder<T> {
        EngineBuilder {
            storage,
            key: self.key,
        }
    }

    /// Override the slot name (defaults to [`DEFAULT_KEY`]).
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }
}

impl<S: Storage> EngineBuilder<S> {
    /// Construct `Engine`, loading whatever the slot currently holds.
    pub fn build(self) -> Engine<S> {
        let store = TransactionStore::load(&self.storage, &self.key);
        Engine {
            store,
            storage: self.storage,
            key: self.key,
        }
    }
}
