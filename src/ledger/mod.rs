//! Barcode stock ledger.
//!
//! An in-memory map from item identifier to quantity on hand.  Every call
//! is all-or-nothing: a rejected `add` or `remove` leaves the ledger
//! exactly as it was.  Entries are created by the first `add` and are never
//! deleted, so an item drawn down to zero still shows up in a snapshot.

pub mod prompt;

use core::fmt;
use std::collections::BTreeMap;

use serde::Serialize;

/// Owned copy of the whole ledger.
pub type StockSnapshot = BTreeMap<String, u64>;

/// One line of the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StockEntry {
    pub id: String,
    pub quantity: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// Quantities must be strictly positive.
    InvalidQuantity(i64),
    /// `remove` on an identifier that was never added.
    UnknownItem(String),
    /// `remove` of more than is on hand.
    InsufficientStock { requested: u64, available: u64 },
    /// The stored quantity would exceed `u64::MAX`.
    QuantityOverflow,
}

impl fmt::Display for LedgerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidQuantity(_) => write!(f, "Quantity must be positive"),
            Self::UnknownItem(_) => write!(f, "Barcode not found"),
            Self::InsufficientStock { .. } => write!(f, "Not enough stock to remove"),
            Self::QuantityOverflow => write!(f, "Quantity too large"),
        }
    }
}

impl std::error::Error for LedgerError {}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StockLedger {
    stock: BTreeMap<String, u64>,
}

impl StockLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `qty` of `id`, creating the entry if needed.  Returns the new
    /// quantity on hand.
    pub fn add(&mut self, id: &str, qty: i64) -> Result<u64, LedgerError> {
        let qty = positive(qty)?;
        let current = self.quantity(id);
        let total = current
            .checked_add(qty)
            .ok_or(LedgerError::QuantityOverflow)?;
        self.stock.insert(id.to_owned(), total);
        Ok(total)
    }

    /// Take `qty` of `id` out of stock.  Returns the remaining quantity.
    pub fn remove(&mut self, id: &str, qty: i64) -> Result<u64, LedgerError> {
        let Some(available) = self.stock.get_mut(id) else {
            return Err(LedgerError::UnknownItem(id.to_owned()));
        };
        let qty = positive(qty)?;
        if *available < qty {
            return Err(LedgerError::InsufficientStock {
                requested: qty,
                available: *available,
            });
        }
        *available -= qty;
        Ok(*available)
    }

    /// Quantity on hand; 0 for identifiers never added.
    pub fn quantity(&self, id: &str) -> u64 {
        self.stock.get(id).copied().unwrap_or(0)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.stock.contains_key(id)
    }

    pub fn snapshot(&self) -> StockSnapshot {
        self.stock.clone()
    }

    /// Entries in identifier order.
    pub fn entries(&self) -> impl Iterator<Item = StockEntry> + '_ {
        self.stock.iter().map(|(id, &quantity)| StockEntry {
            id: id.clone(),
            quantity,
        })
    }

    pub fn len(&self) -> usize {
        self.stock.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stock.is_empty()
    }
}

fn positive(qty: i64) -> Result<u64, LedgerError> {
    if qty <= 0 {
        return Err(LedgerError::InvalidQuantity(qty));
    }
    Ok(qty as u64)
}
