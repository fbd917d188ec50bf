//! Outcome of an inventory-mutating operation.
//!
//! Every operation that can move, add, remove or fail to place items reports
//! back through [`InventoryTransactionResult`]: check [`result_type`], inspect
//! [`rejected_items`], and optionally [`revert_on_failure`].
//!
//! [`result_type`]: InventoryTransactionResult::result_type
//! [`rejected_items`]: InventoryTransactionResult::rejected_items
//! [`revert_on_failure`]: InventoryTransactionResult::revert_on_failure

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use invkit_core::{ApiError, ApiResult, ValueObject};

use crate::item::ItemStackSnapshot;
use crate::slot::SlotTransaction;

/// Outcome classification of an inventory operation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    /// The operation completed. Inventory state may have changed.
    Success,
    /// The operation did not complete for an expected reason (inventory full,
    /// item rejected, vetoed). Inventory state may have partially changed.
    Failure,
    /// The operation failed unexpectedly. Inventory state is undefined.
    Error,
}

impl TransactionType {
    fn severity(self) -> u8 {
        match self {
            TransactionType::Success => 0,
            TransactionType::Failure => 1,
            TransactionType::Error => 2,
        }
    }

    /// The more severe of the two: `Error` > `Failure` > `Success`.
    pub fn and(self, other: TransactionType) -> TransactionType {
        if other.severity() > self.severity() {
            other
        } else {
            self
        }
    }
}

/// Immutable report of one inventory operation.
#[derive(Debug, Clone, PartialEq)]
pub struct InventoryTransactionResult {
    result_type: TransactionType,
    rejected_items: Vec<ItemStackSnapshot>,
    slot_transactions: Vec<SlotTransaction>,
}

impl ValueObject for InventoryTransactionResult {}

impl InventoryTransactionResult {
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// Succeeded without any observable effect.
    pub fn success_no_transactions() -> Self {
        Self::bare(TransactionType::Success)
    }

    /// Failed without any observable effect.
    ///
    /// Note: this reports [`TransactionType::Error`], not `Failure`.
    pub fn fail_no_transactions() -> Self {
        Self::bare(TransactionType::Error)
    }

    fn bare(result_type: TransactionType) -> Self {
        Self {
            result_type,
            rejected_items: Vec::new(),
            slot_transactions: Vec::new(),
        }
    }

    pub fn result_type(&self) -> TransactionType {
        self.result_type
    }

    pub fn is_success(&self) -> bool {
        self.result_type == TransactionType::Success
    }

    pub fn rejected_items(&self) -> &[ItemStackSnapshot] {
        &self.rejected_items
    }

    pub fn slot_transactions(&self) -> &[SlotTransaction] {
        &self.slot_transactions
    }

    /// Combine two results into a new one. Neither operand is modified.
    ///
    /// The type is the more severe of the two; rejected items and slot
    /// transactions are `self`'s followed by `other`'s, without deduplication.
    pub fn and(&self, other: &InventoryTransactionResult) -> InventoryTransactionResult {
        let result_type = self.result_type.and(other.result_type);
        debug!(
            lhs = ?self.result_type,
            rhs = ?other.result_type,
            merged = ?result_type,
            "merging inventory transaction results"
        );

        let mut rejected_items =
            Vec::with_capacity(self.rejected_items.len() + other.rejected_items.len());
        rejected_items.extend_from_slice(&self.rejected_items);
        rejected_items.extend_from_slice(&other.rejected_items);

        let mut slot_transactions =
            Vec::with_capacity(self.slot_transactions.len() + other.slot_transactions.len());
        slot_transactions.extend_from_slice(&self.slot_transactions);
        slot_transactions.extend_from_slice(&other.slot_transactions);

        InventoryTransactionResult {
            result_type,
            rejected_items,
            slot_transactions,
        }
    }

    /// Fold results with [`and`](Self::and), starting from
    /// [`success_no_transactions`](Self::success_no_transactions).
    pub fn merge_all<I>(results: I) -> InventoryTransactionResult
    where
        I: IntoIterator<Item = InventoryTransactionResult>,
    {
        results
            .into_iter()
            .fold(Self::success_no_transactions(), |acc, next| acc.and(&next))
    }

    /// Restore every recorded slot to its original item, last change first.
    ///
    /// Later transactions may depend on the state left by earlier ones (a split
    /// followed by a merge into the same slot), so undo runs back-to-front.
    ///
    /// Not atomic: the first failing write is returned and slots already
    /// restored stay restored.
    pub fn revert(&self) -> ApiResult<()> {
        debug!(
            transactions = self.slot_transactions.len(),
            "reverting inventory transaction result"
        );
        for tx in self.slot_transactions.iter().rev() {
            let slot = tx.slot();
            debug!(slot = slot.index(), original = %tx.original().item_type(), "restoring slot");
            if let Err(err) = slot.set(tx.original().create_stack()) {
                warn!(slot = slot.index(), error = %err, "revert stopped on slot write failure");
                return Err(err);
            }
        }
        Ok(())
    }

    /// [`revert`](Self::revert) only when the type is `Failure`.
    ///
    /// `Error` results are left alone: their inventory state is undefined, so
    /// an automatic undo is not meaningful.
    pub fn revert_on_failure(&self) -> ApiResult<()> {
        if self.result_type == TransactionType::Failure {
            self.revert()
        } else {
            Ok(())
        }
    }
}

/// Mutable staging area for an [`InventoryTransactionResult`].
///
/// Reusable: [`build`](Builder::build) copies the staged state, and
/// [`reset`](Builder::reset) clears it.
#[derive(Debug, Clone, Default)]
pub struct Builder {
    result_type: Option<TransactionType>,
    rejected: Vec<ItemStackSnapshot>,
    slot_transactions: Vec<SlotTransaction>,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the outcome, replacing any previous one.
    pub fn result_type(&mut self, result_type: TransactionType) -> &mut Self {
        self.result_type = Some(result_type);
        self
    }

    /// Like [`result_type`](Self::result_type), for callers holding an
    /// optional type. `None` is an invalid argument.
    pub fn try_result_type(
        &mut self,
        result_type: Option<TransactionType>,
    ) -> ApiResult<&mut Self> {
        let result_type =
            result_type.ok_or_else(|| ApiError::invalid_argument("result type must be present"))?;
        Ok(self.result_type(result_type))
    }

    /// Append rejected items. Stacks are snapshotted; empty items are dropped.
    pub fn reject<I, S>(&mut self, items: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<ItemStackSnapshot>,
    {
        self.rejected.extend(
            items
                .into_iter()
                .map(Into::<ItemStackSnapshot>::into)
                .filter(|snapshot| !snapshot.is_empty()),
        );
        self
    }

    pub fn transaction(&mut self, transaction: SlotTransaction) -> &mut Self {
        self.slot_transactions.push(transaction);
        self
    }

    /// Append slot transactions in iteration order.
    pub fn transactions<I>(&mut self, transactions: I) -> &mut Self
    where
        I: IntoIterator<Item = SlotTransaction>,
    {
        self.slot_transactions.extend(transactions);
        self
    }

    /// Re-seed the builder from an existing result.
    pub fn from_result(&mut self, result: &InventoryTransactionResult) -> &mut Self {
        self.result_type = Some(result.result_type);
        self.rejected = result.rejected_items.clone();
        self.slot_transactions = result.slot_transactions.clone();
        self
    }

    /// Like [`from_result`](Self::from_result). `None` is an invalid argument.
    pub fn try_from_result(
        &mut self,
        result: Option<&InventoryTransactionResult>,
    ) -> ApiResult<&mut Self> {
        let result = result.ok_or_else(|| ApiError::invalid_argument("result must be present"))?;
        Ok(self.from_result(result))
    }

    pub fn reset(&mut self) -> &mut Self {
        self.result_type = None;
        self.rejected.clear();
        self.slot_transactions.clear();
        self
    }

    /// Produce an immutable result from the staged state.
    pub fn build(&self) -> ApiResult<InventoryTransactionResult> {
        let result_type = self
            .result_type
            .ok_or_else(|| ApiError::invalid_state("result type must be set before build"))?;
        Ok(self.build_with(result_type))
    }

    /// Set the outcome and build in one step. Cannot fail.
    pub fn build_with(&self, result_type: TransactionType) -> InventoryTransactionResult {
        debug!(
            result_type = ?result_type,
            rejected = self.rejected.len(),
            transactions = self.slot_transactions.len(),
            "building inventory transaction result"
        );
        InventoryTransactionResult {
            result_type,
            rejected_items: self.rejected.clone(),
            slot_transactions: self.slot_transactions.clone(),
        }
    }
}
