// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Sending transactions and waiting for their receipts.

use alloy::{
    network::TransactionBuilder,
    primitives::{Address, Bytes, TxHash},
    providers::Provider,
    rpc::types::{TransactionReceipt, TransactionRequest},
};

use crate::utils::color::DebugColor;

#[derive(Debug, thiserror::Error)]
pub enum TransactionError {
    #[error("rpc error: {0}")]
    Rpc(#[from] alloy::transports::RpcError<alloy::transports::TransportErrorKind>),
    #[error("tx failed to complete: {0}")]
    FailedToComplete(#[from] alloy::providers::PendingTransactionError),
    #[error("tx reverted {}", .tx_hash.debug_red())]
    Reverted { tx_hash: TxHash },
}

/// A transaction from one of the local accounts.
#[derive(Debug)]
pub struct TxRequest {
    tx: TransactionRequest,
    max_fee_per_gas_wei: Option<u128>,
}

impl TxRequest {
    /// Contract creation transaction
    pub fn create(sender: Address, code: Bytes, max_fee_per_gas_wei: Option<u128>) -> Self {
        Self {
            tx: TransactionRequest::default()
                .with_from(sender)
                .with_deploy_code(code),
            max_fee_per_gas_wei,
        }
    }

    /// Message call to an existing contract
    pub fn call(
        sender: Address,
        to: Address,
        input: Bytes,
        max_fee_per_gas_wei: Option<u128>,
    ) -> Self {
        Self {
            tx: TransactionRequest::default()
                .with_from(sender)
                .with_to(to)
                .with_input(input),
            max_fee_per_gas_wei,
        }
    }

    pub fn sender(&self) -> Option<Address> {
        self.tx.from
    }

    pub async fn estimate_gas(&self, provider: &impl Provider) -> Result<u64, TransactionError> {
        Ok(provider.estimate_gas(self.tx.clone()).await?)
    }

    /// Sends the transaction and waits for a successful receipt.
    pub async fn exec(
        self,
        provider: &impl Provider,
    ) -> Result<TransactionReceipt, TransactionError> {
        let gas = self.estimate_gas(provider).await?;
        let max_fee_per_gas = self.fee_per_gas(provider).await?;

        let mut tx = self.tx;
        tx.gas = Some(gas);
        tx.max_fee_per_gas = Some(max_fee_per_gas);
        tx.max_priority_fee_per_gas = Some(0);

        let tx = provider.send_transaction(tx).await?;
        let tx_hash = *tx.tx_hash();
        debug!(@grey, "sent tx: {}", tx_hash.debug_lavender());

        let receipt = tx.get_receipt().await?;
        if !receipt.status() {
            return Err(TransactionError::Reverted { tx_hash });
        }
        Ok(receipt)
    }

    pub async fn fee_per_gas(&self, provider: &impl Provider) -> Result<u128, TransactionError> {
        match self.max_fee_per_gas_wei {
            Some(wei) => Ok(wei),
            None => Ok(provider.get_gas_price().await?),
        }
    }
}

#[cfg(test)]
mod tests {
    use alloy::primitives::{address, bytes};

    use super::*;

    #[test]
    fn create_has_no_recipient() {
        let sender = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
        let req = TxRequest::create(sender, bytes!("6080"), None);
        assert_eq!(req.sender(), Some(sender));
        assert!(req.tx.to.as_ref().is_some_and(|to| to.is_create()));
        assert_eq!(req.tx.input.input(), Some(&bytes!("6080")));
    }

    #[test]
    fn reverted_error_names_tx_hash() {
        let tx_hash = TxHash::repeat_byte(0xab);
        let err = TransactionError::Reverted { tx_hash };
        assert!(err.to_string().contains(&format!("{tx_hash:?}")));
    }

    #[test]
    fn call_targets_contract() {
        let sender = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
        let target = address!("5FbDB2315678afecb367f032d93F642f64180aa3");
        let req = TxRequest::call(sender, target, bytes!("a9059cbb"), Some(7));
        assert_eq!(req.tx.to.and_then(|to| to.to().copied()), Some(target));
        assert_eq!(req.max_fee_per_gas_wei, Some(7));
    }
}
