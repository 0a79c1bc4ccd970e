//! ERC20 token calls: balances, allowances, approvals and payouts.

use fairroll_crypto::{decode_uint_word, encode_call};
use fairroll_types::{Address, TokenAmount, TxHash};
use tracing::{info, warn};

use crate::{wait_for_confirmations, ConfirmPolicy, GasConfig, LedgerClient, LedgerError, TxReceipt, TxRequest};

const BALANCE_OF: &str = "balanceOf(address)";
const ALLOWANCE: &str = "allowance(address,address)";
const APPROVE: &str = "approve(address,uint256)";
const TRANSFER: &str = "transfer(address,uint256)";

/// A token contract reached through a ledger.
pub struct Erc20<'a, L> {
    ledger: &'a L,
    token: Address,
}

impl<'a, L: LedgerClient> Erc20<'a, L> {
    pub fn new(ledger: &'a L, token: Address) -> Self {
        Self { ledger, token }
    }

    pub fn address(&self) -> Address {
        self.token
    }

    async fn read_uint(&self, data: Vec<u8>) -> Result<TokenAmount, LedgerError> {
        let out = self.ledger.call(&self.token, &data).await?;
        Ok(TokenAmount::from_base_units(decode_uint_word(&out)?))
    }

    pub async fn balance_of(&self, owner: &Address) -> Result<TokenAmount, LedgerError> {
        self.read_uint(encode_call(BALANCE_OF, &[owner.to_word()])).await
    }

    /// How much `spender` may still move out of `owner`'s balance.
    pub async fn allowance(
        &self,
        owner: &Address,
        spender: &Address,
    ) -> Result<TokenAmount, LedgerError> {
        self.read_uint(encode_call(ALLOWANCE, &[owner.to_word(), spender.to_word()]))
            .await
    }

    /// Submit `approve(spender, amount)` from `from`.
    pub async fn approve(
        &self,
        from: &Address,
        spender: &Address,
        amount: &TokenAmount,
        gas: &GasConfig,
    ) -> Result<TxHash, LedgerError> {
        let data = encode_call(APPROVE, &[spender.to_word(), amount.base_units().to_be_bytes32()?]);
        let tx = self.send(from, data, gas).await?;
        info!(%tx, %spender, %amount, "approve submitted");
        Ok(tx)
    }

    /// Submit `transfer(to, amount)` from `from`, e.g. a payout.
    pub async fn transfer(
        &self,
        from: &Address,
        to: &Address,
        amount: &TokenAmount,
        gas: &GasConfig,
    ) -> Result<TxHash, LedgerError> {
        let data = encode_call(TRANSFER, &[to.to_word(), amount.base_units().to_be_bytes32()?]);
        let tx = self.send(from, data, gas).await?;
        info!(%tx, %to, %amount, "transfer submitted");
        Ok(tx)
    }

    /// Make sure `spender` may move at least `amount` of `from`'s tokens.
    ///
    /// A non-zero allowance below `amount` is first reset to zero, since some
    /// tokens refuse to change one non-zero allowance into another. Each
    /// approval is waited on before the next step. Returns the receipts of
    /// the approvals issued, which is empty if the allowance already suffices.
    pub async fn approve_safe(
        &self,
        from: &Address,
        spender: &Address,
        amount: &TokenAmount,
        gas: &GasConfig,
        policy: &ConfirmPolicy,
    ) -> Result<Vec<TxReceipt>, LedgerError> {
        let current = self.allowance(from, spender).await?;
        let mut receipts = Vec::new();
        if current >= *amount {
            return Ok(receipts);
        }

        if !current.is_zero() {
            warn!(%spender, %current, %amount, "resetting allowance before raising it");
            let tx = self.approve(from, spender, &TokenAmount::zero(), gas).await?;
            receipts.push(wait_for_confirmations(self.ledger, &tx, policy).await?);
        }

        let tx = self.approve(from, spender, amount, gas).await?;
        receipts.push(wait_for_confirmations(self.ledger, &tx, policy).await?);
        Ok(receipts)
    }

    async fn send(&self, from: &Address, data: Vec<u8>, gas: &GasConfig) -> Result<TxHash, LedgerError> {
        if from.is_zero() {
            return Err(LedgerError::MissingAddress("sender"));
        }
        let request = TxRequest::call(*from, self.token, data).with_gas(gas);
        self.ledger.send_transaction(&request).await
    }
}
