//! Store-backed supply ledger.
//!
//! Balances and the chain-wide total supply live in the `Supply` store as
//! JSON-encoded [`Coins`]:
//!
//! - `[0x00]` → total supply
//! - `[0x01] || address` → account balance
//!
//! Module accounts are ordinary balances at [`Address::for_module`]. Only
//! modules registered with [`StoreSupplyKeeper::with_module`] may send,
//! receive or mint; anything else is a wiring mistake and panics.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use shared_types::{
    Address, Coins, Context, KvRead, KvStore, SdkError, StoreName, ADDRESS_LEN,
};
use tracing::debug;

use crate::ports::SupplyKeeper;

const SUPPLY_KEY: &[u8] = &[0x00];
const BALANCE_KEY_PREFIX: &[u8] = &[0x01];

/// Capabilities a module account may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModulePermission {
    Minter,
}

/// One account's holdings, as carried in genesis documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountBalance {
    pub address: Address,
    pub coins: Coins,
}

#[derive(Debug, Clone, Default)]
pub struct StoreSupplyKeeper {
    modules: BTreeMap<String, Vec<ModulePermission>>,
}

fn balance_key(addr: &Address) -> Vec<u8> {
    let mut key = Vec::with_capacity(BALANCE_KEY_PREFIX.len() + ADDRESS_LEN);
    key.extend_from_slice(BALANCE_KEY_PREFIX);
    key.extend_from_slice(addr.as_bytes());
    key
}

fn decode_coins(raw: &[u8]) -> Coins {
    match serde_json::from_slice(raw) {
        Ok(coins) => coins,
        Err(e) => panic!("malformed coins record in supply store: {e}"),
    }
}

fn encode_coins(coins: &Coins) -> Vec<u8> {
    match serde_json::to_vec(coins) {
        Ok(raw) => raw,
        Err(e) => panic!("coins not encodable: {e}"),
    }
}

fn invalid_coins(amount: &Coins) -> SdkError {
    SdkError::InvalidCoins(amount.to_string())
}

impl StoreSupplyKeeper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: declares a module account and its permissions.
    pub fn with_module(mut self, name: impl Into<String>, permissions: &[ModulePermission]) -> Self {
        self.modules.insert(name.into(), permissions.to_vec());
        self
    }

    fn module_permissions(&self, module: &str) -> &[ModulePermission] {
        match self.modules.get(module) {
            Some(perms) => perms,
            None => panic!("module account {module} does not exist"),
        }
    }

    pub fn get_balance(&self, ctx: &Context<'_>, addr: &Address) -> Coins {
        ctx.kv_store(StoreName::Supply)
            .get(&balance_key(addr))
            .map(|raw| decode_coins(&raw))
            .unwrap_or_default()
    }

    pub fn get_supply(&self, ctx: &Context<'_>) -> Coins {
        ctx.kv_store(StoreName::Supply)
            .get(SUPPLY_KEY)
            .map(|raw| decode_coins(&raw))
            .unwrap_or_default()
    }

    /// Every non-empty balance, in address byte order.
    pub fn balances(&self, ctx: &Context<'_>) -> Vec<AccountBalance> {
        let store = ctx.kv_store(StoreName::Supply);
        store
            .prefix_iter(BALANCE_KEY_PREFIX)
            .map(|(key, raw)| {
                let mut bytes = [0u8; ADDRESS_LEN];
                bytes.copy_from_slice(&key[BALANCE_KEY_PREFIX.len()..]);
                AccountBalance {
                    address: Address(bytes),
                    coins: decode_coins(&raw),
                }
            })
            .collect()
    }

    /// Credits `amount` to `addr` out of thin air, raising the total supply.
    /// Used to fund accounts at genesis.
    pub fn add_coins(
        &self,
        ctx: &mut Context<'_>,
        addr: &Address,
        amount: &Coins,
    ) -> Result<(), SdkError> {
        if !amount.is_valid() {
            return Err(invalid_coins(amount));
        }
        self.credit(ctx, addr, amount)?;
        self.inflate(ctx, amount)
    }

    fn set_balance(&self, ctx: &mut Context<'_>, addr: &Address, coins: &Coins) {
        let mut store = ctx.kv_store_mut(StoreName::Supply);
        if coins.is_empty() {
            store.delete(&balance_key(addr));
        } else {
            store.set(&balance_key(addr), encode_coins(coins));
        }
    }

    fn credit(&self, ctx: &mut Context<'_>, addr: &Address, amount: &Coins) -> Result<(), SdkError> {
        let balance = self
            .get_balance(ctx, addr)
            .checked_add(amount)
            .map_err(|e| SdkError::InvalidCoins(e.to_string()))?;
        self.set_balance(ctx, addr, &balance);
        Ok(())
    }

    fn debit(&self, ctx: &mut Context<'_>, addr: &Address, amount: &Coins) -> Result<(), SdkError> {
        let have = self.get_balance(ctx, addr);
        let remaining = have.checked_sub(amount).ok_or_else(|| {
            SdkError::InsufficientCoins(format!("insufficient account funds; {have} < {amount}"))
        })?;
        self.set_balance(ctx, addr, &remaining);
        Ok(())
    }

    fn inflate(&self, ctx: &mut Context<'_>, amount: &Coins) -> Result<(), SdkError> {
        let supply = self
            .get_supply(ctx)
            .checked_add(amount)
            .map_err(|e| SdkError::InvalidCoins(e.to_string()))?;
        ctx.kv_store_mut(StoreName::Supply)
            .set(SUPPLY_KEY, encode_coins(&supply));
        Ok(())
    }

    fn transfer(
        &self,
        ctx: &mut Context<'_>,
        from: &Address,
        to: &Address,
        amount: &Coins,
    ) -> Result<(), SdkError> {
        if !amount.is_valid() {
            return Err(invalid_coins(amount));
        }
        self.debit(ctx, from, amount)?;
        self.credit(ctx, to, amount)?;
        debug!(%from, %to, %amount, "Coins transferred");
        Ok(())
    }
}

impl SupplyKeeper for StoreSupplyKeeper {
    fn get_module_address(&self, module: &str) -> Address {
        Address::for_module(module)
    }

    fn send_coins_from_account_to_module(
        &self,
        ctx: &mut Context<'_>,
        sender: &Address,
        recipient_module: &str,
        amount: &Coins,
    ) -> Result<(), SdkError> {
        self.module_permissions(recipient_module);
        let recipient = self.get_module_address(recipient_module);
        self.transfer(ctx, sender, &recipient, amount)
    }

    fn send_coins_from_module_to_account(
        &self,
        ctx: &mut Context<'_>,
        sender_module: &str,
        recipient: &Address,
        amount: &Coins,
    ) -> Result<(), SdkError> {
        self.module_permissions(sender_module);
        let sender = self.get_module_address(sender_module);
        self.transfer(ctx, &sender, recipient, amount)
    }

    fn mint_coins(
        &self,
        ctx: &mut Context<'_>,
        module: &str,
        amount: &Coins,
    ) -> Result<(), SdkError> {
        if !self
            .module_permissions(module)
            .contains(&ModulePermission::Minter)
        {
            panic!("module account {module} does not have permissions to mint tokens");
        }
        if !amount.is_valid() {
            return Err(invalid_coins(amount));
        }
        let module_addr = self.get_module_address(module);
        self.credit(ctx, &module_addr, amount)?;
        self.inflate(ctx, amount)?;
        debug!(module, %amount, "Coins minted");
        Ok(())
    }
}
