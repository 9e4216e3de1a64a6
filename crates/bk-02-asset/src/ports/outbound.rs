//! Outbound Ports (Driven Ports / SPI)
//!
//! Coin movement is owned by the supply ledger. The asset module only moves
//! fees and freshly minted coins through this interface, always inside the
//! caller's isolated context so a failure anywhere rolls everything back.

use shared_types::{Address, Coins, Context, SdkError};

/// Supply ledger primitives consumed by the asset module.
pub trait SupplyKeeper: Send + Sync {
    /// Address of the module account called `module`.
    fn get_module_address(&self, module: &str) -> Address;

    /// Moves `amount` from a user account into a module account.
    fn send_coins_from_account_to_module(
        &self,
        ctx: &mut Context<'_>,
        sender: &Address,
        recipient_module: &str,
        amount: &Coins,
    ) -> Result<(), SdkError>;

    /// Moves `amount` from a module account to a user account.
    fn send_coins_from_module_to_account(
        &self,
        ctx: &mut Context<'_>,
        sender_module: &str,
        recipient: &Address,
        amount: &Coins,
    ) -> Result<(), SdkError>;

    /// Creates `amount` new coins in a module account and adds them to the
    /// total supply.
    fn mint_coins(
        &self,
        ctx: &mut Context<'_>,
        module: &str,
        amount: &Coins,
    ) -> Result<(), SdkError>;
}
