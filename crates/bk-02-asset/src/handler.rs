//! # Asset Message Handler
//!
//! The state-transition function for [`AssetMsg`]. Each operation runs inside
//! [`run_atomic`]: every store write and event of the operation is merged
//! only if all of its steps succeed, so a failed fee transfer can never leave
//! a half-issued token and a failed mint never leaves a bumped supply field.

use std::sync::Arc;

use bk_01_upgrade_registry::HeightGate;
use shared_types::{run_atomic, Coin, Coins, Context, SdkError, FEE_COLLECTOR_NAME};
use tracing::{info, instrument, warn};

use crate::domain::errors::AssetError;
use crate::domain::keys::{MAX_TOTAL_SUPPLY, MODULE_NAME};
use crate::domain::msgs::{AssetMsg, IssueMsg, MintMsg};
use crate::domain::token::Token;
use crate::domain::validation::{
    validate_description, validate_name, validate_symbol, validate_total_supply,
};
use crate::events::{issue_token_event, mint_token_event};
use crate::keeper::AssetKeeper;

#[derive(Clone)]
pub struct AssetHandler {
    keeper: AssetKeeper,
    gate: Arc<dyn HeightGate>,
}

/// Coin of `amount` units of `symbol`. The amount is validated non-negative
/// before this is reached.
fn minted_coin(symbol: &str, amount: i64) -> Coin {
    Coin::new(symbol, u128::from(amount.unsigned_abs()))
}

fn minted_coins(coin: &Coin) -> Result<Coins, AssetError> {
    Coins::new(vec![coin.clone()])
        .map_err(|e| AssetError::Supply(SdkError::InvalidCoins(e.to_string())))
}

impl AssetHandler {
    pub fn new(keeper: AssetKeeper, gate: Arc<dyn HeightGate>) -> Self {
        Self { keeper, gate }
    }

    pub fn keeper(&self) -> &AssetKeeper {
        &self.keeper
    }

    /// Applies `msg`. On `Err`, `ctx` is unchanged.
    pub fn handle(&self, ctx: &mut Context<'_>, msg: &AssetMsg) -> Result<(), AssetError> {
        let result = match msg {
            AssetMsg::Issue(issue) => self.handle_issue(ctx, issue),
            AssetMsg::Mint(mint) => self.handle_mint(ctx, mint),
        };
        if let Err(err) = &result {
            warn!(msg_type = %msg.msg_type(), error = %err, "Asset message rejected");
        }
        result
    }

    #[instrument(skip(self, ctx, msg), fields(symbol = %msg.symbol, height = ctx.block_height()))]
    pub fn handle_issue(&self, ctx: &mut Context<'_>, msg: &IssueMsg) -> Result<(), AssetError> {
        run_atomic(ctx, |ctx| self.issue(ctx, msg))
    }

    #[instrument(skip(self, ctx, msg), fields(symbol = %msg.symbol, height = ctx.block_height()))]
    pub fn handle_mint(&self, ctx: &mut Context<'_>, msg: &MintMsg) -> Result<(), AssetError> {
        run_atomic(ctx, |ctx| self.mint(ctx, msg))
    }

    fn issue(&self, ctx: &mut Context<'_>, msg: &IssueMsg) -> Result<(), AssetError> {
        let gate = self.gate.as_ref();

        let max_decimal = self.keeper.get_max_decimal(ctx);
        if msg.decimal > max_decimal {
            return Err(AssetError::InvalidDecimal(format!(
                "token decimal should not be greater than {max_decimal}"
            )));
        }

        let symbol = msg.stored_symbol();
        if self.keeper.is_token_exist(ctx, &symbol) {
            return Err(AssetError::DuplicateSymbol(symbol));
        }

        validate_name(&msg.name)?;
        validate_symbol(&symbol, gate)?;
        validate_description(&msg.description, gate)?;
        validate_total_supply(msg.total_supply)?;

        let token = Token::new(
            symbol,
            msg.name.clone(),
            msg.decimal,
            msg.total_supply,
            msg.mintable,
            msg.description.clone(),
            msg.from,
        );
        self.keeper.set_token(ctx, &token);

        let supply = self.keeper.supply();
        let issue_fee = self.keeper.get_issue_fee(ctx);
        supply.send_coins_from_account_to_module(ctx, &msg.from, FEE_COLLECTOR_NAME, &issue_fee)?;

        let minted = minted_coin(&token.symbol, token.total_supply);
        let minted_set = minted_coins(&minted)?;
        supply.mint_coins(ctx, MODULE_NAME, &minted_set)?;
        supply.send_coins_from_module_to_account(ctx, MODULE_NAME, &token.owner, &minted_set)?;

        ctx.emit_event(issue_token_event(&minted));
        info!(symbol = %token.symbol, owner = %token.owner, supply = token.total_supply, "Token issued");
        Ok(())
    }

    fn mint(&self, ctx: &mut Context<'_>, msg: &MintMsg) -> Result<(), AssetError> {
        let mut token = self
            .keeper
            .get_token(ctx, &msg.symbol)
            .ok_or_else(|| AssetError::UnknownToken(msg.symbol.clone()))?;

        if !token.mintable {
            return Err(AssetError::NotMintable(token.symbol));
        }
        if token.owner != msg.from {
            return Err(AssetError::UnauthorizedMint {
                owner: token.owner,
                symbol: token.symbol,
            });
        }
        let possible = MAX_TOTAL_SUPPLY - token.total_supply;
        if msg.amount <= 0 || msg.amount > possible {
            return Err(AssetError::InvalidMintAmount(format!(
                "minted too many token, maximum possible minted amount {possible}, actual minted amount {}",
                msg.amount
            )));
        }

        let supply = self.keeper.supply();
        let mint_fee = self.keeper.get_mint_fee(ctx);
        supply.send_coins_from_account_to_module(ctx, &msg.from, FEE_COLLECTOR_NAME, &mint_fee)?;

        token.total_supply += msg.amount;
        self.keeper.update_token(ctx, &token);

        let minted = minted_coin(&token.symbol, msg.amount);
        let minted_set = minted_coins(&minted)?;
        supply.mint_coins(ctx, MODULE_NAME, &minted_set)?;
        supply.send_coins_from_module_to_account(ctx, MODULE_NAME, &token.owner, &minted_set)?;

        ctx.emit_event(mint_token_event(&minted));
        info!(symbol = %token.symbol, amount = msg.amount, supply = token.total_supply, "Token minted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{ModulePermission, StoreSupplyKeeper};
    use crate::domain::params::Params;
    use bk_01_upgrade_registry::UpgradeRegistry;
    use shared_types::{Address, CodedError, MemStore, UpgradeName, NATIVE_DENOM};

    const ISSUE_FEE: u128 = 1_000_000_000;
    const MINT_FEE: u128 = 100_000_000;

    struct Fixture {
        store: MemStore,
        handler: AssetHandler,
        supply: Arc<StoreSupplyKeeper>,
    }

    impl Fixture {
        fn new() -> Self {
            Self::with_gate(UpgradeRegistry::new())
        }

        fn with_gate(registry: UpgradeRegistry) -> Self {
            registry.set_block_height(registry.block_height().max(1));
            let supply = Arc::new(
                StoreSupplyKeeper::new()
                    .with_module(FEE_COLLECTOR_NAME, &[])
                    .with_module(MODULE_NAME, &[ModulePermission::Minter]),
            );
            let keeper = AssetKeeper::new(supply.clone());
            let handler = AssetHandler::new(keeper, Arc::new(registry));
            let mut fixture = Self {
                store: MemStore::new(),
                handler,
                supply,
            };
            let keeper = fixture.handler.keeper().clone();
            {
                let mut ctx = fixture.ctx();
                keeper.set_params(&mut ctx, &Params::default());
            }
            fixture
        }

        fn ctx(&mut self) -> Context<'_> {
            Context::new(&mut self.store, 1)
        }

        fn fund(&mut self, addr: &Address, amount: u128) {
            let supply = self.supply.clone();
            let mut ctx = self.ctx();
            supply
                .add_coins(&mut ctx, addr, &Coins::single(NATIVE_DENOM, amount).unwrap())
                .unwrap();
        }

        fn balance(&mut self, addr: &Address, denom: &str) -> u128 {
            let supply = self.supply.clone();
            let ctx = self.ctx();
            supply.get_balance(&ctx, addr).amount_of(denom)
        }

        fn supply_of(&mut self, denom: &str) -> u128 {
            let supply = self.supply.clone();
            let ctx = self.ctx();
            supply.get_supply(&ctx).amount_of(denom)
        }

        fn issue(&mut self, msg: IssueMsg) -> (Result<(), AssetError>, usize) {
            let handler = self.handler.clone();
            let mut ctx = self.ctx();
            let result = handler.handle(&mut ctx, &msg.into());
            (result, ctx.events().len())
        }

        fn mint(&mut self, msg: MintMsg) -> Result<(), AssetError> {
            let handler = self.handler.clone();
            let mut ctx = self.ctx();
            handler.handle(&mut ctx, &msg.into())
        }

        fn token(&mut self, symbol: &str) -> Option<Token> {
            let keeper = self.handler.keeper().clone();
            let ctx = self.ctx();
            keeper.get_token(&ctx, symbol)
        }
    }

    fn alice() -> Address {
        Address::hash_of(b"alice")
    }

    fn bob() -> Address {
        Address::hash_of(b"bob")
    }

    fn issue_btc(from: Address) -> IssueMsg {
        IssueMsg::new(from, "bitcoin", "btc", 21_000_000_000_000, false, 6, "bitcoin")
    }

    fn issue_eth(from: Address) -> IssueMsg {
        IssueMsg::new(from, "ethereum", "eth", 100_000_000_000_000, true, 6, "ethereum")
    }

    #[test]
    fn test_issue_success_charges_fee_and_mints() {
        let mut f = Fixture::new();
        f.fund(&alice(), ISSUE_FEE);

        let (result, events) = f.issue(issue_btc(alice()));
        assert_eq!(result, Ok(()));
        assert_eq!(events, 1);

        assert_eq!(f.balance(&alice(), NATIVE_DENOM), 0);
        assert_eq!(f.balance(&alice(), "btc"), 21_000_000_000_000);
        assert_eq!(f.supply_of("btc"), 21_000_000_000_000);
        let collector = Address::for_module(FEE_COLLECTOR_NAME);
        assert_eq!(f.balance(&collector, NATIVE_DENOM), ISSUE_FEE);

        let token = f.token("btc").unwrap();
        assert_eq!(token.owner, alice());
        assert!(!token.mintable);
    }

    #[test]
    fn test_issue_uppercase_symbol_is_stored_lowercase() {
        let mut f = Fixture::new();
        f.fund(&alice(), ISSUE_FEE);
        let mut msg = issue_btc(alice());
        msg.symbol = "BTC".into();
        assert_eq!(f.issue(msg).0, Ok(()));
        assert!(f.token("btc").is_some());
        assert!(f.token("BTC").is_none());
    }

    #[test]
    fn test_issue_insufficient_fee_leaves_no_token() {
        let mut f = Fixture::new();
        f.fund(&alice(), ISSUE_FEE - 1);

        let (result, events) = f.issue(issue_btc(alice()));
        let err = result.unwrap_err();
        assert_eq!(err.code(), 10);
        assert_eq!(events, 0);
        assert!(f.token("btc").is_none());
        assert_eq!(f.balance(&alice(), NATIVE_DENOM), ISSUE_FEE - 1);
        assert_eq!(f.balance(&alice(), "btc"), 0);
        assert_eq!(f.supply_of("btc"), 0);
        assert_eq!(f.supply_of(NATIVE_DENOM), ISSUE_FEE - 1);
    }

    #[test]
    fn test_issue_duplicate_symbol_case_insensitive() {
        let mut f = Fixture::new();
        f.fund(&alice(), 2 * ISSUE_FEE);
        assert_eq!(f.issue(issue_btc(alice())).0, Ok(()));

        let mut again = issue_btc(alice());
        again.symbol = "Btc".into();
        let err = f.issue(again).0.unwrap_err();
        assert_eq!(err, AssetError::DuplicateSymbol("btc".into()));
        assert_eq!(err.code(), 102);
        assert_eq!(f.balance(&alice(), NATIVE_DENOM), ISSUE_FEE);
    }

    #[test]
    fn test_issue_decimal_checked_against_params() {
        let mut f = Fixture::new();
        f.fund(&alice(), ISSUE_FEE);
        let mut msg = issue_btc(alice());
        msg.decimal = 11;
        assert_eq!(f.issue(msg).0.unwrap_err().code(), 104);
    }

    #[test]
    fn test_issue_short_symbol_fails_denom_and_rolls_back() {
        let mut f = Fixture::new();
        f.fund(&alice(), ISSUE_FEE);
        let mut msg = issue_btc(alice());
        msg.symbol = "bt".into();
        let err = f.issue(msg).0.unwrap_err();
        assert_eq!(err.code(), 11);
        assert!(f.token("bt").is_none());
        assert_eq!(f.balance(&alice(), NATIVE_DENOM), ISSUE_FEE);
    }

    #[test]
    fn test_issue_short_symbol_rejected_after_length_upgrade() {
        let mut registry = UpgradeRegistry::new();
        registry.register_upgrade_height(UpgradeName::TokenDesLenLimit, 1);
        let mut f = Fixture::with_gate(registry);
        f.fund(&alice(), ISSUE_FEE);
        let mut msg = issue_btc(alice());
        msg.symbol = "bt".into();
        assert!(matches!(
            f.issue(msg).0,
            Err(AssetError::InvalidTokenSymbol(_))
        ));
    }

    #[test]
    fn test_mint_not_mintable() {
        let mut f = Fixture::new();
        f.fund(&alice(), ISSUE_FEE + MINT_FEE);
        f.issue(issue_btc(alice())).0.unwrap();

        let err = f.mint(MintMsg::new(alice(), "btc", 10)).unwrap_err();
        assert_eq!(err.code(), 107);
        assert_eq!(f.balance(&alice(), NATIVE_DENOM), MINT_FEE);
    }

    #[test]
    fn test_mint_unknown_symbol() {
        let mut f = Fixture::new();
        let err = f.mint(MintMsg::new(alice(), "doge", 10)).unwrap_err();
        assert_eq!(err, AssetError::UnknownToken("doge".into()));
        assert_eq!(err.code(), 102);
    }

    #[test]
    fn test_mint_by_non_owner_is_unauthorized() {
        let mut f = Fixture::new();
        f.fund(&alice(), ISSUE_FEE);
        f.fund(&bob(), MINT_FEE);
        f.issue(issue_eth(alice())).0.unwrap();

        let err = f.mint(MintMsg::new(bob(), "eth", 10)).unwrap_err();
        assert_eq!(err.code(), 108);
        assert_eq!(f.balance(&bob(), NATIVE_DENOM), MINT_FEE);
    }

    #[test]
    fn test_mint_beyond_max_supply_is_rejected() {
        let mut f = Fixture::new();
        f.fund(&alice(), ISSUE_FEE + MINT_FEE);
        f.issue(issue_eth(alice())).0.unwrap();

        let err = f
            .mint(MintMsg::new(alice(), "eth", MAX_TOTAL_SUPPLY))
            .unwrap_err();
        assert_eq!(err.code(), 105);
        assert_eq!(f.token("eth").unwrap().total_supply, 100_000_000_000_000);
        assert_eq!(f.supply_of("eth"), 100_000_000_000_000);
    }

    #[test]
    fn test_mint_success_updates_supply() {
        let mut f = Fixture::new();
        f.fund(&alice(), ISSUE_FEE + MINT_FEE);
        f.issue(issue_eth(alice())).0.unwrap();

        assert_eq!(f.supply_of("eth"), 100_000_000_000_000);
        f.mint(MintMsg::new(alice(), "eth", 5_000)).unwrap();
        assert_eq!(f.supply_of("eth"), 100_000_000_005_000);
        assert_eq!(f.token("eth").unwrap().total_supply, 100_000_000_005_000);
        assert_eq!(f.balance(&alice(), "eth"), 100_000_000_005_000);
        assert_eq!(f.balance(&alice(), NATIVE_DENOM), 0);
    }

    #[test]
    fn test_mint_without_fee_keeps_supply_field() {
        let mut f = Fixture::new();
        f.fund(&alice(), ISSUE_FEE);
        f.issue(issue_eth(alice())).0.unwrap();

        let err = f.mint(MintMsg::new(alice(), "eth", 5_000)).unwrap_err();
        assert_eq!(err.code(), 10);
        assert_eq!(f.token("eth").unwrap().total_supply, 100_000_000_000_000);
        assert_eq!(f.balance(&alice(), "eth"), 100_000_000_000_000);
        assert_eq!(f.supply_of("eth"), 100_000_000_000_000);
    }
}
