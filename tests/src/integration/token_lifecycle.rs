//! # Issue / Mint Flows
//!
//! The token state machine end to end: fees, supply movement, rejection
//! codes and all-or-nothing application.
//!
//! Upgrade layout: `TokenIssue` at height 1, everything else disabled, so
//! fees are the `TokenIssue` migration values (issue 1e10, mint 5e9).

#[cfg(test)]
mod tests {
    use bk_02_asset::{
        CODE_INVALID_MINT_AMOUNT, CODE_INVALID_TOKEN_SYMBOL, CODE_NOT_MINTABLE_TOKEN,
        CODE_UNAUTHORIZED_MINT, MAX_TOTAL_SUPPLY,
    };
    use node_runtime::UpgradeHeights;
    use shared_types::{CODE_INSUFFICIENT_COINS, NATIVE_DENOM};

    use crate::fixtures::*;

    const ISSUE_FEE: u128 = 10_000_000_000;
    const MINT_FEE: u128 = 5_000_000_000;
    const START: u128 = 1_000_000_000_000;

    fn heights() -> UpgradeHeights {
        UpgradeHeights {
            token_issue: 1,
            ..UpgradeHeights::default()
        }
    }

    fn chain() -> TestChain {
        TestChain::new(heights(), &[(addr("alice"), START), (addr("bob"), START)])
    }

    // =============================================================================
    // SCENARIO
    // =============================================================================

    #[test]
    fn test_issue_and_mint_scenario() {
        let alice = addr("alice");
        let bob = addr("bob");
        let mut chain = chain();

        let r = chain.deliver(issue(alice, "bitcoin", "btc", 21_000_000_000_000, false, 6, "digital gold"));
        assert!(r.is_ok(), "{}", r.log);
        let r = chain.deliver(mint(alice, "btc", 1));
        assert_eq!(r.code, CODE_NOT_MINTABLE_TOKEN);

        let r = chain.deliver(issue(alice, "ethereum", "eth", 100_000_000_000_000, true, 6, "world computer"));
        assert!(r.is_ok(), "{}", r.log);
        assert_eq!(chain.supply_of("eth"), 100_000_000_000_000);

        let r = chain.deliver(mint(bob, "eth", 1_000));
        assert_eq!(r.code, CODE_UNAUTHORIZED_MINT);

        let r = chain.deliver(mint(alice, "eth", MAX_TOTAL_SUPPLY));
        assert_eq!(r.code, CODE_INVALID_MINT_AMOUNT);

        let r = chain.deliver(mint(alice, "eth", 1_000));
        assert!(r.is_ok(), "{}", r.log);
        assert_eq!(r.events[0].attribute("mint_token"), Some("1000eth"));

        assert_eq!(chain.token("eth").unwrap().total_supply, 100_000_000_001_000);
        assert_eq!(chain.balance_of(&alice, "eth"), 100_000_000_001_000);
        assert_eq!(chain.balance_of(&alice, "btc"), 21_000_000_000_000);
        assert_eq!(chain.supply_of("eth"), 100_000_000_001_000);
        assert_eq!(chain.supply_of("btc"), 21_000_000_000_000);

        // Only the two issues and the one successful mint were charged.
        let fees = 2 * ISSUE_FEE + MINT_FEE;
        assert_eq!(chain.balance_of(&alice, NATIVE_DENOM), START - fees);
        assert_eq!(chain.balance_of(&bob, NATIVE_DENOM), START);
        assert_eq!(chain.balance_of(&fee_collector(), NATIVE_DENOM), fees);
    }

    #[test]
    fn test_issue_event_carries_minted_coin() {
        let mut chain = chain();
        let r = chain.deliver(issue(addr("alice"), "Atom", "atom", 500, false, 2, ""));
        assert_eq!(r.events.len(), 1);
        assert_eq!(r.events[0].kind, "message");
        assert_eq!(r.events[0].attribute("issue_token"), Some("500atom"));
    }

    // =============================================================================
    // SYMBOLS
    // =============================================================================

    #[test]
    fn test_uppercase_symbol_is_stored_lowercase() {
        let alice = addr("alice");
        let mut chain = chain();

        assert!(chain.deliver(issue(alice, "Bitcoin", "BTC", 1_000, true, 8, "")).is_ok());
        assert!(chain.token("btc").is_some());
        assert!(chain.token("BTC").is_none());

        let r = chain.deliver(issue(alice, "Bitcoin", "btc", 1_000, true, 8, ""));
        assert_eq!(r.code, CODE_INVALID_TOKEN_SYMBOL);
        assert!(r.log.contains("btc"));
    }

    #[test]
    fn test_reserved_and_malformed_symbols_rejected() {
        let alice = addr("alice");
        let mut chain = chain();
        for symbol in ["bt1", "btc_", "ubarkis", "UBARKIS", "barkis"] {
            let r = chain.deliver(issue(alice, "coin", symbol, 1_000, true, 2, ""));
            assert_eq!(r.code, CODE_INVALID_TOKEN_SYMBOL, "symbol {symbol}");
        }
        assert_eq!(chain.balance_of(&alice, NATIVE_DENOM), START);
    }

    // =============================================================================
    // ATOMICITY
    // =============================================================================

    #[test]
    fn test_issue_without_fee_leaves_no_trace() {
        let carol = addr("carol");
        let mut chain = TestChain::new(heights(), &[(carol, ISSUE_FEE - 1)]);
        chain.advance_to(1);
        let before = chain.app.last_app_hash();

        let (results, commit) = chain.block(&[issue(carol, "Doge", "doge", 1_000, true, 2, "")]);
        assert_eq!(results[0].code, CODE_INSUFFICIENT_COINS);
        assert!(results[0].events.is_empty());

        assert!(chain.token("doge").is_none());
        assert_eq!(chain.balance_of(&carol, "doge"), 0);
        assert_eq!(chain.balance_of(&carol, NATIVE_DENOM), ISSUE_FEE - 1);
        assert_eq!(chain.supply_of("doge"), 0);
        assert_eq!(commit.app_hash, before);
    }

    #[test]
    fn test_mint_without_fee_keeps_supply() {
        let alice = addr("alice");
        let mut chain = TestChain::new(heights(), &[(alice, ISSUE_FEE + MINT_FEE - 1)]);

        assert!(chain.deliver(issue(alice, "Gold", "gold", 10, true, 0, "")).is_ok());
        let r = chain.deliver(mint(alice, "gold", 5));
        assert_eq!(r.code, CODE_INSUFFICIENT_COINS);
        assert_eq!(chain.token("gold").unwrap().total_supply, 10);
        assert_eq!(chain.balance_of(&alice, "gold"), 10);
        assert_eq!(chain.supply_of("gold"), 10);
        assert_eq!(chain.balance_of(&alice, NATIVE_DENOM), MINT_FEE - 1);
    }

    #[test]
    fn test_failed_tx_between_successes_in_one_block() {
        let alice = addr("alice");
        let bob = addr("bob");
        let mut chain = chain();
        chain.advance_to(1);

        let (results, _) = chain.block(&[
            issue(alice, "Silver", "silver", 100, true, 2, ""),
            mint(bob, "silver", 1),
            mint(alice, "silver", 50),
        ]);
        assert!(results[0].is_ok());
        assert_eq!(results[1].code, CODE_UNAUTHORIZED_MINT);
        assert!(results[2].is_ok());
        assert_eq!(chain.token("silver").unwrap().total_supply, 150);
        assert_eq!(chain.balance_of(&bob, NATIVE_DENOM), START);
    }

    #[test]
    fn test_supply_cap_is_exact() {
        let alice = addr("alice");
        let mut chain = chain();
        let start = MAX_TOTAL_SUPPLY - 10;

        assert!(chain.deliver(issue(alice, "Cap", "cap", start, true, 0, "")).is_ok());
        assert_eq!(chain.deliver(mint(alice, "cap", 11)).code, CODE_INVALID_MINT_AMOUNT);
        assert_eq!(chain.token("cap").unwrap().total_supply, start);
        assert_eq!(chain.supply_of("cap"), start as u128);
        assert!(chain.deliver(mint(alice, "cap", 10)).is_ok());
        assert_eq!(chain.token("cap").unwrap().total_supply, MAX_TOTAL_SUPPLY);
        assert_eq!(chain.supply_of("cap"), MAX_TOTAL_SUPPLY as u128);
    }
}
