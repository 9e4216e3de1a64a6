//! # Upgrade Gating
//!
//! Height-activated behaviour seen from outside the application: message
//! kinds and queries that do not exist yet, one-shot parameter migrations,
//! and the validation regime switch.
//!
//! Upgrade layout unless stated otherwise: `TokenIssue` at 3,
//! `UpdateTokenSymbolRules` at 5, `TokenDesLenLimit` at 7.

#[cfg(test)]
mod tests {
    use bk_02_asset::{
        Params, Token, CODE_INVALID_TOKEN_DESCRIPTION, CODE_INVALID_TOKEN_SYMBOL,
    };
    use node_runtime::UpgradeHeights;
    use proptest::prelude::*;
    use shared_types::{
        SdkError, CODE_INVALID_COINS, CODE_UNKNOWN_REQUEST, NATIVE_DENOM,
    };

    use crate::fixtures::*;

    const START: u128 = 1_000_000_000_000;

    fn heights() -> UpgradeHeights {
        UpgradeHeights {
            token_issue: 3,
            update_token_symbol_rules: 5,
            token_des_len_limit: 7,
        }
    }

    fn chain() -> TestChain {
        TestChain::new(heights(), &[(addr("alice"), START)])
    }

    #[test]
    fn test_messages_rejected_until_token_issue() {
        let alice = addr("alice");
        let mut chain = chain();

        for _ in 1..3 {
            let (results, _) = chain.block(&[
                issue(alice, "Bitcoin", "btc", 100, true, 2, ""),
                mint(alice, "btc", 1),
            ]);
            for r in &results {
                assert_eq!(r.code, CODE_UNKNOWN_REQUEST);
                assert_eq!(r.codespace, "sdk");
            }
        }
        assert_eq!(chain.height(), 2);
        assert!(chain.deliver(issue(alice, "Bitcoin", "btc", 100, true, 2, "")).is_ok());
    }

    #[test]
    fn test_queries_rejected_until_token_issue() {
        let mut chain = chain();
        chain.advance_to(2);
        let err = chain.query::<Params>("custom/asset/params", &[]).unwrap_err();
        assert!(matches!(err, SdkError::UnknownRequest(_)));

        chain.advance_to(3);
        let tokens: Vec<Token> = chain
            .query("custom/asset/list", br#"{"page":1,"limit":30}"#)
            .unwrap();
        assert!(tokens.is_empty());
    }

    #[test]
    fn test_hooks_migrate_params_once() {
        let alice = addr("alice");
        let mut chain = chain();

        chain.advance_to(3);
        assert_eq!(chain.params(), Params::native(10, 10_000_000_000, 5_000_000_000));
        chain.advance_to(4);
        assert_eq!(chain.params(), Params::native(10, 10_000_000_000, 5_000_000_000));

        chain.advance_to(5);
        assert_eq!(chain.params(), Params::native(10, 2_000_000_000, 1_000_000_000));

        assert!(chain.deliver(issue(alice, "Bitcoin", "btc", 100, true, 2, "")).is_ok());
        assert_eq!(
            chain.balance_of(&alice, NATIVE_DENOM),
            START - 2_000_000_000
        );
        chain.advance_to(10);
        assert_eq!(chain.params(), Params::native(10, 2_000_000_000, 1_000_000_000));
    }

    #[test]
    fn test_description_cap_switches() {
        let alice = addr("alice");
        let mut chain = chain();
        chain.advance_to(3);

        let legacy_max = "d".repeat(128);
        let r = chain.deliver(issue(alice, "One", "one", 1, false, 0, &legacy_max));
        assert!(r.is_ok(), "{}", r.log);
        let r = chain.deliver(issue(alice, "Two", "two", 1, false, 0, &"d".repeat(129)));
        assert_eq!(r.code, CODE_INVALID_TOKEN_DESCRIPTION);

        chain.advance_to(6);
        let r = chain.deliver(issue(alice, "Two", "two", 1, false, 0, &"d".repeat(1024)));
        assert!(r.is_ok(), "{}", r.log);
        let r = chain.deliver(issue(alice, "Six", "six", 1, false, 0, &"d".repeat(1025)));
        assert_eq!(r.code, CODE_INVALID_TOKEN_DESCRIPTION);
    }

    #[test]
    fn test_symbol_length_switches() {
        let alice = addr("alice");
        let mut chain = chain();
        chain.advance_to(3);

        // The symbol rules accept two letters, but the resulting coin denom
        // is still too short for the supply ledger.
        let r = chain.deliver(issue(alice, "Ab", "ab", 1, false, 0, ""));
        assert_eq!(r.code, CODE_INVALID_COINS);
        assert!(chain.token("ab").is_none());

        let r = chain.deliver(issue(alice, "Long", "abcdefghijklm", 1, false, 0, ""));
        assert_eq!(r.code, CODE_INVALID_TOKEN_SYMBOL);

        chain.advance_to(6);
        let r = chain.deliver(issue(alice, "Ab", "ab", 1, false, 0, ""));
        assert_eq!(r.code, CODE_INVALID_TOKEN_SYMBOL);
        assert!(chain.deliver(issue(alice, "Abc", "abc", 1, false, 0, "")).is_ok());
    }

    #[test]
    fn test_inactive_store_never_changes_app_hash() {
        let funded = [(addr("alice"), START)];
        let mut gated = TestChain::new(
            UpgradeHeights {
                token_issue: 5,
                ..UpgradeHeights::default()
            },
            &funded,
        );
        let mut plain = TestChain::new(UpgradeHeights::default(), &funded);

        assert_eq!(gated.app.last_app_hash(), plain.app.last_app_hash());
        for _ in 1..5 {
            let (_, a) = gated.block(&[]);
            let (_, b) = plain.block(&[]);
            assert_eq!(a.app_hash, b.app_hash);
        }

        // The activation block migrates params, which does change the hash.
        let (_, a) = gated.block(&[]);
        let (_, b) = plain.block(&[]);
        assert_ne!(a.app_hash, b.app_hash);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(24))]

        #[test]
        fn prop_issue_accepted_iff_token_issue_active(activation in 1u64..8, at in 1u64..10) {
            let alice = addr("alice");
            let mut chain = TestChain::new(
                UpgradeHeights { token_issue: activation, ..UpgradeHeights::default() },
                &[(alice, START)],
            );
            chain.advance_to(at - 1);
            let r = chain.deliver(issue(alice, "Bitcoin", "btc", 100, true, 2, ""));
            if at < activation {
                prop_assert_eq!(r.code, CODE_UNKNOWN_REQUEST);
            } else {
                prop_assert!(r.is_ok(), "{}", r.log);
            }
        }
    }
}
