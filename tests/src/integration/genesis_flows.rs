//! # Genesis Flows
//!
//! Export a running chain, restart from the exported document, and reject
//! documents that would start the chain in an invalid state.

#[cfg(test)]
mod tests {
    use bk_02_asset::{AccountBalance, GenesisError, GenesisState, Params, Token};
    use node_runtime::{App, AppError, AppGenesis, AppGenesisError, NodeConfig, UpgradeHeights};

    use crate::fixtures::*;

    const START: u128 = 1_000_000_000_000;

    fn heights() -> UpgradeHeights {
        UpgradeHeights {
            token_issue: 1,
            ..UpgradeHeights::default()
        }
    }

    fn token(symbol: &str, supply: i64) -> Token {
        Token::new(symbol, symbol, 2, supply, true, "", addr("alice"))
    }

    fn app() -> App {
        let mut config = NodeConfig::default();
        config.upgrade = heights();
        App::new(&config).unwrap()
    }

    #[test]
    fn test_export_then_restart_is_lossless() {
        let alice = addr("alice");
        let mut chain = TestChain::new(heights(), &[(alice, START)]);
        chain.block(&[
            issue(alice, "Bitcoin", "btc", 1_000, true, 2, "digital gold"),
            issue(alice, "Atom", "atom", 50, false, 0, ""),
        ]);
        chain.block(&[mint(alice, "btc", 500)]);

        let exported = chain.app.export_genesis().unwrap();
        let symbols: Vec<&str> = exported.asset.tokens.iter().map(|t| t.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["atom", "btc"]);

        let mut restarted = TestChain::with_genesis(heights(), &exported);
        assert_eq!(restarted.height(), 0);
        assert_eq!(restarted.app.export_genesis().unwrap(), exported);
        assert_eq!(restarted.token("btc").unwrap().total_supply, 1_500);
        assert_eq!(restarted.balance_of(&alice, "btc"), 1_500);
        assert_eq!(
            restarted.balance_of(&fee_collector(), "ubarkis"),
            chain.balance_of(&fee_collector(), "ubarkis")
        );

        // Issuance continues where the old chain left off.
        let r = restarted.deliver(mint(alice, "btc", 1));
        assert!(r.is_ok(), "{}", r.log);
        let r = restarted.deliver(issue(alice, "Bitcoin", "btc", 1, true, 2, ""));
        assert!(!r.is_ok());
    }

    #[test]
    fn test_zero_supply_token_survives_restart() {
        let alice = addr("alice");
        let mut chain = TestChain::new(heights(), &[(alice, START)]);
        let r = chain.deliver(issue(alice, "Zero", "zzz", 0, true, 0, ""));
        assert!(r.is_ok(), "{}", r.log);
        assert_eq!(chain.supply_of("zzz"), 0);

        let exported = chain.app.export_genesis().unwrap();
        let mut restarted = TestChain::with_genesis(heights(), &exported);
        assert_eq!(restarted.token("zzz").unwrap().total_supply, 0);

        let r = restarted.deliver(mint(alice, "zzz", 7));
        assert!(r.is_ok(), "{}", r.log);
        assert_eq!(restarted.supply_of("zzz"), 7);
    }

    #[test]
    fn test_post_upgrade_tokens_survive_restart() {
        let all_at_one = UpgradeHeights {
            token_issue: 1,
            update_token_symbol_rules: 1,
            token_des_len_limit: 1,
        };
        let alice = addr("alice");
        let mut chain = TestChain::new(all_at_one, &[(alice, START)]);
        let description = "d".repeat(500);
        let r = chain.deliver(issue(alice, "Long", "lng", 10, false, 0, &description));
        assert!(r.is_ok(), "{}", r.log);

        let exported = chain.app.export_genesis().unwrap();
        let mut restarted = TestChain::with_genesis(all_at_one, &exported);
        assert_eq!(restarted.token("lng").unwrap().description, description);
        assert_eq!(restarted.app.export_genesis().unwrap().asset, exported.asset);
    }

    #[test]
    fn test_invalid_token_rejects_genesis() {
        let genesis = AppGenesis {
            asset: GenesisState {
                params: Params::default(),
                tokens: vec![token("btc", 10), token("eth", -5)],
            },
            ..AppGenesis::default()
        };
        let mut app = app();
        match app.init_chain(&genesis) {
            Err(AppError::Genesis(AppGenesisError::Asset(GenesisError::InvalidToken { symbol, .. }))) => {
                assert_eq!(symbol, "eth")
            }
            other => panic!("unexpected {other:?}"),
        }

        // Nothing was written; a valid document can still be applied.
        app.init_chain(&AppGenesis::default()).unwrap();
        assert!(app.token("btc").is_none());
    }

    #[test]
    fn test_duplicate_account_and_foreign_chain_rejected() {
        let alice = addr("alice");
        let funded = AccountBalance {
            address: alice,
            coins: native(10),
        };
        let genesis = AppGenesis {
            balances: vec![funded.clone(), funded],
            ..AppGenesis::default()
        };
        assert!(matches!(
            app().init_chain(&genesis),
            Err(AppError::Genesis(AppGenesisError::DuplicateAccount(_)))
        ));

        let genesis = AppGenesis {
            chain_id: "some-other-chain".into(),
            ..AppGenesis::default()
        };
        assert!(matches!(
            app().init_chain(&genesis),
            Err(AppError::Genesis(AppGenesisError::ChainIdMismatch { .. }))
        ));
    }

    #[test]
    fn test_genesis_file_round_trip() {
        let alice = addr("alice");
        let genesis = AppGenesis {
            balances: vec![AccountBalance {
                address: alice,
                coins: native(START),
            }],
            asset: GenesisState {
                params: Params::native(6, 7, 8),
                tokens: vec![token("btc", 10)],
            },
            ..AppGenesis::default()
        };
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("genesis.json");
        std::fs::write(&path, genesis.to_json_pretty().unwrap()).unwrap();

        let loaded = AppGenesis::load(&path).unwrap();
        assert_eq!(loaded, genesis);

        let mut chain = TestChain::with_genesis(heights(), &loaded);
        chain.advance_to(1);
        assert_eq!(chain.params(), Params::native(10, 10_000_000_000, 5_000_000_000));
        assert_eq!(chain.token("btc").unwrap().total_supply, 10);
        assert_eq!(chain.balance_of(&alice, "ubarkis"), START);
    }

    #[test]
    fn test_missing_genesis_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = AppGenesis::load(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, AppGenesisError::Read(_)));
    }
}
