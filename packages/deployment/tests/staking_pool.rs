use soroban_sdk::{Env, String};
use stakehouse_deployment::fixtures::{
    deploy_staking_pool_fixture, mine, DEFAULT_REWARD_RATE, INITIAL_SUPPLY, USER_FUNDING,
};

mod deployment {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn has_staking_token_set() {
        let env = Env::default();
        let fixture = deploy_staking_pool_fixture(&env);

        assert_eq!(
            fixture.staking_pool.staking_token(),
            fixture.staking_token.address
        );
    }

    #[test]
    fn has_reward_token_set() {
        let env = Env::default();
        let fixture = deploy_staking_pool_fixture(&env);

        assert_eq!(
            fixture.staking_pool.reward_token(),
            fixture.reward_token.address
        );
    }

    #[test]
    fn users_are_funded() {
        let env = Env::default();
        let fixture = deploy_staking_pool_fixture(&env);

        assert_eq!(fixture.staking_token.balance(&fixture.user), USER_FUNDING);
        assert_eq!(fixture.staking_token.balance(&fixture.user2), USER_FUNDING);
        assert_eq!(
            fixture.staking_token.balance(&fixture.owner),
            INITIAL_SUPPLY - 2 * USER_FUNDING
        );
        assert_eq!(
            fixture.staking_token.symbol(),
            String::from_str(&env, "STK")
        );
        assert_eq!(
            fixture.reward_token.symbol(),
            String::from_str(&env, "RWD")
        );
        assert_eq!(fixture.staking_pool.reward_rate(), DEFAULT_REWARD_RATE);
    }
}

mod staking {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn updates_variables_on_staking() {
        let env = Env::default();
        let fixture = deploy_staking_pool_fixture(&env);
        let amount = 100;

        fixture.staking_pool.stake(&fixture.user, &amount);

        assert_eq!(fixture.staking_pool.total_staked_supply(), amount);
        assert_eq!(fixture.staking_pool.staked_balance(&fixture.user), amount);
        assert_eq!(
            fixture.staking_token.balance(&fixture.staking_pool.address),
            amount
        );
    }

    #[test]
    fn updates_variables_on_withdrawing() {
        let env = Env::default();
        let fixture = deploy_staking_pool_fixture(&env);
        let amount = 100;
        let withdraw_amount = 50;

        fixture.staking_pool.stake(&fixture.user, &amount);
        fixture.staking_pool.withdraw(&fixture.user, &withdraw_amount);

        assert_eq!(
            fixture.staking_pool.total_staked_supply(),
            amount - withdraw_amount
        );
        assert_eq!(
            fixture.staking_pool.staked_balance(&fixture.user),
            amount - withdraw_amount
        );
        assert_eq!(
            fixture.staking_token.balance(&fixture.staking_pool.address),
            amount - withdraw_amount
        );
    }

    #[test]
    fn updates_rewards() {
        let env = Env::default();
        let fixture = deploy_staking_pool_fixture(&env);

        fixture.staking_pool.stake(&fixture.user, &100);
        mine(&env, 100);

        assert_eq!(fixture.staking_pool.earned(&fixture.user), 100 * 100);
    }

    #[test]
    fn two_stakers_share_rewards() {
        let env = Env::default();
        let fixture = deploy_staking_pool_fixture(&env);

        fixture.staking_pool.stake(&fixture.user, &100);
        mine(&env, 10);
        fixture.staking_pool.stake(&fixture.user2, &100);
        mine(&env, 10);

        // first 10 blocks go to user alone, the next 10 are split evenly
        assert_eq!(fixture.staking_pool.earned(&fixture.user), 1_000 + 500);
        assert_eq!(fixture.staking_pool.earned(&fixture.user2), 500);
    }

    #[test]
    fn claim_pays_out_earned_rewards() {
        let env = Env::default();
        let fixture = deploy_staking_pool_fixture(&env);

        fixture
            .staking_pool
            .fund_rewards(&fixture.owner, &1_000_000);
        fixture.staking_pool.stake(&fixture.user, &100);
        mine(&env, 100);

        let claimed = fixture.staking_pool.claim_rewards(&fixture.user);

        assert_eq!(claimed, 100 * 100);
        assert_eq!(fixture.reward_token.balance(&fixture.user), 100 * 100);
        assert_eq!(fixture.staking_pool.earned(&fixture.user), 0);
    }
}
