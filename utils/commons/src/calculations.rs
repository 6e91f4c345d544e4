use super::*;

/// Fund distribution for one settled round.
#[derive(Debug, PartialEq, Eq)]
pub struct SettlementShares {
    /// Transferred to the account that held the last bid.
    pub winner: ContractTokenAmount,
    /// Retained in custody to seed the next round.
    pub next_round: ContractTokenAmount,
    /// Transferred to the treasury account.
    pub treasury: ContractTokenAmount,
    /// Transferred to the burn sink. Takes the rounding remainder.
    pub burn: ContractTokenAmount,
}

fn percent_of(total: ContractTokenAmount, percent: u64) -> ContractTokenAmount {
    TokenAmountU64((total.0 as u128 * percent as u128 / 100) as u64)
}

/// Split the pooled balance at settlement time. The burn share is the
/// remainder after the three percentage shares, so the four shares always sum
/// to `total` regardless of integer-division rounding.
pub fn settlement_shares(total: ContractTokenAmount) -> SettlementShares {
    let winner = percent_of(total, WINNER_PERCENT);
    let next_round = percent_of(total, NEXT_ROUND_PERCENT);
    let treasury = percent_of(total, TREASURY_PERCENT);
    SettlementShares {
        winner,
        next_round,
        treasury,
        burn: TokenAmountU64(total.0 - winner.0 - next_round.0 - treasury.0),
    }
}

/// Portion of a single bid that is burned as soon as the bid is admitted.
pub fn bid_burn_amount(bid: ContractTokenAmount) -> ContractTokenAmount {
    percent_of(bid, BID_BURN_PERCENT)
}

#[concordium_cfg_test]
mod tests {
    use super::*;

    #[concordium_test]
    fn test_settlement_shares_round_pool() {
        let shares = settlement_shares(TokenAmountU64(100));
        claim_eq!(
            shares,
            SettlementShares {
                winner: TokenAmountU64(60),
                next_round: TokenAmountU64(20),
                treasury: TokenAmountU64(5),
                burn: TokenAmountU64(15),
            }
        );
    }

    #[concordium_test]
    fn test_settlement_shares_conserve_total() {
        for total in [0u64, 1, 7, 99, 101, 1_000_003, u64::MAX] {
            let shares = settlement_shares(TokenAmountU64(total));
            let sum = shares.winner.0 + shares.next_round.0 + shares.treasury.0 + shares.burn.0;
            claim_eq!(sum, total, "shares must sum to the full pool");
        }
    }

    #[concordium_test]
    fn test_settlement_remainder_goes_to_burn() {
        // 101: 60 + 20 + 5 leaves 16, one unit above the nominal 15%.
        let shares = settlement_shares(TokenAmountU64(101));
        claim_eq!(shares.winner, TokenAmountU64(60));
        claim_eq!(shares.next_round, TokenAmountU64(20));
        claim_eq!(shares.treasury, TokenAmountU64(5));
        claim_eq!(shares.burn, TokenAmountU64(16));
    }

    #[concordium_test]
    fn test_bid_burn_amount() {
        claim_eq!(bid_burn_amount(TokenAmountU64(1_000_000)), TokenAmountU64(100_000));
        claim_eq!(bid_burn_amount(TokenAmountU64(9)), TokenAmountU64(0));
    }
}
