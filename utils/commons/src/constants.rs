/// Tag for the BidPlaced event.
pub const BID_PLACED_TAG: u8 = u8::MAX;

/// Tag for the TokensBurned event.
pub const TOKENS_BURNED_TAG: u8 = u8::MAX - 1;

/// Tag for the WinnerClaimed event.
pub const WINNER_CLAIMED_TAG: u8 = u8::MAX - 2;

/// Tag for the AddressBanned event.
pub const ADDRESS_BANNED_TAG: u8 = u8::MAX - 3;

/// Tag for the AddressUnbanned event.
pub const ADDRESS_UNBANNED_TAG: u8 = u8::MAX - 4;

/// Tag for the ParametersUpdated event.
pub const PARAMETERS_UPDATED_TAG: u8 = u8::MAX - 5;

/// Tag for the EmergencyWithdraw event.
pub const EMERGENCY_WITHDRAW_TAG: u8 = u8::MAX - 6;

/// Percentage of every bid that is burned on admission.
pub const BID_BURN_PERCENT: u64 = 10;

/// Winner's percentage of the pool at settlement.
pub const WINNER_PERCENT: u64 = 60;

/// Percentage of the pool retained in custody to seed the next round.
pub const NEXT_ROUND_PERCENT: u64 = 20;

/// Treasury's percentage of the pool at settlement. The burn share is the
/// exact remainder after the three explicit shares.
pub const TREASURY_PERCENT: u64 = 5;

/// Hard ceiling for the upper bound of the randomized extension, in
/// milliseconds (24 hours).
pub const MAX_TIME_INCREASE_MILLIS: u64 = 24 * 60 * 60 * 1_000;
