use crate::state::GameParameters;
use commons::*;
use concordium_std::*;

/// Bid admission event data.
#[derive(Debug, Serial)]
pub struct BidPlacedEvent {
    /// Account holding the new last bid.
    pub bidder: AccountAddress,
    /// Tokens pulled into custody.
    pub amount: ContractTokenAmount,
    /// New end time of the countdown.
    pub end_time: Timestamp,
}

/// Burn event data, emitted on every bid and on settlement.
#[derive(Debug, Serial)]
pub struct TokensBurnedEvent {
    /// Tokens sent to the burn sink.
    pub amount: ContractTokenAmount,
}

/// Settlement event data.
#[derive(Debug, Serial)]
pub struct WinnerClaimedEvent {
    /// The crowned account.
    pub winner: AccountAddress,
    /// Tokens transferred to the winner.
    pub amount: ContractTokenAmount,
}

/// Blacklist update event data.
#[derive(Debug, Serial)]
pub struct BlacklistEvent {
    pub address: AccountAddress,
}

/// Configuration update event data, logging the full new configuration.
#[derive(Debug, Serial)]
pub struct ParametersUpdatedEvent {
    pub params: GameParameters,
}

/// Owner escape-hatch withdrawal event data.
#[derive(Debug, Serial)]
pub struct EmergencyWithdrawEvent {
    pub amount: ContractTokenAmount,
}

/// Tagged custom event to be serialized for the event log.
#[derive(Debug)]
pub enum AuctionEvent {
    BidPlaced(BidPlacedEvent),
    TokensBurned(TokensBurnedEvent),
    WinnerClaimed(WinnerClaimedEvent),
    AddressBanned(BlacklistEvent),
    AddressUnbanned(BlacklistEvent),
    ParametersUpdated(ParametersUpdatedEvent),
    EmergencyWithdraw(EmergencyWithdrawEvent),
}

impl Serial for AuctionEvent {
    fn serial<W: Write>(&self, out: &mut W) -> Result<(), W::Err> {
        match self {
            AuctionEvent::BidPlaced(event) => {
                out.write_u8(BID_PLACED_TAG)?;
                event.serial(out)
            }
            AuctionEvent::TokensBurned(event) => {
                out.write_u8(TOKENS_BURNED_TAG)?;
                event.serial(out)
            }
            AuctionEvent::WinnerClaimed(event) => {
                out.write_u8(WINNER_CLAIMED_TAG)?;
                event.serial(out)
            }
            AuctionEvent::AddressBanned(event) => {
                out.write_u8(ADDRESS_BANNED_TAG)?;
                event.serial(out)
            }
            AuctionEvent::AddressUnbanned(event) => {
                out.write_u8(ADDRESS_UNBANNED_TAG)?;
                event.serial(out)
            }
            AuctionEvent::ParametersUpdated(event) => {
                out.write_u8(PARAMETERS_UPDATED_TAG)?;
                event.serial(out)
            }
            AuctionEvent::EmergencyWithdraw(event) => {
                out.write_u8(EMERGENCY_WITHDRAW_TAG)?;
                event.serial(out)
            }
        }
    }
}
