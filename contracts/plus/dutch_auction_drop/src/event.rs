use cosmwasm_std::{Addr, Event, Response, Uint128};

pub trait AuctionEvent {
    /// Append the event to response
    fn add_event(&self, rsp: &mut Response);
}

pub struct AuctionCreated<'a> {
    pub auction_id: u64,
    pub target: &'a Addr,
    pub creator: &'a Addr,
}

impl<'a> AuctionEvent for AuctionCreated<'a> {
    fn add_event(&self, rsp: &mut Response) {
        rsp.events.push(
            Event::new("auction_created")
                .add_attribute("auction_id", self.auction_id.to_string())
                .add_attribute("target", self.target)
                .add_attribute("creator", self.creator),
        );
    }
}

pub struct AuctionApprovalUpdated {
    pub auction_id: u64,
    pub approved: bool,
}

impl AuctionEvent for AuctionApprovalUpdated {
    fn add_event(&self, rsp: &mut Response) {
        rsp.events.push(
            Event::new("auction_approval_updated")
                .add_attribute("auction_id", self.auction_id.to_string())
                .add_attribute("approved", self.approved.to_string()),
        );
    }
}

pub struct AuctionCanceled<'a> {
    pub auction_id: u64,
    pub target: &'a Addr,
}

impl<'a> AuctionEvent for AuctionCanceled<'a> {
    fn add_event(&self, rsp: &mut Response) {
        rsp.events.push(
            Event::new("auction_canceled")
                .add_attribute("auction_id", self.auction_id.to_string())
                .add_attribute("target", self.target),
        );
    }
}

pub struct AuctionEnded<'a> {
    pub auction_id: u64,
    pub target: &'a Addr,
}

impl<'a> AuctionEvent for AuctionEnded<'a> {
    fn add_event(&self, rsp: &mut Response) {
        rsp.events.push(
            Event::new("auction_ended")
                .add_attribute("auction_id", self.auction_id.to_string())
                .add_attribute("target", self.target),
        );
    }
}

pub struct CollectorGiveAwayUpdated<'a> {
    pub auction_id: u64,
    pub target: &'a Addr,
    pub enabled: bool,
}

impl<'a> AuctionEvent for CollectorGiveAwayUpdated<'a> {
    fn add_event(&self, rsp: &mut Response) {
        rsp.events.push(
            Event::new("collector_give_away_updated")
                .add_attribute("auction_id", self.auction_id.to_string())
                .add_attribute("target", self.target)
                .add_attribute("enabled", self.enabled.to_string()),
        );
    }
}

/// Emitted for both purchase flavours, the seeded one carrying its seed
pub struct EditionPurchased<'a> {
    pub auction_id: u64,
    pub buyer: &'a Addr,
    pub amount_paid: Uint128,
    pub seed: Option<u64>,
}

impl<'a> AuctionEvent for EditionPurchased<'a> {
    fn add_event(&self, rsp: &mut Response) {
        let event = match self.seed {
            Some(seed) => {
                Event::new("seeded_edition_purchased").add_attribute("seed", seed.to_string())
            }
            None => Event::new("edition_purchased"),
        };
        rsp.events.push(
            event
                .add_attribute("auction_id", self.auction_id.to_string())
                .add_attribute("buyer", self.buyer)
                .add_attribute("amount_paid", self.amount_paid),
        );
    }
}

pub struct PaymentWithdrawn<'a> {
    pub principal: &'a Addr,
    pub asset: String,
    pub amount: Uint128,
}

impl<'a> AuctionEvent for PaymentWithdrawn<'a> {
    fn add_event(&self, rsp: &mut Response) {
        rsp.events.push(
            Event::new("payment_withdrawn")
                .add_attribute("principal", self.principal)
                .add_attribute("asset", self.asset.clone())
                .add_attribute("amount", self.amount),
        );
    }
}
