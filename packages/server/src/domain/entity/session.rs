//! The game session: players, turn order, bidding and round resolution.
//!
//! `Session` is a plain value with no I/O. Every operation validates the
//! requester against the current phase and role, mutates the session, and
//! returns a [`Transition`] describing what must be broadcast and whether a
//! delayed round advance should be scheduled. Rejected operations return a
//! [`GameError`] and leave the session untouched.
//!
//! Phases run `waiting → auction → bidding → result → auction | end`.

use rand::{Rng, seq::SliceRandom};

use crate::domain::{
    error::GameError,
    scoring::{self, Standing},
    transition::{AdvanceDelay, Narration, Notice, TimerDirective, Transition},
    value_object::{PlayerId, PlayerName, Timestamp},
};

use super::{
    card::{CARD_CATALOG, Card},
    player::Player,
};

pub const MIN_PLAYERS: usize = 3;
pub const MAX_PLAYERS: usize = 4;
/// Money granted to every player when a game starts
pub const STARTING_MONEY: i64 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Waiting,
    Auction,
    Bidding,
    Result,
    End,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Waiting => "waiting",
            Self::Auction => "auction",
            Self::Bidding => "bidding",
            Self::Result => "result",
            Self::End => "end",
        }
    }

    /// A round is running and an auction master is seated
    pub fn is_in_progress(&self) -> bool {
        matches!(self, Self::Auction | Self::Bidding | Self::Result)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighestBid {
    pub bidder: Option<PlayerId>,
    pub amount: i64,
}

#[derive(Debug, Clone)]
pub struct Session {
    /// Seats in join order
    players: Vec<Player>,
    host_id: Option<PlayerId>,
    /// Dealt from the end
    deck: Vec<Card>,
    auction_master: Option<PlayerId>,
    /// Seat index of the auction master, kept while a round is in progress
    master_seat: usize,
    declared_item_name: Option<String>,
    highest_bid: HighestBid,
    current_auction_card: Option<Card>,
    phase: GamePhase,
    /// Bumped on every round start, game end and reset. Delayed advances
    /// carry the generation they were scheduled for.
    round_generation: u64,
    /// Number of players that ever joined, used for display names
    join_count: usize,
    final_standings: Vec<Standing>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            players: Vec::new(),
            host_id: None,
            deck: Vec::new(),
            auction_master: None,
            master_seat: 0,
            declared_item_name: None,
            highest_bid: HighestBid::default(),
            current_auction_card: None,
            phase: GamePhase::Waiting,
            round_generation: 0,
            join_count: 0,
            final_standings: Vec::new(),
        }
    }

    // ========================================
    // Accessors
    // ========================================

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: &PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| &p.id == id)
    }

    pub fn player_ids(&self) -> Vec<PlayerId> {
        self.players.iter().map(|p| p.id.clone()).collect()
    }

    pub fn host_id(&self) -> Option<&PlayerId> {
        self.host_id.as_ref()
    }

    pub fn deck_len(&self) -> usize {
        self.deck.len()
    }

    pub fn auction_master(&self) -> Option<&PlayerId> {
        self.auction_master.as_ref()
    }

    pub fn declared_item_name(&self) -> Option<&str> {
        self.declared_item_name.as_deref()
    }

    pub fn highest_bid(&self) -> &HighestBid {
        &self.highest_bid
    }

    pub fn current_auction_card(&self) -> Option<Card> {
        self.current_auction_card
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn round_generation(&self) -> u64 {
        self.round_generation
    }

    pub fn final_standings(&self) -> &[Standing] {
        &self.final_standings
    }

    pub fn total_money(&self) -> i64 {
        self.players.iter().map(|p| p.money).sum()
    }

    // ========================================
    // Lifecycle
    // ========================================

    /// Seat a newly connected player. The first player becomes host.
    ///
    /// No capacity limit applies here: the player count is only checked
    /// when the host starts a game.
    pub fn join(&mut self, id: PlayerId, joined_at: Timestamp) -> Result<Transition, GameError> {
        if self.seat_of(&id).is_some() {
            return Err(GameError::AlreadyJoined);
        }

        self.join_count += 1;
        let name = PlayerName::numbered(self.join_count);
        if self.host_id.is_none() {
            self.host_id = Some(id.clone());
        }
        self.players.push(Player::new(id, name, joined_at));

        Ok(Transition::none().notice(Notice::StateChanged))
    }

    /// Remove a disconnected player.
    ///
    /// The host passes to the first remaining seat. While a round is in
    /// progress:
    /// - the master leaving voids the round and the next one starts at once
    /// - the highest bidder leaving during bidding clears the highest bid
    /// - dropping below [`MIN_PLAYERS`] ends the game
    ///
    /// The last player leaving resets the session.
    pub fn leave(&mut self, id: &PlayerId) -> Result<Transition, GameError> {
        let seat = self.seat_of(id).ok_or(GameError::UnknownPlayer)?;
        let departed = self.players.remove(seat);

        if self.host_id.as_ref() == Some(id) {
            self.host_id = self.players.first().map(|p| p.id.clone());
        }

        if self.players.is_empty() {
            let generation = self.round_generation + 1;
            *self = Self {
                round_generation: generation,
                ..Self::new()
            };
            return Ok(Transition::none().timer(TimerDirective::Cancel));
        }

        if !self.phase.is_in_progress() {
            return Ok(Transition::none().notice(Notice::StateChanged));
        }

        if seat < self.master_seat {
            self.master_seat -= 1;
        }

        if self.players.len() < MIN_PLAYERS {
            return Ok(self.end_game());
        }

        if self.auction_master.as_ref() == Some(id) {
            // Whoever followed the departed master now sits at `seat`
            let seats = self.players.len();
            self.master_seat = (seat + seats - 1) % seats;
            // A round already showing its result keeps its transfers
            let text = if self.phase == GamePhase::Result {
                format!("親({})が退出しました。", departed.name)
            } else {
                format!(
                    "親({})が退出したため、このラウンドは無効になりました。",
                    departed.name
                )
            };
            let voided = Transition::none().narrate(Narration::AuctionResult(text));
            return Ok(voided.then(self.start_next_round()));
        }

        if self.phase == GamePhase::Bidding && self.highest_bid.bidder.as_ref() == Some(id) {
            self.highest_bid = HighestBid::default();
            return Ok(Transition::none()
                .notice(Notice::StateChanged)
                .narrate(Narration::Bid(format!(
                    "最高入札者({})が退出したため、入札はリセットされました。",
                    departed.name
                ))));
        }

        Ok(Transition::none().notice(Notice::StateChanged))
    }

    /// Host-only: shuffle the full catalog and start a game
    pub fn start_game<R: Rng + ?Sized>(
        &mut self,
        requester: &PlayerId,
        rng: &mut R,
    ) -> Result<Transition, GameError> {
        self.ensure_can_start(requester)?;
        let mut deck = CARD_CATALOG.to_vec();
        deck.shuffle(rng);
        self.start_game_with_deck(requester, deck)
    }

    fn start_game_with_deck(
        &mut self,
        requester: &PlayerId,
        deck: Vec<Card>,
    ) -> Result<Transition, GameError> {
        self.ensure_can_start(requester)?;
        if deck.len() < self.players.len() {
            return Err(GameError::InconsistentRound);
        }

        self.deck = deck;
        for player in &mut self.players {
            player.reset_for_game(STARTING_MONEY);
        }
        self.deal();

        self.master_seat = 0;
        self.auction_master = self.players.first().map(|p| p.id.clone());
        self.declared_item_name = None;
        self.highest_bid = HighestBid::default();
        self.current_auction_card = None;
        self.final_standings.clear();
        self.phase = GamePhase::Auction;
        self.round_generation += 1;

        Ok(Transition::none()
            .notice(Notice::GameStarted)
            .notice(Notice::StateChanged)
            .timer(TimerDirective::Cancel))
    }

    fn ensure_can_start(&self, requester: &PlayerId) -> Result<(), GameError> {
        if self.host_id.as_ref() != Some(requester) {
            return Err(GameError::NotHost);
        }
        if self.phase != GamePhase::Waiting {
            return Err(GameError::GameAlreadyStarted);
        }
        let count = self.players.len();
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&count) {
            return Err(GameError::InvalidPlayerCount { count });
        }
        Ok(())
    }

    /// Host-only, after a game ended: back to the lobby with the same seats
    pub fn return_to_lobby(&mut self, requester: &PlayerId) -> Result<Transition, GameError> {
        if self.host_id.as_ref() != Some(requester) {
            return Err(GameError::NotHostForLobby);
        }
        if self.phase != GamePhase::End {
            return Err(GameError::GameNotOver);
        }

        for player in &mut self.players {
            player.reset_for_game(0);
        }
        self.deck.clear();
        self.auction_master = None;
        self.master_seat = 0;
        self.declared_item_name = None;
        self.highest_bid = HighestBid::default();
        self.current_auction_card = None;
        self.final_standings.clear();
        self.phase = GamePhase::Waiting;
        self.round_generation += 1;

        Ok(Transition::none()
            .notice(Notice::StateChanged)
            .timer(TimerDirective::Cancel))
    }

    // ========================================
    // Auction round
    // ========================================

    /// Master-only, during `auction`. Anything else is silently ignored.
    ///
    /// The declared name may misrepresent the dealt card.
    pub fn declare_item(&mut self, requester: &PlayerId, item_name: String) -> Transition {
        if self.phase != GamePhase::Auction || !self.is_master(requester) {
            return Transition::none();
        }

        let narration = format!("親が「{}」のオークションを開始しました！", item_name);
        self.declared_item_name = Some(item_name);
        self.phase = GamePhase::Bidding;

        Transition::none()
            .notice(Notice::StateChanged)
            .narrate(Narration::Declaration(narration))
    }

    pub fn place_bid(&mut self, requester: &PlayerId, amount: i64) -> Result<Transition, GameError> {
        if self.phase != GamePhase::Bidding {
            return Err(GameError::NotBiddingPhase);
        }
        if self.is_master(requester) {
            return Err(GameError::MasterCannotBid);
        }
        if amount <= self.highest_bid.amount {
            return Err(GameError::BidTooLow {
                highest: self.highest_bid.amount,
            });
        }
        let bidder = self.player(requester).ok_or(GameError::UnknownPlayer)?;
        if amount > bidder.money {
            return Err(GameError::InsufficientFunds {
                money: bidder.money,
            });
        }

        let narration = format!("{}が{}億で入札しました！", bidder.name, amount);
        self.highest_bid = HighestBid {
            bidder: Some(requester.clone()),
            amount,
        };

        Ok(Transition::none()
            .notice(Notice::StateChanged)
            .narrate(Narration::Bid(narration)))
    }

    /// Master-only, during `bidding`. Anything else is silently ignored.
    ///
    /// Without a bid the round closes with no transfer. Otherwise the
    /// highest bidder pays the master and receives the master's real card.
    pub fn end_bidding(&mut self, requester: &PlayerId) -> Result<Transition, GameError> {
        if self.phase != GamePhase::Bidding || !self.is_master(requester) {
            return Ok(Transition::none());
        }

        let Some(bidder_id) = self.highest_bid.bidder.clone() else {
            self.phase = GamePhase::Result;
            return Ok(Transition::none()
                .notice(Notice::StateChanged)
                .narrate(Narration::AuctionResult(
                    "入札者がいなかったため、オークションは終了しました。".to_string(),
                ))
                .timer(self.schedule(AdvanceDelay::NoBid)));
        };

        let master_seat = self.master_seat;
        let bidder_seat = self
            .seat_of(&bidder_id)
            .ok_or(GameError::InconsistentRound)?;
        let card = self.players[master_seat]
            .dealt_card
            .ok_or(GameError::InconsistentRound)?;
        let amount = self.highest_bid.amount;

        self.transfer(bidder_seat, master_seat, amount);
        self.players[master_seat].dealt_card = None;
        self.players[bidder_seat].point_cards.push(card);
        self.current_auction_card = Some(card);
        self.phase = GamePhase::Result;

        let narration = format!(
            "親が入札を終了しました。\n最高入札者({})が{}億で「{}」(実際のカードは「{}」)を落札しました。",
            self.players[bidder_seat].name,
            amount,
            self.declared_item_name.as_deref().unwrap_or_default(),
            card.name
        );

        Ok(Transition::none()
            .notice(Notice::StateChanged)
            .narrate(Narration::AuctionResult(narration))
            .timer(self.schedule(AdvanceDelay::Result)))
    }

    /// Any non-master, during `bidding`, once a bid exists.
    ///
    /// The caller need not be the highest bidder. A false declaration makes
    /// the master pay the highest bidder and the card goes to nobody. A true
    /// declaration makes the highest bidder pay the master and take the card.
    pub fn call_liar(&mut self, requester: &PlayerId) -> Result<Transition, GameError> {
        if self.phase != GamePhase::Bidding {
            return Err(GameError::LiarCallOutsideBidding);
        }
        let Some(bidder_id) = self.highest_bid.bidder.clone() else {
            return Err(GameError::NoBidYet);
        };
        if self.is_master(requester) {
            return Err(GameError::MasterCannotCallLiar);
        }
        let caller_name = self
            .player(requester)
            .ok_or(GameError::UnknownPlayer)?
            .name
            .clone();

        let master_seat = self.master_seat;
        let bidder_seat = self
            .seat_of(&bidder_id)
            .ok_or(GameError::InconsistentRound)?;
        let card = self.players[master_seat]
            .dealt_card
            .ok_or(GameError::InconsistentRound)?;
        let amount = self.highest_bid.amount;
        let declared = self.declared_item_name.clone().unwrap_or_default();
        let was_lying = card.name != declared;

        let master_name = self.players[master_seat].name.clone();
        let bidder_name = self.players[bidder_seat].name.clone();
        let mut narration = format!(
            "{}の「ライアー！」コール！ 親のカードは「{}」でした。\n宣言は「{}」だったので…\n",
            caller_name, card.name, declared
        );

        self.players[master_seat].dealt_card = None;
        if was_lying {
            self.transfer(master_seat, bidder_seat, amount);
            narration.push_str(&format!(
                "親は嘘をついていました！\n親({})が、最高入札者({})に{}億を支払います。",
                master_name, bidder_name, amount
            ));
        } else {
            self.transfer(bidder_seat, master_seat, amount);
            self.players[bidder_seat].point_cards.push(card);
            narration.push_str(&format!(
                "親は真実を言っていました！\n最高入札者({})が、親({})に{}億を支払います。\n{}が「{}」を獲得しました。",
                bidder_name, master_name, amount, bidder_name, card.name
            ));
        }
        self.current_auction_card = Some(card);
        self.phase = GamePhase::Result;

        Ok(Transition::none()
            .notice(Notice::StateChanged)
            .narrate(Narration::LiarResult(narration))
            .timer(self.schedule(AdvanceDelay::Result)))
    }

    /// Fired by the delayed advance scheduled at the end of a round.
    ///
    /// Stale advances (another generation, or the session is no longer
    /// showing a result) are ignored.
    pub fn advance_round(&mut self, generation: u64) -> Transition {
        if generation != self.round_generation || self.phase != GamePhase::Result {
            return Transition::none();
        }
        self.start_next_round()
    }

    // ========================================
    // Internals
    // ========================================

    fn start_next_round(&mut self) -> Transition {
        if self.players.is_empty() || self.deck.len() < self.players.len() {
            return self.end_game();
        }

        self.current_auction_card = None;
        self.declared_item_name = None;
        self.highest_bid = HighestBid::default();
        self.phase = GamePhase::Auction;

        self.master_seat = (self.master_seat + 1) % self.players.len();
        let master = &self.players[self.master_seat];
        self.auction_master = Some(master.id.clone());
        let narration = format!("次のラウンドを開始します。新しい親は {} です。", master.name);

        self.deal();
        self.round_generation += 1;

        Transition::none()
            .notice(Notice::StateChanged)
            .narrate(Narration::NewRound(narration))
            .timer(TimerDirective::Cancel)
    }

    fn end_game(&mut self) -> Transition {
        self.phase = GamePhase::End;
        self.auction_master = None;
        self.round_generation += 1;

        let standings = scoring::rank(&self.players);
        for player in &mut self.players {
            player.final_assets = Some(scoring::final_assets(player));
        }
        let narration = scoring::game_over_message(&standings);
        self.final_standings = standings;

        Transition::none()
            .notice(Notice::StateChanged)
            .narrate(Narration::GameOver(narration))
            .timer(TimerDirective::Cancel)
    }

    /// One card per seat, replacing whatever was dealt before
    fn deal(&mut self) {
        for player in &mut self.players {
            player.dealt_card = self.deck.pop();
        }
    }

    fn transfer(&mut self, from_seat: usize, to_seat: usize, amount: i64) {
        self.players[from_seat].money -= amount;
        self.players[to_seat].money += amount;
    }

    fn schedule(&self, delay: AdvanceDelay) -> TimerDirective {
        TimerDirective::Schedule {
            delay,
            generation: self.round_generation,
        }
    }

    fn is_master(&self, id: &PlayerId) -> bool {
        self.auction_master.as_ref() == Some(id)
    }

    fn seat_of(&self, id: &PlayerId) -> Option<usize> {
        self.players.iter().position(|p| &p.id == id)
    }
}
