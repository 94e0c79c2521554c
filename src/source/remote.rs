//! Cards drawn from a deckofcardsapi-compatible deck service.
//!
//! The service is addressed over two endpoints:
//!
//! - `GET {base}/new/shuffle/?deck_count=N` creates a shuffled deck and
//!   returns its `deck_id`;
//! - `GET {base}/{deck_id}/draw/?count=K` removes `K` cards from that deck.
//!
//! The HTTP client lives behind the [`Transport`] trait so the decoding and
//! failure mapping work without a network.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use serde::Deserialize;

use crate::card::{Card, Rank, Suit};
use crate::error::SourceError;

use super::CardSource;

/// Public endpoint of the deck service.
pub const DEFAULT_BASE_URL: &str = "https://deckofcardsapi.com/api/deck";

/// Performs GET requests for [`RemoteSource`].
pub trait Transport {
    /// Fetches `url` and returns the response body.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Transport`] if the request fails.
    fn get(&self, url: &str) -> Result<String, SourceError>;
}

#[derive(Debug, Deserialize)]
struct ShuffleResponse {
    success: bool,
    deck_id: String,
    #[serde(default)]
    remaining: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct DrawResponse {
    success: bool,
    #[serde(default)]
    cards: Vec<ApiCard>,
    #[serde(default)]
    remaining: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct ApiCard {
    value: String,
    suit: String,
}

impl TryFrom<&ApiCard> for Card {
    type Error = SourceError;

    fn try_from(card: &ApiCard) -> Result<Self, Self::Error> {
        let rank = match card.value.as_str() {
            "ACE" => Rank::Ace,
            "KING" => Rank::King,
            "QUEEN" => Rank::Queen,
            "JACK" => Rank::Jack,
            number => number
                .parse::<u8>()
                .ok()
                .and_then(Rank::from_number)
                .ok_or(SourceError::Malformed)?,
        };
        let suit = match card.suit.as_str() {
            "HEARTS" => Suit::Hearts,
            "DIAMONDS" => Suit::Diamonds,
            "CLUBS" => Suit::Clubs,
            "SPADES" => Suit::Spades,
            _ => return Err(SourceError::Malformed),
        };
        Ok(Self::new(rank, suit))
    }
}

fn decode<'a, T: Deserialize<'a>>(body: &'a str) -> Result<T, SourceError> {
    serde_json::from_str(body).map_err(|err| {
        tracing::warn!(%err, "undecodable deck service response");
        SourceError::Malformed
    })
}

/// Draws cards from a remote deck service.
///
/// Every round starts on a freshly shuffled deck, so cards never repeat
/// within a round. Failures are reported as-is and never retried.
#[derive(Debug, Clone)]
pub struct RemoteSource<T> {
    transport: T,
    base_url: String,
    deck_count: u8,
    deck_id: Option<String>,
    remaining: Option<usize>,
}

impl<T: Transport> RemoteSource<T> {
    /// Creates a source for the public deck service.
    pub fn new(transport: T, deck_count: u8) -> Self {
        Self::with_base_url(transport, DEFAULT_BASE_URL, deck_count)
    }

    /// Creates a source for a service at `base_url`.
    pub fn with_base_url(transport: T, base_url: impl Into<String>, deck_count: u8) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            transport,
            base_url,
            deck_count: deck_count.max(1),
            deck_id: None,
            remaining: None,
        }
    }

    /// Returns the identifier of the current deck, if one was shuffled.
    #[must_use]
    pub fn deck_id(&self) -> Option<&str> {
        self.deck_id.as_deref()
    }
}

impl<T: Transport> CardSource for RemoteSource<T> {
    fn new_shoe(&mut self) -> Result<(), SourceError> {
        let url = format!("{}/new/shuffle/?deck_count={}", self.base_url, self.deck_count);
        let body = self.transport.get(&url)?;
        let response: ShuffleResponse = decode(&body)?;
        if !response.success || response.deck_id.is_empty() {
            tracing::warn!("deck service refused to shuffle");
            return Err(SourceError::Rejected);
        }

        tracing::debug!(deck_id = %response.deck_id, "remote deck shuffled");
        self.deck_id = Some(response.deck_id);
        self.remaining = response.remaining;
        Ok(())
    }

    fn begin_round(&mut self) -> Result<(), SourceError> {
        self.new_shoe()
    }

    fn draw(&mut self, count: usize) -> Result<Vec<Card>, SourceError> {
        let deck_id = self.deck_id.as_deref().ok_or(SourceError::NoDeck)?;
        let url = format!("{}/{deck_id}/draw/?count={count}", self.base_url);
        let body = self.transport.get(&url)?;
        let response: DrawResponse = decode(&body)?;

        if response.cards.len() != count {
            tracing::warn!(
                requested = count,
                received = response.cards.len(),
                "deck service returned the wrong number of cards"
            );
            return Err(SourceError::ShortDraw {
                requested: count,
                received: response.cards.len(),
            });
        }
        if !response.success {
            return Err(SourceError::Rejected);
        }

        let cards = response
            .cards
            .iter()
            .map(Card::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        self.remaining = response.remaining;
        Ok(cards)
    }

    fn remaining(&self) -> Option<usize> {
        self.remaining
    }
}

/// Blocking HTTP transport built on `reqwest`.
#[cfg(feature = "remote")]
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

#[cfg(feature = "remote")]
impl HttpTransport {
    /// Creates a transport whose requests time out after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Transport`] if the client cannot be built.
    pub fn new(timeout: core::time::Duration) -> Result<Self, SourceError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| {
                tracing::warn!(%err, "cannot build http client");
                SourceError::Transport
            })?;
        Ok(Self { client })
    }
}

#[cfg(feature = "remote")]
impl Transport for HttpTransport {
    fn get(&self, url: &str) -> Result<String, SourceError> {
        self.client
            .get(url)
            .send()
            .and_then(reqwest::blocking::Response::error_for_status)
            .and_then(reqwest::blocking::Response::text)
            .map_err(|err| {
                tracing::warn!(%err, url, "deck service request failed");
                SourceError::Transport
            })
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;
    use alloc::vec;
    use core::cell::RefCell;

    use super::*;

    /// Serves canned bodies in order and records requested URLs.
    struct Canned {
        bodies: RefCell<Vec<Result<String, SourceError>>>,
        urls: RefCell<Vec<String>>,
    }

    impl Canned {
        fn new(bodies: &[Result<&str, SourceError>]) -> Self {
            Self {
                bodies: RefCell::new(
                    bodies
                        .iter()
                        .rev()
                        .map(|body| body.map(ToString::to_string))
                        .collect(),
                ),
                urls: RefCell::new(Vec::new()),
            }
        }
    }

    impl Transport for Canned {
        fn get(&self, url: &str) -> Result<String, SourceError> {
            self.urls.borrow_mut().push(url.to_string());
            self.bodies.borrow_mut().pop().unwrap_or(Err(SourceError::Transport))
        }
    }

    const SHUFFLED: &str =
        r#"{"success": true, "deck_id": "3p40paa87x90", "shuffled": true, "remaining": 52}"#;

    #[test]
    fn shuffles_then_draws() {
        let draw = r#"{"success": true, "deck_id": "3p40paa87x90", "cards": [
            {"code": "KH", "image": "https://deckofcardsapi.com/static/img/KH.png", "value": "KING", "suit": "HEARTS"},
            {"code": "0S", "image": "https://deckofcardsapi.com/static/img/0S.png", "value": "10", "suit": "SPADES"}
        ], "remaining": 50}"#;
        let mut source = RemoteSource::with_base_url(
            Canned::new(&[Ok(SHUFFLED), Ok(draw)]),
            "http://deck.test/api/deck/",
            1,
        );

        source.begin_round().unwrap();
        assert_eq!(source.deck_id(), Some("3p40paa87x90"));
        let cards = source.draw(2).unwrap();
        assert_eq!(
            cards,
            vec![
                Card::new(Rank::King, Suit::Hearts),
                Card::new(Rank::Ten, Suit::Spades)
            ]
        );
        assert_eq!(source.remaining(), Some(50));
        assert_eq!(
            *source.transport.urls.borrow(),
            vec![
                "http://deck.test/api/deck/new/shuffle/?deck_count=1".to_string(),
                "http://deck.test/api/deck/3p40paa87x90/draw/?count=2".to_string(),
            ]
        );
    }

    #[test]
    fn draw_without_deck_fails() {
        let mut source = RemoteSource::new(Canned::new(&[]), 1);
        assert_eq!(source.draw(1), Err(SourceError::NoDeck));
    }

    #[test]
    fn empty_draw_is_short() {
        let exhausted = r#"{"success": false, "deck_id": "3p40paa87x90", "cards": [], "remaining": 0, "error": "Not enough cards remaining to draw 1 additional"}"#;
        let mut source = RemoteSource::new(Canned::new(&[Ok(SHUFFLED), Ok(exhausted)]), 1);
        source.new_shoe().unwrap();
        assert_eq!(
            source.draw(1),
            Err(SourceError::ShortDraw {
                requested: 1,
                received: 0
            })
        );
    }

    #[test]
    fn malformed_cards_are_rejected() {
        let joker = r#"{"success": true, "cards": [{"value": "JOKER", "suit": "HEARTS"}], "remaining": 51}"#;
        let mut source = RemoteSource::new(Canned::new(&[Ok(SHUFFLED), Ok(joker), Ok("<html>")]), 1);
        source.new_shoe().unwrap();
        assert_eq!(source.draw(1), Err(SourceError::Malformed));
        assert_eq!(source.draw(1), Err(SourceError::Malformed));
    }

    #[test]
    fn transport_failure_propagates() {
        let mut source = RemoteSource::new(Canned::new(&[Err(SourceError::Transport)]), 1);
        assert_eq!(source.new_shoe(), Err(SourceError::Transport));
        assert_eq!(source.deck_id(), None);
    }

    #[test]
    fn refused_shuffle_is_rejected() {
        let refused = r#"{"success": false, "deck_id": ""}"#;
        let mut source = RemoteSource::new(Canned::new(&[Ok(refused)]), 1);
        assert_eq!(source.new_shoe(), Err(SourceError::Rejected));
    }
}
