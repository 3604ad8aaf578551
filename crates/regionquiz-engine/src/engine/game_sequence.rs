use rand::{Rng, seq::SliceRandom};
use rand_pcg::Pcg32;

use crate::core::ImageGame;

use super::{label_pool::ShuffleSeed, play_session::PlaySession};

/// The games of one topic in a shuffled play order.
///
/// The order is shuffled once on construction; advancing past the last game
/// wraps around to the first.
#[derive(Debug, Clone)]
pub struct GameSequence {
    games: Vec<ImageGame>,
    order: Vec<usize>,
    cursor: usize,
}

impl GameSequence {
    /// Returns `None` if `games` is empty.
    pub fn new<R>(games: Vec<ImageGame>, rng: &mut R) -> Option<Self>
    where
        R: Rng + ?Sized,
    {
        if games.is_empty() {
            return None;
        }
        let mut order: Vec<usize> = (0..games.len()).collect();
        order.shuffle(rng);
        Some(Self {
            games,
            order,
            cursor: 0,
        })
    }

    /// Keeps only the games belonging to `topic_id`.
    pub fn for_topic<R>(
        games: impl IntoIterator<Item = ImageGame>,
        topic_id: &str,
        rng: &mut R,
    ) -> Option<Self>
    where
        R: Rng + ?Sized,
    {
        let games = games
            .into_iter()
            .filter(|g| g.topic_id.as_deref() == Some(topic_id))
            .collect();
        Self::new(games, rng)
    }

    #[must_use]
    pub fn current(&self) -> &ImageGame {
        &self.games[self.order[self.cursor]]
    }

    /// Moves to the next game, wrapping after the last.
    pub fn advance(&mut self) -> &ImageGame {
        self.cursor = (self.cursor + 1) % self.order.len();
        self.current()
    }

    /// Zero-based position of the current game in the play order.
    #[must_use]
    pub fn position(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.games.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    /// Games in play order, starting from the first.
    pub fn games_in_order(&self) -> impl Iterator<Item = &ImageGame> + '_ {
        self.order.iter().map(|&i| &self.games[i])
    }
}

/// A play session that can move on to the next game of its topic.
///
/// # Example
///
/// ```
/// use regionquiz_engine::{BoundingBox, GameType, ImageGame, Region, ShuffleSeed, TopicSession};
///
/// let game = |id: &str| ImageGame {
///     id: id.into(),
///     title: id.into(),
///     description: None,
///     image_url: format!("{id}.png"),
///     topic_id: Some("carbon".into()),
///     subject_id: None,
///     game_type: GameType::Standard,
///     regions: vec![Region::rectangle("r1", "Elmas", BoundingBox::new(0.0, 0.0, 10.0, 10.0))],
/// };
///
/// let seed = ShuffleSeed::from_bytes([1; 16]);
/// let mut topic = TopicSession::with_seed(vec![game("a"), game("b")], seed).unwrap();
/// let first = topic.session().game().id.clone();
/// let second = topic.advance().game().id.clone();
/// assert_ne!(first, second);
/// assert_eq!(topic.advance().game().id, first);
/// ```
#[derive(Debug, Clone)]
pub struct TopicSession {
    sequence: GameSequence,
    session: PlaySession,
    rng: Pcg32,
}

impl TopicSession {
    #[must_use]
    pub fn new(games: Vec<ImageGame>) -> Option<Self> {
        Self::with_seed(games, rand::rng().random())
    }

    /// Like [`Self::new`], but game order and every label shuffle derive
    /// from `seed`.
    #[must_use]
    pub fn with_seed(games: Vec<ImageGame>, seed: ShuffleSeed) -> Option<Self> {
        let mut rng = seed.rng();
        let sequence = GameSequence::new(games, &mut rng)?;
        Some(Self::from_sequence(sequence, rng))
    }

    /// Like [`Self::with_seed`], but plays only the games of `topic_id`.
    #[must_use]
    pub fn for_topic(
        games: impl IntoIterator<Item = ImageGame>,
        topic_id: &str,
        seed: ShuffleSeed,
    ) -> Option<Self> {
        let mut rng = seed.rng();
        let sequence = GameSequence::for_topic(games, topic_id, &mut rng)?;
        Some(Self::from_sequence(sequence, rng))
    }

    /// Starts on the current game of an existing sequence.
    #[must_use]
    pub fn from_sequence(sequence: GameSequence, mut rng: Pcg32) -> Self {
        let session = PlaySession::with_seed(sequence.current().clone(), rng.random());
        Self {
            sequence,
            session,
            rng,
        }
    }

    #[must_use]
    pub fn sequence(&self) -> &GameSequence {
        &self.sequence
    }

    #[must_use]
    pub fn session(&self) -> &PlaySession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut PlaySession {
        &mut self.session
    }

    /// Replaces the session with a fresh one on the next game.
    ///
    /// The new game's image has not loaded yet, so the session starts in
    /// [`SessionState::Loading`](super::SessionState::Loading).
    pub fn advance(&mut self) -> &mut PlaySession {
        let game = self.sequence.advance().clone();
        log::debug!(
            "advancing to game {} ({}/{})",
            game.id,
            self.sequence.position() + 1,
            self.sequence.len()
        );
        self.session = PlaySession::with_seed(game, self.rng.random());
        &mut self.session
    }
}
