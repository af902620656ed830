//! High score service boundary and local leaderboard
//!
//! The simulation never blocks on scores. A [`ScoreService`] hands back a
//! [`PendingRequest`] that the session polls once per frame; requests that
//! outlive their timeout resolve to [`ScoreError::TimedOut`].

use std::fmt;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

use serde::{Deserialize, Serialize};

use crate::consts::SCORE_REQUEST_TIMEOUT;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A score to submit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSubmission {
    pub player_name: String,
    pub score: u64,
    pub level: u32,
}

/// Service answer to a submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SubmitReceipt {
    pub success: bool,
    /// 1-indexed leaderboard position, if the score placed
    pub rank: Option<usize>,
}

/// One row of the leaderboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedScore {
    pub rank: usize,
    pub player_name: String,
    pub score: u64,
    pub level: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScoreError {
    /// Transport failed or the service went away
    Unreachable(String),
    /// No answer within the timeout
    TimedOut { after: f32 },
    /// Service answered with a refusal
    Rejected(String),
}

impl fmt::Display for ScoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unreachable(reason) => write!(f, "score service unreachable: {reason}"),
            Self::TimedOut { after } => write!(f, "score request timed out after {after:.1}s"),
            Self::Rejected(reason) => write!(f, "score rejected: {reason}"),
        }
    }
}

impl std::error::Error for ScoreError {}

pub type ScoreResult<T> = Result<T, ScoreError>;

/// A request in flight, polled once per frame
#[derive(Debug)]
pub struct PendingRequest<T> {
    rx: Receiver<ScoreResult<T>>,
    elapsed: f32,
    timeout: f32,
}

impl<T> PendingRequest<T> {
    /// Create a request and the sender its responder completes it with
    pub fn channel() -> (Sender<ScoreResult<T>>, Self) {
        Self::with_timeout(SCORE_REQUEST_TIMEOUT)
    }

    pub fn with_timeout(timeout: f32) -> (Sender<ScoreResult<T>>, Self) {
        let (tx, rx) = mpsc::channel();
        (
            tx,
            Self {
                rx,
                elapsed: 0.0,
                timeout,
            },
        )
    }

    /// A request that is already answered
    pub fn ready(result: ScoreResult<T>) -> Self {
        let (tx, pending) = Self::channel();
        // Receiver is alive, so the send cannot fail
        let _ = tx.send(result);
        pending
    }

    /// Check for completion after `dt` more seconds of waiting
    pub fn poll(&mut self, dt: f32) -> Option<ScoreResult<T>> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Disconnected) => Some(Err(ScoreError::Unreachable(
                "responder dropped".to_string(),
            ))),
            Err(TryRecvError::Empty) => {
                self.elapsed += dt;
                if self.elapsed >= self.timeout {
                    Some(Err(ScoreError::TimedOut {
                        after: self.elapsed,
                    }))
                } else {
                    None
                }
            }
        }
    }
}

/// Remote (or local) leaderboard
pub trait ScoreService {
    /// Submit a score; must return immediately
    fn submit(&mut self, entry: ScoreSubmission) -> PendingRequest<SubmitReceipt>;

    /// Fetch the best `limit` scores, best first; must return immediately
    fn fetch_top(&mut self, limit: usize) -> PendingRequest<Vec<RankedScore>>;
}

/// A single high score entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub player_name: String,
    /// Player's score
    pub score: u64,
    /// Level reached
    pub level: u32,
}

/// In-process high score leaderboard
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Restore a leaderboard saved with [`HighScores::to_json`]
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut scores: HighScores = serde_json::from_str(json)?;
        scores.entries.sort_by(|a, b| b.score.cmp(&a.score));
        scores.entries.truncate(MAX_HIGH_SCORES);
        log::info!("Loaded {} high scores", scores.entries.len());
        Ok(scores)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Check if score beats the lowest entry
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Get the rank a score would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Add a new score to the leaderboard (if it qualifies)
    /// Returns the rank achieved (1-indexed) or None if didn't qualify
    pub fn add_score(&mut self, player_name: &str, score: u64, level: u32) -> Option<usize> {
        let rank = self.potential_rank(score)?;
        self.entries.insert(
            rank - 1,
            HighScoreEntry {
                player_name: player_name.to_string(),
                score,
                level,
            },
        );
        self.entries.truncate(MAX_HIGH_SCORES);
        Some(rank)
    }

    /// Leaderboard rows, best first
    pub fn top(&self, limit: usize) -> Vec<RankedScore> {
        self.entries
            .iter()
            .take(limit)
            .enumerate()
            .map(|(i, e)| RankedScore {
                rank: i + 1,
                player_name: e.player_name.clone(),
                score: e.score,
                level: e.level,
            })
            .collect()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }
}

impl ScoreService for HighScores {
    fn submit(&mut self, entry: ScoreSubmission) -> PendingRequest<SubmitReceipt> {
        let rank = self.add_score(&entry.player_name, entry.score, entry.level);
        PendingRequest::ready(Ok(SubmitReceipt {
            success: true,
            rank,
        }))
    }

    fn fetch_top(&mut self, limit: usize) -> PendingRequest<Vec<RankedScore>> {
        PendingRequest::ready(Ok(self.top(limit)))
    }
}
