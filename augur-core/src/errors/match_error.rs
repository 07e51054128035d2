/// Errors from the pattern matcher.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatchError {
    /// No admin pattern matches the history suffix. Insufficient pattern
    /// coverage, not a bug; the caller refuses the prediction rather than
    /// fabricating a guess.
    #[error("no pattern matches the recent results")]
    NoMatch,
}
