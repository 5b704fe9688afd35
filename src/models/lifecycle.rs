// veche-client/src/models/lifecycle.rs
use super::{Party, PartyScoped, Vote, VoteValue};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Minimum trimmed length of the argument that must accompany a DISAGREE vote
/// while a discussion is in `VOTING`.
pub const MIN_ARGUMENT_LEN: usize = 10;

/// Lifecycle status shared by discussions and voting sessions.
///
/// The canonical order is `WAITING → VOTING → FINAL_VOTING → RESOLVED → ARCHIVED`,
/// but status changes are issued explicitly and may jump anywhere.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    #[display(fmt = "WAITING")]
    Waiting,
    #[display(fmt = "VOTING")]
    Voting,
    #[display(fmt = "FINAL_VOTING")]
    FinalVoting,
    #[display(fmt = "RESOLVED")]
    Resolved,
    #[display(fmt = "ARCHIVED")]
    Archived,
}

impl Status {
    pub const ORDER: [Status; 5] = [
        Status::Waiting,
        Status::Voting,
        Status::FinalVoting,
        Status::Resolved,
        Status::Archived,
    ];

    // Path segment of the transition endpoint, e.g. `/discussions/{id}/final-voting`
    pub fn transition_segment(&self) -> &'static str {
        match self {
            Status::Waiting => "wait",
            Status::Voting => "voting",
            Status::FinalVoting => "final-voting",
            Status::Resolved => "resolve",
            Status::Archived => "archive",
        }
    }

    // Accepts the wire name (`final_voting`, `FINAL-VOTING`) or the path segment (`resolve`)
    pub fn parse(value: &str) -> Option<Status> {
        let value = value.trim();
        let normalized = value.to_ascii_uppercase().replace('-', "_");
        Status::ORDER
            .iter()
            .copied()
            .find(|s| s.to_string() == normalized || s.transition_segment().eq_ignore_ascii_case(value))
    }

    pub fn next(&self) -> Option<Status> {
        match self {
            Status::Waiting => Some(Status::Voting),
            Status::Voting => Some(Status::FinalVoting),
            Status::FinalVoting => Some(Status::Resolved),
            Status::Resolved => Some(Status::Archived),
            Status::Archived => None,
        }
    }

    /// True when `to` is `from` itself or its immediate successor.
    pub fn is_canonical_transition(from: Status, to: Status) -> bool {
        from == to || from.next() == Some(to)
    }

    pub fn accepts_comments(&self) -> bool {
        matches!(self, Status::Waiting | Status::Resolved)
    }

    pub fn accepts_votes(&self) -> bool {
        matches!(self, Status::Voting | Status::FinalVoting)
    }

    pub fn requires_vote_argument(&self, value: VoteValue) -> bool {
        *self == Status::Voting && value == VoteValue::Disagree
    }

    pub fn is_read_only(&self) -> bool {
        *self == Status::Archived
    }

    pub fn is_terminal(&self) -> bool {
        self.next().is_none()
    }

    // Sections listing these statuses start expanded
    pub fn expanded_by_default(&self) -> bool {
        matches!(self, Status::Waiting | Status::Voting | Status::FinalVoting)
    }
}

// A vote that passed the participation rules
#[derive(Debug, Clone, PartialEq)]
pub struct VoteSubmission {
    pub value: VoteValue,
    pub argument: Option<String>,
}

pub fn check_vote(
    status: Status,
    value: VoteValue,
    argument: Option<&str>,
) -> Result<VoteSubmission, String> {
    if !status.accepts_votes() {
        return Err(format!("Voting is not open while the discussion is {}", status));
    }

    let argument = argument
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .map(str::to_string);

    if status.requires_vote_argument(value) {
        let len = argument.as_deref().map_or(0, |a| a.chars().count());
        if len < MIN_ARGUMENT_LEN {
            return Err(format!(
                "{} more characters needed.",
                MIN_ARGUMENT_LEN - len
            ));
        }
    }

    Ok(VoteSubmission { value, argument })
}

pub fn check_comment(status: Status, content: &str) -> Result<String, String> {
    if !status.accepts_comments() {
        return Err(format!("Comments are closed while the discussion is {}", status));
    }

    let content = content.trim();
    if content.is_empty() {
        return Err("Comment cannot be empty".to_string());
    }

    Ok(content.to_string())
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VoteTally {
    pub agree: usize,
    pub disagree: usize,
}

impl VoteTally {
    pub fn from_votes(votes: &[Vote]) -> Self {
        votes.iter().fold(VoteTally::default(), |mut tally, vote| {
            match vote.vote_value {
                VoteValue::Agree => tally.agree += 1,
                VoteValue::Disagree => tally.disagree += 1,
            }
            tally
        })
    }

    pub fn total(&self) -> usize {
        self.agree + self.disagree
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusGroup<'a, T> {
    pub status: Status,
    pub items: Vec<&'a T>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PartyGroup<'a, T> {
    pub party_id: Uuid,
    pub party_name: String,
    pub statuses: Vec<StatusGroup<'a, T>>,
}

/// Groups items by owning party (in first-seen order), then by status in
/// canonical order. Status buckets without items are left out.
pub fn group_by_party_and_status<T: PartyScoped>(items: &[T]) -> Vec<PartyGroup<'_, T>> {
    let mut parties: Vec<(&Party, Vec<&T>)> = Vec::new();

    for item in items {
        match parties.iter_mut().find(|(p, _)| p.id == item.party().id) {
            Some((_, members)) => members.push(item),
            None => parties.push((item.party(), vec![item])),
        }
    }

    parties
        .into_iter()
        .map(|(party, members)| PartyGroup {
            party_id: party.id,
            party_name: party.name.clone(),
            statuses: Status::ORDER
                .iter()
                .map(|status| StatusGroup {
                    status: *status,
                    items: members
                        .iter()
                        .copied()
                        .filter(|m| m.status() == *status)
                        .collect(),
                })
                .filter(|group| !group.items.is_empty())
                .collect(),
        })
        .collect()
}
