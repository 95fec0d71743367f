use serenity::all::UserId;

use crate::bot::error::RoleMutationError;

/// Why a moderation action did not fully go through for one user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// Voluntary mute refused because a mute is already running
    AlreadyMuted,
    /// Blacklist toggle that would not change anything
    AlreadyInRequestedState { blacklisted: bool },
    /// Mute recorded, but the guild has no role to hand out
    NoMuteRole,
    /// Mute recorded, but the role could not be applied
    RoleMutation(RoleMutationError),
    StorageUnavailable(String),
}

impl Rejection {
    pub fn reason(&self) -> String {
        match self {
            Rejection::AlreadyMuted => "User is already muted.".to_string(),
            Rejection::AlreadyInRequestedState { blacklisted: true } => {
                "User is already blacklisted.".to_string()
            }
            Rejection::AlreadyInRequestedState { blacklisted: false } => {
                "User is not blacklisted.".to_string()
            }
            Rejection::NoMuteRole => "No mute role is configured for this server.".to_string(),
            Rejection::RoleMutation(error) => error.to_string(),
            Rejection::StorageUnavailable(_) => "Couldn't save that to my database.".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetOutcome {
    pub user_id: UserId,
    pub result: Result<(), Rejection>,
}

impl TargetOutcome {
    pub fn success(user_id: UserId) -> Self {
        Self {
            user_id,
            result: Ok(()),
        }
    }

    pub fn failure(user_id: UserId, rejection: Rejection) -> Self {
        Self {
            user_id,
            result: Err(rejection),
        }
    }

    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// What a batch looked like, which decides the wording of the reply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchShape {
    SingleSuccess,
    SingleFailure,
    AllSucceeded,
    PartialFailure,
}

/// Per-target outcomes, in the order the targets were given
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    outcomes: Vec<TargetOutcome>,
}

impl BatchOutcome {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, outcome: TargetOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn outcomes(&self) -> &[TargetOutcome] {
        &self.outcomes
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn succeeded(&self) -> Vec<UserId> {
        self.outcomes
            .iter()
            .filter(|o| o.is_success())
            .map(|o| o.user_id)
            .collect()
    }

    pub fn failed(&self) -> Vec<UserId> {
        self.outcomes
            .iter()
            .filter(|o| !o.is_success())
            .map(|o| o.user_id)
            .collect()
    }

    /// `None` for an empty batch
    pub fn shape(&self) -> Option<BatchShape> {
        let failures = self.outcomes.iter().filter(|o| !o.is_success()).count();
        match (self.outcomes.len(), failures) {
            (0, _) => None,
            (1, 0) => Some(BatchShape::SingleSuccess),
            (1, _) => Some(BatchShape::SingleFailure),
            (_, 0) => Some(BatchShape::AllSucceeded),
            _ => Some(BatchShape::PartialFailure),
        }
    }
}

impl FromIterator<TargetOutcome> for BatchOutcome {
    fn from_iter<I: IntoIterator<Item = TargetOutcome>>(iter: I) -> Self {
        Self {
            outcomes: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(id: u64) -> TargetOutcome {
        TargetOutcome::success(UserId::new(id))
    }

    fn failed(id: u64) -> TargetOutcome {
        TargetOutcome::failure(UserId::new(id), Rejection::AlreadyMuted)
    }

    #[test]
    fn test_shapes() {
        assert_eq!(BatchOutcome::new().shape(), None);
        assert_eq!(BatchOutcome::from_iter([ok(1)]).shape(), Some(BatchShape::SingleSuccess));
        assert_eq!(BatchOutcome::from_iter([failed(1)]).shape(), Some(BatchShape::SingleFailure));
        assert_eq!(
            BatchOutcome::from_iter([ok(1), ok(2)]).shape(),
            Some(BatchShape::AllSucceeded)
        );
        assert_eq!(
            BatchOutcome::from_iter([ok(1), failed(2)]).shape(),
            Some(BatchShape::PartialFailure)
        );
        assert_eq!(
            BatchOutcome::from_iter([failed(1), failed(2)]).shape(),
            Some(BatchShape::PartialFailure)
        );
    }

    #[test]
    fn test_success_and_failure_lists_keep_order() {
        let batch = BatchOutcome::from_iter([failed(3), ok(1), failed(2), ok(4)]);
        assert_eq!(batch.succeeded(), vec![UserId::new(1), UserId::new(4)]);
        assert_eq!(batch.failed(), vec![UserId::new(3), UserId::new(2)]);
    }

    #[test]
    fn test_role_failure_reasons() {
        assert_eq!(
            Rejection::RoleMutation(RoleMutationError::Forbidden).reason(),
            "Lacking permissions to change role."
        );
        assert_eq!(
            Rejection::RoleMutation(RoleMutationError::Network("timeout".into())).reason(),
            "Error connecting to discord."
        );
    }
}
