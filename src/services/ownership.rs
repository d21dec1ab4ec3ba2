/*
 * Responsibility
 * - リソースの所有者と認証済み主体の照合
 * - read/update/delete で同一の判定を使う (create には適用しない)
 */
use uuid::Uuid;

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ownership {
    Owner,
    NotOwner,
}

/// Compare a resource's recorded owner against the authenticated identity.
pub fn check(owner: Uuid, requester: Uuid) -> Ownership {
    if owner == requester {
        Ownership::Owner
    } else {
        Ownership::NotOwner
    }
}

/// Guard for handlers: deny becomes `Forbidden` before any mutation happens.
pub fn ensure_owner(owner: Uuid, requester: Uuid) -> Result<(), AppError> {
    match check(owner, requester) {
        Ownership::Owner => Ok(()),
        Ownership::NotOwner => Err(AppError::Forbidden),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_passes() {
        let id = Uuid::new_v4();
        assert_eq!(check(id, id), Ownership::Owner);
        assert!(ensure_owner(id, id).is_ok());
    }

    #[test]
    fn non_owner_is_forbidden() {
        let owner = Uuid::new_v4();
        let other = Uuid::new_v4();
        assert_eq!(check(owner, other), Ownership::NotOwner);
        assert!(matches!(
            ensure_owner(owner, other),
            Err(AppError::Forbidden)
        ));
    }
}
