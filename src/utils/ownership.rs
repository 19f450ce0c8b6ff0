use anyhow::anyhow;
use carrera_core::AppError;
use carrera_models::ids::UserId;

/// Resolves access to a resource looked up by id.
///
/// `owner` is the owner found in the database, `None` when the id does not
/// exist. A missing resource is 404 and another user's resource is 403.
pub fn ensure_owner(owner: Option<UserId>, user_id: UserId, resource: &str) -> Result<(), AppError> {
    match owner {
        None => Err(AppError::not_found(anyhow!("{resource} not found"))),
        Some(owner) if owner != user_id => Err(AppError::forbidden(format!(
            "{resource} belongs to another user"
        ))),
        Some(_) => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_missing_is_not_found() {
        let err = ensure_owner(None, UserId::from_u128(1), "Subject").unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.message(), "Subject not found");
    }

    #[test]
    fn test_other_owner_is_forbidden() {
        let err = ensure_owner(Some(UserId::from_u128(2)), UserId::from_u128(1), "Evaluation")
            .unwrap_err();
        assert_eq!(err.status, StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_owner_passes() {
        let me = UserId::from_u128(1);
        assert!(ensure_owner(Some(me), me, "Subject").is_ok());
    }
}
