use crate::application::ports::{EntitlementRepository, UserRepository};
use crate::domain::entities::Entitlement;
use crate::domain::error::{DomainError, FieldError};
use crate::domain::value_objects::{CourseMode, OrderNumber};
use uuid::Uuid;

/// Raw create input. Fields stay optional so every missing one is reported.
#[derive(Debug, Clone, Default)]
pub struct CreateEntitlementCommand {
    pub user: Option<String>,
    pub course_uuid: Option<String>,
    pub mode: Option<String>,
    pub order_number: Option<String>,
}

fn required(errors: &mut Vec<FieldError>, field: &str, value: Option<String>) -> Option<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Some(v),
        _ => {
            errors.push(FieldError::required(field));
            None
        }
    }
}

pub async fn execute<R, U>(
    repo: &R,
    users: &U,
    cmd: CreateEntitlementCommand,
) -> Result<Entitlement, DomainError>
where
    R: EntitlementRepository + ?Sized,
    U: UserRepository + ?Sized,
{
    let mut errors = Vec::new();
    let username = required(&mut errors, "user", cmd.user);
    let course_uuid = required(&mut errors, "course_uuid", cmd.course_uuid).and_then(|raw| {
        Uuid::parse_str(raw.trim())
            .map_err(|_| errors.push(FieldError::new("course_uuid", "Must be a valid UUID.")))
            .ok()
    });
    let mode = required(&mut errors, "mode", cmd.mode)
        .and_then(|raw| CourseMode::new(raw).map_err(|e| errors.push(FieldError::new("mode", e))).ok());
    let order_number = required(&mut errors, "order_number", cmd.order_number).and_then(|raw| {
        OrderNumber::new(raw)
            .map_err(|e| errors.push(FieldError::new("order_number", e)))
            .ok()
    });

    let owner = match username {
        Some(username) => {
            let user = users
                .find_by_username(username.trim())
                .await
                .map_err(DomainError::storage)?;
            if user.is_none() {
                errors.push(FieldError::new(
                    "user",
                    format!("Object with username={} does not exist.", username.trim()),
                ));
            }
            user
        }
        None => None,
    };

    match (owner, course_uuid, mode, order_number) {
        (Some(owner), Some(course_uuid), Some(mode), Some(order_number)) if errors.is_empty() => {
            let entitlement = Entitlement::new(*owner.id(), course_uuid, mode, order_number);
            repo.save(&entitlement).await.map_err(DomainError::storage)?;
            tracing::info!(
                entitlement = %entitlement.uuid(),
                user = owner.username(),
                course_uuid = %course_uuid,
                "Created course entitlement"
            );
            Ok(entitlement)
        }
        _ => Err(DomainError::Validation { fields: errors }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::entitlement_repository::MockEntitlementRepository;
    use crate::domain::entities::User;
    use crate::domain::value_objects::Email;
    use crate::infrastructure::driven::persistence::{InMemoryEntitlementRepository, InMemoryUserRepository};

    fn bob() -> User {
        User::new("bob", Email::new("bob@example.com".to_string()).unwrap())
    }

    fn full_command(course_uuid: &Uuid) -> CreateEntitlementCommand {
        CreateEntitlementCommand {
            user: Some("bob".to_string()),
            course_uuid: Some(course_uuid.to_string()),
            mode: Some("verified".to_string()),
            order_number: Some("EDX-1001".to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_echoes_input_and_starts_active() {
        let repo = InMemoryEntitlementRepository::new();
        let user = bob();
        let users = InMemoryUserRepository::with_users(vec![user.clone()]);
        let course_uuid = Uuid::new_v4();

        let created = execute(&repo, &users, full_command(&course_uuid)).await.unwrap();

        assert_eq!(created.owner(), user.id());
        assert_eq!(created.course_uuid(), &course_uuid);
        assert_eq!(created.mode().as_str(), "verified");
        assert_eq!(created.order_number().as_str(), "EDX-1001");
        assert!(created.expired_at().is_none());
        assert!(created.enrollment().is_none());

        let stored = repo.find_by_id(created.uuid()).await.unwrap().unwrap();
        assert_eq!(stored, created);
    }

    #[tokio::test]
    async fn test_missing_fields_are_all_reported_without_writing() {
        let mut repo = MockEntitlementRepository::new();
        repo.expect_save().times(0);
        let users = InMemoryUserRepository::with_users(vec![bob()]);

        let cmd = CreateEntitlementCommand {
            mode: None,
            course_uuid: None,
            ..full_command(&Uuid::new_v4())
        };
        let err = execute(&repo, &users, cmd).await.unwrap_err();

        assert_eq!(err.invalid_fields(), vec!["course_uuid", "mode"]);
    }

    #[tokio::test]
    async fn test_blank_and_malformed_values_are_rejected() {
        let mut repo = MockEntitlementRepository::new();
        repo.expect_save().times(0);
        let users = InMemoryUserRepository::with_users(vec![bob()]);

        let cmd = CreateEntitlementCommand {
            course_uuid: Some("not-a-uuid".to_string()),
            order_number: Some("   ".to_string()),
            ..full_command(&Uuid::new_v4())
        };
        let err = execute(&repo, &users, cmd).await.unwrap_err();

        assert_eq!(err.invalid_fields(), vec!["course_uuid", "order_number"]);
    }

    #[tokio::test]
    async fn test_unknown_user_is_a_validation_error() {
        let mut repo = MockEntitlementRepository::new();
        repo.expect_save().times(0);
        let users = InMemoryUserRepository::new();

        let err = execute(&repo, &users, full_command(&Uuid::new_v4())).await.unwrap_err();

        assert_eq!(err.invalid_fields(), vec!["user"]);
    }

    #[tokio::test]
    async fn test_store_failure_surfaces_as_storage_error() {
        let mut repo = MockEntitlementRepository::new();
        repo.expect_save()
            .times(1)
            .returning(|_| Err(anyhow::anyhow!("database is locked")));
        let users = InMemoryUserRepository::with_users(vec![bob()]);

        let err = execute(&repo, &users, full_command(&Uuid::new_v4())).await.unwrap_err();

        assert!(matches!(err, DomainError::Storage(msg) if msg.contains("locked")));
    }
}
