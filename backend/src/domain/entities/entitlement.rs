use super::enrollment::CourseEnrollment;
use crate::domain::error::DomainError;
use crate::domain::value_objects::*;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle position of an entitlement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntitlementState {
    ActiveUnredeemed,
    ActiveRedeemed,
    Revoked,
}

/// A purchased right to enroll in one course at a given mode.
///
/// `expired_at` only ever moves from `None` to `Some`, and an attached
/// enrollment can only be detached once the entitlement is expired.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entitlement {
    uuid: Uuid,
    owner: UserId,
    course_uuid: Uuid,
    mode: CourseMode,
    order_number: OrderNumber,
    created_at: DateTime<Utc>,
    expired_at: Option<DateTime<Utc>>,
    enrollment: Option<CourseEnrollment>,
}

impl Entitlement {
    pub fn new(owner: UserId, course_uuid: Uuid, mode: CourseMode, order_number: OrderNumber) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            owner,
            course_uuid,
            mode,
            order_number,
            created_at: Utc::now(),
            expired_at: None,
            enrollment: None,
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn from_persistence(
        uuid: Uuid,
        owner: UserId,
        course_uuid: Uuid,
        mode: CourseMode,
        order_number: OrderNumber,
        created_at: DateTime<Utc>,
        expired_at: Option<DateTime<Utc>>,
        enrollment: Option<CourseEnrollment>,
    ) -> Self {
        Self {
            uuid,
            owner,
            course_uuid,
            mode,
            order_number,
            created_at,
            expired_at,
            enrollment,
        }
    }

    pub fn uuid(&self) -> &Uuid {
        &self.uuid
    }

    pub fn owner(&self) -> &UserId {
        &self.owner
    }

    pub fn course_uuid(&self) -> &Uuid {
        &self.course_uuid
    }

    pub fn mode(&self) -> &CourseMode {
        &self.mode
    }

    pub fn order_number(&self) -> &OrderNumber {
        &self.order_number
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn expired_at(&self) -> Option<DateTime<Utc>> {
        self.expired_at
    }

    pub fn enrollment(&self) -> Option<&CourseEnrollment> {
        self.enrollment.as_ref()
    }

    pub fn state(&self) -> EntitlementState {
        match (self.expired_at, &self.enrollment) {
            (Some(_), _) => EntitlementState::Revoked,
            (None, Some(_)) => EntitlementState::ActiveRedeemed,
            (None, None) => EntitlementState::ActiveUnredeemed,
        }
    }

    pub fn is_active(&self) -> bool {
        self.expired_at.is_none()
    }

    /// Bind the entitlement to a course-run enrollment.
    pub fn redeem(&mut self, enrollment: CourseEnrollment) -> Result<(), DomainError> {
        if !self.is_active() {
            return Err(DomainError::validation("entitlement", "Entitlement has been revoked"));
        }
        if self.enrollment.is_some() {
            return Err(DomainError::validation("entitlement", "Entitlement is already redeemed"));
        }
        self.enrollment = Some(enrollment);
        Ok(())
    }

    /// Stamp `expired_at` unless already set. Returns whether anything changed.
    pub fn expire(&mut self, at: DateTime<Utc>) -> bool {
        if self.expired_at.is_some() {
            return false;
        }
        self.expired_at = Some(at);
        true
    }

    /// Remove the enrollment binding of an expired entitlement.
    ///
    /// Active entitlements keep their enrollment and `None` is returned.
    pub fn detach_enrollment(&mut self) -> Option<CourseEnrollment> {
        if self.is_active() {
            return None;
        }
        self.enrollment.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sample() -> Entitlement {
        Entitlement::new(
            UserId::new(),
            Uuid::new_v4(),
            CourseMode::new(CourseMode::VERIFIED).unwrap(),
            OrderNumber::new("EDX-1001").unwrap(),
        )
    }

    fn enrollment(run: &str) -> CourseEnrollment {
        CourseEnrollment::new(Uuid::new_v4(), CourseRunId::new(run).unwrap())
    }

    #[test]
    fn test_new_entitlement_is_active_and_unredeemed() {
        let e = sample();
        assert_eq!(e.state(), EntitlementState::ActiveUnredeemed);
        assert!(e.expired_at().is_none());
        assert!(e.enrollment().is_none());
        assert!(e.created_at() <= Utc::now());
    }

    #[test]
    fn test_expire_stamps_only_once() {
        let mut e = sample();
        let first = Utc::now();
        assert!(e.expire(first));
        assert!(!e.expire(first + chrono::Duration::hours(1)));
        assert_eq!(e.expired_at(), Some(first));
        assert_eq!(e.state(), EntitlementState::Revoked);
    }

    #[test]
    fn test_enrollment_cannot_be_detached_while_active() {
        let mut e = sample();
        e.redeem(enrollment("course-v1:TestX+TS101+T1")).unwrap();
        assert_eq!(e.state(), EntitlementState::ActiveRedeemed);
        assert!(e.detach_enrollment().is_none());
        assert!(e.enrollment().is_some());

        e.expire(Utc::now());
        let detached = e.detach_enrollment().unwrap();
        assert_eq!(detached.course_run_id.as_str(), "course-v1:TestX+TS101+T1");
        assert!(e.enrollment().is_none());
    }

    #[test]
    fn test_redeem_rejects_revoked_or_redeemed() {
        let mut e = sample();
        e.redeem(enrollment("run-a")).unwrap();
        let err = e.redeem(enrollment("run-b")).unwrap_err();
        assert!(matches!(err, DomainError::Validation { .. }));

        let mut revoked = sample();
        revoked.expire(Utc::now());
        assert!(revoked.redeem(enrollment("run-a")).is_err());
    }

    #[derive(Debug, Clone)]
    enum Op {
        Expire(i64),
        Redeem,
        Detach,
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0i64..10_000).prop_map(Op::Expire),
            Just(Op::Redeem),
            Just(Op::Detach),
        ]
    }

    proptest! {
        #[test]
        fn prop_expiry_is_monotonic_and_enrollment_only_cleared_when_revoked(ops in prop::collection::vec(op(), 0..20)) {
            let mut e = sample();
            let base = Utc::now();
            let mut first_expiry = None;

            for op in ops {
                let had_enrollment = e.enrollment().is_some();
                match op {
                    Op::Expire(secs) => {
                        e.expire(base + chrono::Duration::seconds(secs));
                    }
                    Op::Redeem => {
                        let _ = e.redeem(enrollment("run"));
                    }
                    Op::Detach => {
                        e.detach_enrollment();
                    }
                }

                if let Some(first) = first_expiry {
                    prop_assert_eq!(e.expired_at(), Some(first));
                } else {
                    first_expiry = e.expired_at();
                }
                if had_enrollment && e.enrollment().is_none() {
                    prop_assert!(e.expired_at().is_some());
                }
            }
        }
    }
}
