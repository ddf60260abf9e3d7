pub mod user_id;
pub mod email;
pub mod course_mode;
pub mod order_number;
pub mod course_run_id;

pub use user_id::UserId;
pub use email::Email;
pub use course_mode::CourseMode;
pub use order_number::OrderNumber;
pub use course_run_id::CourseRunId;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_values_are_rejected() {
        assert!(CourseMode::new("   ").is_err());
        assert!(OrderNumber::new("").is_err());
        assert!(CourseRunId::new(" ").is_err());
        assert!(Email::new("no-at-sign".to_string()).is_err());
    }

    #[test]
    fn test_values_are_trimmed_and_normalised() {
        assert_eq!(CourseMode::new(" verified ").unwrap().as_str(), CourseMode::VERIFIED);
        assert_eq!(OrderNumber::new("EDX-1001\n").unwrap().as_str(), "EDX-1001");
        assert_eq!(Email::new("Bob@Example.com".to_string()).unwrap().as_str(), "bob@example.com");
    }

    #[test]
    fn test_user_id_parses_from_string() {
        let id = UserId::new();
        let parsed: UserId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
        assert!("not-a-uuid".parse::<UserId>().is_err());
    }
}
