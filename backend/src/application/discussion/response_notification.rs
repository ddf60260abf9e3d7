use std::sync::Arc;

use serde_json::{Map, Value};

use crate::application::ports::{CourseCatalog, Message, MessageSender, Recipient, SubscriptionService, UserRepository};
use crate::domain::error::DomainError;
use crate::domain::events::CommentCreated;

pub const RESPONSE_NOTIFICATION: &str = "response_notification";

#[derive(Debug, Clone)]
pub struct NotificationSettings {
    pub enabled: bool,
    pub default_language: String,
    pub site_name: String,
    pub platform_name: String,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            default_language: "en".to_string(),
            site_name: "localhost".to_string(),
            platform_name: "Open edX".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationOutcome {
    Disabled,
    NotSubscribed,
    Sent,
}

/// Emails a thread author when someone responds to a thread they follow
pub struct ResponseNotificationHandler {
    subscriptions: Arc<dyn SubscriptionService>,
    users: Arc<dyn UserRepository>,
    catalog: Arc<dyn CourseCatalog>,
    sender: Arc<dyn MessageSender>,
    settings: NotificationSettings,
}

impl ResponseNotificationHandler {
    pub fn new(
        subscriptions: Arc<dyn SubscriptionService>,
        users: Arc<dyn UserRepository>,
        catalog: Arc<dyn CourseCatalog>,
        sender: Arc<dyn MessageSender>,
        settings: NotificationSettings,
    ) -> Self {
        Self {
            subscriptions,
            users,
            catalog,
            sender,
            settings,
        }
    }

    pub async fn handle(&self, event: &CommentCreated) -> Result<NotificationOutcome, DomainError> {
        if !self.settings.enabled {
            tracing::debug!(thread = %event.thread.id, "Forum response notifications disabled");
            return Ok(NotificationOutcome::Disabled);
        }

        let thread = &event.thread;
        let subscribed = self
            .subscriptions
            .is_subscribed_to_thread(&thread.author_id, &thread.course_id, &thread.id)
            .await
            .map_err(DomainError::collaborator)?;
        if !subscribed {
            return Ok(NotificationOutcome::NotSubscribed);
        }

        let author = self
            .users
            .find_by_id(&thread.author_id)
            .await
            .map_err(DomainError::storage)?
            .ok_or_else(|| DomainError::not_found("User", thread.author_id))?;

        let language = self.course_language(&thread.course_id).await?;
        let message = Message {
            name: RESPONSE_NOTIFICATION.to_string(),
            recipient: Recipient {
                username: author.username().to_string(),
                email: author.email().clone(),
            },
            language,
            context: build_message_context(&self.settings, event),
        };

        let context = Value::Object(message.context.clone());
        tracing::info!(
            "Sending forum comment email for thread {} with context {}",
            thread.id,
            context
        );
        self.sender
            .send(&message)
            .await
            .map_err(DomainError::collaborator)?;

        Ok(NotificationOutcome::Sent)
    }

    async fn course_language(&self, course_id: &str) -> Result<String, DomainError> {
        let language = self
            .catalog
            .language_for(course_id)
            .await
            .map_err(DomainError::storage)?;
        Ok(language
            .filter(|l| !l.trim().is_empty())
            .unwrap_or_else(|| self.settings.default_language.clone()))
    }
}

fn build_message_context(settings: &NotificationSettings, event: &CommentCreated) -> Map<String, Value> {
    let comment = &event.comment;
    let thread = &event.thread;
    let mut context = Map::new();

    context.insert("site_name".into(), Value::from(settings.site_name.as_str()));
    context.insert("platform_name".into(), Value::from(settings.platform_name.as_str()));

    context.insert("comment_author_id".into(), Value::from(comment.author_id.to_string()));
    context.insert("comment_body".into(), Value::from(comment.body.as_str()));
    context.insert("comment_created_at".into(), Value::from(comment.created_at.to_rfc3339()));
    context.insert("comment_id".into(), Value::from(comment.id.as_str()));
    context.insert("comment_username".into(), Value::from(comment.author_username.as_str()));
    context.insert("course_id".into(), Value::from(thread.course_id.as_str()));
    context.insert("thread_author_id".into(), Value::from(thread.author_id.to_string()));
    context.insert("thread_created_at".into(), Value::from(thread.created_at.to_rfc3339()));
    context.insert("thread_id".into(), Value::from(thread.id.as_str()));
    context.insert("thread_title".into(), Value::from(thread.title.as_str()));
    context.insert("thread_username".into(), Value::from(thread.author_username.as_str()));

    // Not linkable yet: the forum UI has no stable per-post URL.
    context.insert("post_link".into(), Value::Null);
    context.insert("unsubscribe_link".into(), Value::Null);

    context
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::course_catalog::MockCourseCatalog;
    use crate::application::ports::message_sender::MockMessageSender;
    use crate::application::ports::subscription_service::MockSubscriptionService;
    use crate::domain::entities::User;
    use crate::domain::events::{Comment, Thread};
    use crate::domain::value_objects::Email;
    use crate::infrastructure::driven::persistence::InMemoryUserRepository;
    use chrono::{Duration, Utc};
    use std::sync::Mutex;

    fn thread_author() -> User {
        User::new("thread_author", Email::new("author@example.com".to_string()).unwrap())
    }

    fn event(author: &User) -> CommentCreated {
        let now = Utc::now();
        let commenter = User::new("comment_author", Email::new("commenter@example.com".to_string()).unwrap());
        CommentCreated {
            comment: Comment {
                id: "comment-id".to_string(),
                body: "comment-body".to_string(),
                created_at: now,
                author_id: *commenter.id(),
                author_username: commenter.username().to_string(),
            },
            thread: Thread {
                id: "dummy_discussion_id".to_string(),
                course_id: "course-v1:TestX+TS101+T1".to_string(),
                created_at: now - Duration::hours(1),
                title: "thread-title".to_string(),
                author_id: *author.id(),
                author_username: author.username().to_string(),
            },
        }
    }

    fn subscriptions(subscribed: bool) -> MockSubscriptionService {
        let mut mock = MockSubscriptionService::new();
        mock.expect_is_subscribed_to_thread()
            .withf(|_, course, thread| course == "course-v1:TestX+TS101+T1" && thread == "dummy_discussion_id")
            .times(1)
            .returning(move |_, _, _| Ok(subscribed));
        mock
    }

    fn catalog(language: Option<&'static str>) -> MockCourseCatalog {
        let mut mock = MockCourseCatalog::new();
        mock.expect_language_for()
            .returning(move |_| Ok(language.map(str::to_string)));
        mock
    }

    fn handler(
        subscriptions: MockSubscriptionService,
        author: &User,
        catalog: MockCourseCatalog,
        sender: MockMessageSender,
        settings: NotificationSettings,
    ) -> ResponseNotificationHandler {
        ResponseNotificationHandler::new(
            Arc::new(subscriptions),
            Arc::new(InMemoryUserRepository::with_users(vec![author.clone()])),
            Arc::new(catalog),
            Arc::new(sender),
            settings,
        )
    }

    #[tokio::test]
    async fn test_subscribed_author_receives_notification() {
        let author = thread_author();
        let sent: Arc<Mutex<Vec<Message>>> = Arc::default();
        let captured = sent.clone();
        let mut sender = MockMessageSender::new();
        sender.expect_send().times(1).returning(move |m| {
            captured.lock().unwrap().push(m.clone());
            Ok(())
        });

        let event = event(&author);
        let outcome = handler(subscriptions(true), &author, catalog(Some("fr")), sender, NotificationSettings::default())
            .handle(&event)
            .await
            .unwrap();

        assert_eq!(outcome, NotificationOutcome::Sent);
        let sent = sent.lock().unwrap();
        let message = &sent[0];
        assert_eq!(message.name, RESPONSE_NOTIFICATION);
        assert_eq!(message.recipient.username, "thread_author");
        assert_eq!(message.recipient.email.as_str(), "author@example.com");
        assert_eq!(message.language, "fr");
        assert_eq!(message.context["comment_body"], "comment-body");
        assert_eq!(message.context["thread_title"], "thread-title");
        assert_eq!(message.context["thread_id"], "dummy_discussion_id");
        assert_eq!(message.context["comment_username"], "comment_author");
        assert_eq!(message.context["course_id"], "course-v1:TestX+TS101+T1");
        assert_eq!(message.context["site_name"], "localhost");
        assert!(message.context["post_link"].is_null());
        assert!(message.context["unsubscribe_link"].is_null());
    }

    #[tokio::test]
    async fn test_unsubscribed_author_is_not_notified() {
        let author = thread_author();
        let mut sender = MockMessageSender::new();
        sender.expect_send().times(0);

        let outcome = handler(subscriptions(false), &author, catalog(Some("fr")), sender, NotificationSettings::default())
            .handle(&event(&author))
            .await
            .unwrap();

        assert_eq!(outcome, NotificationOutcome::NotSubscribed);
    }

    #[tokio::test]
    async fn test_course_without_language_uses_default() {
        let author = thread_author();
        let mut sender = MockMessageSender::new();
        sender
            .expect_send()
            .withf(|m| m.language == "en")
            .times(1)
            .returning(|_| Ok(()));

        let outcome = handler(subscriptions(true), &author, catalog(Some("")), sender, NotificationSettings::default())
            .handle(&event(&author))
            .await
            .unwrap();

        assert_eq!(outcome, NotificationOutcome::Sent);
    }

    #[tokio::test]
    async fn test_disabled_notifications_skip_lookups() {
        let author = thread_author();
        let mut subs = MockSubscriptionService::new();
        subs.expect_is_subscribed_to_thread().times(0);
        let mut sender = MockMessageSender::new();
        sender.expect_send().times(0);
        let settings = NotificationSettings {
            enabled: false,
            ..NotificationSettings::default()
        };

        let outcome = handler(subs, &author, catalog(None), sender, settings)
            .handle(&event(&author))
            .await
            .unwrap();

        assert_eq!(outcome, NotificationOutcome::Disabled);
    }

    #[tokio::test]
    async fn test_subscription_lookup_failure_is_reported() {
        let author = thread_author();
        let mut subs = MockSubscriptionService::new();
        subs.expect_is_subscribed_to_thread()
            .returning(|_, _, _| Err(anyhow::anyhow!("comments service returned 500")));
        let mut sender = MockMessageSender::new();
        sender.expect_send().times(0);

        let err = handler(subs, &author, catalog(None), sender, NotificationSettings::default())
            .handle(&event(&author))
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Collaborator(_)));
    }
}
