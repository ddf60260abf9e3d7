use anyhow::Context;
use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::{AsyncSmtpTransport, AsyncTransport, Tokio1Executor};
use serde_json::Value;
use crate::application::ports::{Message, MessageSender};

fn context_str<'a>(message: &'a Message, key: &str) -> &'a str {
    message.context.get(key).and_then(Value::as_str).unwrap_or_default()
}

pub fn render_subject(message: &Message) -> String {
    match message.name.as_str() {
        "response_notification" => format!("Response to {}", context_str(message, "thread_title")),
        _ => format!("Notification from {}", context_str(message, "platform_name")),
    }
}

/// Plain-text body. Templates per language are owned by the mail service,
/// this is the fallback rendering.
pub fn render_body(message: &Message) -> String {
    format!(
        "Hi {},\n\n{} responded to your post \"{}\":\n\n{}\n\n-- {}\n",
        message.recipient.username,
        context_str(message, "comment_username"),
        context_str(message, "thread_title"),
        context_str(message, "comment_body"),
        context_str(message, "platform_name"),
    )
}

/// Delivers messages through an SMTP relay
pub struct SmtpMessageSender {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMessageSender {
    pub fn new(host: &str, port: u16, from_address: &str) -> anyhow::Result<Self> {
        let from: Mailbox = from_address
            .parse()
            .with_context(|| format!("Invalid from address: {from_address}"))?;
        // Local relay, TLS is terminated by the MTA.
        let transport = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host)
            .port(port)
            .build();
        Ok(Self { transport, from })
    }
}

#[async_trait]
impl MessageSender for SmtpMessageSender {
    async fn send(&self, message: &Message) -> anyhow::Result<()> {
        let to = Mailbox::new(
            Some(message.recipient.username.clone()),
            message
                .recipient
                .email
                .as_str()
                .parse()
                .context("Invalid recipient address")?,
        );
        let email = lettre::Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(render_subject(message))
            .header(ContentType::TEXT_PLAIN)
            .body(render_body(message))
            .context("Failed to build email")?;

        self.transport.send(email).await.context("SMTP delivery failed")?;
        Ok(())
    }
}

/// Logs messages instead of delivering them, for environments without SMTP
pub struct LogMessageSender;

#[async_trait]
impl MessageSender for LogMessageSender {
    async fn send(&self, message: &Message) -> anyhow::Result<()> {
        tracing::info!(
            message = %message.name,
            recipient = %message.recipient.email,
            language = %message.language,
            "Email delivery disabled, message dropped:\n{}",
            render_body(message)
        );
        Ok(())
    }
}
