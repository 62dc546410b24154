use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::info;

use fd_core::{Error, Headline, Result};

/// Subject line for every digest email.
pub const SUBJECT: &str = "Últimas notícias da Folha de S.Paulo";

/// Formats the digest body: one `"<title> - <link>"` line per headline, in
/// the given order.
pub fn format_digest(headlines: &[Headline]) -> String {
    headlines
        .iter()
        .map(|headline| format!("{} - {}", headline.title, headline.link))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Delivery channel for a day's digest.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, headlines: &[Headline]) -> Result<()>;
}

/// SMTP relay, credentials and recipient, read from the environment once at
/// startup.
#[derive(Debug, Clone)]
pub struct MailerConfig {
    pub relay: String,
    pub username: String,
    pub password: String,
    pub recipient: String,
}

impl MailerConfig {
    /// Reads `SMTP_RELAY`, `SMTP_USER`, `SMTP_PASS` and `MAIL_TO`.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            relay: require_env("SMTP_RELAY")?,
            username: require_env("SMTP_USER")?,
            password: require_env("SMTP_PASS")?,
            recipient: require_env("MAIL_TO")?,
        })
    }
}

fn require_env(name: &str) -> Result<String> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(Error::Config(format!("{} must be set", name))),
    }
}

/// Sends the digest over SMTP. A fresh transport is built per call; there is
/// no connection pooling.
pub struct SmtpNotifier {
    config: MailerConfig,
}

impl SmtpNotifier {
    pub fn new(config: MailerConfig) -> Self {
        Self { config }
    }

    fn build_message(&self, body: String) -> Result<Message> {
        Ok(Message::builder()
            .from(self.config.username.parse::<Mailbox>()?)
            .to(self.config.recipient.parse::<Mailbox>()?)
            .subject(SUBJECT)
            .body(body)?)
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn notify(&self, headlines: &[Headline]) -> Result<()> {
        let message = self.build_message(format_digest(headlines))?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&self.config.relay)?
            .credentials(Credentials::new(
                self.config.username.clone(),
                self.config.password.clone(),
            ))
            .build();

        transport.send(message).await?;
        info!("digest email sent to {}", self.config.recipient);
        Ok(())
    }
}
