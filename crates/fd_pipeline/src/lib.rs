pub mod cache;
pub mod coordinator;
pub mod mailer;
pub mod scheduler;

pub use cache::{CacheEntry, DailyCache};
pub use coordinator::{Pipeline, RunOutcome};
pub use mailer::{format_digest, MailerConfig, Notifier, SmtpNotifier};
pub use scheduler::Scheduler;
