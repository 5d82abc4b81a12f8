//! Email adapter.

mod resend;

pub use resend::ResendEmailSender;
