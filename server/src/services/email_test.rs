use super::*;

#[test]
fn links_are_built_from_base_url() {
    assert_eq!(
        validation_link("https://auth.example.com", "tok"),
        "https://auth.example.com/api/auth/validate-email/tok"
    );
    assert_eq!(password_reset_link("http://localhost:3000", "tok"), "http://localhost:3000/reset-password/tok");
}

#[test]
fn validation_email_injects_fields() {
    let email = validation_email("user@example.com", "Ada", "https://x.test/v/1");
    assert_eq!(email.to, "user@example.com");
    assert_eq!(email.subject, "Validate your email");
    assert!(email.html.contains("Hi Ada,"));
    assert!(email.html.contains("user@example.com"));
    assert!(email.html.contains("href=\"https://x.test/v/1\""));
    assert!(!email.html.contains("{{"));
}

#[test]
fn reset_email_injects_fields() {
    let email = password_reset_email("user@example.com", "Ada", "https://x.test/r/1");
    assert_eq!(email.subject, "Reset your password");
    assert!(email.html.contains("https://x.test/r/1"));
    assert!(!email.html.contains("{{NAME}}"));
}

#[test]
fn names_are_html_escaped() {
    let email = validation_email("user@example.com", "<script>alert('x')</script>", "https://x.test");
    assert!(!email.html.contains("<script>"));
    assert!(email.html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"));
}

#[tokio::test]
async fn log_mailer_accepts_messages() {
    let mailer = LogMailer;
    let email = validation_email("user@example.com", "Ada", "https://x.test");
    assert!(mailer.send(email).await.is_ok());
}

#[derive(Clone, Default)]
struct CapturedLog(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

impl std::io::Write for CapturedLog {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[tokio::test]
async fn log_mailer_keeps_links_out_of_info_logs() {
    let captured = CapturedLog::default();
    let writer = captured.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let link = password_reset_link("https://x.test", "reset-token-123");
    LogMailer.send(password_reset_email("user@example.com", "Ada", &link)).await.unwrap();

    let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
    assert!(output.contains("user@example.com"));
    assert!(!output.contains("reset-token-123"));
}

#[tokio::test]
async fn log_service_builds_working_mailer() {
    let config = MailerConfig {
        service: MailerService::Log,
        email: "noreply@example.com".to_owned(),
        secret_key: "unused".to_owned(),
    };
    let mailer = mailer_from_config(&config);
    let email = password_reset_email("user@example.com", "Ada", "https://x.test");
    assert!(mailer.send(email).await.is_ok());
}
