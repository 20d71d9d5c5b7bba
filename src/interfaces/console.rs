use crate::domain::ports::{ConfirmGate, Decision, Notifier};
use crate::domain::scan::ScanPayload;
use async_trait::async_trait;
use std::io::{self, BufRead, Write};

/// Stdout notifier keeping the toast/alert split of the mobile app:
/// transient notices on one line, alerts prefixed with their title.
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn toast(&self, message: &str) {
        println!("{message}");
    }

    fn alert(&self, title: &str, body: &str) {
        println!("{title}: {body}");
    }
}

/// Interactive confirm gate reading the operator's choice from stdin.
pub struct StdinConfirmGate;

#[async_trait]
impl ConfirmGate for StdinConfirmGate {
    async fn decide(&self, payload: &ScanPayload) -> Decision {
        println!("Successful Scan! '{payload}' has been scanned.");
        print!("Give attendance? [y/N] ");
        let _ = io::stdout().flush();

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line).is_err() {
            return Decision::Cancel;
        }
        if line.trim().eq_ignore_ascii_case("y") {
            Decision::Confirm
        } else {
            Decision::Cancel
        }
    }
}

/// Confirms every scan without prompting; used by `--yes`.
pub struct AutoConfirmGate;

#[async_trait]
impl ConfirmGate for AutoConfirmGate {
    async fn decide(&self, payload: &ScanPayload) -> Decision {
        println!("Successful Scan! '{payload}' has been scanned.");
        Decision::Confirm
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_auto_gate_always_confirms() {
        let payload = ScanPayload::clean("team-1").unwrap();
        assert_eq!(AutoConfirmGate.decide(&payload).await, Decision::Confirm);
    }
}
