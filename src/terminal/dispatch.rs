//! Command handlers for the interactive session

use log::{debug, error, warn};
use std::io::Write;

use crate::client::FlightApi;
use crate::commands::{Command, get_help_text};
use crate::error::Result;
use crate::responses::{Transaction, first_error};

use super::benchmark::{BENCHMARK_WORKERS, benchmark_queries, run_benchmark};
use super::progress::{display_page_progress, finish_progress};
use super::session::Terminal;
use super::table::{TableStyle, TextTable};

impl<C: FlightApi, W: Write + Send> Terminal<C, W> {
    /// Run a command, refusing protected ones without a session
    pub(super) fn dispatch(&mut self, command: Command) -> Result<()> {
        debug!("Dispatching command: {}", command);

        if command.requires_login() && !self.client.is_logged_in() {
            writeln!(self.out, "This feature requires login")?;
            return Ok(());
        }

        match command {
            Command::Login => self.login(),
            Command::History(page) => self.history(page),
            Command::Logout => self.logout(),
            Command::Points => self.points(),
            Command::Set => self.set_usage(),
            Command::Help => self.help(),
            Command::Benchmark => self.benchmark(),
            Command::Options => self.show_options(),
        }
    }

    fn login(&mut self) -> Result<()> {
        if self.options.username.is_empty() || self.options.password.is_empty() {
            writeln!(
                self.out,
                "Set credentials first: set username <id>, set password <secret>"
            )?;
            return Ok(());
        }

        match self
            .client
            .login(&self.options.username, &self.options.password)
        {
            Ok(success) => {
                writeln!(
                    self.out,
                    "Login: {}",
                    if success { "success" } else { "failed" }
                )?;
            }
            Err(e) => {
                warn!("Login request failed: {}", e);
                writeln!(self.out, "Login failed")?;
            }
        }
        Ok(())
    }

    fn logout(&mut self) -> Result<()> {
        self.client.logout();
        writeln!(self.out, "Logged out")?;
        Ok(())
    }

    /// All pages when `page` is None, otherwise just that page
    fn history(&mut self, page: Option<u32>) -> Result<()> {
        let fetch_all = page.is_none();
        let mut n = page.unwrap_or(1);
        // Last page to fetch: the requested one, or the total from the first response
        let mut last: Option<u32> = page;
        let mut table = TextTable::new();
        let mut all: Vec<Transaction> = Vec::new();
        let mut progress_width;

        writeln!(self.out)?;
        loop {
            let shown_total = if fetch_all { last.unwrap_or(1) } else { 1 };
            progress_width = display_page_progress(&mut self.out, n, shown_total)?;

            match self.client.history(n) {
                Ok(result) => {
                    if last.is_none() {
                        last = Some(result.total_pages().unwrap_or(n));
                    }
                    if let Some(err) = first_error(&result.errors) {
                        finish_progress(&mut self.out, progress_width)?;
                        progress_width = 0;
                        writeln!(self.out, "flysas.com says: {}", err.error_message)?;
                    }
                    for transaction in result.transactions() {
                        table.add_row(transaction.to_row());
                        all.push(transaction.clone());
                    }
                }
                Err(e) => {
                    error!("History page {} failed: {}", n, e);
                    finish_progress(&mut self.out, progress_width)?;
                    progress_width = 0;
                    writeln!(self.out, "Error getting page {}", n)?;
                    writeln!(self.out, "{}", e)?;
                    if last.is_none() {
                        // Page count unknown without a first response
                        break;
                    }
                }
            }

            if last.is_none_or(|last| n >= last) {
                break;
            }
            n += 1;
        }
        finish_progress(&mut self.out, progress_width)?;

        write!(
            self.out,
            "{}",
            table.render(TableStyle::from_bordered(self.options.table))
        )?;

        if fetch_all {
            for (kind, points) in points_by_type(&all) {
                writeln!(self.out, "{}\t{}", kind, points)?;
            }
        }
        Ok(())
    }

    fn points(&mut self) -> Result<()> {
        match self.client.history(1) {
            Ok(result) => match (first_error(&result.errors), &result.eurobonus) {
                (Some(err), _) => writeln!(self.out, "flysas.com says: {}", err.error_message)?,
                (None, Some(account)) => {
                    writeln!(self.out, "Status: {}", account.current_tier_code)?;
                    writeln!(self.out, "{} points for use", account.total_points_for_use)?;
                    writeln!(
                        self.out,
                        "{} basic points earned this period",
                        account.points_available
                    )?;
                }
                (None, None) => writeln!(self.out, "No account information returned")?,
            },
            Err(e) => {
                error!("Account info failed: {}", e);
                writeln!(self.out, "Error getting info")?;
                writeln!(self.out, "{}", e)?;
            }
        }
        Ok(())
    }

    fn benchmark(&mut self) -> Result<()> {
        let queries = benchmark_queries(self.parser.today());
        run_benchmark(&self.client, queries, BENCHMARK_WORKERS, &mut self.out)?;
        Ok(())
    }

    fn set_usage(&mut self) -> Result<()> {
        writeln!(self.out, "Usage: set <name> <value>")?;
        writeln!(self.out, "{}", self.options.help())?;
        Ok(())
    }

    fn help(&mut self) -> Result<()> {
        writeln!(self.out, "{}", get_help_text())?;
        Ok(())
    }

    fn show_options(&mut self) -> Result<()> {
        writeln!(self.out, "{}", self.options.help())?;
        Ok(())
    }
}

/// Sum of available points per transaction type, in first-seen order
fn points_by_type(transactions: &[Transaction]) -> Vec<(&str, i64)> {
    let mut sums: Vec<(&str, i64)> = Vec::new();
    for transaction in transactions {
        let kind = transaction.type_of_transaction.as_str();
        let points = transaction.available_points_after_transaction;
        let found = sums.iter().position(|(k, _)| *k == kind);
        match found {
            Some(i) => sums[i].1 += points,
            None => sums.push((kind, points)),
        }
    }
    sums
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::mock::MockApi;
    use crate::error::FlysasClientError;
    use crate::responses::ProviderError;
    use crate::responses::history::{EuroBonus, HistoryResult, TransactionHistory};
    use crate::terminal::session::tests::{run, terminal};
    use chrono::NaiveDate;
    use std::sync::atomic::Ordering;

    fn transaction(day: u32, kind: &str, points: i64) -> Transaction {
        Transaction {
            date_performed: NaiveDate::from_ymd_opt(2026, 9, day)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            type_of_transaction: kind.to_string(),
            basic_points_after_transaction: points.to_string(),
            available_points_after_transaction: points,
            description: format!("Activity {}", day),
        }
    }

    fn page(total_pages: u32, transactions: Vec<Transaction>) -> HistoryResult {
        HistoryResult {
            eurobonus: Some(EuroBonus {
                current_tier_code: "EBS".to_string(),
                total_points_for_use: 48210,
                points_available: 12050,
                transaction_history: TransactionHistory {
                    transaction: Some(transactions),
                    total_number_of_pages: total_pages,
                },
            }),
            errors: None,
        }
    }

    fn logged_in_with_pages(total: u32) -> MockApi {
        MockApi::new().logged_in().with_history(move |n| {
            Ok(page(
                total,
                vec![
                    transaction(n, "Flight", 100 * n as i64),
                    transaction(n + 10, "Purchase", 5),
                ],
            ))
        })
    }

    fn history_calls(term: &Terminal<MockApi, Vec<u8>>) -> usize {
        term.client().history_calls.load(Ordering::SeqCst)
    }

    #[test]
    fn test_protected_commands_require_login() {
        let mut term = terminal(MockApi::new());
        let output = run(&mut term, "history\npoints\nHISTORY 2\nq\n");
        assert_eq!(output.matches("This feature requires login").count(), 3);
        assert_eq!(term.client().remote_calls(), 0);
    }

    #[test]
    fn test_login_reports_result() {
        let mut term = terminal(MockApi::new());
        let output = run(
            &mut term,
            "login\nset username EB1\nset password pw\nlogin\nq\n",
        );
        assert!(output.contains("Set credentials first"));
        assert!(output.contains("Login: success"));
        assert_eq!(term.client().login_calls.load(Ordering::SeqCst), 1);
        assert!(term.client().is_logged_in());

        let mut rejected = MockApi::new();
        rejected.accept_login = false;
        let mut term = terminal(rejected);
        let output = run(&mut term, "set username EB1\nset password pw\nlogin\nq\n");
        assert!(output.contains("Login: failed"));
    }

    #[test]
    fn test_logout_closes_session() {
        let mut term = terminal(MockApi::new().logged_in());
        let output = run(&mut term, "logout\npoints\nq\n");
        assert!(output.contains("Logged out"));
        assert!(output.contains("This feature requires login"));
        assert_eq!(history_calls(&term), 0);
    }

    #[test]
    fn test_history_single_total_page() {
        let mut term = terminal(logged_in_with_pages(1));
        let output = run(&mut term, "history\nq\n");
        assert_eq!(history_calls(&term), 1);
        assert!(output.contains("Fetching page 1"));
        assert!(!output.contains(" of "));
        assert!(output.contains("Flight\t100"));
        assert!(output.contains("Purchase\t5"));
    }

    #[test]
    fn test_history_fetches_all_pages_and_sums() {
        let mut term = terminal(logged_in_with_pages(3));
        let output = run(&mut term, "history\nq\n");
        assert_eq!(history_calls(&term), 3);
        assert_eq!(*term.client().history_pages.lock().unwrap(), vec![1, 2, 3]);
        assert!(output.contains("Fetching page 2 of 3"));
        assert!(output.contains("Flight\t600"));
        assert!(output.contains("Purchase\t15"));
        assert!(output.contains("Activity 3"));
    }

    #[test]
    fn test_history_single_page_argument() {
        let mut term = terminal(logged_in_with_pages(3));
        let output = run(&mut term, "history 2\nq\n");
        assert_eq!(*term.client().history_pages.lock().unwrap(), vec![2]);
        assert!(output.contains("Activity 2"));
        assert!(!output.contains("Flight\t200"));
    }

    #[test]
    fn test_history_single_page_hides_total() {
        let mut term = terminal(logged_in_with_pages(9));
        let output = run(&mut term, "history 5\nq\n");
        assert!(output.contains("Fetching page 5"));
        assert!(!output.contains(" of "));
    }

    #[test]
    fn test_history_last_possible_page() {
        let mut term = terminal(
            MockApi::new()
                .logged_in()
                .with_history(|_| Ok(page(1, vec![transaction(1, "Flight", 10)]))),
        );
        let output = run(&mut term, "history 4294967295\nq\n");
        assert!(output.contains("Fetching page 4294967295"));
        assert_eq!(
            *term.client().history_pages.lock().unwrap(),
            vec![u32::MAX]
        );
    }

    #[test]
    fn test_history_first_page_failure_stops() {
        let mut term = terminal(MockApi::new().logged_in().with_history(|_| {
            Err(FlysasClientError::Transport("timed out".to_string()))
        }));
        let output = run(&mut term, "history\nq\n");
        assert_eq!(history_calls(&term), 1);
        assert!(output.contains("Error getting page 1"));
        assert!(output.contains("timed out"));
    }

    #[test]
    fn test_history_later_page_failure_skips_page() {
        let mut term = terminal(MockApi::new().logged_in().with_history(|n| {
            if n == 2 {
                Err(FlysasClientError::Transport("reset".to_string()))
            } else {
                Ok(page(3, vec![transaction(n, "Flight", 10)]))
            }
        }));
        let output = run(&mut term, "history\nq\n");
        assert_eq!(history_calls(&term), 3);
        assert!(output.contains("Error getting page 2"));
        assert!(output.contains("Activity 1"));
        assert!(output.contains("Activity 3"));
        assert!(output.contains("Flight\t20"));
    }

    #[test]
    fn test_history_provider_error() {
        let mut term = terminal(MockApi::new().logged_in().with_history(|_| {
            Ok(HistoryResult {
                eurobonus: None,
                errors: Some(vec![ProviderError {
                    error_code: "401".to_string(),
                    error_message: "Session expired".to_string(),
                }]),
            })
        }));
        let output = run(&mut term, "history\nq\n");
        assert_eq!(history_calls(&term), 1);
        assert!(output.contains("flysas.com says: Session expired"));
    }

    #[test]
    fn test_points() {
        let mut term = terminal(logged_in_with_pages(1));
        let output = run(&mut term, "points\nq\n");
        assert_eq!(*term.client().history_pages.lock().unwrap(), vec![1]);
        assert!(output.contains("Status: EBS"));
        assert!(output.contains("48210 points for use"));
        assert!(output.contains("12050 basic points earned this period"));
    }

    #[test]
    fn test_points_failure_is_reported() {
        let mut term = terminal(MockApi::new().logged_in().with_history(|_| {
            Err(FlysasClientError::HttpStatus {
                status: 500,
                message: "oops".to_string(),
            })
        }));
        let output = run(&mut term, "points\nq\n");
        assert!(output.contains("Error getting info"));
    }

    #[test]
    fn test_help_options_and_set() {
        let mut term = terminal(MockApi::new());
        let output = run(&mut term, "help\noptions\nset\nq\n");
        assert!(output.contains("Commands:"));
        assert!(output.contains("\thistory"));
        assert!(output.contains("equipment   off"));
        assert!(output.contains("Usage: set <name> <value>"));
        assert_eq!(term.client().remote_calls(), 0);
    }

    #[test]
    fn test_points_by_type_keeps_first_seen_order() {
        let transactions = vec![
            transaction(1, "Purchase", 5),
            transaction(2, "Flight", 100),
            transaction(3, "Purchase", 7),
        ];
        assert_eq!(
            points_by_type(&transactions),
            vec![("Purchase", 12), ("Flight", 100)]
        );
    }
}
