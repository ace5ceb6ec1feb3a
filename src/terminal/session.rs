//! Interactive session for the flysas client
//!
//! Reads one line at a time and routes it to an option directive, a command
//! or a batch of `;`-separated flight searches.

use log::{debug, error, info};
use std::io::{BufRead, Write};

use crate::client::FlightApi;
use crate::commands::{parse_command, query_syntax};
use crate::config::Options;
use crate::error::Result;
use crate::query::{QueryParser, QuerySpec};
use crate::responses::{FareProduct, FlightRecord, SearchResult, first_error};

use super::flights::format_flights;

/// Input that ends the session
const QUIT: &str = "q";

/// Terminal handler for interactive search sessions
pub struct Terminal<C: FlightApi, W: Write + Send> {
    pub(super) client: C,
    pub(super) options: Options,
    pub(super) parser: QueryParser,
    pub(super) out: W,
}

impl<C: FlightApi, W: Write + Send> Terminal<C, W> {
    /// Create a new terminal writing to `out`
    pub fn new(client: C, options: Options, out: W) -> Self {
        Self {
            client,
            options,
            parser: QueryParser::new(),
            out,
        }
    }

    /// Resolve relative dates against a fixed day instead of the clock
    pub fn with_parser(mut self, parser: QueryParser) -> Self {
        self.parser = parser;
        self
    }

    #[cfg(test)]
    pub fn client(&self) -> &C {
        &self.client
    }

    #[cfg(test)]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Run the read-eval-print loop until `q` or end of input
    pub fn run_interactive<R: BufRead>(&mut self, mut input: R) -> Result<()> {
        info!("Starting interactive session");

        loop {
            writeln!(self.out, "{}", query_syntax())?;
            write!(self.out, ">>")?;
            self.out.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                break; // EOF
            }

            let line = line.trim();
            if line == QUIT {
                break;
            }
            if line.is_empty() {
                continue;
            }

            debug!("User entered: {}", line);
            if let Err(e) = self.handle_line(line) {
                error!("Input failed: {}", e);
                writeln!(self.out, "Error: {}", e)?;
            }
        }

        info!("Session ended");
        Ok(())
    }

    /// Directive first, then command, then searches
    pub fn handle_line(&mut self, line: &str) -> Result<()> {
        if self.options.parse_directive(line) {
            return Ok(());
        }

        if let Some(command) = parse_command(line) {
            return self.dispatch(command);
        }

        self.run_queries(line)
    }

    fn run_queries(&mut self, line: &str) -> Result<()> {
        for segment in line.split(';').map(str::trim).filter(|s| !s.is_empty()) {
            match self.parser.parse(segment) {
                Ok(query) => self.search(&query)?,
                Err(e) => writeln!(self.out, "Syntax error: {}", e)?,
            }
            writeln!(self.out)?;
        }
        Ok(())
    }

    fn search(&mut self, query: &QuerySpec) -> Result<()> {
        let result = match self.client.search(query) {
            Ok(result) => result,
            Err(e) => {
                error!("Search {} failed: {}", query, e);
                writeln!(self.out, "Search failed: {}", e)?;
                return Ok(());
            }
        };
        self.print_search_result(query, &result)
    }

    fn print_search_result(&mut self, query: &QuerySpec, result: &SearchResult) -> Result<()> {
        if let Some(err) = first_error(&result.errors) {
            writeln!(self.out, "flysas.com says: {}", err.error_message)?;
            return Ok(());
        }

        writeln!(self.out, "*********Outbound*******")?;
        self.print_flights(&result.outbound_flights, &result.outbound_flight_products)?;

        if query.is_round_trip() {
            writeln!(self.out, "*********Inbound*******")?;
            self.print_flights(&result.inbound_flights, &result.inbound_flight_products)?;
        }
        Ok(())
    }

    fn print_flights(&mut self, flights: &[FlightRecord], products: &[FareProduct]) -> Result<()> {
        match format_flights(flights, products, &self.options) {
            Some(table) => write!(self.out, "{}", table)?,
            None => writeln!(self.out, "No flights found")?,
        }
        Ok(())
    }
}
