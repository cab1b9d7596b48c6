//! Terminal output formatting.

use colored::Colorize;

use nisync_core::{SyncObserver, SyncReport, TicketRecord};

/// Prints sync progress to stdout as it happens.
pub struct ConsoleObserver;

impl SyncObserver for ConsoleObserver {
    fn issues_fetched(&mut self, count: usize) {
        println!("{} tickets", count.to_string().bold());
    }

    fn ticket_created(&mut self, _ticket: &TicketRecord, path: &str) {
        println!("{}", path.cyan());
    }

    fn service_linked(&mut self, service: &str, service_path: &str) {
        println!("{} {}", service, service_path.green());
    }

    fn service_skipped(&mut self, service: &str, _total_count: usize) {
        println!("{} {}", service, "X".red());
    }
}

/// Print the end-of-run summary.
pub fn print_report(report: &SyncReport) {
    let elapsed = report.finished_at - report.started_at;

    println!("\n{}", "Sync complete:".green().bold());
    println!("  Tickets fetched:       {}", report.issues_fetched);
    println!("  Ticket nodes created:  {}", report.tickets_created);
    println!("  Relationships created: {}", report.relationships_created);
    println!("  Services skipped:      {}", report.services_skipped.to_string().yellow());
    println!(
        "  Duration:              {}.{:03}s",
        elapsed.num_seconds(),
        elapsed.num_milliseconds() % 1000
    );
}
