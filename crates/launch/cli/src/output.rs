//! Output formatting utilities

use std::time::Duration;

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use launch_deployment::{DeployEvent, DeployObserver};

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message);
}

/// Progress for an interactive deploy
///
/// Phase changes drive a spinner on stderr. The `OK, <release>` line goes
/// to stdout as soon as the promoted release is running, before endpoints
/// are waited on.
pub struct ProgressObserver {
    spinner: ProgressBar,
}

impl ProgressObserver {
    pub fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            spinner.set_style(style);
        }
        spinner.enable_steady_tick(Duration::from_millis(120));
        Self { spinner }
    }

    /// Clear the spinner, e.g. before printing an error.
    pub fn finish(&self) {
        self.spinner.finish_and_clear();
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl DeployObserver for ProgressObserver {
    fn on_event(&self, event: &DeployEvent) {
        match event {
            DeployEvent::CreatingApp { app } => {
                self.spinner.set_message(format!("Creating app {}...", app));
            }
            DeployEvent::AppCreated { app } => {
                self.spinner.println(format!("{} Created app {}", "✓".green(), app));
            }
            DeployEvent::StatusObserved { status, phase, .. } => {
                self.spinner
                    .set_message(format!("Waiting for {} ({})", phase, status));
            }
            DeployEvent::Building { source_dir, .. } => {
                self.spinner
                    .set_message(format!("Building {}...", source_dir.display()));
            }
            DeployEvent::Built { release } => {
                self.spinner
                    .println(format!("{} Built release {}", "✓".green(), release));
            }
            DeployEvent::Promoting { release } => {
                self.spinner
                    .set_message(format!("Promoting {}...", release));
            }
            DeployEvent::Released { release } => {
                self.spinner.suspend(|| println!("OK, {}", release));
            }
            DeployEvent::WaitingForEndpoints { endpoints } => {
                if !endpoints.is_empty() {
                    self.spinner.set_message(format!(
                        "Waiting for {} endpoint(s) to answer...",
                        endpoints.len()
                    ));
                }
            }
            DeployEvent::EndpointReachable { .. } => {}
            DeployEvent::EndpointUnreachable { endpoint, error } => {
                self.spinner.suspend(|| {
                    print_warning(&format!("{} did not answer: {}", endpoint.name, error))
                });
            }
        }
    }
}
