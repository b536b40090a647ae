//! Interactive booking shell: the UI-shell collaborator over the core.
//!
//! Reads one command per line, runs the session action, and renders the
//! result through [`TextRenderer`]. Session state lives only for the life of
//! the process.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use clap::Args;
use podboard_core::{BookingSession, Config, MessageKind, Render, SessionEvent, SubmitOutcome};

use crate::render::TextRenderer;

#[derive(Args)]
pub struct ShellArgs {
    /// Config file with the pod catalog and hours
    #[arg(long, default_value = "podboard.toml")]
    pub config: PathBuf,
}

const HELP: &str = "\
commands:
  book <pod> <HH:MM> <ids,...>   reserve seats in a pod
  remove <n>                     remove booking #n from the list
  list                           show current bookings
  insights                       show summary statistics
  pods                           show the pod catalog
  help                           show this help
  quit                           leave the shell";

pub fn run(args: ShellArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default(&args.config);
    let session = BookingSession::from_config(&config);
    let stdin = std::io::stdin();
    run_loop(session, stdin.lock(), TextRenderer::stdout())
}

fn run_loop<R: BufRead, V: Render>(
    mut session: BookingSession,
    mut input: R,
    mut view: V,
) -> Result<(), Box<dyn std::error::Error>> {
    view.show_message(MessageKind::Info, "podboard shell; 'help' lists commands");

    let mut line = String::new();
    loop {
        print!("podboard> ");
        std::io::stdout().flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let (command, rest) = match trimmed.split_once(char::is_whitespace) {
            Some((c, r)) => (c, r.trim()),
            None => (trimmed, ""),
        };

        match command {
            "book" => handle_book(&mut session, rest, &mut view),
            "remove" => handle_remove(&mut session, rest, &mut view),
            "list" => view.render_bookings(session.bookings()),
            "insights" => view.render_insights(&session.insights()),
            "pods" => {
                for pod in session.catalog().pods() {
                    view.show_message(
                        MessageKind::Info,
                        &format!("{} ({} seats per slot)", pod.id, pod.capacity),
                    );
                }
            }
            "help" => view.show_message(MessageKind::Info, HELP),
            "quit" | "exit" => break,
            other => {
                view.show_message(
                    MessageKind::Error,
                    &format!("unknown command '{other}'; 'help' lists commands"),
                );
            }
        }
    }
    Ok(())
}

fn handle_book<V: Render>(session: &mut BookingSession, rest: &str, view: &mut V) {
    let mut parts = rest.splitn(3, char::is_whitespace);
    let (pod, time, roster) = match (parts.next(), parts.next(), parts.next()) {
        (Some(pod), Some(time), Some(roster)) => (pod, time, roster),
        _ => {
            view.show_message(MessageKind::Error, "usage: book <pod> <HH:MM> <ids,...>");
            return;
        }
    };

    match session.submit(pod, time, roster) {
        SubmitOutcome::Booked { insights, .. } => {
            for event in session.drain_events() {
                match event {
                    SessionEvent::BookingCreated { pod_id, time, students, .. } => {
                        view.show_message(
                            MessageKind::Success,
                            &format!("Booked {} at {time} for {}.", pod_id, students.join(", ")),
                        );
                    }
                    SessionEvent::BookingMerged { pod_id, time, added, total_seats, .. } => {
                        view.show_message(
                            MessageKind::Success,
                            &format!(
                                "Added {} to {} at {time} ({total_seats} seats taken).",
                                added.join(", "),
                                pod_id
                            ),
                        );
                    }
                    _ => {}
                }
            }
            view.render_bookings(session.bookings());
            view.render_insights(&insights);
        }
        SubmitOutcome::Rejected { violations } => {
            for violation in &violations {
                view.show_message(MessageKind::Error, &violation.message);
            }
            session.drain_events();
        }
    }
}

fn handle_remove<V: Render>(session: &mut BookingSession, rest: &str, view: &mut V) {
    // The table is 1-indexed; the store is 0-indexed.
    let index = match rest.parse::<usize>() {
        Ok(n) if n >= 1 => n - 1,
        _ => {
            view.show_message(MessageKind::Error, "usage: remove <n> (from 'list')");
            return;
        }
    };

    match session.remove(index) {
        Ok(removed) => {
            view.show_message(
                MessageKind::Success,
                &format!("Removed {} at {}.", removed.pod_id, removed.time),
            );
            session.drain_events();
            view.render_bookings(session.bookings());
            view.render_insights(&session.insights());
        }
        Err(e) => view.show_message(MessageKind::Error, &e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use podboard_core::{Booking, HoursConfig, InsightsSnapshot, PodCatalog};

    #[derive(Default)]
    struct FakeView {
        messages: Vec<(MessageKind, String)>,
        last_booking_count: Option<usize>,
        last_insights: Option<InsightsSnapshot>,
    }

    impl Render for FakeView {
        fn render_bookings(&mut self, bookings: &[Booking]) {
            self.last_booking_count = Some(bookings.len());
        }

        fn render_insights(&mut self, snapshot: &InsightsSnapshot) {
            self.last_insights = Some(snapshot.clone());
        }

        fn show_message(&mut self, kind: MessageKind, text: &str) {
            self.messages.push((kind, text.to_string()));
        }
    }

    fn session() -> BookingSession {
        BookingSession::new(PodCatalog::default(), HoursConfig::default())
    }

    #[test]
    fn book_then_remove_through_the_loop() {
        let input = b"book POD-A 09:00 sit-1,sit-2\nremove 1\nquit\n" as &[u8];
        let mut view = FakeView::default();
        // run_loop consumes the view; drive handlers directly instead.
        let mut s = session();
        handle_book(&mut s, "POD-A 09:00 sit-1,sit-2", &mut view);
        assert_eq!(view.last_booking_count, Some(1));
        assert_eq!(
            view.last_insights.as_ref().map(|i| i.unique_students),
            Some(2)
        );
        assert!(view
            .messages
            .iter()
            .any(|(k, m)| *k == MessageKind::Success && m.contains("Booked POD-A")));

        handle_remove(&mut s, "1", &mut view);
        assert_eq!(view.last_booking_count, Some(0));
        assert!(s.bookings().is_empty());

        // The scripted input itself drives the full loop without panicking.
        let view = FakeView::default();
        run_loop(session(), input, view).unwrap();
    }

    #[test]
    fn rejected_booking_reports_each_violation() {
        let mut s = session();
        let mut view = FakeView::default();
        handle_book(&mut s, "POD-A 07:00 ", &mut view);
        // Empty roster plus out-of-hours time: both reported together.
        let errors = view
            .messages
            .iter()
            .filter(|(k, _)| *k == MessageKind::Error)
            .count();
        assert_eq!(errors, 2);

        view.messages.clear();
        handle_book(&mut s, "POD-Z 07:00 sit-1", &mut view);
        let errors: Vec<_> = view
            .messages
            .iter()
            .filter(|(k, _)| *k == MessageKind::Error)
            .collect();
        assert_eq!(errors.len(), 2); // unknown pod + out of hours
        assert!(s.bookings().is_empty());
    }

    #[test]
    fn remove_with_bad_index_is_an_error_message() {
        let mut s = session();
        let mut view = FakeView::default();
        handle_remove(&mut s, "0", &mut view);
        handle_remove(&mut s, "nope", &mut view);
        handle_remove(&mut s, "5", &mut view);
        assert_eq!(view.messages.len(), 3);
        assert!(view.messages.iter().all(|(k, _)| *k == MessageKind::Error));
    }
}
