//! Plain-text renderer for the shell.

use std::io::Write;

use podboard_core::{Booking, InsightsSnapshot, MessageKind, Render};

/// Renders bookings as a positional table and insights as five summary cards.
pub struct TextRenderer<W: Write> {
    out: W,
}

impl TextRenderer<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self {
            out: std::io::stdout(),
        }
    }
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> Render for TextRenderer<W> {
    fn render_bookings(&mut self, bookings: &[Booking]) {
        if bookings.is_empty() {
            let _ = writeln!(self.out, "(no bookings yet)");
            return;
        }
        let _ = writeln!(self.out, "{:>3}  {:<8} {:<6} students", "#", "pod", "time");
        for (i, booking) in bookings.iter().enumerate() {
            let _ = writeln!(
                self.out,
                "{:>3}  {:<8} {:<6} {}",
                i + 1,
                booking.pod_id,
                booking.time.to_string(),
                booking.students.join(", ")
            );
        }
    }

    fn render_insights(&mut self, snapshot: &InsightsSnapshot) {
        let busiest = snapshot
            .busiest_hour
            .map(|t| t.to_string())
            .unwrap_or_else(|| "no bookings".to_string());
        let fills = snapshot
            .pod_fill_rates
            .iter()
            .map(|f| format!("{} {:.1}%", f.pod_id, f.fill_rate))
            .collect::<Vec<_>>()
            .join("  ");

        let _ = writeln!(self.out, "[ total bookings     : {} ]", snapshot.total_bookings);
        let _ = writeln!(self.out, "[ unique students    : {} ]", snapshot.unique_students);
        let _ = writeln!(self.out, "[ busiest hour       : {busiest} ]");
        let _ = writeln!(self.out, "[ pod fill rates     : {fills} ]");
        let _ = writeln!(self.out, "[ duplicate attempts : {} ]", snapshot.duplicate_attempts);
    }

    fn show_message(&mut self, kind: MessageKind, text: &str) {
        let tag = match kind {
            MessageKind::Info => "info",
            MessageKind::Success => "ok",
            MessageKind::Error => "!!",
        };
        let _ = writeln!(self.out, "{tag}: {text}");
    }
}
