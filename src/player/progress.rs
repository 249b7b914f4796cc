use std::time::{Duration, Instant};

/// Formatted progress state published to the UI.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgressView {
    /// `elapsed / total`, both as `M:SS`.
    pub time_text: String,
    /// 0 to 100.
    pub percent: u16,
}

impl Default for ProgressView {
    fn default() -> Self {
        Self {
            time_text: time_text(Duration::ZERO, Duration::ZERO),
            percent: 0,
        }
    }
}

/// A cancellable repeating task that republishes playback progress.
///
/// A session begins on a fresh play and is cancelled before the next one
/// starts, so at most one session exists per player. Cancelling with no
/// session pending is a no-op. Ticks are driven by the event loop; the
/// reporter only acts when its next due time has passed.
pub struct ProgressReporter {
    interval: Duration,
    next_due: Option<Instant>,
    total: Duration,
    view: ProgressView,
}

impl ProgressReporter {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_due: None,
            total: Duration::ZERO,
            view: ProgressView::default(),
        }
    }

    /// Begin a session for a track of `total` length, replacing any prior
    /// session and resetting the published view.
    pub fn start(&mut self, now: Instant, total: Duration) {
        self.total = total;
        self.next_due = Some(now + self.interval);
        self.view = ProgressView {
            time_text: time_text(Duration::ZERO, total),
            percent: 0,
        };
    }

    /// Cancel the pending session, if any.
    pub fn cancel(&mut self) {
        self.next_due = None;
    }

    pub fn is_active(&self) -> bool {
        self.next_due.is_some()
    }

    /// Republish the view from `position` if a tick is due, rescheduling
    /// the next one. Returns whether the view changed.
    pub fn tick(&mut self, now: Instant, position: Duration) -> bool {
        let Some(due) = self.next_due else {
            return false;
        };
        if now < due {
            return false;
        }

        self.next_due = Some(now + self.interval);
        self.view = ProgressView {
            time_text: time_text(position, self.total),
            percent: percent_of(position, self.total),
        };
        true
    }

    pub fn view(&self) -> &ProgressView {
        &self.view
    }
}

/// `elapsed / total` as a whole percentage, clamped to 0..=100. A
/// zero-length track reports 0 rather than dividing by zero.
pub(super) fn percent_of(elapsed: Duration, total: Duration) -> u16 {
    if total.is_zero() {
        return 0;
    }
    let pct = elapsed.as_secs_f64() / total.as_secs_f64() * 100.0;
    pct.clamp(0.0, 100.0) as u16
}

/// Format a duration as `M:SS`: seconds zero-padded, minutes not.
pub(super) fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{}:{:02}", secs / 60, secs % 60)
}

fn time_text(elapsed: Duration, total: Duration) -> String {
    format!("{} / {}", format_mmss(elapsed), format_mmss(total))
}
