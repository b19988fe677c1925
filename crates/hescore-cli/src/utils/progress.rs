use hescore::engine::progress::{Progress, ProgressCallback};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::warn;

const SPINNER_TICK_MS: u64 = 80;

struct SpinnerState {
    pb: ProgressBar,
    pending: Option<&'static str>,
}

/// Drives one spinner per translation step and remembers the step in flight.
#[derive(Clone)]
pub struct CliProgressHandler {
    state: Arc<Mutex<SpinnerState>>,
}

impl CliProgressHandler {
    pub fn new() -> Self {
        let pb = ProgressBar::new(0)
            .with_style(Self::spinner_style())
            .with_message("Initializing...");
        pb.set_draw_target(ProgressDrawTarget::stderr());
        pb.disable_steady_tick();
        pb.finish_and_clear();

        Self {
            state: Arc::new(Mutex::new(SpinnerState { pb, pending: None })),
        }
    }

    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let state = self.state.clone();

        Box::new(move |progress: Progress| {
            let Ok(mut guard) = state.lock() else {
                warn!("Progress spinner mutex was poisoned. Cannot update progress.");
                return;
            };

            match progress {
                Progress::StepStart { name } => {
                    guard.pending = Some(name);
                    guard.pb.reset();
                    guard.pb.set_style(Self::spinner_style());
                    guard
                        .pb
                        .enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
                    guard.pb.set_message(step_label(name));
                }
                Progress::StepFinish => {
                    let finished = guard.pending.take();
                    guard.pb.disable_steady_tick();
                    match finished {
                        Some(name) => guard
                            .pb
                            .finish_with_message(format!("✓ {}", step_label(name))),
                        None => guard.pb.finish_with_message("✓ Done"),
                    }
                }
                Progress::Message(msg) => {
                    if !guard.pb.is_finished() {
                        guard.pb.println(format!("  {}", msg));
                    } else {
                        guard.pb.set_message(msg);
                    }
                }
            }
        })
    }

    /// Name of the step that started but has not yet finished, if any.
    pub fn pending_step(&self) -> Option<&'static str> {
        self.state.lock().ok().and_then(|guard| guard.pending)
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .expect("Failed to create spinner style template")
    }
}

impl Default for CliProgressHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// `hvac_distribution` -> `HVAC distribution`, `air_infiltration` -> `Air infiltration`.
fn step_label(name: &str) -> String {
    let spaced = name.replace('_', " ");
    if let Some(rest) = spaced.strip_prefix("hvac") {
        return format!("HVAC{rest}");
    }
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => spaced,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn handler_initializes_in_a_clean_state() {
        let handler = CliProgressHandler::new();
        let state = handler.state.lock().unwrap();
        assert!(state.pb.is_finished());
        assert_eq!(state.pending, None);
    }

    #[test]
    fn each_step_gets_its_own_spinner_message() {
        let handler = CliProgressHandler::new();
        let callback = handler.get_callback();

        callback(Progress::StepStart {
            name: "air_infiltration",
        });
        {
            let state = handler.state.lock().unwrap();
            assert_eq!(state.pb.message(), "Air infiltration");
            assert!(!state.pb.is_finished());
        }
        assert_eq!(handler.pending_step(), Some("air_infiltration"));

        callback(Progress::StepFinish);
        {
            let state = handler.state.lock().unwrap();
            assert!(state.pb.is_finished());
            assert_eq!(state.pb.message(), "✓ Air infiltration");
        }
        assert_eq!(handler.pending_step(), None);
    }

    #[test]
    fn an_aborted_step_remains_pending() {
        let handler = CliProgressHandler::new();
        let callback = handler.get_callback();
        callback(Progress::StepStart { name: "summary" });
        callback(Progress::StepFinish);
        callback(Progress::StepStart { name: "doors" });
        assert_eq!(handler.pending_step(), Some("doors"));
        assert_eq!(handler.state.lock().unwrap().pb.message(), "Doors");
    }

    #[test]
    fn messages_after_a_finished_step_replace_the_spinner_text() {
        let handler = CliProgressHandler::new();
        let callback = handler.get_callback();
        callback(Progress::StepStart { name: "hvac" });
        callback(Progress::StepFinish);
        callback(Progress::Message("Structural validation skipped.".to_string()));
        assert_eq!(
            handler.state.lock().unwrap().pb.message(),
            "Structural validation skipped."
        );
    }

    #[test]
    fn step_labels_are_human_readable() {
        assert_eq!(step_label("hvac_distribution"), "HVAC distribution");
        assert_eq!(step_label("misc_loads"), "Misc loads");
        assert_eq!(step_label("validation"), "Validation");
    }

    #[test]
    fn callback_is_thread_safe() {
        let handler = CliProgressHandler::new();
        let callback = handler.get_callback();

        thread::spawn(move || {
            callback(Progress::StepStart { name: "walls" });
            callback(Progress::StepFinish);
        })
        .join()
        .unwrap();

        let state = handler.state.lock().unwrap();
        assert!(state.pb.is_finished());
        assert_eq!(state.pb.message(), "✓ Walls");
    }
}
