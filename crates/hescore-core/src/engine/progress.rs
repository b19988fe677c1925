#[derive(Debug, Clone)]
pub enum Progress {
    StepStart { name: &'static str },
    StepFinish,

    Message(String),
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn reporter_without_callback_ignores_events() {
        let reporter = ProgressReporter::new();
        reporter.report(Progress::StepStart { name: "walls" });
        reporter.report(Progress::StepFinish);
    }

    #[test]
    fn reporter_forwards_events_in_order() {
        let seen = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            let label = match event {
                Progress::StepStart { name } => format!("start:{name}"),
                Progress::StepFinish => "finish".to_string(),
                Progress::Message(text) => format!("message:{text}"),
            };
            seen.lock().unwrap().push(label);
        }));
        reporter.report(Progress::StepStart { name: "doors" });
        reporter.report(Progress::Message("placed".to_string()));
        reporter.report(Progress::StepFinish);
        drop(reporter);
        assert_eq!(
            seen.into_inner().unwrap(),
            vec!["start:doors", "message:placed", "finish"]
        );
    }
}
