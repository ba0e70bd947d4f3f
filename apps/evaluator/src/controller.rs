use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::errors::{SubmitError, GENERIC_FAILURE_MESSAGE};
use crate::eval_client::{EvaluationClient, EvaluationRequest};
use crate::models::{EvaluationResult, FormInput, OutcomeState, ResumeFile};

struct Inner {
    form: FormInput,
    outcome: OutcomeState,
    /// The request currently on the wire, if any. Only this gates `submit`.
    in_flight: Option<Uuid>,
    /// The submission whose state `outcome` shows. `reset` detaches it.
    displayed: Option<Uuid>,
    subscribers: Vec<mpsc::UnboundedSender<OutcomeState>>,
}

impl Inner {
    /// Sets the outcome and fans it out while still holding the lock, so every
    /// subscriber sees transitions in the order they happened.
    fn transition(&mut self, next: OutcomeState) {
        self.subscribers.retain(|tx| tx.send(next.clone()).is_ok());
        self.outcome = next;
    }

    /// Ends submission `id`. The outcome only changes if it still shows `id`.
    fn settle(&mut self, id: Uuid, next: OutcomeState) {
        if self.in_flight == Some(id) {
            self.in_flight = None;
        }
        if self.displayed == Some(id) {
            self.displayed = None;
            self.transition(next);
        } else {
            debug!(submission_id = %id, "Discarding outcome of a reset submission");
        }
    }
}

/// Settles a dispatched submission as failed if its future is dropped early.
struct InFlightGuard<'a> {
    inner: &'a Mutex<Inner>,
    id: Uuid,
    settled: bool,
}

impl InFlightGuard<'_> {
    fn settle(mut self, next: OutcomeState) {
        self.settled = true;
        self.inner.lock().settle(self.id, next);
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        if !self.settled {
            warn!(submission_id = %self.id, "Submission dropped before it settled");
            self.inner
                .lock()
                .settle(self.id, OutcomeState::Failure(GENERIC_FAILURE_MESSAGE.to_string()));
        }
    }
}

/// Owns the form and the outcome for one evaluator view.
///
/// Submissions are serialized per instance: while one is in flight, further
/// `submit` calls return `SubmitError::Busy` without touching state. Nothing
/// is shared between instances.
pub struct SubmissionController {
    client: Arc<dyn EvaluationClient>,
    inner: Mutex<Inner>,
}

impl SubmissionController {
    pub fn new(client: Arc<dyn EvaluationClient>) -> Self {
        Self {
            client,
            inner: Mutex::new(Inner {
                form: FormInput::default(),
                outcome: OutcomeState::Idle,
                in_flight: None,
                displayed: None,
                subscribers: Vec::new(),
            }),
        }
    }

    pub fn set_role(&self, role: impl Into<String>) {
        self.inner.lock().form.role = role.into();
    }

    pub fn set_job_description(&self, job_description: impl Into<String>) {
        self.inner.lock().form.job_description = job_description.into();
    }

    /// `None` clears a previously chosen file.
    pub fn set_file(&self, file: Option<ResumeFile>) {
        self.inner.lock().form.resume_file = file;
    }

    pub fn form(&self) -> FormInput {
        self.inner.lock().form.clone()
    }

    pub fn outcome(&self) -> OutcomeState {
        self.inner.lock().outcome.clone()
    }

    /// True while a request is on the wire, even after a `reset`.
    pub fn is_submitting(&self) -> bool {
        self.inner.lock().in_flight.is_some()
    }

    /// Receives every outcome transition from now on, in order.
    pub fn subscribe(&self) -> mpsc::UnboundedReceiver<OutcomeState> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.inner.lock().subscribers.push(tx);
        rx
    }

    /// Clears the form and returns to `Idle`.
    ///
    /// A request already on the wire keeps running and keeps blocking new
    /// submissions, but its result is no longer shown.
    pub fn reset(&self) {
        let mut inner = self.inner.lock();
        inner.form = FormInput::default();
        inner.displayed = None;
        if inner.outcome != OutcomeState::Idle {
            inner.transition(OutcomeState::Idle);
        }
    }

    /// Submits the current form contents.
    pub async fn submit_form(&self) -> Result<EvaluationResult, SubmitError> {
        let input = self.form();
        self.submit(input).await
    }

    /// Validates `input`, sends it, and settles into `Success` or `Failure`.
    ///
    /// Never leaves the outcome at `Loading`: if the returned future is
    /// dropped before the response arrives, the outcome becomes a `Failure`.
    pub async fn submit(&self, input: FormInput) -> Result<EvaluationResult, SubmitError> {
        let submission_id = Uuid::new_v4();
        let (request, guard) = {
            let mut inner = self.inner.lock();
            if inner.in_flight.is_some() {
                debug!("Ignoring submit while a submission is in flight");
                return Err(SubmitError::Busy);
            }
            match EvaluationRequest::from_input(&input) {
                Ok(request) => {
                    inner.in_flight = Some(submission_id);
                    inner.displayed = Some(submission_id);
                    inner.transition(OutcomeState::Loading);
                    let guard = InFlightGuard {
                        inner: &self.inner,
                        id: submission_id,
                        settled: false,
                    };
                    (request, guard)
                }
                Err(e) => {
                    inner.displayed = None;
                    inner.transition(OutcomeState::Failure(e.user_message()));
                    return Err(e);
                }
            }
        };

        let span = info_span!("submission", %submission_id);
        let result = async {
            info!(file = %request.resume.name, "Submitting resume for evaluation");
            let result = self.client.evaluate(request).await;
            match &result {
                Ok(evaluation) => info!(ats_score = ?evaluation.ats_score, "Evaluation succeeded"),
                Err(e) => warn!(error = %e, "Evaluation failed"),
            }
            result
        }
        .instrument(span)
        .await;

        match &result {
            Ok(evaluation) => guard.settle(OutcomeState::Success(evaluation.clone())),
            Err(e) => guard.settle(OutcomeState::Failure(e.user_message())),
        }
        result
    }
}
