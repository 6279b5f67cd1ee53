//! Command/event bridge between the synchronous shell and the async client.
//!
//! One background thread owns a tokio runtime; commands come in over a std
//! channel and results go back the same way, so callers never block on I/O.

use std::sync::{mpsc, Arc, Mutex};
use std::thread;

use crate::api::{DashboardApi, PainPointQuery};
use crate::client::{ClientSettings, ReqwestDashboardApi};
use crate::poller::{PollerHandle, PollerSettings, StatusPoller, StatusSink};
use crate::session::{SessionGate, SessionVerdict};
use crate::types::{ApiError, ApiFailure, PollerEvent};
use crate::wire::{
    AnalysesPayload, PainPointsPayload, RecommendationsPayload, ScrapeAccepted, ScrapeRequest,
};

#[derive(Debug, Clone, PartialEq)]
pub enum ClientCommand {
    ProbeSession,
    Login { username: String, password: String },
    Register {
        username: String,
        password: String,
        email: Option<String>,
    },
    Logout,
    TriggerJob(ScrapeRequest),
    FetchIssues { subjects: Vec<String> },
    FetchRawIssues(PainPointQuery),
    FetchRecommendations { subjects: Vec<String> },
    StartPolling,
    StopPolling,
    RearmPolling,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClientEvent {
    SessionProbed { authenticated: bool },
    LoginSucceeded,
    LoginFailed { message: String },
    RegisterSucceeded,
    RegisterFailed { message: String },
    LoggedOut,
    JobAccepted(ScrapeAccepted),
    JobRejected { message: String },
    IssuesLoaded(AnalysesPayload),
    IssuesFailed { message: String },
    RawIssuesLoaded(PainPointsPayload),
    RawIssuesFailed { message: String },
    RecommendationsLoaded(RecommendationsPayload),
    RecommendationsFailed { message: String },
    Poller(PollerEvent),
}

/// Owns the client thread. Dropping the handle closes the command channel,
/// which ends the thread and tears down the runtime with the poller and any
/// in-flight requests.
pub struct ApiHandle {
    cmd_tx: mpsc::Sender<ClientCommand>,
    event_rx: Mutex<mpsc::Receiver<ClientEvent>>,
}

impl ApiHandle {
    pub fn new(settings: ClientSettings, poller: PollerSettings) -> Result<Self, ApiError> {
        let api = Arc::new(ReqwestDashboardApi::new(settings)?);
        Ok(Self::with_api(api, poller))
    }

    /// Builds a handle over any `DashboardApi`; seam for tests.
    pub fn with_api(api: Arc<dyn DashboardApi>, poller: PollerSettings) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        thread::spawn(move || run_client_thread(api, poller, cmd_rx, event_tx));
        Self {
            cmd_tx,
            event_rx: Mutex::new(event_rx),
        }
    }

    pub fn send(&self, command: ClientCommand) {
        let _ = self.cmd_tx.send(command);
    }

    pub fn try_recv(&self) -> Option<ClientEvent> {
        self.event_rx
            .lock()
            .expect("client event lock")
            .try_recv()
            .ok()
    }
}

struct EventSink {
    tx: mpsc::Sender<ClientEvent>,
}

impl StatusSink for EventSink {
    fn emit(&self, event: PollerEvent) {
        let _ = self.tx.send(ClientEvent::Poller(event));
    }
}

fn run_client_thread(
    api: Arc<dyn DashboardApi>,
    poller_settings: PollerSettings,
    cmd_rx: mpsc::Receiver<ClientCommand>,
    event_tx: mpsc::Sender<ClientEvent>,
) {
    let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
    let _guard = runtime.enter();
    let gate = SessionGate::new(api.clone());
    let sink: Arc<dyn StatusSink> = Arc::new(EventSink {
        tx: event_tx.clone(),
    });
    let mut poller: Option<PollerHandle> = None;

    while let Ok(command) = cmd_rx.recv() {
        match command {
            ClientCommand::StartPolling => {
                if poller.is_none() {
                    poller = Some(StatusPoller::start(
                        api.clone(),
                        poller_settings.clone(),
                        sink.clone(),
                    ));
                }
            }
            ClientCommand::StopPolling => {
                if let Some(handle) = poller.take() {
                    handle.stop();
                }
            }
            ClientCommand::RearmPolling => match &poller {
                Some(handle) => handle.rearm(),
                None => {
                    poller = Some(StatusPoller::start(
                        api.clone(),
                        poller_settings.clone(),
                        sink.clone(),
                    ));
                }
            },
            command => {
                let api = api.clone();
                let gate = gate.clone();
                let event_tx = event_tx.clone();
                tokio::spawn(async move {
                    if let Some(event) = handle_request(api.as_ref(), &gate, command).await {
                        let _ = event_tx.send(event);
                    }
                });
            }
        }
    }
}

async fn handle_request(
    api: &dyn DashboardApi,
    gate: &SessionGate,
    command: ClientCommand,
) -> Option<ClientEvent> {
    Some(match command {
        ClientCommand::ProbeSession => ClientEvent::SessionProbed {
            authenticated: gate.probe().await == SessionVerdict::Authenticated,
        },
        ClientCommand::Login { username, password } => {
            match gate.login(&username, &password).await {
                Ok(()) => ClientEvent::LoginSucceeded,
                Err(err) => ClientEvent::LoginFailed {
                    message: err.message,
                },
            }
        }
        ClientCommand::Register {
            username,
            password,
            email,
        } => match gate.register(&username, &password, email).await {
            Ok(()) => ClientEvent::RegisterSucceeded,
            Err(err) => ClientEvent::RegisterFailed {
                message: err.message,
            },
        },
        ClientCommand::Logout => {
            gate.logout().await;
            ClientEvent::LoggedOut
        }
        ClientCommand::TriggerJob(request) => match api.trigger_job(&request).await {
            Ok(accepted) => ClientEvent::JobAccepted(accepted),
            Err(err) => action_failure(err, |message| ClientEvent::JobRejected { message }),
        },
        ClientCommand::FetchIssues { subjects } => match api.analyses(&subjects).await {
            Ok(payload) => ClientEvent::IssuesLoaded(payload),
            Err(err) => action_failure(err, |message| ClientEvent::IssuesFailed { message }),
        },
        ClientCommand::FetchRawIssues(query) => match api.pain_points(&query).await {
            Ok(payload) => ClientEvent::RawIssuesLoaded(payload),
            Err(err) => action_failure(err, |message| ClientEvent::RawIssuesFailed { message }),
        },
        ClientCommand::FetchRecommendations { subjects } => {
            fetch_recommendations(api, &subjects).await
        }
        // Poller lifecycle is handled on the client thread itself.
        ClientCommand::StartPolling
        | ClientCommand::StopPolling
        | ClientCommand::RearmPolling => return None,
    })
}

/// Saved sets first; when none exist yet, fall back to asking the backend to
/// generate them for the named subjects.
async fn fetch_recommendations(api: &dyn DashboardApi, subjects: &[String]) -> ClientEvent {
    let fallback = |err| action_failure(err, |message| ClientEvent::RecommendationsFailed { message });
    match api.recommendations(subjects).await {
        Ok(payload) if payload.recommendations.is_empty() && !subjects.is_empty() => {
            match api.generate_recommendations(subjects).await {
                Ok(generated) => ClientEvent::RecommendationsLoaded(generated),
                Err(err) => fallback(err),
            }
        }
        Ok(payload) => ClientEvent::RecommendationsLoaded(payload),
        Err(err) => fallback(err),
    }
}

/// An expired session during any action flips the gate rather than surfacing
/// a generic error.
fn action_failure(err: ApiError, otherwise: impl FnOnce(String) -> ClientEvent) -> ClientEvent {
    if err.kind == ApiFailure::Unauthorized {
        ClientEvent::SessionProbed {
            authenticated: false,
        }
    } else {
        otherwise(err.message)
    }
}
