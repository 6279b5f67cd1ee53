//! Executes the effects the core update function asks for.

use std::path::PathBuf;
use std::sync::Arc;

use client_logging::client_warn;
use insight_client::{ApiHandle, ClientCommand, PainPointQuery};
use insight_core::Effect;

use crate::convert;
use crate::dismiss::DismissTimer;
use crate::persistence;

pub struct EffectRunner {
    api: Arc<ApiHandle>,
    dismiss: DismissTimer,
    state_dir: PathBuf,
}

impl EffectRunner {
    pub fn new(api: Arc<ApiHandle>, dismiss: DismissTimer, state_dir: PathBuf) -> Self {
        Self {
            api,
            dismiss,
            state_dir,
        }
    }

    pub fn run(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::ProbeSession => self.api.send(ClientCommand::ProbeSession),
                Effect::StartPolling => self.api.send(ClientCommand::StartPolling),
                Effect::StopPolling => self.api.send(ClientCommand::StopPolling),
                Effect::RearmPolling => self.api.send(ClientCommand::RearmPolling),
                Effect::EndSession => self.api.send(ClientCommand::Logout),
                Effect::TriggerJob(request) => self
                    .api
                    .send(ClientCommand::TriggerJob(convert::scrape_request(&request))),
                Effect::FetchIssues { subjects } => {
                    self.api.send(ClientCommand::FetchIssues { subjects });
                }
                Effect::FetchRawIssues { subject, limit } => {
                    self.api.send(ClientCommand::FetchRawIssues(PainPointQuery {
                        subject,
                        limit: Some(limit),
                        min_severity: None,
                    }));
                }
                Effect::FetchRecommendations { subjects } => {
                    self.api
                        .send(ClientCommand::FetchRecommendations { subjects });
                }
                Effect::ScheduleDismiss { id, ttl_ms } => self.dismiss.schedule(id, ttl_ms),
                Effect::CancelDismiss => self.dismiss.cancel(),
                Effect::PersistJobRequest(request) => {
                    if let Err(err) = persistence::save_job_request(&self.state_dir, &request) {
                        client_warn!("failed to persist the job request: {err}");
                    }
                }
            }
        }
    }
}
