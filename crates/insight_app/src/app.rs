//! Shell wiring: one input channel feeds the core update loop; the client
//! thread and the stdin reader both produce into it.

use std::io::{self, BufRead};
use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use anyhow::Context;
use client_logging::client_info;
use insight_client::{ApiHandle, ClientCommand, ClientSettings, PollerSettings};
use insight_core::{update, AppState, Effect, Msg};

use crate::commands::{self, Command};
use crate::convert;
use crate::dismiss::DismissTimer;
use crate::effects::EffectRunner;
use crate::persistence;
use crate::render;

/// Everything the main loop reacts to.
#[derive(Debug, PartialEq)]
pub enum Input {
    Msg(Msg),
    Client(ClientCommand),
    Show,
    Help,
    Unknown(String),
    Quit,
}

pub fn run() -> anyhow::Result<()> {
    let settings = ClientSettings {
        base_url: std::env::var("INSIGHT_API_URL")
            .unwrap_or_else(|_| ClientSettings::default().base_url),
        ..ClientSettings::default()
    };
    let api = Arc::new(
        ApiHandle::new(settings, PollerSettings::default()).context("build the REST client")?,
    );
    let state_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    let (input_tx, input_rx) = mpsc::channel::<Input>();
    spawn_event_pump(api.clone(), input_tx.clone());
    spawn_stdin_reader(input_tx.clone());

    let dismiss = DismissTimer::new(input_tx);
    let mut runner = EffectRunner::new(api.clone(), dismiss, state_dir.clone());
    let mut state = AppState::new();

    render::greeting();

    // Restore the saved form, then classify the session.
    dispatch(
        &mut state,
        Msg::RestoreJobRequest(persistence::load_job_request(&state_dir)),
        &mut runner,
    );
    runner.run(vec![Effect::ProbeSession]);

    loop {
        match input_rx.recv() {
            Ok(Input::Msg(msg)) => dispatch(&mut state, msg, &mut runner),
            Ok(Input::Client(command)) => api.send(command),
            Ok(Input::Show) => render::render(&state.view()),
            Ok(Input::Help) => render::help(),
            Ok(Input::Unknown(line)) => render::unknown(&line),
            Ok(Input::Quit) | Err(_) => break,
        }
    }

    // The poller must not outlive the shell; the dismiss timer dies with the
    // runner it belongs to.
    runner.run(vec![Effect::StopPolling, Effect::CancelDismiss]);
    client_info!("shutting down");
    Ok(())
}

fn dispatch(state: &mut AppState, msg: Msg, runner: &mut EffectRunner) {
    let current = std::mem::take(state);
    let (mut next, effects) = update(current, msg);
    runner.run(effects);
    if next.consume_dirty() {
        render::render(&next.view());
    }
    *state = next;
}

fn spawn_event_pump(api: Arc<ApiHandle>, input_tx: mpsc::Sender<Input>) {
    thread::spawn(move || loop {
        match api.try_recv() {
            Some(event) => {
                if input_tx.send(Input::Msg(convert::event_to_msg(event))).is_err() {
                    break;
                }
            }
            None => thread::sleep(Duration::from_millis(20)),
        }
    });
}

fn spawn_stdin_reader(input_tx: mpsc::Sender<Input>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            let input = match commands::parse(&line) {
                Command::Dispatch(msg) => Input::Msg(msg),
                Command::Client(command) => Input::Client(command),
                Command::Show => Input::Show,
                Command::Help => Input::Help,
                Command::Quit => Input::Quit,
                Command::Unknown(text) => Input::Unknown(text),
            };
            let quitting = matches!(input, Input::Quit);
            if input_tx.send(input).is_err() || quitting {
                return;
            }
        }
        // Stdin closed: treat it like an explicit quit.
        let _ = input_tx.send(Input::Quit);
    });
}
