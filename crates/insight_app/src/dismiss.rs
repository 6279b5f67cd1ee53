use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use insight_core::{Msg, NotificationId};

use crate::app::Input;

/// Owns at most one pending dismissal timer.
///
/// Scheduling cancels whatever timer was pending; dropping the owner cancels
/// too, so no expiry can fire against a torn-down shell. Cancellation works
/// by dropping the channel sender the timer thread waits on.
pub struct DismissTimer {
    input_tx: mpsc::Sender<Input>,
    cancel_tx: Option<mpsc::Sender<()>>,
}

impl DismissTimer {
    pub fn new(input_tx: mpsc::Sender<Input>) -> Self {
        Self {
            input_tx,
            cancel_tx: None,
        }
    }

    pub fn schedule(&mut self, id: NotificationId, ttl_ms: u64) {
        self.cancel();
        let (cancel_tx, cancel_rx) = mpsc::channel::<()>();
        let input_tx = self.input_tx.clone();
        thread::spawn(move || {
            if let Err(mpsc::RecvTimeoutError::Timeout) =
                cancel_rx.recv_timeout(Duration::from_millis(ttl_ms))
            {
                let _ = input_tx.send(Input::Msg(Msg::DismissExpired { id }));
            }
        });
        self.cancel_tx = Some(cancel_tx);
    }

    pub fn cancel(&mut self) {
        self.cancel_tx = None;
    }
}

impl Drop for DismissTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
