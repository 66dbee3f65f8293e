use std::sync::{Arc, Mutex};

use folio_core::contact::{ContactPayload, RelayError};

/// Where a background submission drops its result for the next frame.
pub type PendingResult = Arc<Mutex<Option<Result<(), RelayError>>>>;

fn deliver(slot: &PendingResult, result: Result<(), RelayError>, ctx: &egui::Context) {
    let mut lock = slot.lock().unwrap_or_else(|e| e.into_inner());
    *lock = Some(result);
    ctx.request_repaint();
}

#[cfg(not(target_arch = "wasm32"))]
mod http {
    use std::time::Duration;

    use folio_core::contact::{ContactPayload, ContactRelay, RelayError};
    use reqwest::header::ACCEPT;

    /// Blocking JSON POST to the form relay.
    pub struct HttpRelay {
        client: reqwest::blocking::Client,
        endpoint: String,
    }

    impl HttpRelay {
        pub fn new(endpoint: String) -> Result<Self, RelayError> {
            let client = reqwest::blocking::Client::builder()
                .timeout(Duration::from_secs(15))
                .build()
                .map_err(|e| RelayError::Transport(e.to_string()))?;
            Ok(Self { client, endpoint })
        }
    }

    impl ContactRelay for HttpRelay {
        fn submit(&mut self, payload: &ContactPayload) -> Result<(), RelayError> {
            let response = self
                .client
                .post(&self.endpoint)
                .header(ACCEPT, "application/json")
                .json(payload)
                .send()
                .map_err(|e| RelayError::Transport(e.to_string()))?;
            let status = response.status();
            if status.is_success() {
                Ok(())
            } else {
                Err(RelayError::Rejected(status.as_u16()))
            }
        }
    }
}

/// Send `payload` off the UI thread; the result lands in `slot`.
#[cfg(not(target_arch = "wasm32"))]
pub fn spawn_submit(
    endpoint: String,
    payload: ContactPayload,
    slot: PendingResult,
    ctx: egui::Context,
) {
    use folio_core::contact::ContactRelay;

    std::thread::spawn(move || {
        let result = http::HttpRelay::new(endpoint).and_then(|mut relay| relay.submit(&payload));
        deliver(&slot, result, &ctx);
    });
}

#[cfg(target_arch = "wasm32")]
pub fn spawn_submit(
    endpoint: String,
    payload: ContactPayload,
    slot: PendingResult,
    ctx: egui::Context,
) {
    wasm_bindgen_futures::spawn_local(async move {
        let result = folio_wasm::post_contact(&endpoint, &payload).await;
        deliver(&slot, result, &ctx);
    });
}
