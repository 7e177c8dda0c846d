#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use api_client::{BaseAddress, ClientConfig, ResourceClient};
use domain::{Notification, NotificationLevel, Notifier};

/// Collects every notification so tests can count them.
#[derive(Default)]
pub struct RecordingNotifier {
    seen: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<(NotificationLevel, String)> {
        self.seen
            .lock()
            .unwrap()
            .iter()
            .map(|n| (n.level, n.message.clone()))
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.seen.lock().unwrap().push(notification);
    }
}

pub fn client_for(base: &str) -> (ResourceClient, Arc<RecordingNotifier>) {
    let notifier = Arc::new(RecordingNotifier::default());
    let config = ClientConfig::new(BaseAddress::parse(base).unwrap());
    let client = ResourceClient::new(config, notifier.clone()).unwrap();
    (client, notifier)
}

/// An address nothing is listening on.
pub fn refused_address() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}
