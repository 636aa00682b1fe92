use std::cell::RefCell;
use std::collections::HashMap;

use super::{HaEntity, HubClient, HubError, NotificationPayload};

/// In-memory hub for tests. Channels without a configured status answer 200.
pub struct FakeHub {
    states: Result<Vec<HaEntity>, u16>,
    channel_status: HashMap<String, u16>,
    pub sent: RefCell<Vec<(String, NotificationPayload)>>,
}

impl FakeHub {
    pub fn with_states(states: Vec<HaEntity>) -> Self {
        return FakeHub {
            states: Ok(states),
            channel_status: HashMap::new(),
            sent: RefCell::new(Vec::new()),
        };
    }

    pub fn failing_fetch(status: u16) -> Self {
        return FakeHub {
            states: Err(status),
            channel_status: HashMap::new(),
            sent: RefCell::new(Vec::new()),
        };
    }

    pub fn channel_answers(mut self, channel: &str, status: u16) -> Self {
        self.channel_status.insert(channel.to_string(), status);
        return self;
    }

    pub fn sent_to(&self, channel: &str) -> Option<NotificationPayload> {
        return self
            .sent
            .borrow()
            .iter()
            .find(|(c, _)| c == channel)
            .map(|(_, p)| p.clone());
    }
}

impl HubClient for FakeHub {
    async fn fetch_states(&self) -> Result<Vec<HaEntity>, HubError> {
        match &self.states {
            Ok(states) => Ok(states.clone()),
            Err(status) => Err(HubError::Status(*status)),
        }
    }

    async fn send_notification(&self, channel: &str, payload: &NotificationPayload) -> Result<(), HubError> {
        self.sent.borrow_mut().push((channel.to_string(), payload.clone()));
        let status = self.channel_status.get(channel).copied().unwrap_or(200);
        if !(200..300).contains(&status) {
            return Err(HubError::Status(status));
        }
        return Ok(());
    }
}
