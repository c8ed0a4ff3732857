use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, PoisonError};

use super::ResolutionChannel;
use crate::error::BuildError;

/// The channels registered by one build unit, by name.
#[derive(Debug, Default)]
pub struct ChannelContainer {
    channels: Mutex<BTreeMap<String, Arc<ResolutionChannel>>>,
}

impl ChannelContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `channel`, or return the identical channel already
    /// registered under its name.
    pub fn maybe_create(&self, channel: ResolutionChannel) -> Result<Arc<ResolutionChannel>, BuildError> {
        let mut channels = self.channels.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(existing) = channels.get(channel.name()) {
            if **existing == channel {
                return Ok(existing.clone());
            }
            return Err(BuildError::ChannelConflict {
                name: channel.name().to_string(),
            });
        }
        let channel = Arc::new(channel);
        channels.insert(channel.name().to_string(), channel.clone());
        Ok(channel)
    }

    pub fn get(&self, name: &str) -> Option<Arc<ResolutionChannel>> {
        self.channels
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    pub fn names(&self) -> Vec<String> {
        self.channels
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.channels
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
