use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::data::DataCollection;
use crate::hub::Hub;
use crate::{GlueError, Result};

/// Saved application state. On disk this is the JSON pair `[data_collection, hub]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "(DataCollection, Hub)", into = "(DataCollection, Hub)")]
pub struct Session {
    pub data: DataCollection,
    pub hub: Hub,
}

impl From<(DataCollection, Hub)> for Session {
    fn from((data, hub): (DataCollection, Hub)) -> Self {
        Self { data, hub }
    }
}

impl From<Session> for (DataCollection, Hub) {
    fn from(session: Session) -> Self {
        (session.data, session.hub)
    }
}

impl Session {
    pub fn new(data: DataCollection, hub: Hub) -> Self {
        Self { data, hub }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| GlueError::read(path, e))?;
        let session = Self::from_json(&content)?;
        debug!(
            path = %path.display(),
            datasets = session.data.len(),
            subscriptions = session.hub.subscriptions().len(),
            "session loaded"
        );
        Ok(session)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let session: Session = serde_json::from_str(content)?;
        session.data.validate()?;
        for subscription in session.hub.dangling(&session.data) {
            warn!(
                subscriber = %subscription.subscriber,
                data = %subscription.data,
                "subscription refers to a dataset missing from the session"
            );
        }
        Ok(session)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        debug!(path = %path.display(), "session saved");
        Ok(())
    }

    pub fn into_parts(self) -> (DataCollection, Hub) {
        self.into()
    }
}
