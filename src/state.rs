use crate::models::AppData;
use std::collections::{BTreeMap, HashSet};
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub data: Arc<Mutex<AppData>>,
    /// Bearer token -> account id. Ephemeral; a restart logs everyone out.
    pub sessions: Arc<Mutex<BTreeMap<String, u64>>>,
    /// Cards with a toggle currently being applied. A second toggle for the
    /// same card is rejected instead of racing the first.
    pub toggles_in_flight: Arc<Mutex<HashSet<u64>>>,
}

impl AppState {
    pub fn new(data_path: PathBuf, data: AppData) -> Self {
        Self {
            data_path,
            data: Arc::new(Mutex::new(data)),
            sessions: Arc::new(Mutex::new(BTreeMap::new())),
            toggles_in_flight: Arc::new(Mutex::new(HashSet::new())),
        }
    }
}
