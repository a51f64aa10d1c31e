use crate::blog::SessionID;
use crate::config::Config;
use crate::store::Repository;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

pub mod extract;
pub mod media;
pub mod session;

pub type SharedState = axum::extract::State<Arc<State>>;
pub type NestedRouter = axum::Router<Arc<State>>;

#[derive(Debug)]
pub struct State {
    pub store: Box<dyn Repository>,
    pub sessions: RwLock<HashMap<SessionID, session::Session>>,
    pub config: Config,
}

impl State {
    pub fn new(store: impl Repository + 'static, config: Config) -> State {
        State {
            store: Box::new(store),
            sessions: RwLock::new(HashMap::new()),
            config,
        }
    }
}
