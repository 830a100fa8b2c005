use chrono::Utc;
use log::{debug, info, warn};
use nyayadoot_api::{ApiError, QueryClient, QueryRequest, QueryResponse};
use nyayadoot_types::{Message, Session};
use std::collections::HashMap;

use crate::config::ChatConfig;
use crate::history::HistoryStore;
use crate::session_id::generate_session_id;
use crate::suggestions::{prompts_for, WELCOME_PROMPTS};

/// Result of one call into the turn controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Blank input, nothing happened
    Ignored,
    /// A request for the active session is still outstanding
    Busy,
    /// The backend answered and the session was stored
    Answered,
    /// The backend failed; the error notice was appended
    Failed,
    /// The reply belonged to a session that is no longer active
    Detached,
    /// The turn was already completed; nothing changed
    Stale,
}

/// Why `begin_turn` refused to start a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnRejected {
    Empty,
    Busy,
}

impl From<TurnRejected> for TurnOutcome {
    fn from(rejected: TurnRejected) -> Self {
        match rejected {
            TurnRejected::Empty => TurnOutcome::Ignored,
            TurnRejected::Busy => TurnOutcome::Busy,
        }
    }
}

/// A turn whose request has been issued but not yet answered
///
/// Carries the session id and transcript as they were when the request went
/// out, so the answer lands on the right session whatever the user did in
/// the meantime. Consumed by `complete_turn`, so each turn completes once.
#[derive(Debug)]
pub struct PendingTurn {
    turn: u64,
    session_id: String,
    query: String,
    transcript: Vec<Message>,
}

impl PendingTurn {
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn request(&self) -> QueryRequest {
        QueryRequest {
            query: self.query.clone(),
            session_id: self.session_id.clone(),
        }
    }
}

/// Active conversation plus the stored history
pub struct ChatController {
    config: ChatConfig,
    history: HistoryStore,
    session_id: String,
    messages: Vec<Message>,
    user_message_count: u32,
    suggestion_prompts: [&'static str; 4],
    popup_visible: bool,
    input: String,
    // session id -> number of the turn outstanding for it
    in_flight: HashMap<String, u64>,
    next_turn: u64,
}

impl ChatController {
    pub fn new(config: ChatConfig, history: HistoryStore) -> Self {
        let session_id = generate_session_id();
        debug!("starting with session {}", session_id);
        Self {
            config,
            history,
            session_id,
            messages: Vec::new(),
            user_message_count: 0,
            suggestion_prompts: WELCOME_PROMPTS,
            popup_visible: false,
            input: String::new(),
            in_flight: HashMap::new(),
            next_turn: 0,
        }
    }

    // ------------------------------------------------------------------
    // State accessors
    // ------------------------------------------------------------------

    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn user_message_count(&self) -> u32 {
        self.user_message_count
    }

    pub fn suggestion_prompts(&self) -> &[&'static str; 4] {
        &self.suggestion_prompts
    }

    pub fn popup_visible(&self) -> bool {
        self.popup_visible
    }

    pub fn dismiss_popup(&mut self) {
        self.popup_visible = false;
    }

    /// True while a request for the active session is outstanding
    pub fn is_sending(&self) -> bool {
        self.in_flight.contains_key(&self.session_id)
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Stored sessions, most recent first
    pub fn sessions(&self) -> Vec<Session> {
        self.history.load()
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    // ------------------------------------------------------------------
    // Turns
    // ------------------------------------------------------------------

    /// Run one full exchange with the backend
    pub async fn submit_turn(&mut self, client: &dyn QueryClient, text: &str) -> TurnOutcome {
        let pending = match self.begin_turn(text) {
            Ok(pending) => pending,
            Err(rejected) => return rejected.into(),
        };
        let result = client.query(pending.request()).await;
        self.complete_turn(pending, result)
    }

    /// Submit whatever is in the input buffer
    pub async fn submit_input(&mut self, client: &dyn QueryClient) -> TurnOutcome {
        let text = self.input.clone();
        self.submit_turn(client, &text).await
    }

    /// Record the user's message and hand back the request to send
    pub fn begin_turn(&mut self, text: &str) -> Result<PendingTurn, TurnRejected> {
        if text.trim().is_empty() {
            return Err(TurnRejected::Empty);
        }
        if self.is_sending() {
            debug!("turn rejected, session {} is waiting on a reply", self.session_id);
            return Err(TurnRejected::Busy);
        }

        self.messages.push(Message::user(text));
        self.user_message_count += 1;
        if self.config.triggers_popup(self.user_message_count) {
            self.popup_visible = true;
        }
        self.next_turn += 1;
        self.in_flight.insert(self.session_id.clone(), self.next_turn);

        Ok(PendingTurn {
            turn: self.next_turn,
            session_id: self.session_id.clone(),
            query: text.to_string(),
            transcript: self.messages.clone(),
        })
    }

    /// Apply the backend's answer (or failure) for a turn
    pub fn complete_turn(
        &mut self,
        pending: PendingTurn,
        result: Result<QueryResponse, ApiError>,
    ) -> TurnOutcome {
        if self.in_flight.get(&pending.session_id) != Some(&pending.turn) {
            debug!(
                "ignoring completion of turn {} for session {}, it is not outstanding",
                pending.turn, pending.session_id
            );
            return TurnOutcome::Stale;
        }
        self.in_flight.remove(&pending.session_id);

        if pending.session_id != self.session_id {
            return self.complete_detached(pending, result);
        }

        let PendingTurn { transcript, .. } = pending;
        self.messages = transcript;
        self.input.clear();

        match result {
            Ok(reply) => {
                let stage = reply.stage();
                self.suggestion_prompts = prompts_for(stage);
                self.messages.push(Message::assistant(
                    reply.answer,
                    reply.references,
                    reply.cases,
                    stage,
                ));
                self.persist(Session::new(self.session_id.clone(), self.messages.clone()));
                TurnOutcome::Answered
            }
            Err(e) => {
                warn!("query for session {} failed: {}", self.session_id, e);
                self.messages
                    .push(Message::assistant_notice(self.config.error_message.clone()));
                TurnOutcome::Failed
            }
        }
    }

    fn complete_detached(
        &mut self,
        pending: PendingTurn,
        result: Result<QueryResponse, ApiError>,
    ) -> TurnOutcome {
        match result {
            Ok(reply) => {
                info!(
                    "late reply for inactive session {}, storing it there",
                    pending.session_id
                );
                let stage = reply.stage();
                let mut transcript = pending.transcript;
                transcript.push(Message::assistant(
                    reply.answer,
                    reply.references,
                    reply.cases,
                    stage,
                ));
                self.persist(Session::new(pending.session_id, transcript));
            }
            Err(e) => {
                debug!(
                    "dropping failed reply for inactive session {}: {}",
                    pending.session_id, e
                );
            }
        }
        TurnOutcome::Detached
    }

    fn persist(&self, mut session: Session) {
        session.last_message_time = Utc::now();
        if let Err(e) = self.history.upsert(session) {
            warn!("could not store session history: {}", e);
        }
    }

    // ------------------------------------------------------------------
    // Session switching
    // ------------------------------------------------------------------

    /// Begin a fresh conversation. Stored history is left as it is.
    pub fn start_new_session(&mut self) {
        self.session_id = generate_session_id();
        self.messages.clear();
        self.user_message_count = 0;
        debug!("started new session {}", self.session_id);
    }

    /// Make a stored session the active one
    pub fn select_session(&mut self, session: &Session) {
        self.session_id = session.session_id.clone();
        self.messages = session.messages.clone();
        if self.config.reset_count_on_select {
            self.user_message_count = 0;
        }
        debug!(
            "switched to session {} ({} messages)",
            self.session_id,
            self.messages.len()
        );
    }

    /// Select the stored session at `index` (0 = most recent)
    pub fn select_session_by_index(&mut self, index: usize) -> Option<Session> {
        let session = self.history.load().into_iter().nth(index)?;
        self.select_session(&session);
        Some(session)
    }
}
