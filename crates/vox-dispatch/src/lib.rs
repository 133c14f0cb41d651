//! Vox Dispatch: the loop that turns an utterance into a reply.
//!
//! Pipeline per utterance: resolve → authorize → fetch → build view +
//! render response, with the command translator handling command-style
//! input the trigger table does not cover. The dispatcher's contract with
//! the transport layer is total: every failure mode resolves to a valid
//! `(intent, response_text, view)` triple, because the user-facing
//! contract is conversational continuity.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use vox_access::{
    export_text, AccessGate, AuthError, ConversationStore, HistoryEntry, InMemoryConversations,
    LoginOk, SessionStat,
};
use vox_command::{TranslationError, Translator};
use vox_core::{
    AppType, CommandDescriptor, Confidence, DomainData, HelpCategory, Intent, Locale, Namespace,
    Session, ViewDescriptor, ViewKind, VoxError,
};
use vox_data::{DataError, DataSource, SimulatedSource};
use vox_intent::Resolver;
use vox_view::{
    access_denied_view, degraded_view, generic_view, unknown_view, welcome_view, ResponseRenderer,
    ViewRegistry,
};

/// One complete reply to an utterance.
#[derive(Debug, Clone, Serialize)]
pub struct Reply {
    pub intent: Intent,
    pub response_text: String,
    pub view: ViewDescriptor,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<CommandDescriptor>,
    pub timestamp: DateTime<Utc>,
}

impl Reply {
    fn new(intent: Intent, response_text: String, view: ViewDescriptor) -> Self {
        Self {
            intent,
            response_text,
            view,
            command: None,
            timestamp: Utc::now(),
        }
    }

    fn with_command(mut self, command: CommandDescriptor) -> Self {
        self.command = Some(command);
        self
    }

    pub fn is_denied(&self) -> bool {
        self.view.kind == ViewKind::AccessDenied
    }

    pub fn is_fallback(&self) -> bool {
        self.intent.is_fallback()
    }
}

/// Login result in the boundary shape.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub struct Dispatcher {
    resolver: Resolver,
    translator: Translator,
    gate: AccessGate,
    views: ViewRegistry,
    responses: ResponseRenderer,
    data: Arc<dyn DataSource>,
    conversations: Arc<dyn ConversationStore>,
}

impl Dispatcher {
    pub fn new(
        gate: AccessGate,
        data: Arc<dyn DataSource>,
        conversations: Arc<dyn ConversationStore>,
    ) -> Self {
        let resolver = Resolver::with_defaults();
        let views = ViewRegistry::with_defaults(resolver.catalog());
        Self {
            translator: Translator::with_defaults(),
            responses: ResponseRenderer::defaults(),
            resolver,
            gate,
            views,
            data,
            conversations,
        }
    }

    /// Demo wiring: built-in accounts, simulated data, in-memory history.
    pub fn simulated() -> Self {
        Self::new(
            AccessGate::with_defaults(),
            Arc::new(SimulatedSource::new()),
            Arc::new(InMemoryConversations::new()),
        )
    }

    pub fn with_resolver(mut self, resolver: Resolver) -> Self {
        self.views = ViewRegistry::with_defaults(resolver.catalog());
        self.resolver = resolver;
        self
    }

    pub fn with_translator(mut self, translator: Translator) -> Self {
        self.translator = translator;
        self
    }

    /// Process one utterance. Total: never errors, never panics.
    pub fn dispatch(&self, session_id: &str, text: &str) -> Reply {
        let session = self.gate.sessions().get_or_create(session_id);
        let locale = self.resolver.locale_of(text, None);
        let intent = self.resolver.resolve(text, Some(locale));

        tracing::debug!(
            session = %short_id(session_id),
            app = %intent.app,
            action = %intent.action,
            confidence = ?intent.confidence,
            "resolved"
        );

        // Exact triggers go straight to the app flow. Anything weaker first
        // gets a shot at the command translator: an explicit command verb
        // ("ustaw", "restart") outranks a keyword-stem guess.
        let reply = match intent.confidence {
            Confidence::Exact => self.dispatch_app(&session, intent, locale),
            Confidence::Fuzzy | Confidence::Fallback => {
                self.dispatch_command(&session, intent, text, locale)
            }
        };

        self.finish(session_id, text, locale, &reply);
        reply
    }

    /// Welcome reply sent on first contact (WebSocket connect).
    pub fn welcome(&self, session_id: &str) -> Reply {
        let session = self.gate.sessions().get_or_create(session_id);
        let intent = Intent::fallback();
        Reply::new(
            intent,
            self.responses.welcome(session.language),
            welcome_view(),
        )
    }

    pub fn login(&self, session_id: &str, username: &str, password: &str) -> LoginResult {
        match self.gate.login(session_id, username, password) {
            Ok(LoginOk { display_name, role }) => LoginResult {
                success: true,
                display_name: Some(display_name),
                role: Some(role),
                error: None,
            },
            Err(AuthError::InvalidCredentials) => LoginResult {
                success: false,
                display_name: None,
                role: None,
                error: Some("invalid_credentials".to_string()),
            },
        }
    }

    pub fn logout(&self, session_id: &str) {
        self.gate.logout(session_id);
    }

    pub fn commands(&self) -> Vec<HelpCategory> {
        self.resolver.catalog()
    }

    pub fn session_stats(&self) -> Vec<SessionStat> {
        self.gate.sessions().stats()
    }

    pub fn conversation(&self, session_id: &str) -> Vec<HistoryEntry> {
        self.conversations.load(session_id)
    }

    pub fn export_conversation(&self, session_id: &str) -> String {
        export_text(session_id, &self.conversations.load(session_id))
    }

    pub fn end_session(&self, session_id: &str) {
        self.gate.sessions().remove(session_id);
    }

    /// Rebuild a view with fresh data, without touching history. Backs the
    /// frontend's action buttons.
    pub fn regenerate(&self, session_id: &str, app: AppType, action: &str) -> Reply {
        let session = self.gate.sessions().get_or_create(session_id);
        let locale = session.language;
        let intent = Intent::new(app, action, vox_core::Confidence::Exact);

        if !self.gate.authorize(&session, app).is_granted() {
            return Reply::new(intent, self.responses.denied(app, locale), access_denied_view(app));
        }

        match self.fetch(&intent) {
            Ok(data) => {
                let (view, stats) = self.views.build(&intent, &data);
                let response = self.responses.render(&intent, &stats, locale);
                Reply::new(intent, response, view)
            }
            Err(DataError::Unavailable(_)) => Reply::new(
                intent,
                self.responses.degraded(locale),
                degraded_view(app),
            ),
        }
    }

    /// Refresh the session's current view, if it has one.
    pub fn refresh(&self, session_id: &str) -> Option<Reply> {
        let session = self.gate.sessions().get_or_create(session_id);
        session
            .current_app
            .map(|app| self.regenerate(session_id, app, "refresh"))
    }

    fn dispatch_app(&self, session: &Session, intent: Intent, locale: Locale) -> Reply {
        let decision = self.gate.authorize(session, intent.app);
        if !decision.is_granted() {
            tracing::info!(app = %intent.app, "access denied");
            return Reply::new(
                intent.clone(),
                self.responses.denied(intent.app, locale),
                access_denied_view(intent.app),
            );
        }

        let data = match self.fetch(&intent) {
            Ok(data) => data,
            Err(DataError::Unavailable(source)) => {
                tracing::warn!(error = %VoxError::Data(source), "data collaborator unavailable");
                return Reply::new(
                    intent.clone(),
                    self.responses.degraded(locale),
                    degraded_view(intent.app),
                );
            }
        };

        let (view, stats) = self.views.build(&intent, &data);
        let response = self.responses.render(&intent, &stats, locale);

        let command = synthesize_command(&intent);
        self.gate.sessions().with_session(&session.id, |s| {
            s.current_app = Some(intent.app);
            s.history.push(command.clone());
        });

        Reply::new(intent, response, view).with_command(command)
    }

    fn dispatch_command(
        &self,
        session: &Session,
        intent: Intent,
        text: &str,
        locale: Locale,
    ) -> Reply {
        let context_app = session.current_app.unwrap_or(AppType::System);

        match self.translator.text_to_command(text, context_app) {
            Ok(command) => {
                if let Some(reply) =
                    self.deny_command(session, &intent, &command, context_app, locale)
                {
                    return reply;
                }

                let confirmation = self.translator.command_to_text(&command);
                let view = command_view(&command, &confirmation);

                self.gate.sessions().with_session(&session.id, |s| {
                    s.history.push(command.clone());
                });

                Reply::new(intent, confirmation, view).with_command(command)
            }
            Err(TranslationError::InvalidParameter { name, .. }) => Reply::new(
                intent,
                self.responses.invalid_parameter(&name, locale),
                generic_view(AppType::System),
            ),
            Err(err) => {
                // No command either; a fuzzy intent still has an app to show.
                if intent.confidence == Confidence::Fuzzy {
                    return self.dispatch_app(session, intent, locale);
                }
                tracing::debug!(error = %VoxError::Translate(err.to_string()), "not translatable");
                Reply::new(
                    intent,
                    self.responses.not_understood(locale),
                    unknown_view(&self.resolver.catalog()),
                )
            }
        }
    }

    /// Namespace gating for translated commands: system targets are public,
    /// user and admin targets follow app authorization, and admin targets
    /// additionally require an authenticated session.
    fn deny_command(
        &self,
        session: &Session,
        intent: &Intent,
        command: &CommandDescriptor,
        context_app: AppType,
        locale: Locale,
    ) -> Option<Reply> {
        let denied = match command.namespace {
            Namespace::System => false,
            Namespace::User => !self.gate.authorize(session, context_app).is_granted(),
            Namespace::Admin => {
                !session.is_authenticated()
                    || !self.gate.authorize(session, context_app).is_granted()
            }
        };

        denied.then(|| {
            tracing::info!(target = %command.target, "command denied");
            Reply::new(
                intent.clone(),
                self.responses.denied(context_app, locale),
                access_denied_view(context_app),
            )
        })
    }

    fn fetch(&self, intent: &Intent) -> Result<DomainData, DataError> {
        match intent.app {
            AppType::Documents => self
                .data
                .documents()
                .map(|items| DomainData::Documents { items }),
            AppType::Cameras => self.data.cameras().map(|items| DomainData::Cameras { items }),
            AppType::Sales => self.data.sales().map(|snapshot| DomainData::Sales { snapshot }),
            AppType::Home => self.data.home().map(|rooms| DomainData::Home { rooms }),
            AppType::Analytics => self
                .data
                .analytics()
                .map(|series| DomainData::Analytics { series }),
            AppType::Weather => {
                let city = intent
                    .parameters
                    .get("city")
                    .map(String::as_str)
                    .unwrap_or_else(|| self.resolver.default_city());
                self.data.weather(city).map(|report| DomainData::Weather { report })
            }
            AppType::System => Ok(DomainData::None),
        }
    }

    fn finish(&self, session_id: &str, text: &str, locale: Locale, reply: &Reply) {
        self.gate
            .sessions()
            .with_session(session_id, |s| s.language = locale);

        self.conversations.append(
            session_id,
            HistoryEntry {
                command: text.to_string(),
                response: reply.response_text.clone(),
                app: reply.intent.app,
                timestamp: reply.timestamp,
            },
        );
    }
}

fn synthesize_command(intent: &Intent) -> CommandDescriptor {
    let namespace = match intent.app {
        AppType::System => Namespace::System,
        _ => Namespace::User,
    };
    let mut command = CommandDescriptor::new(namespace, intent.action.clone());
    for (key, value) in &intent.parameters {
        command = command.with_param(key.to_uppercase(), value.clone());
    }
    command
}

fn command_view(command: &CommandDescriptor, confirmation: &str) -> ViewDescriptor {
    ViewDescriptor::new(AppType::System, ViewKind::Generic, "Komenda")
        .with_message(confirmation)
        .with_data(serde_json::json!({ "command": command.raw }))
}

fn short_id(id: &str) -> String {
    id.chars().take(8).collect()
}
