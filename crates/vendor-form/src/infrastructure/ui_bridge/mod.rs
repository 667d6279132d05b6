//! UI command bridge: exposes the form session to the rendering shell.
//!
//! Every command lives here and delegates to the shared [`AppState`].  The
//! shell is the only consumer of this module; it must NOT be imported by the
//! application or domain layers.
//!
//! # Render model
//!
//! After each command the shell receives a complete [`FormViewDto`] and
//! renders it as-is.  It keeps no handles between renders and never decides
//! on its own which fields are read-only or which transport options are
//! disabled; both are derived state in the DTO.
//!
//! # `CommandResult<T>` wrapper
//!
//! All commands return `CommandResult<T>` rather than `Result<T, E>`, so every
//! response has the same shape: `{ success: bool, data: T | null, error: string | null }`.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, Mutex};
use tracing::{debug, warn};

use vendor_form_core::{
    FieldId, GeoMode, LookupOutcome, SyncSettings, TransportMode, TransportOption,
    ValidationError,
};

use crate::application::edit_form::{FormEvent, FormSession, FormStore};
use crate::application::geo_sync::{GeoSyncService, LookupResult, PincodeResolver};
use crate::infrastructure::form_store::InMemoryFormStore;
use crate::infrastructure::geo_lookup::DirectoryResolver;
use crate::infrastructure::storage::config::AppConfig;

// ── Shared application state ──────────────────────────────────────────────────

/// State shared between bridge commands.
///
/// The session sits behind an async Tokio mutex because commands and the
/// lookup-result pump run as separate tasks.
pub struct AppState {
    pub session: Mutex<FormSession<InMemoryFormStore>>,
    pub geo: GeoSyncService,
}

impl AppState {
    /// Builds state from the loaded configuration, resolving pincodes from
    /// its directory.
    ///
    /// Returns the receiver on which lookup results arrive; pass each one to
    /// [`apply_lookup_result`].
    pub fn new(config: &AppConfig) -> (Arc<Self>, mpsc::UnboundedReceiver<LookupResult>) {
        let resolver = DirectoryResolver::new(config.directory.iter().cloned());
        Self::with_resolver(
            Arc::new(resolver),
            config.form.sync_settings(),
            config.form.lookup_timeout(),
        )
    }

    /// Builds state around an arbitrary resolver.
    pub fn with_resolver(
        resolver: Arc<dyn PincodeResolver>,
        settings: SyncSettings,
        timeout: Option<Duration>,
    ) -> (Arc<Self>, mpsc::UnboundedReceiver<LookupResult>) {
        let (geo, results_rx) = GeoSyncService::new(resolver, timeout);
        let state = Arc::new(Self {
            session: Mutex::new(FormSession::new(InMemoryFormStore::new(), settings)),
            geo,
        });
        (state, results_rx)
    }
}

// ── Data Transfer Objects ─────────────────────────────────────────────────────

/// How prominently a message should be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Field validation failure.
    Error,
    /// Recoverable condition the user can work around (failed pincode lookup).
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageDto {
    pub severity: Severity,
    pub text: String,
}

impl From<ValidationError> for MessageDto {
    fn from(e: ValidationError) -> Self {
        Self {
            severity: Severity::Error,
            text: e.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDto {
    pub id: FieldId,
    pub value: String,
    pub max_length: Option<usize>,
    pub required: bool,
    pub error: Option<MessageDto>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeoDto {
    pub pincode: String,
    pub state: String,
    pub city: String,
    pub mode: GeoMode,
    /// `true` when state and city inputs should accept typing.
    pub editable: bool,
    /// `true` while a lookup is in flight; show a spinner.
    pub loading: bool,
    pub warning: Option<MessageDto>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportDto {
    pub selected: TransportMode,
    pub options: Vec<TransportOption>,
}

/// Everything the shell needs to render the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormViewDto {
    pub session_id: String,
    pub fields: Vec<FieldDto>,
    pub geo: GeoDto,
    pub transport: TransportDto,
    /// Set only by the `validate_all` command.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ready: Option<bool>,
}

impl FormViewDto {
    /// Snapshot of `session` for rendering.
    pub fn from_session<S: FormStore>(session: &FormSession<S>) -> Self {
        let store = session.store();
        let mut values = store.values();
        let errors = store.errors();
        let fields = FieldId::ALL
            .into_iter()
            .map(|id| {
                let spec = id.spec();
                FieldDto {
                    id,
                    value: values.remove(&id).unwrap_or_default(),
                    max_length: spec.max_length,
                    required: spec.required,
                    error: errors.get(&id).copied().map(MessageDto::from),
                }
            })
            .collect();

        let geo = session.geo();
        Self {
            session_id: session.id().to_string(),
            fields,
            geo: GeoDto {
                pincode: geo.pincode.clone(),
                state: geo.state.clone(),
                city: geo.city.clone(),
                mode: geo.mode,
                editable: geo.is_editable(),
                loading: geo.is_loading,
                warning: geo.last_error.clone().map(|text| MessageDto {
                    severity: Severity::Warning,
                    text,
                }),
            },
            transport: TransportDto {
                selected: session.transport(),
                options: session.transport_options(),
            },
            ready: None,
        }
    }

    /// The rendered field entry for `id`.
    pub fn field(&self, id: FieldId) -> Option<&FieldDto> {
        self.fields.iter().find(|f| f.id == id)
    }
}

/// Unified response wrapper used by bridge commands.
#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResult<T: Serialize> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T: Serialize> CommandResult<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
    pub fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(msg.into()),
        }
    }
}

/// A command as sent by the shell, one JSON object per line.
///
/// Field names and transport modes arrive as plain strings so that a typo
/// produces a `CommandResult` error instead of a malformed-message failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum BridgeCommand {
    EditField { field: String, value: String },
    BlurField { field: String },
    EditState { value: String },
    EditCity { value: String },
    SelectTransport { mode: String },
    ValidateAll,
    GetView,
}

// ── Commands ──────────────────────────────────────────────────────────────────

/// Routes a [`BridgeCommand`] to the matching command function.
pub async fn dispatch(state: Arc<AppState>, command: BridgeCommand) -> CommandResult<FormViewDto> {
    match command {
        BridgeCommand::EditField { field, value } => edit_field(state, &field, value).await,
        BridgeCommand::BlurField { field } => blur_field(state, &field).await,
        BridgeCommand::EditState { value } => edit_state(state, value).await,
        BridgeCommand::EditCity { value } => edit_city(state, value).await,
        BridgeCommand::SelectTransport { mode } => select_transport(state, &mode).await,
        BridgeCommand::ValidateAll => validate_all(state).await,
        BridgeCommand::GetView => get_view(state).await,
    }
}

/// Masks and stores a keystroke; pincode edits also start a lookup.
pub async fn edit_field(state: Arc<AppState>, field: &str, value: String) -> CommandResult<FormViewDto> {
    let field = match field.parse::<FieldId>() {
        Ok(id) => id,
        Err(e) => return CommandResult::err(e.to_string()),
    };
    apply_event(&state, FormEvent::EditField { field, value }).await
}

/// Validates a field that lost focus.
pub async fn blur_field(state: Arc<AppState>, field: &str) -> CommandResult<FormViewDto> {
    let field = match field.parse::<FieldId>() {
        Ok(id) => id,
        Err(e) => return CommandResult::err(e.to_string()),
    };
    apply_event(&state, FormEvent::Blur { field }).await
}

/// Types into the state input (manual mode only).
pub async fn edit_state(state: Arc<AppState>, value: String) -> CommandResult<FormViewDto> {
    apply_event(&state, FormEvent::EditState { value }).await
}

/// Types into the city input (manual mode only).
pub async fn edit_city(state: Arc<AppState>, value: String) -> CommandResult<FormViewDto> {
    apply_event(&state, FormEvent::EditCity { value }).await
}

/// Handles a transport selector change.  The reported value is always road,
/// including for names the selector does not offer.
pub async fn select_transport(state: Arc<AppState>, mode: &str) -> CommandResult<FormViewDto> {
    let requested = match mode.to_ascii_lowercase().as_str() {
        "road" => TransportMode::Road,
        "air" => TransportMode::Air,
        "rail" => TransportMode::Rail,
        "ship" => TransportMode::Ship,
        other => {
            debug!(mode = other, "unrecognised transport mode; pinning anyway");
            TransportMode::PINNED
        }
    };
    apply_event(&state, FormEvent::SelectTransport { mode: requested }).await
}

/// Validates every field and reports whether the form can be submitted.
pub async fn validate_all(state: Arc<AppState>) -> CommandResult<FormViewDto> {
    let mut session = state.session.lock().await;
    let ready = session.is_ready();
    let mut view = FormViewDto::from_session(&*session);
    view.ready = Some(ready);
    CommandResult::ok(view)
}

/// Returns the current render snapshot.
pub async fn get_view(state: Arc<AppState>) -> CommandResult<FormViewDto> {
    let session = state.session.lock().await;
    CommandResult::ok(FormViewDto::from_session(&*session))
}

/// Applies one lookup answer.  Returns `None` for stale answers, which change
/// nothing and need no re-render.
pub async fn apply_lookup_result(
    state: Arc<AppState>,
    result: LookupResult,
) -> Option<CommandResult<FormViewDto>> {
    let mut session = state.session.lock().await;
    match session.apply_lookup(&result.ticket, result.result) {
        LookupOutcome::Stale => None,
        LookupOutcome::Applied | LookupOutcome::Failed => {
            Some(CommandResult::ok(FormViewDto::from_session(&*session)))
        }
    }
}

// ── Line protocol ─────────────────────────────────────────────────────────────

/// Parses one line of the shell's command stream and dispatches it.
///
/// Blank lines yield `None`.  A line that is not a [`BridgeCommand`] yields a
/// failed `CommandResult` so the shell can report it and carry on.
pub async fn run_command_line(
    state: Arc<AppState>,
    line: &str,
) -> Option<CommandResult<FormViewDto>> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let result = match serde_json::from_str::<BridgeCommand>(line) {
        Ok(command) => dispatch(state, command).await,
        Err(e) => {
            warn!(error = %e, "malformed command");
            CommandResult::err(format!("malformed command: {e}"))
        }
    };
    Some(result)
}

/// Applies lookup results until no lookup is pending.
///
/// Returns a view for every result that changed the form; stale results are
/// skipped.  Returns early if the result channel closes.
pub async fn settle(
    state: &Arc<AppState>,
    results_rx: &mut mpsc::UnboundedReceiver<LookupResult>,
) -> Vec<CommandResult<FormViewDto>> {
    let mut views = Vec::new();
    while lookup_pending(state).await {
        let Some(result) = results_rx.recv().await else {
            break;
        };
        if let Some(view) = apply_lookup_result(Arc::clone(state), result).await {
            views.push(view);
        }
    }
    views
}

async fn lookup_pending(state: &AppState) -> bool {
    state.session.lock().await.geo().is_loading
}

async fn apply_event(state: &AppState, event: FormEvent) -> CommandResult<FormViewDto> {
    let mut session = state.session.lock().await;
    match session.handle(event) {
        Ok(ticket) => {
            if let Some(ticket) = ticket {
                state.geo.submit(ticket);
            }
            CommandResult::ok(FormViewDto::from_session(&*session))
        }
        Err(e) => CommandResult::err(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::config::PincodeEntry;

    fn config_with_delhi() -> AppConfig {
        let mut cfg = AppConfig::default();
        cfg.directory.push(PincodeEntry {
            pincode: "110001".to_string(),
            state: "Delhi".to_string(),
            city: "New Delhi".to_string(),
        });
        cfg
    }

    #[tokio::test]
    async fn test_get_view_lists_every_field_in_order() {
        let (state, _rx) = AppState::new(&AppConfig::default());

        let view = get_view(state).await.data.expect("view");

        let ids: Vec<_> = view.fields.iter().map(|f| f.id).collect();
        assert_eq!(ids, FieldId::ALL.to_vec());
        assert!(view.ready.is_none());
    }

    #[tokio::test]
    async fn test_edit_field_returns_masked_value() {
        let (state, _rx) = AppState::new(&AppConfig::default());

        let result = edit_field(state, "gstin", "22aaaaa0000a1z5extra".to_string()).await;

        assert!(result.success);
        let view = result.data.unwrap();
        assert_eq!(view.field(FieldId::Gstin).unwrap().value, "22AAAAA0000A1Z5");
    }

    #[tokio::test]
    async fn test_unknown_field_is_a_command_error() {
        let (state, _rx) = AppState::new(&AppConfig::default());

        let result = edit_field(state, "state", "Goa".to_string()).await;

        assert!(!result.success);
        assert!(result.error.unwrap().contains("unknown field id"));
    }

    #[tokio::test]
    async fn test_blur_surfaces_inline_error() {
        let (state, _rx) = AppState::new(&AppConfig::default());
        edit_field(Arc::clone(&state), "primaryContactPhone", "98765".to_string()).await;

        let view = blur_field(state, "primaryContactPhone").await.data.unwrap();

        let error = view.field(FieldId::PrimaryContactPhone).unwrap().error.clone();
        assert_eq!(error.map(|m| m.severity), Some(Severity::Error));
    }

    #[tokio::test]
    async fn test_pincode_lookup_round_trip_through_bridge() {
        // Arrange
        let (state, mut rx) = AppState::new(&config_with_delhi());

        // Act
        let pending = edit_field(Arc::clone(&state), "pincode", "110001".to_string())
            .await
            .data
            .unwrap();
        let result = rx.recv().await.expect("lookup result");
        let applied = apply_lookup_result(state, result).await.expect("not stale");

        // Assert
        assert!(pending.geo.loading);
        let view = applied.data.unwrap();
        assert!(!view.geo.loading);
        assert_eq!(view.geo.state, "Delhi");
        assert_eq!(view.geo.city, "New Delhi");
        assert!(!view.geo.editable);
    }

    #[tokio::test]
    async fn test_failed_lookup_shows_warning_and_unlocks_geo() {
        // Arrange
        let (state, mut rx) = AppState::new(&AppConfig::default());
        edit_field(Arc::clone(&state), "pincode", "000000".to_string()).await;

        // Act
        let result = rx.recv().await.expect("lookup result");
        let view = apply_lookup_result(Arc::clone(&state), result)
            .await
            .unwrap()
            .data
            .unwrap();
        let typed = edit_city(state, "Kochi".to_string()).await;

        // Assert
        assert_eq!(view.geo.mode, GeoMode::Manual);
        assert!(view.geo.editable);
        assert_eq!(view.geo.warning.map(|w| w.severity), Some(Severity::Warning));
        assert!(typed.success);
        assert_eq!(typed.data.unwrap().geo.city, "Kochi");
    }

    #[tokio::test]
    async fn test_state_edit_in_auto_is_a_command_error() {
        let (state, _rx) = AppState::new(&AppConfig::default());
        let result = edit_state(state, "Goa".to_string()).await;
        assert!(!result.success);
    }

    #[tokio::test]
    async fn test_select_air_reports_road() {
        let (state, _rx) = AppState::new(&AppConfig::default());

        let view = select_transport(state, "air").await.data.unwrap();

        assert_eq!(view.transport.selected, TransportMode::Road);
        let selectable: Vec<_> = view
            .transport
            .options
            .iter()
            .filter(|o| o.selectable)
            .map(|o| o.mode)
            .collect();
        assert_eq!(selectable, vec![TransportMode::Road]);
    }

    #[tokio::test]
    async fn test_validate_all_on_empty_form_is_not_ready() {
        let (state, _rx) = AppState::new(&AppConfig::default());

        let view = validate_all(state).await.data.unwrap();

        assert_eq!(view.ready, Some(false));
        assert_eq!(
            view.field(FieldId::LegalCompanyName).unwrap().error.as_ref().map(|m| m.text.as_str()),
            Some("this field is required")
        );
    }

    #[tokio::test]
    async fn test_malformed_line_is_a_command_error() {
        let (state, _rx) = AppState::new(&AppConfig::default());

        let result = run_command_line(state, r#"{"command":"edit_field","field":"#)
            .await
            .expect("non-blank line");

        assert!(!result.success);
        assert!(result.data.is_none());
        assert!(result.error.unwrap().starts_with("malformed command: "));
    }

    #[tokio::test]
    async fn test_blank_line_is_skipped() {
        let (state, _rx) = AppState::new(&AppConfig::default());
        assert!(run_command_line(Arc::clone(&state), "").await.is_none());
        assert!(run_command_line(state, "   \t").await.is_none());
    }

    #[tokio::test]
    async fn test_command_line_dispatches_to_bridge() {
        let (state, _rx) = AppState::new(&AppConfig::default());

        let result = run_command_line(
            state,
            r#"{"command":"edit_field","field":"vendorCode","value":"ab-12cd"}"#,
        )
        .await
        .expect("non-blank line");

        let view = result.data.unwrap();
        assert_eq!(view.field(FieldId::VendorCode).unwrap().value, "AB12CD");
    }

    #[tokio::test]
    async fn test_settle_drains_lookups_until_idle() {
        // Arrange
        let (state, mut rx) = AppState::new(&config_with_delhi());
        run_command_line(
            Arc::clone(&state),
            r#"{"command":"edit_field","field":"pincode","value":"110001"}"#,
        )
        .await;

        // Act
        let views = settle(&state, &mut rx).await;

        // Assert
        assert_eq!(views.len(), 1);
        let view = views[0].data.as_ref().unwrap();
        assert!(!view.geo.loading);
        assert_eq!(view.geo.city, "New Delhi");
        let now = get_view(state).await.data.unwrap();
        assert!(!now.geo.loading);
    }

    #[tokio::test]
    async fn test_settle_returns_immediately_when_nothing_is_pending() {
        let (state, mut rx) = AppState::new(&AppConfig::default());
        edit_field(Arc::clone(&state), "pincode", "110".to_string()).await;

        let views = settle(&state, &mut rx).await;

        assert!(views.is_empty());
    }

    #[test]
    fn test_bridge_command_json_shape() {
        let cmd: BridgeCommand =
            serde_json::from_str(r#"{"command":"select_transport","mode":"air"}"#).unwrap();
        assert_eq!(
            cmd,
            BridgeCommand::SelectTransport {
                mode: "air".to_string()
            }
        );
        let cmd: BridgeCommand = serde_json::from_str(r#"{"command":"get_view"}"#).unwrap();
        assert_eq!(cmd, BridgeCommand::GetView);
    }

    #[test]
    fn test_command_result_err_shape() {
        let result: CommandResult<()> = CommandResult::err("boom");
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "boom");
        assert!(json["data"].is_null());
    }
}
