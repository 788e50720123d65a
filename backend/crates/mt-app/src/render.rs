use crate::view::{AuthView, CardAction, DashboardView, RecordCard, StatusBadge, View};
use crate::{AuthMode, Command, SessionState, messages};

use mt_core::MaintenanceRecord;

/// Inputs to a render pass.
pub struct RenderContext<'a> {
    pub session: &'a SessionState,
    pub auth_mode: AuthMode,
    pub search_text: &'a str,
    pub records: &'a [MaintenanceRecord],
    pub loading: bool,
}

pub fn render(ctx: &RenderContext<'_>) -> View {
    let Some(profile) = &ctx.session.profile else {
        return View::Auth(AuthView {
            mode: ctx.auth_mode,
        });
    };

    let is_admin = ctx.session.is_admin;
    let cards: Vec<RecordCard> = ctx
        .records
        .iter()
        .map(|record| record_card(record, is_admin))
        .collect();

    let empty_message = match (cards.is_empty(), ctx.loading) {
        (true, false) if ctx.search_text.trim().is_empty() => Some(messages::NO_RECORDS.to_string()),
        (true, false) => Some(messages::NO_SEARCH_RESULTS.to_string()),
        _ => None,
    };

    View::Dashboard(DashboardView {
        email: profile.email.clone(),
        car_identifier: profile.car_identifier.clone(),
        is_admin,
        search_text: ctx.search_text.to_string(),
        show_add_button: is_admin,
        loading: ctx.loading,
        cards,
        empty_message,
    })
}

pub fn record_card(record: &MaintenanceRecord, viewer_is_admin: bool) -> RecordCard {
    // Owners decide on pending records; admins only observe
    let actions = if !viewer_is_admin && record.status.is_pending() {
        vec![
            CardAction {
                label: messages::APPROVE_LABEL.to_string(),
                command: Command::Approve {
                    record_id: record.id,
                },
            },
            CardAction {
                label: messages::REJECT_LABEL.to_string(),
                command: Command::Reject {
                    record_id: record.id,
                },
            },
        ]
    } else {
        Vec::new()
    };

    RecordCard {
        id: record.id,
        type_icon: messages::type_icon(&record.record_type).to_string(),
        title: record.record_type.clone(),
        description: record.description.clone(),
        status: StatusBadge {
            icon: messages::status_icon(record.status).to_string(),
            label: messages::status_label(record.status).to_string(),
            status: record.status,
        },
        date: record.date.clone(),
        car_identifier: record.car_identifier.clone(),
        admin_email: viewer_is_admin.then(|| record.admin_email.clone()),
        actions,
    }
}
