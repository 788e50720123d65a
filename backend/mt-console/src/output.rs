use crate::cli::OutputFormat;
use crate::error::Result as ConsoleErrorResult;

use mt_app::{AuthMode, DashboardView, Notification, Severity, View};

use std::fmt::Write as _;
use std::io::Write;

use serde::Serialize;

#[derive(Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
enum Event<'a> {
    View { view: &'a View },
    Notification { notification: &'a Notification },
}

/// Writes views and notifications in the selected format.
pub struct Printer<W: Write> {
    out: W,
    format: OutputFormat,
}

impl<W: Write> Printer<W> {
    pub fn new(out: W, format: OutputFormat) -> Self {
        Self { out, format }
    }

    pub fn view(&mut self, view: &View) -> ConsoleErrorResult<()> {
        match self.format {
            OutputFormat::Text => {
                let text = render_view(view);
                self.out.write_all(text.as_bytes())?;
            }
            _ => self.json(&Event::View { view })?,
        }
        self.out.flush()?;
        Ok(())
    }

    pub fn notification(&mut self, notification: &Notification) -> ConsoleErrorResult<()> {
        match self.format {
            OutputFormat::Text => writeln!(self.out, "{}", render_notification(notification))?,
            _ => self.json(&Event::Notification { notification })?,
        }
        self.out.flush()?;
        Ok(())
    }

    /// Free-form text such as help or input errors.
    pub fn message(&mut self, message: &str) -> ConsoleErrorResult<()> {
        match self.format {
            OutputFormat::Text => writeln!(self.out, "{message}")?,
            _ => {
                let line = serde_json::json!({ "event": "message", "message": message });
                self.write_json(&line)?;
            }
        }
        self.out.flush()?;
        Ok(())
    }

    fn json(&mut self, event: &Event<'_>) -> ConsoleErrorResult<()> {
        self.write_json(event)
    }

    fn write_json<T: Serialize>(&mut self, value: &T) -> ConsoleErrorResult<()> {
        if self.format == OutputFormat::PrettyJson {
            serde_json::to_writer_pretty(&mut self.out, value)?;
        } else {
            serde_json::to_writer(&mut self.out, value)?;
        }
        writeln!(self.out)?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

pub fn render_view(view: &View) -> String {
    match view {
        View::Auth(auth) => match auth.mode {
            AuthMode::Login => {
                "== 로그인 ==\n  login <email> <password>  (toggle: 회원가입)\n".to_string()
            }
            AuthMode::Register => {
                "== 회원가입 ==\n  register <email> <password> <car>  (toggle: 로그인)\n"
                    .to_string()
            }
        },
        View::Dashboard(dashboard) => render_dashboard(dashboard),
    }
}

fn render_dashboard(dashboard: &DashboardView) -> String {
    let mut text = String::new();
    let role = if dashboard.is_admin { "관리자" } else { "차주" };
    let _ = writeln!(
        text,
        "== {} ({}) [{}] ==",
        dashboard.email, dashboard.car_identifier, role
    );
    if !dashboard.search_text.is_empty() {
        let _ = writeln!(text, "검색: {}", dashboard.search_text);
    }
    if dashboard.show_add_button {
        let _ = writeln!(text, "  add <car> <date> <type> [description]");
    }
    if dashboard.loading {
        let _ = writeln!(text, "  ...");
    }
    if let Some(message) = &dashboard.empty_message {
        let _ = writeln!(text, "  {message}");
    }

    for (index, card) in dashboard.cards.iter().enumerate() {
        let _ = writeln!(
            text,
            "{}. {} {}  {} {}  {}  {}",
            index + 1,
            card.type_icon,
            card.title,
            card.status.icon,
            card.status.label,
            card.date,
            card.car_identifier
        );
        if !card.description.is_empty() {
            let _ = writeln!(text, "   {}", card.description);
        }
        if let Some(admin_email) = &card.admin_email {
            let _ = writeln!(text, "   by {admin_email}");
        }
        if !card.actions.is_empty() {
            let labels: Vec<&str> = card.actions.iter().map(|a| a.label.as_str()).collect();
            let _ = writeln!(text, "   [{}] approve/reject {}", labels.join("/"), index + 1);
        }
    }

    text
}

pub fn render_notification(notification: &Notification) -> String {
    let marker = match notification.severity {
        Severity::Info => "i",
        Severity::Success => "+",
        Severity::Warning => "!",
        Severity::Error => "x",
    };
    format!("({marker}) {}", notification.message)
}
