use crate::naming::parse_env_reference;
use crate::ui::app::{App, EnvProbe};
use crate::ui::editor::{EditTarget, EditorState, FormField, Pane, Status, Workspace};
use crate::ui::footer::{Footer, FooterStatus};
use crate::ui::header::Header;
use crate::ui::i18n::Strings;
use crate::ui::layout::{centered_rect_by_size, layout_regions, split_body};
use crate::ui::theme::{
    ACCENT, ACTIVE_HIGHLIGHT, FOCUSED_BORDER, GLOBAL_BORDER, HEADER_TEXT, MUTED_TEXT,
    POPUP_BORDER, STATUS_ERROR,
};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

const CURSOR: &str = "█";
const MASK: char = '•';

pub fn draw(frame: &mut Frame<'_>, app: &App) {
    let strings = app.strings();
    let (header, body, footer) = layout_regions(frame.area());

    let providers = app.editor().document().map(|doc| doc.providers.len());
    frame.render_widget(Header::new(strings, providers).widget(), header);
    frame.render_widget(Clear, body);

    match app.editor() {
        EditorState::Loading => draw_message(frame, body, strings.loading, HEADER_TEXT),
        EditorState::Failed { message } => {
            let text = format!("{}: {}", strings.error, message);
            draw_message(frame, body, &text, STATUS_ERROR);
        }
        EditorState::Ready(ws) => {
            let (sidebar, form) = split_body(body);
            draw_sidebar(frame, sidebar, ws, strings);
            draw_form(frame, form, ws, app.env_probe(), strings);
            if ws.confirm_delete {
                draw_confirm(frame, body, strings);
            }
        }
    }

    let status = app
        .editor()
        .workspace()
        .and_then(|ws| ws.status.as_ref())
        .map(|status| FooterStatus {
            text: status_text(status, strings),
            is_error: status.is_error(),
        })
        .or_else(|| {
            app.last_ipc_error().map(|error| FooterStatus {
                text: error.to_string(),
                is_error: true,
            })
        });
    let footer_widget = Footer::new(footer_hints(app.editor(), strings), status);
    frame.render_widget(footer_widget.widget(footer), footer);
}

/// Localized footer text for a status.
pub fn status_text(status: &Status, strings: &Strings) -> String {
    match status {
        Status::Saved => strings.saved.to_string(),
        Status::SaveFailed(message) => format!("{}: {}", strings.auto_save_failed, message),
        Status::Reloaded => strings.reloaded.to_string(),
        Status::KeyExists => strings.key_exists.to_string(),
        Status::EditRejected(message) => format!("{}: {}", strings.edit_rejected, message),
        Status::EnvVarSaved { name, profile } => match profile {
            Some(path) => format!("{}: {} → {}", strings.env_saved, name, path.display()),
            None => format!("{}: {}", strings.env_saved, name),
        },
        Status::EnvVarFailed(message) => format!("{}: {}", strings.env_failed, message),
    }
}

fn footer_hints(editor: &EditorState, strings: &'static Strings) -> &'static str {
    match editor {
        EditorState::Ready(ws) if ws.edit.is_some() => strings.edit_hints,
        EditorState::Ready(ws) if ws.confirm_delete => strings.confirm_delete,
        EditorState::Ready(ws) if ws.pane == Pane::Form => strings.form_hints,
        _ => strings.sidebar_hints,
    }
}

fn pane_block(title: &str, focused: bool) -> Block<'_> {
    let border = if focused { FOCUSED_BORDER } else { GLOBAL_BORDER };
    Block::default()
        .title(Span::styled(title, Style::default().fg(ACCENT)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
}

fn draw_message(frame: &mut Frame<'_>, area: Rect, text: &str, color: ratatui::style::Color) {
    let widget = Paragraph::new(Line::from(Span::styled(
        text.to_string(),
        Style::default().fg(color),
    )))
    .wrap(Wrap { trim: false })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(GLOBAL_BORDER)),
    );
    frame.render_widget(widget, area);
}

fn draw_sidebar(frame: &mut Frame<'_>, area: Rect, ws: &Workspace, strings: &Strings) {
    let focused = ws.pane == Pane::Sidebar;
    let mut lines = Vec::new();
    if ws.document.providers.is_empty() {
        lines.push(Line::from(Span::styled(
            strings.no_providers,
            Style::default().fg(MUTED_TEXT),
        )));
    }
    for (key, provider) in &ws.document.providers {
        let selected = ws.selected.as_deref() == Some(key.as_str());
        let marker = if selected { "▸ " } else { "  " };
        let mut line = Line::from(vec![
            Span::styled(marker, Style::default().fg(ACCENT)),
            Span::styled(
                provider.display_name(key).to_string(),
                Style::default().fg(HEADER_TEXT),
            ),
        ]);
        if selected {
            let mut style = Style::default().bg(ACTIVE_HIGHLIGHT);
            if focused {
                style = style.add_modifier(Modifier::BOLD);
            }
            line = line.style(style);
        }
        lines.push(line);
    }
    frame.render_widget(
        Paragraph::new(lines).block(pane_block(strings.providers, focused)),
        area,
    );
}

fn draw_form(
    frame: &mut Frame<'_>,
    area: Rect,
    ws: &Workspace,
    probe: Option<&EnvProbe>,
    strings: &Strings,
) {
    let focused = ws.pane == Pane::Form;
    let block = pane_block(strings.title, focused);
    let Some((key, provider)) = ws
        .selected
        .as_deref()
        .and_then(|key| ws.document.providers.get_key_value(key))
    else {
        let hint = Paragraph::new(Span::styled(
            strings.no_providers,
            Style::default().fg(MUTED_TEXT),
        ));
        frame.render_widget(hint.block(block), area);
        return;
    };

    let edit = ws.edit.as_ref();
    let editing = |target: &EditTarget| {
        edit.filter(|e| &e.target == target)
            .map(|e| e.buffer.as_str())
    };

    let mut lines = vec![
        field_line(
            strings.provider_key,
            editing(&EditTarget::ProviderKey)
                .map(editing_value)
                .unwrap_or_else(|| key.clone()),
            focused && ws.field == FormField::ProviderKey,
        ),
        field_line(
            strings.provider_name,
            editing(&EditTarget::Name)
                .map(editing_value)
                .unwrap_or_else(|| provider.name.clone().unwrap_or_default()),
            focused && ws.field == FormField::Name,
        ),
        field_line(
            strings.adapter,
            format!("[{}]", provider.package_ref.as_deref().unwrap_or("-")),
            focused && ws.field == FormField::Adapter,
        ),
        field_line(
            strings.base_url,
            editing(&EditTarget::BaseUrl)
                .map(editing_value)
                .unwrap_or_else(|| provider.options.base_url.clone()),
            focused && ws.field == FormField::BaseUrl,
        ),
        field_line(
            strings.api_key,
            match editing(&EditTarget::ApiKey) {
                Some(buffer) => format!("{}{}", masked(buffer), CURSOR),
                None => api_key_summary(provider.options.api_key.as_deref(), probe, strings),
            },
            focused && ws.field == FormField::ApiKey,
        ),
        Line::from(""),
        Line::from(Span::styled(
            format!("{} ({})", strings.models, strings.model_key),
            Style::default().fg(ACCENT),
        )),
    ];

    if provider.models.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("  {}", strings.no_models),
            Style::default().fg(MUTED_TEXT),
        )));
    }
    for (index, (model_key, model)) in provider.models.iter().enumerate() {
        let key_text = editing(&EditTarget::ModelKey(model_key.clone()))
            .map(editing_value)
            .unwrap_or_else(|| model_key.clone());
        let name_text = editing(&EditTarget::ModelName(model_key.clone()))
            .map(editing_value)
            .unwrap_or_else(|| model.name.clone().unwrap_or_default());
        let mut line = Line::from(vec![
            Span::styled(format!("  {key_text}"), Style::default().fg(HEADER_TEXT)),
            Span::styled("  │  ", Style::default().fg(MUTED_TEXT)),
            Span::styled(name_text, Style::default().fg(MUTED_TEXT)),
        ]);
        if focused && ws.field == FormField::Model(index) {
            line = line.style(Style::default().bg(ACTIVE_HIGHLIGHT));
        }
        lines.push(line);
    }

    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(block),
        area,
    );
}

fn field_line(label: &str, value: String, focused: bool) -> Line<'static> {
    let line = Line::from(vec![
        Span::styled(format!("{label}: "), Style::default().fg(MUTED_TEXT)),
        Span::styled(value, Style::default().fg(HEADER_TEXT)),
    ]);
    if focused {
        line.style(Style::default().bg(ACTIVE_HIGHLIGHT))
    } else {
        line
    }
}

fn editing_value(buffer: &str) -> String {
    format!("{buffer}{CURSOR}")
}

fn masked(buffer: &str) -> String {
    buffer.chars().map(|_| MASK).collect()
}

/// Variable name the document points at, plus whether it is set.
fn api_key_summary(api_key: Option<&str>, probe: Option<&EnvProbe>, strings: &Strings) -> String {
    let Some(probe) = probe else {
        return api_key.and_then(parse_env_reference).unwrap_or("-").to_string();
    };
    let state = match probe.is_set {
        Some(true) => strings.env_set,
        Some(false) => strings.env_unset,
        None => "…",
    };
    format!("${} ({})", probe.name, state)
}

fn draw_confirm(frame: &mut Frame<'_>, body: Rect, strings: &Strings) {
    let line = Line::from(Span::styled(
        strings.confirm_delete,
        Style::default().fg(HEADER_TEXT),
    ));
    let width = (line.width() as u16).saturating_add(4);
    let area = centered_rect_by_size(body, width, 3);

    frame.render_widget(Clear, area);
    let popup = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(POPUP_BORDER));
    frame.render_widget(Paragraph::new(line).block(popup), area);
}
