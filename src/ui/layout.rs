use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Sidebar width as a share of the body.
const SIDEBAR_PERCENT: u16 = 30;
const SIDEBAR_MIN_WIDTH: u16 = 18;

/// Split the screen into header, body and footer.
pub fn layout_regions(area: Rect) -> (Rect, Rect, Rect) {
    let header_height = area.height.min(3);
    let footer_height = 3.min(area.height.saturating_sub(header_height));
    let header = Rect {
        x: area.x,
        y: area.y,
        width: area.width,
        height: header_height,
    };
    let footer = Rect {
        x: area.x,
        y: area.y + area.height.saturating_sub(footer_height),
        width: area.width,
        height: footer_height,
    };
    let body = Rect {
        x: area.x,
        y: area.y + header_height,
        width: area.width,
        height: area.height.saturating_sub(header_height + footer_height),
    };
    (header, body, footer)
}

/// Split the body into the provider list and the provider form.
pub fn split_body(body: Rect) -> (Rect, Rect) {
    let share = u32::from(body.width) * u32::from(SIDEBAR_PERCENT) / 100;
    let sidebar_width = (share as u16)
        .max(SIDEBAR_MIN_WIDTH)
        .min(body.width);
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(sidebar_width), Constraint::Min(0)])
        .split(body);
    (chunks[0], chunks[1])
}

/// Rect of the given size centered in `area`, clipped to it.
pub fn centered_rect_by_size(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
