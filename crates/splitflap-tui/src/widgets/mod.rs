mod buttons;
mod cycler_line;
mod flap_board;
mod popup;
mod status_bar;

pub use buttons::ButtonRowWidget;
pub use cycler_line::CyclerLineWidget;
pub use flap_board::FlapBoardWidget;
pub use popup::PopupWidget;
pub use status_bar::StatusBarWidget;

use ratatui::layout::Rect;

/// Helper function to create a centered rect
pub(crate) fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}
