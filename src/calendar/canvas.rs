use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::Text,
    widgets::{Paragraph, Widget},
};

/// Drawing surface addressed relative to the top-left corner of `area`.
/// Anything falling outside `area` is clipped.
#[derive(Debug, Eq, PartialEq)]
pub(super) struct BufferCanvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl<'a> BufferCanvas<'a> {
    pub(super) fn new(area: Rect, buf: &'a mut Buffer) -> Self {
        Self { area, buf }
    }

    pub(super) fn mvaddch(&mut self, y: u16, x: u16, ch: char, style: Style) {
        if y < self.area.height && x < self.area.width {
            if let Some(cell) = self.buf.cell_mut((x + self.area.x, y + self.area.y)) {
                cell.set_char(ch).set_style(style);
            }
        }
    }

    pub(super) fn mvprint<S: AsRef<str>>(&mut self, y: u16, x: u16, s: S, style: Style) {
        if y < self.area.height && x < self.area.width {
            let text = Text::styled(s.as_ref(), style);
            let width = u16::try_from(text.width()).unwrap_or(u16::MAX);
            // The Rect handed to the Paragraph must lie entirely within the
            // buffer.
            Paragraph::new(text).render(
                Rect {
                    x: x + self.area.x,
                    y: y + self.area.y,
                    width: (self.area.width - x).min(width),
                    height: 1,
                },
                self.buf,
            );
        }
    }

    pub(super) fn hline(&mut self, y: u16, x: u16, ch: char, length: u16, style: Style) {
        self.mvprint(y, x, String::from(ch).repeat(length.into()), style);
    }

    /// Prints `s` centered within the `width` columns starting at `x`
    pub(super) fn mvprint_centered<S: AsRef<str>>(
        &mut self,
        y: u16,
        x: u16,
        width: u16,
        s: S,
        style: Style,
    ) {
        let s = s.as_ref();
        let len = u16::try_from(s.chars().count()).unwrap_or(u16::MAX);
        self.mvprint(y, x + width.saturating_sub(len) / 2, s, style);
    }
}
