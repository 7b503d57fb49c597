pub mod charting;

use crossterm::tty::IsTty;
use ratatui::{
    backend::CrosstermBackend,
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Bar, BarChart, BarGroup, Block, Widget},
    Terminal, TerminalOptions, Viewport,
};
use std::io::{self, Write};

use crate::frequency::FrequencyTable;
use charting::{chart_ceiling, format_percent, letter_bars, BarOrder};

const BAR_WIDTH: u16 = 4;
const BAR_GAP: u16 = 1;
/// Rows for one bordered chart: border, bars, value and label lines
const CHART_HEIGHT: u16 = 14;

/// Letter frequencies drawn twice: alphabetically and most frequent first
pub struct FrequencyChart<'a> {
    title: String,
    table: &'a FrequencyTable,
}

impl<'a> FrequencyChart<'a> {
    pub fn new<T: Into<String>>(title: T, table: &'a FrequencyTable) -> Self {
        Self {
            title: title.into(),
            table,
        }
    }

    pub fn height() -> u16 {
        CHART_HEIGHT * 2
    }
}

impl Widget for &FrequencyChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        let magenta_style = Style::default().fg(Color::Magenta);
        let bold_style = Style::default().add_modifier(Modifier::BOLD);

        for (chunk, order) in chunks
            .iter()
            .zip([BarOrder::Alphabetical, BarOrder::ByFrequency])
        {
            let subtitle = match order {
                BarOrder::Alphabetical => "alphabetical",
                BarOrder::ByFrequency => "by frequency",
            };
            let data = letter_bars(self.table, order);
            let bars: Vec<Bar> = data
                .iter()
                .map(|(label, value)| {
                    Bar::default()
                        .value(*value)
                        .text_value(format_percent(*value))
                        .label(Line::from(label.clone()))
                })
                .collect();

            BarChart::default()
                .block(Block::bordered().title(Line::styled(
                    format!(" {} ({subtitle}, %) ", self.title),
                    bold_style,
                )))
                .data(BarGroup::default().bars(&bars))
                .bar_width(BAR_WIDTH)
                .bar_gap(BAR_GAP)
                .bar_style(magenta_style)
                .value_style(Style::default().fg(Color::Black).bg(Color::Magenta))
                .max(chart_ceiling(&data))
                .render(*chunk, buf);
        }
    }
}

/// Draw `table` inline below the cursor, or print it as plain text when
/// stdout is not a terminal
pub fn print_frequency_chart(title: &str, table: &FrequencyTable) -> io::Result<()> {
    let mut stdout = io::stdout();
    if !stdout.is_tty() {
        return write_frequency_table(&mut stdout, title, table);
    }

    let chart = FrequencyChart::new(title, table);
    let mut terminal = Terminal::with_options(
        CrosstermBackend::new(stdout),
        TerminalOptions {
            viewport: Viewport::Inline(FrequencyChart::height()),
        },
    )?;
    terminal.draw(|frame| frame.render_widget(&chart, frame.area()))?;
    println!();
    Ok(())
}

/// One `letter weight` line per letter, most frequent first
pub fn write_frequency_table<W: Write>(
    out: &mut W,
    title: &str,
    table: &FrequencyTable,
) -> io::Result<()> {
    writeln!(out, "{title}")?;
    for (letter, weight) in table.by_frequency() {
        writeln!(out, "{letter} {weight:.6}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_table() -> FrequencyTable {
        FrequencyTable::from_weights([('e', 0.5), ('t', 0.3), ('a', 0.2)]).unwrap()
    }

    fn rendered_text(buf: &Buffer) -> String {
        buf.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_chart_renders_both_orders() {
        let table = create_test_table();
        let chart = FrequencyChart::new("Letter Frequency", &table);
        let area = Rect::new(0, 0, 60, FrequencyChart::height());
        let mut buf = Buffer::empty(area);
        (&chart).render(area, &mut buf);

        let text = rendered_text(&buf);
        assert!(text.contains("Letter Frequency (alphabetical, %)"));
        assert!(text.contains("Letter Frequency (by frequency, %)"));
        assert!(text.contains('E'));
        assert!(text.contains("50"));
    }

    #[test]
    fn test_chart_renders_empty_table() {
        let table = FrequencyTable::default();
        let chart = FrequencyChart::new("Nothing", &table);
        let area = Rect::new(0, 0, 30, FrequencyChart::height());
        let mut buf = Buffer::empty(area);
        (&chart).render(area, &mut buf);
        assert!(rendered_text(&buf).contains("Nothing"));
    }

    #[test]
    fn test_write_frequency_table() {
        let mut out = Vec::new();
        write_frequency_table(&mut out, "freqs", &create_test_table()).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "freqs\ne 0.500000\nt 0.300000\na 0.200000\n"
        );
    }
}
