use crate::calendar::LifeCalendar;
use crate::weeks::{CellState, StartMode, ROWS};

mod font;
mod layout;
mod pdf;

pub use font::text_width;
pub use layout::*;
pub use pdf::*;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgb(pub f32, pub f32, pub f32);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0.0, 0.0, 0.0);
    pub const RED: Rgb = Rgb(1.0, 0.0, 0.0);
    // #AAAAAA
    pub const LIVED: Rgb = Rgb(0.667, 0.667, 0.667);
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.y + self.height
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    pub color: Rgb,
    pub width: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Paint {
    pub fill: Option<Rgb>,
    pub stroke: Option<Stroke>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Face {
    Regular,
    Bold,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Font {
    pub face: Face,
    pub size: f32,
}

impl Font {
    pub const fn regular(size: f32) -> Self {
        Font {
            face: Face::Regular,
            size,
        }
    }

    pub const fn bold(size: f32) -> Self {
        Font {
            face: Face::Bold,
            size,
        }
    }
}

/// Something the calendar can be drawn on. Coordinates are points with the
/// origin in the lower left corner.
pub trait Surface {
    fn rect(&mut self, rect: Rect, paint: Paint);
    /// Draws `text` with its baseline starting at (`x`, `y`).
    fn text(&mut self, text: &str, x: f32, y: f32, font: Font, color: Rgb);
}

const CELL_LINE: f32 = 0.5;
const CURRENT_LINE: f32 = 1.5;
const MARKER_LINE: f32 = 1.5;

/// How a week cell is painted. `None` leaves the cell blank.
pub fn cell_paint(state: CellState) -> Option<Paint> {
    let thin = Stroke {
        color: Rgb::BLACK,
        width: CELL_LINE,
    };

    match state {
        CellState::Filled => Some(Paint {
            fill: Some(Rgb::LIVED),
            stroke: Some(thin),
        }),
        CellState::Current => Some(Paint {
            fill: None,
            stroke: Some(Stroke {
                color: Rgb::BLACK,
                width: CURRENT_LINE,
            }),
        }),
        CellState::Future => Some(Paint {
            fill: None,
            stroke: Some(thin),
        }),
        CellState::Invisible => None,
    }
}

pub fn marker_paint() -> Paint {
    Paint {
        fill: None,
        stroke: Some(Stroke {
            color: Rgb::RED,
            width: MARKER_LINE,
        }),
    }
}

fn centered_text<S: Surface>(surface: &mut S, text: &str, center_x: f32, y: f32, font: Font) {
    let x = center_x - text_width(text, font.face, font.size) / 2.0;
    surface.text(text, x, y, font, Rgb::BLACK);
}

fn outline(width: f32) -> Paint {
    Paint {
        fill: None,
        stroke: Some(Stroke {
            color: Rgb::BLACK,
            width,
        }),
    }
}

const VERSE: &str =
    "\"So teach us to number our days, that we may get a heart of wisdom.\" - Psalm 90:12 (ESV)";
const EXPLANATION: &str =
    "Each square represents one week. Each line represents one year. Each block represents a decade.";

fn draw_header<S: Surface>(surface: &mut S, calendar: &LifeCalendar, layout: &GridLayout) {
    let center = layout.center_x();
    let y = layout.title_y;

    centered_text(surface, "Number Our Days", center, y, Font::bold(14.0));

    let subtitle = format!(
        "Life Calendar for {}, created on {}",
        calendar.record().name(),
        calendar.mapper().today().format("%B %d, %Y")
    );
    centered_text(surface, &subtitle, center, y - 18.0, Font::regular(8.0));
    centered_text(surface, VERSE, center, y - 32.0, Font::regular(8.0));
    centered_text(surface, EXPLANATION, center, y - 46.0, Font::regular(8.0));
}

/// Draws the 90 x 52 week cells and the life expectancy marker on top.
pub fn draw_grid<S: Surface>(surface: &mut S, calendar: &LifeCalendar, layout: &GridLayout) {
    for cell in calendar.mapper().cells() {
        if let Some(paint) = cell_paint(cell.state) {
            surface.rect(layout.cell_rect(cell.pos.row, cell.pos.col), paint);
        }
    }

    match calendar.marker().pos {
        Some(pos) => surface.rect(layout.cell_rect(pos.row, pos.col), marker_paint()),
        None => log::info!(
            "Life expectancy week {} lies beyond the grid, not marking it",
            calendar.marker().index
        ),
    }
}

fn draw_decade_labels<S: Surface>(surface: &mut S, layout: &GridLayout) {
    let font = Font::regular(8.0);

    for decade in (10..=ROWS).step_by(10) {
        let rect = layout.cell_rect(decade - 1, 0);
        let y = rect.y + layout.cell / 2.0 - 3.0;
        surface.text(&decade.to_string(), layout.grid_right() + 6.0, y, font, Rgb::BLACK);
    }
}

const LEGEND_BOX: f32 = 8.0;
const LEGEND_SPACING: f32 = 14.0;
const LEGEND_PADDING: f32 = 6.0;
const LEGEND_FONT: Font = Font::regular(7.0);

/// Width shared by the legend and the summary box.
fn legend_width(entries: &[(Option<Paint>, String)]) -> f32 {
    let text = entries
        .iter()
        .map(|(_, label)| text_width(label, LEGEND_FONT.face, LEGEND_FONT.size))
        .fold(0.0, f32::max);

    LEGEND_BOX + 4.0 + text + 2.0 * LEGEND_PADDING
}

fn legend_entries(calendar: &LifeCalendar) -> Vec<(Option<Paint>, String)> {
    let mut entries = vec![
        (cell_paint(CellState::Filled), "Weeks already lived".to_owned()),
        (cell_paint(CellState::Future), "Weeks to be lived".to_owned()),
        (cell_paint(CellState::Current), "Current week".to_owned()),
        (
            Some(marker_paint()),
            format!("Life expectancy: {}", calendar.expectancy_years()),
        ),
    ];

    if calendar.mapper().mode() == StartMode::InJanuary {
        entries.push((None, "Blank: before birth".to_owned()));
    }

    entries
}

fn draw_legend<S: Surface>(surface: &mut S, calendar: &LifeCalendar, layout: &GridLayout) -> f32 {
    let entries = legend_entries(calendar);
    let x = layout.grid_right() + 32.0;
    let top = layout.grid_top - layout.cell;
    let text_x = x + LEGEND_BOX + 4.0;

    let mut y = top;
    for (paint, label) in entries.iter() {
        let sample = Rect {
            x,
            y: y - 6.0,
            width: LEGEND_BOX,
            height: LEGEND_BOX,
        };
        if let Some(paint) = paint {
            surface.rect(sample, *paint);
        }
        surface.text(label, text_x, y - 4.0, LEGEND_FONT, Rgb::BLACK);
        y -= LEGEND_SPACING;
    }

    let last = y + LEGEND_SPACING - 6.0;
    let width = legend_width(&entries);
    surface.rect(
        Rect {
            x: x - LEGEND_PADDING,
            y: last - LEGEND_PADDING,
            width,
            height: top - last + 2.0 * LEGEND_PADDING,
        },
        outline(1.0),
    );

    width
}

fn draw_summary<S: Surface>(surface: &mut S, calendar: &LifeCalendar, layout: &GridLayout, width: f32) {
    let center = layout.center_x();
    let y = layout.grid_bottom_min - 28.0;

    centered_text(surface, "Summary", center, y, Font::bold(9.0));
    for (i, line) in calendar.summary().lines().iter().enumerate() {
        centered_text(surface, line, center, y - 12.0 - 10.0 * i as f32, Font::regular(7.0));
    }

    let padding = 4.0;
    let bottom = y - 42.0 - padding;
    surface.rect(
        Rect {
            x: center - width / 2.0,
            y: bottom,
            width,
            height: y + padding + 8.0 - bottom,
        },
        outline(1.0),
    );
}

/// Draws the whole page in a single pass.
pub fn render_calendar<S: Surface>(surface: &mut S, calendar: &LifeCalendar, layout: &GridLayout) {
    draw_header(surface, calendar, layout);
    draw_grid(surface, calendar, layout);
    draw_decade_labels(surface, layout);
    let width = draw_legend(surface, calendar, layout);
    draw_summary(surface, calendar, layout, width);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::birth::{BirthRecord, Gender};
    use crate::expectancy::LifeExpectancy;
    use crate::weeks::{GridPos, TOTAL_WEEKS};
    use chrono::NaiveDate;

    #[derive(Debug, PartialEq)]
    enum Op {
        Rect(Rect, Paint),
        Text(String, f32, f32, Font),
    }

    #[derive(Default)]
    struct Recorder(Vec<Op>);

    impl Surface for Recorder {
        fn rect(&mut self, rect: Rect, paint: Paint) {
            self.0.push(Op::Rect(rect, paint));
        }

        fn text(&mut self, text: &str, x: f32, y: f32, font: Font, _color: Rgb) {
            self.0.push(Op::Text(text.to_owned(), x, y, font));
        }
    }

    impl Recorder {
        fn rects_with(&self, paint: Option<Paint>) -> usize {
            self.0
                .iter()
                .filter(|op| matches!(op, Op::Rect(_, p) if Some(*p) == paint))
                .count()
        }

        fn texts(&self) -> Vec<&str> {
            self.0
                .iter()
                .filter_map(|op| match op {
                    Op::Text(text, ..) => Some(text.as_str()),
                    _ => None,
                })
                .collect()
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn calendar(today: NaiveDate, mode: StartMode) -> LifeCalendar {
        let record = BirthRecord::new("Ada", date(1990, 6, 15), Gender::Male, date(2026, 10, 19)).unwrap();
        LifeCalendar::new(record, today, mode, &LifeExpectancy::default())
    }

    #[test]
    fn grid_draws_every_visible_cell_once() {
        let cal = calendar(date(2020, 6, 15), StartMode::AtBirth);
        let mut rec = Recorder::default();
        draw_grid(&mut rec, &cal, &GridLayout::letter());

        assert_eq!(rec.rects_with(cell_paint(CellState::Filled)), 1565);
        assert_eq!(rec.rects_with(cell_paint(CellState::Current)), 1);
        assert_eq!(rec.rects_with(cell_paint(CellState::Future)), TOTAL_WEEKS as usize - 1566);
        assert_eq!(rec.rects_with(Some(marker_paint())), 1);
        assert_eq!(rec.0.len(), TOTAL_WEEKS as usize + 1);
    }

    #[test]
    fn invisible_cells_are_skipped() {
        let cal = calendar(date(1990, 6, 20), StartMode::InJanuary);
        let mut rec = Recorder::default();
        let layout = GridLayout::letter();
        draw_grid(&mut rec, &cal, &layout);

        // 23 weeks of 1990 before the birth week stay blank.
        assert_eq!(rec.0.len(), TOTAL_WEEKS as usize - 23 + 1);
        assert_eq!(
            rec.0.first(),
            Some(&Op::Rect(layout.cell_rect(0, 23), cell_paint(CellState::Filled).unwrap()))
        );
    }

    #[test]
    fn marker_is_drawn_last_over_its_cell() {
        let cal = calendar(date(2020, 6, 15), StartMode::AtBirth);
        let layout = GridLayout::letter();
        let mut rec = Recorder::default();
        draw_grid(&mut rec, &cal, &layout);

        assert_eq!(cal.marker().pos, Some(GridPos::new(75, 41)));
        assert_eq!(
            rec.0.last(),
            Some(&Op::Rect(layout.cell_rect(75, 41), marker_paint()))
        );
    }

    #[test]
    fn marker_beyond_grid_is_not_drawn() {
        let record = BirthRecord::new("Ada", date(1990, 6, 15), Gender::Female, date(2026, 10, 19)).unwrap();
        let expectancy = LifeExpectancy {
            male: 75.8,
            female: 92.0,
        };
        let cal = LifeCalendar::new(record, date(2020, 6, 15), StartMode::AtBirth, &expectancy);
        let mut rec = Recorder::default();
        draw_grid(&mut rec, &cal, &GridLayout::letter());

        assert_eq!(rec.rects_with(Some(marker_paint())), 0);
    }

    #[test]
    fn page_furniture() {
        let cal = calendar(date(2020, 6, 15), StartMode::InJanuary);
        let mut rec = Recorder::default();
        render_calendar(&mut rec, &cal, &GridLayout::letter());

        let texts = rec.texts();
        assert_eq!(texts[0], "Number Our Days");
        assert!(texts.contains(&"Life Calendar for Ada, created on June 15, 2020"));
        assert!(texts.contains(&"Life expectancy: 75.8"));
        assert!(texts.contains(&"Blank: before birth"));
        assert!(texts.contains(&"Summary"));
        for decade in (10..=90).step_by(10) {
            assert!(texts.contains(&decade.to_string().as_str()));
        }
    }

    #[test]
    fn legend_and_summary_share_width() {
        let cal = calendar(date(2020, 6, 15), StartMode::AtBirth);
        let mut rec = Recorder::default();
        render_calendar(&mut rec, &cal, &GridLayout::letter());

        let boxes: Vec<&Rect> = rec
            .0
            .iter()
            .filter_map(|op| match op {
                Op::Rect(rect, paint) if *paint == outline(1.0) => Some(rect),
                _ => None,
            })
            .collect();

        assert_eq!(boxes.len(), 2);
        assert!((boxes[0].width - boxes[1].width).abs() < 1e-4);
    }

    #[test]
    fn centered_text_is_centered() {
        let mut rec = Recorder::default();
        let font = Font::regular(10.0);
        centered_text(&mut rec, "Summary", 300.0, 10.0, font);

        match &rec.0[0] {
            Op::Text(_, x, _, _) => {
                let width = text_width("Summary", Face::Regular, 10.0);
                assert!((x + width / 2.0 - 300.0).abs() < 1e-4);
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
