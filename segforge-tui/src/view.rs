use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Canvas, Line as CanvasLine, Painter, Shape};
use ratatui::widgets::{Block, Paragraph};
use ratatui::Frame;

use segforge::clipboard::ClipboardSink;
use segforge::controller::{Button, InteractionController, Layout};
use segforge::export::printable;
use segforge::geometry::{self, Bounds, Point, DISPLAY_SEGMENTS};
use segforge::palette::{self, Rgb};

const HELP_TEXT: &str = "
  Toggle segments with the left mouse button.

  Cycle between characters with arrow keys
  or the scroll wheel.

  You can also press the desired character
  on your keyboard to instantly switch to it.

  Some helpful shortcuts:
  F1 - Toggle help information

  F2 - Clear the current character
  F3 - Fill the current character

  F4 - Copy the character map to the clipboard
  F5 - Copy the character map to the clipboard
         (with '#' comments)
  F6 - Copy the character map to the clipboard
         (with '//' comments)

  Ctrl+Q - Save and quit";

/// Editor width relative to its height, in glyph-cell units.
const EDITOR_ASPECT: f32 = 0.8;
/// Terminal cells are roughly twice as tall as they are wide.
const CELL_ASPECT: f32 = 2.0;
const BUTTON_HEIGHT: u16 = 3;
const BUTTON_GAP: u16 = 1;
const BUTTON_WIDTH: u16 = 34;

/// Screen regions for one terminal size.
pub struct Regions {
    pub editor: Rect,
    pub info: Rect,
    pub layout: Layout,
}

pub fn regions(area: Rect) -> Regions {
    // `unit` is the editor height in rows; width follows the fixed aspect.
    let unit = f32::from(area.height).min(f32::from(area.width) / (EDITOR_ASPECT * CELL_ASPECT));
    let editor_width = ((unit * EDITOR_ASPECT * CELL_ASPECT) as u16).min(area.width);
    let editor = Rect::new(area.x, area.y, editor_width, area.height);
    let info = Rect::new(
        area.x + editor_width,
        area.y,
        area.width - editor_width,
        area.height,
    );

    let cell = Bounds::new(
        f32::from(editor.x) + 0.15 * unit * CELL_ASPECT,
        f32::from(editor.y) + 0.15 * unit,
        0.5 * unit * CELL_ASPECT,
        0.7 * unit,
    );

    let buttons = std::array::from_fn(|i| to_bounds(button_rect(info, i)));

    Regions {
        editor,
        info,
        layout: Layout {
            editor: to_bounds(editor),
            cell,
            buttons,
        },
    }
}

/// Button 0 sits lowest; the rest stack upward.
fn button_rect(info: Rect, index: usize) -> Rect {
    let step = BUTTON_HEIGHT + BUTTON_GAP;
    let offset = step * (index as u16 + 1) + 1;
    let x = info.x + 2;
    let y = info.bottom().saturating_sub(offset);
    let width = BUTTON_WIDTH.min(info.width.saturating_sub(4));

    Rect::new(x, y.max(info.y), width, BUTTON_HEIGHT).intersection(info)
}

fn to_bounds(r: Rect) -> Bounds {
    Bounds::new(
        f32::from(r.x),
        f32::from(r.y),
        f32::from(r.width),
        f32::from(r.height),
    )
}

pub fn draw<C: ClipboardSink>(frame: &mut Frame, regions: &Regions, app: &InteractionController<C>) {
    draw_editor(frame, regions, app);
    draw_help(frame, regions.editor, app.help_position());
    draw_info(frame, regions.info, app);
    draw_buttons(frame, regions.info, app);

    let hint = Rect::new(regions.editor.x, regions.editor.y, 9, 1).intersection(regions.editor);
    frame.render_widget(
        Paragraph::new("F1 - Help").style(
            Style::new()
                .fg(palette::color(palette::NEON))
                .bg(palette::color(palette::BACKGROUND)),
        ),
        hint,
    );
}

/// Braille dots are 2 wide and 4 tall per cell.
const DOT_WIDTH: f32 = 0.5;
const DOT_HEIGHT: f32 = 0.25;

/// Filled outline, painted by sampling each braille dot it covers.
struct FilledOutline {
    points: Vec<Point>,
    color: Color,
}

impl Shape for FilledOutline {
    fn draw(&self, painter: &mut Painter) {
        let (min_x, max_x, min_y, max_y) = self.points.iter().fold(
            (f32::MAX, f32::MIN, f32::MAX, f32::MIN),
            |(a, b, c, d), p| (a.min(p.x), b.max(p.x), c.min(p.y), d.max(p.y)),
        );

        for y in dot_centres(min_y, max_y, DOT_HEIGHT) {
            for x in dot_centres(min_x, max_x, DOT_WIDTH) {
                if !geometry::outline_contains(&self.points, Point::new(x, y)) {
                    continue;
                }
                if let Some((gx, gy)) = painter.get_point(f64::from(x), f64::from(-y)) {
                    painter.paint(gx, gy, self.color);
                }
            }
        }
    }
}

/// Centre of every dot of width `pitch` that overlaps `[min, max]`.
fn dot_centres(min: f32, max: f32, pitch: f32) -> impl Iterator<Item = f32> {
    let first = (min / pitch).floor() as i32;
    let last = (max / pitch).floor() as i32;

    (first..=last).map(move |i| (i as f32 + 0.5) * pitch)
}

fn draw_editor<C: ClipboardSink>(frame: &mut Frame, regions: &Regions, app: &InteractionController<C>) {
    let editor = regions.editor;
    let cell = regions.layout.cell;
    let lift = app.help_position() * f32::from(editor.height);
    let outline = app.outline_position();
    let glyph = *app.selected_glyph();

    let to_screen = move |p: Point| {
        let s = cell.denormalize(p);
        Point::new(s.x, s.y - lift)
    };

    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .background_color(palette::color(palette::NEON))
        .x_bounds([f64::from(editor.x), f64::from(editor.right())])
        .y_bounds([-f64::from(editor.bottom()), -f64::from(editor.y)])
        .paint(move |ctx| {
            for (segment, shape) in DISPLAY_SEGMENTS.iter().enumerate() {
                if glyph.is_on(segment) {
                    ctx.draw(&FilledOutline {
                        points: shape.iter().copied().map(to_screen).collect(),
                        color: palette::color(palette::SEGMENT_ON),
                    });
                } else if outline > 0.0001 {
                    let center = geometry::centroid(shape);
                    let points: Vec<Point> = shape
                        .iter()
                        .map(|v| to_screen(center.lerp(*v, outline)))
                        .collect();

                    for (i, a) in points.iter().enumerate() {
                        let b = points[(i + 1) % points.len()];
                        ctx.draw(&CanvasLine {
                            x1: f64::from(a.x),
                            y1: f64::from(-a.y),
                            x2: f64::from(b.x),
                            y2: f64::from(-b.y),
                            color: palette::color(palette::SEGMENT_OUTLINE),
                        });
                    }
                }
            }
        });

    frame.render_widget(canvas, editor);
}

/// Help text rises from below as the panel animates in.
fn draw_help(frame: &mut Frame, editor: Rect, shown: f32) {
    if shown <= 0.0001 {
        return;
    }

    let drop = ((1.0 - shown).max(0.0) * f32::from(editor.height)).round() as u16;
    let top = editor.y.saturating_add(drop);

    if top >= editor.bottom() {
        return;
    }

    let area = Rect::new(editor.x, top, editor.width, editor.bottom() - top);
    let text = Paragraph::new(HELP_TEXT).style(
        Style::new()
            .fg(palette::color(palette::SEGMENT_ON))
            .add_modifier(Modifier::BOLD),
    );

    frame.render_widget(text, area);
}

fn label(text: &str) -> Span<'_> {
    Span::styled(text, Style::new().fg(palette::color(palette::LABEL)))
}

fn value(text: String, rgb: Rgb) -> Span<'static> {
    Span::styled(
        text,
        Style::new()
            .fg(palette::color(rgb))
            .add_modifier(Modifier::BOLD),
    )
}

fn draw_info<C: ClipboardSink>(frame: &mut Frame, info: Rect, app: &InteractionController<C>) {
    let packed = app.selected_glyph().packed();
    let code = app.selected_code();
    let shown_code = app.character_position().round().clamp(0.0, 255.0) as u8;

    let lines = vec![
        Line::default(),
        Line::from(label("  Binary")),
        Line::from(vec![Span::raw("  "), value(format!("{packed:016b}"), palette::VALUE)]),
        Line::default(),
        Line::from(vec![
            label("  Hexadecimal   "),
            label("Ascii   "),
            label("Symbol"),
        ]),
        Line::from(vec![
            Span::raw("  "),
            value(format!("{packed:04X}"), palette::VALUE_BRIGHT),
            Span::raw("          "),
            value(format!("{shown_code:<8}"), palette::VALUE_BRIGHT),
            value(printable(code).to_string(), palette::VALUE_BRIGHT),
        ]),
    ];

    frame.render_widget(
        Paragraph::new(lines).style(Style::new().bg(palette::color(palette::BACKGROUND))),
        info,
    );
}

fn draw_buttons<C: ClipboardSink>(frame: &mut Frame, info: Rect, app: &InteractionController<C>) {
    for button in Button::ALL {
        let rect = button_rect(info, button.index());

        if rect.is_empty() {
            continue;
        }

        let feedback = app.button(button);
        let color = palette::blend(palette::BUTTON_IDLE, palette::BUTTON_ACTIVE, feedback.color());
        let grow = (feedback.size().max(0.0) * 2.0).round() as u16;
        let area = Rect::new(
            rect.x.saturating_sub(grow),
            rect.y,
            rect.width + 2 * grow,
            rect.height,
        )
        .intersection(info);

        let mut style = Style::new().fg(color);
        if feedback.size() > 0.5 {
            style = style.add_modifier(Modifier::BOLD);
        }

        frame.render_widget(
            Paragraph::new(button.label())
                .centered()
                .style(style)
                .block(Block::bordered().border_style(Style::new().fg(color))),
            area,
        );
    }
}
