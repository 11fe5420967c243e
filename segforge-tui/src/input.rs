use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use segforge::controller::Input;
use segforge::export::ExportFormat;
use segforge::geometry::Point;

/// `None` for events the editor has no use for.
pub fn translate(event: &Event) -> Option<Input> {
    match event {
        Event::Key(key) => translate_key(key),
        Event::Mouse(mouse) => translate_mouse(mouse),
        _ => None,
    }
}

fn translate_key(key: &KeyEvent) -> Option<Input> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') => Some(Input::Quit),
            _ => None,
        };
    }

    let input = match key.code {
        KeyCode::Left | KeyCode::Down => Input::Previous,
        KeyCode::Right | KeyCode::Up => Input::Next,
        KeyCode::F(1) | KeyCode::Esc => Input::ToggleHelp,
        KeyCode::F(2) => Input::Clear,
        KeyCode::F(3) => Input::Fill,
        KeyCode::F(4) => Input::Export(ExportFormat::Hex),
        KeyCode::F(5) => Input::Export(ExportFormat::HashComment),
        KeyCode::F(6) => Input::Export(ExportFormat::SlashComment),
        KeyCode::Char(c) => Input::Character(c),
        KeyCode::Enter => Input::Character('\r'),
        KeyCode::Tab => Input::Character('\t'),
        KeyCode::Backspace => Input::Character('\u{8}'),
        _ => return None,
    };

    Some(input)
}

fn translate_mouse(mouse: &MouseEvent) -> Option<Input> {
    let at = cell_center(mouse.column, mouse.row);

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(Input::PointerDown(at)),
        MouseEventKind::Moved | MouseEventKind::Drag(_) => Some(Input::PointerMoved(at)),
        MouseEventKind::ScrollUp => Some(Input::Scroll(1)),
        MouseEventKind::ScrollDown => Some(Input::Scroll(-1)),
        _ => None,
    }
}

/// Terminal cells are addressed by their top-left corner; clicks land in the
/// middle.
fn cell_center(column: u16, row: u16) -> Point {
    Point::new(f32::from(column) + 0.5, f32::from(row) + 0.5)
}
