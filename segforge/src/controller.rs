//! Editor state machine.
//!
//! The renderer feeds [`Input`]s in, calls [`InteractionController::tick`]
//! once per frame, then reads positions and glyph state back out to draw.

use std::time::Instant;

use tracing::{debug, info, warn};

use crate::animator::SecondOrderAnimator;
use crate::clipboard::ClipboardSink;
use crate::curves::{Curves, FINE_SNAP};
use crate::export::ExportFormat;
use crate::geometry::{self, Bounds, Point, CELL_MAX, CELL_MIN, SEGMENT_POLYGONS};
use crate::glyph::{Glyph, GlyphStore};

/// Code selected at startup: `A`.
pub const INITIAL_CODE: u8 = b'A';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    CopySlash,
    CopyHash,
    CopyHex,
    ClearFill,
}

impl Button {
    pub const ALL: [Button; 4] = [
        Button::CopySlash,
        Button::CopyHash,
        Button::CopyHex,
        Button::ClearFill,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            Button::CopySlash => "Copy all ('//' comments)",
            Button::CopyHash => "Copy all ('#' comments)",
            Button::CopyHex => "Copy all hex values",
            Button::ClearFill => "Clear/fill character",
        }
    }

    fn for_export(format: ExportFormat) -> Button {
        match format {
            ExportFormat::SlashComment => Button::CopySlash,
            ExportFormat::HashComment => Button::CopyHash,
            ExportFormat::Hex => Button::CopyHex,
        }
    }
}

/// Press feedback for one button: a springy size pop and a slow colour fade.
/// Both rest at 0.0 and jump to 1.0 on [`ButtonFeedback::flash`].
#[derive(Debug, Clone)]
pub struct ButtonFeedback {
    size: SecondOrderAnimator,
    color: SecondOrderAnimator,
}

impl ButtonFeedback {
    fn new(curves: &Curves) -> Self {
        Self {
            size: SecondOrderAnimator::new(0.0, 0.0, curves.button_size),
            color: SecondOrderAnimator::new(0.0, 0.0, curves.button_color),
        }
    }

    pub fn flash(&mut self) {
        self.size.set_position(1.0);
        self.color.set_position(1.0);
    }

    pub fn size(&self) -> f32 {
        self.size.position()
    }

    pub fn color(&self) -> f32 {
        self.color.position()
    }

    fn retune(&mut self, curves: &Curves) {
        self.size.retune(curves.button_size);
        self.color.retune(curves.button_color);
    }
}

/// Where things are, in the renderer's coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Layout {
    /// Area that accepts segment clicks.
    pub editor: Bounds,
    /// Rectangle the unit glyph cell maps onto.
    pub cell: Bounds,
    /// Indexed by [`Button::index`].
    pub buttons: [Bounds; 4],
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Input {
    Previous,
    Next,
    /// Wheel notches; positive moves to higher codes.
    Scroll(i32),
    /// Jump to this character's code. Characters above U+00FF are ignored.
    Character(char),
    ToggleHelp,
    Clear,
    Fill,
    Export(ExportFormat),
    /// Primary button pressed at this renderer-space point.
    PointerDown(Point),
    PointerMoved(Point),
    Resize(Layout),
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct InteractionController<C: ClipboardSink> {
    store: GlyphStore,
    clipboard: C,
    layout: Layout,
    pointer: Option<Point>,
    selected: u8,
    character: SecondOrderAnimator,
    help_visible: bool,
    help: SecondOrderAnimator,
    outline: SecondOrderAnimator,
    buttons: [ButtonFeedback; 4],
}

impl<C: ClipboardSink> InteractionController<C> {
    pub fn new(store: GlyphStore, clipboard: C, curves: Curves) -> Self {
        let initial = f32::from(INITIAL_CODE);
        let (snap_vel, snap_pos) = FINE_SNAP;

        Self {
            store,
            clipboard,
            layout: Layout::default(),
            pointer: None,
            selected: INITIAL_CODE,
            character: SecondOrderAnimator::new(initial, initial, curves.character),
            help_visible: false,
            help: SecondOrderAnimator::new(0.0, 0.0, curves.help)
                .with_snap_thresholds(snap_vel, snap_pos),
            outline: SecondOrderAnimator::new(0.0, 0.0, curves.outline)
                .with_snap_thresholds(snap_vel, snap_pos),
            buttons: std::array::from_fn(|_| ButtonFeedback::new(&curves)),
        }
    }

    pub fn handle(&mut self, input: Input) -> Flow {
        match input {
            Input::Quit => return Flow::Exit,
            Input::ToggleHelp => self.set_help(!self.help_visible),
            Input::Previous => {
                self.select(self.selected.wrapping_sub(1));
                self.set_help(false);
            }
            Input::Next => {
                self.select(self.selected.wrapping_add(1));
                self.set_help(false);
            }
            Input::Scroll(delta) => {
                let code = (i32::from(self.selected) + delta).rem_euclid(256);
                self.select(code as u8);
                self.set_help(false);
            }
            Input::Character(c) => {
                match u8::try_from(c) {
                    Ok(code) => self.select(code),
                    Err(_) => debug!(?c, "ignoring character outside the glyph table"),
                }
                self.set_help(false);
            }
            Input::Clear => {
                self.edit(Button::ClearFill, GlyphStore::clear);
                self.set_help(false);
            }
            Input::Fill => {
                self.edit(Button::ClearFill, GlyphStore::fill);
                self.set_help(false);
            }
            Input::Export(format) => {
                self.export(format);
                self.set_help(false);
            }
            Input::PointerDown(p) => self.press(p),
            Input::PointerMoved(p) => {
                self.pointer = Some(p);
                self.update_hover();
            }
            Input::Resize(layout) => {
                self.layout = layout;
                self.update_hover();
            }
        }

        Flow::Continue
    }

    /// Advances every animator by the wall-clock time since the last tick.
    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    pub fn tick_at(&mut self, now: Instant) {
        self.for_each_animator(|anim| {
            anim.advance_at(now);
        });
    }

    /// Fixed-step variant of [`InteractionController::tick`].
    pub fn tick_by(&mut self, dt: f32) {
        self.for_each_animator(|anim| {
            anim.step(dt);
        });
    }

    /// Applies new curves without disturbing motion in progress.
    pub fn retune_curves(&mut self, curves: &Curves) {
        self.character.retune(curves.character);
        self.help.retune(curves.help);
        self.outline.retune(curves.outline);

        for button in &mut self.buttons {
            button.retune(curves);
        }
    }

    pub fn store(&self) -> &GlyphStore {
        &self.store
    }

    pub fn into_store(self) -> GlyphStore {
        self.store
    }

    pub fn clipboard(&self) -> &C {
        &self.clipboard
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn selected_code(&self) -> u8 {
        self.selected
    }

    pub fn selected_glyph(&self) -> &Glyph {
        self.store.glyph(self.selected)
    }

    /// Animated code; fractional while scrolling between characters.
    pub fn character_position(&self) -> f32 {
        self.character.position()
    }

    pub fn help_visible(&self) -> bool {
        self.help_visible
    }

    /// 0.0 hidden, 1.0 fully shown.
    pub fn help_position(&self) -> f32 {
        self.help.position()
    }

    /// 0.0 collapsed to segment centres, 1.0 full outline.
    pub fn outline_position(&self) -> f32 {
        self.outline.position()
    }

    pub fn button(&self, button: Button) -> &ButtonFeedback {
        &self.buttons[button.index()]
    }

    fn for_each_animator(&mut self, mut f: impl FnMut(&mut SecondOrderAnimator)) {
        f(&mut self.character);
        f(&mut self.help);
        f(&mut self.outline);

        for button in &mut self.buttons {
            f(&mut button.size);
            f(&mut button.color);
        }
    }

    fn select(&mut self, code: u8) {
        if code != self.selected {
            debug!(code, "selected character");
        }

        self.selected = code;
        self.character.set_target(f32::from(code));
    }

    fn set_help(&mut self, visible: bool) {
        if visible != self.help_visible {
            debug!(visible, "help panel");
        }

        self.help_visible = visible;
        self.help.set_target(if visible { 1.0 } else { 0.0 });
    }

    fn update_hover(&mut self) {
        let hovering = self
            .pointer
            .is_some_and(|p| self.layout.editor.contains(p));
        self.outline.set_target(if hovering { 1.0 } else { 0.0 });
    }

    /// Glyph edits are locked out while help covers the editor.
    fn edit(&mut self, button: Button, op: fn(&mut GlyphStore, u8)) {
        if self.help_visible {
            return;
        }

        op(&mut self.store, self.selected);
        self.buttons[button.index()].flash();
    }

    fn export(&mut self, format: ExportFormat) {
        let text = format.render(&self.store);
        self.clipboard.put_text(&text);
        self.buttons[Button::for_export(format).index()].flash();

        info!(?format, "exported glyph table");
    }

    fn press(&mut self, p: Point) {
        if self.layout.editor.contains(p) {
            self.press_editor(p);
            return;
        }

        let hit = Button::ALL
            .into_iter()
            .find(|b| self.layout.buttons[b.index()].contains(p));

        if let Some(button) = hit {
            self.set_help(false);

            match button {
                Button::ClearFill => self.edit(button, GlyphStore::toggle_uniform),
                Button::CopySlash => self.export(ExportFormat::SlashComment),
                Button::CopyHash => self.export(ExportFormat::HashComment),
                Button::CopyHex => self.export(ExportFormat::Hex),
            }
        }
    }

    fn press_editor(&mut self, p: Point) {
        if self.help_visible {
            return;
        }

        let cell = self.layout.cell;

        if !cell.scaled(CELL_MIN, CELL_MAX).encloses(p) {
            return;
        }

        let local = cell.normalize(p);

        match geometry::locate(local, &SEGMENT_POLYGONS) {
            Some(segment) => {
                self.store.toggle_segment(self.selected, segment);
                debug!(code = self.selected, segment, "toggled segment");
            }
            None => warn!(x = local.x, y = local.y, "click inside cell bounds hit no segment"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::MemoryClipboard;
    use crate::geometry::centroid;

    const FRAME: f32 = 1.0 / 60.0;

    fn layout() -> Layout {
        Layout {
            editor: Bounds::new(0.0, 0.0, 80.0, 100.0),
            cell: Bounds::new(15.0, 15.0, 50.0, 70.0),
            buttons: [
                Bounds::new(100.0, 80.0, 40.0, 6.0),
                Bounds::new(100.0, 70.0, 40.0, 6.0),
                Bounds::new(100.0, 60.0, 40.0, 6.0),
                Bounds::new(100.0, 50.0, 40.0, 6.0),
            ],
        }
    }

    fn controller() -> InteractionController<MemoryClipboard> {
        let mut c = InteractionController::new(
            GlyphStore::new(),
            MemoryClipboard::new(),
            Curves::default(),
        );
        c.handle(Input::Resize(layout()));
        c
    }

    fn segment_point(segment: usize) -> Point {
        let local = centroid(SEGMENT_POLYGONS[segment].vertices());
        layout().cell.denormalize(local)
    }

    fn button_point(button: Button) -> Point {
        let b = layout().buttons[button.index()];
        Point::new(b.x + b.width / 2.0, b.y + b.height / 2.0)
    }

    fn settle(c: &mut InteractionController<MemoryClipboard>) {
        for _ in 0..600 {
            c.tick_by(FRAME);
        }
    }

    #[test]
    fn starts_on_a() {
        let c = controller();

        assert_eq!(c.selected_code(), b'A');
        assert_eq!(c.character_position(), 65.0);
        assert!(!c.help_visible());
    }

    #[test]
    fn navigation_wraps() {
        let mut c = controller();

        c.handle(Input::Character('\0'));
        c.handle(Input::Previous);
        assert_eq!(c.selected_code(), 255);

        c.handle(Input::Next);
        assert_eq!(c.selected_code(), 0);
    }

    #[test]
    fn scroll_wraps_both_ways() {
        let mut c = controller();

        c.handle(Input::Scroll(-70));
        assert_eq!(c.selected_code(), 251);

        c.handle(Input::Scroll(10));
        assert_eq!(c.selected_code(), 5);

        c.handle(Input::Scroll(512));
        assert_eq!(c.selected_code(), 5);
    }

    #[test]
    fn character_selects_code() {
        let mut c = controller();

        c.handle(Input::Character('z'));
        assert_eq!(c.selected_code(), b'z');

        c.handle(Input::Character('\u{FF}'));
        assert_eq!(c.selected_code(), 255);
    }

    #[test]
    fn wide_character_is_ignored() {
        let mut c = controller();

        c.handle(Input::Character('€'));
        assert_eq!(c.selected_code(), b'A');
    }

    #[test]
    fn selection_animates_toward_target() {
        let mut c = controller();
        c.handle(Input::Next);

        c.tick_by(FRAME);
        c.tick_by(FRAME);
        let mid = c.character_position();
        assert!(mid > 65.0 && mid < 66.0, "position {mid}");

        settle(&mut c);
        assert_eq!(c.character_position(), 66.0);
    }

    #[test]
    fn help_toggle_and_dismiss() {
        let mut c = controller();

        c.handle(Input::ToggleHelp);
        assert!(c.help_visible());

        settle(&mut c);
        assert_eq!(c.help_position(), 1.0);

        c.handle(Input::Next);
        assert!(!c.help_visible());
        assert_eq!(c.selected_code(), b'B');

        settle(&mut c);
        assert_eq!(c.help_position(), 0.0);
    }

    #[test]
    fn help_toggles_off_again() {
        let mut c = controller();

        c.handle(Input::ToggleHelp);
        c.handle(Input::ToggleHelp);
        assert!(!c.help_visible());
    }

    #[test]
    fn scroll_dismisses_help() {
        let mut c = controller();
        c.handle(Input::ToggleHelp);

        c.handle(Input::Scroll(1));
        assert!(!c.help_visible());
    }

    #[test]
    fn click_toggles_each_segment() {
        let mut c = controller();

        for segment in 0..16 {
            c.handle(Input::PointerDown(segment_point(segment)));
            assert!(!c.selected_glyph().is_on(segment), "segment {segment}");
        }

        assert_eq!(c.store().packed_value(b'A'), 0x0000);
        assert_eq!(c.store().packed_value(b'B'), 0xFFFF);
    }

    #[test]
    fn click_outside_extended_cell_is_ignored() {
        let mut c = controller();

        // Inside the editor, left of the cell's extended region (x < 5).
        c.handle(Input::PointerDown(Point::new(2.0, 50.0)));
        assert_eq!(c.store(), &GlyphStore::new());
    }

    #[test]
    fn click_in_cell_margin_hits_outer_segment() {
        let mut c = controller();

        // Just past the cell's right edge, level with the upper half.
        c.handle(Input::PointerDown(Point::new(68.0, 30.0)));
        assert!(!c.selected_glyph().is_on(5));
    }

    #[test]
    fn editing_blocked_while_help_shown() {
        let mut c = controller();
        c.handle(Input::ToggleHelp);

        c.handle(Input::PointerDown(segment_point(3)));
        assert!(c.selected_glyph().is_on(3));
        assert!(c.help_visible());

        c.handle(Input::Clear);
        assert_eq!(c.store().packed_value(b'A'), 0xFFFF);
        assert_eq!(c.button(Button::ClearFill).size(), 0.0);
        assert!(!c.help_visible());
    }

    #[test]
    fn clear_and_fill_flash_button() {
        let mut c = controller();

        c.handle(Input::Clear);
        assert_eq!(c.store().packed_value(b'A'), 0x0000);
        assert_eq!(c.button(Button::ClearFill).size(), 1.0);
        assert_eq!(c.button(Button::ClearFill).color(), 1.0);

        settle(&mut c);
        assert_eq!(c.button(Button::ClearFill).size(), 0.0);

        c.handle(Input::Fill);
        assert_eq!(c.store().packed_value(b'A'), 0xFFFF);
        assert_eq!(c.button(Button::ClearFill).size(), 1.0);
    }

    #[test]
    fn export_reaches_clipboard() {
        let mut c = controller();
        c.handle(Input::Clear);

        c.handle(Input::Export(ExportFormat::Hex));
        let text = c.clipboard().last().unwrap_or_default();
        assert_eq!(text.lines().nth(65), Some("0x0000"));
        assert_eq!(c.button(Button::CopyHex).size(), 1.0);
        assert_eq!(c.button(Button::CopyHash).size(), 0.0);

        c.handle(Input::Export(ExportFormat::HashComment));
        assert_eq!(c.button(Button::CopyHash).color(), 1.0);

        c.handle(Input::Export(ExportFormat::SlashComment));
        assert_eq!(c.button(Button::CopySlash).color(), 1.0);
        assert_eq!(c.clipboard().len(), 3);
    }

    #[test]
    fn export_allowed_with_help_shown() {
        let mut c = controller();
        c.handle(Input::ToggleHelp);

        c.handle(Input::Export(ExportFormat::Hex));
        assert_eq!(c.clipboard().len(), 1);
        assert!(!c.help_visible());
    }

    #[test]
    fn buttons_act_on_click() {
        let mut c = controller();

        c.handle(Input::PointerDown(button_point(Button::CopySlash)));
        let text = c.clipboard().last().unwrap_or_default();
        assert_eq!(text.lines().nth(65), Some("0xFFFF,  // A"));

        c.handle(Input::PointerDown(button_point(Button::ClearFill)));
        assert_eq!(c.store().packed_value(b'A'), 0x0000);

        c.handle(Input::PointerDown(button_point(Button::ClearFill)));
        assert_eq!(c.store().packed_value(b'A'), 0xFFFF);
        assert_eq!(c.button(Button::ClearFill).size(), 1.0);
    }

    #[test]
    fn button_click_dismisses_help_first() {
        let mut c = controller();
        c.handle(Input::ToggleHelp);

        c.handle(Input::PointerDown(button_point(Button::ClearFill)));
        assert!(!c.help_visible());
        assert_eq!(c.store().packed_value(b'A'), 0x0000);
    }

    #[test]
    fn click_in_empty_space_does_nothing() {
        let mut c = controller();

        c.handle(Input::PointerDown(Point::new(150.0, 5.0)));
        assert!(c.clipboard().is_empty());
        assert_eq!(c.store(), &GlyphStore::new());
    }

    #[test]
    fn outline_follows_hover() {
        let mut c = controller();

        c.handle(Input::PointerMoved(Point::new(40.0, 40.0)));
        settle(&mut c);
        assert_eq!(c.outline_position(), 1.0);

        c.handle(Input::PointerMoved(Point::new(120.0, 40.0)));
        settle(&mut c);
        assert_eq!(c.outline_position(), 0.0);
    }

    #[test]
    fn resize_rechecks_hover_under_still_pointer() {
        let mut c = controller();

        c.handle(Input::PointerMoved(Point::new(90.0, 40.0)));
        settle(&mut c);
        assert_eq!(c.outline_position(), 0.0);

        let mut wider = layout();
        wider.editor = Bounds::new(0.0, 0.0, 100.0, 100.0);
        c.handle(Input::Resize(wider));
        settle(&mut c);
        assert_eq!(c.outline_position(), 1.0);

        c.handle(Input::Resize(layout()));
        settle(&mut c);
        assert_eq!(c.outline_position(), 0.0);
    }

    #[test]
    fn quit_exits() {
        let mut c = controller();

        assert_eq!(c.handle(Input::Next), Flow::Continue);
        assert_eq!(c.handle(Input::Quit), Flow::Exit);
    }

    #[test]
    fn retune_keeps_targets() {
        let mut c = controller();
        c.handle(Input::Next);
        c.tick_by(FRAME);

        let pos = c.character_position();
        c.retune_curves(&Curves::default());

        assert_eq!(c.character_position(), pos);
        settle(&mut c);
        assert_eq!(c.character_position(), 66.0);
    }

    #[test]
    fn into_store_hands_back_edits() {
        let mut c = controller();
        c.handle(Input::Clear);

        assert_eq!(c.into_store().packed_value(b'A'), 0x0000);
    }
}
