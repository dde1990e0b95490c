//! The numeric textbox: a single-line field that accepts arithmetic
//! expressions, validates every keystroke and paste against the numeric
//! grammar, evaluates live, and steps with the arrow keys.
//!
//! All editing decisions live in `field_core`; this file owns event
//! plumbing, focus, caret/selection state, and painting. The caller owns
//! the [`FieldValue`] across frames.

use egui::{
    Align2, Color32, Event, EventFilter, FontId, Key, Modifiers, Pos2, Rect, Response, Sense,
    StrokeKind, TextStyle, Ui, Vec2,
};
use field_core::{
    EditDecision, FieldValue, MIXED_STRING, NumericValue, SelectionRange, StepConfig,
    StepDirection, caret_from_x, compose, decide_insertion, decide_paste, numeric_value, step,
};

use crate::edit_state::EditState;

const H_PADDING: f32 = 6.0;
const V_PADDING: f32 = 3.0;
const ICON_SLOT_WIDTH: f32 = 18.0;
const CORNER_RADIUS: f32 = 2.0;

/// Per-field state the shell keeps between frames (in egui memory): the
/// ephemeral edit state, last frame's focus, and the last value reported
/// through the numeric callback.
#[derive(Clone, Debug, Default)]
struct FieldMemory {
    edit: EditState,
    had_focus: bool,
    last_settled: Option<String>,
}

/// What `show` hands back. `changed` is true on any frame the displayed
/// text changed; `response` is the underlying egui event surface for
/// callers that want hover/click/drag detail.
pub struct NumericTextboxResponse {
    pub response: Response,
    pub changed: bool,
}

/// Builder-style numeric input widget.
///
/// ```no_run
/// # use field_core::FieldValue;
/// # use widgets::NumericTextbox;
/// # fn demo(ui: &mut egui::Ui, opacity: &mut FieldValue) {
/// NumericTextbox::new(opacity)
///     .name("opacity")
///     .minimum(0.0)
///     .maximum(100.0)
///     .show(ui);
/// # }
/// ```
pub struct NumericTextbox<'a> {
    value: &'a mut FieldValue,
    config: StepConfig,
    name: Option<&'a str>,
    placeholder: Option<&'a str>,
    icon: Option<&'a str>,
    disabled: bool,
    no_border: bool,
    propagate_escape_keydown: bool,
    desired_width: Option<f32>,
    #[allow(clippy::type_complexity)]
    on_value_change: Option<Box<dyn FnMut(&str, Option<&str>, &str) + 'a>>,
    #[allow(clippy::type_complexity)]
    on_numeric_value_change: Option<Box<dyn FnMut(NumericValue, Option<&str>) + 'a>>,
}

impl<'a> NumericTextbox<'a> {
    pub fn new(value: &'a mut FieldValue) -> Self {
        Self {
            value,
            config: StepConfig::default(),
            name: None,
            placeholder: None,
            icon: None,
            disabled: false,
            no_border: false,
            propagate_escape_keydown: true,
            desired_width: None,
            on_value_change: None,
            on_numeric_value_change: None,
        }
    }

    /// Field name passed back through the change callbacks.
    pub fn name(mut self, name: &'a str) -> Self {
        self.name = Some(name);
        self
    }

    /// Text shown (dimmed) while the field is empty.
    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    /// Leading glyph inside the field, e.g. `"X"` for a coordinate.
    pub fn icon(mut self, icon: &'a str) -> Self {
        self.icon = Some(icon);
        self
    }

    /// A disabled field is skipped in the tab order and ignores all input.
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn no_border(mut self, no_border: bool) -> Self {
        self.no_border = no_border;
        self
    }

    /// When false, an Escape that blurs this field is consumed so
    /// enclosing UI (dialogs, panels) never sees it.
    pub fn propagate_escape_keydown(mut self, propagate: bool) -> Self {
        self.propagate_escape_keydown = propagate;
        self
    }

    /// Reject the decimal point in typed and pasted input.
    pub fn integer(mut self, integer: bool) -> Self {
        self.config.integer = integer;
        self
    }

    pub fn minimum(mut self, minimum: f64) -> Self {
        self.config.minimum = Some(minimum);
        self
    }

    pub fn maximum(mut self, maximum: f64) -> Self {
        self.config.maximum = Some(maximum);
        self
    }

    pub fn increment_small(mut self, increment: f64) -> Self {
        self.config.increment_small = increment;
        self
    }

    pub fn increment_big(mut self, increment: f64) -> Self {
        self.config.increment_big = increment;
        self
    }

    /// Replace the whole stepping/validation configuration at once.
    pub fn config(mut self, config: StepConfig) -> Self {
        self.config = config;
        self
    }

    pub fn desired_width(mut self, width: f32) -> Self {
        self.desired_width = Some(width);
        self
    }

    /// Fired whenever the displayed text changes:
    /// `(new_value, name, previous_value)`.
    pub fn on_value_change(mut self, callback: impl FnMut(&str, Option<&str>, &str) + 'a) -> Self {
        self.on_value_change = Some(Box::new(callback));
        self
    }

    /// Fired once per settled value — including the first frame the field
    /// is shown — with its numeric interpretation. Rejected edits never
    /// fire.
    pub fn on_numeric_value_change(
        mut self,
        callback: impl FnMut(NumericValue, Option<&str>) + 'a,
    ) -> Self {
        self.on_numeric_value_change = Some(Box::new(callback));
        self
    }

    pub fn show(mut self, ui: &mut Ui) -> NumericTextboxResponse {
        let font_id = TextStyle::Body.resolve(ui.style());
        let row_height = ui.fonts(|f| f.row_height(&font_id));

        let desired_width = self
            .desired_width
            .unwrap_or_else(|| ui.spacing().text_edit_width);
        let desired_size = Vec2::new(desired_width, row_height + 2.0 * V_PADDING);
        let sense = if self.disabled {
            Sense::hover()
        } else {
            Sense::click_and_drag()
        };
        let (rect, mut response) = ui.allocate_exact_size(desired_size, sense);
        let id = response.id;

        let mut memory: FieldMemory = ui
            .memory_mut(|m| m.data.get_temp(id))
            .unwrap_or_default();
        let previous_raw = self.value.as_raw().to_string();
        let mut has_focus = ui.memory(|m| m.has_focus(id));

        let icon_slot = if self.icon.is_some() { ICON_SLOT_WIDTH } else { 0.0 };
        let inner_min = Pos2::new(rect.min.x + H_PADDING + icon_slot, rect.min.y + V_PADDING);
        let inner_rect = Rect::from_min_max(
            inner_min,
            Pos2::new(
                (rect.max.x - H_PADDING).max(inner_min.x),
                (rect.max.y - V_PADDING).max(inner_min.y),
            ),
        );

        if self.disabled {
            // Not focusable: a disabled field drops out of the tab order.
            if has_focus {
                ui.memory_mut(|m| m.surrender_focus(id));
                has_focus = false;
            }
        } else {
            if response.is_pointer_button_down_on() && !has_focus {
                ui.memory_mut(|m| m.request_focus(id));
                has_focus = true;
            }

            if has_focus && !memory.had_focus {
                // Select everything so the next keystroke replaces rather
                // than appends.
                if let Some(text) = self.value.as_concrete() {
                    memory.edit.select_all(text);
                }
            }

            if has_focus {
                ui.memory_mut(|m| {
                    m.set_focus_lock_filter(
                        id,
                        EventFilter {
                            tab: false,
                            horizontal_arrows: true,
                            vertical_arrows: true,
                            escape: true,
                        },
                    );
                });

                self.handle_pointer(ui, &response, inner_rect, &font_id, &mut memory);
                let surrendered = self.handle_keys(ui, &mut memory);
                if surrendered {
                    ui.memory_mut(|m| m.surrender_focus(id));
                    has_focus = false;
                }
            }
        }

        let changed = self.value.as_raw() != previous_raw;
        if changed {
            if let Some(callback) = &mut self.on_value_change {
                callback(self.value.as_raw(), self.name, &previous_raw);
            }
            response.mark_changed();
            ui.ctx().request_repaint();
        }

        // Settle notification: once per settled value, never for rejected
        // edits, and on the first frame a field is shown.
        if memory.last_settled.as_deref() != Some(self.value.as_raw()) {
            memory.last_settled = Some(self.value.as_raw().to_string());
            if let Some(callback) = &mut self.on_numeric_value_change {
                callback(numeric_value(self.value), self.name);
            }
        }

        if ui.is_rect_visible(rect) {
            self.paint(ui, rect, inner_rect, &font_id, has_focus, &mut memory);
        }

        memory.had_focus = has_focus;
        ui.memory_mut(|m| m.data.insert_temp(id, memory));

        NumericTextboxResponse { response, changed }
    }

    /// Click-to-place-caret and drag selection. A mixed field never shows
    /// a caret: clicks keep the full selection, so the next keystroke
    /// replaces the whole state.
    fn handle_pointer(
        &self,
        ui: &Ui,
        response: &Response,
        inner_rect: Rect,
        font_id: &FontId,
        memory: &mut FieldMemory,
    ) {
        let Some(text) = self.value.as_concrete() else {
            return;
        };
        let Some(pos) = response.interact_pointer_pos() else {
            return;
        };

        memory.edit.clamp(text);
        let x = pos.x - inner_rect.min.x + memory.edit.scroll_x;
        let caret = caret_from_x(text, x, |prefix| measure_prefix(ui, font_id, prefix));
        let shift = ui.input(|i| i.modifiers.shift);

        if response.drag_started() || response.clicked() {
            memory.edit.set_caret(text, caret, shift);
        } else if response.dragged() {
            memory.edit.set_caret(text, caret, true);
        }
    }

    /// Route this frame's keyboard events. Returns true when Escape asked
    /// the field to blur.
    fn handle_keys(&mut self, ui: &mut Ui, memory: &mut FieldMemory) -> bool {
        let events = ui.input(|i| i.events.clone());
        let command_held = ui.input(|i| i.modifiers.command || i.modifiers.ctrl);
        let mut surrender = false;

        for event in &events {
            match event {
                Event::Key {
                    key: Key::Escape,
                    pressed: true,
                    ..
                } => {
                    surrender = true;
                }

                // Character-generating input. A held platform modifier
                // means a shortcut, not text entry.
                Event::Text(text) if !command_held => {
                    let selection = self.current_selection(memory);
                    match decide_insertion(self.value, selection, text, &self.config) {
                        EditDecision::Admit(candidate) => {
                            let caret = selection.start + text.len();
                            self.commit(candidate, memory, |edit, value| {
                                edit.collapse_to(value, caret);
                            });
                        }
                        EditDecision::Reject => {
                            log::trace!(
                                target: "widgets.numeric_textbox",
                                "rejected insertion {text:?}"
                            );
                        }
                    }
                }

                Event::Paste(text) => {
                    let selection = self.current_selection(memory);
                    match decide_paste(self.value, selection, text, &self.config) {
                        EditDecision::Admit(candidate) => {
                            let caret = selection.start + text.len();
                            self.commit(candidate, memory, |edit, value| {
                                edit.collapse_to(value, caret);
                            });
                        }
                        EditDecision::Reject => {
                            log::trace!(
                                target: "widgets.numeric_textbox",
                                "rejected paste {text:?}"
                            );
                        }
                    }
                }

                Event::Key {
                    key: key @ (Key::ArrowUp | Key::ArrowDown),
                    pressed: true,
                    modifiers,
                    ..
                } => {
                    let direction = if *key == Key::ArrowUp {
                        StepDirection::Up
                    } else {
                        StepDirection::Down
                    };
                    if let Some(next) = step(self.value, direction, modifiers.shift, &self.config) {
                        // The stepped value is fully selected, like on focus.
                        self.commit(next, memory, |edit, value| edit.select_all(value));
                    }
                }

                Event::Key {
                    key: Key::ArrowLeft,
                    pressed: true,
                    modifiers,
                    ..
                } => {
                    if let Some(text) = self.value.as_concrete() {
                        memory.edit.clamp(text);
                        memory.edit.move_left(text, modifiers.shift);
                    }
                }

                Event::Key {
                    key: Key::ArrowRight,
                    pressed: true,
                    modifiers,
                    ..
                } => {
                    if let Some(text) = self.value.as_concrete() {
                        memory.edit.clamp(text);
                        memory.edit.move_right(text, modifiers.shift);
                    }
                }

                Event::Key {
                    key: Key::Home,
                    pressed: true,
                    modifiers,
                    ..
                } => {
                    if let Some(text) = self.value.as_concrete() {
                        memory.edit.clamp(text);
                        memory.edit.move_to_start(text, modifiers.shift);
                    }
                }

                Event::Key {
                    key: Key::End,
                    pressed: true,
                    modifiers,
                    ..
                } => {
                    if let Some(text) = self.value.as_concrete() {
                        memory.edit.clamp(text);
                        memory.edit.move_to_end(text, modifiers.shift);
                    }
                }

                Event::Key {
                    key: Key::A,
                    pressed: true,
                    modifiers,
                    ..
                } if modifiers.command || modifiers.ctrl => {
                    if let Some(text) = self.value.as_concrete() {
                        memory.edit.select_all(text);
                    }
                }

                // Deletions ride outside the validation path: only
                // character-generating keys and paste are engine-gated.
                Event::Key {
                    key: Key::Backspace,
                    pressed: true,
                    ..
                } => {
                    self.delete(memory, DeleteKind::Backward);
                }

                Event::Key {
                    key: Key::Delete,
                    pressed: true,
                    ..
                } => {
                    self.delete(memory, DeleteKind::Forward);
                }

                _ => {}
            }
        }

        if surrender && !self.propagate_escape_keydown {
            ui.input_mut(|i| {
                i.consume_key(Modifiers::NONE, Key::Escape);
            });
        }

        surrender
    }

    fn current_selection(&self, memory: &mut FieldMemory) -> SelectionRange {
        match self.value.as_concrete() {
            Some(text) => {
                memory.edit.clamp(text);
                memory.edit.selection_or_caret(text)
            }
            // The mixed regime has no text to compose against.
            None => SelectionRange::caret(0),
        }
    }

    /// Overwrite the value with `next` and let `place` position the caret
    /// or selection in the new text.
    fn commit(
        &mut self,
        next: String,
        memory: &mut FieldMemory,
        place: impl FnOnce(&mut EditState, &str),
    ) {
        *self.value = FieldValue::Concrete(next);
        if let Some(text) = self.value.as_concrete() {
            place(&mut memory.edit, text);
            memory.edit.clamp(text);
        }
    }

    fn delete(&mut self, memory: &mut FieldMemory, kind: DeleteKind) {
        let planned = match &*self.value {
            // Deleting the mixed state empties the field, exactly like
            // deleting a fully selected text.
            FieldValue::Mixed => Some((String::new(), 0)),
            FieldValue::Concrete(text) => {
                memory.edit.clamp(text);
                let range = match kind {
                    DeleteKind::Backward => memory.edit.backspace_range(text),
                    DeleteKind::Forward => memory.edit.delete_range(text),
                };
                range.map(|range| (compose(text, range, ""), range.start))
            }
        };

        if let Some((next, caret)) = planned {
            self.commit(next, memory, |edit, value| edit.collapse_to(value, caret));
        }
    }

    fn paint(
        &self,
        ui: &Ui,
        rect: Rect,
        inner_rect: Rect,
        font_id: &FontId,
        has_focus: bool,
        memory: &mut FieldMemory,
    ) {
        let visuals = ui.visuals();
        let painter = ui.painter();

        let fill = if self.disabled {
            visuals.widgets.noninteractive.bg_fill
        } else {
            visuals.extreme_bg_color
        };
        painter.rect_filled(rect, CORNER_RADIUS, fill);
        if !self.no_border {
            let stroke = if has_focus {
                visuals.selection.stroke
            } else {
                visuals.widgets.inactive.bg_stroke
            };
            painter.rect_stroke(rect, CORNER_RADIUS, stroke, StrokeKind::Outside);
        }

        let text_color = if self.disabled {
            visuals.weak_text_color()
        } else {
            visuals.text_color()
        };
        let dim_color = visuals.weak_text_color();

        if let Some(icon) = self.icon {
            painter.text(
                Pos2::new(rect.min.x + H_PADDING, rect.center().y),
                Align2::LEFT_CENTER,
                icon,
                font_id.clone(),
                dim_color,
            );
        }

        let (display, display_color) = match &*self.value {
            FieldValue::Mixed => (MIXED_STRING, dim_color),
            FieldValue::Concrete(text) if text.is_empty() => {
                (self.placeholder.unwrap_or_default(), dim_color)
            }
            FieldValue::Concrete(text) => (text.as_str(), text_color),
        };

        let row_height = ui.fonts(|f| f.row_height(font_id));
        let text_y = inner_rect.min.y + ((inner_rect.height() - row_height).max(0.0)) * 0.5;
        let clip_painter = painter.with_clip_rect(inner_rect);

        // Scroll bookkeeping happens only for a focused concrete value;
        // everything else rests at the left edge.
        let scroll_x = match self.value.as_concrete() {
            Some(text) if has_focus => {
                memory.edit.clamp(text);
                let caret_px = measure_prefix(ui, font_id, &text[..memory.edit.caret]);
                let text_w = measure_prefix(ui, font_id, text);
                memory
                    .edit
                    .update_scroll_for_caret(caret_px, text_w, inner_rect.width());
                memory.edit.scroll_x
            }
            _ => {
                memory.edit.scroll_x = 0.0;
                0.0
            }
        };
        let text_x = inner_rect.min.x - scroll_x;

        if has_focus && !self.disabled {
            let selection_band = match &*self.value {
                // The mixed placeholder reads as fully selected.
                FieldValue::Mixed => {
                    let w = measure_prefix(ui, font_id, display);
                    (w > 0.0).then_some((0.0, w))
                }
                FieldValue::Concrete(text) => memory.edit.selection(text).map(|selection| {
                    let x0 = measure_prefix(ui, font_id, &text[..selection.start]);
                    let x1 = measure_prefix(ui, font_id, &text[..selection.end]);
                    (x0, x1)
                }),
            };
            if let Some((x0, x1)) = selection_band {
                let band = Rect::from_min_max(
                    Pos2::new(text_x + x0, text_y),
                    Pos2::new(text_x + x1, text_y + row_height),
                );
                clip_painter.rect_filled(band, 0.0, visuals.selection.bg_fill);
            }
        }

        clip_painter.text(
            Pos2::new(text_x, text_y),
            Align2::LEFT_TOP,
            display,
            font_id.clone(),
            display_color,
        );

        if has_focus && !self.disabled
            && let Some(text) = self.value.as_concrete()
            && memory.edit.selection(text).is_none()
        {
            let caret_px = measure_prefix(ui, font_id, &text[..memory.edit.caret]);
            let caret_x = (text_x + caret_px).round();
            let caret_rect = Rect::from_min_size(
                Pos2::new(caret_x, text_y),
                Vec2::new(1.0, row_height),
            );
            clip_painter.rect_filled(caret_rect, 0.0, text_color);
        }
    }
}

#[derive(Clone, Copy)]
enum DeleteKind {
    Backward,
    Forward,
}

/// Pixel width of a prefix substring. Color never affects metrics.
fn measure_prefix(ui: &Ui, font_id: &FontId, text: &str) -> f32 {
    if text.is_empty() {
        return 0.0;
    }
    ui.fonts(|f| {
        f.layout_no_wrap(text.to_owned(), font_id.clone(), Color32::WHITE)
            .rect
            .width()
    })
}
