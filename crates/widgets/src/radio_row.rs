//! A one-of-N radio row.
//!
//! Passive renderer: exclusivity is inherent to the single `Option<usize>`
//! the caller owns, so there is no engine involvement and no group
//! bookkeeping.

use egui::{Align2, FontId, Pos2, Rect, Response, Sense, StrokeKind, TextStyle, Ui, Vec2};

const CIRCLE_DIAMETER: f32 = 14.0;
const LABEL_GAP: f32 = 5.0;
const OPTION_GAP: f32 = 12.0;
const V_PADDING: f32 = 3.0;

pub struct RadioRowResponse {
    /// One response per option, in order.
    pub responses: Vec<Response>,
    pub changed: bool,
}

/// Builder-style radio row bound to a caller-owned selection index.
pub struct RadioRow<'a> {
    selected: &'a mut Option<usize>,
    options: &'a [&'a str],
    name: Option<&'a str>,
    disabled: bool,
    #[allow(clippy::type_complexity)]
    on_value_change: Option<Box<dyn FnMut(usize, Option<&str>) + 'a>>,
}

impl<'a> RadioRow<'a> {
    pub fn new(selected: &'a mut Option<usize>, options: &'a [&'a str]) -> Self {
        Self {
            selected,
            options,
            name: None,
            disabled: false,
            on_value_change: None,
        }
    }

    /// Row name passed back through the change callback.
    pub fn name(mut self, name: &'a str) -> Self {
        self.name = Some(name);
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Fired with the newly selected index when the selection changes.
    pub fn on_value_change(mut self, callback: impl FnMut(usize, Option<&str>) + 'a) -> Self {
        self.on_value_change = Some(Box::new(callback));
        self
    }

    pub fn show(mut self, ui: &mut Ui) -> RadioRowResponse {
        let font_id = TextStyle::Body.resolve(ui.style());
        let row_height = ui.fonts(|f| f.row_height(&font_id)) + 2.0 * V_PADDING;
        let sense = if self.disabled {
            Sense::hover()
        } else {
            Sense::click()
        };

        let mut responses = Vec::with_capacity(self.options.len());
        let mut changed = false;

        ui.horizontal(|ui| {
            for (index, label) in self.options.iter().enumerate() {
                let label_w = measure_label(ui, &font_id, label);
                let desired =
                    Vec2::new(CIRCLE_DIAMETER + LABEL_GAP + label_w + OPTION_GAP, row_height);
                let (rect, response) = ui.allocate_exact_size(desired, sense);

                if response.clicked() && *self.selected != Some(index) {
                    *self.selected = Some(index);
                    changed = true;
                    if let Some(callback) = &mut self.on_value_change {
                        callback(index, self.name);
                    }
                }

                if ui.is_rect_visible(rect) {
                    self.paint_option(ui, rect, &font_id, label, index, &response);
                }

                responses.push(response);
            }
        });

        if changed {
            ui.ctx().request_repaint();
        }

        RadioRowResponse { responses, changed }
    }

    fn paint_option(
        &self,
        ui: &Ui,
        rect: Rect,
        font_id: &FontId,
        label: &str,
        index: usize,
        response: &Response,
    ) {
        let visuals = ui.visuals();
        let painter = ui.painter();

        let is_selected = *self.selected == Some(index);
        let widget = if self.disabled {
            &visuals.widgets.noninteractive
        } else if response.hovered() {
            &visuals.widgets.hovered
        } else {
            &visuals.widgets.inactive
        };

        let radius = CIRCLE_DIAMETER * 0.5;
        let center = Pos2::new(rect.min.x + radius, rect.center().y);
        painter.circle(center, radius, visuals.extreme_bg_color, widget.bg_stroke);
        if is_selected {
            let dot_color = if self.disabled {
                visuals.weak_text_color()
            } else {
                visuals.selection.stroke.color
            };
            painter.circle_filled(center, radius * 0.45, dot_color);
        }

        let text_color = if self.disabled {
            visuals.weak_text_color()
        } else {
            visuals.text_color()
        };
        painter.text(
            Pos2::new(rect.min.x + CIRCLE_DIAMETER + LABEL_GAP, rect.center().y),
            Align2::LEFT_CENTER,
            label,
            font_id.clone(),
            text_color,
        );

        // Keep a faint focus/press outline consistent with the textbox.
        if !self.disabled && response.is_pointer_button_down_on() {
            painter.rect_stroke(
                rect.shrink(1.0),
                2.0,
                visuals.selection.stroke,
                StrokeKind::Inside,
            );
        }
    }
}

fn measure_label(ui: &Ui, font_id: &FontId, text: &str) -> f32 {
    ui.fonts(|f| {
        f.layout_no_wrap(text.to_owned(), font_id.clone(), egui::Color32::WHITE)
            .rect
            .width()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{CentralPanel, Context, Event, Modifiers, PointerButton, RawInput};
    use std::cell::RefCell;

    fn raw_input(events: Vec<Event>) -> RawInput {
        RawInput {
            events,
            screen_rect: Some(Rect::from_min_size(
                Pos2::new(0.0, 0.0),
                Vec2::new(800.0, 600.0),
            )),
            ..Default::default()
        }
    }

    fn run_frame(
        ctx: &Context,
        raw: RawInput,
        selected: &mut Option<usize>,
        disabled: bool,
    ) -> (Vec<Rect>, bool) {
        let out = RefCell::new((Vec::new(), false));
        ctx.run(raw, |ctx| {
            CentralPanel::default().show(ctx, |ui| {
                let result = RadioRow::new(selected, &["Left", "Center", "Right"])
                    .disabled(disabled)
                    .show(ui);
                let rects = result.responses.iter().map(|r| r.rect).collect();
                *out.borrow_mut() = (rects, result.changed);
            });
        });
        out.into_inner()
    }

    fn click(ctx: &Context, selected: &mut Option<usize>, pos: Pos2, disabled: bool) -> bool {
        run_frame(
            ctx,
            raw_input(vec![
                Event::PointerMoved(pos),
                Event::PointerButton {
                    pos,
                    button: PointerButton::Primary,
                    pressed: true,
                    modifiers: Modifiers::NONE,
                },
            ]),
            selected,
            disabled,
        );
        let (_, changed) = run_frame(
            ctx,
            raw_input(vec![Event::PointerButton {
                pos,
                button: PointerButton::Primary,
                pressed: false,
                modifiers: Modifiers::NONE,
            }]),
            selected,
            disabled,
        );
        changed
    }

    #[test]
    fn clicking_an_option_selects_it_exclusively() {
        let ctx = Context::default();
        let mut selected = None;

        let (rects, _) = run_frame(&ctx, raw_input(Vec::new()), &mut selected, false);
        assert_eq!(rects.len(), 3);

        assert!(click(&ctx, &mut selected, rects[1].center(), false));
        assert_eq!(selected, Some(1));

        assert!(click(&ctx, &mut selected, rects[2].center(), false));
        assert_eq!(selected, Some(2));
    }

    #[test]
    fn clicking_the_selected_option_reports_no_change() {
        let ctx = Context::default();
        let mut selected = Some(0);

        let (rects, _) = run_frame(&ctx, raw_input(Vec::new()), &mut selected, false);
        assert!(!click(&ctx, &mut selected, rects[0].center(), false));
        assert_eq!(selected, Some(0));
    }

    #[test]
    fn disabled_rows_ignore_clicks() {
        let ctx = Context::default();
        let mut selected = Some(0);

        let (rects, _) = run_frame(&ctx, raw_input(Vec::new()), &mut selected, true);
        assert!(!click(&ctx, &mut selected, rects[1].center(), true));
        assert_eq!(selected, Some(0));
    }
}
