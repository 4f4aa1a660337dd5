use egui::{Align2, Color32, FontId, Rect, RichText, Sense, Stroke, Ui};

use crate::api::{format_clock_time, Day, ShiftId, WeeklySchedule, PRESETS};
use crate::config::ClockFormat;
use crate::planner::{
    continuation_label, day_card_labels, detailed_row_labels, hour_from_pointer, overflow_from_previous,
    visible_hours, SchedulePolicy,
};
use super::theme::{block_colors, card_colors, overflow_color, secondary_text, track_colors};

const TRACK_HEIGHT: f32 = 44.0;
const DAY_LABEL_WIDTH: f32 = 96.0;
const TICK_HOURS: [f64; 5] = [0.0, 6.0, 12.0, 18.0, 24.0];

/// What the user asked for this frame; the app applies it to the session
#[derive(Default)]
pub struct PlannerActions {
    pub set_preset: Option<(Day, Option<ShiftId>)>,
    pub cycle: Option<Day>,
    pub fine_tune: Option<Day>,
    pub apply_preset: Option<Day>,
    pub copy_previous: Option<Day>,
    pub clear: Option<Day>,
    // Pointer input for the detailed timeline
    pub press: Option<(Day, f64)>,
    pub drag_to: Option<f64>,
    pub release: bool,
}

/// Everything the views read from the session
pub struct ViewContext<'a> {
    pub schedule: &'a WeeklySchedule,
    pub policy: &'a SchedulePolicy,
    pub clock: ClockFormat,
    pub dragging_day: Option<Day>,
    pub enabled: bool,
}

// ============================================================================
// Simple view
// ============================================================================

pub fn render_simple_view(ui: &mut Ui, view: &ViewContext<'_>) -> PlannerActions {
    let mut actions = PlannerActions::default();

    ui.add_enabled_ui(view.enabled, |ui| {
        for day in Day::WORK_DAYS {
            render_day_card(ui, view, day, &mut actions);
        }

        ui.add_space(8.0);
        egui::CollapsingHeader::new(RichText::new("Weekend (optional)").size(14.0))
            .default_open(Day::WEEKEND.iter().any(|&d| !view.schedule.simple_view[d].is_empty()))
            .show(ui, |ui| {
                for day in Day::WEEKEND {
                    render_day_card(ui, view, day, &mut actions);
                }
            });
    });

    actions
}

fn render_day_card(ui: &mut Ui, view: &ViewContext<'_>, day: Day, actions: &mut PlannerActions) {
    let (bg, border, border_scheduled) = card_colors();
    let selection = view.schedule.selected_preset(day);
    let scheduled = view.schedule.detailed_view[day].is_some() || selection.is_some();
    let (heading, time_line) = day_card_labels(view.schedule, day, view.policy, view.clock);

    egui::Frame::none()
        .fill(bg)
        .stroke(Stroke::new(1.0, if scheduled { border_scheduled } else { border }))
        .rounding(egui::Rounding::same(8.0))
        .inner_margin(egui::Margin::symmetric(14.0, 10.0))
        .show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.label(RichText::new(day.label()).size(15.0).strong());
                ui.add_space(12.0);

                // Clicking the summary steps through morning, afternoon, night, off
                let summary = ui.add(
                    egui::Label::new(RichText::new(format!("{}  ·  {}", heading, time_line)).size(14.0))
                        .sense(Sense::click()),
                );
                if summary.hovered() {
                    ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
                }
                if summary.clicked() {
                    actions.cycle = Some(day);
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if day.is_work_day() {
                        let fine_tune = format!("{} Fine tune", egui_phosphor::regular::SLIDERS_HORIZONTAL);
                        if ui.button(fine_tune).clicked() {
                            actions.fine_tune = Some(day);
                        }
                    }
                    if ui.selectable_label(!scheduled, "Off").clicked() {
                        actions.set_preset = Some((day, None));
                    }
                    for preset in PRESETS.iter().rev() {
                        if ui.selectable_label(selection == Some(preset.id), preset.label).clicked() {
                            actions.set_preset = Some((day, Some(preset.id)));
                        }
                    }
                });
            });

            if let Some(continuation) = continuation_label(view.schedule, day, view.policy, view.clock) {
                ui.label(RichText::new(continuation).size(12.0).color(secondary_text()));
            }
        });
    ui.add_space(6.0);
}

// ============================================================================
// Detailed view
// ============================================================================

pub fn render_detailed_view(ui: &mut Ui, view: &ViewContext<'_>) -> PlannerActions {
    let mut actions = PlannerActions::default();
    let mut tracks: Vec<(Day, Rect)> = Vec::with_capacity(Day::WORK_DAYS.len());

    ui.add_enabled_ui(view.enabled, |ui| {
        render_hour_ruler(ui, view.clock);

        for day in Day::WORK_DAYS {
            let track = render_day_row(ui, view, day, &mut actions);
            tracks.push((day, track));
        }
    });

    // The pointer stays bound to the grabbed day's track until release,
    // even when it leaves the track or the window
    if let Some(day) = view.dragging_day {
        let (released, down, latest) = ui.ctx().input(|i| {
            (
                i.pointer.primary_released(),
                i.pointer.primary_down(),
                i.pointer.latest_pos(),
            )
        });
        if released || !down {
            actions.release = true;
        } else if let (Some(pos), Some((_, track))) = (latest, tracks.iter().find(|(d, _)| *d == day)) {
            actions.drag_to = hour_from_pointer(pos.x, track.left(), track.width());
        }
        ui.ctx().set_cursor_icon(egui::CursorIcon::Grabbing);
    }

    actions
}

fn render_hour_ruler(ui: &mut Ui, clock: ClockFormat) {
    let (_, _, tick_label) = track_colors();
    ui.horizontal(|ui| {
        ui.add_space(DAY_LABEL_WIDTH);
        let (rect, _) = ui.allocate_exact_size(egui::vec2(ui.available_width(), 16.0), Sense::hover());
        for hour in TICK_HOURS {
            let x = hour_to_x(rect, hour);
            let align = if hour == 0.0 {
                Align2::LEFT_CENTER
            } else if hour == 24.0 {
                Align2::RIGHT_CENTER
            } else {
                Align2::CENTER_CENTER
            };
            ui.painter().text(
                egui::pos2(x, rect.center().y),
                align,
                format_clock_time(hour, clock),
                FontId::proportional(11.0),
                tick_label,
            );
        }
    });
}

/// One work day: label, timeline and row actions. Returns the track rect.
fn render_day_row(ui: &mut Ui, view: &ViewContext<'_>, day: Day, actions: &mut PlannerActions) -> Rect {
    let mut track = Rect::NOTHING;

    ui.horizontal(|ui| {
        ui.allocate_ui_with_layout(
            egui::vec2(DAY_LABEL_WIDTH, TRACK_HEIGHT),
            egui::Layout::left_to_right(egui::Align::Center),
            |ui| {
                ui.label(RichText::new(day.label()).size(14.0).strong());
            },
        );

        let width = ui.available_width();
        let (rect, response) = ui.allocate_exact_size(egui::vec2(width, TRACK_HEIGHT), Sense::click_and_drag());
        track = rect;
        paint_track(ui, view, day, rect);

        if response.hovered() && view.dragging_day.is_none() {
            ui.ctx().set_cursor_icon(egui::CursorIcon::Grab);
        }

        let pressed = ui.ctx().input(|i| i.pointer.primary_pressed());
        if pressed && response.hovered() {
            let pointer = ui.ctx().input(|i| i.pointer.interact_pos());
            if let Some(hour) = pointer.and_then(|pos| hour_from_pointer(pos.x, rect.left(), rect.width())) {
                actions.press = Some((day, hour));
            }
        }
    });

    ui.horizontal(|ui| {
        ui.add_space(DAY_LABEL_WIDTH);
        let (line, simple_summary) = detailed_row_labels(view.schedule, day, view.policy, view.clock);
        ui.vertical(|ui| {
            ui.label(RichText::new(line).size(12.0).color(secondary_text()));
            if let Some(summary) = &simple_summary {
                ui.label(RichText::new(summary).size(11.0).color(secondary_text()));
            }
        });

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if view.schedule.detailed_view[day].is_some() {
                let clear = format!("{} Clear", egui_phosphor::regular::X);
                if ui.small_button(clear).clicked() {
                    actions.clear = Some(day);
                }
            }
            if day.previous_work_day().is_some() {
                let copy = format!("{} Copy previous day", egui_phosphor::regular::COPY);
                if ui.small_button(copy).clicked() {
                    actions.copy_previous = Some(day);
                }
            }
            if simple_summary.is_some() {
                let apply = format!("{} Apply simple preset", egui_phosphor::regular::ARROW_COUNTER_CLOCKWISE);
                if ui.small_button(apply).clicked() {
                    actions.apply_preset = Some(day);
                }
            }
        });
    });
    ui.add_space(6.0);

    track
}

fn paint_track(ui: &Ui, view: &ViewContext<'_>, day: Day, rect: Rect) {
    let painter = ui.painter_at(rect);
    let (track_bg, tick, _) = track_colors();
    painter.rect_filled(rect, 6.0, track_bg);

    for hour in TICK_HOURS {
        let x = hour_to_x(rect, hour);
        painter.line_segment(
            [egui::pos2(x, rect.top()), egui::pos2(x, rect.bottom())],
            Stroke::new(1.0, tick),
        );
    }

    // Tail of the previous work day's block
    let carried = overflow_from_previous(view.schedule, day, view.policy);
    if carried > 0.0 {
        let tail = Rect::from_min_max(
            egui::pos2(rect.left(), rect.top() + 4.0),
            egui::pos2(hour_to_x(rect, carried), rect.bottom() - 4.0),
        );
        painter.rect_filled(tail, 4.0, overflow_color());
    }

    let Some(block) = view.schedule.detailed_view[day] else {
        return;
    };
    let visible = visible_hours(view.schedule, day, view.policy);
    let block_rect = Rect::from_min_max(
        egui::pos2(hour_to_x(rect, block.start_hour), rect.top() + 4.0),
        egui::pos2(hour_to_x(rect, block.start_hour + visible), rect.bottom() - 4.0),
    );
    let (fill, text) = block_colors(view.dragging_day == Some(day));
    painter.rect_filled(block_rect, 4.0, fill);
    if block_rect.width() > 40.0 {
        painter.text(
            block_rect.left_center() + egui::vec2(6.0, 0.0),
            Align2::LEFT_CENTER,
            format_clock_time(block.start_hour, view.clock),
            FontId::proportional(12.0),
            text,
        );
    }
}

fn hour_to_x(rect: Rect, hour: f64) -> f32 {
    rect.left() + rect.width() * (hour / 24.0) as f32
}

/// Status line: error wins over feedback, a loading hint when neither is set
pub fn render_status(ui: &mut Ui, error: Option<&str>, feedback: Option<&str>, busy_label: Option<&str>) {
    let (error_color, success_color, _) = super::theme::status_colors();
    if let Some(error) = error {
        ui.label(RichText::new(format!("{} {}", egui_phosphor::regular::WARNING_CIRCLE, error)).color(error_color));
    } else if let Some(feedback) = feedback {
        ui.label(RichText::new(format!("{} {}", egui_phosphor::regular::CHECK_CIRCLE, feedback)).color(success_color));
    } else if let Some(busy) = busy_label {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label(RichText::new(busy).color(Color32::from_gray(180)));
        });
    }
}
