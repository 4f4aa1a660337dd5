use anyhow::{Context, Result};
use chrono::Local;
use eframe::egui;
use egui::{Color32, RichText};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::api::{format_week_range, start_of_week, MockStore};
use crate::config::{Config, ViewMode};
use crate::planner::{format_hours, PlannerSession};
use super::views::{self, PlannerActions, ViewContext};

// Results arrive over a channel, so keep polling while requests are in flight
const POLL_INTERVAL: Duration = Duration::from_millis(50);

pub struct PlannerApp {
    config: Config,
    session: PlannerSession<MockStore>,

    // Owns the worker threads the session spawns store calls on
    _runtime: tokio::runtime::Runtime,
}

impl PlannerApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: Config) -> Result<Self> {
        super::setup_fonts(&cc.egui_ctx);
        super::setup_theme(&cc.egui_ctx);

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_time()
            .build()
            .context("Failed to create tokio runtime")?;

        let store = Arc::new(MockStore::new(config.store_latency()));
        let mut session = PlannerSession::new(
            store,
            runtime.handle().clone(),
            config.worker_id.clone(),
            Local::now().date_naive(),
            config.policy,
            config.view_mode,
        );
        session.open();

        Ok(Self {
            config,
            session,
            _runtime: runtime,
        })
    }

    fn save_settings(&mut self) {
        if let Err(e) = self.config.save() {
            warn!(error = %e, "failed to save settings");
        }
    }

    fn set_view(&mut self, view: ViewMode) {
        if self.session.view() == view {
            return;
        }
        self.session.release_pointer();
        self.session.set_view(view);
        self.config.view_mode = view;
        self.save_settings();
    }

    fn apply_actions(&mut self, actions: PlannerActions) {
        let session = &mut self.session;

        if let Some((day, preset)) = actions.set_preset {
            session.set_simple_preset(day, preset);
        }
        if let Some(day) = actions.cycle {
            session.cycle_preset(day);
        }
        if let Some(day) = actions.apply_preset {
            session.apply_simple_preset(day);
        }
        if let Some(day) = actions.copy_previous {
            if !session.copy_from_previous_day(day) {
                debug!(day = day.key(), "nothing to copy from previous day");
            }
        }
        if let Some(day) = actions.clear {
            session.clear_day(day);
        }
        if let Some(day) = actions.fine_tune {
            if session.fine_tune(day) {
                self.config.view_mode = ViewMode::Detailed;
                self.save_settings();
            }
        }

        let session = &mut self.session;
        if let Some((day, hour)) = actions.press {
            session.press_track(day, hour);
        }
        if let Some(hour) = actions.drag_to {
            session.drag_to(hour);
        }
        if actions.release {
            session.release_pointer();
        }
    }

    fn render_header(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            // Week navigation pill
            egui::Frame::none()
                .fill(Color32::from_rgb(42, 54, 76))
                .rounding(egui::Rounding::same(12.0))
                .inner_margin(egui::Margin::symmetric(8.0, 4.0))
                .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        let left_arrow = ui.add(egui::Label::new(
                            RichText::new(egui_phosphor::regular::CARET_LEFT).size(14.0)
                        ).sense(egui::Sense::click()));
                        if left_arrow.hovered() {
                            ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
                        }
                        if left_arrow.clicked() {
                            self.session.previous_week();
                        }

                        ui.add_space(4.0);
                        // Min width for the longest range, e.g. "Sep 28-Oct 4, 2026"
                        ui.allocate_ui_with_layout(
                            egui::vec2(130.0, 14.0),
                            egui::Layout::centered_and_justified(egui::Direction::LeftToRight),
                            |ui| {
                                ui.label(RichText::new(format_week_range(self.session.week_start())).size(14.0));
                            },
                        );
                        ui.add_space(4.0);

                        let right_arrow = ui.add(egui::Label::new(
                            RichText::new(egui_phosphor::regular::CARET_RIGHT).size(14.0)
                        ).sense(egui::Sense::click()));
                        if right_arrow.hovered() {
                            ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
                        }
                        if right_arrow.clicked() {
                            self.session.next_week();
                        }
                    });
                });

            let today = Local::now().date_naive();
            let on_current_week = self.session.week_start() == start_of_week(today);
            let this_week = format!("{} This week", egui_phosphor::regular::CALENDAR_CHECK);
            if ui.add_enabled(!on_current_week, egui::Button::new(this_week)).clicked() {
                self.session.go_to_week(today);
            }

            ui.add_space(16.0);
            let summary = self.session.summary();
            ui.label(
                RichText::new(format!(
                    "{} / {} hrs scheduled",
                    format_hours(summary.weekly_hours),
                    format_hours(summary.target_hours)
                ))
                .size(14.0)
                .color(Color32::WHITE)
                .strong(),
            );
            ui.label(
                RichText::new(format!("{} of {} shifts", summary.shift_count, summary.target_shifts))
                    .size(13.0)
                    .color(super::theme::secondary_text()),
            );
            let (_, success, warning) = super::theme::status_colors();
            if summary.target_met() {
                ui.label(RichText::new("Target met").size(13.0).color(success));
            } else {
                ui.label(
                    RichText::new(format!("{} hrs remaining", format_hours(summary.remaining_hours)))
                        .size(13.0)
                        .color(warning),
                );
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let submit_label = if self.session.is_submitting() {
                    format!("{} Submitting...", egui_phosphor::regular::PAPER_PLANE_TILT)
                } else {
                    format!("{} Submit", egui_phosphor::regular::PAPER_PLANE_TILT)
                };
                let submit = ui.add_enabled(!self.session.is_busy(), egui::Button::new(submit_label));
                if submit.clicked() {
                    if let Err(refused) = self.session.submit() {
                        debug!(%refused, "submit not sent");
                    }
                }

                let copy_label = format!("{} Copy last week", egui_phosphor::regular::CALENDAR_BLANK);
                if ui.add_enabled(!self.session.is_loading(), egui::Button::new(copy_label)).clicked() {
                    self.session.copy_last_week();
                }

                ui.add_space(12.0);
                let mut view = self.session.view();
                ui.selectable_value(&mut view, ViewMode::Detailed, "Detailed");
                ui.selectable_value(&mut view, ViewMode::Simple, "Simple");
                self.set_view(view);
            });
        });

        let busy_label = if self.session.is_loading() {
            Some("Loading schedule...")
        } else if self.session.is_submitting() {
            Some("Submitting schedule...")
        } else {
            None
        };
        views::render_status(ui, self.session.error(), self.session.feedback(), busy_label);
    }
}

impl eframe::App for PlannerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Pinch-to-zoom (trackpad pinch or Ctrl+scroll)
        let zoom_delta = ctx.input(|i| i.zoom_delta());
        if zoom_delta != 1.0 {
            self.config.font_scale = (self.config.font_scale * zoom_delta).clamp(0.75, 2.5);
            if (zoom_delta - 1.0).abs() > 0.01 {
                self.save_settings();
            }
        }
        ctx.set_pixels_per_point(self.config.font_scale);

        if self.session.check_async_results() {
            ctx.request_repaint();
        }
        if self.session.is_busy() {
            ctx.request_repaint_after(POLL_INTERVAL);
        }

        egui::TopBottomPanel::top("planner_header")
            .frame(egui::Frame::none().inner_margin(egui::Margin::symmetric(16.0, 12.0)).fill(ctx.style().visuals.panel_fill))
            .show(ctx, |ui| {
                self.render_header(ui);
            });

        let actions = egui::CentralPanel::default()
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        let view = ViewContext {
                            schedule: self.session.schedule(),
                            policy: self.session.policy(),
                            clock: self.config.clock_format,
                            dragging_day: self.session.dragging_day(),
                            enabled: !self.session.is_loading(),
                        };
                        match self.session.view() {
                            ViewMode::Simple => views::render_simple_view(ui, &view),
                            ViewMode::Detailed => views::render_detailed_view(ui, &view),
                        }
                    })
                    .inner
            })
            .inner;

        self.apply_actions(actions);
    }
}

impl Drop for PlannerApp {
    fn drop(&mut self) {
        // Drops pending responses and any drag still bound to the pointer
        self.session.close();
        self.save_settings();
    }
}
